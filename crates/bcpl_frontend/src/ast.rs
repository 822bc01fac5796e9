use crate::Node;

/// A program segment: its declarations and definitions, each in source
/// order.
#[derive(Node!, Default)]
pub struct Program {
    pub decls: Vec<Decl>,
    pub defs: Vec<Def>,
}

#[derive(Node!)]
pub struct Name {
    pub value: String,
}

impl Name {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
        }
    }
}

#[derive(Node!)]
pub struct NameList {
    pub names: Vec<Name>,
}

impl NameList {
    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

#[derive(Node!)]
pub enum Expr {
    Const(ConstExpr),
}

#[derive(Node!)]
pub struct ConstExpr {
    pub value: i64,
}

#[derive(Node!)]
pub struct ExprList {
    pub exprs: Vec<Expr>,
}

impl ExprList {
    pub fn len(&self) -> usize {
        self.exprs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.exprs.is_empty()
    }
}

/// A `global` or `manifest` declaration.
#[derive(Node!)]
pub enum Decl {
    Global(GlobalDecl),
    Constant(ConstantDecl),
}

impl Decl {
    pub fn var_decls(&self) -> &[VarDecl] {
        match self {
            Decl::Global(decl) => &decl.items,
            Decl::Constant(decl) => &decl.items,
        }
    }
}

#[derive(Node!)]
pub struct GlobalDecl {
    pub items: Vec<VarDecl>,
}

#[derive(Node!)]
pub struct ConstantDecl {
    pub items: Vec<VarDecl>,
}

#[derive(Node!)]
pub struct VarDecl {
    pub name: String,
    pub value: i64,
}

#[derive(Node!)]
pub enum Def {
    Simple(SimpleDef),
    Vec(VecDef),
    And(AndDef),
}

/// `let A, B = 1, 2`. Always binds as many names as it has values.
#[derive(Node!)]
pub struct SimpleDef {
    pub names: NameList,
    pub exprs: ExprList,
}

#[derive(Node!)]
pub struct VecDef {
    pub name: String,
    pub size: Expr,
}

/// Simultaneous definitions joined by `and`, nested to the left.
#[derive(Node!)]
pub struct AndDef {
    pub left: Box<Def>,
    pub right: Box<Def>,
}
