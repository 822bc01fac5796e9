
use bcpl_session::diagnostics::prelude::*;
use tracing::{debug, warn};

use crate::ast::*;
use crate::lexer::Lexer;
use crate::token::{Keywords, Token, TokenKind};

#[derive(thiserror::Error, serde::Serialize, Debug, Clone, PartialEq, Eq)]
#[error("{kind}")]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub span: Span,
}

#[derive(thiserror::Error, serde::Serialize, Debug, Clone, PartialEq, Eq)]
pub enum ParseErrorKind {
    #[error("unrecognized character `{0}`")]
    Lexical(String),

    #[error("unterminated string constant")]
    UnterminatedString,

    #[error("expected {expected}, found {found}")]
    Expected { expected: String, found: String },

    #[error("{names} name(s) defined but {exprs} value(s) given")]
    ArityMismatch { names: usize, exprs: usize },

    #[error("number `{0}` is too large")]
    NumberTooLarge(String),
}

impl IntoDiagnostic<SourceId> for ParseError {
    fn into_diagnostic(self, source_id: &SourceId) -> Diagnostic {
        Diagnostic::error()
            .with_message("syntax error")
            .with_snippet(Snippet::primary(
                self.kind.to_string(),
                *source_id,
                self.span,
            ))
    }
}

pub type ParseResult<T> = Result<T, ParseError>;

pub struct Parser<'src, 'kw> {
    lexer: Lexer<'src, 'kw>,

    current: Token<'src>,
    prev_span: Span,
}

impl<'src, 'kw> Parser<'src, 'kw> {
    pub fn new(source: &'src str, keywords: &'kw Keywords) -> Self {
        let mut lexer = Lexer::new(source, keywords);
        let current = next_significant(&mut lexer);

        Self {
            lexer,
            current,
            prev_span: Span::empty(0),
        }
    }

    /// Parse a whole program segment, stopping at the first error.
    pub fn parse(mut self) -> ParseResult<Program> {
        let mut program = Program::default();

        loop {
            match self.current.kind {
                TokenKind::Global | TokenKind::Manifest => {
                    let decl = self.parse_decl()?;
                    debug!(?decl, "parsed declaration");
                    program.decls.push(decl);
                }

                TokenKind::Let => {
                    let def = self.parse_def()?;
                    debug!(?def, "parsed definition");
                    program.defs.push(def);
                }

                TokenKind::Eof => return Ok(program),

                _ => return Err(self.error_expected("a declaration or definition")),
            }
        }
    }

    fn advance(&mut self) -> Token<'src> {
        let next = next_significant(&mut self.lexer);
        let token = std::mem::replace(&mut self.current, next);
        self.prev_span = token.span;
        token
    }

    fn eat(&mut self, kind: TokenKind) -> bool {
        let matches = self.current.kind == kind;
        if matches {
            self.advance();
        }
        matches
    }

    fn expect(&mut self, kind: TokenKind) -> ParseResult<Token<'src>> {
        if self.current.kind == kind {
            Ok(self.advance())
        } else {
            Err(self.error_expected(kind.to_string()))
        }
    }

    /// `global $( A: 1; B: 2 $)` or `manifest $( N = 20000 $)`
    fn parse_decl(&mut self) -> ParseResult<Decl> {
        let keyword = self.advance();

        self.expect(TokenKind::SectBra)?;

        let mut items = vec![self.parse_var_decl()?];
        while self.eat(TokenKind::Semicolon) {
            items.push(self.parse_var_decl()?);
        }

        self.expect(TokenKind::SectKet)?;

        Ok(match keyword.kind {
            TokenKind::Global => Decl::Global(GlobalDecl { items }),
            _ => Decl::Constant(ConstantDecl { items }),
        })
    }

    fn parse_var_decl(&mut self) -> ParseResult<VarDecl> {
        let name = self.expect(TokenKind::Name)?;

        if !(self.eat(TokenKind::Eq) || self.eat(TokenKind::Colon)) {
            return Err(self.error_expected("`=` or `:`"));
        }

        let value = self.parse_number()?;

        Ok(VarDecl {
            name: name.text.to_owned(),
            value,
        })
    }

    fn parse_number(&mut self) -> ParseResult<i64> {
        let token = self.expect(TokenKind::Number)?;

        token.text.parse().map_err(|_| ParseError {
            kind: ParseErrorKind::NumberTooLarge(token.text.to_owned()),
            span: token.span,
        })
    }

    fn parse_expr(&mut self) -> ParseResult<Expr> {
        let value = self.parse_number()?;
        Ok(Expr::Const(ConstExpr { value }))
    }

    fn parse_expr_list(&mut self) -> ParseResult<ExprList> {
        let mut exprs = vec![self.parse_expr()?];
        while self.eat(TokenKind::Comma) {
            exprs.push(self.parse_expr()?);
        }
        Ok(ExprList { exprs })
    }

    fn parse_def(&mut self) -> ParseResult<Def> {
        self.expect(TokenKind::Let)?;
        self.parse_simul_def()
    }

    fn parse_simul_def(&mut self) -> ParseResult<Def> {
        let mut def = self.parse_single_def()?;

        while self.eat(TokenKind::And) {
            let right = self.parse_single_def()?;
            def = Def::And(AndDef {
                left: Box::new(def),
                right: Box::new(right),
            });
        }

        Ok(def)
    }

    fn parse_single_def(&mut self) -> ParseResult<Def> {
        let name = self.expect(TokenKind::Name)?;

        match self.current.kind {
            TokenKind::Comma | TokenKind::Eq => self.parse_var_def(name),
            _ => Err(self.error_expected("`,` or `=`")),
        }
    }

    fn parse_var_def(&mut self, first: Token<'src>) -> ParseResult<Def> {
        let mut names = vec![Name::new(first.text)];
        while self.eat(TokenKind::Comma) {
            let name = self.expect(TokenKind::Name)?;
            names.push(Name::new(name.text));
        }

        self.expect(TokenKind::Eq)?;

        if self.eat(TokenKind::Vec) {
            if names.len() > 1 {
                warn!(
                    name = first.text,
                    ignored = names.len() - 1,
                    "vector definition binds only its first name"
                );
            }

            let size = self.parse_expr()?;
            return Ok(Def::Vec(VecDef {
                name: first.text.to_owned(),
                size,
            }));
        }

        let exprs = self.parse_expr_list()?;

        if names.len() != exprs.len() {
            return Err(ParseError {
                kind: ParseErrorKind::ArityMismatch {
                    names: names.len(),
                    exprs: exprs.len(),
                },
                span: first.span.join(self.prev_span),
            });
        }

        Ok(Def::Simple(SimpleDef {
            names: NameList { names },
            exprs,
        }))
    }

    fn error_expected(&self, expected: impl Into<String>) -> ParseError {
        let found = self.current;

        let kind = match found.kind {
            TokenKind::Illegal if found.text.starts_with('"') => ParseErrorKind::UnterminatedString,
            TokenKind::Illegal => ParseErrorKind::Lexical(found.text.to_owned()),
            _ => ParseErrorKind::Expected {
                expected: expected.into(),
                found: found.describe(),
            },
        };

        ParseError {
            kind,
            span: found.span,
        }
    }
}

fn next_significant<'src>(lexer: &mut Lexer<'src, '_>) -> Token<'src> {
    loop {
        let token = lexer.next_token();
        if token.kind != TokenKind::Comment {
            return token;
        }
    }
}
