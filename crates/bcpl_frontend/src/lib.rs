#[macro_use]
extern crate macro_rules_attribute;

mod lexer;
mod parser;

pub mod ast;
pub mod token;

pub use lexer::Lexer;
pub use parser::{ParseError, ParseErrorKind, ParseResult, Parser};

use ast::Program;
use token::{Keywords, Token};

derive_alias! {
    #[derive(Node!)] = #[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)];
    #[derive(NodeCopy!)] = #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)];
}

/// Lex the whole of `source`, including the final end-of-file token.
pub fn lex<'src>(source: &'src str, keywords: &Keywords) -> Vec<Token<'src>> {
    Lexer::new(source, keywords).lex()
}

pub fn parse(source: &str, keywords: &Keywords) -> ParseResult<Program> {
    Parser::new(source, keywords).parse()
}
