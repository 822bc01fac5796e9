use std::collections::HashMap;
use std::fmt;

use bcpl_diagnostic::span::Span;

use crate::NodeCopy;

#[derive(NodeCopy!)]
pub struct Token<'src> {
    pub kind: TokenKind,
    /// The exact source text, or the canonical text of an inserted token.
    pub text: &'src str,
    pub span: Span,
}

impl<'src> Token<'src> {
    pub fn new(kind: TokenKind, text: &'src str, span: Span) -> Self {
        Self { kind, text, span }
    }

    /// A token the lexer inserts in front of the token starting at `at`.
    pub fn synthetic(kind: TokenKind, at: usize) -> Token<'static> {
        Token {
            kind,
            text: kind.canonical_text().unwrap_or_default(),
            span: Span::empty(at),
        }
    }

    /// How the token is named in error messages.
    pub fn describe(&self) -> String {
        match self.kind {
            TokenKind::Eof => self.kind.to_string(),
            kind if kind.canonical_text().is_some() => kind.to_string(),
            kind => format!("{kind} `{}`", self.text.escape_debug()),
        }
    }
}

impl fmt::Display for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.text)
    }
}

/// BCPL canonical symbols. Reserved words are declared last, starting at
/// [`TokenKind::And`].
#[derive(NodeCopy!, PartialOrd, Ord)]
pub enum TokenKind {
    Illegal,
    Eof,
    Comment,

    Name,
    Number,
    StringConst,

    Ass,
    Colon,
    Comma,
    Cond,
    Div,
    Eq,
    Ge,
    Gr,
    Le,
    LogAnd,
    LogOr,
    Ls,
    LShift,
    Minus,
    Ne,
    Not,
    Plus,
    RBra,
    RKet,
    RShift,
    SBra,
    SectBra,
    SectKet,
    Semicolon,
    SKet,
    Star,

    And,
    Be,
    Break,
    Case,
    Default,
    Do,
    Eqv,
    False,
    Finish,
    For,
    Get,
    Global,
    Goto,
    If,
    Into,
    Let,
    Lv,
    Manifest,
    Neqv,
    Or,
    Rem,
    Repeat,
    RepeatUntil,
    RepeatWhile,
    ResultIs,
    Return,
    Rv,
    SwitchOn,
    Test,
    To,
    True,
    Unless,
    Until,
    Valof,
    Vec,
    While,
}

pub const RESERVED_WORDS: [(&str, TokenKind); 36] = [
    ("and", TokenKind::And),
    ("be", TokenKind::Be),
    ("break", TokenKind::Break),
    ("case", TokenKind::Case),
    ("default", TokenKind::Default),
    ("do", TokenKind::Do),
    ("eqv", TokenKind::Eqv),
    ("false", TokenKind::False),
    ("finish", TokenKind::Finish),
    ("for", TokenKind::For),
    ("get", TokenKind::Get),
    ("global", TokenKind::Global),
    ("goto", TokenKind::Goto),
    ("if", TokenKind::If),
    ("into", TokenKind::Into),
    ("let", TokenKind::Let),
    ("lv", TokenKind::Lv),
    ("manifest", TokenKind::Manifest),
    ("neqv", TokenKind::Neqv),
    ("or", TokenKind::Or),
    ("rem", TokenKind::Rem),
    ("repeat", TokenKind::Repeat),
    ("repeatuntil", TokenKind::RepeatUntil),
    ("repeatwhile", TokenKind::RepeatWhile),
    ("resultis", TokenKind::ResultIs),
    ("return", TokenKind::Return),
    ("rv", TokenKind::Rv),
    ("switchon", TokenKind::SwitchOn),
    ("test", TokenKind::Test),
    ("to", TokenKind::To),
    ("true", TokenKind::True),
    ("unless", TokenKind::Unless),
    ("until", TokenKind::Until),
    ("valof", TokenKind::Valof),
    ("vec", TokenKind::Vec),
    ("while", TokenKind::While),
];

impl TokenKind {
    pub fn is_reserved(self) -> bool {
        self >= TokenKind::And
    }

    /// The fixed spelling of an operator, punctuation mark or reserved word.
    pub fn canonical_text(self) -> Option<&'static str> {
        use TokenKind::*;

        let text = match self {
            Illegal | Eof | Comment | Name | Number | StringConst => return None,

            Ass => ":=",
            Colon => ":",
            Comma => ",",
            Cond => "->",
            Div => "/",
            Eq => "=",
            Ge => ">=",
            Gr => ">",
            Le => "<=",
            LogAnd => "&",
            LogOr => "|",
            Ls => "<",
            LShift => "<<",
            Minus => "-",
            Ne => "!=",
            Not => "!",
            Plus => "+",
            RBra => "(",
            RKet => ")",
            RShift => ">>",
            SBra => "[",
            SectBra => "$(",
            SectKet => "$)",
            Semicolon => ";",
            SKet => "]",
            Star => "*",

            reserved => {
                return RESERVED_WORDS
                    .iter()
                    .find(|(_, kind)| *kind == reserved)
                    .map(|(word, _)| *word)
            }
        };

        Some(text)
    }

    /// Tokens that can end a command. A newline after one of these may
    /// separate two commands.
    pub fn is_command_end(self) -> bool {
        use TokenKind::*;

        matches!(
            self,
            Break
                | Return
                | Finish
                | Repeat
                | SKet
                | RKet
                | SectKet
                | Name
                | StringConst
                | Number
                | True
                | False
        )
    }

    /// Tokens that can start a command, so a `;` may be inserted before them
    /// on a new line.
    pub fn is_semi_start(self) -> bool {
        use TokenKind::*;

        self.is_do_start() || matches!(self, SectBra | RBra | Valof | Lv | Rv | Name)
    }

    /// Keywords that can start a command, so a `do` may be inserted before
    /// them on the same line.
    pub fn is_do_start(self) -> bool {
        use TokenKind::*;

        matches!(
            self,
            Test | For
                | If
                | Unless
                | Until
                | While
                | Goto
                | ResultIs
                | Case
                | Default
                | Break
                | Return
                | Finish
        )
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TokenKind::Illegal => "illegal character",
            TokenKind::Eof => "end of file",
            TokenKind::Comment => "comment",
            TokenKind::Name => "name",
            TokenKind::Number => "number",
            TokenKind::StringConst => "string constant",

            kind => {
                let text = kind.canonical_text().unwrap_or_default();
                return if kind.is_reserved() {
                    write!(f, "keyword `{text}`")
                } else {
                    write!(f, "`{text}`")
                };
            }
        };

        f.write_str(name)
    }
}

/// The reserved word table consulted by the lexer.
#[derive(Debug, Clone)]
pub struct Keywords {
    table: HashMap<&'static str, TokenKind>,
}

impl Keywords {
    pub fn new() -> Self {
        Self {
            table: RESERVED_WORDS.into_iter().collect(),
        }
    }

    pub fn lookup(&self, word: &str) -> Option<TokenKind> {
        self.table.get(word).copied()
    }
}

impl Default for Keywords {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::{Keywords, Token, TokenKind, RESERVED_WORDS};
    use bcpl_diagnostic::span::Span;

    #[test]
    fn reserved_words_are_ordered_last() {
        for (word, kind) in RESERVED_WORDS {
            assert!(kind.is_reserved(), "{word}");
            assert_eq!(kind.canonical_text(), Some(word));
        }
        assert!(!TokenKind::Star.is_reserved());
        assert!(!TokenKind::Name.is_reserved());
    }

    #[test]
    fn keyword_lookup() {
        let keywords = Keywords::new();
        assert_eq!(keywords.lookup("manifest"), Some(TokenKind::Manifest));
        assert_eq!(keywords.lookup("repeatwhile"), Some(TokenKind::RepeatWhile));
        assert_eq!(keywords.lookup("Global"), None);
        assert_eq!(keywords.lookup("x"), None);
    }

    #[test]
    fn do_start_is_subset_of_semi_start() {
        for (_, kind) in RESERVED_WORDS {
            if kind.is_do_start() {
                assert!(kind.is_semi_start(), "{kind}");
            }
        }
        assert!(TokenKind::Name.is_semi_start());
        assert!(!TokenKind::Name.is_do_start());
    }

    #[test]
    fn names_in_messages() {
        assert_eq!(TokenKind::SectBra.to_string(), "`$(`");
        assert_eq!(TokenKind::Global.to_string(), "keyword `global`");
        assert_eq!(TokenKind::Eof.to_string(), "end of file");

        let name = Token::new(TokenKind::Name, "COUNT", Span::new(0, 5));
        assert_eq!(name.describe(), "name `COUNT`");

        let semi = Token::synthetic(TokenKind::Semicolon, 7);
        assert_eq!(semi.text, ";");
        assert_eq!(semi.span, Span::empty(7));
        assert_eq!(semi.describe(), "`;`");
    }
}
