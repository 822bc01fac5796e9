
mod cursor;

use bcpl_diagnostic::span::Span;
use tracing::trace;

use crate::token::{Keywords, Token, TokenKind};
use cursor::Cursor;

/// Tracks whether the previous token could have ended a command, so that a
/// `do` or `;` can be inserted before the next one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum InsertionState {
    Normal,
    /// The last token could end a command and no newline has been seen.
    MaybeInsertDo,
    /// The last token could end a command and was followed by a newline.
    MaybeInsertSemicolon,
}

pub struct Lexer<'src, 'kw> {
    keywords: &'kw Keywords,
    cursor: Cursor<'src>,

    state: InsertionState,
    /// A scanned token held back while an inserted token is returned.
    pending: Option<Token<'src>>,
}

impl<'src, 'kw> Lexer<'src, 'kw> {
    pub fn new(source: &'src str, keywords: &'kw Keywords) -> Self {
        Self {
            keywords,
            cursor: Cursor::new(source),

            state: InsertionState::Normal,
            pending: None,
        }
    }

    /// Lex up to and including the first end-of-file token.
    pub fn lex(mut self) -> Vec<Token<'src>> {
        let mut tokens = vec![];
        loop {
            let token = self.next_token();
            tokens.push(token);
            if token.kind == TokenKind::Eof {
                return tokens;
            }
        }
    }

    /// Produce the next token. Once the input is exhausted this returns
    /// end-of-file tokens forever.
    pub fn next_token(&mut self) -> Token<'src> {
        if let Some(token) = self.pending.take() {
            // The state was reset to `Normal` when the token was held back.
            // Classifying it again lets it end a command itself, so that
            // `X\nY\nZ` gets a `;` before `Z` as well as before `Y`.
            return self.transition(token);
        }

        loop {
            self.skip_whitespace();

            // Newlines are only left unskipped right after a possible
            // command end.
            if self.cursor.current() == Some('\n') {
                self.state = InsertionState::MaybeInsertSemicolon;
                continue;
            }

            let token = self.scan_token();
            return self.transition(token);
        }
    }

    fn skip_whitespace(&mut self) {
        let skip_newlines = self.state != InsertionState::MaybeInsertDo;
        self.cursor
            .bump_while(|ch| matches!(ch, ' ' | '\t' | '\r') || (ch == '\n' && skip_newlines));
    }

    fn transition(&mut self, token: Token<'src>) -> Token<'src> {
        let kind = token.kind;

        match self.state {
            InsertionState::Normal => {
                if kind.is_command_end() {
                    self.state = InsertionState::MaybeInsertDo;
                }
                token
            }

            InsertionState::MaybeInsertDo if kind.is_do_start() => self.insert(TokenKind::Do, token),
            InsertionState::MaybeInsertDo => {
                if !kind.is_command_end() {
                    self.state = InsertionState::Normal;
                }
                token
            }

            InsertionState::MaybeInsertSemicolon if kind.is_semi_start() => {
                self.insert(TokenKind::Semicolon, token)
            }
            InsertionState::MaybeInsertSemicolon => {
                self.state = InsertionState::Normal;
                token
            }
        }
    }

    fn insert(&mut self, kind: TokenKind, before: Token<'src>) -> Token<'src> {
        trace!(inserted = %kind, before = before.text, at = before.span.start, "inserting token");

        self.state = InsertionState::Normal;
        self.pending = Some(before);

        Token::synthetic(kind, before.span.start)
    }

    fn scan_token(&mut self) -> Token<'src> {
        let start = self.cursor.offset();

        let Some(ch) = self.cursor.current() else {
            return Token::new(TokenKind::Eof, "", Span::empty(start));
        };
        self.cursor.bump();

        let kind = match ch {
            ch if ch.is_ascii_alphabetic() => self.scan_name(start),

            ch if ch.is_ascii_digit() => {
                self.cursor.bump_while(|ch| ch.is_ascii_digit());
                TokenKind::Number
            }

            '"' => {
                self.cursor.bump_while(|ch| ch != '"');
                if self.cursor.bump_if('"') {
                    TokenKind::StringConst
                } else {
                    TokenKind::Illegal
                }
            }

            // comment, including its newline
            '/' if self.cursor.bump_if('/') => {
                self.cursor.bump_while(|ch| ch != '\n');
                self.cursor.bump_if('\n');
                TokenKind::Comment
            }

            '+' => TokenKind::Plus,
            '-' if self.cursor.bump_if('>') => TokenKind::Cond,
            '-' => TokenKind::Minus,
            '*' => TokenKind::Star,
            '/' => TokenKind::Div,

            '=' => TokenKind::Eq,
            '!' if self.cursor.bump_if('=') => TokenKind::Ne,
            '!' => TokenKind::Not,
            '<' if self.cursor.bump_if('=') => TokenKind::Le,
            '<' if self.cursor.bump_if('<') => TokenKind::LShift,
            '<' => TokenKind::Ls,
            '>' if self.cursor.bump_if('=') => TokenKind::Ge,
            '>' if self.cursor.bump_if('>') => TokenKind::RShift,
            '>' => TokenKind::Gr,

            '&' => TokenKind::LogAnd,
            '|' => TokenKind::LogOr,

            ':' if self.cursor.bump_if('=') => TokenKind::Ass,
            ':' => TokenKind::Colon,
            ',' => TokenKind::Comma,
            ';' => TokenKind::Semicolon,

            '$' if self.cursor.bump_if('(') => TokenKind::SectBra,
            '$' if self.cursor.bump_if(')') => TokenKind::SectKet,
            '(' => TokenKind::RBra,
            ')' => TokenKind::RKet,
            '[' => TokenKind::SBra,
            ']' => TokenKind::SKet,

            _ => TokenKind::Illegal,
        };

        Token::new(
            kind,
            self.cursor.slice_from(start),
            Span::new(start, self.cursor.offset()),
        )
    }

    fn scan_name(&mut self, start: usize) -> TokenKind {
        self.cursor.bump_while(|ch| ch.is_ascii_alphanumeric());

        // Single letters are always names.
        let word = self.cursor.slice_from(start);
        if word.len() > 1 {
            self.keywords.lookup(word).unwrap_or(TokenKind::Name)
        } else {
            TokenKind::Name
        }
    }
}
