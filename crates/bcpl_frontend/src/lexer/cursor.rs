use std::str::Chars;

use bcpl_utils::peek::Peek;

/// A position in the source text, sitting on the character that has not yet
/// been consumed.
pub struct Cursor<'src> {
    all: &'src str,
    chars: Chars<'src>,
}

impl<'src> Cursor<'src> {
    pub fn new(source: &'src str) -> Self {
        Self {
            all: source,
            chars: source.chars(),
        }
    }

    /// The current character, or `None` at the end of the input.
    pub fn current(&self) -> Option<char> {
        self.chars.peek()
    }

    /// Byte offset of the current character.
    pub fn offset(&self) -> usize {
        self.all.len() - self.chars.as_str().len()
    }

    pub fn bump(&mut self) {
        self.chars.next();
    }

    pub fn bump_if(&mut self, ch: char) -> bool {
        self.chars.eat(ch)
    }

    pub fn bump_while(&mut self, mut f: impl FnMut(char) -> bool) {
        self.chars.eat_while(|&ch| f(ch));
    }

    /// The text from `start` up to the current character.
    pub fn slice_from(&self, start: usize) -> &'src str {
        &self.all[start..self.offset()]
    }
}

#[cfg(test)]
mod tests {
    use super::Cursor;

    #[test]
    fn offsets_are_in_bytes() {
        let mut cursor = Cursor::new("é$(");
        assert_eq!(cursor.current(), Some('é'));
        assert_eq!(cursor.offset(), 0);

        cursor.bump();
        assert!(cursor.bump_if('$'));
        assert_eq!(cursor.slice_from(0), "é$");
        assert_eq!(cursor.current(), Some('('));

        cursor.bump();
        assert_eq!(cursor.current(), None);
        assert_eq!(cursor.offset(), 4);
    }
}
