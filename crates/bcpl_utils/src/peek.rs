/// An iterator that can look at its next item without consuming it.
pub trait Peek: Iterator {
    fn peek(&self) -> Option<Self::Item>;

    fn eat<P>(&mut self, pat: P) -> bool
    where
        Self::Item: PartialEq<P>,
    {
        match self.peek() {
            Some(item) if item == pat => {
                self.next();
                true
            }
            _ => false,
        }
    }

    /// Consume items while `f` holds, returning how many were consumed.
    fn eat_while(&mut self, mut f: impl FnMut(&Self::Item) -> bool) -> usize {
        let mut count = 0;
        while self.peek().is_some_and(|item| f(&item)) {
            self.next();
            count += 1;
        }
        count
    }
}

impl Peek for std::str::Chars<'_> {
    fn peek(&self) -> Option<Self::Item> {
        self.clone().next()
    }
}
