use std::marker::PhantomData;

/// A vector indexed by a typed key instead of a bare `usize`.
pub struct KeyVec<K, V> {
    inner: Vec<V>,
    _phantom: PhantomData<*const K>,
}

impl<K: Key, V> KeyVec<K, V> {
    #[must_use]
    pub fn insert(&mut self, value: V) -> K {
        let key = K::from_usize(self.inner.len());
        self.inner.push(value);
        key
    }

    pub fn get(&self, key: K) -> Option<&V> {
        self.inner.get(key.as_usize())
    }
}

impl<K, V> Default for KeyVec<K, V> {
    fn default() -> Self {
        Self {
            inner: vec![],
            _phantom: PhantomData,
        }
    }
}

pub trait Key: Copy {
    fn from_usize(n: usize) -> Self;
    fn as_usize(&self) -> usize;
}

/// Declare a `usize` newtype usable as a [`KeyVec`] key.
///
/// Extra attributes on the struct are forwarded.
#[macro_export]
macro_rules! declare_key_type {
    (
        $(#[$attr:meta])*
        $v:vis struct $i:ident;
    ) => {
        $(#[$attr])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        $v struct $i(pub usize);

        impl $crate::keyvec::Key for $i {
            fn from_usize(n: usize) -> Self {
                Self(n)
            }

            fn as_usize(&self) -> usize {
                self.0
            }
        }
    };
}
pub use crate::declare_key_type;

#[cfg(test)]
mod tests {
    use super::KeyVec;

    declare_key_type! {
        struct TestId;
    }

    #[test]
    fn keys_are_dense() {
        let mut vec = KeyVec::<TestId, &str>::default();
        let a = vec.insert("a");
        let b = vec.insert("b");

        assert_eq!(a, TestId(0));
        assert_eq!(b, TestId(1));
        assert_eq!(vec.get(b), Some(&"b"));
        assert_eq!(vec.get(TestId(2)), None);
    }
}
