//! String interning for identifier names.
//!
//! Every identifier the parser builds carries an [`InternedString`] atom next
//! to its text, so later passes (and the parser's own label table) compare
//! names with a single integer comparison.

use lasso::{Capacity, Spur, ThreadedRodeo};
use std::fmt;
use std::num::NonZeroUsize;
use std::sync::Arc;

/// A lightweight handle to an interned string.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct InternedString(Spur);

impl InternedString {
    #[inline]
    pub fn from_spur(spur: Spur) -> Self {
        Self(spur)
    }

    #[inline]
    pub fn as_spur(self) -> Spur {
        self.0
    }
}

impl fmt::Debug for InternedString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "InternedString({:?})", self.0)
    }
}

/// Thread-safe string interner.
///
/// Cloning is cheap and yields a handle to the same table, which lets
/// independent parse sessions running on different threads share atoms.
#[derive(Clone)]
pub struct StringInterner {
    rodeo: Arc<ThreadedRodeo>,
}

impl StringInterner {
    pub fn new() -> Self {
        Self {
            rodeo: Arc::new(ThreadedRodeo::new()),
        }
    }

    /// Create an interner sized for roughly `strings` distinct names.
    pub fn with_capacity(strings: usize) -> Self {
        let bytes = NonZeroUsize::new(strings.saturating_mul(8)).unwrap_or(NonZeroUsize::MIN);
        Self {
            rodeo: Arc::new(ThreadedRodeo::with_capacity(Capacity::new(strings, bytes))),
        }
    }

    /// Intern a string, returning the existing handle if already present.
    #[inline]
    pub fn intern(&self, s: &str) -> InternedString {
        InternedString::from_spur(self.rodeo.get_or_intern(s))
    }

    #[inline]
    pub fn intern_static(&self, s: &'static str) -> InternedString {
        InternedString::from_spur(self.rodeo.get_or_intern_static(s))
    }

    /// Look up an already-interned string without interning it.
    #[inline]
    pub fn get(&self, s: &str) -> Option<InternedString> {
        self.rodeo.get(s).map(InternedString::from_spur)
    }

    #[inline]
    pub fn resolve(&self, key: InternedString) -> &str {
        self.rodeo.resolve(&key.as_spur())
    }

    /// Whether two handles point into the same underlying table.
    pub fn shares_table_with(&self, other: &StringInterner) -> bool {
        Arc::ptr_eq(&self.rodeo, &other.rodeo)
    }

    pub fn len(&self) -> usize {
        self.rodeo.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rodeo.is_empty()
    }

    /// Pair an atom with this interner for display.
    pub fn display(&self, key: InternedString) -> DisplayInterned<'_> {
        DisplayInterned {
            key,
            interner: self,
        }
    }
}

impl Default for StringInterner {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for StringInterner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StringInterner")
            .field("len", &self.len())
            .finish()
    }
}

pub struct DisplayInterned<'a> {
    key: InternedString,
    interner: &'a StringInterner,
}

impl fmt::Display for DisplayInterned<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.interner.resolve(self.key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intern_and_resolve() {
        let interner = StringInterner::new();
        let a = interner.intern("hello");
        let b = interner.intern("hello");
        let c = interner.intern("world");

        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(interner.resolve(a), "hello");
        assert_eq!(interner.display(c).to_string(), "world");
    }

    #[test]
    fn test_get_and_static() {
        let interner = StringInterner::with_capacity(4);
        assert!(interner.get("label").is_none());
        let a = interner.intern_static("label");
        assert_eq!(interner.get("label"), Some(a));
    }

    #[test]
    fn test_shared_table() {
        let interner = StringInterner::new();
        let shared = interner.clone();
        let a = shared.intern("x");
        assert!(interner.shares_table_with(&shared));
        assert!(!interner.shares_table_with(&StringInterner::new()));
        assert_eq!(interner.get("x"), Some(a));
    }
}
