//! Source units handed to the scanner.

use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// Stable identifier of a source unit, used to tag positions.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Default)]
pub struct SourceId(u32);

impl SourceId {
    #[inline]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    #[inline]
    pub fn as_u32(self) -> u32 {
        self.0
    }
}

impl fmt::Display for SourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Errors raised while materializing a source unit.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("source '{name}' is not valid UTF-8")]
    InvalidUtf8 { name: String },
    #[error("source '{name}' is {len} bytes; offsets are limited to u32")]
    TooLarge { name: String, len: usize },
}

/// A fully materialized, read-only source unit.
///
/// The text is reference counted so concurrent sessions can share one
/// buffer and slice sub-ranges for diagnostics after the fact.
#[derive(Debug, Clone)]
pub struct SourceText {
    id: SourceId,
    name: Arc<str>,
    text: Arc<str>,
}

impl SourceText {
    /// Create a source unit from text.
    ///
    /// # Panics
    ///
    /// Panics in debug builds if the text does not fit in `u32` offsets; use
    /// [`SourceText::from_utf8`] for untrusted input.
    pub fn new(id: SourceId, name: impl Into<Arc<str>>, text: impl Into<Arc<str>>) -> Self {
        let text = text.into();
        debug_assert!(u32::try_from(text.len()).is_ok());
        Self {
            id,
            name: name.into(),
            text,
        }
    }

    /// Create a source unit from raw bytes, validating UTF-8.
    pub fn from_utf8(id: SourceId, name: &str, bytes: &[u8]) -> Result<Self, SourceError> {
        let text = simdutf8::basic::from_utf8(bytes).map_err(|_| SourceError::InvalidUtf8 {
            name: name.to_string(),
        })?;
        if u32::try_from(text.len()).is_err() {
            return Err(SourceError::TooLarge {
                name: name.to_string(),
                len: text.len(),
            });
        }
        Ok(Self::new(id, name, text))
    }

    #[inline]
    pub fn id(&self) -> SourceId {
        self.id
    }

    /// The name used for diagnostics (usually a file path).
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.text.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_utf8() {
        let src = SourceText::from_utf8(SourceId::new(2), "a.ts", b"let x = 1;").unwrap();
        assert_eq!(src.id(), SourceId::new(2));
        assert_eq!(src.name(), "a.ts");
        assert_eq!(src.text(), "let x = 1;");
    }

    #[test]
    fn test_from_invalid_utf8() {
        let err = SourceText::from_utf8(SourceId::new(0), "bad.js", &[0x66, 0xff, 0x6f]).unwrap_err();
        assert!(matches!(err, SourceError::InvalidUtf8 { .. }));
        assert!(err.to_string().contains("bad.js"));
    }
}
