//! UTF-16 offsets over UTF-8 strings.
//!
//! Editing surfaces report carets and selections in UTF-16 code units while
//! the text itself lives in a Rust `String`. These helpers convert between the
//! two without allocating.
//!
//! ```
//! use gita_core::utf16;
//!
//! let text = "a😀b";
//! assert_eq!(utf16::len(text), 4);
//! assert_eq!(utf16::to_byte_offset(text, 3), Ok(5));
//! assert!(utf16::to_byte_offset(text, 2).is_err());
//! ```

use thiserror::Error;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum OffsetError {
  #[error("offset {offset} is out of bounds (len: {len})")]
  OutOfBounds { offset: usize, len: usize },
  #[error("offset {offset} splits a surrogate pair")]
  SplitsSurrogate { offset: usize },
}

pub type Result<T> = std::result::Result<T, OffsetError>;

/// Length of `s` in UTF-16 code units.
#[inline]
pub fn len(s: &str) -> usize {
  s.chars().map(char::len_utf16).sum()
}

/// Converts a UTF-16 offset into a byte index into `s`.
pub fn to_byte_offset(s: &str, offset: usize) -> Result<usize> {
  let mut units = 0;
  for (byte, ch) in s.char_indices() {
    if units == offset {
      return Ok(byte);
    }
    units += ch.len_utf16();
    if units > offset {
      return Err(OffsetError::SplitsSurrogate { offset });
    }
  }

  if units == offset {
    Ok(s.len())
  } else {
    Err(OffsetError::OutOfBounds { offset, len: units })
  }
}

/// Converts a byte index into a UTF-16 offset.
///
/// Returns `None` if `byte` is not a char boundary of `s`.
#[inline]
pub fn to_utf16_offset(s: &str, byte: usize) -> Option<usize> {
  s.get(..byte).map(len)
}

/// Returns the substring between two UTF-16 offsets.
pub fn slice(s: &str, start: usize, end: usize) -> Result<&str> {
  let from = to_byte_offset(s, start)?;
  let to = to_byte_offset(s, end.max(start))?;
  Ok(&s[from..to])
}
