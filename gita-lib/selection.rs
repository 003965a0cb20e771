//! Caret and selection offsets.
//!
//! A [`Selection`] is a pair of UTF-16 code unit offsets into a document, the
//! unit editing surfaces report selections in. `start == end` is a caret with
//! nothing selected.
//!
//! ```text
//! start=2, end=7: "he[llo w]orld"
//! start=5, end=5: "hello|world"
//! ```
//!
//! Offsets returned by the decorator are relative to the start of the produced
//! fragment; [`Selection::shift`] moves them to document offsets once the
//! fragment has been spliced in.

use serde::{
  Deserialize,
  Serialize,
};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Selection {
  pub start: usize,
  pub end:   usize,
}

impl Selection {
  /// Creates a selection, ordering the offsets so that `start <= end`.
  #[must_use]
  pub fn new(start: usize, end: usize) -> Self {
    if start <= end {
      Self { start, end }
    } else {
      Self {
        start: end,
        end:   start,
      }
    }
  }

  #[must_use]
  pub const fn point(pos: usize) -> Self {
    Self {
      start: pos,
      end:   pos,
    }
  }

  #[inline]
  pub const fn is_empty(&self) -> bool {
    self.start == self.end
  }

  #[inline]
  pub const fn len(&self) -> usize {
    self.end - self.start
  }

  /// Moves both ends forward by `by`.
  #[must_use]
  pub const fn shift(self, by: usize) -> Self {
    Self {
      start: self.start + by,
      end:   self.end + by,
    }
  }

  /// Clamps both ends to `len`.
  #[must_use]
  pub fn clamp(self, len: usize) -> Self {
    Self {
      start: self.start.min(len),
      end:   self.end.min(len),
    }
  }
}
