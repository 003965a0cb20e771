//! Line and column lookup around a caret.
//!
//! Lines are separated by `\n` only; a trailing `\r` stays part of the line.

use crate::utf16::{
  self,
  Result,
};

/// Where a caret sits relative to the lines of a text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineInfo<'a> {
  /// 1-based line number of the caret.
  pub line:          usize,
  /// Column of the caret within its line, in UTF-16 code units.
  pub col:           usize,
  pub current_line:  &'a str,
  pub previous_line: Option<&'a str>,
  pub next_line:     Option<&'a str>,
  /// Text before the caret.
  pub before:        &'a str,
  /// Text after the caret.
  pub after:         &'a str,
}

impl<'a> LineInfo<'a> {
  /// Probes `text` at the UTF-16 `offset`.
  pub fn at(text: &'a str, offset: usize) -> Result<Self> {
    let byte = utf16::to_byte_offset(text, offset)?;
    let (before, after) = text.split_at(byte);

    let line_start = before.rfind('\n').map_or(0, |i| i + 1);
    let line_end = after.find('\n').map_or(text.len(), |i| byte + i);

    let previous_line = (line_start > 0).then(|| {
      let end = line_start - 1;
      let start = text[..end].rfind('\n').map_or(0, |i| i + 1);
      &text[start..end]
    });
    let next_line = (line_end < text.len()).then(|| {
      let start = line_end + 1;
      let end = text[start..].find('\n').map_or(text.len(), |i| start + i);
      &text[start..end]
    });

    Ok(Self {
      line: before.matches('\n').count() + 1,
      col: utf16::len(&before[line_start..]),
      current_line: &text[line_start..line_end],
      previous_line,
      next_line,
      before,
      after,
    })
  }

  /// Whether the caret sits after some content on a non-empty line.
  #[inline]
  pub fn is_mid_line(&self) -> bool {
    self.col > 0 && !self.current_line.is_empty()
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::utf16::OffsetError;

  #[test]
  fn start_of_text() {
    let info = LineInfo::at("hello\nworld", 0).unwrap();
    assert_eq!(info.line, 1);
    assert_eq!(info.col, 0);
    assert_eq!(info.current_line, "hello");
    assert_eq!(info.previous_line, None);
    assert_eq!(info.next_line, Some("world"));
    assert_eq!(info.before, "");
    assert_eq!(info.after, "hello\nworld");
    assert!(!info.is_mid_line());
  }

  #[test]
  fn middle_line() {
    let text = "one\ntwo\nthree";
    let info = LineInfo::at(text, 6).unwrap();
    assert_eq!(info.line, 2);
    assert_eq!(info.col, 2);
    assert_eq!(info.current_line, "two");
    assert_eq!(info.previous_line, Some("one"));
    assert_eq!(info.next_line, Some("three"));
    assert_eq!(info.before, "one\ntw");
    assert_eq!(info.after, "o\nthree");
    assert!(info.is_mid_line());
  }

  #[test]
  fn end_of_text() {
    let info = LineInfo::at("one\ntwo", 7).unwrap();
    assert_eq!(info.line, 2);
    assert_eq!(info.col, 3);
    assert_eq!(info.next_line, None);
    assert_eq!(info.after, "");
  }

  #[test]
  fn empty_lines() {
    let text = "a\n\nb";
    let info = LineInfo::at(text, 2).unwrap();
    assert_eq!(info.line, 2);
    assert_eq!(info.col, 0);
    assert_eq!(info.current_line, "");
    assert_eq!(info.previous_line, Some("a"));
    assert_eq!(info.next_line, Some("b"));

    let info = LineInfo::at("\n", 1).unwrap();
    assert_eq!(info.line, 2);
    assert_eq!(info.current_line, "");
    assert_eq!(info.previous_line, Some(""));
    assert_eq!(info.next_line, None);
  }

  #[test]
  fn column_counts_utf16_units() {
    let info = LineInfo::at("x\n😀y", 4).unwrap();
    assert_eq!(info.col, 2);
    assert_eq!(info.before, "x\n😀");
  }

  #[test]
  fn invalid_offset() {
    assert_eq!(
      LineInfo::at("ab", 3),
      Err(OffsetError::OutOfBounds { offset: 3, len: 2 })
    );
  }
}
