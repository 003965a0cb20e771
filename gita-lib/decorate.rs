//! Markdown decorations for a selected piece of text.
//!
//! [`decorate`] maps the selected text and a [`DecorationKind`] to the
//! replacement fragment plus the selection to apply afterwards. It knows
//! nothing about the surrounding document: the returned selection is relative
//! to the start of the fragment and the caller shifts it by the insertion
//! point. Fragments flagged [`Decoration::new_block`] should sit on their own
//! lines; the caller adds the separating newlines.
//!
//! Decorating is total. Nothing here validates or fails, and decorating an
//! already decorated text simply wraps it again.
//!
//! # Example
//!
//! ```
//! use gita_lib::decorate::{decorate, DecorateOptions, DecorationKind};
//! use gita_lib::selection::Selection;
//!
//! let bold = decorate("hello", DecorationKind::Bold, &DecorateOptions::default());
//! assert_eq!(bold.text, "**hello**");
//! assert_eq!(bold.selection, Selection::new(2, 7));
//! assert!(!bold.new_block);
//! ```

use std::{
  fmt,
  str::FromStr,
};

use gita_core::utf16;
use serde::{
  Deserialize,
  Serialize,
};
use thiserror::Error;

use crate::selection::Selection;

const DEFAULT_TABLE_ROWS: usize = 2;
const DEFAULT_TABLE_COLS: usize = 2;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown decoration kind '{0}'")]
pub struct UnknownKind(pub String);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DecorationKind {
  Bold,
  Italic,
  Underline,
  Strikethrough,
  InlineCode,
  Quote,
  /// Fenced code block.
  Code,
  H1,
  H2,
  H3,
  H4,
  H5,
  H6,
  Unordered,
  Ordered,
  /// Horizontal rule.
  Hr,
  Table,
  Image,
  Link,
  /// Indent every selected line.
  Tab,
}

impl DecorationKind {
  pub const ALL: [Self; 20] = [
    Self::Bold,
    Self::Italic,
    Self::Underline,
    Self::Strikethrough,
    Self::InlineCode,
    Self::Quote,
    Self::Code,
    Self::H1,
    Self::H2,
    Self::H3,
    Self::H4,
    Self::H5,
    Self::H6,
    Self::Unordered,
    Self::Ordered,
    Self::Hr,
    Self::Table,
    Self::Image,
    Self::Link,
    Self::Tab,
  ];

  pub const fn name(self) -> &'static str {
    match self {
      Self::Bold => "bold",
      Self::Italic => "italic",
      Self::Underline => "underline",
      Self::Strikethrough => "strikethrough",
      Self::InlineCode => "inlinecode",
      Self::Quote => "quote",
      Self::Code => "code",
      Self::H1 => "h1",
      Self::H2 => "h2",
      Self::H3 => "h3",
      Self::H4 => "h4",
      Self::H5 => "h5",
      Self::H6 => "h6",
      Self::Unordered => "unordered",
      Self::Ordered => "ordered",
      Self::Hr => "hr",
      Self::Table => "table",
      Self::Image => "image",
      Self::Link => "link",
      Self::Tab => "tab",
    }
  }

  /// Prefix and suffix for kinds that wrap the target verbatim.
  pub const fn delimiters(self) -> Option<(&'static str, &'static str)> {
    let pair = match self {
      Self::Bold => ("**", "**"),
      Self::Italic => ("*", "*"),
      Self::Underline => ("++", "++"),
      Self::Strikethrough => ("~~", "~~"),
      Self::InlineCode => ("`", "`"),
      Self::Quote => ("\n>", "\n"),
      Self::Code => ("\n```\n", "\n```\n"),
      Self::H1 => ("\n# ", "\n"),
      Self::H2 => ("\n## ", "\n"),
      Self::H3 => ("\n### ", "\n"),
      Self::H4 => ("\n#### ", "\n"),
      Self::H5 => ("\n##### ", "\n"),
      Self::H6 => ("\n###### ", "\n"),
      _ => return None,
    };
    Some(pair)
  }

  /// Whether the produced fragment is meant to stand on its own lines.
  pub const fn is_block(self) -> bool {
    matches!(
      self,
      Self::Unordered | Self::Ordered | Self::Hr | Self::Table
    )
  }
}

impl fmt::Display for DecorationKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.name())
  }
}

impl FromStr for DecorationKind {
  type Err = UnknownKind;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    Self::ALL
      .into_iter()
      .find(|kind| kind.name() == s)
      .ok_or_else(|| UnknownKind(s.to_string()))
  }
}

/// Kind specific parameters. Anything left out behaves as an empty string or
/// zero, except the table size which defaults to 2×2.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct DecorateOptions {
  /// Fallback label for an image when nothing is selected.
  pub target:    Option<String>,
  pub image_url: Option<String>,
  pub link_url:  Option<String>,
  /// Number of data rows in a table.
  pub row:       Option<usize>,
  /// Number of columns in a table.
  pub col:       Option<usize>,
  /// `1` indents with a tab, anything else with that many spaces.
  pub tab_width: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Decoration {
  /// The full replacement fragment.
  pub text:      String,
  /// Selection relative to the start of `text`.
  pub selection: Selection,
  pub new_block: bool,
}

impl Decoration {
  fn inline(text: String, selection: Selection) -> Self {
    Self {
      text,
      selection,
      new_block: false,
    }
  }

  /// A block fragment, selected in full.
  fn block(text: String) -> Self {
    let selection = Selection::new(0, utf16::len(&text));
    Self {
      text,
      selection,
      new_block: true,
    }
  }

  /// The target unchanged, selected in full.
  pub fn identity(target: &str) -> Self {
    Self::inline(target.to_string(), Selection::new(0, utf16::len(target)))
  }
}

pub fn decorate(target: &str, kind: DecorationKind, options: &DecorateOptions) -> Decoration {
  match kind {
    DecorationKind::Tab => indent(target, options.tab_width.unwrap_or(0)),
    DecorationKind::Unordered => Decoration::block(list(target, false)),
    DecorationKind::Ordered => Decoration::block(list(target, true)),
    DecorationKind::Hr => Decoration::block("---".to_string()),
    DecorationKind::Table => {
      Decoration::block(table(
        options.row.unwrap_or(DEFAULT_TABLE_ROWS),
        options.col.unwrap_or(DEFAULT_TABLE_COLS),
      ))
    },
    DecorationKind::Image => {
      let label = if target.is_empty() {
        options.target.as_deref().unwrap_or_default()
      } else {
        target
      };
      let url = options.image_url.as_deref().unwrap_or_default();
      // The selection tracks the selected text, not the substituted label.
      Decoration::inline(
        format!("![{label}]({url})"),
        Selection::new(2, 2 + utf16::len(target)),
      )
    },
    DecorationKind::Link => {
      let url = options.link_url.as_deref().unwrap_or_default();
      Decoration::inline(
        format!("[{target}]({url})"),
        Selection::new(1, 1 + utf16::len(target)),
      )
    },
    wrapping => {
      let Some((prefix, suffix)) = wrapping.delimiters() else {
        return Decoration::identity(target);
      };
      let start = utf16::len(prefix);
      Decoration::inline(
        format!("{prefix}{target}{suffix}"),
        Selection::new(start, start + utf16::len(target)),
      )
    },
  }
}

/// Decorates by kind name, falling back to [`Decoration::identity`] for names
/// that are not a [`DecorationKind`].
pub fn decorate_named(target: &str, name: &str, options: &DecorateOptions) -> Decoration {
  match name.parse::<DecorationKind>() {
    Ok(kind) => decorate(target, kind, options),
    Err(err) => {
      tracing::debug!(%err, "leaving target undecorated");
      Decoration::identity(target)
    },
  }
}

fn indent(target: &str, tab_width: usize) -> Decoration {
  let unit = if tab_width == 1 {
    "\t".to_string()
  } else {
    " ".repeat(tab_width)
  };

  let mut text = String::with_capacity(target.len() + unit.len());
  for (i, line) in target.split('\n').enumerate() {
    if i > 0 {
      text.push('\n');
    }
    text.push_str(&unit);
    text.push_str(line);
  }

  let newlines = target.matches('\n').count();
  Decoration::inline(
    text,
    Selection::new(
      tab_width,
      tab_width * (newlines + 1) + utf16::len(target),
    ),
  )
}

fn list(target: &str, ordered: bool) -> String {
  let mut block = String::with_capacity(target.len() + 1);
  if !target.starts_with('\n') {
    block.push('\n');
  }
  block.push_str(target);
  if block.ends_with('\n') {
    block.pop();
  }

  // Only the leading newline is left, so emit a lone marker.
  if block.len() <= 1 {
    return if ordered { "1. " } else { "* " }.to_string();
  }

  let mut text = String::with_capacity(block.len() * 2);
  for (i, line) in block.split('\n').enumerate() {
    if i > 0 {
      text.push('\n');
      if ordered {
        text.push_str(&i.to_string());
        text.push_str(". ");
      } else {
        text.push_str("* ");
      }
    }
    text.push_str(line);
  }
  text.trim().to_string()
}

fn table(rows: usize, cols: usize) -> String {
  let header = format!("|{}", " Head |".repeat(cols));
  let division = format!("|{}", " --- |".repeat(cols));
  let data = format!("|{}", " Data |".repeat(cols));

  let mut lines = Vec::with_capacity(rows + 2);
  lines.push(header);
  lines.push(division);
  lines.extend(std::iter::repeat_n(data, rows));
  lines.join("\n")
}

#[cfg(test)]
mod tests {
  use super::*;

  fn plain(target: &str, kind: DecorationKind) -> Decoration {
    decorate(target, kind, &DecorateOptions::default())
  }

  fn assert_decoration(decoration: &Decoration, text: &str, start: usize, end: usize) {
    assert_eq!(decoration.text, text);
    assert_eq!(decoration.selection, Selection { start, end });
  }

  quickcheck::quickcheck! {
    fn test_wrapping_kinds_bracket_target(target: String) -> bool {
      DecorationKind::ALL.into_iter().all(|kind| {
        let Some((prefix, suffix)) = kind.delimiters() else {
          return true;
        };
        let decoration = plain(&target, kind);
        let start = utf16::len(prefix);
        decoration.text == format!("{prefix}{target}{suffix}")
          && decoration.selection == Selection::new(start, start + utf16::len(&target))
          && !decoration.new_block
      })
    }
  }

  #[test]
  fn inline_wrapping() {
    assert_decoration(&plain("hello", DecorationKind::Bold), "**hello**", 2, 7);
    assert_decoration(&plain("hello", DecorationKind::Italic), "*hello*", 1, 6);
    assert_decoration(&plain("hello", DecorationKind::Underline), "++hello++", 2, 7);
    assert_decoration(
      &plain("hello", DecorationKind::Strikethrough),
      "~~hello~~",
      2,
      7,
    );
    assert_decoration(&plain("hello", DecorationKind::InlineCode), "`hello`", 1, 6);
  }

  #[test]
  fn block_wrapping() {
    assert_decoration(&plain("hello", DecorationKind::Quote), "\n>hello\n", 2, 7);
    assert_decoration(
      &plain("hello", DecorationKind::Code),
      "\n```\nhello\n```\n",
      5,
      10,
    );
  }

  #[test]
  fn headings() {
    let cases = [
      (DecorationKind::H1, "\n# hello\n", 3, 8),
      (DecorationKind::H2, "\n## hello\n", 4, 9),
      (DecorationKind::H3, "\n### hello\n", 5, 10),
      (DecorationKind::H4, "\n#### hello\n", 6, 11),
      (DecorationKind::H5, "\n##### hello\n", 7, 12),
      (DecorationKind::H6, "\n###### hello\n", 8, 13),
    ];
    for (kind, text, start, end) in cases {
      let decoration = plain("hello", kind);
      assert_decoration(&decoration, text, start, end);
      assert!(!decoration.new_block);
    }
  }

  #[test]
  fn bold_twice_wraps_twice() {
    let once = plain("t", DecorationKind::Bold);
    let twice = plain(&once.text, DecorationKind::Bold);
    assert_eq!(twice.text, "****t****");
    assert_eq!(twice.selection, Selection::new(2, 7));
  }

  #[test]
  fn unordered_list() {
    let decoration = plain("hello\nworld\n", DecorationKind::Unordered);
    assert_decoration(&decoration, "* hello\n* world", 0, 15);
    assert!(decoration.new_block);
  }

  #[test]
  fn ordered_list() {
    let decoration = plain("hello\nworld\n", DecorationKind::Ordered);
    assert_decoration(&decoration, "1. hello\n2. world", 0, 17);
    assert!(decoration.new_block);
  }

  #[test]
  fn ordered_list_renumbers_from_one() {
    let decoration = plain("3. c\n7. d", DecorationKind::Ordered);
    assert_eq!(decoration.text, "1. 3. c\n2. 7. d");
  }

  #[test]
  fn empty_lists_emit_a_single_marker() {
    assert_decoration(&plain("", DecorationKind::Unordered), "* ", 0, 2);
    assert_decoration(&plain("", DecorationKind::Ordered), "1. ", 0, 3);
    assert_eq!(plain("\n", DecorationKind::Unordered).text, "* ");
  }

  #[test]
  fn list_with_leading_newline() {
    assert_eq!(plain("\na\nb", DecorationKind::Unordered).text, "* a\n* b");
  }

  #[test]
  fn list_trailing_blank_line_is_trimmed() {
    assert_eq!(plain("a\n\n", DecorationKind::Unordered).text, "* a\n*");
  }

  #[test]
  fn horizontal_rule_ignores_target() {
    let decoration = plain("ignored", DecorationKind::Hr);
    assert_decoration(&decoration, "---", 0, 3);
    assert!(decoration.new_block);
  }

  #[test]
  fn table() {
    let options = DecorateOptions {
      row: Some(2),
      col: Some(3),
      ..Default::default()
    };
    let decoration = decorate("", DecorationKind::Table, &options);
    assert_decoration(
      &decoration,
      "| Head | Head | Head |\n| --- | --- | --- |\n| Data | Data | Data |\n| Data | Data | \
       Data |",
      0,
      88,
    );
    assert!(decoration.new_block);
  }

  #[test]
  fn table_defaults_to_two_by_two() {
    let decoration = plain("", DecorationKind::Table);
    assert_eq!(
      decoration.text,
      "| Head | Head |\n| --- | --- |\n| Data | Data |\n| Data | Data |"
    );
    assert_eq!(decoration.selection.end, decoration.text.len());
  }

  #[test]
  fn image() {
    let options = DecorateOptions {
      image_url: Some("https://example.com/image.jpg".into()),
      ..Default::default()
    };
    let decoration = decorate("image", DecorationKind::Image, &options);
    assert_decoration(
      &decoration,
      "![image](https://example.com/image.jpg)",
      2,
      7,
    );

    let options = DecorateOptions {
      target: Some("image1".into()),
      ..options
    };
    let decoration = decorate("my image", DecorationKind::Image, &options);
    assert_decoration(
      &decoration,
      "![my image](https://example.com/image.jpg)",
      2,
      10,
    );
  }

  #[test]
  fn image_label_fallback_keeps_target_selection() {
    let options = DecorateOptions {
      target: Some("diagram".into()),
      ..Default::default()
    };
    let decoration = decorate("", DecorationKind::Image, &options);
    assert_decoration(&decoration, "![diagram]()", 2, 2);
  }

  #[test]
  fn link() {
    let options = DecorateOptions {
      link_url: Some("https://example.com".into()),
      ..Default::default()
    };
    let decoration = decorate("link", DecorationKind::Link, &options);
    assert_decoration(&decoration, "[link](https://example.com)", 1, 5);

    let options = DecorateOptions {
      target: Some("link1".into()),
      ..options
    };
    let decoration = decorate("my link", DecorationKind::Link, &options);
    assert_decoration(&decoration, "[my link](https://example.com)", 1, 8);
  }

  #[test]
  fn link_without_url() {
    assert_decoration(&plain("x", DecorationKind::Link), "[x]()", 1, 2);
  }

  #[test]
  fn tab_with_spaces() {
    let options = DecorateOptions {
      tab_width: Some(2),
      ..Default::default()
    };
    let decoration = decorate("hello\nworld", DecorationKind::Tab, &options);
    assert_decoration(&decoration, "  hello\n  world", 2, 15);

    let options = DecorateOptions {
      tab_width: Some(4),
      ..Default::default()
    };
    let decoration = decorate("hello\n\nworld", DecorationKind::Tab, &options);
    assert_decoration(&decoration, "    hello\n    \n    world", 4, 24);
  }

  #[test]
  fn tab_with_literal_tab() {
    let options = DecorateOptions {
      tab_width: Some(1),
      ..Default::default()
    };
    let decoration = decorate("a\nb", DecorationKind::Tab, &options);
    assert_decoration(&decoration, "\ta\n\tb", 1, 5);
  }

  #[test]
  fn selection_counts_utf16_units() {
    let decoration = plain("😀", DecorationKind::Bold);
    assert_eq!(decoration.selection, Selection::new(2, 4));
  }

  #[test]
  fn unknown_names_fall_back_to_identity() {
    let decoration = decorate_named("hello", "sparkles", &DecorateOptions::default());
    assert_decoration(&decoration, "hello", 0, 5);
    assert!(!decoration.new_block);
  }

  #[test]
  fn names_round_trip_through_from_str() {
    for kind in DecorationKind::ALL {
      assert_eq!(kind.name().parse::<DecorationKind>(), Ok(kind));
    }
    assert_eq!(
      "H1".parse::<DecorationKind>(),
      Err(UnknownKind("H1".to_string()))
    );
  }

  #[test]
  fn serde_uses_kind_names() {
    let json = serde_json::to_string(&DecorationKind::InlineCode).unwrap();
    assert_eq!(json, "\"inlinecode\"");
    let kind: DecorationKind = serde_json::from_str("\"h4\"").unwrap();
    assert_eq!(kind, DecorationKind::H4);
  }

  #[test]
  fn block_kinds() {
    for kind in DecorationKind::ALL {
      assert_eq!(plain("x", kind).new_block, kind.is_block(), "{kind}");
    }
  }
}
