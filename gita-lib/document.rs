//! An editing session over a Markdown text.
//!
//! A [`Document`] owns the text, the current selection and the commit log. It
//! plays the part of the editing surface: it reads the selection, asks the
//! decorator for a fragment, splices it in, and reports the result to the
//! history.
//!
//! # Block fragments
//!
//! Lists, rules and tables are flagged as block fragments. When one is
//! inserted after content on the same line it is moved onto its own line,
//! and when non-blank text follows the selection the fragment is padded with
//! newlines so that a blank line separates the two.
//!
//! ```
//! use gita_lib::config::EditorConfig;
//! use gita_lib::decorate::{DecorateOptions, DecorationKind};
//! use gita_lib::document::Document;
//! use gita_lib::selection::Selection;
//!
//! let mut doc = Document::new("abc", EditorConfig::default());
//! doc.set_selection(Selection::point(3)).unwrap();
//! doc.insert_markdown(DecorationKind::Hr, DecorateOptions::default()).unwrap();
//! assert_eq!(doc.text(), "abc\n---");
//! assert_eq!(doc.selection(), Selection::new(4, 7));
//! ```

use std::time::Instant;

use gita_core::{
  line::LineInfo,
  utf16::{
    self,
    OffsetError,
  },
};
use thiserror::Error;

use crate::{
  config::EditorConfig,
  decorate::{
    DecorateOptions,
    Decoration,
    DecorationKind,
    decorate,
  },
  history::HistoryLog,
  logger::{
    ChangeSource,
    CommitLog,
  },
  selection::Selection,
  upload::UploadPlaceholder,
};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DocumentError {
  #[error("invalid selection: {0}")]
  Offset(#[from] OffsetError),
}

pub type Result<T> = std::result::Result<T, DocumentError>;

#[derive(Debug)]
pub struct Document {
  text:      String,
  selection: Selection,
  config:    EditorConfig,
  log:       CommitLog,
}

impl Document {
  /// Starts a session. `text` becomes the value undo falls back to.
  pub fn new(text: impl Into<String>, config: EditorConfig) -> Self {
    let text = text.into();
    let history = HistoryLog::new(config.logger.max_size, text.clone());
    let log = CommitLog::new(history, config.logger.interval());
    Self {
      text,
      selection: Selection::point(0),
      config,
      log,
    }
  }

  #[inline]
  pub fn text(&self) -> &str {
    &self.text
  }

  #[inline]
  pub fn selection(&self) -> Selection {
    self.selection
  }

  #[inline]
  pub fn config(&self) -> &EditorConfig {
    &self.config
  }

  #[inline]
  pub fn log(&self) -> &CommitLog {
    &self.log
  }

  pub fn selected_text(&self) -> &str {
    // The selection is validated whenever it or the text changes.
    utf16::slice(&self.text, self.selection.start, self.selection.end).unwrap_or_default()
  }

  pub fn set_selection(&mut self, selection: Selection) -> Result<()> {
    utf16::to_byte_offset(&self.text, selection.start)?;
    utf16::to_byte_offset(&self.text, selection.end)?;
    self.selection = selection;
    Ok(())
  }

  /// Replaces the whole text, as typing or a paste would.
  ///
  /// Returns the deadline of the pending commit for debounced input.
  pub fn set_text(
    &mut self,
    value: impl Into<String>,
    source: ChangeSource,
    now: Instant,
  ) -> Option<Instant> {
    self.text = value.into();
    self.selection = fit_selection(&self.text, self.selection);
    self.log.on_change(&self.text, source, now)
  }

  /// Splices `value` in at the selection.
  ///
  /// With `replace_selected` the selected text is replaced, otherwise `value`
  /// goes in at the selection start. `selection` is relative to `value`; when
  /// absent the caret lands at the old selection start.
  pub fn insert_text(
    &mut self,
    value: &str,
    replace_selected: bool,
    selection: Option<Selection>,
  ) -> Result<()> {
    let start = utf16::to_byte_offset(&self.text, self.selection.start)?;
    let end = if replace_selected {
      utf16::to_byte_offset(&self.text, self.selection.end)?
    } else {
      start
    };

    let mut text = String::with_capacity(self.text.len() + value.len());
    text.push_str(&self.text[..start]);
    text.push_str(value);
    text.push_str(&self.text[end..]);

    let selection = match selection {
      Some(selection) => selection.shift(self.selection.start),
      None => Selection::point(self.selection.start),
    };

    self.text = text;
    self.selection = fit_selection(&self.text, selection);
    self.log.on_change(&self.text, ChangeSource::Programmatic, Instant::now());
    Ok(())
  }

  /// Decorates the current selection and splices the result in.
  pub fn insert_markdown(&mut self, kind: DecorationKind, mut options: DecorateOptions) -> Result<()> {
    match kind {
      DecorationKind::Image => {
        options.image_url =
          non_empty(options.image_url).or_else(|| Some(self.config.image_url.clone()));
      },
      DecorationKind::Link => {
        options.link_url =
          non_empty(options.link_url).or_else(|| Some(self.config.link_url.clone()));
      },
      DecorationKind::Tab => {
        options.tab_width = options.tab_width.or(Some(self.config.tab_width));
        if !self.selection.is_empty() {
          // Indent whole lines, not just the selected part of the first one.
          let col = LineInfo::at(&self.text, self.selection.start)?.col;
          self.selection = Selection::new(self.selection.start - col, self.selection.end);
        }
      },
      DecorationKind::Table => {
        let table = self.config.table;
        options.row = options.row.map(|row| row.clamp(1, table.max_row.max(1)));
        options.col = options.col.map(|col| col.clamp(1, table.max_col.max(1)));
      },
      _ => {},
    }

    let mut decoration = decorate(self.selected_text(), kind, &options);
    if decoration.new_block {
      self.separate_block(&mut decoration)?;
    }
    tracing::debug!(%kind, selection = ?decoration.selection, "inserting decoration");
    self.insert_text(&decoration.text, true, Some(decoration.selection))
  }

  fn separate_block(&self, decoration: &mut Decoration) -> Result<()> {
    if LineInfo::at(&self.text, self.selection.start)?.is_mid_line() {
      decoration.text.insert(0, '\n');
      decoration.selection = decoration.selection.shift(1);
    }

    let after = LineInfo::at(&self.text, self.selection.end)?.after;
    if !after.trim().is_empty() && !after.starts_with("\n\n") {
      if !after.starts_with('\n') {
        decoration.text.push('\n');
      }
      decoration.text.push('\n');
    }
    Ok(())
  }

  /// Breaks the line at the caret, continuing a Markdown list.
  ///
  /// On an item line the new line starts with the same bullet, or the next
  /// number for ordered items. On a line holding nothing but the marker the
  /// marker is cleared instead, ending the list. Returns `false` without
  /// touching the text when the caret is not on a list item, leaving the
  /// plain line break to the caller.
  pub fn newline(&mut self) -> Result<bool> {
    let caret = self.selection.start;
    let info = LineInfo::at(&self.text, caret)?;
    let Some(item) = ListItem::parse(info.current_line) else {
      return Ok(false);
    };

    if item.is_bare {
      let start = caret - info.col;
      let end = start + utf16::len(info.current_line);
      tracing::debug!(line = info.line, "ending list");
      self.selection = Selection::new(start, end);
      self.insert_text("", true, Some(Selection::point(0)))?;
    } else {
      let marker = item.next_marker();
      let after = utf16::len(&marker) + 1;
      tracing::debug!(line = info.line, %marker, "continuing list");
      self.selection = Selection::point(caret);
      self.insert_text(&format!("\n{marker}"), false, Some(Selection::point(after)))?;
    }
    Ok(true)
  }

  /// Swaps a finished upload's placeholder for the uploaded image.
  ///
  /// Returns `false` when the placeholder is no longer in the text.
  pub fn resolve_upload(&mut self, placeholder: &UploadPlaceholder, file_name: &str, url: &str) -> bool {
    let Some((text, selection)) = placeholder.resolve(&self.text, self.selection, file_name, url)
    else {
      return false;
    };
    self.text = text;
    self.selection = fit_selection(&self.text, selection);
    self.log.on_change(&self.text, ChangeSource::Programmatic, Instant::now());
    true
  }

  /// Restores the previous snapshot. Returns whether the text changed.
  pub fn undo(&mut self) -> bool {
    let value = self.log.undo(&self.text);
    self.apply(value)
  }

  /// Re-applies the last undone snapshot. Returns whether there was one.
  pub fn redo(&mut self) -> bool {
    match self.log.redo() {
      Some(value) => {
        self.apply(value);
        true
      },
      None => false,
    }
  }

  pub fn can_undo(&self) -> bool {
    self.log.can_undo(&self.text)
  }

  pub fn can_redo(&self) -> bool {
    self.log.can_redo()
  }

  /// Commits typed text whose quiet period has ended.
  pub fn poll(&mut self, now: Instant) -> bool {
    self.log.poll(now)
  }

  fn apply(&mut self, value: String) -> bool {
    if value == self.text {
      return false;
    }
    self.text = value;
    self.selection = fit_selection(&self.text, self.selection);
    true
  }
}

/// A line opening with a list marker: `* ` or `N. ` after optional
/// whitespace.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ListItem<'a> {
  indent:  &'a str,
  /// `None` for a bullet.
  number:  Option<u64>,
  /// Nothing follows the marker.
  is_bare: bool,
}

impl<'a> ListItem<'a> {
  fn parse(line: &'a str) -> Option<Self> {
    let rest = line.trim_start();
    let indent = &line[..line.len() - rest.len()];

    if let Some(content) = rest.strip_prefix("* ") {
      return Some(Self {
        indent,
        number: None,
        is_bare: content.is_empty(),
      });
    }

    let digits = rest.len() - rest.trim_start_matches(|c: char| c.is_ascii_digit()).len();
    let content = rest[digits..].strip_prefix(". ")?;
    let number = rest[..digits].parse().ok()?;
    Some(Self {
      indent,
      number: Some(number),
      is_bare: content.is_empty(),
    })
  }

  /// Marker for the item that follows this one.
  fn next_marker(&self) -> String {
    match self.number {
      Some(number) => format!("{}{}. ", self.indent, number.saturating_add(1)),
      None => format!("{}* ", self.indent),
    }
  }
}

fn non_empty(value: Option<String>) -> Option<String> {
  value.filter(|value| !value.is_empty())
}

/// Keeps `selection` inside `text`, collapsing it to the end when an offset
/// would split a character.
fn fit_selection(text: &str, selection: Selection) -> Selection {
  let len = utf16::len(text);
  let selection = selection.clamp(len);
  let valid = utf16::to_byte_offset(text, selection.start).is_ok()
    && utf16::to_byte_offset(text, selection.end).is_ok();
  if valid {
    selection
  } else {
    Selection::point(len)
  }
}
