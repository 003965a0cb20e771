//! Bounded undo/redo history of full-text snapshots.

use std::collections::VecDeque;

/// Default bound on the number of undo steps kept.
pub const DEFAULT_MAX_SIZE: usize = 100;

/// Bounded undo/redo history of full-text snapshots for one editing session.
///
/// The log keeps two stacks: `undo` holds past snapshots with the most recent
/// last, `redo` holds snapshots that an undo popped off. Only the undo stack is
/// bounded; once it grows past `max_size` the oldest snapshot is evicted.
///
/// Pushing is append-only. It never touches the redo stack, so a caller that
/// commits a genuinely new edit must call [`HistoryLog::clear_redo`] first.
///
/// The top of the undo stack is either the text currently on screen (it was
/// pushed when that text was committed) or an older state to restore, and the
/// log cannot tell which on its own. [`HistoryLog::undo`] therefore takes the
/// caller's current text and skips the top snapshot when it matches.
///
/// Walking past either end of the history never fails. Undo falls back to the
/// initial text recorded when the session started and redo returns `None`.
#[derive(Debug, Clone)]
pub struct HistoryLog {
  undo:     VecDeque<String>,
  redo:     Vec<String>,
  max_size: usize,
  initial:  String,
}

impl Default for HistoryLog {
  fn default() -> Self {
    Self::new(DEFAULT_MAX_SIZE, String::new())
  }
}

impl HistoryLog {
  pub fn new(max_size: usize, initial: impl Into<String>) -> Self {
    Self {
      undo: VecDeque::new(),
      redo: Vec::new(),
      max_size,
      initial: initial.into(),
    }
  }

  /// Appends a snapshot, evicting the oldest ones past `max_size`.
  ///
  /// Returns the number of undo steps held after the push.
  pub fn push(&mut self, value: impl Into<String>) -> usize {
    self.undo.push_back(value.into());
    while self.undo.len() > self.max_size {
      self.undo.pop_front();
    }
    self.undo.len()
  }

  /// Steps back one snapshot, given the text the caller currently shows.
  pub fn undo(&mut self, current: &str) -> String {
    let Some(top) = self.undo.pop_back() else {
      tracing::trace!("undo past the start of history");
      return self.initial.clone();
    };

    if top != current {
      self.redo.push(top.clone());
      return top;
    }

    // The top is what is already displayed; restore the one beneath it.
    let previous = self.undo.pop_back();
    self.redo.push(top);
    previous.unwrap_or_else(|| self.initial.clone())
  }

  /// Re-applies the most recently undone snapshot.
  pub fn redo(&mut self) -> Option<String> {
    let value = self.redo.pop()?;
    self.push(value.clone());
    tracing::trace!(
      undo = self.undo.len(),
      redo = self.redo.len(),
      "redo"
    );
    Some(value)
  }

  pub fn clear_redo(&mut self) {
    self.redo.clear();
  }

  /// The most recently pushed snapshot.
  #[inline]
  pub fn last(&self) -> Option<&str> {
    self.undo.back().map(String::as_str)
  }

  /// Undo snapshots, oldest first.
  pub fn entries(&self) -> impl Iterator<Item = &str> {
    self.undo.iter().map(String::as_str)
  }

  #[inline]
  pub fn undo_count(&self) -> usize {
    self.undo.len()
  }

  #[inline]
  pub fn redo_count(&self) -> usize {
    self.redo.len()
  }

  #[inline]
  pub fn max_size(&self) -> usize {
    self.max_size
  }

  /// The text returned by undo once the history runs out.
  #[inline]
  pub fn initial(&self) -> &str {
    &self.initial
  }

  pub fn set_initial(&mut self, initial: impl Into<String>) {
    self.initial = initial.into();
  }
}
