//! Debounced commits into a [`HistoryLog`].
//!
//! Keystrokes arrive far more often than anyone wants undo steps, so direct
//! input is held back until the text has been quiet for `interval`. The
//! [`CommitLog`] holds no timers of its own: every call takes the current
//! [`Instant`] and changes that need a timer return the deadline to wait for.
//! The owner either polls with [`CommitLog::poll`] or arms a real timer and
//! calls [`CommitLog::finish_debounce`] when it fires.
//!
//! ```
//! use std::time::{Duration, Instant};
//!
//! use gita_lib::history::HistoryLog;
//! use gita_lib::logger::{ChangeSource, CommitLog};
//!
//! let mut log = CommitLog::new(HistoryLog::new(100, ""), Duration::from_millis(600));
//! let now = Instant::now();
//!
//! let deadline = log.on_change("h", ChangeSource::Input, now).unwrap();
//! log.on_change("hi", ChangeSource::Input, now + Duration::from_millis(100));
//! assert!(!log.poll(deadline));
//! assert!(log.poll(now + Duration::from_millis(700)));
//! assert_eq!(log.history().last(), Some("hi"));
//! ```

use std::time::{
  Duration,
  Instant,
};

use crate::history::HistoryLog;

/// Default quiet period before direct input is committed.
pub const DEFAULT_INTERVAL: Duration = Duration::from_millis(600);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeSource {
  /// Typing and other direct input. Debounced.
  Input,
  /// Programmatic replacement such as an inserted decoration. Committed at
  /// once.
  Programmatic,
}

#[derive(Debug, Clone)]
struct Pending {
  value:    String,
  deadline: Instant,
}

#[derive(Debug)]
pub struct CommitLog {
  history:  HistoryLog,
  interval: Duration,
  pending:  Option<Pending>,
  /// Value last handed out by undo or redo; echoing it back is not an edit.
  last_pop: Option<String>,
}

impl CommitLog {
  pub fn new(history: HistoryLog, interval: Duration) -> Self {
    Self {
      history,
      interval,
      pending: None,
      last_pop: None,
    }
  }

  #[inline]
  pub fn history(&self) -> &HistoryLog {
    &self.history
  }

  #[inline]
  pub fn interval(&self) -> Duration {
    self.interval
  }

  /// When the pending commit is due, if there is one.
  #[inline]
  pub fn deadline(&self) -> Option<Instant> {
    self.pending.as_ref().map(|pending| pending.deadline)
  }

  #[inline]
  pub fn is_pending(&self) -> bool {
    self.pending.is_some()
  }

  pub fn set_initial(&mut self, initial: impl Into<String>) {
    self.history.set_initial(initial);
  }

  /// Records that the text changed to `value`.
  ///
  /// Returns the deadline of the pending commit when one is (re)armed.
  pub fn on_change(&mut self, value: &str, source: ChangeSource, now: Instant) -> Option<Instant> {
    if self.history.last() == Some(value) || self.last_pop.as_deref() == Some(value) {
      // Back at a state the history already holds.
      self.pending = None;
      return None;
    }

    self.history.clear_redo();
    self.last_pop = None;

    match source {
      ChangeSource::Programmatic => {
        self.pending = None;
        self.commit(value.to_string());
        None
      },
      ChangeSource::Input => {
        let deadline = now + self.interval;
        self.pending = Some(Pending {
          value: value.to_string(),
          deadline,
        });
        Some(deadline)
      },
    }
  }

  /// Commits the pending value if its deadline has passed.
  pub fn poll(&mut self, now: Instant) -> bool {
    match self.deadline() {
      Some(deadline) if deadline <= now => self.finish_debounce(),
      _ => false,
    }
  }

  /// Commits the pending value regardless of its deadline.
  ///
  /// Returns whether a snapshot was pushed.
  pub fn finish_debounce(&mut self) -> bool {
    let Some(pending) = self.pending.take() else {
      return false;
    };
    if self.history.last() == Some(pending.value.as_str()) {
      return false;
    }
    self.commit(pending.value);
    true
  }

  /// Steps back, dropping any pending commit.
  pub fn undo(&mut self, current: &str) -> String {
    self.pending = None;
    let value = self.history.undo(current);
    self.last_pop = Some(value.clone());
    value
  }

  pub fn redo(&mut self) -> Option<String> {
    let value = self.history.redo()?;
    self.last_pop = Some(value.clone());
    Some(value)
  }

  pub fn can_undo(&self, current: &str) -> bool {
    self.history.undo_count() > 1 || self.history.initial() != current
  }

  pub fn can_redo(&self) -> bool {
    self.history.redo_count() > 0
  }

  fn commit(&mut self, value: String) {
    let depth = self.history.push(value);
    tracing::trace!(depth, "committed history snapshot");
  }
}
