use std::sync::Arc;

use gita_lib::logger::{
  ChangeSource,
  CommitLog,
};
use parking_lot::Mutex;
use tokio::time::Instant;

use crate::debounce::AsyncHook;

/// The editable text changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeEvent {
  pub text:   String,
  pub source: ChangeSource,
}

/// Feeds text changes into a shared [`CommitLog`] and commits typed text once
/// it has been quiet for the log's interval.
///
/// The log stays shared so the owner can undo and redo on it directly while
/// the hook is running.
pub struct CommitHook {
  log: Arc<Mutex<CommitLog>>,
}

impl CommitHook {
  pub fn new(log: Arc<Mutex<CommitLog>>) -> Self {
    Self { log }
  }
}

impl AsyncHook for CommitHook {
  type Event = ChangeEvent;

  fn handle_event(&mut self, event: ChangeEvent, _timeout: Option<Instant>) -> Option<Instant> {
    let now = Instant::now();
    self
      .log
      .lock()
      .on_change(&event.text, event.source, now.into_std())
      .map(Instant::from_std)
  }

  fn finish_debounce(&mut self) {
    if self.log.lock().finish_debounce() {
      log::trace!("debounced input committed");
    }
  }
}

#[cfg(test)]
mod tests {
  use std::time::Duration;

  use gita_lib::history::HistoryLog;

  use super::*;

  fn shared_log() -> Arc<Mutex<CommitLog>> {
    Arc::new(Mutex::new(CommitLog::new(
      HistoryLog::new(100, ""),
      Duration::from_millis(600),
    )))
  }

  fn input(text: &str) -> ChangeEvent {
    ChangeEvent {
      text:   text.to_string(),
      source: ChangeSource::Input,
    }
  }

  #[tokio::test(start_paused = true)]
  async fn typing_commits_after_quiet_period() {
    let log = shared_log();
    let tx = CommitHook::new(log.clone()).spawn();

    tx.send(input("h")).await.unwrap();
    tokio::time::sleep(Duration::from_millis(300)).await;
    tx.send(input("hi")).await.unwrap();
    tokio::time::sleep(Duration::from_millis(500)).await;
    assert_eq!(log.lock().history().undo_count(), 0);

    tokio::time::sleep(Duration::from_millis(200)).await;
    let log = log.lock();
    assert_eq!(log.history().entries().collect::<Vec<_>>(), ["hi"]);
    assert!(!log.is_pending());
  }

  #[tokio::test(start_paused = true)]
  async fn programmatic_change_skips_the_wait() {
    let log = shared_log();
    let tx = CommitHook::new(log.clone()).spawn();

    tx.send(input("x")).await.unwrap();
    tx.send(ChangeEvent {
      text:   "**x**".to_string(),
      source: ChangeSource::Programmatic,
    })
    .await
    .unwrap();
    tokio::time::sleep(Duration::from_millis(1)).await;

    assert_eq!(
      log.lock().history().entries().collect::<Vec<_>>(),
      ["**x**"]
    );

    // Nothing left to commit later.
    tokio::time::sleep(Duration::from_secs(1)).await;
    assert_eq!(log.lock().history().undo_count(), 1);
  }

  #[tokio::test(start_paused = true)]
  async fn closing_the_channel_flushes_pending_input() {
    let log = shared_log();
    let (tx, rx) = tokio::sync::mpsc::channel(8);
    let task = tokio::spawn(crate::debounce::run(CommitHook::new(log.clone()), rx));

    tx.send(input("draft")).await.unwrap();
    drop(tx);
    task.await.unwrap();

    assert_eq!(log.lock().history().last(), Some("draft"));
  }
}
