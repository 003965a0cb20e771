//! Debounced async hooks.
//!
//! A hook runs as a tokio task that drains a channel of events. Each event may
//! arm, keep or clear a deadline; when the deadline passes without another
//! event the hook is asked to finish whatever it was holding back.

use std::time::Duration;

use futures_executor::block_on;
use tokio::{
  sync::mpsc::{
    self,
    Sender,
    error::TrySendError,
  },
  time::Instant,
};

/// Events buffered per hook before senders start to wait.
const CHANNEL_CAPACITY: usize = 128;

/// Longest a synchronous sender waits on a full channel before dropping.
const SEND_TIMEOUT: Duration = Duration::from_millis(2);

pub trait AsyncHook: Sync + Send + 'static + Sized {
  type Event: Sync + Send + 'static;

  /// Handles one event. `timeout` is the deadline currently armed; the
  /// returned value replaces it.
  fn handle_event(&mut self, event: Self::Event, timeout: Option<Instant>) -> Option<Instant>;

  /// Called once the armed deadline passes.
  fn finish_debounce(&mut self);

  /// Starts the hook on the current runtime and returns its sender.
  ///
  /// Outside a runtime nothing is spawned and events sent to the returned
  /// channel are simply buffered.
  fn spawn(self) -> Sender<Self::Event> {
    let (tx, rx) = mpsc::channel(CHANNEL_CAPACITY);
    if tokio::runtime::Handle::try_current().is_ok() {
      tokio::spawn(run(self, rx));
    } else {
      log::debug!("no tokio runtime, hook not started");
    }
    tx
  }
}

/// Event loop of a hook. Returns once every sender is gone.
///
/// A deadline still armed when the channel closes is finished before
/// returning so nothing held back is lost.
pub async fn run<Hook: AsyncHook>(mut hook: Hook, mut rx: mpsc::Receiver<Hook::Event>) {
  let mut deadline = None;
  loop {
    let event = match deadline {
      Some(at) => {
        match tokio::time::timeout_at(at, rx.recv()).await {
          Ok(event) => event,
          Err(_elapsed) => {
            hook.finish_debounce();
            deadline = None;
            continue;
          },
        }
      },
      None => rx.recv().await,
    };
    let Some(event) = event else {
      if deadline.is_some() {
        hook.finish_debounce();
      }
      break;
    };
    deadline = hook.handle_event(event, deadline);
  }
}

/// Sends from synchronous code, waiting at most [`SEND_TIMEOUT`] on a full
/// channel. The event is dropped when the wait runs out or the hook is gone.
pub fn send_blocking<T>(tx: &Sender<T>, data: T) {
  match tx.try_send(data) {
    Ok(()) => {},
    Err(TrySendError::Full(data)) => {
      if block_on(tx.send_timeout(data, SEND_TIMEOUT)).is_err() {
        log::warn!("hook channel full, event dropped");
      }
    },
    Err(TrySendError::Closed(_)) => {
      log::warn!("attempted to send to a closed hook channel");
    },
  }
}

/// Sends without waiting. Returns whether the event was queued.
pub fn try_send<T>(tx: &Sender<T>, data: T) -> bool {
  tx.try_send(data).is_ok()
}
