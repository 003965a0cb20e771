//! Background plumbing that turns editor events into history commits.

pub mod commit;
pub mod debounce;

pub use commit::{
  ChangeEvent,
  CommitHook,
};
pub use debounce::{
  AsyncHook,
  send_blocking,
  try_send,
};
