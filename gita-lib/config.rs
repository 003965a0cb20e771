//! Editor settings read from `config.toml`.

use std::time::Duration;

use serde::{
  Deserialize,
  Serialize,
};

use crate::history::DEFAULT_MAX_SIZE;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default, deny_unknown_fields)]
pub struct EditorConfig {
  /// URL used for image insertion when none is given.
  pub image_url: String,
  /// URL used for link insertion when none is given.
  pub link_url:  String,
  /// `1` indents with a tab, anything else with that many spaces.
  pub tab_width: usize,
  pub logger:    LoggerConfig,
  pub table:     TableConfig,
}

impl Default for EditorConfig {
  fn default() -> Self {
    Self {
      image_url: String::new(),
      link_url:  String::new(),
      tab_width: 2,
      logger:    LoggerConfig::default(),
      table:     TableConfig::default(),
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default, deny_unknown_fields)]
pub struct LoggerConfig {
  /// Maximum number of undo steps.
  pub max_size: usize,
  /// Quiet period in milliseconds before typed text becomes an undo step.
  pub interval: u64,
}

impl LoggerConfig {
  #[inline]
  pub fn interval(&self) -> Duration {
    Duration::from_millis(self.interval)
  }
}

impl Default for LoggerConfig {
  fn default() -> Self {
    Self {
      max_size: DEFAULT_MAX_SIZE,
      interval: 600,
    }
  }
}

/// Largest table the editor will insert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default, deny_unknown_fields)]
pub struct TableConfig {
  pub max_row: usize,
  pub max_col: usize,
}

impl Default for TableConfig {
  fn default() -> Self {
    Self {
      max_row: 4,
      max_col: 6,
    }
  }
}
