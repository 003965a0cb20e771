pub mod config;

use std::{
  path::{
    Path,
    PathBuf,
  },
  sync::OnceLock,
};

use etcetera::base_strategy::{
  BaseStrategy,
  choose_base_strategy,
};

const APP_DIR: &str = "gita";

static CONFIG_FILE: OnceLock<PathBuf> = OnceLock::new();

static LOG_FILE: OnceLock<PathBuf> = OnceLock::new();

pub fn initialize_config_file(specified_file: Option<PathBuf>) {
  let config_file = specified_file.unwrap_or_else(default_config_file);
  ensure_parent_dir(&config_file);
  CONFIG_FILE.set(config_file).ok();
}

pub fn initialize_log_file(specified_file: Option<PathBuf>) {
  let log_file = specified_file.unwrap_or_else(default_log_file);
  ensure_parent_dir(&log_file);
  LOG_FILE.set(log_file).ok();
}

/// User configuration directory.
///
/// `GITA_CONFIG_DIR` wins when set. Falls back to the working directory when
/// the platform has no home directory to speak of.
pub fn config_dir() -> PathBuf {
  if let Some(dir) = env_dir("GITA_CONFIG_DIR") {
    return dir;
  }
  match choose_base_strategy() {
    Ok(strategy) => strategy.config_dir().join(APP_DIR),
    Err(err) => {
      log::warn!("unable to find the config directory: {err}");
      PathBuf::from(".")
    },
  }
}

pub fn cache_dir() -> PathBuf {
  if let Some(dir) = env_dir("GITA_CACHE_DIR") {
    return dir;
  }
  match choose_base_strategy() {
    Ok(strategy) => strategy.cache_dir().join(APP_DIR),
    Err(err) => {
      log::warn!("unable to find the cache directory: {err}");
      PathBuf::from(".")
    },
  }
}

pub fn config_file() -> PathBuf {
  CONFIG_FILE
    .get_or_init(|| {
      let path = default_config_file();
      ensure_parent_dir(&path);
      path
    })
    .clone()
}

pub fn log_file() -> PathBuf {
  LOG_FILE
    .get_or_init(|| {
      let path = default_log_file();
      ensure_parent_dir(&path);
      path
    })
    .clone()
}

pub fn workspace_config_file() -> PathBuf {
  find_workspace().0.join(".gita").join("config.toml")
}

pub fn default_log_file() -> PathBuf {
  cache_dir().join("gita.log")
}

/// Merge two TOML documents, merging values from `right` onto `left`
///
/// `merge_depth` sets the nesting depth up to which tables are merged instead
/// of overridden. Anything that is not a pair of tables takes the value of
/// `right`.
///
/// With a depth of 2, merging
///
/// ```toml
/// [logger]
/// interval = 250
/// ```
///
/// onto the defaults only replaces `logger.interval` and keeps
/// `logger.max-size`.
pub fn merge_toml_values(left: toml::Value, right: toml::Value, merge_depth: usize) -> toml::Value {
  use toml::Value;

  match (left, right) {
    (Value::Table(mut left_map), Value::Table(right_map)) if merge_depth > 0 => {
      for (rname, rvalue) in right_map {
        let merged = match left_map.remove(&rname) {
          Some(lvalue) => merge_toml_values(lvalue, rvalue, merge_depth - 1),
          None => rvalue,
        };
        left_map.insert(rname, merged);
      }
      Value::Table(left_map)
    },
    (_, value) => value,
  }
}

/// Finds the current workspace folder.
///
/// Searches upward from the working directory for the first directory that
/// contains `.git` or `.gita`. Returns `(dir, true)` with the working
/// directory itself when nothing was found, `(workspace, false)` otherwise.
pub fn find_workspace() -> (PathBuf, bool) {
  match std::env::current_dir() {
    Ok(current_dir) => find_workspace_in(current_dir),
    Err(_) => (PathBuf::new(), true),
  }
}

pub fn find_workspace_in(dir: impl AsRef<Path>) -> (PathBuf, bool) {
  let dir = dir.as_ref();
  for ancestor in dir.ancestors() {
    if ancestor.join(".git").exists() || ancestor.join(".gita").exists() {
      return (ancestor.to_owned(), false);
    }
  }

  (dir.to_owned(), true)
}

fn env_dir(var: &str) -> Option<PathBuf> {
  let dir = std::env::var_os(var)?;
  if dir.is_empty() {
    return None;
  }
  Some(expand_tilde(PathBuf::from(dir)))
}

fn expand_tilde(path: PathBuf) -> PathBuf {
  let Ok(rest) = path.strip_prefix("~") else {
    return path;
  };
  match etcetera::home_dir() {
    Ok(home) => home.join(rest),
    Err(_) => path,
  }
}

fn default_config_file() -> PathBuf {
  config_dir().join("config.toml")
}

fn ensure_parent_dir(path: &Path) {
  if let Some(parent) = path.parent()
    && !parent.exists()
  {
    std::fs::create_dir_all(parent).ok();
  }
}


#[cfg(test)]
mod workspace_tests {
  use super::find_workspace_in;

  #[test]
  fn finds_marker_in_ancestor() {
    let root = tempfile::tempdir().unwrap();
    std::fs::create_dir(root.path().join(".gita")).unwrap();
    let nested = root.path().join("notes").join("drafts");
    std::fs::create_dir_all(&nested).unwrap();

    let (found, fallback) = find_workspace_in(&nested);
    assert_eq!(found, root.path());
    assert!(!fallback);
  }
}
