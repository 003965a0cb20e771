use std::path::Path;

use anyhow::{
  Context,
  Result,
};

pub fn level_for(verbosity: u8) -> log::LevelFilter {
  match verbosity {
    0 => log::LevelFilter::Warn,
    1 => log::LevelFilter::Info,
    2 => log::LevelFilter::Debug,
    _ => log::LevelFilter::Trace,
  }
}

/// Installs the global logger. Records go to `log_file` when given, stderr
/// otherwise, so they never mix with the JSON on stdout.
pub fn setup(verbosity: u8, log_file: Option<&Path>) -> Result<()> {
  let dispatch = fern::Dispatch::new()
    .format(|out, message, record| {
      out.finish(format_args!(
        "{} {} [{}] {}",
        chrono::Local::now().format("%Y-%m-%dT%H:%M:%S%.3f"),
        record.target(),
        record.level(),
        message
      ))
    })
    .level(level_for(verbosity));

  let dispatch = match log_file {
    Some(path) => {
      let file = fern::log_file(path)
        .with_context(|| format!("failed to open log file {}", path.display()))?;
      dispatch.chain(file)
    },
    None => dispatch.chain(std::io::stderr()),
  };

  dispatch.apply().context("logger already initialized")
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn verbosity_levels() {
    assert_eq!(level_for(0), log::LevelFilter::Warn);
    assert_eq!(level_for(1), log::LevelFilter::Info);
    assert_eq!(level_for(2), log::LevelFilter::Debug);
    assert_eq!(level_for(7), log::LevelFilter::Trace);
  }
}
