//! `gita-md`: the markdown decorator and editing log on the command line.
//!
//! Every command prints a single JSON document on stdout. Logs go to stderr or
//! the `--log` file.

mod cli;
mod logging;

use std::{
  io::Read,
  path::Path,
};

use anyhow::{
  Context,
  Result,
};
use clap::Parser;
use gita_lib::{
  config::EditorConfig,
  decorate::{
    DecorateOptions,
    DecorationKind,
    decorate_named,
  },
  document::Document,
  selection::Selection,
};
use serde::Serialize;

use crate::cli::{
  Cli,
  Command,
};

#[derive(Debug, Serialize)]
struct Inserted<'a> {
  text:      &'a str,
  selection: Selection,
}

fn main() -> Result<()> {
  let cli = Cli::parse();
  let log_file = cli.log_file.is_some().then(|| {
    gita_loader::initialize_log_file(cli.log_file.clone());
    gita_loader::log_file()
  });
  logging::setup(cli.verbosity, log_file.as_deref())?;

  gita_loader::initialize_config_file(cli.config_file.clone());
  let config = gita_loader::config::load_config(cli.config_file.as_deref())
    .context("failed to load configuration")?;
  log::debug!("configuration: {config:?}");

  let output = match cli.command {
    Command::Decorate {
      kind,
      options,
      text,
    } => {
      let text = match text {
        Some(text) => text,
        None => read_stdin_line()?,
      };
      decorate_json(&text, &kind, &options.with_defaults(&config))?
    },
    Command::Insert {
      kind,
      start,
      end,
      options,
      file,
    } => {
      let text = match file {
        Some(path) => read_file(&path)?,
        None => read_stdin()?,
      };
      insert_json(
        text,
        config,
        Selection::new(start, end),
        kind,
        options.into_options(),
      )?
    },
  };

  println!("{output}");
  Ok(())
}

fn decorate_json(text: &str, kind: &str, options: &DecorateOptions) -> Result<String> {
  let decoration = decorate_named(text, kind, options);
  Ok(serde_json::to_string(&decoration)?)
}

fn insert_json(
  text: String,
  config: EditorConfig,
  selection: Selection,
  kind: DecorationKind,
  options: DecorateOptions,
) -> Result<String> {
  let mut doc = Document::new(text, config);
  doc
    .set_selection(selection)
    .with_context(|| format!("invalid selection {}..{}", selection.start, selection.end))?;
  doc.insert_markdown(kind, options)?;
  log::info!("inserted {kind}");

  Ok(serde_json::to_string(&Inserted {
    text:      doc.text(),
    selection: doc.selection(),
  })?)
}

fn read_file(path: &Path) -> Result<String> {
  std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

fn read_stdin() -> Result<String> {
  let mut text = String::new();
  std::io::stdin()
    .read_to_string(&mut text)
    .context("failed to read stdin")?;
  Ok(text)
}

/// Stdin without the newline `echo` and friends append.
fn read_stdin_line() -> Result<String> {
  let mut text = read_stdin()?;
  if text.ends_with('\n') {
    text.pop();
    if text.ends_with('\r') {
      text.pop();
    }
  }
  Ok(text)
}
