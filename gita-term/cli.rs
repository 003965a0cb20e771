use std::path::PathBuf;

use clap::{
  ArgAction,
  Args,
  Parser,
  Subcommand,
};
use gita_lib::{
  config::EditorConfig,
  decorate::{
    DecorateOptions,
    DecorationKind,
  },
};

#[derive(Parser, Debug)]
#[command(name = "gita-md", about = "Markdown decorations and snippets from the command line")]
pub struct Cli {
  /// Increase logging verbosity (repeat for more detail)
  #[arg(short = 'v', action = ArgAction::Count, global = true)]
  pub verbosity: u8,

  /// Save logs to a specific file
  #[arg(long = "log", value_name = "FILE", global = true)]
  pub log_file: Option<PathBuf>,

  /// Load configuration from a specific file
  #[arg(short = 'c', long = "config", value_name = "FILE", global = true)]
  pub config_file: Option<PathBuf>,

  #[command(subcommand)]
  pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
  /// Decorate TEXT and print the decoration as JSON
  Decorate {
    /// Decoration kind, e.g. `bold`, `h2` or `table`
    #[arg(short, long, value_name = "NAME")]
    kind: String,

    #[command(flatten)]
    options: OptionArgs,

    /// Text to decorate, read from stdin when omitted
    text: Option<String>,
  },
  /// Insert a decoration into a document and print the result as JSON
  Insert {
    /// Decoration kind, e.g. `bold`, `h2` or `table`
    #[arg(short, long, value_name = "NAME")]
    kind: DecorationKind,

    /// Selection start in UTF-16 code units
    #[arg(long, default_value_t = 0)]
    start: usize,

    /// Selection end in UTF-16 code units
    #[arg(long, default_value_t = 0)]
    end: usize,

    #[command(flatten)]
    options: OptionArgs,

    /// Document to edit, read from stdin when omitted
    file: Option<PathBuf>,
  },
}

#[derive(Args, Debug, Default, Clone)]
pub struct OptionArgs {
  /// Image label used when nothing is selected
  #[arg(long)]
  pub target: Option<String>,

  #[arg(long, value_name = "URL")]
  pub image_url: Option<String>,

  #[arg(long, value_name = "URL")]
  pub link_url: Option<String>,

  /// Table rows
  #[arg(long)]
  pub row: Option<usize>,

  /// Table columns
  #[arg(long)]
  pub col: Option<usize>,

  /// Indent width, `1` indents with a tab
  #[arg(long)]
  pub tab_width: Option<usize>,
}

impl OptionArgs {
  /// Options for a standalone decoration, with URLs and indent width taken
  /// from `config` unless given on the command line.
  pub fn with_defaults(self, config: &EditorConfig) -> DecorateOptions {
    let mut options = self.into_options();
    options
      .image_url
      .get_or_insert_with(|| config.image_url.clone());
    options
      .link_url
      .get_or_insert_with(|| config.link_url.clone());
    options.tab_width.get_or_insert(config.tab_width);
    options
  }

  /// Options as given. The document fills in the rest from its config.
  pub fn into_options(self) -> DecorateOptions {
    DecorateOptions {
      target:    self.target,
      image_url: self.image_url,
      link_url:  self.link_url,
      row:       self.row,
      col:       self.col,
      tab_width: self.tab_width,
    }
  }
}
