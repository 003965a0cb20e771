use std::{
  io,
  path::{
    Path,
    PathBuf,
  },
};

use gita_lib::config::EditorConfig;

/// Depth up to which config layers merge key by key.
const MERGE_DEPTH: usize = 3;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
  #[error("failed to read {}: {source}", path.display())]
  Io {
    path:   PathBuf,
    #[source]
    source: io::Error,
  },
  #[error("failed to parse {}: {source}", path.display())]
  Parse {
    path:   PathBuf,
    #[source]
    source: toml::de::Error,
  },
  #[error("invalid configuration: {0}")]
  Invalid(#[from] toml::de::Error),
  #[error("failed to serialize the default configuration: {0}")]
  Serialize(#[from] toml::ser::Error),
}

pub type Result<T> = std::result::Result<T, ConfigError>;

/// Built-in defaults as a TOML document, the bottom layer of every merge.
pub fn default_config() -> Result<toml::Value> {
  Ok(toml::Value::try_from(EditorConfig::default())?)
}

/// Loads the editor configuration.
///
/// An explicit `file` must exist and is layered onto the defaults on its own.
/// Otherwise the user config file and then the workspace `.gita/config.toml`
/// are layered on, each skipped when missing.
pub fn load_config(file: Option<&Path>) -> Result<EditorConfig> {
  let layers = match file {
    Some(file) => vec![read_required(file)?],
    None => {
      let mut layers = Vec::new();
      for path in [crate::config_file(), crate::workspace_config_file()] {
        if let Some(layer) = read_layer(&path)? {
          layers.push(layer);
        }
      }
      layers
    },
  };
  merge_layers(layers)
}

/// Layers `layers` in order onto the defaults.
pub fn merge_layers(layers: impl IntoIterator<Item = toml::Value>) -> Result<EditorConfig> {
  let merged = layers
    .into_iter()
    .fold(default_config()?, |acc, layer| {
      crate::merge_toml_values(acc, layer, MERGE_DEPTH)
    });
  Ok(merged.try_into::<EditorConfig>()?)
}

/// Reads one config layer, `None` when the file does not exist.
pub fn read_layer(path: &Path) -> Result<Option<toml::Value>> {
  match std::fs::read_to_string(path) {
    Ok(source) => {
      log::debug!("loading config layer {}", path.display());
      parse(path, &source).map(Some)
    },
    Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
    Err(source) => {
      Err(ConfigError::Io {
        path: path.to_owned(),
        source,
      })
    },
  }
}

fn read_required(path: &Path) -> Result<toml::Value> {
  let source = std::fs::read_to_string(path).map_err(|source| {
    ConfigError::Io {
      path: path.to_owned(),
      source,
    }
  })?;
  parse(path, &source)
}

fn parse(path: &Path, source: &str) -> Result<toml::Value> {
  let table: toml::Table = toml::from_str(source).map_err(|source| {
    ConfigError::Parse {
      path: path.to_owned(),
      source,
    }
  })?;
  Ok(toml::Value::Table(table))
}
