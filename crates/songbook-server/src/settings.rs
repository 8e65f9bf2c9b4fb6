//! Layered server configuration: built-in defaults, then an optional TOML
//! file, then `SONGBOOK_*` environment variables.

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment, File, Source};
use serde::Deserialize;

pub const ENV_PREFIX: &str = "SONGBOOK";

/// Runtime server configuration.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct ServerConfig {
  pub host:          String,
  pub port:          u16,
  /// SQLite database file; a leading `~/` is expanded.
  pub database_path: PathBuf,
}

impl ServerConfig {
  pub fn address(&self) -> String { format!("{}:{}", self.host, self.port) }
}

/// Load configuration, reading `path` if it exists.
pub fn load(path: &Path) -> Result<ServerConfig, ConfigError> {
  build(File::from(path).required(false), Environment::with_prefix(ENV_PREFIX))
}

fn build<T>(file: T, env: Environment) -> Result<ServerConfig, ConfigError>
where
  T: Source + Send + Sync + 'static,
{
  Config::builder()
    .set_default("host", "0.0.0.0")?
    .set_default("port", 8080_i64)?
    .set_default("database_path", "songbook.db")?
    .add_source(file)
    .add_source(env)
    .build()?
    .try_deserialize()
}

/// Expand a leading `~` to the user's home directory.
pub fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}
