// This code is licensed under Elastic License 2.0
// https://www.elastic.co/licensing/elastic-license

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::env;

const DEFAULT_CONFIG_FILE_NAME: &str = "default.toml";

#[derive(Clone, Debug, Deserialize)]
/// Settings for the tag indexer.
pub struct IndexerSettings {
  max_string_length: usize,
  first_id: u64,
}

impl IndexerSettings {
  /// Create settings directly, bypassing the config files.
  pub fn new(max_string_length: usize, first_id: u64) -> Self {
    IndexerSettings {
      max_string_length,
      first_id,
    }
  }

  /// Get the maximum length, in bytes, of a string that can be recorded.
  pub fn get_max_string_length(&self) -> usize {
    self.max_string_length
  }

  /// Get the first id handed out by a fresh indexer.
  pub fn get_first_id(&self) -> u64 {
    self.first_id
  }

  pub fn get_default_config_file_name() -> &'static str {
    DEFAULT_CONFIG_FILE_NAME
  }
}

impl Default for IndexerSettings {
  fn default() -> Self {
    IndexerSettings::new(200, 1)
  }
}

#[derive(Debug, Deserialize)]
/// Settings for the tag indexer, read from config file.
pub struct Settings {
  indexer: IndexerSettings,
}

impl Settings {
  /// Create Settings from given configuration directory path.
  ///
  /// `<dir>/default.toml` is required. `<dir>/<RUN_MODE>.toml` and `INDEXER_`
  /// environment variables override it, in that order.
  pub fn new(config_dir_path: &str) -> Result<Self, ConfigError> {
    let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());
    Self::from_sources(config_dir_path, &run_mode, environment())
  }

  fn from_sources(
    config_dir_path: &str,
    run_mode: &str,
    environment: Environment,
  ) -> Result<Self, ConfigError> {
    let config_default_file_name = format!("{}/{}", config_dir_path, DEFAULT_CONFIG_FILE_NAME);
    let config_run_mode_file_name = format!("{}/{}.toml", config_dir_path, run_mode);

    let config = Config::builder()
      .add_source(File::with_name(&config_default_file_name))
      .add_source(File::with_name(&config_run_mode_file_name).required(false))
      .add_source(environment)
      .build()?;

    config.try_deserialize()
  }

  /// Get indexer settings.
  pub fn get_indexer_settings(&self) -> &IndexerSettings {
    &self.indexer
  }
}

/// Eg.. `INDEXER_INDEXER__FIRST_ID=100` sets `indexer.first_id`.
fn environment() -> Environment {
  Environment::with_prefix("indexer")
    .prefix_separator("_")
    .separator("__")
    .try_parsing(true)
}
