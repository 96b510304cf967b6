// This code is licensed under Elastic License 2.0
// https://www.elastic.co/licensing/elastic-license

use thiserror::Error;

#[derive(Debug, Error, Eq, PartialEq)]
/// Enum for various errors in the tag indexer.
pub enum IndexerError {
  #[error("String too long. Length {0}, Max allowed {1}.")]
  StringTooLong(usize, usize),

  #[error("Cannot index an empty string.")]
  EmptyString,

  #[error("Invalid configuration. {0}")]
  InvalidConfiguration(String),
}

impl From<config::ConfigError> for IndexerError {
  fn from(error: config::ConfigError) -> Self {
    IndexerError::InvalidConfiguration(error.to_string())
  }
}
