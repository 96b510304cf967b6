// This code is licensed under Elastic License 2.0
// https://www.elastic.co/licensing/elastic-license

use tag_indexer::{IndexerError, UseCaseKey};
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
/// Enum for errors raised while building a query expression.
pub enum QueryError {
  #[error("Tag {string} has no id for org {org_id} in {use_case}.")]
  TagResolution {
    use_case: UseCaseKey,
    org_id: u64,
    string: String,
  },

  #[error("Metric {name} has no id for org {org_id} in {use_case}.")]
  MetricNotFound {
    use_case: UseCaseKey,
    org_id: u64,
    name: String,
  },

  #[error("Invalid argument. {0}")]
  InvalidArgument(String),

  #[error("Unknown derived metric: {0}")]
  UnknownDerivedMetric(String),

  #[error("Indexer error: {0}")]
  IndexerError(IndexerError),
}

impl From<IndexerError> for QueryError {
  fn from(error: IndexerError) -> Self {
    QueryError::IndexerError(error)
  }
}
