// This code is licensed under Elastic License 2.0
// https://www.elastic.co/licensing/elastic-license

use log::debug;
use tag_indexer::{StringIndexer, UseCaseKey};

use super::constants::TAGS_COLUMN;
use crate::utils::error::QueryError;

fn resolve(
  indexer: &dyn StringIndexer,
  use_case: UseCaseKey,
  org_id: u64,
  string: &str,
) -> Result<u64, QueryError> {
  match indexer.resolve(use_case, org_id, string) {
    Some(id) => {
      debug!("Resolved {} for org {} in {} to {}", string, org_id, use_case, id);
      Ok(id)
    }
    None => Err(QueryError::TagResolution {
      use_case,
      org_id,
      string: string.to_owned(),
    }),
  }
}

/// Resolve a tag key to the name of the column holding its values.
pub fn resolve_tag_key(
  indexer: &dyn StringIndexer,
  use_case: UseCaseKey,
  org_id: u64,
  key: &str,
) -> Result<String, QueryError> {
  let id = resolve(indexer, use_case, org_id, key)?;
  Ok(format!("{}[{}]", TAGS_COLUMN, id))
}

/// Resolve a tag value to the id stored in the tags column.
pub fn resolve_tag_value(
  indexer: &dyn StringIndexer,
  use_case: UseCaseKey,
  org_id: u64,
  value: &str,
) -> Result<u64, QueryError> {
  resolve(indexer, use_case, org_id, value)
}

/// Resolve a raw metric name to its metric id.
pub fn resolve_metric_id(
  indexer: &dyn StringIndexer,
  use_case: UseCaseKey,
  org_id: u64,
  name: &str,
) -> Result<u64, QueryError> {
  indexer
    .resolve(use_case, org_id, name)
    .ok_or_else(|| QueryError::MetricNotFound {
      use_case,
      org_id,
      name: name.to_owned(),
    })
}
