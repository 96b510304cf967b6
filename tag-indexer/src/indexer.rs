// This code is licensed under Elastic License 2.0
// https://www.elastic.co/licensing/elastic-license

use std::collections::HashMap;

use crate::error::IndexerError;
use crate::use_case::UseCaseKey;

/// Ids assigned by a bulk record, keyed by organization id and then by string.
pub type OrgStringIds = HashMap<u64, HashMap<String, u64>>;

/// Maps organization-scoped strings to integer ids and back.
///
/// Lookups are keyed by `(use_case, org_id, string)`. An id is stable for the
/// lifetime of one index generation only, so callers must not hold on to
/// resolved ids across a reindex.
pub trait StringIndexer: Send + Sync {
  /// Look up the id of `string`. Never creates an entry.
  fn resolve(&self, use_case: UseCaseKey, org_id: u64, string: &str) -> Option<u64>;

  /// Look up the string that was assigned `id`.
  fn reverse_resolve(&self, use_case: UseCaseKey, org_id: u64, id: u64) -> Option<String>;

  /// Assign an id to `string` if it doesn't have one, and return the id.
  fn record(&self, use_case: UseCaseKey, org_id: u64, string: &str) -> Result<u64, IndexerError>;

  /// Record every string for every organization in `org_strings`.
  ///
  /// Either all strings are validated and recorded, or none is.
  fn bulk_record(
    &self,
    use_case: UseCaseKey,
    org_strings: &HashMap<u64, Vec<String>>,
  ) -> Result<OrgStringIds, IndexerError>;
}
