// This code is licensed under Elastic License 2.0
// https://www.elastic.co/licensing/elastic-license

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use dashmap::DashMap;
use log::{debug, info};

use crate::config::{IndexerSettings, Settings};
use crate::error::IndexerError;
use crate::indexer::{OrgStringIds, StringIndexer};
use crate::use_case::UseCaseKey;

/// In-memory string indexer.
///
/// Ids come from a single sequence shared by every namespace and organization,
/// so an id never collides with one handed out for a different triple.
#[derive(Debug)]
pub struct MemoryIndexer {
  /// (use case, org, string) -> id.
  strings: DashMap<(UseCaseKey, u64, String), u64>,

  /// (use case, org, id) -> string.
  ids: DashMap<(UseCaseKey, u64, u64), String>,

  /// Next id to hand out.
  next_id: AtomicU64,

  settings: IndexerSettings,
}

impl MemoryIndexer {
  /// Create an empty indexer with default settings.
  pub fn new() -> Self {
    Self::new_with_settings(IndexerSettings::default())
  }

  pub fn new_with_settings(settings: IndexerSettings) -> Self {
    MemoryIndexer {
      strings: DashMap::new(),
      ids: DashMap::new(),
      next_id: AtomicU64::new(settings.get_first_id()),
      settings,
    }
  }

  /// Create an indexer from the config files in `config_dir_path`.
  pub fn new_from_config(config_dir_path: &str) -> Result<Self, IndexerError> {
    let settings = Settings::new(config_dir_path)?;
    let indexer_settings = settings.get_indexer_settings();
    info!(
      "Creating memory indexer from {} with max string length {} and first id {}",
      config_dir_path,
      indexer_settings.get_max_string_length(),
      indexer_settings.get_first_id()
    );

    Ok(Self::new_with_settings(indexer_settings.clone()))
  }

  /// Number of recorded strings across all namespaces and organizations.
  pub fn len(&self) -> usize {
    self.strings.len()
  }

  pub fn is_empty(&self) -> bool {
    self.strings.is_empty()
  }

  /// Drop every assignment. Strings recorded afterwards get fresh ids, which
  /// is how a reindex of the backing store behaves.
  ///
  /// The two maps are cleared one after the other, not atomically. The reverse
  /// map goes first, so a concurrent `record` can leave a stale reverse entry
  /// but never a resolvable id without its string.
  pub fn clear(&self) {
    info!("Clearing {} indexed strings", self.strings.len());
    self.ids.clear();
    self.strings.clear();
  }

  fn validate(&self, string: &str) -> Result<(), IndexerError> {
    if string.is_empty() {
      return Err(IndexerError::EmptyString);
    }

    let max = self.settings.get_max_string_length();
    if string.len() > max {
      return Err(IndexerError::StringTooLong(string.len(), max));
    }

    Ok(())
  }
}

impl Default for MemoryIndexer {
  fn default() -> Self {
    Self::new()
  }
}

impl StringIndexer for MemoryIndexer {
  fn resolve(&self, use_case: UseCaseKey, org_id: u64, string: &str) -> Option<u64> {
    self
      .strings
      .get(&(use_case, org_id, string.to_owned()))
      .map(|id| *id.value())
  }

  fn reverse_resolve(&self, use_case: UseCaseKey, org_id: u64, id: u64) -> Option<String> {
    self
      .ids
      .get(&(use_case, org_id, id))
      .map(|string| string.value().clone())
  }

  fn record(&self, use_case: UseCaseKey, org_id: u64, string: &str) -> Result<u64, IndexerError> {
    self.validate(string)?;

    // The entry guard holds the shard lock, so two threads recording the same
    // string agree on one id.
    let id = *self
      .strings
      .entry((use_case, org_id, string.to_owned()))
      .or_insert_with(|| {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        self.ids.insert((use_case, org_id, id), string.to_owned());
        debug!(
          "Recorded {} for org {} in {} as {}",
          string, org_id, use_case, id
        );
        id
      })
      .value();

    Ok(id)
  }

  fn bulk_record(
    &self,
    use_case: UseCaseKey,
    org_strings: &HashMap<u64, Vec<String>>,
  ) -> Result<OrgStringIds, IndexerError> {
    for string in org_strings.values().flatten() {
      self.validate(string)?;
    }

    let mut results = OrgStringIds::new();
    for (org_id, strings) in org_strings {
      let org_results = results.entry(*org_id).or_default();
      for string in strings {
        let id = self.record(use_case, *org_id, string)?;
        org_results.insert(string.clone(), id);
      }
    }

    Ok(results)
  }
}
