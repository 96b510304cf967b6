// This code is licensed under Elastic License 2.0
// https://www.elastic.co/licensing/elastic-license

//! Fixed vocabulary of tag keys, tag values and raw metric names.
//!
//! Each vocabulary is a closed enum bound to the use case its strings are indexed
//! under, so a builder can't look up a session status in the performance namespace.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use log::info;
use tag_indexer::{OrgStringIds, StringIndexer, UseCaseKey};

use crate::utils::error::QueryError;

macro_rules! vocabulary {
  (
    $(#[$meta:meta])*
    $name:ident in $use_case:expr => {
      $($variant:ident = $value:literal),+ $(,)?
    }
  ) => {
    $(#[$meta])*
    #[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
    pub enum $name {
      $($variant),+
    }

    impl $name {
      pub const ALL: &'static [$name] = &[$($name::$variant),+];

      pub fn as_str(&self) -> &'static str {
        match self {
          $($name::$variant => $value),+
        }
      }

      /// The namespace this string is indexed in.
      pub fn use_case(&self) -> UseCaseKey {
        $use_case
      }
    }

    impl fmt::Display for $name {
      fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
      }
    }

    impl FromStr for $name {
      type Err = QueryError;

      fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
          $($value => Ok($name::$variant),)+
          _ => Err(QueryError::InvalidArgument(format!(
            "{} is not a valid {}",
            s,
            stringify!($name)
          ))),
        }
      }
    }
  };
}

vocabulary! {
  /// Tag keys on session metrics.
  SessionTagsKey in UseCaseKey::ReleaseHealth => {
    SessionStatus = "session.status",
  }
}

vocabulary! {
  /// Values of the `session.status` tag.
  SessionStatusTagValue in UseCaseKey::ReleaseHealth => {
    Init = "init",
    Crashed = "crashed",
    ErroredPreaggr = "errored_preaggr",
    Abnormal = "abnormal",
    Errored = "errored",
    Exited = "exited",
  }
}

vocabulary! {
  /// Tag keys on transaction metrics.
  TransactionTagsKey in UseCaseKey::Performance => {
    TransactionSatisfaction = "satisfaction",
    TransactionStatus = "transaction.status",
    MeasurementRating = "measurement_rating",
  }
}

vocabulary! {
  /// Values of the `transaction.status` tag.
  TransactionStatusTagValue in UseCaseKey::Performance => {
    Ok = "ok",
    Cancelled = "cancelled",
    Unknown = "unknown",
    Aborted = "aborted",
  }
}

vocabulary! {
  /// Values of the `satisfaction` tag, bucketed against the project's apdex threshold.
  TransactionSatisfactionTagValue in UseCaseKey::Performance => {
    Satisfied = "satisfied",
    Tolerated = "tolerated",
    Frustrated = "frustrated",
  }
}

vocabulary! {
  /// Values of the `measurement_rating` tag on web vitals.
  MeasurementRating in UseCaseKey::Performance => {
    Good = "good",
    Meh = "meh",
    Poor = "poor",
  }
}

vocabulary! {
  /// Names of the raw release health metrics.
  SessionMetricKey in UseCaseKey::ReleaseHealth => {
    Session = "sentry.sessions.session",
    User = "sentry.sessions.user",
    Duration = "sentry.sessions.session.duration",
  }
}

vocabulary! {
  /// Names of the raw performance metrics.
  TransactionMetricKey in UseCaseKey::Performance => {
    Duration = "sentry.transactions.transaction.duration",
    User = "sentry.transactions.user",
  }
}

/// Every string in the naming layer that is indexed under `use_case`.
pub fn vocabulary_strings(use_case: UseCaseKey) -> Vec<&'static str> {
  let session = SessionTagsKey::ALL
    .iter()
    .map(|v| (v.use_case(), v.as_str()))
    .chain(SessionStatusTagValue::ALL.iter().map(|v| (v.use_case(), v.as_str())))
    .chain(SessionMetricKey::ALL.iter().map(|v| (v.use_case(), v.as_str())));
  let transaction = TransactionTagsKey::ALL
    .iter()
    .map(|v| (v.use_case(), v.as_str()))
    .chain(TransactionStatusTagValue::ALL.iter().map(|v| (v.use_case(), v.as_str())))
    .chain(TransactionSatisfactionTagValue::ALL.iter().map(|v| (v.use_case(), v.as_str())))
    .chain(MeasurementRating::ALL.iter().map(|v| (v.use_case(), v.as_str())))
    .chain(TransactionMetricKey::ALL.iter().map(|v| (v.use_case(), v.as_str())));

  session
    .chain(transaction)
    .filter(|(string_use_case, _)| *string_use_case == use_case)
    .map(|(_, string)| string)
    .collect()
}

/// Record the vocabulary of `use_case` for each organization, so every named
/// builder in that namespace can resolve its tags.
pub fn record_vocabulary(
  indexer: &dyn StringIndexer,
  use_case: UseCaseKey,
  org_ids: &[u64],
) -> Result<OrgStringIds, QueryError> {
  let strings: Vec<String> = vocabulary_strings(use_case)
    .into_iter()
    .map(str::to_owned)
    .collect();
  let org_strings: HashMap<u64, Vec<String>> = org_ids
    .iter()
    .map(|org_id| (*org_id, strings.clone()))
    .collect();

  info!(
    "Recording {} {} strings for {} orgs",
    strings.len(),
    use_case,
    org_ids.len()
  );
  Ok(indexer.bulk_record(use_case, &org_strings)?)
}

#[cfg(test)]
mod tests {
  use tag_indexer::config::IndexerSettings;
  use tag_indexer::{IndexerError, MemoryIndexer};
  use test_case::test_case;

  use super::*;

  #[test_case("init", Ok(SessionStatusTagValue::Init); "known value")]
  #[test_case(
    "errored_preaggr",
    Ok(SessionStatusTagValue::ErroredPreaggr);
    "value with underscore"
  )]
  #[test_case("healthy", Err(()); "unknown value")]
  fn test_session_status_from_str(s: &str, expected: Result<SessionStatusTagValue, ()>) {
    assert_eq!(s.parse::<SessionStatusTagValue>().map_err(|_| ()), expected);
  }

  #[test]
  fn test_round_trip_through_strings() {
    for status in TransactionStatusTagValue::ALL {
      assert_eq!(status.as_str().parse::<TransactionStatusTagValue>(), Ok(*status));
      assert_eq!(status.to_string(), status.as_str());
    }
  }

  #[test]
  fn test_use_cases() {
    assert_eq!(SessionTagsKey::SessionStatus.use_case(), UseCaseKey::ReleaseHealth);
    assert_eq!(TransactionTagsKey::TransactionStatus.use_case(), UseCaseKey::Performance);
    assert_eq!(MeasurementRating::Good.use_case(), UseCaseKey::Performance);
    assert_eq!(TransactionMetricKey::User.use_case(), UseCaseKey::Performance);
  }

  #[test]
  fn test_vocabulary_strings() {
    let release_health = vocabulary_strings(UseCaseKey::ReleaseHealth);
    assert!(release_health.contains(&"session.status"));
    assert!(release_health.contains(&"exited"));
    assert!(release_health.contains(&"sentry.sessions.user"));
    assert!(!release_health.contains(&"satisfaction"));

    let performance = vocabulary_strings(UseCaseKey::Performance);
    assert!(performance.contains(&"transaction.status"));
    assert!(performance.contains(&"frustrated"));
    assert!(performance.contains(&"measurement_rating"));
    assert!(!performance.contains(&"session.status"));
  }

  #[test]
  fn test_record_vocabulary() {
    let indexer = MemoryIndexer::new();
    let recorded = record_vocabulary(&indexer, UseCaseKey::Performance, &[1, 2]).unwrap();

    let strings = vocabulary_strings(UseCaseKey::Performance);
    assert_eq!(recorded.len(), 2);
    assert_eq!(recorded[&1].len(), strings.len());
    assert_eq!(indexer.len(), 2 * strings.len());
    assert_eq!(
      indexer.resolve(UseCaseKey::Performance, 2, "satisfaction"),
      Some(recorded[&2]["satisfaction"])
    );
    assert_eq!(indexer.resolve(UseCaseKey::ReleaseHealth, 1, "session.status"), None);
  }

  #[test]
  fn test_record_vocabulary_indexer_error() {
    let indexer = MemoryIndexer::new_with_settings(IndexerSettings::new(5, 1));
    let result = record_vocabulary(&indexer, UseCaseKey::ReleaseHealth, &[1]);

    assert!(matches!(
      result,
      Err(QueryError::IndexerError(IndexerError::StringTooLong(_, 5)))
    ));
    assert!(indexer.is_empty());
  }
}
