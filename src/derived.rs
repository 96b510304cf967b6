// This code is licensed under Elastic License 2.0
// https://www.elastic.co/licensing/elastic-license

//! Catalog of named derived metrics.
//!
//! Each derived metric is computed from one raw metric. Building it resolves the
//! raw metric's id for the organization, then composes aggregations over it.

use std::fmt;
use std::str::FromStr;

use log::debug;
use tag_indexer::{StringIndexer, UseCaseKey};

use crate::ast::Expr;
use crate::naming::{SessionMetricKey, TransactionMetricKey};
use crate::snql::{
  abnormal_sessions, abnormal_users, all_sessions, all_transactions, all_users, apdex, complement,
  crashed_sessions, crashed_users, division_float, errored_all_users, errored_preaggr_sessions,
  failure_count_transaction, miserable_users, resolve_metric_id, satisfaction_count_transaction,
  subtraction, tolerated_count_transaction,
};
use crate::utils::error::QueryError;

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum DerivedMetric {
  SessionAll,
  SessionCrashed,
  SessionAbnormal,
  SessionErroredPreaggregated,
  SessionCrashRate,
  SessionCrashFreeRate,
  SessionAllUser,
  SessionCrashedUser,
  SessionAbnormalUser,
  SessionErroredUser,
  SessionHealthyUser,
  SessionCrashUserRate,
  SessionCrashFreeUserRate,
  TransactionAll,
  TransactionFailed,
  TransactionFailureRate,
  TransactionSatisfied,
  TransactionTolerated,
  TransactionApdex,
  TransactionMiserableUser,
}

impl DerivedMetric {
  pub const ALL: &'static [DerivedMetric] = &[
    DerivedMetric::SessionAll,
    DerivedMetric::SessionCrashed,
    DerivedMetric::SessionAbnormal,
    DerivedMetric::SessionErroredPreaggregated,
    DerivedMetric::SessionCrashRate,
    DerivedMetric::SessionCrashFreeRate,
    DerivedMetric::SessionAllUser,
    DerivedMetric::SessionCrashedUser,
    DerivedMetric::SessionAbnormalUser,
    DerivedMetric::SessionErroredUser,
    DerivedMetric::SessionHealthyUser,
    DerivedMetric::SessionCrashUserRate,
    DerivedMetric::SessionCrashFreeUserRate,
    DerivedMetric::TransactionAll,
    DerivedMetric::TransactionFailed,
    DerivedMetric::TransactionFailureRate,
    DerivedMetric::TransactionSatisfied,
    DerivedMetric::TransactionTolerated,
    DerivedMetric::TransactionApdex,
    DerivedMetric::TransactionMiserableUser,
  ];

  /// Public name, also used as the default alias.
  pub fn name(&self) -> &'static str {
    match self {
      DerivedMetric::SessionAll => "session.all",
      DerivedMetric::SessionCrashed => "session.crashed",
      DerivedMetric::SessionAbnormal => "session.abnormal",
      DerivedMetric::SessionErroredPreaggregated => "session.errored_preaggregated",
      DerivedMetric::SessionCrashRate => "session.crash_rate",
      DerivedMetric::SessionCrashFreeRate => "session.crash_free_rate",
      DerivedMetric::SessionAllUser => "session.all_user",
      DerivedMetric::SessionCrashedUser => "session.crashed_user",
      DerivedMetric::SessionAbnormalUser => "session.abnormal_user",
      DerivedMetric::SessionErroredUser => "session.errored_user_all",
      DerivedMetric::SessionHealthyUser => "session.healthy_user",
      DerivedMetric::SessionCrashUserRate => "session.crash_user_rate",
      DerivedMetric::SessionCrashFreeUserRate => "session.crash_free_user_rate",
      DerivedMetric::TransactionAll => "transaction.all",
      DerivedMetric::TransactionFailed => "transaction.failed",
      DerivedMetric::TransactionFailureRate => "transaction.failure_rate",
      DerivedMetric::TransactionSatisfied => "transaction.satisfied",
      DerivedMetric::TransactionTolerated => "transaction.tolerated",
      DerivedMetric::TransactionApdex => "transaction.apdex",
      DerivedMetric::TransactionMiserableUser => "transaction.miserable_user",
    }
  }

  /// The use case and name of the raw metric this is computed from.
  pub fn raw_metric(&self) -> (UseCaseKey, &'static str) {
    let session = |key: SessionMetricKey| (key.use_case(), key.as_str());
    let transaction = |key: TransactionMetricKey| (key.use_case(), key.as_str());

    match self {
      DerivedMetric::SessionAll
      | DerivedMetric::SessionCrashed
      | DerivedMetric::SessionAbnormal
      | DerivedMetric::SessionErroredPreaggregated
      | DerivedMetric::SessionCrashRate
      | DerivedMetric::SessionCrashFreeRate => session(SessionMetricKey::Session),
      DerivedMetric::SessionAllUser
      | DerivedMetric::SessionCrashedUser
      | DerivedMetric::SessionAbnormalUser
      | DerivedMetric::SessionErroredUser
      | DerivedMetric::SessionHealthyUser
      | DerivedMetric::SessionCrashUserRate
      | DerivedMetric::SessionCrashFreeUserRate => session(SessionMetricKey::User),
      DerivedMetric::TransactionAll
      | DerivedMetric::TransactionFailed
      | DerivedMetric::TransactionFailureRate
      | DerivedMetric::TransactionSatisfied
      | DerivedMetric::TransactionTolerated
      | DerivedMetric::TransactionApdex => transaction(TransactionMetricKey::Duration),
      DerivedMetric::TransactionMiserableUser => transaction(TransactionMetricKey::User),
    }
  }

  /// Build the expression for this metric over the given metric ids.
  ///
  /// Constituent aggregations are unaliased, `alias` goes on the outermost node.
  pub fn snql(
    &self,
    indexer: &dyn StringIndexer,
    org_id: u64,
    metric_ids: &[u64],
    alias: Option<&str>,
  ) -> Result<Expr, QueryError> {
    let (i, o, m) = (indexer, org_id, metric_ids);
    let expr = match self {
      DerivedMetric::SessionAll => all_sessions(i, o, m, alias)?,
      DerivedMetric::SessionCrashed => crashed_sessions(i, o, m, alias)?,
      DerivedMetric::SessionAbnormal => abnormal_sessions(i, o, m, alias)?,
      DerivedMetric::SessionErroredPreaggregated => errored_preaggr_sessions(i, o, m, alias)?,
      DerivedMetric::SessionCrashRate => {
        division_float(crashed_sessions(i, o, m, None)?, all_sessions(i, o, m, None)?, alias)
      }
      DerivedMetric::SessionCrashFreeRate => complement(
        division_float(crashed_sessions(i, o, m, None)?, all_sessions(i, o, m, None)?, None),
        alias,
      ),
      DerivedMetric::SessionAllUser => all_users(i, o, m, alias)?,
      DerivedMetric::SessionCrashedUser => crashed_users(i, o, m, alias)?,
      DerivedMetric::SessionAbnormalUser => abnormal_users(i, o, m, alias)?,
      DerivedMetric::SessionErroredUser => errored_all_users(i, o, m, alias)?,
      DerivedMetric::SessionHealthyUser => {
        subtraction(all_users(i, o, m, None)?, errored_all_users(i, o, m, None)?, alias)
      }
      DerivedMetric::SessionCrashUserRate => {
        division_float(crashed_users(i, o, m, None)?, all_users(i, o, m, None)?, alias)
      }
      DerivedMetric::SessionCrashFreeUserRate => complement(
        division_float(crashed_users(i, o, m, None)?, all_users(i, o, m, None)?, None),
        alias,
      ),
      DerivedMetric::TransactionAll => all_transactions(i, o, m, alias)?,
      DerivedMetric::TransactionFailed => failure_count_transaction(i, o, m, alias)?,
      DerivedMetric::TransactionFailureRate => division_float(
        failure_count_transaction(i, o, m, None)?,
        all_transactions(i, o, m, None)?,
        alias,
      ),
      DerivedMetric::TransactionSatisfied => satisfaction_count_transaction(i, o, m, alias)?,
      DerivedMetric::TransactionTolerated => tolerated_count_transaction(i, o, m, alias)?,
      DerivedMetric::TransactionApdex => apdex(
        satisfaction_count_transaction(i, o, m, None)?,
        tolerated_count_transaction(i, o, m, None)?,
        all_transactions(i, o, m, None)?,
        alias,
      ),
      DerivedMetric::TransactionMiserableUser => miserable_users(i, o, m, alias)?,
    };
    Ok(expr)
  }

  /// Resolve the raw metric for the organization and build this metric, aliased
  /// with its name.
  pub fn build(&self, indexer: &dyn StringIndexer, org_id: u64) -> Result<Expr, QueryError> {
    let (use_case, raw_metric) = self.raw_metric();
    let metric_id = resolve_metric_id(indexer, use_case, org_id, raw_metric)?;
    debug!(
      "Building {} for org {} over {} ({})",
      self.name(),
      org_id,
      raw_metric,
      metric_id
    );
    self.snql(indexer, org_id, &[metric_id], Some(self.name()))
  }
}

impl fmt::Display for DerivedMetric {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.name())
  }
}

impl FromStr for DerivedMetric {
  type Err = QueryError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    DerivedMetric::ALL
      .iter()
      .find(|metric| metric.name() == s)
      .copied()
      .ok_or_else(|| QueryError::UnknownDerivedMetric(s.to_owned()))
  }
}

#[cfg(test)]
mod tests {
  use std::collections::HashMap;

  use tag_indexer::MemoryIndexer;
  use test_case::test_case;

  use super::*;
  use crate::naming::vocabulary_strings;

  const ORG_ID: u64 = 42;

  fn indexer() -> MemoryIndexer {
    let _ = env_logger::builder().is_test(true).try_init();

    let indexer = MemoryIndexer::new();
    for use_case in [UseCaseKey::ReleaseHealth, UseCaseKey::Performance] {
      let mut org_strings = HashMap::new();
      org_strings.insert(
        ORG_ID,
        vocabulary_strings(use_case)
          .into_iter()
          .map(str::to_owned)
          .collect(),
      );
      indexer.bulk_record(use_case, &org_strings).unwrap();
    }
    indexer
  }

  fn metric_id(indexer: &MemoryIndexer, metric: DerivedMetric) -> u64 {
    let (use_case, name) = metric.raw_metric();
    indexer.resolve(use_case, ORG_ID, name).unwrap()
  }

  #[test]
  fn test_names_round_trip() {
    for metric in DerivedMetric::ALL {
      assert_eq!(metric.name().parse::<DerivedMetric>(), Ok(*metric));
      assert_eq!(metric.to_string(), metric.name());
    }
    assert_eq!(
      "session.unknown".parse::<DerivedMetric>(),
      Err(QueryError::UnknownDerivedMetric("session.unknown".to_owned()))
    );
  }

  #[test]
  fn test_every_metric_builds() {
    let indexer = indexer();
    for metric in DerivedMetric::ALL {
      let expr = metric.build(&indexer, ORG_ID).unwrap();
      assert_eq!(expr.get_alias(), Some(metric.name()));
      assert_eq!(expr, metric.build(&indexer, ORG_ID).unwrap());
    }
  }

  #[test]
  fn test_crash_free_rate() {
    let indexer = indexer();
    let m = [metric_id(&indexer, DerivedMetric::SessionCrashFreeRate)];

    assert_eq!(
      DerivedMetric::SessionCrashFreeRate.build(&indexer, ORG_ID).unwrap(),
      complement(
        division_float(
          crashed_sessions(&indexer, ORG_ID, &m, None).unwrap(),
          all_sessions(&indexer, ORG_ID, &m, None).unwrap(),
          None,
        ),
        Some("session.crash_free_rate"),
      )
    );
  }

  #[test]
  fn test_healthy_user() {
    let indexer = indexer();
    let m = [metric_id(&indexer, DerivedMetric::SessionHealthyUser)];

    assert_eq!(
      DerivedMetric::SessionHealthyUser
        .snql(&indexer, ORG_ID, &m, Some("healthy"))
        .unwrap(),
      subtraction(
        all_users(&indexer, ORG_ID, &m, None).unwrap(),
        errored_all_users(&indexer, ORG_ID, &m, None).unwrap(),
        Some("healthy"),
      )
    );
  }

  #[test]
  fn test_apdex() {
    let indexer = indexer();
    let m = [metric_id(&indexer, DerivedMetric::TransactionApdex)];

    let expr = DerivedMetric::TransactionApdex.build(&indexer, ORG_ID).unwrap();
    assert_eq!(
      expr,
      division_float(
        crate::snql::addition(
          satisfaction_count_transaction(&indexer, ORG_ID, &m, None).unwrap(),
          division_float(tolerated_count_transaction(&indexer, ORG_ID, &m, None).unwrap(), 2, None),
          None,
        ),
        all_transactions(&indexer, ORG_ID, &m, None).unwrap(),
        Some("transaction.apdex"),
      )
    );
  }

  #[test_case(DerivedMetric::SessionCrashRate; "session metric")]
  #[test_case(DerivedMetric::TransactionFailureRate; "transaction metric")]
  fn test_unknown_raw_metric(metric: DerivedMetric) {
    let indexer = MemoryIndexer::new();
    let (use_case, name) = metric.raw_metric();
    assert_eq!(
      metric.build(&indexer, ORG_ID),
      Err(QueryError::MetricNotFound {
        use_case,
        org_id: ORG_ID,
        name: name.to_owned(),
      })
    );
  }

  #[test]
  fn test_missing_tag_fails_whole_build() {
    let indexer = MemoryIndexer::new();
    let (use_case, name) = DerivedMetric::TransactionFailureRate.raw_metric();
    indexer.record(use_case, ORG_ID, name).unwrap();

    assert!(matches!(
      DerivedMetric::TransactionFailureRate.build(&indexer, ORG_ID),
      Err(QueryError::TagResolution { .. })
    ));

    // Membership-only metrics need no tags.
    assert!(DerivedMetric::TransactionAll.build(&indexer, ORG_ID).is_ok());
  }

  #[test]
  fn test_empty_metric_ids() {
    let indexer = indexer();
    assert!(matches!(
      DerivedMetric::SessionCrashRate.snql(&indexer, ORG_ID, &[], None),
      Err(QueryError::InvalidArgument(_))
    ));
  }
}
