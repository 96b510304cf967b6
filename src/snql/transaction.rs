// This code is licensed under Elastic License 2.0
// https://www.elastic.co/licensing/elastic-license

//! Performance aggregations keyed on transaction status and satisfaction.

use tag_indexer::StringIndexer;

use super::aggregation::{aggregation, AggregateKind, TagFilter};
use super::arithmetic::{addition, division_float};
use crate::ast::Expr;
use crate::naming::{TransactionSatisfactionTagValue, TransactionStatusTagValue, TransactionTagsKey};
use crate::utils::error::QueryError;

/// Statuses that don't count as a failure.
const NON_FAILURE_STATUSES: [TransactionStatusTagValue; 3] = [
  TransactionStatusTagValue::Ok,
  TransactionStatusTagValue::Cancelled,
  TransactionStatusTagValue::Unknown,
];

fn aggregation_on_satisfaction(
  indexer: &dyn StringIndexer,
  kind: AggregateKind,
  org_id: u64,
  satisfaction: TransactionSatisfactionTagValue,
  metric_ids: &[u64],
  alias: Option<&str>,
) -> Result<Expr, QueryError> {
  let key = TransactionTagsKey::TransactionSatisfaction;
  aggregation(
    indexer,
    key.use_case(),
    kind,
    org_id,
    metric_ids,
    &[TagFilter::equals(key.as_str(), satisfaction.as_str())],
    alias,
  )
}

pub fn all_transactions(
  indexer: &dyn StringIndexer,
  org_id: u64,
  metric_ids: &[u64],
  alias: Option<&str>,
) -> Result<Expr, QueryError> {
  aggregation(
    indexer,
    TransactionTagsKey::TransactionStatus.use_case(),
    AggregateKind::Count,
    org_id,
    metric_ids,
    &[],
    alias,
  )
}

/// Transactions whose status is anything but ok, cancelled or unknown.
pub fn failure_count_transaction(
  indexer: &dyn StringIndexer,
  org_id: u64,
  metric_ids: &[u64],
  alias: Option<&str>,
) -> Result<Expr, QueryError> {
  let key = TransactionTagsKey::TransactionStatus;
  aggregation(
    indexer,
    key.use_case(),
    AggregateKind::Count,
    org_id,
    metric_ids,
    &[TagFilter::not_in(
      key.as_str(),
      NON_FAILURE_STATUSES.iter().map(|status| status.as_str()),
    )],
    alias,
  )
}

pub fn satisfaction_count_transaction(
  indexer: &dyn StringIndexer,
  org_id: u64,
  metric_ids: &[u64],
  alias: Option<&str>,
) -> Result<Expr, QueryError> {
  aggregation_on_satisfaction(
    indexer,
    AggregateKind::Count,
    org_id,
    TransactionSatisfactionTagValue::Satisfied,
    metric_ids,
    alias,
  )
}

pub fn tolerated_count_transaction(
  indexer: &dyn StringIndexer,
  org_id: u64,
  metric_ids: &[u64],
  alias: Option<&str>,
) -> Result<Expr, QueryError> {
  aggregation_on_satisfaction(
    indexer,
    AggregateKind::Count,
    org_id,
    TransactionSatisfactionTagValue::Tolerated,
    metric_ids,
    alias,
  )
}

/// Distinct users who had at least one frustrated transaction.
pub fn miserable_users(
  indexer: &dyn StringIndexer,
  org_id: u64,
  metric_ids: &[u64],
  alias: Option<&str>,
) -> Result<Expr, QueryError> {
  aggregation_on_satisfaction(
    indexer,
    AggregateKind::Unique,
    org_id,
    TransactionSatisfactionTagValue::Frustrated,
    metric_ids,
    alias,
  )
}

/// `(satisfied + tolerated / 2) / all`.
pub fn apdex(satisfied: Expr, tolerated: Expr, all: Expr, alias: Option<&str>) -> Expr {
  division_float(
    addition(satisfied, division_float(tolerated, 2, None), None),
    all,
    alias,
  )
}
