// This code is licensed under Elastic License 2.0
// https://www.elastic.co/licensing/elastic-license

//! Release health aggregations keyed on the `session.status` tag.
//!
//! Session counts sum the session counter; user counts take the distinct values
//! of the user set.

use tag_indexer::StringIndexer;

use super::aggregation::{aggregation, tag_equals_predicate, AggregateKind, TagFilter};
use crate::ast::Expr;
use crate::naming::{SessionStatusTagValue, SessionTagsKey};
use crate::utils::error::QueryError;

fn aggregation_on_session_status(
  indexer: &dyn StringIndexer,
  kind: AggregateKind,
  org_id: u64,
  session_status: SessionStatusTagValue,
  metric_ids: &[u64],
  alias: Option<&str>,
) -> Result<Expr, QueryError> {
  let key = SessionTagsKey::SessionStatus;
  aggregation(
    indexer,
    key.use_case(),
    kind,
    org_id,
    metric_ids,
    &[TagFilter::equals(key.as_str(), session_status.as_str())],
    alias,
  )
}

pub fn all_sessions(
  indexer: &dyn StringIndexer,
  org_id: u64,
  metric_ids: &[u64],
  alias: Option<&str>,
) -> Result<Expr, QueryError> {
  aggregation_on_session_status(
    indexer,
    AggregateKind::Sum,
    org_id,
    SessionStatusTagValue::Init,
    metric_ids,
    alias,
  )
}

pub fn crashed_sessions(
  indexer: &dyn StringIndexer,
  org_id: u64,
  metric_ids: &[u64],
  alias: Option<&str>,
) -> Result<Expr, QueryError> {
  aggregation_on_session_status(
    indexer,
    AggregateKind::Sum,
    org_id,
    SessionStatusTagValue::Crashed,
    metric_ids,
    alias,
  )
}

/// Sessions that had errors before they were aggregated client side.
pub fn errored_preaggr_sessions(
  indexer: &dyn StringIndexer,
  org_id: u64,
  metric_ids: &[u64],
  alias: Option<&str>,
) -> Result<Expr, QueryError> {
  aggregation_on_session_status(
    indexer,
    AggregateKind::Sum,
    org_id,
    SessionStatusTagValue::ErroredPreaggr,
    metric_ids,
    alias,
  )
}

pub fn abnormal_sessions(
  indexer: &dyn StringIndexer,
  org_id: u64,
  metric_ids: &[u64],
  alias: Option<&str>,
) -> Result<Expr, QueryError> {
  aggregation_on_session_status(
    indexer,
    AggregateKind::Sum,
    org_id,
    SessionStatusTagValue::Abnormal,
    metric_ids,
    alias,
  )
}

/// Distinct users, regardless of how their sessions ended.
pub fn all_users(
  indexer: &dyn StringIndexer,
  org_id: u64,
  metric_ids: &[u64],
  alias: Option<&str>,
) -> Result<Expr, QueryError> {
  aggregation(
    indexer,
    SessionTagsKey::SessionStatus.use_case(),
    AggregateKind::Unique,
    org_id,
    metric_ids,
    &[],
    alias,
  )
}

pub fn crashed_users(
  indexer: &dyn StringIndexer,
  org_id: u64,
  metric_ids: &[u64],
  alias: Option<&str>,
) -> Result<Expr, QueryError> {
  aggregation_on_session_status(
    indexer,
    AggregateKind::Unique,
    org_id,
    SessionStatusTagValue::Crashed,
    metric_ids,
    alias,
  )
}

pub fn abnormal_users(
  indexer: &dyn StringIndexer,
  org_id: u64,
  metric_ids: &[u64],
  alias: Option<&str>,
) -> Result<Expr, QueryError> {
  aggregation_on_session_status(
    indexer,
    AggregateKind::Unique,
    org_id,
    SessionStatusTagValue::Abnormal,
    metric_ids,
    alias,
  )
}

/// Distinct users with at least one errored session, crashed and abnormal included.
pub fn errored_all_users(
  indexer: &dyn StringIndexer,
  org_id: u64,
  metric_ids: &[u64],
  alias: Option<&str>,
) -> Result<Expr, QueryError> {
  aggregation_on_session_status(
    indexer,
    AggregateKind::Unique,
    org_id,
    SessionStatusTagValue::Errored,
    metric_ids,
    alias,
  )
}

/// Filters applied to session duration, which is only meaningful for sessions that
/// exited cleanly.
pub fn session_duration_filters(
  indexer: &dyn StringIndexer,
  org_id: u64,
) -> Result<Vec<Expr>, QueryError> {
  let key = SessionTagsKey::SessionStatus;
  Ok(vec![tag_equals_predicate(
    indexer,
    key.use_case(),
    org_id,
    key.as_str(),
    SessionStatusTagValue::Exited.as_str(),
  )?])
}
