// This code is licensed under Elastic License 2.0
// https://www.elastic.co/licensing/elastic-license

//! Builders for the query fragments derived metrics are made of.
//!
//! Aggregations resolve their tag filters through a [`tag_indexer::StringIndexer`]
//! and fail when a string has no id for the organization. Arithmetic combinators and
//! rates only rearrange expressions they are handed, and never fail.

pub mod aggregation;
pub mod arithmetic;
pub mod constants;
pub mod rate;
pub mod resolve;
pub mod session;
pub mod transaction;

pub use aggregation::{
  aggregation, membership_predicate, tag_equals_predicate, uniq_aggregation_on_metric,
  AggregateKind, TagCondition, TagFilter,
};
pub use arithmetic::{addition, addition_of, complement, division_float, subtraction};
pub use rate::{count_web_vitals, rate};
pub use resolve::{resolve_metric_id, resolve_tag_key, resolve_tag_value};
pub use session::{
  abnormal_sessions, abnormal_users, all_sessions, all_users, crashed_sessions, crashed_users,
  errored_all_users, errored_preaggr_sessions, session_duration_filters,
};
pub use transaction::{
  all_transactions, apdex, failure_count_transaction, miserable_users,
  satisfaction_count_transaction, tolerated_count_transaction,
};
