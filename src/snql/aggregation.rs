// This code is licensed under Elastic License 2.0
// https://www.elastic.co/licensing/elastic-license

//! Filtered aggregations over the value column.
//!
//! Every aggregation is restricted to a set of metric ids, and optionally to rows
//! whose tags match a list of filters. Tag keys and values are resolved through the
//! indexer for the caller's use case and organization; a string without an id fails
//! the build instead of producing a filter that silently matches nothing.

use log::debug;
use tag_indexer::{StringIndexer, UseCaseKey};

use super::constants::{
  AND, COUNT_IF, EQUALS, IN, METRIC_ID_COLUMN, NOT_IN, SUM_IF, UNIQ_IF, VALUE_COLUMN,
};
use super::resolve::{resolve_tag_key, resolve_tag_value};
use crate::ast::{Expr, Literal};
use crate::utils::error::QueryError;

/// Aggregate function applied to the value column.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum AggregateKind {
  /// Number of rows, for distributions.
  Count,
  /// Sum of values, for counters.
  Sum,
  /// Number of distinct values, for sets.
  Unique,
}

impl AggregateKind {
  pub fn function_name(&self) -> &'static str {
    match self {
      AggregateKind::Count => COUNT_IF,
      AggregateKind::Sum => SUM_IF,
      AggregateKind::Unique => UNIQ_IF,
    }
  }
}

/// Condition a tag must satisfy.
#[derive(Clone, Debug, PartialEq)]
pub enum TagCondition {
  Equals(String),
  NotIn(Vec<String>),
}

/// A filter on one tag, written in terms of unresolved strings.
#[derive(Clone, Debug, PartialEq)]
pub struct TagFilter {
  key: String,
  condition: TagCondition,
}

impl TagFilter {
  pub fn equals(key: impl Into<String>, value: impl Into<String>) -> Self {
    TagFilter {
      key: key.into(),
      condition: TagCondition::Equals(value.into()),
    }
  }

  pub fn not_in<S: Into<String>>(
    key: impl Into<String>,
    values: impl IntoIterator<Item = S>,
  ) -> Self {
    TagFilter {
      key: key.into(),
      condition: TagCondition::NotIn(values.into_iter().map(Into::into).collect()),
    }
  }

  pub fn get_key(&self) -> &str {
    &self.key
  }

  pub fn get_condition(&self) -> &TagCondition {
    &self.condition
  }

  fn validate(&self) -> Result<(), QueryError> {
    match &self.condition {
      TagCondition::NotIn(values) if values.is_empty() => Err(QueryError::InvalidArgument(format!(
        "Filter on {} excludes an empty set of values",
        self.key
      ))),
      _ => Ok(()),
    }
  }

  /// Resolve the key and values, and build the predicate for this filter.
  pub fn to_predicate(
    &self,
    indexer: &dyn StringIndexer,
    use_case: UseCaseKey,
    org_id: u64,
  ) -> Result<Expr, QueryError> {
    self.validate()?;

    let column = Expr::column(resolve_tag_key(indexer, use_case, org_id, &self.key)?);
    match &self.condition {
      TagCondition::Equals(value) => {
        let value = resolve_tag_value(indexer, use_case, org_id, value)?;
        Ok(Expr::function(EQUALS, vec![column, value.into()], None))
      }
      TagCondition::NotIn(values) => {
        let values = values
          .iter()
          .map(|value| resolve_tag_value(indexer, use_case, org_id, value))
          .collect::<Result<Vec<u64>, QueryError>>()?;
        Ok(Expr::function(NOT_IN, vec![column, Literal::from(values).into()], None))
      }
    }
  }
}

fn validate_metric_ids(metric_ids: &[u64]) -> Result<(), QueryError> {
  if metric_ids.is_empty() {
    return Err(QueryError::InvalidArgument(
      "At least one metric id is required".to_owned(),
    ));
  }
  Ok(())
}

/// `in(metric_id, [ids...])`, with ids in the order given.
pub fn membership_predicate(metric_ids: &[u64]) -> Result<Expr, QueryError> {
  validate_metric_ids(metric_ids)?;
  Ok(Expr::function(
    IN,
    vec![
      Expr::column(METRIC_ID_COLUMN),
      Literal::from(metric_ids.to_vec()).into(),
    ],
    None,
  ))
}

/// `equals(tags[key], value)` with the key and value resolved for the organization.
pub fn tag_equals_predicate(
  indexer: &dyn StringIndexer,
  use_case: UseCaseKey,
  org_id: u64,
  key: &str,
  value: &str,
) -> Result<Expr, QueryError> {
  TagFilter::equals(key, value).to_predicate(indexer, use_case, org_id)
}

/// Aggregate the value column over rows of `metric_ids` that match every tag filter.
///
/// With no tag filters the predicate is the bare membership check. Otherwise it is
/// `and(membership, filter_1, ..., filter_n)` with filters in the order given.
/// Arguments are validated before any lookup is made.
pub fn aggregation(
  indexer: &dyn StringIndexer,
  use_case: UseCaseKey,
  kind: AggregateKind,
  org_id: u64,
  metric_ids: &[u64],
  tag_filters: &[TagFilter],
  alias: Option<&str>,
) -> Result<Expr, QueryError> {
  validate_metric_ids(metric_ids)?;
  for filter in tag_filters {
    filter.validate()?;
  }

  let membership = membership_predicate(metric_ids)?;
  let predicate = if tag_filters.is_empty() {
    membership
  } else {
    let mut conditions = Vec::with_capacity(tag_filters.len() + 1);
    conditions.push(membership);
    for filter in tag_filters {
      conditions.push(filter.to_predicate(indexer, use_case, org_id)?);
    }
    Expr::function(AND, conditions, None)
  };

  debug!(
    "Built {} over {:?} with {} tag filters for org {} in {}",
    kind.function_name(),
    metric_ids,
    tag_filters.len(),
    org_id,
    use_case
  );

  Ok(Expr::function(
    kind.function_name(),
    vec![Expr::column(VALUE_COLUMN), predicate],
    alias,
  ))
}

/// Number of distinct values across `metric_ids`, with no tag filter.
pub fn uniq_aggregation_on_metric(
  metric_ids: &[u64],
  alias: Option<&str>,
) -> Result<Expr, QueryError> {
  let membership = membership_predicate(metric_ids)?;
  Ok(Expr::function(
    UNIQ_IF,
    vec![Expr::column(VALUE_COLUMN), membership],
    alias,
  ))
}
