// This code is licensed under Elastic License 2.0
// https://www.elastic.co/licensing/elastic-license

//! Rates built on top of a caller supplied filter.
//!
//! The filter is treated as opaque: it's placed in the output as is, so anything
//! the aggregation builders produce can be used.

use tag_indexer::StringIndexer;

use super::aggregation::tag_equals_predicate;
use super::constants::{AND, COUNT_IF, DIVIDE, VALUE_COLUMN};
use crate::ast::Expr;
use crate::naming::{MeasurementRating, TransactionTagsKey};
use crate::utils::error::QueryError;

/// `divide(countIf(value, aggregate_filter), divide(numerator, denominator))`.
///
/// The denominator defaults to 1. For example a numerator of 60 turns a count over
/// a one minute interval into a count per second.
pub fn rate(
  aggregate_filter: Expr,
  numerator: impl Into<Expr>,
  denominator: Option<Expr>,
  alias: Option<&str>,
) -> Expr {
  let denominator = denominator.unwrap_or_else(|| Expr::from(1));
  Expr::function(
    DIVIDE,
    vec![
      Expr::function(COUNT_IF, vec![Expr::column(VALUE_COLUMN), aggregate_filter], None),
      Expr::function(DIVIDE, vec![numerator.into(), denominator], None),
    ],
    alias,
  )
}

/// Count of web vital measurements matching `aggregate_filter` with the given rating.
pub fn count_web_vitals(
  indexer: &dyn StringIndexer,
  aggregate_filter: Expr,
  org_id: u64,
  measurement_rating: MeasurementRating,
  alias: Option<&str>,
) -> Result<Expr, QueryError> {
  let key = TransactionTagsKey::MeasurementRating;
  let rating = tag_equals_predicate(
    indexer,
    key.use_case(),
    org_id,
    key.as_str(),
    measurement_rating.as_str(),
  )?;

  Ok(Expr::function(
    COUNT_IF,
    vec![
      Expr::column(VALUE_COLUMN),
      Expr::function(AND, vec![aggregate_filter, rating], None),
    ],
    alias,
  ))
}

#[cfg(test)]
mod tests {
  use tag_indexer::{MemoryIndexer, UseCaseKey};

  use super::*;
  use crate::snql::resolve::{resolve_tag_key, resolve_tag_value};

  const ORG_ID: u64 = 666;

  fn metric_filter() -> Expr {
    Expr::function("equals", vec![Expr::column("metric_id"), 5.into()], None)
  }

  #[test]
  fn test_rate() {
    assert_eq!(
      rate(metric_filter(), 3600, Some(60.into()), Some("rate_alias")),
      Expr::function(
        "divide",
        vec![
          Expr::function("countIf", vec![Expr::column("value"), metric_filter()], None),
          Expr::function("divide", vec![3600.into(), 60.into()], None),
        ],
        Some("rate_alias"),
      )
    );
  }

  #[test]
  fn test_rate_default_denominator() {
    assert_eq!(
      rate(metric_filter(), 3600, None, Some("r")),
      rate(metric_filter(), 3600, Some(1.into()), Some("r"))
    );

    let expr = rate(metric_filter(), 3600, None, Some("r"));
    assert_eq!(
      expr.to_string(),
      "divide(countIf(value, equals(metric_id, 5)), divide(3600, 1)) AS `r`"
    );
  }

  #[test]
  fn test_count_web_vitals() {
    let indexer = MemoryIndexer::new();
    for string in ["measurement_rating", "good", "meh", "poor"] {
      indexer.record(UseCaseKey::Performance, ORG_ID, string).unwrap();
    }

    let rating_key =
      resolve_tag_key(&indexer, UseCaseKey::Performance, ORG_ID, "measurement_rating");
    let expected = Expr::function(
      "countIf",
      vec![
        Expr::column("value"),
        Expr::function(
          "and",
          vec![
            metric_filter(),
            Expr::function(
              "equals",
              vec![
                Expr::column(rating_key.unwrap()),
                resolve_tag_value(&indexer, UseCaseKey::Performance, ORG_ID, "good")
                  .unwrap()
                  .into(),
              ],
              None,
            ),
          ],
          None,
        ),
      ],
      Some("count_web_vitals_alias"),
    );

    assert_eq!(
      count_web_vitals(
        &indexer,
        metric_filter(),
        ORG_ID,
        MeasurementRating::Good,
        Some("count_web_vitals_alias"),
      )
      .unwrap(),
      expected
    );
  }

  #[test]
  fn test_count_web_vitals_unresolved_rating() {
    let indexer = MemoryIndexer::new();
    indexer
      .record(UseCaseKey::Performance, ORG_ID, "measurement_rating")
      .unwrap();
    assert_eq!(
      count_web_vitals(&indexer, metric_filter(), ORG_ID, MeasurementRating::Poor, None),
      Err(QueryError::TagResolution {
        use_case: UseCaseKey::Performance,
        org_id: ORG_ID,
        string: "poor".to_owned(),
      })
    );
  }
}
