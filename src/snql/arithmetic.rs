// This code is licensed under Elastic License 2.0
// https://www.elastic.co/licensing/elastic-license

//! Arithmetic over already built expressions.
//!
//! Operands are kept exactly as passed in, aliases included, and in the order
//! given. The alias passed to a combinator goes on the node it returns and nowhere
//! else.

use super::constants::{DIVIDE, MINUS, PLUS};
use crate::ast::Expr;
use crate::utils::error::QueryError;

pub fn addition(a: impl Into<Expr>, b: impl Into<Expr>, alias: Option<&str>) -> Expr {
  Expr::function(PLUS, vec![a.into(), b.into()], alias)
}

pub fn subtraction(a: impl Into<Expr>, b: impl Into<Expr>, alias: Option<&str>) -> Expr {
  Expr::function(MINUS, vec![a.into(), b.into()], alias)
}

pub fn division_float(a: impl Into<Expr>, b: impl Into<Expr>, alias: Option<&str>) -> Expr {
  Expr::function(DIVIDE, vec![a.into(), b.into()], alias)
}

/// `1 - fraction`. The fraction isn't checked to be within [0, 1].
pub fn complement(fraction: impl Into<Expr>, alias: Option<&str>) -> Expr {
  subtraction(1, fraction, alias)
}

/// Sum of two or more operands, folded from the left: `plus(plus(a, b), c)`.
pub fn addition_of(mut operands: Vec<Expr>, alias: Option<&str>) -> Result<Expr, QueryError> {
  let count = operands.len();
  let last = operands.pop();
  let mut operands = operands.into_iter();
  match (operands.next(), last) {
    (Some(first), Some(last)) => {
      let sum = operands.fold(first, |sum, operand| addition(sum, operand, None));
      Ok(addition(sum, last, alias))
    }
    _ => Err(QueryError::InvalidArgument(format!(
      "Addition needs at least 2 operands, got {}",
      count
    ))),
  }
}
