// This code is licensed under Elastic License 2.0
// https://www.elastic.co/licensing/elastic-license

//! Expression tree emitted by every query builder.
//!
//! An expression is a column reference, a literal, or a function call with ordered
//! parameters and an optional alias. Expressions are plain values: builders
//! construct new ones and never modify an expression they were handed.

mod expr;
mod literal;

pub use expr::{Column, Expr, Function};
pub use literal::Literal;
