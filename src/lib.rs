// This code is licensed under Elastic License 2.0
// https://www.elastic.co/licensing/elastic-license

//! Compile derived metrics into aggregation expressions.
//!
//! A derived metric such as the crash free session rate is a composition of
//! filtered aggregations over raw metrics. This crate builds those compositions as
//! [`ast::Expr`] trees, ready to be rendered into the store's query language.
//!
//! Tag filters are written against human readable strings, and resolved to the
//! integer ids the store indexes on through a [`tag_indexer::StringIndexer`]. The
//! indexer is always passed in by the caller.
//!
//! ```
//! use derived_metrics::derived::DerivedMetric;
//! use derived_metrics::naming::record_vocabulary;
//! use tag_indexer::{MemoryIndexer, UseCaseKey};
//!
//! let indexer = MemoryIndexer::new();
//! record_vocabulary(&indexer, UseCaseKey::ReleaseHealth, &[1]).unwrap();
//!
//! let expr = DerivedMetric::SessionCrashFreeRate.build(&indexer, 1).unwrap();
//! assert!(expr.to_string().starts_with("minus(1, divide(sumIf(value, "));
//! ```

pub mod ast;
pub mod derived;
pub mod naming;
pub mod snql;
pub mod utils;

pub use crate::utils::error::QueryError;
