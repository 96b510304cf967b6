// This code is licensed under Elastic License 2.0
// https://www.elastic.co/licensing/elastic-license

//! Organization-scoped string indexing.
//!
//! The columnar store indexes tag keys and tag values by integer id rather than by
//! string. Every string is assigned an id per `(use case, organization)`, so the same
//! string can map to different ids for different organizations or use cases.
//!
//! [`StringIndexer`] is the interface query builders depend on. [`MemoryIndexer`]
//! is an in-memory implementation, used in tests and local setups.

pub mod config;
pub mod error;
pub mod indexer;
pub mod memory;
pub mod use_case;

pub use crate::error::IndexerError;
pub use crate::indexer::{OrgStringIds, StringIndexer};
pub use crate::memory::MemoryIndexer;
pub use crate::use_case::UseCaseKey;
