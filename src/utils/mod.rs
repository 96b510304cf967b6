//! Utilities shared by the query builders.

pub mod error;
