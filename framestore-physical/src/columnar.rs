//! This module collects data structures and operations on individual columns.

pub mod column;
pub use column::ColumnT;

/// Module for the validated cross-kind conversion matrix.
pub mod coercion;

/// Module for the tag-dispatching column factory.
pub mod factory;

/// Module for defining [ColumnMetadata]
pub mod metadata;
pub use metadata::ColumnMetadata;
