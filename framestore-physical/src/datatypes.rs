//! This module collects functionality specific to the supported primitive datatypes.

/// Module for defining [ValueType]
pub mod value_type;
pub use value_type::{ValueType, VALUE_TYPES};

/// Module for defining [ColumnPrimitive]
pub mod primitive;
pub use primitive::ColumnPrimitive;
