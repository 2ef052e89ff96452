//! This module defines [ValueType], the registry of supported column kinds.

use std::fmt::Display;

/// Number of supported column kinds
pub const NUM_VALUE_TYPES: usize = 5;

/// Descriptors to refer to the possible column kinds at runtime.
///
/// The declaration order fixes the on-wire tag ordinal of each kind,
/// which both the serialization format and the column factory rely on.
#[derive(Clone, Copy, Debug, Eq, PartialEq, PartialOrd, Ord, Hash)]
pub enum ValueType {
    /// Data type [bool], one byte per value on the wire.
    Boolean,
    /// Data type [i32].
    Int32,
    /// Data type [i64].
    Int64,
    /// Data type [f32].
    Float,
    /// Data type [f64].
    Double,
}

/// A list of [ValueType], in the order they appear in the enum.
pub const VALUE_TYPES: &[ValueType] = &[
    ValueType::Boolean,
    ValueType::Int32,
    ValueType::Int64,
    ValueType::Float,
    ValueType::Double,
];

impl ValueType {
    /// Returns the serialization tag that corresponds to the position of
    /// this [ValueType] in the defining enum.
    pub fn tag(&self) -> u8 {
        match self {
            ValueType::Boolean => 0,
            ValueType::Int32 => 1,
            ValueType::Int64 => 2,
            ValueType::Float => 3,
            ValueType::Double => 4,
        }
    }

    /// Return the [ValueType] identified by the given serialization tag,
    /// or `None` if the tag does not name any kind.
    pub fn from_tag(tag: u8) -> Option<Self> {
        match tag {
            0 => Some(ValueType::Boolean),
            1 => Some(ValueType::Int32),
            2 => Some(ValueType::Int64),
            3 => Some(ValueType::Float),
            4 => Some(ValueType::Double),
            _ => None,
        }
    }

    /// Return the fixed serialized width of one value of this kind, in bytes.
    pub fn width(&self) -> usize {
        match self {
            ValueType::Boolean => 1,
            ValueType::Int32 | ValueType::Float => 4,
            ValueType::Int64 | ValueType::Double => 8,
        }
    }
}

impl Display for ValueType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValueType::Boolean => write!(f, "Boolean"),
            ValueType::Int32 => write!(f, "Int32"),
            ValueType::Int64 => write!(f, "Int64"),
            ValueType::Float => write!(f, "Float"),
            ValueType::Double => write!(f, "Double"),
        }
    }
}
