//! This module implements the validated cross-kind conversion matrix on
//! [ColumnT]. Every conversion either preserves all values exactly or
//! fails with the offending value; nothing is silently truncated.

use crate::datatypes::ValueType;
use crate::error::{Error, Result};

use super::column::ColumnT;

impl ColumnT {
    /// Converts the column to the given target kind, returning a new
    /// column; the source is never mutated. Converting to the column's
    /// own kind degrades to a deep copy.
    ///
    /// # Errors
    /// Returns [Error::Coercion] naming the first value that does not
    /// survive the conversion losslessly.
    pub fn change_type(&self, target: ValueType) -> Result<ColumnT> {
        match target {
            ValueType::Boolean => self.change_type_boolean(),
            ValueType::Int32 => self.change_type_integer(),
            ValueType::Int64 => self.change_type_long(),
            ValueType::Float => self.change_type_float(),
            ValueType::Double => self.change_type_double(),
        }
    }

    /// Converts to a boolean column. Every source value must be exactly
    /// zero or one.
    ///
    /// # Errors
    /// Returns [Error::Coercion] on any other value.
    pub fn change_type_boolean(&self) -> Result<ColumnT> {
        let to = ValueType::Boolean;
        match self {
            ColumnT::Boolean(column) => Ok(ColumnT::Boolean(column.clone())),
            ColumnT::Int32(column) => column
                .try_map(|value| match value {
                    0 => Ok(false),
                    1 => Ok(true),
                    _ => Err(Error::coercion(value, ValueType::Int32, to)),
                })
                .map(ColumnT::Boolean),
            ColumnT::Int64(column) => column
                .try_map(|value| match value {
                    0 => Ok(false),
                    1 => Ok(true),
                    _ => Err(Error::coercion(value, ValueType::Int64, to)),
                })
                .map(ColumnT::Boolean),
            ColumnT::Float(column) => column
                .try_map(|value| {
                    if value == 0.0 {
                        Ok(false)
                    } else if value == 1.0 {
                        Ok(true)
                    } else {
                        Err(Error::coercion(value, ValueType::Float, to))
                    }
                })
                .map(ColumnT::Boolean),
            ColumnT::Double(column) => column
                .try_map(|value| {
                    if value == 0.0 {
                        Ok(false)
                    } else if value == 1.0 {
                        Ok(true)
                    } else {
                        Err(Error::coercion(value, ValueType::Double, to))
                    }
                })
                .map(ColumnT::Boolean),
        }
    }

    /// Converts to a 32-bit integer column. Integer sources must fit into
    /// 32 bits; floating-point sources must equal their own truncation.
    ///
    /// # Errors
    /// Returns [Error::Coercion] on any value outside those rules,
    /// including NaN and the infinities.
    #[allow(clippy::cast_possible_truncation)]
    pub fn change_type_integer(&self) -> Result<ColumnT> {
        let to = ValueType::Int32;
        match self {
            ColumnT::Boolean(column) => Ok(ColumnT::Int32(column.map(i32::from))),
            ColumnT::Int32(column) => Ok(ColumnT::Int32(column.clone())),
            ColumnT::Int64(column) => column
                .try_map(|value| {
                    let truncated = value as i32;
                    if i64::from(truncated) == value {
                        Ok(truncated)
                    } else {
                        Err(Error::coercion(value, ValueType::Int64, to))
                    }
                })
                .map(ColumnT::Int32),
            ColumnT::Float(column) => column
                .try_map(|value| {
                    let truncated = value as i32;
                    if truncated as f32 == value {
                        Ok(truncated)
                    } else {
                        Err(Error::coercion(value, ValueType::Float, to))
                    }
                })
                .map(ColumnT::Int32),
            ColumnT::Double(column) => column
                .try_map(|value| {
                    let truncated = value as i32;
                    if f64::from(truncated) == value {
                        Ok(truncated)
                    } else {
                        Err(Error::coercion(value, ValueType::Double, to))
                    }
                })
                .map(ColumnT::Int32),
        }
    }

    /// Converts to a 64-bit integer column. Floating-point sources must
    /// equal their own truncation; integer sources always widen.
    ///
    /// # Errors
    /// Returns [Error::Coercion] on any fractional or out-of-range value,
    /// including NaN and the infinities.
    #[allow(clippy::cast_possible_truncation)]
    pub fn change_type_long(&self) -> Result<ColumnT> {
        let to = ValueType::Int64;
        match self {
            ColumnT::Boolean(column) => Ok(ColumnT::Int64(column.map(i64::from))),
            ColumnT::Int32(column) => Ok(ColumnT::Int64(column.map(i64::from))),
            ColumnT::Int64(column) => Ok(ColumnT::Int64(column.clone())),
            ColumnT::Float(column) => column
                .try_map(|value| {
                    let truncated = value as i64;
                    if truncated as f32 == value {
                        Ok(truncated)
                    } else {
                        Err(Error::coercion(value, ValueType::Float, to))
                    }
                })
                .map(ColumnT::Int64),
            ColumnT::Double(column) => column
                .try_map(|value| {
                    let truncated = value as i64;
                    if truncated as f64 == value {
                        Ok(truncated)
                    } else {
                        Err(Error::coercion(value, ValueType::Double, to))
                    }
                })
                .map(ColumnT::Int64),
        }
    }

    /// Converts to a 32-bit float column. Always succeeds; conversion to
    /// a floating-point kind is treated as value-preserving widening.
    ///
    /// # Errors
    /// Never fails; the [Result] keeps the signature uniform across the
    /// conversion family.
    #[allow(clippy::cast_precision_loss)]
    pub fn change_type_float(&self) -> Result<ColumnT> {
        match self {
            ColumnT::Boolean(column) => {
                Ok(ColumnT::Float(column.map(|value| f32::from(u8::from(value)))))
            }
            ColumnT::Int32(column) => Ok(ColumnT::Float(column.map(|value| value as f32))),
            ColumnT::Int64(column) => Ok(ColumnT::Float(column.map(|value| value as f32))),
            ColumnT::Float(column) => Ok(ColumnT::Float(column.clone())),
            ColumnT::Double(column) => Ok(ColumnT::Float(column.map(|value| value as f32))),
        }
    }

    /// Converts to a 64-bit float column. Always succeeds.
    ///
    /// # Errors
    /// Never fails; the [Result] keeps the signature uniform across the
    /// conversion family.
    #[allow(clippy::cast_precision_loss)]
    pub fn change_type_double(&self) -> Result<ColumnT> {
        match self {
            ColumnT::Boolean(column) => {
                Ok(ColumnT::Double(column.map(|value| f64::from(u8::from(value)))))
            }
            ColumnT::Int32(column) => Ok(ColumnT::Double(column.map(f64::from))),
            ColumnT::Int64(column) => Ok(ColumnT::Double(column.map(|value| value as f64))),
            ColumnT::Float(column) => Ok(ColumnT::Double(column.map(f64::from))),
            ColumnT::Double(column) => Ok(ColumnT::Double(column.clone())),
        }
    }
}
