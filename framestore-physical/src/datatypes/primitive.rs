//! This module defines [ColumnPrimitive], the trait implemented by all
//! primitive types that can back a column, and its five implementations.

use std::fmt::{Debug, Display};
use std::io::{self, Read, Write};

use num::Zero;

use crate::columnar::column::{vector::PrimitiveColumn, ColumnT};
use crate::error::{Error, Result};

use super::ValueType;

/// Trait implemented by all primitive types that appear in a
/// [PrimitiveColumn].
///
/// Besides the usual value bounds it fixes, per type, the declared
/// [ValueType], the element encoding of the wire format (big-endian,
/// matching the serialized form produced by the original system), and the
/// native-interchange encoding used for bulk export.
pub trait ColumnPrimitive: Copy + Debug + Default + Display + PartialEq + 'static {
    /// The declared kind of columns over this type.
    const KIND: ValueType;

    /// Returns true iff this value is the type's zero/false default.
    ///
    /// The sparse-preserving merge treats such values as "no update".
    fn is_zero(&self) -> bool;

    /// Convert from a [f64], truncating or saturating like the
    /// corresponding primitive cast.
    fn from_f64(value: f64) -> Self;

    /// Parse a value from its string form.
    ///
    /// # Errors
    /// Returns [Error::Parse] if the token is not a valid rendering of
    /// this type.
    fn parse(token: &str) -> Result<Self>;

    /// Write this value in its fixed-width wire encoding.
    fn write_element<W: Write>(&self, writer: &mut W) -> io::Result<()>;

    /// Read one value in its fixed-width wire encoding.
    fn read_element<R: Read>(reader: &mut R) -> io::Result<Self>;

    /// Append this value to `buffer` in the native-interchange encoding:
    /// little-endian for the integer kinds, platform byte order for the
    /// floating-point kinds, one byte for booleans.
    fn extend_interchange(&self, buffer: &mut Vec<u8>);

    /// Wrap a column over this type into the matching [ColumnT] variant.
    fn wrap_column(column: PrimitiveColumn<Self>) -> ColumnT;
}

impl ColumnPrimitive for bool {
    const KIND: ValueType = ValueType::Boolean;

    fn is_zero(&self) -> bool {
        !*self
    }

    fn from_f64(value: f64) -> Self {
        value != 0.0
    }

    fn parse(token: &str) -> Result<Self> {
        if token.eq_ignore_ascii_case("true") {
            Ok(true)
        } else if token.eq_ignore_ascii_case("false") {
            Ok(false)
        } else {
            Err(Error::Parse {
                value: token.to_string(),
                target: Self::KIND,
            })
        }
    }

    fn write_element<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        writer.write_all(&[u8::from(*self)])
    }

    fn read_element<R: Read>(reader: &mut R) -> io::Result<Self> {
        let mut buffer = [0u8; 1];
        reader.read_exact(&mut buffer)?;
        Ok(buffer[0] != 0)
    }

    fn extend_interchange(&self, buffer: &mut Vec<u8>) {
        buffer.push(u8::from(*self));
    }

    fn wrap_column(column: PrimitiveColumn<Self>) -> ColumnT {
        ColumnT::Boolean(column)
    }
}

macro_rules! primitive_impl {
    ($type:ty, $kind:ident, $width:literal, $interchange:ident, $from_f64:expr, $trim:literal) => {
        impl ColumnPrimitive for $type {
            const KIND: ValueType = ValueType::$kind;

            fn is_zero(&self) -> bool {
                Zero::is_zero(self)
            }

            fn from_f64(value: f64) -> Self {
                ($from_f64)(value)
            }

            fn parse(token: &str) -> Result<Self> {
                let token = if $trim { token.trim() } else { token };
                token.parse::<$type>().map_err(|_| Error::Parse {
                    value: token.to_string(),
                    target: Self::KIND,
                })
            }

            fn write_element<W: Write>(&self, writer: &mut W) -> io::Result<()> {
                writer.write_all(&self.to_be_bytes())
            }

            fn read_element<R: Read>(reader: &mut R) -> io::Result<Self> {
                let mut buffer = [0u8; $width];
                reader.read_exact(&mut buffer)?;
                Ok(<$type>::from_be_bytes(buffer))
            }

            fn extend_interchange(&self, buffer: &mut Vec<u8>) {
                buffer.extend_from_slice(&self.$interchange());
            }

            fn wrap_column(column: PrimitiveColumn<Self>) -> ColumnT {
                ColumnT::$kind(column)
            }
        }
    };
}

primitive_impl!(i32, Int32, 4, to_le_bytes, |value: f64| value as i32, true);
primitive_impl!(i64, Int64, 8, to_le_bytes, |value: f64| value as i64, true);
primitive_impl!(f32, Float, 4, to_ne_bytes, |value: f64| value as f32, false);
primitive_impl!(f64, Double, 8, to_ne_bytes, |value: f64| value, false);
