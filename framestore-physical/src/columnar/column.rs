//! This module defines [ColumnT],
//! which collects the five concrete column implementations into a single object.

pub mod vector;

use std::fmt::{self, Display};
use std::io::{Read, Write};
use std::ops::Range;

use crate::datatypes::{ColumnPrimitive, ValueType};
use crate::error::{Error, Result};
use crate::management::bytesized::ByteSized;

use vector::{BooleanColumn, DoubleColumn, FloatColumn, Int32Column, Int64Column, PrimitiveColumn};

/// Enum for columns of all supported kinds.
///
/// The variant order matches the kind registry in
/// [ValueType], so the discriminant of a column is the same
/// ordinal that tags it on the wire.
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnT {
    /// Case [BooleanColumn]
    Boolean(BooleanColumn),
    /// Case [Int32Column]
    Int32(Int32Column),
    /// Case [Int64Column]
    Int64(Int64Column),
    /// Case [FloatColumn]
    Float(FloatColumn),
    /// Case [DoubleColumn]
    Double(DoubleColumn),
}

macro_rules! forward_to_column {
    ($self:ident, $func:ident($($arg:expr),*)) => {
        match $self {
            ColumnT::Boolean(column) => column.$func($($arg),*),
            ColumnT::Int32(column) => column.$func($($arg),*),
            ColumnT::Int64(column) => column.$func($($arg),*),
            ColumnT::Float(column) => column.$func($($arg),*),
            ColumnT::Double(column) => column.$func($($arg),*),
        }
    };
    ($self:ident, $func:ident($($arg:expr),*).as_variant_of(ColumnT)) => {
        match $self {
            ColumnT::Boolean(column) => ColumnT::Boolean(column.$func($($arg),*)),
            ColumnT::Int32(column) => ColumnT::Int32(column.$func($($arg),*)),
            ColumnT::Int64(column) => ColumnT::Int64(column.$func($($arg),*)),
            ColumnT::Float(column) => ColumnT::Float(column.$func($($arg),*)),
            ColumnT::Double(column) => ColumnT::Double(column.$func($($arg),*)),
        }
    };
}

impl ColumnT {
    /// Returns the number of defined entries in the column.
    pub fn len(&self) -> usize {
        forward_to_column!(self, len())
    }

    /// Returns true iff the column holds no defined entries.
    pub fn is_empty(&self) -> bool {
        forward_to_column!(self, is_empty())
    }

    /// Returns the length of the backing allocation.
    pub fn capacity(&self) -> usize {
        forward_to_column!(self, capacity())
    }

    /// Returns the declared kind of this column.
    pub fn value_type(&self) -> ValueType {
        forward_to_column!(self, value_type())
    }

    /// Returns the narrowest kind able to represent the column's contents;
    /// a passthrough of [value_type][Self::value_type] for the fixed-kind
    /// columns collected here.
    pub fn analyze_value_type(&self) -> ValueType {
        forward_to_column!(self, analyze_value_type())
    }

    /// Overwrites the value at the given index with a [f64], converted
    /// with the truncating cast of the column's kind.
    ///
    /// # Panics
    /// Panics if `index` is not smaller than the logical size.
    pub fn set_f64(&mut self, index: usize, value: f64) {
        forward_to_column!(self, set_f64(index, value))
    }

    /// Bulk-copies `range.len()` values from `other`, starting at
    /// `src_offset`, into `range` of this column.
    ///
    /// # Panics
    /// Panics if `other` is of a different kind, or if either range is
    /// out of bounds.
    pub fn set_range_from(&mut self, range: Range<usize>, other: &ColumnT, src_offset: usize) {
        match (self, other) {
            (ColumnT::Boolean(column), ColumnT::Boolean(other)) => {
                column.set_range_from(range, other, src_offset)
            }
            (ColumnT::Int32(column), ColumnT::Int32(other)) => {
                column.set_range_from(range, other, src_offset)
            }
            (ColumnT::Int64(column), ColumnT::Int64(other)) => {
                column.set_range_from(range, other, src_offset)
            }
            (ColumnT::Float(column), ColumnT::Float(other)) => {
                column.set_range_from(range, other, src_offset)
            }
            (ColumnT::Double(column), ColumnT::Double(other)) => {
                column.set_range_from(range, other, src_offset)
            }
            (column, other) => panic!(
                "column kind mismatch: {} and {}",
                column.value_type(),
                other.value_type()
            ),
        }
    }

    /// Bulk-copies `range.len()` values from the start of `other` into
    /// `range` of this column.
    ///
    /// # Panics
    /// Panics if `other` is of a different kind or either range is out
    /// of bounds.
    pub fn set_range(&mut self, range: Range<usize>, other: &ColumnT) {
        self.set_range_from(range, other, 0);
    }

    /// Copies values from the same positions of `other` into `range` of
    /// this column, skipping every source position that holds the kind's
    /// zero/false value.
    ///
    /// # Panics
    /// Panics if `other` is of a different kind or `range` is out of bounds.
    pub fn set_nz(&mut self, range: Range<usize>, other: &ColumnT) {
        match (self, other) {
            (ColumnT::Boolean(column), ColumnT::Boolean(other)) => column.set_nz(range, other),
            (ColumnT::Int32(column), ColumnT::Int32(other)) => column.set_nz(range, other),
            (ColumnT::Int64(column), ColumnT::Int64(other)) => column.set_nz(range, other),
            (ColumnT::Float(column), ColumnT::Float(other)) => column.set_nz(range, other),
            (ColumnT::Double(column), ColumnT::Double(other)) => column.set_nz(range, other),
            (column, other) => panic!(
                "column kind mismatch: {} and {}",
                column.value_type(),
                other.value_type()
            ),
        }
    }

    /// Cross-kind bulk assignment.
    ///
    /// # Errors
    /// Always returns [Error::NotImplemented]; this is an explicit
    /// extension point rather than a silent no-op.
    pub fn set_from_other_type(&mut self, _range: Range<usize>, _other: &ColumnT) -> Result<()> {
        Err(Error::NotImplemented("set_from_other_type"))
    }

    /// Parses the given token into the column's kind and appends it.
    ///
    /// # Errors
    /// Returns [Error::Parse] if the token is not a valid rendering of
    /// the column's kind.
    pub fn append_str(&mut self, token: &str) -> Result<()> {
        forward_to_column!(self, append_str(token))
    }

    /// Returns a new column holding a copy of the given sub-range.
    ///
    /// # Panics
    /// Panics if `range` exceeds the logical size.
    pub fn slice(&self, range: Range<usize>) -> ColumnT {
        forward_to_column!(self, slice(range).as_variant_of(ColumnT))
    }

    /// Slices the given sub-range and coerces the result to the target
    /// kind; a plain copy when the target matches the column's own kind.
    ///
    /// # Errors
    /// Returns [Error::Coercion] if any value in the range does not
    /// survive the conversion losslessly.
    ///
    /// # Panics
    /// Panics if `range` exceeds the logical size.
    pub fn slice_transform(&self, range: Range<usize>, target: ValueType) -> Result<ColumnT> {
        let sliced = self.slice(range);
        if target == sliced.value_type() {
            Ok(sliced)
        } else {
            sliced.change_type(target)
        }
    }

    /// Prepares the column to receive a payload of the given logical size.
    pub fn reset(&mut self, size: usize) {
        forward_to_column!(self, reset(size))
    }

    /// Serializes the column as its kind tag followed by the defined
    /// values in their fixed-width wire encoding.
    pub fn write<W: Write>(&self, writer: &mut W) -> Result<()> {
        forward_to_column!(self, write(writer))
    }

    /// Decodes exactly `len()` values from the reader into this column;
    /// the kind tag must already have been consumed.
    pub fn read_payload<R: Read>(&mut self, reader: &mut R) -> Result<()> {
        forward_to_column!(self, read_payload(reader))
    }

    /// Returns the exact number of bytes [write][Self::write] emits.
    pub fn exact_serialized_size(&self) -> u64 {
        forward_to_column!(self, exact_serialized_size())
    }

    /// Exports the first `n_rows` values as a raw fixed-width byte buffer
    /// for native interchange (see
    /// [PrimitiveColumn::as_byte_array]).
    pub fn as_byte_array(&self, n_rows: usize) -> Vec<u8> {
        forward_to_column!(self, as_byte_array(n_rows))
    }
}

impl Display for ColumnT {
    /// Renders the wrapped column's kind followed by its defined values,
    /// e.g. `Int32Column:[1,2,3]`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnT::Boolean(column) => Display::fmt(column, f),
            ColumnT::Int32(column) => Display::fmt(column, f),
            ColumnT::Int64(column) => Display::fmt(column, f),
            ColumnT::Float(column) => Display::fmt(column, f),
            ColumnT::Double(column) => Display::fmt(column, f),
        }
    }
}

impl ByteSized for ColumnT {
    fn size_bytes(&self) -> u64 {
        forward_to_column!(self, size_bytes())
    }
}

impl<T: ColumnPrimitive> From<PrimitiveColumn<T>> for ColumnT {
    fn from(column: PrimitiveColumn<T>) -> Self {
        T::wrap_column(column)
    }
}

impl<T: ColumnPrimitive> From<Vec<T>> for ColumnT {
    fn from(data: Vec<T>) -> Self {
        T::wrap_column(PrimitiveColumn::new(data))
    }
}

macro_rules! column_try_from {
    ($variant:ident => $dst:ty) => {
        impl TryFrom<ColumnT> for $dst {
            type Error = ();

            fn try_from(column: ColumnT) -> Result<Self, Self::Error> {
                match column {
                    ColumnT::$variant(column) => Ok(column),
                    _ => Err(()),
                }
            }
        }
    };
}

column_try_from!(Boolean => BooleanColumn);
column_try_from!(Int32 => Int32Column);
column_try_from!(Int64 => Int64Column);
column_try_from!(Float => FloatColumn);
column_try_from!(Double => DoubleColumn);
