//! This module defines [PrimitiveColumn], the growable typed buffer
//! backing one column of a frame.

use std::fmt::{self, Display};
use std::io::{Read, Write};
use std::ops::Range;

use crate::datatypes::{ColumnPrimitive, ValueType};
use crate::error::Result;
use crate::management::bytesized::{size_inner_buffer_flat, ByteSized};

/// Smallest capacity a column grows to when appending to a full buffer.
const MIN_GROWTH_CAPACITY: usize = 4;

/// A growable column of primitive values of type `T`.
///
/// The buffer keeps an explicit distinction between its physical
/// `capacity` (the length of the backing allocation) and its logical
/// `size` (the number of defined values). Every index in `[0, size)`
/// holds a defined value; positions beyond the logical size hold the
/// type's default and are never observable through the public interface.
///
/// Columns are single-owner: cloning or slicing always copies the logical
/// contents into a fresh buffer, never aliases.
#[derive(Debug, Default)]
pub struct PrimitiveColumn<T> {
    data: Box<[T]>,
    size: usize,
}

/// A column of [bool] values.
pub type BooleanColumn = PrimitiveColumn<bool>;
/// A column of [i32] values.
pub type Int32Column = PrimitiveColumn<i32>;
/// A column of [i64] values.
pub type Int64Column = PrimitiveColumn<i64>;
/// A column of [f32] values.
pub type FloatColumn = PrimitiveColumn<f32>;
/// A column of [f64] values.
pub type DoubleColumn = PrimitiveColumn<f64>;

impl<T: ColumnPrimitive> PrimitiveColumn<T> {
    /// Constructs a new column that takes ownership of the given buffer.
    /// The logical size equals the buffer length.
    pub fn new(data: Vec<T>) -> Self {
        let size = data.len();
        Self {
            data: data.into_boxed_slice(),
            size,
        }
    }

    /// Constructs a new column of the given logical size, with every
    /// position holding the type's default value.
    pub fn with_size(size: usize) -> Self {
        Self {
            data: vec![T::default(); size].into_boxed_slice(),
            size,
        }
    }

    /// Returns the number of defined entries in the column.
    pub fn len(&self) -> usize {
        self.size
    }

    /// Returns true iff the column holds no defined entries.
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Returns the length of the backing allocation.
    pub fn capacity(&self) -> usize {
        self.data.len()
    }

    /// Returns the defined entries as a slice.
    pub fn values(&self) -> &[T] {
        &self.data[..self.size]
    }

    /// Returns the value at the given index.
    ///
    /// # Panics
    /// Panics if `index` is not smaller than the logical size.
    pub fn get(&self, index: usize) -> T {
        self.assert_index(index);
        self.data[index]
    }

    /// Overwrites the value at the given index.
    ///
    /// # Panics
    /// Panics if `index` is not smaller than the logical size.
    pub fn set(&mut self, index: usize, value: T) {
        self.assert_index(index);
        self.data[index] = value;
    }

    /// Overwrites the value at the given index; an absent value maps to
    /// the type's default.
    ///
    /// # Panics
    /// Panics if `index` is not smaller than the logical size.
    pub fn set_opt(&mut self, index: usize, value: Option<T>) {
        self.set(index, value.unwrap_or_default());
    }

    /// Overwrites the value at the given index with a [f64], converted
    /// with the truncating cast of the column's type.
    ///
    /// # Panics
    /// Panics if `index` is not smaller than the logical size.
    pub fn set_f64(&mut self, index: usize, value: f64) {
        self.set(index, T::from_f64(value));
    }

    /// Bulk-copies `range.len()` values from `other`, starting at
    /// `src_offset`, into `range` of this column. A direct memory copy
    /// without per-element validation.
    ///
    /// # Panics
    /// Panics if `range` exceeds this column's logical size or the source
    /// range exceeds `other`'s logical size.
    pub fn set_range_from(&mut self, range: Range<usize>, other: &Self, src_offset: usize) {
        self.assert_range(&range);
        let source = src_offset..src_offset + range.len();
        other.assert_range(&source);
        self.data[range].copy_from_slice(&other.data[source]);
    }

    /// Bulk-copies `range.len()` values from the start of `other` into
    /// `range` of this column.
    ///
    /// # Panics
    /// Panics if `range` exceeds this column's logical size or `other`
    /// holds fewer than `range.len()` values.
    pub fn set_range(&mut self, range: Range<usize>, other: &Self) {
        self.set_range_from(range, other, 0);
    }

    /// Copies values from the same positions of `other` into `range` of
    /// this column, skipping every source position that holds the type's
    /// zero/false value. Used to merge sparse partial results without
    /// clobbering existing values with zeros.
    ///
    /// # Panics
    /// Panics if `range` exceeds either column's logical size.
    pub fn set_nz(&mut self, range: Range<usize>, other: &Self) {
        self.assert_range(&range);
        other.assert_range(&range);
        for index in range {
            let value = other.data[index];
            if !value.is_zero() {
                self.data[index] = value;
            }
        }
    }

    /// Appends a value at the logical end, doubling the capacity first if
    /// the buffer is full.
    pub fn append(&mut self, value: T) {
        if self.size == self.data.len() {
            self.grow();
        }
        self.data[self.size] = value;
        self.size += 1;
    }

    /// Appends a value at the logical end; an absent value maps to the
    /// type's default.
    pub fn append_opt(&mut self, value: Option<T>) {
        self.append(value.unwrap_or_default());
    }

    /// Parses the given token into the column's type and appends it.
    ///
    /// # Errors
    /// Returns [Error::Parse][crate::error::Error::Parse] if the token is
    /// not a valid rendering of the column's type; the column is unchanged
    /// in that case.
    pub fn append_str(&mut self, token: &str) -> Result<()> {
        self.append(T::parse(token)?);
        Ok(())
    }

    fn grow(&mut self) {
        let new_capacity = (self.data.len() * 2).max(MIN_GROWTH_CAPACITY);
        let mut new_data = vec![T::default(); new_capacity].into_boxed_slice();
        new_data[..self.size].copy_from_slice(&self.data[..self.size]);
        self.data = new_data;
    }

    /// Returns a new column holding a copy of the given sub-range.
    ///
    /// # Panics
    /// Panics if `range` exceeds the logical size.
    pub fn slice(&self, range: Range<usize>) -> Self {
        self.assert_range(&range);
        Self::new(self.data[range].to_vec())
    }

    /// Prepares the column to receive a payload of the given logical size:
    /// reallocates the backing buffer only if the requested size exceeds
    /// the current capacity, then sets the logical size. The previous
    /// contents are unspecified afterwards.
    pub fn reset(&mut self, size: usize) {
        if self.data.len() < size {
            self.data = vec![T::default(); size].into_boxed_slice();
        }
        self.size = size;
    }

    /// Serializes the column as its kind tag followed by the defined
    /// values in their fixed-width wire encoding.
    ///
    /// The number of bytes written always equals
    /// [exact_serialized_size][Self::exact_serialized_size].
    pub fn write<W: Write>(&self, writer: &mut W) -> Result<()> {
        writer.write_all(&[T::KIND.tag()])?;
        for index in 0..self.size {
            self.data[index].write_element(writer)?;
        }
        Ok(())
    }

    /// Decodes exactly `len()` values from the reader into this column.
    ///
    /// The kind tag is consumed by the factory before this is called, and
    /// the column must have been pre-sized via [reset][Self::reset].
    pub fn read_payload<R: Read>(&mut self, reader: &mut R) -> Result<()> {
        for index in 0..self.size {
            self.data[index] = T::read_element(reader)?;
        }
        Ok(())
    }

    /// Exports the first `n_rows` values as a raw fixed-width byte buffer
    /// for native interchange: little-endian for the integer kinds,
    /// platform byte order for the floating-point kinds, one byte per
    /// boolean.
    ///
    /// # Panics
    /// Panics if `n_rows` exceeds the logical size.
    pub fn as_byte_array(&self, n_rows: usize) -> Vec<u8> {
        self.assert_range(&(0..n_rows));
        let mut buffer = Vec::with_capacity(n_rows * T::KIND.width());
        for index in 0..n_rows {
            self.data[index].extend_interchange(&mut buffer);
        }
        buffer
    }

    /// Returns the declared kind of this column.
    pub fn value_type(&self) -> ValueType {
        T::KIND
    }

    /// Returns the narrowest kind able to represent the column's contents.
    ///
    /// Fixed-kind columns always report their declared kind; an
    /// implementation backed by untyped values would scan the contents
    /// instead.
    pub fn analyze_value_type(&self) -> ValueType {
        T::KIND
    }

    /// Returns the exact number of bytes [write][Self::write] emits:
    /// one tag byte plus the fixed width of every defined value.
    pub fn exact_serialized_size(&self) -> u64 {
        1 + T::KIND.width() as u64 * self.size as u64
    }

    /// Returns a new column holding the result of applying `function` to
    /// every defined value.
    pub(crate) fn map<U: ColumnPrimitive>(&self, function: impl Fn(T) -> U) -> PrimitiveColumn<U> {
        PrimitiveColumn::new(self.values().iter().map(|&value| function(value)).collect())
    }

    /// Returns a new column holding the result of applying `function` to
    /// every defined value, failing on the first error.
    pub(crate) fn try_map<U: ColumnPrimitive>(
        &self,
        function: impl Fn(T) -> Result<U>,
    ) -> Result<PrimitiveColumn<U>> {
        let converted = self
            .values()
            .iter()
            .map(|&value| function(value))
            .collect::<Result<Vec<U>>>()?;
        Ok(PrimitiveColumn::new(converted))
    }

    fn assert_index(&self, index: usize) {
        assert!(
            index < self.size,
            "index {index} out of bounds for column of length {}",
            self.size
        );
    }

    fn assert_range(&self, range: &Range<usize>) {
        assert!(
            range.start <= range.end && range.end <= self.size,
            "range {range:?} out of bounds for column of length {}",
            self.size
        );
    }
}

impl<T: ColumnPrimitive> Clone for PrimitiveColumn<T> {
    /// Deep-copies exactly the defined values into a new column with its
    /// own backing buffer; spare capacity is not carried over.
    fn clone(&self) -> Self {
        Self::new(self.values().to_vec())
    }
}

impl<T: ColumnPrimitive> Display for PrimitiveColumn<T> {
    /// Renders the column's kind followed by its defined values,
    /// e.g. `Int32Column:[1,2,3]`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}Column:[", T::KIND)?;
        for (index, value) in self.values().iter().enumerate() {
            if index > 0 {
                f.write_str(",")?;
            }
            write!(f, "{value}")?;
        }
        f.write_str("]")
    }
}

impl<T: ColumnPrimitive> PartialEq for PrimitiveColumn<T> {
    /// Columns compare by their defined values only; spare capacity never
    /// participates.
    fn eq(&self, other: &Self) -> bool {
        self.values() == other.values()
    }
}

impl<T: ColumnPrimitive> From<Vec<T>> for PrimitiveColumn<T> {
    fn from(data: Vec<T>) -> Self {
        Self::new(data)
    }
}

impl<T: ColumnPrimitive> ByteSized for PrimitiveColumn<T> {
    fn size_bytes(&self) -> u64 {
        size_of::<Self>() as u64 + size_inner_buffer_flat(&self.data)
    }
}

#[cfg(test)]
mod test {
    use super::{BooleanColumn, DoubleColumn, Int32Column, Int64Column, PrimitiveColumn};
    use crate::management::ByteSized;
    use test_log::test;

    #[test]
    fn construction_owns_buffer() {
        let column = Int32Column::new(vec![1, 2, 3]);
        assert_eq!(column.len(), 3);
        assert_eq!(column.capacity(), 3);
        assert_eq!(column.values(), &[1, 2, 3]);
    }

    #[test]
    fn with_size_is_default_filled() {
        let column = Int64Column::with_size(5);
        assert_eq!(column.len(), 5);
        for index in 0..5 {
            assert_eq!(column.get(index), 0);
        }
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn get_out_of_bounds() {
        let column = Int32Column::new(vec![1, 2, 3]);
        column.get(3);
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn get_never_reads_spare_capacity() {
        let mut column = Int32Column::new(Vec::new());
        column.append(1);
        // capacity is larger than the logical size now
        assert!(column.capacity() > column.len());
        column.get(1);
    }

    #[test]
    fn set_variants() {
        let mut column = Int32Column::new(vec![1, 2, 3]);
        column.set(0, 7);
        column.set_opt(1, None);
        column.set_f64(2, 9.9);
        assert_eq!(column.values(), &[7, 0, 9]);
    }

    #[test]
    fn append_growth_doubles() {
        let mut column = Int32Column::new(Vec::new());
        let mut reallocations = 0;
        let mut capacity = column.capacity();

        for value in 0..1000 {
            column.append(value);
            if column.capacity() != capacity {
                reallocations += 1;
                capacity = column.capacity();
            }
        }

        assert_eq!(column.len(), 1000);
        assert_eq!(column.get(999), 999);
        // at most ceil(log2(1000)) = 10 reallocations
        assert!(reallocations <= 10, "{reallocations} reallocations");
    }

    #[test]
    fn append_str_parses_or_fails() {
        let mut column = Int64Column::new(Vec::new());
        column.append_str(" 12 ").unwrap();
        assert!(column.append_str("twelve").is_err());
        assert_eq!(column.values(), &[12]);
    }

    #[test]
    fn append_opt_maps_absent_to_default() {
        let mut column = BooleanColumn::new(Vec::new());
        column.append_opt(Some(true));
        column.append_opt(None);
        assert_eq!(column.values(), &[true, false]);
    }

    #[test]
    fn set_range_reads_source_from_start() {
        let mut destination = Int32Column::new(vec![0; 4]);
        let source = Int32Column::new(vec![10, 20, 30, 40]);
        destination.set_range(1..3, &source);
        assert_eq!(destination.values(), &[0, 10, 20, 0]);
    }

    #[test]
    fn set_range_copies_from_offset() {
        let mut destination = Int32Column::new(vec![0; 5]);
        let source = Int32Column::new(vec![10, 20, 30, 40]);
        destination.set_range_from(1..4, &source, 1);
        assert_eq!(destination.values(), &[0, 20, 30, 40, 0]);
    }

    #[test]
    fn set_nz_preserves_destination_on_source_zero() {
        let mut destination = Int32Column::new(vec![1, 2, 3]);
        let source = Int32Column::new(vec![0, 5, 0]);
        destination.set_nz(0..3, &source);
        assert_eq!(destination.values(), &[1, 5, 3]);
    }

    #[test]
    fn set_nz_boolean_treats_false_as_absent() {
        let mut destination = BooleanColumn::new(vec![true, false, true]);
        let source = BooleanColumn::new(vec![false, true, false]);
        destination.set_nz(0..3, &source);
        assert_eq!(destination.values(), &[true, true, true]);
    }

    #[test]
    fn slice_copies_never_aliases() {
        let mut column = Int32Column::new(vec![1, 2, 3, 4]);
        let slice = column.slice(1..3);
        column.set(1, 99);
        assert_eq!(slice.values(), &[2, 3]);
    }

    #[test]
    fn clone_trims_spare_capacity() {
        let mut column = Int32Column::new(Vec::new());
        for value in 0..5 {
            column.append(value);
        }
        assert!(column.capacity() > column.len());

        let copy = column.clone();
        assert_eq!(copy, column);
        assert_eq!(copy.capacity(), copy.len());
    }

    #[test]
    fn equality_ignores_capacity() {
        let mut grown = Int32Column::new(Vec::new());
        grown.append(1);
        grown.append(2);
        let exact = Int32Column::new(vec![1, 2]);
        assert_eq!(grown, exact);
    }

    #[test]
    fn reset_reallocates_only_when_growing() {
        let mut column = Int64Column::with_size(10);
        column.reset(4);
        assert_eq!(column.len(), 4);
        assert_eq!(column.capacity(), 10);

        column.reset(20);
        assert_eq!(column.len(), 20);
        assert_eq!(column.capacity(), 20);
    }

    #[test]
    fn exact_serialized_size_counts_logical_values() {
        let mut column = DoubleColumn::new(Vec::new());
        for value in 0..3 {
            column.append(f64::from(value));
        }
        assert!(column.capacity() > column.len());
        assert_eq!(column.exact_serialized_size(), 1 + 8 * 3);
    }

    #[test]
    fn bulk_append_random_values() {
        let values: Vec<i64> = (0..1000).map(|_| rand::random()).collect();
        let mut column = Int64Column::new(Vec::new());
        for &value in &values {
            column.append(value);
        }
        assert_eq!(column.values(), values.as_slice());
        assert_eq!(column.clone(), column);
    }

    #[test]
    fn display_renders_kind_and_values() {
        let column = Int32Column::new(vec![1, 2, 3]);
        assert_eq!(column.to_string(), "Int32Column:[1,2,3]");
        assert_eq!(Int64Column::new(Vec::new()).to_string(), "Int64Column:[]");

        let column = BooleanColumn::new(vec![true, false]);
        assert_eq!(column.to_string(), "BooleanColumn:[true,false]");
    }

    #[test]
    fn size_bytes_accounts_for_capacity() {
        let mut column = Int32Column::new(Vec::new());
        for value in 0..5 {
            column.append(value);
        }
        let expected = size_of::<PrimitiveColumn<i32>>() as u64 + 4 * column.capacity() as u64;
        assert_eq!(column.size_bytes(), expected);
    }
}
