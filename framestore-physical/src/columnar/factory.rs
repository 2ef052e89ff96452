//! This module defines the column factory: the single place where the
//! serialization tag of a column is inspected and the matching concrete
//! variant is constructed. Concrete columns only ever decode their
//! payload; the tag is consumed here.

use std::io::Read;

use log::trace;

use crate::datatypes::ValueType;
use crate::error::{Error, Result};

use super::column::vector::{
    BooleanColumn, DoubleColumn, FloatColumn, Int32Column, Int64Column,
};
use super::column::ColumnT;

/// Constructs a default-filled column of the given kind and logical size.
pub fn allocate(kind: ValueType, size: usize) -> ColumnT {
    match kind {
        ValueType::Boolean => ColumnT::Boolean(BooleanColumn::with_size(size)),
        ValueType::Int32 => ColumnT::Int32(Int32Column::with_size(size)),
        ValueType::Int64 => ColumnT::Int64(Int64Column::with_size(size)),
        ValueType::Float => ColumnT::Float(FloatColumn::with_size(size)),
        ValueType::Double => ColumnT::Double(DoubleColumn::with_size(size)),
    }
}

/// Reads a serialized column of the given row count: consumes the kind
/// tag, constructs the matching pre-sized variant, and decodes the
/// payload into it.
///
/// # Errors
/// Returns [Error::UnknownTag] if the tag byte does not name any kind,
/// and [Error::Io] on a short or failing read.
pub fn read_column<R: Read>(reader: &mut R, rows: usize) -> Result<ColumnT> {
    let mut tag = [0u8; 1];
    reader.read_exact(&mut tag)?;
    let kind = ValueType::from_tag(tag[0]).ok_or(Error::UnknownTag(tag[0]))?;
    trace!("reading {kind} column with {rows} rows");

    let mut column = allocate(kind, rows);
    column.read_payload(reader)?;
    Ok(column)
}

#[cfg(test)]
mod test {
    use super::{allocate, read_column};
    use crate::columnar::column::ColumnT;
    use crate::datatypes::{ValueType, VALUE_TYPES};
    use crate::error::Error;
    use quickcheck_macros::quickcheck;
    use test_log::test;

    fn sample_column(kind: ValueType, rows: usize) -> ColumnT {
        let mut column = allocate(kind, 0);
        for row in 0..rows {
            let token = match kind {
                ValueType::Boolean => (if row % 2 == 0 { "true" } else { "false" }).to_string(),
                ValueType::Int32 | ValueType::Int64 => format!("{}", row * 7),
                ValueType::Float | ValueType::Double => format!("{}.5", row),
            };
            column
                .append_str(&token)
                .expect("sample tokens are valid for their kind");
        }
        column
    }

    fn round_trip(column: &ColumnT) -> ColumnT {
        let mut buffer = Vec::new();
        column.write(&mut buffer).expect("writing to a vec succeeds");
        assert_eq!(
            buffer.len() as u64,
            column.exact_serialized_size(),
            "write must emit exactly the predicted byte count"
        );
        read_column(&mut buffer.as_slice(), column.len()).expect("round trip read succeeds")
    }

    #[test]
    fn round_trip_all_kinds_and_sizes() {
        for &kind in VALUE_TYPES {
            for rows in [0, 1, 1000] {
                let column = sample_column(kind, rows);
                let read = round_trip(&column);
                assert_eq!(read, column, "round trip of {kind} with {rows} rows");
                assert_eq!(read.value_type(), kind);
            }
        }
    }

    #[test]
    fn allocate_is_pre_sized_and_default_filled() {
        let column = allocate(ValueType::Float, 3);
        assert_eq!(column.len(), 3);
        assert_eq!(column, ColumnT::from(vec![0.0f32; 3]));
    }

    #[test]
    fn unknown_tag_is_rejected() {
        let buffer = [200u8, 0, 0, 0, 1];
        let result = read_column(&mut buffer.as_ref(), 1);
        assert!(matches!(result, Err(Error::UnknownTag(200))));
    }

    #[test]
    fn truncated_payload_is_an_io_error() {
        let column = ColumnT::from(vec![1i64, 2, 3]);
        let mut buffer = Vec::new();
        column.write(&mut buffer).unwrap();
        buffer.truncate(buffer.len() - 1);

        let result = read_column(&mut buffer.as_slice(), 3);
        assert!(matches!(result, Err(Error::Io(_))));
    }

    #[quickcheck]
    fn prop_int64_round_trip(values: Vec<i64>) -> bool {
        let column = ColumnT::from(values.clone());
        round_trip(&column) == column
    }

    #[quickcheck]
    fn prop_double_round_trip(values: Vec<f64>) -> bool {
        // NaN breaks equality, not the format itself
        let values: Vec<f64> = values.into_iter().filter(|value| !value.is_nan()).collect();
        let column = ColumnT::from(values);
        round_trip(&column) == column
    }

    #[quickcheck]
    fn prop_boolean_round_trip(values: Vec<bool>) -> bool {
        let column = ColumnT::from(values);
        round_trip(&column) == column
    }
}
