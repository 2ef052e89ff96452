//! This module defines [ColumnMetadata], the per-column statistics record
//! kept independently of the column's data buffer.

use std::fmt::Display;
use std::io::{Read, Write};

use crate::error::{Error, Result};
use crate::management::bytesized::{size_inner_string_flat, ByteSized};

/// Sentinel distinct count for "unknown / not estimated".
const DEFAULT_DISTINCT: i64 = -1;

/// Per-column statistics: an estimate of the number of distinct values
/// and an optional missing-value marker string.
///
/// Both fields normalize towards their sentinel: a non-positive distinct
/// count becomes [unknown](Self::is_default), an empty marker becomes
/// absent. Equality is by value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnMetadata {
    num_distinct: i64,
    mv_value: Option<String>,
}

impl Default for ColumnMetadata {
    fn default() -> Self {
        Self {
            num_distinct: DEFAULT_DISTINCT,
            mv_value: None,
        }
    }
}

impl ColumnMetadata {
    /// Creates a metadata record with the given distinct-value estimate
    /// and no missing-value marker.
    pub fn new(num_distinct: i64) -> Self {
        let mut result = Self::default();
        result.set_num_distinct(num_distinct);
        result
    }

    /// Creates a metadata record with the given distinct-value estimate
    /// and missing-value marker.
    pub fn with_marker(num_distinct: i64, marker: impl Into<String>) -> Self {
        let mut result = Self::new(num_distinct);
        result.set_mv_value(Some(marker.into()));
        result
    }

    /// Returns the distinct-value estimate, `-1` when unknown.
    pub fn num_distinct(&self) -> i64 {
        self.num_distinct
    }

    /// Sets the distinct-value estimate; any non-positive value is
    /// normalized to the unknown sentinel.
    pub fn set_num_distinct(&mut self, num_distinct: i64) {
        self.num_distinct = if num_distinct <= 0 {
            DEFAULT_DISTINCT
        } else {
            num_distinct
        };
    }

    /// Returns the missing-value marker, if any.
    pub fn mv_value(&self) -> Option<&str> {
        self.mv_value.as_deref()
    }

    /// Sets the missing-value marker; an empty string is normalized to
    /// absent.
    pub fn set_mv_value(&mut self, marker: Option<String>) {
        self.mv_value = marker.filter(|value| !value.is_empty());
    }

    /// Returns true iff both fields are at their sentinel/absent values.
    pub fn is_default(&self) -> bool {
        self.num_distinct == DEFAULT_DISTINCT && self.mv_value.is_none()
    }

    /// Serializes the record as the 8-byte big-endian distinct count
    /// followed by the length-prefixed marker (an empty string when the
    /// marker is absent).
    ///
    /// # Errors
    /// Returns [Error::MarkerTooLong] if the marker does not fit the
    /// 16-bit length prefix, and [Error::Io] on write failure.
    pub fn write<W: Write>(&self, writer: &mut W) -> Result<()> {
        writer.write_all(&self.num_distinct.to_be_bytes())?;

        let marker = self.mv_value.as_deref().unwrap_or("");
        let length =
            u16::try_from(marker.len()).map_err(|_| Error::MarkerTooLong(marker.len()))?;
        writer.write_all(&length.to_be_bytes())?;
        writer.write_all(marker.as_bytes())?;
        Ok(())
    }

    /// Reads a record in the format produced by [write][Self::write].
    /// An empty marker string is normalized back to absent, so
    /// round-tripping a default record yields an equal default record.
    ///
    /// # Errors
    /// Returns [Error::Io] on a short or failing read and
    /// [Error::InvalidUtf8] if the marker bytes are not valid UTF-8.
    pub fn read<R: Read>(reader: &mut R) -> Result<Self> {
        let mut count = [0u8; 8];
        reader.read_exact(&mut count)?;
        let mut length = [0u8; 2];
        reader.read_exact(&mut length)?;
        let mut marker = vec![0u8; usize::from(u16::from_be_bytes(length))];
        reader.read_exact(&mut marker)?;

        let mut result = Self::default();
        result.num_distinct = i64::from_be_bytes(count);
        result.set_mv_value(Some(String::from_utf8(marker)?));
        Ok(result)
    }

    /// Returns the exact number of bytes [write][Self::write] emits.
    pub fn exact_serialized_size(&self) -> u64 {
        8 + 2 + self.mv_value.as_ref().map_or(0, |marker| marker.len() as u64)
    }
}

impl Display for ColumnMetadata {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ColumnMetadata")?;
        if self.num_distinct != DEFAULT_DISTINCT {
            write!(f, ":{}", self.num_distinct)?;
        }
        if let Some(marker) = &self.mv_value {
            write!(f, "--{marker}")?;
        }
        Ok(())
    }
}

impl ByteSized for ColumnMetadata {
    fn size_bytes(&self) -> u64 {
        size_of::<Self>() as u64 + size_inner_string_flat(&self.mv_value)
    }
}

#[cfg(test)]
mod test {
    use super::ColumnMetadata;
    use test_log::test;

    fn round_trip(metadata: &ColumnMetadata) -> ColumnMetadata {
        let mut buffer = Vec::new();
        metadata.write(&mut buffer).expect("writing to a vec succeeds");
        assert_eq!(buffer.len() as u64, metadata.exact_serialized_size());
        ColumnMetadata::read(&mut buffer.as_slice()).expect("round trip read succeeds")
    }

    #[test]
    fn default_round_trips_to_default() {
        let metadata = ColumnMetadata::default();
        assert!(metadata.is_default());

        let read = round_trip(&metadata);
        assert!(read.is_default());
        assert_eq!(read, metadata);
    }

    #[test]
    fn marker_round_trips_by_value() {
        let metadata = ColumnMetadata::with_marker(5, "NA");
        let read = round_trip(&metadata);
        assert_eq!(read, metadata);
        assert_eq!(read.num_distinct(), 5);
        assert_eq!(read.mv_value(), Some("NA"));
    }

    #[test]
    fn non_positive_counts_normalize_to_unknown() {
        let mut metadata = ColumnMetadata::default();
        metadata.set_num_distinct(0);
        assert_eq!(metadata.num_distinct(), -1);
        metadata.set_num_distinct(-7);
        assert_eq!(metadata.num_distinct(), -1);
        metadata.set_num_distinct(3);
        assert_eq!(metadata.num_distinct(), 3);
    }

    #[test]
    fn empty_marker_normalizes_to_absent() {
        let mut metadata = ColumnMetadata::with_marker(2, "");
        assert_eq!(metadata.mv_value(), None);

        metadata.set_mv_value(Some("?".to_string()));
        assert_eq!(metadata.mv_value(), Some("?"));
        metadata.set_mv_value(None);
        assert!(metadata.mv_value().is_none());
    }

    #[test]
    fn equality_is_by_value() {
        assert_eq!(
            ColumnMetadata::with_marker(5, "NA"),
            ColumnMetadata::with_marker(5, "NA")
        );
        assert_ne!(
            ColumnMetadata::with_marker(5, "NA"),
            ColumnMetadata::new(5)
        );
        assert_ne!(ColumnMetadata::new(5), ColumnMetadata::new(6));
    }

    #[test]
    fn oversized_marker_is_rejected() {
        let metadata = ColumnMetadata::with_marker(1, "x".repeat(70_000));
        let mut buffer = Vec::new();
        assert!(metadata.write(&mut buffer).is_err());
    }

    #[test]
    fn display_is_compact() {
        assert_eq!(ColumnMetadata::default().to_string(), "ColumnMetadata");
        assert_eq!(
            ColumnMetadata::with_marker(5, "NA").to_string(),
            "ColumnMetadata:5--NA"
        );
    }
}
