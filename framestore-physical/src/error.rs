//! Error-handling module for the crate

use std::fmt::Display;

use thiserror::Error;

use crate::datatypes::ValueType;

/// Result type with the crate-level [Error] as its default error.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Error-Collection for all the possible Errors occurring in this crate
#[allow(variant_size_differences)]
#[derive(Error, Debug)]
pub enum Error {
    /// A type conversion would lose information
    #[error("unable to convert value {value} from {from} to {to}")]
    Coercion {
        /// The offending value, rendered in its source type
        value: String,
        /// Kind of the source column
        from: ValueType,
        /// Kind of the requested target column
        to: ValueType,
    },
    /// Operation that is an explicit extension point and has no implementation
    #[error("operation {0} is not implemented")]
    NotImplemented(&'static str),
    /// Error occurred during parsing of a string into a typed value
    #[error("cannot parse \"{value}\" as {target}")]
    Parse {
        /// The string that failed to parse
        value: String,
        /// Kind the string was parsed as
        target: ValueType,
    },
    /// The serialized tag byte does not name any known column kind
    #[error("unknown column kind tag {0}")]
    UnknownTag(u8),
    /// Missing-value marker too long for the length-prefixed encoding
    #[error("missing-value marker of {0} bytes exceeds the serialization limit")]
    MarkerTooLong(usize),
    /// Errors on reading or writing serialized columns
    #[error(transparent)]
    Io(#[from] std::io::Error),
    /// A serialized missing-value marker is not valid UTF-8
    #[error(transparent)]
    InvalidUtf8(#[from] std::string::FromUtf8Error),
}

impl Error {
    /// Build a [Error::Coercion] for the given offending value.
    pub(crate) fn coercion<T: Display>(value: T, from: ValueType, to: ValueType) -> Self {
        Self::Coercion {
            value: value.to_string(),
            from,
            to,
        }
    }
}
