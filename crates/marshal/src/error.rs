//! Marshal error type.

use marshal_buffers::BufferError;
use thiserror::Error;

use crate::EntryType;

/// Error type for building, encoding and decoding marshals.
///
/// Every variant is a local, synchronous failure; nothing is retried and no
/// partial result is returned alongside it.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MarshalError {
    #[error("type code {0:#04x} is invalid")]
    InvalidTypeCode(u8),
    #[error("entry data must not be empty")]
    EmptyEntryData,
    #[error("type at position {index} is {actual}, not {expected}")]
    TypeMismatch {
        index: usize,
        expected: EntryType,
        actual: EntryType,
    },
    #[error("index {index} is out of range for length {len}")]
    IndexOutOfRange { index: usize, len: usize },
    #[error("{entry_type} entry data must be {expected} bytes, got {actual}")]
    InvalidEntryLength {
        entry_type: EntryType,
        expected: usize,
        actual: usize,
    },
    #[error("negative entry count {0}")]
    NegativeCount(i32),
    #[error("malformed variable-length integer")]
    MalformedVarInt,
    #[error("malformed text")]
    MalformedText,
    #[error("length {len} exceeds the maximum of {max}")]
    TooLong { len: usize, max: usize },
    #[error("unexpected end of input")]
    UnexpectedEof,
    #[error("{len} bytes left after the stream form")]
    TrailingBytes { len: usize },
    #[error("marshals nested deeper than {max} levels")]
    TooDeep { max: usize },
    #[error("null {0} cannot be added to a marshal")]
    NullArgument(&'static str),
}

impl From<BufferError> for MarshalError {
    fn from(err: BufferError) -> Self {
        match err {
            BufferError::EndOfBuffer => MarshalError::UnexpectedEof,
            BufferError::IndexOutOfRange { index, len } => {
                MarshalError::IndexOutOfRange { index, len }
            }
            BufferError::InvalidRange { end, len, .. } => {
                MarshalError::IndexOutOfRange { index: end, len }
            }
            BufferError::MalformedVarInt => MarshalError::MalformedVarInt,
            BufferError::MalformedText => MarshalError::MalformedText,
            BufferError::TooLong { len, max } => MarshalError::TooLong { len, max },
        }
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, MarshalError>;
