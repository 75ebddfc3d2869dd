//! Binary buffer utilities for marshal.
//!
//! This crate provides the byte-level building blocks that the `marshal`
//! crate encodes and decodes with.
//!
//! # Overview
//!
//! - [`ByteView`] - An immutable, zero-copy view over a shared byte buffer
//! - [`Reader`] - Reads big-endian binary data from a byte slice with cursor tracking
//! - [`Writer`] - Writes big-endian binary data to an auto-growing buffer
//! - [`encode_var_int`] / [`decode_var_int`] - Base-128 variable-length integers
//! - [`text`] - Modified UTF-8 text encoding, not limited to 64KB
//!
//! # Example
//!
//! ```
//! use marshal_buffers::{Reader, Writer};
//!
//! // Write some data
//! let mut writer = Writer::new();
//! writer.u8(0x01);
//! writer.i32(-2);
//! writer.utf("hello").unwrap();
//! let data = writer.flush();
//!
//! // Read it back
//! let mut reader = Reader::new(&data);
//! assert_eq!(reader.u8().unwrap(), 0x01);
//! assert_eq!(reader.i32().unwrap(), -2);
//! assert_eq!(reader.utf().unwrap(), "hello");
//! ```

mod byte_view;
mod cmp;
mod print_octets;
mod reader;
pub mod text;
mod varint;
mod writer;

pub use byte_view::ByteView;
pub use cmp::cmp_unsigned;
pub use print_octets::{print_octets, print_octets_default};
pub use reader::Reader;
pub use varint::{decode_var_int, encode_var_int, var_int_size, MAX_VAR_INT, MAX_VAR_INT_LEN};
pub use writer::Writer;

use thiserror::Error;

/// Error type for buffer operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BufferError {
    /// Attempted to read past the end of the buffer.
    #[error("end of buffer")]
    EndOfBuffer,
    /// A position outside of `[0, len]` was requested.
    #[error("position {index} is out of range for length {len}")]
    IndexOutOfRange { index: usize, len: usize },
    /// A view was requested over an invalid range of its backing buffer.
    #[error("invalid range [{begin}, {end}) for buffer of length {len}")]
    InvalidRange { begin: usize, end: usize, len: usize },
    /// A variable-length integer was too long or overflowed 31 bits.
    #[error("malformed variable-length integer")]
    MalformedVarInt,
    /// Invalid modified UTF-8 sequence.
    #[error("malformed modified UTF-8 text")]
    MalformedText,
    /// A length does not fit in the field reserved for it.
    #[error("length {len} exceeds the maximum of {max}")]
    TooLong { len: usize, max: usize },
}
