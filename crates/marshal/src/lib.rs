//! Byte-comparable encoding of typed value sequences.
//!
//! A [`Marshal`] is an immutable, ordered list of typed values (bytes, byte
//! arrays, doubles, 32- and 64-bit integers, strings and nested marshals). It
//! has two encodings:
//!
//! - the **comparable form** ([`Marshal::to_comparable_bytes`]), whose
//!   unsigned byte order matches the order of the encoded values, so it can
//!   be used directly as a key in a sorted store; and
//! - the **stream form** ([`Marshal::write`]), which is smaller but does not
//!   sort.
//!
//! Historical variants of the comparable form are still readable through a
//! [`CompatibilityMode`].
//!
//! # Example
//!
//! ```
//! use marshal::Marshal;
//!
//! let kitty = Marshal::builder().add_string("kitty").build();
//! let kitty_kat = Marshal::builder().add_string("kitty_kat").build();
//!
//! // Scanning with the terminated prefix matches "kitty" exactly.
//! let exact = kitty.prefix_terminated(1).unwrap();
//! assert!(!kitty_kat.to_bytes().starts_with(exact.as_slice()));
//!
//! // The unterminated prefix matches anything starting with "kitty".
//! let loose = kitty.prefix_unterminated(1).unwrap();
//! assert!(kitty_kat.to_bytes().starts_with(loose.as_slice()));
//!
//! // The separator sorts above '_', so the shorter key comes second.
//! assert!(kitty > kitty_kat);
//! ```
//!
//! # Ordering caveats
//!
//! - Doubles are stored as raw IEEE-754 big-endian bits, so negative doubles
//!   sort after positive ones and in reverse among themselves.
//! - Integers and longs are stored in two's complement, so negative values
//!   sort after non-negative ones.
//! - Every entry is followed by the separator `0xFE`, which sorts above
//!   almost every data byte. An entry whose data is a strict byte-wise prefix
//!   of another's therefore sorts after it: `"a"` comes after `"ab"`.
//! - The empty string is encoded as the single byte `0x00`, which is also
//!   the encoding of `"\0"`; both decode to the empty string.
//! - An empty byte array encodes to no data and cannot be decoded back.

mod codec;
mod compat;
mod comparable;
mod entry;
mod entry_type;
mod error;
pub mod escape;
mod marshal;
mod stream;
mod value;

pub use compat::{CompatibilityMode, DecodeOptions, ParseModeError};
pub use entry::Entry;
pub use entry_type::{EntryType, LEGACY_EMPTY_CODE, SEPARATOR};
pub use error::{MarshalError, Result};
pub use marshal::{Builder, Marshal};
pub use stream::MAX_STREAM_DEPTH;
pub use value::Value;

pub use marshal_buffers::ByteView;
