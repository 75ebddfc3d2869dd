//! Entry types and their fixed one-byte codes.

use std::fmt;
use std::hash::{Hash, Hasher};

use crate::{CompatibilityMode, MarshalError, Result};

/// Separator between entries of the comparable form; also the escape byte.
pub const SEPARATOR: u8 = 0xFE;

/// Code that once encoded the empty marshal. Decoded, never produced.
pub const LEGACY_EMPTY_CODE: u8 = 0xFF;

/// Internal code for strings whose stream form carries a 16-bit length.
/// Only reachable through [`CompatibilityMode::LegacyStrings`].
pub(crate) const LEGACY_STRING_CODE: u8 = 0x85;

/// Known types allowed in a marshal.
///
/// The codes are part of the wire format and can never be reassigned. New
/// types must take an unused code other than [`SEPARATOR`] and
/// [`LEGACY_EMPTY_CODE`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum EntryType {
    Byte,
    ByteArray,
    Double,
    Integer,
    Long,
    String,
    Marshal,
}

impl EntryType {
    /// Every entry type, in code order.
    pub const ALL: [EntryType; 7] = [
        EntryType::Byte,
        EntryType::ByteArray,
        EntryType::Double,
        EntryType::Integer,
        EntryType::Long,
        EntryType::String,
        EntryType::Marshal,
    ];

    /// The wire code of this type.
    pub const fn code(self) -> u8 {
        match self {
            EntryType::Byte => 0x00,
            EntryType::ByteArray => 0x01,
            EntryType::Double => 0x02,
            EntryType::Integer => 0x03,
            EntryType::Long => 0x04,
            EntryType::String => 0x05,
            EntryType::Marshal => 0x06,
        }
    }

    /// Looks up the type for a wire code.
    pub const fn from_code(code: u8) -> Option<EntryType> {
        match code {
            0x00 => Some(EntryType::Byte),
            0x01 => Some(EntryType::ByteArray),
            0x02 => Some(EntryType::Double),
            0x03 => Some(EntryType::Integer),
            0x04 => Some(EntryType::Long),
            0x05 => Some(EntryType::String),
            0x06 => Some(EntryType::Marshal),
            _ => None,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            EntryType::Byte => "BYTE",
            EntryType::ByteArray => "BYTE_ARRAY",
            EntryType::Double => "DOUBLE",
            EntryType::Integer => "INTEGER",
            EntryType::Long => "LONG",
            EntryType::String => "STRING",
            EntryType::Marshal => "MARSHAL",
        }
    }
}

// Hash by wire code so the value never depends on variant order.
impl Hash for EntryType {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u8(self.code());
    }
}

impl fmt::Display for EntryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl TryFrom<u8> for EntryType {
    type Error = MarshalError;

    fn try_from(code: u8) -> Result<Self> {
        EntryType::from_code(code).ok_or(MarshalError::InvalidTypeCode(code))
    }
}

/// A type code as read from the wire, after compatibility remapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum WireType {
    Entry(EntryType),
    LegacyString,
    LegacyEmpty,
}

impl WireType {
    pub(crate) fn resolve(code: u8, mode: Option<CompatibilityMode>) -> Result<WireType> {
        let native = match mode {
            Some(mode) => mode.convert_type(code),
            None => code,
        };
        if native != code {
            tracing::trace!(code, native, ?mode, "remapped type code");
        }
        match native {
            LEGACY_STRING_CODE => Ok(WireType::LegacyString),
            LEGACY_EMPTY_CODE => Ok(WireType::LegacyEmpty),
            other => EntryType::from_code(other)
                .map(WireType::Entry)
                .ok_or(MarshalError::InvalidTypeCode(code)),
        }
    }

    /// The entry type values of this wire type decode into.
    pub(crate) fn entry_type(self, code: u8) -> Result<EntryType> {
        match self {
            WireType::Entry(entry_type) => Ok(entry_type),
            WireType::LegacyString => Ok(EntryType::String),
            WireType::LegacyEmpty => Err(MarshalError::InvalidTypeCode(code)),
        }
    }
}
