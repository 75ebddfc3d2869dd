//! Decode-time remapping of historical type codes.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::entry_type::{LEGACY_EMPTY_CODE, LEGACY_STRING_CODE};

/// A historical wire variant the decoder can still read.
///
/// A mode only changes how type codes are interpreted while decoding. The
/// encoder always writes the current codes.
///
/// # Example
///
/// ```
/// use marshal::CompatibilityMode;
///
/// let mode: CompatibilityMode = "sherlock".parse().unwrap();
/// assert_eq!(mode, CompatibilityMode::Sherlock);
/// assert_eq!(mode.convert_type(0x00), 0x01);
/// assert_eq!(mode.convert_type(0x42), 0x42);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum CompatibilityMode {
    /// Codes assigned before BYTE existed; every code is one lower, and the
    /// old MARSHAL code doubled as the empty marker.
    Sherlock,
    /// Strings whose stream form carries a 16-bit length.
    LegacyStrings,
}

const SHERLOCK_TABLE: &[(u8, u8)] = &[
    (0x00, 0x01),
    (0x01, 0x02),
    (0x02, 0x03),
    (0x03, 0x04),
    (0x04, 0x05),
    (0x05, 0x06),
    (0x06, LEGACY_EMPTY_CODE),
];

const LEGACY_STRINGS_TABLE: &[(u8, u8)] = &[(0x05, LEGACY_STRING_CODE)];

impl CompatibilityMode {
    pub const ALL: [CompatibilityMode; 2] =
        [CompatibilityMode::Sherlock, CompatibilityMode::LegacyStrings];

    fn table(self) -> &'static [(u8, u8)] {
        match self {
            CompatibilityMode::Sherlock => SHERLOCK_TABLE,
            CompatibilityMode::LegacyStrings => LEGACY_STRINGS_TABLE,
        }
    }

    /// Maps a code read from the wire to the current code. Codes absent from
    /// the mode's table pass through unchanged.
    pub fn convert_type(self, code: u8) -> u8 {
        self.table()
            .iter()
            .find(|(from, _)| *from == code)
            .map_or(code, |(_, to)| *to)
    }

    pub const fn name(self) -> &'static str {
        match self {
            CompatibilityMode::Sherlock => "sherlock",
            CompatibilityMode::LegacyStrings => "legacy-strings",
        }
    }
}

impl fmt::Display for CompatibilityMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when parsing an unknown compatibility mode name.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown compatibility mode {0:?}, expected \"sherlock\" or \"legacy-strings\"")]
pub struct ParseModeError(pub String);

impl FromStr for CompatibilityMode {
    type Err = ParseModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('_', "-");
        CompatibilityMode::ALL
            .into_iter()
            .find(|mode| mode.name() == normalized)
            .ok_or_else(|| ParseModeError(s.to_string()))
    }
}

/// Options for [`Marshal::decode_with`](crate::Marshal::decode_with).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DecodeOptions {
    pub mode: Option<CompatibilityMode>,
}

impl DecodeOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_mode(mut self, mode: CompatibilityMode) -> Self {
        self.mode = Some(mode);
        self
    }

    pub fn mode(&self) -> Option<CompatibilityMode> {
        self.mode
    }
}

impl From<CompatibilityMode> for DecodeOptions {
    fn from(mode: CompatibilityMode) -> Self {
        Self { mode: Some(mode) }
    }
}
