//! Modified UTF-8 text encoding.
//!
//! Text is encoded one UTF-16 code unit at a time:
//!
//! | Code unit            | Bytes |
//! | -------------------- | ----- |
//! | `U+0001..=U+007F`    | 1     |
//! | `U+0000`, `..=U+07FF`| 2     |
//! | `U+0800..=U+FFFF`    | 3     |
//!
//! NUL is written as `C0 80` so the output never contains a zero byte, and
//! supplementary characters are written as two three-byte surrogates. The
//! functions here carry no length prefix; callers choose one (a varint for
//! the current stream form, a 16-bit length for the legacy one).

use crate::BufferError;

/// Returns the encoded size of `s` in bytes.
///
/// # Example
///
/// ```
/// use marshal_buffers::text::modified_utf8_len;
///
/// assert_eq!(modified_utf8_len("abc"), 3);
/// assert_eq!(modified_utf8_len("\u{0}"), 2);
/// assert_eq!(modified_utf8_len("\u{1F600}"), 6);
/// ```
pub fn modified_utf8_len(s: &str) -> usize {
    s.encode_utf16().map(unit_len).sum()
}

#[inline]
fn unit_len(unit: u16) -> usize {
    match unit {
        0x0001..=0x007F => 1,
        0x0000 | 0x0080..=0x07FF => 2,
        _ => 3,
    }
}

/// Appends the modified UTF-8 encoding of `s` to `out`.
///
/// # Example
///
/// ```
/// use marshal_buffers::text::encode_modified_utf8;
///
/// let mut out = Vec::new();
/// encode_modified_utf8("a\u{0}é", &mut out);
/// assert_eq!(out, vec![0x61, 0xC0, 0x80, 0xC3, 0xA9]);
/// ```
pub fn encode_modified_utf8(s: &str, out: &mut Vec<u8>) {
    out.reserve(s.len());
    for unit in s.encode_utf16() {
        match unit_len(unit) {
            1 => out.push(unit as u8),
            2 => {
                out.push(0xC0 | ((unit >> 6) & 0x1F) as u8);
                out.push(0x80 | (unit & 0x3F) as u8);
            }
            _ => {
                out.push(0xE0 | ((unit >> 12) & 0x0F) as u8);
                out.push(0x80 | ((unit >> 6) & 0x3F) as u8);
                out.push(0x80 | (unit & 0x3F) as u8);
            }
        }
    }
}

/// Decodes a complete modified UTF-8 byte sequence.
///
/// Fails with [`BufferError::MalformedText`] on a truncated or invalid
/// sequence, or when the surrogates do not pair up into valid characters.
///
/// # Example
///
/// ```
/// use marshal_buffers::text::decode_modified_utf8;
///
/// assert_eq!(decode_modified_utf8(&[0x61, 0xC0, 0x80]).unwrap(), "a\u{0}");
/// assert!(decode_modified_utf8(&[0xE2, 0x98]).is_err());
/// ```
pub fn decode_modified_utf8(bytes: &[u8]) -> Result<String, BufferError> {
    let mut units: Vec<u16> = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        let a = bytes[i];
        match a >> 4 {
            0..=7 => {
                units.push(u16::from(a));
                i += 1;
            }
            12 | 13 => {
                let b = continuation(bytes, i + 1)?;
                units.push((u16::from(a & 0x1F) << 6) | u16::from(b & 0x3F));
                i += 2;
            }
            14 => {
                let b = continuation(bytes, i + 1)?;
                let c = continuation(bytes, i + 2)?;
                units.push(
                    (u16::from(a & 0x0F) << 12)
                        | (u16::from(b & 0x3F) << 6)
                        | u16::from(c & 0x3F),
                );
                i += 3;
            }
            _ => return Err(BufferError::MalformedText),
        }
    }
    String::from_utf16(&units).map_err(|_| BufferError::MalformedText)
}

#[inline]
fn continuation(bytes: &[u8], pos: usize) -> Result<u8, BufferError> {
    match bytes.get(pos) {
        Some(&b) if b & 0xC0 == 0x80 => Ok(b),
        _ => Err(BufferError::MalformedText),
    }
}
