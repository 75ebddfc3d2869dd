//! Variable-length non-negative integers.
//!
//! Each byte carries seven bits of the value, least significant group first.
//! The high bit is set iff another byte follows. Values are limited to the
//! non-negative 32-bit signed range, so an encoding is at most five bytes
//! long and the fifth byte may only carry the top four bits.

use crate::BufferError;

/// Largest value that can be encoded.
pub const MAX_VAR_INT: u32 = i32::MAX as u32;

/// Longest possible encoding, in bytes.
pub const MAX_VAR_INT_LEN: usize = 5;

const CONTINUE: u8 = 0x80;
const GROUP: u32 = 0x7F;

/// Returns the number of bytes needed to encode `value`.
pub fn var_int_size(value: u32) -> usize {
    match value {
        0..=0x7F => 1,
        0x80..=0x3FFF => 2,
        0x4000..=0x1F_FFFF => 3,
        0x20_0000..=0xFFF_FFFF => 4,
        _ => 5,
    }
}

/// Encodes a non-negative integer.
///
/// # Example
///
/// ```
/// use marshal_buffers::encode_var_int;
///
/// assert_eq!(encode_var_int(1).unwrap(), vec![0x01]);
/// assert_eq!(encode_var_int(300).unwrap(), vec![0xAC, 0x02]);
/// assert!(encode_var_int(u32::MAX).is_err());
/// ```
pub fn encode_var_int(value: u32) -> Result<Vec<u8>, BufferError> {
    if value > MAX_VAR_INT {
        return Err(BufferError::TooLong {
            len: value as usize,
            max: MAX_VAR_INT as usize,
        });
    }
    let size = var_int_size(value);
    let mut out = Vec::with_capacity(size);
    let mut v = value;
    for _ in 1..size {
        out.push((v & GROUP) as u8 | CONTINUE);
        v >>= 7;
    }
    out.push(v as u8);
    Ok(out)
}

/// Decodes an integer from the start of `data`.
///
/// Returns the value and the number of bytes consumed.
///
/// # Example
///
/// ```
/// use marshal_buffers::{decode_var_int, BufferError};
///
/// assert_eq!(decode_var_int(&[0xAC, 0x02, 0xFF]).unwrap(), (300, 2));
/// assert_eq!(decode_var_int(&[0xFF, 0xFF, 0xFF, 0xFF, 0x70]), Err(BufferError::MalformedVarInt));
/// ```
pub fn decode_var_int(data: &[u8]) -> Result<(u32, usize), BufferError> {
    let mut decoded: u32 = 0;
    for i in 0..MAX_VAR_INT_LEN {
        let b = *data.get(i).ok_or(BufferError::EndOfBuffer)?;
        // Fifth group has room for four bits only; anything more (or a
        // continuation flag) overflows the signed 32-bit range.
        if i == MAX_VAR_INT_LEN - 1 && b >= 8 {
            return Err(BufferError::MalformedVarInt);
        }
        decoded |= (u32::from(b) & GROUP) << (7 * i);
        if b & CONTINUE == 0 {
            return Ok((decoded, i + 1));
        }
    }
    Err(BufferError::MalformedVarInt)
}
