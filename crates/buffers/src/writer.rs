//! Auto-growing binary buffer writer.

use crate::text::{encode_modified_utf8, modified_utf8_len};
use crate::{encode_var_int, BufferError, MAX_VAR_INT};

/// A binary buffer writer.
///
/// Fixed-width values are written big-endian. The buffer grows as needed;
/// [`Writer::flush`] hands out everything written so far and resets the
/// writer for reuse.
///
/// # Example
///
/// ```
/// use marshal_buffers::Writer;
///
/// let mut writer = Writer::new();
/// writer.i32(4);
/// writer.u8(0x05);
/// writer.var_int(300).unwrap();
/// assert_eq!(writer.flush(), vec![0, 0, 0, 4, 0x05, 0xAC, 0x02]);
/// assert!(writer.is_empty());
/// ```
#[derive(Debug, Default, Clone)]
pub struct Writer {
    uint8: Vec<u8>,
}

impl Writer {
    /// Creates an empty writer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty writer with room for `capacity` bytes.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            uint8: Vec::with_capacity(capacity),
        }
    }

    /// Discards everything written so far.
    pub fn reset(&mut self) {
        self.uint8.clear();
    }

    /// Drops everything written after the first `len` bytes.
    pub fn truncate(&mut self, len: usize) {
        self.uint8.truncate(len);
    }

    /// Returns the number of bytes written.
    pub fn len(&self) -> usize {
        self.uint8.len()
    }

    /// Returns `true` if nothing has been written.
    pub fn is_empty(&self) -> bool {
        self.uint8.is_empty()
    }

    /// Returns the bytes written so far.
    pub fn as_slice(&self) -> &[u8] {
        &self.uint8
    }

    /// Takes the bytes written so far, leaving the writer empty.
    pub fn flush(&mut self) -> Vec<u8> {
        std::mem::take(&mut self.uint8)
    }

    /// Writes an unsigned 8-bit integer.
    #[inline]
    pub fn u8(&mut self, val: u8) {
        self.uint8.push(val);
    }

    /// Writes an unsigned 16-bit integer (big-endian).
    #[inline]
    pub fn u16(&mut self, val: u16) {
        self.uint8.extend_from_slice(&val.to_be_bytes());
    }

    /// Writes a signed 32-bit integer (big-endian).
    #[inline]
    pub fn i32(&mut self, val: i32) {
        self.uint8.extend_from_slice(&val.to_be_bytes());
    }

    /// Writes a signed 64-bit integer (big-endian).
    #[inline]
    pub fn i64(&mut self, val: i64) {
        self.uint8.extend_from_slice(&val.to_be_bytes());
    }

    /// Writes a 64-bit floating point number (big-endian).
    #[inline]
    pub fn f64(&mut self, val: f64) {
        self.uint8.extend_from_slice(&val.to_be_bytes());
    }

    /// Writes raw bytes.
    #[inline]
    pub fn buf(&mut self, bytes: &[u8]) {
        self.uint8.extend_from_slice(bytes);
    }

    /// Writes a variable-length non-negative integer.
    pub fn var_int(&mut self, val: u32) -> Result<(), BufferError> {
        let encoded = encode_var_int(val)?;
        self.buf(&encoded);
        Ok(())
    }

    /// Writes a varint length followed by the bytes themselves.
    pub fn var_buf(&mut self, bytes: &[u8]) -> Result<(), BufferError> {
        self.var_int(checked_len(bytes.len(), MAX_VAR_INT as usize)?)?;
        self.buf(bytes);
        Ok(())
    }

    /// Writes text as a varint byte length followed by modified UTF-8.
    ///
    /// Unlike [`Writer::utf_u16`], the text may be longer than 64KB.
    pub fn utf(&mut self, s: &str) -> Result<(), BufferError> {
        let len = modified_utf8_len(s);
        self.var_int(checked_len(len, MAX_VAR_INT as usize)?)?;
        encode_modified_utf8(s, &mut self.uint8);
        Ok(())
    }

    /// Writes text as a 16-bit big-endian byte length followed by modified
    /// UTF-8. Fails if the encoded text exceeds 65535 bytes.
    pub fn utf_u16(&mut self, s: &str) -> Result<(), BufferError> {
        let len = modified_utf8_len(s);
        self.u16(checked_len(len, u16::MAX as usize)? as u16);
        encode_modified_utf8(s, &mut self.uint8);
        Ok(())
    }
}

fn checked_len(len: usize, max: usize) -> Result<u32, BufferError> {
    if len > max {
        return Err(BufferError::TooLong { len, max });
    }
    Ok(len as u32)
}
