//! Binary buffer reader with cursor tracking.

use crate::text::decode_modified_utf8;
use crate::{decode_var_int, BufferError};

/// A binary buffer reader that reads data from a byte slice.
///
/// The reader maintains a cursor position and provides methods for reading
/// big-endian integers, floats, variable-length integers and length-prefixed
/// text. Every read is bounds-checked; running past `end` yields
/// [`BufferError::EndOfBuffer`] and leaves the cursor where it was.
///
/// # Example
///
/// ```
/// use marshal_buffers::Reader;
///
/// let data = [0x01, 0x02, 0x03, 0x04, 0x05];
/// let mut reader = Reader::new(&data);
///
/// assert_eq!(reader.u8().unwrap(), 0x01);
/// assert_eq!(reader.u16().unwrap(), 0x0203);
/// assert_eq!(reader.size(), 2);
/// assert!(reader.i32().is_err());
/// ```
pub struct Reader<'a> {
    /// The underlying byte slice.
    pub uint8: &'a [u8],
    /// Current cursor position.
    pub x: usize,
    /// End position (exclusive).
    pub end: usize,
}

impl<'a> Reader<'a> {
    /// Creates a new reader for the given byte slice.
    pub fn new(uint8: &'a [u8]) -> Self {
        let end = uint8.len();
        Self { uint8, x: 0, end }
    }

    /// Resets the reader with a new byte slice.
    pub fn reset(&mut self, uint8: &'a [u8]) {
        self.x = 0;
        self.end = uint8.len();
        self.uint8 = uint8;
    }

    /// Returns the number of remaining bytes.
    pub fn size(&self) -> usize {
        self.end.saturating_sub(self.x)
    }

    fn assert_size(&self, size: usize) -> Result<(), BufferError> {
        if size > self.size() {
            return Err(BufferError::EndOfBuffer);
        }
        Ok(())
    }

    /// Peeks at the current byte without advancing the cursor.
    pub fn peek(&self) -> Result<u8, BufferError> {
        self.assert_size(1)?;
        Ok(self.uint8[self.x])
    }

    /// Advances the cursor by the given number of bytes.
    pub fn skip(&mut self, length: usize) -> Result<(), BufferError> {
        self.assert_size(length)?;
        self.x += length;
        Ok(())
    }

    /// Returns a subarray of the given size and advances the cursor.
    pub fn buf(&mut self, size: usize) -> Result<&'a [u8], BufferError> {
        self.assert_size(size)?;
        let x = self.x;
        self.x += size;
        Ok(&self.uint8[x..self.x])
    }

    #[inline]
    fn array<const N: usize>(&mut self) -> Result<[u8; N], BufferError> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.buf(N)?);
        Ok(out)
    }

    /// Reads an unsigned 8-bit integer.
    #[inline]
    pub fn u8(&mut self) -> Result<u8, BufferError> {
        self.assert_size(1)?;
        let val = self.uint8[self.x];
        self.x += 1;
        Ok(val)
    }

    /// Reads an unsigned 16-bit integer (big-endian).
    #[inline]
    pub fn u16(&mut self) -> Result<u16, BufferError> {
        self.array().map(u16::from_be_bytes)
    }

    /// Reads a signed 32-bit integer (big-endian).
    #[inline]
    pub fn i32(&mut self) -> Result<i32, BufferError> {
        self.array().map(i32::from_be_bytes)
    }

    /// Reads a signed 64-bit integer (big-endian).
    #[inline]
    pub fn i64(&mut self) -> Result<i64, BufferError> {
        self.array().map(i64::from_be_bytes)
    }

    /// Reads a 64-bit floating point number (big-endian).
    #[inline]
    pub fn f64(&mut self) -> Result<f64, BufferError> {
        self.array().map(f64::from_be_bytes)
    }

    /// Reads a variable-length non-negative integer.
    pub fn var_int(&mut self) -> Result<u32, BufferError> {
        let (value, consumed) = decode_var_int(&self.uint8[self.x..self.end])?;
        self.x += consumed;
        Ok(value)
    }

    /// Reads a varint length followed by that many bytes.
    pub fn var_buf(&mut self) -> Result<&'a [u8], BufferError> {
        let start = self.x;
        let length = self.var_int()? as usize;
        match self.buf(length) {
            Ok(bytes) => Ok(bytes),
            Err(err) => {
                self.x = start;
                Err(err)
            }
        }
    }

    /// Reads text written by [`Writer::utf`](crate::Writer::utf): a varint
    /// byte length followed by modified UTF-8.
    pub fn utf(&mut self) -> Result<String, BufferError> {
        let bytes = self.var_buf()?;
        decode_modified_utf8(bytes)
    }

    /// Reads text written by [`Writer::utf_u16`](crate::Writer::utf_u16):
    /// a 16-bit big-endian byte length followed by modified UTF-8.
    pub fn utf_u16(&mut self) -> Result<String, BufferError> {
        let start = self.x;
        let length = self.u16()? as usize;
        match self.buf(length) {
            Ok(bytes) => decode_modified_utf8(bytes),
            Err(err) => {
                self.x = start;
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_u8() {
        let data = [0x01, 0x02, 0x03];
        let mut reader = Reader::new(&data);
        assert_eq!(reader.u8().unwrap(), 0x01);
        assert_eq!(reader.u8().unwrap(), 0x02);
        assert_eq!(reader.u8().unwrap(), 0x03);
        assert_eq!(reader.u8(), Err(BufferError::EndOfBuffer));
    }

    #[test]
    fn test_i32_negative() {
        let data = [0xFF, 0xFF, 0xFF, 0xE9];
        let mut reader = Reader::new(&data);
        assert_eq!(reader.i32().unwrap(), -23);
    }

    #[test]
    fn test_short_read_keeps_cursor() {
        let data = [0x01, 0x02, 0x03];
        let mut reader = Reader::new(&data);
        reader.skip(1).unwrap();
        assert_eq!(reader.i32(), Err(BufferError::EndOfBuffer));
        assert_eq!(reader.x, 1);
        assert_eq!(reader.u16().unwrap(), 0x0203);
    }

    #[test]
    fn test_var_buf_truncated_restores_cursor() {
        let data = [0x05, b'a', b'b'];
        let mut reader = Reader::new(&data);
        assert_eq!(reader.var_buf(), Err(BufferError::EndOfBuffer));
        assert_eq!(reader.x, 0);
    }

    #[test]
    fn test_utf_u16() {
        let data = [0x00, 0x03, b'c', b'a', b't', 0x09];
        let mut reader = Reader::new(&data);
        assert_eq!(reader.utf_u16().unwrap(), "cat");
        assert_eq!(reader.peek().unwrap(), 0x09);
    }
}
