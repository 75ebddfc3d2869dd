//! The compact stream form.
//!
//! ```text
//! <i32 count> {<code><value>}*
//! ```
//!
//! Values are self-delimiting (see `codec`), so nothing needs escaping. The
//! form is smaller than the comparable one but does not sort.

use marshal_buffers::{Reader, Writer};

use crate::codec::{read_value, write_value};
use crate::entry_type::WireType;
use crate::{CompatibilityMode, Entry, Marshal, MarshalError, Result};

/// How many marshals deep the stream form may nest before reading fails.
/// A level costs only five input bytes.
pub const MAX_STREAM_DEPTH: usize = 512;

impl Marshal {
    /// Writes the stream form. On error nothing is left behind in `writer`.
    ///
    /// # Example
    ///
    /// ```
    /// use marshal::Marshal;
    /// use marshal_buffers::{Reader, Writer};
    ///
    /// let m = Marshal::builder().add_string("cat").add_byte(7).build();
    ///
    /// let mut writer = Writer::new();
    /// m.write(&mut writer).unwrap();
    /// let bytes = writer.flush();
    /// assert_eq!(bytes, vec![0, 0, 0, 2, 0x05, 3, b'c', b'a', b't', 0x00, 7]);
    ///
    /// let mut reader = Reader::new(&bytes);
    /// assert_eq!(Marshal::read(&mut reader).unwrap(), m);
    /// ```
    pub fn write(&self, writer: &mut Writer) -> Result<()> {
        let start = writer.len();
        let result = self.write_entries(writer);
        if result.is_err() {
            writer.truncate(start);
        }
        result
    }

    pub(crate) fn write_entries(&self, writer: &mut Writer) -> Result<()> {
        let count = i32::try_from(self.len()).map_err(|_| MarshalError::TooLong {
            len: self.len(),
            max: i32::MAX as usize,
        })?;
        writer.i32(count);
        for entry in self.iter() {
            writer.u8(entry.entry_type().code());
            write_value(entry.value()?, writer)?;
        }
        Ok(())
    }

    /// [`Marshal::write`] into a fresh buffer.
    pub fn to_stream_bytes(&self) -> Result<Vec<u8>> {
        let mut writer = Writer::new();
        self.write_entries(&mut writer)?;
        Ok(writer.flush())
    }

    /// Reads one marshal in stream form, leaving the reader just past it.
    pub fn read(reader: &mut Reader<'_>) -> Result<Marshal> {
        Self::read_inner(reader, None, 0)
    }

    /// Reads the stream form, remapping type codes through `mode`.
    pub fn read_with_mode(reader: &mut Reader<'_>, mode: CompatibilityMode) -> Result<Marshal> {
        Self::read_inner(reader, Some(mode), 0)
    }

    /// Reads a marshal from a buffer holding exactly its stream form.
    ///
    /// Bytes left over after the marshal are an error; use [`Marshal::read`]
    /// to read from the front of a longer buffer.
    pub fn from_stream_bytes(bytes: &[u8]) -> Result<Marshal> {
        let mut reader = Reader::new(bytes);
        let m = Self::read(&mut reader)?;
        if reader.size() > 0 {
            tracing::debug!(trailing = reader.size(), "bytes left after stream form");
            return Err(MarshalError::TrailingBytes { len: reader.size() });
        }
        Ok(m)
    }

    pub(crate) fn read_inner(
        reader: &mut Reader<'_>,
        mode: Option<CompatibilityMode>,
        depth: usize,
    ) -> Result<Marshal> {
        if depth > MAX_STREAM_DEPTH {
            return Err(MarshalError::TooDeep {
                max: MAX_STREAM_DEPTH,
            });
        }
        let count = reader.i32()?;
        tracing::trace!(count, ?mode, "decoding stream form");
        if count < 0 {
            return Err(MarshalError::NegativeCount(count));
        }
        // Every entry takes at least two bytes, so a huge count cannot force
        // a huge allocation before the input runs out.
        let mut entries = Vec::with_capacity((count as usize).min(reader.size() / 2));
        for _ in 0..count {
            let code = reader.u8()?;
            let wire = WireType::resolve(code, mode)?;
            let value = read_value(code, wire, reader, mode, depth)?;
            entries.push(Entry::new(value));
        }
        Ok(Marshal::from_entries(entries))
    }
}
