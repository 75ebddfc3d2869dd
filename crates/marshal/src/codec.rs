//! Per-type encoders and decoders.
//!
//! Every value has two encodings. The comparable one is what goes, escaped,
//! between separators in [`Marshal::to_comparable_bytes`]; it carries no
//! length because the framing provides it. The stream one is
//! self-delimiting and is used by [`Marshal::write`].

use marshal_buffers::{ByteView, Reader, Writer};

use crate::entry_type::WireType;
use crate::{CompatibilityMode, EntryType, Marshal, MarshalError, Result, Value};

/// Comparable form of the empty string. Real text never encodes to it.
const EMPTY_STRING: [u8; 1] = [0x00];

/// Encodes a value into its comparable form.
pub(crate) fn marshal_value(value: &Value) -> ByteView {
    match value {
        Value::Byte(v) => ByteView::from([*v]),
        Value::ByteArray(v) => v.clone(),
        Value::Double(v) => ByteView::from(v.to_be_bytes()),
        Value::Integer(v) => ByteView::from(v.to_be_bytes()),
        Value::Long(v) => ByteView::from(v.to_be_bytes()),
        Value::String(v) if v.is_empty() => ByteView::from(EMPTY_STRING),
        Value::String(v) => ByteView::from(v.as_bytes()),
        Value::Marshal(v) => v.to_comparable_bytes(),
    }
}

/// Decodes the comparable form of an entry's data.
///
/// `mode` only matters for nested marshals, which are decoded with the same
/// compatibility mode as their parent.
pub(crate) fn demarshal_value(
    entry_type: EntryType,
    data: &ByteView,
    mode: Option<CompatibilityMode>,
) -> Result<Value> {
    match entry_type {
        EntryType::Byte => fixed::<1>(entry_type, data).map(|[b]| Value::Byte(b)),
        EntryType::ByteArray => Ok(Value::ByteArray(data.clone())),
        EntryType::Double => fixed(entry_type, data).map(|b| Value::Double(f64::from_be_bytes(b))),
        EntryType::Integer => {
            fixed(entry_type, data).map(|b| Value::Integer(i32::from_be_bytes(b)))
        }
        EntryType::Long => fixed(entry_type, data).map(|b| Value::Long(i64::from_be_bytes(b))),
        EntryType::String => {
            if data.as_slice() == EMPTY_STRING {
                return Ok(Value::String(String::new()));
            }
            String::from_utf8(data.to_vec())
                .map(Value::String)
                .map_err(|_| MarshalError::MalformedText)
        }
        EntryType::Marshal => Marshal::decode_view(data.clone(), mode).map(Value::Marshal),
    }
}

fn fixed<const N: usize>(entry_type: EntryType, data: &ByteView) -> Result<[u8; N]> {
    data.as_slice()
        .try_into()
        .map_err(|_| MarshalError::InvalidEntryLength {
            entry_type,
            expected: N,
            actual: data.len(),
        })
}

/// Writes the stream form of a value, without its type code.
pub(crate) fn write_value(value: &Value, writer: &mut Writer) -> Result<()> {
    match value {
        Value::Byte(v) => writer.u8(*v),
        Value::ByteArray(v) => writer.var_buf(v.as_slice())?,
        Value::Double(v) => writer.f64(*v),
        Value::Integer(v) => writer.i32(*v),
        Value::Long(v) => writer.i64(*v),
        Value::String(v) => writer.utf(v)?,
        Value::Marshal(v) => v.write_entries(writer)?,
    }
    Ok(())
}

/// Reads the stream form of a value whose type code was `code`.
pub(crate) fn read_value(
    code: u8,
    wire: WireType,
    reader: &mut Reader<'_>,
    mode: Option<CompatibilityMode>,
    depth: usize,
) -> Result<Value> {
    let value = match wire {
        WireType::Entry(EntryType::Byte) => Value::Byte(reader.u8()?),
        WireType::Entry(EntryType::ByteArray) => Value::ByteArray(ByteView::from(reader.var_buf()?)),
        WireType::Entry(EntryType::Double) => Value::Double(reader.f64()?),
        WireType::Entry(EntryType::Integer) => Value::Integer(reader.i32()?),
        WireType::Entry(EntryType::Long) => Value::Long(reader.i64()?),
        WireType::Entry(EntryType::String) => Value::String(reader.utf()?),
        WireType::Entry(EntryType::Marshal) => {
            Value::Marshal(Marshal::read_inner(reader, mode, depth + 1)?)
        }
        WireType::LegacyString => Value::String(reader.utf_u16()?),
        WireType::LegacyEmpty => return Err(MarshalError::InvalidTypeCode(code)),
    };
    Ok(value)
}
