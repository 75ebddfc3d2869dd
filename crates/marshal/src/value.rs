//! Typed values held by marshal entries.

use std::fmt;
use std::hash::{Hash, Hasher};

use marshal_buffers::{print_octets_default, ByteView};

use crate::{EntryType, Marshal};

/// A single typed value.
///
/// Doubles compare and hash by their bit pattern, so `NaN == NaN` and
/// `0.0 != -0.0`, matching how they are encoded.
#[derive(Debug, Clone)]
pub enum Value {
    Byte(u8),
    ByteArray(ByteView),
    Double(f64),
    Integer(i32),
    Long(i64),
    String(String),
    Marshal(Marshal),
}

impl Value {
    pub fn entry_type(&self) -> EntryType {
        match self {
            Value::Byte(_) => EntryType::Byte,
            Value::ByteArray(_) => EntryType::ByteArray,
            Value::Double(_) => EntryType::Double,
            Value::Integer(_) => EntryType::Integer,
            Value::Long(_) => EntryType::Long,
            Value::String(_) => EntryType::String,
            Value::Marshal(_) => EntryType::Marshal,
        }
    }

    pub fn as_byte(&self) -> Option<u8> {
        match self {
            Value::Byte(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_byte_array(&self) -> Option<&ByteView> {
        match self {
            Value::ByteArray(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_double(&self) -> Option<f64> {
        match self {
            Value::Double(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_integer(&self) -> Option<i32> {
        match self {
            Value::Integer(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_long(&self) -> Option<i64> {
        match self {
            Value::Long(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_marshal(&self) -> Option<&Marshal> {
        match self {
            Value::Marshal(v) => Some(v),
            _ => None,
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Byte(a), Value::Byte(b)) => a == b,
            (Value::ByteArray(a), Value::ByteArray(b)) => a == b,
            (Value::Double(a), Value::Double(b)) => a.to_bits() == b.to_bits(),
            (Value::Integer(a), Value::Integer(b)) => a == b,
            (Value::Long(a), Value::Long(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Marshal(a), Value::Marshal(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Value {}

impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.entry_type().hash(state);
        match self {
            Value::Byte(v) => v.hash(state),
            Value::ByteArray(v) => v.hash(state),
            Value::Double(v) => v.to_bits().hash(state),
            Value::Integer(v) => v.hash(state),
            Value::Long(v) => v.hash(state),
            Value::String(v) => v.hash(state),
            Value::Marshal(v) => v.hash(state),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Byte(v) => write!(f, "{v}"),
            Value::ByteArray(v) => f.write_str(&print_octets_default(v.as_slice())),
            Value::Double(v) => write!(f, "{v}"),
            Value::Integer(v) => write!(f, "{v}"),
            Value::Long(v) => write!(f, "{v}"),
            Value::String(v) => f.write_str(v),
            Value::Marshal(v) => write!(f, "{v}"),
        }
    }
}

impl From<u8> for Value {
    fn from(v: u8) -> Self {
        Value::Byte(v)
    }
}

impl From<ByteView> for Value {
    fn from(v: ByteView) -> Self {
        Value::ByteArray(v)
    }
}

impl From<Vec<u8>> for Value {
    fn from(v: Vec<u8>) -> Self {
        Value::ByteArray(ByteView::from(v))
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Double(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Integer(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Long(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_string())
    }
}

impl From<Marshal> for Value {
    fn from(v: Marshal) -> Self {
        Value::Marshal(v)
    }
}
