//! Marshal entries with lazily decoded values.

use std::fmt;
use std::hash::{Hash, Hasher};

use marshal_buffers::ByteView;
use once_cell::sync::OnceCell;

use crate::codec::{demarshal_value, marshal_value};
use crate::{CompatibilityMode, EntryType, MarshalError, Result, Value};

/// One typed value inside a [`Marshal`](crate::Marshal).
///
/// Entries built from values keep the value and encode it on first use.
/// Entries decoded from the comparable form keep the unescaped bytes and
/// decode them on first typed access. Either way the derived half is
/// computed at most once per clone and never changes afterwards.
#[derive(Clone)]
pub struct Entry {
    repr: Repr,
}

#[derive(Clone)]
enum Repr {
    Value {
        value: Value,
        data: OnceCell<ByteView>,
    },
    Raw {
        entry_type: EntryType,
        raw: ByteView,
        mode: Option<CompatibilityMode>,
        value: OnceCell<Value>,
        data: OnceCell<ByteView>,
    },
}

impl Entry {
    pub fn new(value: Value) -> Self {
        Self {
            repr: Repr::Value {
                value,
                data: OnceCell::new(),
            },
        }
    }

    /// Wraps unescaped comparable bytes read for `entry_type`.
    pub(crate) fn from_raw(
        entry_type: EntryType,
        raw: ByteView,
        mode: Option<CompatibilityMode>,
    ) -> Result<Self> {
        if raw.is_empty() {
            return Err(MarshalError::EmptyEntryData);
        }
        Ok(Self {
            repr: Repr::Raw {
                entry_type,
                raw,
                mode,
                value: OnceCell::new(),
                data: OnceCell::new(),
            },
        })
    }

    pub fn entry_type(&self) -> EntryType {
        match &self.repr {
            Repr::Value { value, .. } => value.entry_type(),
            Repr::Raw { entry_type, .. } => *entry_type,
        }
    }

    /// Returns the value, decoding it on first access.
    pub fn value(&self) -> Result<&Value> {
        match &self.repr {
            Repr::Value { value, .. } => Ok(value),
            Repr::Raw {
                entry_type,
                raw,
                mode,
                value,
                ..
            } => value.get_or_try_init(|| {
                tracing::trace!(%entry_type, len = raw.len(), "decoding entry");
                demarshal_value(*entry_type, raw, *mode)
            }),
        }
    }

    /// Returns the comparable form of the value, before escaping.
    ///
    /// Nested marshals read through a compatibility mode are re-encoded so
    /// that only current type codes are ever written back out.
    pub fn data(&self) -> &ByteView {
        match &self.repr {
            Repr::Value { value, data } => data.get_or_init(|| marshal_value(value)),
            Repr::Raw {
                entry_type: EntryType::Marshal,
                raw,
                data,
                ..
            } => data.get_or_init(|| match self.value() {
                Ok(value) => marshal_value(value),
                Err(_) => raw.clone(),
            }),
            Repr::Raw { raw, .. } => raw,
        }
    }

    /// Consumes the entry, returning its value.
    pub fn into_value(self) -> Result<Value> {
        match self.repr {
            Repr::Value { value, .. } => Ok(value),
            Repr::Raw {
                entry_type,
                raw,
                mode,
                mut value,
                ..
            } => match value.take() {
                Some(value) => Ok(value),
                None => demarshal_value(entry_type, &raw, mode),
            },
        }
    }
}

impl From<Value> for Entry {
    fn from(value: Value) -> Self {
        Entry::new(value)
    }
}

impl PartialEq for Entry {
    fn eq(&self, other: &Self) -> bool {
        if self.entry_type() != other.entry_type() {
            return false;
        }
        match (self.value(), other.value()) {
            (Ok(a), Ok(b)) => a == b,
            (Err(_), Err(_)) => self.data() == other.data(),
            _ => false,
        }
    }
}

impl Eq for Entry {}

impl Hash for Entry {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match self.value() {
            Ok(value) => value.hash(state),
            Err(_) => {
                self.entry_type().hash(state);
                self.data().hash(state);
            }
        }
    }
}

impl fmt::Display for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.value() {
            Ok(value) => write!(f, "{{{}-{}}}", self.entry_type(), value),
            Err(_) => f.write_str("{ INVALID }"),
        }
    }
}

impl fmt::Debug for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = f.debug_struct("Entry");
        s.field("type", &self.entry_type());
        match self.value() {
            Ok(value) => s.field("value", value),
            Err(err) => s.field("error", &err),
        };
        s.finish()
    }
}
