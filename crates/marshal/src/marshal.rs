//! The marshal container and its builder.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use marshal_buffers::ByteView;
use once_cell::sync::Lazy;
use xxhash_rust::xxh3::xxh3_64;

use crate::{Entry, EntryType, MarshalError, Result, Value};

static EMPTY: Lazy<Marshal> = Lazy::new(|| Marshal::with_entries(Vec::new()));

/// An immutable, ordered sequence of typed entries.
///
/// Cloning is cheap: entries live behind an `Arc` and a marshal is a view
/// over a range of them, so [`Marshal::subrange`] never copies.
///
/// # Example
///
/// ```
/// use marshal::{EntryType, Marshal};
///
/// let m = Marshal::builder()
///     .add_string("kitty")
///     .add_integer(3)
///     .build();
///
/// let bytes = m.to_comparable_bytes();
/// assert_eq!(bytes.as_slice(), b"\x05kitty\xfe\x03\x00\x00\x00\x03\xfe");
///
/// let decoded = Marshal::from_comparable_bytes(bytes).unwrap();
/// assert_eq!(decoded, m);
/// assert_eq!(decoded.type_at(1).unwrap(), EntryType::Integer);
/// assert_eq!(decoded.string_at(0).unwrap(), "kitty");
/// ```
#[derive(Clone)]
pub struct Marshal {
    entries: Arc<[Entry]>,
    begin: usize,
    end: usize,
}

impl Marshal {
    fn with_entries(entries: Vec<Entry>) -> Self {
        let end = entries.len();
        Self {
            entries: Arc::from(entries),
            begin: 0,
            end,
        }
    }

    /// Wraps `entries`, sharing the empty singleton when there are none.
    pub(crate) fn from_entries(entries: Vec<Entry>) -> Self {
        if entries.is_empty() {
            return Self::empty();
        }
        Self::with_entries(entries)
    }

    /// Returns the shared empty marshal.
    pub fn empty() -> Self {
        EMPTY.clone()
    }

    pub fn builder() -> Builder {
        Builder::new()
    }

    /// Returns a builder seeded with this marshal's entries.
    pub fn to_builder(&self) -> Builder {
        Builder {
            entries: self.entries().to_vec(),
        }
    }

    /// Whether both marshals are the same view of the same storage.
    pub fn ptr_eq(a: &Marshal, b: &Marshal) -> bool {
        Arc::ptr_eq(&a.entries, &b.entries) && a.begin == b.begin && a.end == b.end
    }

    pub fn len(&self) -> usize {
        self.end - self.begin
    }

    pub fn is_empty(&self) -> bool {
        self.begin == self.end
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries[self.begin..self.end]
    }

    /// Iterates over the entries in order.
    pub fn iter(&self) -> std::slice::Iter<'_, Entry> {
        self.entries().iter()
    }

    /// Iterates over the decoded values in order.
    pub fn values(&self) -> impl Iterator<Item = Result<&Value>> + '_ {
        self.iter().map(Entry::value)
    }

    pub fn entry(&self, index: usize) -> Result<&Entry> {
        self.entries()
            .get(index)
            .ok_or(MarshalError::IndexOutOfRange {
                index,
                len: self.len(),
            })
    }

    pub fn type_at(&self, index: usize) -> Result<EntryType> {
        self.entry(index).map(Entry::entry_type)
    }

    /// Returns the value at `index`, whatever its type.
    pub fn get(&self, index: usize) -> Result<&Value> {
        self.entry(index)?.value()
    }

    fn typed<'a, T>(
        &'a self,
        index: usize,
        expected: EntryType,
        pick: impl FnOnce(&'a Value) -> Option<T>,
    ) -> Result<T> {
        let entry = self.entry(index)?;
        let actual = entry.entry_type();
        let mismatch = MarshalError::TypeMismatch {
            index,
            expected,
            actual,
        };
        if actual != expected {
            return Err(mismatch);
        }
        pick(entry.value()?).ok_or(mismatch)
    }

    pub fn byte_at(&self, index: usize) -> Result<u8> {
        self.typed(index, EntryType::Byte, Value::as_byte)
    }

    pub fn byte_array_at(&self, index: usize) -> Result<&ByteView> {
        self.typed(index, EntryType::ByteArray, Value::as_byte_array)
    }

    pub fn double_at(&self, index: usize) -> Result<f64> {
        self.typed(index, EntryType::Double, Value::as_double)
    }

    pub fn integer_at(&self, index: usize) -> Result<i32> {
        self.typed(index, EntryType::Integer, Value::as_integer)
    }

    pub fn long_at(&self, index: usize) -> Result<i64> {
        self.typed(index, EntryType::Long, Value::as_long)
    }

    pub fn string_at(&self, index: usize) -> Result<&str> {
        self.typed(index, EntryType::String, Value::as_str)
    }

    pub fn marshal_at(&self, index: usize) -> Result<&Marshal> {
        self.typed(index, EntryType::Marshal, Value::as_marshal)
    }

    /// Returns the entries in `[from, to)` as a new marshal sharing this
    /// one's storage.
    pub fn subrange(&self, from: usize, to: usize) -> Result<Marshal> {
        let len = self.len();
        if to > len {
            return Err(MarshalError::IndexOutOfRange { index: to, len });
        }
        if from > to {
            return Err(MarshalError::IndexOutOfRange { index: from, len });
        }
        if from == to {
            return Ok(Self::empty());
        }
        Ok(Self {
            entries: Arc::clone(&self.entries),
            begin: self.begin + from,
            end: self.begin + to,
        })
    }

    /// Entries from `index` to the end.
    pub fn from_index(&self, index: usize) -> Result<Marshal> {
        self.subrange(index, self.len())
    }

    /// Entries before `index`.
    pub fn to_index(&self, index: usize) -> Result<Marshal> {
        self.subrange(0, index)
    }

    /// A 64-bit hash of the comparable form.
    ///
    /// The value is xxh3-64 (seed 0) over [`Marshal::to_comparable_bytes`]
    /// and is part of the format: it is the same on every platform, in every
    /// process and across releases, so it may be stored.
    pub fn stable_hash(&self) -> u64 {
        xxh3_64(self.to_comparable_bytes().as_slice())
    }
}

impl Default for Marshal {
    fn default() -> Self {
        Self::empty()
    }
}

impl PartialEq for Marshal {
    fn eq(&self, other: &Self) -> bool {
        Marshal::ptr_eq(self, other) || self.entries() == other.entries()
    }
}

impl Eq for Marshal {}

impl Hash for Marshal {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_usize(self.len());
        for entry in self.entries() {
            entry.hash(state);
        }
    }
}

impl PartialOrd for Marshal {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Marshals order by their comparable form.
///
/// The empty string and `"\0"` share the encoding `[0x00]`, so marshals that
/// differ only there compare `Equal` while `==` is false. A `BTreeSet` or
/// `BTreeMap` keyed by `Marshal` keeps just one of them.
impl Ord for Marshal {
    fn cmp(&self, other: &Self) -> Ordering {
        if Marshal::ptr_eq(self, other) {
            return Ordering::Equal;
        }
        self.to_comparable_bytes().cmp(&other.to_comparable_bytes())
    }
}

impl fmt::Display for Marshal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, entry) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{entry}")?;
        }
        f.write_str("]")
    }
}

impl fmt::Debug for Marshal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<'a> IntoIterator for &'a Marshal {
    type Item = &'a Entry;
    type IntoIter = std::slice::Iter<'a, Entry>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl FromIterator<Value> for Marshal {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        iter.into_iter().fold(Builder::new(), Builder::add).build()
    }
}

/// Accumulates entries for a new [`Marshal`].
///
/// `add_marshal` nests a marshal as a single entry; `append_marshal` splices
/// its entries in.
///
/// # Example
///
/// ```
/// use marshal::Marshal;
///
/// let inner = Marshal::builder().add_long(7).build();
/// let nested = Marshal::builder().add_marshal(inner.clone()).build();
/// let spliced = Marshal::builder().append_marshal(&inner).build();
///
/// assert_eq!(nested.len(), 1);
/// assert_eq!(nested.marshal_at(0).unwrap(), &inner);
/// assert_eq!(spliced, inner);
/// ```
#[derive(Debug, Default, Clone)]
pub struct Builder {
    entries: Vec<Entry>,
}

impl Builder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn add(mut self, value: impl Into<Value>) -> Self {
        let value = value.into();
        if matches!(&value, Value::ByteArray(bytes) if bytes.is_empty()) {
            // encodes to nothing, which no decoder accepts
            tracing::warn!(
                index = self.entries.len(),
                "empty byte array added; the comparable form will not decode"
            );
        }
        self.entries.push(Entry::new(value));
        self
    }

    /// Adds `value`, rejecting a missing one.
    pub fn try_add(self, value: Option<Value>) -> Result<Self> {
        match value {
            Some(value) => Ok(self.add(value)),
            None => Err(MarshalError::NullArgument("value")),
        }
    }

    pub fn add_byte(self, b: u8) -> Self {
        self.add(Value::Byte(b))
    }

    pub fn add_byte_array(self, bytes: impl Into<ByteView>) -> Self {
        self.add(Value::ByteArray(bytes.into()))
    }

    pub fn add_double(self, d: f64) -> Self {
        self.add(Value::Double(d))
    }

    pub fn add_integer(self, i: i32) -> Self {
        self.add(Value::Integer(i))
    }

    pub fn add_long(self, l: i64) -> Self {
        self.add(Value::Long(l))
    }

    pub fn add_string(self, s: impl Into<String>) -> Self {
        self.add(Value::String(s.into()))
    }

    pub fn add_marshal(self, m: Marshal) -> Self {
        self.add(Value::Marshal(m))
    }

    /// Appends every entry of `m`.
    pub fn append_marshal(mut self, m: &Marshal) -> Self {
        self.entries.extend(m.iter().cloned());
        self
    }

    /// Returns the shared empty marshal when nothing was added.
    pub fn build(self) -> Marshal {
        Marshal::from_entries(self.entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn sample() -> Marshal {
        Marshal::builder()
            .add_byte_array(vec![0u8, 1, 2, 3, 4, 5])
            .add_double(-3.14)
            .add_integer(22)
            .add_long(123456789012345678)
            .add_string(" Thë quíck bröwn fox jùmps over the lazy dog! ")
            .add_byte(0x80)
            .add_marshal(Marshal::empty())
            .build()
    }

    #[test]
    fn typed_getters() {
        let m = sample();
        assert_eq!(m.len(), 7);
        assert_eq!(m.byte_array_at(0).unwrap().as_slice(), &[0, 1, 2, 3, 4, 5]);
        assert_eq!(m.double_at(1).unwrap(), -3.14);
        assert_eq!(m.integer_at(2).unwrap(), 22);
        assert_eq!(m.long_at(3).unwrap(), 123456789012345678);
        assert_eq!(
            m.string_at(4).unwrap(),
            " Thë quíck bröwn fox jùmps over the lazy dog! "
        );
        assert_eq!(m.byte_at(5).unwrap(), 0x80);
        assert!(Marshal::ptr_eq(m.marshal_at(6).unwrap(), &Marshal::empty()));
    }

    #[test]
    fn type_mismatch() {
        let m = Marshal::builder().add_integer(22).build();
        for err in [
            m.byte_at(0).err(),
            m.long_at(0).err(),
            m.string_at(0).err(),
        ] {
            assert!(matches!(
                err,
                Some(MarshalError::TypeMismatch {
                    index: 0,
                    actual: EntryType::Integer,
                    ..
                })
            ));
        }
        assert_eq!(
            m.double_at(0),
            Err(MarshalError::TypeMismatch {
                index: 0,
                expected: EntryType::Double,
                actual: EntryType::Integer,
            })
        );
    }

    #[test]
    fn index_out_of_range() {
        let m = Marshal::builder().add_integer(22).build();
        assert_eq!(
            m.integer_at(1),
            Err(MarshalError::IndexOutOfRange { index: 1, len: 1 })
        );
        assert!(m.type_at(3).is_err());
    }

    #[test]
    fn empty_build_is_singleton() {
        let a = Marshal::builder().build();
        assert!(Marshal::ptr_eq(&a, &Marshal::empty()));
        assert!(a.is_empty());
        assert_eq!(a.to_string(), "[]");
        let b: Marshal = std::iter::empty::<Value>().collect();
        assert!(Marshal::ptr_eq(&b, &Marshal::empty()));
    }

    #[test]
    fn nul_string_orders_equal_to_empty() {
        let empty = Marshal::builder().add_string("").build();
        let nul = Marshal::builder().add_string("\0").build();
        assert_ne!(empty, nul);
        assert_eq!(empty.cmp(&nul), Ordering::Equal);
    }

    #[test]
    fn subrange_shares_storage() {
        let m = sample();
        let mid = m.subrange(1, 3).unwrap();
        assert_eq!(mid.len(), 2);
        assert_eq!(mid.double_at(0).unwrap(), -3.14);
        assert_eq!(mid.integer_at(1).unwrap(), 22);
        assert!(Arc::ptr_eq(&mid.entries, &m.entries));

        assert_eq!(m.from_index(5).unwrap().len(), 2);
        assert_eq!(m.to_index(2).unwrap(), m.subrange(0, 2).unwrap());
        assert!(m.from_index(7).unwrap().is_empty());
        assert_eq!(
            m.subrange(3, 2).err(),
            Some(MarshalError::IndexOutOfRange { index: 3, len: 7 })
        );
        assert_eq!(
            m.to_index(8).err(),
            Some(MarshalError::IndexOutOfRange { index: 8, len: 7 })
        );
    }

    #[test]
    fn to_builder_and_append() {
        let m = Marshal::builder().add_string("a").build();
        let longer = m.to_builder().add_integer(3).build();
        assert_eq!(longer.to_string(), "[{STRING-a}, {INTEGER-3}]");
        let twice = Marshal::builder()
            .append_marshal(&longer)
            .append_marshal(&longer.to_index(1).unwrap())
            .build();
        assert_eq!(twice.len(), 3);
        assert_eq!(twice.string_at(2).unwrap(), "a");
    }

    #[test]
    fn try_add_rejects_none() {
        assert!(Marshal::builder().try_add(Some(Value::from(1))).is_ok());
        assert_eq!(
            Marshal::builder().try_add(None).err(),
            Some(MarshalError::NullArgument("value"))
        );
    }

    #[test]
    fn equal_marshals_hash_alike() {
        let mut set = HashSet::new();
        set.insert(sample());
        set.insert(sample());
        set.insert(sample().to_index(6).unwrap());
        assert_eq!(set.len(), 2);
        assert_eq!(sample().stable_hash(), sample().stable_hash());
    }

    #[test]
    fn shared_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Marshal>();
        assert_send_sync::<Entry>();
        assert_send_sync::<Builder>();
    }
}
