//! Immutable, zero-copy views over shared byte buffers.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use crate::{cmp_unsigned, print_octets_default, BufferError};

/// An immutable view into a shared byte buffer.
///
/// Slicing a view never copies: the new view shares the backing storage and
/// only narrows `[begin, end)`. Views compare by content using unsigned
/// lexicographic order, so a view is a drop-in sort key.
///
/// # Example
///
/// ```
/// use marshal_buffers::ByteView;
///
/// let view = ByteView::from(vec![0, 1, 2, 3, 4]);
/// let middle = view.slice_from(1).unwrap().slice_to(3).unwrap();
///
/// assert_eq!(middle.as_slice(), &[1, 2, 3]);
/// assert!(middle.shares_buffer(&view));
/// assert!(ByteView::from(vec![1, 2]) < ByteView::from(vec![1, 2, 0]));
/// ```
#[derive(Clone)]
pub struct ByteView {
    buf: Arc<[u8]>,
    begin: usize,
    end: usize,
}

impl ByteView {
    /// Creates a view spanning the whole of `bytes`.
    pub fn new(bytes: impl Into<Arc<[u8]>>) -> Self {
        let buf = bytes.into();
        let end = buf.len();
        Self { buf, begin: 0, end }
    }

    /// Creates an empty view.
    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    /// Creates a view over `[begin, end)` of an existing shared buffer.
    pub fn from_parts(buf: Arc<[u8]>, begin: usize, end: usize) -> Result<Self, BufferError> {
        if begin > end || end > buf.len() {
            return Err(BufferError::InvalidRange {
                begin,
                end,
                len: buf.len(),
            });
        }
        Ok(Self { buf, begin, end })
    }

    /// Returns the number of bytes visible through this view.
    #[inline]
    pub fn len(&self) -> usize {
        self.end - self.begin
    }

    /// Returns `true` if the view contains no bytes.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.begin == self.end
    }

    /// Returns the visible bytes.
    #[inline]
    pub fn as_slice(&self) -> &[u8] {
        &self.buf[self.begin..self.end]
    }

    /// Returns the byte at `pos`.
    pub fn get(&self, pos: usize) -> Result<u8, BufferError> {
        self.as_slice()
            .get(pos)
            .copied()
            .ok_or(BufferError::IndexOutOfRange {
                index: pos,
                len: self.len(),
            })
    }

    /// Returns the first byte, if any.
    #[inline]
    pub fn first(&self) -> Option<u8> {
        self.as_slice().first().copied()
    }

    /// Returns a view starting at `pos`, sharing the same storage.
    ///
    /// `slice_from(0)` returns the view unchanged; `slice_from(len)` returns
    /// an empty view.
    pub fn slice_from(&self, pos: usize) -> Result<Self, BufferError> {
        if pos > self.len() {
            return Err(BufferError::IndexOutOfRange {
                index: pos,
                len: self.len(),
            });
        }
        if pos == 0 {
            return Ok(self.clone());
        }
        Ok(Self {
            buf: Arc::clone(&self.buf),
            begin: self.begin + pos,
            end: self.end,
        })
    }

    /// Returns a view ending just before `pos`, sharing the same storage.
    ///
    /// `slice_to(len)` returns the view unchanged.
    pub fn slice_to(&self, pos: usize) -> Result<Self, BufferError> {
        if pos > self.len() {
            return Err(BufferError::IndexOutOfRange {
                index: pos,
                len: self.len(),
            });
        }
        if pos == self.len() {
            return Ok(self.clone());
        }
        Ok(Self {
            buf: Arc::clone(&self.buf),
            begin: self.begin,
            end: self.begin + pos,
        })
    }

    /// Whether the view spans its entire backing buffer.
    #[inline]
    pub fn is_whole(&self) -> bool {
        self.begin == 0 && self.end == self.buf.len()
    }

    /// Whether both views are backed by the same allocation.
    pub fn shares_buffer(&self, other: &ByteView) -> bool {
        Arc::ptr_eq(&self.buf, &other.buf)
    }

    /// Returns the visible bytes as a shared buffer.
    ///
    /// No copy is made when the view already spans its whole buffer.
    pub fn to_shared(&self) -> Arc<[u8]> {
        if self.is_whole() {
            Arc::clone(&self.buf)
        } else {
            Arc::from(self.as_slice())
        }
    }

    /// Copies the visible bytes into a new vector.
    pub fn to_vec(&self) -> Vec<u8> {
        self.as_slice().to_vec()
    }

    /// Concatenates `other` after this view into a new buffer.
    ///
    /// When either side is empty the other is returned without copying.
    pub fn append(&self, other: &ByteView) -> ByteView {
        if self.is_empty() {
            return other.clone();
        }
        if other.is_empty() {
            return self.clone();
        }
        let mut combined = Vec::with_capacity(self.len() + other.len());
        combined.extend_from_slice(self.as_slice());
        combined.extend_from_slice(other.as_slice());
        ByteView::from(combined)
    }

    /// Concatenates all `parts`, in order, into a single view.
    ///
    /// Zero parts yield an empty view and a single part is returned as is.
    pub fn combine<'a, I>(parts: I) -> ByteView
    where
        I: IntoIterator<Item = &'a ByteView>,
    {
        let parts: Vec<&ByteView> = parts.into_iter().collect();
        match parts.as_slice() {
            [] => ByteView::empty(),
            [single] => (*single).clone(),
            _ => {
                let total = parts.iter().map(|p| p.len()).sum();
                let mut combined = Vec::with_capacity(total);
                for part in parts {
                    combined.extend_from_slice(part.as_slice());
                }
                ByteView::from(combined)
            }
        }
    }
}

impl Default for ByteView {
    fn default() -> Self {
        Self::empty()
    }
}

impl From<Vec<u8>> for ByteView {
    fn from(bytes: Vec<u8>) -> Self {
        Self::new(bytes)
    }
}

impl From<&[u8]> for ByteView {
    fn from(bytes: &[u8]) -> Self {
        Self::new(bytes)
    }
}

impl<const N: usize> From<[u8; N]> for ByteView {
    fn from(bytes: [u8; N]) -> Self {
        Self::new(bytes.to_vec())
    }
}

impl From<Arc<[u8]>> for ByteView {
    fn from(buf: Arc<[u8]>) -> Self {
        Self::new(buf)
    }
}

impl AsRef<[u8]> for ByteView {
    fn as_ref(&self) -> &[u8] {
        self.as_slice()
    }
}

impl PartialEq for ByteView {
    fn eq(&self, other: &Self) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl Eq for ByteView {}

impl PartialEq<[u8]> for ByteView {
    fn eq(&self, other: &[u8]) -> bool {
        self.as_slice() == other
    }
}

impl PartialEq<Vec<u8>> for ByteView {
    fn eq(&self, other: &Vec<u8>) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl Hash for ByteView {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_slice().hash(state);
    }
}

impl PartialOrd for ByteView {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ByteView {
    fn cmp(&self, other: &Self) -> Ordering {
        if self.is_whole() && other.is_whole() {
            // Whole buffers: slice ordering is already unsigned lexicographic.
            return self.buf.as_ref().cmp(other.buf.as_ref());
        }
        cmp_unsigned(self.as_slice(), other.as_slice())
    }
}

impl fmt::Debug for ByteView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ByteView[{}]", print_octets_default(self.as_slice()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slice_from_and_to_share_storage() {
        let view = ByteView::from(vec![0, 1, 2, 3, 4, 5]);
        let tail = view.slice_from(2).unwrap();
        let mid = tail.slice_to(2).unwrap();
        assert_eq!(tail.as_slice(), &[2, 3, 4, 5]);
        assert_eq!(mid.as_slice(), &[2, 3]);
        assert!(mid.shares_buffer(&view));
        assert!(!mid.is_whole());
    }

    #[test]
    fn test_slice_noop_bounds() {
        let view = ByteView::from(vec![1, 2, 3]);
        assert!(view.slice_from(0).unwrap().is_whole());
        assert!(view.slice_to(3).unwrap().is_whole());
        assert!(view.slice_from(3).unwrap().is_empty());
        assert!(view.slice_to(0).unwrap().is_empty());
    }

    #[test]
    fn test_slice_out_of_range() {
        let view = ByteView::from(vec![1, 2, 3]);
        assert_eq!(
            view.slice_from(4),
            Err(BufferError::IndexOutOfRange { index: 4, len: 3 })
        );
        assert_eq!(
            view.slice_to(4),
            Err(BufferError::IndexOutOfRange { index: 4, len: 3 })
        );
        assert_eq!(
            view.get(3),
            Err(BufferError::IndexOutOfRange { index: 3, len: 3 })
        );
    }

    #[test]
    fn test_from_parts_validates_range() {
        let buf: Arc<[u8]> = Arc::from(vec![1u8, 2, 3]);
        assert!(ByteView::from_parts(Arc::clone(&buf), 1, 3).is_ok());
        assert_eq!(
            ByteView::from_parts(Arc::clone(&buf), 2, 1),
            Err(BufferError::InvalidRange {
                begin: 2,
                end: 1,
                len: 3
            })
        );
        assert!(ByteView::from_parts(buf, 0, 4).is_err());
    }

    #[test]
    fn test_to_shared_copies_only_partial_views() {
        let view = ByteView::from(vec![1, 2, 3]);
        let whole = view.to_shared();
        assert!(ByteView::new(Arc::clone(&whole)).shares_buffer(&view));

        let partial = view.slice_from(1).unwrap().to_shared();
        assert_eq!(&*partial, &[2, 3]);
        assert!(!ByteView::new(partial).shares_buffer(&view));
    }

    #[test]
    fn test_append_short_circuits_on_empty() {
        let a = ByteView::from(vec![1, 2]);
        let empty = ByteView::empty();
        assert!(a.append(&empty).shares_buffer(&a));
        assert!(empty.append(&a).shares_buffer(&a));
        assert_eq!(a.append(&a).as_slice(), &[1, 2, 1, 2]);
    }

    #[test]
    fn test_combine() {
        let a = ByteView::from(vec![1]);
        let b = ByteView::from(vec![2, 3]);
        let c = ByteView::from(vec![4, 5, 6]).slice_from(1).unwrap();
        assert_eq!(ByteView::combine([&a, &b, &c]).as_slice(), &[1, 2, 3, 5, 6]);
        assert!(ByteView::combine([&b]).shares_buffer(&b));
        assert!(ByteView::combine(std::iter::empty()).is_empty());
    }

    #[test]
    fn test_ordering_honors_offsets() {
        let backing = ByteView::from(vec![9, 1, 2, 0xFE]);
        let sub = backing.slice_from(1).unwrap();
        assert_eq!(sub.cmp(&ByteView::from(vec![1, 2, 0xFE])), Ordering::Equal);
        assert_eq!(sub.cmp(&ByteView::from(vec![1, 2, 0x7F])), Ordering::Greater);
        assert_eq!(sub.cmp(&ByteView::from(vec![1, 2, 0xFE, 0])), Ordering::Less);
    }

    #[test]
    fn test_debug_prints_hex() {
        let view = ByteView::from(vec![0x05, 0xFE]);
        assert_eq!(format!("{:?}", view), "ByteView[05 fe]");
    }
}
