//! Byte slice comparison utilities.

use std::cmp::Ordering;

/// Compares two byte slices lexicographically by unsigned byte values.
///
/// A slice that is a strict prefix of the other sorts first.
///
/// # Example
///
/// ```
/// use std::cmp::Ordering;
/// use marshal_buffers::cmp_unsigned;
///
/// assert_eq!(cmp_unsigned(&[1, 2], &[1, 2, 3]), Ordering::Less);
/// assert_eq!(cmp_unsigned(&[1, 2, 3], &[1, 2]), Ordering::Greater);
/// assert_eq!(cmp_unsigned(&[1, 2, 3], &[1, 2, 3]), Ordering::Equal);
/// assert_eq!(cmp_unsigned(&[0x7F], &[0x80]), Ordering::Less);
/// ```
pub fn cmp_unsigned(a: &[u8], b: &[u8]) -> Ordering {
    for (x, y) in a.iter().zip(b.iter()) {
        match x.cmp(y) {
            Ordering::Equal => continue,
            other => return other,
        }
    }
    a.len().cmp(&b.len())
}
