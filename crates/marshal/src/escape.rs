//! Escaping and separator scanning for the comparable form.
//!
//! Entry data may contain any byte, including the separator. Inside entry
//! data the escape byte is written twice, so a single escape byte followed by
//! anything else (or by nothing) marks the end of an entry.

use marshal_buffers::ByteView;

/// Doubles every occurrence of `esc`.
///
/// Returns `input` itself, without copying, when it contains no `esc`.
///
/// # Example
///
/// ```
/// use marshal::escape::escape;
/// use marshal_buffers::ByteView;
///
/// let input = ByteView::from(vec![0, 1, 2, 3]);
/// assert_eq!(escape(&input, 2).as_slice(), &[0, 1, 2, 2, 3]);
/// assert!(escape(&input, 5).shares_buffer(&input));
/// ```
pub fn escape(input: &ByteView, esc: u8) -> ByteView {
    let bytes = input.as_slice();
    let count = bytes.iter().filter(|&&b| b == esc).count();
    if count == 0 {
        return input.clone();
    }
    let mut out = Vec::with_capacity(bytes.len() + count);
    for &b in bytes {
        if b == esc {
            out.push(esc);
        }
        out.push(b);
    }
    ByteView::from(out)
}

/// Collapses every doubled `esc` into one, scanning left to right.
///
/// An unmatched `esc` is copied through as is. Returns `input` itself when
/// there is nothing to collapse.
pub fn unescape(input: &ByteView, esc: u8) -> ByteView {
    let bytes = input.as_slice();
    let mut pairs = 0;
    let mut pending = false;
    for &b in bytes {
        if b == esc {
            if pending {
                pairs += 1;
            }
            pending = !pending;
        } else {
            pending = false;
        }
    }
    if pairs == 0 {
        return input.clone();
    }

    let mut out = Vec::with_capacity(bytes.len() - pairs);
    let mut pending = false;
    for &b in bytes {
        if b == esc {
            if !pending {
                out.push(b);
            }
            pending = !pending;
        } else {
            pending = false;
            out.push(b);
        }
    }
    ByteView::from(out)
}

/// Finds the first `esc` that is not half of a doubled pair.
///
/// A lone `esc` as the last byte counts as a separator. Returns
/// `bytes.len()` when there is no separator.
pub fn find_separator(bytes: &[u8], esc: u8) -> usize {
    let len = bytes.len();
    let mut i = 0;
    while i < len {
        if bytes[i] != esc {
            i += 1;
        } else if i + 1 < len && bytes[i + 1] == esc {
            i += 2;
        } else {
            return i;
        }
    }
    len
}
