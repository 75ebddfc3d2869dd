//! The byte-comparable form.
//!
//! ```text
//! empty:      FE                          (FF accepted on read)
//! non-empty:  <code><escaped data> FE {<code><escaped data> FE}*
//! ```
//!
//! Older writers left out the final separator; the reader accepts both.

use marshal_buffers::ByteView;

use crate::entry_type::{WireType, LEGACY_EMPTY_CODE, SEPARATOR};
use crate::escape::{escape, find_separator, unescape};
use crate::{CompatibilityMode, DecodeOptions, Entry, Marshal, MarshalError, Result};

impl Marshal {
    /// Encodes the marshal so that byte order matches marshal order.
    pub fn to_comparable_bytes(&self) -> ByteView {
        if self.is_empty() {
            return ByteView::from([SEPARATOR]);
        }
        ByteView::from(self.encode_prefix(self.len(), true))
    }

    /// [`Marshal::to_comparable_bytes`] as an owned vector.
    pub fn to_bytes(&self) -> Vec<u8> {
        self.to_comparable_bytes().to_vec()
    }

    /// Encodes the first `n` entries without a trailing separator.
    ///
    /// The result is a byte prefix of the comparable form of every marshal
    /// that starts with the same `n` entries, including marshals whose
    /// `n`-th entry merely starts with the same bytes.
    pub fn prefix_unterminated(&self, n: usize) -> Result<ByteView> {
        self.check_prefix(n)?;
        Ok(ByteView::from(self.encode_prefix(n, false)))
    }

    /// Encodes the first `n` entries followed by a separator.
    ///
    /// Unlike [`Marshal::prefix_unterminated`], this only prefixes marshals
    /// whose first `n` entries are exactly equal to these.
    pub fn prefix_terminated(&self, n: usize) -> Result<ByteView> {
        self.check_prefix(n)?;
        Ok(ByteView::from(self.encode_prefix(n, true)))
    }

    pub fn prefix_unterminated_bytes(&self, n: usize) -> Result<Vec<u8>> {
        self.prefix_unterminated(n).map(|view| view.to_vec())
    }

    pub fn prefix_terminated_bytes(&self, n: usize) -> Result<Vec<u8>> {
        self.prefix_terminated(n).map(|view| view.to_vec())
    }

    fn check_prefix(&self, n: usize) -> Result<()> {
        if n > self.len() {
            return Err(MarshalError::IndexOutOfRange {
                index: n,
                len: self.len(),
            });
        }
        Ok(())
    }

    fn encode_prefix(&self, n: usize, terminated: bool) -> Vec<u8> {
        let entries = &self.entries()[..n];
        let mut out = Vec::with_capacity(entries.iter().map(|e| e.data().len() + 2).sum());
        for (i, entry) in entries.iter().enumerate() {
            if i > 0 {
                out.push(SEPARATOR);
            }
            out.push(entry.entry_type().code());
            out.extend_from_slice(escape(entry.data(), SEPARATOR).as_slice());
        }
        if terminated && n > 0 {
            out.push(SEPARATOR);
        }
        out
    }

    /// Decodes the comparable form.
    ///
    /// # Example
    ///
    /// ```
    /// use marshal::Marshal;
    ///
    /// // Written without the final separator by an older version.
    /// let m = Marshal::from_comparable_bytes(b"\x05a\xfe\x05cat".as_slice()).unwrap();
    /// assert_eq!(m.to_string(), "[{STRING-a}, {STRING-cat}]");
    ///
    /// assert!(Marshal::from_comparable_bytes(vec![0xFDu8]).is_err());
    /// ```
    pub fn from_comparable_bytes(bytes: impl Into<ByteView>) -> Result<Marshal> {
        Self::decode_view(bytes.into(), None)
    }

    /// Decodes the comparable form, remapping type codes through `mode`.
    pub fn from_comparable_bytes_with_mode(
        bytes: impl Into<ByteView>,
        mode: CompatibilityMode,
    ) -> Result<Marshal> {
        Self::decode_view(bytes.into(), Some(mode))
    }

    /// Decodes the comparable form with the given options.
    pub fn decode_with(bytes: impl Into<ByteView>, options: &DecodeOptions) -> Result<Marshal> {
        Self::decode_view(bytes.into(), options.mode())
    }

    pub(crate) fn decode_view(bytes: ByteView, mode: Option<CompatibilityMode>) -> Result<Marshal> {
        tracing::trace!(len = bytes.len(), ?mode, "decoding comparable form");
        match bytes.first() {
            None | Some(SEPARATOR) => return Ok(Marshal::empty()),
            Some(LEGACY_EMPTY_CODE) => {
                tracing::debug!("legacy empty marker");
                return Ok(Marshal::empty());
            }
            Some(_) => {}
        }

        let mut entries = Vec::new();
        let mut rest = bytes;
        loop {
            let code = rest.get(0)?;
            let entry_type = match WireType::resolve(code, mode)? {
                WireType::LegacyEmpty if entries.is_empty() => {
                    tracing::debug!(code, ?mode, "remapped empty marker");
                    return Ok(Marshal::empty());
                }
                wire => wire.entry_type(code)?,
            };
            rest = rest.slice_from(1)?;

            let pos = find_separator(rest.as_slice(), SEPARATOR);
            let raw = unescape(&rest.slice_to(pos)?, SEPARATOR);
            tracing::trace!(%entry_type, len = raw.len(), "framed entry");
            entries.push(Entry::from_raw(entry_type, raw, mode)?);

            if pos == rest.len() {
                tracing::debug!(entries = entries.len(), "no trailing separator");
                break;
            }
            if pos + 1 == rest.len() {
                break;
            }
            rest = rest.slice_from(pos + 1)?;
        }
        Ok(Marshal::from_entries(entries))
    }
}
