use crate::error::XdrError;

use super::codec::{ReadXdr, WriteXdr};

/// Every XDR item occupies at least one 4-byte unit, so a sequence count
/// can be checked against the remaining input before allocating.
const MIN_ITEM_LEN: usize = 4;

// ==============================================================================
// Decode Limits
// ==============================================================================

/// Configurable bounds applied while decoding untrusted input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeLimits {
    pub max_input_len: usize,
    pub max_array_len: usize,
}

impl DecodeLimits {
    /// No bounds beyond the input itself.
    pub const fn none() -> Self {
        Self {
            max_input_len: usize::MAX,
            max_array_len: usize::MAX,
        }
    }

    /// Longest padded base64 text that can decode to at most
    /// `max_input_len` bytes.
    pub const fn max_encoded_len(&self) -> usize {
        self.max_input_len.div_ceil(3).saturating_mul(4)
    }
}

impl Default for DecodeLimits {
    fn default() -> Self {
        Self {
            max_input_len: 1024 * 1024,
            max_array_len: 10_000,
        }
    }
}

// ==============================================================================
// Reader
// ==============================================================================

/// A forward-only cursor over an in-memory XDR buffer.
///
/// The cursor never rewinds. After an error its position is unspecified and
/// the reader should be dropped.
#[derive(Debug)]
pub struct XdrReader<'a> {
    buf: &'a [u8],
    pos: usize,
    limits: DecodeLimits,
}

impl<'a> XdrReader<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        Self {
            buf,
            pos: 0,
            limits: DecodeLimits::none(),
        }
    }

    pub fn with_limits(buf: &'a [u8], limits: DecodeLimits) -> Result<Self, XdrError> {
        if buf.len() > limits.max_input_len {
            return Err(XdrError::Malformed(format!(
                "input of {} bytes exceeds limit of {}",
                buf.len(),
                limits.max_input_len
            )));
        }
        Ok(Self {
            buf,
            pos: 0,
            limits,
        })
    }

    pub fn limits(&self) -> DecodeLimits {
        self.limits
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    /// Consume exactly `n` raw bytes.
    pub fn read_bytes(&mut self, n: usize) -> Result<&'a [u8], XdrError> {
        let remaining = self.remaining();
        if n > remaining {
            return Err(XdrError::Truncated {
                needed: n,
                remaining,
            });
        }
        let bytes = &self.buf[self.pos..self.pos + n];
        self.pos += n;
        Ok(bytes)
    }

    pub fn read_array<const N: usize>(&mut self) -> Result<[u8; N], XdrError> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.read_bytes(N)?);
        Ok(out)
    }

    /// Read a sequence count and check it against the limits and the bytes
    /// left in the buffer.
    pub fn read_count(&mut self) -> Result<usize, XdrError> {
        let count = u32::read_xdr(self)? as usize;
        if count > self.limits.max_array_len {
            return Err(XdrError::Malformed(format!(
                "sequence of {count} elements exceeds limit of {}",
                self.limits.max_array_len
            )));
        }
        let needed = count.saturating_mul(MIN_ITEM_LEN);
        let remaining = self.remaining();
        if needed > remaining {
            return Err(XdrError::Truncated { needed, remaining });
        }
        Ok(count)
    }

    pub fn decode<T: ReadXdr>(&mut self) -> Result<T, XdrError> {
        T::read_xdr(self)
    }

    /// Decode a count-prefixed sequence, preserving wire order.
    pub fn decode_array<T: ReadXdr>(&mut self) -> Result<Vec<T>, XdrError> {
        let count = self.read_count()?;
        let mut items = Vec::with_capacity(count);
        for _ in 0..count {
            items.push(T::read_xdr(self)?);
        }
        Ok(items)
    }
}

// ==============================================================================
// Writer
// ==============================================================================

/// An append-only XDR output buffer.
#[derive(Debug, Default)]
pub struct XdrWriter {
    buf: Vec<u8>,
}

impl XdrWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: Vec::with_capacity(capacity),
        }
    }

    pub fn write_bytes(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
    }

    pub fn encode<T: WriteXdr + ?Sized>(&mut self, value: &T) -> Result<(), XdrError> {
        value.write_xdr(self)
    }

    /// Write the element count, then each element in order.
    pub fn encode_array<T: WriteXdr>(&mut self, items: &[T]) -> Result<(), XdrError> {
        let count = u32::try_from(items.len()).map_err(|_| {
            XdrError::Malformed(format!(
                "sequence of {} elements does not fit a 4-byte count",
                items.len()
            ))
        })?;
        count.write_xdr(self)?;
        items.iter().try_for_each(|item| item.write_xdr(self))
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn into_inner(self) -> Vec<u8> {
        self.buf
    }
}
