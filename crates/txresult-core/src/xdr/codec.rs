use base64::Engine as _;

use crate::error::XdrError;

use super::cursor::{DecodeLimits, XdrReader, XdrWriter};

/// A value that can be decoded from the XDR wire format.
pub trait ReadXdr: Sized {
    fn read_xdr(r: &mut XdrReader<'_>) -> Result<Self, XdrError>;

    /// Decode a value from the start of `bytes` with the default limits.
    fn from_xdr(bytes: &[u8]) -> Result<Self, XdrError> {
        Self::from_xdr_with_limits(bytes, DecodeLimits::default())
    }

    /// Decode a value from the start of `bytes`. Bytes left over after the
    /// value are ignored.
    fn from_xdr_with_limits(bytes: &[u8], limits: DecodeLimits) -> Result<Self, XdrError> {
        let mut r = XdrReader::with_limits(bytes, limits)?;
        let value = Self::read_xdr(&mut r)?;
        if r.remaining() > 0 {
            tracing::debug!(
                consumed = r.position(),
                trailing = r.remaining(),
                "ignoring trailing bytes after decoded value"
            );
        }
        Ok(value)
    }

    /// Decode standard-alphabet base64, then the XDR value it carries.
    fn from_xdr_base64(encoded: &str) -> Result<Self, XdrError> {
        Self::from_xdr_base64_with_limits(encoded, DecodeLimits::default())
    }

    /// Text too long to fit `max_input_len` once decoded is rejected before
    /// any base64 decoding.
    fn from_xdr_base64_with_limits(encoded: &str, limits: DecodeLimits) -> Result<Self, XdrError> {
        let encoded = encoded.trim();
        if encoded.len() > limits.max_encoded_len() {
            return Err(XdrError::Malformed(format!(
                "base64 input of {} characters exceeds limit of {}",
                encoded.len(),
                limits.max_encoded_len()
            )));
        }
        let bytes = base64::engine::general_purpose::STANDARD.decode(encoded)?;
        Self::from_xdr_with_limits(&bytes, limits)
    }
}

/// A value that can be encoded to the XDR wire format.
pub trait WriteXdr {
    fn write_xdr(&self, w: &mut XdrWriter) -> Result<(), XdrError>;

    fn to_xdr(&self) -> Result<Vec<u8>, XdrError> {
        let mut w = XdrWriter::new();
        self.write_xdr(&mut w)?;
        Ok(w.into_inner())
    }

    fn to_xdr_base64(&self) -> Result<String, XdrError> {
        Ok(base64::engine::general_purpose::STANDARD.encode(self.to_xdr()?))
    }
}

// ==============================================================================
// Fixed-Width Primitives
// ==============================================================================

macro_rules! impl_primitive {
    ($($ty:ty),* $(,)?) => {
        $(
            impl ReadXdr for $ty {
                fn read_xdr(r: &mut XdrReader<'_>) -> Result<Self, XdrError> {
                    Ok(<$ty>::from_be_bytes(r.read_array()?))
                }
            }

            impl WriteXdr for $ty {
                fn write_xdr(&self, w: &mut XdrWriter) -> Result<(), XdrError> {
                    w.write_bytes(&self.to_be_bytes());
                    Ok(())
                }
            }
        )*
    };
}

impl_primitive!(i32, u32, i64, u64);

// ==============================================================================
// Sequences
// ==============================================================================

impl<T: ReadXdr> ReadXdr for Vec<T> {
    fn read_xdr(r: &mut XdrReader<'_>) -> Result<Self, XdrError> {
        r.decode_array()
    }
}

impl<T: WriteXdr> WriteXdr for Vec<T> {
    fn write_xdr(&self, w: &mut XdrWriter) -> Result<(), XdrError> {
        w.encode_array(self)
    }
}
