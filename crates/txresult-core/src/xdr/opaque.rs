use std::fmt;

use serde::{Serialize, Serializer};

use crate::error::XdrError;

use super::codec::{ReadXdr, WriteXdr};
use super::cursor::{XdrReader, XdrWriter};

/// A fixed-capacity opaque byte block (hashes, keys, asset codes).
///
/// `N` is a minimum, not a bound: construction zero-pads shorter input up to
/// `N` bytes but keeps longer input whole, and equality compares the full
/// kept bytes. Decoding always reads exactly `N` bytes, while encoding
/// writes everything that is kept, so an over-capacity block does not
/// survive a wire round trip unchanged.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WrappedData<const N: usize> {
    wrapped: Vec<u8>,
}

pub type WrappedData4 = WrappedData<4>;
pub type WrappedData12 = WrappedData<12>;
pub type WrappedData32 = WrappedData<32>;

impl<const N: usize> WrappedData<N> {
    pub const CAPACITY: usize = N;

    pub fn new(data: impl Into<Vec<u8>>) -> Self {
        let mut wrapped = data.into();
        if wrapped.len() < N {
            wrapped.resize(N, 0);
        }
        Self { wrapped }
    }

    /// An all-zero block of exactly `N` bytes.
    pub fn zeroed() -> Self {
        Self {
            wrapped: vec![0; N],
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.wrapped
    }

    pub fn len(&self) -> usize {
        self.wrapped.len()
    }

    pub fn is_empty(&self) -> bool {
        self.wrapped.is_empty()
    }

    /// Bytes up to the first zero, for NUL-padded text like asset codes.
    pub fn trimmed(&self) -> &[u8] {
        let end = self
            .wrapped
            .iter()
            .position(|&b| b == 0)
            .unwrap_or(self.wrapped.len());
        &self.wrapped[..end]
    }

    pub fn to_hex(&self) -> String {
        self.wrapped.iter().map(|b| format!("{b:02x}")).collect()
    }
}

impl<const N: usize> Default for WrappedData<N> {
    fn default() -> Self {
        Self::zeroed()
    }
}

impl<const N: usize> From<[u8; N]> for WrappedData<N> {
    fn from(bytes: [u8; N]) -> Self {
        Self {
            wrapped: bytes.to_vec(),
        }
    }
}

impl<const N: usize> From<&[u8]> for WrappedData<N> {
    fn from(bytes: &[u8]) -> Self {
        Self::new(bytes)
    }
}

impl<const N: usize> AsRef<[u8]> for WrappedData<N> {
    fn as_ref(&self) -> &[u8] {
        &self.wrapped
    }
}

impl<const N: usize> fmt::Debug for WrappedData<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "WrappedData{}({})", N, self.to_hex())
    }
}

impl<const N: usize> ReadXdr for WrappedData<N> {
    fn read_xdr(r: &mut XdrReader<'_>) -> Result<Self, XdrError> {
        Ok(Self {
            wrapped: r.read_bytes(N)?.to_vec(),
        })
    }
}

impl<const N: usize> WriteXdr for WrappedData<N> {
    fn write_xdr(&self, w: &mut XdrWriter) -> Result<(), XdrError> {
        w.write_bytes(&self.wrapped);
        Ok(())
    }
}

/// Rendered as lowercase hex of the kept bytes.
impl<const N: usize> Serialize for WrappedData<N> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_source_is_zero_padded_to_capacity() {
        let data = WrappedData32::new(vec![0xAB, 0xCD]);
        assert_eq!(data.len(), 32);
        assert_eq!(&data.as_bytes()[..2], &[0xAB, 0xCD]);
        assert!(data.as_bytes()[2..].iter().all(|&b| b == 0));
    }

    #[test]
    fn long_source_is_kept_whole() {
        let data = WrappedData32::new(vec![7u8; 40]);
        assert_eq!(data.len(), 40);
        assert_eq!(data.as_bytes(), &[7u8; 40][..]);
    }

    #[test]
    fn equality_uses_full_kept_bytes() {
        let mut long = vec![1u8; 32];
        long.push(9);
        assert_ne!(WrappedData32::new(vec![1u8; 32]), WrappedData32::new(long));
        assert_eq!(WrappedData4::new(vec![1]), WrappedData4::new(vec![1, 0, 0, 0]));
    }

    #[test]
    fn decode_reads_exactly_capacity() {
        let buf = [1, 2, 3, 4, 5, 6];
        let mut r = XdrReader::new(&buf);
        let data = WrappedData4::read_xdr(&mut r).expect("decode");
        assert_eq!(data.as_bytes(), &[1, 2, 3, 4]);
        assert_eq!(r.remaining(), 2);
    }

    #[test]
    fn decode_short_block_is_truncated() {
        let err = WrappedData12::from_xdr(&[0u8; 11]).unwrap_err();
        assert!(err.is_truncated());
    }

    #[test]
    fn encode_writes_kept_bytes_verbatim() {
        let data = WrappedData4::new(b"KIN".to_vec());
        assert_eq!(data.to_xdr().unwrap(), b"KIN\0".to_vec());
        assert_eq!(data.trimmed(), b"KIN");
    }
}
