//! Codec for Stellar transaction results.
//!
//! Decodes and encodes the XDR wire form of a `TransactionResult` and renders
//! the decoded tree as a structured, serde-serializable projection.

pub mod codes;
pub mod error;
pub mod projection;
pub mod results;
pub mod types;
pub mod xdr;

#[cfg(test)]
pub(crate) mod test_util;

pub use error::XdrError;
pub use results::{OperationResult, TransactionResult, Tr, TxResult};
pub use xdr::{DecodeLimits, ReadXdr, WriteXdr};
