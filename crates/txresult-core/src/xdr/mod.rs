//! XDR wire layer: byte cursors, primitive codecs, fixed-capacity opaque
//! blocks, and the tagged-union dispatch shared by every result type.
//!
//! All values are big-endian. Sequences carry a 4-byte unsigned count,
//! unions a 4-byte signed discriminant, and fixed opaque blocks are raw
//! bytes with no length prefix.

mod codec;
mod cursor;
mod opaque;
mod union;

pub use codec::{ReadXdr, WriteXdr};
pub use cursor::{DecodeLimits, XdrReader, XdrWriter};
pub use opaque::{WrappedData, WrappedData12, WrappedData32, WrappedData4};
pub use union::{read_union, write_union, Arm, Discriminant, UnknownTag, XdrUnion};
pub(crate) use union::union_codec;
