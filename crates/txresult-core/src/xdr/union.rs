//! Discriminant-tagged union dispatch.
//!
//! Every union reads a 4-byte signed discriminant, looks it up in a static
//! arm table, and decodes the selected payload. A discriminant with no arm
//! is resolved by the union's [`UnknownTag`] policy instead of failing, with
//! the exception of protocol types whose payload shape cannot be guessed.

use std::fmt;

use crate::error::XdrError;

use super::codec::{ReadXdr, WriteXdr};
use super::cursor::{XdrReader, XdrWriter};

/// A typed discriminant domain. Each union has its own domain so codes from
/// unrelated tables cannot be mixed up, even though all of them travel as a
/// 4-byte signed integer.
pub trait Discriminant: Copy + Eq + fmt::Display + fmt::Debug + ReadXdr + WriteXdr {
    fn value(self) -> i32;

    /// Protocol name of a code in the table, `None` for codes outside it.
    fn name(self) -> Option<&'static str>;
}

/// How a union resolves a discriminant that has no entry in its arm table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnknownTag {
    /// Map to a fixed, domain-specific variant.
    Default,
    /// Keep the raw code as the failure payload so it round-trips exactly.
    RawCode,
    /// Resolve to an explicit unknown marker with no payload.
    Marker,
    /// Fail with `Malformed`; the payload shape is not knowable.
    Reject,
}

/// One entry of a union's dispatch table.
pub struct Arm<U: XdrUnion> {
    pub code: U::Code,
    pub decode: fn(&mut XdrReader<'_>) -> Result<U, XdrError>,
}

pub trait XdrUnion: Sized + 'static {
    type Code: Discriminant;

    /// Type name used in log events.
    const NAME: &'static str;
    const ON_UNKNOWN: UnknownTag;
    const ARMS: &'static [Arm<Self>];

    /// Build the value for a discriminant with no arm. The reader is
    /// positioned right after the discriminant. Never called for
    /// [`UnknownTag::Reject`] unions.
    fn fallback(code: Self::Code, _r: &mut XdrReader<'_>) -> Result<Self, XdrError> {
        Err(reject::<Self>(code))
    }

    fn discriminant(&self) -> Self::Code;

    fn write_payload(&self, w: &mut XdrWriter) -> Result<(), XdrError>;
}

pub fn read_union<U: XdrUnion>(r: &mut XdrReader<'_>) -> Result<U, XdrError> {
    let code = U::Code::read_xdr(r)?;
    if let Some(arm) = U::ARMS.iter().find(|arm| arm.code == code) {
        return (arm.decode)(r);
    }

    match code.name() {
        Some(name) => tracing::trace!(
            union = U::NAME,
            code = code.value(),
            code_name = name,
            "code carried without a payload arm"
        ),
        None => tracing::debug!(
            union = U::NAME,
            code = code.value(),
            policy = ?U::ON_UNKNOWN,
            "unrecognized discriminant"
        ),
    }
    match U::ON_UNKNOWN {
        UnknownTag::Reject => Err(reject::<U>(code)),
        UnknownTag::Default | UnknownTag::RawCode | UnknownTag::Marker => U::fallback(code, r),
    }
}

fn reject<U: XdrUnion>(code: U::Code) -> XdrError {
    XdrError::Malformed(format!("unsupported {} discriminant {code}", U::NAME))
}

pub fn write_union<U: XdrUnion>(value: &U, w: &mut XdrWriter) -> Result<(), XdrError> {
    value.discriminant().write_xdr(w)?;
    value.write_payload(w)
}

/// Implement [`ReadXdr`] and [`WriteXdr`] for types that implement
/// [`XdrUnion`].
macro_rules! union_codec {
    ($($ty:ty),* $(,)?) => {
        $(
            impl $crate::xdr::ReadXdr for $ty {
                fn read_xdr(
                    r: &mut $crate::xdr::XdrReader<'_>,
                ) -> Result<Self, $crate::error::XdrError> {
                    $crate::xdr::read_union(r)
                }
            }

            impl $crate::xdr::WriteXdr for $ty {
                fn write_xdr(
                    &self,
                    w: &mut $crate::xdr::XdrWriter,
                ) -> Result<(), $crate::error::XdrError> {
                    $crate::xdr::write_union(self, w)
                }
            }
        )*
    };
}

pub(crate) use union_codec;
