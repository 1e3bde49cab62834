//! Per-operation-type result payloads.
//!
//! Every payload is a union over its own result-code table. Success (code 0)
//! selects the success shape; any other code is kept as a raw failure code
//! unless the table gives it a payload of its own (path payment `NO_ISSUER`).
//! A `Failure` value is expected to hold a code without a payload arm;
//! building one from `SUCCESS` encodes as the success variant.

use serde::Serialize;

use crate::codes::{
    AccountMergeResultCode, AllowTrustResultCode, BumpSequenceResultCode,
    ChangeTrustResultCode, CreateAccountResultCode, InflationResultCode, ManageDataResultCode,
    ManageOfferEffectCode, ManageOfferResultCode, PathPaymentResultCode, PaymentResultCode,
    SetOptionsResultCode,
};
use crate::error::XdrError;
use crate::types::{Asset, ClaimOfferAtom, InflationPayout, OfferEntry, SimplePaymentResult};
use crate::xdr::{union_codec, Arm, ReadXdr, UnknownTag, WriteXdr, XdrReader, XdrUnion, XdrWriter};

// ==============================================================================
// Code-Only Results
// ==============================================================================

/// A result whose wire value is the bare code: 0 for success, anything else
/// carried as the failure code.
macro_rules! code_only_result {
    ($(#[$meta:meta])* $name:ident, $code:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            Success,
            Failure($code),
        }

        impl $name {
            pub fn code(&self) -> $code {
                match self {
                    Self::Success => $code::SUCCESS,
                    Self::Failure(code) => *code,
                }
            }

            pub fn is_success(&self) -> bool {
                matches!(self, Self::Success)
            }
        }

        impl From<$code> for $name {
            fn from(code: $code) -> Self {
                if code == $code::SUCCESS {
                    Self::Success
                } else {
                    Self::Failure(code)
                }
            }
        }

        impl XdrUnion for $name {
            type Code = $code;
            const NAME: &'static str = stringify!($name);
            const ON_UNKNOWN: UnknownTag = UnknownTag::RawCode;
            const ARMS: &'static [Arm<Self>] = &[Arm {
                code: $code::SUCCESS,
                decode: |_| Ok(Self::Success),
            }];

            fn fallback(code: $code, _: &mut XdrReader<'_>) -> Result<Self, XdrError> {
                Ok(Self::Failure(code))
            }

            fn discriminant(&self) -> $code {
                self.code()
            }

            fn write_payload(&self, _: &mut XdrWriter) -> Result<(), XdrError> {
                Ok(())
            }
        }

        union_codec!($name);
    };
}

code_only_result!(CreateAccountResult, CreateAccountResultCode);
code_only_result!(PaymentResult, PaymentResultCode);
code_only_result!(SetOptionsResult, SetOptionsResultCode);
code_only_result!(ChangeTrustResult, ChangeTrustResultCode);
code_only_result!(AllowTrustResult, AllowTrustResultCode);
code_only_result!(ManageDataResult, ManageDataResultCode);
code_only_result!(BumpSequenceResult, BumpSequenceResultCode);

// ==============================================================================
// Path Payment
// ==============================================================================

/// Offers crossed along the path, then the leg credited to the destination.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct PathPaymentSuccess {
    pub offers: Vec<ClaimOfferAtom>,
    pub last: SimplePaymentResult,
}

impl ReadXdr for PathPaymentSuccess {
    fn read_xdr(r: &mut XdrReader<'_>) -> Result<Self, XdrError> {
        Ok(Self {
            offers: r.decode_array()?,
            last: r.decode()?,
        })
    }
}

impl WriteXdr for PathPaymentSuccess {
    fn write_xdr(&self, w: &mut XdrWriter) -> Result<(), XdrError> {
        w.encode_array(&self.offers)?;
        w.encode(&self.last)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathPaymentResult {
    Success(PathPaymentSuccess),
    /// The asset whose issuer is missing.
    NoIssuer(Asset),
    Failure(PathPaymentResultCode),
}

impl PathPaymentResult {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }
}

impl XdrUnion for PathPaymentResult {
    type Code = PathPaymentResultCode;
    const NAME: &'static str = "PathPaymentResult";
    const ON_UNKNOWN: UnknownTag = UnknownTag::RawCode;
    const ARMS: &'static [Arm<Self>] = &[
        Arm {
            code: PathPaymentResultCode::SUCCESS,
            decode: |r| Ok(Self::Success(r.decode()?)),
        },
        Arm {
            code: PathPaymentResultCode::NO_ISSUER,
            decode: |r| Ok(Self::NoIssuer(r.decode()?)),
        },
    ];

    fn fallback(code: PathPaymentResultCode, _: &mut XdrReader<'_>) -> Result<Self, XdrError> {
        Ok(Self::Failure(code))
    }

    fn discriminant(&self) -> PathPaymentResultCode {
        match self {
            Self::Success(_) => PathPaymentResultCode::SUCCESS,
            Self::NoIssuer(_) => PathPaymentResultCode::NO_ISSUER,
            Self::Failure(code) => *code,
        }
    }

    fn write_payload(&self, w: &mut XdrWriter) -> Result<(), XdrError> {
        match self {
            Self::Success(success) => w.encode(success),
            Self::NoIssuer(asset) => w.encode(asset),
            Self::Failure(_) => Ok(()),
        }
    }
}

// ==============================================================================
// Manage Offer (also Create Passive Offer)
// ==============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ManageOfferEffect {
    Created(OfferEntry),
    Updated(OfferEntry),
    Deleted,
}

impl XdrUnion for ManageOfferEffect {
    type Code = ManageOfferEffectCode;
    const NAME: &'static str = "ManageOfferEffect";
    // Anything that is neither a creation nor a deletion still carries the
    // offer as it now stands.
    const ON_UNKNOWN: UnknownTag = UnknownTag::Default;
    const ARMS: &'static [Arm<Self>] = &[
        Arm {
            code: ManageOfferEffectCode::CREATED,
            decode: |r| Ok(Self::Created(r.decode()?)),
        },
        Arm {
            code: ManageOfferEffectCode::UPDATED,
            decode: |r| Ok(Self::Updated(r.decode()?)),
        },
        Arm {
            code: ManageOfferEffectCode::DELETED,
            decode: |_| Ok(Self::Deleted),
        },
    ];

    fn fallback(_: ManageOfferEffectCode, r: &mut XdrReader<'_>) -> Result<Self, XdrError> {
        Ok(Self::Updated(r.decode()?))
    }

    fn discriminant(&self) -> ManageOfferEffectCode {
        match self {
            Self::Created(_) => ManageOfferEffectCode::CREATED,
            Self::Updated(_) => ManageOfferEffectCode::UPDATED,
            Self::Deleted => ManageOfferEffectCode::DELETED,
        }
    }

    fn write_payload(&self, w: &mut XdrWriter) -> Result<(), XdrError> {
        match self {
            Self::Created(offer) | Self::Updated(offer) => w.encode(offer),
            Self::Deleted => Ok(()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ManageOfferSuccess {
    pub offers_claimed: Vec<ClaimOfferAtom>,
    pub effect: ManageOfferEffect,
}

impl ReadXdr for ManageOfferSuccess {
    fn read_xdr(r: &mut XdrReader<'_>) -> Result<Self, XdrError> {
        Ok(Self {
            offers_claimed: r.decode_array()?,
            effect: r.decode()?,
        })
    }
}

impl WriteXdr for ManageOfferSuccess {
    fn write_xdr(&self, w: &mut XdrWriter) -> Result<(), XdrError> {
        w.encode_array(&self.offers_claimed)?;
        w.encode(&self.effect)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ManageOfferResult {
    Success(ManageOfferSuccess),
    Failure(ManageOfferResultCode),
}

impl ManageOfferResult {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }
}

impl XdrUnion for ManageOfferResult {
    type Code = ManageOfferResultCode;
    const NAME: &'static str = "ManageOfferResult";
    const ON_UNKNOWN: UnknownTag = UnknownTag::RawCode;
    const ARMS: &'static [Arm<Self>] = &[Arm {
        code: ManageOfferResultCode::SUCCESS,
        decode: |r| Ok(Self::Success(r.decode()?)),
    }];

    fn fallback(code: ManageOfferResultCode, _: &mut XdrReader<'_>) -> Result<Self, XdrError> {
        Ok(Self::Failure(code))
    }

    fn discriminant(&self) -> ManageOfferResultCode {
        match self {
            Self::Success(_) => ManageOfferResultCode::SUCCESS,
            Self::Failure(code) => *code,
        }
    }

    fn write_payload(&self, w: &mut XdrWriter) -> Result<(), XdrError> {
        match self {
            Self::Success(success) => w.encode(success),
            Self::Failure(_) => Ok(()),
        }
    }
}

// ==============================================================================
// Account Merge
// ==============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AccountMergeResult {
    /// Balance of the merged account, credited to the destination.
    Success(i64),
    Failure(AccountMergeResultCode),
}

impl AccountMergeResult {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }
}

impl XdrUnion for AccountMergeResult {
    type Code = AccountMergeResultCode;
    const NAME: &'static str = "AccountMergeResult";
    const ON_UNKNOWN: UnknownTag = UnknownTag::RawCode;
    const ARMS: &'static [Arm<Self>] = &[Arm {
        code: AccountMergeResultCode::SUCCESS,
        decode: |r| Ok(Self::Success(r.decode()?)),
    }];

    fn fallback(code: AccountMergeResultCode, _: &mut XdrReader<'_>) -> Result<Self, XdrError> {
        Ok(Self::Failure(code))
    }

    fn discriminant(&self) -> AccountMergeResultCode {
        match self {
            Self::Success(_) => AccountMergeResultCode::SUCCESS,
            Self::Failure(code) => *code,
        }
    }

    fn write_payload(&self, w: &mut XdrWriter) -> Result<(), XdrError> {
        match self {
            Self::Success(balance) => w.encode(balance),
            Self::Failure(_) => Ok(()),
        }
    }
}

// ==============================================================================
// Inflation
// ==============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum InflationResult {
    Success(Vec<InflationPayout>),
    Failure(InflationResultCode),
}

impl InflationResult {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }
}

impl XdrUnion for InflationResult {
    type Code = InflationResultCode;
    const NAME: &'static str = "InflationResult";
    const ON_UNKNOWN: UnknownTag = UnknownTag::RawCode;
    const ARMS: &'static [Arm<Self>] = &[Arm {
        code: InflationResultCode::SUCCESS,
        decode: |r| Ok(Self::Success(r.decode_array()?)),
    }];

    fn fallback(code: InflationResultCode, _: &mut XdrReader<'_>) -> Result<Self, XdrError> {
        Ok(Self::Failure(code))
    }

    fn discriminant(&self) -> InflationResultCode {
        match self {
            Self::Success(_) => InflationResultCode::SUCCESS,
            Self::Failure(code) => *code,
        }
    }

    fn write_payload(&self, w: &mut XdrWriter) -> Result<(), XdrError> {
        match self {
            Self::Success(payouts) => w.encode_array(payouts),
            Self::Failure(_) => Ok(()),
        }
    }
}

union_codec!(
    PathPaymentResult,
    ManageOfferEffect,
    ManageOfferResult,
    AccountMergeResult,
    InflationResult,
);
