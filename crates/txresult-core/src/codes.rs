//! Discriminant tables.
//!
//! Three domains select the shape of a transaction result: the transaction
//! outcome, the operation outcome, and the operation type. Each operation
//! kind then has its own result-code table. Every table is a distinct
//! newtype over `i32` with named constants; values outside a table are still
//! representable so unfamiliar codes round-trip unchanged.

/// Declare a discriminant domain: an `i32` newtype, its named codes, and
/// its XDR codec. Names are reported as `prefix` + constant name.
macro_rules! discriminants {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident: $prefix:literal {
            $( $(#[$cmeta:meta])* $konst:ident = $value:literal ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, ::serde::Serialize)]
        #[serde(transparent)]
        $vis struct $name(pub i32);

        #[allow(dead_code)]
        impl $name {
            $( $(#[$cmeta])* pub const $konst: Self = Self($value); )*

            pub const fn value(self) -> i32 {
                self.0
            }

            pub fn name(self) -> Option<&'static str> {
                match self.0 {
                    $( $value => Some(concat!($prefix, stringify!($konst))), )*
                    _ => None,
                }
            }
        }

        impl From<i32> for $name {
            fn from(value: i32) -> Self {
                Self(value)
            }
        }

        impl From<$name> for i32 {
            fn from(code: $name) -> Self {
                code.0
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                match self.name() {
                    Some(name) => f.write_str(name),
                    None => write!(f, "unknown({})", self.0),
                }
            }
        }

        impl $crate::xdr::Discriminant for $name {
            fn value(self) -> i32 {
                self.0
            }

            fn name(self) -> Option<&'static str> {
                $name::name(self)
            }
        }

        impl $crate::xdr::ReadXdr for $name {
            fn read_xdr(
                r: &mut $crate::xdr::XdrReader<'_>,
            ) -> Result<Self, $crate::error::XdrError> {
                Ok(Self(r.decode()?))
            }
        }

        impl $crate::xdr::WriteXdr for $name {
            fn write_xdr(
                &self,
                w: &mut $crate::xdr::XdrWriter,
            ) -> Result<(), $crate::error::XdrError> {
                w.encode(&self.0)
            }
        }
    };
}

pub(crate) use discriminants;

// ==============================================================================
// Transaction, Operation Outcome, and Operation Type
// ==============================================================================

discriminants! {
    /// Outcome of the transaction as a whole.
    pub struct TransactionResultCode: "tx" {
        /// All operations succeeded.
        SUCCESS = 0,
        /// One of the operations failed; none were applied.
        FAILED = -1,
        /// Ledger close time before min time.
        TOO_EARLY = -2,
        /// Ledger close time after max time.
        TOO_LATE = -3,
        MISSING_OPERATION = -4,
        /// Sequence number does not match the source account.
        BAD_SEQ = -5,
        /// Too few valid signatures or wrong network.
        BAD_AUTH = -6,
        /// Fee would bring the account below reserve.
        INSUFFICIENT_BALANCE = -7,
        NO_ACCOUNT = -8,
        INSUFFICIENT_FEE = -9,
        /// Unused signatures attached to the transaction.
        BAD_AUTH_EXTRA = -10,
        INTERNAL_ERROR = -11,
    }
}

discriminants! {
    /// Outcome of a single operation, before its own result is considered.
    pub struct OperationResultCode: "op" {
        /// The inner, per-operation result is valid.
        INNER = 0,
        BAD_AUTH = -1,
        /// Source account was not found.
        NO_ACCOUNT = -2,
    }
}

discriminants! {
    /// Kind of operation whose result follows.
    pub struct OperationType: "" {
        CREATE_ACCOUNT = 0,
        PAYMENT = 1,
        PATH_PAYMENT = 2,
        MANAGE_OFFER = 3,
        CREATE_PASSIVE_OFFER = 4,
        SET_OPTIONS = 5,
        CHANGE_TRUST = 6,
        ALLOW_TRUST = 7,
        ACCOUNT_MERGE = 8,
        INFLATION = 9,
        MANAGE_DATA = 10,
        BUMP_SEQUENCE = 11,
    }
}

// ==============================================================================
// Per-Operation Result Codes
// ==============================================================================

discriminants! {
    pub struct CreateAccountResultCode: "CREATE_ACCOUNT_" {
        SUCCESS = 0,
        /// Invalid destination.
        MALFORMED = -1,
        UNDERFUNDED = -2,
        /// Would create an account below the min reserve.
        LOW_RESERVE = -3,
        ALREADY_EXIST = -4,
    }
}

discriminants! {
    pub struct PaymentResultCode: "PAYMENT_" {
        SUCCESS = 0,
        MALFORMED = -1,
        UNDERFUNDED = -2,
        /// No trust line on the source account.
        SRC_NO_TRUST = -3,
        SRC_NOT_AUTHORIZED = -4,
        NO_DESTINATION = -5,
        /// Destination is missing a trust line for the asset.
        NO_TRUST = -6,
        NOT_AUTHORIZED = -7,
        /// Destination would go above its limit.
        LINE_FULL = -8,
        NO_ISSUER = -9,
    }
}

discriminants! {
    pub struct PathPaymentResultCode: "PATH_PAYMENT_" {
        SUCCESS = 0,
        MALFORMED = -1,
        UNDERFUNDED = -2,
        SRC_NO_TRUST = -3,
        SRC_NOT_AUTHORIZED = -4,
        NO_DESTINATION = -5,
        NO_TRUST = -6,
        NOT_AUTHORIZED = -7,
        LINE_FULL = -8,
        /// Missing issuer on one of the path assets; carries the asset.
        NO_ISSUER = -9,
        TOO_FEW_OFFERS = -10,
        /// Would cross one of the source's own offers.
        OFFER_CROSS_SELF = -11,
        OVER_SENDMAX = -12,
    }
}

discriminants! {
    pub struct ManageOfferResultCode: "MANAGE_OFFER_" {
        SUCCESS = 0,
        MALFORMED = -1,
        SELL_NO_TRUST = -2,
        BUY_NO_TRUST = -3,
        SELL_NOT_AUTHORIZED = -4,
        BUY_NOT_AUTHORIZED = -5,
        LINE_FULL = -6,
        UNDERFUNDED = -7,
        CROSS_SELF = -8,
        SELL_NO_ISSUER = -9,
        BUY_NO_ISSUER = -10,
        /// Offer id does not match an existing offer.
        NOT_FOUND = -11,
        LOW_RESERVE = -12,
    }
}

discriminants! {
    /// What a successful offer operation did to the offer itself.
    pub struct ManageOfferEffectCode: "MANAGE_OFFER_" {
        CREATED = 0,
        UPDATED = 1,
        DELETED = 2,
    }
}

discriminants! {
    pub struct SetOptionsResultCode: "SET_OPTIONS_" {
        SUCCESS = 0,
        LOW_RESERVE = -1,
        TOO_MANY_SIGNERS = -2,
        BAD_FLAGS = -3,
        INVALID_INFLATION = -4,
        CANT_CHANGE = -5,
        UNKNOWN_FLAG = -6,
        THRESHOLD_OUT_OF_RANGE = -7,
        BAD_SIGNER = -8,
        INVALID_HOME_DOMAIN = -9,
    }
}

discriminants! {
    pub struct ChangeTrustResultCode: "CHANGE_TRUST_" {
        SUCCESS = 0,
        MALFORMED = -1,
        NO_ISSUER = -2,
        /// Cannot drop the limit below the current balance.
        INVALID_LIMIT = -3,
        LOW_RESERVE = -4,
        SELF_NOT_ALLOWED = -5,
    }
}

discriminants! {
    pub struct AllowTrustResultCode: "ALLOW_TRUST_" {
        SUCCESS = 0,
        MALFORMED = -1,
        NO_TRUST_LINE = -2,
        TRUST_NOT_REQUIRED = -3,
        CANT_REVOKE = -4,
        SELF_NOT_ALLOWED = -5,
    }
}

discriminants! {
    pub struct AccountMergeResultCode: "ACCOUNT_MERGE_" {
        SUCCESS = 0,
        /// Cannot merge onto itself.
        MALFORMED = -1,
        NO_ACCOUNT = -2,
        IMMUTABLE_SET = -3,
        /// Account still has trust lines or offers.
        HAS_SUB_ENTRIES = -4,
        SEQNUM_TOO_FAR = -5,
    }
}

discriminants! {
    pub struct InflationResultCode: "INFLATION_" {
        SUCCESS = 0,
        NOT_TIME = -1,
    }
}

discriminants! {
    pub struct ManageDataResultCode: "MANAGE_DATA_" {
        SUCCESS = 0,
        NOT_SUPPORTED_YET = -1,
        NAME_NOT_FOUND = -2,
        LOW_RESERVE = -3,
        INVALID_NAME = -4,
    }
}

discriminants! {
    pub struct BumpSequenceResultCode: "BUMP_SEQUENCE_" {
        SUCCESS = 0,
        BAD_SEQ = -1,
    }
}

// ==============================================================================
// Ledger Types
// ==============================================================================

discriminants! {
    pub struct PublicKeyType: "PUBLIC_KEY_TYPE_" {
        ED25519 = 0,
    }
}

discriminants! {
    pub struct AssetType: "ASSET_TYPE_" {
        NATIVE = 0,
        CREDIT_ALPHANUM4 = 1,
        CREDIT_ALPHANUM12 = 2,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::xdr::ReadXdr;

    #[test]
    fn names_carry_protocol_prefix() {
        assert_eq!(TransactionResultCode::BAD_SEQ.name(), Some("txBAD_SEQ"));
        assert_eq!(OperationResultCode::INNER.name(), Some("opINNER"));
        assert_eq!(OperationType::BUMP_SEQUENCE.name(), Some("BUMP_SEQUENCE"));
        assert_eq!(PaymentResultCode::NO_TRUST.name(), Some("PAYMENT_NO_TRUST"));
    }

    #[test]
    fn codes_outside_table_display_as_unknown() {
        assert_eq!(PaymentResultCode(-42).to_string(), "unknown(-42)");
        assert_eq!(PaymentResultCode(-42).name(), None);
        assert_eq!(
            TransactionResultCode::INTERNAL_ERROR.to_string(),
            "txINTERNAL_ERROR"
        );
    }

    #[test]
    fn transaction_codes_are_contiguous_through_internal_error() {
        for value in -11..=0 {
            assert!(
                TransactionResultCode(value).name().is_some(),
                "missing name for {value}"
            );
        }
        assert_eq!(TransactionResultCode(-12).name(), None);
    }

    #[test]
    fn operation_type_table_matches_wire_values() {
        let expected = [
            (OperationType::CREATE_ACCOUNT, 0),
            (OperationType::PAYMENT, 1),
            (OperationType::PATH_PAYMENT, 2),
            (OperationType::MANAGE_OFFER, 3),
            (OperationType::CREATE_PASSIVE_OFFER, 4),
            (OperationType::SET_OPTIONS, 5),
            (OperationType::CHANGE_TRUST, 6),
            (OperationType::ALLOW_TRUST, 7),
            (OperationType::ACCOUNT_MERGE, 8),
            (OperationType::INFLATION, 9),
            (OperationType::MANAGE_DATA, 10),
            (OperationType::BUMP_SEQUENCE, 11),
        ];
        for (code, value) in expected {
            assert_eq!(code.value(), value);
        }
    }

    #[test]
    fn codes_decode_from_signed_wire_integer() {
        let code = TransactionResultCode::from_xdr(&[0xFF, 0xFF, 0xFF, 0xFB]).unwrap();
        assert_eq!(code, TransactionResultCode::BAD_SEQ);
    }
}
