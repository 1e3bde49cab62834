//! The transaction-result hierarchy.
//!
//! Decoding runs top-down through three separate discriminant domains: the
//! transaction outcome selects whether an operation list follows, each
//! operation outcome selects whether an inner result follows, and the
//! operation type selects which per-operation payload that inner result is.

pub mod operations;

use crate::codes::{OperationResultCode, OperationType, TransactionResultCode};
use crate::error::XdrError;
use crate::xdr::{union_codec, Arm, ReadXdr, UnknownTag, WriteXdr, XdrReader, XdrUnion, XdrWriter};

pub use operations::{
    AccountMergeResult, AllowTrustResult, BumpSequenceResult, ChangeTrustResult,
    CreateAccountResult, InflationResult, ManageDataResult, ManageOfferEffect, ManageOfferResult,
    ManageOfferSuccess, PathPaymentResult, PathPaymentSuccess, PaymentResult, SetOptionsResult,
};

// ==============================================================================
// Transaction Result
// ==============================================================================

/// Outcome of a submitted transaction as reported by the ledger.
///
/// A trailing reserved word follows `result` on the wire; it is consumed on
/// decode and written as 0.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TransactionResult {
    /// Fee actually charged, in stroops.
    pub fee_charged: i64,
    pub result: TxResult,
}

impl TransactionResult {
    pub fn is_success(&self) -> bool {
        matches!(self.result, TxResult::Success(_))
    }

    pub fn code(&self) -> TransactionResultCode {
        self.result.code()
    }

    /// Per-operation results; empty when the transaction did not get as far
    /// as applying operations.
    pub fn operation_results(&self) -> &[OperationResult] {
        match &self.result {
            TxResult::Success(ops) | TxResult::Failed(ops) => ops,
            TxResult::Error(_) => &[],
        }
    }
}

impl ReadXdr for TransactionResult {
    fn read_xdr(r: &mut XdrReader<'_>) -> Result<Self, XdrError> {
        let fee_charged: i64 = r.decode()?;
        let result: TxResult = r.decode()?;
        let _reserved: i32 = r.decode()?;

        tracing::trace!(
            fee_charged,
            code = %result.code(),
            operations = result.operation_count(),
            "decoded transaction result"
        );
        Ok(Self {
            fee_charged,
            result,
        })
    }
}

impl WriteXdr for TransactionResult {
    fn write_xdr(&self, w: &mut XdrWriter) -> Result<(), XdrError> {
        w.encode(&self.fee_charged)?;
        w.encode(&self.result)?;
        w.encode(&0i32)
    }
}

/// The transaction outcome. Only success and failure carry the operation
/// results; any other code is kept as-is with no payload. `Error` is not
/// expected to hold `SUCCESS` or `FAILED`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TxResult {
    Success(Vec<OperationResult>),
    Failed(Vec<OperationResult>),
    Error(TransactionResultCode),
}

impl TxResult {
    pub fn code(&self) -> TransactionResultCode {
        match self {
            Self::Success(_) => TransactionResultCode::SUCCESS,
            Self::Failed(_) => TransactionResultCode::FAILED,
            Self::Error(code) => *code,
        }
    }

    fn operation_count(&self) -> usize {
        match self {
            Self::Success(ops) | Self::Failed(ops) => ops.len(),
            Self::Error(_) => 0,
        }
    }
}

impl XdrUnion for TxResult {
    type Code = TransactionResultCode;
    const NAME: &'static str = "TransactionResult.result";
    const ON_UNKNOWN: UnknownTag = UnknownTag::RawCode;
    const ARMS: &'static [Arm<Self>] = &[
        Arm {
            code: TransactionResultCode::SUCCESS,
            decode: |r| Ok(Self::Success(r.decode_array()?)),
        },
        Arm {
            code: TransactionResultCode::FAILED,
            decode: |r| Ok(Self::Failed(r.decode_array()?)),
        },
    ];

    fn fallback(code: TransactionResultCode, _: &mut XdrReader<'_>) -> Result<Self, XdrError> {
        Ok(Self::Error(code))
    }

    fn discriminant(&self) -> TransactionResultCode {
        self.code()
    }

    fn write_payload(&self, w: &mut XdrWriter) -> Result<(), XdrError> {
        match self {
            Self::Success(ops) | Self::Failed(ops) => w.encode_array(ops),
            Self::Error(_) => Ok(()),
        }
    }
}

// ==============================================================================
// Operation Result
// ==============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum OperationResult {
    /// The operation was applied (or attempted); its own result follows.
    Inner(Tr),
    BadAuth,
    /// Source account missing. Also stands in for any unrecognized outcome.
    NoAccount,
}

impl OperationResult {
    pub fn code(&self) -> OperationResultCode {
        match self {
            Self::Inner(_) => OperationResultCode::INNER,
            Self::BadAuth => OperationResultCode::BAD_AUTH,
            Self::NoAccount => OperationResultCode::NO_ACCOUNT,
        }
    }

    /// The operation ran and its own result is a success.
    pub fn is_success(&self) -> bool {
        match self {
            Self::Inner(tr) => tr.is_success(),
            Self::BadAuth | Self::NoAccount => false,
        }
    }

    pub fn inner(&self) -> Option<&Tr> {
        match self {
            Self::Inner(tr) => Some(tr),
            Self::BadAuth | Self::NoAccount => None,
        }
    }
}

impl XdrUnion for OperationResult {
    type Code = OperationResultCode;
    const NAME: &'static str = "OperationResult";
    const ON_UNKNOWN: UnknownTag = UnknownTag::Default;
    const ARMS: &'static [Arm<Self>] = &[
        Arm {
            code: OperationResultCode::INNER,
            decode: |r| Ok(Self::Inner(r.decode()?)),
        },
        Arm {
            code: OperationResultCode::BAD_AUTH,
            decode: |_| Ok(Self::BadAuth),
        },
        Arm {
            code: OperationResultCode::NO_ACCOUNT,
            decode: |_| Ok(Self::NoAccount),
        },
    ];

    fn fallback(_: OperationResultCode, _: &mut XdrReader<'_>) -> Result<Self, XdrError> {
        Ok(Self::NoAccount)
    }

    fn discriminant(&self) -> OperationResultCode {
        self.code()
    }

    fn write_payload(&self, w: &mut XdrWriter) -> Result<(), XdrError> {
        match self {
            Self::Inner(tr) => w.encode(tr),
            Self::BadAuth | Self::NoAccount => Ok(()),
        }
    }
}

// ==============================================================================
// Per-Operation-Type Result
// ==============================================================================

/// The result of one operation, keyed by operation type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Tr {
    CreateAccount(CreateAccountResult),
    Payment(PaymentResult),
    PathPayment(PathPaymentResult),
    ManageOffer(ManageOfferResult),
    /// Same payload as `ManageOffer`.
    CreatePassiveOffer(ManageOfferResult),
    SetOptions(SetOptionsResult),
    ChangeTrust(ChangeTrustResult),
    AllowTrust(AllowTrustResult),
    AccountMerge(AccountMergeResult),
    Inflation(InflationResult),
    ManageData(ManageDataResult),
    BumpSequence(BumpSequenceResult),
    /// An operation type this codec does not know. Its payload is not read.
    Unknown(OperationType),
}

impl Tr {
    pub fn operation_type(&self) -> OperationType {
        match self {
            Self::CreateAccount(_) => OperationType::CREATE_ACCOUNT,
            Self::Payment(_) => OperationType::PAYMENT,
            Self::PathPayment(_) => OperationType::PATH_PAYMENT,
            Self::ManageOffer(_) => OperationType::MANAGE_OFFER,
            Self::CreatePassiveOffer(_) => OperationType::CREATE_PASSIVE_OFFER,
            Self::SetOptions(_) => OperationType::SET_OPTIONS,
            Self::ChangeTrust(_) => OperationType::CHANGE_TRUST,
            Self::AllowTrust(_) => OperationType::ALLOW_TRUST,
            Self::AccountMerge(_) => OperationType::ACCOUNT_MERGE,
            Self::Inflation(_) => OperationType::INFLATION,
            Self::ManageData(_) => OperationType::MANAGE_DATA,
            Self::BumpSequence(_) => OperationType::BUMP_SEQUENCE,
            Self::Unknown(code) => *code,
        }
    }

    /// Whether the operation's own result is a success. `Unknown` never is.
    pub fn is_success(&self) -> bool {
        match self {
            Self::CreateAccount(result) => result.is_success(),
            Self::Payment(result) => result.is_success(),
            Self::PathPayment(result) => result.is_success(),
            Self::ManageOffer(result) | Self::CreatePassiveOffer(result) => result.is_success(),
            Self::SetOptions(result) => result.is_success(),
            Self::ChangeTrust(result) => result.is_success(),
            Self::AllowTrust(result) => result.is_success(),
            Self::AccountMerge(result) => result.is_success(),
            Self::Inflation(result) => result.is_success(),
            Self::ManageData(result) => result.is_success(),
            Self::BumpSequence(result) => result.is_success(),
            Self::Unknown(_) => false,
        }
    }
}

impl XdrUnion for Tr {
    type Code = OperationType;
    const NAME: &'static str = "OperationResult.tr";
    const ON_UNKNOWN: UnknownTag = UnknownTag::Marker;
    const ARMS: &'static [Arm<Self>] = &[
        Arm {
            code: OperationType::CREATE_ACCOUNT,
            decode: |r| Ok(Self::CreateAccount(r.decode()?)),
        },
        Arm {
            code: OperationType::PAYMENT,
            decode: |r| Ok(Self::Payment(r.decode()?)),
        },
        Arm {
            code: OperationType::PATH_PAYMENT,
            decode: |r| Ok(Self::PathPayment(r.decode()?)),
        },
        Arm {
            code: OperationType::MANAGE_OFFER,
            decode: |r| Ok(Self::ManageOffer(r.decode()?)),
        },
        Arm {
            code: OperationType::CREATE_PASSIVE_OFFER,
            decode: |r| Ok(Self::CreatePassiveOffer(r.decode()?)),
        },
        Arm {
            code: OperationType::SET_OPTIONS,
            decode: |r| Ok(Self::SetOptions(r.decode()?)),
        },
        Arm {
            code: OperationType::CHANGE_TRUST,
            decode: |r| Ok(Self::ChangeTrust(r.decode()?)),
        },
        Arm {
            code: OperationType::ALLOW_TRUST,
            decode: |r| Ok(Self::AllowTrust(r.decode()?)),
        },
        Arm {
            code: OperationType::ACCOUNT_MERGE,
            decode: |r| Ok(Self::AccountMerge(r.decode()?)),
        },
        Arm {
            code: OperationType::INFLATION,
            decode: |r| Ok(Self::Inflation(r.decode()?)),
        },
        Arm {
            code: OperationType::MANAGE_DATA,
            decode: |r| Ok(Self::ManageData(r.decode()?)),
        },
        Arm {
            code: OperationType::BUMP_SEQUENCE,
            decode: |r| Ok(Self::BumpSequence(r.decode()?)),
        },
    ];

    fn fallback(code: OperationType, r: &mut XdrReader<'_>) -> Result<Self, XdrError> {
        tracing::warn!(
            operation_type = code.value(),
            position = r.position(),
            "unknown operation type; its payload is left unread"
        );
        Ok(Self::Unknown(code))
    }

    fn discriminant(&self) -> OperationType {
        self.operation_type()
    }

    fn write_payload(&self, w: &mut XdrWriter) -> Result<(), XdrError> {
        match self {
            Self::CreateAccount(result) => w.encode(result),
            Self::Payment(result) => w.encode(result),
            Self::PathPayment(result) => w.encode(result),
            Self::ManageOffer(result) | Self::CreatePassiveOffer(result) => w.encode(result),
            Self::SetOptions(result) => w.encode(result),
            Self::ChangeTrust(result) => w.encode(result),
            Self::AllowTrust(result) => w.encode(result),
            Self::AccountMerge(result) => w.encode(result),
            Self::Inflation(result) => w.encode(result),
            Self::ManageData(result) => w.encode(result),
            Self::BumpSequence(result) => w.encode(result),
            Self::Unknown(_) => Ok(()),
        }
    }
}

union_codec!(TxResult, OperationResult, Tr);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codes::{PaymentResultCode, TransactionResultCode};
    use crate::test_util::{offer_entry, single_op_bytes, success_result, wrap_tr};
    use crate::types::{Asset, PublicKey};
    use crate::xdr::Discriminant;

    /// Decode an unrecognized `tag` followed by `payload` and check the
    /// outcome against the union's declared `ON_UNKNOWN` policy.
    fn assert_unknown_policy<U>(tag: i32, payload: &[u8])
    where
        U: XdrUnion + ReadXdr + WriteXdr + std::fmt::Debug,
    {
        assert!(
            U::ARMS.iter().all(|arm| arm.code.value() != tag),
            "{} has an arm for {tag}",
            U::NAME
        );
        let mut bytes = tag.to_be_bytes().to_vec();
        bytes.extend_from_slice(payload);
        let decoded = U::from_xdr(&bytes);

        match U::ON_UNKNOWN {
            UnknownTag::Reject => assert!(
                matches!(decoded, Err(XdrError::Malformed(_))),
                "{} got {decoded:?}",
                U::NAME
            ),
            UnknownTag::RawCode | UnknownTag::Marker => {
                let value = decoded.expect(U::NAME);
                assert_eq!(value.discriminant().value(), tag, "{}", U::NAME);
                assert_eq!(value.to_xdr().unwrap(), tag.to_be_bytes().to_vec(), "{}", U::NAME);
            }
            UnknownTag::Default => {
                let value = decoded.expect(U::NAME);
                let code = value.discriminant();
                assert!(
                    U::ARMS.iter().any(|arm| arm.code == code),
                    "{} defaulted to {code}, which has no arm",
                    U::NAME
                );
            }
        }
    }

    #[test]
    fn every_union_follows_its_declared_unknown_policy() {
        assert_unknown_policy::<TxResult>(-77, &[]);
        assert_unknown_policy::<OperationResult>(7, &[]);
        assert_unknown_policy::<Tr>(99, &[]);
        assert_unknown_policy::<CreateAccountResult>(-50, &[]);
        assert_unknown_policy::<PaymentResult>(-50, &[]);
        assert_unknown_policy::<PathPaymentResult>(-50, &[]);
        assert_unknown_policy::<ManageOfferResult>(-50, &[]);
        assert_unknown_policy::<SetOptionsResult>(-50, &[]);
        assert_unknown_policy::<ChangeTrustResult>(-50, &[]);
        assert_unknown_policy::<AllowTrustResult>(-50, &[]);
        assert_unknown_policy::<AccountMergeResult>(-50, &[]);
        assert_unknown_policy::<InflationResult>(-50, &[]);
        assert_unknown_policy::<ManageDataResult>(-50, &[]);
        assert_unknown_policy::<BumpSequenceResult>(-50, &[]);
        assert_unknown_policy::<ManageOfferEffect>(7, &offer_entry(1).to_xdr().unwrap());
        assert_unknown_policy::<PublicKey>(3, &[0u8; 32]);
        assert_unknown_policy::<Asset>(9, &[]);
    }

    #[test]
    fn single_payment_decodes_through_every_level() {
        let bytes = single_op_bytes(100, OperationType::PAYMENT, 0);
        let tx = TransactionResult::from_xdr(&bytes).expect("decode");

        assert_eq!(tx.fee_charged, 100);
        assert!(tx.is_success());
        assert_eq!(
            tx.operation_results(),
            &[OperationResult::Inner(Tr::Payment(PaymentResult::Success))]
        );
        assert!(tx.operation_results()[0].is_success());
    }

    #[test]
    fn error_code_has_no_operation_array() {
        let mut bytes = Vec::new();
        bytes.extend_from_slice(&100i64.to_be_bytes());
        bytes.extend_from_slice(&(-5i32).to_be_bytes());
        bytes.extend_from_slice(&0i32.to_be_bytes());

        let tx = TransactionResult::from_xdr(&bytes).expect("decode");
        assert_eq!(tx.result, TxResult::Error(TransactionResultCode::BAD_SEQ));
        assert_eq!(tx.code(), TransactionResultCode::BAD_SEQ);
        assert!(tx.operation_results().is_empty());
    }

    #[test]
    fn reserved_word_is_required() {
        let bytes = single_op_bytes(100, OperationType::PAYMENT, 0);
        let err = TransactionResult::from_xdr(&bytes[..bytes.len() - 4]).unwrap_err();
        assert!(err.is_truncated());
    }

    #[test]
    fn reserved_word_is_ignored_and_rewritten_as_zero() {
        let mut bytes = single_op_bytes(100, OperationType::PAYMENT, 0);
        let last = bytes.len() - 1;
        bytes[last] = 7;
        let tx = TransactionResult::from_xdr(&bytes).expect("decode");
        let reencoded = tx.to_xdr().unwrap();
        assert_eq!(&reencoded[last - 3..], &[0, 0, 0, 0]);
    }

    #[test]
    fn failed_transaction_keeps_operation_results() {
        let mut failed = single_op_bytes(200, OperationType::PAYMENT, -2);
        failed[8..12].copy_from_slice(&(-1i32).to_be_bytes());

        let tx = TransactionResult::from_xdr(&failed).expect("decode");
        assert!(!tx.is_success());
        assert_eq!(tx.code(), TransactionResultCode::FAILED);
        assert_eq!(
            tx.operation_results(),
            &[OperationResult::Inner(Tr::Payment(PaymentResult::Failure(
                PaymentResultCode::UNDERFUNDED
            )))]
        );
    }

    #[test]
    fn operation_outcomes_without_inner_result() {
        assert_eq!(
            OperationResult::from_xdr(&[0xFF, 0xFF, 0xFF, 0xFF]).unwrap(),
            OperationResult::BadAuth
        );
        assert_eq!(
            OperationResult::from_xdr(&[0xFF, 0xFF, 0xFF, 0xFE]).unwrap(),
            OperationResult::NoAccount
        );
    }

    #[test]
    fn unrecognized_operation_outcome_defaults_to_no_account() {
        let result = OperationResult::from_xdr(&[0, 0, 0, 5]).unwrap();
        assert_eq!(result, OperationResult::NoAccount);
        assert!(!result.is_success());
        assert_eq!(result.inner(), None);
    }

    #[test]
    fn unknown_operation_type_is_a_marker() {
        let tr = Tr::from_xdr(&[0, 0, 0, 99]).expect("decode");
        assert_eq!(tr, Tr::Unknown(OperationType(99)));
        assert!(!tr.is_success());
        assert_eq!(tr.to_xdr().unwrap(), vec![0, 0, 0, 99]);
    }

    #[test]
    fn passive_offer_shares_manage_offer_payload() {
        let bytes = wrap_tr(Tr::CreatePassiveOffer(ManageOfferResult::Failure(
            crate::codes::ManageOfferResultCode::CROSS_SELF,
        )));
        let tx = TransactionResult::from_xdr(&bytes).expect("decode");
        let tr = tx.operation_results()[0].inner().expect("inner");
        assert_eq!(tr.operation_type(), OperationType::CREATE_PASSIVE_OFFER);
        assert!(matches!(tr, Tr::CreatePassiveOffer(_)));
    }

    #[test]
    fn empty_operation_array() {
        let tx = success_result(10, vec![]);
        let bytes = tx.to_xdr().unwrap();
        assert_eq!(bytes.len(), 8 + 4 + 4 + 4);
        assert_eq!(TransactionResult::from_xdr(&bytes).unwrap(), tx);
    }

    #[test]
    fn base64_roundtrip() {
        let tx = success_result(
            100,
            vec![OperationResult::Inner(Tr::AccountMerge(
                AccountMergeResult::Success(42),
            ))],
        );
        let encoded = tx.to_xdr_base64().unwrap();
        assert_eq!(TransactionResult::from_xdr_base64(&encoded).unwrap(), tx);
    }
}
