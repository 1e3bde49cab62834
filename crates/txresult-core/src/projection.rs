//! Structured projection of the result tree.
//!
//! Each operation result renders as `{ "name": <operation>, <field>: <value> }`
//! where the name is a stable string chosen per variant, not derived from
//! the wire discriminant. Simple results use `result` for the bare code;
//! rich results use `success`, `failure`, or `no_issuer`.

use serde::ser::{SerializeMap, SerializeStruct};
use serde::{Serialize, Serializer};

use crate::results::{
    AccountMergeResult, AllowTrustResult, BumpSequenceResult, ChangeTrustResult,
    CreateAccountResult, InflationResult, ManageDataResult, ManageOfferResult,
    OperationResult, PathPaymentResult, PaymentResult, SetOptionsResult, TransactionResult, Tr,
    TxResult,
};

/// A per-operation result that renders as the field(s) following `name`.
pub trait Outcome {
    /// Operation name used when the result is rendered on its own.
    const NAME: &'static str;

    fn serialize_outcome<M: SerializeMap>(&self, map: &mut M) -> Result<(), M::Error>;
}

fn serialize_named<O, S>(name: &str, outcome: &O, serializer: S) -> Result<S::Ok, S::Error>
where
    O: Outcome + ?Sized,
    S: Serializer,
{
    let mut map = serializer.serialize_map(None)?;
    map.serialize_entry("name", name)?;
    outcome.serialize_outcome(&mut map)?;
    map.end()
}

// ==============================================================================
// Per-Operation Outcomes
// ==============================================================================

macro_rules! code_only_outcome {
    ($($ty:ident => $name:literal),* $(,)?) => {
        $(
            impl Outcome for $ty {
                const NAME: &'static str = $name;

                fn serialize_outcome<M: SerializeMap>(&self, map: &mut M) -> Result<(), M::Error> {
                    map.serialize_entry("result", &self.code())
                }
            }
        )*
    };
}

code_only_outcome! {
    CreateAccountResult => "create_account",
    PaymentResult => "payment",
    SetOptionsResult => "set_options",
    ChangeTrustResult => "change_trust",
    AllowTrustResult => "allow_trust",
    ManageDataResult => "manage_data",
    BumpSequenceResult => "bump_sequence",
}

impl Outcome for PathPaymentResult {
    const NAME: &'static str = "path_payment";

    fn serialize_outcome<M: SerializeMap>(&self, map: &mut M) -> Result<(), M::Error> {
        match self {
            Self::Success(success) => map.serialize_entry("success", success),
            Self::NoIssuer(asset) => map.serialize_entry("no_issuer", asset),
            Self::Failure(code) => map.serialize_entry("failure", code),
        }
    }
}

impl Outcome for ManageOfferResult {
    const NAME: &'static str = "manage_offer";

    fn serialize_outcome<M: SerializeMap>(&self, map: &mut M) -> Result<(), M::Error> {
        match self {
            Self::Success(success) => map.serialize_entry("success", success),
            Self::Failure(code) => map.serialize_entry("failure", code),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct MergeSuccess {
    source_account_balance: i64,
}

impl Outcome for AccountMergeResult {
    const NAME: &'static str = "account_merge";

    fn serialize_outcome<M: SerializeMap>(&self, map: &mut M) -> Result<(), M::Error> {
        match *self {
            Self::Success(balance) => map.serialize_entry(
                "success",
                &MergeSuccess {
                    source_account_balance: balance,
                },
            ),
            Self::Failure(code) => map.serialize_entry("failure", &code),
        }
    }
}

impl Outcome for InflationResult {
    const NAME: &'static str = "inflation";

    fn serialize_outcome<M: SerializeMap>(&self, map: &mut M) -> Result<(), M::Error> {
        match self {
            Self::Success(payouts) => map.serialize_entry("success", payouts),
            Self::Failure(code) => map.serialize_entry("failure", code),
        }
    }
}

macro_rules! serialize_as_named {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Serialize for $ty {
                fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                    serialize_named(<$ty as Outcome>::NAME, self, serializer)
                }
            }
        )*
    };
}

serialize_as_named!(
    CreateAccountResult,
    PaymentResult,
    PathPaymentResult,
    ManageOfferResult,
    SetOptionsResult,
    ChangeTrustResult,
    AllowTrustResult,
    AccountMergeResult,
    InflationResult,
    ManageDataResult,
    BumpSequenceResult,
);

// ==============================================================================
// Result Tree
// ==============================================================================

impl Tr {
    /// Stable projection name of the operation, `"unknown"` for
    /// unrecognized operation types.
    pub fn operation_name(&self) -> &'static str {
        match self {
            Self::CreateAccount(_) => CreateAccountResult::NAME,
            Self::Payment(_) => PaymentResult::NAME,
            Self::PathPayment(_) => PathPaymentResult::NAME,
            Self::ManageOffer(_) => ManageOfferResult::NAME,
            Self::CreatePassiveOffer(_) => "create_passive_offer",
            Self::SetOptions(_) => SetOptionsResult::NAME,
            Self::ChangeTrust(_) => ChangeTrustResult::NAME,
            Self::AllowTrust(_) => AllowTrustResult::NAME,
            Self::AccountMerge(_) => AccountMergeResult::NAME,
            Self::Inflation(_) => InflationResult::NAME,
            Self::ManageData(_) => ManageDataResult::NAME,
            Self::BumpSequence(_) => BumpSequenceResult::NAME,
            Self::Unknown(_) => "unknown",
        }
    }
}

impl Serialize for Tr {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let name = self.operation_name();
        match self {
            Self::CreateAccount(result) => serialize_named(name, result, serializer),
            Self::Payment(result) => serialize_named(name, result, serializer),
            Self::PathPayment(result) => serialize_named(name, result, serializer),
            Self::ManageOffer(result) | Self::CreatePassiveOffer(result) => {
                serialize_named(name, result, serializer)
            }
            Self::SetOptions(result) => serialize_named(name, result, serializer),
            Self::ChangeTrust(result) => serialize_named(name, result, serializer),
            Self::AllowTrust(result) => serialize_named(name, result, serializer),
            Self::AccountMerge(result) => serialize_named(name, result, serializer),
            Self::Inflation(result) => serialize_named(name, result, serializer),
            Self::ManageData(result) => serialize_named(name, result, serializer),
            Self::BumpSequence(result) => serialize_named(name, result, serializer),
            Self::Unknown(_) => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("name", name)?;
                map.end()
            }
        }
    }
}

impl Serialize for OperationResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Inner(tr) => tr.serialize(serializer),
            Self::BadAuth | Self::NoAccount => self.code().serialize(serializer),
        }
    }
}

impl Serialize for TxResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        match self {
            Self::Success(ops) => map.serialize_entry("success", ops)?,
            Self::Failed(ops) => map.serialize_entry("failed", ops)?,
            Self::Error(code) => map.serialize_entry("error", code)?,
        }
        map.end()
    }
}

impl Serialize for TransactionResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("TransactionResult", 2)?;
        state.serialize_field("feeCharged", &self.fee_charged)?;
        state.serialize_field("result", &self.result)?;
        state.end()
    }
}
