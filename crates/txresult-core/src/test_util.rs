//! Shared test helpers for `txresult-core` unit tests.
//!
//! Builders for accounts, assets, offers, and whole transaction results so
//! tests across modules construct dummy ledger data the same way.

use crate::codes::OperationType;
use crate::results::{OperationResult, TransactionResult, Tr, TxResult};
use crate::types::{AccountId, Asset, ClaimOfferAtom, OfferEntry, Price};
use crate::xdr::WriteXdr;

// ==============================================================================
// Ledger Builders
// ==============================================================================

/// An account whose 32-byte key is `b` repeated.
pub fn account(b: u8) -> AccountId {
    AccountId::from_ed25519([b; 32])
}

/// A credit asset issued by `account(issuer)`.
pub fn credit_asset(code: &str, issuer: u8) -> Asset {
    Asset::credit(code, account(issuer)).expect("asset code fits 12 bytes")
}

/// An offer selling the native asset for `USD`, keyed by `offer_id`.
pub fn offer_entry(offer_id: u64) -> OfferEntry {
    OfferEntry {
        seller_id: account(0x0A),
        offer_id,
        selling: Asset::Native,
        buying: credit_asset("USD", 0x0B),
        amount: 500_000_000,
        price: Price { n: 3, d: 2 },
        flags: 0,
    }
}

/// A claimed offer selling `USD` for the native asset, keyed by `offer_id`.
pub fn claim_offer_atom(offer_id: u64) -> ClaimOfferAtom {
    ClaimOfferAtom {
        seller_id: account(0x0C),
        offer_id,
        asset_sold: credit_asset("USD", 0x0B),
        amount_sold: 1_000,
        asset_bought: Asset::Native,
        amount_bought: 1_500,
    }
}

// ==============================================================================
// Result Builders
// ==============================================================================

/// A successful transaction carrying `ops`.
pub fn success_result(fee_charged: i64, ops: Vec<OperationResult>) -> TransactionResult {
    TransactionResult {
        fee_charged,
        result: TxResult::Success(ops),
    }
}

/// Wire bytes for a transaction result whose single inner operation result
/// has type `op` and a bare result code `code`.
pub fn single_op_bytes(fee_charged: i64, op: OperationType, code: i32) -> Vec<u8> {
    let mut buf = Vec::new();
    buf.extend_from_slice(&fee_charged.to_be_bytes());
    buf.extend_from_slice(&0i32.to_be_bytes());
    buf.extend_from_slice(&1u32.to_be_bytes());
    buf.extend_from_slice(&0i32.to_be_bytes());
    buf.extend_from_slice(&op.value().to_be_bytes());
    buf.extend_from_slice(&code.to_be_bytes());
    buf.extend_from_slice(&0i32.to_be_bytes());
    buf
}

/// Encode a single `Tr` wrapped as a successful one-operation transaction.
pub fn wrap_tr(tr: Tr) -> Vec<u8> {
    success_result(100, vec![OperationResult::Inner(tr)])
        .to_xdr()
        .expect("encode")
}
