//! Ledger types referenced by operation results: account ids, assets,
//! offers, and settlement records.

use serde::ser::Error as _;
use serde::{Serialize, Serializer};

use crate::codes::{AssetType, PublicKeyType};
use crate::error::XdrError;
use crate::xdr::{
    union_codec, Arm, ReadXdr, UnknownTag, WrappedData, WrappedData12, WrappedData32,
    WrappedData4, WriteXdr, XdrReader, XdrUnion, XdrWriter,
};

// ==============================================================================
// Keys and Accounts
// ==============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PublicKey {
    Ed25519(WrappedData32),
}

impl XdrUnion for PublicKey {
    type Code = PublicKeyType;
    const NAME: &'static str = "PublicKey";
    const ON_UNKNOWN: UnknownTag = UnknownTag::Reject;
    const ARMS: &'static [Arm<Self>] = &[Arm {
        code: PublicKeyType::ED25519,
        decode: |r| Ok(Self::Ed25519(r.decode()?)),
    }];

    fn discriminant(&self) -> PublicKeyType {
        match self {
            Self::Ed25519(_) => PublicKeyType::ED25519,
        }
    }

    fn write_payload(&self, w: &mut XdrWriter) -> Result<(), XdrError> {
        match self {
            Self::Ed25519(key) => w.encode(key),
        }
    }
}

/// An account, identified by its public key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AccountId(pub PublicKey);

impl AccountId {
    pub fn from_ed25519(key: [u8; 32]) -> Self {
        Self(PublicKey::Ed25519(WrappedData32::from(key)))
    }

    pub fn key_bytes(&self) -> &[u8] {
        match &self.0 {
            PublicKey::Ed25519(key) => key.as_bytes(),
        }
    }

    /// The `G...` text form, `None` unless the key is exactly 32 bytes.
    pub fn to_strkey(&self) -> Option<String> {
        let key: [u8; 32] = self.key_bytes().try_into().ok()?;
        Some(stellar_strkey::ed25519::PublicKey(key).to_string())
    }
}

impl std::fmt::Display for AccountId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match (self.to_strkey(), &self.0) {
            (Some(strkey), _) => f.write_str(&strkey),
            (None, PublicKey::Ed25519(key)) => write!(f, "ed25519:{}", key.to_hex()),
        }
    }
}

impl ReadXdr for AccountId {
    fn read_xdr(r: &mut XdrReader<'_>) -> Result<Self, XdrError> {
        Ok(Self(r.decode()?))
    }
}

impl WriteXdr for AccountId {
    fn write_xdr(&self, w: &mut XdrWriter) -> Result<(), XdrError> {
        w.encode(&self.0)
    }
}

impl Serialize for AccountId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let strkey = self
            .to_strkey()
            .ok_or_else(|| S::Error::custom("account key is not 32 bytes"))?;
        serializer.serialize_str(&strkey)
    }
}

// ==============================================================================
// Assets
// ==============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Asset {
    Native,
    CreditAlphanum4 {
        #[serde(rename = "code", serialize_with = "serialize_asset_code")]
        asset_code: WrappedData4,
        issuer: AccountId,
    },
    CreditAlphanum12 {
        #[serde(rename = "code", serialize_with = "serialize_asset_code")]
        asset_code: WrappedData12,
        issuer: AccountId,
    },
}

impl Asset {
    /// A credit asset, using the 4-byte code form when the code fits.
    ///
    /// Codes longer than 12 bytes have no wire form and are `Malformed`.
    pub fn credit(code: &str, issuer: AccountId) -> Result<Self, XdrError> {
        match code.len() {
            0..=4 => Ok(Self::CreditAlphanum4 {
                asset_code: WrappedData4::new(code.as_bytes()),
                issuer,
            }),
            5..=12 => Ok(Self::CreditAlphanum12 {
                asset_code: WrappedData12::new(code.as_bytes()),
                issuer,
            }),
            len => Err(XdrError::Malformed(format!(
                "asset code of {len} bytes exceeds {} bytes",
                WrappedData12::CAPACITY
            ))),
        }
    }

    pub fn is_native(&self) -> bool {
        matches!(self, Self::Native)
    }

    /// Asset code with NUL padding removed; `None` for the native asset.
    pub fn code(&self) -> Option<String> {
        match self {
            Self::Native => None,
            Self::CreditAlphanum4 { asset_code, .. } => Some(asset_code_text(asset_code)),
            Self::CreditAlphanum12 { asset_code, .. } => Some(asset_code_text(asset_code)),
        }
    }

    pub fn issuer(&self) -> Option<&AccountId> {
        match self {
            Self::Native => None,
            Self::CreditAlphanum4 { issuer, .. } | Self::CreditAlphanum12 { issuer, .. } => {
                Some(issuer)
            }
        }
    }
}

fn asset_code_text<const N: usize>(code: &WrappedData<N>) -> String {
    String::from_utf8_lossy(code.trimmed()).into_owned()
}

fn serialize_asset_code<const N: usize, S: Serializer>(
    code: &WrappedData<N>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&asset_code_text(code))
}

impl XdrUnion for Asset {
    type Code = AssetType;
    const NAME: &'static str = "Asset";
    const ON_UNKNOWN: UnknownTag = UnknownTag::Reject;
    const ARMS: &'static [Arm<Self>] = &[
        Arm {
            code: AssetType::NATIVE,
            decode: |_| Ok(Self::Native),
        },
        Arm {
            code: AssetType::CREDIT_ALPHANUM4,
            decode: |r| {
                Ok(Self::CreditAlphanum4 {
                    asset_code: r.decode()?,
                    issuer: r.decode()?,
                })
            },
        },
        Arm {
            code: AssetType::CREDIT_ALPHANUM12,
            decode: |r| {
                Ok(Self::CreditAlphanum12 {
                    asset_code: r.decode()?,
                    issuer: r.decode()?,
                })
            },
        },
    ];

    fn discriminant(&self) -> AssetType {
        match self {
            Self::Native => AssetType::NATIVE,
            Self::CreditAlphanum4 { .. } => AssetType::CREDIT_ALPHANUM4,
            Self::CreditAlphanum12 { .. } => AssetType::CREDIT_ALPHANUM12,
        }
    }

    fn write_payload(&self, w: &mut XdrWriter) -> Result<(), XdrError> {
        match self {
            Self::Native => Ok(()),
            Self::CreditAlphanum4 { asset_code, issuer } => {
                w.encode(asset_code)?;
                w.encode(issuer)
            }
            Self::CreditAlphanum12 { asset_code, issuer } => {
                w.encode(asset_code)?;
                w.encode(issuer)
            }
        }
    }
}

union_codec!(PublicKey, Asset);

// ==============================================================================
// Offers
// ==============================================================================

/// Offer price as the fraction `n / d`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Price {
    pub n: i32,
    pub d: i32,
}

impl ReadXdr for Price {
    fn read_xdr(r: &mut XdrReader<'_>) -> Result<Self, XdrError> {
        Ok(Self {
            n: r.decode()?,
            d: r.decode()?,
        })
    }
}

impl WriteXdr for Price {
    fn write_xdr(&self, w: &mut XdrWriter) -> Result<(), XdrError> {
        w.encode(&self.n)?;
        w.encode(&self.d)
    }
}

/// An offer as it stands on the ledger after a successful offer operation.
///
/// The trailing extension version is consumed on decode and written as 0.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct OfferEntry {
    #[serde(rename = "sellerID")]
    pub seller_id: AccountId,
    #[serde(rename = "offerID")]
    pub offer_id: u64,
    pub selling: Asset,
    pub buying: Asset,
    pub amount: i64,
    pub price: Price,
    pub flags: u32,
}

impl ReadXdr for OfferEntry {
    fn read_xdr(r: &mut XdrReader<'_>) -> Result<Self, XdrError> {
        let entry = Self {
            seller_id: r.decode()?,
            offer_id: r.decode()?,
            selling: r.decode()?,
            buying: r.decode()?,
            amount: r.decode()?,
            price: r.decode()?,
            flags: r.decode()?,
        };
        let _ext: i32 = r.decode()?;
        Ok(entry)
    }
}

impl WriteXdr for OfferEntry {
    fn write_xdr(&self, w: &mut XdrWriter) -> Result<(), XdrError> {
        w.encode(&self.seller_id)?;
        w.encode(&self.offer_id)?;
        w.encode(&self.selling)?;
        w.encode(&self.buying)?;
        w.encode(&self.amount)?;
        w.encode(&self.price)?;
        w.encode(&self.flags)?;
        w.encode(&0i32)
    }
}

/// One settlement against an existing offer while crossing the order book.
/// Order within an offers-claimed list is significant.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClaimOfferAtom {
    #[serde(rename = "sellerID")]
    pub seller_id: AccountId,
    #[serde(rename = "offerID")]
    pub offer_id: u64,
    pub asset_sold: Asset,
    pub amount_sold: i64,
    pub asset_bought: Asset,
    pub amount_bought: i64,
}

impl ReadXdr for ClaimOfferAtom {
    fn read_xdr(r: &mut XdrReader<'_>) -> Result<Self, XdrError> {
        Ok(Self {
            seller_id: r.decode()?,
            offer_id: r.decode()?,
            asset_sold: r.decode()?,
            amount_sold: r.decode()?,
            asset_bought: r.decode()?,
            amount_bought: r.decode()?,
        })
    }
}

impl WriteXdr for ClaimOfferAtom {
    fn write_xdr(&self, w: &mut XdrWriter) -> Result<(), XdrError> {
        w.encode(&self.seller_id)?;
        w.encode(&self.offer_id)?;
        w.encode(&self.asset_sold)?;
        w.encode(&self.amount_sold)?;
        w.encode(&self.asset_bought)?;
        w.encode(&self.amount_bought)
    }
}

// ==============================================================================
// Payments and Payouts
// ==============================================================================

/// The final leg of a path payment.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct SimplePaymentResult {
    pub destination: AccountId,
    pub asset: Asset,
    pub amount: i64,
}

impl ReadXdr for SimplePaymentResult {
    fn read_xdr(r: &mut XdrReader<'_>) -> Result<Self, XdrError> {
        Ok(Self {
            destination: r.decode()?,
            asset: r.decode()?,
            amount: r.decode()?,
        })
    }
}

impl WriteXdr for SimplePaymentResult {
    fn write_xdr(&self, w: &mut XdrWriter) -> Result<(), XdrError> {
        w.encode(&self.destination)?;
        w.encode(&self.asset)?;
        w.encode(&self.amount)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct InflationPayout {
    pub destination: AccountId,
    pub amount: i64,
}

impl ReadXdr for InflationPayout {
    fn read_xdr(r: &mut XdrReader<'_>) -> Result<Self, XdrError> {
        Ok(Self {
            destination: r.decode()?,
            amount: r.decode()?,
        })
    }
}

impl WriteXdr for InflationPayout {
    fn write_xdr(&self, w: &mut XdrWriter) -> Result<(), XdrError> {
        w.encode(&self.destination)?;
        w.encode(&self.amount)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::{account, credit_asset, offer_entry};

    #[test]
    fn account_id_wire_form_is_key_type_then_key() {
        let bytes = account(0x11).to_xdr().unwrap();
        assert_eq!(bytes.len(), 36);
        assert_eq!(&bytes[..4], &[0, 0, 0, 0]);
        assert!(bytes[4..].iter().all(|&b| b == 0x11));
    }

    #[test]
    fn account_strkey_matches_known_accounts() {
        assert_eq!(
            account(0).to_strkey().as_deref(),
            Some("GAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAWHF")
        );
        let issuer = AccountId::from_ed25519([
            0x64, 0x9f, 0xa8, 0xb4, 0xd3, 0x6e, 0x01, 0x54, 0xf5, 0x6e, 0xab, 0x68, 0x22, 0xe8,
            0xaf, 0x4b, 0x63, 0xf8, 0x1f, 0x72, 0x06, 0x39, 0x92, 0x98, 0x98, 0x93, 0x83, 0x63,
            0x65, 0x4b, 0x30, 0x81,
        ]);
        assert_eq!(
            issuer.to_string(),
            "GBSJ7KFU2NXACVHVN2VWQIXIV5FWH6A7OIDDTEUYTCJYGY3FJMYIDTU7"
        );
    }

    #[test]
    fn oversized_key_has_no_strkey() {
        let long = AccountId(PublicKey::Ed25519(WrappedData32::new(vec![1u8; 33])));
        assert_eq!(long.to_strkey(), None);
        assert!(long.to_string().starts_with("ed25519:0101"));
        assert!(serde_json::to_value(&long).is_err());
    }

    #[test]
    fn unsupported_public_key_type_is_malformed() {
        let mut buf = vec![0, 0, 0, 7];
        buf.extend_from_slice(&[0u8; 32]);
        let err = AccountId::from_xdr(&buf).unwrap_err();
        assert!(matches!(err, XdrError::Malformed(_)));
    }

    #[test]
    fn native_asset_has_no_payload() {
        let asset = Asset::from_xdr(&[0, 0, 0, 0]).expect("native");
        assert!(asset.is_native());
        assert_eq!(asset.code(), None);
    }

    #[test]
    fn alphanum4_asset_decodes_code_and_issuer() {
        let mut buf = vec![0, 0, 0, 1];
        buf.extend_from_slice(b"KIN\0");
        buf.extend_from_slice(&account(0x22).to_xdr().unwrap());

        let asset = Asset::from_xdr(&buf).expect("alphanum4");
        assert_eq!(asset.code().as_deref(), Some("KIN"));
        assert_eq!(asset.issuer(), Some(&account(0x22)));
        assert_eq!(asset.to_xdr().unwrap(), buf);
    }

    #[test]
    fn credit_picks_code_width() {
        assert!(matches!(
            credit_asset("USD", 1),
            Asset::CreditAlphanum4 { .. }
        ));
        assert!(matches!(
            credit_asset("LONGERCODE", 1),
            Asset::CreditAlphanum12 { .. }
        ));
    }

    #[test]
    fn credit_rejects_codes_without_a_wire_form() {
        let err = Asset::credit("ABCDEFGHIJKLM", account(1)).unwrap_err();
        assert!(matches!(err, XdrError::Malformed(_)), "got {err:?}");
    }

    #[test]
    fn twelve_byte_code_roundtrips_with_issuer() {
        let asset = Asset::credit("ABCDEFGHIJKL", account(1)).expect("fits");
        let bytes = asset.to_xdr().unwrap();
        assert_eq!(bytes.len(), 4 + 12 + 36);
        assert_eq!(Asset::from_xdr(&bytes).unwrap(), asset);
    }

    #[test]
    fn unsupported_asset_type_is_malformed() {
        let err = Asset::from_xdr(&[0, 0, 0, 3]).unwrap_err();
        assert!(matches!(err, XdrError::Malformed(_)));
    }

    #[test]
    fn truncated_issuer_is_truncated() {
        let mut buf = vec![0, 0, 0, 2];
        buf.extend_from_slice(b"LONGERCODE\0\0");
        buf.extend_from_slice(&[0, 0, 0, 0, 1, 2, 3]);
        assert!(Asset::from_xdr(&buf).unwrap_err().is_truncated());
    }

    #[test]
    fn offer_entry_extension_is_consumed() {
        let offer = offer_entry(42);
        let mut bytes = offer.to_xdr().unwrap();
        let ext_at = bytes.len() - 4;
        assert_eq!(&bytes[ext_at..], &[0, 0, 0, 0]);

        bytes[ext_at + 3] = 1;
        let mut r = XdrReader::new(&bytes);
        let decoded = OfferEntry::read_xdr(&mut r).expect("decode");
        assert_eq!(decoded, offer);
        assert_eq!(r.remaining(), 0);
    }

    #[test]
    fn asset_projection_uses_type_tag() {
        let value = serde_json::to_value(credit_asset("KIN", 0)).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "type": "credit_alphanum4",
                "code": "KIN",
                "issuer": "GAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAWHF",
            })
        );
        assert_eq!(
            serde_json::to_value(Asset::Native).unwrap(),
            serde_json::json!({ "type": "native" })
        );
    }
}
