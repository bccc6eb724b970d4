//! Expense record layout and codec
//!
//! The encoded record format is:
//!
//! ```text
//! +--------------------+------------------------+
//! | Type Tag           | 4 bytes, "EXP1"        |
//! | Record Id          | u64 LE                 |
//! | Owner              | 32 bytes               |
//! | Merchant Name Len  | u8                     |
//! | Merchant Name      | 12 bytes, zero-padded  |
//! | Amount             | u64 LE                 |
//! | Bump               | u8                     |
//! +--------------------+------------------------+
//! ```
//!
//! 66 bytes total. The owner field sits at a fixed offset so scans can
//! filter on it without decoding the whole record.

use serde::{Deserialize, Serialize};

use crate::identity::Identity;

use super::errors::{CodecError, CodecResult};

/// Authenticity header written first in every encoded record. A new layout
/// (for example a wider merchant-name bound) gets a new tag, never an
/// in-place migration.
pub const RECORD_TYPE_TAG: [u8; 4] = *b"EXP1";

/// Upper bound on the merchant name payload, in bytes. Fixed: it determines
/// the slot size, and slots never resize.
pub const MERCHANT_NAME_MAX: usize = 12;

/// Byte offset of the owner field within the encoded layout.
pub const OWNER_OFFSET: usize = 12;

/// Byte length of the owner field.
pub const OWNER_LEN: usize = 32;

/// Total encoded size: tag + id + owner + name len + name + amount + bump.
pub const ENCODED_LEN: usize = 4 + 8 + OWNER_LEN + 1 + MERCHANT_NAME_MAX + 8 + 1;

const NAME_LEN_OFFSET: usize = OWNER_OFFSET + OWNER_LEN;
const NAME_OFFSET: usize = NAME_LEN_OFFSET + 1;
const AMOUNT_OFFSET: usize = NAME_OFFSET + MERCHANT_NAME_MAX;
const BUMP_OFFSET: usize = AMOUNT_OFFSET + 8;

/// One expense record, as persisted at a derived address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpenseRecord {
    /// Caller-chosen id, unique per owner. Part of the address derivation:
    /// a different id is a different record.
    pub id: u64,
    /// Set once at creation, immutable thereafter.
    pub owner: Identity,
    /// Mutable. At most [`MERCHANT_NAME_MAX`] bytes of UTF-8.
    pub merchant_name: String,
    /// Mutable. No currency semantics at this layer.
    pub amount: u64,
    /// The disambiguation nonce the deriver produced for this record's
    /// address, stored so the address is reconstructible without searching.
    pub bump: u8,
}

impl ExpenseRecord {
    /// Encodes the record into the fixed layout.
    ///
    /// # Errors
    ///
    /// `CodecError::FieldTooLong` if the merchant name exceeds the bound.
    pub fn encode(&self) -> CodecResult<[u8; ENCODED_LEN]> {
        let name = self.merchant_name.as_bytes();
        if name.len() > MERCHANT_NAME_MAX {
            return Err(CodecError::FieldTooLong {
                len: name.len(),
                max: MERCHANT_NAME_MAX,
            });
        }

        let mut buf = [0u8; ENCODED_LEN];
        buf[..4].copy_from_slice(&RECORD_TYPE_TAG);
        buf[4..12].copy_from_slice(&self.id.to_le_bytes());
        buf[OWNER_OFFSET..OWNER_OFFSET + OWNER_LEN].copy_from_slice(self.owner.as_bytes());
        buf[NAME_LEN_OFFSET] = name.len() as u8;
        buf[NAME_OFFSET..NAME_OFFSET + name.len()].copy_from_slice(name);
        buf[AMOUNT_OFFSET..AMOUNT_OFFSET + 8].copy_from_slice(&self.amount.to_le_bytes());
        buf[BUMP_OFFSET] = self.bump;
        Ok(buf)
    }

    /// Decodes a record from slot bytes, validating the type tag first.
    ///
    /// # Errors
    ///
    /// - `BufferTooShort` if the input is smaller than the fixed layout
    /// - `TypeMismatch` if the header is not [`RECORD_TYPE_TAG`]
    /// - `FieldTooLong` if the stored length byte exceeds the bound
    /// - `InvalidUtf8` if the stored name bytes are not valid text
    pub fn decode(bytes: &[u8]) -> CodecResult<Self> {
        if bytes.len() < ENCODED_LEN {
            return Err(CodecError::BufferTooShort {
                len: bytes.len(),
                need: ENCODED_LEN,
            });
        }
        if bytes[..4] != RECORD_TYPE_TAG {
            return Err(CodecError::TypeMismatch);
        }

        let name_len = bytes[NAME_LEN_OFFSET] as usize;
        if name_len > MERCHANT_NAME_MAX {
            return Err(CodecError::FieldTooLong {
                len: name_len,
                max: MERCHANT_NAME_MAX,
            });
        }
        let merchant_name = std::str::from_utf8(&bytes[NAME_OFFSET..NAME_OFFSET + name_len])
            .map_err(|_| CodecError::InvalidUtf8)?
            .to_string();

        let mut owner = [0u8; OWNER_LEN];
        owner.copy_from_slice(&bytes[OWNER_OFFSET..OWNER_OFFSET + OWNER_LEN]);

        Ok(Self {
            id: u64_at(bytes, 4),
            owner: Identity::from_bytes(owner),
            merchant_name,
            amount: u64_at(bytes, AMOUNT_OFFSET),
            bump: bytes[BUMP_OFFSET],
        })
    }
}

fn u64_at(bytes: &[u8], offset: usize) -> u64 {
    let mut raw = [0u8; 8];
    raw.copy_from_slice(&bytes[offset..offset + 8]);
    u64::from_le_bytes(raw)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identity::Keypair;

    fn sample_record() -> ExpenseRecord {
        ExpenseRecord {
            id: 1,
            owner: Keypair::generate().identity(),
            merchant_name: "Cafe Shop".to_string(),
            amount: 10,
            bump: 254,
        }
    }

    #[test]
    fn test_encoded_len_matches_layout() {
        assert_eq!(ENCODED_LEN, 66);
        let record = sample_record();
        assert_eq!(record.encode().unwrap().len(), ENCODED_LEN);
    }

    #[test]
    fn test_record_roundtrip() {
        let record = sample_record();
        let encoded = record.encode().unwrap();
        assert_eq!(ExpenseRecord::decode(&encoded).unwrap(), record);
    }

    #[test]
    fn test_roundtrip_at_name_bound() {
        let mut record = sample_record();
        record.merchant_name = "x".repeat(MERCHANT_NAME_MAX);
        let encoded = record.encode().unwrap();
        assert_eq!(ExpenseRecord::decode(&encoded).unwrap(), record);
    }

    #[test]
    fn test_roundtrip_empty_name() {
        let mut record = sample_record();
        record.merchant_name = String::new();
        let encoded = record.encode().unwrap();
        assert_eq!(ExpenseRecord::decode(&encoded).unwrap(), record);
    }

    #[test]
    fn test_encode_rejects_long_name() {
        let mut record = sample_record();
        record.merchant_name = "thirteen chars".to_string();
        assert_eq!(
            record.encode(),
            Err(CodecError::FieldTooLong { len: 14, max: MERCHANT_NAME_MAX })
        );
    }

    #[test]
    fn test_decode_rejects_short_buffer() {
        let encoded = sample_record().encode().unwrap();
        assert_eq!(
            ExpenseRecord::decode(&encoded[..ENCODED_LEN - 1]),
            Err(CodecError::BufferTooShort { len: ENCODED_LEN - 1, need: ENCODED_LEN })
        );
    }

    #[test]
    fn test_decode_rejects_wrong_tag() {
        let mut encoded = sample_record().encode().unwrap();
        encoded[0] = b'X';
        assert_eq!(ExpenseRecord::decode(&encoded), Err(CodecError::TypeMismatch));
    }

    #[test]
    fn test_decode_rejects_corrupt_name_length() {
        let mut encoded = sample_record().encode().unwrap();
        encoded[OWNER_OFFSET + OWNER_LEN] = MERCHANT_NAME_MAX as u8 + 1;
        assert!(matches!(
            ExpenseRecord::decode(&encoded),
            Err(CodecError::FieldTooLong { .. })
        ));
    }

    #[test]
    fn test_decode_rejects_invalid_utf8() {
        let mut record = sample_record();
        record.merchant_name = "ab".to_string();
        let mut encoded = record.encode().unwrap();
        // 0xFF is never valid UTF-8
        encoded[OWNER_OFFSET + OWNER_LEN + 1] = 0xFF;
        assert_eq!(ExpenseRecord::decode(&encoded), Err(CodecError::InvalidUtf8));
    }

    #[test]
    fn test_owner_field_sits_at_documented_offset() {
        let record = sample_record();
        let encoded = record.encode().unwrap();
        assert_eq!(
            &encoded[OWNER_OFFSET..OWNER_OFFSET + OWNER_LEN],
            record.owner.as_bytes()
        );
    }
}
