//! Journal record framing
//!
//! Each record is framed as:
//!
//! ```text
//! +----------------+------------------------------+
//! | Record Length  | u32 LE, includes this field  |
//! | Kind           | u8: allocate/write/dealloc   |
//! | Sequence       | u64 LE                       |
//! | Address        | 32 bytes                     |
//! | Payload Length | u32 LE                       |
//! | Payload        | variable                     |
//! | Checksum       | u32 LE, CRC32 of all above   |
//! +----------------+------------------------------+
//! ```

use crate::derive::Address;

use super::checksum::{compute_checksum, verify_checksum};
use super::errors::{JournalError, JournalResult};

/// Fixed framing overhead: length + kind + sequence + address + payload
/// length + checksum.
pub(crate) const FRAME_LEN: usize = 4 + 1 + 8 + 32 + 4 + 4;

/// The ledger-level transition a journal record describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum TransitionKind {
    /// A zeroed slot came into existence, funded to its rent minimum.
    /// Payload: size (u32 LE) + deposited balance (u64 LE).
    Allocate = 0,
    /// Slot contents were rewritten in place. Payload: the new contents.
    Write = 1,
    /// The slot was zeroed and released. Payload: empty.
    Deallocate = 2,
}

impl TransitionKind {
    /// Converts from the wire byte; `None` for unknown values.
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(TransitionKind::Allocate),
            1 => Some(TransitionKind::Write),
            2 => Some(TransitionKind::Deallocate),
            _ => None,
        }
    }

    /// Converts to the wire byte.
    pub fn as_u8(self) -> u8 {
        self as u8
    }
}

/// One framed journal record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JournalRecord {
    /// Strictly increasing, assigned by the writer, never reused.
    pub seq: u64,
    /// The transition this record describes.
    pub kind: TransitionKind,
    /// The slot address the transition applied to.
    pub address: Address,
    /// Kind-specific payload.
    pub payload: Vec<u8>,
}

impl JournalRecord {
    /// Builds the allocate payload: size then deposited balance.
    pub fn allocation_payload(size: u32, balance: u64) -> [u8; 12] {
        let mut payload = [0u8; 12];
        payload[..4].copy_from_slice(&size.to_le_bytes());
        payload[4..].copy_from_slice(&balance.to_le_bytes());
        payload
    }

    /// Parses an allocate payload back into `(size, balance)`.
    ///
    /// # Errors
    ///
    /// `JournalError::Corrupt` if this record is not an allocate record or
    /// its payload is malformed. The reported offset is relative; callers
    /// that know the file offset substitute their own.
    pub fn allocation_params(&self) -> JournalResult<(u32, u64)> {
        if self.kind != TransitionKind::Allocate || self.payload.len() != 12 {
            return Err(JournalError::Corrupt {
                offset: 0,
                reason: format!(
                    "allocate payload malformed: kind {:?}, {} bytes",
                    self.kind,
                    self.payload.len()
                ),
            });
        }
        let mut size = [0u8; 4];
        size.copy_from_slice(&self.payload[..4]);
        let mut balance = [0u8; 8];
        balance.copy_from_slice(&self.payload[4..]);
        Ok((u32::from_le_bytes(size), u64::from_le_bytes(balance)))
    }

    /// Serializes the record, computing length prefix and checksum.
    pub fn serialize(&self) -> Vec<u8> {
        let record_length = (FRAME_LEN + self.payload.len()) as u32;

        let mut buf = Vec::with_capacity(record_length as usize);
        buf.extend_from_slice(&record_length.to_le_bytes());
        buf.push(self.kind.as_u8());
        buf.extend_from_slice(&self.seq.to_le_bytes());
        buf.extend_from_slice(self.address.as_bytes());
        buf.extend_from_slice(&(self.payload.len() as u32).to_le_bytes());
        buf.extend_from_slice(&self.payload);

        let checksum = compute_checksum(&buf);
        buf.extend_from_slice(&checksum.to_le_bytes());
        buf
    }

    /// Deserializes one record from the front of `data`, verifying the
    /// checksum. Returns the record and the number of bytes consumed.
    /// Offsets in errors are relative to `data`; callers add their own base.
    pub fn deserialize(data: &[u8]) -> JournalResult<(Self, usize)> {
        let corrupt = |offset: usize, reason: String| JournalError::Corrupt {
            offset: offset as u64,
            reason,
        };

        if data.len() < FRAME_LEN {
            return Err(corrupt(
                0,
                format!("truncated frame: {} bytes, minimum is {}", data.len(), FRAME_LEN),
            ));
        }

        let record_length = u32_at(data, 0) as usize;
        if record_length < FRAME_LEN {
            return Err(corrupt(0, format!("invalid record length {}", record_length)));
        }
        if data.len() < record_length {
            return Err(corrupt(
                0,
                format!("truncated record: need {} bytes, have {}", record_length, data.len()),
            ));
        }

        let checksum_offset = record_length - 4;
        let stored_checksum = u32_at(data, checksum_offset);
        if !verify_checksum(&data[..checksum_offset], stored_checksum) {
            return Err(corrupt(0, "checksum mismatch".to_string()));
        }

        let kind = TransitionKind::from_u8(data[4])
            .ok_or_else(|| corrupt(4, format!("unknown transition kind {}", data[4])))?;

        let mut seq = [0u8; 8];
        seq.copy_from_slice(&data[5..13]);

        let mut address = [0u8; 32];
        address.copy_from_slice(&data[13..45]);

        let payload_len = u32_at(data, 45) as usize;
        if FRAME_LEN + payload_len != record_length {
            return Err(corrupt(
                45,
                format!(
                    "payload length {} disagrees with record length {}",
                    payload_len, record_length
                ),
            ));
        }
        let payload = data[49..49 + payload_len].to_vec();

        Ok((
            Self {
                seq: u64::from_le_bytes(seq),
                kind,
                address: Address::from_bytes(address),
                payload,
            },
            record_length,
        ))
    }
}

fn u32_at(bytes: &[u8], offset: usize) -> u32 {
    let mut raw = [0u8; 4];
    raw.copy_from_slice(&bytes[offset..offset + 4]);
    u32::from_le_bytes(raw)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_address() -> Address {
        Address::from_bytes([7u8; 32])
    }

    #[test]
    fn test_record_roundtrip() {
        let record = JournalRecord {
            seq: 3,
            kind: TransitionKind::Write,
            address: sample_address(),
            payload: vec![1, 2, 3, 4],
        };
        let serialized = record.serialize();
        let (deserialized, consumed) = JournalRecord::deserialize(&serialized).unwrap();
        assert_eq!(deserialized, record);
        assert_eq!(consumed, serialized.len());
    }

    #[test]
    fn test_empty_payload_roundtrip() {
        let record = JournalRecord {
            seq: 1,
            kind: TransitionKind::Deallocate,
            address: sample_address(),
            payload: Vec::new(),
        };
        let serialized = record.serialize();
        let (deserialized, _) = JournalRecord::deserialize(&serialized).unwrap();
        assert_eq!(deserialized, record);
    }

    #[test]
    fn test_checksum_detects_corruption() {
        let record = JournalRecord {
            seq: 1,
            kind: TransitionKind::Write,
            address: sample_address(),
            payload: vec![9; 16],
        };
        let mut serialized = record.serialize();
        let mid = serialized.len() / 2;
        serialized[mid] ^= 0xFF;
        assert!(matches!(
            JournalRecord::deserialize(&serialized),
            Err(JournalError::Corrupt { .. })
        ));
    }

    #[test]
    fn test_unknown_kind_rejected() {
        let record = JournalRecord {
            seq: 1,
            kind: TransitionKind::Allocate,
            address: sample_address(),
            payload: JournalRecord::allocation_payload(66, 1552).to_vec(),
        };
        let mut serialized = record.serialize();
        serialized[4] = 99;
        // Fix the checksum so only the kind is bad
        let checksum_offset = serialized.len() - 4;
        let checksum = compute_checksum(&serialized[..checksum_offset]);
        serialized[checksum_offset..].copy_from_slice(&checksum.to_le_bytes());
        assert!(matches!(
            JournalRecord::deserialize(&serialized),
            Err(JournalError::Corrupt { .. })
        ));
    }

    #[test]
    fn test_allocation_payload_roundtrip() {
        let record = JournalRecord {
            seq: 1,
            kind: TransitionKind::Allocate,
            address: sample_address(),
            payload: JournalRecord::allocation_payload(66, 1552).to_vec(),
        };
        assert_eq!(record.allocation_params().unwrap(), (66, 1552));
    }

    #[test]
    fn test_allocation_params_rejects_wrong_kind() {
        let record = JournalRecord {
            seq: 1,
            kind: TransitionKind::Write,
            address: sample_address(),
            payload: vec![0; 12],
        };
        assert!(record.allocation_params().is_err());
    }

    #[test]
    fn test_truncated_frame_rejected() {
        let record = JournalRecord {
            seq: 1,
            kind: TransitionKind::Write,
            address: sample_address(),
            payload: vec![1, 2, 3],
        };
        let serialized = record.serialize();
        assert!(matches!(
            JournalRecord::deserialize(&serialized[..10]),
            Err(JournalError::Corrupt { .. })
        ));
    }
}
