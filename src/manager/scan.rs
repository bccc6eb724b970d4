//! Owner scans
//!
//! `list_by_owner` is not a state transition: it is an equality filter
//! over a snapshot of allocated slots, comparing the owner byte range at
//! its fixed encoded offset. Only matching slots are decoded.

use crate::codec::{ExpenseRecord, OWNER_LEN, OWNER_OFFSET};
use crate::derive::Address;
use crate::identity::Identity;

use super::errors::{LifecycleError, LifecycleResult};

/// Lazy iterator over one owner's records.
///
/// Holds its own snapshot: the sequence is finite, restartable (a new
/// scan takes a new snapshot), and stable for as long as this scan lives.
/// A slot that matches the owner filter but fails to decode yields its
/// codec error rather than being skipped; corruption is surfaced, not
/// papered over.
pub struct OwnerScan {
    slots: Vec<(Address, Vec<u8>)>,
    owner: Identity,
    pos: usize,
}

impl OwnerScan {
    pub(crate) fn new(slots: Vec<(Address, Vec<u8>)>, owner: Identity) -> Self {
        Self {
            slots,
            owner,
            pos: 0,
        }
    }

    /// Whether `bytes` holds this scan's owner at the fixed owner offset.
    /// Slots too small to carry an owner field never match.
    fn matches(&self, bytes: &[u8]) -> bool {
        bytes.len() >= OWNER_OFFSET + OWNER_LEN
            && &bytes[OWNER_OFFSET..OWNER_OFFSET + OWNER_LEN] == self.owner.as_bytes()
    }
}

impl Iterator for OwnerScan {
    type Item = LifecycleResult<ExpenseRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        while self.pos < self.slots.len() {
            let index = self.pos;
            self.pos += 1;
            let (_, bytes) = &self.slots[index];
            if self.matches(bytes) {
                return Some(ExpenseRecord::decode(bytes).map_err(LifecycleError::from));
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::RECORD_TYPE_TAG;
    use crate::identity::Keypair;

    fn encoded(owner: &Identity, id: u64) -> Vec<u8> {
        ExpenseRecord {
            id,
            owner: *owner,
            merchant_name: "Cafe Shop".to_string(),
            amount: 10,
            bump: 255,
        }
        .encode()
        .unwrap()
        .to_vec()
    }

    fn addr(byte: u8) -> Address {
        Address::from_bytes([byte; 32])
    }

    #[test]
    fn test_scan_filters_on_owner_range() {
        let alice = Keypair::generate().identity();
        let bob = Keypair::generate().identity();
        let slots = vec![
            (addr(1), encoded(&alice, 1)),
            (addr(2), encoded(&bob, 1)),
            (addr(3), encoded(&alice, 2)),
        ];

        let records: Vec<_> = OwnerScan::new(slots, alice)
            .collect::<Result<_, _>>()
            .unwrap();
        assert_eq!(records.len(), 2);
        assert!(records.iter().all(|r| r.owner == alice));
    }

    #[test]
    fn test_scan_skips_foreign_slots() {
        let alice = Keypair::generate().identity();
        let slots = vec![
            (addr(1), vec![0u8; 4]),
            (addr(2), encoded(&alice, 1)),
        ];

        let records: Vec<_> = OwnerScan::new(slots, alice)
            .collect::<Result<_, _>>()
            .unwrap();
        assert_eq!(records.len(), 1);
    }

    #[test]
    fn test_scan_surfaces_corrupt_matching_slot() {
        let alice = Keypair::generate().identity();
        let mut corrupt = encoded(&alice, 1);
        corrupt[0] = RECORD_TYPE_TAG[0] ^ 0xFF;
        let slots = vec![(addr(1), corrupt)];

        let results: Vec<_> = OwnerScan::new(slots, alice).collect();
        assert_eq!(results.len(), 1);
        assert!(matches!(results[0], Err(LifecycleError::Codec(_))));
    }

    #[test]
    fn test_scan_of_empty_snapshot() {
        let alice = Keypair::generate().identity();
        assert_eq!(OwnerScan::new(Vec::new(), alice).count(), 0);
    }
}
