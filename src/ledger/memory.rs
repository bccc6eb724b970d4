//! In-memory ledger simulation
//!
//! The arena of address → slot the test harness (and any embedder without
//! a real host ledger) runs against. With a journal attached, every
//! committed transition is appended durably before the in-memory state
//! changes, and slot contents are rebuildable by replay.

use std::collections::BTreeMap;
use std::path::Path;

use crate::derive::Address;
use crate::identity::Identity;
use crate::journal::{JournalReader, JournalRecord, JournalWriter, TransitionKind};
use crate::observability::{Event, Logger};

use super::errors::{LedgerError, LedgerResult};
use super::rent::RentPolicy;
use super::slot::{Slot, SlotStore};

/// In-memory slot arena with balance accounting and an optional
/// transition journal.
pub struct MemoryLedger {
    rent: RentPolicy,
    slots: BTreeMap<Address, Slot>,
    balances: BTreeMap<Identity, u64>,
    journal: Option<JournalWriter>,
}

impl MemoryLedger {
    /// A fresh, empty ledger with no journal.
    pub fn new(rent: RentPolicy) -> Self {
        Self {
            rent,
            slots: BTreeMap::new(),
            balances: BTreeMap::new(),
            journal: None,
        }
    }

    /// A fresh ledger that appends every committed transition to `journal`.
    pub fn with_journal(rent: RentPolicy, journal: JournalWriter) -> Self {
        Self {
            journal: Some(journal),
            ..Self::new(rent)
        }
    }

    /// Rebuilds slot contents from a journal. Balances are host-side
    /// bookkeeping and are not journaled, so the rebuilt ledger starts
    /// with empty balance accounts and no attached journal.
    ///
    /// # Errors
    ///
    /// Any journal corruption halts the replay; a journal whose
    /// transitions do not apply cleanly (an allocate over a live slot, a
    /// write to a missing one) is reported as corrupt at the offending
    /// record's offset.
    pub fn replay_journal(path: &Path, rent: RentPolicy) -> Result<Self, crate::journal::JournalError> {
        use crate::journal::JournalError;

        let mut reader = JournalReader::open(path)?;
        let mut slots: BTreeMap<Address, Slot> = BTreeMap::new();
        let mut replayed = 0u64;

        while let Some(record) = reader.read_next()? {
            let corrupt = |reason: String| JournalError::Corrupt {
                offset: reader.offset(),
                reason,
            };
            match record.kind {
                TransitionKind::Allocate => {
                    let (size, balance) = record
                        .allocation_params()
                        .map_err(|_| corrupt("allocate payload malformed".to_string()))?;
                    if slots.contains_key(&record.address) {
                        return Err(corrupt("allocate over a live slot".to_string()));
                    }
                    slots.insert(
                        record.address,
                        Slot {
                            data: vec![0u8; size as usize],
                            balance,
                        },
                    );
                }
                TransitionKind::Write => {
                    let slot = match slots.get_mut(&record.address) {
                        Some(slot) => slot,
                        None => return Err(corrupt("write to a missing slot".to_string())),
                    };
                    if slot.data.len() != record.payload.len() {
                        return Err(corrupt(format!(
                            "write of {} bytes to a {}-byte slot",
                            record.payload.len(),
                            slot.data.len()
                        )));
                    }
                    slot.data.clear();
                    slot.data.extend_from_slice(&record.payload);
                }
                TransitionKind::Deallocate => {
                    if slots.remove(&record.address).is_none() {
                        return Err(corrupt("deallocate of a missing slot".to_string()));
                    }
                }
            }
            replayed += 1;
        }

        let count = replayed.to_string();
        Logger::log(
            Event::JournalReplayed.severity(),
            Event::JournalReplayed,
            &[("transitions", count.as_str())],
        );

        Ok(Self {
            rent,
            slots,
            balances: BTreeMap::new(),
            journal: None,
        })
    }

    /// Credits `amount` to an identity's balance account. This is the
    /// test-harness funding hook; real balances live with the host.
    pub fn credit(&mut self, identity: &Identity, amount: u64) {
        let balance = self.balances.entry(*identity).or_insert(0);
        *balance = balance.saturating_add(amount);
    }

    /// Current balance of an identity's account.
    pub fn balance(&self, identity: &Identity) -> u64 {
        self.balances.get(identity).copied().unwrap_or(0)
    }

    /// Balance held by the slot at `address`, if allocated.
    pub fn slot_balance(&self, address: &Address) -> Option<u64> {
        self.slots.get(address).map(|slot| slot.balance)
    }

    /// Number of live slots.
    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    fn journal_append(
        &mut self,
        kind: TransitionKind,
        address: &Address,
        payload: &[u8],
    ) -> LedgerResult<()> {
        if let Some(journal) = self.journal.as_mut() {
            journal.append(kind, address, payload)?;
        }
        Ok(())
    }
}

impl SlotStore for MemoryLedger {
    fn read(&self, address: &Address) -> Option<Vec<u8>> {
        self.slots.get(address).map(|slot| slot.data.clone())
    }

    fn allocate(
        &mut self,
        address: &Address,
        size: usize,
        funding_source: &Identity,
    ) -> LedgerResult<u64> {
        if self.slots.contains_key(address) {
            return Err(LedgerError::AlreadyAllocated);
        }
        let need = self.rent.minimum_balance(size);
        let have = self.balance(funding_source);
        if have < need {
            return Err(LedgerError::InsufficientFunds { need, have });
        }

        let payload = JournalRecord::allocation_payload(size as u32, need);
        self.journal_append(TransitionKind::Allocate, address, &payload)?;

        self.balances.insert(*funding_source, have - need);
        self.slots.insert(
            *address,
            Slot {
                data: vec![0u8; size],
                balance: need,
            },
        );
        Ok(need)
    }

    fn write(&mut self, address: &Address, bytes: &[u8]) -> LedgerResult<()> {
        let size = match self.slots.get(address) {
            Some(slot) => slot.data.len(),
            None => return Err(LedgerError::Absent),
        };
        if bytes.len() != size {
            return Err(LedgerError::SizeMismatch {
                got: bytes.len(),
                size,
            });
        }

        self.journal_append(TransitionKind::Write, address, bytes)?;

        if let Some(slot) = self.slots.get_mut(address) {
            slot.data.clear();
            slot.data.extend_from_slice(bytes);
        }
        Ok(())
    }

    fn deallocate(&mut self, address: &Address, refund_to: &Identity) -> LedgerResult<u64> {
        if !self.slots.contains_key(address) {
            return Err(LedgerError::Absent);
        }

        self.journal_append(TransitionKind::Deallocate, address, &[])?;

        let refund = match self.slots.remove(address) {
            Some(mut slot) => {
                // Zero before release: the address is empty storage again,
                // not a tombstone of old data.
                slot.data.fill(0);
                slot.balance
            }
            None => 0,
        };
        self.credit(refund_to, refund);
        Ok(refund)
    }

    fn snapshot(&self) -> Vec<(Address, Vec<u8>)> {
        self.slots
            .iter()
            .map(|(address, slot)| (*address, slot.data.clone()))
            .collect()
    }
}
