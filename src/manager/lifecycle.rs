//! The lifecycle state machine
//!
//! Each operation is a guard block followed by a transition. The guards
//! re-derive the expected address from the caller's own identity and id,
//! so a caller can never reach another owner's slot: naming someone else's
//! address just makes the derivation disagree.

use crate::codec::{ExpenseRecord, ENCODED_LEN};
use crate::derive::{derive_address, Address};
use crate::identity::Identity;
use crate::ledger::SlotStore;
use crate::observability::{Event, Logger};

use super::errors::{LifecycleError, LifecycleResult};
use super::requests::{CreateRequest, DestroyRequest, ModifyRequest};
use super::scan::OwnerScan;

/// Namespace tag for expense record derivation.
pub const EXPENSE_TAG: &[u8] = b"expense";

/// A successful transition: the record as it now stands (or stood, for
/// destroy) plus the net change to the caller's balance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Applied {
    /// The record the operation produced or removed.
    pub record: ExpenseRecord,
    /// Net balance change for the caller: negative for the creation
    /// deposit, positive for the destruction refund, zero for modify.
    pub balance_delta: i64,
}

/// The state machine over expense record slots.
///
/// Owns the injected slot store and the namespace tag. Pure with respect
/// to the store: every operation is a function of (slot contents, request)
/// and either applies fully or not at all.
pub struct LifecycleManager<S: SlotStore> {
    store: S,
    tag: Vec<u8>,
}

impl<S: SlotStore> LifecycleManager<S> {
    /// A manager over `store` with the standard expense namespace tag.
    pub fn new(store: S) -> Self {
        Self::with_tag(store, EXPENSE_TAG)
    }

    /// A manager with a custom namespace tag. Records derived under one
    /// tag are unreachable under any other.
    pub fn with_tag(store: S, tag: impl Into<Vec<u8>>) -> Self {
        Self {
            store,
            tag: tag.into(),
        }
    }

    /// The underlying slot store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Mutable access to the underlying slot store, for host-side
    /// bookkeeping such as funding balances.
    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    /// Consumes the manager, returning the slot store.
    pub fn into_store(self) -> S {
        self.store
    }

    /// The expected address for `(owner, id)` under this manager's tag.
    pub fn derive(&self, owner: &Identity, id: u64) -> LifecycleResult<(Address, u8)> {
        Ok(derive_address(&self.tag, owner, id)?)
    }

    /// Creates a record. `Absent → Present`.
    ///
    /// Guards, in order: records are self-authored (`OwnerMismatch`); the
    /// targeted address must equal the derivation from the caller's own
    /// identity (`SeedMismatch`); the slot must be empty (`AlreadyExists`);
    /// the record must encode (`FieldTooLong`). Only then is the slot
    /// allocated (`InsufficientFunds`) and written.
    pub fn create(&mut self, request: &CreateRequest) -> LifecycleResult<Applied> {
        if request.owner != request.caller {
            return Err(LifecycleError::OwnerMismatch);
        }
        let (expected, bump) = derive_address(&self.tag, &request.caller, request.id)?;
        if expected != request.address {
            self.log_seed_mismatch(&expected, &request.address, request.id);
            return Err(LifecycleError::SeedMismatch);
        }
        if self.store.read(&request.address).is_some() {
            return Err(LifecycleError::AlreadyExists);
        }

        let record = ExpenseRecord {
            id: request.id,
            owner: request.owner,
            merchant_name: request.merchant_name.clone(),
            amount: request.amount,
            bump,
        };
        // Encode before any storage effect: FieldTooLong must not cost an
        // allocation, and the encoded size is what the allocator charges.
        let encoded = record.encode()?;

        // Allocate-then-write is one transition at the host's transaction
        // boundary; atomicity across the pair is the host's guarantee.
        let deposit = self.store.allocate(&request.address, ENCODED_LEN, &request.caller)?;
        self.store.write(&request.address, &encoded)?;

        self.log_transition(Event::RecordCreated, &request.address, record.id);
        Ok(Applied {
            record,
            balance_delta: -(deposit as i64),
        })
    }

    /// Rewrites a record's mutable fields. State remains `Present`.
    ///
    /// The derivation guard runs against the *caller's* claimed id: an id
    /// the slot was not created with derives elsewhere and fails
    /// `SeedMismatch` before existence is even considered.
    pub fn modify(&mut self, request: &ModifyRequest) -> LifecycleResult<Applied> {
        let current = self.load_owned(&request.address, request.id, &request.caller)?;

        let record = ExpenseRecord {
            merchant_name: request.merchant_name.clone(),
            amount: request.amount,
            ..current
        };
        let encoded = record.encode()?;
        self.store.write(&request.address, &encoded)?;

        self.log_transition(Event::RecordModified, &request.address, record.id);
        Ok(Applied {
            record,
            balance_delta: 0,
        })
    }

    /// Destroys a record. `Present → Absent`.
    ///
    /// The slot is zeroed and released and its entire held balance is
    /// refunded to the caller. The address becomes empty storage, eligible
    /// for a new, unrelated creation.
    pub fn destroy(&mut self, request: &DestroyRequest) -> LifecycleResult<Applied> {
        let record = self.load_owned(&request.address, request.id, &request.caller)?;

        let refund = self.store.deallocate(&request.address, &request.caller)?;

        self.log_transition(Event::RecordDestroyed, &request.address, record.id);
        Ok(Applied {
            record,
            balance_delta: refund as i64,
        })
    }

    /// All records owned by `owner`: a lazy equality-filter scan over a
    /// snapshot of the store. Each call takes a fresh snapshot, so the
    /// sequence is finite and restartable.
    pub fn list_by_owner(&self, owner: &Identity) -> OwnerScan {
        OwnerScan::new(self.store.snapshot(), *owner)
    }

    /// Shared guard block for modify and destroy: derivation, then
    /// existence, then decode, then ownership.
    fn load_owned(
        &self,
        address: &Address,
        id: u64,
        caller: &Identity,
    ) -> LifecycleResult<ExpenseRecord> {
        let (expected, _) = derive_address(&self.tag, caller, id)?;
        if expected != *address {
            self.log_seed_mismatch(&expected, address, id);
            return Err(LifecycleError::SeedMismatch);
        }
        let bytes = match self.store.read(address) {
            Some(bytes) => bytes,
            None => return Err(LifecycleError::NotFound),
        };
        let record = ExpenseRecord::decode(&bytes).map_err(|err| {
            let addr = address.to_string();
            let reason = err.to_string();
            Logger::log(
                Event::SlotCorruption.severity(),
                Event::SlotCorruption,
                &[("address", addr.as_str()), ("reason", reason.as_str())],
            );
            LifecycleError::from(err)
        })?;
        if record.owner != *caller {
            return Err(LifecycleError::OwnerMismatch);
        }
        Ok(record)
    }

    fn log_transition(&self, event: Event, address: &Address, id: u64) {
        let addr = address.to_string();
        let id = id.to_string();
        Logger::log(
            event.severity(),
            event,
            &[("address", addr.as_str()), ("id", id.as_str())],
        );
    }

    fn log_seed_mismatch(&self, expected: &Address, targeted: &Address, id: u64) {
        let expected = expected.to_string();
        let targeted = targeted.to_string();
        let id = id.to_string();
        Logger::log(
            Event::SeedMismatch.severity(),
            Event::SeedMismatch,
            &[
                ("expected", expected.as_str()),
                ("id", id.as_str()),
                ("targeted", targeted.as_str()),
            ],
        );
    }
}
