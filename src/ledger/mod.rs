//! Slot ledger for tallydb
//!
//! The host ledger is modeled as an injected storage interface: an arena of
//! address → fixed-size slot, plus per-identity balance accounting. The
//! lifecycle manager only ever touches storage through the [`SlotStore`]
//! trait, so the core stays testable against the in-memory simulation.
//!
//! # Design Principles
//!
//! - Validation precedes mutation in every operation; a failed operation
//!   leaves state untouched
//! - Deterministic: BTreeMap iteration order everywhere
//! - A slot's size is fixed at allocation and never changes
//! - Rent: a slot holds at least its minimum balance while it exists, and
//!   the full balance is refunded on deallocation

mod errors;
mod memory;
mod rent;
mod slot;

pub use errors::{LedgerError, LedgerResult};
pub use memory::MemoryLedger;
pub use rent::RentPolicy;
pub use slot::{Slot, SlotStore};
