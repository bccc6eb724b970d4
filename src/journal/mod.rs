//! Transition journal for tallydb
//!
//! An append-only, checksum-verified log of every committed slot
//! transition. The journal is what makes the in-memory ledger simulation
//! "ledger-backed": slot state is rebuildable by replay, and any torn or
//! corrupted record halts replay instead of guessing.
//!
//! # Design Principles
//!
//! - Append-only, no in-place updates
//! - CRC32 on every record, verified on every read
//! - Strictly increasing sequence numbers starting at 1
//! - Synchronous appends: write, flush, fsync before returning
//!
//! Identity balances are host-side bookkeeping and are not journaled; only
//! slot transitions are.

mod checksum;
mod errors;
mod reader;
mod record;
mod writer;

pub use checksum::{compute_checksum, verify_checksum};
pub use errors::{JournalError, JournalResult};
pub use reader::JournalReader;
pub use record::{JournalRecord, TransitionKind};
pub use writer::JournalWriter;
