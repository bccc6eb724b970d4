//! Ledger error types

use thiserror::Error;

use crate::journal::JournalError;

/// Result type for slot store operations.
pub type LedgerResult<T> = Result<T, LedgerError>;

/// Failures of the slot storage interface.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// The funding source cannot cover the rent minimum.
    #[error("insufficient funds: need {need}, have {have}")]
    InsufficientFunds { need: u64, have: u64 },

    /// Allocation targeted an address that already holds a live slot.
    #[error("slot already allocated at this address")]
    AlreadyAllocated,

    /// The operation targeted an address with no live slot.
    #[error("no slot allocated at this address")]
    Absent,

    /// The write does not match the allocated slot size. Slots never
    /// resize; mutation rewrites in place.
    #[error("write of {got} bytes does not match allocated slot size {size}")]
    SizeMismatch { got: usize, size: usize },

    /// The attached transition journal rejected the append.
    #[error("journal: {0}")]
    Journal(#[from] JournalError),
}
