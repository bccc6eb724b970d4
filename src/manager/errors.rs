//! Lifecycle error types
//!
//! The full failure taxonomy of one operation. Precondition violations
//! are surfaced and never retried; codec failures on an occupied slot
//! indicate corruption and are surfaced as data-integrity errors. No
//! error is swallowed, and a failed operation mutates nothing.

use thiserror::Error;

use crate::codec::CodecError;
use crate::derive::DeriveError;
use crate::ledger::LedgerError;

/// Result type for lifecycle operations.
pub type LifecycleResult<T> = Result<T, LifecycleError>;

/// Failures of a lifecycle operation.
#[derive(Debug, Error)]
pub enum LifecycleError {
    /// The derived address disagrees with the targeted address. Retrying
    /// with the same id fails identically; the caller must correct the id.
    #[error("derived address does not match the targeted address")]
    SeedMismatch,

    /// Create targeted an address that already holds a record.
    #[error("a record already exists at the derived address")]
    AlreadyExists,

    /// Modify or destroy targeted an empty slot.
    #[error("no record exists at the derived address")]
    NotFound,

    /// The caller does not own the record (or, on create, claimed to
    /// create a record for someone else).
    #[error("caller identity does not own this record")]
    OwnerMismatch,

    /// Address derivation failed.
    #[error(transparent)]
    Derive(#[from] DeriveError),

    /// Encoding or decoding failed: malformed request or corrupted slot.
    #[error(transparent)]
    Codec(#[from] CodecError),

    /// The slot store rejected the transition.
    #[error(transparent)]
    Ledger(#[from] LedgerError),
}
