//! Journal error types

use std::io;

use thiserror::Error;

/// Result type for journal operations.
pub type JournalResult<T> = Result<T, JournalError>;

/// Failures of the transition journal.
#[derive(Debug, Error)]
pub enum JournalError {
    /// Underlying file I/O failed.
    #[error("journal I/O: {0}")]
    Io(#[from] io::Error),

    /// A record failed its checksum, is truncated, or is otherwise
    /// unreadable. Replay halts here; nothing past this offset is trusted.
    #[error("journal corrupt at offset {offset}: {reason}")]
    Corrupt { offset: u64, reason: String },

    /// Sequence numbers must increase strictly from 1.
    #[error("journal sequence gap: expected {expected}, found {found}")]
    SequenceGap { expected: u64, found: u64 },
}
