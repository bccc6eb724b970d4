//! Derivation error types

use thiserror::Error;

/// Result type for derivation.
pub type DeriveResult<T> = Result<T, DeriveError>;

/// Failures of the address deriver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DeriveError {
    /// No bump in `0..=255` produced an off-curve digest. Practically
    /// unreachable, but handled rather than assumed away.
    #[error("address derivation exhausted: no bump yields an off-curve address")]
    DerivationExhausted,
}
