//! Address derivation for tallydb
//!
//! A record's slot address is computed, never chosen: the digest of a
//! namespace tag, the owner identity, and the record id fixes one canonical
//! location per logical record.
//!
//! # Invariants
//!
//! - Deterministic: the same `(tag, owner, id)` always derives the same
//!   address within one runtime
//! - Off-curve: a derived address is never a valid signer identity, so no
//!   held private key can control a derived slot
//! - Bump discipline: bumps are tried from 255 downward; the first
//!   off-curve digest wins, and the winning bump is returned for storage

mod address;
mod deriver;
mod errors;

pub use address::Address;
pub use deriver::{address_for_bump, derive_address};
pub use errors::{DeriveError, DeriveResult};
