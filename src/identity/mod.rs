//! Identity types for tallydb
//!
//! Cryptographic proof that a caller controls an identity is the job of an
//! external signature layer; by the time a request reaches the lifecycle
//! manager, `caller` is trusted as authentic. This module carries the
//! identity value itself plus the minimal keypair/verify surface that the
//! boundary (and the test harness) needs.

mod keys;

pub use keys::{verify, Identity, Keypair};
