//! Minimum-balance policy
//!
//! A slot must hold a minimum balance, proportional to its size, for as
//! long as it exists; the deposit is taken at allocation and refunded in
//! full at deallocation. The ledger never charges ongoing rent; the
//! minimum is a persistence bond, not a fee.

use serde::{Deserialize, Serialize};

/// Parameters of the minimum-balance computation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RentPolicy {
    /// Flat cost per slot.
    pub base: u64,
    /// Additional cost per byte of slot size.
    pub per_byte: u64,
}

impl Default for RentPolicy {
    fn default() -> Self {
        Self {
            base: 1_024,
            per_byte: 8,
        }
    }
}

impl RentPolicy {
    /// The balance a slot of `size` bytes must hold to persist.
    pub fn minimum_balance(&self, size: usize) -> u64 {
        self.base
            .saturating_add(self.per_byte.saturating_mul(size as u64))
    }
}
