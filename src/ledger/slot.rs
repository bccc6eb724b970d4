//! The slot storage interface

use crate::derive::Address;
use crate::identity::Identity;

use super::errors::LedgerResult;

/// One allocated slot: fixed-size contents plus the balance it holds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Slot {
    /// Slot contents. Length is fixed at allocation.
    pub data: Vec<u8>,
    /// Balance held by the slot, refunded in full at deallocation.
    pub balance: u64,
}

/// Storage as the lifecycle manager sees it.
///
/// The host ledger serializes operations that touch the same address, so
/// implementations take `&mut self` and a shared simulation must sit
/// behind a lock to preserve that contract. No method blocks; every
/// operation either applies fully or not at all.
pub trait SlotStore {
    /// Current contents of the slot at `address`, or `None` when absent.
    fn read(&self, address: &Address) -> Option<Vec<u8>>;

    /// Allocates a zeroed slot of `size` bytes, funded to the rent minimum
    /// by `funding_source`. Returns the deposit taken.
    ///
    /// # Errors
    ///
    /// `AlreadyAllocated` if a live slot occupies the address;
    /// `InsufficientFunds` if the funding source cannot cover the minimum.
    fn allocate(
        &mut self,
        address: &Address,
        size: usize,
        funding_source: &Identity,
    ) -> LedgerResult<u64>;

    /// Overwrites the slot contents in place. The write must match the
    /// allocated size exactly.
    ///
    /// # Errors
    ///
    /// `Absent` if no slot is allocated; `SizeMismatch` on any size change.
    fn write(&mut self, address: &Address, bytes: &[u8]) -> LedgerResult<()>;

    /// Zeroes and releases the slot, crediting its whole balance to
    /// `refund_to`. Returns the refunded amount.
    ///
    /// # Errors
    ///
    /// `Absent` if no slot is allocated.
    fn deallocate(&mut self, address: &Address, refund_to: &Identity) -> LedgerResult<u64>;

    /// A stable snapshot of every allocated slot, for scans. No ordering
    /// guarantee beyond stability within one unmutated snapshot.
    fn snapshot(&self) -> Vec<(Address, Vec<u8>)>;
}
