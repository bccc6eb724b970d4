//! Request shapes for lifecycle operations
//!
//! Every request names the address it targets; the manager re-derives the
//! expected address and rejects on mismatch. `caller` is the identity the
//! external signature layer authenticated; it arrives here as plain data.

use crate::derive::Address;
use crate::identity::Identity;

/// Create a record at its derived address.
#[derive(Debug, Clone)]
pub struct CreateRequest {
    /// The address the caller believes the record derives to.
    pub address: Address,
    /// The owner of the new record. Must equal `caller`: records are
    /// self-authored.
    pub owner: Identity,
    /// Caller-chosen id, unique per owner.
    pub id: u64,
    /// Initial merchant name.
    pub merchant_name: String,
    /// Initial amount.
    pub amount: u64,
    /// The authenticated caller.
    pub caller: Identity,
}

/// Rewrite a record's mutable fields in place.
#[derive(Debug, Clone)]
pub struct ModifyRequest {
    /// The address the caller believes their `(caller, id)` derives to.
    pub address: Address,
    /// The id the record was created with.
    pub id: u64,
    /// Replacement merchant name.
    pub merchant_name: String,
    /// Replacement amount.
    pub amount: u64,
    /// The authenticated caller.
    pub caller: Identity,
}

/// Destroy a record, refunding its slot balance to the caller.
#[derive(Debug, Clone)]
pub struct DestroyRequest {
    /// The address the caller believes their `(caller, id)` derives to.
    pub address: Address,
    /// The id the record was created with.
    pub id: u64,
    /// The authenticated caller.
    pub caller: Identity,
}
