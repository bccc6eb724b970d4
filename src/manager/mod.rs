//! Record Lifecycle Manager
//!
//! The state machine over one slot: `Absent` ⇄ `Present`. Create, modify,
//! and destroy are the only transitions, and every one of them starts by
//! re-deriving the expected address from the request and rejecting on
//! mismatch. The guard is an explicit clause at the top of each operation,
//! not an ambient mechanism.
//!
//! # Invariants
//!
//! - Every operation runs its guards in a fixed, documented order
//! - Validation fully precedes mutation; no partial transition is ever
//!   observable
//! - A wrong record id surfaces as a derivation violation
//!   (`SeedMismatch`), never as `NotFound`
//! - `owner`, `id`, and `bump` are immutable for the life of a record

mod errors;
mod lifecycle;
mod requests;
mod scan;

pub use errors::{LifecycleError, LifecycleResult};
pub use lifecycle::{Applied, LifecycleManager, EXPENSE_TAG};
pub use requests::{CreateRequest, DestroyRequest, ModifyRequest};
pub use scan::OwnerScan;
