//! Record codec for tallydb
//!
//! Fixed-layout binary encoding of one expense record. The layout is fixed
//! so slot size can be computed once, before allocation, and so the owner
//! field sits at a known offset for equality-filter scans.
//!
//! # Invariants
//!
//! - `decode(encode(r)) == r` for every record within bounds
//! - Encoded size is constant; a slot never needs to resize
//! - Decoding validates the type tag before reading any field

mod errors;
mod record;

pub use errors::{CodecError, CodecResult};
pub use record::{
    ExpenseRecord, ENCODED_LEN, MERCHANT_NAME_MAX, OWNER_LEN, OWNER_OFFSET, RECORD_TYPE_TAG,
};
