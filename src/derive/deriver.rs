//! The derivation function
//!
//! The digest is SHA-256 over `tag || owner || id_le || bump || domain`.
//! A candidate digest is only accepted as an address when it does not
//! decompress to a valid ed25519 point: an on-curve digest could collide
//! with a real signer identity and would let a private key claim the slot.

use ed25519_dalek::VerifyingKey;
use sha2::{Digest, Sha256};

use crate::identity::Identity;

use super::address::Address;
use super::errors::{DeriveError, DeriveResult};

/// Domain separator folded into every derivation digest. Changing this is a
/// new address space, not a compatible upgrade.
const DERIVE_DOMAIN: &[u8] = b"tallydb/derived-slot/v1";

/// Derives the slot address for `(tag, owner, id)`.
///
/// Bumps are tried from 255 downward; the first off-curve digest wins.
/// Returns the address together with the bump that produced it, so the
/// bump can be stored in the record and the address reconstructed later
/// without re-searching.
///
/// # Errors
///
/// `DeriveError::DerivationExhausted` if no bump in `0..=255` yields an
/// off-curve digest.
pub fn derive_address(tag: &[u8], owner: &Identity, id: u64) -> DeriveResult<(Address, u8)> {
    for bump in (0..=u8::MAX).rev() {
        let digest = seed_digest(tag, owner, id, bump);
        if !is_on_curve(&digest) {
            return Ok((Address::from_bytes(digest), bump));
        }
    }
    Err(DeriveError::DerivationExhausted)
}

/// Reconstructs the address a stored bump produces, without re-searching.
///
/// Returns `None` when the digest for this bump lands on the curve; such a
/// bump can never have been handed out by [`derive_address`], so a `None`
/// here means the stored bump is wrong.
pub fn address_for_bump(tag: &[u8], owner: &Identity, id: u64, bump: u8) -> Option<Address> {
    let digest = seed_digest(tag, owner, id, bump);
    if is_on_curve(&digest) {
        None
    } else {
        Some(Address::from_bytes(digest))
    }
}

fn seed_digest(tag: &[u8], owner: &Identity, id: u64, bump: u8) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(tag);
    hasher.update(owner.as_bytes());
    hasher.update(id.to_le_bytes());
    hasher.update([bump]);
    hasher.update(DERIVE_DOMAIN);
    hasher.finalize().into()
}

/// A digest that decompresses to a valid Edwards point is a usable signer
/// identity and must be rejected as a slot address.
fn is_on_curve(candidate: &[u8; 32]) -> bool {
    VerifyingKey::from_bytes(candidate).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identity::Keypair;

    const TAG: &[u8] = b"expense";

    #[test]
    fn test_derivation_is_stable() {
        let owner = Keypair::generate().identity();
        let first = derive_address(TAG, &owner, 7).unwrap();
        let second = derive_address(TAG, &owner, 7).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_distinct_ids_derive_distinct_addresses() {
        let owner = Keypair::generate().identity();
        let (a, _) = derive_address(TAG, &owner, 1).unwrap();
        let (b, _) = derive_address(TAG, &owner, 2).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_distinct_owners_derive_distinct_addresses() {
        let alice = Keypair::generate().identity();
        let bob = Keypair::generate().identity();
        let (a, _) = derive_address(TAG, &alice, 1).unwrap();
        let (b, _) = derive_address(TAG, &bob, 1).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_distinct_tags_derive_distinct_addresses() {
        let owner = Keypair::generate().identity();
        let (a, _) = derive_address(b"expense", &owner, 1).unwrap();
        let (b, _) = derive_address(b"invoice", &owner, 1).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_derived_address_is_off_curve() {
        let owner = Keypair::generate().identity();
        for id in 0..32 {
            let (address, _) = derive_address(TAG, &owner, id).unwrap();
            assert!(
                VerifyingKey::from_bytes(address.as_bytes()).is_err(),
                "derived address for id {} decompresses to a curve point",
                id
            );
        }
    }

    #[test]
    fn test_stored_bump_reconstructs_address() {
        let owner = Keypair::generate().identity();
        let (address, bump) = derive_address(TAG, &owner, 42).unwrap();
        assert_eq!(address_for_bump(TAG, &owner, 42, bump), Some(address));
    }

    #[test]
    fn test_higher_bumps_do_not_reconstruct() {
        // Every bump above the winning one was rejected as on-curve, so
        // address_for_bump must refuse it.
        let owner = Keypair::generate().identity();
        let (_, bump) = derive_address(TAG, &owner, 42).unwrap();
        for rejected in (bump as u16 + 1)..=255 {
            assert_eq!(address_for_bump(TAG, &owner, 42, rejected as u8), None);
        }
    }

    #[test]
    fn test_address_differs_from_owner_identity() {
        let owner = Keypair::generate().identity();
        let (address, _) = derive_address(TAG, &owner, 1).unwrap();
        assert_ne!(address.as_bytes(), owner.as_bytes());
    }
}
