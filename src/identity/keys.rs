//! Owner identities and the signature boundary
//!
//! An identity is the 32-byte encoding of an ed25519 verifying key. The
//! ledger only ever compares identities byte-for-byte; signing happens at
//! the edge, before requests enter the core.

use std::fmt;

use ed25519_dalek::{Signature, Signer, SigningKey, Verifier, VerifyingKey};
use rand::rngs::OsRng;
use serde::{Deserialize, Serialize};

/// A 32-byte owner identity: the bytes of an ed25519 verifying key.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Identity([u8; 32]);

impl Identity {
    /// Wraps raw identity bytes.
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// The raw identity bytes.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl fmt::Debug for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Identity({})", self)
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in &self.0 {
            write!(f, "{:02x}", byte)?;
        }
        Ok(())
    }
}

/// A signing keypair, used by callers (and the test harness) to produce
/// requests the signature layer will accept.
pub struct Keypair {
    signing: SigningKey,
}

impl Keypair {
    /// Generates a fresh keypair from the OS entropy source.
    pub fn generate() -> Self {
        Self {
            signing: SigningKey::generate(&mut OsRng),
        }
    }

    /// The identity this keypair controls.
    pub fn identity(&self) -> Identity {
        Identity(self.signing.verifying_key().to_bytes())
    }

    /// Signs a message, returning the detached 64-byte signature.
    pub fn sign(&self, message: &[u8]) -> [u8; 64] {
        self.signing.sign(message).to_bytes()
    }
}

impl fmt::Debug for Keypair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Keypair({})", self.identity())
    }
}

/// Verifies that `identity` signed `message`.
///
/// Models the external identity interface: the lifecycle manager only ever
/// sees a `caller` that passed this check.
pub fn verify(identity: &Identity, message: &[u8], signature: &[u8; 64]) -> bool {
    let key = match VerifyingKey::from_bytes(identity.as_bytes()) {
        Ok(key) => key,
        Err(_) => return false,
    };
    key.verify(message, &Signature::from_bytes(signature)).is_ok()
}
