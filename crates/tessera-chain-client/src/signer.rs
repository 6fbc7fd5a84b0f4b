//! Signing interface.
//!
//! The signature scheme belongs to the wallet or key-management collaborator,
//! not to this crate. Implementations own their key pair; callers hand over
//! the exact preimage bytes and receive signature bytes back. Nothing here
//! hashes or re-encodes the message.

use anyhow::Result;

/// A signing collaborator owning a private/public key pair.
pub trait Signer {
    /// The public key to relay alongside the signature, as raw bytes.
    fn public_key(&self) -> Vec<u8>;

    /// Sign the given message bytes.
    fn sign(&self, message: &[u8]) -> Result<Vec<u8>>;
}
