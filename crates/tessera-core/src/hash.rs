//! Deterministic hashing primitives for TESSERA.
//!
//! All hashes are:
//! - deterministic
//! - computed over fixed-width canonical byte encodings, never display strings
//! - explicitly parameterized
//!
//! Supported algorithms:
//! - sha256
//!
//! A `HashFragment` is the unit of preimage composition: a leaf value hashes
//! to a single 32-byte digest, and composites concatenate their children's
//! fragments in declared order without re-hashing. Callers that need a
//! fixed-size digest over a concatenation apply `HashFragment::digest`
//! themselves; no extra hash pass is ever applied implicitly.

use crate::errors::{TesseraError, TesseraResult};

use sha2::{Digest, Sha256};

/// Hash algorithm identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HashAlg {
    Sha256,
}

impl HashAlg {
    pub fn parse(s: &str) -> TesseraResult<Self> {
        match s {
            "sha256" => Ok(HashAlg::Sha256),
            _ => Err(TesseraError::invalid_argument(format!(
                "unsupported hash algorithm: {s}"
            ))),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sha256 => "sha256",
        }
    }
}

/// Digest size in bytes for the fragment algorithm.
pub const DIGEST_LEN: usize = 32;

/// Hash raw bytes using the selected algorithm.
pub fn hash_bytes(alg: HashAlg, bytes: &[u8]) -> Vec<u8> {
    match alg {
        HashAlg::Sha256 => {
            let mut h = Sha256::new();
            h.update(bytes);
            h.finalize().to_vec()
        }
    }
}

/// Sha256 over raw bytes, returning the fixed-width digest.
pub fn digest_bytes(bytes: &[u8]) -> [u8; DIGEST_LEN] {
    let mut h = Sha256::new();
    h.update(bytes);
    h.finalize().into()
}

/// An ordered buffer of digest bytes used to build signing preimages.
///
/// A fragment produced from a leaf is exactly one digest wide. A fragment
/// produced from a composite is the concatenation of its children's
/// fragments, so its length is a multiple of [`DIGEST_LEN`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HashFragment {
    bytes: Vec<u8>,
}

impl HashFragment {
    /// Fragment over raw bytes: one digest.
    pub fn of_bytes(payload: &[u8]) -> Self {
        Self {
            bytes: digest_bytes(payload).to_vec(),
        }
    }

    /// Wrap an already-computed digest buffer.
    pub fn from_raw(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }

    /// Ordered concatenation of fragments. No re-hashing.
    pub fn concat<I>(parts: I) -> Self
    where
        I: IntoIterator<Item = HashFragment>,
    {
        let mut bytes = Vec::new();
        for p in parts {
            bytes.extend_from_slice(&p.bytes);
        }
        Self { bytes }
    }

    /// Append another fragment in place, preserving order.
    pub fn push(&mut self, other: &HashFragment) {
        self.bytes.extend_from_slice(&other.bytes);
    }

    /// Explicit extra hash pass: digest of this fragment's bytes.
    ///
    /// Some verifiers consume the flat concatenation, others a digest of it.
    /// The choice stays with the caller.
    pub fn digest(&self) -> HashFragment {
        HashFragment {
            bytes: digest_bytes(&self.bytes).to_vec(),
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Render as a single 0x-prefixed lowercase hex string.
    ///
    /// Intermediate fragments carry no internal prefixes; the one prefix is
    /// added here, at the outermost rendering.
    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(&self.bytes))
    }
}
