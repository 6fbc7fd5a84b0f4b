//! Signing-preimage composition.
//!
//! A preimage is the ordered concatenation of the hash fragments of a set of
//! declared fields. The builder accumulates fragments in push order and
//! renders the result as bytes or as a single 0x-prefixed hex string with no
//! internal prefixes.
//!
//! The builder never applies a digest pass over the concatenation. A caller
//! whose verifier expects one applies [`HashFragment::digest`] on the built
//! fragment explicitly.

use crate::hash::HashFragment;
use crate::value::Value;

/// Ordered accumulator of hash fragments.
#[derive(Debug, Clone, Default)]
pub struct PreimageBuilder {
    parts: Vec<HashFragment>,
}

impl PreimageBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a field value's fragment.
    pub fn push_value(mut self, value: &Value) -> Self {
        self.parts.push(value.hash_fragment());
        self
    }

    /// Append an already-computed fragment.
    pub fn push_fragment(mut self, fragment: HashFragment) -> Self {
        self.parts.push(fragment);
        self
    }

    /// Number of fields pushed so far.
    pub fn fields(&self) -> usize {
        self.parts.len()
    }

    /// The flat concatenation of all pushed fragments, in push order.
    pub fn build(self) -> HashFragment {
        HashFragment::concat(self.parts)
    }

    /// Preimage bytes (flat concatenation).
    pub fn build_bytes(self) -> Vec<u8> {
        self.build().as_bytes().to_vec()
    }

    /// Preimage as a single 0x-prefixed hex string.
    pub fn build_hex(self) -> String {
        self.build().to_hex()
    }
}

/// Convenience: preimage over declared fields in order.
pub fn preimage_of(fields: &[Value]) -> HashFragment {
    let mut b = PreimageBuilder::new();
    for f in fields {
        b = b.push_value(f);
    }
    b.build()
}
