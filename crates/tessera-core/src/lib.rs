//! tessera-core
//!
//! Core primitives for TESSERA:
//! - Typed contract-call values (addresses, bounded integers, byte strings,
//!   opaque scalars, lists, pairs, named variants)
//! - Canonical wire encoding for contract invocation arguments
//! - Deterministic hash fragments and signing-preimage composition
//! - Address normalization across the bech32 and checksummed-hex formats

pub mod address;
pub mod errors;
pub mod hash;
pub mod preimage;
pub mod value;
pub mod wire;

pub use crate::errors::{TesseraError, TesseraResult};

/// Stable wire type tags.
/// These must remain stable across versions: the receiving contract
/// re-derives types and hashes from the same names.
pub mod types {
    pub const BYSTR20: &str = "ByStr20";
    pub const BYSTR33: &str = "ByStr33";
    pub const BYSTR64: &str = "ByStr64";
    pub const BYSTR: &str = "ByStr";
    pub const UINT32: &str = "Uint32";
    pub const UINT128: &str = "Uint128";
    pub const STRING: &str = "String";
    pub const BNUM: &str = "BNum";
    pub const PAIR: &str = "Pair";
}

/// Convenience re-exports.
pub mod prelude {
    pub use crate::address::{normalize_address, Address, ADDRESS_HRP, ADDRESS_LEN};
    pub use crate::hash::{digest_bytes, HashAlg, HashFragment, DIGEST_LEN};
    pub use crate::preimage::{preimage_of, PreimageBuilder};
    pub use crate::value::{ByteWidth, Qualifier, UintWidth, Value};
    pub use crate::wire::{AdtWire, WireParam, WireValue};
    pub use crate::{TesseraError, TesseraResult};
}
