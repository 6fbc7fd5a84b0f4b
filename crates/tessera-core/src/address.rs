//! Canonical 20-byte account addresses.
//!
//! Addresses reach this layer in one of two textual formats:
//! - bech32 (`tes1...`), the human-facing format
//! - 0x-prefixed hex with sha256-derived checksum casing, the canonical format
//!
//! Both decode to the same 20 bytes. `normalize_address` accepts either and
//! returns the canonical checksummed form.
//!
//! The all-zero address is a domain sentinel (absence of a value, not a real
//! account). It is accepted in any casing and always serializes to the
//! 40-hex-zero canonical form, bypassing checksum validation.

use std::fmt;
use std::str::FromStr;

use bech32::{FromBase32, ToBase32, Variant};

use crate::errors::{TesseraError, TesseraResult};
use crate::hash::digest_bytes;

/// Address length in bytes.
pub const ADDRESS_LEN: usize = 20;

/// Human-readable part of the bech32 address format.
pub const ADDRESS_HRP: &str = "tes";

/// A 20-byte account address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Address([u8; ADDRESS_LEN]);

impl Address {
    /// The all-zero sentinel address.
    pub const ZERO: Address = Address([0u8; ADDRESS_LEN]);

    /// Construct from a 20-byte array (canonical form).
    pub fn from_bytes(bytes: [u8; ADDRESS_LEN]) -> Self {
        Address(bytes)
    }

    /// Parse from either textual format.
    ///
    /// Hex input must carry valid checksum casing unless it is the all-zero
    /// sentinel. Anything else fails with `AddressFormat`.
    pub fn parse(text: &str) -> TesseraResult<Self> {
        let s = text.trim();

        if s.starts_with(&format!("{ADDRESS_HRP}1")) {
            return Self::from_bech32(s);
        }

        let hexpart = s.strip_prefix("0x").unwrap_or(s);
        if hexpart.len() != ADDRESS_LEN * 2 || !hexpart.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(TesseraError::address_format(format!(
                "expected bech32 or {}-char hex address, got {:?}",
                ADDRESS_LEN * 2,
                s
            )));
        }

        let mut bytes = [0u8; ADDRESS_LEN];
        hex::decode_to_slice(hexpart.to_ascii_lowercase(), &mut bytes)
            .map_err(|e| TesseraError::address_format(format!("invalid hex address: {e}")))?;

        let addr = Address(bytes);

        // Sentinel bypasses checksum validation.
        if addr.is_zero() {
            return Ok(Address::ZERO);
        }

        let expected = checksum_hex(&bytes);
        if hexpart != expected {
            return Err(TesseraError::address_format(format!(
                "checksum mismatch for address 0x{hexpart}"
            )));
        }

        Ok(addr)
    }

    /// Decode the bech32 format.
    pub fn from_bech32(text: &str) -> TesseraResult<Self> {
        let (hrp, data, variant) = bech32::decode(text)
            .map_err(|e| TesseraError::address_format(format!("invalid bech32 address: {e}")))?;

        if hrp != ADDRESS_HRP {
            return Err(TesseraError::address_format(format!(
                "unexpected address prefix: {hrp}"
            )));
        }
        if variant != Variant::Bech32 {
            return Err(TesseraError::address_format(
                "unexpected bech32 variant (bech32m not accepted)",
            ));
        }

        let bytes = Vec::<u8>::from_base32(&data)
            .map_err(|e| TesseraError::address_format(format!("invalid bech32 payload: {e}")))?;

        if bytes.len() != ADDRESS_LEN {
            return Err(TesseraError::address_format(format!(
                "bech32 payload must be {ADDRESS_LEN} bytes, got {}",
                bytes.len()
            )));
        }

        let mut out = [0u8; ADDRESS_LEN];
        out.copy_from_slice(&bytes);
        Ok(Address(out))
    }

    /// Encode into the bech32 format.
    pub fn to_bech32(&self) -> TesseraResult<String> {
        bech32::encode(ADDRESS_HRP, self.0.as_slice().to_base32(), Variant::Bech32)
            .map_err(|e| TesseraError::serialization(format!("bech32 encode: {e}")))
    }

    /// Canonical checksummed form, 0x-prefixed.
    pub fn to_checksum(&self) -> String {
        if self.is_zero() {
            // No letters to case; skip the derivation.
            return format!("0x{}", "0".repeat(ADDRESS_LEN * 2));
        }
        format!("0x{}", checksum_hex(&self.0))
    }

    /// Wire form: 0x-prefixed lowercase hex.
    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(self.0))
    }

    pub fn as_bytes(&self) -> &[u8; ADDRESS_LEN] {
        &self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; ADDRESS_LEN]
    }
}

impl AsRef<[u8]> for Address {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_checksum())
    }
}

impl FromStr for Address {
    type Err = TesseraError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Address::parse(s)
    }
}

/// Derive the checksum casing for 20 address bytes.
///
/// The digest of the raw bytes drives the casing: hex digit i is uppercased
/// when bit (6 * i), counted from the most significant bit of the digest, is
/// set. Digits 0-9 are unaffected.
fn checksum_hex(bytes: &[u8; ADDRESS_LEN]) -> String {
    let digest = digest_bytes(bytes);
    let lower = hex::encode(bytes);

    let mut out = String::with_capacity(ADDRESS_LEN * 2);
    for (i, c) in lower.chars().enumerate() {
        if c.is_ascii_digit() {
            out.push(c);
            continue;
        }
        let bit = 6 * i;
        let set = digest[bit / 8] & (1 << (7 - (bit % 8))) != 0;
        out.push(if set { c.to_ascii_uppercase() } else { c });
    }
    out
}

/// Normalize either textual format to the canonical checksummed form.
pub fn normalize_address(text: &str) -> TesseraResult<String> {
    Ok(Address::parse(text)?.to_checksum())
}
