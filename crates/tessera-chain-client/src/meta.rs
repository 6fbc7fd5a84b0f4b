//! Meta-transaction helpers.
//!
//! A meta-transfer is authorized off-chain: the sender signs a deterministic
//! preimage over the transfer fields, and a relayer submits the fields plus
//! the signature. The receiving contract recomputes the same preimage from
//! its own inputs and verifies the signature, so the field order and
//! fragment encodings here must match the on-chain derivation exactly.
//!
//! Preimage field order: recipient, amount, fee, nonce.

use std::collections::BTreeMap;

use anyhow::Result;

use tessera_core::address::Address;
use tessera_core::hash::HashFragment;
use tessera_core::preimage::preimage_of;
use tessera_core::value::{ByteWidth, Value};
use tessera_core::wire::WireParam;

use crate::signer::Signer;

/// The signed fields of a deferred token transfer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetaTransfer {
    pub to: Address,
    pub amount: u128,
    pub fee: u128,
    pub nonce: u64,
}

impl MetaTransfer {
    /// The typed field values, in the order they are hashed and relayed.
    pub fn fields(&self) -> [Value; 4] {
        [
            Value::address(self.to),
            Value::uint128(self.amount),
            Value::uint128(self.fee),
            Value::uint128(self.nonce as u128),
        ]
    }

    /// The flat signing preimage: the four field fragments concatenated in
    /// declared order, no extra digest pass.
    pub fn preimage(&self) -> HashFragment {
        preimage_of(&self.fields())
    }

    /// The preimage as a single 0x-prefixed hex string.
    pub fn preimage_hex(&self) -> String {
        self.preimage().to_hex()
    }

    /// Digest of the flat preimage, for verifiers that hash once more before
    /// checking the signature.
    pub fn signable_digest(&self) -> HashFragment {
        self.preimage().digest()
    }

    /// Sign the flat preimage bytes.
    pub fn sign(&self, signer: &dyn Signer) -> Result<Vec<u8>> {
        signer.sign(self.preimage().as_bytes())
    }

    /// The wire arguments a relayer submits to the verifying transition:
    /// the four fields followed by the signature and the signer's public key.
    pub fn relay_params(&self, signature: &[u8], pubkey: &[u8]) -> Result<Vec<WireParam>> {
        let [to, amount, fee, nonce] = self.fields();
        let sig = Value::byte_string(ByteWidth::B64, signature.to_vec())?;
        let pk = Value::byte_string(ByteWidth::B33, pubkey.to_vec())?;

        Ok(vec![
            WireParam::from_value("to", &to, None)?,
            WireParam::from_value("amount", &amount, None)?,
            WireParam::from_value("fee", &fee, None)?,
            WireParam::from_value("nonce", &nonce, None)?,
            WireParam::from_value("signature", &sig, None)?,
            WireParam::from_value("pubkey", &pk, None)?,
        ])
    }
}

/// Off-chain view of token balances and allowances.
///
/// Lookups return `None` for absent entries. Whether an absent entry means
/// zero is the caller's decision, made visible at the call site by matching;
/// this type never substitutes a default.
#[derive(Debug, Clone, Default)]
pub struct TokenState {
    balances: BTreeMap<Address, u128>,
    allowances: BTreeMap<(Address, Address), u128>,
}

impl TokenState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_balance(&mut self, account: Address, amount: u128) {
        self.balances.insert(account, amount);
    }

    pub fn set_allowance(&mut self, owner: Address, spender: Address, amount: u128) {
        self.allowances.insert((owner, spender), amount);
    }

    /// Balance of an account, `None` if the account has no entry.
    pub fn balance(&self, account: &Address) -> Option<u128> {
        self.balances.get(account).copied()
    }

    /// Allowance granted by `owner` to `spender`, `None` if never set.
    pub fn allowance(&self, owner: &Address, spender: &Address) -> Option<u128> {
        self.allowances.get(&(*owner, *spender)).copied()
    }
}
