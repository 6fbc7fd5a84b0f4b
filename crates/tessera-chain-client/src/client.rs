//! Contract-invocation client surface.
//!
//! This client layer can:
//! - build ordered wire argument lists from typed values
//! - validate them against a transition ABI
//! - hand them to a `ContractClient` for submission
//!
//! The actual transport (RPC, queueing, retries, confirmation polling) is
//! owned by the `ContractClient` implementation. `InMemoryClient` records
//! invocations and derives deterministic transaction ids; tests and dry runs
//! use it in place of a network client.

use std::sync::Mutex;

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use tessera_core::address::Address;
use tessera_core::value::{Qualifier, Value};
use tessera_core::wire::WireParam;

use crate::abi::{check_params, AbiProvider};
use crate::constants::{DEFAULT_GAS_LIMIT, DEFAULT_GAS_PRICE};

/// Per-call submission options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxOptions {
    /// Native amount attached to the call.
    pub amount: u128,
    pub gas_price: u128,
    pub gas_limit: u64,
    /// Account nonce; `None` lets the transport pick the next one.
    pub nonce: Option<u64>,
}

impl Default for TxOptions {
    fn default() -> Self {
        Self {
            amount: 0,
            gas_price: DEFAULT_GAS_PRICE,
            gas_limit: DEFAULT_GAS_LIMIT,
            nonce: None,
        }
    }
}

/// Handle to a submitted transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxHandle {
    pub id: String,
}

/// A contract-invocation collaborator.
pub trait ContractClient {
    fn invoke(
        &self,
        contract: &Address,
        transition: &str,
        args: &[WireParam],
        opts: &TxOptions,
    ) -> Result<TxHandle>;
}

/// One invocation recorded by [`InMemoryClient`].
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub contract: Address,
    pub transition: String,
    pub args: Vec<WireParam>,
    pub opts: TxOptions,
}

/// A transport-free client that records every invocation.
///
/// Transaction ids are derived deterministically from the call payload, so
/// identical invocations produce identical handles.
#[derive(Debug, Default)]
pub struct InMemoryClient {
    calls: Mutex<Vec<RecordedCall>>,
}

impl InMemoryClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the recorded invocations, in submission order.
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().expect("client mutex poisoned").clone()
    }
}

impl ContractClient for InMemoryClient {
    fn invoke(
        &self,
        contract: &Address,
        transition: &str,
        args: &[WireParam],
        opts: &TxOptions,
    ) -> Result<TxHandle> {
        let payload = serde_json::to_vec(&(contract.to_hex(), transition, args))
            .map_err(|e| anyhow!("encode call payload: {e}"))?;

        let mut h = Sha256::new();
        h.update(&payload);
        let id = hex::encode(h.finalize());

        tracing::debug!(
            contract = %contract.to_hex(),
            transition,
            args = args.len(),
            tx = %id,
            "recorded invocation"
        );

        self.calls.lock().expect("client mutex poisoned").push(RecordedCall {
            contract: *contract,
            transition: transition.to_string(),
            args: args.to_vec(),
            opts: opts.clone(),
        });

        Ok(TxHandle { id })
    }
}

/// Builds the ordered argument list for one transition call.
///
/// Values are encoded as they are added; a value tree containing a named
/// variant needs the qualifier set first via [`CallBuilder::qualifier`].
#[derive(Debug, Clone)]
pub struct CallBuilder {
    contract: Address,
    transition: String,
    qual: Option<Qualifier>,
    args: Vec<WireParam>,
}

impl CallBuilder {
    pub fn new(contract: Address, transition: impl Into<String>) -> Self {
        Self {
            contract,
            transition: transition.into(),
            qual: None,
            args: Vec::new(),
        }
    }

    /// Set the qualifier threaded into subsequent `arg` encodings.
    pub fn qualifier(mut self, qual: Qualifier) -> Self {
        self.qual = Some(qual);
        self
    }

    /// Append one named argument, encoding it immediately.
    pub fn arg(mut self, vname: &str, value: &Value) -> Result<Self> {
        let param = WireParam::from_value(vname, value, self.qual.as_ref())
            .map_err(|e| anyhow!("argument {vname:?}: {e}"))?;
        self.args.push(param);
        Ok(self)
    }

    /// Append a pre-encoded argument.
    pub fn raw_arg(mut self, param: WireParam) -> Self {
        self.args.push(param);
        self
    }

    pub fn args(&self) -> &[WireParam] {
        &self.args
    }

    /// Validate the built list against the transition's declared parameters.
    pub fn check(&self, provider: &dyn AbiProvider) -> Result<()> {
        let abi = provider
            .transition(&self.contract, &self.transition)?
            .ok_or_else(|| {
                anyhow!(
                    "unknown transition {} on {}",
                    self.transition,
                    self.contract.to_hex()
                )
            })?;
        check_params(&abi, &self.args)
    }

    /// Submit through the given client.
    pub fn invoke(self, client: &dyn ContractClient, opts: &TxOptions) -> Result<TxHandle> {
        tracing::debug!(
            contract = %self.contract.to_hex(),
            transition = %self.transition,
            args = self.args.len(),
            "submitting call"
        );
        client.invoke(&self.contract, &self.transition, &self.args, opts)
    }
}
