//! tessera-chain-client
//!
//! This crate provides the client-side surfaces around `tessera-core`:
//! - chain configuration and transaction versioning constants
//! - ABI providers for transition parameter lists
//! - a contract-invocation interface plus a recording in-memory client
//! - a signing interface for wallets and key managers
//! - meta-transaction preimage, signing, and relay helpers
//!
//! Note: network transport is owned by `ContractClient` implementations.
//! Everything here builds deterministic payloads for them.

pub mod abi;
pub mod client;
pub mod config;
pub mod constants;
pub mod meta;
pub mod signer;

pub use abi::{check_params, AbiProvider, StaticAbiProvider, TransitionAbi, TransitionParam};
pub use client::{CallBuilder, ContractClient, InMemoryClient, RecordedCall, TxHandle, TxOptions};
pub use config::{validate_config, ChainConfig};
pub use constants::*;
pub use meta::{MetaTransfer, TokenState};
pub use signer::Signer;
