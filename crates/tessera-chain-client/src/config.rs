//! Chain configuration for clients.
//!
//! This crate does not read environment variables. All configuration is
//! provided explicitly by the caller so that argument building stays
//! deterministic and reproducible.

use anyhow::{bail, Result};

use crate::constants::{
    tx_version, DEFAULT_CHAIN_ID, DEFAULT_GAS_LIMIT, DEFAULT_GAS_PRICE, MSG_VERSION,
};

/// Chain parameters a client needs to build and submit calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainConfig {
    pub chain_id: u16,
    pub msg_version: u16,
    pub gas_price: u128,
    pub gas_limit: u64,
}

impl Default for ChainConfig {
    fn default() -> Self {
        Self {
            chain_id: DEFAULT_CHAIN_ID,
            msg_version: MSG_VERSION,
            gas_price: DEFAULT_GAS_PRICE,
            gas_limit: DEFAULT_GAS_LIMIT,
        }
    }
}

impl ChainConfig {
    /// The packed transaction version word for this chain.
    pub fn tx_version(&self) -> u32 {
        tx_version(self.chain_id, self.msg_version)
    }
}

/// Validate a configuration object.
pub fn validate_config(cfg: &ChainConfig) -> Result<()> {
    if cfg.chain_id == 0 {
        bail!("chain_id must be greater than zero");
    }
    if cfg.msg_version == 0 {
        bail!("msg_version must be greater than zero");
    }
    if cfg.gas_limit == 0 {
        bail!("gas_limit must be greater than zero");
    }
    Ok(())
}
