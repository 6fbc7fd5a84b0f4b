//! Contract ABI providers.
//!
//! Argument lists are validated against a transition's declared parameters
//! before submission. Where those parameter lists come from is a deployment
//! concern (compiled contract metadata, a registry service, a fixture file),
//! so the lookup sits behind the `AbiProvider` trait and the core never
//! shells out to introspection tooling.
//!
//! `StaticAbiProvider` is the in-memory implementation used by tests and
//! fixtures:
//! - stable ordering for lookups and iteration
//! - clear errors for duplicate registrations
//! - no global mutable state

use std::collections::BTreeMap;

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};

use tessera_core::address::Address;
use tessera_core::wire::WireParam;

/// One declared transition parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionParam {
    pub vname: String,
    #[serde(rename = "type")]
    pub ty: String,
}

impl TransitionParam {
    pub fn new(vname: impl Into<String>, ty: impl Into<String>) -> Self {
        Self {
            vname: vname.into(),
            ty: ty.into(),
        }
    }
}

/// A transition's name and declared parameter list, in declared order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionAbi {
    pub name: String,
    pub params: Vec<TransitionParam>,
}

/// Resolves a `(contract, transition)` pair to its declared parameters.
pub trait AbiProvider {
    fn transition(&self, contract: &Address, name: &str) -> Result<Option<TransitionAbi>>;
}

/// An in-memory ABI registry keyed by contract address and transition name.
#[derive(Debug, Default)]
pub struct StaticAbiProvider {
    transitions: BTreeMap<(String, String), TransitionAbi>,
}

impl StaticAbiProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.transitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transitions.is_empty()
    }

    /// Register a transition ABI for a contract.
    ///
    /// Registration order does not affect resolution because the internal
    /// store is a `BTreeMap`.
    pub fn register(&mut self, contract: &Address, abi: TransitionAbi) -> Result<()> {
        let key = (contract.to_hex(), abi.name.clone());
        if self.transitions.contains_key(&key) {
            bail!(
                "transition already registered: {} on {}",
                abi.name,
                contract.to_hex()
            );
        }
        self.transitions.insert(key, abi);
        Ok(())
    }

    /// List registered (contract, transition) keys in deterministic order.
    pub fn list(&self) -> Vec<(String, String)> {
        self.transitions.keys().cloned().collect()
    }
}

impl AbiProvider for StaticAbiProvider {
    fn transition(&self, contract: &Address, name: &str) -> Result<Option<TransitionAbi>> {
        Ok(self
            .transitions
            .get(&(contract.to_hex(), name.to_string()))
            .cloned())
    }
}

/// Check an argument list against a transition's declared parameters.
///
/// Arguments must match in count, name order, and type tag.
pub fn check_params(abi: &TransitionAbi, args: &[WireParam]) -> Result<()> {
    if args.len() != abi.params.len() {
        bail!(
            "transition {} expects {} arguments, got {}",
            abi.name,
            abi.params.len(),
            args.len()
        );
    }

    for (declared, arg) in abi.params.iter().zip(args) {
        if declared.vname != arg.vname {
            bail!(
                "transition {}: expected argument {:?}, got {:?}",
                abi.name,
                declared.vname,
                arg.vname
            );
        }
        if declared.ty != arg.ty {
            bail!(
                "transition {} argument {:?}: expected type {}, got {}",
                abi.name,
                declared.vname,
                declared.ty,
                arg.ty
            );
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tessera_core::prelude::*;

    fn contract() -> Address {
        Address::from_bytes([0x21; 20])
    }

    fn transfer_abi() -> TransitionAbi {
        TransitionAbi {
            name: "Transfer".to_string(),
            params: vec![
                TransitionParam::new("to", "ByStr20"),
                TransitionParam::new("amount", "Uint128"),
            ],
        }
    }

    #[test]
    fn register_and_resolve() {
        let mut p = StaticAbiProvider::new();
        p.register(&contract(), transfer_abi()).unwrap();

        let abi = p.transition(&contract(), "Transfer").unwrap().unwrap();
        assert_eq!(abi.params.len(), 2);
        assert!(p.transition(&contract(), "Burn").unwrap().is_none());
    }

    #[test]
    fn duplicate_registration_rejected() {
        let mut p = StaticAbiProvider::new();
        p.register(&contract(), transfer_abi()).unwrap();
        assert!(p.register(&contract(), transfer_abi()).is_err());
    }

    #[test]
    fn check_params_accepts_matching_list() {
        let args = vec![
            WireParam::from_value("to", &Value::address(Address::ZERO), None).unwrap(),
            WireParam::from_value("amount", &Value::uint128(10), None).unwrap(),
        ];
        check_params(&transfer_abi(), &args).unwrap();
    }

    #[test]
    fn check_params_rejects_wrong_order() {
        let args = vec![
            WireParam::from_value("amount", &Value::uint128(10), None).unwrap(),
            WireParam::from_value("to", &Value::address(Address::ZERO), None).unwrap(),
        ];
        assert!(check_params(&transfer_abi(), &args).is_err());
    }

    #[test]
    fn check_params_rejects_wrong_type() {
        let args = vec![
            WireParam::from_value("to", &Value::address(Address::ZERO), None).unwrap(),
            WireParam::from_value("amount", &Value::uint32(10), None).unwrap(),
        ];
        assert!(check_params(&transfer_abi(), &args).is_err());
    }

    #[test]
    fn check_params_rejects_wrong_count() {
        let args = vec![WireParam::from_value("to", &Value::address(Address::ZERO), None).unwrap()];
        assert!(check_params(&transfer_abi(), &args).is_err());
    }
}
