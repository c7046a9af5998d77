// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! Handles to deployed contracts.

use std::fmt;

use alloy::{
    dyn_abi::{DynSolValue, JsonAbiExt},
    json_abi::{Function, JsonAbi},
    primitives::{Address, Bytes, TxHash},
    providers::Provider,
    rpc::types::TransactionReceipt,
};

use crate::{
    core::transaction::{TransactionError, TxRequest},
    utils::color::DebugColor,
};

#[derive(Debug, thiserror::Error)]
pub enum CallError {
    #[error("contract {contract} has no method {method}")]
    UnknownMethod { contract: String, method: String },
    #[error("no overload of {contract}.{method} takes {got} arguments")]
    Arity {
        contract: String,
        method: String,
        got: usize,
    },
    #[error("abi encoding failed: {0}")]
    Encode(#[from] alloy::dyn_abi::Error),
    #[error("{contract}.{method} failed: {source}")]
    Transaction {
        contract: String,
        method: String,
        source: TransactionError,
    },
}

/// A contract instance living on chain.
#[derive(Clone, Debug)]
pub struct DeployedContract {
    name: String,
    address: Address,
    abi: JsonAbi,
    tx_hash: TxHash,
}

impl DeployedContract {
    pub fn new(name: impl Into<String>, address: Address, abi: JsonAbi, tx_hash: TxHash) -> Self {
        Self {
            name: name.into(),
            address,
            abi,
            tx_hash,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn address(&self) -> Address {
        self.address
    }

    /// Hash of the transaction that created this contract.
    pub fn tx_hash(&self) -> TxHash {
        self.tx_hash
    }

    /// Find the overload of `method` that takes `arity` arguments.
    pub fn function(&self, method: &str, arity: usize) -> Result<&Function, CallError> {
        let overloads = self
            .abi
            .function(method)
            .ok_or_else(|| CallError::UnknownMethod {
                contract: self.name.clone(),
                method: method.to_string(),
            })?;
        overloads
            .iter()
            .find(|function| function.inputs.len() == arity)
            .ok_or_else(|| CallError::Arity {
                contract: self.name.clone(),
                method: method.to_string(),
                got: arity,
            })
    }

    /// Selector-prefixed calldata for `method(args..)`.
    pub fn calldata(&self, method: &str, args: &[DynSolValue]) -> Result<Bytes, CallError> {
        let function = self.function(method, args.len())?;
        Ok(function.abi_encode_input(args)?.into())
    }

    /// Send a state-changing call from `from` and wait for it to be mined.
    pub async fn send(
        &self,
        method: &str,
        args: &[DynSolValue],
        from: Address,
        max_fee_per_gas_wei: Option<u128>,
        provider: &impl Provider,
    ) -> Result<TransactionReceipt, CallError> {
        let input = self.calldata(method, args)?;
        debug!(@grey, "calling {}.{} at {}", self.name, method, self.address.debug_lavender());
        TxRequest::call(from, self.address, input, max_fee_per_gas_wei)
            .exec(provider)
            .await
            .map_err(|source| CallError::Transaction {
                contract: self.name.clone(),
                method: method.to_string(),
                source,
            })
    }
}

impl fmt::Display for DeployedContract {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at {}", self.name, self.address)
    }
}

#[cfg(test)]
mod tests {
    use alloy::primitives::{address, keccak256};

    use super::*;

    fn base_contract() -> DeployedContract {
        let abi: JsonAbi = serde_json::from_str(
            r#"[
                {"type": "function", "name": "startVerification", "inputs": [], "outputs": [], "stateMutability": "nonpayable"},
                {"type": "function", "name": "setVerifier", "inputs": [{"name": "verifier", "type": "address"}], "outputs": [], "stateMutability": "nonpayable"}
            ]"#,
        )
        .unwrap();
        DeployedContract::new(
            "BaseContract",
            address!("e7f1725E7734CE288F8367e1Bb143E90bb3F0512"),
            abi,
            TxHash::ZERO,
        )
    }

    #[test]
    fn encodes_zero_argument_call() {
        let contract = base_contract();
        let calldata = contract.calldata("startVerification", &[]).unwrap();
        assert_eq!(&calldata[..], &keccak256("startVerification()")[..4]);
    }

    #[test]
    fn encodes_call_with_arguments() {
        let contract = base_contract();
        let verifier = address!("70997970C51812dc3A010C7d01b50e0d17dc79C8");
        let calldata = contract
            .calldata("setVerifier", &[DynSolValue::Address(verifier)])
            .unwrap();
        assert_eq!(calldata.len(), 4 + 32);
        assert_eq!(&calldata[..4], &keccak256("setVerifier(address)")[..4]);
        assert_eq!(&calldata[16..], verifier.as_slice());
    }

    #[test]
    fn unknown_method_and_arity() {
        let contract = base_contract();
        assert!(matches!(
            contract.calldata("stopVerification", &[]),
            Err(CallError::UnknownMethod { .. })
        ));
        assert!(matches!(
            contract.calldata("startVerification", &[DynSolValue::Bool(true)]),
            Err(CallError::Arity { got: 1, .. })
        ));
    }

    #[test]
    fn displays_name_and_address() {
        assert_eq!(
            base_contract().to_string(),
            "BaseContract at 0xe7f1725E7734CE288F8367e1Bb143E90bb3F0512"
        );
    }
}
