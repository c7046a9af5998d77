// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! Contract deployment.

use alloy::{
    dyn_abi::DynSolValue,
    primitives::{utils::format_units, Address, U256},
    providers::Provider,
};

use crate::{
    core::{
        artifacts::{ArtifactError, ContractArtifact},
        contract::DeployedContract,
        transaction::{TransactionError, TxRequest},
    },
    utils::{color::DebugColor, format_eth},
};

pub mod record;

#[derive(Debug, Default)]
pub struct DeploymentConfig {
    pub max_fee_per_gas_wei: Option<u128>,
}

#[derive(Debug, thiserror::Error)]
pub enum DeploymentError {
    #[error("{0}")]
    Artifact(#[from] ArtifactError),
    #[error("deployment of {contract} failed: {source}")]
    Transaction {
        contract: String,
        source: TransactionError,
    },
    #[error("missing contract address in receipt for {0}")]
    MissingReceiptAddress(String),
    #[error("failed to format gas estimate: {0}")]
    Units(#[from] alloy::primitives::utils::UnitsError),
}

/// Gas estimate for a single deployment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GasEstimate {
    pub gas: u64,
    pub gas_price: u128,
}

impl GasEstimate {
    pub fn total_cost(&self) -> U256 {
        U256::from(self.gas_price).saturating_mul(U256::from(self.gas))
    }
}

/// Deploys `artifact` with constructor `args` from `from`, waiting for the receipt.
pub async fn deploy(
    artifact: &ContractArtifact,
    args: &[DynSolValue],
    from: Address,
    config: &DeploymentConfig,
    provider: &impl Provider,
) -> Result<DeployedContract, DeploymentError> {
    let code = artifact.deploy_code(args)?;
    debug!(@grey, "deploying {} from {}", artifact.name(), from.debug_lavender());
    let receipt = TxRequest::create(from, code, config.max_fee_per_gas_wei)
        .exec(provider)
        .await
        .map_err(|source| DeploymentError::Transaction {
            contract: artifact.name().to_string(),
            source,
        })?;
    let address = receipt
        .contract_address
        .ok_or_else(|| DeploymentError::MissingReceiptAddress(artifact.name().to_string()))?;

    info!(@grey, "deployed {} at address: {}", artifact.name(), address.debug_lavender());
    debug!(@grey, "gas used: {}", receipt.gas_used);
    info!(@grey, "deployment tx hash: {}", receipt.transaction_hash.debug_lavender());

    Ok(DeployedContract::new(
        artifact.name(),
        address,
        artifact.abi.clone(),
        receipt.transaction_hash,
    ))
}

/// Estimates the gas to deploy `artifact` without sending anything.
pub async fn estimate_gas(
    artifact: &ContractArtifact,
    args: &[DynSolValue],
    from: Address,
    config: &DeploymentConfig,
    provider: &impl Provider,
) -> Result<GasEstimate, DeploymentError> {
    let code = artifact.deploy_code(args)?;
    let req = TxRequest::create(from, code, config.max_fee_per_gas_wei);
    let transaction_error = |source| DeploymentError::Transaction {
        contract: artifact.name().to_string(),
        source,
    };
    let gas = req.estimate_gas(provider).await.map_err(transaction_error)?;
    let gas_price = req.fee_per_gas(provider).await.map_err(transaction_error)?;
    Ok(GasEstimate { gas, gas_price })
}

/// Prints a gas estimate the way deployment output is shown.
pub fn print_gas_estimate(name: &str, estimate: &GasEstimate) -> Result<(), DeploymentError> {
    greyln!("{} deployment estimates", name);
    greyln!("deployment tx gas: {}", estimate.gas.debug_lavender());
    greyln!(
        "gas price: {} gwei",
        format_units(U256::from(estimate.gas_price), "gwei")?.debug_lavender()
    );
    greyln!("deployment tx total cost: {}", format_eth(estimate.total_cost()));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn total_cost_is_gas_times_price() {
        let estimate = GasEstimate {
            gas: 21_000,
            gas_price: 2_000_000_000,
        };
        assert_eq!(estimate.total_cost(), U256::from(42_000_000_000_000u64));
    }
}
