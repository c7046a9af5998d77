// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! Single contract deployment.

use alloy::providers::Provider;

use crate::{
    core::{
        artifacts::ContractArtifact,
        config::ProjectConfig,
        contract::DeployedContract,
        deployment::{self, print_gas_estimate, record, DeploymentConfig},
        network::Network,
    },
    ops,
};

/// Deploys one artifact from the configured account at `from`.
///
/// Returns `None` when only estimating gas.
pub async fn deploy(
    config: &ProjectConfig,
    network: &Network,
    contract: &str,
    from: usize,
    args: &[String],
    estimate_gas: bool,
) -> crate::Result<Option<DeployedContract>> {
    let accounts = ops::accounts::load_all(config)?;
    let sender = accounts.get(from)?.address();
    let artifact = ContractArtifact::load(config.build_dir(), contract)?;
    let args = artifact.constructor_args(args)?;

    let provider = network.provider_with_accounts(&accounts).await?;
    let deployment_config = DeploymentConfig {
        max_fee_per_gas_wei: network.max_fee_per_gas_wei,
    };

    if estimate_gas {
        let estimate =
            deployment::estimate_gas(&artifact, &args, sender, &deployment_config, &provider)
                .await?;
        print_gas_estimate(artifact.name(), &estimate)?;
        return Ok(None);
    }

    let deployed =
        deployment::deploy(&artifact, &args, sender, &deployment_config, &provider).await?;
    if network.persist {
        let chain_id = provider.get_chain_id().await?;
        record::append(
            config.build_dir(),
            record::DeploymentRecord::new(&deployed, sender, chain_id),
        )?;
    }
    Ok(Some(deployed))
}
