// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! The verification procedure, end to end.

use alloy::providers::Provider;

use crate::{
    core::{
        config::ProjectConfig,
        deployment::{print_gas_estimate, DeploymentConfig},
        network::Network,
        verification::{Verification, VerificationReport},
    },
    ops,
};

/// Prints the two accounts, then deploys `DAI` and `BaseContract` and calls
/// `startVerification` on `network`.
///
/// Returns `None` when only estimating gas.
pub async fn run(
    config: &ProjectConfig,
    network: &Network,
    estimate_gas: bool,
) -> crate::Result<Option<VerificationReport>> {
    let accounts = ops::accounts::load(config)?;
    let provider = network.provider_with_accounts(&accounts).await?;
    info!(@grey, "running verification on network {}", network.name);

    let record_chain_id = if network.persist && !estimate_gas {
        Some(provider.get_chain_id().await?)
    } else {
        None
    };
    let verification = Verification::builder()
        .accounts(&accounts)
        .build_dir(config.build_dir())
        .config(DeploymentConfig {
            max_fee_per_gas_wei: network.max_fee_per_gas_wei,
        })
        .record_chain_id(record_chain_id)
        .build();

    if estimate_gas {
        for (name, estimate) in verification.estimate(&provider).await? {
            print_gas_estimate(&name, &estimate)?;
        }
        return Ok(None);
    }

    let report = verification.run(&provider).await?;
    Ok(Some(report))
}
