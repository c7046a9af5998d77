// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

use verification_tools::ops;

use crate::{
    common_args::{ConfigArgs, NetworkArgs},
    error::CliResult,
};

#[derive(Debug, clap::Args)]
pub struct Args {
    /// Name of the compiled contract to deploy
    contract: String,
    /// Index of the configured key sending the deployment
    #[arg(long, default_value_t = 0)]
    from: usize,
    /// The constructor arguments.
    #[arg(
        long,
        num_args(0..),
        value_name = "ARGS",
        allow_hyphen_values = true,
    )]
    args: Vec<String>,

    #[command(flatten)]
    network: NetworkArgs,
}

pub async fn exec(args: Args, config: ConfigArgs) -> CliResult {
    let config = config.load()?;
    let network = args.network.network(&config)?;
    if let Some(deployed) = ops::deploy(
        &config,
        &network,
        &args.contract,
        args.from,
        &args.args,
        args.network.estimate_gas,
    )
    .await?
    {
        println!("{deployed}");
    }
    Ok(())
}
