// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

use verification_tools::ops;

use crate::{
    common_args::{ConfigArgs, NetworkArgs},
    error::CliResult,
};

#[derive(Debug, clap::Args)]
pub struct Args {
    /// Compile the contracts before running
    #[arg(long)]
    compile: bool,

    #[command(flatten)]
    network: NetworkArgs,
}

pub async fn exec(args: Args, config: ConfigArgs) -> CliResult {
    let config = config.load()?;
    let network = args.network.network(&config)?;
    if args.compile {
        ops::compile(&config)?;
    }
    if let Some(report) = ops::run(&config, &network, args.network.estimate_gas).await? {
        print!("{report}");
    }
    Ok(())
}
