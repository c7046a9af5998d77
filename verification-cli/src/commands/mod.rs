// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

use crate::{common_args::ConfigArgs, error::CliResult};

mod accounts;
mod compile;
mod deploy;
mod run;

#[derive(Debug, clap::Subcommand)]
pub enum Command {
    /// Print the addresses of the two configured accounts
    Accounts,
    /// Compile the Solidity contracts into the build directory
    #[clap(visible_alias = "c")]
    Compile,
    /// Deploy a single compiled contract
    #[clap(visible_alias = "d")]
    Deploy(deploy::Args),
    /// Deploy DAI and BaseContract, then start verification
    #[clap(visible_alias = "r")]
    Run(run::Args),
}

pub async fn exec(cmd: Command, config: ConfigArgs) -> CliResult {
    match cmd {
        Command::Accounts => accounts::exec(config),
        Command::Compile => compile::exec(config),
        Command::Deploy(args) => deploy::exec(args, config).await,
        Command::Run(args) => run::exec(args, config).await,
    }
}
