// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

use verification_tools::ops;

use crate::{common_args::ConfigArgs, error::CliResult};

pub fn exec(config: ConfigArgs) -> CliResult {
    let config = config.load()?;
    ops::compile(&config)?;
    Ok(())
}
