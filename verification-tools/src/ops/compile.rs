// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! Solidity compilation.

use crate::core::{compile, config::ProjectConfig};

/// Compiles the project's contracts into its build directory.
pub fn compile(config: &ProjectConfig) -> crate::Result<()> {
    let contracts_dir = config.contracts_dir();
    greyln!("compiling contracts in {}", contracts_dir.display());
    let artifacts = compile::compile(&contracts_dir, config.build_dir())?;
    for artifact in &artifacts {
        mintln!(
            "compiled {} ({} bytes)",
            artifact.name(),
            artifact.bytecode.len()
        );
    }
    Ok(())
}
