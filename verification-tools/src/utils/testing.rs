// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! Fixtures for integration tests against a development node.

use std::fs;

use eyre::Result;
use tempfile::TempDir;

use crate::{
    core::config::{ProjectConfig, CONFIG_FILE},
    devnet::Node,
    ops,
};

const SOURCES: [(&str, &str); 2] = [
    (
        "DAI.sol",
        include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/../contracts/DAI.sol")),
    ),
    (
        "BaseContract.sol",
        include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/../contracts/BaseContract.sol")),
    ),
];

/// A compiled project whose development network is a fresh node.
pub struct TestProject {
    pub node: Node,
    pub dir: TempDir,
    pub config: ProjectConfig,
}

impl TestProject {
    /// Start a node, write the project files, and compile the contracts.
    pub async fn new() -> Result<Self> {
        let node = Node::new().await?;
        let dir = tempfile::tempdir()?;

        let contracts = dir.path().join("contracts");
        fs::create_dir(&contracts)?;
        for (file, source) in SOURCES {
            fs::write(contracts.join(file), source)?;
        }
        fs::write(dir.path().join(CONFIG_FILE), node.config_toml())?;

        let config = ProjectConfig::load(dir.path().join(CONFIG_FILE))?;
        println!("Compiling contracts in {}...", contracts.display());
        ops::compile(&config)?;

        Ok(Self { node, dir, config })
    }
}
