// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

use std::path::PathBuf;

use verification_tools::core::{
    config::{ConfigError, ProjectConfig, CONFIG_FILE},
    network::{Network, NetworkError},
};

#[derive(Debug, clap::Args)]
pub struct ConfigArgs {
    /// Path to the project configuration file
    #[arg(long, global = true, default_value = CONFIG_FILE)]
    config: PathBuf,
}

impl ConfigArgs {
    pub fn load(&self) -> Result<ProjectConfig, ConfigError> {
        log::debug!("loading project configuration from {}", self.config.display());
        ProjectConfig::load(&self.config)
    }
}

#[derive(Debug, clap::Args)]
pub struct NetworkArgs {
    /// Network to connect to. Uses the configured default when omitted
    #[arg(short, long)]
    network: Option<String>,
    /// Only perform gas estimation
    #[arg(long)]
    pub estimate_gas: bool,
}

impl NetworkArgs {
    pub fn network(&self, config: &ProjectConfig) -> Result<Network, NetworkError> {
        Network::from_config(config, self.network.as_deref())
    }
}
