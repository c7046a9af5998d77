// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! Named networks and provider construction.

use alloy::providers::{Provider, ProviderBuilder, WalletProvider};

use crate::{
    core::{
        accounts::{AccountError, Accounts},
        config::{ConfigError, ProjectConfig, DEVELOPMENT},
    },
    utils::{parse_gwei, FeeError},
};

#[derive(Debug, thiserror::Error)]
pub enum NetworkError {
    #[error("{0}")]
    Config(#[from] ConfigError),
    #[error("{0}")]
    Account(#[from] AccountError),
    #[error("could not connect to network {name} at {host}: {source}")]
    Connect {
        name: String,
        host: String,
        source: alloy::transports::RpcError<alloy::transports::TransportErrorKind>,
    },
    #[error("invalid max fee per gas for network {network}: {source}")]
    Fee { network: String, source: FeeError },
}

/// A network the project can deploy to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Network {
    pub name: String,
    pub host: String,
    /// Whether deployments are recorded to the build directory.
    pub persist: bool,
    pub max_fee_per_gas_wei: Option<u128>,
}

impl Network {
    /// Resolve a network by name, or the configured default when `name` is `None`.
    pub fn from_config(config: &ProjectConfig, name: Option<&str>) -> Result<Self, NetworkError> {
        let (name, network) = config.network_config(name)?;
        let max_fee_per_gas_wei = network
            .max_fee_per_gas_gwei
            .as_deref()
            .map(parse_gwei)
            .transpose()
            .map_err(|source| NetworkError::Fee {
                network: name.clone(),
                source,
            })?;
        let persist = network.persist.unwrap_or(name != DEVELOPMENT);
        Ok(Self {
            name,
            host: network.host,
            persist,
            max_fee_per_gas_wei,
        })
    }

    /// Provider without signing capabilities.
    pub async fn provider(&self) -> Result<impl Provider, NetworkError> {
        ProviderBuilder::new()
            .connect(&self.host)
            .await
            .map_err(|source| self.connect_error(source))
    }

    /// Provider that signs with every registered account, account 0 by default.
    pub async fn provider_with_accounts(
        &self,
        accounts: &Accounts,
    ) -> Result<impl Provider + WalletProvider, NetworkError> {
        let chain_id = self
            .provider()
            .await?
            .get_chain_id()
            .await
            .map_err(|source| self.connect_error(source))?;
        debug!(@grey, "connected to {} (chain id {})", self.name, chain_id);
        let wallet = accounts.wallet(chain_id)?;
        ProviderBuilder::new()
            .wallet(wallet)
            .connect(&self.host)
            .await
            .map_err(|source| self.connect_error(source))
    }

    fn connect_error(
        &self,
        source: alloy::transports::RpcError<alloy::transports::TransportErrorKind>,
    ) -> NetworkError {
        NetworkError::Connect {
            name: self.name.clone(),
            host: self.host.clone(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::DEVELOPMENT_HOST;

    #[test]
    fn development_is_not_persisted() {
        let config = ProjectConfig::parse("", |_| None).unwrap();
        let network = Network::from_config(&config, None).unwrap();
        assert_eq!(
            network,
            Network {
                name: DEVELOPMENT.to_string(),
                host: DEVELOPMENT_HOST.to_string(),
                persist: false,
                max_fee_per_gas_wei: None,
            }
        );
    }

    #[test]
    fn other_networks_persist_by_default() {
        let text = r#"
            [networks.sepolia]
            host = "https://rpc.example.org"
            max_fee_per_gas_gwei = "2.5"

            [networks.fork]
            host = "http://127.0.0.1:8546"
            persist = false
        "#;
        let config = ProjectConfig::parse(text, |_| None).unwrap();

        let sepolia = Network::from_config(&config, Some("sepolia")).unwrap();
        assert!(sepolia.persist);
        assert_eq!(sepolia.max_fee_per_gas_wei, Some(2_500_000_000));

        let fork = Network::from_config(&config, Some("fork")).unwrap();
        assert!(!fork.persist);
    }

    #[test]
    fn invalid_fee_names_network() {
        let text = r#"
            [networks.sepolia]
            host = "https://rpc.example.org"
            max_fee_per_gas_gwei = "-1"
        "#;
        let config = ProjectConfig::parse(text, |_| None).unwrap();
        let err = Network::from_config(&config, Some("sepolia")).unwrap_err();
        assert!(matches!(err, NetworkError::Fee { network, .. } if network == "sepolia"));
    }
}
