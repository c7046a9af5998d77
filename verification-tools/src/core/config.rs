// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! Project configuration.
//!
//! Configuration lives in a `verification.toml` file at the project root:
//!
//! ```toml
//! dotenv = ".env"
//!
//! [wallets]
//! from_key = ["${PRIVATE_KEY_A}", "${PRIVATE_KEY_B}"]
//!
//! [networks]
//! default = "development"
//!
//! [networks.sepolia]
//! host = "https://sepolia.example.org/rpc"
//! max_fee_per_gas_gwei = "2.5"
//! ```
//!
//! Any string value may reference environment variables as `${NAME}`. Variables from the
//! optional dotenv file are loaded before expansion, without overriding the process environment.

use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
    sync::OnceLock,
};

use regex::{Captures, Regex};
use serde::Deserialize;

/// Name of the project configuration file.
pub const CONFIG_FILE: &str = "verification.toml";

/// Network used when neither the command line nor the config file names one.
pub const DEVELOPMENT: &str = "development";

/// RPC endpoint of the built-in development network.
pub const DEVELOPMENT_HOST: &str = "http://127.0.0.1:8545";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not read config file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid config: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("could not load dotenv file: {0}")]
    Dotenv(#[from] dotenv::Error),
    #[error("environment variable {0} referenced in config is not set")]
    UnsetVariable(String),
    #[error("no private key at wallets.from_key[{index}] ({available} configured)")]
    MissingKey { index: usize, available: usize },
    #[error("unknown network {name}, expected one of: {known}")]
    UnknownNetwork { name: String, known: String },
}

/// Parsed contents of `verification.toml`.
#[derive(Debug, Default, Deserialize)]
pub struct ProjectConfig {
    /// Directory the config file was loaded from. Relative paths resolve against it.
    #[serde(skip)]
    root: PathBuf,

    #[serde(default)]
    pub dotenv: Option<PathBuf>,
    #[serde(default)]
    pub wallets: WalletsConfig,
    #[serde(default)]
    pub networks: NetworksConfig,
    #[serde(default)]
    pub project: PathsConfig,
}

#[derive(Debug, Default, Deserialize)]
pub struct WalletsConfig {
    #[serde(default)]
    pub from_key: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct NetworksConfig {
    #[serde(default = "default_network")]
    pub default: String,
    #[serde(flatten)]
    pub networks: BTreeMap<String, NetworkConfig>,
}

impl Default for NetworksConfig {
    fn default() -> Self {
        Self {
            default: default_network(),
            networks: BTreeMap::new(),
        }
    }
}

fn default_network() -> String {
    DEVELOPMENT.to_string()
}

#[derive(Clone, Debug, Deserialize)]
pub struct NetworkConfig {
    pub host: String,
    /// Whether deployments on this network are recorded to disk.
    pub persist: Option<bool>,
    pub max_fee_per_gas_gwei: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct PathsConfig {
    #[serde(default = "default_build_dir")]
    pub build_dir: PathBuf,
    #[serde(default = "default_contracts_dir")]
    pub contracts_dir: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            build_dir: default_build_dir(),
            contracts_dir: default_contracts_dir(),
        }
    }
}

fn default_build_dir() -> PathBuf {
    "build".into()
}

fn default_contracts_dir() -> PathBuf {
    "contracts".into()
}

impl ProjectConfig {
    /// Load `verification.toml` from the current directory.
    pub fn current() -> Result<Self, ConfigError> {
        Self::load(CONFIG_FILE)
    }

    /// Load a config file, its dotenv file if any, and expand environment variables.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let root = path.parent().map(Path::to_path_buf).unwrap_or_default();

        let mut config: ProjectConfig = toml::from_str(&text)?;
        config.root = root;
        if let Some(dotenv) = &config.dotenv {
            let dotenv = config.root.join(dotenv);
            debug!(@grey, "loading environment from {}", dotenv.display());
            dotenv::from_path(&dotenv)?;
        }
        config.expand(|name| std::env::var(name).ok())?;
        Ok(config)
    }

    /// Parse config text without touching the filesystem or the environment.
    pub fn parse(text: &str, lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config: ProjectConfig = toml::from_str(text)?;
        config.expand(lookup)?;
        Ok(config)
    }

    fn expand(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<(), ConfigError> {
        for key in &mut self.wallets.from_key {
            *key = expand_env(key, &lookup)?;
        }
        for network in self.networks.networks.values_mut() {
            network.host = expand_env(&network.host, &lookup)?;
            if let Some(fee) = &mut network.max_fee_per_gas_gwei {
                *fee = expand_env(fee, &lookup)?;
            }
        }
        Ok(())
    }

    /// The private key configured at `wallets.from_key[index]`.
    pub fn private_key(&self, index: usize) -> Result<&str, ConfigError> {
        self.wallets
            .from_key
            .get(index)
            .map(String::as_str)
            .ok_or(ConfigError::MissingKey {
                index,
                available: self.wallets.from_key.len(),
            })
    }

    /// Look up a network by name, falling back to the configured default.
    ///
    /// The development network is always available, even when not declared.
    pub fn network_config(
        &self,
        name: Option<&str>,
    ) -> Result<(String, NetworkConfig), ConfigError> {
        let name = name.unwrap_or(&self.networks.default);
        if let Some(network) = self.networks.networks.get(name) {
            return Ok((name.to_string(), network.clone()));
        }
        if name == DEVELOPMENT {
            let network = NetworkConfig {
                host: DEVELOPMENT_HOST.to_string(),
                persist: Some(false),
                max_fee_per_gas_gwei: None,
            };
            return Ok((name.to_string(), network));
        }
        let mut known: Vec<&str> = self.networks.networks.keys().map(String::as_str).collect();
        if !known.contains(&DEVELOPMENT) {
            known.push(DEVELOPMENT);
        }
        known.sort_unstable();
        Err(ConfigError::UnknownNetwork {
            name: name.to_string(),
            known: known.join(", "),
        })
    }

    pub fn build_dir(&self) -> PathBuf {
        self.root.join(&self.project.build_dir)
    }

    pub fn contracts_dir(&self) -> PathBuf {
        self.root.join(&self.project.contracts_dir)
    }
}

/// Replace every `${NAME}` in `text` using `lookup`.
pub fn expand_env(
    text: &str,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<String, ConfigError> {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    let re = PATTERN.get_or_init(|| Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)\}").unwrap());

    let mut missing = None;
    let expanded = re.replace_all(text, |caps: &Captures| {
        let name = &caps[1];
        lookup(name).unwrap_or_else(|| {
            missing.get_or_insert_with(|| name.to_string());
            String::new()
        })
    });
    match missing {
        Some(name) => Err(ConfigError::UnsetVariable(name)),
        None => Ok(expanded.into_owned()),
    }
}
