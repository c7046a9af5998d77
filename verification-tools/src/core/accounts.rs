// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! Local signer accounts.

use std::fmt;

use alloy::{
    network::EthereumWallet,
    primitives::Address,
    signers::{local::PrivateKeySigner, Signer},
};

use crate::core::config::{ConfigError, ProjectConfig};

#[derive(Debug, thiserror::Error)]
pub enum AccountError {
    #[error("empty private key")]
    EmptyKey,
    #[error("private key is not valid hex: {0}")]
    Hex(#[from] hex::FromHexError),
    #[error("private key must be 32 bytes, got {0}")]
    KeyLength(usize),
    #[error("invalid private key: {0}")]
    Signer(#[from] alloy::signers::local::LocalSignerError),
    #[error("no account registered at index {index} ({available} registered)")]
    NoSuchAccount { index: usize, available: usize },
    #[error("{0}")]
    Config(#[from] ConfigError),
}

/// A signer identity held by this process.
#[derive(Clone, Debug)]
pub struct Account {
    signer: PrivateKeySigner,
}

impl Account {
    /// Create an account from a hex-encoded private key.
    pub fn from_private_key(key: &str) -> Result<Self, AccountError> {
        let key = key.trim();
        let key = key.strip_prefix("0x").unwrap_or(key);
        if key.is_empty() {
            return Err(AccountError::EmptyKey);
        }
        let len = hex::decode(key)?.len();
        if len != 32 {
            return Err(AccountError::KeyLength(len));
        }
        let signer: PrivateKeySigner = key.parse()?;
        Ok(Self { signer })
    }

    pub fn address(&self) -> Address {
        self.signer.address()
    }

    pub fn signer(&self) -> &PrivateKeySigner {
        &self.signer
    }
}

impl fmt::Display for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.address())
    }
}

/// Ordered registry of local accounts.
#[derive(Clone, Debug, Default)]
pub struct Accounts {
    accounts: Vec<Account>,
}

impl Accounts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the first `count` keys of `wallets.from_key`.
    pub fn from_config(config: &ProjectConfig, count: usize) -> Result<Self, AccountError> {
        let mut accounts = Self::new();
        for index in 0..count {
            accounts.add(config.private_key(index)?)?;
        }
        Ok(accounts)
    }

    /// Register a private key, returning the new account.
    pub fn add(&mut self, private_key: &str) -> Result<&Account, AccountError> {
        let account = Account::from_private_key(private_key)?;
        debug!(@grey, "registered account {}", account);
        self.accounts.push(account);
        Ok(&self.accounts[self.accounts.len() - 1])
    }

    pub fn get(&self, index: usize) -> Result<&Account, AccountError> {
        self.accounts.get(index).ok_or(AccountError::NoSuchAccount {
            index,
            available: self.accounts.len(),
        })
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    /// Build a wallet holding every registered signer, bound to `chain_id`.
    ///
    /// The first registered account is the default signer.
    pub fn wallet(&self, chain_id: u64) -> Result<EthereumWallet, AccountError> {
        let mut signers = self
            .accounts
            .iter()
            .map(|account| account.signer.clone().with_chain_id(Some(chain_id)));
        let default = signers.next().ok_or(AccountError::NoSuchAccount {
            index: 0,
            available: 0,
        })?;
        let mut wallet = EthereumWallet::new(default);
        for signer in signers {
            wallet.register_signer(signer);
        }
        Ok(wallet)
    }
}
