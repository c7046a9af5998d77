// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

use crate::core::{
    accounts::Accounts,
    config::ProjectConfig,
    verification::{ACCOUNT_A, ACCOUNT_B},
};

/// Number of configured keys the verification procedure uses.
pub const SCRIPT_ACCOUNTS: usize = 2;

/// Registers the script's two accounts and prints their addresses.
pub fn load(config: &ProjectConfig) -> crate::Result<Accounts> {
    let accounts = Accounts::from_config(config, SCRIPT_ACCOUNTS)?;
    println!("{} {}", accounts.get(ACCOUNT_A)?, accounts.get(ACCOUNT_B)?);
    Ok(accounts)
}

/// Registers every configured key, without printing.
pub fn load_all(config: &ProjectConfig) -> crate::Result<Accounts> {
    let accounts = Accounts::from_config(config, config.wallets.from_key.len())?;
    Ok(accounts)
}
