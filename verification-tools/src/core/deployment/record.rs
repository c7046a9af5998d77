// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! Deployment records for persistent networks.
//!
//! Records are appended to `<build_dir>/deployments/<chain_id>.json`. Development networks are
//! ephemeral and never recorded.

use std::{
    fs,
    path::{Path, PathBuf},
};

use alloy::primitives::{Address, TxHash};
use serde::{Deserialize, Serialize};

use crate::core::contract::DeployedContract;

pub const DEPLOYMENTS_SUBDIR: &str = "deployments";

#[derive(Debug, thiserror::Error)]
pub enum RecordError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid deployment record {}: {source}", .path.display())]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct DeploymentRecord {
    pub contract: String,
    pub address: Address,
    pub tx_hash: TxHash,
    pub deployer: Address,
    pub chain_id: u64,
}

impl DeploymentRecord {
    pub fn new(contract: &DeployedContract, deployer: Address, chain_id: u64) -> Self {
        Self {
            contract: contract.name().to_string(),
            address: contract.address(),
            tx_hash: contract.tx_hash(),
            deployer,
            chain_id,
        }
    }
}

pub fn path(build_dir: impl AsRef<Path>, chain_id: u64) -> PathBuf {
    build_dir
        .as_ref()
        .join(DEPLOYMENTS_SUBDIR)
        .join(format!("{chain_id}.json"))
}

/// All records for `chain_id`, oldest first.
pub fn load(
    build_dir: impl AsRef<Path>,
    chain_id: u64,
) -> Result<Vec<DeploymentRecord>, RecordError> {
    let path = path(build_dir, chain_id);
    if !path.exists() {
        return Ok(Vec::new());
    }
    let text = fs::read_to_string(&path)?;
    serde_json::from_str(&text).map_err(|source| RecordError::Json { path, source })
}

/// Append a record to the file for its chain.
pub fn append(build_dir: impl AsRef<Path>, record: DeploymentRecord) -> Result<(), RecordError> {
    let build_dir = build_dir.as_ref();
    let mut records = load(build_dir, record.chain_id)?;
    let path = path(build_dir, record.chain_id);
    records.push(record);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(&records).map_err(|source| RecordError::Json {
        path: path.clone(),
        source,
    })?;
    fs::write(&path, json)?;
    debug!(@grey, "recorded deployment in {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use alloy::{json_abi::JsonAbi, primitives::address};

    use super::*;

    #[test]
    fn appends_records_per_chain() {
        let dir = tempfile::tempdir().unwrap();
        let deployer = address!("f39Fd6e51aad88F6F4ce6aB8827279cffFb92266");
        let dai = DeployedContract::new(
            "DAI",
            address!("5FbDB2315678afecb367f032d93F642f64180aa3"),
            JsonAbi::default(),
            TxHash::repeat_byte(1),
        );
        let base = DeployedContract::new(
            "BaseContract",
            address!("e7f1725E7734CE288F8367e1Bb143E90bb3F0512"),
            JsonAbi::default(),
            TxHash::repeat_byte(2),
        );

        append(dir.path(), DeploymentRecord::new(&dai, deployer, 11155111)).unwrap();
        append(dir.path(), DeploymentRecord::new(&base, deployer, 11155111)).unwrap();
        append(dir.path(), DeploymentRecord::new(&dai, deployer, 1)).unwrap();

        let sepolia = load(dir.path(), 11155111).unwrap();
        assert_eq!(sepolia.len(), 2);
        assert_eq!(sepolia[0].contract, "DAI");
        assert_eq!(sepolia[1].address, base.address());
        assert_eq!(sepolia[1].tx_hash, TxHash::repeat_byte(2));

        assert_eq!(load(dir.path(), 1).unwrap().len(), 1);
        assert!(load(dir.path(), 5).unwrap().is_empty());
    }
}
