// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! Solidity compilation through `solc`.

use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
    process::Command,
};

use alloy::{json_abi::JsonAbi, primitives::Bytes};
use serde::Deserialize;

use crate::{
    core::artifacts::{ArtifactError, ContractArtifact},
    utils::{
        color::Color,
        sys::{self, ProcessOutput},
    },
};

const SOLC: &str = "solc";
const LINK: &str = "https://docs.soliditylang.org/en/latest/installing-solidity.html";

#[derive(Debug, thiserror::Error)]
pub enum CompileError {
    #[error("solc not found. Please see\n{link}", link = LINK.red())]
    SolcNotFound,
    #[error("no solidity sources found in {}", .0.display())]
    NoSources(PathBuf),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("{0}")]
    Solc(#[from] sys::CommandFailure),
    #[error("unexpected solc output: {0}")]
    Output(#[from] serde_json::Error),
    #[error("{0}")]
    Artifact(#[from] ArtifactError),
}

#[derive(Debug, Deserialize)]
struct CombinedJson {
    contracts: BTreeMap<String, CombinedContract>,
}

#[derive(Debug, Deserialize)]
struct CombinedContract {
    abi: AbiRepr,
    bin: Bytes,
}

/// Older solc releases emit the ABI as an embedded JSON string.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum AbiRepr {
    Json(JsonAbi),
    Text(String),
}

impl AbiRepr {
    fn into_abi(self) -> Result<JsonAbi, serde_json::Error> {
        match self {
            Self::Json(abi) => Ok(abi),
            Self::Text(text) => serde_json::from_str(&text),
        }
    }
}

/// Compile every `.sol` file in `contracts_dir`, writing artifacts to `build_dir`.
///
/// Returns the written artifacts, sorted by contract name.
pub fn compile(
    contracts_dir: impl AsRef<Path>,
    build_dir: impl AsRef<Path>,
) -> Result<Vec<ContractArtifact>, CompileError> {
    let contracts_dir = contracts_dir.as_ref();
    if !sys::command_exists(SOLC) {
        return Err(CompileError::SolcNotFound);
    }
    let sources = solidity_sources(contracts_dir)?;
    if sources.is_empty() {
        return Err(CompileError::NoSources(contracts_dir.to_path_buf()));
    }

    let output = Command::new(SOLC)
        .arg("--combined-json")
        .arg("abi,bin")
        .arg("--base-path")
        .arg(contracts_dir)
        .args(&sources)
        .output()?;
    let stdout = ProcessOutput::check(SOLC, output)?;

    let artifacts = parse_combined_json(&stdout)?;
    for artifact in &artifacts {
        let path = artifact.save(&build_dir)?;
        debug!(@grey, "wrote {}", path.display());
    }
    Ok(artifacts)
}

fn solidity_sources(dir: &Path) -> Result<Vec<PathBuf>, CompileError> {
    let mut sources = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_dir() {
            sources.extend(solidity_sources(&path)?);
        } else if path.extension().is_some_and(|ext| ext == "sol") {
            sources.push(path);
        }
    }
    sources.sort();
    Ok(sources)
}

/// Convert `solc --combined-json abi,bin` output into artifacts.
///
/// Contracts without bytecode (interfaces, abstract contracts) are skipped.
fn parse_combined_json(text: &str) -> Result<Vec<ContractArtifact>, CompileError> {
    let combined: CombinedJson = serde_json::from_str(text)?;
    let mut artifacts = Vec::new();
    for (key, contract) in combined.contracts {
        if contract.bin.is_empty() {
            continue;
        }
        let name = key.rsplit(':').next().unwrap_or(&key).to_string();
        artifacts.push(ContractArtifact {
            contract_name: name,
            abi: contract.abi.into_abi()?,
            bytecode: contract.bin,
        });
    }
    artifacts.sort_by(|a, b| a.contract_name.cmp(&b.contract_name));
    Ok(artifacts)
}

#[cfg(test)]
mod tests {
    use super::*;

    const COMBINED: &str = r#"{
        "contracts": {
            "contracts/BaseContract.sol:BaseContract": {
                "abi": [{"type": "function", "name": "startVerification", "inputs": [], "outputs": [], "stateMutability": "nonpayable"}],
                "bin": "6080604052"
            },
            "contracts/DAI.sol:DAI": {
                "abi": "[]",
                "bin": "60806040"
            },
            "contracts/DAI.sol:IERC20": {
                "abi": [],
                "bin": ""
            }
        },
        "version": "0.8.24+commit.e11b9ed9.Linux.g++"
    }"#;

    #[test]
    fn parses_combined_output() {
        let artifacts = parse_combined_json(COMBINED).unwrap();
        let names: Vec<_> = artifacts.iter().map(ContractArtifact::name).collect();
        assert_eq!(names, ["BaseContract", "DAI"]);
        assert!(artifacts[0].abi.function("startVerification").is_some());
        assert_eq!(artifacts[1].bytecode.len(), 4);
    }

    #[test]
    fn finds_nested_sources() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("tokens")).unwrap();
        fs::write(dir.path().join("BaseContract.sol"), "").unwrap();
        fs::write(dir.path().join("tokens/DAI.sol"), "").unwrap();
        fs::write(dir.path().join("README.md"), "").unwrap();

        let sources = solidity_sources(dir.path()).unwrap();
        assert_eq!(
            sources,
            [
                dir.path().join("BaseContract.sol"),
                dir.path().join("tokens/DAI.sol")
            ]
        );
    }
}
