// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! Compiled contract artifacts.
//!
//! Artifacts are JSON files stored at `<build_dir>/contracts/<Name>.json` holding the contract
//! name, its JSON ABI and its creation bytecode. The bytecode may be a plain hex string or an
//! object with an `object` field, as written by Foundry.

use std::{
    fs,
    path::{Path, PathBuf},
};

use alloy::{
    dyn_abi::{DynSolValue, JsonAbiExt, Specifier},
    json_abi::{JsonAbi, Param},
    primitives::Bytes,
};
use serde::{Deserialize, Deserializer, Serialize};

/// Subdirectory of the build directory holding contract artifacts.
pub const CONTRACTS_SUBDIR: &str = "contracts";

#[derive(Debug, thiserror::Error)]
pub enum ArtifactError {
    #[error("no artifact for contract {name} at {}; try compiling first", .path.display())]
    NotFound { name: String, path: PathBuf },
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid artifact for {name}: {source}")]
    Json {
        name: String,
        source: serde_json::Error,
    },
    #[error("contract {0} has no bytecode; it may be abstract or an interface")]
    NoBytecode(String),
    #[error("{contract} constructor takes {expected} arguments, got {got}")]
    ConstructorArity {
        contract: String,
        expected: usize,
        got: usize,
    },
    #[error("could not parse argument {param}: {source}")]
    InvalidArgument {
        param: String,
        source: alloy::dyn_abi::Error,
    },
    #[error("abi encoding failed: {0}")]
    Encode(#[from] alloy::dyn_abi::Error),
}

/// A compiled contract, ready to be deployed.
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractArtifact {
    pub contract_name: String,
    pub abi: JsonAbi,
    #[serde(deserialize_with = "deserialize_bytecode")]
    pub bytecode: Bytes,
}

impl ContractArtifact {
    /// Path of the artifact for `name` under `build_dir`.
    pub fn path(build_dir: impl AsRef<Path>, name: &str) -> PathBuf {
        build_dir
            .as_ref()
            .join(CONTRACTS_SUBDIR)
            .join(format!("{name}.json"))
    }

    /// Read the artifact for `name` from `build_dir`.
    pub fn load(build_dir: impl AsRef<Path>, name: &str) -> Result<Self, ArtifactError> {
        let path = Self::path(build_dir, name);
        if !path.is_file() {
            return Err(ArtifactError::NotFound {
                name: name.to_string(),
                path,
            });
        }
        let text = fs::read_to_string(&path)?;
        let artifact: ContractArtifact =
            serde_json::from_str(&text).map_err(|source| ArtifactError::Json {
                name: name.to_string(),
                source,
            })?;
        if artifact.bytecode.is_empty() {
            return Err(ArtifactError::NoBytecode(artifact.contract_name));
        }
        debug!(@grey, "loaded artifact {}", path.display());
        Ok(artifact)
    }

    /// Write this artifact to `build_dir`, returning the written path.
    pub fn save(&self, build_dir: impl AsRef<Path>) -> Result<PathBuf, ArtifactError> {
        let path = Self::path(build_dir, &self.contract_name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self).map_err(|source| ArtifactError::Json {
            name: self.contract_name.clone(),
            source,
        })?;
        fs::write(&path, json)?;
        Ok(path)
    }

    pub fn name(&self) -> &str {
        &self.contract_name
    }

    /// Constructor parameters, empty when the contract declares no constructor.
    pub fn constructor_inputs(&self) -> &[Param] {
        self.abi
            .constructor
            .as_ref()
            .map(|constructor| constructor.inputs.as_slice())
            .unwrap_or_default()
    }

    /// Creation bytecode followed by the ABI-encoded constructor arguments.
    pub fn deploy_code(&self, args: &[DynSolValue]) -> Result<Bytes, ArtifactError> {
        self.check_arity(args.len())?;
        let mut code = self.bytecode.to_vec();
        if let Some(constructor) = &self.abi.constructor {
            code.extend(constructor.abi_encode_input(args)?);
        }
        Ok(code.into())
    }

    /// Parse string constructor arguments against the constructor ABI.
    pub fn constructor_args(&self, args: &[String]) -> Result<Vec<DynSolValue>, ArtifactError> {
        self.check_arity(args.len())?;
        coerce_args(self.constructor_inputs(), args)
    }

    fn check_arity(&self, got: usize) -> Result<(), ArtifactError> {
        let expected = self.constructor_inputs().len();
        if got != expected {
            return Err(ArtifactError::ConstructorArity {
                contract: self.contract_name.clone(),
                expected,
                got,
            });
        }
        Ok(())
    }
}

/// Parse string arguments against ABI parameters, pairwise.
fn coerce_args(params: &[Param], args: &[String]) -> Result<Vec<DynSolValue>, ArtifactError> {
    let mut values = Vec::with_capacity(args.len());
    for (arg, param) in args.iter().zip(params) {
        let invalid = |source| ArtifactError::InvalidArgument {
            param: param.to_string(),
            source,
        };
        let ty = param.resolve().map_err(invalid)?;
        let value = ty.coerce_str(arg).map_err(invalid)?;
        values.push(value);
    }
    Ok(values)
}

fn deserialize_bytecode<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Bytes, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Bytecode {
        Hex(Bytes),
        Object { object: Bytes },
    }

    Ok(match Bytecode::deserialize(deserializer)? {
        Bytecode::Hex(bytes) | Bytecode::Object { object: bytes } => bytes,
    })
}

#[cfg(test)]
mod tests {
    use alloy::primitives::{address, hex};

    use super::*;

    const BASE_CONTRACT: &str = r#"{
        "contractName": "BaseContract",
        "abi": [
            {
                "type": "constructor",
                "stateMutability": "nonpayable",
                "inputs": [
                    { "name": "dai", "type": "address", "internalType": "address" },
                    { "name": "verifier", "type": "address", "internalType": "address" }
                ]
            },
            {
                "type": "function",
                "name": "startVerification",
                "stateMutability": "nonpayable",
                "inputs": [],
                "outputs": []
            }
        ],
        "bytecode": "6080604052"
    }"#;

    const DAI: &str = r#"{
        "contractName": "DAI",
        "abi": [],
        "bytecode": { "object": "0x60806040" }
    }"#;

    #[test]
    fn encodes_constructor_arguments() {
        let artifact: ContractArtifact = serde_json::from_str(BASE_CONTRACT).unwrap();
        let dai = address!("5FbDB2315678afecb367f032d93F642f64180aa3");
        let verifier = address!("70997970C51812dc3A010C7d01b50e0d17dc79C8");
        let code = artifact
            .deploy_code(&[DynSolValue::Address(dai), DynSolValue::Address(verifier)])
            .unwrap();

        assert_eq!(code.len(), 5 + 64);
        assert_eq!(&code[..5], hex!("6080604052"));
        assert_eq!(&code[5 + 12..5 + 32], dai.as_slice());
        assert_eq!(&code[5 + 44..], verifier.as_slice());
    }

    #[test]
    fn rejects_wrong_arity() {
        let artifact: ContractArtifact = serde_json::from_str(BASE_CONTRACT).unwrap();
        let err = artifact.deploy_code(&[]).unwrap_err();
        assert!(matches!(
            err,
            ArtifactError::ConstructorArity {
                expected: 2,
                got: 0,
                ..
            }
        ));

        let dai: ContractArtifact = serde_json::from_str(DAI).unwrap();
        assert!(dai.deploy_code(&[DynSolValue::Bool(true)]).is_err());
    }

    #[test]
    fn accepts_object_bytecode() {
        let artifact: ContractArtifact = serde_json::from_str(DAI).unwrap();
        assert_eq!(artifact.name(), "DAI");
        assert!(artifact.constructor_inputs().is_empty());
        let code = artifact.deploy_code(&[]).unwrap();
        assert_eq!(&code[..], hex!("60806040"));
    }

    #[test]
    fn coerces_string_arguments() {
        let artifact: ContractArtifact = serde_json::from_str(BASE_CONTRACT).unwrap();
        let args = vec![
            "0x5FbDB2315678afecb367f032d93F642f64180aa3".to_string(),
            "0x70997970C51812dc3A010C7d01b50e0d17dc79C8".to_string(),
        ];
        let values = artifact.constructor_args(&args).unwrap();
        assert_eq!(
            values[0],
            DynSolValue::Address(address!("5FbDB2315678afecb367f032d93F642f64180aa3"))
        );

        let bad = vec!["not-an-address".to_string(), args[1].clone()];
        assert!(matches!(
            artifact.constructor_args(&bad),
            Err(ArtifactError::InvalidArgument { .. })
        ));
    }

    #[test]
    fn string_arguments_must_match_constructor_arity() {
        let dai: ContractArtifact = serde_json::from_str(DAI).unwrap();
        let extra = vec!["0x5FbDB2315678afecb367f032d93F642f64180aa3".to_string()];
        assert!(matches!(
            dai.constructor_args(&extra),
            Err(ArtifactError::ConstructorArity {
                expected: 0,
                got: 1,
                ..
            })
        ));
        assert!(dai.constructor_args(&[]).unwrap().is_empty());

        let base: ContractArtifact = serde_json::from_str(BASE_CONTRACT).unwrap();
        assert!(matches!(
            base.constructor_args(&extra),
            Err(ArtifactError::ConstructorArity {
                expected: 2,
                got: 1,
                ..
            })
        ));
    }

    #[test]
    fn save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let artifact: ContractArtifact = serde_json::from_str(BASE_CONTRACT).unwrap();
        let path = artifact.save(dir.path()).unwrap();
        assert_eq!(path, dir.path().join("contracts/BaseContract.json"));

        let loaded = ContractArtifact::load(dir.path(), "BaseContract").unwrap();
        assert_eq!(loaded.bytecode, artifact.bytecode);
        assert_eq!(loaded.constructor_inputs().len(), 2);
    }

    #[test]
    fn load_reports_missing_and_empty_artifacts() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            ContractArtifact::load(dir.path(), "DAI"),
            Err(ArtifactError::NotFound { .. })
        ));

        let empty = ContractArtifact {
            contract_name: "IERC20".to_string(),
            abi: JsonAbi::default(),
            bytecode: Bytes::new(),
        };
        empty.save(dir.path()).unwrap();
        assert!(matches!(
            ContractArtifact::load(dir.path(), "IERC20"),
            Err(ArtifactError::NoBytecode(_))
        ));
    }
}
