// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

use crate::core::{
    accounts::AccountError, artifacts::ArtifactError, compile::CompileError, config::ConfigError,
    deployment::record::RecordError, deployment::DeploymentError, network::NetworkError,
    verification::VerificationError,
};

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("rpc error: {0}")]
    Rpc(#[from] alloy::transports::RpcError<alloy::transports::TransportErrorKind>),

    #[error("{0}")]
    Config(#[from] ConfigError),
    #[error("{0}")]
    Account(#[from] AccountError),
    #[error("{0}")]
    Artifact(#[from] ArtifactError),
    #[error("{0}")]
    Compile(#[from] CompileError),
    #[error("{0}")]
    Network(#[from] NetworkError),
    #[error("{0}")]
    Deployment(#[from] DeploymentError),
    #[error("{0}")]
    Record(#[from] RecordError),
    #[error("{0}")]
    Verification(#[from] VerificationError),
}
