// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

use std::{fmt, process::ExitCode};

use verification_tools::core::{config::ConfigError, network::NetworkError};

pub type CliResult = Result<(), CliError>;

#[derive(Debug)]
pub struct CliError {
    error: eyre::Error,
    exit_code: ExitCode,
}

impl CliError {
    pub fn exit_code(&self) -> ExitCode {
        self.exit_code
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.error.fmt(f)
    }
}

impl From<eyre::Error> for CliError {
    fn from(error: eyre::Error) -> Self {
        Self {
            error,
            exit_code: ExitCode::FAILURE,
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        eyre::Error::from(err).into()
    }
}

impl From<verification_tools::Error> for CliError {
    fn from(err: verification_tools::Error) -> Self {
        eyre::Error::from(err).into()
    }
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        verification_tools::Error::from(err).into()
    }
}

impl From<NetworkError> for CliError {
    fn from(err: NetworkError) -> Self {
        verification_tools::Error::from(err).into()
    }
}
