// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! Tools to deploy the DAI and BaseContract contracts and start a verification run.
//!
//! The [`core`] modules hold the building blocks (configuration, accounts, artifacts, deployment
//! and the verification plan). The [`ops`] modules combine them into the operations exposed by
//! the command line, printing as they go.

#[macro_use]
mod macros;

pub mod core;
pub(crate) mod error;
pub mod ops;

pub mod utils;

#[cfg(feature = "integration-tests")]
pub mod devnet;

pub use error::{Error, Result};
