// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

pub use compile::compile;
pub use deploy::deploy;
pub use run::run;

pub mod accounts;

mod compile;
mod deploy;
mod run;
