// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

use std::{
    ffi::OsStr,
    process::{Command, Output, Stdio},
};

use serde::{Deserialize, Serialize};

pub fn command_exists(program: impl AsRef<OsStr>) -> bool {
    Command::new(program)
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .arg("--version")
        .output()
        .map(|x| x.status.success())
        .unwrap_or_default()
}

#[derive(Debug, Deserialize, Serialize)]
pub struct ProcessOutput {
    pub process_name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub stdout: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub stderr: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exit_code: Option<i32>,
}

impl ProcessOutput {
    /// Returns stdout of a successful process, or the full output as an error.
    pub fn check(
        process_name: impl Into<String>,
        output: Output,
    ) -> Result<String, CommandFailure> {
        let process_output = ProcessOutput {
            process_name: process_name.into(),
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            exit_code: output.status.code(),
        };
        if output.status.success() {
            Ok(process_output.stdout)
        } else {
            Err(CommandFailure(process_output))
        }
    }
}

#[derive(Debug, thiserror::Error)]
#[error(
    "{} failed (exit code: {:?}): {}",
    .0.process_name,
    .0.exit_code,
    .0.stderr.trim()
)]
pub struct CommandFailure(pub ProcessOutput);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_command_does_not_exist() {
        assert!(!command_exists("verification-no-such-command"));
    }
}
