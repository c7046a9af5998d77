// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! The DAI / BaseContract verification procedure.
//!
//! The procedure is an ordered [`VerificationPlan`]. Arguments may refer to accounts or to
//! contracts deployed by earlier steps; they are resolved right before each step is sent, so
//! every run performs fresh deployments.

use std::{collections::BTreeMap, fmt, path::PathBuf};

use alloy::{
    dyn_abi::DynSolValue,
    primitives::{Address, TxHash},
    providers::Provider,
};
use typed_builder::TypedBuilder;

use crate::{
    core::{
        accounts::{AccountError, Accounts},
        artifacts::{ArtifactError, ContractArtifact},
        contract::{CallError, DeployedContract},
        deployment::{
            self,
            record::{self, DeploymentRecord, RecordError},
            DeploymentConfig, DeploymentError, GasEstimate,
        },
    },
    utils::color::DebugColor,
};

/// Token contract deployed first.
pub const DAI: &str = "DAI";
/// Contract under verification, constructed with the token and the verifier account.
pub const BASE_CONTRACT: &str = "BaseContract";
/// Method called once both contracts are deployed.
pub const START_VERIFICATION: &str = "startVerification";

/// Account that sends every transaction.
pub const ACCOUNT_A: usize = 0;
/// Account passed to the `BaseContract` constructor.
pub const ACCOUNT_B: usize = 1;

#[derive(Debug, thiserror::Error)]
pub enum VerificationError {
    #[error("{0}")]
    Account(#[from] AccountError),
    #[error("{0}")]
    Artifact(#[from] ArtifactError),
    #[error("{0}")]
    Deployment(#[from] DeploymentError),
    #[error("{0}")]
    Call(#[from] CallError),
    #[error("{0}")]
    Record(#[from] RecordError),
    #[error("{0} has not been deployed by an earlier step")]
    NotDeployed(String),
    #[error("rpc error: {0}")]
    Rpc(#[from] alloy::transports::RpcError<alloy::transports::TransportErrorKind>),
}

/// An argument to a constructor or method call.
#[derive(Clone, Debug, PartialEq)]
pub enum Arg {
    /// Address of the most recent deployment of the named contract.
    Deployed(String),
    /// Address of a registered account.
    Account(usize),
    Value(DynSolValue),
}

#[derive(Clone, Debug, PartialEq)]
pub enum Step {
    Deploy {
        contract: String,
        args: Vec<Arg>,
        from: usize,
    },
    Call {
        target: String,
        method: String,
        args: Vec<Arg>,
        from: usize,
    },
}

#[derive(Clone, Debug, PartialEq)]
pub struct VerificationPlan {
    steps: Vec<Step>,
}

impl VerificationPlan {
    pub fn new(steps: Vec<Step>) -> Self {
        Self { steps }
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// Names of every contract deployed by the plan, in first-deployment order.
    pub fn contracts(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for step in &self.steps {
            if let Step::Deploy { contract, .. } = step {
                if !names.contains(&contract.as_str()) {
                    names.push(contract);
                }
            }
        }
        names
    }
}

impl Default for VerificationPlan {
    /// Deploy `DAI` and `BaseContract(dai, accountB)` from account A, then start verification.
    fn default() -> Self {
        Self::new(vec![
            Step::Deploy {
                contract: DAI.to_string(),
                args: vec![],
                from: ACCOUNT_A,
            },
            Step::Deploy {
                contract: BASE_CONTRACT.to_string(),
                args: vec![Arg::Deployed(DAI.to_string()), Arg::Account(ACCOUNT_B)],
                from: ACCOUNT_A,
            },
            Step::Call {
                target: BASE_CONTRACT.to_string(),
                method: START_VERIFICATION.to_string(),
                args: vec![],
                from: ACCOUNT_A,
            },
        ])
    }
}

/// Addresses known while a plan runs.
struct Context<'a> {
    accounts: &'a Accounts,
    deployed: Vec<(String, Address)>,
}

impl<'a> Context<'a> {
    fn new(accounts: &'a Accounts) -> Self {
        Self {
            accounts,
            deployed: Vec::new(),
        }
    }

    fn address_of(&self, contract: &str) -> Result<Address, VerificationError> {
        self.deployed
            .iter()
            .rev()
            .find(|(name, _)| name == contract)
            .map(|(_, address)| *address)
            .ok_or_else(|| VerificationError::NotDeployed(contract.to_string()))
    }

    fn resolve(&self, args: &[Arg]) -> Result<Vec<DynSolValue>, VerificationError> {
        args.iter()
            .map(|arg| -> Result<DynSolValue, VerificationError> {
                Ok(match arg {
                    Arg::Deployed(contract) => DynSolValue::Address(self.address_of(contract)?),
                    Arg::Account(index) => {
                        DynSolValue::Address(self.accounts.get(*index)?.address())
                    }
                    Arg::Value(value) => value.clone(),
                })
            })
            .collect()
    }

    fn sender(&self, index: usize) -> Result<Address, VerificationError> {
        Ok(self.accounts.get(index)?.address())
    }
}

/// Outcome of a state-changing call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CallOutcome {
    pub contract: String,
    pub method: String,
    pub tx_hash: TxHash,
}

/// Everything a run put on chain, in order.
#[derive(Clone, Debug, Default)]
pub struct VerificationReport {
    pub deployments: Vec<DeployedContract>,
    pub calls: Vec<CallOutcome>,
}

impl VerificationReport {
    /// Most recent deployment of `name`.
    pub fn deployment(&self, name: &str) -> Option<&DeployedContract> {
        self.deployments.iter().rev().find(|c| c.name() == name)
    }
}

impl fmt::Display for VerificationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for contract in &self.deployments {
            writeln!(f, "{contract} (tx {})", contract.tx_hash())?;
        }
        for call in &self.calls {
            writeln!(f, "{}.{}() (tx {})", call.contract, call.method, call.tx_hash)?;
        }
        Ok(())
    }
}

/// Runs a [`VerificationPlan`] against a network.
#[derive(TypedBuilder)]
pub struct Verification<'a> {
    accounts: &'a Accounts,
    #[builder(setter(into))]
    build_dir: PathBuf,
    #[builder(default)]
    plan: VerificationPlan,
    #[builder(default)]
    config: DeploymentConfig,
    /// Chain id to record deployments under, as each one is mined.
    #[builder(default)]
    record_chain_id: Option<u64>,
}

impl Verification<'_> {
    /// Load the artifact of every contract the plan deploys.
    pub fn load_artifacts(&self) -> Result<BTreeMap<String, ContractArtifact>, VerificationError> {
        let mut artifacts = BTreeMap::new();
        for name in self.plan.contracts() {
            artifacts.insert(
                name.to_string(),
                ContractArtifact::load(&self.build_dir, name)?,
            );
        }
        Ok(artifacts)
    }

    /// Execute every step in order, stopping at the first failure.
    ///
    /// When recording, every mined deployment is written before the next step runs.
    pub async fn run(
        &self,
        provider: &impl Provider,
    ) -> Result<VerificationReport, VerificationError> {
        let artifacts = self.load_artifacts()?;
        let mut context = Context::new(self.accounts);
        let mut report = VerificationReport::default();

        for step in self.plan.steps() {
            match step {
                Step::Deploy {
                    contract,
                    args,
                    from,
                } => {
                    let artifact = &artifacts[contract];
                    let args = context.resolve(args)?;
                    let from = context.sender(*from)?;
                    let deployed =
                        deployment::deploy(artifact, &args, from, &self.config, provider).await?;
                    if let Some(chain_id) = self.record_chain_id {
                        record::append(
                            &self.build_dir,
                            DeploymentRecord::new(&deployed, from, chain_id),
                        )?;
                    }
                    context
                        .deployed
                        .push((deployed.name().to_string(), deployed.address()));
                    report.deployments.push(deployed);
                }
                Step::Call {
                    target,
                    method,
                    args,
                    from,
                } => {
                    let contract = report
                        .deployment(target)
                        .ok_or_else(|| VerificationError::NotDeployed(target.clone()))?;
                    let args = context.resolve(args)?;
                    let from = context.sender(*from)?;
                    let receipt = contract
                        .send(method, &args, from, self.config.max_fee_per_gas_wei, provider)
                        .await?;
                    info!(@grey,
                        "{}.{}() tx hash: {}",
                        target,
                        method,
                        receipt.transaction_hash.debug_lavender()
                    );
                    report.calls.push(CallOutcome {
                        contract: target.clone(),
                        method: method.clone(),
                        tx_hash: receipt.transaction_hash,
                    });
                }
            }
        }
        Ok(report)
    }

    /// Estimate gas for every deployment step without sending transactions.
    ///
    /// Contracts referenced by later steps are given the addresses they would be created at.
    /// Calls need deployed code and are not estimated.
    pub async fn estimate(
        &self,
        provider: &impl Provider,
    ) -> Result<Vec<(String, GasEstimate)>, VerificationError> {
        let artifacts = self.load_artifacts()?;
        let mut context = Context::new(self.accounts);
        let mut nonces: BTreeMap<Address, u64> = BTreeMap::new();
        let mut estimates = Vec::new();

        for step in self.plan.steps() {
            let Step::Deploy {
                contract,
                args,
                from,
            } = step
            else {
                continue;
            };
            let artifact = &artifacts[contract];
            let args = context.resolve(args)?;
            let from = context.sender(*from)?;
            let estimate =
                deployment::estimate_gas(artifact, &args, from, &self.config, provider).await?;
            estimates.push((contract.clone(), estimate));

            let nonce = match nonces.get(&from) {
                Some(nonce) => *nonce,
                None => provider.get_transaction_count(from).await?,
            };
            nonces.insert(from, nonce + 1);
            context.deployed.push((contract.clone(), from.create(nonce)));
        }
        Ok(estimates)
    }
}

#[cfg(test)]
mod tests {
    use alloy::primitives::address;

    use super::*;

    const KEY_0: &str = "ac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";
    const KEY_1: &str = "59c6995e998f97a5a0044966f0945389dc9e86dae88c7a8412f4603b6b78690d";

    fn accounts() -> Accounts {
        let mut accounts = Accounts::new();
        accounts.add(KEY_0).unwrap();
        accounts.add(KEY_1).unwrap();
        accounts
    }

    #[test]
    fn default_plan_deploys_twice_then_calls_once() {
        let plan = VerificationPlan::default();
        let steps = plan.steps();
        assert_eq!(steps.len(), 3);
        assert!(matches!(&steps[0], Step::Deploy { contract, args, from: ACCOUNT_A }
            if contract == DAI && args.is_empty()));
        assert!(matches!(&steps[1], Step::Deploy { contract, from: ACCOUNT_A, .. }
            if contract == BASE_CONTRACT));
        assert!(matches!(&steps[2], Step::Call { target, method, args, from: ACCOUNT_A }
            if target == BASE_CONTRACT && method == START_VERIFICATION && args.is_empty()));
        assert_eq!(plan.contracts(), [DAI, BASE_CONTRACT]);
    }

    #[test]
    fn base_contract_receives_dai_and_account_b() {
        let accounts = accounts();
        let mut context = Context::new(&accounts);
        let dai = address!("5FbDB2315678afecb367f032d93F642f64180aa3");
        context.deployed.push((DAI.to_string(), dai));

        let plan = VerificationPlan::default();
        let Step::Deploy { args, .. } = &plan.steps()[1] else {
            panic!("second step should deploy BaseContract");
        };
        let resolved = context.resolve(args).unwrap();
        assert_eq!(
            resolved,
            [
                DynSolValue::Address(dai),
                DynSolValue::Address(address!("70997970C51812dc3A010C7d01b50e0d17dc79C8")),
            ]
        );
    }

    #[test]
    fn latest_deployment_wins() {
        let accounts = accounts();
        let mut context = Context::new(&accounts);
        let first = address!("5FbDB2315678afecb367f032d93F642f64180aa3");
        let second = address!("9fE46736679d2D9a65F0992F2272dE9f3c7fa6e0");
        context.deployed.push((DAI.to_string(), first));
        context.deployed.push((DAI.to_string(), second));
        assert_eq!(context.address_of(DAI).unwrap(), second);
    }

    #[test]
    fn unresolved_references_fail() {
        let accounts = accounts();
        let context = Context::new(&accounts);
        assert!(matches!(
            context.resolve(&[Arg::Deployed(DAI.to_string())]),
            Err(VerificationError::NotDeployed(name)) if name == DAI
        ));
        assert!(matches!(
            context.resolve(&[Arg::Account(2)]),
            Err(VerificationError::Account(AccountError::NoSuchAccount { index: 2, .. }))
        ));
        assert_eq!(
            context
                .resolve(&[Arg::Value(DynSolValue::Bool(true))])
                .unwrap(),
            [DynSolValue::Bool(true)]
        );
    }

    #[test]
    fn missing_artifacts_fail_before_sending() {
        let dir = tempfile::tempdir().unwrap();
        let accounts = accounts();
        let verification = Verification::builder()
            .accounts(&accounts)
            .build_dir(dir.path())
            .build();
        assert!(matches!(
            verification.load_artifacts(),
            Err(VerificationError::Artifact(ArtifactError::NotFound { name, .. })) if name == DAI
        ));
    }

    #[test]
    fn loads_artifacts_for_plan() {
        let dir = tempfile::tempdir().unwrap();
        for name in [DAI, BASE_CONTRACT] {
            let artifact: ContractArtifact = serde_json::from_str(&format!(
                r#"{{"contractName": "{name}", "abi": [], "bytecode": "0x6080"}}"#
            ))
            .unwrap();
            artifact.save(dir.path()).unwrap();
        }
        let accounts = accounts();
        let verification = Verification::builder()
            .accounts(&accounts)
            .build_dir(dir.path())
            .build();
        let artifacts = verification.load_artifacts().unwrap();
        assert_eq!(
            artifacts.keys().map(String::as_str).collect::<Vec<_>>(),
            [BASE_CONTRACT, DAI]
        );
    }

    #[test]
    fn report_lists_steps() {
        let report = VerificationReport {
            deployments: vec![DeployedContract::new(
                DAI,
                address!("5FbDB2315678afecb367f032d93F642f64180aa3"),
                Default::default(),
                TxHash::ZERO,
            )],
            calls: vec![CallOutcome {
                contract: BASE_CONTRACT.to_string(),
                method: START_VERIFICATION.to_string(),
                tx_hash: TxHash::ZERO,
            }],
        };
        let text = report.to_string();
        assert!(text.starts_with("DAI at 0x5FbDB2315678afecb367f032d93F642f64180aa3"));
        assert!(text.contains("BaseContract.startVerification()"));
        assert!(report.deployment(BASE_CONTRACT).is_none());
    }
}
