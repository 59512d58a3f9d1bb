//! Deployment orchestration: an ordered plan of contract creations, run
//! against any [`ContractDeployer`]

mod deployer;

use std::path::{Path, PathBuf};

use alloy::{
    primitives::{Address, Bytes, TxHash, U256},
    sol_types::{SolConstructor, SolType},
};
use tracing::info;

use crate::{
    artifact::Artifact,
    constants::{
        INITIAL_TOKEN_SUPPLY, MCCB_TOKEN_CONTRACT, MULTICHAIN_CONTROL_CONTRACT, TOKEN_DECIMALS,
    },
    errors::ScriptError,
    tx::abi::MccbToken,
};

pub use deployer::RpcDeployer;

/// A confirmed contract creation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeployedContract {
    /// Name of the deployed contract
    pub contract: String,
    /// Address the contract lives at
    pub address: Address,
    /// Hash of the creation transaction
    pub tx_hash: TxHash,
    /// Block the creation was included in
    pub block_number: Option<u64>,
}

/// Submits a contract creation and waits for it to be confirmed
#[allow(async_fn_in_trait)]
pub trait ContractDeployer {
    /// Deploy `init_code` (creation bytecode followed by the encoded constructor args)
    async fn deploy(&self, contract: &str, init_code: Bytes)
        -> Result<DeployedContract, ScriptError>;
}

/// A single contract creation of a plan
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeploymentStep {
    /// Name of the contract
    pub contract: String,
    /// Where its compiled artifact lives
    pub artifact_path: PathBuf,
    /// Abi encoded constructor arguments
    pub constructor_args: Bytes,
    /// Number of constructor arguments encoded in `constructor_args`
    pub arg_count: usize,
}

impl DeploymentStep {
    /// Step deploying `contract` from the hardhat artifacts dir, without constructor args
    pub fn new(artifacts_dir: &Path, contract: &str) -> Self {
        DeploymentStep {
            contract: contract.to_string(),
            artifact_path: Artifact::path_for(artifacts_dir, contract),
            constructor_args: Bytes::new(),
            arg_count: 0,
        }
    }

    /// Attach the constructor call to this step, its arity comes from the call's parameter tuple
    pub fn with_constructor<C: SolConstructor>(mut self, call: &C) -> Self {
        self.constructor_args = Bytes::from(call.abi_encode());
        self.arg_count = param_count(<C::Parameters<'_> as SolType>::SOL_NAME);
        self
    }

    /// Load the artifact & build the init code of this step
    fn init_code(&self) -> Result<Bytes, ScriptError> {
        let artifact = Artifact::load(&self.artifact_path)?;

        let expected = artifact.constructor_inputs();
        if expected != self.arg_count {
            return Err(ScriptError::ContractDeployment(format!(
                "{} constructor expects {expected} argument(s), {} provided",
                self.contract, self.arg_count
            )));
        }

        let mut init_code = artifact.bytecode.to_vec();
        init_code.extend_from_slice(&self.constructor_args);
        Ok(Bytes::from(init_code))
    }
}

/// Number of top level params in a sol tuple name, e.g. `(uint256,(address,bool)[])` has 2
fn param_count(tuple_name: &str) -> usize {
    let inner = tuple_name
        .strip_prefix('(')
        .and_then(|name| name.strip_suffix(')'))
        .unwrap_or(tuple_name);
    if inner.is_empty() {
        return 0;
    }

    let mut depth = 0usize;
    let mut count = 1;
    for c in inner.chars() {
        match c {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => count += 1,
            _ => {}
        }
    }
    count
}

/// Initial token supply: one million tokens, scaled by the token decimals
pub fn initial_token_supply() -> U256 {
    U256::from(INITIAL_TOKEN_SUPPLY) * U256::from(10u64).pow(U256::from(TOKEN_DECIMALS))
}

/// An ordered list of contracts to deploy
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeploymentPlan {
    steps: Vec<DeploymentStep>,
}

impl DeploymentPlan {
    /// Plan from arbitrary steps, run in the given order
    pub fn new(steps: Vec<DeploymentStep>) -> Self {
        DeploymentPlan { steps }
    }

    /// Deploy only the multichain control contract
    pub fn multichain_control(artifacts_dir: &Path) -> Self {
        Self::new(vec![DeploymentStep::new(
            artifacts_dir,
            MULTICHAIN_CONTROL_CONTRACT,
        )])
    }

    /// Deploy the token with its initial supply, then the multichain control contract
    pub fn token_and_control(artifacts_dir: &Path) -> Self {
        let token_constructor = MccbToken::constructorCall {
            initialSupply: initial_token_supply(),
        };

        Self::new(vec![
            DeploymentStep::new(artifacts_dir, MCCB_TOKEN_CONTRACT)
                .with_constructor(&token_constructor),
            DeploymentStep::new(artifacts_dir, MULTICHAIN_CONTROL_CONTRACT),
        ])
    }

    /// The planned steps
    pub fn steps(&self) -> &[DeploymentStep] {
        &self.steps
    }

    /// Run every step in order, stopping at the first failure
    pub async fn execute<D: ContractDeployer>(
        &self,
        deployer: &D,
    ) -> Result<Vec<DeployedContract>, ScriptError> {
        let mut deployed = Vec::with_capacity(self.steps.len());

        for step in &self.steps {
            info!("Deploying the {} contract...", step.contract);
            let init_code = step.init_code()?;

            let contract = deployer.deploy(&step.contract, init_code).await?;
            info!("{} contract deployed to: {}", contract.contract, contract.address);

            deployed.push(contract);
        }

        Ok(deployed)
    }
}

#[cfg(test)]
#[allow(clippy::missing_docs_in_private_items)]
mod tests {
    use std::{fs, str::FromStr, sync::Mutex};

    use tempfile::{tempdir, TempDir};

    use super::*;

    const CONTROL_ARTIFACT: &str = r#"{
        "abi": [{ "type": "function", "name": "pause", "inputs": [] }],
        "bytecode": "0x60016002"
    }"#;

    const TOKEN_ARTIFACT: &str = r#"{
        "abi": [{ "type": "constructor", "inputs": [{ "name": "initialSupply", "type": "uint256" }] }],
        "bytecode": "0x6003"
    }"#;

    /// Records every deployment, optionally failing on the n-th one
    #[derive(Default)]
    struct RecordingDeployer {
        calls: Mutex<Vec<(String, Bytes)>>,
        fail_on: Option<usize>,
    }

    impl ContractDeployer for RecordingDeployer {
        async fn deploy(
            &self,
            contract: &str,
            init_code: Bytes,
        ) -> Result<DeployedContract, ScriptError> {
            let mut calls = self.calls.lock().unwrap();
            let index = calls.len();
            calls.push((contract.to_string(), init_code));

            if self.fail_on == Some(index) {
                return Err(ScriptError::ContractDeployment(String::from("reverted")));
            }

            Ok(DeployedContract {
                contract: contract.to_string(),
                address: Address::with_last_byte(index as u8 + 1),
                tx_hash: TxHash::with_last_byte(index as u8 + 1),
                block_number: Some(index as u64),
            })
        }
    }

    fn artifacts_dir() -> TempDir {
        let dir = tempdir().unwrap();
        for (name, content) in [
            (MULTICHAIN_CONTROL_CONTRACT, CONTROL_ARTIFACT),
            (MCCB_TOKEN_CONTRACT, TOKEN_ARTIFACT),
        ] {
            let path = Artifact::path_for(dir.path(), name);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(path, content).unwrap();
        }
        dir
    }

    #[test]
    fn constructor_arity_comes_from_the_call() {
        let step = DeploymentStep::new(Path::new("./artifacts"), MCCB_TOKEN_CONTRACT)
            .with_constructor(&MccbToken::constructorCall {
                initialSupply: initial_token_supply(),
            });

        assert_eq!(step.arg_count, 1);
        assert_eq!(step.constructor_args.len(), 32);
    }

    #[test]
    fn counts_top_level_params() {
        assert_eq!(param_count("()"), 0);
        assert_eq!(param_count("(uint256)"), 1);
        assert_eq!(param_count("(address,uint256)"), 2);
        assert_eq!(param_count("(uint256,(address,bool)[],string)"), 3);
    }

    #[test]
    fn initial_supply_is_one_million_tokens() {
        let expected = U256::from_str("1000000000000000000000000").unwrap();

        assert_eq!(initial_token_supply(), expected);
    }

    #[tokio::test]
    async fn control_plan_submits_a_single_creation() {
        let dir = artifacts_dir();
        let deployer = RecordingDeployer::default();

        let deployed = DeploymentPlan::multichain_control(dir.path())
            .execute(&deployer)
            .await
            .unwrap();

        let calls = deployer.calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, MULTICHAIN_CONTROL_CONTRACT);
        assert_eq!(calls[0].1, Bytes::from(vec![0x60, 0x01, 0x60, 0x02]));
        assert_eq!(deployed[0].address, Address::with_last_byte(1));
    }

    #[tokio::test]
    async fn full_plan_deploys_token_before_control() {
        let dir = artifacts_dir();
        let deployer = RecordingDeployer::default();

        let deployed = DeploymentPlan::token_and_control(dir.path())
            .execute(&deployer)
            .await
            .unwrap();

        let calls = deployer.calls.lock().unwrap();
        let order: Vec<&str> = calls.iter().map(|(name, _)| name.as_str()).collect();
        assert_eq!(order, vec![MCCB_TOKEN_CONTRACT, MULTICHAIN_CONTROL_CONTRACT]);

        // Token init code is the bytecode followed by a single uint256 word
        let token_code = &calls[0].1;
        assert_eq!(token_code.len(), 2 + 32);
        assert_eq!(&token_code[..2], &[0x60, 0x03]);
        assert_eq!(
            U256::from_be_slice(&token_code[2..]),
            initial_token_supply()
        );

        // Reported addresses are the ones the deployer confirmed
        assert_eq!(deployed[0].address, Address::with_last_byte(1));
        assert_eq!(deployed[1].address, Address::with_last_byte(2));
    }

    #[tokio::test]
    async fn failure_stops_the_remaining_steps() {
        let dir = artifacts_dir();
        let deployer = RecordingDeployer {
            fail_on: Some(0),
            ..Default::default()
        };

        let err = DeploymentPlan::token_and_control(dir.path())
            .execute(&deployer)
            .await
            .unwrap_err();

        assert!(matches!(err, ScriptError::ContractDeployment(_)));
        assert_eq!(deployer.calls.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn missing_artifact_prevents_any_submission() {
        let dir = tempdir().unwrap();
        let deployer = RecordingDeployer::default();

        let err = DeploymentPlan::token_and_control(dir.path())
            .execute(&deployer)
            .await
            .unwrap_err();

        assert!(matches!(err, ScriptError::ArtifactLoading(_)));
        assert!(deployer.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn constructor_arity_mismatch_is_rejected() {
        let dir = artifacts_dir();
        let deployer = RecordingDeployer::default();
        // Control contract has no constructor inputs
        let plan = DeploymentPlan::new(vec![DeploymentStep::new(
            dir.path(),
            MULTICHAIN_CONTROL_CONTRACT,
        )
        .with_constructor(&MccbToken::constructorCall {
            initialSupply: U256::from(1u64),
        })]);

        let err = plan.execute(&deployer).await.unwrap_err();

        assert!(matches!(err, ScriptError::ContractDeployment(ref msg) if msg.contains("expects 0")));
        assert!(deployer.calls.lock().unwrap().is_empty());
    }
}
