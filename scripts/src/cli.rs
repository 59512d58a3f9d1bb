//! Definitions of CLI arguments and commands for deploy scripts

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use tracing::info;

use crate::{
    build::settings::BuildConfig,
    commands::{deploy_contracts, print_network_config},
    config::{env_lookup, DeployConfig},
    constants::{DEFAULT_ARTIFACTS_DIR, DEFAULT_OUTPUT_FILE},
    deploy::DeploymentPlan,
    errors::ScriptError,
};

/// Scripts for deploying the MultichainControl & MccbToken contracts.
///
/// The endpoint and deployer key are read from `RPC_URL` and `PRIVATE_KEY`
/// (a `.env` file is loaded first).
#[derive(Parser)]
pub struct Cli {
    /// The command to run
    #[command(subcommand)]
    pub command: Command,
}

/// The possible CLI commands
#[derive(Subcommand)]
pub enum Command {
    /// Deploy the MultichainControl contract only
    DeployControl(DeployArgs),
    /// Deploy the MccbToken, then the MultichainControl contract
    DeployAll(DeployArgs),
    /// Print the compiler & network settings, and the recorded deployments
    NetworkConfig(NetworkConfigArgs),
}

impl Command {
    /// Run the command, configured from the process environment
    pub async fn run(self) -> Result<(), ScriptError> {
        self.run_with_lookup(env_lookup).await
    }

    /// Run the command, configured from an arbitrary lookup.
    ///
    /// The deploy config is resolved before any client gets built.
    pub async fn run_with_lookup<F>(self, lookup: F) -> Result<(), ScriptError>
    where
        F: Fn(&str) -> Option<String>,
    {
        match self {
            Command::DeployControl(args) => {
                info!("Deploying the MultichainControl contract...");
                let config = DeployConfig::from_lookup(lookup)?;
                let plan = DeploymentPlan::multichain_control(&args.artifacts_dir);
                deploy_contracts(&config, plan, &args).await?;
                Ok(())
            }
            Command::DeployAll(args) => {
                info!("Deploying the MccbToken & MultichainControl contracts...");
                let config = DeployConfig::from_lookup(lookup)?;
                let plan = DeploymentPlan::token_and_control(&args.artifacts_dir);
                deploy_contracts(&config, plan, &args).await?;
                Ok(())
            }
            Command::NetworkConfig(args) => {
                print_network_config(&BuildConfig::from_lookup(lookup), &args.output)
            }
        }
    }
}

/// Deploy contracts
#[derive(Args, Debug, Clone)]
pub struct DeployArgs {
    /// Directory holding the compiled hardhat artifacts
    #[arg(long, default_value = DEFAULT_ARTIFACTS_DIR)]
    pub artifacts_dir: PathBuf,
    /// File where the deployed addresses are recorded
    #[arg(short, long, default_value = DEFAULT_OUTPUT_FILE)]
    pub output: PathBuf,
    /// Don't record the deployed addresses
    #[arg(long)]
    pub no_output: bool,
    /// Number of confirmations to wait for on each deployment
    #[arg(short, long, default_value_t = 1)]
    pub confirmations: u64,
}

/// Print the settings
#[derive(Args, Debug, Clone)]
pub struct NetworkConfigArgs {
    /// File where the deployed addresses are recorded
    #[arg(short, long, default_value = DEFAULT_OUTPUT_FILE)]
    pub output: PathBuf,
}
