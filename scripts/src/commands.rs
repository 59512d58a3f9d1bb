//! Implementation of the CLI commands

use std::path::Path;

use alloy::primitives::Address;
use tracing::info;

use crate::{
    build::settings::{BuildConfig, NETWORK_NAME},
    cli::DeployArgs,
    config::DeployConfig,
    constants::{MCCB_TOKEN_CONTRACT, MULTICHAIN_CONTROL_CONTRACT},
    deploy::{DeployedContract, DeploymentPlan, RpcDeployer},
    errors::ScriptError,
    output_writer::{read_deployed_address, write_deployments},
    tx::client::create_rpc_provider,
};

/// Run the given plan on the configured network, then record the addresses
pub async fn deploy_contracts(
    config: &DeployConfig,
    plan: DeploymentPlan,
    args: &DeployArgs,
) -> Result<Vec<DeployedContract>, ScriptError> {
    // Build our RPC client with signer
    let client = create_rpc_provider(config).await?;
    let deployer = RpcDeployer::new(client, args.confirmations);

    let deployed = plan.execute(&deployer).await?;

    if !args.no_output {
        write_deployments(&args.output, NETWORK_NAME, &deployed)?;
        info!("Deployed addresses written to {}", args.output.display());
    }

    Ok(deployed)
}

/// Print the compiler & network settings (keys redacted), then the recorded deployments
pub fn print_network_config(config: &BuildConfig, output: &Path) -> Result<(), ScriptError> {
    println!("{}", json::stringify_pretty(config.to_json(), 2));

    for network in &config.networks {
        for (contract, address) in recorded_deployments(output, network.name) {
            println!("{} on {}: {}", contract, network.name, address);
        }
    }
    Ok(())
}

/// Contracts already recorded for `network` in the output file, unknown ones are skipped
pub fn recorded_deployments(output: &Path, network: &str) -> Vec<(&'static str, Address)> {
    [MCCB_TOKEN_CONTRACT, MULTICHAIN_CONTROL_CONTRACT]
        .into_iter()
        .filter_map(|contract| {
            read_deployed_address(output, network, contract)
                .ok()
                .map(|address| (contract, address))
        })
        .collect()
}

#[cfg(test)]
#[allow(clippy::missing_docs_in_private_items)]
mod tests {
    use alloy::primitives::TxHash;
    use tempfile::tempdir;

    use super::*;

    #[test]
    fn lists_recorded_deployments_of_the_network() {
        let dir = tempdir().unwrap();
        let output = dir.path().join("deployed.json");
        write_deployments(
            &output,
            NETWORK_NAME,
            &[DeployedContract {
                contract: MULTICHAIN_CONTROL_CONTRACT.to_string(),
                address: Address::with_last_byte(7),
                tx_hash: TxHash::with_last_byte(7),
                block_number: None,
            }],
        )
        .unwrap();

        assert_eq!(
            recorded_deployments(&output, NETWORK_NAME),
            vec![(MULTICHAIN_CONTROL_CONTRACT, Address::with_last_byte(7))]
        );
        assert!(recorded_deployments(&output, "mainnet").is_empty());
    }

    #[test]
    fn missing_output_file_lists_nothing() {
        let dir = tempdir().unwrap();

        assert!(recorded_deployments(&dir.path().join("deployed.json"), NETWORK_NAME).is_empty());
    }
}
