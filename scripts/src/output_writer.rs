//! Record of the deployed contracts, kept in a json file keyed by network

use std::{fs, path::Path};

use alloy::primitives::Address;
use json::{object, JsonValue};

use crate::{deploy::DeployedContract, errors::ScriptError};

/// Writes the given deployments under the `network` key, keeping the other entries
pub fn write_deployments(
    file_path: &Path,
    network: &str,
    deployments: &[DeployedContract],
) -> Result<(), ScriptError> {
    // If the file doesn't exist, start from an empty document
    let mut parsed_json = if file_path.exists() {
        get_json_from_file(file_path)?
    } else {
        JsonValue::new_object()
    };

    for deployment in deployments {
        parsed_json[network][deployment.contract.as_str()] = object! {
            "address" => deployment.address.to_string(),
            "tx" => format!("{:#x}", deployment.tx_hash),
            "block" => deployment.block_number,
        };
    }

    // Write the updated json back to the file
    fs::write(file_path, json::stringify_pretty(parsed_json, 4))
        .map_err(|e| ScriptError::JsonOutputError(e.to_string()))?;

    Ok(())
}

/// Read a deployed address
pub fn read_deployed_address(
    file_path: &Path,
    network: &str,
    contract: &str,
) -> Result<Address, ScriptError> {
    if !file_path.exists() {
        return Err(ScriptError::JsonOutputError(String::from(
            "Deployed addresses file not found",
        )));
    }

    let parsed_json = get_json_from_file(file_path)?;
    let address = parsed_json[network][contract]["address"]
        .as_str()
        .ok_or_else(|| {
            ScriptError::JsonOutputError(format!("no {contract} deployment on {network}"))
        })?;

    address
        .parse::<Address>()
        .map_err(|e| ScriptError::JsonOutputError(e.to_string()))
}

/// Parses the JSON file at the given path
fn get_json_from_file(file_path: &Path) -> Result<JsonValue, ScriptError> {
    let file_contents =
        fs::read_to_string(file_path).map_err(|e| ScriptError::JsonOutputError(e.to_string()))?;

    json::parse(&file_contents).map_err(|e| ScriptError::JsonOutputError(e.to_string()))
}
