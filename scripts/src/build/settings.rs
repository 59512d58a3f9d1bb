//! Compiler settings and the single network profile of the project.
//!
//! This is passive data: nothing here talks to the network. The deploy
//! commands only borrow the network name to key the deployment output.

use json::{array, object, JsonValue};

use crate::constants::{PRIVATE_KEY_ENV, RPC_URL_ENV};

/// Solidity compiler settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompilerSettings {
    /// Solc version
    pub version: &'static str,
    /// Whether the optimizer runs
    pub optimizer_enabled: bool,
    /// Number of optimizer runs
    pub optimizer_runs: u32,
}

/// Settings the artifacts are compiled with
pub const SOLIDITY: CompilerSettings = CompilerSettings {
    version: "0.8.24",
    optimizer_enabled: true,
    optimizer_runs: 200,
};

/// Name of the only network profile
pub const NETWORK_NAME: &str = "sepolia";

/// A named network: endpoint and signing accounts
#[derive(Clone, PartialEq, Eq)]
pub struct NetworkProfile {
    /// Profile name
    pub name: &'static str,
    /// RPC endpoint, empty when unset
    pub url: String,
    /// Private keys, empty when unset
    pub accounts: Vec<String>,
}

impl NetworkProfile {
    /// The sepolia profile from an arbitrary lookup, missing values default to empty
    pub fn sepolia_from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        NetworkProfile {
            name: NETWORK_NAME,
            url: lookup(RPC_URL_ENV).unwrap_or_default(),
            accounts: lookup(PRIVATE_KEY_ENV)
                .filter(|key| !key.is_empty())
                .into_iter()
                .collect(),
        }
    }
}

/// Full build config: compiler settings plus network profiles
#[derive(Clone, PartialEq, Eq)]
pub struct BuildConfig {
    /// Compiler settings
    pub solidity: CompilerSettings,
    /// Known networks
    pub networks: Vec<NetworkProfile>,
}

impl BuildConfig {
    /// Config of this project from an arbitrary lookup
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        BuildConfig {
            solidity: SOLIDITY,
            networks: vec![NetworkProfile::sepolia_from_lookup(lookup)],
        }
    }

    /// Hardhat shaped json, with the account keys redacted
    pub fn to_json(&self) -> JsonValue {
        let mut networks = JsonValue::new_object();
        for network in &self.networks {
            let mut accounts = array![];
            for key in &network.accounts {
                // Pushing into an array can't fail
                let _ = accounts.push(redact(key));
            }
            networks[network.name] = object! {
                "url" => network.url.clone(),
                "accounts" => accounts,
            };
        }

        object! {
            "solidity" => object! {
                "version" => self.solidity.version,
                "settings" => object! {
                    "optimizer" => object! {
                        "enabled" => self.solidity.optimizer_enabled,
                        "runs" => self.solidity.optimizer_runs,
                    },
                },
            },
            "networks" => networks,
        }
    }
}

/// Keep only the last 4 chars of a key, nothing at all for short keys
fn redact(key: &str) -> String {
    if key.chars().count() <= 8 {
        return String::from("0x…");
    }

    let tail: String = key
        .chars()
        .rev()
        .take(4)
        .collect::<Vec<_>>()
        .into_iter()
        .rev()
        .collect();
    format!("0x…{tail}")
}
