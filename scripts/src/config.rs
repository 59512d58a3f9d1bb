//! Runtime configuration of the deploy scripts, read once from the environment

use std::{env, fmt};

use crate::{
    constants::{PRIVATE_KEY_ENV, RPC_URL_ENV},
    errors::ScriptError,
};

/// Endpoint and signing key used for a whole deployment run
#[derive(Clone, PartialEq, Eq)]
pub struct DeployConfig {
    /// Network RPC URL
    pub rpc_url: String,
    /// Private key of the deployer
    pub private_key: String,
}

impl DeployConfig {
    /// Build the config from an arbitrary key lookup.
    ///
    /// Both values must be present and non blank, nothing else is checked here:
    /// a malformed url or key is only caught when the client is built.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ScriptError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let rpc_url = required(&lookup, RPC_URL_ENV)?;
        let private_key = required(&lookup, PRIVATE_KEY_ENV)?;

        Ok(DeployConfig {
            rpc_url,
            private_key,
        })
    }
}

/// Value of `key` in the process environment (after `.env` loading)
pub fn env_lookup(key: &str) -> Option<String> {
    env::var(key).ok()
}

// Never leak the key in logs
impl fmt::Debug for DeployConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeployConfig")
            .field("rpc_url", &self.rpc_url)
            .field("private_key", &"<redacted>")
            .finish()
    }
}

/// Trimmed value of `key`, an error when it's unset or blank
fn required<F>(lookup: &F, key: &str) -> Result<String, ScriptError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(value) if !value.trim().is_empty() => Ok(value.trim().to_string()),
        _ => Err(ScriptError::Configuration(format!(
            "{key} must be set, ensure {RPC_URL_ENV} and {PRIVATE_KEY_ENV} are provided"
        ))),
    }
}
