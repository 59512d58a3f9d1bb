//! Constants used in the deploy scripts

/// Environment variable holding the network RPC endpoint
pub const RPC_URL_ENV: &str = "RPC_URL";

/// Environment variable holding the deployer private key
pub const PRIVATE_KEY_ENV: &str = "PRIVATE_KEY";

/// Default directory of the compiled hardhat artifacts
pub const DEFAULT_ARTIFACTS_DIR: &str = "./artifacts";

/// Default file where the deployed addresses are recorded
pub const DEFAULT_OUTPUT_FILE: &str = "deployed.json";

/// Name of the multichain control contract
pub const MULTICHAIN_CONTROL_CONTRACT: &str = "MultichainControl";

/// Name of the MCCB token contract
pub const MCCB_TOKEN_CONTRACT: &str = "MccbToken";

/// Initial token supply, in whole tokens
pub const INITIAL_TOKEN_SUPPLY: u64 = 1_000_000;

/// Decimals of the MCCB token
pub const TOKEN_DECIMALS: u64 = 18;
