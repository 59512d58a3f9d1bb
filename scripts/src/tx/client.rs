//! The signing RPC client

use alloy::{
    network::{Ethereum, EthereumWallet},
    providers::{
        fillers::{ChainIdFiller, FillProvider, GasFiller, JoinFill, NonceFiller, WalletFiller},
        Identity, Provider, ProviderBuilder, ReqwestProvider,
    },
    signers::local::PrivateKeySigner,
};
use reqwest::{Client, Url};
use tracing::info;

use crate::{config::DeployConfig, errors::ScriptError};

/// Re-export from alloy recommend filter
type RecommendFiller =
    JoinFill<JoinFill<JoinFill<Identity, GasFiller>, NonceFiller>, ChainIdFiller>;

/// An alloy provider that uses a `PrivateKeySigner` to generate signatures
/// & interfaces with the RPC endpoint over HTTP
pub type RpcProvider = FillProvider<
    JoinFill<RecommendFiller, WalletFiller<EthereumWallet>>,
    ReqwestProvider,
    alloy::transports::http::Http<Client>,
    Ethereum,
>;

/// Build the signing RPC client for the given config.
///
/// The chain id is fetched once, so an unreachable endpoint fails here
/// instead of during the first deployment.
pub async fn create_rpc_provider(config: &DeployConfig) -> Result<RpcProvider, ScriptError> {
    // Create our signer, the `0x` prefix is optional
    let signer = config
        .private_key
        .parse::<PrivateKeySigner>()
        .map_err(|e| ScriptError::ClientInitialization(format!("invalid private key: {e}")))?;
    info!("Deployer address: {}", signer.address());

    let wallet = EthereumWallet::from(signer);

    let url = config
        .rpc_url
        .parse::<Url>()
        .map_err(|e| ScriptError::ClientInitialization(format!("invalid rpc url: {e}")))?;

    // Create our provider with the rpc client + signer
    let provider = ProviderBuilder::new()
        .with_recommended_fillers()
        .wallet(wallet)
        .on_http(url);

    // Fetch chain id
    let chain_id = provider
        .get_chain_id()
        .await
        .map_err(|e| ScriptError::ClientInitialization(e.to_string()))?;

    info!("Build client on chain ID: {}", chain_id);

    Ok(provider)
}
