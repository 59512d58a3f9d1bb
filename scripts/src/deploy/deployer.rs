//! Contract creation through the signing RPC client

use alloy::{
    network::TransactionBuilder,
    primitives::{Address, Bytes},
    providers::{Provider, WalletProvider},
    rpc::types::eth::{TransactionReceipt, TransactionRequest},
};
use tracing::{info, warn};

use crate::{
    deploy::{ContractDeployer, DeployedContract},
    errors::ScriptError,
    tx::client::RpcProvider,
};

/// Deploys contracts through the signing RPC client.
///
/// Every creation is confirmed the same way: wait for the receipt, check its
/// status, then look the reported address up to make sure code lives there.
pub struct RpcDeployer {
    /// The signing client
    client: RpcProvider,
    /// Blocks to wait for on each creation
    confirmations: u64,
}

impl RpcDeployer {
    /// Build a deployer waiting for `confirmations` blocks on each creation
    pub fn new(client: RpcProvider, confirmations: u64) -> Self {
        RpcDeployer {
            client,
            confirmations: confirmations.max(1),
        }
    }
}

impl ContractDeployer for RpcDeployer {
    async fn deploy(
        &self,
        contract: &str,
        init_code: Bytes,
    ) -> Result<DeployedContract, ScriptError> {
        // Predict the contract address from the deployer nonce
        let deployer = self.client.default_signer_address();
        let nonce = self
            .client
            .get_transaction_count(deployer)
            .await
            .map_err(|e| ScriptError::NonceFetching(e.to_string()))?;
        let expected_address = deployer.create(nonce);

        // Build & send the creation tx
        let tx_request = TransactionRequest::default().with_deploy_code(init_code);
        let pending_tx = self
            .client
            .send_transaction(tx_request)
            .await
            .map_err(|e| ScriptError::ContractDeployment(e.to_string()))?;
        info!("Transaction hash: {}", pending_tx.tx_hash());

        // Wait for the transaction to be included
        let receipt = pending_tx
            .with_required_confirmations(self.confirmations)
            .get_receipt()
            .await
            .map_err(|e| ScriptError::ContractDeployment(e.to_string()))?;

        let address = confirmed_address(contract, &receipt, expected_address)?;

        // Explicit lookup of the deployed code
        let code = self
            .client
            .get_code_at(address)
            .await
            .map_err(|e| ScriptError::ContractDeployment(e.to_string()))?;
        ensure_code_deployed(contract, address, &code)?;

        Ok(DeployedContract {
            contract: contract.to_string(),
            address,
            tx_hash: receipt.transaction_hash,
            block_number: receipt.block_number,
        })
    }
}

/// Address of the contract created by `receipt`.
///
/// Fails on a reverted creation or a receipt without contract address. A
/// mismatch with the nonce prediction only warns, the receipt wins.
pub(crate) fn confirmed_address(
    contract: &str,
    receipt: &TransactionReceipt,
    expected_address: Address,
) -> Result<Address, ScriptError> {
    if !receipt.status() {
        return Err(ScriptError::ContractDeployment(format!(
            "{contract} creation reverted in tx {}",
            receipt.transaction_hash
        )));
    }

    let address = receipt.contract_address.ok_or_else(|| {
        ScriptError::ContractDeployment(format!(
            "no contract address in the receipt of tx {}",
            receipt.transaction_hash
        ))
    })?;
    if address != expected_address {
        // Another tx from the same key landed in between
        warn!("{contract} deployed to {address}, expected {expected_address}");
    }

    Ok(address)
}

/// Fails when no code lives at the freshly deployed `address`
pub(crate) fn ensure_code_deployed(
    contract: &str,
    address: Address,
    code: &[u8],
) -> Result<(), ScriptError> {
    if code.is_empty() {
        return Err(ScriptError::ContractDeployment(format!(
            "no code found at {address} after the {contract} deployment"
        )));
    }
    Ok(())
}
