//! Wallet provider - account access and chain selection

use std::future::Future;

use alloy_primitives::{Address, U64};
use serde_json::json;

use crate::config::Network;
use crate::error::ProviderError;
use crate::network::rpc::RpcClient;

/// The pieces of an EIP-1193 wallet this app needs for connecting
pub trait WalletProvider: Send + Sync + 'static {
    /// `eth_requestAccounts` when `prompt` is set (the wallet may ask the
    /// user), otherwise the silent `eth_accounts`
    fn accounts(&self, prompt: bool) -> impl Future<Output = Result<Vec<Address>, ProviderError>> + Send;

    fn chain_id(&self) -> impl Future<Output = Result<u64, ProviderError>> + Send;

    fn switch_chain(&self, chain_id: u64) -> impl Future<Output = Result<(), ProviderError>> + Send;
}

impl WalletProvider for RpcClient {
    async fn accounts(&self, prompt: bool) -> Result<Vec<Address>, ProviderError> {
        let method = if prompt { "eth_requestAccounts" } else { "eth_accounts" };
        self.call(method, json!([])).await
    }

    async fn chain_id(&self) -> Result<u64, ProviderError> {
        let id: U64 = self.call("eth_chainId", json!([])).await?;
        Ok(id.to::<u64>())
    }

    async fn switch_chain(&self, chain_id: u64) -> Result<(), ProviderError> {
        let _: serde_json::Value = self
            .call(
                "wallet_switchEthereumChain",
                json!([{ "chainId": format!("{:#x}", chain_id) }]),
            )
            .await?;
        Ok(())
    }
}

/// Connect to the wallet and make sure it is on `network`.
/// Returns the first account and the chain it is on.
pub async fn connect_wallet<W: WalletProvider>(
    wallet: &W,
    network: Network,
    prompt: bool,
) -> Result<(Address, u64), ProviderError> {
    let accounts = wallet.accounts(prompt).await?;
    let account = accounts.first().copied().ok_or(ProviderError::NoAccounts)?;

    let chain_id = wallet.chain_id().await?;
    if chain_id != network.chain_id {
        tracing::info!(from = chain_id, to = network.chain_id, "Asking wallet to switch chain");
        wallet.switch_chain(network.chain_id).await?;
    }

    Ok((account, network.chain_id))
}
