//! Contract client - typed reads and the value-bearing `pay` write

use std::future::Future;
use std::time::Duration;

use alloy_primitives::{Address, Bytes, B256, U256, U64};
use serde::Deserialize;
use serde_json::json;

use crate::constants::{CONFIRMATION_TIMEOUT_SECS, RECEIPT_POLL_MILLIS};
use crate::contract::abi;
use crate::error::ProviderError;
use crate::models::Message;
use crate::network::rpc::RpcClient;

/// Operations exposed by the MessageStorage contract
pub trait ContractClient: Send + Sync + 'static {
    fn get_all_messages(&self) -> impl Future<Output = Result<Vec<Message>, ProviderError>> + Send;

    /// Contract balance in wei
    fn get_balance(&self) -> impl Future<Output = Result<U256, ProviderError>> + Send;

    fn owner(&self) -> impl Future<Output = Result<Address, ProviderError>> + Send;

    /// Send `pay(text)` from `from` with `value` wei attached and wait
    /// until it is included. Returns the transaction hash.
    fn pay(
        &self,
        from: Address,
        text: String,
        value: U256,
    ) -> impl Future<Output = Result<B256, ProviderError>> + Send;
}

#[derive(Debug, Deserialize)]
struct TransactionReceipt {
    #[serde(rename = "transactionHash")]
    transaction_hash: B256,
    #[serde(default)]
    status: Option<U64>,
}

/// `ContractClient` over JSON-RPC: `eth_call` on the network endpoint,
/// `eth_sendTransaction` on the wallet endpoint
#[derive(Clone, Debug)]
pub struct EvmContractClient {
    address: Address,
    reads: RpcClient,
    wallet: RpcClient,
    poll_interval: Duration,
    confirmation_timeout: Duration,
}

impl EvmContractClient {
    pub fn new(address: Address, reads: RpcClient, wallet: RpcClient) -> Self {
        EvmContractClient {
            address,
            reads,
            wallet,
            poll_interval: Duration::from_millis(RECEIPT_POLL_MILLIS),
            confirmation_timeout: Duration::from_secs(CONFIRMATION_TIMEOUT_SECS),
        }
    }

    pub fn with_polling(mut self, poll_interval: Duration, confirmation_timeout: Duration) -> Self {
        self.poll_interval = poll_interval;
        self.confirmation_timeout = confirmation_timeout;
        self
    }

    async fn eth_call(&self, calldata: Vec<u8>) -> Result<Bytes, ProviderError> {
        self.reads
            .call(
                "eth_call",
                json!([{ "to": self.address, "data": Bytes::from(calldata) }, "latest"]),
            )
            .await
    }

    async fn poll_receipt(&self, hash: B256) -> Result<B256, ProviderError> {
        loop {
            let receipt: Option<TransactionReceipt> = self
                .reads
                .call("eth_getTransactionReceipt", json!([hash]))
                .await?;

            if let Some(receipt) = receipt {
                return match receipt.status {
                    Some(status) if status.is_zero() => {
                        Err(ProviderError::Reverted(receipt.transaction_hash))
                    }
                    _ => Ok(receipt.transaction_hash),
                };
            }
            tokio::time::sleep(self.poll_interval).await;
        }
    }

    async fn wait_for_receipt(&self, hash: B256) -> Result<B256, ProviderError> {
        match tokio::time::timeout(self.confirmation_timeout, self.poll_receipt(hash)).await {
            Ok(result) => result,
            Err(_) => Err(ProviderError::ConfirmationTimeout(hash)),
        }
    }
}

impl ContractClient for EvmContractClient {
    async fn get_all_messages(&self) -> Result<Vec<Message>, ProviderError> {
        let data = self.eth_call(abi::encode_get_all_messages()).await?;
        abi::decode_messages(&data)
    }

    async fn get_balance(&self) -> Result<U256, ProviderError> {
        let data = self.eth_call(abi::encode_get_balance()).await?;
        abi::decode_balance(&data)
    }

    async fn owner(&self) -> Result<Address, ProviderError> {
        let data = self.eth_call(abi::encode_owner()).await?;
        abi::decode_owner(&data)
    }

    async fn pay(&self, from: Address, text: String, value: U256) -> Result<B256, ProviderError> {
        let tx = json!({
            "from": from,
            "to": self.address,
            "value": value,
            "data": Bytes::from(abi::encode_pay(&text)),
        });

        let hash: B256 = self.wallet.call("eth_sendTransaction", json!([tx])).await?;
        tracing::info!(%hash, "Transaction submitted, waiting for inclusion");
        self.wait_for_receipt(hash).await
    }
}
