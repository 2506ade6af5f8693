//! Network actor - runs contract reads, wallet connection and payments in Tokio

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinSet;

use crate::config::Network;
use crate::contract::ContractClient;
use crate::messages::{NetworkCommand, NetworkResponse};
use crate::models::ReadQuery;
use crate::network::wallet::{connect_wallet, WalletProvider};

/// Network actor that processes contract and wallet commands
pub struct NetworkActor<C, W> {
    contract: Arc<C>,
    wallet: Arc<W>,
    network: Network,
    response_tx: mpsc::UnboundedSender<NetworkResponse>,
    active_requests: JoinSet<()>,
}

impl<C: ContractClient, W: WalletProvider> NetworkActor<C, W> {
    pub fn new(
        contract: C,
        wallet: W,
        network: Network,
        response_tx: mpsc::UnboundedSender<NetworkResponse>,
    ) -> Self {
        NetworkActor {
            contract: Arc::new(contract),
            wallet: Arc::new(wallet),
            network,
            response_tx,
            active_requests: JoinSet::new(),
        }
    }

    /// Run the network actor message loop
    pub async fn run(mut self, mut cmd_rx: mpsc::UnboundedReceiver<NetworkCommand>) {
        loop {
            tokio::select! {
                biased;

                cmd = cmd_rx.recv() => {
                    match cmd {
                        Some(NetworkCommand::Read { id, query }) => {
                            let contract = self.contract.clone();
                            let response_tx = self.response_tx.clone();
                            self.active_requests.spawn(async move {
                                let _ = response_tx.send(execute_read(contract.as_ref(), id, query).await);
                            });
                        }

                        Some(NetworkCommand::Connect { id, prompt }) => {
                            let wallet = self.wallet.clone();
                            let network = self.network;
                            let response_tx = self.response_tx.clone();
                            self.active_requests.spawn(async move {
                                tracing::info!(id, prompt, "Connecting wallet");
                                let response = match connect_wallet(wallet.as_ref(), network, prompt).await {
                                    Ok((account, chain_id)) => NetworkResponse::Connected { id, account, chain_id },
                                    Err(e) => NetworkResponse::ConnectFailed { id, message: e.user_message() },
                                };
                                let _ = response_tx.send(response);
                            });
                        }

                        Some(NetworkCommand::Pay { id, from, text, value }) => {
                            let contract = self.contract.clone();
                            let response_tx = self.response_tx.clone();
                            self.active_requests.spawn(async move {
                                tracing::info!(id, %from, %value, "Executing pay");
                                let response = match contract.pay(from, text, value).await {
                                    Ok(tx_hash) => NetworkResponse::PaymentConfirmed { id, tx_hash },
                                    Err(e) => {
                                        tracing::error!(id, error = %e, "Transaction failed");
                                        NetworkResponse::PaymentFailed { id, message: e.user_message() }
                                    }
                                };
                                let _ = response_tx.send(response);
                            });
                        }

                        Some(NetworkCommand::Shutdown) | None => {
                            // In-flight calls are dropped with the JoinSet
                            break;
                        }
                    }
                }

                // Clean up completed tasks
                Some(_result) = self.active_requests.join_next() => {}
            }
        }
    }
}

/// Run one contract read and wrap the outcome
pub async fn execute_read<C: ContractClient>(contract: &C, id: u64, query: ReadQuery) -> NetworkResponse {
    tracing::debug!(id, query = query.as_str(), "Executing read");
    let result = match query {
        ReadQuery::Messages => contract
            .get_all_messages()
            .await
            .map(|messages| NetworkResponse::MessagesLoaded { id, messages }),
        ReadQuery::Balance => contract
            .get_balance()
            .await
            .map(|balance| NetworkResponse::BalanceLoaded { id, balance }),
        ReadQuery::Owner => contract
            .owner()
            .await
            .map(|owner| NetworkResponse::OwnerLoaded { id, owner }),
    };

    result.unwrap_or_else(|e| NetworkResponse::ReadFailed {
        id,
        query,
        message: e.to_string(),
    })
}
