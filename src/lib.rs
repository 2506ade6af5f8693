//! # Message Storage TUI
//!
//! A terminal front end for the MessageStorage contract.
//!
//! ## Features
//! - Connect a wallet through its JSON-RPC provider
//! - Send a message with ETH attached via the payable `pay(string)`
//! - Browse every stored message with sender and local timestamp
//! - Show the contract balance
//!
//! ## Architecture
//! Actor-based with channels:
//! - UI Layer (Ratatui) - synchronous
//! - App Layer (contract session state)
//! - Network Layer (Tokio runtime, JSON-RPC)

pub mod config;
pub mod constants;
pub mod contract;
pub mod error;
pub mod models;
pub mod storage;
pub mod ui;
pub mod messages;
pub mod app;
pub mod network;

// Re-export commonly used types
pub use config::{AppConfig, Network};
pub use contract::{ContractClient, EvmContractClient};
pub use error::{AmountError, ConfigError, ProviderError};
pub use models::{Connection, ContractSnapshot, Draft, Message};
pub use messages::{UiEvent, NetworkCommand, NetworkResponse, RenderState};
pub use app::{AppState, AppActor};
pub use network::{NetworkActor, RpcClient, WalletProvider};
