//! Application constants
//!
//! Centralized location for the contract address and configuration defaults.

use alloy_primitives::{address, Address};

/// Deployed MessageStorage contract
pub const CONTRACT_ADDRESS: Address = address!("102fFED303851eeD8185E3EA8D291820009CfD3e");

/// Amount pre-filled in the draft, in ETH
pub const DEFAULT_AMOUNT: &str = "0.01";

/// Local wallet provider endpoint (Frame and similar desktop wallets)
pub const DEFAULT_WALLET_URL: &str = "http://127.0.0.1:1248";

/// Seconds between contract read refreshes
pub const DEFAULT_REFRESH_SECS: u64 = 12;

/// Name of the state directory under $HOME
pub const STATE_DIR_NAME: &str = ".message-storage";

/// Log file written in the working directory
pub const LOG_FILE: &str = "message-storage.log";

/// HTTP timeout for every JSON-RPC call
pub const RPC_TIMEOUT_SECS: u64 = 30;

/// How often a pending transaction's receipt is polled
pub const RECEIPT_POLL_MILLIS: u64 = 1_000;

/// Give up waiting for inclusion after this long
pub const CONFIRMATION_TIMEOUT_SECS: u64 = 180;

/// Application name
pub const APP_NAME: &str = "Message Storage";
