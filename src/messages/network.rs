//! Network messages - communication between App and Network layers

use alloy_primitives::{Address, B256, U256};

use crate::models::{Message, ReadQuery};

/// Commands sent from App layer to Network layer
#[derive(Debug, Clone)]
pub enum NetworkCommand {
    /// Run one of the contract reads
    Read { id: u64, query: ReadQuery },
    /// Connect to the wallet; `prompt` is false for silent reconnects
    Connect { id: u64, prompt: bool },
    /// Send `pay(text)` with `value` wei attached
    Pay {
        id: u64,
        from: Address,
        text: String,
        value: U256,
    },
    /// Shutdown the network actor
    Shutdown,
}

/// Responses sent from Network layer to App layer
#[derive(Debug, Clone)]
pub enum NetworkResponse {
    MessagesLoaded { id: u64, messages: Vec<Message> },
    BalanceLoaded { id: u64, balance: U256 },
    OwnerLoaded { id: u64, owner: Address },
    ReadFailed { id: u64, query: ReadQuery, message: String },

    Connected { id: u64, account: Address, chain_id: u64 },
    ConnectFailed { id: u64, message: String },

    /// Transaction included and not reverted
    PaymentConfirmed { id: u64, tx_hash: B256 },
    PaymentFailed { id: u64, message: String },
}

impl NetworkResponse {
    /// Get the request ID from the response
    pub fn id(&self) -> u64 {
        match self {
            NetworkResponse::MessagesLoaded { id, .. } => *id,
            NetworkResponse::BalanceLoaded { id, .. } => *id,
            NetworkResponse::OwnerLoaded { id, .. } => *id,
            NetworkResponse::ReadFailed { id, .. } => *id,
            NetworkResponse::Connected { id, .. } => *id,
            NetworkResponse::ConnectFailed { id, .. } => *id,
            NetworkResponse::PaymentConfirmed { id, .. } => *id,
            NetworkResponse::PaymentFailed { id, .. } => *id,
        }
    }

    /// The read this response answers, if it is a read response
    pub fn read_query(&self) -> Option<ReadQuery> {
        match self {
            NetworkResponse::MessagesLoaded { .. } => Some(ReadQuery::Messages),
            NetworkResponse::BalanceLoaded { .. } => Some(ReadQuery::Balance),
            NetworkResponse::OwnerLoaded { .. } => Some(ReadQuery::Owner),
            NetworkResponse::ReadFailed { query, .. } => Some(*query),
            _ => None,
        }
    }
}
