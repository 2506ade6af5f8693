//! Solidity bindings for the MessageStorage contract

use alloy_primitives::{Address, U256};
use alloy_sol_types::{sol, SolCall};

use crate::error::ProviderError;
use crate::models::Message;

sol! {
    struct StoredMessage {
        address sender;
        string text;
        uint256 timestamp;
    }

    function getAllMessages() external view returns (StoredMessage[] memory);
    function getBalance() external view returns (uint256);
    function owner() external view returns (address);
    function pay(string memory text) external payable;
}

impl From<StoredMessage> for Message {
    fn from(raw: StoredMessage) -> Self {
        Message {
            sender: raw.sender,
            text: raw.text,
            timestamp: raw.timestamp,
        }
    }
}

pub fn encode_get_all_messages() -> Vec<u8> {
    getAllMessagesCall {}.abi_encode()
}

pub fn encode_get_balance() -> Vec<u8> {
    getBalanceCall {}.abi_encode()
}

pub fn encode_owner() -> Vec<u8> {
    ownerCall {}.abi_encode()
}

pub fn encode_pay(text: &str) -> Vec<u8> {
    payCall {
        text: text.to_string(),
    }
    .abi_encode()
}

/// Decode `getAllMessages` return data, keeping contract order
pub fn decode_messages(data: &[u8]) -> Result<Vec<Message>, ProviderError> {
    let ret = getAllMessagesCall::abi_decode_returns(data, true)?;
    Ok(ret._0.into_iter().map(Message::from).collect())
}

pub fn decode_balance(data: &[u8]) -> Result<U256, ProviderError> {
    Ok(getBalanceCall::abi_decode_returns(data, true)?._0)
}

pub fn decode_owner(data: &[u8]) -> Result<Address, ProviderError> {
    Ok(ownerCall::abi_decode_returns(data, true)?._0)
}
