//! Contract layer - ABI bindings and the client trait for MessageStorage
//!
//! Reads go through the network RPC endpoint, the `pay` write goes through
//! the wallet provider which signs it.

pub mod abi;
pub mod client;

pub use client::{ContractClient, EvmContractClient};
