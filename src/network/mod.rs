//! Network layer - JSON-RPC transport, wallet provider and the Network actor
//!
//! The Network actor receives contract/wallet commands and sends back responses.

pub mod actor;
pub mod rpc;
pub mod wallet;

pub use actor::NetworkActor;
pub use rpc::RpcClient;
pub use wallet::WalletProvider;
