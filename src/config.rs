//! Process-wide configuration
//!
//! Built once in `main` before any actor starts and shared as an
//! immutable `Arc<AppConfig>`.

use std::path::PathBuf;
use std::time::Duration;

use alloy_primitives::Address;

use crate::constants::{
    CONTRACT_ADDRESS, DEFAULT_REFRESH_SECS, DEFAULT_WALLET_URL, STATE_DIR_NAME,
};
use crate::error::ConfigError;

pub const ENV_PROJECT_ID: &str = "REOWN_PROJECT_ID";
pub const ENV_NETWORK: &str = "MESSAGE_STORAGE_NETWORK";
pub const ENV_RPC_URL: &str = "MESSAGE_STORAGE_RPC_URL";
pub const ENV_WALLET_URL: &str = "MESSAGE_STORAGE_WALLET_URL";
pub const ENV_REFRESH_SECS: &str = "MESSAGE_STORAGE_REFRESH_SECS";
pub const ENV_STATE_DIR: &str = "MESSAGE_STORAGE_STATE_DIR";

/// A chain the app can talk to
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Network {
    pub name: &'static str,
    pub label: &'static str,
    pub chain_id: u64,
    pub currency: &'static str,
}

pub const SEPOLIA: Network = Network {
    name: "sepolia",
    label: "Sepolia",
    chain_id: 11_155_111,
    currency: "ETH",
};

pub const MAINNET: Network = Network {
    name: "mainnet",
    label: "Ethereum",
    chain_id: 1,
    currency: "ETH",
};

/// Supported networks, default first
pub const NETWORKS: [Network; 2] = [SEPOLIA, MAINNET];

impl Network {
    pub fn by_name(name: &str) -> Option<Network> {
        NETWORKS
            .iter()
            .copied()
            .find(|n| n.name.eq_ignore_ascii_case(name.trim()))
    }

    pub fn by_chain_id(chain_id: u64) -> Option<Network> {
        NETWORKS.iter().copied().find(|n| n.chain_id == chain_id)
    }

    /// Hosted RPC endpoint keyed by the project id
    pub fn default_rpc_url(&self, project_id: &str) -> String {
        format!(
            "https://rpc.walletconnect.org/v1/?chainId=eip155:{}&projectId={}",
            self.chain_id, project_id
        )
    }
}

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub project_id: String,
    pub network: Network,
    pub contract: Address,
    pub rpc_url: String,
    pub wallet_url: String,
    pub refresh_interval: Duration,
    pub state_dir: PathBuf,
}

impl AppConfig {
    /// Read configuration from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from any key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        // Empty strings count as unset
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let project_id = get(ENV_PROJECT_ID).ok_or(ConfigError::MissingProjectId)?;

        let network = match get(ENV_NETWORK) {
            Some(name) => Network::by_name(&name).ok_or(ConfigError::UnknownNetwork(name))?,
            None => NETWORKS[0],
        };

        let rpc_url = get(ENV_RPC_URL).unwrap_or_else(|| network.default_rpc_url(&project_id));
        let wallet_url = get(ENV_WALLET_URL).unwrap_or_else(|| DEFAULT_WALLET_URL.to_string());

        let refresh_secs = match get(ENV_REFRESH_SECS) {
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => secs,
                _ => {
                    return Err(ConfigError::InvalidValue {
                        name: ENV_REFRESH_SECS,
                        value: raw,
                    })
                }
            },
            None => DEFAULT_REFRESH_SECS,
        };

        let state_dir = match get(ENV_STATE_DIR) {
            Some(dir) => PathBuf::from(dir),
            None => dirs::home_dir()
                .map(|home| home.join(STATE_DIR_NAME))
                .ok_or(ConfigError::NoStateDir)?,
        };

        Ok(AppConfig {
            project_id,
            network,
            contract: CONTRACT_ADDRESS,
            rpc_url,
            wallet_url,
            refresh_interval: Duration::from_secs(refresh_secs),
            state_dir,
        })
    }
}
