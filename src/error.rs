use alloy_primitives::B256;
use thiserror::Error;

/// Startup configuration problems. All of them are fatal.
#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("Project ID is not defined (set REOWN_PROJECT_ID)")]
    MissingProjectId,

    #[error("Unsupported network '{0}' (expected sepolia or mainnet)")]
    UnknownNetwork(String),

    #[error("Invalid value for {name}: {value}")]
    InvalidValue { name: &'static str, value: String },

    #[error("Could not determine a state directory (set MESSAGE_STORAGE_STATE_DIR)")]
    NoStateDir,
}

/// Failures talking to the node or the wallet
#[derive(Error, Debug)]
pub enum ProviderError {
    /// JSON-RPC error object returned by the endpoint
    #[error("{message}")]
    Rpc {
        code: i64,
        message: String,
        data: Option<serde_json::Value>,
    },

    #[error("Request timed out")]
    Timeout,

    #[error("Connection failed: {0}")]
    Connect(String),

    #[error("Request failed: {0}")]
    Transport(String),

    #[error("Malformed response: {0}")]
    Decode(String),

    #[error("Wallet returned no accounts")]
    NoAccounts,

    #[error("Transaction {0} reverted")]
    Reverted(B256),

    #[error("Timed out waiting for transaction {0} to be included")]
    ConfirmationTimeout(B256),
}

impl ProviderError {
    /// The provider's own one-line description, when it sent one
    pub fn short_message(&self) -> Option<&str> {
        match self {
            ProviderError::Rpc { message, .. } => message.lines().next(),
            _ => None,
        }
    }

    /// Best human-readable text for a notification
    pub fn user_message(&self) -> String {
        self.short_message()
            .map(String::from)
            .unwrap_or_else(|| self.to_string())
    }
}

impl From<reqwest::Error> for ProviderError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ProviderError::Timeout
        } else if err.is_connect() {
            ProviderError::Connect(err.to_string())
        } else if err.is_decode() {
            ProviderError::Decode(err.to_string())
        } else {
            ProviderError::Transport(err.to_string())
        }
    }
}

impl From<serde_json::Error> for ProviderError {
    fn from(err: serde_json::Error) -> Self {
        ProviderError::Decode(err.to_string())
    }
}

impl From<alloy_sol_types::Error> for ProviderError {
    fn from(err: alloy_sol_types::Error) -> Self {
        ProviderError::Decode(err.to_string())
    }
}

/// The draft amount could not be turned into wei
#[derive(Error, Debug, PartialEq)]
pub enum AmountError {
    #[error("Amount must not be negative")]
    Negative,

    #[error("Invalid amount '{0}'")]
    Invalid(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rpc_error_short_message_is_first_line() {
        let err = ProviderError::Rpc {
            code: 4001,
            message: "User rejected the request.\nDetails: denied".to_string(),
            data: None,
        };
        assert_eq!(err.short_message(), Some("User rejected the request."));
        assert_eq!(err.user_message(), "User rejected the request.");
    }

    #[test]
    fn test_other_errors_fall_back_to_display() {
        let err = ProviderError::Connect("refused".to_string());
        assert_eq!(err.short_message(), None);
        assert_eq!(err.user_message(), "Connection failed: refused");
    }
}
