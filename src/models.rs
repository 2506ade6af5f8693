use alloy_primitives::{utils::parse_ether, Address, U256};
use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_AMOUNT;
use crate::error::AmountError;

/// A message stored in the contract
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Message {
    pub sender: Address,
    pub text: String,
    /// Seconds since the Unix epoch
    pub timestamp: U256,
}

/// Uncommitted form input
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Draft {
    pub text: String,
    /// Decimal string in ETH
    pub amount: String,
}

impl Default for Draft {
    fn default() -> Self {
        Draft {
            text: String::new(),
            amount: String::from(DEFAULT_AMOUNT),
        }
    }
}

impl Draft {
    /// Both fields must be filled before anything is sent
    pub fn is_complete(&self) -> bool {
        !self.text.is_empty() && !self.amount.is_empty()
    }
}

/// Locally cached contract state. Each field is replaced by its own read.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ContractSnapshot {
    pub messages: Vec<Message>,
    /// Held balance in wei
    pub balance: Option<U256>,
    /// Fetched but not displayed anywhere
    pub owner: Option<Address>,
}

impl ContractSnapshot {
    /// Balance as shown in the UI: the raw wei integer, not scaled
    pub fn balance_display(&self) -> String {
        self.balance
            .map(|b| b.to_string())
            .unwrap_or_else(|| String::from("0"))
    }
}

/// Wallet connection status
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Connection {
    #[default]
    Disconnected,
    Connecting,
    Connected { account: Address, chain_id: u64 },
}

impl Connection {
    pub fn account(&self) -> Option<Address> {
        match self {
            Connection::Connected { account, .. } => Some(*account),
            _ => None,
        }
    }

    pub fn is_connected(&self) -> bool {
        matches!(self, Connection::Connected { .. })
    }
}

/// Lifecycle of the single in-flight `pay` call
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SubmissionState {
    #[default]
    Idle,
    Pending { id: u64 },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
}

/// Blocking popup shown until the user dismisses it
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notification {
    pub kind: NotificationKind,
    pub text: String,
}

impl Notification {
    pub fn success(text: impl Into<String>) -> Self {
        Notification {
            kind: NotificationKind::Success,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Notification {
            kind: NotificationKind::Error,
            text: text.into(),
        }
    }
}

/// The three contract reads
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ReadQuery {
    Messages,
    Balance,
    Owner,
}

impl ReadQuery {
    pub const ALL: [ReadQuery; 3] = [ReadQuery::Messages, ReadQuery::Balance, ReadQuery::Owner];

    pub fn as_str(&self) -> &'static str {
        match self {
            ReadQuery::Messages => "getAllMessages",
            ReadQuery::Balance => "getBalance",
            ReadQuery::Owner => "owner",
        }
    }
}

/// Connection state kept between runs
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistedConnection {
    pub connected: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account: Option<Address>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chain_id: Option<u64>,
}

impl From<&Connection> for PersistedConnection {
    fn from(conn: &Connection) -> Self {
        match conn {
            Connection::Connected { account, chain_id } => PersistedConnection {
                connected: true,
                account: Some(*account),
                chain_id: Some(*chain_id),
            },
            _ => PersistedConnection::default(),
        }
    }
}

/// Convert an ETH decimal string to wei
pub fn parse_amount(amount: &str) -> Result<U256, AmountError> {
    let trimmed = amount.trim();
    if trimmed.starts_with('-') {
        return Err(AmountError::Negative);
    }
    parse_ether(trimmed).map_err(|_| AmountError::Invalid(amount.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_amount_to_wei() {
        assert_eq!(parse_amount("0.01").unwrap(), U256::from(10_000_000_000_000_000u64));
        assert_eq!(parse_amount("1").unwrap(), U256::from(1_000_000_000_000_000_000u64));
        assert_eq!(parse_amount("0").unwrap(), U256::ZERO);
    }

    #[test]
    fn test_parse_amount_rejects_garbage() {
        assert_eq!(parse_amount("-1"), Err(AmountError::Negative));
        assert!(matches!(parse_amount("abc"), Err(AmountError::Invalid(_))));
        assert!(matches!(parse_amount("1.2.3"), Err(AmountError::Invalid(_))));
    }

    #[test]
    fn test_balance_display_is_raw_wei() {
        let snapshot = ContractSnapshot {
            balance: Some(U256::from(1_500_000_000_000_000u64)),
            ..Default::default()
        };
        assert_eq!(snapshot.balance_display(), "1500000000000000");
        assert_eq!(ContractSnapshot::default().balance_display(), "0");
    }

    #[test]
    fn test_draft_defaults() {
        let draft = Draft::default();
        assert_eq!(draft.text, "");
        assert_eq!(draft.amount, "0.01");
        assert!(!draft.is_complete());
    }

    #[test]
    fn test_persisted_connection_from_state() {
        let account = Address::repeat_byte(0x11);
        let persisted = PersistedConnection::from(&Connection::Connected { account, chain_id: 1 });
        assert!(persisted.connected);
        assert_eq!(persisted.account, Some(account));

        let persisted = PersistedConnection::from(&Connection::Connecting);
        assert_eq!(persisted, PersistedConnection::default());
    }
}
