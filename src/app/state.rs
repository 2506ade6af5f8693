//! App state - pure data structure with no I/O logic

use std::collections::HashMap;

use crate::config::Network;
use crate::messages::ui_events::{InputMode, Panel};
use crate::messages::RenderState;
use crate::models::{
    Connection, ContractSnapshot, Draft, Notification, PersistedConnection, ReadQuery,
    SubmissionState,
};

/// Contract session state: draft, snapshot, connection and the in-flight submission
pub struct AppState {
    pub network: Network,

    // Wallet
    pub connection: Connection,
    pub connection_error: Option<String>,
    pub(crate) pending_connect: Option<(u64, bool)>,

    // Form input
    pub draft: Draft,
    pub cursor_position: usize,

    // Contract data
    pub snapshot: ContractSnapshot,
    pub(crate) pending_reads: HashMap<ReadQuery, u64>,

    // Write
    pub submission: SubmissionState,

    // UI state
    pub active_panel: Panel,
    pub input_mode: InputMode,
    pub messages_scroll: u16,

    // Popups
    pub notification: Option<Notification>,
    pub show_help: bool,

    next_request_id: u64,
}

impl AppState {
    pub fn new(network: Network) -> Self {
        AppState {
            network,
            connection: Connection::Disconnected,
            connection_error: None,
            pending_connect: None,
            draft: Draft::default(),
            cursor_position: 0,
            snapshot: ContractSnapshot::default(),
            pending_reads: HashMap::new(),
            submission: SubmissionState::Idle,
            active_panel: Panel::Message,
            input_mode: InputMode::Normal,
            messages_scroll: 0,
            notification: None,
            show_help: false,
            next_request_id: 1,
        }
    }

    /// Generate a unique request ID
    pub fn next_id(&mut self) -> u64 {
        let id = self.next_request_id;
        self.next_request_id += 1;
        id
    }

    pub fn is_pending(&self) -> bool {
        matches!(self.submission, SubmissionState::Pending { .. })
    }

    /// Whether the send control is live
    pub fn can_submit(&self) -> bool {
        self.connection.is_connected() && !self.is_pending() && self.draft.is_complete()
    }

    /// Get the current input field content
    pub fn current_input(&self) -> &str {
        match self.active_panel {
            Panel::Message => &self.draft.text,
            Panel::Amount => &self.draft.amount,
            Panel::History => "",
        }
    }

    /// Get mutable reference to current input field
    pub fn current_input_mut(&mut self) -> Option<&mut String> {
        match self.active_panel {
            Panel::Message => Some(&mut self.draft.text),
            Panel::Amount => Some(&mut self.draft.amount),
            Panel::History => None,
        }
    }

    /// Connection state worth saving; `None` while a connect is in flight
    pub fn persisted_connection(&self) -> Option<PersistedConnection> {
        match self.connection {
            Connection::Connecting => None,
            ref conn => Some(PersistedConnection::from(conn)),
        }
    }

    /// Convert state to RenderState for UI
    pub fn to_render_state(&self) -> RenderState {
        RenderState {
            network: self.network,
            connection: self.connection.clone(),
            connection_error: self.connection_error.clone(),
            draft_text: self.draft.text.clone(),
            draft_amount: self.draft.amount.clone(),
            active_panel: self.active_panel,
            input_mode: self.input_mode,
            cursor_position: self.cursor_position,
            messages: self.snapshot.messages.clone(),
            balance: self.snapshot.balance_display(),
            messages_scroll: self.messages_scroll,
            is_pending: self.is_pending(),
            can_submit: self.can_submit(),
            notification: self.notification.clone(),
            show_help: self.show_help,
        }
    }
}
