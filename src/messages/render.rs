//! Render state - data structure sent from App layer to UI for rendering

use crate::config::{Network, NETWORKS};
use crate::constants::DEFAULT_AMOUNT;
use crate::messages::ui_events::{InputMode, Panel};
use crate::models::{Connection, Message, Notification};

/// Complete state needed by the UI to render
#[derive(Debug, Clone)]
pub struct RenderState {
    pub network: Network,
    pub connection: Connection,
    pub connection_error: Option<String>,

    // Draft
    pub draft_text: String,
    pub draft_amount: String,

    // UI state
    pub active_panel: Panel,
    pub input_mode: InputMode,
    pub cursor_position: usize,

    // Snapshot
    pub messages: Vec<Message>,
    pub balance: String,
    pub messages_scroll: u16,

    // Submission
    pub is_pending: bool,
    pub can_submit: bool,

    // Popups
    pub notification: Option<Notification>,
    pub show_help: bool,
}

impl RenderState {
    pub fn is_connected(&self) -> bool {
        self.connection.is_connected()
    }
}

impl Default for RenderState {
    fn default() -> Self {
        RenderState {
            network: NETWORKS[0],
            connection: Connection::Disconnected,
            connection_error: None,
            draft_text: String::new(),
            draft_amount: String::from(DEFAULT_AMOUNT),
            active_panel: Panel::Message,
            input_mode: InputMode::Normal,
            cursor_position: 0,
            messages: Vec::new(),
            balance: String::from("0"),
            messages_scroll: 0,
            is_pending: false,
            can_submit: false,
            notification: None,
            show_help: false,
        }
    }
}
