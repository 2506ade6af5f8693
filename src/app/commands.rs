//! Command handlers - business logic for processing UI events and network responses

use crate::app::AppState;
use crate::constants::DEFAULT_AMOUNT;
use crate::messages::ui_events::{InputMode, Panel};
use crate::messages::{NetworkCommand, NetworkResponse};
use crate::models::{parse_amount, Connection, Notification, ReadQuery, SubmissionState};

impl AppState {
    // ========================
    // Navigation
    // ========================

    pub fn next_panel(&mut self) {
        self.stop_editing();
        self.active_panel = self.active_panel.next();
    }

    pub fn prev_panel(&mut self) {
        self.stop_editing();
        self.active_panel = self.active_panel.prev();
    }

    pub fn scroll_up(&mut self) {
        self.messages_scroll = self.messages_scroll.saturating_sub(1);
    }

    pub fn scroll_down(&mut self) {
        let max = self.snapshot.messages.len().saturating_sub(1) as u16;
        self.messages_scroll = self.messages_scroll.saturating_add(1).min(max);
    }

    // ========================
    // Input editing
    // ========================

    pub fn start_editing(&mut self) {
        if self.connection.is_connected() && self.active_panel.is_editable() {
            self.input_mode = InputMode::Editing;
            self.cursor_position = self.current_input().len();
        }
    }

    pub fn stop_editing(&mut self) {
        self.input_mode = InputMode::Normal;
    }

    pub fn move_cursor_left(&mut self) {
        let input = self.current_input();
        if self.cursor_position > 0 {
            let new_pos = input[..self.cursor_position]
                .char_indices()
                .last()
                .map(|(i, _)| i)
                .unwrap_or(0);
            self.cursor_position = new_pos;
        }
    }

    pub fn move_cursor_right(&mut self) {
        let input = self.current_input();
        if self.cursor_position < input.len() {
            let new_pos = input[self.cursor_position..]
                .char_indices()
                .nth(1)
                .map(|(i, _)| self.cursor_position + i)
                .unwrap_or(input.len());
            self.cursor_position = new_pos;
        }
    }

    pub fn enter_char(&mut self, c: char) {
        // Same characters a numeric <input> lets through
        if self.active_panel == Panel::Amount && !(c.is_ascii_digit() || c == '.') {
            return;
        }
        let cursor_pos = self.cursor_position;
        if let Some(input) = self.current_input_mut() {
            if cursor_pos <= input.len() {
                input.insert(cursor_pos, c);
                self.cursor_position = cursor_pos + c.len_utf8();
            }
        }
    }

    pub fn delete_char(&mut self) {
        let cursor_pos = self.cursor_position;
        if cursor_pos == 0 {
            return;
        }
        if let Some(input) = self.current_input_mut() {
            let prev_pos = input[..cursor_pos]
                .char_indices()
                .last()
                .map(|(i, _)| i)
                .unwrap_or(0);
            input.remove(prev_pos);
            self.cursor_position = prev_pos;
        }
    }

    fn clamp_cursor(&mut self) {
        self.cursor_position = self.cursor_position.min(self.current_input().len());
    }

    // ========================
    // Draft
    // ========================

    pub fn update_draft_text(&mut self, text: impl Into<String>) {
        self.draft.text = text.into();
        self.clamp_cursor();
    }

    pub fn update_draft_amount(&mut self, amount: impl Into<String>) {
        self.draft.amount = amount.into();
        self.clamp_cursor();
    }

    // ========================
    // Wallet
    // ========================

    /// User-initiated connect; the wallet may prompt
    pub fn connect(&mut self) -> Option<NetworkCommand> {
        self.begin_connect(true)
    }

    /// Silent reconnect from persisted state
    pub fn reconnect(&mut self) -> Option<NetworkCommand> {
        self.begin_connect(false)
    }

    fn begin_connect(&mut self, prompt: bool) -> Option<NetworkCommand> {
        if !matches!(self.connection, Connection::Disconnected) {
            return None;
        }
        let id = self.next_id();
        self.connection = Connection::Connecting;
        self.connection_error = None;
        self.pending_connect = Some((id, prompt));
        Some(NetworkCommand::Connect { id, prompt })
    }

    /// Forget the wallet locally. The snapshot stays in memory.
    pub fn disconnect(&mut self) {
        if self.connection.is_connected() {
            tracing::info!("Wallet disconnected");
        }
        self.connection = Connection::Disconnected;
        self.pending_connect = None;
        self.connection_error = None;
        self.input_mode = InputMode::Normal;
    }

    // ========================
    // Reads
    // ========================

    /// Issue every read that is not already in flight
    pub fn refresh(&mut self) -> Vec<NetworkCommand> {
        let mut commands = Vec::new();
        for query in ReadQuery::ALL {
            if self.pending_reads.contains_key(&query) {
                continue;
            }
            let id = self.next_id();
            self.pending_reads.insert(query, id);
            commands.push(NetworkCommand::Read { id, query });
        }
        commands
    }

    // ========================
    // Submission
    // ========================

    /// Build the `pay` command for the current draft.
    /// Returns `None` when there is nothing to send or a send is in flight.
    pub fn submit(&mut self) -> Option<NetworkCommand> {
        if !self.draft.is_complete() || self.is_pending() {
            return None;
        }
        let from = self.connection.account()?;

        let value = match parse_amount(&self.draft.amount) {
            Ok(value) => value,
            Err(e) => {
                tracing::error!(amount = %self.draft.amount, error = %e, "Transaction failed");
                self.notification = Some(Notification::error(format!("Error: {}", e)));
                return None;
            }
        };

        let id = self.next_id();
        self.submission = SubmissionState::Pending { id };
        tracing::info!(id, %from, %value, "Sending message");

        Some(NetworkCommand::Pay {
            id,
            from,
            text: self.draft.text.clone(),
            value,
        })
    }

    // ========================
    // Network responses
    // ========================

    /// Apply a response; returns follow-up commands
    pub fn handle_response(&mut self, response: NetworkResponse) -> Vec<NetworkCommand> {
        if let Some(query) = response.read_query() {
            if self.pending_reads.get(&query) != Some(&response.id()) {
                tracing::debug!(id = response.id(), query = query.as_str(), "Ignoring stale read");
                return Vec::new();
            }
            self.pending_reads.remove(&query);
        }

        match response {
            NetworkResponse::MessagesLoaded { messages, .. } => {
                self.snapshot.messages = messages;
                let max = self.snapshot.messages.len().saturating_sub(1) as u16;
                self.messages_scroll = self.messages_scroll.min(max);
            }
            NetworkResponse::BalanceLoaded { balance, .. } => {
                self.snapshot.balance = Some(balance);
            }
            NetworkResponse::OwnerLoaded { owner, .. } => {
                self.snapshot.owner = Some(owner);
            }
            NetworkResponse::ReadFailed { query, message, .. } => {
                tracing::warn!(query = query.as_str(), error = %message, "Read failed, keeping previous value");
            }

            NetworkResponse::Connected { id, account, chain_id } => {
                if self.pending_connect.map(|(pending, _)| pending) == Some(id) {
                    self.pending_connect = None;
                    self.connection = Connection::Connected { account, chain_id };
                    tracing::info!(%account, chain_id, "Wallet connected");
                }
            }
            NetworkResponse::ConnectFailed { id, message } => {
                if let Some((pending, prompt)) = self.pending_connect {
                    if pending == id {
                        self.pending_connect = None;
                        self.connection = Connection::Disconnected;
                        tracing::warn!(error = %message, prompt, "Wallet connection failed");
                        if prompt {
                            self.connection_error = Some(message);
                        }
                    }
                }
            }

            NetworkResponse::PaymentConfirmed { id, tx_hash } => {
                if self.submission == (SubmissionState::Pending { id }) {
                    self.submission = SubmissionState::Idle;
                    self.draft.text.clear();
                    self.draft.amount = String::from(DEFAULT_AMOUNT);
                    self.clamp_cursor();
                    self.notification = Some(Notification::success("Message sent successfully!"));
                    tracing::info!(id, %tx_hash, "Message sent");
                    // Reads already in flight may predate inclusion; their replies become stale
                    self.pending_reads.clear();
                    return self.refresh();
                }
            }
            NetworkResponse::PaymentFailed { id, message } => {
                if self.submission == (SubmissionState::Pending { id }) {
                    self.submission = SubmissionState::Idle;
                    tracing::error!(id, error = %message, "Transaction failed");
                    self.notification = Some(Notification::error(format!("Error: {}", message)));
                }
            }
        }

        Vec::new()
    }

    // ========================
    // Popups
    // ========================

    pub fn dismiss_notification(&mut self) {
        self.notification = None;
    }

    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    pub fn close_help(&mut self) {
        self.show_help = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SEPOLIA;
    use crate::models::{Message, NotificationKind};
    use alloy_primitives::{Address, B256, U256};

    fn account() -> Address {
        Address::repeat_byte(0x11)
    }

    fn connected_state() -> AppState {
        let mut state = AppState::new(SEPOLIA);
        state.connection = Connection::Connected {
            account: account(),
            chain_id: SEPOLIA.chain_id,
        };
        state
    }

    fn pay_id(cmd: Option<NetworkCommand>) -> u64 {
        match cmd {
            Some(NetworkCommand::Pay { id, .. }) => id,
            other => panic!("expected Pay, got {:?}", other),
        }
    }

    #[test]
    fn test_submit_issues_single_pay() {
        let mut state = connected_state();
        state.update_draft_text("hello");
        state.update_draft_amount("0.05");

        match state.submit() {
            Some(NetworkCommand::Pay { from, text, value, .. }) => {
                assert_eq!(from, account());
                assert_eq!(text, "hello");
                assert_eq!(value, U256::from(50_000_000_000_000_000u64));
            }
            other => panic!("expected Pay, got {:?}", other),
        }
        assert!(state.is_pending());
    }

    #[test]
    fn test_submit_with_empty_fields_is_noop() {
        let mut state = connected_state();
        assert!(state.submit().is_none());

        state.update_draft_text("hello");
        state.update_draft_amount("");
        assert!(state.submit().is_none());
        assert_eq!(state.submission, SubmissionState::Idle);
        assert!(state.notification.is_none());
    }

    #[test]
    fn test_submit_requires_wallet() {
        let mut state = AppState::new(SEPOLIA);
        state.update_draft_text("hello");
        assert!(state.submit().is_none());
    }

    #[test]
    fn test_only_one_submission_in_flight() {
        let mut state = connected_state();
        state.update_draft_text("hello");
        assert!(state.submit().is_some());
        assert!(state.submit().is_none());
        assert!(!state.can_submit());
    }

    #[test]
    fn test_success_clears_draft() {
        let mut state = connected_state();
        state.update_draft_text("hello");
        state.update_draft_amount("0.5");
        let id = pay_id(state.submit());

        let follow_up = state.handle_response(NetworkResponse::PaymentConfirmed {
            id,
            tx_hash: B256::ZERO,
        });

        assert_eq!(state.draft.text, "");
        assert_eq!(state.draft.amount, "0.01");
        assert_eq!(state.submission, SubmissionState::Idle);
        assert_eq!(
            state.notification,
            Some(Notification::success("Message sent successfully!"))
        );
        // Reads are re-issued after a confirmed write
        assert_eq!(follow_up.len(), 3);
    }

    #[test]
    fn test_confirmation_supersedes_reads_in_flight() {
        let mut state = connected_state();
        let before = state.refresh();
        assert_eq!(before.len(), 3);
        let old_messages_id = match before[0] {
            NetworkCommand::Read { id, query: ReadQuery::Messages } => id,
            ref other => panic!("expected messages read, got {:?}", other),
        };

        state.update_draft_text("hello");
        let id = pay_id(state.submit());
        let follow_up = state.handle_response(NetworkResponse::PaymentConfirmed {
            id,
            tx_hash: B256::ZERO,
        });
        assert_eq!(follow_up.len(), 3);
        assert!(follow_up
            .iter()
            .all(|cmd| matches!(cmd, NetworkCommand::Read { id, .. } if *id > old_messages_id)));

        // The reply to the earlier read is dropped
        state.handle_response(NetworkResponse::MessagesLoaded {
            id: old_messages_id,
            messages: vec![Message {
                sender: account(),
                text: "old".to_string(),
                timestamp: U256::from(1u64),
            }],
        });
        assert!(state.snapshot.messages.is_empty());
        assert_eq!(state.pending_reads.len(), 3);
    }

    #[test]
    fn test_failure_keeps_draft() {
        let mut state = connected_state();
        state.update_draft_text("hello");
        state.update_draft_amount("0.5");
        let id = pay_id(state.submit());

        state.handle_response(NetworkResponse::PaymentFailed {
            id,
            message: "User rejected the request.".to_string(),
        });

        assert_eq!(state.draft.text, "hello");
        assert_eq!(state.draft.amount, "0.5");
        assert_eq!(state.submission, SubmissionState::Idle);
        let note = state.notification.clone().unwrap();
        assert_eq!(note.kind, NotificationKind::Error);
        assert_eq!(note.text, "Error: User rejected the request.");
        // Retry without retyping
        assert!(state.submit().is_some());
    }

    #[test]
    fn test_invalid_amount_reports_error_without_write() {
        let mut state = connected_state();
        state.update_draft_text("hello");
        state.update_draft_amount("1.2.3");

        assert!(state.submit().is_none());
        assert_eq!(state.submission, SubmissionState::Idle);
        assert_eq!(state.draft.amount, "1.2.3");
        assert_eq!(state.notification.unwrap().kind, NotificationKind::Error);
    }

    #[test]
    fn test_pending_submission_does_not_touch_snapshot() {
        let mut state = connected_state();
        state.update_draft_text("hello");
        let id = pay_id(state.submit());
        let before = state.snapshot.clone();

        state.handle_response(NetworkResponse::PaymentFailed {
            id,
            message: "reverted".to_string(),
        });
        assert_eq!(state.snapshot, before);
    }

    #[test]
    fn test_messages_replaced_field_for_field() {
        let mut state = AppState::new(SEPOLIA);
        let commands = state.refresh();
        let id = commands
            .iter()
            .find_map(|c| match c {
                NetworkCommand::Read { id, query: ReadQuery::Messages } => Some(*id),
                _ => None,
            })
            .unwrap();

        let message = Message {
            sender: Address::repeat_byte(0xaa),
            text: "hi".to_string(),
            timestamp: U256::from(1000u64),
        };
        state.handle_response(NetworkResponse::MessagesLoaded {
            id,
            messages: vec![message.clone()],
        });

        assert_eq!(state.snapshot.messages, vec![message]);
        // Balance untouched until its own read resolves
        assert_eq!(state.snapshot.balance, None);
    }

    #[test]
    fn test_balance_shown_unscaled() {
        let mut state = AppState::new(SEPOLIA);
        let id = state
            .refresh()
            .iter()
            .find_map(|c| match c {
                NetworkCommand::Read { id, query: ReadQuery::Balance } => Some(*id),
                _ => None,
            })
            .unwrap();
        state.handle_response(NetworkResponse::BalanceLoaded {
            id,
            balance: U256::from(1_500_000_000_000_000u64),
        });
        assert_eq!(state.to_render_state().balance, "1500000000000000");
    }

    #[test]
    fn test_reads_not_duplicated_while_in_flight() {
        let mut state = AppState::new(SEPOLIA);
        assert_eq!(state.refresh().len(), 3);
        assert!(state.refresh().is_empty());
    }

    #[test]
    fn test_failed_read_keeps_stale_value() {
        let mut state = AppState::new(SEPOLIA);
        state.snapshot.balance = Some(U256::from(7u64));
        let id = state
            .refresh()
            .iter()
            .find_map(|c| match c {
                NetworkCommand::Read { id, query: ReadQuery::Balance } => Some(*id),
                _ => None,
            })
            .unwrap();

        state.handle_response(NetworkResponse::ReadFailed {
            id,
            query: ReadQuery::Balance,
            message: "timeout".to_string(),
        });
        assert_eq!(state.snapshot.balance, Some(U256::from(7u64)));
        // The read can be issued again
        assert_eq!(state.refresh().len(), 1);
    }

    #[test]
    fn test_stale_read_ignored() {
        let mut state = AppState::new(SEPOLIA);
        state.handle_response(NetworkResponse::BalanceLoaded {
            id: 999,
            balance: U256::from(1u64),
        });
        assert_eq!(state.snapshot.balance, None);
    }

    #[test]
    fn test_disconnect_keeps_snapshot() {
        let mut state = connected_state();
        state.snapshot.messages.push(Message {
            sender: Address::ZERO,
            text: "kept".to_string(),
            timestamp: U256::from(1u64),
        });

        state.disconnect();

        assert!(!state.to_render_state().is_connected());
        assert_eq!(state.snapshot.messages.len(), 1);
    }

    #[test]
    fn test_connect_flow() {
        let mut state = AppState::new(SEPOLIA);
        let id = match state.connect() {
            Some(NetworkCommand::Connect { id, prompt: true }) => id,
            other => panic!("expected Connect, got {:?}", other),
        };
        assert_eq!(state.connection, Connection::Connecting);
        assert!(state.persisted_connection().is_none());
        assert!(state.connect().is_none());

        state.handle_response(NetworkResponse::Connected {
            id,
            account: account(),
            chain_id: SEPOLIA.chain_id,
        });
        assert_eq!(state.connection.account(), Some(account()));
        assert!(state.persisted_connection().unwrap().connected);
    }

    #[test]
    fn test_connect_failure_shown_only_when_prompted() {
        let mut state = AppState::new(SEPOLIA);
        let id = match state.reconnect() {
            Some(NetworkCommand::Connect { id, prompt: false }) => id,
            other => panic!("expected Connect, got {:?}", other),
        };
        state.handle_response(NetworkResponse::ConnectFailed {
            id,
            message: "Wallet returned no accounts".to_string(),
        });
        assert_eq!(state.connection, Connection::Disconnected);
        assert!(state.connection_error.is_none());

        let id = match state.connect() {
            Some(NetworkCommand::Connect { id, .. }) => id,
            other => panic!("expected Connect, got {:?}", other),
        };
        state.handle_response(NetworkResponse::ConnectFailed {
            id,
            message: "Wallet returned no accounts".to_string(),
        });
        assert_eq!(
            state.connection_error.as_deref(),
            Some("Wallet returned no accounts")
        );
    }

    #[test]
    fn test_amount_field_accepts_numeric_chars_only() {
        let mut state = connected_state();
        state.active_panel = Panel::Amount;
        state.start_editing();
        state.enter_char('x');
        state.enter_char('5');
        assert_eq!(state.draft.amount, "0.015");

        state.delete_char();
        state.delete_char();
        assert_eq!(state.draft.amount, "0.0");
    }

    #[test]
    fn test_editing_inserts_at_cursor() {
        let mut state = connected_state();
        state.start_editing();
        for c in "hllo".chars() {
            state.enter_char(c);
        }
        state.move_cursor_left();
        state.move_cursor_left();
        state.move_cursor_left();
        state.enter_char('e');
        assert_eq!(state.draft.text, "hello");
    }

    #[test]
    fn test_editing_during_pending_allowed() {
        let mut state = connected_state();
        state.update_draft_text("hello");
        let _ = state.submit();
        state.start_editing();
        state.enter_char('!');
        assert_eq!(state.draft.text, "hello!");
    }
}
