//! App actor - message loop processing UI events and network responses

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::time::{interval_at, Instant, MissedTickBehavior};

use crate::app::state::AppState;
use crate::config::AppConfig;
use crate::messages::ui_events::InputMode;
use crate::messages::{NetworkCommand, NetworkResponse, RenderState, UiEvent};
use crate::models::PersistedConnection;
use crate::storage::ConnectionStore;

/// App actor that processes UI events and network responses
pub struct AppActor {
    state: AppState,
    config: Arc<AppConfig>,
    store: ConnectionStore,
    persisted: PersistedConnection,
    network_tx: mpsc::UnboundedSender<NetworkCommand>,
    render_tx: mpsc::UnboundedSender<RenderState>,
}

impl AppActor {
    pub fn new(
        config: Arc<AppConfig>,
        store: ConnectionStore,
        network_tx: mpsc::UnboundedSender<NetworkCommand>,
        render_tx: mpsc::UnboundedSender<RenderState>,
    ) -> Self {
        let persisted = store.load();
        AppActor {
            state: AppState::new(config.network),
            config,
            store,
            persisted,
            network_tx,
            render_tx,
        }
    }

    /// Run the actor message loop
    pub async fn run(
        mut self,
        mut ui_rx: mpsc::UnboundedReceiver<UiEvent>,
        mut net_rx: mpsc::UnboundedReceiver<NetworkResponse>,
    ) {
        // Initial reads, plus a silent reconnect if the wallet was connected last time
        let commands = self.state.refresh();
        self.send_all(commands);
        if self.persisted.connected {
            tracing::info!("Restoring wallet connection");
            if let Some(cmd) = self.state.reconnect() {
                self.send(cmd);
            }
        }
        let _ = self.render_tx.send(self.state.to_render_state());

        let period = self.config.refresh_interval;
        let mut ticker = interval_at(Instant::now() + period, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                Some(event) = ui_rx.recv() => {
                    if self.handle_ui_event(event) {
                        // Quit signal received
                        self.send(NetworkCommand::Shutdown);
                        break;
                    }
                }
                Some(response) = net_rx.recv() => {
                    let commands = self.state.handle_response(response);
                    self.send_all(commands);
                }
                _ = ticker.tick() => {
                    let commands = self.state.refresh();
                    self.send_all(commands);
                }
                else => break,
            }

            self.persist_connection();
            let _ = self.render_tx.send(self.state.to_render_state());
        }
    }

    fn send(&self, cmd: NetworkCommand) {
        let _ = self.network_tx.send(cmd);
    }

    fn send_all(&self, commands: Vec<NetworkCommand>) {
        for cmd in commands {
            self.send(cmd);
        }
    }

    /// Write the connection state to disk when it changed
    fn persist_connection(&mut self) {
        let Some(current) = self.state.persisted_connection() else {
            return;
        };
        if current == self.persisted {
            return;
        }
        match self.store.save(&current) {
            Ok(()) => self.persisted = current,
            Err(e) => tracing::warn!(error = %e, "Failed to save connection state"),
        }
    }

    /// Handle a UI event, returns true if quit was requested
    fn handle_ui_event(&mut self, event: UiEvent) -> bool {
        match event {
            // Navigation
            UiEvent::NextPanel => self.state.next_panel(),
            UiEvent::PrevPanel => self.state.prev_panel(),
            UiEvent::ScrollUp => self.state.scroll_up(),
            UiEvent::ScrollDown => self.state.scroll_down(),

            // Input editing
            UiEvent::StartEditing => self.state.start_editing(),
            UiEvent::StopEditing => self.state.stop_editing(),
            UiEvent::CharInput(c) => self.state.enter_char(c),
            UiEvent::Backspace => self.state.delete_char(),
            UiEvent::CursorLeft => self.state.move_cursor_left(),
            UiEvent::CursorRight => self.state.move_cursor_right(),

            // Contract actions
            UiEvent::Submit => {
                if self.state.input_mode == InputMode::Editing {
                    self.state.stop_editing();
                }
                if let Some(cmd) = self.state.submit() {
                    self.send(cmd);
                }
            }
            UiEvent::Refresh => {
                let commands = self.state.refresh();
                self.send_all(commands);
            }

            // Wallet
            UiEvent::Connect => {
                if let Some(cmd) = self.state.connect() {
                    self.send(cmd);
                }
            }
            UiEvent::Disconnect => self.state.disconnect(),

            // Popups
            UiEvent::DismissNotification => self.state.dismiss_notification(),
            UiEvent::ToggleHelp => self.state.toggle_help(),
            UiEvent::CloseHelp => self.state.close_help(),

            // System
            UiEvent::Quit => return true,
        }

        false
    }
}
