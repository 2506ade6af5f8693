//! Message Storage TUI - Actor-based contract front end
//!
//! Architecture:
//! - UI Layer (Ratatui) - synchronous terminal rendering
//! - App Layer - contract session state processing events
//! - Network Layer (Tokio) - async JSON-RPC calls to the node and the wallet

use std::io;
use std::sync::Arc;
use std::time::Duration;
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    prelude::*,
    widgets::*,
};
use tokio::sync::mpsc;

use message_storage_tui::app::AppActor;
use message_storage_tui::config::AppConfig;
use message_storage_tui::constants::{APP_NAME, LOG_FILE};
use message_storage_tui::contract::EvmContractClient;
use message_storage_tui::messages::ui_events::{key_to_ui_event, InputMode, KeyContext, Panel};
use message_storage_tui::messages::{NetworkCommand, NetworkResponse, RenderState, UiEvent};
use message_storage_tui::models::Connection;
use message_storage_tui::network::rpc::{create_http_client, RpcClient};
use message_storage_tui::network::NetworkActor;
use message_storage_tui::storage::ConnectionStore;
use message_storage_tui::ui::{
    chain_label, focus_style, format_timestamp, input_cursor, notification_color, render_button,
    render_input, short_address,
};

/// Terminal cleanup guard
struct TerminalGuard;

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    // Initialize logging to file
    let file_appender = tracing_appender::rolling::never(".", LOG_FILE);
    let (non_blocking, _log_guard) = tracing_appender::non_blocking(file_appender);
    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_ansi(false)
        .init();

    // Configuration problems are fatal, report them before taking over the terminal
    let config = AppConfig::from_env().map_err(|e| {
        tracing::error!(error = %e, "Invalid configuration");
        e
    })?;
    let config = Arc::new(config);
    tracing::info!(
        network = config.network.name,
        contract = %config.contract,
        wallet = %config.wallet_url,
        "Starting"
    );

    // Providers
    let http = create_http_client();
    let reads = RpcClient::new(http.clone(), config.rpc_url.clone());
    let wallet = RpcClient::new(http, config.wallet_url.clone());
    let contract = EvmContractClient::new(config.contract, reads, wallet.clone());
    let store = ConnectionStore::new(config.state_dir.clone());

    // Terminal setup
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let _guard = TerminalGuard;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create channels
    let (ui_tx, ui_rx) = mpsc::unbounded_channel::<UiEvent>();
    let (net_cmd_tx, net_cmd_rx) = mpsc::unbounded_channel::<NetworkCommand>();
    let (net_resp_tx, net_resp_rx) = mpsc::unbounded_channel::<NetworkResponse>();
    let (render_tx, mut render_rx) = mpsc::unbounded_channel::<RenderState>();

    // Spawn network actor
    let network_actor = NetworkActor::new(contract, wallet, config.network, net_resp_tx);
    tokio::spawn(network_actor.run(net_cmd_rx));

    // Spawn app actor
    let app_actor = AppActor::new(config.clone(), store, net_cmd_tx, render_tx);
    tokio::spawn(app_actor.run(ui_rx, net_resp_rx));

    // Run UI loop (synchronous with async polling)
    run_ui_loop(&mut terminal, ui_tx, &mut render_rx).await?;

    Ok(())
}

/// Run the synchronous UI rendering loop
async fn run_ui_loop(
    terminal: &mut Terminal<impl Backend>,
    ui_tx: mpsc::UnboundedSender<UiEvent>,
    render_rx: &mut mpsc::UnboundedReceiver<RenderState>,
) -> anyhow::Result<()> {
    let mut current_state = RenderState::default();

    loop {
        // Draw with current state
        terminal.draw(|f| draw_ui(f, &current_state))?;

        // Poll for events with timeout
        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                let ctx = KeyContext {
                    active_panel: current_state.active_panel,
                    input_mode: current_state.input_mode,
                    connected: current_state.is_connected(),
                    show_help: current_state.show_help,
                    show_notification: current_state.notification.is_some(),
                };
                if let Some(event) = key_to_ui_event(key, ctx) {
                    let quit = matches!(event, UiEvent::Quit);
                    let _ = ui_tx.send(event);
                    if quit {
                        break;
                    }
                }
            }
        }

        // Check for state updates (non-blocking)
        while let Ok(state) = render_rx.try_recv() {
            current_state = state;
        }
    }

    Ok(())
}

// ============================================================================
// UI Drawing Functions
// ============================================================================

fn draw_ui(f: &mut Frame, state: &RenderState) {
    let area = f.area();

    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),  // Title + wallet control
            Constraint::Min(0),     // Content
            Constraint::Length(1),  // Status bar
        ])
        .split(area);

    draw_header(f, state, main_chunks[0]);

    if state.is_connected() {
        draw_session(f, state, main_chunks[1]);
    } else {
        draw_connect_prompt(f, state, main_chunks[1]);
    }

    draw_status_bar(f, state, main_chunks[2]);

    if state.show_help {
        draw_help_popup(f, area);
    }

    if state.notification.is_some() {
        draw_notification_popup(f, state, area);
    }
}

fn draw_header(f: &mut Frame, state: &RenderState, area: Rect) {
    let wallet = match &state.connection {
        Connection::Disconnected => Span::styled(
            " [c] Connect Wallet ",
            Style::default().fg(Color::Black).bg(Color::Cyan).bold(),
        ),
        Connection::Connecting => Span::styled(
            " Connecting... ",
            Style::default().fg(Color::Yellow),
        ),
        Connection::Connected { account, chain_id } => Span::styled(
            format!(" {} | {} ", chain_label(*chain_id), short_address(account)),
            Style::default().fg(Color::Green).bold(),
        ),
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" {} ", APP_NAME))
        .title_style(Style::default().bold());

    let header = Paragraph::new(Line::from(wallet).right_aligned()).block(block);
    f.render_widget(header, area);
}

fn draw_connect_prompt(f: &mut Frame, state: &RenderState, area: Rect) {
    let mut lines = vec![
        Line::from(""),
        Line::from("Connect your wallet to interact with the contract").centered(),
        Line::from(""),
        Line::from(Span::styled(
            "Press 'c' to connect",
            Style::default().fg(Color::DarkGray),
        ))
        .centered(),
    ];

    if let Some(err) = &state.connection_error {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(err.as_str(), Style::default().fg(Color::Red))).centered());
    }

    let prompt = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL))
        .wrap(Wrap { trim: false });
    f.render_widget(prompt, area);
}

fn draw_session(f: &mut Frame, state: &RenderState, area: Rect) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 3), Constraint::Ratio(2, 3)])
        .split(area);

    draw_form(f, state, columns[0]);
    draw_messages(f, state, columns[1]);
}

fn draw_form(f: &mut Frame, state: &RenderState, area: Rect) {
    let outer = Block::default().borders(Borders::ALL).title(" Send Message ");
    let inner = outer.inner(area);
    f.render_widget(outer, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5),  // Message
            Constraint::Length(3),  // Amount
            Constraint::Length(1),  // Button
            Constraint::Min(0),
        ])
        .split(inner);

    let editing = state.input_mode == InputMode::Editing;

    let message = render_input(
        &state.draft_text,
        "Write your message here",
        " Message ",
        focus_style(state.active_panel == Panel::Message, editing),
    );
    f.render_widget(message, rows[0]);

    let amount_title = format!(" Amount ({}, min 0.01) ", state.network.currency);
    let amount = render_input(
        &state.draft_amount,
        "0.01",
        &amount_title,
        focus_style(state.active_panel == Panel::Amount, editing),
    );
    f.render_widget(amount, rows[1]);

    let label = if state.is_pending {
        String::from("Sending...")
    } else {
        format!("Send with {} {}", state.draft_amount, state.network.currency)
    };
    f.render_widget(render_button(label, state.can_submit), rows[2]);

    // Cursor
    if editing && state.active_panel.is_editable() {
        let field = if state.active_panel == Panel::Message { rows[0] } else { rows[1] };
        let input = if state.active_panel == Panel::Message {
            &state.draft_text
        } else {
            &state.draft_amount
        };
        let column = input[..state.cursor_position.min(input.len())].chars().count();
        f.set_cursor_position(input_cursor(field, column));
    }
}

fn draw_messages(f: &mut Frame, state: &RenderState, area: Rect) {
    let is_focused = state.active_panel == Panel::History;

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(focus_style(is_focused, false))
        .title(" Stored Messages ")
        .title(
            Line::from(format!(" Contract Balance: {} {} ", state.balance, state.network.currency))
                .right_aligned(),
        );

    let mut lines: Vec<Line> = Vec::new();
    for msg in &state.messages {
        lines.push(Line::from(vec![
            Span::styled(msg.sender.to_checksum(None), Style::default().bold()),
            Span::raw("  "),
            Span::styled(format_timestamp(msg.timestamp), Style::default().fg(Color::DarkGray)),
        ]));
        lines.push(Line::from(msg.text.as_str()));
        lines.push(Line::from(""));
    }

    if lines.is_empty() {
        lines.push(Line::from(Span::styled(
            "No messages yet",
            Style::default().fg(Color::DarkGray),
        )));
    }

    // Each message takes three lines
    let messages = Paragraph::new(lines)
        .block(block)
        .scroll((state.messages_scroll.saturating_mul(3), 0));
    f.render_widget(messages, area);
}

fn draw_status_bar(f: &mut Frame, state: &RenderState, area: Rect) {
    let status = if state.is_pending {
        " Waiting for the transaction to be included... "
    } else if state.input_mode == InputMode::Editing {
        " ESC:stop editing | arrows:move | Tab:next field | Enter:done "
    } else if state.is_connected() {
        " Tab:focus | e:edit | s:send | r:refresh | d:disconnect | ?:help | q:quit "
    } else {
        " c:connect | r:refresh | ?:help | q:quit "
    };

    let bar = Paragraph::new(status)
        .style(Style::default().fg(Color::DarkGray));
    f.render_widget(bar, area);
}

fn draw_help_popup(f: &mut Frame, area: Rect) {
    let popup_area = centered_rect(60, 60, area);

    let help_text = r#"
 MESSAGE STORAGE - Keyboard Shortcuts

 WALLET
   c                  Connect wallet
   d                  Disconnect

 FORM
   Tab / Shift+Tab    Switch between message, amount, history
   e / Enter          Edit focused field
   s                  Send message with the amount attached
   Enter (amount)     Send while editing the amount

 MESSAGES
   ↑ / ↓              Scroll stored messages
   r                  Refresh contract data

 GENERAL
   ?                  Toggle this help
   q / Ctrl+C         Quit

 Press any key to close...
"#;

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Help ")
        .style(Style::default().bg(Color::Black));

    let help = Paragraph::new(help_text)
        .block(block)
        .wrap(Wrap { trim: false });

    f.render_widget(Clear, popup_area);
    f.render_widget(help, popup_area);
}

fn draw_notification_popup(f: &mut Frame, state: &RenderState, area: Rect) {
    let Some(notification) = &state.notification else {
        return;
    };
    let popup_area = centered_rect(50, 25, area);
    let color = notification_color(notification.kind);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color))
        .title(" Notice (Enter to close) ")
        .style(Style::default().bg(Color::Black));

    let body = Paragraph::new(notification.text.as_str())
        .block(block)
        .style(Style::default().fg(color))
        .wrap(Wrap { trim: false });

    f.render_widget(Clear, popup_area);
    f.render_widget(body, popup_area);
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
