use alloy_primitives::{Address, U256};
use chrono::{Local, TimeZone};
use ratatui::{prelude::*, widgets::*};

use crate::config::Network;
use crate::models::NotificationKind;

/// Border style for a focusable block
pub fn focus_style(is_focused: bool, is_editing: bool) -> Style {
    if is_focused && is_editing {
        Style::default().fg(Color::Yellow)
    } else if is_focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    }
}

/// Renders a single-field input block
pub fn render_input<'a>(
    content: &'a str,
    placeholder: &'a str,
    title: &'a str,
    border_style: Style,
) -> Paragraph<'a> {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(title);

    let text = if content.is_empty() {
        Line::from(Span::styled(placeholder, Style::default().fg(Color::DarkGray)))
    } else {
        Line::from(content)
    };

    Paragraph::new(text).block(block).wrap(Wrap { trim: false })
}

/// Renders the send button
pub fn render_button<'a>(label: String, enabled: bool) -> Paragraph<'a> {
    let style = if enabled {
        Style::default().fg(Color::White).bg(Color::Indexed(55)).bold()
    } else {
        Style::default().fg(Color::Gray).bg(Color::DarkGray)
    };

    Paragraph::new(Line::from(label).centered())
        .style(style)
        .block(Block::default().borders(Borders::NONE))
}

/// `0x1234…cdef` form used by the wallet control
pub fn short_address(address: &Address) -> String {
    let full = address.to_checksum(None);
    format!("{}…{}", &full[..6], &full[full.len() - 4..])
}

/// Label for the chain a wallet reports
pub fn chain_label(chain_id: u64) -> String {
    match Network::by_chain_id(chain_id) {
        Some(network) => network.label.to_string(),
        None => format!("Chain {}", chain_id),
    }
}

/// Cursor cell for `column` characters into a wrapped, bordered input
pub fn input_cursor(field: Rect, column: usize) -> Position {
    let width = field.width.saturating_sub(2).max(1) as usize;
    let last_row = field.height.saturating_sub(3);
    let row = (column / width).min(last_row as usize) as u16;
    Position::new(
        field.x.saturating_add(1).saturating_add((column % width) as u16),
        field.y.saturating_add(1).saturating_add(row),
    )
}

/// Format a contract timestamp in the local timezone
pub fn format_timestamp(timestamp: U256) -> String {
    format_timestamp_in(timestamp, &Local)
}

/// Format a contract timestamp in `tz`; out-of-range values are shown raw
pub fn format_timestamp_in<Tz>(timestamp: U256, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    let secs = match i64::try_from(timestamp) {
        Ok(secs) => secs,
        Err(_) => return timestamp.to_string(),
    };

    match tz.timestamp_opt(secs, 0).single() {
        Some(dt) => dt.format("%Y-%m-%d %H:%M:%S").to_string(),
        None => timestamp.to_string(),
    }
}

pub fn notification_color(kind: NotificationKind) -> Color {
    match kind {
        NotificationKind::Success => Color::Green,
        NotificationKind::Error => Color::Red,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_chain_label() {
        assert_eq!(chain_label(11_155_111), "Sepolia");
        assert_eq!(chain_label(1), "Ethereum");
        assert_eq!(chain_label(137), "Chain 137");
    }

    #[test]
    fn test_input_cursor_wraps_and_clamps() {
        let field = Rect::new(4, 10, 12, 5);
        assert_eq!(input_cursor(field, 0), Position::new(5, 11));
        assert_eq!(input_cursor(field, 11), Position::new(6, 12));
        // Past the last inner row the cursor stays on it
        assert_eq!(input_cursor(field, 500).y, 13);

        // A one-column field with a huge input does not overflow
        let narrow = Rect::new(0, u16::MAX - 3, 3, 3);
        let pos = input_cursor(narrow, usize::MAX / 2);
        assert_eq!(pos, Position::new(1, u16::MAX - 2));
    }

    #[test]
    fn test_format_timestamp() {
        assert_eq!(format_timestamp_in(U256::from(1000u64), &Utc), "1970-01-01 00:16:40");
        assert_eq!(format_timestamp_in(U256::MAX, &Utc), U256::MAX.to_string());
    }

    #[test]
    fn test_short_address() {
        let address = Address::repeat_byte(0xab);
        let short = short_address(&address);
        assert!(short.starts_with("0x"));
        assert!(short.contains('…'));
        assert_eq!(short.chars().count(), 11);
    }
}
