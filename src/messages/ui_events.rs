//! UI events - messages from UI layer to App layer

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Events generated from user input in the UI layer
#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    // Focus navigation
    NextPanel,
    PrevPanel,
    ScrollUp,
    ScrollDown,

    // Input editing
    StartEditing,
    StopEditing,
    CharInput(char),
    Backspace,
    CursorLeft,
    CursorRight,

    // Contract actions
    Submit,
    Refresh,

    // Wallet
    Connect,
    Disconnect,

    // Popups
    DismissNotification,
    ToggleHelp,
    CloseHelp,

    // System
    Quit,
}

/// Focusable area of the page
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum Panel {
    Message,
    Amount,
    History,
}

impl Panel {
    pub fn next(&self) -> Panel {
        match self {
            Panel::Message => Panel::Amount,
            Panel::Amount => Panel::History,
            Panel::History => Panel::Message,
        }
    }

    pub fn prev(&self) -> Panel {
        match self {
            Panel::Message => Panel::History,
            Panel::Amount => Panel::Message,
            Panel::History => Panel::Amount,
        }
    }

    pub fn is_editable(&self) -> bool {
        matches!(self, Panel::Message | Panel::Amount)
    }
}

/// Input mode
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum InputMode {
    Normal,
    Editing,
}

/// What the key mapper needs to know about the current screen
#[derive(Clone, Copy, Debug)]
pub struct KeyContext {
    pub active_panel: Panel,
    pub input_mode: InputMode,
    pub connected: bool,
    pub show_help: bool,
    pub show_notification: bool,
}

/// Convert a key event to a UiEvent based on current UI context
pub fn key_to_ui_event(key: KeyEvent, ctx: KeyContext) -> Option<UiEvent> {
    if key.kind != KeyEventKind::Press {
        return None;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(UiEvent::Quit);
    }

    // Notifications block everything until acknowledged
    if ctx.show_notification {
        return match key.code {
            KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ') => Some(UiEvent::DismissNotification),
            _ => None,
        };
    }

    if ctx.show_help {
        return Some(UiEvent::CloseHelp);
    }

    match ctx.input_mode {
        InputMode::Normal => handle_normal_keys(key, ctx),
        InputMode::Editing => handle_editing_keys(key, ctx.active_panel),
    }
}

fn handle_normal_keys(key: KeyEvent, ctx: KeyContext) -> Option<UiEvent> {
    // Available with or without a wallet
    match key.code {
        KeyCode::Char('q') => return Some(UiEvent::Quit),
        KeyCode::Char('?') => return Some(UiEvent::ToggleHelp),
        KeyCode::Char('c') => return Some(UiEvent::Connect),
        KeyCode::Char('d') => return Some(UiEvent::Disconnect),
        KeyCode::Char('r') => return Some(UiEvent::Refresh),
        _ => {}
    }

    // The form and message list only exist while connected
    if !ctx.connected {
        return None;
    }

    match key.code {
        KeyCode::Tab => Some(UiEvent::NextPanel),
        KeyCode::BackTab => Some(UiEvent::PrevPanel),
        KeyCode::Char('e') | KeyCode::Enter if ctx.active_panel.is_editable() => {
            Some(UiEvent::StartEditing)
        }
        KeyCode::Char('s') => Some(UiEvent::Submit),
        KeyCode::Up if ctx.active_panel == Panel::History => Some(UiEvent::ScrollUp),
        KeyCode::Down if ctx.active_panel == Panel::History => Some(UiEvent::ScrollDown),
        _ => None,
    }
}

fn handle_editing_keys(key: KeyEvent, active_panel: Panel) -> Option<UiEvent> {
    match key.code {
        KeyCode::Esc => Some(UiEvent::StopEditing),
        KeyCode::Left => Some(UiEvent::CursorLeft),
        KeyCode::Right => Some(UiEvent::CursorRight),
        KeyCode::Backspace => Some(UiEvent::Backspace),
        KeyCode::Tab => Some(UiEvent::NextPanel),
        KeyCode::BackTab => Some(UiEvent::PrevPanel),
        KeyCode::Char(c) => Some(UiEvent::CharInput(c)),
        KeyCode::Enter => {
            if active_panel == Panel::Amount {
                Some(UiEvent::Submit)
            } else {
                Some(UiEvent::StopEditing)
            }
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx() -> KeyContext {
        KeyContext {
            active_panel: Panel::Message,
            input_mode: InputMode::Normal,
            connected: true,
            show_help: false,
            show_notification: false,
        }
    }

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_form_keys_need_connection() {
        let disconnected = KeyContext { connected: false, ..ctx() };
        assert_eq!(key_to_ui_event(press(KeyCode::Char('s')), disconnected), None);
        assert_eq!(key_to_ui_event(press(KeyCode::Char('c')), disconnected), Some(UiEvent::Connect));
        assert_eq!(key_to_ui_event(press(KeyCode::Char('s')), ctx()), Some(UiEvent::Submit));
    }

    #[test]
    fn test_notification_blocks_other_keys() {
        let blocked = KeyContext { show_notification: true, ..ctx() };
        assert_eq!(key_to_ui_event(press(KeyCode::Char('s')), blocked), None);
        assert_eq!(
            key_to_ui_event(press(KeyCode::Enter), blocked),
            Some(UiEvent::DismissNotification)
        );
    }

    #[test]
    fn test_editing_keys() {
        let editing = KeyContext { input_mode: InputMode::Editing, ..ctx() };
        assert_eq!(key_to_ui_event(press(KeyCode::Char('s')), editing), Some(UiEvent::CharInput('s')));
        assert_eq!(key_to_ui_event(press(KeyCode::Enter), editing), Some(UiEvent::StopEditing));

        let amount = KeyContext { active_panel: Panel::Amount, ..editing };
        assert_eq!(key_to_ui_event(press(KeyCode::Enter), amount), Some(UiEvent::Submit));
    }

    #[test]
    fn test_ctrl_c_always_quits() {
        let key = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        let blocked = KeyContext { show_notification: true, ..ctx() };
        assert_eq!(key_to_ui_event(key, blocked), Some(UiEvent::Quit));
    }
}
