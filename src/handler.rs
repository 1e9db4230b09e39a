use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseEvent, MouseEventKind};

use crate::app::App;

/// Logical user intents, decoupled from the keys that trigger them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    CursorUp,
    CursorDown,
    CursorFirst,
    CursorLast,
    PageUp,
    PageDown,
    /// Jump the cursor to the given sibling index.
    JumpToDigit(usize),
    Enter,
    Back,
    ToggleHidden,
    /// Open the external link of the relevant item.
    OpenLink,
    /// Open the item's discussion page.
    OpenInExternalViewer,
    EnterFocus,
    ExitFocus,
    CollapseParent,
    ToggleHelp,
    Quit,
    Resize(u16, u16),
}

/// Which key table applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Browsing,
    Focused,
    Help,
}

/// Translate a key press into an action for the given mode.
pub fn map_key(key: KeyEvent, mode: InputMode) -> Option<Action> {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return Some(Action::Quit);
    }

    match mode {
        InputMode::Help => map_help_key(key),
        InputMode::Focused => map_focus_key(key),
        InputMode::Browsing => map_browse_key(key),
    }
}

fn map_browse_key(key: KeyEvent) -> Option<Action> {
    let action = match key.code {
        KeyCode::Char('q') => Action::Quit,
        KeyCode::Char('j') | KeyCode::Down => Action::CursorDown,
        KeyCode::Char('k') | KeyCode::Up => Action::CursorUp,
        KeyCode::Char('g') | KeyCode::Home => Action::CursorFirst,
        KeyCode::Char('G') | KeyCode::End => Action::CursorLast,
        KeyCode::PageUp => Action::PageUp,
        KeyCode::PageDown => Action::PageDown,
        KeyCode::Char(c @ '0'..='9') => Action::JumpToDigit((c as u8 - b'0') as usize),
        KeyCode::Enter | KeyCode::Char('l') | KeyCode::Right => Action::Enter,
        KeyCode::Esc | KeyCode::Char('h') | KeyCode::Left | KeyCode::Backspace => Action::Back,
        KeyCode::Char(' ') => Action::ToggleHidden,
        KeyCode::Char('o') => Action::OpenLink,
        KeyCode::Char('O') => Action::OpenInExternalViewer,
        KeyCode::Char('f') => Action::EnterFocus,
        KeyCode::Char('F') => Action::CollapseParent,
        KeyCode::Char('?') => Action::ToggleHelp,
        _ => return None,
    };
    Some(action)
}

fn map_focus_key(key: KeyEvent) -> Option<Action> {
    let action = match key.code {
        KeyCode::Char('q') => Action::Quit,
        KeyCode::Char('j') | KeyCode::Down => Action::CursorDown,
        KeyCode::Char('k') | KeyCode::Up => Action::CursorUp,
        KeyCode::Char('g') | KeyCode::Home => Action::CursorFirst,
        KeyCode::Char('G') | KeyCode::End => Action::CursorLast,
        KeyCode::PageUp => Action::PageUp,
        KeyCode::PageDown => Action::PageDown,
        KeyCode::Char('f')
        | KeyCode::Esc
        | KeyCode::Char('h')
        | KeyCode::Left
        | KeyCode::Backspace => Action::ExitFocus,
        KeyCode::Char('o') => Action::OpenLink,
        KeyCode::Char('O') => Action::OpenInExternalViewer,
        KeyCode::Char('?') => Action::ToggleHelp,
        _ => return None,
    };
    Some(action)
}

fn map_help_key(key: KeyEvent) -> Option<Action> {
    let action = match key.code {
        KeyCode::Char('?') | KeyCode::Esc | KeyCode::Char('q') => Action::ToggleHelp,
        KeyCode::Char('j') | KeyCode::Down => Action::CursorDown,
        KeyCode::Char('k') | KeyCode::Up => Action::CursorUp,
        _ => return None,
    };
    Some(action)
}

/// Translate a mouse event. Only the wheel is used.
pub fn map_mouse(mouse: MouseEvent) -> Option<Action> {
    match mouse.kind {
        MouseEventKind::ScrollDown => Some(Action::CursorDown),
        MouseEventKind::ScrollUp => Some(Action::CursorUp),
        _ => None,
    }
}

/// Handle a key event.
pub fn handle_key_event(app: &mut App, key: KeyEvent) {
    if let Some(action) = map_key(key, app.input_mode()) {
        app.dispatch(action);
    }
}

/// Handle a mouse event.
pub fn handle_mouse_event(app: &mut App, mouse: MouseEvent) {
    if !app.mouse_enabled() {
        return;
    }
    if let Some(action) = map_mouse(mouse) {
        app.dispatch(action);
    }
}
