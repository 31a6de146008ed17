//! UI events - messages from UI layer to App layer

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Application views (the client's routes)
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum View {
    #[default]
    Login,
    Game,
    Results,
    Profile,
}

impl View {
    pub fn title(&self) -> &'static str {
        match self {
            View::Login => "Login",
            View::Game => "Game",
            View::Results => "Results",
            View::Profile => "My Profile",
        }
    }
}

/// Events generated from user input in the UI layer
#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    // Login
    LoginChar(char),
    LoginBackspace,
    SubmitLogin,

    // Game
    FocusPrevOption,
    FocusNextOption,
    /// Toggle the option under the focus marker
    ToggleFocused,
    /// Toggle the option at a 0-based position
    ToggleAt(usize),
    /// Submit the selection, or advance once the verdict is shown
    Confirm,
    DismissNotice,

    // Navigation
    OpenProfile,
    OpenLogin,
    ReloadHistory,

    // Popups
    ToggleHelp,
    CloseHelp,

    // System
    Quit,
}

/// Convert a key event to a UiEvent based on current UI context
pub fn key_to_ui_event(key: KeyEvent, view: View, show_help: bool) -> Option<UiEvent> {
    use crossterm::event::KeyEventKind;

    if key.kind != KeyEventKind::Press {
        return None;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(UiEvent::Quit);
    }

    if show_help {
        return Some(UiEvent::CloseHelp);
    }

    match view {
        View::Login => handle_login_keys(key),
        View::Game => handle_game_keys(key),
        View::Results => handle_results_keys(key),
        View::Profile => handle_profile_keys(key),
    }
}

/// Login is a text entry: only Esc and Enter are commands
fn handle_login_keys(key: KeyEvent) -> Option<UiEvent> {
    match key.code {
        KeyCode::Enter => Some(UiEvent::SubmitLogin),
        KeyCode::Backspace => Some(UiEvent::LoginBackspace),
        KeyCode::Esc => Some(UiEvent::Quit),
        KeyCode::Char(c) => Some(UiEvent::LoginChar(c)),
        _ => None,
    }
}

fn handle_game_keys(key: KeyEvent) -> Option<UiEvent> {
    match key.code {
        KeyCode::Char('q') => Some(UiEvent::Quit),
        KeyCode::Char('?') => Some(UiEvent::ToggleHelp),
        KeyCode::Up | KeyCode::Char('k') => Some(UiEvent::FocusPrevOption),
        KeyCode::Down | KeyCode::Char('j') => Some(UiEvent::FocusNextOption),
        KeyCode::Char(' ') => Some(UiEvent::ToggleFocused),
        KeyCode::Char(c @ '1'..='9') => c.to_digit(10).map(|d| UiEvent::ToggleAt(d as usize - 1)),
        KeyCode::Enter | KeyCode::Char('s') => Some(UiEvent::Confirm),
        KeyCode::Char('x') | KeyCode::Esc => Some(UiEvent::DismissNotice),
        KeyCode::Char('p') => Some(UiEvent::OpenProfile),
        _ => None,
    }
}

fn handle_results_keys(key: KeyEvent) -> Option<UiEvent> {
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => Some(UiEvent::Quit),
        KeyCode::Char('?') => Some(UiEvent::ToggleHelp),
        KeyCode::Char('p') | KeyCode::Enter => Some(UiEvent::OpenProfile),
        _ => None,
    }
}

fn handle_profile_keys(key: KeyEvent) -> Option<UiEvent> {
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => Some(UiEvent::Quit),
        KeyCode::Char('?') => Some(UiEvent::ToggleHelp),
        KeyCode::Char('r') => Some(UiEvent::ReloadHistory),
        KeyCode::Char('l') => Some(UiEvent::OpenLogin),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEventKind, KeyEventState};

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_login_keys_are_text() {
        assert_eq!(
            key_to_ui_event(press(KeyCode::Char('q')), View::Login, false),
            Some(UiEvent::LoginChar('q'))
        );
        assert_eq!(
            key_to_ui_event(press(KeyCode::Enter), View::Login, false),
            Some(UiEvent::SubmitLogin)
        );
    }

    #[test]
    fn test_game_keys() {
        assert_eq!(
            key_to_ui_event(press(KeyCode::Char(' ')), View::Game, false),
            Some(UiEvent::ToggleFocused)
        );
        assert_eq!(
            key_to_ui_event(press(KeyCode::Char('3')), View::Game, false),
            Some(UiEvent::ToggleAt(2))
        );
        assert_eq!(
            key_to_ui_event(press(KeyCode::Enter), View::Game, false),
            Some(UiEvent::Confirm)
        );
        assert_eq!(key_to_ui_event(press(KeyCode::Char('0')), View::Game, false), None);
    }

    #[test]
    fn test_help_swallows_keys() {
        assert_eq!(
            key_to_ui_event(press(KeyCode::Enter), View::Game, true),
            Some(UiEvent::CloseHelp)
        );
    }

    #[test]
    fn test_ctrl_c_quits_everywhere() {
        let key = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        for view in [View::Login, View::Game, View::Results, View::Profile] {
            assert_eq!(key_to_ui_event(key, view, false), Some(UiEvent::Quit));
        }
    }

    #[test]
    fn test_release_ignored() {
        let key = KeyEvent {
            code: KeyCode::Enter,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        };
        assert_eq!(key_to_ui_event(key, View::Game, false), None);
    }
}
