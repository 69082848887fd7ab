//! UI events - messages from UI layer to App layer

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::navigation::{AppRoute, AppTab, AuthRoute, Route};

/// Which screen is visible (needed for context-aware event mapping)
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum Screen {
    #[default]
    SignIn,
    SignUp,
    Home,
    History,
    Profile,
    Exercise,
}

impl From<&Route> for Screen {
    fn from(route: &Route) -> Self {
        match route {
            Route::Auth(AuthRoute::SignIn) => Screen::SignIn,
            Route::Auth(AuthRoute::SignUp) => Screen::SignUp,
            Route::App(AppRoute::Tab(AppTab::Home)) => Screen::Home,
            Route::App(AppRoute::Tab(AppTab::History)) => Screen::History,
            Route::App(AppRoute::Tab(AppTab::Profile)) => Screen::Profile,
            Route::App(AppRoute::Exercise { .. }) => Screen::Exercise,
        }
    }
}

impl Screen {
    pub fn is_form(&self) -> bool {
        matches!(self, Screen::SignIn | Screen::SignUp | Screen::Profile)
    }

    pub fn is_app(&self) -> bool {
        !matches!(self, Screen::SignIn | Screen::SignUp)
    }
}

/// Events generated from user input in the UI layer
#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    // Tab navigation
    SwitchTab(AppTab),
    GoBack,

    // Form fields
    NextField,
    PrevField,
    StartEditing,
    StopEditing,
    CharInput(char),
    Backspace,
    CursorLeft,
    CursorRight,
    Submit,

    // Auth
    OpenSignUp,
    SignOut,

    // Home
    PrevGroup,
    NextGroup,
    PrevExercise,
    NextExercise,
    OpenExercise,
    Reload,

    // Exercise detail
    MarkCompleted,

    // History
    ScrollUp,
    ScrollDown,

    // Avatar
    OpenAvatarInput,
    AvatarPathChar(char),
    AvatarPathBackspace,
    UploadAvatar,
    CancelAvatarInput,

    // Popups
    ToggleHelp,
    CloseHelp,

    // System
    Quit,
}

/// Input mode
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum InputMode {
    #[default]
    Normal,
    Editing,
}

/// UI context a key is interpreted in
#[derive(Clone, Copy, Debug, Default)]
pub struct KeyContext {
    pub screen: Screen,
    pub input_mode: InputMode,
    pub show_help: bool,
    pub show_avatar_input: bool,
}

/// Convert a key event to a UiEvent based on current UI context
pub fn key_to_ui_event(key: KeyEvent, ctx: KeyContext) -> Option<UiEvent> {
    use crossterm::event::KeyEventKind;

    if key.kind != KeyEventKind::Press {
        return None;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(UiEvent::Quit);
    }

    // Popups first
    if ctx.show_help {
        return Some(UiEvent::CloseHelp);
    }

    if ctx.show_avatar_input {
        return match key.code {
            KeyCode::Esc => Some(UiEvent::CancelAvatarInput),
            KeyCode::Enter => Some(UiEvent::UploadAvatar),
            KeyCode::Backspace => Some(UiEvent::AvatarPathBackspace),
            KeyCode::Char(c) => Some(UiEvent::AvatarPathChar(c)),
            _ => None,
        };
    }

    if ctx.input_mode == InputMode::Editing {
        return handle_editing_keys(key);
    }

    match key.code {
        KeyCode::Char('q') => return Some(UiEvent::Quit),
        KeyCode::Char('?') => return Some(UiEvent::ToggleHelp),
        _ => {}
    }

    // Tab switching: 1, 2 and 3 (only inside the app graph)
    if ctx.screen.is_app() {
        match key.code {
            KeyCode::Char('1') => return Some(UiEvent::SwitchTab(AppTab::Home)),
            KeyCode::Char('2') => return Some(UiEvent::SwitchTab(AppTab::History)),
            KeyCode::Char('3') => return Some(UiEvent::SwitchTab(AppTab::Profile)),
            _ => {}
        }
    }

    if ctx.screen.is_form() {
        if let Some(event) = handle_form_keys(key) {
            return Some(event);
        }
    }

    match ctx.screen {
        Screen::SignIn => match key.code {
            KeyCode::Char('n') => Some(UiEvent::OpenSignUp),
            _ => None,
        },
        Screen::SignUp => match key.code {
            KeyCode::Esc | KeyCode::Char('b') => Some(UiEvent::GoBack),
            _ => None,
        },
        Screen::Profile => match key.code {
            KeyCode::Char('a') => Some(UiEvent::OpenAvatarInput),
            KeyCode::Char('x') => Some(UiEvent::SignOut),
            _ => None,
        },
        Screen::Home => match key.code {
            KeyCode::Left | KeyCode::Char('h') => Some(UiEvent::PrevGroup),
            KeyCode::Right | KeyCode::Char('l') => Some(UiEvent::NextGroup),
            KeyCode::Up | KeyCode::Char('k') => Some(UiEvent::PrevExercise),
            KeyCode::Down | KeyCode::Char('j') => Some(UiEvent::NextExercise),
            KeyCode::Enter => Some(UiEvent::OpenExercise),
            KeyCode::Char('r') => Some(UiEvent::Reload),
            _ => None,
        },
        Screen::Exercise => match key.code {
            KeyCode::Esc | KeyCode::Char('b') => Some(UiEvent::GoBack),
            KeyCode::Enter | KeyCode::Char('m') => Some(UiEvent::MarkCompleted),
            KeyCode::Char('r') => Some(UiEvent::Reload),
            _ => None,
        },
        Screen::History => match key.code {
            KeyCode::Up | KeyCode::Char('k') => Some(UiEvent::ScrollUp),
            KeyCode::Down | KeyCode::Char('j') => Some(UiEvent::ScrollDown),
            KeyCode::Char('r') => Some(UiEvent::Reload),
            KeyCode::Esc => Some(UiEvent::GoBack),
            _ => None,
        },
    }
}

/// Keys shared by every form screen in normal mode
fn handle_form_keys(key: KeyEvent) -> Option<UiEvent> {
    match key.code {
        KeyCode::Tab | KeyCode::Down => Some(UiEvent::NextField),
        KeyCode::BackTab | KeyCode::Up => Some(UiEvent::PrevField),
        KeyCode::Char('e') | KeyCode::Enter => Some(UiEvent::StartEditing),
        KeyCode::Char('s') => Some(UiEvent::Submit),
        _ => None,
    }
}

fn handle_editing_keys(key: KeyEvent) -> Option<UiEvent> {
    match key.code {
        KeyCode::Esc => Some(UiEvent::StopEditing),
        KeyCode::Left => Some(UiEvent::CursorLeft),
        KeyCode::Right => Some(UiEvent::CursorRight),
        KeyCode::Backspace => Some(UiEvent::Backspace),
        KeyCode::Tab => Some(UiEvent::NextField),
        KeyCode::BackTab => Some(UiEvent::PrevField),
        KeyCode::Enter => Some(UiEvent::Submit),
        KeyCode::Char(c) => Some(UiEvent::CharInput(c)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctx(screen: Screen) -> KeyContext {
        KeyContext {
            screen,
            ..KeyContext::default()
        }
    }

    #[test]
    fn test_tabs_only_in_app_graph() {
        assert_eq!(
            key_to_ui_event(press(KeyCode::Char('2')), ctx(Screen::Home)),
            Some(UiEvent::SwitchTab(AppTab::History))
        );
        assert_eq!(key_to_ui_event(press(KeyCode::Char('2')), ctx(Screen::SignIn)), None);
    }

    #[test]
    fn test_editing_captures_characters() {
        let editing = KeyContext {
            screen: Screen::SignIn,
            input_mode: InputMode::Editing,
            ..KeyContext::default()
        };
        assert_eq!(
            key_to_ui_event(press(KeyCode::Char('q')), editing),
            Some(UiEvent::CharInput('q'))
        );
        assert_eq!(key_to_ui_event(press(KeyCode::Enter), editing), Some(UiEvent::Submit));
    }

    #[test]
    fn test_help_popup_swallows_keys() {
        let help = KeyContext {
            screen: Screen::Home,
            show_help: true,
            ..KeyContext::default()
        };
        assert_eq!(key_to_ui_event(press(KeyCode::Char('r')), help), Some(UiEvent::CloseHelp));
    }

    #[test]
    fn test_ctrl_c_quits_everywhere() {
        let key = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        let editing = KeyContext {
            screen: Screen::Profile,
            input_mode: InputMode::Editing,
            ..KeyContext::default()
        };
        assert_eq!(key_to_ui_event(key, editing), Some(UiEvent::Quit));
    }
}
