//! Render state - data structure sent from App layer to UI for rendering

use crate::app::forms::Form;
use crate::messages::ui_events::{InputMode, KeyContext, Screen};
use crate::models::{Exercise, HistoryDay};
use crate::navigation::AppTab;
use crate::workflow::Toast;

/// Signed-in user as shown in headers and on the profile screen
#[derive(Debug, Clone, Default)]
pub struct UserView {
    pub name: String,
    pub email: String,
    /// Full avatar URL, `None` for the default photo
    pub avatar_url: Option<String>,
}

/// A form ready for display
#[derive(Debug, Clone, Default)]
pub struct FormView {
    pub fields: Vec<FieldView>,
    pub focused: usize,
    pub is_submitting: bool,
}

#[derive(Debug, Clone, Default)]
pub struct FieldView {
    pub label: &'static str,
    /// Masked for secret fields
    pub value: String,
    pub cursor: usize,
    pub error: Option<String>,
    pub read_only: bool,
}

impl From<&Form> for FormView {
    fn from(form: &Form) -> Self {
        FormView {
            fields: form
                .fields
                .iter()
                .map(|f| FieldView {
                    label: f.label,
                    value: f.display(),
                    cursor: f.display_cursor(),
                    error: form.submission.errors.get(f.field).map(str::to_string),
                    read_only: f.read_only,
                })
                .collect(),
            focused: form.focused,
            is_submitting: form.submission.is_submitting(),
        }
    }
}

/// Exercise row on the home screen
#[derive(Debug, Clone, Default)]
pub struct ExerciseRow {
    pub name: String,
    pub series: u32,
    pub repetitions: u32,
    pub thumb_url: String,
}

#[derive(Debug, Clone, Default)]
pub struct HomeView {
    pub groups: Vec<String>,
    /// Index of the group matching the selection, case-insensitively
    pub highlighted_group: Option<usize>,
    pub selected_group: String,
    pub exercises: Vec<ExerciseRow>,
    pub selected_exercise: usize,
    pub is_loading: bool,
}

#[derive(Debug, Clone, Default)]
pub struct ExerciseView {
    pub details: Option<Exercise>,
    pub demo_url: Option<String>,
    pub is_loading: bool,
    pub is_registering: bool,
}

#[derive(Debug, Clone, Default)]
pub struct HistoryView {
    pub days: Vec<HistoryDay>,
    pub is_loading: bool,
    pub scroll: u16,
}

#[derive(Debug, Clone, Default)]
pub struct AvatarView {
    pub show_input: bool,
    pub path_input: String,
    pub is_uploading: bool,
}

/// Complete state needed by the UI to render
#[derive(Debug, Clone, Default)]
pub struct RenderState {
    // Navigation
    pub screen: Screen,
    pub active_tab: Option<AppTab>,
    pub input_mode: InputMode,

    // Session
    pub user: Option<UserView>,

    // Screens
    pub sign_in: FormView,
    pub sign_up: FormView,
    pub profile: FormView,
    pub home: HomeView,
    pub exercise: ExerciseView,
    pub history: HistoryView,
    pub avatar: AvatarView,

    // Popups
    pub toast: Option<Toast>,
    pub show_help: bool,
}

impl RenderState {
    pub fn key_context(&self) -> KeyContext {
        KeyContext {
            screen: self.screen,
            input_mode: self.input_mode,
            show_help: self.show_help,
            show_avatar_input: self.avatar.show_input,
        }
    }
}
