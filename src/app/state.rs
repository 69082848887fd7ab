//! App state - pure data structure with no I/O logic

use crate::app::forms::Form;
use crate::constants::DEFAULT_GROUP;
use crate::media;
use crate::messages::render::{
    AvatarView, ExerciseRow, ExerciseView, FormView, HistoryView, HomeView, UserView,
};
use crate::messages::ui_events::{InputMode, Screen};
use crate::messages::RenderState;
use crate::models::{Exercise, HistoryDay};
use crate::navigation::Navigator;
use crate::session::SessionStore;
use crate::workflow::{RequestIds, Submission, Toast};

/// Home tab: muscle groups and the exercises of the selected one
#[derive(Clone, Debug)]
pub struct HomeScreen {
    /// Groups are fetched once per mount
    pub mounted: bool,
    pub groups: Vec<String>,
    pub groups_load: Submission,
    pub selected_group: String,
    pub exercises: Vec<Exercise>,
    pub exercises_load: Submission,
    pub selected_exercise: usize,
}

impl Default for HomeScreen {
    fn default() -> Self {
        HomeScreen {
            mounted: false,
            groups: Vec::new(),
            groups_load: Submission::default(),
            selected_group: DEFAULT_GROUP.to_string(),
            exercises: Vec::new(),
            exercises_load: Submission::default(),
            selected_exercise: 0,
        }
    }
}

impl HomeScreen {
    /// Position of the selected group in the list, compared case-insensitively
    pub fn highlighted_group(&self) -> Option<usize> {
        let selected = self.selected_group.to_uppercase();
        self.groups.iter().position(|g| g.to_uppercase() == selected)
    }
}

/// Exercise detail screen
#[derive(Clone, Debug, Default)]
pub struct ExerciseScreen {
    pub exercise_id: Option<String>,
    pub details: Option<Exercise>,
    pub load: Submission,
    pub register: Submission,
}

/// History tab
#[derive(Clone, Debug, Default)]
pub struct HistoryScreen {
    pub days: Vec<HistoryDay>,
    pub load: Submission,
    pub scroll: u16,
}

impl HistoryScreen {
    /// Lines drawn for the history list: a title, the entries and a spacer per day
    pub fn line_count(&self) -> usize {
        self.days.iter().map(|day| day.data.len() + 2).sum()
    }

    /// Last scroll offset that still shows a line of content
    pub fn max_scroll(&self) -> u16 {
        let last = self.line_count().saturating_sub(1);
        u16::try_from(last).unwrap_or(u16::MAX)
    }
}

/// Profile tab: profile form plus the avatar upload popup
#[derive(Clone, Debug)]
pub struct ProfileScreen {
    pub mounted: bool,
    pub form: Form,
    /// Name sent with the in-flight update, applied once the server confirms it
    pub pending_name: Option<String>,
    pub avatar: Submission,
    pub show_avatar_input: bool,
    pub avatar_path_input: String,
}

impl Default for ProfileScreen {
    fn default() -> Self {
        ProfileScreen {
            mounted: false,
            form: Form::profile(None),
            pending_name: None,
            avatar: Submission::default(),
            show_avatar_input: false,
            avatar_path_input: String::new(),
        }
    }
}

/// Main application state - pure data, no I/O
pub struct AppState {
    /// API base URL, prefix of every media URL
    pub api_url: String,

    // Session + navigation
    pub session: SessionStore,
    pub navigator: Navigator,
    pub ids: RequestIds,

    // UI state
    pub input_mode: InputMode,
    pub toast: Option<Toast>,
    pub show_help: bool,

    // Auth graph
    pub sign_in: Form,
    pub sign_up: Form,

    // App graph
    pub home: HomeScreen,
    pub exercise: ExerciseScreen,
    pub history: HistoryScreen,
    pub profile: ProfileScreen,
}

impl AppState {
    pub fn new(api_url: impl Into<String>, session: SessionStore) -> Self {
        let navigator = Navigator::new(&session);
        AppState {
            api_url: api_url.into(),
            session,
            navigator,
            ids: RequestIds::default(),
            input_mode: InputMode::Normal,
            toast: None,
            show_help: false,
            sign_in: Form::sign_in(),
            sign_up: Form::sign_up(),
            home: HomeScreen::default(),
            exercise: ExerciseScreen::default(),
            history: HistoryScreen::default(),
            profile: ProfileScreen::default(),
        }
    }

    pub fn screen(&self) -> Screen {
        Screen::from(self.navigator.current())
    }

    /// Form of the visible screen, if it has one
    pub fn active_form(&self) -> Option<&Form> {
        match self.screen() {
            Screen::SignIn => Some(&self.sign_in),
            Screen::SignUp => Some(&self.sign_up),
            Screen::Profile => Some(&self.profile.form),
            _ => None,
        }
    }

    pub fn active_form_mut(&mut self) -> Option<&mut Form> {
        match self.screen() {
            Screen::SignIn => Some(&mut self.sign_in),
            Screen::SignUp => Some(&mut self.sign_up),
            Screen::Profile => Some(&mut self.profile.form),
            _ => None,
        }
    }

    /// Convert state to RenderState for UI
    pub fn to_render_state(&self) -> RenderState {
        let user = self.session.user().map(|u| UserView {
            name: u.name.clone(),
            email: u.email.clone(),
            avatar_url: u
                .avatar
                .as_deref()
                .filter(|a| !a.is_empty())
                .map(|a| media::avatar_url(&self.api_url, a)),
        });

        let home = HomeView {
            groups: self.home.groups.clone(),
            highlighted_group: self.home.highlighted_group(),
            selected_group: self.home.selected_group.clone(),
            exercises: self
                .home
                .exercises
                .iter()
                .map(|e| ExerciseRow {
                    name: e.name.clone(),
                    series: e.series,
                    repetitions: e.repetitions,
                    thumb_url: media::exercise_thumb_url(&self.api_url, &e.thumb),
                })
                .collect(),
            selected_exercise: self.home.selected_exercise,
            is_loading: self.home.exercises_load.is_submitting(),
        };

        let exercise = ExerciseView {
            demo_url: self
                .exercise
                .details
                .as_ref()
                .map(|e| media::exercise_demo_url(&self.api_url, &e.demo)),
            details: self.exercise.details.clone(),
            is_loading: self.exercise.load.is_submitting(),
            is_registering: self.exercise.register.is_submitting(),
        };

        RenderState {
            screen: self.screen(),
            active_tab: self.navigator.current().tab(),
            input_mode: self.input_mode,
            user,
            sign_in: FormView::from(&self.sign_in),
            sign_up: FormView::from(&self.sign_up),
            profile: FormView::from(&self.profile.form),
            home,
            exercise,
            history: HistoryView {
                days: self.history.days.clone(),
                is_loading: self.history.load.is_submitting(),
                scroll: self.history.scroll,
            },
            avatar: AvatarView {
                show_input: self.profile.show_avatar_input,
                path_input: self.profile.avatar_path_input.clone(),
                is_uploading: self.profile.avatar.is_submitting(),
            },
            toast: self.toast.clone(),
            show_help: self.show_help,
        }
    }
}
