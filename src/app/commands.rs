//! Command handlers - business logic for processing UI events and network responses

use crate::app::forms::Form;
use crate::app::AppState;
use crate::constants::{
    FALLBACK_AVATAR_UPLOAD, FALLBACK_EXERCISES, FALLBACK_EXERCISE_DETAILS, FALLBACK_GROUPS,
    FALLBACK_HISTORY, FALLBACK_PROFILE_UPDATE, FALLBACK_REGISTER_HISTORY, FALLBACK_SIGN_IN,
    FALLBACK_SIGN_UP, SUCCESS_AVATAR_UPLOAD, SUCCESS_PROFILE_UPDATE, SUCCESS_REGISTER_HISTORY,
    SUCCESS_SIGN_UP,
};
use crate::media::{self, AvatarFile};
use crate::messages::ui_events::{InputMode, Screen};
use crate::messages::{NetworkCommand, NetworkResponse};
use crate::models::AuthSession;
use crate::navigation::{AppRoute, AppTab, AuthRoute, Route};
use crate::validation::FieldErrors;
use crate::workflow::{self, Toast};

impl AppState {
    // ========================
    // Lifecycle
    // ========================

    /// Commands to issue once the actors are running
    pub fn startup_commands(&mut self) -> Vec<NetworkCommand> {
        let mut cmds = vec![NetworkCommand::SetToken(
            self.session.token().map(str::to_string),
        )];
        cmds.extend(self.on_focus());
        cmds
    }

    /// The current route became visible: run its mount/focus fetches
    pub fn on_focus(&mut self) -> Vec<NetworkCommand> {
        match self.navigator.current().clone() {
            Route::App(AppRoute::Tab(AppTab::Home)) => {
                let mut cmds = Vec::new();
                if !self.home.mounted {
                    self.home.mounted = true;
                    cmds.push(self.fetch_groups());
                }
                cmds.push(self.fetch_exercises());
                cmds
            }
            Route::App(AppRoute::Tab(AppTab::History)) => vec![self.fetch_history()],
            Route::App(AppRoute::Tab(AppTab::Profile)) => {
                if !self.profile.mounted {
                    self.profile.form = Form::profile(self.session.user());
                    self.profile.mounted = true;
                }
                Vec::new()
            }
            Route::App(AppRoute::Exercise { exercise_id }) => {
                if self.exercise.exercise_id.as_deref() != Some(exercise_id.as_str()) {
                    self.exercise = Default::default();
                    self.exercise.exercise_id = Some(exercise_id);
                }
                vec![self.fetch_exercise_details()]
            }
            Route::Auth(_) => Vec::new(),
        }
    }

    /// Unmount every screen; late responses no longer match anything
    fn reset_screens(&mut self) {
        self.sign_in = Form::sign_in();
        self.sign_up = Form::sign_up();
        self.home = Default::default();
        self.exercise = Default::default();
        self.history = Default::default();
        self.profile = Default::default();
        self.input_mode = InputMode::Normal;
    }

    /// Store a confirmed session and enter the app graph
    fn start_session(&mut self, session: AuthSession, toast: Toast) -> Vec<NetworkCommand> {
        let mut cmds = vec![NetworkCommand::SetToken(Some(session.token.clone()))];
        self.session.sign_in(session);
        if self.navigator.sync_with_session(&self.session) {
            self.reset_screens();
            cmds.extend(self.on_focus());
        }
        self.show(toast);
        cmds
    }

    fn show(&mut self, toast: Toast) {
        self.toast = Some(toast);
    }

    /// Show the error toast of a settled request, keep the value otherwise
    fn settle<T>(&mut self, outcome: Option<Result<T, Toast>>) -> Option<T> {
        match outcome? {
            Ok(value) => Some(value),
            Err(toast) => {
                self.show(toast);
                None
            }
        }
    }

    // ========================
    // Navigation
    // ========================

    fn navigate(&mut self, route: Route) -> Vec<NetworkCommand> {
        let previous = self.navigator.current().clone();
        if !self.navigator.navigate(route) {
            return Vec::new();
        }
        self.after_route_change(&previous)
    }

    fn after_route_change(&mut self, previous: &Route) -> Vec<NetworkCommand> {
        self.input_mode = InputMode::Normal;
        if matches!(previous, Route::App(AppRoute::Exercise { .. })) {
            self.exercise = Default::default();
        }
        self.on_focus()
    }

    pub fn switch_tab(&mut self, tab: AppTab) -> Vec<NetworkCommand> {
        self.navigate(Route::App(AppRoute::Tab(tab)))
    }

    pub fn go_back(&mut self) -> Vec<NetworkCommand> {
        let previous = self.navigator.current().clone();
        if !self.navigator.go_back() {
            return Vec::new();
        }
        self.after_route_change(&previous)
    }

    pub fn open_sign_up(&mut self) {
        self.navigate(Route::Auth(AuthRoute::SignUp));
    }

    pub fn sign_out(&mut self) -> Vec<NetworkCommand> {
        if !self.session.is_authenticated() {
            return Vec::new();
        }
        self.session.sign_out();
        self.navigator.sync_with_session(&self.session);
        self.reset_screens();
        vec![NetworkCommand::SetToken(None)]
    }

    // ========================
    // Form editing
    // ========================

    pub fn start_editing(&mut self) {
        let editable = self
            .active_form()
            .and_then(|f| f.focused_field())
            .is_some_and(|f| !f.read_only);
        if editable {
            self.input_mode = InputMode::Editing;
        }
    }

    pub fn stop_editing(&mut self) {
        self.input_mode = InputMode::Normal;
    }

    pub fn next_field(&mut self) {
        if let Some(form) = self.active_form_mut() {
            form.focus_next();
        }
    }

    pub fn prev_field(&mut self) {
        if let Some(form) = self.active_form_mut() {
            form.focus_prev();
        }
    }

    pub fn enter_char(&mut self, c: char) {
        if let Some(field) = self.active_form_mut().and_then(|f| f.focused_mut()) {
            field.insert(c);
        }
    }

    pub fn delete_char(&mut self) {
        if let Some(field) = self.active_form_mut().and_then(|f| f.focused_mut()) {
            field.backspace();
        }
    }

    pub fn move_cursor_left(&mut self) {
        if let Some(field) = self.active_form_mut().and_then(|f| f.focused_mut()) {
            field.move_left();
        }
    }

    pub fn move_cursor_right(&mut self) {
        if let Some(field) = self.active_form_mut().and_then(|f| f.focused_mut()) {
            field.move_right();
        }
    }

    // ========================
    // Form submission
    // ========================

    /// Submit the form of the visible screen
    pub fn submit(&mut self) -> Option<NetworkCommand> {
        self.stop_editing();
        match self.screen() {
            Screen::SignIn => self.submit_sign_in(),
            Screen::SignUp => self.submit_sign_up(),
            Screen::Profile => self.submit_profile(),
            _ => None,
        }
    }

    fn submit_sign_in(&mut self) -> Option<NetworkCommand> {
        let validated = self.sign_in.to_sign_in().validate();
        workflow::submit(
            &mut self.sign_in.submission,
            &mut self.ids,
            validated,
            |id, request| NetworkCommand::SignIn { id, request },
        )
    }

    fn submit_sign_up(&mut self) -> Option<NetworkCommand> {
        let validated = self.sign_up.to_sign_up().validate();
        workflow::submit(
            &mut self.sign_up.submission,
            &mut self.ids,
            validated,
            |id, request| NetworkCommand::SignUp { id, request },
        )
    }

    /// The stored user is left untouched until the server confirms the update
    fn submit_profile(&mut self) -> Option<NetworkCommand> {
        let validated = self.profile.form.to_profile().validate();
        let (id, request) = self.profile.form.submission.begin(validated, &mut self.ids)?;
        self.profile.pending_name = Some(request.name.clone());
        Some(NetworkCommand::UpdateProfile { id, request })
    }

    // ========================
    // Exercise browsing
    // ========================

    fn fetch_groups(&mut self) -> NetworkCommand {
        let id = self.home.groups_load.restart(&mut self.ids);
        NetworkCommand::FetchGroups { id }
    }

    fn fetch_exercises(&mut self) -> NetworkCommand {
        let id = self.home.exercises_load.restart(&mut self.ids);
        NetworkCommand::FetchExercises {
            id,
            group: self.home.selected_group.clone(),
        }
    }

    fn fetch_exercise_details(&mut self) -> NetworkCommand {
        let id = self.exercise.load.restart(&mut self.ids);
        NetworkCommand::FetchExercise {
            id,
            exercise_id: self.exercise.exercise_id.clone().unwrap_or_default(),
        }
    }

    /// Select the group at `index`; a different group reloads the exercise list
    pub fn select_group(&mut self, index: usize) -> Option<NetworkCommand> {
        let group = self.home.groups.get(index)?.clone();
        if self.home.highlighted_group() == Some(index) {
            return None;
        }
        self.home.selected_group = group;
        self.home.selected_exercise = 0;
        Some(self.fetch_exercises())
    }

    pub fn next_group(&mut self) -> Option<NetworkCommand> {
        let len = self.home.groups.len();
        if len == 0 {
            return None;
        }
        let next = self.home.highlighted_group().map(|i| (i + 1) % len).unwrap_or(0);
        self.select_group(next)
    }

    pub fn prev_group(&mut self) -> Option<NetworkCommand> {
        let len = self.home.groups.len();
        if len == 0 {
            return None;
        }
        let prev = self
            .home
            .highlighted_group()
            .map(|i| i.checked_sub(1).unwrap_or(len - 1))
            .unwrap_or(len - 1);
        self.select_group(prev)
    }

    pub fn next_exercise(&mut self) {
        if !self.home.exercises.is_empty() {
            self.home.selected_exercise =
                (self.home.selected_exercise + 1).min(self.home.exercises.len() - 1);
        }
    }

    pub fn prev_exercise(&mut self) {
        self.home.selected_exercise = self.home.selected_exercise.saturating_sub(1);
    }

    pub fn open_exercise(&mut self) -> Vec<NetworkCommand> {
        let Some(exercise) = self.home.exercises.get(self.home.selected_exercise) else {
            return Vec::new();
        };
        let route = Route::App(AppRoute::Exercise {
            exercise_id: exercise.id.clone(),
        });
        self.navigate(route)
    }

    /// Refetch whatever the visible screen shows
    pub fn reload(&mut self) -> Vec<NetworkCommand> {
        match self.screen() {
            Screen::Home => vec![self.fetch_groups(), self.fetch_exercises()],
            Screen::Exercise => vec![self.fetch_exercise_details()],
            Screen::History => vec![self.fetch_history()],
            _ => Vec::new(),
        }
    }

    /// Register the open exercise as done today
    pub fn mark_completed(&mut self) -> Option<NetworkCommand> {
        let exercise_id = self.exercise.exercise_id.clone()?;
        workflow::submit(
            &mut self.exercise.register,
            &mut self.ids,
            Ok::<_, FieldErrors>(exercise_id),
            |id, exercise_id| NetworkCommand::RegisterHistory { id, exercise_id },
        )
    }

    // ========================
    // History
    // ========================

    fn fetch_history(&mut self) -> NetworkCommand {
        let id = self.history.load.restart(&mut self.ids);
        NetworkCommand::FetchHistory { id }
    }

    pub fn scroll_up(&mut self) {
        self.history.scroll = self.history.scroll.saturating_sub(1);
    }

    pub fn scroll_down(&mut self) {
        let next = self.history.scroll.saturating_add(1);
        self.history.scroll = next.min(self.history.max_scroll());
    }

    // ========================
    // Avatar
    // ========================

    pub fn open_avatar_input(&mut self) {
        self.profile.show_avatar_input = true;
        self.profile.avatar_path_input.clear();
    }

    pub fn avatar_path_char(&mut self, c: char) {
        self.profile.avatar_path_input.push(c);
    }

    pub fn avatar_path_backspace(&mut self) {
        self.profile.avatar_path_input.pop();
    }

    pub fn cancel_avatar_input(&mut self) {
        self.profile.show_avatar_input = false;
        self.profile.avatar_path_input.clear();
    }

    /// Check the typed file and start the upload; refused files never reach the network
    pub fn upload_avatar(&mut self) -> Option<NetworkCommand> {
        if self.profile.avatar.is_submitting() {
            return None;
        }
        let user_name = self.session.user()?.name.clone();
        let path = media::expand_home(self.profile.avatar_path_input.trim());

        let avatar = match AvatarFile::inspect(&path, &user_name) {
            Ok(avatar) => avatar,
            Err(e) => {
                tracing::info!(path = %path.display(), error = %e, "Avatar refused");
                self.show(Toast::error(e.to_string()));
                return None;
            }
        };

        let cmd = workflow::submit(
            &mut self.profile.avatar,
            &mut self.ids,
            Ok::<_, FieldErrors>(avatar),
            |id, avatar| NetworkCommand::UploadAvatar { id, avatar },
        );
        if cmd.is_some() {
            self.cancel_avatar_input();
        }
        cmd
    }

    // ========================
    // Popups
    // ========================

    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    pub fn close_help(&mut self) {
        self.show_help = false;
    }

    // ========================
    // Network responses
    // ========================

    /// Apply a network response; returns follow-up commands
    pub fn handle_response(&mut self, response: NetworkResponse) -> Vec<NetworkCommand> {
        match response {
            NetworkResponse::SignedIn { id, result } => {
                let outcome = self.sign_in.submission.finish(id, result, FALLBACK_SIGN_IN);
                if let Some(session) = self.settle(outcome) {
                    let welcome = Toast::success(format!("Welcome, {}!", session.user.name));
                    return self.start_session(session, welcome);
                }
            }
            NetworkResponse::SignedUp { id, result } => {
                let outcome = self.sign_up.submission.finish(id, result, FALLBACK_SIGN_UP);
                if let Some(session) = self.settle(outcome) {
                    return self.start_session(session, Toast::success(SUCCESS_SIGN_UP));
                }
            }
            NetworkResponse::Groups { id, result } => {
                let outcome = self.home.groups_load.finish(id, result, FALLBACK_GROUPS);
                if let Some(groups) = self.settle(outcome) {
                    self.home.groups = groups;
                }
            }
            NetworkResponse::Exercises { id, result } => {
                let outcome = self.home.exercises_load.finish(id, result, FALLBACK_EXERCISES);
                if let Some(exercises) = self.settle(outcome) {
                    self.home.exercises = exercises;
                    self.home.selected_exercise = 0;
                }
            }
            NetworkResponse::ExerciseDetails { id, result } => {
                let outcome = self.exercise.load.finish(id, result, FALLBACK_EXERCISE_DETAILS);
                if let Some(exercise) = self.settle(outcome) {
                    self.exercise.details = Some(exercise);
                }
            }
            NetworkResponse::HistoryRegistered { id, result } => {
                let outcome = self
                    .exercise
                    .register
                    .finish(id, result, FALLBACK_REGISTER_HISTORY);
                if self.settle(outcome).is_some() {
                    self.show(Toast::success(SUCCESS_REGISTER_HISTORY));
                    return self.switch_tab(AppTab::History);
                }
            }
            NetworkResponse::History { id, result } => {
                let outcome = self.history.load.finish(id, result, FALLBACK_HISTORY);
                if let Some(days) = self.settle(outcome) {
                    self.history.days = days;
                    self.history.scroll = self.history.scroll.min(self.history.max_scroll());
                }
            }
            NetworkResponse::ProfileUpdated { id, result } => {
                let outcome = self
                    .profile
                    .form
                    .submission
                    .finish(id, result, FALLBACK_PROFILE_UPDATE);
                if outcome.is_none() {
                    return Vec::new();
                }
                let confirmed_name = self.profile.pending_name.take();
                if self.settle(outcome).is_some() {
                    if let (Some(mut user), Some(name)) =
                        (self.session.user().cloned(), confirmed_name)
                    {
                        user.name = name;
                        self.session.update_user_profile(user);
                    }
                    self.profile.form.clear_secrets();
                    self.show(Toast::success(SUCCESS_PROFILE_UPDATE));
                }
            }
            NetworkResponse::AvatarUploaded { id, result } => {
                let outcome = self.profile.avatar.finish(id, result, FALLBACK_AVATAR_UPLOAD);
                if let Some(updated) = self.settle(outcome) {
                    if let Some(mut user) = self.session.user().cloned() {
                        user.avatar = updated.avatar;
                        self.session.update_user_profile(user);
                    }
                    self.show(Toast::success(SUCCESS_AVATAR_UPLOAD));
                }
            }
        }
        Vec::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ApiError;
    use crate::models::{Exercise, HistoryDay, HistoryEntry, User};
    use crate::session::SessionStore;
    use crate::validation::Field;
    use crate::workflow::ToastKind;

    const API: &str = "http://localhost:3333";

    fn ana() -> User {
        User {
            id: "1".to_string(),
            name: "Ana".to_string(),
            email: "a@b.com".to_string(),
            avatar: None,
            role: None,
        }
    }

    fn session_for(user: User) -> AuthSession {
        AuthSession {
            user,
            token: "tok".to_string(),
            refresh_token: None,
        }
    }

    fn signed_out() -> AppState {
        AppState::new(API, SessionStore::in_memory())
    }

    fn signed_in() -> AppState {
        let mut session = SessionStore::in_memory();
        session.sign_in(session_for(ana()));
        AppState::new(API, session)
    }

    fn exercise(id: &str) -> Exercise {
        Exercise {
            id: id.to_string(),
            name: "Rosca punho".to_string(),
            group: "antebraço".to_string(),
            series: 3,
            repetitions: 12,
            demo: "rosca.gif".to_string(),
            thumb: "rosca.png".to_string(),
        }
    }

    fn type_into(state: &mut AppState, field: Field, value: &str) {
        state.active_form_mut().unwrap().set(field, value);
    }

    fn app_error(message: &str) -> ApiError {
        ApiError::App {
            status: 400,
            message: message.to_string(),
        }
    }

    #[test]
    fn test_short_password_blocks_sign_in() {
        let mut state = signed_out();
        type_into(&mut state, Field::Email, "a@b.com");
        type_into(&mut state, Field::Password, "12345");

        assert!(state.submit().is_none());
        assert!(!state.sign_in.submission.is_submitting());
        assert!(state.sign_in.submission.errors.get(Field::Password).is_some());
    }

    #[test]
    fn test_sign_in_enters_app_graph() {
        let mut state = signed_out();
        type_into(&mut state, Field::Email, "a@b.com");
        type_into(&mut state, Field::Password, "secret1");

        let cmd = state.submit().expect("valid credentials are submitted");
        let NetworkCommand::SignIn { id, request } = cmd else {
            panic!("expected a sign-in command");
        };
        assert_eq!(request.email, "a@b.com");
        assert_eq!(request.password, "secret1");
        assert!(state.submit().is_none(), "no second submission while in flight");

        let cmds = state.handle_response(NetworkResponse::SignedIn {
            id,
            result: Ok(session_for(ana())),
        });
        assert!(state.session.is_authenticated());
        assert_eq!(state.screen(), Screen::Home);
        assert!(matches!(&cmds[0], NetworkCommand::SetToken(Some(t)) if t == "tok"));
        assert!(cmds.iter().any(|c| matches!(c, NetworkCommand::FetchGroups { .. })));
        assert_eq!(state.toast.as_ref().map(|t| t.kind), Some(ToastKind::Success));
    }

    #[test]
    fn test_sign_in_failure_keeps_values() {
        let mut state = signed_out();
        type_into(&mut state, Field::Email, "a@b.com");
        type_into(&mut state, Field::Password, "secret1");
        let id = state.submit().and_then(|c| c.id()).unwrap();

        let cmds = state.handle_response(NetworkResponse::SignedIn {
            id,
            result: Err(ApiError::Unknown("connection refused".to_string())),
        });
        assert!(cmds.is_empty());
        assert!(!state.session.is_authenticated());
        assert_eq!(state.screen(), Screen::SignIn);
        assert_eq!(state.toast.as_ref().unwrap().message, FALLBACK_SIGN_IN);
        assert_eq!(state.sign_in.value(Field::Password), "secret1");
    }

    #[test]
    fn test_home_mount_with_unknown_default_group() {
        let mut state = signed_in();
        let cmds = state.startup_commands();

        let fetches: Vec<_> = cmds
            .iter()
            .filter_map(|c| match c {
                NetworkCommand::FetchExercises { group, .. } => Some(group.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(fetches, vec!["antebraço"]);

        let groups_id = cmds
            .iter()
            .find(|c| matches!(c, NetworkCommand::FetchGroups { .. }))
            .and_then(|c| c.id())
            .unwrap();
        let follow_up = state.handle_response(NetworkResponse::Groups {
            id: groups_id,
            result: Ok(vec!["back".to_string(), "chest".to_string()]),
        });
        assert!(follow_up.is_empty());
        assert_eq!(state.to_render_state().home.highlighted_group, None);

        let cmd = state.next_group();
        assert!(matches!(cmd, Some(NetworkCommand::FetchExercises { ref group, .. }) if group == "back"));
        assert_eq!(state.to_render_state().home.highlighted_group, Some(0));
        assert!(state.select_group(0).is_none(), "same group does not refetch");
    }

    #[test]
    fn test_group_highlight_ignores_case() {
        let mut state = signed_in();
        state.home.groups = vec!["COSTAS".to_string(), "Antebraço".to_string()];
        assert_eq!(state.home.highlighted_group(), Some(1));
    }

    #[test]
    fn test_home_refetches_exercises_on_focus() {
        let mut state = signed_in();
        state.startup_commands();

        state.switch_tab(AppTab::History);
        let cmds = state.switch_tab(AppTab::Home);
        assert_eq!(cmds.len(), 1, "groups are fetched once per mount");
        assert!(matches!(cmds[0], NetworkCommand::FetchExercises { .. }));
    }

    #[test]
    fn test_profile_update_without_password() {
        let mut state = signed_in();
        state.switch_tab(AppTab::Profile);
        assert_eq!(state.profile.form.value(Field::Email), "a@b.com");
        type_into(&mut state, Field::Name, "Ana Maria");

        let Some(NetworkCommand::UpdateProfile { id, request }) = state.submit() else {
            panic!("expected a profile update");
        };
        assert_eq!(request.name, "Ana Maria");
        assert_eq!(request.password, None);
        assert_eq!(request.old_password, None);
        assert_eq!(request.confirm_password, None);
        assert_eq!(state.session.user().unwrap().name, "Ana", "not applied before confirmation");

        state.handle_response(NetworkResponse::ProfileUpdated { id, result: Ok(()) });
        assert_eq!(state.session.user().unwrap().name, "Ana Maria");
        assert_eq!(state.toast.as_ref().unwrap().message, SUCCESS_PROFILE_UPDATE);
    }

    #[test]
    fn test_profile_password_confirmation_must_match() {
        let mut state = signed_in();
        state.switch_tab(AppTab::Profile);
        type_into(&mut state, Field::OldPassword, "secret1");
        type_into(&mut state, Field::Password, "secret2");
        type_into(&mut state, Field::PasswordConfirm, "secret3");

        assert!(state.submit().is_none());
        assert!(state.profile.form.submission.errors.get(Field::PasswordConfirm).is_some());

        type_into(&mut state, Field::PasswordConfirm, "secret2");
        let Some(NetworkCommand::UpdateProfile { request, .. }) = state.submit() else {
            panic!("expected a profile update");
        };
        assert_eq!(request.old_password.as_deref(), Some("secret1"));
        assert_eq!(request.password.as_deref(), Some("secret2"));
    }

    #[test]
    fn test_profile_failure_leaves_user_untouched() {
        let mut state = signed_in();
        state.switch_tab(AppTab::Profile);
        type_into(&mut state, Field::Name, "Bia");
        let id = state.submit().and_then(|c| c.id()).unwrap();

        state.handle_response(NetworkResponse::ProfileUpdated {
            id,
            result: Err(app_error("Old password does not match")),
        });
        assert_eq!(state.session.user().unwrap().name, "Ana");
        assert_eq!(state.toast.as_ref().unwrap().message, "Old password does not match");
        assert_eq!(state.profile.form.value(Field::Name), "Bia");
    }

    #[test]
    fn test_oversized_avatar_never_uploads() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("photo.png");
        let file = std::fs::File::create(&path).unwrap();
        file.set_len(6 * 1024 * 1024).unwrap();

        let mut state = signed_in();
        state.switch_tab(AppTab::Profile);
        state.open_avatar_input();
        state.profile.avatar_path_input = path.display().to_string();

        assert!(state.upload_avatar().is_none());
        assert!(!state.profile.avatar.is_submitting());
        let toast = state.toast.as_ref().unwrap();
        assert_eq!(toast.kind, ToastKind::Error);
        assert!(toast.message.contains("5MB"));
    }

    #[test]
    fn test_avatar_upload_applies_server_reference() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("photo.PNG");
        std::fs::write(&path, b"png").unwrap();

        let mut state = signed_in();
        state.switch_tab(AppTab::Profile);
        state.open_avatar_input();
        state.profile.avatar_path_input = path.display().to_string();

        let Some(NetworkCommand::UploadAvatar { id, avatar }) = state.upload_avatar() else {
            panic!("expected an upload");
        };
        assert_eq!(avatar.file_name, "ana.png");
        assert!(!state.profile.show_avatar_input);

        let mut updated = ana();
        updated.avatar = Some("ana.png".to_string());
        state.handle_response(NetworkResponse::AvatarUploaded { id, result: Ok(updated) });
        assert_eq!(state.session.user().unwrap().avatar.as_deref(), Some("ana.png"));
        assert_eq!(
            state.to_render_state().user.unwrap().avatar_url.as_deref(),
            Some("http://localhost:3333/avatar/ana.png")
        );
    }

    #[test]
    fn test_history_registration_shows_server_message() {
        let mut state = signed_in();
        state.startup_commands();
        state.home.exercises = vec![exercise("7")];

        let cmds = state.open_exercise();
        assert_eq!(state.screen(), Screen::Exercise);
        assert!(matches!(&cmds[0], NetworkCommand::FetchExercise { exercise_id, .. } if exercise_id == "7"));

        let id = state.mark_completed().and_then(|c| c.id()).unwrap();
        assert!(state.mark_completed().is_none());
        state.handle_response(NetworkResponse::HistoryRegistered {
            id,
            result: Err(app_error("Exercise already logged today")),
        });
        assert_eq!(state.toast.as_ref().unwrap().message, "Exercise already logged today");
        assert_eq!(state.screen(), Screen::Exercise);
    }

    #[test]
    fn test_history_registration_opens_history() {
        let mut state = signed_in();
        state.startup_commands();
        state.home.exercises = vec![exercise("7")];
        state.open_exercise();

        let id = state.mark_completed().and_then(|c| c.id()).unwrap();
        let cmds = state.handle_response(NetworkResponse::HistoryRegistered { id, result: Ok(()) });
        assert_eq!(state.screen(), Screen::History);
        let history_id = match &cmds[..] {
            [NetworkCommand::FetchHistory { id }] => *id,
            other => panic!("unexpected commands: {other:?}"),
        };

        let days = vec![HistoryDay {
            title: "16.10.26".to_string(),
            data: vec![HistoryEntry {
                id: "1".to_string(),
                name: "Rosca punho".to_string(),
                group: "antebraço".to_string(),
                hour: "08:15".to_string(),
                created_at: "2026-10-16 08:15:00".to_string(),
            }],
        }];
        state.handle_response(NetworkResponse::History { id: history_id, result: Ok(days) });
        assert_eq!(state.to_render_state().history.days.len(), 1);
    }

    #[test]
    fn test_history_scroll_stops_at_last_line() {
        let mut state = signed_in();
        state.scroll_down();
        assert_eq!(state.history.scroll, 0);

        let entry = |id: &str| HistoryEntry {
            id: id.to_string(),
            name: "Remada".to_string(),
            group: "costas".to_string(),
            hour: "07:00".to_string(),
            created_at: "2026-10-15 07:00:00".to_string(),
        };
        state.history.days = vec![
            HistoryDay { title: "16.10.26".to_string(), data: vec![entry("1"), entry("2")] },
            HistoryDay { title: "15.10.26".to_string(), data: vec![entry("3")] },
        ];
        assert_eq!(state.history.line_count(), 7);

        for _ in 0..20 {
            state.scroll_down();
        }
        assert_eq!(state.history.scroll, 6);
        state.scroll_up();
        assert_eq!(state.history.scroll, 5);

        let id = state.history.load.restart(&mut state.ids);
        state.handle_response(NetworkResponse::History {
            id,
            result: Ok(vec![HistoryDay { title: "17.10.26".to_string(), data: vec![entry("4")] }]),
        });
        assert_eq!(state.history.scroll, 2);
    }

    #[test]
    fn test_late_details_after_leaving_are_dropped() {
        let mut state = signed_in();
        state.startup_commands();
        state.home.exercises = vec![exercise("7")];
        let id = state.open_exercise()[0].id().unwrap();

        state.go_back();
        assert_eq!(state.screen(), Screen::Home);
        state.handle_response(NetworkResponse::ExerciseDetails {
            id,
            result: Ok(exercise("7")),
        });
        assert!(state.exercise.details.is_none());
    }

    #[test]
    fn test_sign_out_returns_to_sign_in() {
        let mut state = signed_in();
        let groups_id = state.startup_commands()[1].id().unwrap();
        state.switch_tab(AppTab::Profile);

        let cmds = state.sign_out();
        assert!(matches!(cmds[..], [NetworkCommand::SetToken(None)]));
        assert_eq!(state.screen(), Screen::SignIn);

        state.handle_response(NetworkResponse::Groups {
            id: groups_id,
            result: Ok(vec!["back".to_string()]),
        });
        assert!(state.home.groups.is_empty());
    }

    #[test]
    fn test_sign_up_signs_in() {
        let mut state = signed_out();
        state.open_sign_up();
        assert_eq!(state.screen(), Screen::SignUp);
        type_into(&mut state, Field::Name, "Ana");
        type_into(&mut state, Field::Email, "a@b.com");
        type_into(&mut state, Field::Password, "secret1");
        type_into(&mut state, Field::PasswordConfirm, "secret1");

        let Some(NetworkCommand::SignUp { id, request }) = state.submit() else {
            panic!("expected a sign-up");
        };
        assert_eq!(request.name, "Ana");
        state.handle_response(NetworkResponse::SignedUp {
            id,
            result: Ok(session_for(ana())),
        });
        assert_eq!(state.screen(), Screen::Home);
        assert_eq!(state.toast.as_ref().unwrap().message, SUCCESS_SIGN_UP);
    }

    #[test]
    fn test_read_only_field_cannot_be_edited() {
        let mut state = signed_in();
        state.switch_tab(AppTab::Profile);
        state.profile.form.focused = 1;
        state.start_editing();
        assert_eq!(state.input_mode, InputMode::Normal);
    }
}
