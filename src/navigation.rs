//! Route graphs
//!
//! Two mutually exclusive graphs: the auth graph (sign-in, sign-up) and the app
//! graph (home, history and profile tabs plus the exercise detail screen). Which one
//! is reachable is decided only by the session store.

use crate::session::SessionStore;

/// Screens reachable without a session
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AuthRoute {
    SignIn,
    SignUp,
}

/// Bottom tabs of the app graph
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum AppTab {
    #[default]
    Home,
    History,
    Profile,
}

impl AppTab {
    pub const ALL: [AppTab; 3] = [AppTab::Home, AppTab::History, AppTab::Profile];

    pub fn title(&self) -> &'static str {
        match self {
            AppTab::Home => "Home",
            AppTab::History => "History",
            AppTab::Profile => "Profile",
        }
    }
}

/// Screens reachable with a session
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AppRoute {
    Tab(AppTab),
    /// Not a tab: only reachable by opening an exercise
    Exercise { exercise_id: String },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Route {
    Auth(AuthRoute),
    App(AppRoute),
}

impl Route {
    pub fn home() -> Self {
        Route::App(AppRoute::Tab(AppTab::Home))
    }

    pub fn sign_in() -> Self {
        Route::Auth(AuthRoute::SignIn)
    }

    pub fn is_app(&self) -> bool {
        matches!(self, Route::App(_))
    }

    /// Tab highlighted in the tab bar, if any
    pub fn tab(&self) -> Option<AppTab> {
        match self {
            Route::App(AppRoute::Tab(tab)) => Some(*tab),
            _ => None,
        }
    }
}

/// Current route plus a back stack within the active graph
#[derive(Debug)]
pub struct Navigator {
    current: Route,
    back_stack: Vec<Route>,
}

impl Navigator {
    pub fn new(session: &SessionStore) -> Self {
        Navigator {
            current: Self::initial_route(session),
            back_stack: Vec::new(),
        }
    }

    fn initial_route(session: &SessionStore) -> Route {
        if session.is_authenticated() {
            Route::home()
        } else {
            Route::sign_in()
        }
    }

    pub fn current(&self) -> &Route {
        &self.current
    }

    /// Follow the session: switch graphs when the current one is no longer the
    /// reachable one. Returns true when the graph changed.
    pub fn sync_with_session(&mut self, session: &SessionStore) -> bool {
        if self.current.is_app() == session.is_authenticated() {
            return false;
        }
        self.current = Self::initial_route(session);
        self.back_stack.clear();
        true
    }

    /// Move to `route` within the current graph. Tabs replace the back stack,
    /// other screens push onto it. Returns false if the route is unreachable or
    /// already current.
    pub fn navigate(&mut self, route: Route) -> bool {
        if route.is_app() != self.current.is_app() || route == self.current {
            return false;
        }
        if route.tab().is_some() {
            self.back_stack.clear();
        } else {
            let previous = std::mem::replace(&mut self.current, route);
            self.back_stack.push(previous);
            return true;
        }
        self.current = route;
        true
    }

    /// Pop the back stack; a non-home tab with an empty stack falls back to Home.
    pub fn go_back(&mut self) -> bool {
        if let Some(previous) = self.back_stack.pop() {
            self.current = previous;
            return true;
        }
        match self.current.tab() {
            Some(tab) if tab != AppTab::Home => {
                self.current = Route::home();
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AuthSession, User};

    fn signed_in() -> SessionStore {
        let mut store = SessionStore::in_memory();
        store.sign_in(AuthSession {
            user: User {
                id: "1".to_string(),
                name: "Ana".to_string(),
                email: "a@b.com".to_string(),
                avatar: None,
                role: None,
            },
            token: "t".to_string(),
            refresh_token: None,
        });
        store
    }

    #[test]
    fn test_graph_follows_session() {
        let mut session = SessionStore::in_memory();
        let mut nav = Navigator::new(&session);
        assert_eq!(nav.current(), &Route::sign_in());

        assert!(nav.navigate(Route::Auth(AuthRoute::SignUp)));
        session = signed_in();
        assert!(nav.sync_with_session(&session));
        assert_eq!(nav.current(), &Route::home());
        assert!(!nav.go_back(), "auth screens must not be reachable from the app graph");

        session.sign_out();
        assert!(nav.sync_with_session(&session));
        assert_eq!(nav.current(), &Route::sign_in());
    }

    #[test]
    fn test_cross_graph_navigation_refused() {
        let session = SessionStore::in_memory();
        let mut nav = Navigator::new(&session);
        assert!(!nav.navigate(Route::home()));
        assert_eq!(nav.current(), &Route::sign_in());
    }

    #[test]
    fn test_exercise_detail_back_to_previous_tab() {
        let session = signed_in();
        let mut nav = Navigator::new(&session);
        let detail = Route::App(AppRoute::Exercise {
            exercise_id: "7".to_string(),
        });

        assert!(nav.navigate(detail.clone()));
        assert_eq!(nav.current().tab(), None);
        assert!(nav.go_back());
        assert_eq!(nav.current(), &Route::home());

        nav.navigate(detail);
        nav.navigate(Route::App(AppRoute::Tab(AppTab::History)));
        assert!(nav.go_back());
        assert_eq!(nav.current(), &Route::home());
    }
}
