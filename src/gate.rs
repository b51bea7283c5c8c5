// SPDX-FileCopyrightText: 2024 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

use std::sync::Arc;

use log::info;

use crate::{
    navigation::{Navigator, Route},
    session::Session,
};

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum Decision {
    Allow,
    Redirect(Route),
}

/// Keeps anonymous sessions out of protected routes. The decision is taken
/// from a snapshot of the session at the time of rendering.
pub(crate) struct AccessGate {
    navigator: Arc<Navigator>,
}

impl AccessGate {
    pub(crate) fn new(navigator: Arc<Navigator>) -> Self {
        Self { navigator }
    }

    pub(crate) fn check(route: &Route, session: &Session) -> Decision {
        if route.is_protected() && !session.is_authenticated() {
            Decision::Redirect(Route::Login)
        } else {
            Decision::Allow
        }
    }

    /// Produces the protected content, or nothing if the session may not see
    /// it. Refused renders send the navigator to the login page unless it is
    /// already there.
    pub(crate) fn render<T, F: FnOnce() -> T>(
        &self,
        route: &Route,
        session: &Session,
        content: F,
    ) -> Option<T> {
        match Self::check(route, session) {
            Decision::Allow => Some(content()),
            Decision::Redirect(target) => {
                if self.navigator.navigate(target) {
                    info!("Redirected away from {} because nobody is logged in", route);
                }
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::session::User;

    use super::*;

    fn someone() -> Session {
        Session::signed_in(User {
            id: "1".to_owned(),
            email: "demo@example.com".to_owned(),
            name: "Demo User".to_owned(),
        })
    }

    #[test]
    fn anonymous_sessions_are_redirected_from_protected_routes() {
        for route in [
            Route::Dashboard,
            Route::domain("cybersecurity"),
            Route::project("cybersecurity", "sec-1"),
        ] {
            assert_eq!(
                AccessGate::check(&route, &Session::default()),
                Decision::Redirect(Route::Login)
            );
            assert_eq!(AccessGate::check(&route, &someone()), Decision::Allow);
        }
    }

    #[test]
    fn public_routes_are_always_allowed() {
        for route in [Route::Root, Route::Login, Route::Signup, Route::parse("/x")] {
            assert_eq!(AccessGate::check(&route, &Session::default()), Decision::Allow);
        }
    }

    #[test]
    fn refused_render_navigates_to_login_once() {
        let navigator = Arc::new(Navigator::new(Route::Dashboard));
        let gate = AccessGate::new(Arc::clone(&navigator));
        let changes = navigator.subscribe();

        let rendered = gate.render(&Route::Dashboard, &Session::default(), || "dashboard");
        assert_eq!(rendered, None);
        assert_eq!(navigator.current(), Route::Login);
        assert!(changes.has_changed().unwrap_or(false));

        let changes = navigator.subscribe();
        let rendered = gate.render(&Route::Dashboard, &Session::default(), || "dashboard");
        assert_eq!(rendered, None);
        assert!(!changes.has_changed().unwrap_or(true));
    }

    #[test]
    fn allowed_render_produces_content() {
        let navigator = Arc::new(Navigator::new(Route::Dashboard));
        let gate = AccessGate::new(Arc::clone(&navigator));

        let rendered = gate.render(&Route::Dashboard, &someone(), || "dashboard");

        assert_eq!(rendered, Some("dashboard"));
        assert_eq!(navigator.current(), Route::Dashboard);
    }
}
