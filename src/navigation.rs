// SPDX-FileCopyrightText: 2024 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

use std::fmt;

use log::debug;
use tokio::sync::watch;
use url::Url;

const BASE_URL: &str = "ideaboard://app/";

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum Route {
    Root,
    Login,
    Signup,
    Dashboard,
    Domain {
        domain_id: String,
    },
    Project {
        domain_id: String,
        project_id: String,
    },
    NotFound {
        path: String,
    },
}

impl Route {
    pub(crate) fn domain<S: Into<String>>(domain_id: S) -> Self {
        Self::Domain {
            domain_id: domain_id.into(),
        }
    }

    pub(crate) fn project<D: Into<String>, P: Into<String>>(domain_id: D, project_id: P) -> Self {
        Self::Project {
            domain_id: domain_id.into(),
            project_id: project_id.into(),
        }
    }

    /// Resolves a client-side path. Query strings, fragments and trailing
    /// slashes do not affect the result.
    pub(crate) fn parse(path: &str) -> Self {
        let not_found = || Self::NotFound {
            path: path.to_owned(),
        };

        let Ok(url) = Url::parse(BASE_URL).and_then(|base| base.join(path)) else {
            return not_found();
        };
        let Some(segments) = url.path_segments() else {
            return not_found();
        };
        let segments = segments.filter(|s| !s.is_empty()).collect::<Vec<_>>();

        match segments.as_slice() {
            [] => Self::Root,
            ["login"] => Self::Login,
            ["signup"] => Self::Signup,
            ["dashboard"] => Self::Dashboard,
            ["domain", domain_id] => Self::domain(*domain_id),
            ["domain", domain_id, "project", project_id] => Self::project(*domain_id, *project_id),
            _ => not_found(),
        }
    }

    /// Whether the access gate has to let this route through.
    pub(crate) const fn is_protected(&self) -> bool {
        match *self {
            Self::Dashboard | Self::Domain { .. } | Self::Project { .. } => true,
            Self::Root | Self::Login | Self::Signup | Self::NotFound { .. } => false,
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::Root => f.write_str("/"),
            Self::Login => f.write_str("/login"),
            Self::Signup => f.write_str("/signup"),
            Self::Dashboard => f.write_str("/dashboard"),
            Self::Domain { ref domain_id } => write!(f, "/domain/{domain_id}"),
            Self::Project {
                ref domain_id,
                ref project_id,
            } => write!(f, "/domain/{domain_id}/project/{project_id}"),
            Self::NotFound { ref path } => f.write_str(path),
        }
    }
}

/// Holds the current route. Subscribers observe every change.
pub(crate) struct Navigator {
    current: watch::Sender<Route>,
}

impl Navigator {
    pub(crate) fn new(initial: Route) -> Self {
        let (current, _) = watch::channel(initial);
        Self { current }
    }

    pub(crate) fn current(&self) -> Route {
        self.current.borrow().clone()
    }

    /// Moves to `route`. Navigating to the route we are already on does
    /// nothing and returns `false`.
    pub(crate) fn navigate(&self, route: Route) -> bool {
        self.current.send_if_modified(|current| {
            if *current == route {
                return false;
            }
            debug!("Navigating from {} to {}", current, route);
            *current = route;
            true
        })
    }

    pub(crate) fn subscribe(&self) -> watch::Receiver<Route> {
        self.current.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn documented_paths_round_trip() {
        for (path, route) in [
            ("/", Route::Root),
            ("/login", Route::Login),
            ("/signup", Route::Signup),
            ("/dashboard", Route::Dashboard),
            ("/domain/web-development", Route::domain("web-development")),
            (
                "/domain/web-development/project/web-2",
                Route::project("web-development", "web-2"),
            ),
        ] {
            assert_eq!(Route::parse(path), route);
            assert_eq!(route.to_string(), path);
        }
    }

    #[test]
    fn decorations_are_ignored() {
        assert_eq!(Route::parse("dashboard/"), Route::Dashboard);
        assert_eq!(Route::parse("/dashboard?tab=1#top"), Route::Dashboard);
        assert_eq!(
            Route::parse("/domain/cybersecurity/"),
            Route::domain("cybersecurity")
        );
    }

    #[test]
    fn unknown_paths_are_not_found() {
        for path in ["/settings", "/domain", "/domain/a/b", "/domain/a/project"] {
            assert_eq!(
                Route::parse(path),
                Route::NotFound {
                    path: path.to_owned()
                }
            );
        }
    }

    #[test]
    fn only_catalog_routes_are_protected() {
        assert!(Route::Dashboard.is_protected());
        assert!(Route::domain("x").is_protected());
        assert!(Route::project("x", "y").is_protected());
        assert!(!Route::Root.is_protected());
        assert!(!Route::Login.is_protected());
        assert!(!Route::Signup.is_protected());
        assert!(!Route::parse("/nope").is_protected());
    }

    #[test]
    fn navigating_to_current_route_is_a_no_op() {
        let navigator = Navigator::new(Route::Login);
        let changes = navigator.subscribe();

        assert!(!navigator.navigate(Route::Login));
        assert!(!changes.has_changed().unwrap_or(true));

        assert!(navigator.navigate(Route::Dashboard));
        assert!(changes.has_changed().unwrap_or(false));
        assert_eq!(navigator.current(), Route::Dashboard);
    }
}
