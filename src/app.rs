// SPDX-FileCopyrightText: 2024 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

use std::sync::{Arc, Mutex as StdMutex};

use futures_util::lock::Mutex;
use log::{debug, warn};

use crate::{
    catalog::Catalog,
    gate::AccessGate,
    latency::Latency,
    navigation::{Navigator, Route},
    notification::Notifier,
    session::{SessionManager, User},
    storage,
    view::{Dashboard, DomainView, Load, ProjectView, UnmountHandle},
};

pub(crate) type SessionStorage = Box<dyn storage::Storage<User>>;

// Each hop is a fallback or redirect. Two are enough for any real chain
// (project -> domain -> dashboard); the rest guards against loops.
const MAX_HOPS: usize = 4;

/// What ended up on screen after navigating.
#[derive(Debug)]
pub(crate) enum Page {
    Login,
    Signup,
    Dashboard(Dashboard),
    Domain(DomainView),
    Project(ProjectView),
    NotFound { path: String },
}

pub(crate) struct App {
    session: SessionManager<SessionStorage>,
    catalog: Arc<dyn Catalog>,
    navigator: Arc<Navigator>,
    gate: AccessGate,
    notifier: Arc<dyn Notifier>,
    mounted: StdMutex<Option<UnmountHandle>>,
}

impl App {
    pub(crate) fn new(
        storage: SessionStorage,
        catalog: Arc<dyn Catalog>,
        notifier: Arc<dyn Notifier>,
        latency: Latency,
    ) -> Self {
        let navigator = Arc::new(Navigator::new(Route::Root));
        Self {
            session: SessionManager::new(
                Arc::new(Mutex::new(storage)),
                Arc::clone(&notifier),
                Arc::clone(&navigator),
                latency.authenticate,
            ),
            catalog,
            gate: AccessGate::new(Arc::clone(&navigator)),
            navigator,
            notifier,
            mounted: StdMutex::new(None),
        }
    }

    /// Restores the remembered session, if any.
    pub(crate) async fn start(&self) {
        let _ = self.session.restore().await;
    }

    pub(crate) const fn session(&self) -> &SessionManager<SessionStorage> {
        &self.session
    }

    pub(crate) fn navigator(&self) -> &Navigator {
        &self.navigator
    }

    pub(crate) fn notifier(&self) -> &dyn Notifier {
        self.notifier.as_ref()
    }

    /// Drops whatever the page currently being loaded would have shown.
    pub(crate) fn unmount(&self) {
        if let Some(handle) = self.mounted.lock().ok().and_then(|mut mounted| mounted.take()) {
            handle.unmount();
        }
    }

    fn remount(&self, handle: UnmountHandle) {
        let previous = self
            .mounted
            .lock()
            .ok()
            .and_then(|mut mounted| mounted.replace(handle));
        if let Some(previous) = previous {
            previous.unmount();
        }
    }

    /// Navigates to `route` and loads the page that ends up showing,
    /// following redirects and not-found fallbacks.
    pub(crate) async fn open(&self, route: Route, search: Option<&str>) -> Page {
        let _ = self.navigator.navigate(route);

        let mut hops = 0;
        loop {
            let route = self.navigator.current();
            let page = self.mount(&route, search).await;
            hops += 1;

            match page {
                Some(page) if self.navigator.current() == route => return page,
                Some(page) if hops >= MAX_HOPS => {
                    warn!("Giving up following navigation after {} hops", hops);
                    return page;
                }
                None if hops >= MAX_HOPS => {
                    warn!("Giving up following navigation after {} hops", hops);
                    return Page::Login;
                }
                _ => debug!("Left {} for {}", route, self.navigator.current()),
            }
        }
    }

    async fn mount(&self, route: &Route, search: Option<&str>) -> Option<Page> {
        let session = self.session.snapshot();
        let catalog = self.catalog.as_ref();

        match *route {
            Route::Root | Route::Login => Some(Page::Login),
            Route::Signup => Some(Page::Signup),
            Route::NotFound { ref path } => Some(Page::NotFound { path: path.clone() }),
            Route::Dashboard => {
                let mut view = self.gate.render(route, &session, Dashboard::new)?;
                if let Some(term) = search {
                    view.set_search(term);
                }
                self.remount(view.unmount_handle());
                log_discarded(route, view.load(catalog).await);
                Some(Page::Dashboard(view))
            }
            Route::Domain { ref domain_id } => {
                let mut view = self
                    .gate
                    .render(route, &session, || DomainView::new(domain_id.clone()))?;
                self.remount(view.unmount_handle());
                log_discarded(route, view.load(catalog, &self.navigator).await);
                Some(Page::Domain(view))
            }
            Route::Project {
                ref domain_id,
                ref project_id,
            } => {
                let mut view = self.gate.render(route, &session, || {
                    ProjectView::new(domain_id.clone(), project_id.clone())
                })?;
                self.remount(view.unmount_handle());
                log_discarded(route, view.load(catalog, &self.navigator).await);
                Some(Page::Project(view))
            }
        }
    }

    pub(crate) fn render(&self, page: &Page) -> String {
        let body = match *page {
            Page::Login => {
                return "Log in with `ideaboard login <EMAIL>`. Don't have an account? \
                        Run `ideaboard signup <EMAIL> <NAME>`."
                    .to_owned()
            }
            Page::Signup => {
                return "Create an account with `ideaboard signup <EMAIL> <NAME>`.".to_owned()
            }
            Page::NotFound { ref path } => {
                return format!("Oops! Page not found (404): {path}");
            }
            Page::Dashboard(ref view) => view.render(),
            Page::Domain(ref view) => view.render(),
            Page::Project(ref view) => view.render(),
        };

        match self.session.snapshot().user() {
            Some(user) => format!("Hi, {}\n\n{body}", user.name),
            None => body,
        }
    }
}

fn log_discarded(route: &Route, load: Load) {
    if load == Load::Discarded {
        debug!("Page {} was unmounted before it finished loading", route);
    }
}

#[cfg(test)]
mod tests {
    use secrecy::SecretString;

    use crate::{
        catalog::StaticCatalog, metadata, notification::Recorder, storage::Memory,
        view::ViewState,
    };

    use super::*;

    async fn app() -> App {
        let app = App::new(
            Box::new(Memory::<User>::new(metadata::SESSION_SLOT)),
            Arc::new(StaticCatalog::builtin(Latency::instant()).unwrap()),
            Arc::new(Recorder::new()),
            Latency::instant(),
        );
        app.start().await;
        app
    }

    async fn logged_in_app() -> App {
        let app = app().await;
        let _ = app
            .session()
            .login(
                "demo@example.com",
                &SecretString::new("password".to_owned()),
            )
            .await
            .unwrap();
        app
    }

    #[tokio::test]
    async fn protected_routes_send_anonymous_users_to_login() {
        let app = app().await;

        for path in [
            "/dashboard",
            "/domain/web-development",
            "/domain/web-development/project/web-1",
        ] {
            let page = app.open(Route::parse(path), None).await;

            assert!(matches!(page, Page::Login), "{path}");
            assert_eq!(app.navigator().current(), Route::Login);
        }
    }

    #[tokio::test]
    async fn login_lands_on_dashboard() {
        let app = logged_in_app().await;
        assert_eq!(app.navigator().current(), Route::Dashboard);

        let page = app.open(app.navigator().current(), Some("secur")).await;

        let Page::Dashboard(ref view) = page else {
            panic!("expected the dashboard, got {page:?}");
        };
        assert_eq!(view.state().populated().map(Vec::len), Some(1));
        assert!(app.render(&page).starts_with("Hi, Demo User"));
    }

    #[tokio::test]
    async fn missing_domain_ends_on_dashboard() {
        let app = logged_in_app().await;

        let page = app.open(Route::domain("nonexistent"), None).await;

        assert!(matches!(page, Page::Dashboard(_)));
        assert_eq!(app.navigator().current(), Route::Dashboard);
    }

    #[tokio::test]
    async fn missing_project_ends_on_its_domain() {
        let app = logged_in_app().await;

        let page = app
            .open(Route::project("web-development", "nope"), None)
            .await;

        let Page::Domain(ref view) = page else {
            panic!("expected the domain page, got {page:?}");
        };
        assert_eq!(
            view.state().populated().map(|d| d.id.as_str()),
            Some("web-development")
        );
        assert_eq!(app.navigator().current(), Route::domain("web-development"));
    }

    #[tokio::test]
    async fn missing_project_in_missing_domain_ends_on_dashboard() {
        let app = logged_in_app().await;

        let page = app.open(Route::project("nonexistent", "nope"), None).await;

        assert!(matches!(page, Page::Dashboard(_)));
        assert_eq!(app.navigator().current(), Route::Dashboard);
    }

    #[tokio::test]
    async fn existing_project_renders() {
        let app = logged_in_app().await;

        let page = app
            .open(Route::parse("/domain/web-development/project/web-2"), None)
            .await;

        let Page::Project(ref view) = page else {
            panic!("expected the project page, got {page:?}");
        };
        assert!(matches!(view.state(), ViewState::Populated(_)));
        assert!(app.render(&page).contains("E-commerce Platform"));
    }

    #[tokio::test]
    async fn unknown_paths_render_not_found() {
        let app = app().await;

        let page = app.open(Route::parse("/settings"), None).await;

        assert!(app.render(&page).contains("Page not found (404): /settings"));
    }

    #[tokio::test]
    async fn logout_returns_to_login() {
        let app = logged_in_app().await;

        app.session().logout().await;
        let page = app.open(Route::Dashboard, None).await;

        assert!(matches!(page, Page::Login));
        assert!(!app.render(&page).contains("Hi,"));
    }
}
