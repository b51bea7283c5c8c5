// SPDX-FileCopyrightText: 2022-2024 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

use std::{sync::Arc, time::Duration};

use futures_util::lock::Mutex;
use log::{debug, info, warn};
use secrecy::{ExposeSecret as _, SecretString};
use serde::{Deserialize, Serialize};
use subtle::ConstantTimeEq as _;
use tokio::sync::watch;

use crate::{
    error::{self, Error},
    latency,
    navigation::{Navigator, Route},
    notification::{Notification, Notifier},
    rng, storage,
};

/// The identity kept for the logged-in user. Never carries a password.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct User {
    pub(crate) id: String,
    pub(crate) email: String,
    pub(crate) name: String,
}

impl User {
    /// Records that fail this are refused by `signup` and discarded by
    /// `restore`.
    fn check_shape(&self) -> Result<(), &'static str> {
        if self.id.is_empty() {
            Err("empty id")
        } else if self.email.is_empty() {
            Err("empty email")
        } else if self.name.is_empty() {
            Err("empty name")
        } else {
            Ok(())
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct Session {
    user: Option<User>,
    loading: bool,
}

impl Session {
    #[cfg(test)]
    pub(crate) const fn signed_in(user: User) -> Self {
        Self {
            user: Some(user),
            loading: false,
        }
    }

    pub(crate) const fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub(crate) const fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    pub(crate) const fn is_loading(&self) -> bool {
        self.loading
    }
}

struct Credential {
    id: &'static str,
    email: &'static str,
    password: SecretString,
    name: &'static str,
}

impl Credential {
    fn seeds() -> Vec<Self> {
        vec![
            Self {
                id: "1",
                email: "demo@example.com",
                password: SecretString::new("password".to_owned()),
                name: "Demo User",
            },
            Self {
                id: "2",
                email: "test@example.com",
                password: SecretString::new("password".to_owned()),
                name: "Test User",
            },
        ]
    }

    fn matches(&self, email: &str, password: &SecretString) -> bool {
        let email_matches = self.email.as_bytes().ct_eq(email.as_bytes());
        let password_matches = self
            .password
            .expose_secret()
            .as_bytes()
            .ct_eq(password.expose_secret().as_bytes());
        (email_matches & password_matches).into()
    }

    fn identity(&self) -> User {
        User {
            id: self.id.to_owned(),
            email: self.email.to_owned(),
            name: self.name.to_owned(),
        }
    }
}

/// Marks the session as loading until dropped.
struct Loading<'state> {
    state: &'state watch::Sender<Session>,
}

impl<'state> Loading<'state> {
    fn start(state: &'state watch::Sender<Session>) -> Self {
        state.send_modify(|session| session.loading = true);
        Self { state }
    }
}

impl Drop for Loading<'_> {
    fn drop(&mut self) {
        self.state.send_modify(|session| session.loading = false);
    }
}

/// Owns the current session and mirrors it into durable storage.
pub(crate) struct SessionManager<Storage: storage::Storage<User>> {
    storage: Arc<Mutex<Storage>>,
    notifier: Arc<dyn Notifier>,
    navigator: Arc<Navigator>,
    credentials: Vec<Credential>,
    latency: Duration,
    state: watch::Sender<Session>,
}

impl<Storage: storage::Storage<User>> SessionManager<Storage> {
    pub(crate) fn new(
        storage: Arc<Mutex<Storage>>,
        notifier: Arc<dyn Notifier>,
        navigator: Arc<Navigator>,
        latency: Duration,
    ) -> Self {
        let (state, _) = watch::channel(Session {
            user: None,
            loading: true,
        });
        Self {
            storage,
            notifier,
            navigator,
            credentials: Credential::seeds(),
            latency,
            state,
        }
    }

    pub(crate) fn snapshot(&self) -> Session {
        self.state.borrow().clone()
    }

    pub(crate) fn subscribe(&self) -> watch::Receiver<Session> {
        self.state.subscribe()
    }

    /// Picks up the user remembered by a previous run. Records that cannot be
    /// read back are discarded and the session starts out empty.
    pub(crate) async fn restore(&self) -> Option<User> {
        let restored = {
            let mut storage = self.storage.lock().await;
            let slot = storage.slot().to_owned();
            let loaded = storage.get().await.and_then(|user| match user {
                Some(u) => u.check_shape().map(|()| Some(u)).map_err(|reason| {
                    error::Storage::Malformed {
                        slot: slot.clone(),
                        reason: reason.to_owned(),
                    }
                    .into()
                }),
                None => Ok(None),
            });

            match loaded {
                Ok(user) => user,
                Err(e @ Error::Storage(error::Storage::Malformed { .. })) => {
                    warn!("Discarding stored session: {}", e);
                    if let Err(e) = storage.clear().await {
                        warn!("Could not remove stored session: {}", e);
                    }
                    None
                }
                Err(e) => {
                    warn!("Could not read stored session: {}", e);
                    None
                }
            }
        };

        match restored {
            Some(ref user) => info!("Restored session for {}", user.email),
            None => debug!("No stored session to restore"),
        }
        self.state.send_modify(|session| {
            session.user = restored.clone();
            session.loading = false;
        });
        restored
    }

    pub(crate) async fn login(
        &self,
        email: &str,
        password: &SecretString,
    ) -> Result<User, error::Auth> {
        let _loading = Loading::start(&self.state);
        latency::simulate(self.latency).await;

        let Some(user) = self
            .credentials
            .iter()
            .find(|credential| credential.matches(email, password))
            .map(Credential::identity)
        else {
            return Err(self.reject("Login failed", error::Auth::InvalidCredentials));
        };

        self.establish(&user).await;
        self.notifier.notify(Notification::normal(
            "Login successful",
            format!("Welcome back, {}!", user.name),
        ));
        let _ = self.navigator.navigate(Route::Dashboard);
        Ok(user)
    }

    /// Creates an account for `email`. The password is not kept anywhere.
    pub(crate) async fn signup(
        &self,
        email: &str,
        _password: &SecretString,
        name: &str,
    ) -> Result<User, error::Auth> {
        let _loading = Loading::start(&self.state);
        latency::simulate(self.latency).await;

        let user = User {
            id: rng::uuid().to_string(),
            email: email.to_owned(),
            name: name.to_owned(),
        };
        if let Err(reason) = user.check_shape() {
            return Err(self.reject("Signup failed", error::Auth::Incomplete(reason)));
        }
        if self.credentials.iter().any(|c| c.email == email) {
            return Err(self.reject("Signup failed", error::Auth::DuplicateEmail));
        }

        self.establish(&user).await;
        self.notifier.notify(Notification::normal(
            "Account created",
            "Your account has been created successfully.",
        ));
        let _ = self.navigator.navigate(Route::Dashboard);
        Ok(user)
    }

    pub(crate) async fn logout(&self) {
        if let Some(user) = self.state.borrow().user() {
            info!("Logging out {}", user.email);
        }
        self.state.send_modify(|session| session.user = None);
        if let Err(e) = self.storage.lock().await.clear().await {
            warn!("Could not remove stored session: {}", e);
        }
        self.notifier.notify(Notification::normal(
            "Logged out",
            "You have been logged out successfully.",
        ));
        let _ = self.navigator.navigate(Route::Login);
    }

    fn reject(&self, title: &str, reason: error::Auth) -> error::Auth {
        debug!("{}: {}", title, reason);
        self.notifier
            .notify(Notification::destructive(title, reason.to_string()));
        reason
    }

    async fn establish(&self, user: &User) {
        info!("Session established for {}", user.email);
        self.state.send_modify(|session| session.user = Some(user.clone()));
        if let Err(e) = self.storage.lock().await.update(user).await {
            warn!("Could not store session: {}", e);
            self.notifier.notify(Notification::destructive(
                "Session not saved",
                e.to_string(),
            ));
        }
    }
}
