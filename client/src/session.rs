//! Authentication state: the bearer token, the identity it proves, and the
//! page the app shows for it.
//!
//! [`SessionState`] holds the plain state transitions and keeps durable
//! storage in step through a [`TokenStore`]; [`Session`] is the reactive
//! handle components receive through context.

use gloo_storage::Storage;
use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

use fleetdash_shared::UserIdentity;

use crate::api::{ApiClient, ApiError};
use crate::config::TOKEN_STORAGE_KEY;

/// Durable storage for the bearer token.
pub trait TokenStore {
    fn load(&self) -> Option<String>;
    fn save(&self, token: &str);
    fn clear(&self);
}

/// `localStorage`, storing the token as a raw string (not JSON-encoded).
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalTokenStore;

impl TokenStore for LocalTokenStore {
    fn load(&self) -> Option<String> {
        gloo_storage::LocalStorage::raw()
            .get_item(TOKEN_STORAGE_KEY)
            .ok()
            .flatten()
    }

    fn save(&self, token: &str) {
        if gloo_storage::LocalStorage::raw()
            .set_item(TOKEN_STORAGE_KEY, token)
            .is_err()
        {
            log::warn!("could not persist auth token");
        }
    }

    fn clear(&self) {
        gloo_storage::LocalStorage::delete(TOKEN_STORAGE_KEY);
    }
}

/// Which top-level page is visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    /// A persisted token is being verified.
    Restoring,
    Login,
    Dashboard,
}

/// What startup should do with durable storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Restore {
    Anonymous,
    Verify(String),
}

/// Token and identity. Either both are present (verified) or neither is.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SessionState {
    token: Option<String>,
    user: Option<UserIdentity>,
}

impl SessionState {
    /// An empty stored token is dropped from storage too.
    pub fn restore(store: &impl TokenStore) -> Restore {
        match store.load() {
            Some(token) if !token.is_empty() => Restore::Verify(token),
            Some(_) => {
                store.clear();
                Restore::Anonymous
            }
            None => Restore::Anonymous,
        }
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn user(&self) -> Option<&UserIdentity> {
        self.user.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    /// Adopt a verified token and its identity, persisting the token.
    pub fn establish(&mut self, store: &impl TokenStore, token: String, user: UserIdentity) {
        store.save(&token);
        self.token = Some(token);
        self.user = Some(user.normalize());
    }

    /// Drop the token and identity, in memory and in storage.
    pub fn clear(&mut self, store: &impl TokenStore) {
        store.clear();
        self.token = None;
        self.user = None;
    }

    /// Apply the server's answer to a verification request.
    /// Returns whether the session is now authenticated.
    pub fn apply_verification(
        &mut self,
        store: &impl TokenStore,
        token: String,
        verdict: Result<UserIdentity, ApiError>,
    ) -> bool {
        match verdict {
            Ok(user) => self.establish(store, token, user),
            Err(e) => {
                log::warn!("Auth verification failed: {e}");
                self.clear(store);
            }
        }
        self.is_authenticated()
    }
}

/// Reactive session handle shared through context.
#[derive(Clone, Copy)]
pub struct Session {
    state: RwSignal<SessionState>,
    page: RwSignal<Page>,
    api: ApiClient,
}

impl Session {
    pub fn new(api: ApiClient) -> Self {
        Self {
            state: RwSignal::new(SessionState::default()),
            page: RwSignal::new(Page::Restoring),
            api,
        }
    }

    pub fn api(&self) -> ApiClient {
        self.api
    }

    pub fn page(&self) -> ReadSignal<Page> {
        self.page.read_only()
    }

    pub fn token_untracked(&self) -> Option<String> {
        self.state.with_untracked(|s| s.token().map(str::to_string))
    }

    pub fn user_key_untracked(&self) -> Option<String> {
        self.state
            .with_untracked(|s| s.user().and_then(UserIdentity::user_key))
    }

    pub fn username(&self) -> Option<String> {
        self.state
            .with(|s| s.user().map(|user| user.username.clone()))
    }

    /// Startup: verify a persisted token, or show the login page.
    pub fn restore(self) {
        match SessionState::restore(&LocalTokenStore) {
            Restore::Anonymous => self.page.set(Page::Login),
            Restore::Verify(token) => self.verify(token),
        }
    }

    pub fn verify(self, token: String) {
        self.page.set(Page::Restoring);
        spawn_local(async move {
            let verdict = self.api.verify(&token).await;
            let mut authenticated = false;
            self.state.update(|s| {
                authenticated = s.apply_verification(&LocalTokenStore, token, verdict);
            });
            self.page.set(if authenticated {
                Page::Dashboard
            } else {
                Page::Login
            });
        });
    }

    /// Token-set path used by a completed popup login.
    pub fn establish(self, token: String, user: UserIdentity) {
        log::info!("signed in as {}", user.username);
        self.state
            .update(|s| s.establish(&LocalTokenStore, token, user));
        self.page.set(Page::Dashboard);
    }

    pub fn logout(self) {
        self.state.update(|s| s.clear(&LocalTokenStore));
        self.page.set(Page::Login);
    }
}
