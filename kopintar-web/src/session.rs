//! Browser-backed session state shared through context

use gloo_storage::{LocalStorage, Storage};
use kopintar_common::{guard, DeferredActions, Guarded, PendingAction, Session, TokenStore};
use leptos::*;

/// Bearer token persisted in LocalStorage
#[derive(Debug, Clone, Copy)]
pub struct LocalStorageTokenStore {
    key: &'static str,
}

impl LocalStorageTokenStore {
    pub fn new(key: &'static str) -> Self {
        Self { key }
    }
}

impl TokenStore for LocalStorageTokenStore {
    fn get(&self) -> Option<String> {
        LocalStorage::get::<String>(self.key)
            .ok()
            .filter(|t| !t.is_empty())
    }

    fn set(&self, token: &str) {
        if let Err(e) = LocalStorage::set(self.key, token) {
            logging::error!("Failed to persist token: {}", e);
        }
    }

    fn clear(&self) {
        LocalStorage::delete(self.key);
    }
}

/// Farmer id carried by a deferred list action
pub type PetaniAction = PendingAction<String>;

/// Reactive session handle, `Copy` so closures can capture it freely
#[derive(Clone, Copy)]
pub struct SessionContext {
    session: RwSignal<Session<LocalStorageTokenStore>>,
    deferred: RwSignal<DeferredActions<String>>,
    login_open: RwSignal<bool>,
}

impl SessionContext {
    pub fn new(store: LocalStorageTokenStore) -> Self {
        Self {
            session: create_rw_signal(Session::restore(store)),
            deferred: create_rw_signal(DeferredActions::new()),
            login_open: create_rw_signal(false),
        }
    }

    pub fn is_logged_in(&self) -> bool {
        self.session.with(|s| s.is_logged_in())
    }

    pub fn is_logged_in_untracked(&self) -> bool {
        self.session.with_untracked(|s| s.is_logged_in())
    }

    pub fn login(&self, token: &str) {
        self.session.update(|s| s.login(token));
        self.login_open.set(false);
    }

    pub fn logout(&self) {
        self.session.update(|s| s.logout());
        self.deferred.update(|d| d.cancel());
    }

    /// Token rejected by the backend
    pub fn expire(&self) {
        let changed = self
            .session
            .try_update(|s| s.expire())
            .unwrap_or(false);
        if changed {
            logging::warn!("Session expired, token cleared");
        }
    }

    /// Run `action` now, or remember it and open the login dialog
    pub fn guard(&self, action: PetaniAction) -> Option<PetaniAction> {
        let logged_in = self.is_logged_in_untracked();
        match self
            .deferred
            .try_update(|d| guard(logged_in, d, action))?
        {
            Guarded::Proceed(action) => Some(action),
            Guarded::NeedsLogin => {
                self.login_open.set(true);
                None
            }
        }
    }

    /// Pending action to replay, handed out once after login
    pub fn take_deferred(&self) -> Option<PetaniAction> {
        self.deferred.try_update(|d| d.take_on_login()).flatten()
    }

    /// Dialog dismissed without logging in
    pub fn close_login(&self) {
        self.login_open.set(false);
        self.deferred.update(|d| d.cancel());
    }

    pub fn login_open(&self) -> Signal<bool> {
        self.login_open.into()
    }
}

pub fn use_session() -> SessionContext {
    expect_context::<SessionContext>()
}
