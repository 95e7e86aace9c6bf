//! Authentication session and actions deferred until login

use std::cell::RefCell;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

pub const INVALID_CREDENTIALS: &str = "Username atau password salah";
pub const LOGIN_FAILED: &str = "Terjadi kesalahan saat login. Coba lagi.";

/// `POST /token` response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub token_type: Option<String>,
}

/// Persistent bearer token storage
pub trait TokenStore {
    fn get(&self) -> Option<String>;
    fn set(&self, token: &str);
    fn clear(&self);
}

/// In-memory store, shared between clones
#[derive(Debug, Clone, Default)]
pub struct MemoryTokenStore {
    token: Rc<RefCell<Option<String>>>,
}

impl TokenStore for MemoryTokenStore {
    fn get(&self) -> Option<String> {
        self.token.borrow().clone()
    }

    fn set(&self, token: &str) {
        *self.token.borrow_mut() = Some(token.to_string());
    }

    fn clear(&self) {
        self.token.borrow_mut().take();
    }
}

/// Logged-in state backed by a token store.
///
/// Presence of a stored token means logged in. Only `login`, `logout` and
/// `expire` change the state.
#[derive(Debug, Clone)]
pub struct Session<S: TokenStore> {
    store: S,
    logged_in: bool,
}

impl<S: TokenStore> Session<S> {
    /// Initialize from whatever token survived the last visit
    pub fn restore(store: S) -> Self {
        let logged_in = store.get().is_some_and(|t| !t.is_empty());
        Self { store, logged_in }
    }

    pub fn is_logged_in(&self) -> bool {
        self.logged_in
    }

    pub fn token(&self) -> Option<String> {
        self.store.get()
    }

    pub fn login(&mut self, token: &str) {
        self.store.set(token);
        self.logged_in = true;
    }

    pub fn logout(&mut self) {
        self.store.clear();
        self.logged_in = false;
    }

    /// Server rejected the token. Returns whether the state changed.
    pub fn expire(&mut self) -> bool {
        let was_logged_in = self.logged_in;
        self.logout();
        was_logged_in
    }
}

/// Mutation requested while logged out
#[derive(Debug, Clone, PartialEq)]
pub enum PendingAction<T> {
    Add,
    Edit(T),
    Delete(T),
}

/// Holds at most one pending action until the next login
#[derive(Debug, Clone, PartialEq)]
pub struct DeferredActions<T> {
    pending: Option<PendingAction<T>>,
}

impl<T> Default for DeferredActions<T> {
    fn default() -> Self {
        Self { pending: None }
    }
}

impl<T> DeferredActions<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces any earlier pending action
    pub fn defer(&mut self, action: PendingAction<T>) {
        self.pending = Some(action);
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// The action to replay after a successful login, handed out once
    pub fn take_on_login(&mut self) -> Option<PendingAction<T>> {
        self.pending.take()
    }

    /// Login dialog dismissed without logging in
    pub fn cancel(&mut self) {
        self.pending = None;
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Guarded<T> {
    Proceed(PendingAction<T>),
    NeedsLogin,
}

/// Run `action` now, or park it and ask for a login
pub fn guard<T>(
    logged_in: bool,
    deferred: &mut DeferredActions<T>,
    action: PendingAction<T>,
) -> Guarded<T> {
    if logged_in {
        Guarded::Proceed(action)
    } else {
        deferred.defer(action);
        Guarded::NeedsLogin
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_restore_from_store() {
        let store = MemoryTokenStore::default();
        assert!(!Session::restore(store.clone()).is_logged_in());
        store.set("abc");
        let session = Session::restore(store);
        assert!(session.is_logged_in());
        assert_eq!(session.token().as_deref(), Some("abc"));
    }

    #[test]
    fn test_login_logout_expire() {
        let store = MemoryTokenStore::default();
        let mut session = Session::restore(store.clone());
        session.login("tok");
        assert_eq!(store.get().as_deref(), Some("tok"));
        assert!(session.expire());
        assert!(!session.is_logged_in());
        assert_eq!(store.get(), None);
        assert!(!session.expire());
    }

    #[test]
    fn test_guard_defers_when_logged_out() {
        let mut deferred = DeferredActions::new();
        let outcome = guard(false, &mut deferred, PendingAction::Delete(7));
        assert_eq!(outcome, Guarded::NeedsLogin);
        assert!(deferred.is_pending());

        let outcome = guard(true, &mut deferred, PendingAction::Edit(3));
        assert_eq!(outcome, Guarded::Proceed(PendingAction::Edit(3)));
        assert_eq!(deferred.take_on_login(), Some(PendingAction::Delete(7)));
    }

    #[test]
    fn test_replay_happens_once() {
        let mut deferred: DeferredActions<u32> = DeferredActions::new();
        deferred.defer(PendingAction::Edit(1));
        deferred.defer(PendingAction::Add);
        assert_eq!(deferred.take_on_login(), Some(PendingAction::Add));
        assert_eq!(deferred.take_on_login(), None);
    }

    #[test]
    fn test_cancel_drops_pending() {
        let mut deferred = DeferredActions::new();
        deferred.defer(PendingAction::Delete("x"));
        deferred.cancel();
        assert_eq!(deferred.take_on_login(), None);
    }

    #[test]
    fn test_token_response_parses() {
        let resp: TokenResponse =
            serde_json::from_str(r#"{"access_token":"jwt","token_type":"bearer"}"#).unwrap();
        assert_eq!(resp.access_token, "jwt");
    }
}
