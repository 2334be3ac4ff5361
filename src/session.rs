// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Client-side session: who is logged in, and the credential proving it.
//!
//! [`SessionStore`] is built once at startup and shared by reference with
//! every view and route guard. It is the only writer of [`Session`];
//! observers get snapshots or subscribe to changes through a
//! [`tokio::sync::watch`] channel.
//!
//! Lifecycle: `loading` → `authenticated` | `unauthenticated`. After
//! [`SessionStore::bootstrap`] finishes, `loading` stays false forever.

use crate::error::{ActionFailure, ActionResult, ClientError};
use crate::models::{AuthResponse, Credential, Identity};
use crate::services::BackendClient;
use crate::storage::{CredentialStore, CREDENTIAL_KEY};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, RwLock};
use tokio::sync::watch;

pub const LOGIN_FAILED: &str = "Login failed";
pub const REGISTRATION_FAILED: &str = "Registration failed";
pub const MAKE_ADMIN_FAILED: &str = "Failed to make admin";
pub const NOT_LOGGED_IN: &str = "Not logged in";
pub const SESSION_CHANGED: &str = "Session changed, please try again";

/// Observable session state.
///
/// `authenticated` is derived from the identity, so
/// `is_authenticated() == identity().is_some()` always holds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    identity: Option<Identity>,
    loading: bool,
}

impl Session {
    /// State before bootstrap has finished.
    pub fn loading() -> Self {
        Self {
            identity: None,
            loading: true,
        }
    }

    pub fn anonymous() -> Self {
        Self {
            identity: None,
            loading: false,
        }
    }

    pub fn authenticated(identity: Identity) -> Self {
        Self {
            identity: Some(identity),
            loading: false,
        }
    }

    pub fn identity(&self) -> Option<&Identity> {
        self.identity.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.identity.is_some()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn is_admin(&self) -> bool {
        self.identity.as_ref().is_some_and(|i| i.is_admin)
    }
}

/// Owner of the session state and the persisted credential.
pub struct SessionStore {
    backend: BackendClient,
    store: Arc<dyn CredentialStore>,
    credential: RwLock<Option<Credential>>,
    state: watch::Sender<Session>,
    bootstrapped: AtomicBool,
    /// Bumped on every login, registration and logout. Only changed while
    /// holding the `state` lock, so a closure passed to `send_modify` sees
    /// a stable value.
    epoch: AtomicU64,
}

/// Clears the bootstrap flag if bootstrap is dropped before publishing.
struct BootstrapGuard<'a> {
    flag: &'a AtomicBool,
    armed: bool,
}

impl Drop for BootstrapGuard<'_> {
    fn drop(&mut self) {
        if self.armed {
            self.flag.store(false, Ordering::SeqCst);
        }
    }
}

impl SessionStore {
    /// Create a store in the `loading` state. Call [`bootstrap`](Self::bootstrap) next.
    pub fn new(backend: BackendClient, store: Arc<dyn CredentialStore>) -> Self {
        let (state, _) = watch::channel(Session::loading());
        Self {
            backend,
            store,
            credential: RwLock::new(None),
            state,
            bootstrapped: AtomicBool::new(false),
            epoch: AtomicU64::new(0),
        }
    }

    pub fn backend(&self) -> &BackendClient {
        &self.backend
    }

    /// Current session snapshot.
    pub fn snapshot(&self) -> Session {
        self.state.borrow().clone()
    }

    /// Receiver notified on every session change.
    pub fn subscribe(&self) -> watch::Receiver<Session> {
        self.state.subscribe()
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.borrow().is_authenticated()
    }

    pub fn is_admin(&self) -> bool {
        self.state.borrow().is_admin()
    }

    /// Credential of the logged-in user, if any.
    pub fn credential(&self) -> Option<Credential> {
        self.credential
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    /// Credential for an authenticated API call.
    pub fn require_credential(&self) -> Result<Credential, ClientError> {
        if !self.is_authenticated() {
            return Err(ClientError::Unauthorized(None));
        }
        self.credential().ok_or(ClientError::Unauthorized(None))
    }

    /// Restore the session from the persisted credential.
    ///
    /// Never fails: any problem (no credential, rejected credential,
    /// network error, unreadable store) ends in the unauthenticated state,
    /// and a credential that could not be validated is removed from the
    /// store. Only the first completed call does any work. A login or
    /// logout that happens while the stored credential is being validated
    /// wins over the validation result.
    pub async fn bootstrap(&self) {
        if self.bootstrapped.swap(true, Ordering::SeqCst) {
            tracing::debug!("Session already bootstrapped");
            return;
        }
        let mut guard = BootstrapGuard {
            flag: &self.bootstrapped,
            armed: true,
        };
        let epoch = self.epoch.load(Ordering::SeqCst);

        let token = match self.store.load(CREDENTIAL_KEY) {
            Ok(token) => token,
            Err(err) => {
                tracing::warn!(error = %err, "Failed to read stored credential");
                None
            }
        };

        let outcome = match token {
            None => {
                tracing::debug!("No stored credential");
                None
            }
            Some(token) => {
                let credential = Credential::new(token);
                match self.backend.current_user(&credential).await {
                    Ok(identity) => Some(Ok((credential, identity))),
                    Err(err) => Some(Err(err)),
                }
            }
        };

        self.state.send_modify(|session| {
            session.loading = false;
            if self.epoch.load(Ordering::SeqCst) != epoch {
                tracing::debug!("Session changed during bootstrap, discarding result");
                return;
            }
            match outcome {
                None => {}
                Some(Ok((credential, identity))) => {
                    tracing::info!(user_id = %identity.id, "Session restored");
                    self.set_credential(Some(credential));
                    session.identity = Some(identity);
                }
                Some(Err(err)) => {
                    tracing::info!(error = %err, "Stored credential rejected, logging out");
                    self.forget_credential();
                }
            }
        });
        guard.armed = false;
    }

    pub async fn login(&self, email: &str, password: &str) -> ActionResult<Identity> {
        match self.backend.login(email, password).await {
            Ok(auth) => self.establish(auth, LOGIN_FAILED),
            Err(err) => {
                tracing::warn!(error = %err, "Login failed");
                Err(err.into_failure(LOGIN_FAILED))
            }
        }
    }

    pub async fn register(&self, name: &str, email: &str, password: &str) -> ActionResult<Identity> {
        match self.backend.register(name, email, password).await {
            Ok(auth) => self.establish(auth, REGISTRATION_FAILED),
            Err(err) => {
                tracing::warn!(error = %err, "Registration failed");
                Err(err.into_failure(REGISTRATION_FAILED))
            }
        }
    }

    /// Forget the credential and return to the unauthenticated state.
    pub fn logout(&self) {
        self.state.send_modify(|session| {
            self.epoch.fetch_add(1, Ordering::SeqCst);
            self.forget_credential();
            session.identity = None;
        });
        tracing::info!("Logged out");
    }

    /// Promote the current user to admin. Returns the server's message.
    ///
    /// Requires an authenticated session; otherwise fails locally without
    /// contacting the server. If the session changes while the request is
    /// in flight, the response is not applied.
    pub async fn make_admin(&self) -> ActionResult<String> {
        let epoch = self.epoch.load(Ordering::SeqCst);
        let credential = match self.require_credential() {
            Ok(credential) => credential,
            Err(_) => {
                tracing::warn!("make_admin called without an authenticated session");
                return Err(ActionFailure::new(NOT_LOGGED_IN));
            }
        };

        match self.backend.make_admin(&credential).await {
            Ok(response) => {
                let user_id = response.user.id.clone();
                let mut user = Some(response.user);
                let applied = self.state.send_if_modified(|session| {
                    if self.epoch.load(Ordering::SeqCst) != epoch {
                        return false;
                    }
                    session.identity = user.take();
                    true
                });
                if !applied {
                    tracing::warn!(user_id = %user_id, "Session changed during make admin, discarding response");
                    return Err(ActionFailure::new(SESSION_CHANGED));
                }
                tracing::info!(user_id = %user_id, "Privileges updated");
                Ok(response.message)
            }
            Err(err) => {
                tracing::warn!(error = %err, "Make admin failed");
                Err(err.into_failure(MAKE_ADMIN_FAILED))
            }
        }
    }

    fn establish(&self, auth: AuthResponse, fallback: &str) -> ActionResult<Identity> {
        let credential = Credential::new(auth.token);
        let identity = auth.user;
        let mut saved = Ok(());
        self.state.send_if_modified(|session| {
            if let Err(err) = self.store.save(CREDENTIAL_KEY, credential.expose()) {
                saved = Err(err);
                return false;
            }
            self.epoch.fetch_add(1, Ordering::SeqCst);
            self.set_credential(Some(credential.clone()));
            session.identity = Some(identity.clone());
            true
        });
        if let Err(err) = saved {
            tracing::error!(error = %err, "Failed to persist credential");
            return Err(ClientError::from(err).into_failure(fallback));
        }

        tracing::info!(user_id = %identity.id, "Logged in");
        Ok(identity)
    }

    fn set_credential(&self, credential: Option<Credential>) {
        *self.credential.write().unwrap_or_else(|e| e.into_inner()) = credential;
    }

    fn forget_credential(&self) {
        self.set_credential(None);
        if let Err(err) = self.store.clear(CREDENTIAL_KEY) {
            tracing::warn!(error = %err, "Failed to clear stored credential");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn identity(is_admin: bool) -> Identity {
        Identity {
            id: "u1".to_string(),
            name: "Ann".to_string(),
            email: Some("ann@example.com".to_string()),
            is_admin,
        }
    }

    #[test]
    fn test_session_states() {
        let loading = Session::loading();
        assert!(loading.is_loading());
        assert!(!loading.is_authenticated());
        assert!(!loading.is_admin());

        let anonymous = Session::anonymous();
        assert!(!anonymous.is_loading());
        assert!(!anonymous.is_authenticated());
        assert_eq!(anonymous.identity(), None);

        let user = Session::authenticated(identity(false));
        assert!(user.is_authenticated());
        assert!(!user.is_admin());

        let admin = Session::authenticated(identity(true));
        assert!(admin.is_admin());
    }

    #[test]
    fn test_authenticated_iff_identity() {
        for session in [
            Session::loading(),
            Session::anonymous(),
            Session::authenticated(identity(false)),
            Session::authenticated(identity(true)),
        ] {
            assert_eq!(session.is_authenticated(), session.identity().is_some());
        }
    }
}
