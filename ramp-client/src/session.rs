//! Session store
//!
//! Single source of truth for "am I logged in, as whom, with what role" for
//! one client lifetime. The store has exactly one writer (the auth
//! operations); everything else reads through a [`SessionHandle`].
//!
//! ```text
//! Unauthenticated --login ok--> Authenticated
//! Authenticated --logout (any outcome) / 401--> Unauthenticated
//! Unauthenticated --login failed--> Unauthenticated (error recorded)
//! ```

use shared::client::LoginResponse;
use tokio::sync::watch;

use crate::{ClientError, ClientResult};

/// The logged-in supporter. Replaced wholesale on re-login, never edited.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    id: i64,
    full_name: String,
    role_id: i64,
    role_name: String,
}

impl AuthenticatedUser {
    /// Build from a login (or session check) response.
    ///
    /// `role_name` is required; the role is never guessed from other fields.
    pub(crate) fn from_login(resp: LoginResponse) -> ClientResult<Self> {
        let role_name = resp
            .role_name
            .filter(|r| !r.trim().is_empty())
            .ok_or_else(|| ClientError::InvalidResponse("Missing role_name in login response".into()))?;
        Ok(Self {
            id: resp.supporter_id,
            full_name: resp.full_name,
            role_id: resp.role_id,
            role_name,
        })
    }

    pub fn id(&self) -> i64 {
        self.id
    }

    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    pub fn role_id(&self) -> i64 {
        self.role_id
    }

    pub fn role_name(&self) -> &str {
        &self.role_name
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    Unauthenticated,
    Authenticated,
}

/// Snapshot of the session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionState {
    pub user: Option<AuthenticatedUser>,
    pub is_loading: bool,
    pub error: Option<String>,
}

impl SessionState {
    /// Logged out and waiting for the start-up session check
    fn initial() -> Self {
        Self {
            user: None,
            is_loading: true,
            error: None,
        }
    }

    pub fn status(&self) -> SessionStatus {
        if self.user.is_some() {
            SessionStatus::Authenticated
        } else {
            SessionStatus::Unauthenticated
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }
}

/// Writer side of the session. Only `AuthService` mutates it.
#[derive(Debug)]
pub struct SessionStore {
    tx: watch::Sender<SessionState>,
}

impl SessionStore {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(SessionState::initial());
        Self { tx }
    }

    /// Read-only handle for views
    pub fn handle(&self) -> SessionHandle {
        SessionHandle {
            rx: self.tx.subscribe(),
        }
    }

    pub fn snapshot(&self) -> SessionState {
        self.tx.borrow().clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.tx.borrow().is_authenticated()
    }

    /// Start an auth operation: loading on, previous error cleared.
    /// Loading is switched off again when the guard drops.
    pub(crate) fn begin(&self) -> LoadingGuard<'_> {
        self.tx.send_modify(|s| {
            s.is_loading = true;
            s.error = None;
        });
        LoadingGuard { store: self }
    }

    /// Guard releasing the initial loading flag without clearing errors
    pub(crate) fn loading_guard(&self) -> LoadingGuard<'_> {
        LoadingGuard { store: self }
    }

    pub(crate) fn authenticate(&self, user: AuthenticatedUser) {
        tracing::info!(user_id = user.id, role = %user.role_name, "Session authenticated");
        self.tx.send_modify(|s| {
            s.user = Some(user);
            s.error = None;
        });
    }

    /// Record a failed operation; the user (if any) is untouched.
    pub(crate) fn record_error(&self, message: impl Into<String>) {
        let message = message.into();
        self.tx.send_modify(|s| s.error = Some(message));
    }

    /// Back to `Unauthenticated`
    pub(crate) fn clear(&self) {
        self.tx.send_modify(|s| {
            if s.user.take().is_some() {
                tracing::info!("Session cleared");
            }
        });
    }

    /// Back to `Unauthenticated` with the reason recorded
    pub(crate) fn expire(&self, message: impl Into<String>) {
        let message = message.into();
        tracing::info!("Session expired");
        self.tx.send_modify(|s| {
            s.user = None;
            s.error = Some(message);
        });
    }

    fn finish_loading(&self) {
        self.tx.send_modify(|s| s.is_loading = false);
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Turns `is_loading` off on drop, whatever path the operation took
#[must_use = "loading is released when the guard drops"]
pub(crate) struct LoadingGuard<'a> {
    store: &'a SessionStore,
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.store.finish_loading();
    }
}

/// Read side of the session, cheap to clone
#[derive(Debug, Clone)]
pub struct SessionHandle {
    rx: watch::Receiver<SessionState>,
}

impl SessionHandle {
    pub fn snapshot(&self) -> SessionState {
        self.rx.borrow().clone()
    }

    pub fn status(&self) -> SessionStatus {
        self.rx.borrow().status()
    }

    pub fn is_authenticated(&self) -> bool {
        self.rx.borrow().is_authenticated()
    }

    pub fn is_loading(&self) -> bool {
        self.rx.borrow().is_loading
    }

    pub fn current_user(&self) -> Option<AuthenticatedUser> {
        self.rx.borrow().user.clone()
    }

    pub fn error(&self) -> Option<String> {
        self.rx.borrow().error.clone()
    }

    /// Wait for the next change. Errors once the store is gone.
    pub async fn changed(&mut self) -> ClientResult<SessionState> {
        self.rx
            .changed()
            .await
            .map_err(|_| ClientError::Config("session store dropped".into()))?;
        Ok(self.rx.borrow_and_update().clone())
    }

    /// Wait until no auth operation is running
    pub async fn settled(&mut self) -> ClientResult<SessionState> {
        let state = self
            .rx
            .wait_for(|s| !s.is_loading)
            .await
            .map_err(|_| ClientError::Config("session store dropped".into()))?;
        Ok((*state).clone())
    }
}
