//! Auth operations
//!
//! Login, logout and the session checks. These are the only writers of the
//! [`SessionStore`]; every transition follows a server-confirmed outcome,
//! except logout, which always ends logged out.

use std::sync::Arc;

use shared::client::{LoginRequest, LoginResponse, MessageResponse};
use tokio::sync::Mutex;

use crate::http::SecureHttpClient;
use crate::session::{AuthenticatedUser, SessionHandle, SessionStore};
use crate::{ClientError, ClientResult};

const LOGIN_PATH: &str = "auth/login";
const LOGOUT_PATH: &str = "auth/logout";

/// Orchestrates the auth service calls and keeps the session consistent
#[derive(Debug, Clone)]
pub struct AuthService {
    http: SecureHttpClient,
    store: Arc<SessionStore>,
    // One auth operation per store at a time.
    in_flight: Arc<Mutex<()>>,
    session_check_path: Option<String>,
}

impl AuthService {
    pub fn new(http: SecureHttpClient, session_check_path: Option<String>) -> Self {
        Self {
            http,
            store: Arc::new(SessionStore::new()),
            in_flight: Arc::new(Mutex::new(())),
            session_check_path,
        }
    }

    /// Read-only view of the session
    pub fn session(&self) -> SessionHandle {
        self.store.handle()
    }

    pub fn http(&self) -> &SecureHttpClient {
        &self.http
    }

    /// Log in with email and password.
    ///
    /// On failure the error is recorded in the session and returned, and the
    /// session stays logged out.
    pub async fn login(&self, credentials: LoginRequest) -> ClientResult<AuthenticatedUser> {
        let _op = self
            .in_flight
            .try_lock()
            .map_err(|_| ClientError::AuthInProgress)?;
        let _loading = self.store.begin();

        tracing::info!("Logging in");
        let result = self
            .http
            .post::<LoginResponse, _>(LOGIN_PATH, &credentials)
            .await
            .and_then(AuthenticatedUser::from_login);
        drop(credentials);

        match result {
            Ok(user) => {
                self.store.authenticate(user.clone());
                Ok(user)
            }
            Err(e) => {
                tracing::warn!(error = %e, "Login failed");
                self.store.clear();
                self.store.record_error(e.user_message());
                Err(e)
            }
        }
    }

    /// Log out. Always ends `Unauthenticated`, whatever the server says.
    pub async fn logout(&self) -> ClientResult<()> {
        let _op = self
            .in_flight
            .try_lock()
            .map_err(|_| ClientError::AuthInProgress)?;
        let _loading = self.store.begin();

        tracing::info!("Logging out");
        match self.http.post_empty::<MessageResponse>(LOGOUT_PATH).await {
            Ok(ack) => tracing::debug!(msg = ?ack.msg, "Logout acknowledged"),
            Err(e) => {
                tracing::warn!(error = %e, "Logout request failed, clearing local session anyway")
            }
        }

        self.store.clear();
        self.http.clear_csrf_cookie();
        Ok(())
    }

    /// Start-up check.
    ///
    /// With a session check endpoint configured, asks the server whether the
    /// cookie session is still valid and restores the user from it. Without
    /// one, the client stays logged out. Either way the initial loading flag
    /// is released.
    pub async fn restore_session(&self) -> ClientResult<Option<AuthenticatedUser>> {
        let _op = self.in_flight.lock().await;
        let _loading = self.store.loading_guard();

        let Some(path) = self.session_check_path.as_deref() else {
            tracing::debug!("No session check endpoint, starting logged out");
            return Ok(None);
        };

        match self.fetch_session(path).await {
            Ok(user) => {
                self.store.authenticate(user.clone());
                Ok(Some(user))
            }
            Err(e) if e.is_unauthorized() => {
                tracing::debug!("No valid session to restore");
                self.store.clear();
                Ok(None)
            }
            Err(e) => {
                tracing::warn!(error = %e, "Session restore failed");
                self.store.clear();
                self.store.record_error(e.user_message());
                Err(e)
            }
        }
    }

    /// Ask the server whether the current session is still accepted.
    ///
    /// `Ok(false)` after a 401, which also ends the local session.
    pub async fn check_session(&self) -> ClientResult<bool> {
        let path = self
            .session_check_path
            .as_deref()
            .ok_or_else(|| ClientError::Config("no session check endpoint configured".into()))?;

        match self.guard(self.fetch_session(path).await) {
            Ok(_) => Ok(true),
            Err(e) if e.is_unauthorized() => Ok(false),
            Err(e) => Err(e),
        }
    }

    /// Route a resource call result through session-expiry handling.
    ///
    /// A 401 while the session is believed valid ends the session and comes
    /// back as `SessionExpired`. Everything else passes through untouched.
    pub fn guard<T>(&self, result: ClientResult<T>) -> ClientResult<T> {
        match result {
            Err(e) if e.is_unauthorized() && self.store.is_authenticated() => {
                tracing::warn!(error = %e, "Server rejected the session");
                self.store.expire(ClientError::SessionExpired.user_message());
                self.http.clear_csrf_cookie();
                Err(ClientError::SessionExpired)
            }
            other => other,
        }
    }

    async fn fetch_session(&self, path: &str) -> ClientResult<AuthenticatedUser> {
        let resp: LoginResponse = self.http.get(path).await?;
        AuthenticatedUser::from_login(resp)
    }
}
