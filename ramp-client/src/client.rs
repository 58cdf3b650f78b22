//! RAMP client facade
//!
//! Wires the secure request client, the session store and the auth
//! operations together for one client lifetime.

use shared::client::LoginRequest;

use crate::auth::AuthService;
use crate::config::ClientConfig;
use crate::http::SecureHttpClient;
use crate::session::{AuthenticatedUser, SessionHandle};
use crate::ClientResult;

/// Everything a view needs, cheap to clone
///
/// # Example
///
/// ```no_run
/// # use ramp_client::{ClientConfig, RampClient};
/// # async fn example() -> Result<(), ramp_client::ClientError> {
/// let client = RampClient::connect(ClientConfig::new("http://localhost:5000/api")).await?;
/// client.login("sato@ramp.co.jp", "adminpassword").await?;
/// let pii = client.http().fetch_user_pii(1).await?;
/// client.logout().await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct RampClient {
    config: ClientConfig,
    auth: AuthService,
}

impl RampClient {
    /// Build the client without touching the network.
    ///
    /// The session reports `is_loading` until [`AuthService::restore_session`]
    /// has run; [`RampClient::connect`] does both.
    pub fn new(config: ClientConfig) -> ClientResult<Self> {
        let http = SecureHttpClient::new(&config)?;
        let auth = AuthService::new(http, config.session_check_path.clone());
        Ok(Self { config, auth })
    }

    /// Build the client and run the start-up session check.
    ///
    /// A failed check is recorded in the session, not returned.
    pub async fn connect(config: ClientConfig) -> ClientResult<Self> {
        let client = Self::new(config)?;
        if let Err(e) = client.auth.restore_session().await {
            tracing::warn!(error = %e, "Starting logged out");
        }
        Ok(client)
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn http(&self) -> &SecureHttpClient {
        self.auth.http()
    }

    pub fn auth(&self) -> &AuthService {
        &self.auth
    }

    pub fn session(&self) -> SessionHandle {
        self.auth.session()
    }

    pub async fn login(
        &self,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> ClientResult<AuthenticatedUser> {
        self.auth.login(LoginRequest::new(email, password)).await
    }

    pub async fn logout(&self) -> ClientResult<()> {
        self.auth.logout().await
    }
}
