//! Client configuration

use crate::{ClientError, ClientResult};
use std::time::Duration;

/// Cookie flask-jwt-extended mirrors the CSRF token into
pub const DEFAULT_CSRF_COOKIE: &str = "csrf_access_token";
/// Header the server expects the mirrored token in
pub const DEFAULT_CSRF_HEADER: &str = "X-CSRF-TOKEN";

/// Client configuration for connecting to the RAMP API
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API root every request path is relative to (e.g., "http://localhost:5000/api")
    pub api_root: String,

    /// Deadline for a single request in milliseconds
    pub request_timeout_ms: u64,

    /// Session check endpoint, relative to the API root.
    ///
    /// `Some` → the client asks the server on start-up whether the cookie
    /// session is still valid. `None` → every client starts logged out.
    pub session_check_path: Option<String>,

    /// Name of the cookie holding the CSRF token
    pub csrf_cookie_name: String,

    /// Name of the header the CSRF token is echoed in
    pub csrf_header_name: String,
}

impl ClientConfig {
    /// Create a new client configuration
    pub fn new(api_root: impl Into<String>) -> Self {
        Self {
            api_root: api_root.into(),
            request_timeout_ms: 30_000,
            session_check_path: None,
            csrf_cookie_name: DEFAULT_CSRF_COOKIE.into(),
            csrf_header_name: DEFAULT_CSRF_HEADER.into(),
        }
    }

    /// Load from `RAMP_*` environment variables, falling back to defaults
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            api_root: std::env::var("RAMP_API_BASE_URL").unwrap_or(defaults.api_root),
            request_timeout_ms: std::env::var("RAMP_REQUEST_TIMEOUT_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.request_timeout_ms),
            session_check_path: std::env::var("RAMP_SESSION_CHECK_PATH")
                .ok()
                .filter(|p| !p.trim().is_empty()),
            csrf_cookie_name: std::env::var("RAMP_CSRF_COOKIE")
                .unwrap_or(defaults.csrf_cookie_name),
            csrf_header_name: std::env::var("RAMP_CSRF_HEADER")
                .unwrap_or(defaults.csrf_header_name),
        }
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout_ms = timeout.as_millis() as u64;
        self
    }

    /// Enable the start-up session check against `path`
    pub fn with_session_check(mut self, path: impl Into<String>) -> Self {
        self.session_check_path = Some(path.into());
        self
    }

    /// Override the CSRF cookie/header pair
    pub fn with_csrf(mut self, cookie: impl Into<String>, header: impl Into<String>) -> Self {
        self.csrf_cookie_name = cookie.into();
        self.csrf_header_name = header.into();
        self
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    /// Check the configuration before building a client
    pub fn validate(&self) -> ClientResult<()> {
        let url = reqwest::Url::parse(&self.api_root)
            .map_err(|e| ClientError::Config(format!("invalid api root {:?}: {}", self.api_root, e)))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ClientError::Config(format!(
                "api root must be http(s), got {}",
                url.scheme()
            )));
        }
        if self.request_timeout_ms == 0 {
            return Err(ClientError::Config("request timeout must be non-zero".into()));
        }
        if self.csrf_cookie_name.is_empty() || self.csrf_header_name.is_empty() {
            return Err(ClientError::Config("csrf cookie and header names are required".into()));
        }
        reqwest::header::HeaderName::from_bytes(self.csrf_header_name.as_bytes())
            .map_err(|e| ClientError::Config(format!("invalid csrf header name: {}", e)))?;
        Ok(())
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new("http://localhost:5000/api")
    }
}
