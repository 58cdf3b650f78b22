//! Auth API DTOs
//!
//! Request/response types exchanged with the auth service.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Login request
#[derive(Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl LoginRequest {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

// Password stays out of logs.
impl fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginRequest")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Login response data
///
/// Also returned by the session check endpoint. The session itself travels
/// in HTTP-only cookies and never appears here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    #[serde(default)]
    pub msg: Option<String>,
    pub supporter_id: i64,
    pub role_id: i64,
    pub full_name: String,
    /// Older servers omit it; the client treats that as a bad response.
    #[serde(default)]
    pub role_name: Option<String>,
}

/// Plain `{ "msg": ... }` acknowledgement (logout and friends)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MessageResponse {
    #[serde(default)]
    pub msg: Option<String>,
}
