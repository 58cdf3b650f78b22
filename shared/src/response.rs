//! Error body returned by the RAMP API
//!
//! Every rejected request answers with a JSON object carrying a `msg`
//! field (some older routes use `error`):
//! ```json
//! { "msg": "forbidden" }
//! ```

use serde::{Deserialize, Serialize};

/// Structured error body.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorBody {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub msg: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ErrorBody {
    /// Parse a raw response body. Returns `None` unless the body is a JSON
    /// object carrying a non-empty message.
    pub fn parse(text: &str) -> Option<Self> {
        let body: Self = serde_json::from_str(text).ok()?;
        body.message().is_some().then_some(body)
    }

    /// Server-supplied message, `msg` taking precedence over `error`.
    pub fn message(&self) -> Option<&str> {
        self.msg
            .as_deref()
            .or(self.error.as_deref())
            .map(str::trim)
            .filter(|m| !m.is_empty())
    }
}
