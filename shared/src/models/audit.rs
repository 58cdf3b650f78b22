//! Audit Log Model

use serde::{Deserialize, Serialize};

/// One row of `GET /auth/system_logs` (requires `SYSTEM_LOG_READ`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemLogEntry {
    pub id: i64,
    /// ISO-8601, as produced by the server
    pub timestamp: String,
    pub action: String,
    pub supporter_name: String,
    #[serde(default)]
    pub target_user_id: Option<i64>,
    #[serde(default)]
    pub target_plan_id: Option<i64>,
}
