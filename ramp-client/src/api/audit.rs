use shared::models::SystemLogEntry;

use crate::ClientResult;
use crate::http::SecureHttpClient;

impl SecureHttpClient {
    /// Audit trail, newest first, optionally narrowed to one plan (`SYSTEM_LOG_READ`)
    pub async fn fetch_system_logs(&self, plan_id: Option<i64>) -> ClientResult<Vec<SystemLogEntry>> {
        let path = match plan_id {
            Some(id) => format!("auth/system_logs?plan_id={}", id),
            None => "auth/system_logs".to_string(),
        };
        self.get(&path).await
    }
}
