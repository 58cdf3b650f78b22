use shared::models::UserPiiResponse;

use crate::ClientResult;
use crate::http::SecureHttpClient;

impl SecureHttpClient {
    /// Decrypted PII of one service user (`VIEW_PII`)
    pub async fn fetch_user_pii(&self, user_id: i64) -> ClientResult<UserPiiResponse> {
        self.get(&format!("users/{}/pii", user_id)).await
    }
}
