use shared::Permission;
use shared::models::UserPiiResponse;

use super::{GatedView, ViewState, run_gated};
use crate::ClientResult;
use crate::client::RampClient;

/// Secure PII viewer
#[derive(Debug)]
pub struct UserPiiViewer {
    client: RampClient,
    pub state: ViewState<UserPiiResponse>,
}

impl UserPiiViewer {
    pub fn new(client: RampClient) -> Self {
        Self {
            client,
            state: ViewState::default(),
        }
    }

    /// Fetch one user's PII; the payload is kept exactly as decoded.
    pub async fn fetch(&mut self, user_id: i64) -> ClientResult<UserPiiResponse> {
        run_gated(
            &self.client,
            &mut self.state,
            self.client.http().fetch_user_pii(user_id),
        )
        .await
    }
}

impl GatedView for UserPiiViewer {
    const PERMISSION: Permission = Permission::ViewPii;
    const TITLE: &'static str = "PII secure viewer";

    fn client(&self) -> &RampClient {
        &self.client
    }
}
