use shared::Permission;
use shared::models::SystemLogEntry;

use super::{GatedView, ViewState, run_gated};
use crate::ClientResult;
use crate::client::RampClient;

/// Audit trail viewer
#[derive(Debug)]
pub struct SystemLogViewer {
    client: RampClient,
    pub state: ViewState<Vec<SystemLogEntry>>,
}

impl SystemLogViewer {
    pub fn new(client: RampClient) -> Self {
        Self {
            client,
            state: ViewState::default(),
        }
    }

    pub async fn fetch(&mut self, plan_id: Option<i64>) -> ClientResult<Vec<SystemLogEntry>> {
        run_gated(
            &self.client,
            &mut self.state,
            self.client.http().fetch_system_logs(plan_id),
        )
        .await
    }
}

impl GatedView for SystemLogViewer {
    const PERMISSION: Permission = Permission::SystemLogRead;
    const TITLE: &'static str = "Audit log";

    fn client(&self) -> &RampClient {
        &self.client
    }
}
