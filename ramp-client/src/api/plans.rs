use shared::models::{
    ActivatePlanRequest, ActivatePlanResponse, AddGoalRequest, AddGoalResponse,
    CreatePlanRequest, CreatePlanResponse,
};

use crate::ClientResult;
use crate::http::SecureHttpClient;

impl SecureHttpClient {
    /// Create a DRAFT individual support plan
    pub async fn create_plan_draft(&self, req: &CreatePlanRequest) -> ClientResult<CreatePlanResponse> {
        self.post("plans/", req).await
    }

    /// Add an individual goal to a plan
    pub async fn add_individual_goal(
        &self,
        plan_id: i64,
        req: &AddGoalRequest,
    ) -> ClientResult<AddGoalResponse> {
        self.post(&format!("plans/{}/goal", plan_id), req).await
    }

    /// Move a consented plan to ACTIVE
    pub async fn activate_plan(
        &self,
        plan_id: i64,
        req: &ActivatePlanRequest,
    ) -> ClientResult<ActivatePlanResponse> {
        self.post(&format!("plans/{}/activate", plan_id), req).await
    }
}
