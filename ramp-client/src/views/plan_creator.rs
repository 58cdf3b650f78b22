use shared::Permission;
use shared::models::{
    ActivatePlanRequest, ActivatePlanResponse, AddGoalRequest, AddGoalResponse,
    CreatePlanRequest, CreatePlanResponse,
};

use super::{GatedView, ViewState, run_gated};
use crate::ClientResult;
use crate::client::RampClient;

/// Individual support plan creation: draft, goals, activation
#[derive(Debug)]
pub struct PlanCreator {
    client: RampClient,
    pub draft: ViewState<CreatePlanResponse>,
    pub goal: ViewState<AddGoalResponse>,
    pub activation: ViewState<ActivatePlanResponse>,
}

impl PlanCreator {
    pub fn new(client: RampClient) -> Self {
        Self {
            client,
            draft: ViewState::default(),
            goal: ViewState::default(),
            activation: ViewState::default(),
        }
    }

    /// Plan created by the last successful draft
    pub fn current_plan_id(&self) -> Option<i64> {
        self.draft.data().map(|d| d.plan_id)
    }

    pub async fn create_draft(
        &mut self,
        user_id: i64,
        holistic_support_policy_id: i64,
    ) -> ClientResult<CreatePlanResponse> {
        let req = CreatePlanRequest {
            user_id,
            holistic_support_policy_id,
        };
        run_gated(
            &self.client,
            &mut self.draft,
            self.client.http().create_plan_draft(&req),
        )
        .await
    }

    pub async fn add_goal(&mut self, plan_id: i64, req: AddGoalRequest) -> ClientResult<AddGoalResponse> {
        run_gated(
            &self.client,
            &mut self.goal,
            self.client.http().add_individual_goal(plan_id, &req),
        )
        .await
    }

    pub async fn activate(
        &mut self,
        plan_id: i64,
        consent_log_id: i64,
    ) -> ClientResult<ActivatePlanResponse> {
        let req = ActivatePlanRequest { consent_log_id };
        run_gated(
            &self.client,
            &mut self.activation,
            self.client.http().activate_plan(plan_id, &req),
        )
        .await
    }
}

impl GatedView for PlanCreator {
    const PERMISSION: Permission = Permission::PlanCreate;
    const TITLE: &'static str = "Individual support plan (draft)";

    fn client(&self) -> &RampClient {
        &self.client
    }
}
