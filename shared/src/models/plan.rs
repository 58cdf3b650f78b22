//! Support Plan Model

use serde::{Deserialize, Serialize};

/// Create a DRAFT individual support plan
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePlanRequest {
    pub user_id: i64,
    /// Holistic support policy the plan is based on
    pub holistic_support_policy_id: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatePlanResponse {
    pub plan_id: i64,
    pub status: String,
}

/// Add an individual goal to an existing plan
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddGoalRequest {
    pub short_term_goal_id: i64,
    pub concrete_goal: String,
    pub user_commitment: String,
    pub support_actions: String,
    pub service_type: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddGoalResponse {
    pub goal_id: i64,
    pub plan_id: i64,
}

/// Activate a plan once the user's consent is logged
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivatePlanRequest {
    pub consent_log_id: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivatePlanResponse {
    #[serde(default)]
    pub msg: Option<String>,
    pub plan_id: i64,
    pub status: String,
}
