//! Deployment plan model.
//!
//! A plan groups several deployment objects. `do_ids` is the declarative
//! association; the authoritative child set is the objects whose `dp_id`
//! matches the plan's id.

use crate::state_machine::PlanStatus;
use serde::{Deserialize, Serialize};

/// A named collection of deployment tasks with its own approval workflow
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeploymentPlan {
    pub id: String,
    pub summary: String,
    pub description: PlanDescription,
    pub status: PlanStatus,
    pub do_ids: Vec<String>,
}

/// Free-form project metadata attached to a plan
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanDescription {
    pub project_name: String,
    pub brief: String,
    pub owner: String,
    pub admin: String,
    pub ent_developer: String,
    pub user: String,
    pub target_cluster: String,
    pub pre_deployment_notes: String,
    pub post_check_list_notes: String,
    pub test_cases_notes: String,
}
