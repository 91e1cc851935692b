//! Shared fixtures and test doubles for integration tests.

#![allow(dead_code)]

use async_trait::async_trait;
use chrono::Utc;
use deploy_core::{
    DeployAction, DeploymentExecutor, DeploymentObject, DeploymentPlan, EnabledState, FlowDetails,
    ObjectDetails, ObjectStatus, PlanDescription, PlanStatus, Priority, RunOutcome,
    ServiceDetails, ServiceType,
};
use serde_json::Map;
use std::collections::HashMap;
use std::time::Duration;

pub fn plan(id: &str, do_ids: &[&str]) -> DeploymentPlan {
    DeploymentPlan {
        id: id.to_string(),
        summary: format!("Plan {id}"),
        description: PlanDescription {
            project_name: "Test Project".to_string(),
            brief: "Integration fixture".to_string(),
            owner: "owner".to_string(),
            admin: "admin".to_string(),
            ent_developer: "developer".to_string(),
            user: "user".to_string(),
            target_cluster: "test-cluster".to_string(),
            pre_deployment_notes: String::new(),
            post_check_list_notes: String::new(),
            test_cases_notes: String::new(),
        },
        status: PlanStatus::Open,
        do_ids: do_ids.iter().map(|s| s.to_string()).collect(),
    }
}

pub fn flow_object(id: &str, dp_id: &str, status: ObjectStatus) -> DeploymentObject {
    DeploymentObject {
        id: id.to_string(),
        dp_id: dp_id.to_string(),
        summary: format!("Object {id}"),
        status,
        priority: Priority::Medium,
        labels: vec!["test".to_string()],
        reporter: "reporter".to_string(),
        assignee: None,
        created_date: Utc::now(),
        updated_date: Utc::now(),
        details: ObjectDetails::Flow(FlowDetails {
            flow_name: "test_flow".to_string(),
            action: DeployAction::DeployNew,
            registry_bucket: "default_bucket".to_string(),
            current_version: None,
            new_version: "1.0".to_string(),
            nifi_registry_url: "https://registry.example.com".to_string(),
            associated_parameter_contexts: vec![],
        }),
    }
}

pub fn service_object(id: &str, dp_id: &str, status: ObjectStatus) -> DeploymentObject {
    DeploymentObject {
        id: id.to_string(),
        dp_id: dp_id.to_string(),
        summary: format!("Object {id}"),
        status,
        priority: Priority::High,
        labels: vec![],
        reporter: "reporter".to_string(),
        assignee: Some("assignee".to_string()),
        created_date: Utc::now(),
        updated_date: Utc::now(),
        details: ObjectDetails::Service(ServiceDetails {
            service_type: ServiceType::Rest,
            service_name: "test-service".to_string(),
            action: DeployAction::UpdateExisting,
            service_class: "org.example.TestService".to_string(),
            service_properties: Map::new(),
            enabled_state: EnabledState::NoChange,
            git_repo_url: "https://git.example.com/services.git".to_string(),
            git_repo_tag: "v1.0.0".to_string(),
            target_server: "test-server".to_string(),
        }),
    }
}

/// Deterministic executor: a fixed outcome and delay per object id, so tests
/// control both resolution results and resolution order
pub struct ScriptedExecutor {
    default_outcome: RunOutcome,
    outcomes: HashMap<String, RunOutcome>,
    delays_ms: HashMap<String, u64>,
}

impl ScriptedExecutor {
    pub fn succeeding() -> Self {
        Self {
            default_outcome: RunOutcome::Succeeded,
            outcomes: HashMap::new(),
            delays_ms: HashMap::new(),
        }
    }

    pub fn failing() -> Self {
        Self {
            default_outcome: RunOutcome::Failed("scripted failure".to_string()),
            outcomes: HashMap::new(),
            delays_ms: HashMap::new(),
        }
    }

    pub fn with_outcome(mut self, do_id: &str, outcome: RunOutcome) -> Self {
        self.outcomes.insert(do_id.to_string(), outcome);
        self
    }

    pub fn with_delay_ms(mut self, do_id: &str, delay_ms: u64) -> Self {
        self.delays_ms.insert(do_id.to_string(), delay_ms);
        self
    }
}

#[async_trait]
impl DeploymentExecutor for ScriptedExecutor {
    async fn execute(&self, object: &DeploymentObject) -> RunOutcome {
        if let Some(delay_ms) = self.delays_ms.get(&object.id) {
            tokio::time::sleep(Duration::from_millis(*delay_ms)).await;
        }
        self.outcomes
            .get(&object.id)
            .cloned()
            .unwrap_or_else(|| self.default_outcome.clone())
    }

    fn description(&self) -> &'static str {
        "Scripted test executor"
    }
}
