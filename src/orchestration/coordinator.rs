//! Deployment coordinator: the public operation surface over the store, the
//! executor, and the event publisher.
//!
//! `run_object` applies the start transitions synchronously (the parent plan
//! is `AwaitingDoCompletion` before the simulated delay begins), then spawns
//! a task that awaits the executor and resolves the run through the store's
//! single critical section. Multiple sibling runs may be in flight at once;
//! each resolution re-derives the plan from the full, current sibling set.

use crate::error::Result;
use crate::events::{names, EventPublisher, PublishedEvent};
use crate::logging::{log_error, log_object_operation, log_plan_operation};
use crate::models::{DeploymentObject, DeploymentPlan};
use crate::state_machine::ObjectEvent;
use crate::store::{DeploymentStore, RunResolution};
use crate::DeployConfig;
use serde_json::json;
use std::sync::Arc;
use tokio::sync::broadcast;
use tokio::task::JoinHandle;

use super::executor::{DeploymentExecutor, RunOutcome, SimulatedExecutor};

/// Coordinates plan approval, object runs, and object edits against the
/// shared state store
pub struct DeploymentCoordinator {
    store: Arc<DeploymentStore>,
    executor: Arc<dyn DeploymentExecutor>,
    events: EventPublisher,
}

impl DeploymentCoordinator {
    /// Create a coordinator with an explicit executor and event publisher
    pub fn new(
        store: Arc<DeploymentStore>,
        executor: Arc<dyn DeploymentExecutor>,
        events: EventPublisher,
    ) -> Self {
        Self {
            store,
            executor,
            events,
        }
    }

    /// Create a coordinator wired to the simulated executor per the given
    /// configuration
    pub fn with_simulator(store: Arc<DeploymentStore>, config: &DeployConfig) -> Self {
        Self::new(
            store,
            Arc::new(SimulatedExecutor::new(config.simulator.clone())),
            EventPublisher::new(config.events.channel_capacity),
        )
    }

    /// Subscribe to lifecycle events
    pub fn subscribe(&self) -> broadcast::Receiver<PublishedEvent> {
        self.events.subscribe()
    }

    /// Approve a plan. Idempotent; no side effect on the plan's objects.
    pub async fn approve_plan(&self, dp_id: &str) -> Result<DeploymentPlan> {
        let plan = self.store.approve_plan(dp_id).map_err(|e| {
            log_error("coordinator", "approve_plan", &e.to_string(), Some(dp_id));
            e
        })?;

        log_plan_operation("approve", &plan.id, &plan.status.to_string(), None);
        self.events.publish(
            names::PLAN_APPROVED,
            json!({ "dpId": &plan.id, "status": plan.status }),
        );

        Ok(plan)
    }

    /// Start a run for an object. The object transitions to `InProgress` and
    /// its parent plan to `AwaitingDoCompletion` before this method returns;
    /// the executor then resolves on the spawned task. The returned handle
    /// yields the resolution for callers that want to await it.
    pub async fn run_object(&self, do_id: &str) -> Result<JoinHandle<Result<RunResolution>>> {
        let start = self.store.begin_run(do_id).map_err(|e| {
            log_error("coordinator", "run_object", &e.to_string(), Some(do_id));
            e
        })?;

        log_object_operation(
            "run_started",
            &start.object.id,
            Some(&start.plan.id),
            &start.object.status.to_string(),
            None,
        );
        self.events.publish(
            names::OBJECT_RUN_STARTED,
            json!({ "doId": &start.object.id, "dpId": &start.plan.id }),
        );
        self.events.publish(
            names::PLAN_STATUS_CHANGED,
            json!({ "dpId": &start.plan.id, "status": start.plan.status }),
        );

        let store = Arc::clone(&self.store);
        let executor = Arc::clone(&self.executor);
        let events = self.events.clone();
        let object = start.object;

        tracing::debug!(
            do_id = %object.id,
            executor = self.executor.description(),
            "Dispatching run to executor"
        );
        let handle = tokio::spawn(async move {
            let outcome = executor.execute(&object).await;
            let event = match outcome {
                RunOutcome::Succeeded => ObjectEvent::Complete,
                RunOutcome::Failed(message) => ObjectEvent::Fail(message),
            };

            let resolution = store.resolve_run(&object.id, &event).map_err(|e| {
                log_error("coordinator", "resolve_run", &e.to_string(), Some(&object.id));
                e
            })?;

            let event_name = if matches!(event, ObjectEvent::Complete) {
                names::OBJECT_RUN_COMPLETED
            } else {
                names::OBJECT_RUN_FAILED
            };
            log_object_operation(
                "run_resolved",
                &resolution.object.id,
                Some(&resolution.plan.id),
                &resolution.object.status.to_string(),
                event.error_message(),
            );
            events.publish(
                event_name,
                json!({
                    "doId": &resolution.object.id,
                    "status": resolution.object.status,
                    "error": event.error_message(),
                }),
            );
            events.publish(
                names::PLAN_STATUS_CHANGED,
                json!({ "dpId": &resolution.plan.id, "status": resolution.plan.status }),
            );

            Ok(resolution)
        });

        Ok(handle)
    }

    /// Apply an edit to an object (see [`DeploymentStore::update_object`])
    pub async fn update_object(&self, updated: DeploymentObject) -> Result<DeploymentObject> {
        let do_id = updated.id.clone();
        let saved = self.store.update_object(updated).map_err(|e| {
            log_error("coordinator", "update_object", &e.to_string(), Some(&do_id));
            e
        })?;

        log_object_operation(
            "updated",
            &saved.id,
            Some(&saved.dp_id),
            &saved.status.to_string(),
            None,
        );
        self.events.publish(
            names::OBJECT_UPDATED,
            json!({ "doId": &saved.id, "dpId": &saved.dp_id }),
        );

        Ok(saved)
    }

    /// Fetch a plan by id
    pub fn get_plan(&self, dp_id: &str) -> Option<DeploymentPlan> {
        self.store.get_plan(dp_id)
    }

    /// List all plans
    pub fn list_plans(&self) -> Vec<DeploymentPlan> {
        self.store.list_plans()
    }

    /// Fetch an object by id
    pub fn get_object(&self, do_id: &str) -> Option<DeploymentObject> {
        self.store.get_object(do_id)
    }

    /// List a plan's objects
    pub fn list_objects_for_plan(&self, dp_id: &str) -> Vec<DeploymentObject> {
        self.store.list_objects_for_plan(dp_id)
    }
}
