//! Serialized in-memory state store for plans and objects.
//!
//! Both collections live behind a single mutex so every mutation is an
//! atomic read-modify-write over one consistent snapshot. In particular,
//! `resolve_run` updates the resolved object and re-derives the parent
//! plan's status from the complete, just-updated sibling set inside one
//! critical section, which is what keeps the aggregate correct when several
//! sibling runs resolve close together.
//!
//! State is session-scoped: seeded at load time, never persisted.

use crate::error::{DeployCoreError, Result};
use crate::models::{DeploymentObject, DeploymentPlan};
use crate::state_machine::{
    derive_plan_status, next_object_status, ObjectEvent, PlanStatus,
};
use crate::validation;
use chrono::Utc;
use parking_lot::Mutex;
use std::collections::HashMap;

/// Result of starting a run: the object now in progress and its parent plan
/// now awaiting completion
#[derive(Debug, Clone)]
pub struct RunStart {
    pub object: DeploymentObject,
    pub plan: DeploymentPlan,
}

/// Result of resolving a run: the object at its terminal status and the
/// parent plan re-derived from the full sibling set
#[derive(Debug, Clone)]
pub struct RunResolution {
    pub object: DeploymentObject,
    pub plan: DeploymentPlan,
}

#[derive(Debug, Default)]
struct StoreInner {
    plans: HashMap<String, DeploymentPlan>,
    plan_order: Vec<String>,
    objects: HashMap<String, DeploymentObject>,
    object_order: Vec<String>,
}

impl StoreInner {
    fn sibling_statuses(&self, dp_id: &str) -> Vec<crate::state_machine::ObjectStatus> {
        self.object_order
            .iter()
            .filter_map(|id| self.objects.get(id))
            .filter(|object| object.dp_id == dp_id)
            .map(|object| object.status)
            .collect()
    }
}

/// In-memory store with atomic read-modify-write semantics per operation
#[derive(Debug, Default)]
pub struct DeploymentStore {
    inner: Mutex<StoreInner>,
}

impl DeploymentStore {
    /// Create a store seeded with an initial set of plans and objects
    pub fn from_seed(
        plans: Vec<DeploymentPlan>,
        objects: Vec<DeploymentObject>,
    ) -> Self {
        let mut inner = StoreInner::default();

        for plan in plans {
            if inner.plans.contains_key(&plan.id) {
                tracing::warn!(dp_id = %plan.id, "Duplicate plan id in seed, replacing earlier record");
            } else {
                inner.plan_order.push(plan.id.clone());
            }
            inner.plans.insert(plan.id.clone(), plan);
        }

        for object in objects {
            if !inner.plans.contains_key(&object.dp_id) {
                tracing::warn!(
                    do_id = %object.id,
                    dp_id = %object.dp_id,
                    "Seed object references an unknown plan"
                );
            }
            if inner.objects.contains_key(&object.id) {
                tracing::warn!(do_id = %object.id, "Duplicate object id in seed, replacing earlier record");
            } else {
                inner.object_order.push(object.id.clone());
            }
            inner.objects.insert(object.id.clone(), object);
        }

        Self {
            inner: Mutex::new(inner),
        }
    }

    /// Fetch a plan by id
    pub fn get_plan(&self, dp_id: &str) -> Option<DeploymentPlan> {
        self.inner.lock().plans.get(dp_id).cloned()
    }

    /// List all plans in seed order
    pub fn list_plans(&self) -> Vec<DeploymentPlan> {
        let inner = self.inner.lock();
        inner
            .plan_order
            .iter()
            .filter_map(|id| inner.plans.get(id))
            .cloned()
            .collect()
    }

    /// Fetch an object by id
    pub fn get_object(&self, do_id: &str) -> Option<DeploymentObject> {
        self.inner.lock().objects.get(do_id).cloned()
    }

    /// List the authoritative child set of a plan (objects whose `dp_id`
    /// matches) in seed order
    pub fn list_objects_for_plan(&self, dp_id: &str) -> Vec<DeploymentObject> {
        let inner = self.inner.lock();
        inner
            .object_order
            .iter()
            .filter_map(|id| inner.objects.get(id))
            .filter(|object| object.dp_id == dp_id)
            .cloned()
            .collect()
    }

    /// Set a plan's status to `Approved`. Idempotent; approving twice yields
    /// the same observable state as approving once. No side effect on the
    /// plan's objects.
    pub fn approve_plan(&self, dp_id: &str) -> Result<DeploymentPlan> {
        let mut inner = self.inner.lock();
        let plan = inner
            .plans
            .get_mut(dp_id)
            .ok_or_else(|| DeployCoreError::PlanNotFound(dp_id.to_string()))?;
        plan.status = PlanStatus::Approved;
        Ok(plan.clone())
    }

    /// Start a run: transition the object to `InProgress` and its parent
    /// plan to `AwaitingDoCompletion` in one critical section. Fails without
    /// mutating anything if the object is missing, not runnable, or its
    /// parent plan is missing.
    pub fn begin_run(&self, do_id: &str) -> Result<RunStart> {
        let mut inner = self.inner.lock();

        let object = inner
            .objects
            .get(do_id)
            .ok_or_else(|| DeployCoreError::ObjectNotFound(do_id.to_string()))?;
        let next = next_object_status(object.status, &ObjectEvent::Start)?;
        let dp_id = object.dp_id.clone();

        if !inner.plans.contains_key(&dp_id) {
            return Err(DeployCoreError::PlanNotFound(dp_id));
        }

        // Both checks passed; commit the pair of transitions
        let object = inner
            .objects
            .get_mut(do_id)
            .ok_or_else(|| DeployCoreError::ObjectNotFound(do_id.to_string()))?;
        object.status = next;
        let object = object.clone();

        let plan = inner
            .plans
            .get_mut(&dp_id)
            .ok_or_else(|| DeployCoreError::PlanNotFound(dp_id.clone()))?;
        plan.status = PlanStatus::AwaitingDoCompletion;
        let plan = plan.clone();

        Ok(RunStart { object, plan })
    }

    /// Resolve a run: apply the terminal event to the object and re-derive
    /// the parent plan's status from the complete, just-updated sibling set,
    /// all inside one critical section. An empty sibling set leaves the
    /// plan's status unchanged. Fails without mutating anything if the
    /// object is missing, the event does not apply, or its parent plan is
    /// missing.
    pub fn resolve_run(&self, do_id: &str, event: &ObjectEvent) -> Result<RunResolution> {
        let mut inner = self.inner.lock();

        let object = inner
            .objects
            .get(do_id)
            .ok_or_else(|| DeployCoreError::ObjectNotFound(do_id.to_string()))?;
        let next = next_object_status(object.status, event)?;
        let dp_id = object.dp_id.clone();

        if !inner.plans.contains_key(&dp_id) {
            return Err(DeployCoreError::PlanNotFound(dp_id));
        }

        // Both checks passed; commit the object transition, then re-derive
        let object = inner
            .objects
            .get_mut(do_id)
            .ok_or_else(|| DeployCoreError::ObjectNotFound(do_id.to_string()))?;
        object.status = next;
        let object = object.clone();

        let derived = derive_plan_status(inner.sibling_statuses(&dp_id));
        let plan = inner
            .plans
            .get_mut(&dp_id)
            .ok_or_else(|| DeployCoreError::PlanNotFound(dp_id.clone()))?;
        if let Some(status) = derived {
            plan.status = status;
        }
        let plan = plan.clone();

        Ok(RunResolution { object, plan })
    }

    /// Replace a stored object with the supplied record after validating it
    /// and re-stamping `updated_date` to now (overriding any caller-supplied
    /// value). On validation failure or unknown id nothing is committed.
    pub fn update_object(&self, updated: DeploymentObject) -> Result<DeploymentObject> {
        validation::validate_object(&updated)?;

        let mut inner = self.inner.lock();
        if !inner.objects.contains_key(&updated.id) {
            return Err(DeployCoreError::ObjectNotFound(updated.id));
        }

        let mut record = updated;
        record.updated_date = Utc::now();
        inner.objects.insert(record.id.clone(), record.clone());
        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        DeployAction, FlowDetails, ObjectDetails, PlanDescription, Priority,
    };
    use crate::state_machine::ObjectStatus;

    fn plan(id: &str, do_ids: &[&str]) -> DeploymentPlan {
        DeploymentPlan {
            id: id.to_string(),
            summary: format!("Plan {id}"),
            description: PlanDescription::default(),
            status: PlanStatus::Open,
            do_ids: do_ids.iter().map(|s| s.to_string()).collect(),
        }
    }

    fn flow_object(id: &str, dp_id: &str, status: ObjectStatus) -> DeploymentObject {
        DeploymentObject {
            id: id.to_string(),
            dp_id: dp_id.to_string(),
            summary: format!("Object {id}"),
            status,
            priority: Priority::Medium,
            labels: vec![],
            reporter: "reporter".to_string(),
            assignee: None,
            created_date: Utc::now(),
            updated_date: Utc::now(),
            details: ObjectDetails::Flow(FlowDetails {
                flow_name: "flow".to_string(),
                action: DeployAction::DeployNew,
                registry_bucket: "default_bucket".to_string(),
                current_version: None,
                new_version: "1.0".to_string(),
                nifi_registry_url: "https://registry.example.com".to_string(),
                associated_parameter_contexts: vec![],
            }),
        }
    }

    fn seeded_store() -> DeploymentStore {
        DeploymentStore::from_seed(
            vec![plan("DP-1", &["DO-1", "DO-2"])],
            vec![
                flow_object("DO-1", "DP-1", ObjectStatus::Open),
                flow_object("DO-2", "DP-1", ObjectStatus::Open),
            ],
        )
    }

    #[test]
    fn test_approve_plan_is_idempotent() {
        let store = seeded_store();
        let first = store.approve_plan("DP-1").unwrap();
        let second = store.approve_plan("DP-1").unwrap();
        assert_eq!(first.status, PlanStatus::Approved);
        assert_eq!(first, second);
    }

    #[test]
    fn test_approve_missing_plan_is_an_error() {
        let store = seeded_store();
        assert_eq!(
            store.approve_plan("DP-404").unwrap_err(),
            DeployCoreError::PlanNotFound("DP-404".to_string())
        );
    }

    #[test]
    fn test_begin_run_transitions_object_and_plan_together() {
        let store = seeded_store();
        let start = store.begin_run("DO-1").unwrap();
        assert_eq!(start.object.status, ObjectStatus::InProgress);
        assert_eq!(start.plan.status, PlanStatus::AwaitingDoCompletion);

        // The sibling is untouched
        assert_eq!(store.get_object("DO-2").unwrap().status, ObjectStatus::Open);
    }

    #[test]
    fn test_begin_run_on_non_runnable_object_changes_nothing() {
        let store = DeploymentStore::from_seed(
            vec![plan("DP-1", &["DO-1"])],
            vec![flow_object("DO-1", "DP-1", ObjectStatus::Completed)],
        );

        let err = store.begin_run("DO-1").unwrap_err();
        assert!(matches!(err, DeployCoreError::InvalidTransition { .. }));
        assert_eq!(
            store.get_object("DO-1").unwrap().status,
            ObjectStatus::Completed
        );
        assert_eq!(store.get_plan("DP-1").unwrap().status, PlanStatus::Open);
    }

    #[test]
    fn test_resolve_run_rederives_plan_from_full_sibling_set() {
        let store = seeded_store();
        store.begin_run("DO-1").unwrap();

        let resolution = store
            .resolve_run("DO-1", &ObjectEvent::Complete)
            .unwrap();
        assert_eq!(resolution.object.status, ObjectStatus::Completed);
        // DO-2 is still Open, so completion of DO-1 alone does not settle
        // the plan
        assert_eq!(resolution.plan.status, PlanStatus::AwaitingDoCompletion);
    }

    #[test]
    fn test_resolve_run_failure_fails_plan() {
        let store = seeded_store();
        store.begin_run("DO-1").unwrap();

        let resolution = store
            .resolve_run("DO-1", &ObjectEvent::fail_with_error("boom"))
            .unwrap();
        assert_eq!(resolution.object.status, ObjectStatus::Failed);
        assert_eq!(resolution.plan.status, PlanStatus::Failed);
    }

    #[test]
    fn test_resolve_run_on_orphan_object_changes_nothing() {
        // Seeded object referencing a plan that was never loaded
        let store = DeploymentStore::from_seed(
            vec![],
            vec![flow_object("DO-1", "DP-GHOST", ObjectStatus::InProgress)],
        );

        assert_eq!(
            store
                .resolve_run("DO-1", &ObjectEvent::Complete)
                .unwrap_err(),
            DeployCoreError::PlanNotFound("DP-GHOST".to_string())
        );
        assert_eq!(
            store.get_object("DO-1").unwrap().status,
            ObjectStatus::InProgress
        );
    }

    #[test]
    fn test_update_object_restamps_updated_date() {
        let store = seeded_store();
        let before = store.get_object("DO-1").unwrap();

        let mut edited = before.clone();
        edited.summary = "New summary".to_string();
        // Caller-supplied timestamp is overridden
        edited.updated_date = "2000-01-01T00:00:00Z".parse().unwrap();

        let saved = store.update_object(edited).unwrap();
        assert_eq!(saved.summary, "New summary");
        assert!(saved.updated_date > before.updated_date);
        assert_eq!(store.get_object("DO-1").unwrap(), saved);
    }

    #[test]
    fn test_update_object_rejects_invalid_version_without_commit() {
        let store = seeded_store();
        let before = store.get_object("DO-1").unwrap();

        let mut edited = before.clone();
        match &mut edited.details {
            ObjectDetails::Flow(flow) => flow.new_version = "abc".to_string(),
            _ => unreachable!(),
        }

        let err = store.update_object(edited).unwrap_err();
        assert!(matches!(err, DeployCoreError::Validation(_)));
        // Stored record unchanged, updated_date included
        assert_eq!(store.get_object("DO-1").unwrap(), before);
    }

    #[test]
    fn test_update_unknown_object_is_an_error() {
        let store = seeded_store();
        let ghost = flow_object("DO-404", "DP-1", ObjectStatus::Open);
        assert_eq!(
            store.update_object(ghost).unwrap_err(),
            DeployCoreError::ObjectNotFound("DO-404".to_string())
        );
    }

    #[test]
    fn test_list_objects_for_plan_uses_dp_id_not_do_ids() {
        // DP-1 declares only DO-1, but DO-2 points at it; dp_id wins
        let store = DeploymentStore::from_seed(
            vec![plan("DP-1", &["DO-1"])],
            vec![
                flow_object("DO-1", "DP-1", ObjectStatus::Open),
                flow_object("DO-2", "DP-1", ObjectStatus::Open),
            ],
        );
        let children = store.list_objects_for_plan("DP-1");
        assert_eq!(children.len(), 2);
        assert_eq!(children[0].id, "DO-1");
        assert_eq!(children[1].id, "DO-2");
    }
}
