//! Derivation of a deployment plan's aggregate status from its child
//! deployment objects.
//!
//! The derivation is a pure function of the status multiset: any `Failed`
//! child fails the plan; completion requires every child to be `Completed`,
//! not merely the absence of failure; any other mixture (all open, partially
//! run, runs in flight) leaves the plan awaiting completion.

use super::states::{ObjectStatus, PlanStatus};

/// Derive a plan's status from the statuses of its child objects.
///
/// Returns `None` for an empty child set: no plan should reach derivation
/// with zero children, and the caller is expected to leave the plan's status
/// unchanged in that case.
pub fn derive_plan_status<I>(statuses: I) -> Option<PlanStatus>
where
    I: IntoIterator<Item = ObjectStatus>,
{
    let mut seen_any = false;
    let mut all_completed = true;

    for status in statuses {
        seen_any = true;
        match status {
            ObjectStatus::Failed => return Some(PlanStatus::Failed),
            ObjectStatus::Completed => {}
            _ => all_completed = false,
        }
    }

    if !seen_any {
        return None;
    }

    if all_completed {
        Some(PlanStatus::Completed)
    } else {
        Some(PlanStatus::AwaitingDoCompletion)
    }
}
