//! Pure transition function for the deployment object state machine.
//!
//! ```text
//! Open/Approved --Start--> InProgress --Complete--> Completed
//!                                    \----Fail----> Failed
//! ```
//!
//! `PendingApproval`, `Completed`, and `Failed` objects are not runnable; a
//! `Start` event from any of those states is an invalid transition and never
//! mutates anything.

use super::events::ObjectEvent;
use super::states::ObjectStatus;
use crate::error::{DeployCoreError, Result};

/// Determine the target status for an object given its current status and an
/// event. Returns `InvalidTransition` for any pair outside the machine.
pub fn next_object_status(current: ObjectStatus, event: &ObjectEvent) -> Result<ObjectStatus> {
    let target = match (current, event) {
        // Run start from the runnable set
        (ObjectStatus::Open, ObjectEvent::Start) => ObjectStatus::InProgress,
        (ObjectStatus::Approved, ObjectEvent::Start) => ObjectStatus::InProgress,

        // Run resolution
        (ObjectStatus::InProgress, ObjectEvent::Complete) => ObjectStatus::Completed,
        (ObjectStatus::InProgress, ObjectEvent::Fail(_)) => ObjectStatus::Failed,

        (from, event) => {
            return Err(DeployCoreError::InvalidTransition {
                from: from.to_string(),
                event: event.event_type().to_string(),
            })
        }
    };

    Ok(target)
}
