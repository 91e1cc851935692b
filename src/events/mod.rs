//! Lifecycle event publication.
//!
//! Every plan/object transition publishes a named event with a JSON context
//! so a presentation layer (or anything else) can react without polling the
//! store.

pub mod publisher;

pub use publisher::{EventPublisher, PublishedEvent};

/// Event name constants
pub mod names {
    pub const PLAN_APPROVED: &str = "plan.approved";
    pub const PLAN_STATUS_CHANGED: &str = "plan.status_changed";
    pub const OBJECT_RUN_STARTED: &str = "object.run_started";
    pub const OBJECT_RUN_COMPLETED: &str = "object.run_completed";
    pub const OBJECT_RUN_FAILED: &str = "object.run_failed";
    pub const OBJECT_UPDATED: &str = "object.updated";
}
