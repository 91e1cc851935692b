// State machine module for deployment plan / deployment object lifecycle.
//
// The object machine is a pure transition function; the plan's aggregate
// status is derived from the status multiset of its children. All state
// mutation happens in the store so that each transition commits from one
// consistent snapshot.

pub mod aggregation;
pub mod events;
pub mod states;
pub mod transitions;

// Re-export main types for convenient access
pub use aggregation::derive_plan_status;
pub use events::ObjectEvent;
pub use states::{ObjectStatus, PlanStatus};
pub use transitions::next_object_status;
