//! Structured error handling for the deployment core.
//!
//! No error is fatal to the whole system; every failure is local to a single
//! operation and leaves aggregate plan/object state consistent. Mutations
//! referencing missing ids surface explicit not-found errors rather than
//! silently no-opping, and a run requested on a non-runnable object surfaces
//! an invalid-transition error without touching state.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeployCoreError {
    /// A mutation referenced a deployment plan id that does not exist
    #[error("Deployment plan not found: {0}")]
    PlanNotFound(String),

    /// A mutation referenced a deployment object id that does not exist
    #[error("Deployment object not found: {0}")]
    ObjectNotFound(String),

    /// Field validation failed; the prior record is retained unchanged
    #[error("Validation error: {0}")]
    Validation(String),

    /// An event was applied in a state that does not permit it
    #[error("Invalid transition from '{from}' on '{event}'")]
    InvalidTransition { from: String, event: String },

    /// Configuration could not be loaded or failed validation
    #[error("Configuration error: {0}")]
    Configuration(String),
}

pub type Result<T> = std::result::Result<T, DeployCoreError>;
