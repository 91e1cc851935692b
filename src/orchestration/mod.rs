//! Run orchestration: the executor seam, the simulated executor, and the
//! coordinator exposing the public operations.

pub mod coordinator;
pub mod executor;

pub use coordinator::DeploymentCoordinator;
pub use executor::{DeploymentExecutor, RunOutcome, SimulatedExecutor};
