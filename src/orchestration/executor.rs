//! Deployment executor seam and its simulated implementation.
//!
//! The executor stands in for a real deployment backend. The trait is the
//! boundary: production code wires in [`SimulatedExecutor`], tests wire in a
//! deterministic double.

use crate::config::SimulatorConfig;
use crate::models::DeploymentObject;
use async_trait::async_trait;
use rand::Rng;
use std::time::Duration;

/// Terminal outcome of a deployment run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// Deployment succeeded
    Succeeded,
    /// Deployment failed with an error message
    Failed(String),
}

/// Executes a deployment object's run and resolves to a terminal outcome.
/// No retries and no cancellation: one call, one outcome.
#[async_trait]
pub trait DeploymentExecutor: Send + Sync {
    /// Run the deployment for the given object
    async fn execute(&self, object: &DeploymentObject) -> RunOutcome;

    /// Get a description of this executor for logging
    fn description(&self) -> &'static str;
}

/// Simulated executor: resolves after a uniformly random delay, succeeding
/// with the configured probability
#[derive(Debug, Clone)]
pub struct SimulatedExecutor {
    config: SimulatorConfig,
}

impl SimulatedExecutor {
    pub fn new(config: SimulatorConfig) -> Self {
        Self { config }
    }
}

impl Default for SimulatedExecutor {
    fn default() -> Self {
        Self::new(SimulatorConfig::default())
    }
}

#[async_trait]
impl DeploymentExecutor for SimulatedExecutor {
    async fn execute(&self, object: &DeploymentObject) -> RunOutcome {
        // Draw both samples before suspending; ThreadRng must not be held
        // across an await point
        let (delay_ms, success) = {
            let mut rng = rand::rng();
            (
                rng.random_range(self.config.min_delay_ms..self.config.max_delay_ms),
                rng.random_bool(self.config.success_probability),
            )
        };

        tracing::debug!(
            do_id = %object.id,
            delay_ms = delay_ms,
            "Simulating deployment run"
        );
        tokio::time::sleep(Duration::from_millis(delay_ms)).await;

        if success {
            RunOutcome::Succeeded
        } else {
            RunOutcome::Failed("Simulated deployment failure".to_string())
        }
    }

    fn description(&self) -> &'static str {
        "Simulated deployment executor"
    }
}
