//! # Deploy Core
//!
//! In-memory core for tracking deployment plans (DPs) composed of
//! deployment objects (DOs) against a flow-orchestration platform.
//!
//! ## Overview
//!
//! A plan groups several objects; running an object executes an
//! asynchronous deployment (simulated here) that resolves to `Completed` or
//! `Failed`, and the plan's aggregate status is derived from the status
//! multiset of its children. The crate is the headless core consumed by a
//! presentation layer: it owns the entities, the status-aggregation state
//! machine, the run lifecycle, and the edit path, and exposes lifecycle
//! events for consumers to react to.
//!
//! ## Module Organization
//!
//! - [`models`] - Deployment plan/object entities and their typed payloads
//! - [`state_machine`] - Object transitions and plan status derivation
//! - [`store`] - Serialized in-memory state store (atomic read-modify-write)
//! - [`orchestration`] - Run executor seam, simulated executor, coordinator
//! - [`events`] - Lifecycle event publication
//! - [`validation`] - Edit-path field validation
//! - [`config`] - Configuration loading and validation
//! - [`logging`] - Structured logging helpers
//! - [`error`] - Structured error handling
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use deploy_core::{DeployConfig, DeploymentCoordinator, DeploymentStore};
//! use std::sync::Arc;
//!
//! # async fn example(
//! #     plans: Vec<deploy_core::DeploymentPlan>,
//! #     objects: Vec<deploy_core::DeploymentObject>,
//! # ) -> deploy_core::Result<()> {
//! let config = DeployConfig::load()?;
//! let store = Arc::new(DeploymentStore::from_seed(plans, objects));
//! let coordinator = DeploymentCoordinator::with_simulator(store, &config);
//!
//! coordinator.approve_plan("DP-1").await?;
//! let handle = coordinator.run_object("DO-1").await?;
//! // The parent plan is already Awaiting DO Completion here; await the
//! // handle if the resolution matters to you.
//! # Ok(())
//! # }
//! ```
//!
//! ## Concurrency
//!
//! All mutations go through one mutex-guarded store, so a run resolution
//! always reads the authoritative, latest state: when several objects under
//! the same plan resolve close together, each resolution re-derives the
//! plan from the complete just-updated sibling set, never from a stale
//! snapshot.

pub mod config;
pub mod error;
pub mod events;
pub mod logging;
pub mod models;
pub mod orchestration;
pub mod state_machine;
pub mod store;
pub mod validation;

pub use config::{DeployConfig, EventsConfig, SimulatorConfig};
pub use error::{DeployCoreError, Result};
pub use events::{EventPublisher, PublishedEvent};
pub use models::{
    DeployAction, DeploymentObject, DeploymentPlan, EnabledState, FlowDetails, ObjectDetails,
    PermissionsAction, PlanDescription, Priority, S2sConfigDetails, ScriptDetails,
    SecurityProtocol, ServiceDetails, ServiceType, TransportProtocol,
};
pub use orchestration::{DeploymentCoordinator, DeploymentExecutor, RunOutcome, SimulatedExecutor};
pub use state_machine::{
    derive_plan_status, next_object_status, ObjectEvent, ObjectStatus, PlanStatus,
};
pub use store::{DeploymentStore, RunResolution, RunStart};
