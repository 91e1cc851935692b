//! Entity models for deployment plans and deployment objects.

pub mod deployment_object;
pub mod deployment_plan;

pub use deployment_object::{
    DeployAction, DeploymentObject, EnabledState, FlowDetails, ObjectDetails, PermissionsAction,
    Priority, S2sConfigDetails, ScriptDetails, SecurityProtocol, ServiceDetails, ServiceType,
    TransportProtocol,
};
pub use deployment_plan::{DeploymentPlan, PlanDescription};
