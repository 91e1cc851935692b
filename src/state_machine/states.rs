use serde::{Deserialize, Serialize};
use std::fmt;

/// Deployment plan states. `Open`, `PendingApproval`, and `Approved` are set
/// only by explicit approval actions; the remaining states are derived from
/// the plan's child deployment objects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlanStatus {
    /// Initial state when the plan is created
    Open,
    /// Plan has been submitted for approval
    #[serde(rename = "Pending Approval")]
    PendingApproval,
    /// Plan has been approved and its objects may be run
    Approved,
    /// At least one child object has been started; aggregate not yet settled
    #[serde(rename = "Awaiting DO Completion")]
    AwaitingDoCompletion,
    /// Every child object completed successfully
    Completed,
    /// At least one child object failed
    Failed,
}

impl PlanStatus {
    /// Check if this is a terminal state (no further automatic transition)
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Failed)
    }

    /// Check if this state belongs to the approval stage, which is owned by
    /// explicit approval actions rather than child-status derivation
    pub fn is_approval_stage(&self) -> bool {
        matches!(self, Self::Open | Self::PendingApproval | Self::Approved)
    }
}

impl fmt::Display for PlanStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Open => write!(f, "Open"),
            Self::PendingApproval => write!(f, "Pending Approval"),
            Self::Approved => write!(f, "Approved"),
            Self::AwaitingDoCompletion => write!(f, "Awaiting DO Completion"),
            Self::Completed => write!(f, "Completed"),
            Self::Failed => write!(f, "Failed"),
        }
    }
}

impl std::str::FromStr for PlanStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Open" => Ok(Self::Open),
            "Pending Approval" => Ok(Self::PendingApproval),
            "Approved" => Ok(Self::Approved),
            "Awaiting DO Completion" => Ok(Self::AwaitingDoCompletion),
            "Completed" => Ok(Self::Completed),
            "Failed" => Ok(Self::Failed),
            _ => Err(format!("Invalid plan status: {s}")),
        }
    }
}

/// Deployment object states. An object never enters
/// `Awaiting DO Completion`; that state is plan-only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObjectStatus {
    /// Initial state when the object is created
    Open,
    /// Object has been submitted for approval
    #[serde(rename = "Pending Approval")]
    PendingApproval,
    /// Object has been approved and may be run
    Approved,
    /// Object deployment is executing
    #[serde(rename = "In Progress")]
    InProgress,
    /// Deployment resolved successfully
    Completed,
    /// Deployment resolved with a failure
    Failed,
}

impl ObjectStatus {
    /// Check if this is a terminal state (no further automatic transition)
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Failed)
    }

    /// Check if the object is currently executing
    pub fn is_active(&self) -> bool {
        matches!(self, Self::InProgress)
    }

    /// Check if a run may be requested from this state. A `Failed` object is
    /// deliberately not runnable: deployment failure is permanent within a
    /// session.
    pub fn is_runnable(&self) -> bool {
        matches!(self, Self::Open | Self::Approved)
    }
}

impl fmt::Display for ObjectStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Open => write!(f, "Open"),
            Self::PendingApproval => write!(f, "Pending Approval"),
            Self::Approved => write!(f, "Approved"),
            Self::InProgress => write!(f, "In Progress"),
            Self::Completed => write!(f, "Completed"),
            Self::Failed => write!(f, "Failed"),
        }
    }
}

impl std::str::FromStr for ObjectStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Open" => Ok(Self::Open),
            "Pending Approval" => Ok(Self::PendingApproval),
            "Approved" => Ok(Self::Approved),
            "In Progress" => Ok(Self::InProgress),
            "Completed" => Ok(Self::Completed),
            "Failed" => Ok(Self::Failed),
            _ => Err(format!("Invalid object status: {s}")),
        }
    }
}

/// Default state for new plans
impl Default for PlanStatus {
    fn default() -> Self {
        Self::Open
    }
}

/// Default state for new objects
impl Default for ObjectStatus {
    fn default() -> Self {
        Self::Open
    }
}
