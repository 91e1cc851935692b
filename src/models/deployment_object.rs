//! Deployment object model.
//!
//! An object is one deployment task belonging to exactly one plan. The
//! `details` payload is a discriminated union over the four object types;
//! serde keeps the original wire shape (a `type` tag string plus a nested
//! `description` object, camelCase fields throughout) so records round-trip
//! through a structured encoding exactly.

use crate::state_machine::ObjectStatus;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// One deployment task of a specific type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeploymentObject {
    pub id: String,
    /// Owning plan id; the object does not own the plan
    pub dp_id: String,
    pub summary: String,
    pub status: ObjectStatus,
    pub priority: Priority,
    pub labels: Vec<String>,
    pub reporter: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignee: Option<String>,
    pub created_date: DateTime<Utc>,
    pub updated_date: DateTime<Utc>,
    #[serde(flatten)]
    pub details: ObjectDetails,
}

impl DeploymentObject {
    /// Wire name of this object's type tag
    pub fn type_name(&self) -> &'static str {
        self.details.type_name()
    }
}

/// Issue priority
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Priority {
    Highest,
    High,
    Medium,
    Low,
    Lowest,
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Highest => write!(f, "Highest"),
            Self::High => write!(f, "High"),
            Self::Medium => write!(f, "Medium"),
            Self::Low => write!(f, "Low"),
            Self::Lowest => write!(f, "Lowest"),
        }
    }
}

/// Type-specific description payload; exactly one variant per object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "description")]
pub enum ObjectDetails {
    #[serde(rename = "NiFi Flow DO")]
    Flow(FlowDetails),
    #[serde(rename = "NiFi Script DO")]
    Script(ScriptDetails),
    #[serde(rename = "NiFi Service DO")]
    Service(ServiceDetails),
    #[serde(rename = "NiFi S2S Config DO")]
    S2sConfig(S2sConfigDetails),
}

impl ObjectDetails {
    /// Wire name of the type tag
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Flow(_) => "NiFi Flow DO",
            Self::Script(_) => "NiFi Script DO",
            Self::Service(_) => "NiFi Service DO",
            Self::S2sConfig(_) => "NiFi S2S Config DO",
        }
    }
}

/// Deploy a new entity or update an existing one
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeployAction {
    #[serde(rename = "Deploy New")]
    DeployNew,
    #[serde(rename = "Update Existing")]
    UpdateExisting,
}

/// Flow deployment against a registry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlowDetails {
    pub flow_name: String,
    pub action: DeployAction,
    pub registry_bucket: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_version: Option<String>,
    /// Must match the dotted-version pattern `\d+.\d+(.\d+)?`
    pub new_version: String,
    pub nifi_registry_url: String,
    pub associated_parameter_contexts: Vec<String>,
}

/// Script deployment onto a target server
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScriptDetails {
    pub script_name: String,
    pub action: DeployAction,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub script_content: Option<String>,
    pub git_repo_url: String,
    pub git_repo_tag: String,
    pub target_server: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_processor_id: Option<String>,
    pub target_script_directory: String,
    #[serde(rename = "relevantNiFiFlow")]
    pub relevant_nifi_flow: String,
}

/// Service category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ServiceType {
    #[serde(rename = "NiFi REST")]
    Rest,
    #[serde(rename = "NiFi AI Service")]
    AiService,
    #[serde(rename = "NiFi Data Service")]
    DataService,
}

/// Desired enabled-state after deployment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnabledState {
    Enable,
    Disable,
    #[serde(rename = "No Change")]
    NoChange,
}

/// Controller-service deployment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceDetails {
    pub service_type: ServiceType,
    pub service_name: String,
    pub action: DeployAction,
    pub service_class: String,
    /// Stored structured; raw editor text must pass
    /// [`crate::validation::parse_service_properties`] first
    pub service_properties: Map<String, Value>,
    pub enabled_state: EnabledState,
    pub git_repo_url: String,
    pub git_repo_tag: String,
    pub target_server: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SecurityProtocol {
    #[serde(rename = "HTTP")]
    Http,
    #[serde(rename = "HTTPS")]
    Https,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransportProtocol {
    #[serde(rename = "RAW")]
    Raw,
    #[serde(rename = "HTTP")]
    Http,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PermissionsAction {
    Add,
    Update,
    Remove,
    #[serde(rename = "No Change")]
    NoChange,
}

/// Site-to-site remote transfer configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct S2sConfigDetails {
    pub remote_group_path: String,
    pub remote_input_port_name: String,
    #[serde(rename = "targetNiFiUrl")]
    pub target_nifi_url: String,
    pub security_protocol: SecurityProtocol,
    pub transport_protocol: TransportProtocol,
    pub batch_size: u32,
    pub concurrently_available_tasks: u32,
    pub permissions_action: PermissionsAction,
    pub authorized_users: Vec<String>,
}
