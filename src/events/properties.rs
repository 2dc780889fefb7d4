//! Property bags for the typed event union.
//!
//! Each struct here is the single source of truth for the shape of one
//! event's properties. Optional fields are skipped entirely when absent so
//! suppressed keys never reach the delivery backend.

use serde::{Deserialize, Serialize};

/// Properties for `user.created`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserCreatedProperties {
    pub user_connection_type: UserConnectionType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organization_id: Option<String>,
}

/// How a user account was created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserConnectionType {
    Password,
    Sso,
    Invite,
}

/// Properties for `user.updated`.
///
/// When `is_tracking_anonymized` is set, the identifying fields (`email`,
/// `first_name`, `last_name`) are stripped before dispatch and never appear
/// in the emitted bag. The base set below the identifying fields is sent
/// either way.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserUpdatedProperties {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organization_id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_title: Option<String>,

    pub is_tracking_anonymized: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_marketing_opted_in: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_setup_complete: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
}

impl UserUpdatedProperties {
    /// Copy with the identifying fields removed. One-way: once an event has
    /// been sent anonymized, nothing downstream can recover these fields.
    pub(crate) fn anonymized(&self) -> Self {
        Self {
            email: None,
            first_name: None,
            last_name: None,
            ..self.clone()
        }
    }
}

/// Properties for `user.verified`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserVerifiedProperties {
    pub is_verified: bool,

    pub is_tracking_anonymized: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl UserVerifiedProperties {
    pub(crate) fn anonymized(&self) -> Self {
        Self {
            email: None,
            ..self.clone()
        }
    }
}

/// Properties for `user.deleted`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserDeletedProperties {
    pub deleted_user_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organization_id: Option<String>,
}

/// Properties for organization lifecycle events.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrganizationProperties {
    pub organization_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organization_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_color_palette_updated: Option<bool>,
}

/// Properties for project lifecycle events.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectProperties {
    pub project_id: String,
    pub organization_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_type: Option<ProjectType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warehouse_type: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectType {
    Default,
    Preview,
}

/// Properties for space lifecycle events.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpaceProperties {
    pub space_id: String,
    pub project_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_private: Option<bool>,
}

/// Properties for dashboard lifecycle events.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardProperties {
    pub dashboard_id: String,
    pub project_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tile_count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter_count: Option<usize>,
}

/// Properties for `dashboard.viewed`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardViewProperties {
    pub dashboard_id: String,
    pub project_id: String,
    pub context: crate::request_context::ExecutionContext,
}

/// Properties for saved-chart lifecycle events.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavedChartProperties {
    pub chart_id: String,
    pub project_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chart_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dimension_count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metric_count: Option<usize>,
}

/// Properties for `query.executed`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryExecutedProperties {
    pub project_id: String,
    pub context: crate::request_context::ExecutionContext,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chart_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metrics_count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dimensions_count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub table_calculations_count: Option<usize>,
}

/// Properties for `sql.executed`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SqlExecutedProperties {
    pub project_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub statement_count: Option<usize>,
}

/// Properties for `validation.run`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationRunProperties {
    pub project_id: String,
    pub validation_run_id: String,
    pub context: crate::request_context::ExecutionContext,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chart_error_count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dashboard_error_count: Option<usize>,
}

/// Properties for scheduled-delivery lifecycle events.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduledDeliveryProperties {
    pub scheduler_id: String,
    pub project_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_type: Option<DeliveryResourceType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cron_expression: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub targets_count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<DeliveryFormat>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeliveryResourceType {
    Dashboard,
    Chart,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeliveryFormat {
    Image,
    Csv,
}

/// Properties for `share_link.created`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShareLinkProperties {
    pub path: String,
    pub organization_id: String,
}

/// Properties for personal-access-token events.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersonalAccessTokenProperties {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at_set: Option<bool>,
}

/// Properties for `csv.downloaded`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CsvDownloadProperties {
    pub project_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub row_count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub storage: Option<String>,
}
