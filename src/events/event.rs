//! The closed union of trackable events.
//!
//! Every event the application can emit is one variant of [`Event`], tagged
//! by its canonical dotted name and carrying a fixed payload struct. The
//! compiler enforces that dispatch handles every variant; adding an event
//! shape means adding a variant, not a stringly-typed branch.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::errors::TelemetryResult;
use crate::events::properties::*;

/// A typed event record ready for dispatch.
///
/// The variant uniquely selects the shape of the property bag. Event names
/// use lowercase dotted form (`user.updated`, `query.executed`); the
/// dispatcher prefixes them with the application name before delivery.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "event", content = "properties")]
pub enum Event {
    #[serde(rename = "user.created")]
    UserCreated(UserCreatedProperties),
    #[serde(rename = "user.updated")]
    UserUpdated(UserUpdatedProperties),
    #[serde(rename = "user.verified")]
    UserVerified(UserVerifiedProperties),
    #[serde(rename = "user.deleted")]
    UserDeleted(UserDeletedProperties),

    #[serde(rename = "organization.created")]
    OrganizationCreated(OrganizationProperties),
    #[serde(rename = "organization.updated")]
    OrganizationUpdated(OrganizationProperties),
    #[serde(rename = "organization.deleted")]
    OrganizationDeleted(OrganizationProperties),

    #[serde(rename = "project.created")]
    ProjectCreated(ProjectProperties),
    #[serde(rename = "project.updated")]
    ProjectUpdated(ProjectProperties),
    #[serde(rename = "project.deleted")]
    ProjectDeleted(ProjectProperties),

    #[serde(rename = "space.created")]
    SpaceCreated(SpaceProperties),
    #[serde(rename = "space.updated")]
    SpaceUpdated(SpaceProperties),
    #[serde(rename = "space.deleted")]
    SpaceDeleted(SpaceProperties),

    #[serde(rename = "dashboard.created")]
    DashboardCreated(DashboardProperties),
    #[serde(rename = "dashboard.updated")]
    DashboardUpdated(DashboardProperties),
    #[serde(rename = "dashboard.deleted")]
    DashboardDeleted(DashboardProperties),
    #[serde(rename = "dashboard.viewed")]
    DashboardViewed(DashboardViewProperties),

    #[serde(rename = "saved_chart.created")]
    SavedChartCreated(SavedChartProperties),
    #[serde(rename = "saved_chart.updated")]
    SavedChartUpdated(SavedChartProperties),
    #[serde(rename = "saved_chart.deleted")]
    SavedChartDeleted(SavedChartProperties),
    #[serde(rename = "saved_chart.viewed")]
    SavedChartViewed(SavedChartProperties),

    #[serde(rename = "query.executed")]
    QueryExecuted(QueryExecutedProperties),
    #[serde(rename = "sql.executed")]
    SqlExecuted(SqlExecutedProperties),

    #[serde(rename = "validation.run")]
    ValidationRun(ValidationRunProperties),

    #[serde(rename = "scheduled_delivery.created")]
    ScheduledDeliveryCreated(ScheduledDeliveryProperties),
    #[serde(rename = "scheduled_delivery.updated")]
    ScheduledDeliveryUpdated(ScheduledDeliveryProperties),
    #[serde(rename = "scheduled_delivery.deleted")]
    ScheduledDeliveryDeleted(ScheduledDeliveryProperties),
    #[serde(rename = "scheduled_delivery.sent")]
    ScheduledDeliverySent(ScheduledDeliveryProperties),

    #[serde(rename = "share_link.created")]
    ShareLinkCreated(ShareLinkProperties),

    #[serde(rename = "personal_access_token.created")]
    PersonalAccessTokenCreated(PersonalAccessTokenProperties),
    #[serde(rename = "personal_access_token.deleted")]
    PersonalAccessTokenDeleted(PersonalAccessTokenProperties),

    #[serde(rename = "csv.downloaded")]
    CsvDownloaded(CsvDownloadProperties),

    /// Escape hatch for known event names without a dedicated variant yet.
    #[serde(rename = "untyped")]
    Untyped {
        event: String,
        properties: Map<String, Value>,
    },
}

impl Event {
    /// Canonical dotted event name, before application namespacing.
    pub fn name(&self) -> &str {
        match self {
            Self::UserCreated(_) => "user.created",
            Self::UserUpdated(_) => "user.updated",
            Self::UserVerified(_) => "user.verified",
            Self::UserDeleted(_) => "user.deleted",
            Self::OrganizationCreated(_) => "organization.created",
            Self::OrganizationUpdated(_) => "organization.updated",
            Self::OrganizationDeleted(_) => "organization.deleted",
            Self::ProjectCreated(_) => "project.created",
            Self::ProjectUpdated(_) => "project.updated",
            Self::ProjectDeleted(_) => "project.deleted",
            Self::SpaceCreated(_) => "space.created",
            Self::SpaceUpdated(_) => "space.updated",
            Self::SpaceDeleted(_) => "space.deleted",
            Self::DashboardCreated(_) => "dashboard.created",
            Self::DashboardUpdated(_) => "dashboard.updated",
            Self::DashboardDeleted(_) => "dashboard.deleted",
            Self::DashboardViewed(_) => "dashboard.viewed",
            Self::SavedChartCreated(_) => "saved_chart.created",
            Self::SavedChartUpdated(_) => "saved_chart.updated",
            Self::SavedChartDeleted(_) => "saved_chart.deleted",
            Self::SavedChartViewed(_) => "saved_chart.viewed",
            Self::QueryExecuted(_) => "query.executed",
            Self::SqlExecuted(_) => "sql.executed",
            Self::ValidationRun(_) => "validation.run",
            Self::ScheduledDeliveryCreated(_) => "scheduled_delivery.created",
            Self::ScheduledDeliveryUpdated(_) => "scheduled_delivery.updated",
            Self::ScheduledDeliveryDeleted(_) => "scheduled_delivery.deleted",
            Self::ScheduledDeliverySent(_) => "scheduled_delivery.sent",
            Self::ShareLinkCreated(_) => "share_link.created",
            Self::PersonalAccessTokenCreated(_) => "personal_access_token.created",
            Self::PersonalAccessTokenDeleted(_) => "personal_access_token.deleted",
            Self::CsvDownloaded(_) => "csv.downloaded",
            Self::Untyped { event, .. } => event,
        }
    }

    /// Serializes this event's payload into the property bag that will be
    /// delivered, applying per-kind transformations.
    ///
    /// `user.updated` and `user.verified` respect the anonymization flag:
    /// when set, identifying fields are removed from the bag entirely and
    /// never reach the delivery backend.
    pub fn properties(&self) -> TelemetryResult<Map<String, Value>> {
        match self {
            Self::UserUpdated(props) if props.is_tracking_anonymized => {
                to_bag(&props.anonymized())
            }
            Self::UserVerified(props) if props.is_tracking_anonymized => {
                to_bag(&props.anonymized())
            }

            Self::UserCreated(props) => to_bag(props),
            Self::UserUpdated(props) => to_bag(props),
            Self::UserVerified(props) => to_bag(props),
            Self::UserDeleted(props) => to_bag(props),
            Self::OrganizationCreated(props)
            | Self::OrganizationUpdated(props)
            | Self::OrganizationDeleted(props) => to_bag(props),
            Self::ProjectCreated(props)
            | Self::ProjectUpdated(props)
            | Self::ProjectDeleted(props) => to_bag(props),
            Self::SpaceCreated(props) | Self::SpaceUpdated(props) | Self::SpaceDeleted(props) => {
                to_bag(props)
            }
            Self::DashboardCreated(props)
            | Self::DashboardUpdated(props)
            | Self::DashboardDeleted(props) => to_bag(props),
            Self::DashboardViewed(props) => to_bag(props),
            Self::SavedChartCreated(props)
            | Self::SavedChartUpdated(props)
            | Self::SavedChartDeleted(props)
            | Self::SavedChartViewed(props) => to_bag(props),
            Self::QueryExecuted(props) => to_bag(props),
            Self::SqlExecuted(props) => to_bag(props),
            Self::ValidationRun(props) => to_bag(props),
            Self::ScheduledDeliveryCreated(props)
            | Self::ScheduledDeliveryUpdated(props)
            | Self::ScheduledDeliveryDeleted(props)
            | Self::ScheduledDeliverySent(props) => to_bag(props),
            Self::ShareLinkCreated(props) => to_bag(props),
            Self::PersonalAccessTokenCreated(props)
            | Self::PersonalAccessTokenDeleted(props) => to_bag(props),
            Self::CsvDownloaded(props) => to_bag(props),
            Self::Untyped { properties, .. } => Ok(properties.clone()),
        }
    }
}

fn to_bag<T: Serialize>(payload: &T) -> TelemetryResult<Map<String, Value>> {
    match serde_json::to_value(payload)? {
        Value::Object(map) => Ok(map),
        // Payloads are structs, so the serialized form is always an object.
        _ => Ok(Map::new()),
    }
}
