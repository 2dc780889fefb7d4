//! Delivery backend seam.
//!
//! The dispatcher holds a delivery client by capability rather than
//! subclassing an SDK type; any backend that can accept identify/track/group
//! messages plugs in here. Retry, batching and flushing are the backend's
//! concern, not this layer's.

pub mod capture;
pub mod http;

pub use capture::{CaptureDeliveryClient, CapturedMessage};
pub use http::HttpDeliveryClient;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::context::Subject;
use crate::errors::TelemetryResult;

/// A fully-formed `identify` call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdentifyMessage {
    #[serde(flatten)]
    pub subject: Subject,
    pub traits: Map<String, Value>,
    pub context: Value,
    pub timestamp: DateTime<Utc>,
    pub message_id: String,
}

/// A fully-formed `track` call, event name already namespaced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackMessage {
    #[serde(flatten)]
    pub subject: Subject,
    pub event: String,
    pub properties: Map<String, Value>,
    pub context: Value,
    pub timestamp: DateTime<Utc>,
    pub message_id: String,
}

/// A fully-formed `group` call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupMessage {
    #[serde(flatten)]
    pub subject: Subject,
    pub group_id: String,
    pub traits: Map<String, Value>,
    pub context: Value,
    pub timestamp: DateTime<Utc>,
    pub message_id: String,
}

pub(crate) fn new_message_id() -> String {
    Uuid::new_v4().to_string()
}

/// Capability a delivery backend must provide.
///
/// Errors from these calls propagate to the caller untouched; this layer
/// performs no retries and no silent suppression of failures.
#[async_trait]
pub trait DeliveryClient: Send + Sync {
    /// Delivers subject traits.
    async fn identify(&self, message: IdentifyMessage) -> TelemetryResult<()>;

    /// Delivers a named event with its property bag.
    async fn track(&self, message: TrackMessage) -> TelemetryResult<()>;

    /// Delivers a subject-to-group association.
    async fn group(&self, message: GroupMessage) -> TelemetryResult<()>;
}
