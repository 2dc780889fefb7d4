//! The event dispatcher: type-checks, transforms and forwards event records.

use std::future::Future;
use std::sync::Arc;

use chrono::Utc;
use serde_json::{Map, Value};
use tracing::error;

use crate::config::{InstallInfo, TelemetryConfig};
use crate::context::{AppContext, GroupMembership, Identity, Subject};
use crate::delivery::{
    new_message_id, DeliveryClient, GroupMessage, HttpDeliveryClient, IdentifyMessage,
    TrackMessage,
};
use crate::errors::{TelemetryResult, WrappedError};
use crate::events::Event;

/// Lifecycle suffixes emitted by [`EventDispatcher::wrap_event`].
const STARTED_SUFFIX: &str = "started";
const COMPLETED_SUFFIX: &str = "completed";
const ERROR_SUFFIX: &str = "error";

/// Transforms typed event records and forwards them to a delivery backend.
///
/// Holds the delivery client by capability (composition, not SDK
/// inheritance), a context computed once at construction, and the
/// suppression flag derived from configuration. Cheap to share behind an
/// `Arc`; every call is independent and stateless beyond those three.
pub struct EventDispatcher {
    delivery: Arc<dyn DeliveryClient>,
    context: AppContext,
    context_value: Value,
    enabled: bool,
}

impl EventDispatcher {
    /// Creates a dispatcher over an explicit delivery client.
    pub fn new(
        config: &TelemetryConfig,
        install: InstallInfo,
        delivery: Arc<dyn DeliveryClient>,
    ) -> TelemetryResult<Self> {
        let context = AppContext::new(config, install);
        let context_value = serde_json::to_value(&context)?;
        Ok(Self {
            delivery,
            context,
            context_value,
            enabled: config.enabled(),
        })
    }

    /// Creates a dispatcher backed by the HTTP delivery client, resolving
    /// install identity from the environment.
    pub fn from_config(config: &TelemetryConfig) -> TelemetryResult<Self> {
        let delivery = Arc::new(HttpDeliveryClient::new(
            config.data_plane_url.clone(),
            config.write_key.clone().unwrap_or_default(),
        ));
        Self::new(config, InstallInfo::from_env(), delivery)
    }

    /// The immutable context attached to every outgoing call.
    pub fn context(&self) -> &AppContext {
        &self.context
    }

    /// Whether calls are actually delivered or suppressed.
    pub fn enabled(&self) -> bool {
        self.enabled
    }

    /// Sends subject traits merged with the process context.
    ///
    /// No-op when telemetry is not configured; transport failures propagate
    /// to the caller.
    pub async fn identify(&self, identity: Identity) -> TelemetryResult<()> {
        if !self.enabled {
            return Ok(());
        }

        let traits = match &identity.traits {
            Some(traits) => match serde_json::to_value(traits)? {
                Value::Object(map) => map,
                _ => Map::new(),
            },
            None => Map::new(),
        };

        self.delivery
            .identify(IdentifyMessage {
                subject: identity.subject,
                traits,
                context: self.context_value.clone(),
                timestamp: Utc::now(),
                message_id: new_message_id(),
            })
            .await
    }

    /// Transforms and forwards one event record.
    ///
    /// The event union applies its per-kind transformations (anonymization
    /// for the user-updated and user-verified shapes); the name is
    /// namespaced with the application name and the process context is
    /// attached. No-op when telemetry is not configured.
    pub async fn track(&self, subject: Subject, event: &Event) -> TelemetryResult<()> {
        self.dispatch(subject, event, None, Map::new()).await
    }

    /// Sends a subject-to-group association merged with the context.
    pub async fn group(&self, membership: GroupMembership) -> TelemetryResult<()> {
        if !self.enabled {
            return Ok(());
        }

        let traits = match serde_json::to_value(&membership.traits)? {
            Value::Object(map) => map,
            _ => Map::new(),
        };

        self.delivery
            .group(GroupMessage {
                subject: membership.subject,
                group_id: membership.group_id,
                traits,
                context: self.context_value.clone(),
                timestamp: Utc::now(),
                message_id: new_message_id(),
            })
            .await
    }

    /// Wraps an asynchronous operation with lifecycle events.
    ///
    /// Emits `<name>.started`, awaits the operation, then exactly one
    /// terminal event: `<name>.completed` on success or `<name>.error` (with
    /// an `error` message property) on failure, after which the original
    /// failure is re-raised unchanged as [`WrappedError::Operation`].
    /// Failures of the wrapper's own emissions are not caught and surface
    /// as [`WrappedError::Transport`].
    pub async fn wrap_event<T, E, F>(
        &self,
        subject: Subject,
        event: &Event,
        operation: F,
    ) -> Result<T, WrappedError<E>>
    where
        E: std::fmt::Display,
        F: Future<Output = Result<T, E>>,
    {
        self.wrap_event_with(subject, event, operation, |_: &T| Map::new())
            .await
    }

    /// Like [`wrap_event`](Self::wrap_event), additionally merging
    /// properties derived from the successful result into the
    /// `.completed` event's bag.
    pub async fn wrap_event_with<T, E, F, D>(
        &self,
        subject: Subject,
        event: &Event,
        operation: F,
        derive: D,
    ) -> Result<T, WrappedError<E>>
    where
        E: std::fmt::Display,
        F: Future<Output = Result<T, E>>,
        D: FnOnce(&T) -> Map<String, Value>,
    {
        self.dispatch(subject.clone(), event, Some(STARTED_SUFFIX), Map::new())
            .await
            .map_err(WrappedError::Transport)?;

        match operation.await {
            Ok(result) => {
                let derived = derive(&result);
                self.dispatch(subject, event, Some(COMPLETED_SUFFIX), derived)
                    .await
                    .map_err(WrappedError::Transport)?;
                Ok(result)
            }
            Err(operation_error) => {
                let mut extra = Map::new();
                extra.insert(
                    "error".to_string(),
                    Value::String(operation_error.to_string()),
                );
                self.dispatch(subject, event, Some(ERROR_SUFFIX), extra)
                    .await
                    .map_err(WrappedError::Transport)?;
                error!(
                    event = event.name(),
                    error = %operation_error,
                    "Wrapped operation failed"
                );
                Err(WrappedError::Operation(operation_error))
            }
        }
    }

    /// Namespaces the event name, attaches context, merges any extra
    /// properties, and forwards. The single funnel for all track calls.
    async fn dispatch(
        &self,
        subject: Subject,
        event: &Event,
        suffix: Option<&str>,
        extra: Map<String, Value>,
    ) -> TelemetryResult<()> {
        if !self.enabled {
            return Ok(());
        }

        let mut properties = event.properties()?;
        properties.extend(extra);

        let name = match suffix {
            Some(suffix) => format!("{}.{}.{}", self.context.app.name, event.name(), suffix),
            None => format!("{}.{}", self.context.app.name, event.name()),
        };

        self.delivery
            .track(TrackMessage {
                subject,
                event: name,
                properties,
                context: self.context_value.clone(),
                timestamp: Utc::now(),
                message_id: new_message_id(),
            })
            .await
    }
}
