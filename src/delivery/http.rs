//! HTTP delivery client for a hosted data plane.

use async_trait::async_trait;
use serde::Serialize;
use tracing::debug;

use crate::delivery::{DeliveryClient, GroupMessage, IdentifyMessage, TrackMessage};
use crate::errors::{TelemetryError, TelemetryResult};

/// Delivers messages to a Segment/Rudder-style data plane over HTTPS.
///
/// One JSON POST per message; the write key authenticates as basic-auth
/// username. Transport failures and non-success statuses surface as
/// [`TelemetryError`] — retrying is the data plane SDK's concern upstream
/// of this layer, not ours.
pub struct HttpDeliveryClient {
    client: reqwest::Client,
    data_plane_url: String,
    write_key: String,
}

impl HttpDeliveryClient {
    pub fn new(data_plane_url: impl Into<String>, write_key: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            data_plane_url: data_plane_url.into(),
            write_key: write_key.into(),
        }
    }

    async fn post<T: Serialize>(&self, path: &str, message: &T) -> TelemetryResult<()> {
        let url = format!("{}/{}", self.data_plane_url.trim_end_matches('/'), path);
        let response = self
            .client
            .post(&url)
            .basic_auth(&self.write_key, Some(""))
            .json(message)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(TelemetryError::DeliveryRejected {
                status: status.as_u16(),
            });
        }

        debug!(path, "Delivered telemetry message");
        Ok(())
    }
}

#[async_trait]
impl DeliveryClient for HttpDeliveryClient {
    async fn identify(&self, message: IdentifyMessage) -> TelemetryResult<()> {
        self.post("v1/identify", &message).await
    }

    async fn track(&self, message: TrackMessage) -> TelemetryResult<()> {
        self.post("v1/track", &message).await
    }

    async fn group(&self, message: GroupMessage) -> TelemetryResult<()> {
        self.post("v1/group", &message).await
    }
}
