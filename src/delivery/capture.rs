//! In-memory delivery client that records messages instead of sending them.
//!
//! Used by tests to assert on exactly what would have been delivered, and
//! to simulate transport failures. Kept in the library rather than test
//! code so integration tests and downstream crates can use it too.

use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::delivery::{DeliveryClient, GroupMessage, IdentifyMessage, TrackMessage};
use crate::errors::{TelemetryError, TelemetryResult};

/// A message recorded by [`CaptureDeliveryClient`].
#[derive(Debug, Clone)]
pub enum CapturedMessage {
    Identify(IdentifyMessage),
    Track(TrackMessage),
    Group(GroupMessage),
}

/// Recording delivery client for tests.
#[derive(Default)]
pub struct CaptureDeliveryClient {
    messages: Mutex<Vec<CapturedMessage>>,
    failing: AtomicBool,
}

impl CaptureDeliveryClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// When set, every delivery call fails with a transport error.
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Everything recorded so far, in dispatch order.
    pub async fn captured(&self) -> Vec<CapturedMessage> {
        self.messages.lock().await.clone()
    }

    /// Number of recorded messages of any kind.
    pub async fn call_count(&self) -> usize {
        self.messages.lock().await.len()
    }

    /// The namespaced event names of all recorded track calls, in order.
    pub async fn track_names(&self) -> Vec<String> {
        self.messages
            .lock()
            .await
            .iter()
            .filter_map(|message| match message {
                CapturedMessage::Track(track) => Some(track.event.clone()),
                _ => None,
            })
            .collect()
    }

    async fn record(&self, message: CapturedMessage) -> TelemetryResult<()> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(TelemetryError::Delivery {
                operation: "capture".to_string(),
                reason: "injected failure".to_string(),
            });
        }
        self.messages.lock().await.push(message);
        Ok(())
    }
}

#[async_trait]
impl DeliveryClient for CaptureDeliveryClient {
    async fn identify(&self, message: IdentifyMessage) -> TelemetryResult<()> {
        self.record(CapturedMessage::Identify(message)).await
    }

    async fn track(&self, message: TrackMessage) -> TelemetryResult<()> {
        self.record(CapturedMessage::Track(message)).await
    }

    async fn group(&self, message: GroupMessage) -> TelemetryResult<()> {
        self.record(CapturedMessage::Group(message)).await
    }
}
