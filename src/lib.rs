//! Typed product-analytics event dispatch for business-intelligence apps.
//!
//! The crate centers on [`EventDispatcher`]: construct it once with a
//! [`TelemetryConfig`] and a delivery backend, share it behind an `Arc`,
//! and feed it typed [`Event`] records. When no write key is configured
//! every call is a deliberate no-op.
//!
//! ```no_run
//! use std::sync::Arc;
//! use pulsekit::{
//!     DeploymentMode, Event, EventDispatcher, SqlExecutedProperties, Subject, TelemetryConfig,
//! };
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = TelemetryConfig {
//!     write_key: Some("wk_123".to_string()),
//!     data_plane_url: "https://hosted.rudderlabs.com".to_string(),
//!     site_url: "https://bi.example.com".to_string(),
//!     mode: DeploymentMode::SelfHosted,
//!     app_name: "pulsekit".to_string(),
//!     app_version: env!("CARGO_PKG_VERSION").to_string(),
//! };
//! let dispatcher = Arc::new(EventDispatcher::from_config(&config)?);
//!
//! dispatcher
//!     .track(
//!         Subject::user("user-1"),
//!         &Event::SqlExecuted(SqlExecutedProperties {
//!             project_id: "proj-1".to_string(),
//!             statement_count: Some(1),
//!         }),
//!     )
//!     .await?;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod context;
pub mod delivery;
pub mod dispatcher;
pub mod errors;
pub mod events;
pub mod request_context;

// Re-export the main entry points for easier access
pub use config::{DeploymentMode, InstallInfo, InstallType, TelemetryConfig};
pub use context::{AppContext, GroupMembership, Identity, OrganizationTraits, Subject, UserTraits};
pub use delivery::{CaptureDeliveryClient, DeliveryClient, HttpDeliveryClient};
pub use dispatcher::EventDispatcher;
pub use errors::{TelemetryError, TelemetryResult, WrappedError};
pub use events::*;
pub use request_context::{context_from_query_or_header, ExecutionContext, RequestApp};
