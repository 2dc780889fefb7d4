//! Telemetry configuration and install identity.
//!
//! Delivery is keyed off a write key: when no key is configured, every
//! dispatcher operation is a deliberate no-op. Install identity is resolved
//! from the environment exactly once, at startup, and injected as an
//! immutable value rather than read ad hoc throughout the code.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Environment variable holding a stable installation identifier.
pub const INSTALL_ID_ENV: &str = "PULSEKIT_INSTALL_ID";

/// Environment variable describing how this instance was installed.
pub const INSTALL_TYPE_ENV: &str = "PULSEKIT_INSTALL_TYPE";

/// Deployment mode of the running application, used for analytics segmentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeploymentMode {
    Cloud,
    CloudBeta,
    SelfHosted,
    Demo,
    Development,
}

impl DeploymentMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Cloud => "cloud",
            Self::CloudBeta => "cloud_beta",
            Self::SelfHosted => "self_hosted",
            Self::Demo => "demo",
            Self::Development => "development",
        }
    }
}

/// Static configuration for the analytics layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelemetryConfig {
    /// Write key for the delivery backend. `None` disables all delivery.
    pub write_key: Option<String>,

    /// Base URL of the delivery data plane, e.g. `https://hosted.rudderlabs.com`.
    #[serde(default = "default_data_plane_url")]
    pub data_plane_url: String,

    /// Public URL this instance is served from.
    pub site_url: String,

    /// How this instance is deployed.
    pub mode: DeploymentMode,

    /// Name the application reports itself as; used to namespace event names.
    #[serde(default = "default_app_name")]
    pub app_name: String,

    /// Application version string.
    pub app_version: String,
}

fn default_data_plane_url() -> String {
    "https://hosted.rudderlabs.com".to_string()
}

fn default_app_name() -> String {
    "pulsekit".to_string()
}

impl TelemetryConfig {
    /// Whether telemetry delivery is configured at all.
    ///
    /// When this returns false the dispatcher suppresses every outgoing
    /// call; suppression is a deliberate no-op, not an error.
    pub fn enabled(&self) -> bool {
        self.write_key.as_deref().is_some_and(|key| !key.is_empty())
    }
}

/// Installation identity, resolved from the environment once at startup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstallInfo {
    pub install_id: String,
    pub install_type: InstallType,
}

/// How this instance was installed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InstallType {
    Docker,
    Heroku,
    Unknown,
}

impl InstallType {
    fn parse(value: &str) -> Self {
        match value.to_ascii_lowercase().as_str() {
            "docker" => Self::Docker,
            "heroku" => Self::Heroku,
            _ => Self::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Docker => "docker",
            Self::Heroku => "heroku",
            Self::Unknown => "unknown",
        }
    }
}

impl InstallInfo {
    /// Resolves install identity from the environment, falling back to a
    /// random identifier when no install id is set.
    pub fn from_env() -> Self {
        let install_id = std::env::var(INSTALL_ID_ENV)
            .ok()
            .filter(|id| !id.is_empty())
            .unwrap_or_else(|| Uuid::new_v4().to_string());

        let install_type = std::env::var(INSTALL_TYPE_ENV)
            .ok()
            .map(|value| InstallType::parse(&value))
            .unwrap_or(InstallType::Unknown);

        Self {
            install_id,
            install_type,
        }
    }
}
