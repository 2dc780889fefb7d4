//! Process-wide tracking context and subject identity.

use serde::{Deserialize, Serialize};

use crate::config::{DeploymentMode, InstallInfo, InstallType, TelemetryConfig};

/// Immutable metadata attached to every outgoing telemetry call.
///
/// Computed once when the dispatcher is constructed and never mutated
/// afterwards; every `identify`/`track`/`group` message carries a serialized
/// copy as its `context` object.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppContext {
    pub app: AppDetails,
    pub mode: DeploymentMode,
    pub site_url: String,
}

/// Application identity inside the tracking context.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppDetails {
    pub name: String,
    pub version: String,
    pub install_id: String,
    pub install_type: InstallType,
}

impl AppContext {
    pub fn new(config: &TelemetryConfig, install: InstallInfo) -> Self {
        Self {
            app: AppDetails {
                name: config.app_name.clone(),
                version: config.app_version.clone(),
                install_id: install.install_id,
                install_type: install.install_type,
            },
            mode: config.mode,
            site_url: config.site_url.clone(),
        }
    }
}

/// The subject a telemetry call is about.
///
/// Delivery backends key calls off either a stable user id or an anonymous
/// id, never both.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Subject {
    UserId(String),
    AnonymousId(String),
}

impl Subject {
    pub fn user(id: impl Into<String>) -> Self {
        Self::UserId(id.into())
    }

    pub fn anonymous(id: impl Into<String>) -> Self {
        Self::AnonymousId(id.into())
    }
}

/// Traits sent with an `identify` call.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserTraits {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,

    pub is_tracking_anonymized: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_marketing_opted_in: Option<bool>,
}

/// A subject plus the traits to attach to it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Identity {
    pub subject: Subject,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub traits: Option<UserTraits>,
}

/// A subject-to-group association for `group` calls.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupMembership {
    pub subject: Subject,
    pub group_id: String,
    pub traits: OrganizationTraits,
}

/// Traits describing the organization a subject belongs to.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OrganizationTraits {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub member_count: Option<usize>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn context_copies_config_and_install_identity() {
        let config = TelemetryConfig {
            write_key: Some("wk".to_string()),
            data_plane_url: "https://dp.example.com".to_string(),
            site_url: "https://bi.example.com".to_string(),
            mode: DeploymentMode::Cloud,
            app_name: "pulsekit".to_string(),
            app_version: "1.2.3".to_string(),
        };
        let install = InstallInfo {
            install_id: "install-1".to_string(),
            install_type: InstallType::Docker,
        };

        let context = AppContext::new(&config, install);
        assert_eq!(context.app.name, "pulsekit");
        assert_eq!(context.app.version, "1.2.3");
        assert_eq!(context.app.install_id, "install-1");
        assert_eq!(context.site_url, "https://bi.example.com");
    }

    #[test]
    fn default_traits_serialize_without_optional_keys() {
        let traits = UserTraits::default();
        let value = serde_json::to_value(&traits).unwrap();
        let object = value.as_object().unwrap();
        assert!(!object.contains_key("email"));
        assert!(!object.contains_key("first_name"));
        assert_eq!(object["is_tracking_anonymized"], false);
    }
}
