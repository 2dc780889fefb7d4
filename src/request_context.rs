//! Request-origin classification for analytics segmentation.
//!
//! Incoming requests declare their origin through a request header set by
//! official clients, and may additionally carry an explicit `context` query
//! parameter. Classification is deterministic and side-effect free apart
//! from a warning log on unrecognized explicit values.

use serde::{Deserialize, Serialize};
use tracing::warn;

/// Header official clients use to declare what kind of app sent a request.
pub const REQUEST_APP_HEADER: &str = "pulsekit-request-app";

/// Query parameter callers may use to declare an explicit execution context.
pub const CONTEXT_QUERY_PARAM: &str = "context";

/// What kind of client sent a request, as declared by the request header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestApp {
    Cli,
    CliCi,
    WebApp,
    Unknown,
}

impl RequestApp {
    /// Classifies the raw header value. Missing or unrecognized values map
    /// to `Unknown`; no warning is logged since the header is optional.
    pub fn from_header(value: Option<&str>) -> Self {
        match value.map(str::to_ascii_lowercase).as_deref() {
            Some("cli") => Self::Cli,
            Some("cli_ci") => Self::CliCi,
            Some("web_app") => Self::WebApp,
            _ => Self::Unknown,
        }
    }
}

/// Origin of an operation, used to segment analytics events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExecutionContext {
    Cli,
    CliCi,
    Api,
    Ui,
    ScheduledDelivery,
    Unknown,
}

impl ExecutionContext {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Cli => "cli",
            Self::CliCi => "cli_ci",
            Self::Api => "api",
            Self::Ui => "ui",
            Self::ScheduledDelivery => "scheduled_delivery",
            Self::Unknown => "unknown",
        }
    }

    /// Case-insensitive parse of an explicit context value.
    fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "cli" => Some(Self::Cli),
            "cli_ci" => Some(Self::CliCi),
            "api" => Some(Self::Api),
            "ui" => Some(Self::Ui),
            "scheduled_delivery" => Some(Self::ScheduledDelivery),
            "unknown" => Some(Self::Unknown),
            _ => None,
        }
    }

    /// Derives the execution context from the declared request app.
    pub fn from_request_app(app: RequestApp) -> Self {
        match app {
            RequestApp::Cli => Self::Cli,
            RequestApp::CliCi => Self::CliCi,
            RequestApp::WebApp => Self::Ui,
            RequestApp::Unknown => Self::Api,
        }
    }
}

impl std::fmt::Display for ExecutionContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Resolves the execution context for a request.
///
/// An explicit `context` query value wins when it names a known context
/// (matched case-insensitively). Unrecognized explicit values log a warning
/// and fall back to the header-derived classification, as does an absent
/// query value.
pub fn context_from_query_or_header(
    query_value: Option<&str>,
    header_value: Option<&str>,
) -> ExecutionContext {
    if let Some(explicit) = query_value {
        match ExecutionContext::parse(explicit) {
            Some(context) => return context,
            None => {
                warn!(value = explicit, "Unrecognized explicit execution context");
            }
        }
    }
    ExecutionContext::from_request_app(RequestApp::from_header(header_value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use tracing_subscriber::layer::{Context, SubscriberExt};
    use tracing_subscriber::registry::Registry;
    use tracing_subscriber::Layer;

    /// Counts warn-level events emitted while a closure runs.
    #[derive(Default, Clone)]
    struct WarnCounter(Arc<AtomicUsize>);

    impl<S: tracing::Subscriber> Layer<S> for WarnCounter {
        fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
            if *event.metadata().level() == tracing::Level::WARN {
                self.0.fetch_add(1, Ordering::SeqCst);
            }
        }
    }

    fn count_warns(run: impl FnOnce()) -> usize {
        let counter = WarnCounter::default();
        let subscriber = Registry::default().with(counter.clone());
        tracing::subscriber::with_default(subscriber, run);
        counter.0.load(Ordering::SeqCst)
    }

    #[test]
    fn explicit_query_value_wins_regardless_of_header() {
        assert_eq!(
            context_from_query_or_header(Some("cli"), Some("web_app")),
            ExecutionContext::Cli
        );
        assert_eq!(
            context_from_query_or_header(Some("CLI"), None),
            ExecutionContext::Cli
        );
        assert_eq!(
            context_from_query_or_header(Some("Scheduled_Delivery"), Some("cli")),
            ExecutionContext::ScheduledDelivery
        );
    }

    #[test]
    fn unrecognized_query_value_falls_back_to_header() {
        assert_eq!(
            context_from_query_or_header(Some("spreadsheet"), Some("cli_ci")),
            ExecutionContext::CliCi
        );
        assert_eq!(
            context_from_query_or_header(Some("spreadsheet"), None),
            ExecutionContext::Api
        );
    }

    #[test]
    fn unrecognized_query_value_warns_exactly_once() {
        let warns = count_warns(|| {
            assert_eq!(
                context_from_query_or_header(Some("fax-machine"), Some("cli")),
                ExecutionContext::Cli
            );
        });
        assert_eq!(warns, 1);
    }

    #[test]
    fn recognized_and_absent_query_values_do_not_warn() {
        let warns = count_warns(|| {
            context_from_query_or_header(Some("CLI"), Some("web_app"));
            context_from_query_or_header(None, Some("web_app"));
            context_from_query_or_header(None, None);
        });
        assert_eq!(warns, 0);
    }

    #[test]
    fn header_classification_covers_known_apps() {
        assert_eq!(
            ExecutionContext::from_request_app(RequestApp::from_header(Some("CLI"))),
            ExecutionContext::Cli
        );
        assert_eq!(
            ExecutionContext::from_request_app(RequestApp::from_header(Some("web_app"))),
            ExecutionContext::Ui
        );
        assert_eq!(
            ExecutionContext::from_request_app(RequestApp::from_header(Some("curl/8.0"))),
            ExecutionContext::Api
        );
        assert_eq!(
            ExecutionContext::from_request_app(RequestApp::from_header(None)),
            ExecutionContext::Api
        );
    }
}
