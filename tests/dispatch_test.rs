//! End-to-end dispatch behavior through the public API.

use std::sync::Arc;

use pulsekit::delivery::CapturedMessage;
use pulsekit::{
    context_from_query_or_header, CaptureDeliveryClient, DashboardProperties, DeploymentMode,
    Event, EventDispatcher, ExecutionContext, InstallInfo, InstallType, Subject, TelemetryConfig,
    UserUpdatedProperties, UserVerifiedProperties, ValidationRunProperties,
};

fn config(write_key: Option<&str>) -> TelemetryConfig {
    TelemetryConfig {
        write_key: write_key.map(str::to_string),
        data_plane_url: "https://dp.example.com".to_string(),
        site_url: "https://bi.example.com".to_string(),
        mode: DeploymentMode::Cloud,
        app_name: "pulsekit".to_string(),
        app_version: "0.1.0".to_string(),
    }
}

fn dispatcher(write_key: Option<&str>) -> (EventDispatcher, Arc<CaptureDeliveryClient>) {
    let capture = Arc::new(CaptureDeliveryClient::new());
    let install = InstallInfo {
        install_id: "install-e2e".to_string(),
        install_type: InstallType::Docker,
    };
    let dispatcher = EventDispatcher::new(&config(write_key), install, capture.clone()).unwrap();
    (dispatcher, capture)
}

fn track_message(message: &CapturedMessage) -> &pulsekit::delivery::TrackMessage {
    match message {
        CapturedMessage::Track(track) => track,
        other => panic!("expected a track message, got {other:?}"),
    }
}

#[tokio::test]
async fn typed_events_arrive_namespaced_with_context() {
    let (dispatcher, capture) = dispatcher(Some("wk"));

    dispatcher
        .track(
            Subject::user("user-1"),
            &Event::DashboardCreated(DashboardProperties {
                dashboard_id: "dash-1".to_string(),
                project_id: "proj-1".to_string(),
                tile_count: Some(4),
                filter_count: None,
            }),
        )
        .await
        .unwrap();

    let captured = capture.captured().await;
    let message = track_message(&captured[0]);
    assert_eq!(message.event, "pulsekit.dashboard.created");
    assert_eq!(message.properties["dashboard_id"], "dash-1");
    assert_eq!(message.properties["tile_count"], 4);
    assert!(!message.properties.contains_key("filter_count"));
    assert_eq!(message.context["app"]["name"], "pulsekit");
    assert_eq!(message.context["app"]["install_type"], "docker");
    assert_eq!(message.context["mode"], "cloud");
    assert!(!message.message_id.is_empty());
}

#[tokio::test]
async fn anonymization_is_one_way_across_user_events() {
    let (dispatcher, capture) = dispatcher(Some("wk"));

    dispatcher
        .track(
            Subject::user("user-1"),
            &Event::UserUpdated(UserUpdatedProperties {
                organization_id: Some("org-1".to_string()),
                job_title: None,
                is_tracking_anonymized: true,
                is_marketing_opted_in: Some(true),
                is_setup_complete: Some(true),
                email: Some("grace@example.com".to_string()),
                first_name: Some("Grace".to_string()),
                last_name: Some("Hopper".to_string()),
            }),
        )
        .await
        .unwrap();
    dispatcher
        .track(
            Subject::user("user-1"),
            &Event::UserVerified(UserVerifiedProperties {
                is_verified: true,
                is_tracking_anonymized: true,
                email: Some("grace@example.com".to_string()),
            }),
        )
        .await
        .unwrap();

    for message in capture.captured().await.iter().map(track_message) {
        assert!(!message.properties.contains_key("email"));
        assert!(!message.properties.contains_key("first_name"));
        assert!(!message.properties.contains_key("last_name"));
    }
}

#[tokio::test]
async fn wrap_event_lifecycle_emits_one_terminal_event() {
    let (dispatcher, capture) = dispatcher(Some("wk"));
    let validation = Event::ValidationRun(ValidationRunProperties {
        project_id: "proj-1".to_string(),
        validation_run_id: "run-1".to_string(),
        context: ExecutionContext::ScheduledDelivery,
        error_count: None,
        chart_error_count: None,
        dashboard_error_count: None,
    });

    // Success path.
    let passed = dispatcher
        .wrap_event_with(
            Subject::user("user-1"),
            &validation,
            async { Ok::<_, std::io::Error>(3usize) },
            |errors| {
                let mut extra = serde_json::Map::new();
                extra.insert("error_count".to_string(), serde_json::Value::from(*errors));
                extra
            },
        )
        .await
        .unwrap();
    assert_eq!(passed, 3);

    // Failure path: the error event is observed and the failure re-raised.
    let failed: Result<usize, _> = dispatcher
        .wrap_event(Subject::user("user-1"), &validation, async {
            Err(std::io::Error::new(
                std::io::ErrorKind::Other,
                "compile failed",
            ))
        })
        .await;
    let original = failed.unwrap_err().into_operation().unwrap();
    assert_eq!(original.to_string(), "compile failed");

    assert_eq!(
        capture.track_names().await,
        vec![
            "pulsekit.validation.run.started",
            "pulsekit.validation.run.completed",
            "pulsekit.validation.run.started",
            "pulsekit.validation.run.error",
        ]
    );

    let captured = capture.captured().await;
    assert_eq!(track_message(&captured[1]).properties["error_count"], 3);
    assert_eq!(
        track_message(&captured[3]).properties["error"],
        "compile failed"
    );
}

#[tokio::test]
async fn disabled_telemetry_suppresses_everything_including_lifecycles() {
    let (dispatcher, capture) = dispatcher(None);

    let result = dispatcher
        .wrap_event(
            Subject::anonymous("anon-1"),
            &Event::Untyped {
                event: "export.generated".to_string(),
                properties: serde_json::Map::new(),
            },
            async { Ok::<_, std::io::Error>(()) },
        )
        .await;

    assert!(result.is_ok());
    assert_eq!(capture.call_count().await, 0);
}

#[test]
fn execution_context_resolution_matches_documented_contract() {
    // Explicit query value wins, case-insensitively, regardless of header.
    assert_eq!(
        context_from_query_or_header(Some("CLI"), Some("web_app")),
        ExecutionContext::Cli
    );
    // Unrecognized explicit values fall back to the header classification.
    assert_eq!(
        context_from_query_or_header(Some("fax-machine"), Some("cli")),
        ExecutionContext::Cli
    );
    // No hints at all classifies as a plain API call.
    assert_eq!(
        context_from_query_or_header(None, None),
        ExecutionContext::Api
    );
}
