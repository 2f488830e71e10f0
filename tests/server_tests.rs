//! End-to-end tests: boot the server on an ephemeral port and drive it
//! through the submission client, the way the browser frontend does.

use std::sync::Arc;

use axum::{Json, Router, routing::post};
use reqwest::StatusCode;

use recap::client::{INSTRUCTIONS_IMAGE, SubmissionClient, SubmissionController, SubmissionError};
use recap::server::{self, AppState, ServerConfig};
use recap::wire::SubmissionPayload;

// 2021-03-15T12:00:00Z
const MARCH_2021: i64 = 1_615_809_600_000;

fn sample_dump() -> String {
    format!(
        r#"[
            {{
                "order_id": "order-1",
                "venue_name": "Pizza Palace / Downtown",
                "status": "delivered",
                "delivery_time": {{"$date": {MARCH_2021}}},
                "total_price": 2350,
                "items": [
                    {{"name": "Margherita", "count": 1, "end_amount": 1200}},
                    {{"name": "Tiramisu", "count": 1, "end_amount": 650}}
                ]
            }},
            {{
                "order_id": "order-2",
                "venue_name": "Pizza Palace",
                "status": "delivered",
                "delivery_time": {{"$date": {MARCH_2021}}},
                "total_price": 1800,
                "items": [{{"name": "Margherita", "count": 1, "end_amount": 1200}}]
            }}
        ]"#
    )
}

/// Start the real application on 127.0.0.1:0 and return its base URL.
async fn start_server() -> (String, tempfile::TempDir) {
    let dir = tempfile::tempdir().unwrap();
    let config = ServerConfig {
        listen_addr: "127.0.0.1:0".to_string(),
        data_dir: dir.path().to_path_buf(),
        report_year: 2021,
    };
    server::prepare_data_dir(&config).unwrap();
    let app = server::router(Arc::new(AppState::new(config)));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{}", addr), dir)
}

#[tokio::test]
async fn submit_generates_a_servable_report() {
    let (base, _dir) = start_server().await;
    let mut controller = SubmissionController::new(base.clone());
    assert_eq!(controller.current_image(), INSTRUCTIONS_IMAGE);

    let payload = SubmissionPayload {
        orders1: sample_dump(),
        ..Default::default()
    };
    let path = controller.submit(&payload).await.unwrap();

    let guid = path
        .strip_prefix("reports/")
        .and_then(|p| p.strip_suffix(".png"))
        .expect("display path should be reports/<guid>.png");
    assert_eq!(guid.len(), 32);
    assert!(guid.chars().all(|c| c.is_ascii_hexdigit()));
    assert_eq!(controller.current_image(), path);

    // The guid must resolve to a servable PNG immediately.
    let res = reqwest::get(format!("{}/{}", base, path)).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let bytes = res.bytes().await.unwrap();
    assert_eq!(&bytes[1..4], b"PNG");
}

#[tokio::test]
async fn malformed_dump_is_rejected_and_display_unchanged() {
    let (base, _dir) = start_server().await;
    let mut controller = SubmissionController::new(base);

    let payload = SubmissionPayload {
        orders1: "this is not json".to_string(),
        ..Default::default()
    };
    let err = controller.submit(&payload).await.unwrap_err();
    assert!(
        matches!(err, SubmissionError::Status(StatusCode::BAD_REQUEST)),
        "got: {err:?}"
    );
    assert_eq!(controller.current_image(), INSTRUCTIONS_IMAGE);
}

#[tokio::test]
async fn all_empty_submission_is_rejected() {
    let (base, _dir) = start_server().await;
    let client = SubmissionClient::new(base);

    let err = client
        .submit(&SubmissionPayload::default())
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        SubmissionError::Status(StatusCode::BAD_REQUEST)
    ));
}

#[tokio::test]
async fn error_replies_carry_a_json_body() {
    let (base, _dir) = start_server().await;

    let res = reqwest::Client::new()
        .post(format!("{}/api/report", base))
        .json(&SubmissionPayload {
            orders4: "broken".to_string(),
            ..Default::default()
        })
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["success"], false);
    assert!(body["error"].as_str().unwrap().contains("orders4"));
}

#[tokio::test]
async fn placeholder_is_served_before_any_submission() {
    let (base, _dir) = start_server().await;

    let res = reqwest::get(format!("{}/{}", base, INSTRUCTIONS_IMAGE))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let bytes = res.bytes().await.unwrap();
    assert_eq!(&bytes[..2], &[0xFF, 0xD8], "placeholder should be a JPEG");
}

#[tokio::test]
async fn index_page_is_served() {
    let (base, _dir) = start_server().await;

    let res = reqwest::get(&base).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body = res.text().await.unwrap();
    assert!(body.contains("report-form"));
    assert!(body.contains("orders8"));
    // Cache-busted asset links.
    assert!(body.contains(".js?v="));
}

#[tokio::test]
async fn duplicate_orders_across_slots_collapse() {
    let (base, _dir) = start_server().await;
    let client = SubmissionClient::new(base);

    // Same dump pasted twice still generates one report.
    let payload = SubmissionPayload {
        orders1: sample_dump(),
        orders2: sample_dump(),
        ..Default::default()
    };
    let guid = client.submit(&payload).await.unwrap();
    assert_eq!(guid.len(), 32);
}

#[tokio::test]
async fn guidless_success_response_is_invalid() {
    // A backend that replies 200 without a guid must surface as an
    // invalid-response error, never as a broken image path.
    let app = Router::new().route(
        "/api/report",
        post(|| async { Json(serde_json::json!({"ok": true})) }),
    );
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    let mut controller = SubmissionController::new(format!("http://{}", addr));
    let err = controller
        .submit(&SubmissionPayload::default())
        .await
        .unwrap_err();
    assert!(matches!(err, SubmissionError::InvalidResponse(_)), "got: {err:?}");
    assert_eq!(controller.current_image(), INSTRUCTIONS_IMAGE);
}

#[tokio::test]
async fn unreachable_server_is_a_network_error() {
    // Port 9 (discard) on localhost is almost certainly closed.
    let mut controller = SubmissionController::new("http://127.0.0.1:9");
    let err = controller
        .submit(&SubmissionPayload::default())
        .await
        .unwrap_err();
    assert!(matches!(err, SubmissionError::Network(_)), "got: {err:?}");
    assert_eq!(controller.current_image(), INSTRUCTIONS_IMAGE);
}
