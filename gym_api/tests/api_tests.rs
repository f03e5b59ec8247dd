//! End-to-end tests of the HTTP contract.
//!
//! Requests are sent straight into the router; no socket is opened.

mod common;

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use chrono::{DateTime, Utc};
use common::{app, error_message, send, send_raw};
use serde_json::{json, Value};
use std::collections::HashSet;
use tower::ServiceExt;

fn push_day() -> Value {
    json!({
        "title": "Push Day",
        "date": "2026-01-16",
        "notes": "",
        "exercises": [
            { "name": "Bench Press", "sets": [{ "reps": 8, "weight": 60 }] }
        ]
    })
}

fn timestamp(body: &Value, field: &str) -> DateTime<Utc> {
    body[field]
        .as_str()
        .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|| panic!("{} is not an RFC 3339 timestamp: {}", field, body))
}

#[tokio::test]
async fn test_health() {
    let app = app();
    let (status, body) = send(&app, Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "status": "ok" }));
}

#[tokio::test]
async fn test_full_lifecycle() {
    let app = app();

    let (status, created) = send(&app, Method::POST, "/workouts", Some(push_day())).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["id"], 1);
    assert_eq!(created["title"], "Push Day");
    assert_eq!(created["date"], "2026-01-16");
    assert_eq!(created["notes"], "");
    assert_eq!(created["exercises"][0]["name"], "Bench Press");
    assert_eq!(created["exercises"][0]["sets"][0]["reps"], 8);
    assert_eq!(created["exercises"][0]["sets"][0]["weight"], 60.0);
    assert_eq!(timestamp(&created, "createdAt"), timestamp(&created, "updatedAt"));

    let (status, fetched) = send(&app, Method::GET, "/workouts/1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, created);

    let (status, body) = send(&app, Method::DELETE, "/workouts/1", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(body, Value::Null);

    let (status, body) = send(&app, Method::GET, "/workouts/1", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(error_message(&body), "Workout not found");
}

#[tokio::test]
async fn test_create_trims_text_fields() {
    let app = app();
    let payload = json!({
        "title": "  Leg Day  ",
        "date": " 2025-01-01 ",
        "notes": "  heavy  ",
        "exercises": []
    });

    let (status, created) = send(&app, Method::POST, "/workouts", Some(payload)).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["title"], "Leg Day");
    assert_eq!(created["date"], "2025-01-01");
    assert_eq!(created["notes"], "heavy");
    assert_eq!(created["exercises"], json!([]));
}

#[tokio::test]
async fn test_create_validation_errors() {
    let app = app();
    let cases = [
        (
            json!({ "title": "", "date": "2025-01-01", "exercises": [] }),
            "title is required",
        ),
        (json!({ "title": "Leg Day", "exercises": [] }), "date is required"),
        (
            json!({ "title": "Leg Day", "date": "2025-13-40", "exercises": [] }),
            "date must be YYYY-MM-DD",
        ),
        (
            json!({
                "title": "Leg Day",
                "date": "2025-01-01",
                "exercises": [{ "name": "Squat", "sets": [{ "reps": 0 }] }]
            }),
            "reps must be > 0 for exercise: Squat, set index 0",
        ),
        (
            json!({
                "title": "Leg Day",
                "date": "2025-01-01",
                "exercises": [{ "name": " ", "sets": [{ "reps": 5 }] }]
            }),
            "exercise name is required (at index 0)",
        ),
        (
            json!({
                "title": "Leg Day",
                "date": "2025-01-01",
                "exercises": [{ "name": "Squat", "sets": [] }]
            }),
            "exercise sets must have at least 1 set for: Squat",
        ),
        (
            json!({
                "title": "Leg Day",
                "date": "2025-01-01",
                "exercises": [{ "name": "Squat", "sets": [{ "reps": 5 }, { "reps": 5, "weight": -1 }] }]
            }),
            "weight must be >= 0 for exercise: Squat, set index 1",
        ),
    ];

    for (payload, expected) in cases {
        let (status, body) = send(&app, Method::POST, "/workouts", Some(payload)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(error_message(&body), expected);
    }

    let (_, list) = send(&app, Method::GET, "/workouts", None).await;
    assert_eq!(list, json!([]));
}

#[tokio::test]
async fn test_invalid_json_rejected() {
    let app = app();

    let (status, body) = send_raw(&app, Method::POST, "/workouts", Body::from("{nope")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error_message(&body), "Invalid JSON");

    let mut unknown = push_day();
    unknown["id"] = json!(99);
    let (status, body) = send(&app, Method::POST, "/workouts", Some(unknown)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error_message(&body), "Invalid JSON");

    let (status, body) = send(&app, Method::POST, "/workouts", Some(json!({ "title": 5 }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error_message(&body), "Invalid JSON");
}

#[tokio::test]
async fn test_update_patches_only_given_fields() {
    let app = app();
    let payload = json!({
        "title": "A",
        "date": "2025-01-01",
        "exercises": [{ "name": "Squat", "sets": [{ "reps": 5, "weight": 100 }] }]
    });
    let (_, created) = send(&app, Method::POST, "/workouts", Some(payload)).await;

    let (status, updated) = send(
        &app,
        Method::PUT,
        "/workouts/1",
        Some(json!({ "notes": " felt strong " })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["id"], 1);
    assert_eq!(updated["title"], "A");
    assert_eq!(updated["date"], "2025-01-01");
    assert_eq!(updated["notes"], "felt strong");
    assert_eq!(updated["exercises"], created["exercises"]);
    assert_eq!(updated["createdAt"], created["createdAt"]);
    assert!(timestamp(&updated, "updatedAt") > timestamp(&created, "updatedAt"));

    let (_, fetched) = send(&app, Method::GET, "/workouts/1", None).await;
    assert_eq!(fetched, updated);
}

#[tokio::test]
async fn test_update_replaces_exercises() {
    let app = app();
    send(&app, Method::POST, "/workouts", Some(push_day())).await;

    let replacement = json!([
        { "name": "Dips", "sets": [{ "reps": 10 }, { "reps": 8 }] }
    ]);
    let (status, updated) = send(
        &app,
        Method::PUT,
        "/workouts/1",
        Some(json!({ "exercises": replacement })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["exercises"], replacement);
    assert_eq!(updated["title"], "Push Day");
}

#[tokio::test]
async fn test_invalid_update_leaves_workout_untouched() {
    let app = app();
    let (_, created) = send(&app, Method::POST, "/workouts", Some(push_day())).await;

    let (status, body) = send(
        &app,
        Method::PUT,
        "/workouts/1",
        Some(json!({ "notes": "changed", "date": "16/01/2026" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error_message(&body), "date must be YYYY-MM-DD");

    let (status, body) = send(&app, Method::PUT, "/workouts/1", Some(json!({ "title": "" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error_message(&body), "title is required");

    let (_, fetched) = send(&app, Method::GET, "/workouts/1", None).await;
    assert_eq!(fetched, created);
}

#[tokio::test]
async fn test_update_rejects_unknown_fields() {
    let app = app();
    send(&app, Method::POST, "/workouts", Some(push_day())).await;

    let (status, body) = send(&app, Method::PUT, "/workouts/1", Some(json!({ "rating": 5 }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error_message(&body), "Invalid JSON");
}

#[tokio::test]
async fn test_missing_workout_is_not_found() {
    let app = app();

    let (status, body) = send(&app, Method::GET, "/workouts/7", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(error_message(&body), "Workout not found");

    let (status, _) = send(&app, Method::PUT, "/workouts/7", Some(json!({ "notes": "x" }))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, Method::DELETE, "/workouts/7", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_twice() {
    let app = app();
    send(&app, Method::POST, "/workouts", Some(push_day())).await;

    let (status, _) = send(&app, Method::DELETE, "/workouts/1", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, _) = send(&app, Method::DELETE, "/workouts/1", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // Ids are never handed out again
    let (_, next) = send(&app, Method::POST, "/workouts", Some(push_day())).await;
    assert_eq!(next["id"], 2);
}

#[tokio::test]
async fn test_list_returns_all_workouts() {
    let app = app();
    for title in ["Push", "Pull", "Legs"] {
        let mut payload = push_day();
        payload["title"] = json!(title);
        send(&app, Method::POST, "/workouts", Some(payload)).await;
    }
    send(&app, Method::DELETE, "/workouts/2", None).await;

    let (status, list) = send(&app, Method::GET, "/workouts", None).await;
    assert_eq!(status, StatusCode::OK);

    let titles: HashSet<&str> = list
        .as_array()
        .unwrap()
        .iter()
        .map(|w| w["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, HashSet::from(["Push", "Legs"]));
}

#[tokio::test]
async fn test_malformed_routes_are_not_found() {
    let app = app();
    send(&app, Method::POST, "/workouts", Some(push_day())).await;

    for uri in ["/workouts/abc", "/workouts/0", "/workouts/-1", "/workouts/1/extra", "/workouts/", "/nope"] {
        let (status, body) = send(&app, Method::GET, uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "GET {}", uri);
        assert_eq!(error_message(&body), "Not found", "GET {}", uri);
    }

    // A bad id is reported before a bad method
    let (status, _) = send(&app, Method::POST, "/workouts/abc", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_unsupported_methods() {
    let app = app();
    let cases = [
        (Method::PATCH, "/workouts"),
        (Method::DELETE, "/workouts"),
        (Method::POST, "/workouts/1"),
        (Method::PATCH, "/workouts/1"),
        (Method::POST, "/health"),
    ];

    for (method, uri) in cases {
        let (status, body) = send(&app, method.clone(), uri, None).await;
        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED, "{} {}", method, uri);
        assert_eq!(error_message(&body), "Method not allowed");
    }
}

#[tokio::test]
async fn test_cors_preflight() {
    let app = app();
    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/workouts")
        .header("origin", "http://localhost:19006")
        .header("access-control-request-method", "POST")
        .header("access-control-request-headers", "content-type")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert!(response.status().is_success());
    assert_eq!(
        response.headers()["access-control-allow-origin"],
        "*"
    );
}

#[tokio::test]
async fn test_undecodable_id_is_not_found() {
    let app = app();
    let cases = [
        (Method::GET, None),
        (Method::PUT, Some(json!({"title": "Leg Day"}))),
        (Method::DELETE, None),
    ];

    for (method, body) in cases {
        let (status, body) = send(&app, method.clone(), "/workouts/%FF", body).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{} /workouts/%FF", method);
        assert_eq!(error_message(&body), "Not found");
    }
}

#[tokio::test]
async fn test_oversized_body_rejected() {
    let app = app();
    let (_, created) = send(&app, Method::POST, "/workouts", Some(push_day())).await;

    let huge = format!(r#"{{"title":"{}","date":"2026-01-16"}}"#, "x".repeat(3 * 1024 * 1024));
    let (status, body) = send_raw(&app, Method::POST, "/workouts", Body::from(huge.clone())).await;
    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(error_message(&body), "Request body too large");

    let (status, body) = send_raw(&app, Method::PUT, "/workouts/1", Body::from(huge)).await;
    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(error_message(&body), "Request body too large");

    let (_, fetched) = send(&app, Method::GET, "/workouts/1", None).await;
    assert_eq!(fetched, created);
}

#[tokio::test]
async fn test_bare_options_answered_by_cors_layer() {
    let app = app();
    for uri in ["/workouts", "/workouts/1", "/health"] {
        let (status, body) = send(&app, Method::OPTIONS, uri, None).await;
        assert_eq!(status, StatusCode::OK, "OPTIONS {}", uri);
        assert_eq!(body, Value::Null);
    }
}
