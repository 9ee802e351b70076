//! Tests for `POST /api/schedule/{tenant_id}`.

use salvo::http::StatusCode;
use serde_json::json;

use super::helpers::*;

fn query(from: &str, to: &str) -> serde_json::Value {
    json!({ "from": from, "to": to })
}

async fn seed_daily(app: &TestApp) {
    seed_entry(
        &app.service,
        json!({
            "tenantId": TENANT,
            "classroom": "c1",
            "start": "2025-01-04T12:00:00Z",
            "end": "2025-01-04T13:00:00Z",
            "repeat": "DAILY",
        }),
    )
    .await;
}

#[test_log::test(tokio::test)]
async fn daily_entry_is_expanded_and_labelled() {
    let app = create_test_app();
    seed_daily(&app).await;

    let body: serde_json::Value = TestRequest::post("/api/schedule/t1")
        .as_user(INSTRUCTOR)
        .json(query("2025-02-01", "2025-02-03"))
        .send(&app.service)
        .await
        .assert_status(StatusCode::OK)
        .json();

    assert_eq!(
        body,
        json!([
            {
                "classroomId": "c1",
                "classroomName": "Room 101",
                "start": "2025-02-01T12:00:00.000Z",
                "end": "2025-02-01T13:00:00.000Z",
            },
            {
                "classroomId": "c1",
                "classroomName": "Room 101",
                "start": "2025-02-02T12:00:00.000Z",
                "end": "2025-02-02T13:00:00.000Z",
            },
        ])
    );
}

#[test_log::test(tokio::test)]
async fn only_member_classrooms_are_returned() {
    let app = create_test_app();
    seed_daily(&app).await;
    seed_entry(
        &app.service,
        json!({
            "tenantId": TENANT,
            "classroom": "c2",
            "start": "2025-02-01T08:00:00Z",
            "end": "2025-02-01T09:00:00Z",
        }),
    )
    .await;

    let body: Vec<serde_json::Value> = TestRequest::post("/api/schedule/t1")
        .as_user(STUDENT)
        .json(query("2025-02-01T00:00:00Z", "2025-02-02T00:00:00Z"))
        .send(&app.service)
        .await
        .assert_status(StatusCode::OK)
        .json();

    assert_eq!(body.len(), 1);
    assert_eq!(body[0]["classroomId"], "c2");
    assert_eq!(body[0]["classroomName"], "Lab");
}

#[test_log::test(tokio::test)]
async fn user_without_classrooms_gets_empty_list() {
    let app = create_test_app();
    seed_daily(&app).await;

    let body: Vec<serde_json::Value> = TestRequest::post("/api/schedule/t1")
        .as_user(OUTSIDER)
        .json(query("2025-02-01", "2025-02-03"))
        .send(&app.service)
        .await
        .assert_status(StatusCode::OK)
        .json();

    assert!(body.is_empty());
}

#[test_log::test(tokio::test)]
async fn other_tenant_sees_nothing() {
    let app = create_test_app();
    seed_daily(&app).await;

    let body: Vec<serde_json::Value> = TestRequest::post("/api/schedule/t2")
        .as_user(INSTRUCTOR)
        .json(query("2025-02-01", "2025-02-03"))
        .send(&app.service)
        .await
        .assert_status(StatusCode::OK)
        .json();

    assert!(body.is_empty());
}

#[test_log::test(tokio::test)]
async fn missing_bound_is_bad_request() {
    let app = create_test_app();

    let resp = TestRequest::post("/api/schedule/t1")
        .as_user(INSTRUCTOR)
        .json(json!({ "from": "2025-02-01" }))
        .send(&app.service)
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    assert_eq!(resp.error_message(), "From and to are required");
}

#[test_log::test(tokio::test)]
async fn malformed_date_is_bad_request() {
    let app = create_test_app();

    let resp = TestRequest::post("/api/schedule/t1")
        .as_user(INSTRUCTOR)
        .json(query("yesterday", "2025-02-01"))
        .send(&app.service)
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    assert!(resp.error_message().starts_with("Invalid date format"));
}

#[test_log::test(tokio::test)]
async fn inverted_window_is_bad_request() {
    let app = create_test_app();

    TestRequest::post("/api/schedule/t1")
        .as_user(INSTRUCTOR)
        .json(query("2025-02-03", "2025-02-01"))
        .send(&app.service)
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

#[test_log::test(tokio::test)]
async fn unauthenticated_query_is_rejected() {
    let app = create_test_app();

    TestRequest::post("/api/schedule/t1")
        .json(query("2025-02-01", "2025-02-03"))
        .send(&app.service)
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
}

#[test_log::test(tokio::test)]
async fn occurrence_limit_is_bad_request() {
    let mut settings = test_config();
    settings.schedule.max_occurrences = 10;
    let app = create_test_app_with(settings);
    seed_daily(&app).await;

    let resp = TestRequest::post("/api/schedule/t1")
        .as_user(INSTRUCTOR)
        .json(query("2025-01-01", "2026-01-01"))
        .send(&app.service)
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    assert!(resp.error_message().contains("10"));
}

#[test_log::test(tokio::test)]
async fn per_occurrence_policy_stops_at_repeat_end() {
    let mut settings = test_config();
    settings.schedule.repeat_end_policy = schedule_core::types::RepeatEndPolicy::PerOccurrence;
    let app = create_test_app_with(settings);
    seed_entry(
        &app.service,
        json!({
            "tenantId": TENANT,
            "classroom": "c1",
            "start": "2025-01-01T12:00:00Z",
            "end": "2025-01-01T13:00:00Z",
            "repeat": "DAILY",
            "repeatEnd": "2025-01-03T12:00:00Z",
        }),
    )
    .await;

    let body: Vec<serde_json::Value> = TestRequest::post("/api/schedule/t1")
        .as_user(INSTRUCTOR)
        .json(query("2025-01-01", "2025-01-10"))
        .send(&app.service)
        .await
        .assert_status(StatusCode::OK)
        .json();

    assert_eq!(body.len(), 2);
}

#[test_log::test(tokio::test)]
async fn unreachable_directory_is_bad_gateway() {
    let app = create_unreachable_directory_app();

    let resp = TestRequest::post("/api/schedule/t1")
        .as_user(INSTRUCTOR)
        .json(query("2025-02-01", "2025-02-03"))
        .send(&app.service)
        .await
        .assert_status(StatusCode::BAD_GATEWAY);

    assert_eq!(resp.error_message(), "Classroom service unavailable");
}
