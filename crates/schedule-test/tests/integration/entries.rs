//! Tests for the `/api/entries` routes.

use salvo::http::StatusCode;
use serde_json::json;

use super::helpers::*;

fn weekly_body(classroom: &str) -> serde_json::Value {
    json!({
        "tenantId": TENANT,
        "classroom": classroom,
        "start": "2025-01-04T12:00:00Z",
        "end": "2025-01-04T13:00:00Z",
        "repeat": "WEEKLY",
        "repeatEnd": "2025-03-01",
    })
}

#[test_log::test(tokio::test)]
async fn create_then_get_entry() {
    let app = create_test_app();

    let created = seed_entry(&app.service, weekly_body("c1")).await;
    assert_eq!(created["classroom"], "c1");
    assert_eq!(created["repeat"], "WEEKLY");
    assert_eq!(created["repeatEnd"], "2025-03-01T00:00:00Z");
    assert_eq!(app.store.len().await, 1);

    let id = created["id"].as_str().expect("entry has an id");
    let fetched: serde_json::Value = TestRequest::get(&format!("/api/entries/{id}"))
        .as_user(INSTRUCTOR)
        .send(&app.service)
        .await
        .assert_status(StatusCode::OK)
        .json();

    assert_eq!(fetched, created);
}

#[test_log::test(tokio::test)]
async fn create_rejects_missing_field() {
    let app = create_test_app();
    let mut body = weekly_body("c1");
    body["classroom"] = json!("");

    let resp = TestRequest::post("/api/entries")
        .as_user(INSTRUCTOR)
        .json(body)
        .send(&app.service)
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    assert_eq!(resp.error_message(), "classroom is required");
    assert!(app.store.is_empty().await);
}

#[test_log::test(tokio::test)]
async fn create_rejects_end_before_start() {
    let app = create_test_app();
    let mut body = weekly_body("c1");
    body["end"] = json!("2025-01-04T11:00:00Z");

    TestRequest::post("/api/entries")
        .as_user(INSTRUCTOR)
        .json(body)
        .send(&app.service)
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

#[test_log::test(tokio::test)]
async fn create_rejects_unknown_rule() {
    let app = create_test_app();
    let mut body = weekly_body("c1");
    body["repeat"] = json!("HOURLY");

    let resp = TestRequest::post("/api/entries")
        .as_user(INSTRUCTOR)
        .json(body)
        .send(&app.service)
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    assert_eq!(resp.error_message(), "Invalid request body");
}

#[test_log::test(tokio::test)]
async fn update_replaces_fields() {
    let app = create_test_app();
    let created = seed_entry(&app.service, weekly_body("c1")).await;
    let id = created["id"].as_str().expect("entry has an id");

    let mut body = weekly_body("c2");
    body["repeat"] = json!("MONTHLY");
    let updated: serde_json::Value = TestRequest::put(&format!("/api/entries/{id}"))
        .as_user(INSTRUCTOR)
        .json(body)
        .send(&app.service)
        .await
        .assert_status(StatusCode::OK)
        .json();

    assert_eq!(updated["id"], created["id"]);
    assert_eq!(updated["classroom"], "c2");
    assert_eq!(updated["repeat"], "MONTHLY");
    assert_eq!(updated["createdAt"], created["createdAt"]);
}

#[test_log::test(tokio::test)]
async fn delete_removes_entry() {
    let app = create_test_app();
    let created = seed_entry(&app.service, weekly_body("c1")).await;
    let path = format!("/api/entries/{}", created["id"].as_str().expect("entry has an id"));

    TestRequest::delete(&path)
        .as_user(INSTRUCTOR)
        .send(&app.service)
        .await
        .assert_status(StatusCode::OK);

    TestRequest::get(&path)
        .as_user(INSTRUCTOR)
        .send(&app.service)
        .await
        .assert_status(StatusCode::NOT_FOUND);
    assert!(app.store.is_empty().await);
}

#[test_log::test(tokio::test)]
async fn unknown_and_malformed_ids() {
    let app = create_test_app();

    TestRequest::get(&format!("/api/entries/{}", uuid::Uuid::now_v7()))
        .as_user(INSTRUCTOR)
        .send(&app.service)
        .await
        .assert_status(StatusCode::NOT_FOUND);

    TestRequest::delete("/api/entries/not-a-uuid")
        .as_user(INSTRUCTOR)
        .send(&app.service)
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

#[test_log::test(tokio::test)]
async fn list_filters_by_classroom() {
    let app = create_test_app();
    seed_entry(&app.service, weekly_body("c1")).await;
    seed_entry(&app.service, weekly_body("c1")).await;
    seed_entry(&app.service, weekly_body("c2")).await;

    let listed: Vec<serde_json::Value> = TestRequest::get("/api/entries?tenantId=t1&classroom=c1")
        .as_user(INSTRUCTOR)
        .send(&app.service)
        .await
        .assert_status(StatusCode::OK)
        .json();

    assert_eq!(listed.len(), 2);
    assert!(listed.iter().all(|e| e["classroom"] == "c1"));
}

#[test_log::test(tokio::test)]
async fn list_requires_filters() {
    let app = create_test_app();

    TestRequest::get("/api/entries?tenantId=t1")
        .as_user(INSTRUCTOR)
        .send(&app.service)
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

#[test_log::test(tokio::test)]
async fn entries_require_identity() {
    let app = create_test_app();

    TestRequest::post("/api/entries")
        .json(weekly_body("c1"))
        .send(&app.service)
        .await
        .assert_status(StatusCode::UNAUTHORIZED);

    TestRequest::get("/api/entries?tenantId=t1&classroom=c1")
        .send(&app.service)
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
}
