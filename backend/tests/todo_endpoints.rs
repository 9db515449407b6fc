//! End-to-end to-do CRUD over real services and in-memory adapters.

mod support;

use actix_web::http::StatusCode;
use actix_web::test::TestRequest;
use rstest::rstest;
use serde_json::{Value, json};

use support::{authed, bearer_for, harness, send, todo_body};

#[actix_web::test]
async fn create_then_fetch_round_trips_through_the_envelope() {
    let harness = harness();
    let bearer = bearer_for(&harness, "alice").await;

    let (status, created) = send(
        &harness,
        authed(TestRequest::post().uri("/api/v1/todo"), &bearer).set_json(todo_body("Buy milk")),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["success"], Value::Bool(true));
    assert_eq!(created["message"], "Task created successfully");
    assert_eq!(created["error"], Value::Null);
    let id = created["task"]["id"].as_i64().expect("numeric id");

    let (status, fetched) = send(
        &harness,
        authed(TestRequest::get().uri(&format!("/api/v1/todo/{id}")), &bearer),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["message"], "Todo retrieved successfully");
    assert_eq!(fetched["task"], created["task"]);
    assert_eq!(fetched["task"]["due_date"], "2025-01-31");
}

#[actix_web::test]
async fn listing_reports_page_totals() {
    let harness = harness();
    let bearer = bearer_for(&harness, "alice").await;
    for n in 1..=5 {
        let (status, _) = send(
            &harness,
            authed(TestRequest::post().uri("/api/v1/todo"), &bearer)
                .set_json(todo_body(&format!("Task {n}"))),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, body) = send(
        &harness,
        authed(TestRequest::get().uri("/api/v1/todos?page=2&limit=2"), &bearer),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Todos retrieved successfully");
    let page = &body["task"];
    assert_eq!(page["current_page"], 2);
    assert_eq!(page["total_pages"], 3);
    assert_eq!(page["total_tasks"], 5);
    let titles: Vec<_> = page["tasks"]
        .as_array()
        .expect("tasks array")
        .iter()
        .map(|task| task["title"].as_str().expect("title"))
        .collect();
    assert_eq!(titles, ["Task 3", "Task 4"]);
}

#[actix_web::test]
async fn deleting_a_missing_id_succeeds_and_get_then_404s() {
    let harness = harness();
    let bearer = bearer_for(&harness, "alice").await;

    let (status, deleted) = send(
        &harness,
        authed(TestRequest::delete().uri("/api/v1/todo/999"), &bearer),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(deleted["message"], "Todo deleted successfully");
    assert_eq!(deleted["task"], Value::Null);

    let (status, missing) = send(
        &harness,
        authed(TestRequest::get().uri("/api/v1/todo/999"), &bearer),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(missing["success"], Value::Bool(false));
    assert_eq!(missing["task"], Value::Null);
    assert_eq!(missing["error"]["code"], "not_found");
    assert_eq!(missing["error"]["message"], "Todo not found");
}

#[rstest]
#[case(json!({"title": "ab", "description": "d", "status": "pending"}), "title", "too_short")]
#[case(json!({"title": "Valid", "description": "  ", "status": "pending"}), "description", "required")]
#[case(json!({"title": "Valid", "description": "d", "status": "archived"}), "status", "unknown_value")]
#[case(
    json!({"title": "Valid", "description": "d", "status": "pending", "due_date": "31/01/2025"}),
    "due_date",
    "invalid_format"
)]
#[actix_web::test]
async fn invalid_payloads_are_rejected_before_storage(
    #[case] payload: Value,
    #[case] field: &str,
    #[case] code: &str,
) {
    let harness = harness();
    let bearer = bearer_for(&harness, "alice").await;

    let (status, body) = send(
        &harness,
        authed(TestRequest::post().uri("/api/v1/todo"), &bearer).set_json(payload),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "invalid_request");
    assert_eq!(body["error"]["details"]["field"], field);
    assert_eq!(body["error"]["details"]["code"], code);
    assert_eq!(harness.todos.reads(), 0);
}

#[actix_web::test]
async fn store_outage_is_reported_without_internals() {
    let harness = harness();
    let bearer = bearer_for(&harness, "alice").await;
    harness.todos.set_unavailable(true);

    let (status, body) = send(
        &harness,
        authed(TestRequest::get().uri("/api/v1/todo/1"), &bearer),
    )
    .await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["error"]["code"], "service_unavailable");
    assert_eq!(body["error"]["message"], "Service temporarily unavailable");
    assert!(body["error"]["traceId"].is_string());
}
