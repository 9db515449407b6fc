//! Shared helpers for HTTP integration tests over in-memory adapters.
//!
//! Each call builds a fresh app around the same [`TestHarness`] state, so
//! stores and cache persist across requests within a test.

use actix_web::http::StatusCode;
use actix_web::http::header::AUTHORIZATION;
use actix_web::{App, test};
use serde_json::{Value, json};
use todo_backend::Trace;
use todo_backend::inbound::http::api_scope;
use todo_backend::test_support::TestHarness;

pub const PASSWORD: &str = "correct horse";

/// Build a harness; panics on misconfiguration.
pub fn harness() -> TestHarness {
    TestHarness::new().expect("harness builds")
}

/// Send `request` through the API and decode the JSON body.
pub async fn send(harness: &TestHarness, request: test::TestRequest) -> (StatusCode, Value) {
    let app = test::init_service(
        App::new()
            .app_data(harness.state.clone())
            .wrap(Trace)
            .service(api_scope()),
    )
    .await;
    let response = test::call_service(&app, request.to_request()).await;
    let status = response.status();
    let body = test::read_body(response).await;
    let value = serde_json::from_slice(&body).expect("JSON body");
    (status, value)
}

/// Register `username` and return a bearer header value for it.
pub async fn bearer_for(harness: &TestHarness, username: &str) -> String {
    let credentials = json!({ "username": username, "password": PASSWORD });
    let (status, _) = send(
        harness,
        test::TestRequest::post()
            .uri("/api/v1/register")
            .set_json(&credentials),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "registration failed");

    let (status, body) = send(
        harness,
        test::TestRequest::post()
            .uri("/api/v1/login")
            .set_json(&credentials),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "login failed");
    let token = body["task"]["token"]
        .as_str()
        .expect("login returns a token");
    format!("Bearer {token}")
}

/// Attach `bearer` as the `Authorization` header.
pub fn authed(request: test::TestRequest, bearer: &str) -> test::TestRequest {
    request.insert_header((AUTHORIZATION, bearer.to_owned()))
}

/// Minimal valid to-do payload.
pub fn todo_body(title: &str) -> Value {
    json!({
        "title": title,
        "description": "written by an integration test",
        "status": "pending",
        "due_date": "2025-01-31"
    })
}
