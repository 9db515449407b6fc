//! Tests for account handlers.

use std::sync::Arc;

use actix_web::{App, test as actix_test};
use rstest::{fixture, rstest};
use serde_json::{Value, json};

use super::*;
use crate::domain::UserId;
use crate::domain::ports::{
    MockLoginService, MockTodoCommand, MockTodoQuery, MockUserRegistration,
};
use crate::inbound::http::api_scope;
use crate::inbound::http::state::HttpStatePorts;

#[fixture]
fn login_service() -> MockLoginService {
    MockLoginService::new()
}

#[fixture]
fn registration() -> MockUserRegistration {
    MockUserRegistration::new()
}

async fn post(
    login_service: MockLoginService,
    registration: MockUserRegistration,
    uri: &str,
    body: Value,
) -> (StatusCode, Value) {
    let state = web::Data::new(HttpState::new(HttpStatePorts {
        todos: Arc::new(MockTodoQuery::new()),
        todo_commands: Arc::new(MockTodoCommand::new()),
        login: Arc::new(login_service),
        registration: Arc::new(registration),
    }));
    let app = actix_test::init_service(App::new().app_data(state).service(api_scope())).await;
    let request = actix_test::TestRequest::post()
        .uri(uri)
        .set_json(body)
        .to_request();
    let response = actix_test::call_service(&app, request).await;
    let status = response.status();
    let bytes = actix_test::read_body(response).await;
    (status, serde_json::from_slice(&bytes).expect("JSON body"))
}

#[rstest]
#[actix_web::test]
async fn login_returns_token(
    mut login_service: MockLoginService,
    registration: MockUserRegistration,
) {
    login_service
        .expect_login()
        .withf(|credentials| credentials.username() == "alice" && credentials.password() == "pw")
        .times(1)
        .returning(|_| {
            Ok(AccessToken {
                token: "signed".to_owned(),
            })
        });

    let (status, body) = post(
        login_service,
        registration,
        "/api/v1/login",
        json!({"username": " alice ", "password": "pw"}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], json!("Login successful"));
    assert_eq!(body["task"]["token"], json!("signed"));
}

#[rstest]
#[case(Error::not_found("User not found"), StatusCode::NOT_FOUND)]
#[case(Error::unauthorized("Invalid password"), StatusCode::UNAUTHORIZED)]
#[actix_web::test]
async fn login_failures_map_to_status(
    mut login_service: MockLoginService,
    registration: MockUserRegistration,
    #[case] error: Error,
    #[case] expected: StatusCode,
) {
    let message = error.message().to_owned();
    login_service
        .expect_login()
        .return_once(move |_| Err(error));

    let (status, body) = post(
        login_service,
        registration,
        "/api/v1/login",
        json!({"username": "alice", "password": "pw"}),
    )
    .await;

    assert_eq!(status, expected);
    assert_eq!(body["message"], json!(message));
    assert_eq!(body["success"], json!(false));
}

#[rstest]
#[case(json!({"username": "   ", "password": "pw"}), "username", "required")]
#[case(json!({"username": "alice", "password": ""}), "password", "required")]
#[case(json!({"password": "pw"}), "username", "required")]
#[actix_web::test]
async fn invalid_credentials_are_rejected_before_services(
    login_service: MockLoginService,
    registration: MockUserRegistration,
    #[case] payload: Value,
    #[case] field: &str,
    #[case] code: &str,
) {
    let (status, body) = post(login_service, registration, "/api/v1/login", payload).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["details"]["field"], json!(field));
    assert_eq!(body["error"]["details"]["code"], json!(code));
}

#[rstest]
#[actix_web::test]
async fn register_returns_created(
    login_service: MockLoginService,
    mut registration: MockUserRegistration,
) {
    registration.expect_register().times(1).returning(|credentials| {
        Ok(RegisteredUser {
            id: UserId::new(3),
            username: credentials.username().to_owned(),
        })
    });

    let (status, body) = post(
        login_service,
        registration,
        "/api/v1/register",
        json!({"username": "bob", "password": "pw"}),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], json!("User created successfully"));
    assert_eq!(body["task"], json!({"id": 3, "username": "bob"}));
}

#[rstest]
#[actix_web::test]
async fn duplicate_registration_conflicts(
    login_service: MockLoginService,
    mut registration: MockUserRegistration,
) {
    registration
        .expect_register()
        .returning(|_| Err(Error::conflict("username bob is already registered")));

    let (status, body) = post(
        login_service,
        registration,
        "/api/v1/register",
        json!({"username": "bob", "password": "pw"}),
    )
    .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"]["code"], json!("conflict"));
}
