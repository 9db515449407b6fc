//! Bearer-token extractor for protected routes.
//!
//! Reads the `Authorization` header, accepting the raw token with or without
//! a `Bearer ` prefix, and verifies it through [`LoginService`] held in
//! [`HttpState`].
//!
//! [`LoginService`]: crate::domain::ports::LoginService

use std::future::{Ready, ready};

use actix_web::http::header::AUTHORIZATION;
use actix_web::{FromRequest, HttpRequest, dev::Payload, web};

use super::state::HttpState;
use crate::domain::{Error, UserId};

const BEARER_PREFIX: &str = "Bearer ";
const MISSING_TOKEN: &str = "Missing or invalid token";

/// Identity of the caller, extracted from a verified bearer token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    user_id: UserId,
    username: String,
}

impl AuthenticatedUser {
    /// User id claim.
    #[must_use]
    pub const fn user_id(&self) -> UserId {
        self.user_id
    }

    /// Username claim.
    #[must_use]
    pub fn username(&self) -> &str {
        self.username.as_str()
    }
}

fn bearer_token(req: &HttpRequest) -> Result<&str, Error> {
    let raw = req
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .ok_or_else(|| Error::unauthorized(MISSING_TOKEN))?;
    let token = raw.strip_prefix(BEARER_PREFIX).unwrap_or(raw).trim();
    if token.is_empty() {
        return Err(Error::unauthorized(MISSING_TOKEN));
    }
    Ok(token)
}

fn authenticate(req: &HttpRequest) -> Result<AuthenticatedUser, Error> {
    let state = req
        .app_data::<web::Data<HttpState>>()
        .ok_or_else(|| Error::internal("HTTP state is not registered"))?;
    let token = bearer_token(req)?;
    let claims = state.login.verify_token(token)?;
    Ok(AuthenticatedUser {
        user_id: claims.user_id,
        username: claims.username,
    })
}

impl FromRequest for AuthenticatedUser {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(authenticate(req))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use actix_web::http::StatusCode;
    use actix_web::{App, HttpResponse, get, test};
    use chrono::{TimeZone, Utc};
    use rstest::rstest;

    use super::*;
    use crate::domain::TokenClaims;
    use crate::domain::ports::{
        MockLoginService, MockTodoCommand, MockTodoQuery, MockUserRegistration,
    };
    use crate::inbound::http::state::HttpStatePorts;

    #[get("/whoami")]
    async fn whoami(user: AuthenticatedUser) -> HttpResponse {
        HttpResponse::Ok().body(format!("{}:{}", user.user_id(), user.username()))
    }

    fn state(login: MockLoginService) -> web::Data<HttpState> {
        web::Data::new(HttpState::new(HttpStatePorts {
            todos: Arc::new(MockTodoQuery::new()),
            todo_commands: Arc::new(MockTodoCommand::new()),
            login: Arc::new(login),
            registration: Arc::new(MockUserRegistration::new()),
        }))
    }

    fn accepting_login() -> MockLoginService {
        let mut login = MockLoginService::new();
        login
            .expect_verify_token()
            .withf(|token| token == "good-token")
            .returning(|_| {
                let issued_at = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).single().expect("valid");
                Ok(TokenClaims {
                    user_id: UserId::new(5),
                    username: "alice".to_owned(),
                    issued_at,
                    expires_at: issued_at + chrono::TimeDelta::hours(72),
                })
            });
        login
    }

    #[rstest]
    #[case("Bearer good-token")]
    #[case("good-token")]
    #[actix_web::test]
    async fn accepts_token_with_or_without_prefix(#[case] header: &str) {
        let app = test::init_service(
            App::new().app_data(state(accepting_login())).service(whoami),
        )
        .await;
        let request = test::TestRequest::get()
            .uri("/whoami")
            .insert_header((AUTHORIZATION, header))
            .to_request();

        let response = test::call_service(&app, request).await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(test::read_body(response).await, "5:alice");
    }

    #[rstest]
    #[case(None)]
    #[case(Some("Bearer "))]
    #[actix_web::test]
    async fn missing_token_is_unauthorised(#[case] header: Option<&str>) {
        let app = test::init_service(
            App::new()
                .app_data(state(MockLoginService::new()))
                .service(whoami),
        )
        .await;
        let mut request = test::TestRequest::get().uri("/whoami");
        if let Some(value) = header {
            request = request.insert_header((AUTHORIZATION, value));
        }

        let response = test::call_service(&app, request.to_request()).await;

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn rejected_token_is_unauthorised() {
        let mut login = MockLoginService::new();
        login
            .expect_verify_token()
            .returning(|_| Err(Error::unauthorized("token has expired")));
        let app = test::init_service(App::new().app_data(state(login)).service(whoami)).await;
        let request = test::TestRequest::get()
            .uri("/whoami")
            .insert_header((AUTHORIZATION, "Bearer stale"))
            .to_request();

        let response = test::call_service(&app, request).await;

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}
