//! Permissive CORS headers added to every response.

use actix_web::middleware::DefaultHeaders;

/// `DefaultHeaders` allowing any origin to call the API with a bearer token.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use todo_backend::middleware::cors_headers;
///
/// let _app = App::new().wrap(cors_headers());
/// ```
#[must_use]
pub fn cors_headers() -> DefaultHeaders {
    DefaultHeaders::new()
        .add(("Access-Control-Allow-Origin", "*"))
        .add(("Access-Control-Allow-Methods", "GET, POST, PUT, DELETE"))
        .add(("Access-Control-Allow-Headers", "Content-Type, Authorization"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{App, HttpResponse, test, web};

    #[actix_web::test]
    async fn responses_carry_cors_headers() {
        let app = test::init_service(
            App::new()
                .wrap(cors_headers())
                .route("/", web::get().to(|| async { HttpResponse::Ok().finish() })),
        )
        .await;
        let res = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;

        let header = |name: &str| {
            res.headers()
                .get(name)
                .and_then(|value| value.to_str().ok())
                .map(str::to_owned)
        };
        assert_eq!(header("access-control-allow-origin").as_deref(), Some("*"));
        assert_eq!(
            header("access-control-allow-headers").as_deref(),
            Some("Content-Type, Authorization")
        );
    }
}
