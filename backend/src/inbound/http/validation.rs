//! Request parsing helpers shared by HTTP handlers.

use actix_web::{HttpRequest, error::JsonPayloadError, web};
use pagination::PageRequest;
use serde::Deserialize;
use serde_json::json;
use utoipa::IntoParams;

use crate::domain::{Error, TodoId};

/// `?page=&limit=` query. Values are kept raw so unparseable input falls back
/// to defaults instead of failing the request.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PageQuery {
    /// 1-based page number; defaults to 1.
    pub page: Option<String>,
    /// Items per page; defaults to 10.
    pub limit: Option<String>,
}

impl PageQuery {
    /// Resolve into a [`PageRequest`], defaulting invalid values.
    #[must_use]
    pub fn to_page_request(&self) -> PageRequest {
        PageRequest::from_query(self.page.as_deref(), self.limit.as_deref())
    }
}

/// Parse a `{id}` path segment.
///
/// # Errors
///
/// Returns `invalid_request` when the segment is not a positive integer.
pub fn parse_todo_id(raw: &str) -> Result<TodoId, Error> {
    raw.parse::<TodoId>().map_err(Error::from)
}

fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    Error::invalid_request("Failed to parse request body")
        .with_details(json!({ "reason": err.to_string() }))
        .into()
}

/// JSON extractor configuration that reports malformed bodies in the
/// response envelope.
#[must_use]
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(json_error_handler)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use rstest::rstest;

    #[rstest]
    #[case(Some("2"), Some("5"), 2, 5)]
    #[case(None, None, 1, 10)]
    #[case(Some("-1"), Some("abc"), 1, 10)]
    fn page_query_defaults_invalid_values(
        #[case] page: Option<&str>,
        #[case] limit: Option<&str>,
        #[case] expected_page: u32,
        #[case] expected_limit: u32,
    ) {
        let query = PageQuery {
            page: page.map(str::to_owned),
            limit: limit.map(str::to_owned),
        };
        let request = query.to_page_request();
        assert_eq!((request.page(), request.limit()), (expected_page, expected_limit));
    }

    #[rstest]
    #[case("0")]
    #[case("-4")]
    #[case("abc")]
    fn rejects_bad_ids(#[case] raw: &str) {
        let error = parse_todo_id(raw).expect_err("invalid id");
        assert_eq!(error.code(), ErrorCode::InvalidRequest);
    }

    #[test]
    fn parses_positive_ids() {
        assert_eq!(parse_todo_id("12").map(TodoId::get), Ok(12));
    }
}
