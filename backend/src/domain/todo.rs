//! To-do item value types and validation.
//!
//! [`TodoDraft`] is the validated write model shared by create and update;
//! [`TodoItem`] is the stored shape returned by reads and cached as JSON.

use std::str::FromStr;

use chrono::NaiveDate;
use pagination::{PageRequest, total_pages};
use serde::{Deserialize, Serialize};
use serde_json::json;
use thiserror::Error;
use utoipa::ToSchema;

use super::Error;

/// Shortest accepted title, in characters.
pub const TITLE_MIN_CHARS: usize = 3;
/// Longest accepted title, in characters.
pub const TITLE_MAX_CHARS: usize = 100;
/// Wire format for due dates.
pub const DUE_DATE_FORMAT: &str = "%Y-%m-%d";

/// Validation failures for to-do payloads and identifiers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TodoValidationError {
    /// Identifier was not a positive integer.
    #[error("todo id must be a positive integer")]
    InvalidId {
        /// Raw value supplied by the caller.
        value: String,
    },
    /// Title shorter than [`TITLE_MIN_CHARS`] after trimming.
    #[error("title must be at least {min} characters")]
    TitleTooShort {
        /// Minimum permitted length.
        min: usize,
    },
    /// Title longer than [`TITLE_MAX_CHARS`] after trimming.
    #[error("title must be at most {max} characters")]
    TitleTooLong {
        /// Maximum permitted length.
        max: usize,
    },
    /// Description missing or blank.
    #[error("description must not be empty")]
    EmptyDescription,
    /// Status outside the accepted set.
    #[error("status must be one of: pending, completed")]
    UnknownStatus {
        /// Raw value supplied by the caller.
        value: String,
    },
    /// Due date not in `YYYY-MM-DD` form.
    #[error("due_date must be a calendar date formatted as YYYY-MM-DD")]
    InvalidDueDate {
        /// Raw value supplied by the caller.
        value: String,
    },
}

impl TodoValidationError {
    fn field(&self) -> &'static str {
        match self {
            Self::InvalidId { .. } => "id",
            Self::TitleTooShort { .. } | Self::TitleTooLong { .. } => "title",
            Self::EmptyDescription => "description",
            Self::UnknownStatus { .. } => "status",
            Self::InvalidDueDate { .. } => "due_date",
        }
    }

    fn code(&self) -> &'static str {
        match self {
            Self::InvalidId { .. } | Self::InvalidDueDate { .. } => "invalid_format",
            Self::TitleTooShort { .. } => "too_short",
            Self::TitleTooLong { .. } => "too_long",
            Self::EmptyDescription => "required",
            Self::UnknownStatus { .. } => "unknown_value",
        }
    }

    fn value(&self) -> Option<&str> {
        match self {
            Self::InvalidId { value }
            | Self::UnknownStatus { value }
            | Self::InvalidDueDate { value } => Some(value.as_str()),
            _ => None,
        }
    }
}

impl From<TodoValidationError> for Error {
    fn from(value: TodoValidationError) -> Self {
        let mut details = json!({ "field": value.field(), "code": value.code() });
        if let Some(raw) = value.value() {
            details["value"] = json!(raw);
        }
        Self::invalid_request(value.to_string()).with_details(details)
    }
}

/// Store-assigned to-do identifier.
///
/// ## Invariants
/// - Always positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct TodoId(i64);

impl TodoId {
    /// Wrap a raw identifier, rejecting zero and negatives.
    ///
    /// # Errors
    ///
    /// Returns [`TodoValidationError::InvalidId`] for non-positive values.
    pub fn new(value: i64) -> Result<Self, TodoValidationError> {
        if value > 0 {
            Ok(Self(value))
        } else {
            Err(TodoValidationError::InvalidId {
                value: value.to_string(),
            })
        }
    }

    /// Raw identifier.
    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl TryFrom<i64> for TodoId {
    type Error = TodoValidationError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<TodoId> for i64 {
    fn from(value: TodoId) -> Self {
        value.0
    }
}

impl FromStr for TodoId {
    type Err = TodoValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<i64>()
            .map_err(|_| TodoValidationError::InvalidId {
                value: s.to_owned(),
            })
            .and_then(Self::new)
    }
}

impl std::fmt::Display for TodoId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Lifecycle state of a to-do item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum TodoStatus {
    /// Not yet done.
    Pending,
    /// Done.
    Completed,
}

impl TodoStatus {
    /// Lowercase wire and storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Completed => "completed",
        }
    }
}

impl FromStr for TodoStatus {
    type Err = TodoValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "completed" => Ok(Self::Completed),
            other => Err(TodoValidationError::UnknownStatus {
                value: other.to_owned(),
            }),
        }
    }
}

impl std::fmt::Display for TodoStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unvalidated create/update payload as received from a caller.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TodoInput {
    /// Raw title.
    pub title: String,
    /// Raw description.
    pub description: String,
    /// Raw status, expected to be `pending` or `completed`.
    pub status: String,
    /// Raw due date, expected as `YYYY-MM-DD` when present.
    pub due_date: Option<String>,
}

impl TodoInput {
    /// Validate into a [`TodoDraft`].
    ///
    /// # Errors
    ///
    /// Returns [`TodoValidationError`] describing the first invalid field.
    pub fn validate(&self) -> Result<TodoDraft, TodoValidationError> {
        TodoDraft::try_from_parts(
            &self.title,
            &self.description,
            &self.status,
            self.due_date.as_deref(),
        )
    }
}

/// Validated create/update payload.
///
/// ## Invariants
/// - `title` is trimmed and between [`TITLE_MIN_CHARS`] and
///   [`TITLE_MAX_CHARS`] characters.
/// - `description` is non-blank.
///
/// # Examples
/// ```
/// use todo_backend::domain::{TodoDraft, TodoStatus};
///
/// let draft = TodoDraft::try_from_parts("Buy milk", "semi-skimmed", "pending", Some("2024-05-01"))
///     .expect("valid draft");
/// assert_eq!(draft.status(), TodoStatus::Pending);
/// assert!(draft.due_date().is_some());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoDraft {
    title: String,
    description: String,
    status: TodoStatus,
    due_date: Option<NaiveDate>,
}

impl TodoDraft {
    /// Validate raw inputs. Fields are checked in declaration order and the
    /// first failure is reported.
    ///
    /// # Errors
    ///
    /// Returns [`TodoValidationError`] describing the first invalid field.
    pub fn try_from_parts(
        title: &str,
        description: &str,
        status: &str,
        due_date: Option<&str>,
    ) -> Result<Self, TodoValidationError> {
        let trimmed_title = title.trim();
        let title_chars = trimmed_title.chars().count();
        if title_chars < TITLE_MIN_CHARS {
            return Err(TodoValidationError::TitleTooShort {
                min: TITLE_MIN_CHARS,
            });
        }
        if title_chars > TITLE_MAX_CHARS {
            return Err(TodoValidationError::TitleTooLong {
                max: TITLE_MAX_CHARS,
            });
        }
        if description.trim().is_empty() {
            return Err(TodoValidationError::EmptyDescription);
        }
        let parsed_status = status.parse::<TodoStatus>()?;
        let parsed_due = due_date
            .map(|raw| {
                NaiveDate::parse_from_str(raw.trim(), DUE_DATE_FORMAT).map_err(|_| {
                    TodoValidationError::InvalidDueDate {
                        value: raw.to_owned(),
                    }
                })
            })
            .transpose()?;

        Ok(Self {
            title: trimmed_title.to_owned(),
            description: description.to_owned(),
            status: parsed_status,
            due_date: parsed_due,
        })
    }

    /// Trimmed title.
    #[must_use]
    pub fn title(&self) -> &str {
        self.title.as_str()
    }

    /// Free-form description.
    #[must_use]
    pub fn description(&self) -> &str {
        self.description.as_str()
    }

    /// Requested status.
    #[must_use]
    pub const fn status(&self) -> TodoStatus {
        self.status
    }

    /// Optional due date.
    #[must_use]
    pub const fn due_date(&self) -> Option<NaiveDate> {
        self.due_date
    }
}

/// Stored to-do item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct TodoItem {
    /// Store-assigned identifier.
    #[schema(value_type = i64, example = 42)]
    pub id: TodoId,
    /// Short summary, 3 to 100 characters.
    #[schema(example = "Buy milk")]
    pub title: String,
    /// Free-form description.
    #[schema(example = "Semi-skimmed, two litres")]
    pub description: String,
    /// Current status.
    pub status: TodoStatus,
    /// Optional due date, `YYYY-MM-DD`.
    #[schema(value_type = Option<String>, format = Date, example = "2024-05-01")]
    pub due_date: Option<NaiveDate>,
}

impl TodoItem {
    /// Combine an identifier with validated field values.
    #[must_use]
    pub fn from_draft(id: TodoId, draft: TodoDraft) -> Self {
        let TodoDraft {
            title,
            description,
            status,
            due_date,
        } = draft;
        Self {
            id,
            title,
            description,
            status,
            due_date,
        }
    }
}

/// One page of rows plus the total row count, as returned by the store.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TodoPage {
    /// Rows on the requested page, ordered by ascending id.
    pub items: Vec<TodoItem>,
    /// Total rows in the table at count time.
    pub total: u64,
}

/// Paginated list response. Cached verbatim under the page/limit key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PaginatedTodos {
    /// Items on this page, ordered by ascending id.
    pub tasks: Vec<TodoItem>,
    /// 1-based page number that was requested.
    #[schema(example = 1)]
    pub current_page: u32,
    /// `ceil(total_tasks / limit)`; 0 when there are no tasks.
    #[schema(example = 3)]
    pub total_pages: u64,
    /// Total number of tasks in the store.
    #[schema(example = 21)]
    pub total_tasks: u64,
}

impl PaginatedTodos {
    /// Assemble a response for `request` from a store page.
    #[must_use]
    pub fn from_page(request: PageRequest, page: TodoPage) -> Self {
        Self {
            tasks: page.items,
            current_page: request.page(),
            total_pages: total_pages(page.total, request.limit()),
            total_tasks: page.total,
        }
    }
}

#[cfg(test)]
mod tests {
    //! Validation and serialisation coverage for to-do types.
    use super::*;
    use crate::domain::ErrorCode;
    use rstest::rstest;
    use serde_json::json;

    fn draft(title: &str, status: &str, due: Option<&str>) -> Result<TodoDraft, TodoValidationError> {
        TodoDraft::try_from_parts(title, "description", status, due)
    }

    #[rstest]
    #[case("ab".to_owned(), TodoValidationError::TitleTooShort { min: TITLE_MIN_CHARS })]
    #[case("  ab  ".to_owned(), TodoValidationError::TitleTooShort { min: TITLE_MIN_CHARS })]
    #[case("t".repeat(101), TodoValidationError::TitleTooLong { max: TITLE_MAX_CHARS })]
    fn rejects_title_length(#[case] title: String, #[case] expected: TodoValidationError) {
        assert_eq!(draft(&title, "pending", None), Err(expected));
    }

    #[rstest]
    #[case("abc")]
    #[case("ééé")]
    fn accepts_boundary_titles(#[case] title: &str) {
        assert!(draft(title, "pending", None).is_ok());
        assert!(draft(&"t".repeat(100), "completed", None).is_ok());
    }

    #[test]
    fn rejects_unknown_status() {
        assert_eq!(
            draft("Buy milk", "archived", None),
            Err(TodoValidationError::UnknownStatus {
                value: "archived".to_owned()
            })
        );
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    fn rejects_blank_description(#[case] description: &str) {
        let result = TodoDraft::try_from_parts("Buy milk", description, "pending", None);
        assert_eq!(result, Err(TodoValidationError::EmptyDescription));
    }

    #[rstest]
    #[case("01/05/2024")]
    #[case("2024-13-01")]
    #[case("tomorrow")]
    fn rejects_malformed_due_date(#[case] raw: &str) {
        assert_eq!(
            draft("Buy milk", "pending", Some(raw)),
            Err(TodoValidationError::InvalidDueDate {
                value: raw.to_owned()
            })
        );
    }

    #[rstest]
    #[case("1", Some(1))]
    #[case(" 17 ", Some(17))]
    #[case("0", None)]
    #[case("-4", None)]
    #[case("abc", None)]
    fn parses_todo_ids(#[case] raw: &str, #[case] expected: Option<i64>) {
        assert_eq!(raw.parse::<TodoId>().ok().map(TodoId::get), expected);
    }

    #[test]
    fn validation_error_carries_field_details() {
        let error: Error = TodoValidationError::UnknownStatus {
            value: "archived".to_owned(),
        }
        .into();
        assert_eq!(error.code(), ErrorCode::InvalidRequest);
        assert_eq!(
            error.details(),
            Some(&json!({ "field": "status", "code": "unknown_value", "value": "archived" }))
        );
    }

    #[test]
    fn item_serialises_with_iso_due_date() {
        let id = TodoId::new(7).expect("positive id");
        let item = TodoItem::from_draft(
            id,
            draft("Buy milk", "completed", Some("2024-05-01")).expect("valid draft"),
        );
        let value = serde_json::to_value(&item).expect("serialise");
        assert_eq!(
            value,
            json!({
                "id": 7,
                "title": "Buy milk",
                "description": "description",
                "status": "completed",
                "due_date": "2024-05-01"
            })
        );
    }

    #[rstest]
    #[case(0, 10, 0)]
    #[case(21, 10, 3)]
    #[case(20, 10, 2)]
    fn paginated_total_pages_rounds_up(#[case] total: u64, #[case] limit: u32, #[case] expected: u64) {
        let request = PageRequest::new(1, limit).expect("valid request");
        let page = PaginatedTodos::from_page(
            request,
            TodoPage {
                items: Vec::new(),
                total,
            },
        );
        assert_eq!(page.total_pages, expected);
        assert_eq!(page.current_page, 1);
        assert_eq!(page.total_tasks, total);
    }
}
