//! Internal Diesel row structs.
//!
//! These never leave the persistence layer; repositories convert them into
//! domain types.

use chrono::NaiveDate;
use diesel::prelude::*;
use diesel::sql_types::BigInt;

use crate::domain::{StoredUser, TodoId, TodoItem, TodoStatus, UserId};

use super::schema::{todolist, users};

/// Row read from `todolist`, via the query DSL or raw SQL.
#[derive(Debug, Clone, Queryable, QueryableByName, Selectable)]
#[diesel(table_name = todolist)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct TodoRow {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub status: String,
    pub due_date: Option<NaiveDate>,
}

impl TryFrom<TodoRow> for TodoItem {
    type Error = String;

    fn try_from(row: TodoRow) -> Result<Self, Self::Error> {
        let id = TodoId::new(row.id).map_err(|err| format!("row {}: {err}", row.id))?;
        let status = row
            .status
            .parse::<TodoStatus>()
            .map_err(|err| format!("row {}: {err}", row.id))?;
        Ok(Self {
            id,
            title: row.title,
            description: row.description,
            status,
            due_date: row.due_date,
        })
    }
}

/// Full-row changeset; a `None` due date clears the column.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = todolist)]
#[diesel(treat_none_as_null = true)]
pub(crate) struct TodoChangeset<'a> {
    pub title: &'a str,
    pub description: &'a str,
    pub status: &'a str,
    pub due_date: Option<NaiveDate>,
}

/// Single `id` column returned by `INSERT ... RETURNING id`.
#[derive(Debug, Clone, Copy, QueryableByName)]
pub(crate) struct InsertedId {
    #[diesel(sql_type = BigInt)]
    pub id: i64,
}

/// Row read from `users`.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: i64,
    pub username: String,
    pub password: String,
}

impl From<UserRow> for StoredUser {
    fn from(row: UserRow) -> Self {
        Self {
            id: UserId::new(row.id),
            username: row.username,
            password_hash: row.password,
        }
    }
}

/// Insertable user record.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

#[cfg(test)]
mod tests {
    //! Row-to-domain conversion coverage.
    use super::*;
    use rstest::rstest;

    fn row(id: i64, status: &str) -> TodoRow {
        TodoRow {
            id,
            title: "Write report".to_owned(),
            description: "quarterly".to_owned(),
            status: status.to_owned(),
            due_date: NaiveDate::from_ymd_opt(2024, 5, 1),
        }
    }

    #[test]
    fn converts_valid_row() {
        let item = TodoItem::try_from(row(3, "completed")).expect("valid row");
        assert_eq!(item.id.get(), 3);
        assert_eq!(item.status, TodoStatus::Completed);
        assert_eq!(item.due_date, NaiveDate::from_ymd_opt(2024, 5, 1));
    }

    #[rstest]
    #[case(row(0, "pending"))]
    #[case(row(4, "archived"))]
    fn rejects_corrupt_rows(#[case] bad: TodoRow) {
        let message = TodoItem::try_from(bad).expect_err("corrupt row");
        assert!(message.starts_with("row "));
    }
}
