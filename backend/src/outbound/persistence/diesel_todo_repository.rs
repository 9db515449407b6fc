//! PostgreSQL-backed to-do repository.
//!
//! List reads window the table by `ROW_NUMBER() OVER (ORDER BY id)` and
//! count rows in a second statement; the two may disagree under concurrent
//! writes. Inserts use one of two statements depending on whether a due date
//! was supplied, and return the new id via `RETURNING id`.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::sql_query;
use diesel::sql_types::{BigInt, Date, Text};
use diesel_async::RunQueryDsl;
use pagination::RowWindow;

use crate::domain::ports::{TodoPersistenceError, TodoRepository};
use crate::domain::{TodoDraft, TodoId, TodoItem, TodoPage};

use super::diesel_helpers::{map_basic_diesel_error, map_pool_error_message};
use super::models::{InsertedId, TodoChangeset, TodoRow};
use super::pool::{DbPool, PoolError};
use super::schema::todolist;

const LIST_WINDOW_SQL: &str = r#"
SELECT id, title, description, status, due_date
FROM (
    SELECT id, title, description, status, due_date,
           ROW_NUMBER() OVER (ORDER BY id) AS rn
    FROM todolist
) ranked
WHERE rn BETWEEN $1 AND $2
ORDER BY id
"#;

const INSERT_WITH_DUE_DATE_SQL: &str = r#"
INSERT INTO todolist (title, description, status, due_date)
VALUES ($1, $2, $3, $4)
RETURNING id
"#;

const INSERT_WITHOUT_DUE_DATE_SQL: &str = r#"
INSERT INTO todolist (title, description, status)
VALUES ($1, $2, $3)
RETURNING id
"#;

fn map_pool_error(error: PoolError) -> TodoPersistenceError {
    TodoPersistenceError::connection(map_pool_error_message(error))
}

fn map_diesel_error(
    operation: &'static str,
) -> impl FnOnce(diesel::result::Error) -> TodoPersistenceError {
    move |error| {
        map_basic_diesel_error(
            error,
            operation,
            TodoPersistenceError::query,
            TodoPersistenceError::connection,
        )
    }
}

fn rank_bound(rank: u64) -> Result<i64, TodoPersistenceError> {
    i64::try_from(rank)
        .map_err(|_| TodoPersistenceError::query(format!("row rank {rank} exceeds BIGINT")))
}

fn row_to_item(row: TodoRow) -> Result<TodoItem, TodoPersistenceError> {
    TodoItem::try_from(row).map_err(TodoPersistenceError::query)
}

/// Diesel-backed implementation of the [`TodoRepository`] port.
#[derive(Clone)]
pub struct DieselTodoRepository {
    pool: DbPool,
}

impl DieselTodoRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TodoRepository for DieselTodoRepository {
    async fn list_window(&self, window: RowWindow) -> Result<TodoPage, TodoPersistenceError> {
        let first = rank_bound(RowWindow::first(&window))?;
        let last = rank_bound(window.last())?;
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<TodoRow> = sql_query(LIST_WINDOW_SQL)
            .bind::<BigInt, _>(first)
            .bind::<BigInt, _>(last)
            .load(&mut conn)
            .await
            .map_err(map_diesel_error("list todos"))?;
        let total: i64 = todolist::table
            .count()
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error("count todos"))?;

        let items = rows
            .into_iter()
            .map(row_to_item)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(TodoPage {
            items,
            total: u64::try_from(total).unwrap_or_default(),
        })
    }

    async fn find_by_id(&self, id: TodoId) -> Result<Option<TodoItem>, TodoPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = todolist::table
            .filter(todolist::id.eq(id.get()))
            .select(TodoRow::as_select())
            .first::<TodoRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error("find todo"))?;
        row.map(row_to_item).transpose()
    }

    async fn insert(&self, draft: &TodoDraft) -> Result<TodoId, TodoPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let inserted: InsertedId = match draft.due_date() {
            Some(due_date) => {
                sql_query(INSERT_WITH_DUE_DATE_SQL)
                    .bind::<Text, _>(draft.title())
                    .bind::<Text, _>(draft.description())
                    .bind::<Text, _>(draft.status().as_str())
                    .bind::<Date, _>(due_date)
                    .get_result::<InsertedId>(&mut conn)
                    .await
            }
            None => {
                sql_query(INSERT_WITHOUT_DUE_DATE_SQL)
                    .bind::<Text, _>(draft.title())
                    .bind::<Text, _>(draft.description())
                    .bind::<Text, _>(draft.status().as_str())
                    .get_result::<InsertedId>(&mut conn)
                    .await
            }
        }
        .map_err(map_diesel_error("insert todo"))?;

        TodoId::new(inserted.id).map_err(|err| TodoPersistenceError::query(err.to_string()))
    }

    async fn update(&self, id: TodoId, draft: &TodoDraft) -> Result<(), TodoPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let changes = TodoChangeset {
            title: draft.title(),
            description: draft.description(),
            status: draft.status().as_str(),
            due_date: draft.due_date(),
        };
        diesel::update(todolist::table.filter(todolist::id.eq(id.get())))
            .set(&changes)
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error("update todo"))?;
        Ok(())
    }

    async fn delete(&self, id: TodoId) -> Result<(), TodoPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::delete(todolist::table.filter(todolist::id.eq(id.get())))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error("delete todo"))?;
        Ok(())
    }
}
