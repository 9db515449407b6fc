//! In-memory [`TodoRepository`] with read counting and outage simulation.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use pagination::RowWindow;

use crate::domain::ports::{TodoPersistenceError, TodoRepository};
use crate::domain::{TodoDraft, TodoId, TodoItem, TodoPage};

#[derive(Debug, Default)]
struct Rows {
    items: BTreeMap<i64, TodoItem>,
    last_id: i64,
}

/// Ordered map standing in for the `todolist` table.
#[derive(Debug, Default)]
pub struct InMemoryTodoRepository {
    rows: Mutex<Rows>,
    reads: AtomicUsize,
    unavailable: AtomicBool,
}

impl InMemoryTodoRepository {
    /// Empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of `list_window` and `find_by_id` calls served so far.
    #[must_use]
    pub fn reads(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }

    /// Make every call fail with a connection error until reset.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    fn lock(&self) -> MutexGuard<'_, Rows> {
        self.rows.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn check_available(&self) -> Result<(), TodoPersistenceError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(TodoPersistenceError::connection("connection refused"));
        }
        Ok(())
    }

    fn record_read(&self) -> Result<(), TodoPersistenceError> {
        self.check_available()?;
        self.reads.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

fn to_index(rank: u64) -> usize {
    usize::try_from(rank).unwrap_or(usize::MAX)
}

#[async_trait]
impl TodoRepository for InMemoryTodoRepository {
    async fn list_window(&self, window: RowWindow) -> Result<TodoPage, TodoPersistenceError> {
        self.record_read()?;
        let rows = self.lock();
        let skip = to_index(window.first().saturating_sub(1));
        let take = to_index(window.last().saturating_sub(window.first()).saturating_add(1));
        let items = rows.items.values().skip(skip).take(take).cloned().collect();
        Ok(TodoPage {
            items,
            total: u64::try_from(rows.items.len()).unwrap_or(u64::MAX),
        })
    }

    async fn find_by_id(&self, id: TodoId) -> Result<Option<TodoItem>, TodoPersistenceError> {
        self.record_read()?;
        Ok(self.lock().items.get(&id.get()).cloned())
    }

    async fn insert(&self, draft: &TodoDraft) -> Result<TodoId, TodoPersistenceError> {
        self.check_available()?;
        let mut rows = self.lock();
        rows.last_id += 1;
        let id = TodoId::new(rows.last_id)
            .map_err(|error| TodoPersistenceError::query(error.to_string()))?;
        rows.items
            .insert(id.get(), TodoItem::from_draft(id, draft.clone()));
        Ok(id)
    }

    async fn update(&self, id: TodoId, draft: &TodoDraft) -> Result<(), TodoPersistenceError> {
        self.check_available()?;
        if let Some(row) = self.lock().items.get_mut(&id.get()) {
            *row = TodoItem::from_draft(id, draft.clone());
        }
        Ok(())
    }

    async fn delete(&self, id: TodoId) -> Result<(), TodoPersistenceError> {
        self.check_available()?;
        self.lock().items.remove(&id.get());
        Ok(())
    }
}
