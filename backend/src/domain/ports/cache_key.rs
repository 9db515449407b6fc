//! Cache keys for to-do read results.
//!
//! Keys are derived from the query shape only: one key per page/limit pair
//! for list reads and one per identifier for single-item reads.

use pagination::PageRequest;

use crate::domain::TodoId;

/// Deterministic key under which a serialised read result is cached.
///
/// # Examples
/// ```
/// use pagination::PageRequest;
/// use todo_backend::domain::TodoId;
/// use todo_backend::domain::ports::TodoCacheKey;
///
/// let page = PageRequest::new(2, 5).expect("valid page");
/// assert_eq!(TodoCacheKey::list(page).as_str(), "todos:page:2:limit:5");
///
/// let id = TodoId::new(9).expect("valid id");
/// assert_eq!(TodoCacheKey::item(id).as_str(), "todo:id:9");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TodoCacheKey(String);

impl TodoCacheKey {
    /// Key for a list page.
    #[must_use]
    pub fn list(request: PageRequest) -> Self {
        Self(format!(
            "todos:page:{}:limit:{}",
            request.page(),
            request.limit()
        ))
    }

    /// Key for a single item.
    #[must_use]
    pub fn item(id: TodoId) -> Self {
        Self(format!("todo:id:{id}"))
    }

    /// Borrow the key as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl std::fmt::Display for TodoCacheKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl AsRef<str> for TodoCacheKey {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}
