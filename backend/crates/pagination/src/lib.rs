//! Page-number pagination primitives.
//!
//! Endpoints accept a 1-based `page` and a `limit` (page size). Raw query
//! values are normalised leniently: anything missing, non-numeric, zero, or
//! negative falls back to [`DEFAULT_PAGE`] and [`DEFAULT_LIMIT`]. The
//! resulting [`PageRequest`] selects a [`RowWindow`] of row-number ranks so
//! adapters can window an ordered result set without OFFSET/LIMIT.
//!
//! # Examples
//!
//! ```
//! use pagination::{PageRequest, total_pages};
//!
//! let request = PageRequest::from_query(Some("3"), Some("abc"));
//! assert_eq!(request.page(), 3);
//! assert_eq!(request.limit(), 10);
//!
//! let window = request.window();
//! assert_eq!((window.first(), window.last()), (21, 30));
//! assert_eq!(total_pages(21, request.limit()), 3);
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Page used when the caller omits or mangles the `page` parameter.
pub const DEFAULT_PAGE: u32 = 1;
/// Page size used when the caller omits or mangles the `limit` parameter.
pub const DEFAULT_LIMIT: u32 = 10;

/// Errors returned by the strict [`PageRequest::new`] constructor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PageRequestError {
    /// Pages are numbered from 1.
    #[error("page must be at least 1")]
    ZeroPage,
    /// A page must hold at least one item.
    #[error("limit must be at least 1")]
    ZeroLimit,
}

/// Validated page selection.
///
/// ## Invariants
/// - `page >= 1` and `limit >= 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawPageRequest")]
pub struct PageRequest {
    page: u32,
    limit: u32,
}

#[derive(Deserialize)]
struct RawPageRequest {
    page: u32,
    limit: u32,
}

impl TryFrom<RawPageRequest> for PageRequest {
    type Error = PageRequestError;

    fn try_from(value: RawPageRequest) -> Result<Self, Self::Error> {
        Self::new(value.page, value.limit)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl PageRequest {
    /// Build a request, rejecting zero values.
    ///
    /// # Errors
    ///
    /// Returns [`PageRequestError`] when `page` or `limit` is zero.
    pub const fn new(page: u32, limit: u32) -> Result<Self, PageRequestError> {
        if page == 0 {
            return Err(PageRequestError::ZeroPage);
        }
        if limit == 0 {
            return Err(PageRequestError::ZeroLimit);
        }
        Ok(Self { page, limit })
    }

    /// Build a request from raw query-string values, substituting defaults
    /// for anything absent, unparsable, zero, or negative.
    #[must_use]
    pub fn from_query(page: Option<&str>, limit: Option<&str>) -> Self {
        Self {
            page: parse_positive(page).unwrap_or(DEFAULT_PAGE),
            limit: parse_positive(limit).unwrap_or(DEFAULT_LIMIT),
        }
    }

    /// The 1-based page number.
    #[must_use]
    pub const fn page(&self) -> u32 {
        self.page
    }

    /// The maximum number of items on the page.
    #[must_use]
    pub const fn limit(&self) -> u32 {
        self.limit
    }

    /// Row-number ranks covered by this page.
    #[must_use]
    pub fn window(&self) -> RowWindow {
        let first = u64::from(self.page - 1) * u64::from(self.limit) + 1;
        RowWindow {
            first,
            last: first + u64::from(self.limit) - 1,
        }
    }
}

fn parse_positive(raw: Option<&str>) -> Option<u32> {
    raw.and_then(|value| value.trim().parse::<u32>().ok())
        .filter(|value| *value > 0)
}

/// Inclusive range of 1-based row-number ranks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RowWindow {
    first: u64,
    last: u64,
}

impl RowWindow {
    /// Rank of the first row on the page.
    #[must_use]
    pub const fn first(&self) -> u64 {
        self.first
    }

    /// Rank of the last row on the page.
    #[must_use]
    pub const fn last(&self) -> u64 {
        self.last
    }
}

/// Number of pages needed to show `total_items` at `limit` items per page.
///
/// Returns 0 for an empty collection and treats a zero `limit` as 1.
#[must_use]
pub fn total_pages(total_items: u64, limit: u32) -> u64 {
    total_items.div_ceil(u64::from(limit.max(1)))
}
