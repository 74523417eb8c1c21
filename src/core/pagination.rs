//! Offset pagination: validated page parameters and the paged result with
//! its derived metadata.

use serde::{Deserialize, Serialize};

use crate::core::error::{AppError, Result};

/// Page size applied when a request does not name one.
pub const DEFAULT_PAGE_SIZE: u64 = 10;
/// Ceiling protecting the store from unbounded scans. Larger requests are
/// clamped, not rejected.
pub const MAX_PAGE_SIZE: u64 = 50;

/// Validated 1-based page parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageParameters {
    page_number: u64,
    page_size: u64,
}

impl PageParameters {
    /// Rejects a page number or size below 1; clamps the size to
    /// [`MAX_PAGE_SIZE`].
    pub fn new(page_number: u64, page_size: u64) -> Result<Self> {
        if page_number < 1 {
            return Err(AppError::validation("page_number must be at least 1"));
        }
        if page_size < 1 {
            return Err(AppError::validation("page_size must be at least 1"));
        }
        Ok(Self {
            page_number,
            page_size: page_size.min(MAX_PAGE_SIZE),
        })
    }

    pub fn page_number(&self) -> u64 {
        self.page_number
    }

    pub fn page_size(&self) -> u64 {
        self.page_size
    }

    /// Rows to skip before this page starts.
    pub fn offset(&self) -> u64 {
        (self.page_number - 1) * self.page_size
    }
}

impl Default for PageParameters {
    fn default() -> Self {
        Self {
            page_number: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// Raw query-string form of page parameters.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct PageQuery {
    pub page_number: Option<u64>,
    pub page_size: Option<u64>,
}

impl PageQuery {
    pub fn into_parameters(self) -> Result<PageParameters> {
        PageParameters::new(
            self.page_number.unwrap_or(1),
            self.page_size.unwrap_or(DEFAULT_PAGE_SIZE),
        )
    }
}

/// One page of an ordered result set plus the metadata derived from the
/// separate count round-trip.
///
/// The count and the items come from two store round-trips and are only
/// weakly consistent with each other under concurrent writes.
#[derive(Debug, Clone, PartialEq)]
pub struct PagedList<T> {
    pub items: Vec<T>,
    pub total_count: u64,
    pub page_size: u64,
    pub current_page: u64,
    pub total_pages: u64,
}

impl<T> PagedList<T> {
    pub fn new(items: Vec<T>, total_count: u64, params: PageParameters) -> Self {
        Self {
            items,
            total_count,
            page_size: params.page_size(),
            current_page: params.page_number(),
            total_pages: total_count.div_ceil(params.page_size()),
        }
    }

    pub fn has_previous(&self) -> bool {
        self.current_page > 1
    }

    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages
    }

    pub fn meta(&self) -> PaginationMeta {
        PaginationMeta {
            total_count: self.total_count,
            page_size: self.page_size,
            current_page: self.current_page,
            total_pages: self.total_pages,
            has_next: self.has_next(),
            has_previous: self.has_previous(),
        }
    }

    pub fn into_items(self) -> Vec<T> {
        self.items
    }
}

/// Serializable pagination metadata, surfaced out-of-band (the controllers
/// put it in the `X-Pagination` response header).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PaginationMeta {
    pub total_count: u64,
    pub page_size: u64,
    pub current_page: u64,
    pub total_pages: u64,
    pub has_next: bool,
    pub has_previous: bool,
}
