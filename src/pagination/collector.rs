//! Page-draining collector
//!
//! The Turso listing endpoints that paginate all follow the same shape:
//! `?page=N&per_page=M` with the records under one named array field, and a
//! short page marks the end. `PageCollector` hides that protocol behind a
//! single call that returns the concatenation of every page.

use crate::error::{Error, Result};
use crate::types::Record;
use serde_json::Value;
use std::future::Future;

/// Page size requested from the API
pub const DEFAULT_PAGE_SIZE: u32 = 100;

/// Ceiling on total page fetches. The short-page termination rule can never
/// fire against a server that keeps answering exactly full pages, so the
/// collector refuses to loop past this bound.
pub const DEFAULT_MAX_PAGES: u32 = 10_000;

/// Parameters for one page fetch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    /// 1-based page number
    pub page: u32,
    /// Requested page size
    pub per_page: u32,
}

/// Drains a page-numbered listing endpoint into one ordered record sequence.
///
/// The fetch closure receives the page number and page size and returns the
/// raw response body; any extra filter parameters are the closure's to
/// capture and forward unchanged on every call. Termination:
///
/// - a page whose record array is shorter than the page size is the last one;
/// - a response without the record field (or with a non-array value under
///   it) counts as an empty final page;
/// - a fetch error propagates as-is, discarding everything accumulated.
#[derive(Debug, Clone)]
pub struct PageCollector {
    record_key: String,
    page_size: u32,
    max_pages: u32,
}

impl PageCollector {
    /// Create a collector reading records from the given response field
    pub fn new(record_key: impl Into<String>) -> Self {
        Self {
            record_key: record_key.into(),
            page_size: DEFAULT_PAGE_SIZE,
            max_pages: DEFAULT_MAX_PAGES,
        }
    }

    /// Set the page size
    #[must_use]
    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }

    /// Set the page ceiling
    #[must_use]
    pub fn with_max_pages(mut self, max_pages: u32) -> Self {
        self.max_pages = max_pages;
        self
    }

    /// Fetch every page and return all records in request order
    pub async fn collect<F, Fut>(&self, mut fetch: F) -> Result<Vec<Record>>
    where
        F: FnMut(PageRequest) -> Fut,
        Fut: Future<Output = Result<Value>>,
    {
        let mut records = Vec::new();
        let mut page = 1u32;

        loop {
            if page > self.max_pages {
                return Err(Error::PaginationOverflow {
                    pages: self.max_pages,
                });
            }

            let body = fetch(PageRequest {
                page,
                per_page: self.page_size,
            })
            .await?;

            match body.get(&self.record_key) {
                Some(Value::Array(items)) => {
                    let count = items.len();
                    records.extend(items.iter().cloned());
                    if count < self.page_size as usize {
                        break;
                    }
                }
                // Absent or non-array field: an empty final page.
                _ => break,
            }

            page += 1;
        }

        Ok(records)
    }
}
