//! Pagination module
//!
//! One strategy, built for the platform API's `page`/`per_page` listings:
//! drain every page into a single ordered sequence, stopping on the first
//! short page.

mod collector;

pub use collector::{PageCollector, PageRequest, DEFAULT_MAX_PAGES, DEFAULT_PAGE_SIZE};

#[cfg(test)]
mod tests;
