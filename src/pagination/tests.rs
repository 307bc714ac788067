//! Tests for the page collector

use super::*;
use crate::error::Error;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Build a page body with `count` numbered records starting at `offset`
fn page(offset: usize, count: usize) -> Value {
    let entries: Vec<Value> = (offset..offset + count)
        .map(|i| json!({"code": format!("entry-{i}")}))
        .collect();
    json!({ "audit_logs": entries })
}

#[tokio::test]
async fn test_collect_concatenates_pages_in_order() {
    // Pages of sizes [100, 100, 37]: 237 records via exactly 3 calls.
    let pages = vec![page(0, 100), page(100, 100), page(200, 37)];
    let calls = Arc::new(AtomicUsize::new(0));

    let collector = PageCollector::new("audit_logs");
    let records = collector
        .collect(|req| {
            let calls = Arc::clone(&calls);
            let pages = &pages;
            async move {
                let idx = calls.fetch_add(1, Ordering::SeqCst);
                assert_eq!(req.page as usize, idx + 1);
                assert_eq!(req.per_page, DEFAULT_PAGE_SIZE);
                Ok(pages[idx].clone())
            }
        })
        .await
        .unwrap();

    assert_eq!(calls.load(Ordering::SeqCst), 3);
    assert_eq!(records.len(), 237);
    assert_eq!(records[0]["code"], "entry-0");
    assert_eq!(records[100]["code"], "entry-100");
    assert_eq!(records[236]["code"], "entry-236");
}

#[tokio::test]
async fn test_collect_single_short_page() {
    let calls = Arc::new(AtomicUsize::new(0));

    let collector = PageCollector::new("audit_logs");
    let records = collector
        .collect(|_req| {
            let calls = Arc::clone(&calls);
            async move {
                calls.fetch_add(1, Ordering::SeqCst);
                Ok(page(0, 5))
            }
        })
        .await
        .unwrap();

    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(records.len(), 5);
}

#[tokio::test]
async fn test_collect_missing_field_is_empty_final_page() {
    let calls = Arc::new(AtomicUsize::new(0));

    let collector = PageCollector::new("audit_logs");
    let records = collector
        .collect(|_req| {
            let calls = Arc::clone(&calls);
            async move {
                calls.fetch_add(1, Ordering::SeqCst);
                Ok(json!({"unrelated": true}))
            }
        })
        .await
        .unwrap();

    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert!(records.is_empty());
}

#[tokio::test]
async fn test_collect_non_array_field_terminates() {
    let collector = PageCollector::new("audit_logs");
    let records = collector
        .collect(|_req| async { Ok(json!({"audit_logs": "oops"})) })
        .await
        .unwrap();

    assert!(records.is_empty());
}

#[tokio::test]
async fn test_collect_error_propagates_with_no_partial_result() {
    // First page is full, second call fails: the caller sees the error and
    // none of the 100 accumulated records.
    let calls = Arc::new(AtomicUsize::new(0));

    let collector = PageCollector::new("audit_logs");
    let result = collector
        .collect(|_req| {
            let calls = Arc::clone(&calls);
            async move {
                let idx = calls.fetch_add(1, Ordering::SeqCst);
                if idx == 0 {
                    Ok(page(0, 100))
                } else {
                    Err(Error::api(500, "boom"))
                }
            }
        })
        .await;

    assert_eq!(calls.load(Ordering::SeqCst), 2);
    let err = result.unwrap_err();
    assert!(matches!(err, Error::Api { status: 500, .. }));
}

#[tokio::test]
async fn test_collect_custom_page_size() {
    let pages = vec![page(0, 10), page(10, 10), page(20, 3)];
    let calls = Arc::new(AtomicUsize::new(0));

    let collector = PageCollector::new("audit_logs").with_page_size(10);
    let records = collector
        .collect(|req| {
            let calls = Arc::clone(&calls);
            let pages = &pages;
            async move {
                assert_eq!(req.per_page, 10);
                let idx = calls.fetch_add(1, Ordering::SeqCst);
                Ok(pages[idx].clone())
            }
        })
        .await
        .unwrap();

    assert_eq!(records.len(), 23);
}

#[tokio::test]
async fn test_collect_page_ceiling() {
    // A server that always answers exactly full pages never satisfies the
    // short-page rule; the ceiling turns that into an error.
    let collector = PageCollector::new("audit_logs")
        .with_page_size(2)
        .with_max_pages(50);

    let result = collector.collect(|_req| async { Ok(page(0, 2)) }).await;

    let err = result.unwrap_err();
    assert!(matches!(err, Error::PaginationOverflow { pages: 50 }));
}
