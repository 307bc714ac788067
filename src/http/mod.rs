//! HTTP client module
//!
//! Provides the HTTP client shared by every API call.
//!
//! # Features
//!
//! - **Bearer Auth**: platform API token injected on every request
//! - **Automatic Retries**: configurable retry logic with backoff
//! - **Rate Limiting**: token bucket rate limiter using governor
//! - **API Errors**: `{"error": ...}` bodies surfaced as typed errors

mod client;
mod rate_limit;

pub use client::{HttpClient, HttpClientConfig, RequestConfig};
pub use rate_limit::RateLimiter;

#[cfg(test)]
mod tests;
