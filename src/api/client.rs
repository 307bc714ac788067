//! Turso Platform API client
//!
//! A thin, organization-scoped wrapper over [`HttpClient`]. Resource
//! operations live in the sibling modules (`databases`, `groups`, ...) as
//! `impl TursoClient` blocks; this file holds construction and the
//! response-envelope helpers they share.
//!
//! The API wraps most responses in a single-key envelope, e.g.
//! `{"databases": [...]}` or `{"group": {...}}`. Mutation endpoints are
//! inconsistent about it, so the entity helpers fall back to treating the
//! whole body as the payload when the expected key is absent.

use crate::config::TursoConfig;
use crate::error::Result;
use crate::http::{HttpClient, HttpClientConfig, RequestConfig};
use crate::types::Record;
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::Duration;

/// Client for the Turso Platform API, scoped to one organization
#[derive(Debug)]
pub struct TursoClient {
    http: HttpClient,
    organization: String,
}

impl TursoClient {
    /// Build a client from configuration
    pub fn new(config: &TursoConfig) -> Result<Self> {
        config.validate()?;

        let mut builder = HttpClientConfig::builder()
            .base_url(&config.base_url)
            .bearer_token(&config.api_token)
            .timeout(Duration::from_secs(config.http.timeout_seconds))
            .max_retries(config.http.max_retries)
            .backoff(
                config.http.backoff.backoff_type,
                Duration::from_millis(config.http.backoff.initial_ms),
                Duration::from_millis(config.http.backoff.max_ms),
            );

        builder = match &config.http.rate_limit {
            Some(settings) => builder.rate_limit(settings.clone()),
            None => builder.no_rate_limit(),
        };

        Ok(Self {
            http: HttpClient::with_config(builder.build()),
            organization: config.organization.clone(),
        })
    }

    /// Build a client around an existing HTTP client
    pub fn with_http(http: HttpClient, organization: impl Into<String>) -> Self {
        Self {
            http,
            organization: organization.into(),
        }
    }

    /// The organization slug this client is scoped to
    pub fn organization(&self) -> &str {
        &self.organization
    }

    /// Path under the client's organization
    pub(crate) fn org_path(&self, suffix: &str) -> String {
        format!("/organizations/{}{}", self.organization, suffix)
    }

    /// GET a list endpoint and pull the array out of its envelope.
    ///
    /// A missing or non-array key yields an empty list, matching how the
    /// API answers for organizations with no entities of that kind.
    pub(crate) async fn get_records(
        &self,
        path: &str,
        key: &str,
        config: RequestConfig,
    ) -> Result<Vec<Record>> {
        let mut body: Value = self
            .http
            .request_value(Method::GET, path, config)
            .await?;
        match body.get_mut(key) {
            Some(Value::Array(items)) => Ok(std::mem::take(items)),
            _ => Ok(Vec::new()),
        }
    }

    /// GET a list endpoint and deserialize each record
    pub(crate) async fn get_list<T: DeserializeOwned>(
        &self,
        path: &str,
        key: &str,
        config: RequestConfig,
    ) -> Result<Vec<T>> {
        self.get_records(path, key, config)
            .await?
            .into_iter()
            .map(|record| serde_json::from_value(record).map_err(Into::into))
            .collect()
    }

    /// Request a single entity, unwrapping its envelope key when present
    pub(crate) async fn entity<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        key: &str,
        config: RequestConfig,
    ) -> Result<T> {
        let body = self.http.request_value(method, path, config).await?;
        unwrap_envelope(body, key)
    }

    /// Request and return the raw JSON body
    pub(crate) async fn value(
        &self,
        method: Method,
        path: &str,
        config: RequestConfig,
    ) -> Result<Value> {
        self.http.request_value(method, path, config).await
    }
}

/// Deserialize `body[key]` when present and non-null, else the whole body
fn unwrap_envelope<T: DeserializeOwned>(mut body: Value, key: &str) -> Result<T> {
    let payload = match body.get_mut(key) {
        Some(inner) if !inner.is_null() => inner.take(),
        _ => body,
    };
    Ok(serde_json::from_value(payload)?)
}

#[cfg(test)]
mod envelope_tests {
    use super::*;
    use crate::api::models::Group;
    use serde_json::json;

    #[test]
    fn unwraps_keyed_envelope() {
        let group: Group =
            unwrap_envelope(json!({"group": {"name": "default"}}), "group").unwrap();
        assert_eq!(group.name, "default");
    }

    #[test]
    fn falls_back_to_whole_body() {
        let group: Group = unwrap_envelope(json!({"name": "default"}), "group").unwrap();
        assert_eq!(group.name, "default");
    }
}
