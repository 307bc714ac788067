//! Location operations
//!
//! The `/locations` endpoint answers with a `{code: name}` map rather
//! than a list; it is flattened into [`Location`] records sorted by code
//! so output is stable.

use super::client::TursoClient;
use super::models::{ClosestLocation, Location};
use crate::error::Result;
use crate::http::RequestConfig;
use reqwest::Method;
use serde_json::Value;

impl TursoClient {
    /// List all available locations, sorted by code
    pub async fn list_locations(&self) -> Result<Vec<Location>> {
        let body = self
            .value(Method::GET, "/locations", RequestConfig::new())
            .await?;

        let mut locations: Vec<Location> = match body.get("locations") {
            Some(Value::Object(map)) => map
                .iter()
                .filter_map(|(code, name)| {
                    name.as_str().map(|name| Location {
                        code: code.clone(),
                        name: name.to_string(),
                    })
                })
                .collect(),
            _ => Vec::new(),
        };
        locations.sort_by(|a, b| a.code.cmp(&b.code));
        Ok(locations)
    }

    /// Get the location closest to the caller
    pub async fn closest_location(&self) -> Result<ClosestLocation> {
        let body = self
            .value(Method::GET, "/locations/closest", RequestConfig::new())
            .await?;
        Ok(serde_json::from_value(body)?)
    }
}
