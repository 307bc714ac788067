//! Database operations
//!
//! Covers listing, creation (plain, seeded, point-in-time recovery, and
//! schema databases), instances, configuration, and per-database
//! statistics.

use super::client::TursoClient;
use super::models::{
    CreateDatabaseRequest, Database, DatabaseConfig, DatabaseInstance, DatabaseUsage, QueryStats,
};
use crate::error::Result;
use crate::http::RequestConfig;
use crate::types::Record;
use crate::util::compact_params;
use reqwest::Method;
use serde_json::Value;
use tracing::info;

impl TursoClient {
    /// List databases as raw records, optionally filtered by group or
    /// schema parent
    pub async fn list_database_records(
        &self,
        group: Option<&str>,
        schema: Option<&str>,
    ) -> Result<Vec<Record>> {
        let params = compact_params([
            ("group", group.map(str::to_string)),
            ("schema", schema.map(str::to_string)),
        ]);
        self.get_records(
            &self.org_path("/databases"),
            "databases",
            RequestConfig::new().queries(params),
        )
        .await
    }

    /// List databases, optionally filtered by group or schema parent
    pub async fn list_databases(
        &self,
        group: Option<&str>,
        schema: Option<&str>,
    ) -> Result<Vec<Database>> {
        self.list_database_records(group, schema)
            .await?
            .into_iter()
            .map(|record| serde_json::from_value(record).map_err(Into::into))
            .collect()
    }

    /// Create a database
    pub async fn create_database(&self, request: CreateDatabaseRequest) -> Result<Database> {
        info!(name = %request.name, group = %request.group, "creating database");
        self.entity(
            Method::POST,
            &self.org_path("/databases"),
            "database",
            RequestConfig::new().json(serde_json::to_value(&request)?),
        )
        .await
    }

    /// Get one database
    pub async fn get_database(&self, name: &str) -> Result<Database> {
        self.entity(
            Method::GET,
            &self.org_path(&format!("/databases/{name}")),
            "database",
            RequestConfig::new(),
        )
        .await
    }

    /// Delete a database
    pub async fn delete_database(&self, name: &str) -> Result<()> {
        info!(name, "deleting database");
        self.value(
            Method::DELETE,
            &self.org_path(&format!("/databases/{name}")),
            RequestConfig::new(),
        )
        .await?;
        Ok(())
    }

    /// List instances (replicas) of a database
    pub async fn list_database_instances(&self, name: &str) -> Result<Vec<DatabaseInstance>> {
        self.get_list(
            &self.org_path(&format!("/databases/{name}/instances")),
            "instances",
            RequestConfig::new(),
        )
        .await
    }

    /// Get one instance of a database
    pub async fn get_database_instance(
        &self,
        name: &str,
        instance: &str,
    ) -> Result<DatabaseInstance> {
        self.entity(
            Method::GET,
            &self.org_path(&format!("/databases/{name}/instances/{instance}")),
            "instance",
            RequestConfig::new(),
        )
        .await
    }

    /// Get usage totals for a database and its instances
    pub async fn database_usage(&self, name: &str) -> Result<DatabaseUsage> {
        self.entity(
            Method::GET,
            &self.org_path(&format!("/databases/{name}/usage")),
            "database",
            RequestConfig::new(),
        )
        .await
    }

    /// Get raw statistics for a database
    pub async fn database_stats(&self, name: &str) -> Result<Value> {
        self.value(
            Method::GET,
            &self.org_path(&format!("/databases/{name}/stats")),
            RequestConfig::new(),
        )
        .await
    }

    /// Get the most expensive queries of a database
    pub async fn database_top_queries(&self, name: &str) -> Result<Vec<QueryStats>> {
        self.get_list(
            &self.org_path(&format!("/databases/{name}/top-queries")),
            "top_queries",
            RequestConfig::new(),
        )
        .await
    }

    /// Update the libSQL server version of a database
    pub async fn update_database_version(&self, name: &str) -> Result<()> {
        info!(name, "updating database version");
        self.value(
            Method::POST,
            &self.org_path(&format!("/databases/{name}/update")),
            RequestConfig::new(),
        )
        .await?;
        Ok(())
    }

    /// Get the current configuration of a database
    pub async fn database_configuration(&self, name: &str) -> Result<DatabaseConfig> {
        let body = self
            .value(
                Method::GET,
                &self.org_path(&format!("/databases/{name}/configuration")),
                RequestConfig::new(),
            )
            .await?;
        Ok(serde_json::from_value(body)?)
    }

    /// Patch the configuration of a database
    pub async fn update_database_configuration(
        &self,
        name: &str,
        config: DatabaseConfig,
    ) -> Result<Value> {
        info!(name, "updating database configuration");
        self.entity(
            Method::PATCH,
            &self.org_path(&format!("/databases/{name}/configuration")),
            "database",
            RequestConfig::new().json(serde_json::to_value(&config)?),
        )
        .await
    }
}
