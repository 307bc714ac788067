//! Group operations

use super::client::TursoClient;
use super::models::{CreateGroupRequest, Group, UpdateGroupRequest};
use crate::error::Result;
use crate::http::RequestConfig;
use crate::types::Record;
use reqwest::Method;
use tracing::info;

impl TursoClient {
    /// List groups as raw records
    pub async fn list_group_records(&self) -> Result<Vec<Record>> {
        self.get_records(&self.org_path("/groups"), "groups", RequestConfig::new())
            .await
    }

    /// List groups
    pub async fn list_groups(&self) -> Result<Vec<Group>> {
        self.get_list(&self.org_path("/groups"), "groups", RequestConfig::new())
            .await
    }

    /// Create a group
    pub async fn create_group(&self, request: CreateGroupRequest) -> Result<Group> {
        info!(name = %request.name, location = %request.location, "creating group");
        self.entity(
            Method::POST,
            &self.org_path("/groups"),
            "group",
            RequestConfig::new().json(serde_json::to_value(&request)?),
        )
        .await
    }

    /// Get one group
    pub async fn get_group(&self, name: &str) -> Result<Group> {
        self.entity(
            Method::GET,
            &self.org_path(&format!("/groups/{name}")),
            "group",
            RequestConfig::new(),
        )
        .await
    }

    /// Delete a group and all databases in it
    pub async fn delete_group(&self, name: &str) -> Result<()> {
        info!(name, "deleting group");
        self.value(
            Method::DELETE,
            &self.org_path(&format!("/groups/{name}")),
            RequestConfig::new(),
        )
        .await?;
        Ok(())
    }

    /// Patch a group
    pub async fn update_group(&self, name: &str, request: UpdateGroupRequest) -> Result<Group> {
        info!(name, "updating group");
        self.entity(
            Method::PATCH,
            &self.org_path(&format!("/groups/{name}")),
            "group",
            RequestConfig::new().json(serde_json::to_value(&request)?),
        )
        .await
    }

    /// Replicate a group to an additional location
    pub async fn add_group_location(&self, name: &str, location: &str) -> Result<Group> {
        info!(name, location, "adding group location");
        self.entity(
            Method::POST,
            &self.org_path(&format!("/groups/{name}/locations/{location}")),
            "group",
            RequestConfig::new(),
        )
        .await
    }

    /// Remove a location from a group
    pub async fn remove_group_location(&self, name: &str, location: &str) -> Result<Group> {
        info!(name, location, "removing group location");
        self.entity(
            Method::DELETE,
            &self.org_path(&format!("/groups/{name}/locations/{location}")),
            "group",
            RequestConfig::new(),
        )
        .await
    }

    /// Transfer a group to another organization
    pub async fn transfer_group(&self, name: &str, target_organization: &str) -> Result<Group> {
        info!(name, target_organization, "transferring group");
        self.entity(
            Method::POST,
            &self.org_path(&format!("/groups/{name}/transfer")),
            "group",
            RequestConfig::new().json(serde_json::json!({ "organization": target_organization })),
        )
        .await
    }

    /// Wake an archived group
    pub async fn unarchive_group(&self, name: &str) -> Result<Group> {
        info!(name, "unarchiving group");
        self.entity(
            Method::POST,
            &self.org_path(&format!("/groups/{name}/unarchive")),
            "group",
            RequestConfig::new(),
        )
        .await
    }
}
