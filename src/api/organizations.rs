//! Organization, member, and invite operations

use super::client::TursoClient;
use super::models::{Invite, Member, MemberRole, Organization};
use crate::error::Result;
use crate::http::RequestConfig;
use crate::types::Record;
use crate::util::{compact_params, encode_path_segment};
use reqwest::Method;
use serde_json::{json, Value};
use tracing::info;

impl TursoClient {
    /// List organizations the token has access to
    pub async fn list_organizations(&self) -> Result<Vec<Organization>> {
        self.get_list("/organizations", "organizations", RequestConfig::new())
            .await
    }

    /// Get the client's organization
    pub async fn get_organization(&self) -> Result<Organization> {
        self.entity(
            Method::GET,
            &self.org_path(""),
            "organization",
            RequestConfig::new(),
        )
        .await
    }

    /// Aggregate usage for the organization, optionally bounded to a
    /// time range (RFC 3339 timestamps)
    pub async fn organization_usage(
        &self,
        from: Option<&str>,
        to: Option<&str>,
    ) -> Result<Value> {
        let params = compact_params([
            ("from", from.map(str::to_string)),
            ("to", to.map(str::to_string)),
        ]);
        self.entity(
            Method::GET,
            &self.org_path("/usage"),
            "organization",
            RequestConfig::new().queries(params),
        )
        .await
    }

    /// List members as raw records
    pub async fn list_member_records(&self) -> Result<Vec<Record>> {
        self.get_records(&self.org_path("/members"), "members", RequestConfig::new())
            .await
    }

    /// List members
    pub async fn list_members(&self) -> Result<Vec<Member>> {
        self.get_list(&self.org_path("/members"), "members", RequestConfig::new())
            .await
    }

    /// Add a member to the organization
    pub async fn add_member(&self, username: &str, role: MemberRole) -> Result<Member> {
        info!(username, %role, "adding member");
        self.entity(
            Method::POST,
            &self.org_path("/members"),
            "member",
            RequestConfig::new().json(json!({ "username": username, "role": role })),
        )
        .await
    }

    /// Change a member's role
    pub async fn update_member_role(&self, username: &str, role: MemberRole) -> Result<Member> {
        info!(username, %role, "updating member role");
        self.entity(
            Method::PATCH,
            &self.org_path(&format!("/members/{}", encode_path_segment(username))),
            "member",
            RequestConfig::new().json(json!({ "role": role })),
        )
        .await
    }

    /// Remove a member from the organization
    pub async fn remove_member(&self, username: &str) -> Result<()> {
        info!(username, "removing member");
        self.value(
            Method::DELETE,
            &self.org_path(&format!("/members/{}", encode_path_segment(username))),
            RequestConfig::new(),
        )
        .await?;
        Ok(())
    }

    /// List pending invites
    pub async fn list_invites(&self) -> Result<Vec<Invite>> {
        self.get_list(&self.org_path("/invites"), "invites", RequestConfig::new())
            .await
    }

    /// Invite an email address to the organization
    pub async fn create_invite(&self, email: &str, role: MemberRole) -> Result<Invite> {
        info!(email, %role, "creating invite");
        self.entity(
            Method::POST,
            &self.org_path("/invites"),
            "invite",
            RequestConfig::new().json(json!({ "email": email, "role": role })),
        )
        .await
    }

    /// Revoke a pending invite
    pub async fn delete_invite(&self, email: &str) -> Result<()> {
        info!(email, "deleting invite");
        self.value(
            Method::DELETE,
            &self.org_path(&format!("/invites/{}", encode_path_segment(email))),
            RequestConfig::new(),
        )
        .await?;
        Ok(())
    }
}
