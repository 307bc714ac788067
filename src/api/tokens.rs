//! API, database, and group token operations
//!
//! Platform API tokens live under `/auth` outside any organization.
//! Database and group tokens are minted per resource; rotation
//! invalidates every outstanding token for that resource at once.

use super::client::TursoClient;
use super::models::{ApiToken, DatabaseToken, TokenAuthorization, TokenPermissions};
use crate::error::Result;
use crate::types::Record;
use crate::http::RequestConfig;
use crate::util::{compact_params, encode_path_segment};
use reqwest::Method;
use serde_json::Value;
use tracing::info;

fn token_params(
    expiration: Option<&str>,
    authorization: Option<TokenAuthorization>,
) -> Vec<(String, String)> {
    compact_params([
        ("expiration", expiration.map(str::to_string)),
        ("authorization", authorization.map(|a| a.to_string())),
    ])
}

impl TursoClient {
    // ------------------------------------------------------------------
    // Platform API tokens
    // ------------------------------------------------------------------

    /// List platform API tokens
    pub async fn list_api_tokens(&self) -> Result<Vec<ApiToken>> {
        self.get_list("/auth/api-tokens", "tokens", RequestConfig::new())
            .await
    }

    /// Mint a platform API token. The token value is only returned here.
    pub async fn mint_api_token(&self, name: &str) -> Result<ApiToken> {
        info!(name, "minting API token");
        let body = self
            .value(
                Method::POST,
                &format!("/auth/api-tokens/{}", encode_path_segment(name)),
                RequestConfig::new(),
            )
            .await?;
        Ok(serde_json::from_value(body)?)
    }

    /// Revoke a platform API token by name
    pub async fn revoke_api_token(&self, name: &str) -> Result<()> {
        info!(name, "revoking API token");
        self.value(
            Method::DELETE,
            &format!("/auth/api-tokens/{}", encode_path_segment(name)),
            RequestConfig::new(),
        )
        .await?;
        Ok(())
    }

    /// Validate the token this client authenticates with
    pub async fn validate_api_token(&self) -> Result<Value> {
        self.value(Method::GET, "/auth/validate", RequestConfig::new())
            .await
    }

    // ------------------------------------------------------------------
    // Database tokens
    // ------------------------------------------------------------------

    /// List outstanding tokens for a database. Token values are never
    /// returned here, only their metadata.
    pub async fn list_database_tokens(&self, database: &str) -> Result<Vec<Record>> {
        self.get_records(
            &self.org_path(&format!("/databases/{database}/auth/tokens")),
            "tokens",
            RequestConfig::new(),
        )
        .await
    }

    /// Mint a token for one database, optionally with fine-grained
    /// attach permissions
    pub async fn create_database_token(
        &self,
        database: &str,
        expiration: Option<&str>,
        authorization: Option<TokenAuthorization>,
        permissions: Option<TokenPermissions>,
    ) -> Result<DatabaseToken> {
        info!(database, "creating database token");
        let mut request = RequestConfig::new().queries(token_params(expiration, authorization));
        if let Some(permissions) = permissions {
            request = request.json(serde_json::json!({ "permissions": permissions }));
        }
        let body = self
            .value(
                Method::POST,
                &self.org_path(&format!("/databases/{database}/auth/tokens")),
                request,
            )
            .await?;
        Ok(serde_json::from_value(body)?)
    }

    /// Validate a database token against its database
    pub async fn validate_database_token(&self, database: &str) -> Result<Value> {
        self.value(
            Method::GET,
            &self.org_path(&format!("/databases/{database}/auth/tokens/validate")),
            RequestConfig::new(),
        )
        .await
    }

    /// Invalidate every outstanding token for a database
    pub async fn rotate_database_tokens(&self, database: &str) -> Result<()> {
        info!(database, "rotating database tokens");
        self.value(
            Method::POST,
            &self.org_path(&format!("/databases/{database}/auth/rotate")),
            RequestConfig::new(),
        )
        .await?;
        Ok(())
    }

    // ------------------------------------------------------------------
    // Group tokens
    // ------------------------------------------------------------------

    /// Mint a token valid for every database in a group
    pub async fn create_group_token(
        &self,
        group: &str,
        expiration: Option<&str>,
        authorization: Option<TokenAuthorization>,
    ) -> Result<DatabaseToken> {
        info!(group, "creating group token");
        let body = self
            .value(
                Method::POST,
                &self.org_path(&format!("/groups/{group}/auth/tokens")),
                RequestConfig::new().queries(token_params(expiration, authorization)),
            )
            .await?;
        Ok(serde_json::from_value(body)?)
    }

    /// Invalidate every outstanding token for a group
    pub async fn rotate_group_tokens(&self, group: &str) -> Result<()> {
        info!(group, "rotating group tokens");
        self.value(
            Method::POST,
            &self.org_path(&format!("/groups/{group}/auth/rotate")),
            RequestConfig::new(),
        )
        .await?;
        Ok(())
    }
}
