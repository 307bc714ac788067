//! Typed models for Turso Platform API resources
//!
//! Response models deserialize defensively: the Platform API adds fields
//! between versions, and several endpoints omit fields for archived or
//! sleeping entities, so almost everything carries a serde default. The
//! databases endpoint predates the API's naming convention and returns
//! `Name`, `DbId`, and `Hostname` capitalized.

use crate::error::{Error, Result};
use crate::types::JsonValue;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ============================================================================
// Organizations and members
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Organization {
    pub name: String,
    pub slug: String,
    #[serde(rename = "type", default)]
    pub org_type: String,
    #[serde(default)]
    pub overages: bool,
    #[serde(default)]
    pub blocked_reads: bool,
    #[serde(default)]
    pub blocked_writes: bool,
}

/// Role of an organization member
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MemberRole {
    Owner,
    Admin,
    Member,
}

impl MemberRole {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Owner => "owner",
            Self::Admin => "admin",
            Self::Member => "member",
        }
    }
}

impl fmt::Display for MemberRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MemberRole {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "owner" => Ok(Self::Owner),
            "admin" => Ok(Self::Admin),
            "member" => Ok(Self::Member),
            other => Err(Error::InvalidConfigValue {
                field: "role".to_string(),
                message: format!("unknown role '{other}', expected owner, admin, or member"),
            }),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Member {
    pub username: String,
    pub role: MemberRole,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Invite {
    pub email: String,
    pub role: String,
    #[serde(default)]
    pub accepted: bool,
    #[serde(default)]
    pub created_at: String,
}

// ============================================================================
// Groups
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Group {
    pub name: String,
    #[serde(default)]
    pub uuid: String,
    #[serde(default)]
    pub locations: Vec<String>,
    #[serde(default)]
    pub primary: String,
    #[serde(default)]
    pub archived: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

/// Body for `POST /organizations/{org}/groups`
#[derive(Debug, Clone, Serialize)]
pub struct CreateGroupRequest {
    pub name: String,
    pub location: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extensions: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

impl CreateGroupRequest {
    pub fn new(name: impl Into<String>, location: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            location: location.into(),
            extensions: None,
            version: None,
        }
    }
}

/// Body for `PATCH /organizations/{org}/groups/{group}`
#[derive(Debug, Clone, Default, Serialize)]
pub struct UpdateGroupRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extensions: Option<String>,
}

// ============================================================================
// Databases
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Database {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "DbId", default)]
    pub db_id: String,
    #[serde(rename = "Hostname", default)]
    pub hostname: String,
    #[serde(default)]
    pub block_reads: bool,
    #[serde(default)]
    pub block_writes: bool,
    #[serde(default)]
    pub allow_attach: bool,
    #[serde(default)]
    pub regions: Vec<String>,
    #[serde(rename = "primaryRegion", default)]
    pub primary_region: String,
    #[serde(rename = "type", default)]
    pub db_type: String,
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub group: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_schema: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sleeping: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseInstance {
    #[serde(default)]
    pub uuid: String,
    pub name: String,
    #[serde(rename = "type", default)]
    pub instance_type: String,
    #[serde(default)]
    pub region: String,
    #[serde(default)]
    pub hostname: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UsageTotals {
    #[serde(default)]
    pub rows_read: u64,
    #[serde(default)]
    pub rows_written: u64,
    #[serde(default)]
    pub storage_bytes: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InstanceUsage {
    #[serde(default)]
    pub uuid: String,
    #[serde(default)]
    pub usage: UsageTotals,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseUsage {
    #[serde(default)]
    pub uuid: String,
    #[serde(default)]
    pub instances: Vec<InstanceUsage>,
    #[serde(default)]
    pub total: UsageTotals,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryStats {
    pub query: String,
    #[serde(default)]
    pub rows_read: u64,
    #[serde(default)]
    pub rows_written: u64,
}

/// Seed source when creating a database from existing data
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeedType {
    /// Copy of another database, optionally at a point in time
    Database,
    /// SQL dump fetched from a URL
    Dump,
}

#[derive(Debug, Clone, Serialize)]
pub struct Seed {
    #[serde(rename = "type")]
    pub seed_type: SeedType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
}

impl Seed {
    /// Seed from another database in the same organization
    pub fn from_database(name: impl Into<String>) -> Self {
        Self {
            seed_type: SeedType::Database,
            name: Some(name.into()),
            url: None,
            timestamp: None,
        }
    }

    /// Seed from a database at a point in time (point-in-time recovery)
    pub fn from_database_at(name: impl Into<String>, timestamp: impl Into<String>) -> Self {
        Self {
            timestamp: Some(timestamp.into()),
            ..Self::from_database(name)
        }
    }

    /// Seed from a SQL dump at a URL
    pub fn from_dump(url: impl Into<String>) -> Self {
        Self {
            seed_type: SeedType::Dump,
            name: None,
            url: Some(url.into()),
            timestamp: None,
        }
    }
}

/// Body for `POST /organizations/{org}/databases`
#[derive(Debug, Clone, Serialize)]
pub struct CreateDatabaseRequest {
    pub name: String,
    pub group: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<Seed>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_schema: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size_limit: Option<String>,
}

impl CreateDatabaseRequest {
    pub fn new(name: impl Into<String>, group: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            group: group.into(),
            seed: None,
            is_schema: None,
            schema: None,
            size_limit: None,
        }
    }

    /// Mark the database as a schema (parent) database
    #[must_use]
    pub fn as_schema(mut self) -> Self {
        self.is_schema = Some(true);
        self
    }

    /// Attach the database to a schema database
    #[must_use]
    pub fn with_schema(mut self, schema: impl Into<String>) -> Self {
        self.schema = Some(schema.into());
        self
    }

    #[must_use]
    pub fn with_seed(mut self, seed: Seed) -> Self {
        self.seed = Some(seed);
        self
    }

    #[must_use]
    pub fn with_size_limit(mut self, limit: impl Into<String>) -> Self {
        self.size_limit = Some(limit.into());
        self
    }
}

/// Body for `PATCH /organizations/{org}/databases/{db}/configuration`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DatabaseConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allow_attach: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub block_reads: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub block_writes: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size_limit: Option<String>,
}

// ============================================================================
// Tokens
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiToken {
    #[serde(default)]
    pub id: String,
    pub name: String,
    /// Only present in the mint response, never returned again
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseToken {
    pub jwt: String,
}

/// Fine-grained permissions attached to a database token
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TokenPermissions {
    /// Databases the token may ATTACH in queries
    #[serde(default)]
    pub read_attach: ReadAttach,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReadAttach {
    #[serde(default)]
    pub databases: Vec<String>,
}

impl TokenPermissions {
    /// Allow the token to ATTACH the given databases
    pub fn read_attach(databases: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            read_attach: ReadAttach {
                databases: databases.into_iter().map(Into::into).collect(),
            },
        }
    }
}

/// Permission scope for database and group tokens
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TokenAuthorization {
    #[serde(rename = "full-access")]
    FullAccess,
    #[serde(rename = "read-only")]
    ReadOnly,
}

impl TokenAuthorization {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::FullAccess => "full-access",
            Self::ReadOnly => "read-only",
        }
    }
}

impl fmt::Display for TokenAuthorization {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TokenAuthorization {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "full-access" => Ok(Self::FullAccess),
            "read-only" => Ok(Self::ReadOnly),
            other => Err(Error::InvalidConfigValue {
                field: "authorization".to_string(),
                message: format!(
                    "unknown authorization '{other}', expected full-access or read-only"
                ),
            }),
        }
    }
}

// ============================================================================
// Locations, audit logs, invoices
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub code: String,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClosestLocation {
    pub server: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditLogEntry {
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub origin: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub created_at: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<JsonValue>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Invoice {
    pub invoice_number: String,
    /// Kept as the API's decimal string so amounts survive output
    /// without floating-point rounding
    #[serde(default)]
    pub amount_due: String,
    #[serde(default)]
    pub due_date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paid_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_failed_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub invoice_pdf: Option<String>,
}
