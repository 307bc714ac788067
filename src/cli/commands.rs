//! CLI commands and argument parsing

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Turso Platform CLI
#[derive(Parser, Debug)]
#[command(name = "turso-platform")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file (JSON)
    #[arg(short = 'C', long, global = true)]
    pub config: Option<PathBuf>,

    /// Organization slug (overrides config and environment)
    #[arg(short, long, global = true)]
    pub organization: Option<String>,

    /// Output format
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Manage databases
    Database {
        #[command(subcommand)]
        command: DatabaseCommands,
    },

    /// Manage groups
    Group {
        #[command(subcommand)]
        command: GroupCommands,
    },

    /// Inspect organizations and usage
    Organization {
        #[command(subcommand)]
        command: OrganizationCommands,
    },

    /// Manage organization members
    Member {
        #[command(subcommand)]
        command: MemberCommands,
    },

    /// Manage organization invites
    Invite {
        #[command(subcommand)]
        command: InviteCommands,
    },

    /// Manage platform API tokens
    ApiToken {
        #[command(subcommand)]
        command: ApiTokenCommands,
    },

    /// Manage database access tokens
    DatabaseToken {
        #[command(subcommand)]
        command: DatabaseTokenCommands,
    },

    /// Manage group access tokens
    GroupToken {
        #[command(subcommand)]
        command: GroupTokenCommands,
    },

    /// Inspect available locations
    Location {
        #[command(subcommand)]
        command: LocationCommands,
    },

    /// Read organization audit logs
    AuditLog {
        #[command(subcommand)]
        command: AuditLogCommands,
    },

    /// Read invoices
    Invoice {
        #[command(subcommand)]
        command: InvoiceCommands,
    },

    /// Poll a resource and emit change events
    Watch {
        /// Event to watch for (database.created, database.deleted,
        /// group.created, group.deleted, member.added, member.removed)
        event: String,

        /// Snapshot file for state between polls (defaults to in-memory)
        #[arg(short, long)]
        state: Option<PathBuf>,

        /// Seconds between polls
        #[arg(short, long, default_value = "60")]
        interval: u64,

        /// Run a single poll cycle and exit
        #[arg(long)]
        once: bool,
    },
}

/// Database subcommands
#[derive(Subcommand, Debug)]
pub enum DatabaseCommands {
    /// List databases
    List {
        /// Filter by group
        #[arg(long)]
        group: Option<String>,

        /// Filter by schema parent database
        #[arg(long)]
        schema: Option<String>,
    },

    /// Create a database
    Create {
        /// Database name
        name: String,

        /// Group to place the database in
        #[arg(short, long, default_value = "default")]
        group: String,

        /// Maximum database size (e.g. 500mb, 2gb)
        #[arg(long)]
        size_limit: Option<String>,

        /// Create as a schema (parent) database
        #[arg(long)]
        is_schema: bool,

        /// Attach to a schema database
        #[arg(long)]
        schema: Option<String>,

        /// Seed from an existing database
        #[arg(long)]
        seed_from: Option<String>,

        /// Restore point for the seed database (RFC 3339)
        #[arg(long, requires = "seed_from")]
        seed_timestamp: Option<String>,

        /// Seed from a SQL dump URL
        #[arg(long, conflicts_with = "seed_from")]
        dump_url: Option<String>,
    },

    /// Get one database
    Get { name: String },

    /// Delete a database
    Delete { name: String },

    /// List instances (replicas)
    Instances { name: String },

    /// Get one instance
    Instance { name: String, instance: String },

    /// Get usage totals
    Usage { name: String },

    /// Get raw statistics
    Stats { name: String },

    /// Show the most expensive queries
    TopQueries { name: String },

    /// Update the libSQL server version
    UpdateVersion { name: String },

    /// Show configuration
    Config { name: String },

    /// Change configuration
    Configure {
        name: String,

        #[arg(long)]
        allow_attach: Option<bool>,

        #[arg(long)]
        block_reads: Option<bool>,

        #[arg(long)]
        block_writes: Option<bool>,

        /// Maximum database size (e.g. 500mb, 2gb)
        #[arg(long)]
        size_limit: Option<String>,
    },
}

/// Group subcommands
#[derive(Subcommand, Debug)]
pub enum GroupCommands {
    /// List groups
    List,

    /// Create a group
    Create {
        /// Group name
        name: String,

        /// Primary location code
        #[arg(short, long)]
        location: String,

        /// Extensions to enable ("all" or comma-separated list)
        #[arg(long)]
        extensions: Option<String>,

        /// libSQL server version
        #[arg(long)]
        version: Option<String>,
    },

    /// Get one group
    Get { name: String },

    /// Delete a group and every database in it
    Delete { name: String },

    /// Update a group
    Update {
        name: String,

        /// libSQL server version
        #[arg(long)]
        version: Option<String>,

        /// Extensions to enable
        #[arg(long)]
        extensions: Option<String>,
    },

    /// Replicate the group to a location
    AddLocation { name: String, location: String },

    /// Remove a location from the group
    RemoveLocation { name: String, location: String },

    /// Transfer the group to another organization
    Transfer {
        name: String,

        /// Target organization slug
        organization: String,
    },

    /// Wake an archived group
    Unarchive { name: String },
}

/// Organization subcommands
#[derive(Subcommand, Debug)]
pub enum OrganizationCommands {
    /// List organizations the token can access
    List,

    /// Get the configured organization
    Get,

    /// Show aggregate usage
    Usage {
        /// Range start (RFC 3339)
        #[arg(long)]
        from: Option<String>,

        /// Range end (RFC 3339)
        #[arg(long)]
        to: Option<String>,
    },
}

/// Member subcommands
#[derive(Subcommand, Debug)]
pub enum MemberCommands {
    /// List members
    List,

    /// Add a member
    Add {
        username: String,

        /// Role: owner, admin, or member
        #[arg(short, long, default_value = "member")]
        role: String,
    },

    /// Change a member's role
    UpdateRole {
        username: String,

        /// Role: owner, admin, or member
        role: String,
    },

    /// Remove a member
    Remove { username: String },
}

/// Invite subcommands
#[derive(Subcommand, Debug)]
pub enum InviteCommands {
    /// List pending invites
    List,

    /// Invite an email address
    Create {
        email: String,

        /// Role: owner, admin, or member
        #[arg(short, long, default_value = "member")]
        role: String,
    },

    /// Revoke a pending invite
    Delete { email: String },
}

/// Platform API token subcommands
#[derive(Subcommand, Debug)]
pub enum ApiTokenCommands {
    /// List tokens
    List,

    /// Mint a token (the value is only shown once)
    Mint { name: String },

    /// Revoke a token
    Revoke { name: String },

    /// Validate the token the CLI authenticates with
    Validate,
}

/// Database token subcommands
#[derive(Subcommand, Debug)]
pub enum DatabaseTokenCommands {
    /// List outstanding tokens for a database
    List { database: String },

    /// Mint a token for a database
    Create {
        database: String,

        /// Token lifetime (e.g. 2w1d30m, default never)
        #[arg(short, long)]
        expiration: Option<String>,

        /// Permission scope: full-access or read-only
        #[arg(short, long)]
        authorization: Option<String>,

        /// Databases the token may ATTACH (repeatable)
        #[arg(long = "attach")]
        attach: Vec<String>,
    },

    /// Validate a token against its database
    Validate { database: String },

    /// Invalidate every outstanding token for a database
    Rotate { database: String },
}

/// Group token subcommands
#[derive(Subcommand, Debug)]
pub enum GroupTokenCommands {
    /// Mint a token valid for every database in a group
    Create {
        group: String,

        /// Token lifetime (e.g. 2w1d30m, default never)
        #[arg(short, long)]
        expiration: Option<String>,

        /// Permission scope: full-access or read-only
        #[arg(short, long)]
        authorization: Option<String>,
    },

    /// Invalidate every outstanding token for a group
    Rotate { group: String },
}

/// Location subcommands
#[derive(Subcommand, Debug)]
pub enum LocationCommands {
    /// List available locations
    List,

    /// Show the location closest to this machine
    Closest,
}

/// Audit log subcommands
#[derive(Subcommand, Debug)]
pub enum AuditLogCommands {
    /// List audit log entries
    List {
        /// Page to fetch
        #[arg(long)]
        page: Option<u32>,

        /// Entries per page
        #[arg(long)]
        per_page: Option<u32>,

        /// Drain every page
        #[arg(long, conflicts_with_all = ["page", "per_page"])]
        all: bool,
    },
}

/// Invoice subcommands
#[derive(Subcommand, Debug)]
pub enum InvoiceCommands {
    /// List invoices
    List,

    /// Get one invoice by number
    Get { invoice_number: String },
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output (one value per line for event streams)
    Json,
    /// Indented JSON with human-readable summaries where available
    Pretty,
}
