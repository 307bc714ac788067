//! CLI runner - executes commands

use crate::api::models::{
    CreateDatabaseRequest, CreateGroupRequest, DatabaseConfig, DatabaseUsage, MemberRole, Seed,
    TokenAuthorization, TokenPermissions, UpdateGroupRequest,
};
use crate::api::TursoClient;
use crate::cli::commands::{
    ApiTokenCommands, AuditLogCommands, Cli, Commands, DatabaseCommands, DatabaseTokenCommands,
    GroupCommands, GroupTokenCommands, InviteCommands, InvoiceCommands, LocationCommands,
    MemberCommands, OrganizationCommands, OutputFormat,
};
use crate::config::TursoConfig;
use crate::error::{Error, Result};
use crate::types::OptionStringExt;
use crate::util::{format_bytes, parse_size_limit, sanitize_name};
use crate::watch::{SnapshotStore, WatchEvent, Watcher};
use serde::Serialize;
use serde_json::json;
use std::time::Duration;
use tracing::warn;

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        let client = self.client()?;

        match &self.cli.command {
            Commands::Database { command } => self.run_database(&client, command).await,
            Commands::Group { command } => self.run_group(&client, command).await,
            Commands::Organization { command } => self.run_organization(&client, command).await,
            Commands::Member { command } => self.run_member(&client, command).await,
            Commands::Invite { command } => self.run_invite(&client, command).await,
            Commands::ApiToken { command } => self.run_api_token(&client, command).await,
            Commands::DatabaseToken { command } => self.run_database_token(&client, command).await,
            Commands::GroupToken { command } => self.run_group_token(&client, command).await,
            Commands::Location { command } => self.run_location(&client, command).await,
            Commands::AuditLog { command } => self.run_audit_log(&client, command).await,
            Commands::Invoice { command } => self.run_invoice(&client, command).await,
            Commands::Watch {
                event,
                state,
                interval,
                once,
            } => {
                self.run_watch(client, event, state.as_deref(), *interval, *once)
                    .await
            }
        }
    }

    /// Build the API client from config, environment, and CLI overrides
    fn client(&self) -> Result<TursoClient> {
        let mut config = TursoConfig::load(self.cli.config.as_deref())?;
        if let Some(organization) = self.cli.organization.clone().none_if_empty() {
            config.organization = organization;
        }
        TursoClient::new(&config)
    }

    async fn run_database(&self, client: &TursoClient, command: &DatabaseCommands) -> Result<()> {
        match command {
            DatabaseCommands::List { group, schema } => {
                let databases = client
                    .list_databases(group.as_deref(), schema.as_deref())
                    .await?;
                self.print(&databases)
            }
            DatabaseCommands::Create {
                name,
                group,
                size_limit,
                is_schema,
                schema,
                seed_from,
                seed_timestamp,
                dump_url,
            } => {
                let mut request = CreateDatabaseRequest::new(checked_name(name)?, group);
                if *is_schema {
                    request = request.as_schema();
                }
                if let Some(schema) = schema {
                    request = request.with_schema(schema);
                }
                if let Some(limit) = size_limit {
                    parse_size_limit(limit)?;
                    request = request.with_size_limit(limit);
                }
                if let Some(source) = seed_from {
                    request = request.with_seed(match seed_timestamp {
                        Some(ts) => Seed::from_database_at(source, ts),
                        None => Seed::from_database(source),
                    });
                } else if let Some(url) = dump_url {
                    request = request.with_seed(Seed::from_dump(url));
                }
                self.print(&client.create_database(request).await?)
            }
            DatabaseCommands::Get { name } => self.print(&client.get_database(name).await?),
            DatabaseCommands::Delete { name } => {
                client.delete_database(name).await?;
                self.print(&json!({ "deleted": name }))
            }
            DatabaseCommands::Instances { name } => {
                self.print(&client.list_database_instances(name).await?)
            }
            DatabaseCommands::Instance { name, instance } => {
                self.print(&client.get_database_instance(name, instance).await?)
            }
            DatabaseCommands::Usage { name } => {
                let usage = client.database_usage(name).await?;
                if self.cli.format == OutputFormat::Pretty {
                    print_usage_summary(name, &usage);
                }
                self.print(&usage)
            }
            DatabaseCommands::Stats { name } => self.print(&client.database_stats(name).await?),
            DatabaseCommands::TopQueries { name } => {
                self.print(&client.database_top_queries(name).await?)
            }
            DatabaseCommands::UpdateVersion { name } => {
                client.update_database_version(name).await?;
                self.print(&json!({ "updated": name }))
            }
            DatabaseCommands::Config { name } => {
                self.print(&client.database_configuration(name).await?)
            }
            DatabaseCommands::Configure {
                name,
                allow_attach,
                block_reads,
                block_writes,
                size_limit,
            } => {
                if let Some(limit) = size_limit {
                    parse_size_limit(limit)?;
                }
                let config = DatabaseConfig {
                    allow_attach: *allow_attach,
                    block_reads: *block_reads,
                    block_writes: *block_writes,
                    size_limit: size_limit.clone(),
                };
                self.print(&client.update_database_configuration(name, config).await?)
            }
        }
    }

    async fn run_group(&self, client: &TursoClient, command: &GroupCommands) -> Result<()> {
        match command {
            GroupCommands::List => self.print(&client.list_groups().await?),
            GroupCommands::Create {
                name,
                location,
                extensions,
                version,
            } => {
                let mut request = CreateGroupRequest::new(checked_name(name)?, location);
                request.extensions = extensions.clone();
                request.version = version.clone();
                self.print(&client.create_group(request).await?)
            }
            GroupCommands::Get { name } => self.print(&client.get_group(name).await?),
            GroupCommands::Delete { name } => {
                client.delete_group(name).await?;
                self.print(&json!({ "deleted": name }))
            }
            GroupCommands::Update {
                name,
                version,
                extensions,
            } => {
                let request = UpdateGroupRequest {
                    version: version.clone(),
                    extensions: extensions.clone(),
                };
                self.print(&client.update_group(name, request).await?)
            }
            GroupCommands::AddLocation { name, location } => {
                self.print(&client.add_group_location(name, location).await?)
            }
            GroupCommands::RemoveLocation { name, location } => {
                self.print(&client.remove_group_location(name, location).await?)
            }
            GroupCommands::Transfer { name, organization } => {
                self.print(&client.transfer_group(name, organization).await?)
            }
            GroupCommands::Unarchive { name } => self.print(&client.unarchive_group(name).await?),
        }
    }

    async fn run_organization(
        &self,
        client: &TursoClient,
        command: &OrganizationCommands,
    ) -> Result<()> {
        match command {
            OrganizationCommands::List => self.print(&client.list_organizations().await?),
            OrganizationCommands::Get => self.print(&client.get_organization().await?),
            OrganizationCommands::Usage { from, to } => self.print(
                &client
                    .organization_usage(from.as_deref(), to.as_deref())
                    .await?,
            ),
        }
    }

    async fn run_member(&self, client: &TursoClient, command: &MemberCommands) -> Result<()> {
        match command {
            MemberCommands::List => self.print(&client.list_members().await?),
            MemberCommands::Add { username, role } => {
                let role: MemberRole = role.parse()?;
                self.print(&client.add_member(username, role).await?)
            }
            MemberCommands::UpdateRole { username, role } => {
                let role: MemberRole = role.parse()?;
                self.print(&client.update_member_role(username, role).await?)
            }
            MemberCommands::Remove { username } => {
                client.remove_member(username).await?;
                self.print(&json!({ "removed": username }))
            }
        }
    }

    async fn run_invite(&self, client: &TursoClient, command: &InviteCommands) -> Result<()> {
        match command {
            InviteCommands::List => self.print(&client.list_invites().await?),
            InviteCommands::Create { email, role } => {
                let role: MemberRole = role.parse()?;
                self.print(&client.create_invite(email, role).await?)
            }
            InviteCommands::Delete { email } => {
                client.delete_invite(email).await?;
                self.print(&json!({ "deleted": email }))
            }
        }
    }

    async fn run_api_token(&self, client: &TursoClient, command: &ApiTokenCommands) -> Result<()> {
        match command {
            ApiTokenCommands::List => self.print(&client.list_api_tokens().await?),
            ApiTokenCommands::Mint { name } => self.print(&client.mint_api_token(name).await?),
            ApiTokenCommands::Revoke { name } => {
                client.revoke_api_token(name).await?;
                self.print(&json!({ "revoked": name }))
            }
            ApiTokenCommands::Validate => self.print(&client.validate_api_token().await?),
        }
    }

    async fn run_database_token(
        &self,
        client: &TursoClient,
        command: &DatabaseTokenCommands,
    ) -> Result<()> {
        match command {
            DatabaseTokenCommands::List { database } => {
                self.print(&client.list_database_tokens(database).await?)
            }
            DatabaseTokenCommands::Create {
                database,
                expiration,
                authorization,
                attach,
            } => {
                let authorization = parse_authorization(authorization.as_deref())?;
                let permissions = if attach.is_empty() {
                    None
                } else {
                    Some(TokenPermissions::read_attach(attach.iter().cloned()))
                };
                self.print(
                    &client
                        .create_database_token(
                            database,
                            expiration.as_deref(),
                            authorization,
                            permissions,
                        )
                        .await?,
                )
            }
            DatabaseTokenCommands::Validate { database } => {
                self.print(&client.validate_database_token(database).await?)
            }
            DatabaseTokenCommands::Rotate { database } => {
                client.rotate_database_tokens(database).await?;
                self.print(&json!({ "rotated": database }))
            }
        }
    }

    async fn run_group_token(
        &self,
        client: &TursoClient,
        command: &GroupTokenCommands,
    ) -> Result<()> {
        match command {
            GroupTokenCommands::Create {
                group,
                expiration,
                authorization,
            } => {
                let authorization = parse_authorization(authorization.as_deref())?;
                self.print(
                    &client
                        .create_group_token(group, expiration.as_deref(), authorization)
                        .await?,
                )
            }
            GroupTokenCommands::Rotate { group } => {
                client.rotate_group_tokens(group).await?;
                self.print(&json!({ "rotated": group }))
            }
        }
    }

    async fn run_location(&self, client: &TursoClient, command: &LocationCommands) -> Result<()> {
        match command {
            LocationCommands::List => self.print(&client.list_locations().await?),
            LocationCommands::Closest => self.print(&client.closest_location().await?),
        }
    }

    async fn run_audit_log(&self, client: &TursoClient, command: &AuditLogCommands) -> Result<()> {
        match command {
            AuditLogCommands::List {
                page,
                per_page,
                all,
            } => {
                if *all {
                    self.print(&client.audit_logs().await?)
                } else {
                    self.print(&client.audit_logs_page(*page, *per_page).await?)
                }
            }
        }
    }

    async fn run_invoice(&self, client: &TursoClient, command: &InvoiceCommands) -> Result<()> {
        match command {
            InvoiceCommands::List => self.print(&client.list_invoices().await?),
            InvoiceCommands::Get { invoice_number } => {
                self.print(&client.get_invoice(invoice_number).await?)
            }
        }
    }

    async fn run_watch(
        &self,
        client: TursoClient,
        event: &str,
        state: Option<&std::path::Path>,
        interval: u64,
        once: bool,
    ) -> Result<()> {
        let event: WatchEvent = event.parse()?;
        let store = match state {
            Some(path) => SnapshotStore::from_file(path)?,
            None => {
                if !once {
                    warn!("no --state file given, a restart will re-seed the snapshot");
                }
                SnapshotStore::in_memory()
            }
        };

        let watcher = Watcher::new(client, store, event);

        if once {
            for event in watcher.poll().await? {
                self.print(&event)?;
            }
            return Ok(());
        }

        let format = self.cli.format;
        watcher
            .run(Duration::from_secs(interval), |event| {
                let line = match format {
                    OutputFormat::Json => serde_json::to_string(event),
                    OutputFormat::Pretty => serde_json::to_string_pretty(event),
                };
                match line {
                    Ok(line) => println!("{line}"),
                    Err(e) => warn!("failed to serialize event: {e}"),
                }
            })
            .await
    }

    /// Print a value in the configured output format
    fn print<T: Serialize>(&self, value: &T) -> Result<()> {
        let line = match self.cli.format {
            OutputFormat::Json => serde_json::to_string(value)?,
            OutputFormat::Pretty => serde_json::to_string_pretty(value)?,
        };
        println!("{line}");
        Ok(())
    }
}

/// Sanitize a user-supplied resource name, rejecting ones with nothing left
fn checked_name(name: &str) -> Result<String> {
    let sanitized = sanitize_name(name);
    if sanitized.is_empty() {
        return Err(Error::invalid_name(
            name,
            "no alphanumeric characters to build a name from",
        ));
    }
    if sanitized != name {
        warn!(input = name, used = %sanitized, "name sanitized");
    }
    Ok(sanitized)
}

fn parse_authorization(input: Option<&str>) -> Result<Option<TokenAuthorization>> {
    input.map(str::parse).transpose()
}

fn print_usage_summary(name: &str, usage: &DatabaseUsage) {
    println!(
        "{name}: {} read, {} written, {} stored across {} instance(s)",
        usage.total.rows_read,
        usage.total.rows_written,
        format_bytes(usage.total.storage_bytes),
        usage.instances.len()
    );
}
