//! institute-authz - administration CLI
//!
//! # Configuration
//!
//! Loaded from `--config <file>` when given, otherwise from the environment
//! (`DATABASE_URL`, `AUDIT_RETENTION_DAYS`, `LOG_LEVEL`, ...). A `.env` file in
//! the working directory is read first.
//!
//! Privileged commands act as the identity given with `--as-user-id`,
//! `--as-username` and `--as-role`; that identity is logged in, checked and
//! audited exactly as an interactive user would be.

#![allow(missing_docs)]

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use futures::TryStreamExt;
use institute_authz::authz::audit::retention_cutoff;
use institute_authz::authz::catalog::BootstrapReport;
use institute_authz::storage::StorageLayer;
use institute_authz::utils::clock::Clock;
use institute_authz::utils::logging::init_logging;
use institute_authz::utils::truncate_string;
use institute_authz::{AuditFilter, AuthenticatedUser, AuthzSystem, Config};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::info;

/// Role and audit administration for institute management
#[derive(Parser, Debug)]
#[command(name = "institute-authz")]
#[command(version, about, long_about = None)]
struct Cli {
    /// YAML configuration file
    #[arg(short, long, env = "INSTITUTE_AUTHZ_CONFIG")]
    config: Option<PathBuf>,

    /// Override the configured database URL
    #[arg(long)]
    database_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create or upgrade the schema
    Migrate,
    /// Install the default permission catalog and system roles
    Seed,
    /// List the permission catalog by category
    Permissions,
    /// List roles and their permissions
    Roles,
    /// Inspect or clean up the audit ledger
    Audit {
        #[command(subcommand)]
        command: AuditCommand,
    },
}

#[derive(Subcommand, Debug)]
enum AuditCommand {
    /// Print entries, newest first
    List {
        #[command(flatten)]
        identity: Identity,
        /// Only entries by this username
        #[arg(long)]
        actor: Option<String>,
        /// Only entries with this action code
        #[arg(long)]
        action: Option<String>,
        /// Only entries from the last N days
        #[arg(long)]
        since_days: Option<u32>,
        /// Case-insensitive text search
        #[arg(long)]
        search: Option<String>,
        /// Maximum number of entries
        #[arg(long, default_value_t = 50)]
        limit: u64,
    },
    /// Remove entries older than the retention period
    Purge {
        #[command(flatten)]
        identity: Identity,
        /// Age in days; defaults to `audit.retention_days`
        #[arg(long)]
        days: Option<u32>,
    },
}

/// Identity the command acts as
#[derive(Args, Debug)]
struct Identity {
    #[arg(long = "as-user-id")]
    user_id: i32,
    #[arg(long = "as-username")]
    username: String,
    #[arg(long = "as-role")]
    role: String,
}

impl From<Identity> for AuthenticatedUser {
    fn from(identity: Identity) -> Self {
        AuthenticatedUser::new(identity.user_id, identity.username, identity.role)
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn load_config(cli: &Cli) -> Result<Config> {
    dotenvy::dotenv().ok();

    let mut config = match &cli.config {
        Some(path) => Config::from_file(path)
            .await
            .with_context(|| format!("loading {}", path.display()))?,
        None => Config::from_env().context("loading configuration from environment")?,
    };

    if let Some(url) = &cli.database_url {
        config.settings.storage.database.url = url.clone();
        config.validate()?;
    }
    Ok(config)
}

async fn run(cli: Cli) -> Result<()> {
    let config = load_config(&cli).await?;
    init_logging(config.logging())?;

    match cli.command {
        Command::Migrate => {
            let storage = StorageLayer::new(config.storage()).await?;
            storage.migrate().await?;
            println!("Schema is up to date");
        }
        Command::Seed => {
            let (_authz, report) = AuthzSystem::start(&config).await?;
            print_report(&report);
        }
        Command::Permissions => {
            let (authz, _) = AuthzSystem::start(&config).await?;
            for group in authz.catalog.list_grouped().await? {
                println!("-- {} --", group.category);
                for permission in group.permissions {
                    println!("  {:<24} {}", permission.code, permission.name);
                }
            }
        }
        Command::Roles => {
            let (authz, _) = AuthzSystem::start(&config).await?;
            for role in authz.roles.list_all().await? {
                let marker = if role.is_system_role { " [system]" } else { "" };
                println!("{} ({}){}", role.code, role.name, marker);
                for permission in &role.permissions {
                    println!("  {}", permission.code);
                }
            }
        }
        Command::Audit { command } => {
            let (authz, _) = AuthzSystem::start(&config).await?;
            run_audit(&authz, &config, command).await?;
        }
    }

    Ok(())
}

async fn run_audit(authz: &AuthzSystem, config: &Config, command: AuditCommand) -> Result<()> {
    match command {
        AuditCommand::List {
            identity,
            actor,
            action,
            since_days,
            search,
            limit,
        } => {
            let session = authz.sessions.login(identity.into()).await?;

            let filter = AuditFilter {
                actor,
                action,
                from: since_days.map(|days| retention_cutoff(authz.clock.now(), days)),
                search,
                limit: Some(limit),
                ..AuditFilter::default()
            };

            let mut entries = authz.admin.audit_entries(&session, filter)?;
            while let Some(entry) = entries.try_next().await? {
                println!(
                    "{}  {:<16} {:<22} {} {}",
                    entry.timestamp.format("%Y-%m-%d %H:%M:%S"),
                    entry.actor_username,
                    entry.action,
                    entry.entity_type.as_deref().unwrap_or("-"),
                    truncate_string(entry.details.as_deref().unwrap_or(""), 80)
                );
            }

            authz.sessions.logout().await;
        }
        AuditCommand::Purge { identity, days } => {
            let session = authz.sessions.login(identity.into()).await?;
            let days = days.unwrap_or(config.audit().retention_days);

            let removed = authz.admin.purge_audit_older_than(&session, days).await?;
            info!("Audit cleanup finished");
            println!("Removed {} entries older than {} days", removed, days);

            authz.sessions.logout().await;
        }
    }
    Ok(())
}

fn print_report(report: &BootstrapReport) {
    println!(
        "Catalog holds {} permissions; {} system roles synchronised",
        report.permissions, report.system_roles
    );
    for code in &report.unknown_implication_codes {
        println!("warning: implication table references unknown permission {}", code);
    }
}
