//! CLI administration tool for shortener-service.
//!
//! Provides commands for inspecting and creating short URL mappings and
//! performing database operations without going through the HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # Check database connection
//! cargo run --bin admin -- db check
//!
//! # Apply migrations
//! cargo run --bin admin -- db init
//!
//! # Show a mapping
//! cargo run --bin admin -- link show aB3xZ
//!
//! # Shorten a URL
//! cargo run --bin admin -- link shorten https://example.com -y
//!
//! # View statistics
//! cargo run --bin admin -- stats
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` or `DB_*` components (required): PostgreSQL connection
//! - `SERVICE_DOMAIN`, `PUBLIC_PROTOCOL`, `SHORT_PATH_LENGTH`: used by `link shorten`

use shortener_service::application::services::{ShortenerService, ShortenerSettings};
use shortener_service::config::Config;
use shortener_service::domain::repositories::UrlMappingRepository;
use shortener_service::infrastructure::persistence::{MIGRATOR, PgUrlMappingRepository};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::{Confirm, Input};
use sqlx::PgPool;
use std::sync::Arc;

/// CLI tool for managing shortener-service.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level command groups.
#[derive(Subcommand)]
enum Commands {
    /// Inspect or create short URL mappings
    Link {
        #[command(subcommand)]
        action: LinkAction,
    },

    /// Show statistics
    Stats,

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

/// Mapping subcommands.
#[derive(Subcommand)]
enum LinkAction {
    /// Show the long URL and visit count of a short path
    Show {
        /// Short URL path, e.g. "aB3xZ"
        short_url_path: String,
    },

    /// Shorten a URL (reuses the existing mapping if there is one)
    Shorten {
        /// Long URL (prompted for when omitted)
        url: Option<String>,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,

    /// Show database info
    Info,

    /// Apply pending migrations
    Init,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let database_url = Config::load_database_url().context("Database is not configured")?;

    let pool = PgPool::connect(&database_url)
        .await
        .context("Failed to connect to database")?;

    match cli.command {
        Commands::Link { action } => handle_link_action(action, &pool).await?,
        Commands::Stats => handle_stats(&pool).await?,
        Commands::Db { action } => handle_db_action(action, &pool).await?,
    }

    Ok(())
}

/// Dispatches mapping commands.
async fn handle_link_action(action: LinkAction, pool: &PgPool) -> Result<()> {
    let repo = Arc::new(PgUrlMappingRepository::new(Arc::new(pool.clone())));

    match action {
        LinkAction::Show { short_url_path } => show_link(repo, short_url_path).await?,
        LinkAction::Shorten { url, yes } => shorten_link(repo, url, yes).await?,
    }

    Ok(())
}

/// Prints a single mapping.
async fn show_link(repo: Arc<PgUrlMappingRepository>, short_url_path: String) -> Result<()> {
    println!("{}", "🔗 Short URL".bright_blue().bold());
    println!();

    let mapping = repo
        .find_by_path(&short_url_path)
        .await
        .map_err(|e| anyhow::anyhow!("Database error: {}", e))?
        .with_context(|| format!("Short URL path '{short_url_path}' not found"))?;

    println!("  Path:     {}", mapping.short_url_path.cyan());
    println!("  Long URL: {}", mapping.long_url.bright_white());
    println!(
        "  Visits:   {}",
        mapping.visits.to_string().bright_green().bold()
    );
    println!();

    Ok(())
}

/// Shortens a URL with interactive prompts.
///
/// # Flow
///
/// 1. Prompt for the long URL (or use provided)
/// 2. Confirm (unless `--yes` flag)
/// 3. Create the mapping or reuse the existing one
/// 4. Print the full short URL
async fn shorten_link(
    repo: Arc<PgUrlMappingRepository>,
    url: Option<String>,
    skip_confirm: bool,
) -> Result<()> {
    println!("{}", "✂️  Shorten URL".bright_blue().bold());
    println!();

    let settings = shortener_settings_from_env()?;

    let long_url = match url {
        Some(u) => u,
        None => Input::new()
            .with_prompt("Long URL")
            .with_initial_text("https://")
            .interact_text()?,
    };

    println!("  Long URL: {}", long_url.cyan());
    println!(
        "  Domain:   {}",
        format!("{}://{}", settings.protocol, settings.domain).bright_black()
    );
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Create short URL?")
            .default(true)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    let service = ShortenerService::new(repo, settings);
    let short_url = service
        .generate_short_url(&long_url)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to shorten URL: {}", e))?;

    println!();
    println!("{}", "✅ Short URL ready!".green().bold());
    println!("  {}", short_url.bright_yellow().bold());
    println!();

    Ok(())
}

/// Reads the public address settings the service itself would use.
fn shortener_settings_from_env() -> Result<ShortenerSettings> {
    let domain = std::env::var("SERVICE_DOMAIN").context("SERVICE_DOMAIN must be set")?;
    let protocol = std::env::var("PUBLIC_PROTOCOL").unwrap_or_else(|_| "https".to_string());
    let mut settings = ShortenerSettings::new(protocol, domain);

    if let Ok(raw) = std::env::var("SHORT_PATH_LENGTH") {
        let length: usize = raw
            .parse()
            .with_context(|| format!("Invalid SHORT_PATH_LENGTH '{raw}'"))?;
        settings = settings.with_path_length(length);
    }

    Ok(settings)
}

/// Displays mapping statistics.
///
/// Shows:
/// - Total number of mappings
/// - Total number of visits
async fn handle_stats(pool: &PgPool) -> Result<()> {
    println!("{}", "📊 Statistics".bright_blue().bold());
    println!();

    let mappings_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM url_mappings")
        .fetch_one(pool)
        .await?;

    let visits_total: i64 =
        sqlx::query_scalar("SELECT COALESCE(SUM(visits), 0)::BIGINT FROM url_mappings")
            .fetch_one(pool)
            .await?;

    println!(
        "  Short URLs: {}",
        mappings_count.to_string().bright_green().bold()
    );
    println!(
        "  Visits:     {}",
        visits_total.to_string().bright_green().bold()
    );
    println!();

    Ok(())
}

/// Handles database diagnostic commands.
async fn handle_db_action(action: DbAction, pool: &PgPool) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "🔍 Checking database connection...".bright_blue());

            sqlx::query("SELECT 1").fetch_one(pool).await?;

            println!("{}", "✅ Database connection OK".green().bold());
        }
        DbAction::Info => {
            println!("{}", "ℹ️  Database Information".bright_blue().bold());
            println!();

            let version: String = sqlx::query_scalar("SELECT version()")
                .fetch_one(pool)
                .await?;

            let applied: i64 = sqlx::query_scalar(
                "SELECT COUNT(*) FROM _sqlx_migrations WHERE success",
            )
            .fetch_one(pool)
            .await
            .unwrap_or(0);

            println!("  PostgreSQL: {}", version.bright_white());
            println!(
                "  Migrations: {}/{} applied",
                applied.to_string().bright_white(),
                MIGRATOR.iter().count()
            );
            println!();
        }
        DbAction::Init => {
            println!("{}", "🛠️  Applying migrations...".bright_blue());

            MIGRATOR
                .run(pool)
                .await
                .context("Failed to apply migrations")?;

            println!("{}", "✅ Schema is up to date".green().bold());
        }
    }

    Ok(())
}
