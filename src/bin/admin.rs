//! CLI administration tool for partner-embed.
//!
//! Manages workspace API tokens, inspects embed tokens and performs database
//! checks without going through the HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # Create a new API token for a workspace
//! cargo run --bin admin -- token create --workspace ws_123
//!
//! # List all tokens
//! cargo run --bin admin -- token list
//!
//! # Revoke a token
//! cargo run --bin admin -- token revoke "Reporting"
//!
//! # Show what an embed token resolves to
//! cargo run --bin admin -- embed inspect 3f9a...
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! Reads the same variables as the server (`DATABASE_URL`, `REDIS_URL`,
//! `TOKEN_SIGNING_SECRET`, ...).

use partner_embed::application::services::{EmbedService, hash_api_token};
use partner_embed::config::{self, Config};
use partner_embed::domain::entities::EmbedLookup;
use partner_embed::domain::repositories::ApiTokenRepository;
use partner_embed::infrastructure::persistence::{PgApiTokenRepository, PgLinkRepository};
use partner_embed::infrastructure::token_store::RedisEmbedTokenStore;
use partner_embed::utils::pretty_url::pretty_url;

use anyhow::{Context, Result, bail};
use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::{Confirm, Input};
use sqlx::PgPool;
use std::sync::Arc;

/// CLI tool for managing partner-embed.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage workspace API tokens
    Token {
        #[command(subcommand)]
        action: TokenAction,
    },

    /// Inspect embed tokens
    Embed {
        #[command(subcommand)]
        action: EmbedAction,
    },

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

#[derive(Subcommand)]
enum TokenAction {
    /// Create a new API token
    Create {
        /// Workspace the token grants access to
        #[arg(short, long)]
        workspace: Option<String>,

        /// Token name (e.g., "Reporting", "Partner portal")
        #[arg(short, long)]
        name: Option<String>,

        /// Custom token value (optional, auto-generated if not provided)
        #[arg(short, long)]
        token: Option<String>,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// List all tokens
    List,

    /// Revoke a token
    Revoke {
        /// Token name or ID to revoke
        name_or_id: String,
    },
}

#[derive(Subcommand)]
enum EmbedAction {
    /// Resolve an embed token and print the dashboard data
    Inspect {
        /// Embed token (prompted if omitted)
        token: Option<String>,
    },
}

#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,

    /// Show database info
    Info,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = config::load_from_env()?;

    let pool = PgPool::connect(&config.database_url)
        .await
        .context("Failed to connect to database")?;

    match cli.command {
        Commands::Token { action } => handle_token_action(action, &pool, &config).await?,
        Commands::Embed { action } => handle_embed_action(action, &pool, &config).await?,
        Commands::Db { action } => handle_db_action(action, &pool).await?,
    }

    Ok(())
}

async fn handle_token_action(action: TokenAction, pool: &PgPool, config: &Config) -> Result<()> {
    let repo = Arc::new(PgApiTokenRepository::new(Arc::new(pool.clone())));

    match action {
        TokenAction::Create {
            workspace,
            name,
            token,
            yes,
        } => create_token(repo, config, workspace, name, token, yes).await,
        TokenAction::List => list_tokens(repo).await,
        TokenAction::Revoke { name_or_id } => revoke_token(repo, name_or_id).await,
    }
}

/// Creates a workspace API token.
///
/// Only the HMAC of the token is stored; the raw value is shown once.
async fn create_token(
    repo: Arc<PgApiTokenRepository>,
    config: &Config,
    workspace: Option<String>,
    name: Option<String>,
    token: Option<String>,
    skip_confirm: bool,
) -> Result<()> {
    println!("{}", "Create API Token".bright_blue().bold());
    println!();

    let workspace_id = match workspace {
        Some(w) => w,
        None => Input::new().with_prompt("Workspace ID").interact_text()?,
    };

    let token_name = match name {
        Some(n) => n,
        None => Input::new()
            .with_prompt("Token name")
            .with_initial_text("Reporting")
            .interact_text()?,
    };

    let token_value = match token {
        Some(t) => {
            println!("{}", "Using provided token value".yellow());
            t
        }
        None => generate_token(),
    };

    println!();
    println!("{}", "Token details:".bright_white().bold());
    println!("  Workspace: {}", workspace_id.cyan());
    println!("  Name:      {}", token_name.cyan());
    println!("  Token:     {}", token_value.bright_yellow().bold());
    println!();
    println!(
        "{}",
        "Save this token now; it cannot be shown again.".red().bold()
    );
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Create this token?")
            .default(true)
            .interact()?;

        if !confirmed {
            println!("{}", "Cancelled".red());
            return Ok(());
        }
    }

    let token_hash = hash_api_token(&config.token_signing_secret, &token_value);

    repo.create_token(&workspace_id, &token_name, &token_hash)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to create token: {}", e))?;

    println!("{}", "Token created".green().bold());
    println!();
    println!(
        "  curl -H \"Authorization: Bearer {}\" http://{}/api/links/count",
        token_value.bright_yellow(),
        config.listen_addr
    );
    println!();

    Ok(())
}

async fn list_tokens(repo: Arc<PgApiTokenRepository>) -> Result<()> {
    println!("{}", "API Tokens".bright_blue().bold());
    println!();

    let tokens = repo
        .list_tokens()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to list tokens: {}", e))?;

    if tokens.is_empty() {
        println!("{}", "  No tokens found".yellow());
        return Ok(());
    }

    println!(
        "  {:<5} {:<24} {:<20} {:<17} {:<10}",
        "ID".bright_white().bold(),
        "Name".bright_white().bold(),
        "Workspace".bright_white().bold(),
        "Last used".bright_white().bold(),
        "Status".bright_white().bold()
    );
    println!("  {}", "-".repeat(80).bright_black());

    for token in &tokens {
        let status = if token.is_revoked() {
            "REVOKED".red()
        } else {
            "ACTIVE".green()
        };
        let last_used = token
            .last_used_at
            .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_else(|| "never".to_string());

        println!(
            "  {:<5} {:<24} {:<20} {:<17} {}",
            token.id.to_string().bright_black(),
            token.name.cyan(),
            token.workspace_id,
            last_used.bright_black(),
            status
        );
    }

    println!();
    println!("  Total: {}", tokens.len().to_string().bright_white().bold());

    Ok(())
}

/// Revokes a token by numeric ID or exact name.
async fn revoke_token(repo: Arc<PgApiTokenRepository>, name_or_id: String) -> Result<()> {
    let token = match name_or_id.parse::<i64>() {
        Ok(id) => repo.find_by_id(id).await,
        Err(_) => repo.find_by_name(&name_or_id).await,
    }
    .map_err(|e| anyhow::anyhow!("Database error: {}", e))?
    .context("Token not found")?;

    if token.is_revoked() {
        println!("{}", "This token is already revoked".yellow());
        return Ok(());
    }

    println!("  Token:     {}", token.name.cyan());
    println!("  Workspace: {}", token.workspace_id);
    println!();

    let confirmed = Confirm::new()
        .with_prompt("Revoke this token?")
        .default(false)
        .interact()?;

    if !confirmed {
        println!("{}", "Cancelled".red());
        return Ok(());
    }

    repo.revoke_token(token.id)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to revoke token: {}", e))?;

    println!("{}", "Token revoked".green().bold());

    Ok(())
}

async fn handle_embed_action(action: EmbedAction, pool: &PgPool, config: &Config) -> Result<()> {
    match action {
        EmbedAction::Inspect { token } => inspect_embed(pool, config, token).await,
    }
}

/// Runs the same lookup the embed endpoint does and prints the result.
async fn inspect_embed(pool: &PgPool, config: &Config, token: Option<String>) -> Result<()> {
    let Some(redis_url) = &config.redis_url else {
        bail!("REDIS_URL must be set to inspect embed tokens");
    };

    let token = match token {
        Some(t) => t,
        None => Input::new().with_prompt("Embed token").interact_text()?,
    };

    let store = RedisEmbedTokenStore::connect(redis_url, &config.embed_token_prefix).await?;
    let service = EmbedService::new(
        Arc::new(store),
        Arc::new(PgLinkRepository::new(Arc::new(pool.clone()))),
        config.store_timeouts(),
    );

    match service.get_embed_data(&token).await? {
        EmbedLookup::Found(data) => {
            println!("{}", "Embed data".bright_blue().bold());
            println!();
            println!("  Link:       {}", pretty_url(&data.link.short_link).cyan());
            println!("  Target:     {}", data.link.url);
            println!(
                "  Program:    {} ({})",
                data.program.name.cyan(),
                data.program.slug.bright_black()
            );
            println!(
                "  Commission: {} {}",
                data.program.commission_amount, data.program.commission_type
            );
            println!(
                "  Stats:      {} clicks, {} leads, {} sales, {} sale amount",
                data.link.clicks, data.link.leads, data.link.sales, data.link.sale_amount
            );
            println!(
                "  Earnings:   {}",
                format!("{:.2}", data.earnings).bright_green().bold()
            );
            println!("  Partner profile: {}", data.has_partner_profile);
        }
        EmbedLookup::NotFound(reason) => {
            println!("{} ({})", "Embed not found".yellow(), reason.as_str());
        }
    }

    Ok(())
}

async fn handle_db_action(action: DbAction, pool: &PgPool) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "Checking database connection...".bright_blue());

            sqlx::query("SELECT 1").fetch_one(pool).await?;

            println!("{}", "Database connection OK".green().bold());
        }
        DbAction::Info => {
            let version: String = sqlx::query_scalar("SELECT version()")
                .fetch_one(pool)
                .await?;
            let links: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM links")
                .fetch_one(pool)
                .await?;
            let programs: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM programs")
                .fetch_one(pool)
                .await?;

            println!("  PostgreSQL: {}", version.bright_white());
            println!("  Links:      {}", links.to_string().bright_green());
            println!("  Programs:   {}", programs.to_string().bright_green());
        }
    }

    Ok(())
}

/// Generates a random API token: 32 bytes, URL-safe base64 without padding.
fn generate_token() -> String {
    let bytes: [u8; 32] = rand::random();
    URL_SAFE_NO_PAD.encode(bytes)
}
