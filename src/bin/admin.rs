//! CLI administration tool for url-alias.
//!
//! Works directly on the JSON store file, without going through the HTTP
//! server. Safe to run while the server is up only if nothing is writing at
//! the same time: the server's lock is in-process.
//!
//! # Usage
//!
//! ```bash
//! # Print the code a URL would get
//! cargo run --bin admin -- code https://example.com
//!
//! # Add, look up, and remove entries
//! cargo run --bin admin -- add https://example.com
//! cargo run --bin admin -- get 327c3fda87
//! cargo run --bin admin -- remove 327c3fda87
//!
//! # Inspect the file
//! cargo run --bin admin -- list
//! cargo run --bin admin -- check
//! ```
//!
//! # Environment Variables
//!
//! - `STORE_FILE` - Store path when `--file` is not given (default: `Data.json`).
//!   Only `add` creates a missing file.
//! - `PUBLIC_BASE_URL` - Prefix for printed short URLs (default: `http://localhost:8080/r`)

use url_alias::application::services::AliasService;
use url_alias::config::{Config, ProbePolicy};
use url_alias::error::AppError;
use url_alias::infrastructure::persistence::FileAliasStore;
use url_alias::infrastructure::probe::NullProbe;
use url_alias::utils::code_generator::{derive_code, is_derived_shape};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::Confirm;
use std::sync::Arc;

type FileAliasService = AliasService<FileAliasStore, NullProbe>;

/// CLI tool for managing the url-alias store file.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Store file (overrides STORE_FILE)
    #[arg(short, long, global = true)]
    file: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

/// Top-level commands.
#[derive(Subcommand)]
enum Commands {
    /// Print the short code derived from a URL
    Code {
        /// Long URL
        url: String,
    },

    /// Store a URL without probing it
    Add {
        /// Long URL
        url: String,
    },

    /// Print the target of a short code
    Get {
        /// Short code
        code: String,
    },

    /// Remove a short code
    Remove {
        /// Short code
        code: String,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// List every entry in the store
    List,

    /// Check that the store file parses
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    if let Commands::Code { url } = &cli.command {
        println!("{}", derive_code(url));
        return Ok(());
    }

    let defaults = Config::default();
    let path = cli
        .file
        .or_else(|| std::env::var("STORE_FILE").ok())
        .unwrap_or(defaults.store_file);
    let base_url = std::env::var("PUBLIC_BASE_URL").unwrap_or(defaults.public_base_url);

    // Only `add` may create the file; read and delete commands fail on a
    // wrong path instead of leaving an empty store behind.
    let opened = match cli.command {
        Commands::Add { .. } => FileAliasStore::open(&path).await,
        _ => FileAliasStore::open_existing(&path).await,
    };
    let store = Arc::new(opened.with_context(|| format!("Failed to open store file {}", path))?);
    let service = AliasService::new(
        store.clone(),
        Arc::new(NullProbe::new()),
        base_url,
        ProbePolicy::Off,
    );

    match cli.command {
        Commands::Code { .. } => {}
        Commands::Add { url } => add_entry(&service, &url).await?,
        Commands::Get { code } => get_entry(&service, &code).await?,
        Commands::Remove { code, yes } => remove_entry(&service, &code, yes).await?,
        Commands::List => list_entries(&store).await?,
        Commands::Check => check_store(&store).await?,
    }

    Ok(())
}

/// Adds an entry and prints the short URL.
///
/// A URL that is already stored is reported, not treated as a failure.
async fn add_entry(service: &FileAliasService, url: &str) -> Result<()> {
    println!("{}", "➕ Add Short Link".bright_blue().bold());
    println!();

    match service.shorten(url).await {
        Ok(link) => {
            println!("  Code:      {}", link.code.bright_yellow().bold());
            println!("  Short URL: {}", link.short_url.cyan());
            println!("  Target:    {}", link.long_url.bright_black());
            println!();
            println!("{}", "✅ Short link created".green().bold());
        }
        Err(err @ AppError::Conflict { .. }) => {
            let info = err.to_error_info();
            println!("{}", format!("⚠️  {}", info.message).yellow());
            println!("  Code: {}", info.details["code"].as_str().unwrap_or("?").cyan());
        }
        Err(err) => return Err(anyhow::anyhow!("Failed to add link: {}", err)),
    }

    println!();
    Ok(())
}

/// Prints the target of a code.
async fn get_entry(service: &FileAliasService, code: &str) -> Result<()> {
    let target = service
        .resolve(code)
        .await
        .map_err(|e| anyhow::anyhow!("{}", e))?;

    println!("{}", target);
    Ok(())
}

/// Removes a code with confirmation prompt.
///
/// # Safety
///
/// - Requires confirmation (default: No) unless `--yes`
/// - Shows the target before asking
async fn remove_entry(service: &FileAliasService, code: &str, skip_confirm: bool) -> Result<()> {
    println!("{}", "🗑️  Remove Short Link".bright_blue().bold());
    println!();

    let target = service
        .resolve(code)
        .await
        .map_err(|e| anyhow::anyhow!("{}", e))?;

    println!("  Code:   {}", code.cyan());
    println!("  Target: {}", target.bright_black());
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Remove this link?")
            .default(false)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    service
        .revoke(code)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to remove link: {}", e))?;

    println!();
    println!("{}", "✅ Link removed".green().bold());
    println!();

    Ok(())
}

/// Lists all entries.
///
/// # Output Format
///
/// ```text
/// 📋 Short Links (Data.json)
///
///   Code        Target
///   ──────────────────────────────────────────────
///   327c3fda87  https://example.com
///   my-link     https://rust-lang.org            (custom)
/// ```
///
/// Codes that do not look like a derived code are flagged; they can only
/// come from hand edits of the file.
async fn list_entries(store: &FileAliasStore) -> Result<()> {
    println!(
        "{} {}",
        "📋 Short Links".bright_blue().bold(),
        format!("({})", store.path().display()).bright_black()
    );
    println!();

    let entries = store
        .entries()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to read store: {}", e))?;

    if entries.is_empty() {
        println!("{}", "  No links found".yellow());
        println!();
        return Ok(());
    }

    println!(
        "  {:<12} {}",
        "Code".bright_white().bold(),
        "Target".bright_white().bold()
    );
    println!("  {}", "─".repeat(60).bright_black());

    for entry in &entries {
        let marker = if is_derived_shape(&entry.code) {
            "".normal()
        } else {
            "(custom)".yellow()
        };

        println!("  {:<12} {} {}", entry.code.cyan(), entry.target, marker);
    }

    println!();
    println!(
        "  Total: {}",
        entries.len().to_string().bright_white().bold()
    );
    println!();

    Ok(())
}

/// Parses the store file and reports its version and size.
async fn check_store(store: &FileAliasStore) -> Result<()> {
    println!("{}", "🔍 Checking store file...".bright_blue());

    let version = store
        .version()
        .await
        .map_err(|e| anyhow::anyhow!("Store file is not usable: {}", e))?;
    let entries = store
        .entries()
        .await
        .map_err(|e| anyhow::anyhow!("Store file is not usable: {}", e))?;

    println!("{}", "✅ Store file OK".green().bold());
    println!("  Path:    {}", store.path().display().to_string().bright_white());
    println!("  Version: {}", version.bright_white());
    println!(
        "  Entries: {}",
        entries.len().to_string().bright_green().bold()
    );

    Ok(())
}
