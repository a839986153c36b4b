use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use tracing::info;

use peerlink::config::Config;
use peerlink::db::Database;
use peerlink::matching::RankingPreferences;

/// Peerlink: profile-overlap recommendations for a student mentorship platform.
///
/// Matches students to communities and peers by comparing their declared
/// skills, domains and goals.
#[derive(Parser)]
#[command(name = "peerlink", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize the database
    Init,

    /// Import users, communities, memberships and follows from a JSON file
    Import {
        /// Path to the fixture file
        file: PathBuf,
    },

    /// Print recommendations for a stored user
    Recommend {
        /// The user id to recommend for
        user_id: String,

        /// Number of communities to show (default: 3)
        #[arg(long, default_value = "3")]
        communities: usize,

        /// Number of users to show (default: 3)
        #[arg(long, default_value = "3")]
        users: usize,

        /// Preferred domain for the ranking bonus (repeatable)
        #[arg(long = "prefer")]
        prefer: Vec<String>,

        /// Also print the user's profile vector
        #[arg(long)]
        explain: bool,
    },

    /// Mint a session token for a stored user
    #[cfg(feature = "web")]
    Token {
        /// The user id the token authenticates as
        user_id: String,
    },

    /// Run the HTTP API
    #[cfg(feature = "web")]
    Serve {
        /// Port to listen on (default: 3000)
        #[arg(long, default_value = "3000")]
        port: u16,

        /// Address to bind (default: 0.0.0.0)
        #[arg(long, default_value = "0.0.0.0")]
        bind: String,
    },

    /// Show database status (path, tables, row counts)
    Status,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if missing)
    let _ = dotenvy::dotenv();

    // Set up structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("peerlink=info")),
        )
        .init();

    let cli = Cli::parse();
    let config = Config::load()?;

    match cli.command {
        Commands::Init => {
            info!("Initializing Peerlink database...");
            let db = peerlink::db::initialize_sqlite(&config.db_path)?;
            let table_count = db.table_count().await?;
            println!("Database initialized at: {}", config.db_path);
            println!("Tables created: {table_count}");
            println!("\nNext step: load profiles with `peerlink import <file.json>`");
        }

        Commands::Import { file } => {
            let db = peerlink::db::initialize_sqlite(&config.db_path)?;
            let fixtures = peerlink::pipeline::import::Fixtures::from_file(&file)?;
            let summary = peerlink::pipeline::import::import(db.as_ref(), &fixtures).await?;
            println!(
                "Imported {} users, {} communities, {} memberships, {} follows.",
                summary.users, summary.communities, summary.memberships, summary.follows
            );
        }

        Commands::Recommend {
            user_id,
            communities,
            users,
            prefer,
            explain,
        } => {
            let db = peerlink::db::open_sqlite(&config.db_path)?;
            let requester = db
                .get_user(&user_id)
                .await?
                .with_context(|| format!("No user with id {user_id}"))?;

            if explain {
                let vector = peerlink::profile::UserProfileVector::from_record(&requester);
                peerlink::output::terminal::display_profile_vector(&vector);
            }

            let prefs = (!prefer.is_empty()).then(|| RankingPreferences {
                preferred_domains: prefer,
                mode: config.domain_match,
            });

            let recs = peerlink::pipeline::recommend::recommend_personalized(
                db.as_ref(),
                &requester,
                communities,
                users,
                prefs.as_ref(),
            )
            .await?;

            peerlink::output::terminal::display_recommendations("Communities", &recs.communities);
            peerlink::output::terminal::display_recommendations("People", &recs.users);
        }

        #[cfg(feature = "web")]
        Commands::Token { user_id } => {
            config.require_web()?;
            let db = peerlink::db::open_sqlite(&config.db_path)?;
            if db.get_user(&user_id).await?.is_none() {
                anyhow::bail!("No user with id {user_id}");
            }
            println!(
                "{}",
                peerlink::web::auth::create_token(&config.session_secret, &user_id)
            );
        }

        #[cfg(feature = "web")]
        Commands::Serve { port, bind } => {
            config.require_web()?;
            let db = peerlink::db::initialize_sqlite(&config.db_path)?;
            peerlink::web::run_server(config, db, port, &bind).await?;
        }

        Commands::Status => {
            show_status(&config).await?;
        }
    }

    Ok(())
}

/// Display database status to the terminal.
async fn show_status(config: &Config) -> Result<()> {
    let path = std::path::Path::new(&config.db_path);
    if !path.exists() {
        println!("Database: not initialized");
        println!("\nRun `peerlink init` to set up the database.");
        return Ok(());
    }

    let file_size = std::fs::metadata(path)
        .map(|m| format!("{} KB", m.len() / 1024))
        .unwrap_or_else(|_| "unknown".to_string());
    println!("Database: {} ({})", config.db_path, file_size);

    let db: Arc<dyn Database> = peerlink::db::open_sqlite(&config.db_path)?;
    let stats = db.store_stats().await?;
    println!("Tables: {}", db.table_count().await?);
    println!(
        "Profiles: {} users, {} communities",
        stats.users, stats.communities
    );
    println!(
        "Relationships: {} memberships, {} follows",
        stats.memberships, stats.follows
    );

    if stats.users == 0 {
        println!(
            "{}",
            "No profiles yet. Run `peerlink import <file.json>`.".dimmed()
        );
    }
    Ok(())
}
