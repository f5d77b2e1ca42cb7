//! CLI entry and dispatch.

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use lifeguide_core::config;
use lifeguide_core::logging;
use lifeguide_core::preferences::ThemeMode;
use lifeguide_core::scope::ViewScope;

mod commands;

#[derive(Parser)]
#[command(name = "lifeguide")]
#[command(version)]
#[command(about = "Browse Lifeguide topics and manage bookmarks")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Sign in with the redirect URL or session id from the identity provider
    Login {
        /// Session id to exchange
        #[arg(long, value_name = "ID", conflicts_with = "url")]
        session_id: Option<String>,
        /// Redirect URL containing the session id
        #[arg(long, value_name = "URL")]
        url: Option<String>,
    },
    /// Sign out and forget the stored session
    Logout,
    /// Show the signed-in user
    Whoami,

    /// List topic categories
    Categories,
    /// Show a category and its topics
    Category {
        #[arg(value_name = "SLUG")]
        slug: String,
    },
    /// Show a topic (falls back to the offline copy)
    Topic {
        #[arg(value_name = "TOPIC_ID")]
        id: String,
    },
    /// Search topics
    Search {
        #[arg(value_name = "QUERY", required_unless_present = "interactive")]
        query: Option<String>,
        /// Read queries from stdin, one per line, and search once typing pauses
        #[arg(short, long, conflicts_with = "query")]
        interactive: bool,
    },
    /// Search videos
    Videos {
        #[arg(value_name = "QUERY")]
        query: String,
    },

    /// Manage bookmarks
    Bookmarks {
        #[command(subcommand)]
        command: BookmarkCommands,
    },

    /// Show or change the theme mode
    Theme {
        #[command(subcommand)]
        command: Option<ThemeCommands>,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(clap::Subcommand)]
enum BookmarkCommands {
    /// List bookmarks (falls back to the offline copy)
    List,
    /// Bookmark a topic
    Add {
        #[arg(value_name = "TOPIC_ID")]
        topic_id: String,
    },
    /// Remove a bookmark
    Remove {
        #[arg(value_name = "TOPIC_ID")]
        topic_id: String,
    },
}

#[derive(clap::Subcommand)]
enum ThemeCommands {
    /// Print the current theme mode
    Get,
    /// Set the theme mode (light, dark, system)
    Set {
        #[arg(value_name = "MODE")]
        mode: ThemeMode,
    },
}

#[derive(clap::Subcommand)]
enum ConfigCommands {
    /// Show the path to the config file
    Path,
    /// Initialize a default config file (if not present)
    Init,
    /// Generate a fresh config from Rust defaults (for xtask)
    Generate,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    // Logging is best effort; a read-only home must not block the CLI.
    let _log_guard = logging::init().ok();

    // one tokio runtime for everything
    let rt = tokio::runtime::Runtime::new().context("create tokio runtime")?;

    let result = rt.block_on(async move {
        // Ctrl-C closes the scope; an in-flight request is dropped, not applied.
        let scope = ViewScope::new();
        let closer = scope.closer();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                closer.cancel();
            }
        });

        scope
            .run(dispatch(cli))
            .await
            .unwrap_or_else(|| Err(anyhow!("Interrupted.")))
    });

    // A stdin read cannot be cancelled; do not wait for it on the way out.
    rt.shutdown_background();
    result
}

async fn dispatch(cli: Cli) -> Result<()> {
    let config = config::Config::load().context("load config")?;

    match cli.command {
        Commands::Login { session_id, url } => {
            commands::auth::login(&config, session_id.as_deref(), url.as_deref()).await
        }
        Commands::Logout => commands::auth::logout(&config).await,
        Commands::Whoami => commands::auth::whoami(&config).await,

        Commands::Categories => commands::catalog::categories(&config).await,
        Commands::Category { slug } => commands::catalog::category(&config, &slug).await,
        Commands::Topic { id } => commands::catalog::topic(&config, &id).await,
        Commands::Search { query, interactive } => match query {
            Some(query) if !interactive => commands::catalog::search(&config, &query).await,
            _ => commands::catalog::search_interactive(&config).await,
        },
        Commands::Videos { query } => commands::catalog::videos(&config, &query).await,

        Commands::Bookmarks { command } => match command {
            BookmarkCommands::List => commands::bookmarks::list(&config).await,
            BookmarkCommands::Add { topic_id } => commands::bookmarks::add(&config, &topic_id).await,
            BookmarkCommands::Remove { topic_id } => {
                commands::bookmarks::remove(&config, &topic_id).await
            }
        },

        Commands::Theme { command } => match command.unwrap_or(ThemeCommands::Get) {
            ThemeCommands::Get => commands::theme::get(),
            ThemeCommands::Set { mode } => commands::theme::set(mode),
        },

        Commands::Config { command } => match command {
            ConfigCommands::Path => {
                commands::config::path();
                Ok(())
            }
            ConfigCommands::Init => commands::config::init(),
            ConfigCommands::Generate => commands::config::generate(),
        },
    }
}
