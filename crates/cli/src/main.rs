//! Lull CLI - lull command

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::{warn, Level};

mod cmd;
mod config;
mod util;

/// Lull - debounced editing for stored entities
#[derive(Parser)]
#[command(name = "lull")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Store directory
    #[arg(long, global = true, default_value = ".lull")]
    store: PathBuf,

    /// Log at debug level regardless of config
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new entity
    New {
        /// Entity title
        #[arg(long, default_value = "")]
        title: String,
        /// Entity description
        #[arg(long, default_value = "")]
        description: String,
    },
    /// List entities, most recently edited first
    List,
    /// Print an entity as JSON
    Show {
        /// Entity ID
        id: String,
    },
    /// Edit an entity with commands read from stdin
    Edit {
        /// Entity ID
        id: String,
        /// User recorded with each save
        #[arg(long)]
        user: Option<String>,
        /// At end of input, wait for the pending save instead of dropping it
        #[arg(long)]
        settle: bool,
    },
    /// View or change configuration
    Config {
        /// List all values
        #[arg(long)]
        list: bool,
        /// Print one value (e.g. sync.debounce_ms)
        #[arg(long, value_name = "KEY")]
        get: Option<String>,
        /// Set one value
        #[arg(long, num_args = 2, value_names = ["KEY", "VALUE"])]
        set: Option<Vec<String>>,
        /// Print the config file path
        #[arg(long)]
        path: bool,
        /// Print an example config file
        #[arg(long)]
        example: bool,
    },
}

fn init_tracing(level: Level) {
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Only `edit` fails on an invalid config file
    let loaded = config::load(&cli.store);
    let level = match &loaded {
        _ if cli.verbose => Level::DEBUG,
        Ok(config) => config.log_level().unwrap_or(Level::INFO),
        Err(_) => Level::INFO,
    };
    init_tracing(level);
    if let Err(err) = &loaded {
        warn!("{:#}", err);
    }

    match cli.command {
        Commands::New { title, description } => {
            cmd::new::run(&cli.store, &title, &description).await
        }
        Commands::List => cmd::list::run(&cli.store).await,
        Commands::Show { id } => cmd::show::run(&cli.store, &id).await,
        Commands::Edit { id, user, settle } => {
            let config = loaded?;
            cmd::edit::run(&cli.store, &id, user, settle, &config).await
        }
        Commands::Config { list, get, set, path, example } => {
            if let Some(pair) = set {
                cmd::config::run_set(&cli.store, &pair[0], &pair[1]).await
            } else if let Some(key) = get {
                cmd::config::run_get(&cli.store, &key).await
            } else if list {
                cmd::config::run_list(&cli.store).await
            } else if path {
                cmd::config::run_path(&cli.store).await
            } else if example {
                cmd::config::run_example().await
            } else {
                cmd::config::run_default(&cli.store).await
            }
        }
    }
}
