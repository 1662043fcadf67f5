/// Encore - music preview player
use clap::{Parser, Subcommand};
use encore_cli::{commands, AppConfig};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "encore")]
#[command(about = "Play catalog previews and manage favorites", long_about = None)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true, env = "ENCORE_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a catalog with the simulated backend
    Play {
        /// JSON file holding an array of tracks
        #[arg(long)]
        catalog: PathBuf,
        /// Queue position to start from
        #[arg(long, default_value_t = 0)]
        index: usize,
        /// How long to keep playing before shutting down
        #[arg(long, default_value_t = 30)]
        seconds: u64,
    },
    /// Manage favorites
    Favorites {
        #[command(subcommand)]
        command: FavoritesCommands,
    },
}

#[derive(Subcommand)]
enum FavoritesCommands {
    /// List all favorites
    List,
    /// Add or remove a catalog track
    Toggle {
        /// JSON file holding an array of tracks
        #[arg(long)]
        catalog: PathBuf,
        /// Track id
        #[arg(long)]
        id: u64,
    },
    /// Remove a favorite by id
    Remove {
        /// Track id
        #[arg(long)]
        id: u64,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = AppConfig::load(cli.config.as_deref())?;
    config.validate()?;

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.logging.filter.as_str().into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::debug!(data_dir = %config.storage.data_dir.display(), "Configuration loaded");

    match cli.command {
        Commands::Play {
            catalog,
            index,
            seconds,
        } => commands::play(&config, &catalog, index, seconds).await?,
        Commands::Favorites { command } => match command {
            FavoritesCommands::List => commands::favorites_list(&config).await?,
            FavoritesCommands::Toggle { catalog, id } => {
                commands::favorites_toggle(&config, &catalog, id).await?;
            }
            FavoritesCommands::Remove { id } => commands::favorites_remove(&config, id).await?,
        },
    }

    Ok(())
}
