use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use genr_application::SessionGate;
use genr_core::collection::CollectionKind;
use genr_core::workflow::{ComponentKind, StepKind};
use genr_infrastructure::{ConfigService, GenrPaths, JsonFileStore};
use genr_interaction::gateway_from_config;
use tracing::debug;

mod commands;
mod logging;

#[derive(Parser)]
#[command(name = "genr")]
#[command(about = "GenR - chat-assisted builder for text-to-music prompts", long_about = None)]
struct Cli {
    /// Configuration file (default: ~/.config/genr/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Key-value store file, overrides `storage.path` from the configuration
    #[arg(long, global = true)]
    store: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create an account
    Register {
        username: String,
        #[arg(long, short)]
        password: String,
    },
    /// Log in and open the studio
    Login {
        username: String,
        #[arg(long, short)]
        password: String,
    },
    /// Lock the studio
    Logout,
    /// Show the logged-in user and the dashboard cards
    Status,

    /// Generate song lyrics
    Lyrics {
        #[arg(long)]
        title: String,
        /// indonesia, english, japanese_romaji or any other language code
        #[arg(long, default_value = "indonesia")]
        language: String,
    },
    /// Combine genres and a mood
    GenreMood {
        #[arg(long = "genre")]
        genres: Vec<String>,
        #[arg(long)]
        mood: Option<String>,
    },
    /// Combine main and additional instruments
    Instruments {
        #[arg(long = "main")]
        main: Vec<String>,
        #[arg(long = "additional")]
        additional: Vec<String>,
    },
    /// Describe the vocalist, manually or from a reference artist
    Vocalist {
        #[arg(long)]
        male: bool,
        #[arg(long)]
        male_range: Option<String>,
        #[arg(long)]
        female: bool,
        #[arg(long)]
        female_range: Option<String>,
        #[arg(long, default_value = "")]
        artist: String,
    },
    /// Turn a free-form instrument sound description into a prompt
    Instrument { description: String },
    /// Show the last result of a step
    Output { step: StepKind },
    /// Send a step result to the final prompt (lyrics, genre-mood, instruments, vocals)
    Send { component: ComponentKind },

    /// Build the final music prompt from the sent components
    Assemble {
        /// Show the current prompt without building a new one
        #[arg(long)]
        show: bool,
    },

    /// Save the final prompt or the instrument prompt to the collection
    Save {
        #[command(subcommand)]
        target: SaveTarget,
    },
    /// List saved items (music, instrument)
    List { kind: CollectionKind },
    /// Delete a saved item
    Delete {
        kind: CollectionKind,
        id: String,
        /// Confirm the deletion
        #[arg(long)]
        yes: bool,
    },
    /// Write a saved item to a text file
    Download {
        kind: CollectionKind,
        id: String,
        /// Output file (default: derived from the title, in the current directory)
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// List notifications or mark them read
    Notifications {
        #[arg(long, conflicts_with = "read_all")]
        read: Option<u64>,
        #[arg(long)]
        read_all: bool,
    },
    /// Talk to Mr. GenR, or show the conversation
    Chat {
        message: Option<String>,
        #[arg(long, conflicts_with = "message")]
        history: bool,
    },
    /// Show or change the profile picture; an empty URL resets it
    ProfilePic { url: Option<String> },
    /// Collapse or expand the sidebar
    Sidebar,
}

#[derive(Subcommand)]
enum SaveTarget {
    /// The final music prompt
    Music,
    /// The instrument-specific prompt
    Instrument,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_service = ConfigService::new(cli.config.as_deref())?;
    let config = config_service
        .get_config()
        .with_context(|| format!("Failed to load {}", config_service.path().display()))?;
    let _log_guard = logging::init(config.logging.filter(), &GenrPaths::logs_dir()?)?;

    let store_path = match cli.store {
        Some(path) => path,
        None => config_service.store_path()?,
    };
    debug!(path = %store_path.display(), "Opening store");
    let store = Arc::new(JsonFileStore::new(store_path));
    let gateway = gateway_from_config(&config.gemini);

    let mut gate = SessionGate::with_store(store, gateway);
    gate.boot().await.context("Failed to restore the session")?;

    match cli.command {
        Commands::Register { username, password } => {
            commands::account::register(&gate, &username, &password).await?
        }
        Commands::Login { username, password } => {
            commands::account::login(&mut gate, &username, &password).await?
        }
        Commands::Logout => commands::account::logout(&mut gate).await?,
        Commands::Status => commands::account::status(&gate).await?,

        Commands::Lyrics { title, language } => {
            commands::steps::lyrics(&gate, &title, &language).await?
        }
        Commands::GenreMood { genres, mood } => {
            commands::steps::genre_mood(&gate, genres, mood).await?
        }
        Commands::Instruments { main, additional } => {
            commands::steps::instruments(&gate, main, additional).await?
        }
        Commands::Vocalist {
            male,
            male_range,
            female,
            female_range,
            artist,
        } => {
            let request = genr_core::workflow::VocalistRequest {
                male_selected: male,
                male_range,
                female_selected: female,
                female_range,
                artist_reference: artist,
            };
            commands::steps::vocalist(&gate, request).await?
        }
        Commands::Instrument { description } => {
            commands::steps::instrument_specific(&gate, &description).await?
        }
        Commands::Output { step } => commands::steps::output(&gate, step).await?,
        Commands::Send { component } => commands::steps::send(&gate, component).await?,
        Commands::Assemble { show } => commands::steps::assemble(&gate, show).await?,

        Commands::Save { target } => match target {
            SaveTarget::Music => commands::collection::save_music(&gate).await?,
            SaveTarget::Instrument => commands::collection::save_instrument(&gate).await?,
        },
        Commands::List { kind } => commands::collection::list(&gate, kind).await?,
        Commands::Delete { kind, id, yes } => {
            commands::collection::delete(&gate, kind, &id, yes).await?
        }
        Commands::Download { kind, id, out } => {
            commands::collection::download(&gate, kind, &id, out).await?
        }

        Commands::Notifications { read, read_all } => {
            commands::notifications::run(&gate, read, read_all).await?
        }
        Commands::Chat { message, history } => {
            commands::chat::run(&gate, message.as_deref(), history).await?
        }
        Commands::ProfilePic { url } => {
            commands::preferences::profile_picture(&gate, url.as_deref()).await?
        }
        Commands::Sidebar => commands::preferences::sidebar(&gate).await?,
    }

    Ok(())
}
