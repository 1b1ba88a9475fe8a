//! Orientbot CLI - run orientation actions and serve the action webhook

use clap::{Parser, Subcommand};
use owo_colors::OwoColorize;
use std::path::{Path, PathBuf};
use orientbot::config::{self, OrientConfig};
use orientbot::responder::{Action, Responder, Tracker};
use orientbot::server::{self, AppState};
use orientbot::server::routes::ActionReply;
use orientbot::storage::SqliteStore;
use orientbot::ui::{self, Icons};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "orientbot")]
#[command(version)]
#[command(about = "Orientation actions for a university chatbot")]
#[command(long_about = r#"
Orientbot answers the custom actions of a university-orientation chatbot:
  • Programs by interest area, institution or category
  • Program details, comparisons and suggestions
  • Pre-enrollment steps, documents and dates

Example usage:
  orientbot init
  orientbot run action_guide_orientation --entity domaine=santé
  orientbot serve --port 5055
"#)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to the config file (defaults to ./orientbot.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create and seed the catalog database
    Init {
        /// Path to the database file
        #[arg(short, long)]
        database: Option<PathBuf>,

        /// Also write a config file pointing at the database
        #[arg(long)]
        write_config: bool,

        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },

    /// Serve the action webhook
    Serve {
        /// Path to the database file
        #[arg(short, long)]
        database: Option<PathBuf>,

        /// Port to listen on
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Run one action and print the reply
    Run {
        /// Action name, e.g. action_detail_filiere
        action: String,

        /// Entity of the current turn, as type=value (repeatable)
        #[arg(short, long = "entity", value_parser = parse_pair)]
        entities: Vec<(String, String)>,

        /// Remembered slot, as name=value (repeatable)
        #[arg(short, long = "slot", value_parser = parse_pair)]
        slots: Vec<(String, String)>,

        /// Path to the database file
        #[arg(short, long)]
        database: Option<PathBuf>,

        /// Print the webhook JSON reply instead of text
        #[arg(long)]
        json: bool,
    },

    /// List the action names
    Actions,

    /// Show row counts of the catalog
    Stats {
        /// Path to the database file
        #[arg(short, long)]
        database: Option<PathBuf>,
    },
}

fn parse_pair(raw: &str) -> Result<(String, String), String> {
    raw.split_once('=')
        .map(|(key, value)| (key.trim().to_string(), value.to_string()))
        .filter(|(key, _)| !key.is_empty())
        .ok_or_else(|| format!("expected key=value, got '{}'", raw))
}

fn resolve_database(flag: Option<PathBuf>, config: &OrientConfig) -> anyhow::Result<PathBuf> {
    match flag {
        Some(path) => Ok(path),
        None => Ok(config.database_path_in(&std::env::current_dir()?)),
    }
}

fn open_store(path: &Path) -> anyhow::Result<SqliteStore> {
    config::ensure_db_dir(path)?;
    Ok(SqliteStore::open(path)?)
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("orientbot=debug,tower_http=debug,info")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let config = config::load_config(cli.config.as_deref())?.unwrap_or_default();

    match cli.command {
        Commands::Init { database, write_config, force } => {
            let path = resolve_database(database, &config)?;
            let existed = path.exists();

            ui::header("Initializing orientation catalog");
            ui::info("Database", &ui::dim(&path.display().to_string()));

            let store = open_store(&path)?;
            if existed {
                ui::warn("Database already exists; seed data left untouched");
            }

            let stats = store.stats()?;
            ui::section("Catalog");
            for (label, count) in stats.rows() {
                ui::summary_row(label, &count.to_string());
            }

            if write_config {
                let config_path = cli.config.clone().unwrap_or_else(config::default_config_path);
                let written = OrientConfig {
                    database: Some(path.display().to_string()),
                    ..config.clone()
                };
                config::write_config(&config_path, &written, force)?;
                ui::info("Config", &config_path.display().to_string());
            }

            println!();
            ui::success("Catalog ready");
        }

        Commands::Serve { database, port } => {
            let path = resolve_database(database, &config)?;
            let port = port.unwrap_or_else(|| config.port());
            tracing::info!("Serving actions from {:?}", path);

            let state = AppState {
                store: open_store(&path)?,
                university: config.university.clone(),
            };

            let runtime = tokio::runtime::Runtime::new()?;
            runtime.block_on(server::start_server(port, state))?;
        }

        Commands::Run { action, entities, slots, database, json } => {
            let action: Action = match action.parse() {
                Ok(action) => action,
                Err(e) => {
                    ui::error(&e.to_string());
                    println!("{} Run `orientbot actions` to list the available names.", Icons::INFO);
                    anyhow::bail!("unknown action");
                }
            };

            let path = resolve_database(database, &config)?;
            let store = open_store(&path)?;

            let mut tracker = Tracker::new();
            for (entity, value) in entities {
                tracker = tracker.with_entity(entity, value);
            }
            for (name, value) in slots {
                tracker = tracker.with_slot(name, value);
            }

            let response = Responder::new(&store, &config.university).run(action, &tracker);

            if json {
                println!("{}", serde_json::to_string_pretty(&ActionReply::from(response))?);
            } else {
                println!("{} {}", Icons::SPEECH, action.as_str().style(ui::theme().header.clone()));
                for message in &response.messages {
                    println!();
                    println!("{}", message);
                }
                if !response.events.is_empty() {
                    ui::section("Remembered");
                    for slot in &response.events {
                        println!("{} {} = {}", Icons::MEMORY, slot.name.style(ui::theme().dim.clone()), slot.value);
                    }
                }
            }
        }

        Commands::Actions => {
            for action in Action::all() {
                println!("{} {}", Icons::SPEECH, action);
            }
        }

        Commands::Stats { database } => {
            let path = resolve_database(database, &config)?;
            let store = open_store(&path)?;
            let stats = store.stats()?;

            println!("{} Orientbot Statistics", Icons::STATS);
            println!("{} {}", Icons::DATABASE, ui::dim(&path.display().to_string()));
            println!("{}", ui::stats_table(&stats.rows()));
        }
    }

    Ok(())
}
