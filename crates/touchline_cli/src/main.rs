//! Touchline CLI
//!
//! Resolve scoped tactics and formations from a library file

#[cfg(feature = "cli")]
use anyhow::Result;
#[cfg(feature = "cli")]
use clap::{Parser, Subcommand};
#[cfg(feature = "cli")]
use std::path::PathBuf;

#[cfg(feature = "cli")]
#[derive(Parser)]
#[command(name = "touchline")]
#[command(about = "Resolve club, age-group and team tactics", long_about = None)]
struct Cli {
    /// Resolver config JSON (overrides TOUCHLINE_RESOLVER_CONFIG)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Emit logs as JSON lines
    #[arg(long, global = true, default_value = "false")]
    log_json: bool,

    /// Pretty-print output
    #[arg(long, global = true, default_value = "false")]
    pretty: bool,

    #[command(subcommand)]
    command: Commands,
}

#[cfg(feature = "cli")]
#[derive(Subcommand)]
enum Commands {
    /// Resolve a tactic through its parent chain
    Resolve {
        /// Library file (JSON or YAML)
        #[arg(long)]
        library: PathBuf,

        /// Tactic id
        #[arg(long)]
        tactic: String,
    },

    /// Resolve a formation with no overrides
    Formation {
        /// Library file; seeded formations only when omitted
        #[arg(long)]
        library: Option<PathBuf>,

        /// Formation id (e.g., "11-4-4-2")
        #[arg(long)]
        id: String,
    },

    /// List tactics visible from a scope
    List {
        #[arg(long)]
        library: PathBuf,

        #[arg(long)]
        club: String,

        #[arg(long)]
        age_group: Option<String>,

        #[arg(long)]
        team: Option<String>,
    },

    /// List seeded formations
    Formations {
        #[arg(long)]
        squad_size: Option<usize>,
    },

    /// Print the JSON schema of the resolve request
    Schema,
}

#[cfg(feature = "cli")]
fn init_tracing(json: bool) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry.with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr)).init();
    }
}

#[cfg(feature = "cli")]
fn main() -> Result<()> {
    use touchline_cli::*;

    let cli = Cli::parse();
    init_tracing(cli.log_json);

    let config = load_config(cli.config.as_deref())?;

    let output = match cli.command {
        Commands::Resolve { library, tactic } => {
            let library = load_library(Some(&library), config)?;
            resolve_command(&library, &tactic, cli.pretty)?
        }
        Commands::Formation { library, id } => {
            let library = load_library(library.as_deref(), config)?;
            formation_command(&library, &id, cli.pretty)?
        }
        Commands::List { library, club, age_group, team } => {
            let library = load_library(Some(&library), config)?;
            let viewer = scope_from_args(&club, age_group.as_deref(), team.as_deref())?;
            list_command(&library, &viewer, cli.pretty)?
        }
        Commands::Formations { squad_size } => formations_command(squad_size, cli.pretty)?,
        Commands::Schema => touchline_core::api::request_schema_json(),
    };

    println!("{}", output);
    Ok(())
}

#[cfg(not(feature = "cli"))]
fn main() {
    eprintln!("touchline CLI is not available. Enable the 'cli' feature to use it.");
    std::process::exit(1);
}
