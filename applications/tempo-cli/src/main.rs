/// Tempo CLI - headless player driven from the terminal
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tempo_cli::{app, display, AppConfig};
use tempo_core::Catalog;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "tempo-cli")]
#[command(about = "Tempo Player transport on the command line", long_about = None)]
struct Cli {
    /// Configuration file path (default: ./tempo.toml if present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Catalog JSON file, overrides catalog.path
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    /// Fixed shuffle seed, overrides playback.shuffle_seed
    #[arg(long, global = true)]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Play interactively, reading commands from stdin (default)
    Play,
    /// List the curated sections of every view
    Sections,
}

fn main() -> anyhow::Result<()> {
    // Initialize tracing (stderr keeps the transport output clean)
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tempo_cli=info,tempo_playback=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let mut config = AppConfig::load(cli.config.as_deref())?;
    if let Some(path) = cli.catalog {
        config.catalog.path = path;
    }
    if let Some(seed) = cli.seed {
        config.playback.shuffle_seed = Some(seed);
    }
    config.validate()?;

    match cli.command.unwrap_or(Commands::Play) {
        Commands::Play => app::run(&config)?,
        Commands::Sections => {
            let catalog = Catalog::load(&config.catalog.path)?;
            print!("{}", display::sections_listing(&catalog));
        }
    }

    Ok(())
}
