use anyhow::Result;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use tic_tac_toe::config::CliConfig;
use tic_tac_toe::{Config, GameInterface, Mark, VERSION};
use tracing::{error, info};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum FirstMark {
    Cross,
    Circle,
}

impl From<FirstMark> for Mark {
    fn from(mark: FirstMark) -> Self {
        match mark {
            FirstMark::Cross => Mark::Cross,
            FirstMark::Circle => Mark::Circle,
        }
    }
}

#[derive(Parser)]
#[command(name = "tic-tac-toe")]
#[command(about = "Two-player tic-tac-toe in the terminal")]
#[command(version = VERSION)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,

    /// Configuration file path
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Board side length
    #[arg(short, long)]
    size: Option<usize>,

    /// Mark used by the player who moves first
    #[arg(short, long, value_enum)]
    first: Option<FirstMark>,

    /// Colour theme (default, dark)
    #[arg(short, long)]
    theme: Option<String>,

    /// Wait for `r` instead of restarting after each game
    #[arg(long)]
    no_auto_restart: bool,

    /// Write the effective configuration to a file and exit
    #[arg(long)]
    write_config: Option<PathBuf>,
}

impl Cli {
    fn overrides(&self) -> CliConfig {
        CliConfig {
            size: self.size,
            first_mark: self.first.map(Mark::from),
            no_auto_restart: self.no_auto_restart,
            theme: self.theme.clone(),
            debug: self.debug,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = Config::load(cli.config.as_deref())?;
    config.merge_with_cli(cli.overrides());
    config.validate()?;

    tracing_subscriber::fmt()
        .with_env_filter(format!("tic_tac_toe={},warn", config.logging.level))
        .with_writer(std::io::stderr)
        .init();

    info!("Starting Tic-Tac-Toe v{}", VERSION);

    if let Some(path) = &cli.write_config {
        config.save_to_file(path)?;
        info!("Configuration written to {}", path.display());
        return Ok(());
    }

    let mut game_interface = GameInterface::new(config)?;

    if let Err(e) = game_interface.run().await {
        error!("Game error: {}", e);
        eprintln!("An error occurred: {}", e);
        std::process::exit(1);
    }

    Ok(())
}
