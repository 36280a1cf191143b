mod config;
mod input;
mod offline;
mod ui;

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use tictactoe_common::config::Validate;
use tictactoe_common::{info, log};
use tictactoe_common::logger::{self, LogLevel, LoggerSettings};
use tictactoe_common::tictactoe::{FirstPlayerMode, Player};

use config::{CONFIG_FILE, Config, ModeChoice, get_config_manager};
use offline::run_client;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum MarkArg {
    X,
    O,
}

impl From<MarkArg> for Player {
    fn from(mark: MarkArg) -> Self {
        match mark {
            MarkArg::X => Player::X,
            MarkArg::O => Player::O,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum FirstPlayerArg {
    X,
    Random,
}

impl From<FirstPlayerArg> for FirstPlayerMode {
    fn from(first: FirstPlayerArg) -> Self {
        match first {
            FirstPlayerArg::X => FirstPlayerMode::X,
            FirstPlayerArg::Random => FirstPlayerMode::Random,
        }
    }
}

#[derive(Parser)]
#[command(
    name = "tictactoe",
    version,
    about = "Tic-tac-toe against a friend or a computer that never loses"
)]
struct Args {
    /// YAML config file; created by --save-config.
    #[arg(long, default_value = CONFIG_FILE)]
    config: PathBuf,

    /// Skip the mode menu.
    #[arg(long, value_enum)]
    mode: Option<ModeChoice>,

    #[arg(long, value_enum)]
    computer_mark: Option<MarkArg>,

    #[arg(long, value_enum)]
    first_player: Option<FirstPlayerArg>,

    /// Pause before the computer replies.
    #[arg(long)]
    delay_ms: Option<u64>,

    /// Debug logging to stderr.
    #[arg(short, long)]
    verbose: bool,

    #[arg(long)]
    log_prefix: Option<String>,

    /// Write the effective settings back to the config file.
    #[arg(long)]
    save_config: bool,
}

impl Args {
    fn apply(&self, config: &mut Config) {
        if let Some(mode) = self.mode {
            config.game.mode = Some(mode);
        }
        if let Some(mark) = self.computer_mark {
            config.game.computer_mark = mark.into();
        }
        if let Some(first) = self.first_player {
            config.game.first_player = first.into();
        }
        if let Some(delay_ms) = self.delay_ms {
            config.game.computer_delay_ms = delay_ms;
        }
        if self.verbose {
            config.logging.enabled = true;
            config.logging.level = LogLevel::Debug;
        }
        if let Some(ref prefix) = self.log_prefix {
            config.logging.prefix = Some(prefix.clone());
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let config_manager = get_config_manager(&args.config);
    let mut config = config_manager.get_config()?;
    args.apply(&mut config);
    config.validate()?;

    if config.logging.enabled {
        logger::init_logger(LoggerSettings {
            prefix: config.logging.prefix.clone(),
            level: config.logging.level,
        });
    }

    if args.save_config {
        config_manager.set_config(&config)?;
        log!("Saved config to {}", args.config.display());
    }

    log!("Tic-tac-toe client starting");

    let stdin = tokio::io::BufReader::new(tokio::io::stdin());
    let mut stdout = tokio::io::stdout();
    run_client(&config.game, stdin, &mut stdout).await?;

    info!("Tic-tac-toe client exiting");
    Ok(())
}
