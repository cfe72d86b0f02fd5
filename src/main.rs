use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::{Duration, Instant};

use clap::{Parser, ValueEnum};
use log::info;
use simplelog::{Config, LevelFilter, WriteLogger};
use snake_arcade::config::{ConfigError, ConfigOverrides, GameConfig};
use snake_arcade::difficulty::Difficulty;
use snake_arcade::game::{Control, GameState};
use snake_arcade::input::InputHandler;
use snake_arcade::terminal_runtime::{TerminalSession, install_panic_hook};
use thiserror::Error;

/// Upper bound on how long the loop waits for input between redraws.
const FRAME_BUDGET: Duration = Duration::from_millis(16);

#[derive(Debug, Parser)]
#[command(version, about = "Grid snake in the terminal")]
struct Cli {
    /// Board width in cells.
    #[arg(long)]
    width: Option<u16>,

    /// Board height in cells.
    #[arg(long)]
    height: Option<u16>,

    /// Starting difficulty.
    #[arg(long, value_enum)]
    difficulty: Option<Difficulty>,

    /// Seed for reproducible food placement.
    #[arg(long)]
    seed: Option<u64>,

    /// JSON config file; defaults to the per-user config when present.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write logs to this file (the terminal is owned by the game).
    #[arg(long = "log-file")]
    log_file: Option<PathBuf>,

    #[arg(long = "log-level", value_enum, default_value_t = LogLevel::Info)]
    log_level: LogLevel,
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, ValueEnum)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

#[derive(Debug, Error)]
enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("terminal error: {0}")]
    Terminal(#[from] io::Error),
    #[error("failed to create log file {path}: {source}")]
    LogFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to install logger: {0}")]
    Logger(#[from] log::SetLoggerError),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match start(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("snake-arcade: {error}");
            ExitCode::FAILURE
        }
    }
}

fn start(cli: Cli) -> Result<(), AppError> {
    if let Some(path) = &cli.log_file {
        init_logging(path, cli.log_level.into())?;
    }

    let mut config = GameConfig::resolve(cli.config.as_deref())?;
    config.apply(&ConfigOverrides {
        width: cli.width,
        height: cli.height,
        difficulty: cli.difficulty,
    });

    let state = match cli.seed {
        Some(seed) => GameState::new_with_seed(config, seed)?,
        None => GameState::new(config)?,
    };
    info!(
        "starting {}x{} game at {} difficulty",
        state.bounds().width,
        state.bounds().height,
        state.difficulty()
    );

    install_panic_hook();
    run(state)
}

fn init_logging(path: &Path, level: LevelFilter) -> Result<(), AppError> {
    let file = File::create(path).map_err(|source| AppError::LogFile {
        path: path.to_path_buf(),
        source,
    })?;
    WriteLogger::init(level, Config::default(), file)?;
    Ok(())
}

fn run(mut state: GameState) -> Result<(), AppError> {
    let mut session = TerminalSession::enter()?;
    let mut input = InputHandler::new();
    let mut last_tick = Instant::now();

    loop {
        session.draw(&state.snapshot())?;

        let until_tick = state.tick_interval().saturating_sub(last_tick.elapsed());
        let mut pending = Vec::new();
        if let Some(first) = input.poll_input(until_tick.min(FRAME_BUDGET))? {
            pending.push(first);
        }
        pending.extend(input.drain()?);

        for game_input in pending {
            if state.handle_input(game_input) == Control::Quit {
                info!(
                    "quit with score {} (high score {})",
                    state.score(),
                    state.high_score()
                );
                return Ok(());
            }
        }

        if last_tick.elapsed() >= state.tick_interval() {
            state.step();
            last_tick = Instant::now();
        }
    }
}
