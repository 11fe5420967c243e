mod app;
mod input;
mod view;

use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

use clap::Parser;
use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::prelude::*;
use signal_hook::consts::signal::{SIGHUP, SIGTERM};
use tracing::info;
use tracing_subscriber::EnvFilter;

use segforge::clipboard::FileClipboard;
use segforge::config::{Config, PathConfig};
use segforge::controller::InteractionController;
use segforge::persist;

#[derive(Debug, thiserror::Error)]
enum AppError {
    #[error(transparent)]
    Core(#[from] segforge::Error),
    #[error("terminal error: {0}")]
    Terminal(#[from] io::Error),
    #[error("cannot install signal handler: {0}")]
    Signal(#[source] io::Error),
    #[error("cannot open log file {}: {source}", path.display())]
    Log {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

#[derive(Parser, Debug)]
#[command(name = "segforge", about = "Interactive 14/16-segment display font editor")]
struct Cli {
    /// Config file (default: ~/.config/segforge/config.toml).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Glyph table to load at startup and save at exit.
    #[arg(long)]
    data: Option<PathBuf>,

    /// File that receives exported tables.
    #[arg(long)]
    clipboard: Option<PathBuf>,

    #[arg(long)]
    log: Option<PathBuf>,
}

impl Cli {
    fn paths(&self, mut paths: PathConfig) -> PathConfig {
        if let Some(data) = &self.data {
            paths.data = data.clone();
        }
        if let Some(clipboard) = &self.clipboard {
            paths.clipboard = clipboard.clone();
        }
        if let Some(log) = &self.log {
            paths.log = log.clone();
        }
        paths
    }
}

/// The terminal belongs to the UI, so logs go to a file.
fn init_logging(path: &Path) -> Result<(), AppError> {
    let file = File::create(path).map_err(|source| AppError::Log {
        path: path.to_path_buf(),
        source,
    })?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();

    Ok(())
}

fn main() -> Result<(), AppError> {
    let cli = Cli::parse();
    let config = Config::load(cli.config.as_deref())?;
    let paths = cli.paths(config.paths.clone());

    init_logging(&paths.log)?;

    let curves = config.animation.curves()?;
    let store = persist::load(&paths.data)?;
    let clipboard = FileClipboard::new(&paths.clipboard);
    let mut controller = InteractionController::new(store, clipboard, curves);

    // Closing the window (SIGHUP) or `kill` ends the loop like Ctrl+Q does.
    let shutdown = Arc::new(AtomicBool::new(false));
    for signal in [SIGTERM, SIGHUP] {
        signal_hook::flag::register(signal, Arc::clone(&shutdown)).map_err(AppError::Signal)?;
    }

    info!(data = %paths.data.display(), clipboard = %paths.clipboard.display(), "starting editor");

    enable_raw_mode()?;
    crossterm::execute!(io::stdout(), EnterAlternateScreen, EnableMouseCapture)?;

    let result = run(&mut controller, &config, &shutdown);
    let restored = restore_terminal();

    // Saved even when the UI failed; the terminal may already be gone.
    persist::save(&paths.data, controller.store())?;

    result?;
    restored?;
    Ok(())
}

fn restore_terminal() -> io::Result<()> {
    disable_raw_mode()?;
    crossterm::execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture)
}

fn run(
    controller: &mut InteractionController<FileClipboard>,
    config: &Config,
    shutdown: &AtomicBool,
) -> io::Result<()> {
    let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;
    terminal.hide_cursor()?;

    let result = app::run(
        &mut terminal,
        controller,
        config.animation.frame_interval(),
        shutdown,
    );

    let shown = terminal.show_cursor();
    result.and(shown)
}
