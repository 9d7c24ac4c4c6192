#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use trail_replay::replay::{
    load_dir,
    params::{ALPHA_EXPONENT, DEFAULT_DATA_DIR, MAX_INTENSITY, MIN_INTENSITY},
    LoadOptions, PlaybackController,
};
use trail_replay::ui::{
    color::{ColorPolicy, IntensityBounds},
    input::{is_quit, key_to_command},
    render::{Canvas, TerminalCanvas},
};

#[derive(Parser, Debug)]
#[command(
    name = "trail_replay",
    version,
    about = "Step through pheromone-trail simulation snapshots in the terminal"
)]
struct Cli {
    /// Directory holding the `iter_<n>.csv` files written by the simulation engine.
    #[arg(long, env = "TRAIL_REPLAY_DATA_DIR", default_value = DEFAULT_DATA_DIR)]
    data_dir: PathBuf,

    /// Intensity floor; must match the engine's minimum pheromone level.
    #[arg(long, default_value_t = MIN_INTENSITY)]
    min_intensity: f64,

    /// Intensity at which the color ramp saturates.
    #[arg(long, default_value_t = MAX_INTENSITY)]
    max_intensity: f64,

    /// Exponent of the opacity curve applied to normalized intensity.
    #[arg(long, default_value_t = ALPHA_EXPONENT)]
    alpha_exponent: f64,

    /// Show file rows as screen rows instead of screen columns.
    #[arg(long)]
    no_transpose: bool,

    /// Write logs to this file instead of stderr (filter with RUST_LOG).
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_file.as_deref())?;

    // Everything that can fail on bad input happens before the terminal is touched.
    let bounds = IntensityBounds::new(cli.min_intensity, cli.max_intensity, cli.alpha_exponent)
        .context("invalid color configuration")?;
    let options = LoadOptions {
        transpose: !cli.no_transpose,
        ..LoadOptions::default()
    };
    let store = load_dir(&cli.data_dir, &options).context("cannot start replay")?;
    let mut controller = PlaybackController::new(store, ColorPolicy::new(bounds));

    // Setup Terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut canvas = TerminalCanvas::new(Terminal::new(backend)?);

    let res = run_app(&mut canvas, &mut controller);

    // Restore Terminal
    disable_raw_mode()?;
    execute!(canvas.terminal_mut().backend_mut(), LeaveAlternateScreen)?;
    canvas.terminal_mut().show_cursor()?;

    res
}

fn init_tracing(log_file: Option<&Path>) -> Result<()> {
    let filter = EnvFilter::from_default_env();
    match log_file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("cannot create log file `{}`", path.display()))?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init()
                .map_err(|err| anyhow!("cannot install log subscriber: {err}"))?;
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(io::stderr)
                .try_init()
                .map_err(|err| anyhow!("cannot install log subscriber: {err}"))?;
        }
    }
    Ok(())
}

fn run_app<C: Canvas>(canvas: &mut C, controller: &mut PlaybackController) -> Result<()> {
    controller.render(canvas)?;
    info!(snapshots = controller.store().count(), "Replay started");

    loop {
        match event::read()? {
            Event::Key(key) if is_quit(&key) => {
                info!("Replay closed");
                return Ok(());
            }
            Event::Key(key) => {
                let command = key_to_command(&key);
                if !controller.handle(command, canvas)? {
                    debug!(code = ?key.code, "Ignored key");
                }
            }
            // Same frame, new geometry.
            Event::Resize(..) => controller.render(canvas)?,
            _ => {}
        }
    }
}
