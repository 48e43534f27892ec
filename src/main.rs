//! Terminal PiX runner (default binary).
//!
//! Opens a canvas sized from `PIX_WIDTH`/`PIX_HEIGHT`, fits it into the
//! terminal and runs the built-in demo cartridge at 30 FPS.

mod demo;

use std::fs::OpenOptions;

use anyhow::{Context, Result};
use log::{error, info, LevelFilter};

use tui_pix::engine::{Callbacks, Engine, MonotonicClock, RuntimeConfig, Scheduler};
use tui_pix::input::TerminalEvents;
use tui_pix::term::TerminalPresenter;

fn main() {
    let config = RuntimeConfig::from_env();
    if let Err(e) = init_logging(&config) {
        eprintln!("PiX: logging disabled: {e:#}");
    }

    // The presenter is dropped inside `run`, which restores the terminal
    // before anything is printed here.
    if let Err(e) = run(&config) {
        error!("fatal: {e:#}");
        eprintln!("PiX Panic: {e:#}");
        std::process::exit(1);
    }
}

/// Log to `PIX_LOG_FILE` when set. Stdout belongs to the canvas.
fn init_logging(config: &RuntimeConfig) -> Result<()> {
    let Some(path) = &config.log_file else {
        return Ok(());
    };
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("cannot open log file {path}"))?;

    env_logger::Builder::new()
        .filter_level(LevelFilter::Info)
        .parse_default_env()
        .target(env_logger::Target::Pipe(Box::new(file)))
        .try_init()?;
    Ok(())
}

fn run(config: &RuntimeConfig) -> Result<()> {
    let presenter = TerminalPresenter::new().context("cannot take over the terminal")?;
    let mut events = if presenter.reports_key_releases() {
        TerminalEvents::new().with_native_releases()
    } else {
        info!("terminal lacks key releases, timing them out after {} ms", config.key_release_ms);
        TerminalEvents::new().with_release_timeout_ms(config.key_release_ms)
    };
    let mut engine = Engine::new(Box::new(presenter));
    engine.configure_screen(config.width, config.height, Some(&config.title))?;

    let mut callbacks = Callbacks::new();
    demo::install(&mut callbacks);

    let mut clock = MonotonicClock::new();
    let mut scheduler = Scheduler::new();

    info!("starting {}x{} \"{}\"", config.width, config.height, config.title);
    scheduler.run(&mut engine, &mut callbacks, &mut events, &mut clock)?;
    Ok(())
}
