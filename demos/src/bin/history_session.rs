//! Runs a scripted editing session against a scene and logs the history
//! traffic.
//!
//! ```text
//! RUST_LOG=debug cargo run -p rewind-demos --bin history_session -- --drag-frames 30
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use rewind_demos::{config, session};

/// Rewind history session demo.
#[derive(Parser, Debug)]
#[command(
    name = "history_session",
    about = "Scripted scene editing session with undo/redo",
    version
)]
struct Args {
    /// Session config file.
    #[arg(long, default_value = "session.toml")]
    config: PathBuf,

    /// Override `[session] drag_frames`.
    #[arg(long)]
    drag_frames: Option<u32>,

    /// Override `[history] max_undo` (at least 1).
    #[arg(long, value_parser = clap::builder::RangedU64ValueParser::<usize>::new().range(1..))]
    max_undo: Option<usize>,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    log::info!("Starting Rewind history session");
    log::info!("Core version: {}", rewind_core::VERSION);
    log::info!("Demos version: {}", rewind_demos::VERSION);

    let mut config = config::load_or_default(&args.config);
    if let Some(frames) = args.drag_frames {
        config.session.drag_frames = frames;
    }
    if let Some(max_undo) = args.max_undo {
        config.history.max_undo = Some(max_undo);
    }

    match session::run(&config) {
        Ok(report) => {
            log::info!(
                "Session finished: {} live entities, {} undo / {} redo entries, dirty: {}",
                report.live_entities,
                report.undo_count,
                report.redo_count,
                report.dirty
            );
            if let Some(x) = &report.chair_x {
                log::info!("Chair PositionX: {x}");
            }
            log::info!(
                "{} dirty notification(s), playback blocked undo: {}",
                report.notifications,
                report.blocked_during_playback
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("Session failed: {e}");
            ExitCode::FAILURE
        }
    }
}
