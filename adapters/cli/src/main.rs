#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that plays a Snake Grid session in the terminal.

mod ascii;
mod config;
mod script;
mod session;

use std::{io, path::PathBuf};

use anyhow::{ensure, Context, Result};
use clap::Parser;
use snake_grid_rendering::{ManualClock, RenderSink, SystemClock};
use snake_grid_world::World;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::{
    ascii::{AsciiSink, SilentSink},
    config::SessionConfig,
    script::{InputScript, ScriptedInput},
    session::{Outcome, SessionOptions},
};

/// Plays a Snake Grid session driven by scripted input.
#[derive(Debug, Parser)]
#[command(name = "snake-grid", version)]
struct Cli {
    /// TOML file with `canvas`, `rules` and `seed` settings.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Canvas width in pixels.
    #[arg(long)]
    width: Option<f32>,
    /// Canvas height in pixels.
    #[arg(long)]
    height: Option<f32>,
    /// Side length of a grid cell in pixels.
    #[arg(long)]
    cell_size: Option<f32>,
    /// Seed for food placement.
    #[arg(long)]
    seed: Option<u64>,
    /// Frames delivered per second of session time.
    #[arg(long, default_value_t = 60.0)]
    fps: f64,
    /// Upper bound on the number of frames before the session stops.
    #[arg(long, default_value_t = 3600)]
    max_frames: u32,
    /// Gesture for a frame, as `FRAME:KEY` or `FRAME:swipe:DX,DY`.
    #[arg(long = "input", value_name = "FRAME:GESTURE")]
    inputs: Vec<ScriptedInput>,
    /// Print the grid whenever it changes.
    #[arg(long)]
    show: bool,
    /// Pace frames with the wall clock instead of simulated time.
    #[arg(long)]
    realtime: bool,
}

impl Cli {
    fn session_config(&self) -> Result<SessionConfig> {
        let mut config = match &self.config {
            Some(path) => SessionConfig::load(path)?,
            None => SessionConfig::default(),
        };
        if let Some(width) = self.width {
            config.canvas.width = width;
        }
        if let Some(height) = self.height {
            config.canvas.height = height;
        }
        if let Some(cell_size) = self.cell_size {
            config.canvas.cell_size = cell_size;
        }
        if let Some(seed) = self.seed {
            config.seed = seed;
        }
        Ok(config)
    }
}

/// Entry point for the Snake Grid command-line interface.
fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    ensure!(
        cli.fps.is_finite() && cli.fps > 0.0,
        "--fps must be a positive number, got {}",
        cli.fps
    );

    let config = cli.session_config()?;
    let mut world = World::new(config.rules, config.seed).context("invalid rules")?;
    let script = InputScript::new(cli.inputs.clone());
    let options = SessionOptions {
        frame_interval: cli.fps.recip(),
        max_frames: cli.max_frames,
    };
    let mut sink: Box<dyn RenderSink> = if cli.show {
        Box::new(AsciiSink::new(io::stdout()))
    } else {
        Box::new(SilentSink)
    };

    info!(
        width = config.canvas.width,
        height = config.canvas.height,
        cell_size = config.canvas.cell_size,
        seed = config.seed,
        "starting session"
    );
    let outcome = if cli.realtime {
        session::run(
            &mut world,
            config.canvas,
            script,
            &mut SystemClock::new(),
            sink.as_mut(),
            options,
        )?
    } else {
        session::run(
            &mut world,
            config.canvas,
            script,
            &mut ManualClock::default(),
            sink.as_mut(),
            options,
        )?
    };

    match outcome {
        Outcome::GameOver { score, frames } => {
            info!(score, frames, "session finished");
            println!("Game Over! Your score: {score}");
        }
        Outcome::OutOfFrames { score, frames } => {
            info!(score, frames, "session ran out of frames");
            println!("Session ended after {frames} frames with score {score}");
        }
    }
    Ok(())
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .try_init();
}
