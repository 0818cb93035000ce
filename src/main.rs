//! Gazeward - gaze-driven 360° clinical training engine
//!
//! Runs a session headless: loads the world content, plans an autopilot
//! walkthrough of every case, and drives it through the frame scheduler.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::info;

use gazeward::autopilot::{self, AutopilotConfig};
use gazeward::backend::headless::{self, HeadlessConfig};
use gazeward::backend::HeadlessPresenter;
use gazeward::clock::{Clock, SystemClock, TestClock};
use gazeward::config::SessionConfig;
use gazeward::input_source::ScriptedInputProvider;
use gazeward::training::content::WorldDef;
use gazeward::training::session::Session;

#[derive(Parser, Debug)]
#[command(name = "gazeward", about = "Gaze-driven 360° clinical training engine")]
struct Cli {
    /// World content file (TOML); defaults to the built-in clinic
    #[arg(long)]
    world: Option<PathBuf>,

    /// Dwell time required to activate a hotspot (ms)
    #[arg(long, default_value = "2000")]
    gaze_ms: u64,

    /// Transient message duration (ms)
    #[arg(long, default_value = "3000")]
    message_ms: u64,

    /// Scene shown at start
    #[arg(long, default_value = "reception")]
    initial_scene: String,

    /// Frame interval (ms)
    #[arg(long, default_value = "16")]
    frame_ms: u64,

    /// Stop after N frames
    #[arg(long)]
    max_frames: Option<u64>,

    /// Log session status every N frames (0 = off)
    #[arg(long, default_value = "0")]
    status_every: u64,

    /// Pace frames against the wall clock instead of simulated time
    #[arg(long)]
    realtime: bool,

    /// Tracing filter used when RUST_LOG is unset
    #[arg(long, default_value = "gazeward=info")]
    log_filter: String,

    /// Show version and exit
    #[arg(long)]
    version: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if cli.version {
        println!("gazeward {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| cli.log_filter.clone().into()),
        )
        .init();

    info!("gazeward v{} starting", env!("CARGO_PKG_VERSION"));

    let world = match &cli.world {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("reading world file {}", path.display()))?;
            WorldDef::from_toml(&text).with_context(|| format!("loading {}", path.display()))?
        }
        None => WorldDef::builtin().context("loading built-in world")?,
    };

    let config = SessionConfig {
        gaze_ms: cli.gaze_ms,
        message_ms: cli.message_ms,
        initial_scene: cli.initial_scene,
        ..Default::default()
    };
    info!("config: {}", config.status_sexp());

    let mut session = Session::new(&world, config).context("building session")?;
    let script = autopilot::walkthrough(&session, &AutopilotConfig::default())
        .context("planning walkthrough")?;

    let clock: Box<dyn Clock> = if cli.realtime {
        Box::new(SystemClock)
    } else {
        Box::new(TestClock::new())
    };

    let summary = headless::run(
        &mut session,
        &mut ScriptedInputProvider::new(script),
        &mut HeadlessPresenter::new(),
        clock.as_ref(),
        &HeadlessConfig {
            frame_interval_ms: cli.frame_ms,
            max_frames: cli.max_frames,
            status_interval_frames: cli.status_every,
            stop_when_exhausted: true,
        },
    );

    println!("{}", summary.to_sexp());
    println!("{}", session.status_sexp(clock.now()));
    Ok(())
}
