use std::time::Duration;

use anyhow::Context;
use clap::Parser;

use skirmish_app::config::AppConfig;
use skirmish_app::input::{self, InputAdapter};
use skirmish_app::logging;
use skirmish_app::render::{HudLog, RenderLoop};
use skirmish_app::round::RoundManager;
use skirmish_core::constants::{COUNTDOWN_SECS, RENDER_PERIOD_MS, TICK_PERIOD_MS};
use skirmish_sim::{SharedWorld, SimConfig, SimulationEngine};

/// Top-down arena brawler, run headless. Type w/a/s/d (or -w to release) and
/// j to attack, one or more per line.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// RNG seed for enemy placement
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Seconds of countdown before each round
    #[arg(long, default_value_t = COUNTDOWN_SECS)]
    countdown_secs: u32,

    /// Simulation tick period in milliseconds
    #[arg(long, default_value_t = TICK_PERIOD_MS)]
    tick_ms: u64,

    /// Render period in milliseconds
    #[arg(long, default_value_t = RENDER_PERIOD_MS)]
    render_ms: u64,

    /// Stop after clearing this many rounds
    #[arg(long)]
    max_rounds: Option<u32>,

    /// Print snapshots as JSON instead of HUD log lines
    #[arg(long)]
    json: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

impl From<&Args> for AppConfig {
    fn from(args: &Args) -> Self {
        Self {
            sim: SimConfig { seed: args.seed },
            tick_period: Duration::from_millis(args.tick_ms),
            render_period: Duration::from_millis(args.render_ms),
            countdown_secs: args.countdown_secs,
            max_rounds: args.max_rounds,
            ..AppConfig::default()
        }
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    logging::init(args.verbose);
    let config = AppConfig::from(&args);

    let shared = SharedWorld::new(SimulationEngine::new(config.sim.clone()));

    // The reader blocks on stdin and is left running at exit.
    input::spawn_stdin_reader(InputAdapter::connect(&shared)).context("starting input")?;
    let render = RenderLoop::spawn(shared.clone(), config.render_period, HudLog::new(args.json))
        .context("starting renderer")?;

    let summary = RoundManager::new(shared, &config)
        .start()
        .context("starting rounds")?
        .join()?;
    render.stop()?;

    log::info!(
        "game ended in {:?} after clearing {} rounds",
        summary.final_phase,
        summary.rounds_cleared
    );
    Ok(())
}
