//! Runtime configuration for the headless shell.

use std::time::Duration;

use skirmish_core::constants::{COUNTDOWN_SECS, RENDER_PERIOD_MS, TICK_PERIOD_MS};
use skirmish_sim::SimConfig;

/// Timing and lifetime settings. CLI flags override the defaults.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub sim: SimConfig,
    /// Nominal period of the simulation clock.
    pub tick_period: Duration,
    /// How often the render loop takes a snapshot.
    pub render_period: Duration,
    /// Length of each between-rounds countdown, in steps.
    pub countdown_secs: u32,
    /// Duration of one countdown step. One second outside tests.
    pub countdown_step: Duration,
    /// Stop after this many cleared waves.
    pub max_rounds: Option<u32>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            sim: SimConfig::default(),
            tick_period: Duration::from_millis(TICK_PERIOD_MS),
            render_period: Duration::from_millis(RENDER_PERIOD_MS),
            countdown_secs: COUNTDOWN_SECS,
            countdown_step: Duration::from_secs(1),
            max_rounds: None,
        }
    }
}
