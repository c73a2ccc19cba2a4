//! Between-rounds countdown.

use std::thread;
use std::time::Duration;

use skirmish_sim::SharedWorld;

use crate::error::{spawn_named, Result, RuntimeError};

/// Counts down on its own thread, publishing the remaining seconds into the
/// engine so renderers can show them.
#[derive(Debug, Clone, Copy)]
pub struct Countdown {
    pub secs: u32,
    pub step: Duration,
}

impl Countdown {
    pub fn new(secs: u32, step: Duration) -> Self {
        Self { secs, step }
    }

    /// Run the whole countdown and block until it is over. The engine is left
    /// in the `Countdown` phase; the caller activates it.
    pub fn run(&self, shared: &SharedWorld) -> Result<()> {
        let Countdown { secs, step } = *self;
        let shared = shared.clone();
        spawn_named("countdown", move || {
            shared.with(|engine| engine.begin_countdown(secs));
            for remaining in (1..=secs).rev() {
                shared.with(|engine| engine.set_countdown(remaining));
                log::info!("next round in {}", remaining);
                thread::sleep(step);
            }
        })?
        .join()
        .map_err(|_| RuntimeError::Panicked { name: "countdown" })
    }
}
