//! Round supervisor. Drives waves, countdowns and the simulation clock.
//!
//! The supervisor runs on its own thread. The tick callback detects the end
//! of a round inside the tick (under the engine lock), ends the clock
//! schedule from the clock thread and signals the supervisor, which then
//! stops the clock, counts down and spawns the next wave.

use std::ops::ControlFlow;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread::JoinHandle;
use std::time::Duration;

use skirmish_core::enums::GamePhase;
use skirmish_sim::{SharedWorld, TickOutcome};

use crate::clock::SimulationClock;
use crate::config::AppConfig;
use crate::countdown::Countdown;
use crate::error::{spawn_named, Result, RuntimeError};

enum Signal {
    /// A tick ended the round (wave cleared or player defeated).
    RoundOver(TickOutcome),
    Shutdown,
}

/// How the game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundSummary {
    pub rounds_cleared: u32,
    pub final_phase: GamePhase,
}

pub struct RoundManager {
    shared: SharedWorld,
    tick_period: Duration,
    countdown: Countdown,
    max_rounds: Option<u32>,
}

/// Handle to a running supervisor.
pub struct RoundHandle {
    signals: Sender<Signal>,
    thread: JoinHandle<Result<RoundSummary>>,
}

impl RoundManager {
    pub fn new(shared: SharedWorld, config: &AppConfig) -> Self {
        Self {
            shared,
            tick_period: config.tick_period,
            countdown: Countdown::new(config.countdown_secs, config.countdown_step),
            max_rounds: config.max_rounds,
        }
    }

    /// Populate the arena and start the round loop on its own thread.
    pub fn start(self) -> Result<RoundHandle> {
        let (signals, inbox) = mpsc::channel();
        let outbox = signals.clone();
        let thread = spawn_named("rounds", move || self.supervise(outbox, inbox))?;
        Ok(RoundHandle { signals, thread })
    }

    fn supervise(self, outbox: Sender<Signal>, inbox: Receiver<Signal>) -> Result<RoundSummary> {
        let mut clock = SimulationClock::new(self.tick_period);
        let mut rounds_cleared = 0;

        self.shared.with(|engine| {
            engine.setup_arena();
            engine.spawn_wave();
        });

        loop {
            self.countdown.run(&self.shared)?;
            if matches!(inbox.try_recv(), Ok(Signal::Shutdown)) {
                break;
            }
            self.shared.with(|engine| {
                engine.next_wave();
                engine.activate();
            });

            clock.start(round_ticker(self.shared.clone(), outbox.clone()))?;
            let signal = inbox.recv();
            clock.stop();

            match signal {
                Ok(Signal::RoundOver(TickOutcome::WaveCleared)) => {
                    rounds_cleared += 1;
                    if self.max_rounds.is_some_and(|max| rounds_cleared >= max) {
                        log::info!("cleared {} rounds, stopping", rounds_cleared);
                        break;
                    }
                }
                Ok(Signal::RoundOver(_)) => break,
                Ok(Signal::Shutdown) | Err(_) => {
                    log::info!("round supervisor shutting down");
                    break;
                }
            }
        }

        let final_phase = self.shared.with(|engine| engine.phase());
        Ok(RoundSummary {
            rounds_cleared,
            final_phase,
        })
    }
}

/// Tick callback: one engine tick per clock tick, ending the schedule as
/// soon as a tick ends the round.
fn round_ticker(
    shared: SharedWorld,
    outbox: Sender<Signal>,
) -> impl FnMut(u64) -> ControlFlow<()> + Send + 'static {
    move |_| {
        let report = shared.tick();
        match report.outcome {
            TickOutcome::Continue | TickOutcome::Idle => ControlFlow::Continue(()),
            outcome => {
                let _ = outbox.send(Signal::RoundOver(outcome));
                ControlFlow::Break(())
            }
        }
    }
}

impl RoundHandle {
    /// Ask the supervisor to stop after the current tick (or countdown).
    pub fn shutdown(&self) {
        let _ = self.signals.send(Signal::Shutdown);
    }

    pub fn is_finished(&self) -> bool {
        self.thread.is_finished()
    }

    /// Wait for the supervisor to finish.
    pub fn join(self) -> Result<RoundSummary> {
        self.thread
            .join()
            .map_err(|_| RuntimeError::Panicked { name: "rounds" })?
    }
}
