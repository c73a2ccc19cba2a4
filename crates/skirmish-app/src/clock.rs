//! Fixed-period tick scheduler.
//!
//! `SimulationClock` runs a callback on its own thread once per period.
//! Ticks are strictly sequential: a tick that overruns delays the next one,
//! which then starts immediately. Missed periods are never caught up.

use std::ops::ControlFlow;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use crate::error::{spawn_named, Result};

struct Running {
    stop: Sender<()>,
    thread: JoinHandle<()>,
}

pub struct SimulationClock {
    period: Duration,
    running: Option<Running>,
}

impl SimulationClock {
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            running: None,
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Whether a schedule is live. A schedule ended by its callback returning
    /// `Break` reports `false` once its thread has exited.
    pub fn is_running(&self) -> bool {
        self.running
            .as_ref()
            .is_some_and(|running| !running.thread.is_finished())
    }

    /// Start a fresh schedule. The callback receives the tick index, starting
    /// at 0, and fires immediately for tick 0. A running schedule is stopped
    /// first.
    pub fn start<F>(&mut self, callback: F) -> Result<()>
    where
        F: FnMut(u64) -> ControlFlow<()> + Send + 'static,
    {
        self.stop();
        let (stop, stop_rx) = mpsc::channel();
        let period = self.period;
        let thread = spawn_named("clock", move || run_schedule(period, stop_rx, callback))?;
        self.running = Some(Running { stop, thread });
        log::debug!("clock started, period {:?}", period);
        Ok(())
    }

    /// Cancel future ticks and wait for an in-flight tick to finish.
    /// Calling it again, or on a clock that never started, does nothing.
    pub fn stop(&mut self) {
        let Some(running) = self.running.take() else {
            return;
        };
        let _ = running.stop.send(());
        if running.thread.join().is_err() {
            log::error!("clock thread panicked during a tick");
        }
        log::debug!("clock stopped");
    }
}

impl Drop for SimulationClock {
    fn drop(&mut self) {
        self.stop();
    }
}

fn run_schedule<F>(period: Duration, stop: Receiver<()>, mut callback: F)
where
    F: FnMut(u64) -> ControlFlow<()>,
{
    let mut tick = 0u64;
    loop {
        let started = Instant::now();
        if callback(tick).is_break() {
            return;
        }
        tick += 1;

        let wait = period.saturating_sub(started.elapsed());
        match stop.recv_timeout(wait) {
            Err(RecvTimeoutError::Timeout) => {}
            Ok(()) | Err(RecvTimeoutError::Disconnected) => return,
        }
    }
}
