//! Render loop: hands a fresh snapshot to a consumer every render period.
//!
//! Snapshots are taken under the engine lock, so a consumer only ever sees
//! the state between ticks. Consumers run on the render thread and never
//! touch the engine.

use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::sync::{Arc, Mutex, PoisonError};
use std::thread::JoinHandle;
use std::time::Duration;

use skirmish_core::enums::GamePhase;
use skirmish_core::state::GameStateSnapshot;
use skirmish_sim::SharedWorld;

use crate::error::{spawn_named, Result, RuntimeError};

/// Something that displays snapshots.
pub trait RenderSnapshotConsumer: Send {
    fn present(&mut self, snapshot: &GameStateSnapshot);
}

/// Keeps the most recent snapshot for synchronous polling.
#[derive(Clone, Default)]
pub struct LatestSnapshot {
    cell: Arc<Mutex<Option<GameStateSnapshot>>>,
}

impl LatestSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self) -> Option<GameStateSnapshot> {
        self.cell
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl RenderSnapshotConsumer for LatestSnapshot {
    fn present(&mut self, snapshot: &GameStateSnapshot) {
        *self.cell.lock().unwrap_or_else(PoisonError::into_inner) = Some(snapshot.clone());
    }
}

/// The HUD fields; a line is emitted whenever one of them changes.
#[derive(Debug, Clone, PartialEq)]
struct Hud {
    phase: GamePhase,
    round: u32,
    countdown: Option<u32>,
    health: Option<i32>,
    enemies: u32,
}

impl From<&GameStateSnapshot> for Hud {
    fn from(snapshot: &GameStateSnapshot) -> Self {
        Self {
            phase: snapshot.phase,
            round: snapshot.round,
            countdown: snapshot.countdown,
            health: snapshot.player_health,
            enemies: snapshot.enemies_remaining,
        }
    }
}

/// Headless renderer: logs a HUD line on every change, or prints the whole
/// snapshot as JSON to stdout.
#[derive(Default)]
pub struct HudLog {
    json: bool,
    last: Option<Hud>,
    lines: u64,
}

impl HudLog {
    pub fn new(json: bool) -> Self {
        Self {
            json,
            ..Self::default()
        }
    }

    /// Number of HUD updates emitted so far.
    pub fn lines(&self) -> u64 {
        self.lines
    }
}

impl RenderSnapshotConsumer for HudLog {
    fn present(&mut self, snapshot: &GameStateSnapshot) {
        let hud = Hud::from(snapshot);
        if self.last.as_ref() == Some(&hud) {
            return;
        }
        self.lines += 1;

        if self.json {
            match serde_json::to_string(snapshot) {
                Ok(json) => println!("{json}"),
                Err(err) => log::warn!("snapshot not serializable: {err}"),
            }
        } else {
            let health = hud
                .health
                .map_or_else(|| "-".to_owned(), |h| h.to_string());
            match hud.countdown {
                Some(secs) => log::info!("round {} | starting in {}", hud.round + 1, secs),
                None => log::info!(
                    "round {} | {:?} | health {} | enemies {}",
                    hud.round + 1,
                    hud.phase,
                    health,
                    hud.enemies
                ),
            }
        }
        self.last = Some(hud);
    }
}

/// Handle to the render thread.
pub struct RenderLoop {
    stop: Sender<()>,
    thread: JoinHandle<()>,
}

impl RenderLoop {
    /// Start presenting snapshots of `shared` to `consumer` every `period`.
    pub fn spawn<C>(shared: SharedWorld, period: Duration, mut consumer: C) -> Result<Self>
    where
        C: RenderSnapshotConsumer + 'static,
    {
        let (stop, stop_rx) = mpsc::channel();
        let thread = spawn_named("render", move || loop {
            consumer.present(&shared.snapshot());
            match stop_rx.recv_timeout(period) {
                Err(RecvTimeoutError::Timeout) => {}
                Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
            }
        })?;
        Ok(Self { stop, thread })
    }

    /// Stop the render thread and wait for it.
    pub fn stop(self) -> Result<()> {
        let _ = self.stop.send(());
        self.thread
            .join()
            .map_err(|_| RuntimeError::Panicked { name: "render" })
    }
}
