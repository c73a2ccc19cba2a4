//! Simulation engine, the core of the game.
//!
//! `SimulationEngine` owns the world, processes player commands, runs one
//! tick at a time and produces `GameStateSnapshot`s. Completely headless and
//! single-threaded; the app wraps it in a [`SharedWorld`](crate::SharedWorld)
//! and drives it from a clock thread.

use std::collections::VecDeque;
use std::sync::mpsc::Receiver;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use skirmish_core::commands::PlayerCommand;
use skirmish_core::components::{DirectionalInput, PlayerState};
use skirmish_core::enums::{EntityKind, GamePhase};
use skirmish_core::events::GameEvent;
use skirmish_core::state::GameStateSnapshot;
use skirmish_core::types::SimTime;

use crate::systems;
use crate::world::WorldState;
use crate::world_setup;

/// Configuration for starting a new simulation.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// RNG seed for determinism. Same seed = same simulation.
    pub seed: u64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self { seed: 42 }
    }
}

/// How a tick ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// The engine was not active; nothing moved.
    Idle,
    Continue,
    /// The last enemy of the wave is gone. The engine is now `WaveCleared`.
    WaveCleared,
    /// The player was destroyed. The engine is now `GameOver`.
    PlayerDefeated,
}

/// Result of one call to [`SimulationEngine::tick`].
#[derive(Debug, Clone)]
pub struct TickReport {
    /// Tick counter after this tick.
    pub tick: u64,
    pub outcome: TickOutcome,
    pub events: Vec<GameEvent>,
}

/// The simulation engine. Owns the world and all sim state.
pub struct SimulationEngine {
    world: WorldState,
    time: SimTime,
    phase: GamePhase,
    round: u32,
    /// Set when a wave is cleared, consumed by `next_wave`.
    wave_cleared: bool,
    countdown: Option<u32>,
    rng: ChaCha8Rng,
    command_queue: VecDeque<PlayerCommand>,
    input: Option<Receiver<PlayerCommand>>,
    events: Vec<GameEvent>,
}

impl SimulationEngine {
    /// Create a new simulation engine with the given config.
    pub fn new(config: SimConfig) -> Self {
        Self {
            world: WorldState::new(),
            time: SimTime::default(),
            phase: GamePhase::default(),
            round: 0,
            wave_cleared: false,
            countdown: None,
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            command_queue: VecDeque::new(),
            input: None,
            events: Vec::new(),
        }
    }

    /// Queue a player command for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: PlayerCommand) {
        self.command_queue.push_back(command);
    }

    /// Queue multiple commands.
    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = PlayerCommand>) {
        self.command_queue.extend(commands);
    }

    /// Drain commands from `receiver` at the start of every tick.
    pub fn attach_input(&mut self, receiver: Receiver<PlayerCommand>) {
        self.input = Some(receiver);
    }

    /// Advance the simulation by one tick.
    ///
    /// Commands are always applied. Entities only move while `Active`; the
    /// round-completion and player-death checks run at the end of the same
    /// tick.
    pub fn tick(&mut self) -> TickReport {
        self.process_commands();

        if self.phase != GamePhase::Active {
            return TickReport {
                tick: self.time.tick,
                outcome: TickOutcome::Idle,
                events: Vec::new(),
            };
        }

        systems::player::start_requested_melee(&mut self.world, &mut self.events);
        systems::tick::run(&mut self.world, &mut self.events);
        self.time.advance();

        let outcome = if self.world.player().is_none() {
            log::info!("player defeated in round {}", self.round);
            self.phase = GamePhase::GameOver;
            TickOutcome::PlayerDefeated
        } else if self.world.count(EntityKind::RangedEnemy) == 0 {
            log::info!("round {} cleared at tick {}", self.round, self.time.tick);
            self.phase = GamePhase::WaveCleared;
            self.wave_cleared = true;
            self.events.push(GameEvent::WaveCleared { round: self.round });
            TickOutcome::WaveCleared
        } else {
            TickOutcome::Continue
        };

        TickReport {
            tick: self.time.tick,
            outcome,
            events: std::mem::take(&mut self.events),
        }
    }

    /// Build a snapshot of the current state.
    pub fn snapshot(&self) -> GameStateSnapshot {
        systems::snapshot::build_snapshot(
            &self.world,
            &self.time,
            self.phase,
            self.round,
            self.countdown,
        )
    }

    /// Reset the world to walls and a fresh player, back at round 0.
    pub fn setup_arena(&mut self) {
        self.world.clear();
        world_setup::setup_arena(&mut self.world);
        self.time = SimTime::default();
        self.phase = GamePhase::Spawning;
        self.round = 0;
        self.wave_cleared = false;
        self.countdown = None;
        self.command_queue.clear();
        self.events.clear();
    }

    /// Spawn the wave for the current round (`round + 1` enemies).
    pub fn spawn_wave(&mut self) {
        self.phase = GamePhase::Spawning;
        let count = self.round as usize + 1;
        systems::wave_spawner::spawn_wave(&mut self.world, &mut self.rng, count);
        log::info!("round {}: spawned {} enemies", self.round, count);
    }

    /// Move on from a cleared wave: increment the round and spawn its enemies.
    /// Does nothing unless a wave was cleared since the last call.
    pub fn next_wave(&mut self) -> bool {
        if !std::mem::take(&mut self.wave_cleared) {
            return false;
        }
        self.round += 1;
        self.spawn_wave();
        true
    }

    /// Enter the between-rounds countdown.
    pub fn begin_countdown(&mut self, secs: u32) {
        self.phase = GamePhase::Countdown;
        self.countdown = Some(secs);
    }

    /// Publish the seconds left in the countdown.
    pub fn set_countdown(&mut self, secs: u32) {
        self.countdown = Some(secs);
    }

    /// Start (or resume) ticking.
    pub fn activate(&mut self) {
        self.countdown = None;
        self.phase = GamePhase::Active;
    }

    /// Get the current game phase.
    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    /// Zero-based index of the current wave.
    pub fn round(&self) -> u32 {
        self.round
    }

    /// Get the current simulation time.
    pub fn time(&self) -> SimTime {
        self.time
    }

    pub fn enemies_remaining(&self) -> usize {
        self.world.count(EntityKind::RangedEnemy)
    }

    /// Get a read-only reference to the world.
    pub fn world(&self) -> &WorldState {
        &self.world
    }

    /// Get a mutable reference to the world.
    pub fn world_mut(&mut self) -> &mut WorldState {
        &mut self.world
    }

    /// Process all queued and channel-delivered commands.
    fn process_commands(&mut self) {
        if let Some(input) = &self.input {
            self.command_queue.extend(input.try_iter());
        }
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command);
        }
    }

    /// Stage a single player command on the player's state.
    fn handle_command(&mut self, command: PlayerCommand) {
        let Some(player) = self.world.player() else {
            return;
        };
        let Ok(mut ps) = self.world.ecs().get::<&mut PlayerState>(player) else {
            return;
        };
        match command {
            PlayerCommand::SetDirectionalInput {
                up,
                down,
                left,
                right,
            } => {
                ps.input = DirectionalInput {
                    up,
                    down,
                    left,
                    right,
                };
            }
            PlayerCommand::MeleeAttack => {
                if !ps.is_attacking() {
                    ps.melee_requested = true;
                }
            }
        }
    }
}
