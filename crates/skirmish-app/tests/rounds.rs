//! End-to-end round flow with the clock, countdown and supervisor threads.

use std::time::Duration;

use skirmish_app::config::AppConfig;
use skirmish_app::round::RoundManager;
use skirmish_core::enums::{EntityKind, GamePhase};
use skirmish_core::state::GameStateSnapshot;
use skirmish_sim::{SharedWorld, SimConfig, SimulationEngine};

fn fast_config() -> AppConfig {
    AppConfig {
        tick_period: Duration::from_millis(1),
        render_period: Duration::from_millis(1),
        countdown_secs: 1,
        countdown_step: Duration::from_millis(1),
        ..AppConfig::default()
    }
}

fn shared() -> SharedWorld {
    SharedWorld::new(SimulationEngine::new(SimConfig::default()))
}

/// Poll snapshots until `done` holds, or fail after a few seconds.
fn wait_until(shared: &SharedWorld, done: impl Fn(&GameStateSnapshot) -> bool) -> GameStateSnapshot {
    for _ in 0..2_000 {
        let snapshot = shared.snapshot();
        if done(&snapshot) {
            return snapshot;
        }
        std::thread::sleep(Duration::from_millis(2));
    }
    panic!("condition not reached; last snapshot: {:?}", shared.snapshot());
}

fn enemy_ids(snapshot: &GameStateSnapshot) -> Vec<skirmish_core::types::EntityId> {
    snapshot
        .of_kind(EntityKind::RangedEnemy)
        .map(|view| view.id)
        .collect()
}

#[test]
fn test_cleared_wave_starts_next_round() {
    let shared = shared();
    let rounds = RoundManager::new(shared.clone(), &fast_config())
        .start()
        .unwrap();

    let first = wait_until(&shared, |s| s.phase == GamePhase::Active && s.time.tick > 0);
    assert_eq!(first.round, 0);
    let wave = enemy_ids(&first);
    assert_eq!(wave.len(), 1);
    assert_eq!(first.of_kind(EntityKind::Wall).count(), 4);

    assert!(shared.remove(wave[0]));

    let second = wait_until(&shared, |s| s.round == 1 && s.phase == GamePhase::Active);
    let wave = enemy_ids(&second);
    assert_eq!(wave.len(), 2);

    rounds.shutdown();
    let summary = rounds.join().unwrap();
    assert_eq!(summary.rounds_cleared, 1);
}

#[test]
fn test_max_rounds_ends_the_game() {
    let shared = shared();
    let config = AppConfig {
        max_rounds: Some(1),
        ..fast_config()
    };
    let rounds = RoundManager::new(shared.clone(), &config).start().unwrap();

    let first = wait_until(&shared, |s| s.phase == GamePhase::Active);
    for id in enemy_ids(&first) {
        shared.remove(id);
    }

    let summary = rounds.join().unwrap();
    assert_eq!(summary.rounds_cleared, 1);
    assert_eq!(summary.final_phase, GamePhase::WaveCleared);
    assert_eq!(shared.snapshot().round, 0);
}

#[test]
fn test_player_defeat_ends_the_game() {
    let shared = shared();
    let rounds = RoundManager::new(shared.clone(), &fast_config())
        .start()
        .unwrap();

    let first = wait_until(&shared, |s| s.phase == GamePhase::Active);
    let player = first
        .of_kind(EntityKind::Player)
        .next()
        .map(|view| view.id)
        .unwrap();
    shared.remove(player);

    let summary = rounds.join().unwrap();
    assert_eq!(summary.final_phase, GamePhase::GameOver);
    assert_eq!(summary.rounds_cleared, 0);
    assert_eq!(shared.snapshot().player_health, None);
}

#[test]
fn test_shutdown_during_countdown() {
    let shared = shared();
    let config = AppConfig {
        countdown_secs: 2,
        countdown_step: Duration::from_millis(20),
        ..fast_config()
    };
    let rounds = RoundManager::new(shared.clone(), &config).start().unwrap();
    rounds.shutdown();

    let summary = rounds.join().unwrap();
    assert_eq!(summary.rounds_cleared, 0);
    assert_eq!(summary.final_phase, GamePhase::Countdown);
    assert_eq!(shared.snapshot().time.tick, 0, "no tick ran");
}
