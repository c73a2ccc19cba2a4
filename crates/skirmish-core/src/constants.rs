//! Simulation constants and tuning parameters.
//!
//! Distances are arena units (one unit = one rendered pixel), speeds are
//! units per tick and durations are ticks unless stated otherwise.

/// Simulation tick rate (Hz).
pub const TICK_RATE: u32 = 100;

/// Nominal tick period in milliseconds.
pub const TICK_PERIOD_MS: u64 = 1000 / TICK_RATE as u64;

// --- Arena ---

/// Width and height of the square arena.
pub const ARENA_SIZE: i32 = 600;

/// Thickness of the four border walls.
pub const WALL_THICKNESS: i32 = 20;

// --- Player ---

/// Velocity added per tick for each held direction.
pub const PLAYER_ACCELERATION: f64 = 0.7;

/// Speed lost per tick to friction.
pub const PLAYER_FRICTION: f64 = PLAYER_ACCELERATION * 0.5;

/// Top speed while not attacking.
pub const PLAYER_MAX_SPEED: f64 = PLAYER_ACCELERATION * 4.0;

/// Top speed while a melee attack is in progress.
pub const PLAYER_REDUCED_MAX_SPEED: f64 = PLAYER_MAX_SPEED * 0.66;

/// Player hit points.
pub const PLAYER_MAX_HEALTH: i32 = 4;

pub const PLAYER_WIDTH: i32 = 30;
pub const PLAYER_HEIGHT: i32 = 30;

/// Spawn point of the player.
pub const PLAYER_START: (f64, f64) = (300.0, 300.0);

// --- Melee ---

/// Lifetime of a melee zone (ticks).
pub const MELEE_HIT_LENGTH: u32 = 10;

/// Damage dealt by a melee zone to an overlapping enemy.
pub const MELEE_DAMAGE: f64 = 2.3;

pub const MELEE_ZONE_WIDTH: i32 = 50;
pub const MELEE_ZONE_HEIGHT: i32 = 10;

/// Offset of the melee zone from the owner's rendered position.
pub const MELEE_ZONE_OFFSET: (i32, i32) = (-MELEE_ZONE_WIDTH / 4, -10);

// --- Ranged enemy ---

pub const ENEMY_ACCELERATION: f64 = PLAYER_ACCELERATION * 0.5;
pub const ENEMY_FRICTION: f64 = ENEMY_ACCELERATION * 0.5;
pub const ENEMY_MAX_SPEED: f64 = ENEMY_ACCELERATION * 4.0;

/// Magnitude of the kick an enemy receives when it fires.
pub const ENEMY_RECOIL: f64 = ENEMY_ACCELERATION * 4.0;

/// Beyond this distance the enemy approaches the player.
pub const ENEMY_RANGE: f64 = 300.0;

/// At or below this distance the enemy retreats from the player.
pub const ENEMY_TOO_CLOSE: f64 = ENEMY_RANGE - 100.0;

/// Base firing cooldown (ticks).
pub const ENEMY_COOLDOWN: u32 = 75;

/// Invulnerability window after taking damage (ticks).
pub const ENEMY_I_FRAMES: u32 = 50;

pub const ENEMY_MAX_HEALTH: f64 = 4.0;

pub const ENEMY_WIDTH: i32 = 20;
pub const ENEMY_HEIGHT: i32 = 20;

// --- Projectile ---

pub const PROJECTILE_WIDTH: i32 = 10;
pub const PROJECTILE_HEIGHT: i32 = PROJECTILE_WIDTH;

/// Projectile speed, fixed for its whole lifetime.
pub const PROJECTILE_SPEED: f64 = PLAYER_MAX_SPEED * 1.2;

/// Damage dealt to the player by one projectile (integer division).
pub const PROJECTILE_DAMAGE: i32 = PLAYER_MAX_HEALTH / 4;

// --- Waves ---

/// Minimum distance between enemies spawned in the same wave.
pub const SPAWN_SEPARATION: f64 = 50.0;

/// Lower bound of the spawn square on both axes.
pub const SPAWN_MIN: f64 = 50.0;

/// Extent of the spawn square on both axes.
pub const SPAWN_EXTENT: f64 = 500.0;

/// Rejection-sampling attempts per enemy before settling for the best candidate.
pub const SPAWN_MAX_ATTEMPTS: u32 = 1000;

/// Default length of the between-rounds countdown (seconds).
pub const COUNTDOWN_SECS: u32 = 5;

/// Default render period in milliseconds.
pub const RENDER_PERIOD_MS: u64 = 5;
