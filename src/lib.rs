//! Swarm Strike - a fixed-formation arcade shoot-'em-up simulation core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (movement patterns, firing, collisions)
//! - `session`: Frame loop wiring the simulation to host-provided sinks
//! - `platform`: Render and input seams implemented by the host shell
//! - `audio`: Sound trigger vocabulary and the host audio sink
//! - `highscores`: Leaderboard with the three classic sort orders
//! - `persistence`: Pluggable string storage for scores and settings
//! - `settings`: Player preferences

pub mod audio;
pub mod error;
pub mod highscores;
pub mod persistence;
pub mod platform;
pub mod session;
pub mod settings;
pub mod sim;

pub use error::{GameError, Result};
pub use highscores::{HighScores, SortOrder};
pub use session::GameSession;
pub use settings::Settings;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (200 Hz, the projectile clock rate)
    pub const SIM_DT: f32 = 1.0 / 200.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Converts a millisecond duration to whole simulation ticks.
    pub const fn ticks_from_ms(ms: u32) -> u32 {
        ms / 5
    }

    /// Playfield dimensions (pixels)
    pub const PLAYFIELD_WIDTH: f32 = 800.0;
    pub const PLAYFIELD_HEIGHT: f32 = 480.0;

    /// Player ship sprite size
    pub const PLAYER_WIDTH: f32 = 50.0;
    pub const PLAYER_HEIGHT: f32 = 40.0;
    /// Gap between the player ship and the bottom edge
    pub const PLAYER_OFFSET_FROM_BOTTOM: f32 = 30.0;
    /// Pixels the player covers per input step
    pub const PLAYER_SPEED_X: i32 = 3;
    /// Input steps per second, the rate the step size is tuned against
    pub const PLAYER_STEPS_PER_SEC: f32 = 60.0;
    pub const PLAYER_START_LIVES: u32 = 3;

    /// Formation enemy sprite size (the bonus ship shares it)
    pub const ENEMY_WIDTH: f32 = 60.0;
    pub const ENEMY_HEIGHT: f32 = 40.0;
    /// Boss sprite size
    pub const BOSS_WIDTH: f32 = 100.0;
    pub const BOSS_HEIGHT: f32 = 60.0;

    /// Projectile sprite size
    pub const BULLET_WIDTH: f32 = 4.0;
    pub const BULLET_HEIGHT: f32 = 12.0;
    /// Player bullets cover 10 px per 5 ms tick
    pub const PLAYER_BULLET_SPEED: f32 = 2000.0;
    /// Enemy bullets cover 10 px per 50 ms, slow enough to dodge
    pub const ENEMY_BULLET_SPEED: f32 = 200.0;
    /// In-flight player bullets allowed per power level step
    pub const BASE_BULLET_CAP: u32 = 3;

    /// Pixels an enemy covers per movement step
    pub const MOVE_PER_STEP: i32 = 10;
    /// Steps a patrolling enemy takes before reversing direction
    pub const PATROL_STEPS_PER_LEG: u32 = 10;
    /// Patrol step interval scale; a row's interval is this divided by its
    /// speed factor (factor 3 steps once a second)
    pub const PATROL_BASE_INTERVAL_TICKS: u32 = ticks_from_ms(3000);
    /// Square-patrol step interval (boss escorts)
    pub const SQUARE_STEP_INTERVAL_TICKS: u32 = ticks_from_ms(150);
    /// How far a square patrol ranges beyond its spawn box on each axis
    pub const SQUARE_PATROL_EXTENT: f32 = 50.0;
    /// Bonus ship descent step interval
    pub const BONUS_STEP_INTERVAL_TICKS: u32 = ticks_from_ms(50);
    /// Descent line at which the bonus ship snaps back to the top
    pub const BONUS_RESET_Y: f32 = PLAYFIELD_HEIGHT - ENEMY_HEIGHT;

    /// Horizontal distance between formation slots
    pub const FORMATION_SPACING: f32 = 100.0;
    /// Levels 1-3 are formation waves; level 4 is the boss round
    pub const MAX_LEVEL: u32 = 4;

    /// Post-hit invincibility window (ship hidden, fire gated)
    pub const INVINCIBILITY_TICKS: u32 = ticks_from_ms(3000);
    /// Double-ship power-up duration
    pub const POWER_UP_TICKS: u32 = ticks_from_ms(30_000);
    /// Highest double-ship power level; each level widens the bullet cap
    pub const MAX_POWER_LEVEL: u32 = 2;

    /// Interval between bonus-ship spawn rolls
    pub const BONUS_ROLL_INTERVAL_TICKS: u32 = ticks_from_ms(10_000);
    /// Chance (percent) that a spawn roll produces a bonus ship
    pub const BONUS_SPAWN_PERCENT: u64 = 30;
    pub const BONUS_SCORE: u32 = 100;

    pub const BOSS_SCORE: u32 = 500;
    pub const ESCORT_SCORE: u32 = 40;
    pub const ESCORT_COUNT: u32 = 6;
    /// Radius of the escort ring around the boss
    pub const ESCORT_RING_RADIUS: f32 = 100.0;
    /// Boss vertical position, low enough for the escort ring to fit
    pub const BOSS_SPAWN_Y: f32 = 100.0;
}

/// Unit vector pointing from `from` toward `to`, computed through `atan2`
/// so the result is well-defined for every axis-aligned case.
#[inline]
pub fn aim_at(from: Vec2, to: Vec2) -> Vec2 {
    let angle = (to.y - from.y).atan2(to.x - from.x);
    Vec2::new(angle.cos(), angle.sin())
}
