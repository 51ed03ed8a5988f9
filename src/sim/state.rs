//! Game state and core simulation types
//!
//! All state that must be persisted for replay/determinism lives here.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::audio::SoundEffect;
use crate::consts::*;

use super::entity::{Enemy, Hull, Player, Projectile};

/// Current phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for the first fire input
    Idle,
    /// Active gameplay
    Playing,
    /// Between-wave pause while the next formation is staged (5 seconds)
    LevelTransition,
    /// Run ended out of lives
    GameOver,
    /// Run ended by clearing the boss round
    GameWon,
}

impl GamePhase {
    /// Terminal phases accept no further simulation.
    #[inline]
    pub fn is_terminal(&self) -> bool {
        matches!(self, GamePhase::GameOver | GamePhase::GameWon)
    }
}

/// Session events for the host UI, drained once per frame. Deliberately
/// payload-free: the host re-reads whatever state it needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    EnemyKilled,
    PlayerHit,
    LevelChanged,
    GameOver,
    GameWon,
}

/// SplitMix64 finalizer. Per-decision draws hash the seed with whatever
/// identifies the decision, so the RNG state itself stays tiny.
#[inline]
pub(crate) fn mix64(mut x: u64) -> u64 {
    x = x.wrapping_add(0x9e37_79b9_7f4a_7c15);
    x = (x ^ (x >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
    x = (x ^ (x >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
    x ^ (x >> 31)
}

/// RNG state wrapper for serialization
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RngState {
    pub seed: u64,
    pub stream: u64,
}

impl RngState {
    pub fn new(seed: u64) -> Self {
        Self { seed, stream: 0 }
    }

    /// A generator for one named stream (wave placement, bonus draws)
    /// independent of every other stream.
    pub fn stream_rng(&self, stream: u64) -> Pcg32 {
        Pcg32::seed_from_u64(self.seed ^ mix64(stream))
    }
}

/// Complete game state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// RNG state
    pub rng_state: RngState,
    /// Current level (1-based)
    pub level: u32,
    /// Current phase
    pub phase: GamePhase,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// The player aggregate
    pub player: Player,
    /// Active enemies (sorted by id for determinism)
    pub enemies: Vec<Enemy>,
    /// Active projectiles (sorted by id for determinism)
    pub projectiles: Vec<Projectile>,
    /// Double-ship power level: 0 none, each step widens the bullet cap
    pub power_level: u32,
    /// Ticks left on the double-ship power-up
    pub power_ticks: u32,
    /// One bonus ship at a time; latched while it is on the field
    pub bonus_active: bool,
    /// Ticks until the next bonus spawn roll
    pub bonus_roll_ticks: u32,
    /// Ticks left in the level-transition pause
    pub transition_ticks: u32,
    /// Pending events for the host (drained each frame)
    #[serde(skip)]
    pub events: Vec<GameEvent>,
    /// Pending sound triggers for the host (drained each frame)
    #[serde(skip)]
    pub sounds: Vec<SoundEffect>,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    /// Create a new game state with the given seed. The player ship is
    /// placed; enemies arrive when the session starts.
    pub fn new(seed: u64) -> Self {
        let mut state = Self {
            seed,
            rng_state: RngState::new(seed),
            level: 1,
            phase: GamePhase::Idle,
            time_ticks: 0,
            player: Player::new(),
            enemies: Vec::new(),
            projectiles: Vec::new(),
            power_level: 0,
            power_ticks: 0,
            bonus_active: false,
            bonus_roll_ticks: BONUS_ROLL_INTERVAL_TICKS,
            transition_ticks: 0,
            events: Vec::new(),
            sounds: Vec::new(),
            next_id: 1,
        };

        let id = state.next_entity_id();
        state.player.hulls.push(Hull::new(id));

        state
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// In-flight player bullets allowed right now.
    #[inline]
    pub fn bullet_cap(&self) -> u32 {
        BASE_BULLET_CAP * (self.power_level + 1)
    }

    /// Grants the double-ship power-up, or deepens it when already active.
    /// The second hull appears beside the first; further grants only widen
    /// the bullet cap and refresh the timer.
    pub fn activate_power_up(&mut self) {
        self.power_level = (self.power_level + 1).min(MAX_POWER_LEVEL);
        self.power_ticks = POWER_UP_TICKS;
        if self.player.hulls.len() < 2 {
            let beside = self.player.hulls.first().map(|lead| {
                Vec2::new(
                    lead.body.right().min(PLAYFIELD_WIDTH - PLAYER_WIDTH),
                    lead.body.top(),
                )
            });
            if let Some(pos) = beside {
                let id = self.next_entity_id();
                let mut hull = Hull::new(id);
                hull.body.pos = pos;
                self.player.hulls.push(hull);
            }
        }
        self.sounds.push(SoundEffect::PowerUpLoopStart);
    }

    /// Ends the double-ship power-up and retires the extra hull. Calling
    /// this with no power-up active is a no-op.
    pub fn end_power_up(&mut self) {
        if self.power_level == 0 {
            return;
        }
        self.power_level = 0;
        self.power_ticks = 0;
        self.player.hulls.truncate(1);
        self.sounds.push(SoundEffect::PowerUpLoopStop);
    }

    /// Ensure entity lists are sorted by ID for deterministic iteration
    pub fn normalize_order(&mut self) {
        self.enemies.sort_by_key(|e| e.id);
        self.projectiles.sort_by_key(|p| p.id);
    }
}

/// Level-transition pause duration in ticks (5 seconds at 200 Hz)
pub const LEVEL_TRANSITION_TICKS: u32 = 5 * 200;
