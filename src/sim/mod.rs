//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (by entity ID)
//! - No rendering or platform dependencies

pub mod collision;
pub mod entity;
pub mod pattern;
pub mod state;
pub mod tick;
pub mod wave;

pub use entity::{Body, Enemy, FiringBehavior, Hull, Player, Projectile, ProjectileSide};
pub use pattern::{Heading, MovementPattern, PatternState};
pub use state::{GameEvent, GamePhase, GameState, RngState, LEVEL_TRANSITION_TICKS};
pub use tick::{start_session, tick, TickInput};
pub use wave::{fire_delay_range, place_level};
