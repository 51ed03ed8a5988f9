//! Periodic movement patterns for enemy ships.
//!
//! Every enemy moves in discrete steps on its own cadence rather than
//! gliding continuously; the stepping rhythm is the look of the game.
//! Step sizes come from the body's step speeds, cadences are in ticks.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::{GameError, Result};

use super::entity::Body;

/// Step direction for the square patrol cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Heading {
    Right,
    Up,
    Left,
    Down,
}

/// A movement pattern together with its per-ship progress.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum MovementPattern {
    /// Step horizontally, reversing after a fixed number of steps. Clamped
    /// to the playfield so a misplaced ship cannot walk off the edge.
    Patrol {
        moving_right: bool,
        steps_taken: u32,
        steps_per_leg: u32,
    },
    /// Cycle right, up, left, down around a fixed box, turning at its walls.
    SquarePatrol {
        heading: Heading,
        /// Outer box corners; positions are clamped inside
        min: Vec2,
        max: Vec2,
    },
    /// Step straight down; past the reset line, snap back to the spawn
    /// height and descend again.
    DescendAndReset { spawn_y: f32, reset_y: f32 },
}

/// A pattern plus its step cadence and countdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatternState {
    pub kind: MovementPattern,
    /// Ticks between movement steps
    pub step_interval: u32,
    /// Ticks until the next step
    pub countdown: u32,
}

impl PatternState {
    pub fn new(kind: MovementPattern, step_interval: u32) -> Self {
        Self {
            kind,
            step_interval,
            countdown: step_interval,
        }
    }

    /// Advances one tick. Returns true when a movement step fired, so the
    /// caller can flip the ship's animation frame.
    pub fn advance(&mut self, body: &mut Body) -> bool {
        self.countdown = self.countdown.saturating_sub(1);
        if self.countdown > 0 {
            return false;
        }
        self.countdown = self.step_interval;
        self.step(body);
        true
    }

    fn step(&mut self, body: &mut Body) {
        match &mut self.kind {
            MovementPattern::Patrol {
                moving_right,
                steps_taken,
                steps_per_leg,
            } => {
                if *moving_right {
                    body.move_right();
                } else {
                    body.move_left();
                }
                body.pos.x = body.pos.x.clamp(0.0, PLAYFIELD_WIDTH - body.width);
                *steps_taken += 1;
                if *steps_taken >= *steps_per_leg {
                    *moving_right = !*moving_right;
                    *steps_taken = 0;
                }
            }
            MovementPattern::SquarePatrol { heading, min, max } => {
                match heading {
                    Heading::Right => body.move_right(),
                    Heading::Up => body.move_up(),
                    Heading::Left => body.move_left(),
                    Heading::Down => body.move_down(),
                }
                body.pos.x = body.pos.x.clamp(min.x, max.x - body.width);
                body.pos.y = body.pos.y.clamp(min.y, max.y - body.height);
                *heading = match *heading {
                    Heading::Right if body.right() >= max.x => Heading::Up,
                    Heading::Up if body.top() <= min.y => Heading::Left,
                    Heading::Left if body.left() <= min.x => Heading::Down,
                    Heading::Down if body.bottom() >= max.y => Heading::Right,
                    other => other,
                };
            }
            MovementPattern::DescendAndReset { spawn_y, reset_y } => {
                body.move_down();
                if body.top() >= *reset_y {
                    body.pos.y = *spawn_y;
                }
            }
        }
    }
}

/// Patrol pattern for a formation slot. Levels 1-3 only; level 1 marches
/// everyone right first, later levels alternate direction by row, and each
/// level steps faster than the one before.
pub fn formation_pattern(level: u32, row: usize) -> Result<PatternState> {
    let speed_factor = match level {
        1 => 3,
        2 => 4,
        3 => 5,
        _ => {
            return Err(GameError::InvalidState(format!(
                "no formation pattern for level {level}"
            )));
        }
    };
    if row > 3 {
        return Err(GameError::InvalidState(format!(
            "no formation pattern for row {row}"
        )));
    }
    let moving_right = level == 1 || row % 2 == 0;
    Ok(PatternState::new(
        MovementPattern::Patrol {
            moving_right,
            steps_taken: 0,
            steps_per_leg: PATROL_STEPS_PER_LEG,
        },
        PATROL_BASE_INTERVAL_TICKS / speed_factor,
    ))
}

/// The boss's slow patrol across the top of its round.
pub fn boss_pattern() -> PatternState {
    PatternState::new(
        MovementPattern::Patrol {
            moving_right: true,
            steps_taken: 0,
            steps_per_leg: PATROL_STEPS_PER_LEG,
        },
        PATROL_BASE_INTERVAL_TICKS / 3,
    )
}

/// Square patrol for a boss escort, boxed around its spawn body and kept
/// inside the playfield.
pub fn escort_pattern(body: &Body) -> PatternState {
    let min = Vec2::new(
        (body.left() - SQUARE_PATROL_EXTENT).max(0.0),
        (body.top() - SQUARE_PATROL_EXTENT).max(0.0),
    );
    let max = Vec2::new(
        (body.right() + SQUARE_PATROL_EXTENT).min(PLAYFIELD_WIDTH),
        (body.bottom() + SQUARE_PATROL_EXTENT).min(PLAYFIELD_HEIGHT),
    );
    PatternState::new(
        MovementPattern::SquarePatrol {
            heading: Heading::Right,
            min,
            max,
        },
        SQUARE_STEP_INTERVAL_TICKS,
    )
}

/// The bonus ship's descend-and-reset entrance loop.
pub fn bonus_pattern(spawn_y: f32) -> PatternState {
    PatternState::new(
        MovementPattern::DescendAndReset {
            spawn_y,
            reset_y: BONUS_RESET_Y,
        },
        BONUS_STEP_INTERVAL_TICKS,
    )
}
