//! Ships and projectiles: the things that occupy the playfield.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::{GameError, Result};

use super::pattern::PatternState;

/// Axis-aligned body shared by every on-field entity: top-left position,
/// sprite size, and the integer step speeds. Direction is applied by the
/// caller through the move helpers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Body {
    /// Top-left corner
    pub pos: Vec2,
    pub width: f32,
    pub height: f32,
    /// Horizontal step size in pixels
    pub speed_x: i32,
    /// Vertical step size in pixels
    pub speed_y: i32,
}

impl Body {
    pub fn new(pos: Vec2, width: f32, height: f32) -> Self {
        Self {
            pos,
            width,
            height,
            speed_x: 0,
            speed_y: 0,
        }
    }

    /// Sets the step speeds. Speeds are magnitudes; negatives are rejected.
    pub fn set_speed(&mut self, speed_x: i32, speed_y: i32) -> Result<()> {
        if speed_x < 0 {
            return Err(GameError::InvalidArgument(format!(
                "speed_x must be non-negative, got {speed_x}"
            )));
        }
        if speed_y < 0 {
            return Err(GameError::InvalidArgument(format!(
                "speed_y must be non-negative, got {speed_y}"
            )));
        }
        self.speed_x = speed_x;
        self.speed_y = speed_y;
        Ok(())
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.pos.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.width
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.height
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.pos.x + self.width / 2.0, self.pos.y + self.height / 2.0)
    }

    /// Continuous move for dt-scaled motion.
    #[inline]
    pub fn move_by(&mut self, dx: f32, dy: f32) {
        self.pos.x += dx;
        self.pos.y += dy;
    }

    /// One step left at the current horizontal speed.
    #[inline]
    pub fn move_left(&mut self) {
        self.pos.x -= self.speed_x as f32;
    }

    /// One step right at the current horizontal speed.
    #[inline]
    pub fn move_right(&mut self) {
        self.pos.x += self.speed_x as f32;
    }

    /// One step up at the current vertical speed.
    #[inline]
    pub fn move_up(&mut self) {
        self.pos.y -= self.speed_y as f32;
    }

    /// One step down at the current vertical speed.
    #[inline]
    pub fn move_down(&mut self) {
        self.pos.y += self.speed_y as f32;
    }

    /// Strict AABB overlap test: bodies whose edges merely touch do not
    /// intersect.
    #[inline]
    pub fn intersects(&self, other: &Body) -> bool {
        self.left() < other.right()
            && self.right() > other.left()
            && self.top() < other.bottom()
            && self.bottom() > other.top()
    }
}

/// Which side launched a projectile; decides what it can hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProjectileSide {
    Player,
    Enemy,
}

/// A bullet in flight. Velocity is baked in at spawn; tracking shots aim
/// once and never steer afterward.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub id: u32,
    pub body: Body,
    /// Velocity in pixels per second
    pub vel: Vec2,
    pub side: ProjectileSide,
}

impl Projectile {
    pub fn new(id: u32, pos: Vec2, vel: Vec2, side: ProjectileSide) -> Self {
        Self {
            id,
            body: Body::new(pos, BULLET_WIDTH, BULLET_HEIGHT),
            vel,
            side,
        }
    }

    /// True once the bullet has fully left the playfield.
    pub fn out_of_bounds(&self) -> bool {
        self.body.bottom() < 0.0
            || self.body.top() > PLAYFIELD_HEIGHT
            || self.body.right() < 0.0
            || self.body.left() > PLAYFIELD_WIDTH
    }
}

/// What an enemy's gun does, if it carries one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FiringBehavior {
    /// Never fires (the decorative top rows)
    None,
    /// Fires straight down its lane
    Straight,
    /// Aims at the player's position at the moment of firing
    TrackPlayer,
}

impl FiringBehavior {
    #[inline]
    pub fn fires(&self) -> bool {
        !matches!(self, FiringBehavior::None)
    }
}

/// An enemy ship: a body, a movement pattern, a score value, and a gun.
/// Formation grunts, the boss, its escorts, and the bonus ship are all the
/// same type with different parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub id: u32,
    pub body: Body,
    pub score_value: u32,
    pub pattern: PatternState,
    pub firing: FiringBehavior,
    /// Ticks until the next shot; ignored when the gun is `None`
    pub fire_countdown: u32,
    /// Bonus ships grant a reward on death and release the spawn latch
    pub is_bonus: bool,
    /// Two-sprite animation toggle, flipped once per movement step
    pub frame_flipped: bool,
}

impl Enemy {
    pub fn new(
        id: u32,
        pos: Vec2,
        score_value: u32,
        pattern: PatternState,
        firing: FiringBehavior,
    ) -> Self {
        let mut body = Body::new(pos, ENEMY_WIDTH, ENEMY_HEIGHT);
        body.speed_x = MOVE_PER_STEP;
        body.speed_y = MOVE_PER_STEP;
        Self {
            id,
            body,
            score_value,
            pattern,
            firing,
            fire_countdown: 0,
            is_bonus: false,
            frame_flipped: false,
        }
    }
}

/// One player-controlled ship body. A second hull flies alongside while the
/// double-ship power-up is active.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Hull {
    pub id: u32,
    pub body: Body,
}

impl Hull {
    /// A hull at the spawn position: centered, just above the bottom edge.
    pub fn new(id: u32) -> Self {
        let pos = Vec2::new(
            PLAYFIELD_WIDTH / 2.0 - PLAYER_WIDTH / 2.0,
            PLAYFIELD_HEIGHT - PLAYER_HEIGHT - PLAYER_OFFSET_FROM_BOTTOM,
        );
        let mut body = Body::new(pos, PLAYER_WIDTH, PLAYER_HEIGHT);
        body.speed_x = PLAYER_SPEED_X;
        Self { id, body }
    }
}

/// The player: lives, score, fire bookkeeping, and one or two hulls.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub lives: u32,
    pub score: u64,
    pub hulls: Vec<Hull>,
    /// Player bullets currently on the field, counted against the cap
    pub bullets_in_flight: u32,
    /// Remaining post-hit invincibility; the ship is hidden while this runs
    pub invincible_ticks: u32,
    pub hidden: bool,
    /// Fire gate; closed after a hit and during level transitions
    pub can_shoot: bool,
}

impl Player {
    pub fn new() -> Self {
        Self {
            lives: PLAYER_START_LIVES,
            score: 0,
            hulls: Vec::new(),
            bullets_in_flight: 0,
            invincible_ticks: 0,
            hidden: false,
            can_shoot: false,
        }
    }

    #[inline]
    pub fn is_invincible(&self) -> bool {
        self.invincible_ticks > 0
    }
}

impl Default for Player {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::pattern;

    #[test]
    fn test_set_speed_rejects_negative() {
        let mut body = Body::new(Vec2::ZERO, 10.0, 10.0);
        assert!(body.set_speed(3, 0).is_ok());
        assert_eq!(body.speed_x, 3);

        let err = body.set_speed(-1, 0).unwrap_err();
        assert!(matches!(err, GameError::InvalidArgument(_)));
        // A rejected call leaves the previous speeds in place.
        assert_eq!(body.speed_x, 3);
        assert_eq!(body.speed_y, 0);

        assert!(body.set_speed(0, -5).is_err());
    }

    #[test]
    fn test_directional_moves_use_step_speeds() {
        let mut body = Body::new(Vec2::new(100.0, 100.0), 10.0, 10.0);
        body.set_speed(3, 7).unwrap();
        body.move_right();
        body.move_down();
        assert_eq!(body.pos, Vec2::new(103.0, 107.0));
        body.move_left();
        body.move_up();
        assert_eq!(body.pos, Vec2::new(100.0, 100.0));
    }

    #[test]
    fn test_intersects_overlap() {
        let a = Body::new(Vec2::new(0.0, 0.0), 10.0, 10.0);
        let b = Body::new(Vec2::new(5.0, 5.0), 10.0, 10.0);
        assert!(a.intersects(&b));
        assert!(b.intersects(&a));
    }

    #[test]
    fn test_intersects_touching_edges_do_not_count() {
        let a = Body::new(Vec2::new(0.0, 0.0), 10.0, 10.0);
        // Left edge of b exactly on the right edge of a.
        let b = Body::new(Vec2::new(10.0, 0.0), 10.0, 10.0);
        assert!(!a.intersects(&b));
        assert!(!b.intersects(&a));

        // Same for a shared horizontal edge.
        let c = Body::new(Vec2::new(0.0, 10.0), 10.0, 10.0);
        assert!(!a.intersects(&c));

        // Corner contact only.
        let d = Body::new(Vec2::new(10.0, 10.0), 10.0, 10.0);
        assert!(!a.intersects(&d));
    }

    #[test]
    fn test_intersects_disjoint() {
        let a = Body::new(Vec2::new(0.0, 0.0), 10.0, 10.0);
        let b = Body::new(Vec2::new(100.0, 100.0), 10.0, 10.0);
        assert!(!a.intersects(&b));
    }

    #[test]
    fn test_projectile_out_of_bounds() {
        let inside = Projectile::new(
            1,
            Vec2::new(400.0, 200.0),
            Vec2::new(0.0, -PLAYER_BULLET_SPEED),
            ProjectileSide::Player,
        );
        assert!(!inside.out_of_bounds());

        let above = Projectile::new(
            2,
            Vec2::new(400.0, -BULLET_HEIGHT - 1.0),
            Vec2::new(0.0, -PLAYER_BULLET_SPEED),
            ProjectileSide::Player,
        );
        assert!(above.out_of_bounds());

        // Half outside still counts as on-field.
        let straddling = Projectile::new(
            3,
            Vec2::new(400.0, -BULLET_HEIGHT / 2.0),
            Vec2::new(0.0, -PLAYER_BULLET_SPEED),
            ProjectileSide::Player,
        );
        assert!(!straddling.out_of_bounds());

        let below = Projectile::new(
            4,
            Vec2::new(400.0, PLAYFIELD_HEIGHT + 1.0),
            Vec2::new(0.0, ENEMY_BULLET_SPEED),
            ProjectileSide::Enemy,
        );
        assert!(below.out_of_bounds());
    }

    #[test]
    fn test_hull_spawn_position() {
        let hull = Hull::new(1);
        assert_eq!(hull.body.pos.x, (PLAYFIELD_WIDTH - PLAYER_WIDTH) / 2.0);
        assert_eq!(
            hull.body.bottom(),
            PLAYFIELD_HEIGHT - PLAYER_OFFSET_FROM_BOTTOM
        );
        assert_eq!(hull.body.speed_x, PLAYER_SPEED_X);
    }

    #[test]
    fn test_enemy_defaults() {
        let enemy = Enemy::new(
            7,
            Vec2::new(100.0, 20.0),
            10,
            pattern::formation_pattern(1, 0).unwrap(),
            FiringBehavior::None,
        );
        assert_eq!(enemy.id, 7);
        assert!(!enemy.is_bonus);
        assert!(!enemy.firing.fires());
        assert!(FiringBehavior::Straight.fires());
        assert!(FiringBehavior::TrackPlayer.fires());
    }
}
