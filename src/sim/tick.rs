//! Fixed timestep simulation tick
//!
//! One authoritative pass advances everything in a fixed order: player
//! movement, enemy movement, projectile flight, firing, collision
//! resolution, expiries, the bonus cycle, and the wave-clear check. Every
//! hit is applied in full inside its tick, so nothing downstream can see a
//! destroyed ship still firing or a spent bullet still flying.

use glam::Vec2;

use crate::aim_at;
use crate::audio::SoundEffect;
use crate::consts::*;
use crate::error::Result;

use super::collision;
use super::entity::{FiringBehavior, Projectile, ProjectileSide};
use super::state::{GamePhase, GameState, mix64};
use super::wave;

/// Input intents for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Move left while held
    pub move_left: bool,
    /// Move right while held
    pub move_right: bool,
    /// Fire while held
    pub fire: bool,
}

/// Starts the run: places the first wave and opens the fire gate. A no-op
/// outside the idle phase.
pub fn start_session(state: &mut GameState) -> Result<()> {
    if state.phase != GamePhase::Idle {
        return Ok(());
    }
    wave::place_level(state)?;
    state.phase = GamePhase::Playing;
    state.player.can_shoot = true;
    state.bonus_roll_ticks = BONUS_ROLL_INTERVAL_TICKS;
    log::info!("session started (seed {})", state.seed);
    Ok(())
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) -> Result<()> {
    match state.phase {
        GamePhase::Idle => {
            // The first fire intent starts the run.
            if input.fire {
                start_session(state)?;
            }
            return Ok(());
        }
        GamePhase::LevelTransition => {
            state.time_ticks += 1;
            state.transition_ticks = state.transition_ticks.saturating_sub(1);
            if state.transition_ticks == 0 {
                wave::place_level(state)?;
                state.player.can_shoot = true;
                state.bonus_roll_ticks = BONUS_ROLL_INTERVAL_TICKS;
                state.phase = GamePhase::Playing;
                log::info!("level {} begins", state.level);
            }
            return Ok(());
        }
        GamePhase::GameOver | GamePhase::GameWon => return Ok(()),
        GamePhase::Playing => {}
    }

    state.time_ticks += 1;

    move_player(state, input, dt);
    advance_enemies(state);
    advance_projectiles(state, dt);
    run_enemy_firing(state)?;
    if input.fire {
        player_fire(state);
    }
    resolve_collisions(state);
    run_expiries(state);
    wave::run_bonus_cycle(state)?;
    wave::check_wave_clear(state);

    state.normalize_order();
    Ok(())
}

/// Continuous player movement from held intents, clamped so neither hull
/// can leave the field. Opposite intents cancel.
fn move_player(state: &mut GameState, input: &TickInput, dt: f32) {
    if state.player.hidden || state.player.hulls.is_empty() {
        return;
    }
    let dir = match (input.move_left, input.move_right) {
        (true, false) => -1.0,
        (false, true) => 1.0,
        _ => return,
    };
    let speed = state.player.hulls[0].body.speed_x as f32 * PLAYER_STEPS_PER_SEC;
    let step = dir * speed * dt;

    let min_left = state
        .player
        .hulls
        .iter()
        .map(|h| h.body.left())
        .fold(f32::INFINITY, f32::min);
    let max_right = state
        .player
        .hulls
        .iter()
        .map(|h| h.body.right())
        .fold(f32::NEG_INFINITY, f32::max);
    let dx = step.clamp(-min_left, PLAYFIELD_WIDTH - max_right);
    for hull in &mut state.player.hulls {
        hull.body.move_by(dx, 0.0);
    }
}

fn advance_enemies(state: &mut GameState) {
    for enemy in &mut state.enemies {
        if enemy.pattern.advance(&mut enemy.body) {
            enemy.frame_flipped = !enemy.frame_flipped;
        }
    }
}

fn advance_projectiles(state: &mut GameState, dt: f32) {
    for projectile in &mut state.projectiles {
        let delta = projectile.vel * dt;
        projectile.body.move_by(delta.x, delta.y);
    }
    // Bullets that leave the field die quietly; player cap slots come back.
    let mut freed = 0u32;
    state.projectiles.retain(|p| {
        if p.out_of_bounds() {
            if p.side == ProjectileSide::Player {
                freed += 1;
            }
            false
        } else {
            true
        }
    });
    state.player.bullets_in_flight = state.player.bullets_in_flight.saturating_sub(freed);
}

/// Each armed enemy runs its own countdown; at zero it fires from its
/// bottom center and draws the next delay from the level's range. Tracking
/// shots aim at the player's position at this instant and never steer
/// afterward.
fn run_enemy_firing(state: &mut GameState) -> Result<()> {
    let target = state.player.hulls.first().map(|h| h.body.center());
    let delays = wave::fire_delay_range(state.level)?;
    let (delay_min, delay_span) = (delays.start, u64::from(delays.end - delays.start));
    let seed = state.seed;
    let now = state.time_ticks;

    let mut shots: Vec<(Vec2, Vec2)> = Vec::new();
    for enemy in &mut state.enemies {
        if !enemy.firing.fires() {
            continue;
        }
        if enemy.fire_countdown > 0 {
            enemy.fire_countdown -= 1;
            continue;
        }

        let muzzle = Vec2::new(
            enemy.body.center().x - BULLET_WIDTH / 2.0,
            enemy.body.bottom(),
        );
        let vel = match (enemy.firing, target) {
            (FiringBehavior::TrackPlayer, Some(aim)) => {
                let origin = muzzle + Vec2::new(BULLET_WIDTH / 2.0, BULLET_HEIGHT / 2.0);
                aim_at(origin, aim) * ENEMY_BULLET_SPEED
            }
            _ => Vec2::new(0.0, ENEMY_BULLET_SPEED),
        };
        shots.push((muzzle, vel));

        let draw = mix64(seed ^ (u64::from(enemy.id) << 32) ^ now) % delay_span;
        enemy.fire_countdown = delay_min + draw as u32;
    }

    for (muzzle, vel) in shots {
        let id = state.next_entity_id();
        state
            .projectiles
            .push(Projectile::new(id, muzzle, vel, ProjectileSide::Enemy));
        state.sounds.push(SoundEffect::EnemyFire);
    }
    Ok(())
}

/// While the fire intent is held, every hull launches from its top center,
/// subject to the in-flight cap. At capacity the request is refused
/// outright, never queued.
fn player_fire(state: &mut GameState) {
    if !state.player.can_shoot || state.player.hidden {
        return;
    }
    let cap = state.bullet_cap();
    let muzzles: Vec<Vec2> = state
        .player
        .hulls
        .iter()
        .map(|hull| {
            Vec2::new(
                hull.body.center().x - BULLET_WIDTH / 2.0,
                hull.body.top() - BULLET_HEIGHT,
            )
        })
        .collect();
    for muzzle in muzzles {
        if state.player.bullets_in_flight >= cap {
            break;
        }
        let id = state.next_entity_id();
        state.projectiles.push(Projectile::new(
            id,
            muzzle,
            Vec2::new(0.0, -PLAYER_BULLET_SPEED),
            ProjectileSide::Player,
        ));
        state.player.bullets_in_flight += 1;
        state.sounds.push(SoundEffect::PlayerFire);
    }
}

/// One pass over this tick's projectiles, each resolved against the state
/// as it stands when its turn comes. A projectile gets at most one
/// outcome; a fatal player hit stops the pass.
fn resolve_collisions(state: &mut GameState) {
    let ids: Vec<(u32, ProjectileSide)> =
        state.projectiles.iter().map(|p| (p.id, p.side)).collect();
    for (projectile_id, side) in ids {
        if state.phase.is_terminal() {
            return;
        }
        match side {
            ProjectileSide::Player => {
                let hit = state
                    .projectiles
                    .iter()
                    .find(|p| p.id == projectile_id)
                    .and_then(|p| collision::scan_enemies(p, &state.enemies));
                if let Some(enemy_id) = hit {
                    collision::resolve_enemy_hit(state, projectile_id, enemy_id);
                }
            }
            ProjectileSide::Enemy => {
                if state.player.is_invincible() || state.player.hidden {
                    continue;
                }
                let hit = state
                    .projectiles
                    .iter()
                    .find(|p| p.id == projectile_id)
                    .and_then(|p| collision::scan_hulls(p, &state.player.hulls));
                if let Some(hull_id) = hit {
                    collision::resolve_player_hit(state, projectile_id, hull_id);
                }
            }
        }
    }
}

fn run_expiries(state: &mut GameState) {
    if state.player.invincible_ticks > 0 {
        state.player.invincible_ticks -= 1;
        if state.player.invincible_ticks == 0 {
            // The ship returns and the guns come back online.
            state.player.hidden = false;
            state.player.can_shoot = true;
        }
    }
    if state.power_ticks > 0 {
        state.power_ticks -= 1;
        if state.power_ticks == 0 {
            state.end_power_up();
        }
    }
}
