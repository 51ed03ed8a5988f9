//! Wave construction and level flow
//!
//! Places the classic four-row formation for levels 1-3 and the escorted
//! boss for level 4, runs the bonus-ship spawn cycle, and advances the
//! level once the field is empty.

use glam::Vec2;
use rand::Rng;

use crate::audio::SoundEffect;
use crate::consts::*;
use crate::error::{GameError, Result};

use super::entity::{Body, Enemy, FiringBehavior};
use super::pattern;
use super::state::{mix64, GameEvent, GamePhase, GameState, LEVEL_TRANSITION_TICKS};

/// One formation row: slot count, score value, gun, and lane height.
struct FormationRow {
    count: u32,
    score: u32,
    firing: FiringBehavior,
    lane_y: f32,
}

/// The four-row formation, top to bottom. 16 ships per wave; only the
/// lower half shoots back.
const FORMATION: [FormationRow; 4] = [
    FormationRow {
        count: 3,
        score: 10,
        firing: FiringBehavior::None,
        lane_y: 20.0,
    },
    FormationRow {
        count: 4,
        score: 20,
        firing: FiringBehavior::None,
        lane_y: 100.0,
    },
    FormationRow {
        count: 4,
        score: 30,
        firing: FiringBehavior::Straight,
        lane_y: 180.0,
    },
    FormationRow {
        count: 5,
        score: 40,
        firing: FiringBehavior::Straight,
        lane_y: 260.0,
    },
];

/// Horizontal start position that centers `count` slots at the standard
/// spacing.
fn row_start_x(count: u32) -> f32 {
    PLAYFIELD_WIDTH / 2.0 - count as f32 * FORMATION_SPACING / 2.0
}

/// Level-dependent firing delay range in ticks. Every level shortens both
/// ends, so later waves shoot sooner and more often.
pub fn fire_delay_range(level: u32) -> Result<std::ops::Range<u32>> {
    match level {
        1 => Ok(ticks_from_ms(1000)..ticks_from_ms(10_000)),
        2 => Ok(ticks_from_ms(800)..ticks_from_ms(8000)),
        3 => Ok(ticks_from_ms(600)..ticks_from_ms(6000)),
        4 => Ok(ticks_from_ms(500)..ticks_from_ms(5000)),
        _ => Err(GameError::InvalidState(format!(
            "no firing table for level {level}"
        ))),
    }
}

/// Places the wave for the current level: the formation on levels 1-3, the
/// boss round on level 4.
pub fn place_level(state: &mut GameState) -> Result<()> {
    match state.level {
        1..=3 => place_formation(state),
        4 => place_boss_round(state),
        level => Err(GameError::InvalidState(format!(
            "no wave for level {level}"
        ))),
    }
}

fn place_formation(state: &mut GameState) -> Result<()> {
    let mut rng = state.rng_state.stream_rng(u64::from(state.level));
    let delays = fire_delay_range(state.level)?;
    for (row_index, row) in FORMATION.iter().enumerate() {
        let slot_pattern = pattern::formation_pattern(state.level, row_index)?;
        for slot in 0..row.count {
            let id = state.next_entity_id();
            let x = row_start_x(row.count) + slot as f32 * FORMATION_SPACING;
            let mut enemy = Enemy::new(
                id,
                Vec2::new(x, row.lane_y),
                row.score,
                slot_pattern.clone(),
                row.firing,
            );
            if row.firing.fires() {
                enemy.fire_countdown = rng.random_range(delays.clone());
            }
            state.enemies.push(enemy);
        }
    }
    log::info!(
        "level {}: formation of {} ships placed",
        state.level,
        state.enemies.len()
    );
    Ok(())
}

fn place_boss_round(state: &mut GameState) -> Result<()> {
    let mut rng = state.rng_state.stream_rng(u64::from(state.level));
    let delays = fire_delay_range(state.level)?;

    let id = state.next_entity_id();
    let boss_pos = Vec2::new(PLAYFIELD_WIDTH / 2.0 - BOSS_WIDTH / 2.0, BOSS_SPAWN_Y);
    let mut boss = Enemy::new(
        id,
        boss_pos,
        BOSS_SCORE,
        pattern::boss_pattern(),
        FiringBehavior::TrackPlayer,
    );
    boss.body.width = BOSS_WIDTH;
    boss.body.height = BOSS_HEIGHT;
    boss.fire_countdown = rng.random_range(delays.clone());
    let boss_center = boss.body.center();
    state.enemies.push(boss);

    // Escort ring around the boss, offset half a slot so none of them
    // starts on the top edge.
    for slot in 0..ESCORT_COUNT {
        let angle = (slot as f32 + 0.5) * std::f32::consts::TAU / ESCORT_COUNT as f32;
        let center = boss_center + ESCORT_RING_RADIUS * Vec2::new(angle.cos(), angle.sin());
        let pos = Vec2::new(
            (center.x - ENEMY_WIDTH / 2.0).clamp(0.0, PLAYFIELD_WIDTH - ENEMY_WIDTH),
            (center.y - ENEMY_HEIGHT / 2.0).clamp(0.0, PLAYFIELD_HEIGHT - ENEMY_HEIGHT),
        );
        let body = Body::new(pos, ENEMY_WIDTH, ENEMY_HEIGHT);
        let id = state.next_entity_id();
        let mut escort = Enemy::new(
            id,
            pos,
            ESCORT_SCORE,
            pattern::escort_pattern(&body),
            FiringBehavior::Straight,
        );
        escort.fire_countdown = rng.random_range(delays.clone());
        state.enemies.push(escort);
    }

    log::info!(
        "level {}: boss placed with {} escorts",
        state.level,
        ESCORT_COUNT
    );
    Ok(())
}

/// Advances the bonus-ship spawn cycle: one spawn chance per roll
/// interval, and never more than one bonus ship on the field.
pub fn run_bonus_cycle(state: &mut GameState) -> Result<()> {
    state.bonus_roll_ticks = state.bonus_roll_ticks.saturating_sub(1);
    if state.bonus_roll_ticks > 0 {
        return Ok(());
    }
    state.bonus_roll_ticks = BONUS_ROLL_INTERVAL_TICKS;
    if state.bonus_active {
        return Ok(());
    }
    let roll = mix64(state.seed ^ state.time_ticks ^ 0xB0B0) % 100;
    if roll < BONUS_SPAWN_PERCENT {
        spawn_bonus(state)?;
    }
    Ok(())
}

fn spawn_bonus(state: &mut GameState) -> Result<()> {
    let delays = fire_delay_range(state.level)?;
    let span = (PLAYFIELD_WIDTH - ENEMY_WIDTH) as u64;
    let x = (mix64(state.seed ^ state.time_ticks ^ 0x5EED) % span) as f32;

    let id = state.next_entity_id();
    let mut bonus = Enemy::new(
        id,
        Vec2::new(x, 0.0),
        BONUS_SCORE,
        pattern::bonus_pattern(0.0),
        FiringBehavior::Straight,
    );
    bonus.is_bonus = true;
    let delay_span = u64::from(delays.end - delays.start);
    bonus.fire_countdown =
        delays.start + (mix64(state.seed ^ state.time_ticks ^ u64::from(id)) % delay_span) as u32;
    state.enemies.push(bonus);

    state.bonus_active = true;
    state.sounds.push(SoundEffect::BonusEnemyLoopStart);
    log::debug!("bonus ship enters at x={x} (tick {})", state.time_ticks);
    Ok(())
}

/// Wave-clear check, run after collisions: once the field is empty, stage
/// the next level or win the game.
pub fn check_wave_clear(state: &mut GameState) {
    if state.phase != GamePhase::Playing || !state.enemies.is_empty() {
        return;
    }
    if state.level < MAX_LEVEL {
        state.level += 1;
        state.phase = GamePhase::LevelTransition;
        state.transition_ticks = LEVEL_TRANSITION_TICKS;
        // Nothing carries across the pause: no bullets, no bonus latch,
        // and the guns stay gated until the next wave is on the field.
        state.projectiles.clear();
        state.player.bullets_in_flight = 0;
        state.player.can_shoot = false;
        state.bonus_active = false;
        state.events.push(GameEvent::LevelChanged);
        log::info!("wave cleared; staging level {}", state.level);
    } else {
        state.phase = GamePhase::GameWon;
        state.events.push(GameEvent::GameWon);
        state.sounds.push(SoundEffect::GameWon);
        log::info!("boss down; game won with score {}", state.player.score);
    }
}
