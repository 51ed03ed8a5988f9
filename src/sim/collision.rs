//! Projectile collision scans and outcome resolution
//!
//! Scans are pure first-match lookups in list order; the resolution
//! functions apply every consequence of a hit in one call so nothing else
//! in the tick can observe a half-resolved state. Both resolutions are
//! tolerant of parties that are already gone, which makes double-hits in
//! the same tick harmless no-ops.

use crate::audio::SoundEffect;
use crate::consts::*;

use super::entity::{Enemy, Hull, Projectile};
use super::state::{GameEvent, GamePhase, GameState};

/// First enemy (in list order) the projectile overlaps, if any.
pub fn scan_enemies(projectile: &Projectile, enemies: &[Enemy]) -> Option<u32> {
    enemies
        .iter()
        .find(|enemy| projectile.body.intersects(&enemy.body))
        .map(|enemy| enemy.id)
}

/// First player hull (in roster order) the projectile overlaps, if any.
pub fn scan_hulls(projectile: &Projectile, hulls: &[Hull]) -> Option<u32> {
    hulls
        .iter()
        .find(|hull| projectile.body.intersects(&hull.body))
        .map(|hull| hull.id)
}

/// Applies a player-bullet hit: the enemy and the bullet leave the field,
/// score is awarded, and a bonus ship grants its reward. Returns false if
/// the enemy was already destroyed, leaving the bullet in flight.
pub fn resolve_enemy_hit(state: &mut GameState, projectile_id: u32, enemy_id: u32) -> bool {
    let Some(enemy_index) = state.enemies.iter().position(|e| e.id == enemy_id) else {
        return false;
    };
    let enemy = state.enemies.remove(enemy_index);

    let before = state.projectiles.len();
    state.projectiles.retain(|p| p.id != projectile_id);
    if state.projectiles.len() < before {
        state.player.bullets_in_flight = state.player.bullets_in_flight.saturating_sub(1);
    }

    state.player.score += u64::from(enemy.score_value);
    state.sounds.push(SoundEffect::EnemyHit);
    state.events.push(GameEvent::EnemyKilled);

    if enemy.is_bonus {
        state.bonus_active = false;
        state.sounds.push(SoundEffect::BonusEnemyLoopStop);
        // The bonus reward scales with progress: an extra life early on,
        // the double-ship power-up once the waves get serious.
        if state.level == 1 {
            state.player.lives += 1;
        } else {
            state.activate_power_up();
        }
    }

    true
}

/// Applies an enemy-bullet hit on a player hull. A doubled ship absorbs the
/// hit at the cost of the power-up; otherwise a life is spent and the ship
/// enters its invincibility window, or the run ends. Returns false if the
/// hull is gone or the player cannot currently be hit.
pub fn resolve_player_hit(state: &mut GameState, projectile_id: u32, hull_id: u32) -> bool {
    if state.player.is_invincible() || state.player.hidden {
        return false;
    }
    let Some(hull_index) = state.player.hulls.iter().position(|h| h.id == hull_id) else {
        return false;
    };

    state.projectiles.retain(|p| p.id != projectile_id);
    state.sounds.push(SoundEffect::PlayerDeath);

    if state.power_level > 0 {
        // The struck hull is lost and the power-up ends with it; no life
        // is spent.
        state.player.hulls.remove(hull_index);
        state.end_power_up();
        return true;
    }

    state.player.lives = state.player.lives.saturating_sub(1);
    state.events.push(GameEvent::PlayerHit);

    if state.player.lives == 0 {
        state.phase = GamePhase::GameOver;
        state.events.push(GameEvent::GameOver);
        state.sounds.push(SoundEffect::GameOver);
        log::info!("out of lives at level {}; game over", state.level);
        return true;
    }

    // Brief death: the ship vanishes and comes back invincible, guns gated
    // until the window ends.
    state.player.hidden = true;
    state.player.can_shoot = false;
    state.player.invincible_ticks = INVINCIBILITY_TICKS;
    true
}
