//! Game session coordinator
//!
//! Owns the simulation state plus the host-facing seams (render, input,
//! audio). The host calls [`GameSession::frame`] once per displayed frame;
//! the session samples input, feeds whole `SIM_DT` steps into the
//! simulation, forwards queued sounds, and syncs the render sink to the
//! entities that survived the tick.

use crate::audio::SoundSink;
use crate::consts::{MAX_SUBSTEPS, SIM_DT};
use crate::error::Result;
use crate::highscores::HighScores;
use crate::platform::{InputSource, RenderSink};
use crate::sim::{start_session, tick, GameEvent, GamePhase, GameState, TickInput};

/// A frame longer than this reads as a stalled host (breakpoint, laptop
/// lid); the excess sim time is dropped instead of replayed.
const MAX_FRAME_DT: f32 = 0.1;

/// One full run of the game, from idle screen to terminal phase.
pub struct GameSession<R, I, A>
where
    R: RenderSink,
    I: InputSource,
    A: SoundSink,
{
    state: GameState,
    render: R,
    input: I,
    audio: A,
    accumulator: f32,
    events: Vec<GameEvent>,
    shown: Vec<u32>,
}

impl<R, I, A> GameSession<R, I, A>
where
    R: RenderSink,
    I: InputSource,
    A: SoundSink,
{
    pub fn new(seed: u64, render: R, input: I, audio: A) -> Self {
        Self {
            state: GameState::new(seed),
            render,
            input,
            audio,
            accumulator: 0.0,
            events: Vec::new(),
            shown: Vec::new(),
        }
    }

    /// Start the run immediately instead of waiting for a fire intent.
    pub fn start(&mut self) -> Result<()> {
        start_session(&mut self.state)?;
        self.flush_outputs();
        Ok(())
    }

    /// Advance the session by one host frame. `dt` is wall-clock seconds
    /// since the previous call.
    pub fn frame(&mut self, dt: f32) -> Result<()> {
        let snapshot = self.input.poll();
        let input = TickInput {
            move_left: snapshot.move_left,
            move_right: snapshot.move_right,
            fire: snapshot.fire,
        };

        self.accumulator += dt.clamp(0.0, MAX_FRAME_DT);
        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            tick(&mut self.state, &input, SIM_DT)?;
            self.accumulator -= SIM_DT;
            substeps += 1;
        }
        if self.accumulator >= SIM_DT {
            log::debug!("dropping {:.0}ms of sim backlog", self.accumulator * 1000.0);
            self.accumulator = 0.0;
        }

        self.flush_outputs();
        Ok(())
    }

    /// Events raised since the last drain, in raise order.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Write this run's score onto the leaderboard. Returns the 1-indexed
    /// rank, or `None` if it didn't qualify.
    pub fn record_score(&self, name: &str, scores: &mut HighScores) -> Option<usize> {
        scores.add_score(name, self.state.player.score, self.state.level)
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn score(&self) -> u64 {
        self.state.player.score
    }

    pub fn level(&self) -> u32 {
        self.state.level
    }

    pub fn lives(&self) -> u32 {
        self.state.player.lives
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    pub fn is_over(&self) -> bool {
        self.state.phase.is_terminal()
    }

    fn flush_outputs(&mut self) {
        self.events.append(&mut self.state.events);
        for effect in self.state.sounds.drain(..) {
            self.audio.play(effect);
        }
        self.sync_render();
    }

    /// Push every live entity's position, hull visibility, and a `remove`
    /// for every id that vanished since the last sync.
    fn sync_render(&mut self) {
        let mut live: Vec<u32> = Vec::with_capacity(
            self.state.player.hulls.len() + self.state.enemies.len() + self.state.projectiles.len(),
        );
        for hull in &self.state.player.hulls {
            self.render
                .place_at(hull.id, hull.body.pos.x, hull.body.pos.y);
            self.render.set_visible(hull.id, !self.state.player.hidden);
            live.push(hull.id);
        }
        for enemy in &self.state.enemies {
            self.render
                .place_at(enemy.id, enemy.body.pos.x, enemy.body.pos.y);
            live.push(enemy.id);
        }
        for projectile in &self.state.projectiles {
            self.render
                .place_at(projectile.id, projectile.body.pos.x, projectile.body.pos.y);
            live.push(projectile.id);
        }
        for id in &self.shown {
            if !live.contains(id) {
                self.render.remove(*id);
            }
        }
        self.shown = live;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::{RecordingAudio, SoundEffect};
    use crate::platform::{InputSnapshot, RecordingRender, ScriptedInput};

    fn fire_snap() -> InputSnapshot {
        InputSnapshot {
            fire: true,
            ..Default::default()
        }
    }

    fn session_with(
        input: ScriptedInput,
    ) -> GameSession<RecordingRender, ScriptedInput, RecordingAudio> {
        GameSession::new(
            7,
            RecordingRender::default(),
            input,
            RecordingAudio::default(),
        )
    }

    #[test]
    fn test_start_places_the_field_on_the_sink() {
        let mut session = session_with(ScriptedInput::default());
        session.start().unwrap();

        assert_eq!(session.phase(), GamePhase::Playing);
        // One hull plus the full formation, each placed once.
        assert_eq!(session.render.placements.len(), 17);
        assert_eq!(session.shown.len(), 17);
    }

    #[test]
    fn test_frame_steps_whole_timesteps_and_banks_the_rest() {
        let mut session = session_with(ScriptedInput::default());
        session.start().unwrap();

        session.frame(SIM_DT * 3.2).unwrap();
        assert_eq!(session.state.time_ticks, 3);

        // The banked 0.2 joins the next frame's 0.9.
        session.frame(SIM_DT * 0.9).unwrap();
        assert_eq!(session.state.time_ticks, 4);
    }

    #[test]
    fn test_stalled_frame_caps_substeps_and_drops_backlog() {
        let mut session = session_with(ScriptedInput::default());
        session.start().unwrap();

        session.frame(10.0).unwrap();
        assert_eq!(session.state.time_ticks, MAX_SUBSTEPS as u64);

        // The dropped backlog doesn't leak into the next frame.
        session.frame(SIM_DT * 0.5).unwrap();
        assert_eq!(session.state.time_ticks, MAX_SUBSTEPS as u64);
    }

    #[test]
    fn test_fire_intent_starts_from_idle() {
        let mut session = session_with(ScriptedInput::hold(fire_snap()));
        assert_eq!(session.phase(), GamePhase::Idle);

        session.frame(SIM_DT * 2.5).unwrap();
        assert_eq!(session.phase(), GamePhase::Playing);
        assert_eq!(session.state.enemies.len(), 16);
    }

    #[test]
    fn test_bullet_kill_reaches_every_sink() {
        // Fire for exactly one frame, then idle while the bullet flies.
        let mut session = session_with(ScriptedInput::new([fire_snap(), InputSnapshot::default()]));
        session.start().unwrap();

        session.frame(SIM_DT * 1.2).unwrap();
        assert_eq!(session.state.projectiles.len(), 1);
        let bullet_id = session.state.projectiles[0].id;
        assert!(session.audio.played.contains(&SoundEffect::PlayerFire));

        // The bullet climbs from the muzzle into the bottom firing row.
        let victim_id = session
            .state
            .enemies
            .iter()
            .find(|e| e.body.pos.x == 350.0 && e.body.pos.y == 260.0)
            .map(|e| e.id)
            .unwrap();

        for _ in 0..30 {
            session.frame(SIM_DT * 1.2).unwrap();
        }

        assert_eq!(session.state.enemies.len(), 15);
        assert_eq!(session.state.player.bullets_in_flight, 0);
        assert!(session.audio.played.contains(&SoundEffect::EnemyHit));
        assert_eq!(session.drain_events(), vec![GameEvent::EnemyKilled]);
        assert!(session.drain_events().is_empty());
        assert!(session.render.removed.contains(&bullet_id));
        assert!(session.render.removed.contains(&victim_id));
    }

    #[test]
    fn test_hidden_hull_syncs_invisible() {
        let mut session = session_with(ScriptedInput::default());
        session.start().unwrap();
        assert!(session.render.visibility.contains(&(1, true)));

        session.state.player.hidden = true;
        session.sync_render();
        assert_eq!(session.render.visibility.last(), Some(&(1, false)));
    }

    #[test]
    fn test_record_score_lands_on_the_board() {
        let mut session = session_with(ScriptedInput::default());
        session.state.player.score = 4200;
        session.state.level = 3;

        let mut scores = HighScores::new();
        assert_eq!(session.record_score("ACE", &mut scores), Some(1));
        assert_eq!(scores.entries[0].name, "ACE");
        assert_eq!(scores.entries[0].level, 3);
    }
}
