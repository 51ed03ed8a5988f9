//! Sound effect catalog and playback seam
//!
//! The simulation never talks to an audio device. It queues [`SoundEffect`]
//! values on the game state and the session forwards them to whatever
//! [`SoundSink`] the host installed.

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Player bullet leaves a hull
    PlayerFire,
    /// Enemy bullet leaves the formation
    EnemyFire,
    /// Enemy destroyed
    EnemyHit,
    /// Player hull destroyed
    PlayerDeath,
    /// Out of lives
    GameOver,
    /// Final level cleared
    GameWon,
    /// Bonus ship entered the field (looping drone starts)
    BonusEnemyLoopStart,
    /// Bonus ship left the field (looping drone stops)
    BonusEnemyLoopStop,
    /// Double-ship engaged (looping hum starts)
    PowerUpLoopStart,
    /// Double-ship ended (looping hum stops)
    PowerUpLoopStop,
}

impl SoundEffect {
    /// Loop-edge effects start or stop a sustained channel; everything else
    /// is a one-shot.
    pub fn is_loop_edge(&self) -> bool {
        matches!(
            self,
            SoundEffect::BonusEnemyLoopStart
                | SoundEffect::BonusEnemyLoopStop
                | SoundEffect::PowerUpLoopStart
                | SoundEffect::PowerUpLoopStop
        )
    }
}

/// Playback seam for sound effects.
pub trait SoundSink {
    fn play(&mut self, effect: SoundEffect);
}

/// Discards every effect. For headless runs and tests that don't listen.
#[derive(Debug, Default)]
pub struct NullAudio;

impl SoundSink for NullAudio {
    fn play(&mut self, _effect: SoundEffect) {}
}

/// Records effects in play order so tests can assert on them.
#[derive(Debug, Default)]
pub struct RecordingAudio {
    pub played: Vec<SoundEffect>,
}

impl SoundSink for RecordingAudio {
    fn play(&mut self, effect: SoundEffect) {
        self.played.push(effect);
    }
}
