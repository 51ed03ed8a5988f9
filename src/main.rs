//! Swarm Strike entry point
//!
//! Headless demo: an autopilot sweeps the ship under constant fire for a
//! full session, then records the result on the file-backed leaderboard.
//!
//! Usage: `swarm-strike [seed] [score|name|level]`

use std::time::{SystemTime, UNIX_EPOCH};

use swarm_strike::audio::NullAudio;
use swarm_strike::highscores::HighScores;
use swarm_strike::persistence::FileStore;
use swarm_strike::platform::{InputSnapshot, InputSource, NullRender};
use swarm_strike::session::GameSession;
use swarm_strike::settings::Settings;
use swarm_strike::sim::GameEvent;
use swarm_strike::Result;

const FRAME_DT: f32 = 1.0 / 60.0;
/// Ten minutes of simulated play before the demo gives up.
const MAX_FRAMES: u32 = 60 * 600;

/// Sweeps the ship back and forth, two seconds per leg, always firing.
#[derive(Default)]
struct Autopilot {
    frame: u32,
}

impl InputSource for Autopilot {
    fn poll(&mut self) -> InputSnapshot {
        self.frame = self.frame.wrapping_add(1);
        let leg = (self.frame / 120) % 2;
        InputSnapshot {
            move_left: leg == 1,
            move_right: leg == 0,
            fire: true,
        }
    }
}

fn main() {
    env_logger::init();
    if let Err(err) = run() {
        log::error!("session failed: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    log::info!("Swarm Strike (headless) starting...");

    let mut store = FileStore::new("swarm-strike-data");
    let settings = Settings::load(&store);

    let seed = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .or(settings.fixed_seed)
        .unwrap_or_else(|| {
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_millis() as u64)
                .unwrap_or(1)
        });
    let order = std::env::args()
        .nth(2)
        .map(|arg| arg.parse())
        .transpose()?
        .unwrap_or(settings.leaderboard_order);

    let mut session = GameSession::new(seed, NullRender, Autopilot::default(), NullAudio);
    session.start()?;
    log::info!("Game initialized with seed: {}", seed);

    let mut frames = 0;
    while !session.is_over() && frames < MAX_FRAMES {
        session.frame(FRAME_DT)?;
        frames += 1;
        for event in session.drain_events() {
            match event {
                GameEvent::EnemyKilled => log::debug!("enemy down, score {}", session.score()),
                GameEvent::PlayerHit => log::info!("hit! {} lives left", session.lives()),
                GameEvent::LevelChanged => log::info!("level {} incoming", session.level()),
                GameEvent::GameOver => log::info!("game over at level {}", session.level()),
                GameEvent::GameWon => log::info!("the swarm is beaten"),
            }
        }
    }
    log::info!(
        "session ended: {:?}, score {}, level {}",
        session.phase(),
        session.score(),
        session.level()
    );

    let mut scores = HighScores::load(&store);
    if let Some(best) = scores.top_score() {
        println!("All-time best: {best}");
    }
    if let Some(rank) = session.record_score("AUTOPILOT", &mut scores) {
        log::info!("leaderboard rank {rank}");
    }
    scores.save(&mut store);

    println!(
        "Final score: {} (reached level {})",
        session.score(),
        session.level()
    );
    if scores.is_empty() {
        println!("No scores on the board yet.");
    } else {
        println!("Top scores (by {}):", order.as_str());
        for (i, entry) in scores.top_scores(10, order).iter().enumerate() {
            println!(
                "{:>2}. {:<12} {:>8}  level {}",
                i + 1,
                entry.name,
                entry.score,
                entry.level
            );
        }
    }
    Ok(())
}
