//! Game settings and preferences
//!
//! Persisted separately from the high-score table.

use serde::{Deserialize, Serialize};

use crate::highscores::SortOrder;
use crate::persistence::ScoreStore;

/// Game settings/preferences
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Mute all audio
    pub muted: bool,

    // === Leaderboard ===
    /// Preferred leaderboard column ordering
    pub leaderboard_order: SortOrder,

    // === Session ===
    /// Pin the session seed (replays, demos). `None` means pick one fresh.
    pub fixed_seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            // Audio
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,

            // Leaderboard
            leaderboard_order: SortOrder::default(),

            // Session
            fixed_seed: None,
        }
    }
}

impl Settings {
    const STORAGE_KEY: &'static str = "swarm_strike_settings";

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    /// Get effective volume
    pub fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    /// Load settings from a store, falling back to defaults.
    pub fn load(store: &dyn ScoreStore) -> Self {
        if let Some(json) = store.load(Self::STORAGE_KEY) {
            match serde_json::from_str::<Settings>(&json) {
                Ok(mut settings) => {
                    // Stored values may predate clamping.
                    settings.set_master_volume(settings.master_volume);
                    settings.set_sfx_volume(settings.sfx_volume);
                    log::info!("Loaded settings");
                    return settings;
                }
                Err(err) => log::warn!("settings unreadable, using defaults: {err}"),
            }
        }
        Self::default()
    }

    /// Save settings to a store.
    pub fn save(&self, store: &mut dyn ScoreStore) {
        match serde_json::to_string(self) {
            Ok(json) => {
                store.save(Self::STORAGE_KEY, &json);
                log::info!("Settings saved");
            }
            Err(err) => log::warn!("failed to encode settings: {err}"),
        }
    }
}
