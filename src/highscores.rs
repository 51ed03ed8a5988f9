//! High score leaderboard system
//!
//! Tracks the top 10 scores with name and level reached. Storage order is
//! canonical (score first); readers pick their own [`SortOrder`] view.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::str::FromStr;

use crate::error::GameError;
use crate::persistence::ScoreStore;

/// Maximum number of high scores to keep
pub const MAX_HIGH_SCORES: usize = 10;

/// A single high score entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighScoreEntry {
    /// Player's name
    pub name: String,
    /// Player's score
    pub score: u64,
    /// Level reached
    pub level: u32,
}

/// Leaderboard column ordering.
///
/// The variant name lists the sort keys in precedence order; scores and
/// levels read descending, names ascending.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortOrder {
    #[default]
    ScoreNameLevel,
    NameScoreLevel,
    LevelScoreName,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::ScoreNameLevel => "score",
            SortOrder::NameScoreLevel => "name",
            SortOrder::LevelScoreName => "level",
        }
    }

    fn compare(&self, a: &HighScoreEntry, b: &HighScoreEntry) -> Ordering {
        match self {
            SortOrder::ScoreNameLevel => b
                .score
                .cmp(&a.score)
                .then_with(|| a.name.cmp(&b.name))
                .then_with(|| b.level.cmp(&a.level)),
            SortOrder::NameScoreLevel => a
                .name
                .cmp(&b.name)
                .then_with(|| b.score.cmp(&a.score))
                .then_with(|| b.level.cmp(&a.level)),
            SortOrder::LevelScoreName => b
                .level
                .cmp(&a.level)
                .then_with(|| b.score.cmp(&a.score))
                .then_with(|| a.name.cmp(&b.name)),
        }
    }
}

impl FromStr for SortOrder {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "score" => Ok(SortOrder::ScoreNameLevel),
            "name" => Ok(SortOrder::NameScoreLevel),
            "level" => Ok(SortOrder::LevelScoreName),
            other => Err(GameError::InvalidArgument(format!(
                "unknown sort order: {other}"
            ))),
        }
    }
}

/// High score leaderboard
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct HighScores {
    pub entries: Vec<HighScoreEntry>,
}

impl HighScores {
    const STORAGE_KEY: &'static str = "swarm_strike_highscores";

    /// Create empty leaderboard
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Check if a score qualifies for the leaderboard
    pub fn qualifies(&self, score: u64) -> bool {
        if score == 0 {
            return false;
        }
        if self.entries.len() < MAX_HIGH_SCORES {
            return true;
        }
        // Check if score beats the lowest entry
        self.entries.last().map(|e| score > e.score).unwrap_or(true)
    }

    /// Add a new score to the leaderboard (if it qualifies)
    /// Returns the rank achieved (1-indexed) or None if didn't qualify
    pub fn add_score(&mut self, name: &str, score: u64, level: u32) -> Option<usize> {
        if !self.qualifies(score) {
            return None;
        }

        let entry = HighScoreEntry {
            name: name.to_owned(),
            score,
            level,
        };
        self.entries.push(entry.clone());
        self.entries
            .sort_by(|a, b| SortOrder::ScoreNameLevel.compare(a, b));
        let rank = self.entries.iter().position(|e| *e == entry)? + 1;

        // Trim to max size
        self.entries.truncate(MAX_HIGH_SCORES);

        Some(rank)
    }

    /// Read back the top `n` entries under the given ordering.
    pub fn top_scores(&self, n: usize, order: SortOrder) -> Vec<HighScoreEntry> {
        let mut view = self.entries.clone();
        view.sort_by(|a, b| order.compare(a, b));
        view.truncate(n);
        view
    }

    /// Check if the leaderboard is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Get the top score (if any)
    pub fn top_score(&self) -> Option<u64> {
        self.entries.first().map(|e| e.score)
    }

    /// Load the leaderboard from a store, starting fresh if absent or
    /// unreadable.
    pub fn load(store: &dyn ScoreStore) -> Self {
        if let Some(json) = store.load(Self::STORAGE_KEY) {
            match serde_json::from_str::<HighScores>(&json) {
                Ok(mut scores) => {
                    scores
                        .entries
                        .sort_by(|a, b| SortOrder::ScoreNameLevel.compare(a, b));
                    scores.entries.truncate(MAX_HIGH_SCORES);
                    log::info!("Loaded {} high scores", scores.entries.len());
                    return scores;
                }
                Err(err) => log::warn!("high score table unreadable, starting fresh: {err}"),
            }
        }
        Self::new()
    }

    /// Save the leaderboard to a store.
    pub fn save(&self, store: &mut dyn ScoreStore) {
        match serde_json::to_string(self) {
            Ok(json) => {
                store.save(Self::STORAGE_KEY, &json);
                log::info!("High scores saved ({} entries)", self.entries.len());
            }
            Err(err) => log::warn!("failed to encode high scores: {err}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStore;

    fn table(rows: &[(&str, u64, u32)]) -> HighScores {
        let mut scores = HighScores::new();
        for (name, score, level) in rows {
            scores.add_score(name, *score, *level);
        }
        scores
    }

    #[test]
    fn test_qualifies_rules() {
        let mut scores = HighScores::new();
        assert!(!scores.qualifies(0));
        assert!(scores.qualifies(1));

        for i in 0..MAX_HIGH_SCORES {
            scores.add_score("P", 100 + i as u64 * 10, 1);
        }
        // Full table: beat the minimum strictly or stay out.
        assert!(!scores.qualifies(100));
        assert!(scores.qualifies(101));
    }

    #[test]
    fn test_add_score_returns_rank_and_keeps_ten() {
        let mut scores = HighScores::new();
        assert_eq!(scores.add_score("A", 300, 2), Some(1));
        assert_eq!(scores.add_score("B", 500, 3), Some(1));
        assert_eq!(scores.add_score("C", 400, 2), Some(2));
        assert_eq!(scores.entries[0].name, "B");

        for i in 0..10 {
            scores.add_score("F", 1000 + i, 4);
        }
        assert_eq!(scores.entries.len(), MAX_HIGH_SCORES);
        // The early low scores fell off the bottom.
        assert!(scores.entries.iter().all(|e| e.score >= 1000));
        assert_eq!(scores.add_score("Z", 1, 1), None);
    }

    #[test]
    fn test_score_name_level_order() {
        let scores = table(&[
            ("Cid", 50, 4),
            ("Bob", 100, 3),
            ("Ann", 100, 2),
            ("Bob", 100, 1),
        ]);
        let names: Vec<(String, u64, u32)> = scores
            .top_scores(10, SortOrder::ScoreNameLevel)
            .into_iter()
            .map(|e| (e.name, e.score, e.level))
            .collect();
        // Score desc, then name asc, then level desc.
        assert_eq!(
            names,
            vec![
                ("Ann".to_owned(), 100, 2),
                ("Bob".to_owned(), 100, 3),
                ("Bob".to_owned(), 100, 1),
                ("Cid".to_owned(), 50, 4),
            ]
        );
    }

    #[test]
    fn test_name_score_level_order() {
        let scores = table(&[("Bob", 100, 3), ("Ann", 70, 1), ("Ann", 100, 2)]);
        let view = scores.top_scores(10, SortOrder::NameScoreLevel);
        let names: Vec<(String, u64)> = view.into_iter().map(|e| (e.name, e.score)).collect();
        assert_eq!(
            names,
            vec![
                ("Ann".to_owned(), 100),
                ("Ann".to_owned(), 70),
                ("Bob".to_owned(), 100),
            ]
        );
    }

    #[test]
    fn test_level_score_name_order() {
        let scores = table(&[("Ann", 100, 2), ("Cid", 50, 4), ("Bob", 100, 4)]);
        let view = scores.top_scores(10, SortOrder::LevelScoreName);
        let names: Vec<String> = view.into_iter().map(|e| e.name).collect();
        // Level desc, then score desc, then name asc.
        assert_eq!(names, vec!["Bob", "Cid", "Ann"]);
    }

    #[test]
    fn test_top_scores_truncates_without_touching_storage() {
        let scores = table(&[("A", 10, 1), ("B", 20, 1), ("C", 30, 1)]);
        let top = scores.top_scores(2, SortOrder::ScoreNameLevel);
        assert_eq!(top.len(), 2);
        assert_eq!(top[0].score, 30);
        assert_eq!(scores.entries.len(), 3);
    }

    #[test]
    fn test_sort_order_strings_round_trip() {
        for order in [
            SortOrder::ScoreNameLevel,
            SortOrder::NameScoreLevel,
            SortOrder::LevelScoreName,
        ] {
            assert_eq!(order.as_str().parse::<SortOrder>().unwrap(), order);
        }
        assert!("backwards".parse::<SortOrder>().is_err());
    }

    #[test]
    fn test_store_round_trip() {
        let mut store = MemoryStore::default();
        let scores = table(&[("Ann", 700, 3), ("Bob", 200, 1)]);
        scores.save(&mut store);

        let loaded = HighScores::load(&store);
        assert_eq!(loaded.entries, scores.entries);
    }

    #[test]
    fn test_load_survives_missing_and_corrupt_data() {
        let mut store = MemoryStore::default();
        assert!(HighScores::load(&store).is_empty());

        store.save("swarm_strike_highscores", "not json at all");
        let loaded = HighScores::load(&store);
        assert!(loaded.is_empty());
    }
}
