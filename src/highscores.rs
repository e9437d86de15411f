//! High score leaderboard
//!
//! Persisted as a JSON file, keeps the top N scores in descending order.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::persistence;

/// Default table size
pub const MAX_HIGH_SCORES: usize = 10;

/// A single high score entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HighScoreEntry {
    pub score: u64,
    /// Level reached
    pub level: u32,
    /// Unix timestamp (ms) when achieved
    pub timestamp: f64,
}

/// High score leaderboard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HighScores {
    entries: Vec<HighScoreEntry>,
    #[serde(skip, default = "default_max")]
    max_entries: usize,
}

fn default_max() -> usize {
    MAX_HIGH_SCORES
}

impl Default for HighScores {
    fn default() -> Self {
        Self::new(MAX_HIGH_SCORES)
    }
}

impl HighScores {
    /// Create empty leaderboard
    pub fn new(max_entries: usize) -> Self {
        Self {
            entries: Vec::new(),
            max_entries,
        }
    }

    /// Check if a score would make the table
    ///
    /// Any score qualifies while the table has room; once full it must beat
    /// the lowest entry.
    pub fn is_high_score(&self, score: u64) -> bool {
        if self.max_entries == 0 {
            return false;
        }
        if self.entries.len() < self.max_entries {
            return true;
        }
        self.entries.last().is_none_or(|e| score > e.score)
    }

    /// Add a new score to the leaderboard (if it qualifies)
    ///
    /// Returns the rank achieved (1-indexed). Equal scores rank after the
    /// ones already in the table.
    pub fn add_score(&mut self, score: u64, level: u32, timestamp: f64) -> Option<usize> {
        if !self.is_high_score(score) {
            return None;
        }

        let entry = HighScoreEntry {
            score,
            level,
            timestamp,
        };

        // Find insertion point (sorted descending by score)
        let pos = self
            .entries
            .iter()
            .position(|e| score > e.score)
            .unwrap_or(self.entries.len());
        self.entries.insert(pos, entry);
        self.entries.truncate(self.max_entries);

        log::info!("New high score {} (rank {})", score, pos + 1);
        Some(pos + 1)
    }

    pub fn entries(&self) -> &[HighScoreEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Get the top score (if any)
    pub fn top_score(&self) -> Option<u64> {
        self.entries.first().map(|e| e.score)
    }

    /// Load from a JSON file; missing or unreadable files give an empty table
    pub fn load_from(path: &Path, max_entries: usize) -> Self {
        match persistence::load_json::<HighScores>(path) {
            Ok(mut scores) => {
                scores.max_entries = max_entries;
                scores.entries.sort_by(|a, b| b.score.cmp(&a.score));
                scores.entries.truncate(max_entries);
                log::info!("Loaded {} high scores", scores.entries.len());
                scores
            }
            Err(e) => {
                log::warn!("No high scores loaded, starting fresh ({e:#})");
                Self::new(max_entries)
            }
        }
    }

    /// Write to a JSON file; failures are logged
    pub fn save_to(&self, path: &Path) {
        match persistence::save_json(path, self) {
            Ok(()) => log::info!("High scores saved ({} entries)", self.entries.len()),
            Err(e) => log::warn!("Could not save high scores: {e:#}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sorted_descending_with_ranks() {
        let mut hs = HighScores::default();
        assert_eq!(hs.add_score(100, 1, 0.0), Some(1));
        assert_eq!(hs.add_score(300, 2, 1.0), Some(1));
        assert_eq!(hs.add_score(200, 2, 2.0), Some(2));
        let scores: Vec<u64> = hs.entries().iter().map(|e| e.score).collect();
        assert_eq!(scores, vec![300, 200, 100]);
        assert_eq!(hs.top_score(), Some(300));
    }

    #[test]
    fn test_ties_keep_insertion_order() {
        let mut hs = HighScores::default();
        hs.add_score(150, 1, 1.0);
        assert_eq!(hs.add_score(150, 2, 2.0), Some(2));
        assert_eq!(hs.entries()[0].level, 1);
        assert_eq!(hs.entries()[1].level, 2);
    }

    #[test]
    fn test_full_table_needs_to_beat_lowest() {
        let mut hs = HighScores::new(3);
        for s in [50, 40, 30] {
            hs.add_score(s, 1, 0.0);
        }
        assert!(!hs.is_high_score(30));
        assert_eq!(hs.add_score(30, 1, 0.0), None);
        assert_eq!(hs.add_score(45, 1, 0.0), Some(2));
        let scores: Vec<u64> = hs.entries().iter().map(|e| e.score).collect();
        assert_eq!(scores, vec![50, 45, 40]);
    }

    #[test]
    fn test_zero_qualifies_while_room() {
        let hs = HighScores::default();
        assert!(hs.is_high_score(0));
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("highscores.json");

        let mut hs = HighScores::default();
        for (i, s) in [120u64, 90, 120, 400, 10].into_iter().enumerate() {
            hs.add_score(s, i as u32 + 1, i as f64);
        }
        hs.save_to(&path);

        let loaded = HighScores::load_from(&path, MAX_HIGH_SCORES);
        assert_eq!(loaded, hs);
        let levels: Vec<u32> = loaded.entries().iter().map(|e| e.level).collect();
        assert_eq!(levels, vec![4, 1, 3, 2, 5]);
    }

    #[test]
    fn test_corrupt_file_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("highscores.json");
        std::fs::write(&path, "[[[").unwrap();
        assert!(HighScores::load_from(&path, 10).is_empty());
    }
}
