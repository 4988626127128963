//! Ranked high-score storage
//!
//! The game only produces a final score; ranking and retention live here
//! behind [`ScoreSink`]. Every (difficulty, device) pair has its own board,
//! ordered by score (highest first) with ties going to the earlier entry.

pub mod file;
pub mod memory;

use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

use crate::game::Difficulty;

pub use file::FileLeaderboard;
pub use memory::{MemoryLeaderboard, RankedBoard};

/// Entries kept per board
pub const BOARD_CAPACITY: usize = 5;

/// Name recorded when the player gives none
pub const ANONYMOUS: &str = "Anonymous";

/// Kind of device a score was set on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceCategory {
    #[default]
    Desktop,
    Mobile,
}

impl fmt::Display for DeviceCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeviceCategory::Desktop => f.write_str("desktop"),
            DeviceCategory::Mobile => f.write_str("mobile"),
        }
    }
}

/// A score offered to a leaderboard
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub name: String,
    pub score: u32,
    pub difficulty: Difficulty,
    pub device: DeviceCategory,
}

impl Submission {
    pub fn new(name: impl Into<String>, score: u32, difficulty: Difficulty, device: DeviceCategory) -> Self {
        Self {
            name: name.into(),
            score,
            difficulty,
            device,
        }
    }
}

/// A stored leaderboard row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub name: String,
    pub score: u32,
    pub difficulty: Difficulty,
    pub device: DeviceCategory,
    /// Milliseconds since the Unix epoch
    pub created_at_ms: u64,
}

impl LeaderboardEntry {
    pub fn from_submission(submission: Submission, created_at_ms: u64) -> Self {
        let trimmed = submission.name.trim();
        let name = if trimmed.is_empty() {
            ANONYMOUS.to_string()
        } else {
            trimmed.to_string()
        };
        Self {
            name,
            score: submission.score,
            difficulty: submission.difficulty,
            device: submission.device,
            created_at_ms,
        }
    }
}

/// Where finished games report their score
pub trait ScoreSink {
    /// Record a score; returns whether it was accepted
    fn submit(&mut self, submission: Submission) -> bool;

    /// Best `limit` entries for one board, highest first
    fn top(&self, difficulty: Difficulty, device: DeviceCategory, limit: usize) -> Vec<LeaderboardEntry>;

    /// Highest score on a board, 0 when empty
    fn best(&self, difficulty: Difficulty, device: DeviceCategory) -> u32 {
        self.top(difficulty, device, 1)
            .first()
            .map_or(0, |entry| entry.score)
    }
}

pub(crate) fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis() as u64)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_name_becomes_anonymous() {
        let entry = LeaderboardEntry::from_submission(
            Submission::new("   ", 4, Difficulty::Easy, DeviceCategory::Desktop),
            10,
        );
        assert_eq!(entry.name, ANONYMOUS);

        let entry = LeaderboardEntry::from_submission(
            Submission::new(" ada ", 4, Difficulty::Easy, DeviceCategory::Desktop),
            10,
        );
        assert_eq!(entry.name, "ada");
    }

    #[test]
    fn test_entry_json_shape() {
        let entry = LeaderboardEntry {
            name: "ada".to_string(),
            score: 12,
            difficulty: Difficulty::Hard,
            device: DeviceCategory::Mobile,
            created_at_ms: 5,
        };
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["difficulty"], "hard");
        assert_eq!(json["device"], "mobile");
        assert_eq!(json["score"], 12);
    }
}
