//! Leaderboard persisted as a JSON file
//!
//! The whole file is rewritten on every accepted submission. A missing file is
//! an empty leaderboard; an unreadable or corrupt one is logged and treated as
//! empty so a bad file never stops a game from starting.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::{info, warn};
use serde::{Deserialize, Serialize};

use super::{DeviceCategory, LeaderboardEntry, MemoryLeaderboard, ScoreSink, Submission, now_ms};
use crate::game::Difficulty;

#[derive(Debug, Default, Serialize, Deserialize)]
struct LeaderboardFile {
    entries: Vec<LeaderboardEntry>,
}

/// JSON-backed leaderboard
pub struct FileLeaderboard {
    path: PathBuf,
    boards: MemoryLeaderboard,
}

impl FileLeaderboard {
    /// Open the leaderboard at `path`, starting empty if it cannot be read
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let boards = match Self::load(&path) {
            Ok(boards) => boards,
            Err(err) => {
                warn!("starting with an empty leaderboard: {:#}", err);
                MemoryLeaderboard::new()
            }
        };
        Self { path, boards }
    }

    fn load(path: &Path) -> Result<MemoryLeaderboard> {
        let mut boards = MemoryLeaderboard::new();
        if !path.exists() {
            return Ok(boards);
        }

        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read leaderboard from {:?}", path))?;
        let file: LeaderboardFile = serde_json::from_str(&json)
            .with_context(|| format!("Failed to parse leaderboard {:?}", path))?;

        for entry in file.entries {
            boards.insert(entry);
        }
        Ok(boards)
    }

    /// Write every board back to disk
    pub fn save(&self) -> Result<()> {
        self.write(&self.boards)
    }

    fn write(&self, boards: &MemoryLeaderboard) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create directory: {:?}", parent))?;
            }
        }

        let mut entries: Vec<LeaderboardEntry> = boards.entries().cloned().collect();
        entries.sort_by(|a, b| {
            (a.difficulty.as_str(), a.device.to_string(), b.score, a.created_at_ms).cmp(&(
                b.difficulty.as_str(),
                b.device.to_string(),
                a.score,
                b.created_at_ms,
            ))
        });

        let json = serde_json::to_string_pretty(&LeaderboardFile { entries })
            .context("Failed to serialize leaderboard")?;
        std::fs::write(&self.path, json)
            .with_context(|| format!("Failed to write leaderboard to {:?}", self.path))?;
        Ok(())
    }

    /// Record a submission with an explicit timestamp and persist it.
    /// Nothing changes in memory unless the write succeeds.
    pub fn submit_at(&mut self, submission: Submission, created_at_ms: u64) -> Result<Option<usize>> {
        let mut boards = self.boards.clone();
        let rank = boards.submit_at(submission, created_at_ms);
        self.write(&boards)?;
        self.boards = boards;
        Ok(rank)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ScoreSink for FileLeaderboard {
    fn submit(&mut self, submission: Submission) -> bool {
        let score = submission.score;
        match self.submit_at(submission, now_ms()) {
            Ok(rank) => {
                info!("score {} saved to {:?} (rank {:?})", score, self.path, rank);
                true
            }
            Err(err) => {
                warn!("score {} not saved: {:#}", score, err);
                false
            }
        }
    }

    fn top(&self, difficulty: Difficulty, device: DeviceCategory, limit: usize) -> Vec<LeaderboardEntry> {
        self.boards.top(difficulty, device, limit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn sub(name: &str, score: u32) -> Submission {
        Submission::new(name, score, Difficulty::Hard, DeviceCategory::Desktop)
    }

    #[test]
    fn test_missing_file_is_empty() {
        let dir = TempDir::new().unwrap();
        let lb = FileLeaderboard::open(dir.path().join("scores.json"));
        assert!(lb.top(Difficulty::Hard, DeviceCategory::Desktop, 5).is_empty());
    }

    #[test]
    fn test_scores_survive_reopen() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("scores.json");

        let mut lb = FileLeaderboard::open(&path);
        lb.submit_at(sub("ada", 12), 1).unwrap();
        lb.submit_at(sub("bob", 12), 2).unwrap();
        lb.submit_at(sub("cy", 30), 3).unwrap();
        assert!(path.exists());

        let reopened = FileLeaderboard::open(&path);
        let top = reopened.top(Difficulty::Hard, DeviceCategory::Desktop, 5);
        let names: Vec<_> = top.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["cy", "ada", "bob"]);
    }

    #[test]
    fn test_corrupt_file_starts_empty() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("scores.json");
        std::fs::write(&path, "{ not json").unwrap();

        let mut lb = FileLeaderboard::open(&path);
        assert!(lb.top(Difficulty::Hard, DeviceCategory::Desktop, 5).is_empty());

        // The next accepted score replaces the bad file
        assert!(lb.submit(sub("ada", 3)));
        let reopened = FileLeaderboard::open(&path);
        assert_eq!(reopened.best(Difficulty::Hard, DeviceCategory::Desktop), 3);
    }

    #[test]
    fn test_unwritable_path_rejects_submission() {
        let dir = TempDir::new().unwrap();
        // A directory where the file should be
        let mut lb = FileLeaderboard::open(dir.path());
        assert!(!lb.submit(sub("ada", 42)));
        assert!(lb.top(Difficulty::Hard, DeviceCategory::Desktop, 5).is_empty());
        assert_eq!(lb.best(Difficulty::Hard, DeviceCategory::Desktop), 0);
    }
}
