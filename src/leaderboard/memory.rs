use std::collections::HashMap;

use super::{BOARD_CAPACITY, DeviceCategory, LeaderboardEntry, ScoreSink, Submission, now_ms};
use crate::game::Difficulty;

/// One ranked board, trimmed to [`BOARD_CAPACITY`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RankedBoard {
    entries: Vec<LeaderboardEntry>,
}

impl RankedBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert and re-rank. Returns the 0-based rank, or `None` if the entry
    /// did not make the cut.
    pub fn insert(&mut self, entry: LeaderboardEntry) -> Option<usize> {
        let score = entry.score;
        let created = entry.created_at_ms;
        self.entries.push(entry);
        // Stable sort: equal (score, time) pairs keep insertion order
        self.entries
            .sort_by(|a, b| b.score.cmp(&a.score).then(a.created_at_ms.cmp(&b.created_at_ms)));

        let rank = self
            .entries
            .iter()
            .rposition(|e| e.score == score && e.created_at_ms == created);
        self.entries.truncate(BOARD_CAPACITY);
        rank.filter(|&r| r < BOARD_CAPACITY)
    }

    pub fn entries(&self) -> &[LeaderboardEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Leaderboard held in memory for the life of the process
#[derive(Debug, Clone, Default)]
pub struct MemoryLeaderboard {
    boards: HashMap<(Difficulty, DeviceCategory), RankedBoard>,
}

impl MemoryLeaderboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a submission with an explicit timestamp
    pub fn submit_at(&mut self, submission: Submission, created_at_ms: u64) -> Option<usize> {
        let entry = LeaderboardEntry::from_submission(submission, created_at_ms);
        self.insert(entry)
    }

    pub(crate) fn insert(&mut self, entry: LeaderboardEntry) -> Option<usize> {
        self.boards
            .entry((entry.difficulty, entry.device))
            .or_default()
            .insert(entry)
    }

    /// Every stored entry, board by board
    pub fn entries(&self) -> impl Iterator<Item = &LeaderboardEntry> + '_ {
        self.boards.values().flat_map(|board| board.entries().iter())
    }

    pub fn board(&self, difficulty: Difficulty, device: DeviceCategory) -> Option<&RankedBoard> {
        self.boards.get(&(difficulty, device))
    }
}

impl ScoreSink for MemoryLeaderboard {
    fn submit(&mut self, submission: Submission) -> bool {
        self.submit_at(submission, now_ms());
        true
    }

    fn top(&self, difficulty: Difficulty, device: DeviceCategory, limit: usize) -> Vec<LeaderboardEntry> {
        self.board(difficulty, device)
            .map(|board| board.entries().iter().take(limit).cloned().collect())
            .unwrap_or_default()
    }
}
