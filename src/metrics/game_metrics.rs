use std::time::{Duration, Instant};

/// Play clock and per-run tallies shown in the header
pub struct GameMetrics {
    started: Instant,
    /// Play time banked before the current pause
    banked: Duration,
    paused_at: Option<Instant>,
    pub elapsed_time: Duration,
    pub high_score: u32,
    pub games_played: u32,
}

impl GameMetrics {
    pub fn new() -> Self {
        Self {
            started: Instant::now(),
            banked: Duration::ZERO,
            paused_at: None,
            elapsed_time: Duration::ZERO,
            high_score: 0,
            games_played: 0,
        }
    }

    /// Refresh `elapsed_time`; frozen while paused
    pub fn update(&mut self) {
        if self.paused_at.is_none() {
            self.elapsed_time = self.banked + self.started.elapsed();
        }
    }

    pub fn on_game_start(&mut self) {
        self.started = Instant::now();
        self.banked = Duration::ZERO;
        self.paused_at = None;
        self.elapsed_time = Duration::ZERO;
    }

    pub fn on_pause(&mut self) {
        if self.paused_at.is_none() {
            self.update();
            self.banked = self.elapsed_time;
            self.paused_at = Some(Instant::now());
        }
    }

    pub fn on_resume(&mut self) {
        if self.paused_at.take().is_some() {
            self.started = Instant::now();
        }
    }

    pub fn on_game_over(&mut self, final_score: u32) {
        self.update();
        self.paused_at = Some(Instant::now());
        self.games_played += 1;
        if final_score > self.high_score {
            self.high_score = final_score;
        }
    }

    /// Seed the best score, e.g. from the leaderboard
    pub fn record_best(&mut self, score: u32) {
        self.high_score = self.high_score.max(score);
    }

    pub fn format_time(&self) -> String {
        let total_secs = self.elapsed_time.as_secs();
        let minutes = total_secs / 60;
        let seconds = total_secs % 60;
        format!("{:02}:{:02}", minutes, seconds)
    }
}

impl Default for GameMetrics {
    fn default() -> Self {
        Self::new()
    }
}
