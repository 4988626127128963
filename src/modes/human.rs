use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use log::{debug, info, warn};
use rand::rngs::ThreadRng;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{Stderr, stderr};
use std::time::Duration;
use tokio::time::{Instant, Interval, interval, interval_at};

use crate::game::{GameConfig, GameSession, Grid, RandomCellPicker, SessionStatus, TickOutcome};
use crate::input::{InputHandler, KeyAction};
use crate::leaderboard::{BOARD_CAPACITY, DeviceCategory, LeaderboardEntry, ScoreSink, Submission};
use crate::metrics::GameMetrics;
use crate::render::Renderer;

/// Rows used by the header, footer and board border
const CHROME_ROWS: u16 = 8;
/// Columns used by the board border
const CHROME_COLS: u16 = 4;

/// Board area in cells for a terminal of `width` x `height` characters.
/// Each cell is two characters wide.
pub fn viewport_cells(width: u16, height: u16) -> (usize, usize) {
    let cols = width.saturating_sub(CHROME_COLS) / 2;
    let rows = height.saturating_sub(CHROME_ROWS);
    (cols as usize, rows as usize)
}

pub struct HumanMode {
    session: GameSession<RandomCellPicker<ThreadRng>>,
    metrics: GameMetrics,
    renderer: Renderer,
    input_handler: InputHandler,
    leaderboard: Box<dyn ScoreSink>,
    player_name: String,
    top_scores: Vec<LeaderboardEntry>,
    score_submitted: bool,
    should_quit: bool,
}

impl HumanMode {
    pub fn new(
        config: GameConfig,
        grid: Grid,
        leaderboard: Box<dyn ScoreSink>,
        player_name: impl Into<String>,
    ) -> Self {
        let difficulty = config.difficulty;
        let session = GameSession::new(config, grid, RandomCellPicker::from_entropy());

        let mut metrics = GameMetrics::new();
        metrics.record_best(leaderboard.best(difficulty, DeviceCategory::Desktop));

        Self {
            session,
            metrics,
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            leaderboard,
            player_name: player_name.into(),
            top_scores: Vec::new(),
            score_submitted: false,
            should_quit: false,
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen).context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stderr);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;

        // Run game loop with cleanup
        let result = self.run_game_loop(&mut terminal).await;

        // Cleanup terminal
        self.cleanup_terminal(&mut terminal)?;

        result
    }

    async fn run_game_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();

        let mut tick_timer = interval(self.session.tick_interval());

        // Render at 30 FPS (33ms per frame)
        let mut render_timer = interval(Duration::from_millis(33));

        loop {
            tokio::select! {
                maybe_event = event_stream.next() => {
                    match maybe_event {
                        Some(Ok(event)) => {
                            if self.handle_event(event) {
                                tick_timer = restarted_timer(self.session.tick_interval());
                            }
                        }
                        Some(Err(err)) => warn!("terminal event error: {}", err),
                        None => self.should_quit = true,
                    }
                }

                _ = tick_timer.tick() => {
                    let outcome = self.update_game();
                    if outcome.speed_changed {
                        // Never let two intervals overlap
                        tick_timer = restarted_timer(self.session.tick_interval());
                    }
                }

                _ = render_timer.tick() => {
                    self.metrics.update();
                    terminal.draw(|frame| {
                        self.renderer.render(frame, &self.session, &self.metrics, &self.top_scores);
                    }).context("Failed to draw frame")?;
                }

                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    /// Apply one terminal event. Returns true when the tick timer must be
    /// rebuilt because the pace was reset.
    fn handle_event(&mut self, event: Event) -> bool {
        match event {
            Event::Key(key) => {
                // Only process key press events, not release
                if key.kind != KeyEventKind::Press {
                    return false;
                }

                match self.input_handler.handle_key_event(key) {
                    KeyAction::Turn(direction) => {
                        if self.session.steer(direction) {
                            debug!("turn {:?} queued", direction);
                        }
                    }
                    KeyAction::TogglePause => self.toggle_pause(),
                    KeyAction::Restart => {
                        self.reset_game();
                        return true;
                    }
                    KeyAction::Quit => self.should_quit = true,
                    KeyAction::None => {}
                }
            }
            Event::Resize(width, height) => self.handle_resize(width, height),
            _ => {}
        }
        false
    }

    fn update_game(&mut self) -> TickOutcome {
        let outcome = self.session.tick();
        if outcome.game_over.is_some() {
            self.on_game_over();
        }
        outcome
    }

    fn toggle_pause(&mut self) {
        self.session.toggle_pause();
        match self.session.status() {
            SessionStatus::Paused => self.metrics.on_pause(),
            SessionStatus::Running => self.metrics.on_resume(),
            SessionStatus::Over(_) => {}
        }
    }

    fn on_game_over(&mut self) {
        let score = self.session.score();
        let difficulty = self.session.config().difficulty;
        self.metrics.on_game_over(score);

        if score > 0 && !self.score_submitted {
            let submission = Submission::new(
                self.player_name.clone(),
                score,
                difficulty,
                DeviceCategory::Desktop,
            );
            if self.leaderboard.submit(submission) {
                info!("submitted score {} ({})", score, difficulty);
            } else {
                warn!("leaderboard rejected score {}", score);
            }
            self.score_submitted = true;
        }

        self.top_scores = self
            .leaderboard
            .top(difficulty, DeviceCategory::Desktop, BOARD_CAPACITY);
    }

    fn handle_resize(&mut self, width: u16, height: u16) {
        if self.session.config().is_fixed_size() {
            return;
        }
        let (cols, rows) = viewport_cells(width, height);
        match self.session.config().grid_for_viewport(cols, rows) {
            Ok(grid) => {
                if self.session.resize(grid).is_some() {
                    self.on_game_over();
                }
            }
            Err(err) => warn!("ignoring resize to {}x{}: {}", width, height, err),
        }
    }

    fn reset_game(&mut self) {
        self.session.restart();
        self.metrics.on_game_start();
        self.top_scores.clear();
        self.score_submitted = false;
    }

    fn cleanup_terminal(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)
            .context("Failed to leave alternate screen")?;
        terminal.show_cursor().context("Failed to show cursor")?;
        Ok(())
    }
}

/// Fresh timer whose first tick is one full period away
fn restarted_timer(period: Duration) -> Interval {
    interval_at(Instant::now() + period, period)
}
