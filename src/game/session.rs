use std::time::Duration;

use log::{debug, info};

use super::{
    config::{CollisionPolicy, GameConfig},
    direction::Direction,
    food::CellPicker,
    grid::{Grid, Segment},
    orientation::{SegmentSprite, segment_sprites},
    snake::Snake,
};

/// Why a game ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOverReason {
    /// The head ran into the body
    SelfCollision,
    /// No free cell was left for food
    BoardFull,
}

/// Lifecycle of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    Running,
    Paused,
    Over(GameOverReason),
}

/// Result of a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickOutcome {
    /// The snake took a step
    pub moved: bool,
    /// The head reached the food this tick
    pub ate_food: bool,
    /// The tick interval changed; the caller must rebuild its timer
    pub speed_changed: bool,
    /// Set on the tick that ended the game
    pub game_over: Option<GameOverReason>,
}

/// All state for one game: board, snake, food, score and pacing
///
/// Owned by the caller and advanced one tick at a time; nothing here is
/// global.
pub struct GameSession<P: CellPicker> {
    config: GameConfig,
    grid: Grid,
    snake: Snake,
    food: Option<Segment>,
    score: u32,
    steps: u32,
    tick_interval: Duration,
    status: SessionStatus,
    picker: P,
}

impl<P: CellPicker> GameSession<P> {
    /// Start a game with the snake in the middle of `grid`
    pub fn new(config: GameConfig, grid: Grid, picker: P) -> Self {
        let snake = Snake::new(grid.center());
        let tick_interval = config.initial_tick();
        let mut session = Self {
            config,
            grid,
            snake,
            food: None,
            score: 0,
            steps: 0,
            tick_interval,
            status: SessionStatus::Running,
            picker,
        };
        session.place_food();
        info!(
            "new game: {}x{} grid, difficulty {}, tick {:?}",
            grid.rows(),
            grid.cols(),
            session.config.difficulty,
            session.tick_interval
        );
        session
    }

    /// Throw the current game away and start over on the same grid
    pub fn restart(&mut self) {
        self.snake = Snake::new(self.grid.center());
        self.score = 0;
        self.steps = 0;
        self.tick_interval = self.config.initial_tick();
        self.status = SessionStatus::Running;
        self.place_food();
        info!("game restarted");
    }

    /// Queue a turn; ignored unless the game is running
    pub fn steer(&mut self, direction: Direction) -> bool {
        if self.status != SessionStatus::Running {
            return false;
        }
        self.snake.set_direction(direction)
    }

    /// Execute one step of the game
    pub fn tick(&mut self) -> TickOutcome {
        if self.status != SessionStatus::Running {
            return TickOutcome::default();
        }

        if self.config.collision_policy == CollisionPolicy::Predictive
            && self.snake.predicts_self_collision(self.grid)
        {
            return self.end(GameOverReason::SelfCollision);
        }

        let info = self.snake.advance(self.grid);
        if !info.moved {
            return TickOutcome::default();
        }
        self.steps += 1;

        if info.self_collision {
            let mut outcome = self.end(GameOverReason::SelfCollision);
            outcome.moved = true;
            return outcome;
        }

        let mut outcome = TickOutcome {
            moved: true,
            ..TickOutcome::default()
        };

        if Some(self.snake.head()) == self.food {
            outcome.ate_food = true;
            self.snake.grow();
            self.score += 1;

            let faster = self.config.sped_up(self.tick_interval);
            if faster != self.tick_interval {
                debug!("tick interval {:?} -> {:?}", self.tick_interval, faster);
                self.tick_interval = faster;
                outcome.speed_changed = true;
            }

            if !self.place_food() {
                outcome.game_over = Some(GameOverReason::BoardFull);
            }
        }

        outcome
    }

    pub fn pause(&mut self) {
        if self.status == SessionStatus::Running {
            self.status = SessionStatus::Paused;
        }
    }

    pub fn resume(&mut self) {
        if self.status == SessionStatus::Paused {
            self.status = SessionStatus::Running;
        }
    }

    pub fn toggle_pause(&mut self) {
        match self.status {
            SessionStatus::Running => self.pause(),
            SessionStatus::Paused => self.resume(),
            SessionStatus::Over(_) => {}
        }
    }

    /// Switch to a new board size between ticks.
    ///
    /// Segments are folded into the new grid; food that fell outside it or
    /// under the snake is placed again. Returns the reason if the new board
    /// has no free cell left and the game ended because of it.
    pub fn resize(&mut self, grid: Grid) -> Option<GameOverReason> {
        if grid == self.grid {
            return None;
        }
        info!(
            "grid resized {}x{} -> {}x{}",
            self.grid.rows(),
            self.grid.cols(),
            grid.rows(),
            grid.cols()
        );
        self.grid = grid;
        self.snake.wrap_into(grid);

        let food_ok = self
            .food
            .is_some_and(|food| grid.contains(food) && !self.snake.occupies(food));
        if !food_ok && !self.is_over() && !self.place_food() {
            return Some(GameOverReason::BoardFull);
        }
        None
    }

    /// Sprite hints for drawing the snake
    pub fn sprites(&self) -> Vec<SegmentSprite> {
        segment_sprites(&self.snake, self.grid)
    }

    fn place_food(&mut self) -> bool {
        self.food = self.picker.pick(self.grid, &self.snake);
        if self.food.is_none() {
            info!("board full with score {}", self.score);
            self.status = SessionStatus::Over(GameOverReason::BoardFull);
            return false;
        }
        true
    }

    fn end(&mut self, reason: GameOverReason) -> TickOutcome {
        info!(
            "game over ({:?}): score {}, length {}, steps {}",
            reason,
            self.score,
            self.snake.len(),
            self.steps
        );
        self.status = SessionStatus::Over(reason);
        TickOutcome {
            game_over: Some(reason),
            ..TickOutcome::default()
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn grid(&self) -> Grid {
        self.grid
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn food(&self) -> Option<Segment> {
        self.food
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn steps(&self) -> u32 {
        self.steps
    }

    pub fn tick_interval(&self) -> Duration {
        self.tick_interval
    }

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    pub fn is_over(&self) -> bool {
        matches!(self.status, SessionStatus::Over(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::RandomCellPicker;

    /// Picker that hands out a fixed list of cells, then reports a full board
    struct ScriptedPicker {
        cells: Vec<Segment>,
    }

    impl ScriptedPicker {
        fn new(cells: &[(i32, i32)]) -> Self {
            Self {
                cells: cells.iter().rev().map(|&(r, c)| Segment::new(r, c)).collect(),
            }
        }
    }

    impl CellPicker for ScriptedPicker {
        fn pick(&mut self, _grid: Grid, _snake: &Snake) -> Option<Segment> {
            self.cells.pop()
        }
    }

    fn session(food: &[(i32, i32)]) -> GameSession<ScriptedPicker> {
        let config = GameConfig::small();
        let grid = Grid::square(10).unwrap();
        GameSession::new(config, grid, ScriptedPicker::new(food))
    }

    #[test]
    fn test_new_session() {
        let s = session(&[(1, 1)]);
        assert_eq!(s.status(), SessionStatus::Running);
        assert_eq!(s.snake().head(), Segment::new(5, 5));
        assert_eq!(s.food(), Some(Segment::new(1, 1)));
        assert_eq!(s.score(), 0);
        assert_eq!(s.tick_interval(), Duration::from_millis(125));
    }

    #[test]
    fn test_tick_before_steering_is_idle() {
        let mut s = session(&[(1, 1)]);
        let outcome = s.tick();
        assert!(!outcome.moved);
        assert_eq!(s.steps(), 0);
        assert_eq!(s.snake().head(), Segment::new(5, 5));
    }

    #[test]
    fn test_eating_scores_and_grows_next_tick() {
        let mut s = session(&[(5, 7), (1, 1)]);
        s.steer(Direction::Right);

        assert!(!s.tick().ate_food);
        let outcome = s.tick();
        assert!(outcome.ate_food);
        assert!(outcome.speed_changed);
        assert_eq!(s.score(), 1);
        assert_eq!(s.snake().len(), 1);
        assert_eq!(s.food(), Some(Segment::new(1, 1)));
        assert_eq!(s.tick_interval(), Duration::from_millis(123));

        s.tick();
        assert_eq!(s.snake().len(), 2);
        assert_eq!(s.snake().head(), Segment::new(5, 8));
    }

    /// Feed a snake heading right until it is five long
    fn long_snake() -> GameSession<ScriptedPicker> {
        let mut s = session(&[(5, 6), (5, 7), (5, 8), (5, 9), (1, 1)]);
        s.steer(Direction::Right);
        for _ in 0..5 {
            s.tick();
        }
        assert_eq!(s.snake().len(), 5);
        s
    }

    #[test]
    fn test_self_collision_ends_game() {
        let mut s = long_snake();
        // Head at (5,10), body trailing left. Loop back into it.
        s.steer(Direction::Down);
        s.tick();
        s.steer(Direction::Left);
        s.tick();
        s.steer(Direction::Up);
        let outcome = s.tick();

        assert!(outcome.moved);
        assert_eq!(outcome.game_over, Some(GameOverReason::SelfCollision));
        assert!(s.is_over());
        assert!(s.snake().has_self_collision());

        // Further ticks do nothing
        let head = s.snake().head();
        assert_eq!(s.tick(), TickOutcome::default());
        assert_eq!(s.snake().head(), head);
    }

    #[test]
    fn test_predictive_policy_stops_before_the_move() {
        let mut s = long_snake();
        s.config.collision_policy = CollisionPolicy::Predictive;
        s.steer(Direction::Down);
        s.tick();
        s.steer(Direction::Left);
        s.tick();
        s.steer(Direction::Up);
        let head = s.snake().head();
        let outcome = s.tick();

        assert!(!outcome.moved);
        assert_eq!(outcome.game_over, Some(GameOverReason::SelfCollision));
        assert_eq!(s.snake().head(), head);
        assert!(!s.snake().has_self_collision());
    }

    #[test]
    fn test_board_full_ends_game() {
        let mut s = session(&[(5, 6)]);
        s.steer(Direction::Right);
        let outcome = s.tick();
        assert!(outcome.ate_food);
        assert_eq!(outcome.game_over, Some(GameOverReason::BoardFull));
        assert_eq!(s.status(), SessionStatus::Over(GameOverReason::BoardFull));
    }

    #[test]
    fn test_single_cell_board_is_full_at_start() {
        let grid = Grid::square(1).unwrap();
        let s = GameSession::new(GameConfig::default(), grid, RandomCellPicker::seeded(9));
        assert_eq!(s.status(), SessionStatus::Over(GameOverReason::BoardFull));
        assert_eq!(s.food(), None);
    }

    #[test]
    fn test_pause_blocks_ticks_and_steering() {
        let mut s = session(&[(1, 1)]);
        s.steer(Direction::Up);
        s.pause();
        assert!(!s.steer(Direction::Left));
        assert!(!s.tick().moved);

        s.toggle_pause();
        assert_eq!(s.status(), SessionStatus::Running);
        assert!(s.tick().moved);
        assert_eq!(s.snake().head(), Segment::new(4, 5));
    }

    #[test]
    fn test_restart_resets_state() {
        let mut s = session(&[(5, 6), (1, 1), (2, 2)]);
        s.steer(Direction::Right);
        s.tick();
        assert_eq!(s.score(), 1);

        s.restart();
        assert_eq!(s.score(), 0);
        assert_eq!(s.steps(), 0);
        assert_eq!(s.snake().len(), 1);
        assert_eq!(s.snake().direction(), None);
        assert_eq!(s.tick_interval(), Duration::from_millis(125));
        assert_eq!(s.food(), Some(Segment::new(2, 2)));
    }

    #[test]
    fn test_resize_moves_out_of_range_food() {
        let mut s = session(&[(9, 9), (2, 3)]);
        s.resize(Grid::square(6).unwrap());
        assert_eq!(s.grid().rows(), 6);
        assert_eq!(s.food(), Some(Segment::new(2, 3)));
        assert!(s.grid().contains(s.snake().head()));
    }

    #[test]
    fn test_resize_onto_full_board_ends_game() {
        let mut s = session(&[(9, 9)]);
        let reason = s.resize(Grid::square(1).unwrap());
        assert_eq!(reason, Some(GameOverReason::BoardFull));
        assert_eq!(s.status(), SessionStatus::Over(GameOverReason::BoardFull));
        assert_eq!(s.food(), None);

        // Already over: a later resize reports nothing new
        assert_eq!(s.resize(Grid::square(4).unwrap()), None);
    }

    #[test]
    fn test_resize_keeps_valid_food() {
        let mut s = session(&[(2, 2), (3, 3)]);
        s.resize(Grid::square(12).unwrap());
        assert_eq!(s.food(), Some(Segment::new(2, 2)));
    }

    #[test]
    fn test_random_picker_session_never_places_food_on_snake() {
        let grid = Grid::square(10).unwrap();
        let mut s = GameSession::new(GameConfig::small(), grid, RandomCellPicker::seeded(5));
        s.steer(Direction::Right);
        for _ in 0..200 {
            if s.is_over() {
                break;
            }
            s.tick();
            if let Some(food) = s.food() {
                assert!(!s.snake().occupies(food));
            }
        }
    }
}
