//! Core game logic module for Snake
//!
//! This module contains all the game logic without any I/O or rendering dependencies.
//! The board is a torus: leaving one edge re-enters on the opposite one, so the
//! only way to lose is to run into the snake's own body.

pub mod config;
pub mod direction;
pub mod food;
pub mod grid;
pub mod orientation;
pub mod session;
pub mod snake;

// Re-export commonly used types
pub use config::{CollisionPolicy, Difficulty, GameConfig};
pub use direction::{Direction, DirectionQueue, MAX_QUEUED_TURNS};
pub use food::{CellPicker, RandomCellPicker};
pub use grid::{Grid, GridError, Segment};
pub use orientation::{Axis, SegmentSprite, direction_between, segment_sprites};
pub use session::{GameOverReason, GameSession, SessionStatus, TickOutcome};
pub use snake::{MoveInfo, Snake};
