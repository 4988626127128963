//! Toroid Snake - a wrap-around grid Snake with a ranked leaderboard
//!
//! This library provides:
//! - Core game logic: movement, queued turns, growth, collisions and
//!   orientation inference for drawing (game module)
//! - Score storage behind a small sink trait (leaderboard module)
//! - TUI rendering, input mapping and the interactive mode (render, input, modes)

pub mod game;
pub mod input;
pub mod leaderboard;
pub mod metrics;
pub mod modes;
pub mod render;
