//! Orientation inference for drawing the snake
//!
//! Works out which way the snake travelled between two neighbouring cells,
//! including steps that wrap across an edge, and turns that into per-segment
//! sprite hints (head/tail facing, straight pieces, corners).

use super::direction::Direction;
use super::grid::{Grid, Segment};
use super::snake::Snake;

/// Direction of travel from `from` to `to`.
///
/// Returns `None` when either side is missing, the cells coincide, or they
/// are not orthogonal neighbours on the torus. On a two-row (or two-column)
/// grid both ways are a single step; `Up` (or `Left`) wins.
pub fn direction_between(from: Option<&Segment>, to: Option<&Segment>, grid: Grid) -> Option<Direction> {
    let (from, to) = (from?, to?);
    if from == to {
        return None;
    }

    if from.col == to.col {
        let rows = grid.rows() as i64;
        let dy = i64::from(from.row) - i64::from(to.row);
        if dy == 1 || dy == -(rows - 1) {
            return Some(Direction::Up);
        }
        if dy == -1 || dy == rows - 1 {
            return Some(Direction::Down);
        }
    } else if from.row == to.row {
        let cols = grid.cols() as i64;
        let dx = i64::from(from.col) - i64::from(to.col);
        if dx == 1 || dx == -(cols - 1) {
            return Some(Direction::Left);
        }
        if dx == -1 || dx == cols - 1 {
            return Some(Direction::Right);
        }
    }

    None
}

/// Orientation of a straight body piece
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Horizontal,
    Vertical,
}

/// How a single segment should be drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentSprite {
    /// Facing is `None` only for a snake that has never moved
    Head(Option<Direction>),
    Tail(Option<Direction>),
    Straight(Axis),
    /// Entered travelling `from`, left travelling `to`
    Corner { from: Direction, to: Direction },
    /// No usable hint (overlapping or non-adjacent neighbours)
    Plain,
}

/// Sprite hints for every segment, head first
pub fn segment_sprites(snake: &Snake, grid: Grid) -> Vec<SegmentSprite> {
    let len = snake.len();
    (0..len)
        .map(|index| {
            if index == 0 {
                SegmentSprite::Head(head_facing(snake, grid))
            } else if index == len - 1 {
                SegmentSprite::Tail(tail_facing(snake, grid))
            } else {
                interior_sprite(snake, index, grid)
            }
        })
        .collect()
}

/// Facing of the head, from the segment behind it
pub fn head_facing(snake: &Snake, grid: Grid) -> Option<Direction> {
    direction_between(snake.segment(1), snake.segment(0), grid).or(snake.direction())
}

/// Facing of the tail.
///
/// Right after growth the tail can sit on the cell of the segment ahead of
/// it; the pair further up the body is used instead, or the current heading
/// for bodies too short to have one.
pub fn tail_facing(snake: &Snake, grid: Grid) -> Option<Direction> {
    let len = snake.len();
    if len < 2 {
        return snake.direction();
    }

    let tail = snake.tail();
    let last = Some(&tail);
    let ahead = snake.segment(len - 2);
    if last == ahead {
        if len < 3 {
            return snake.direction();
        }
        return direction_between(ahead, snake.segment(len - 3), grid).or(snake.direction());
    }

    direction_between(last, ahead, grid).or(snake.direction())
}

fn interior_sprite(snake: &Snake, index: usize, grid: Grid) -> SegmentSprite {
    let this = snake.segment(index);
    let incoming = direction_between(snake.segment(index + 1), this, grid);
    let outgoing = direction_between(this, snake.segment(index - 1), grid);

    match (incoming, outgoing) {
        (Some(from), Some(to)) if from == to => {
            if from.is_horizontal() {
                SegmentSprite::Straight(Axis::Horizontal)
            } else {
                SegmentSprite::Straight(Axis::Vertical)
            }
        }
        (Some(from), Some(to)) if corner_rotation(from, to).is_some() => {
            SegmentSprite::Corner { from, to }
        }
        _ => SegmentSprite::Plain,
    }
}

/// Sprite rotation in degrees for a head or tail facing `direction`.
///
/// For front ends that draw one bitmap per piece and rotate it; the terminal
/// renderer picks a glyph per facing instead. The base bitmap points down.
pub fn facing_rotation(direction: Direction) -> i16 {
    match direction {
        Direction::Up => 180,
        Direction::Down => 0,
        Direction::Left => 90,
        Direction::Right => -90,
    }
}

/// Sprite rotation in degrees for a corner, or `None` for a pair that is not
/// a quarter turn
pub fn corner_rotation(from: Direction, to: Direction) -> Option<i16> {
    use Direction::*;

    let degrees = match (from, to) {
        (Up, Right) => 180,
        (Right, Up) => 0,
        (Up, Left) => -90,
        (Right, Down) => -90,
        (Left, Up) => 90,
        (Left, Down) => 180,
        (Down, Right) => 90,
        (Down, Left) => 0,
        _ => return None,
    };
    Some(degrees)
}
