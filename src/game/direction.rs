use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

/// Maximum number of validated turns waiting to be applied
pub const MAX_QUEUED_TURNS: usize = 2;

/// Direction the snake can travel
///
/// Rows grow downwards, so `Up` decreases the row index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// The direction pointing the other way
    pub fn opposite(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// Returns true if turning from self to other would be a 180-degree turn
    pub fn is_opposite(self, other: Direction) -> bool {
        self.opposite() == other
    }

    /// Returns the (d_row, d_col) step for moving in this direction
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (-1, 0),
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
            Direction::Right => (0, 1),
        }
    }

    pub fn is_horizontal(self) -> bool {
        matches!(self, Direction::Left | Direction::Right)
    }
}

/// Bounded buffer of validated, not-yet-applied turns
///
/// Each request is checked against the most recently accepted direction (the
/// back of the queue, or the current heading when empty) so that a rapid
/// sequence such as up-then-left cannot sneak a reversal past the check.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DirectionQueue {
    turns: VecDeque<Direction>,
}

impl DirectionQueue {
    pub fn new() -> Self {
        Self {
            turns: VecDeque::with_capacity(MAX_QUEUED_TURNS),
        }
    }

    /// Offer a turn, validated against the last accepted direction.
    ///
    /// Duplicates and reversals are dropped silently. When the queue is full
    /// the newest entry is replaced and the first queued turn is kept.
    /// Returns whether the request was accepted.
    pub fn offer(&mut self, requested: Direction, current: Option<Direction>) -> bool {
        let last_accepted = self.turns.back().copied().or(current);

        if let Some(last) = last_accepted {
            if last == requested || last.is_opposite(requested) {
                return false;
            }
        }

        if self.turns.len() < MAX_QUEUED_TURNS {
            self.turns.push_back(requested);
        } else if let Some(newest) = self.turns.back_mut() {
            *newest = requested;
        }

        true
    }

    pub fn pop_front(&mut self) -> Option<Direction> {
        self.turns.pop_front()
    }

    pub fn front(&self) -> Option<Direction> {
        self.turns.front().copied()
    }

    pub fn back(&self) -> Option<Direction> {
        self.turns.back().copied()
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    pub fn clear(&mut self) {
        self.turns.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = Direction> + '_ {
        self.turns.iter().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opposite_directions() {
        assert!(Direction::Up.is_opposite(Direction::Down));
        assert!(Direction::Down.is_opposite(Direction::Up));
        assert!(Direction::Left.is_opposite(Direction::Right));
        assert!(Direction::Right.is_opposite(Direction::Left));

        assert!(!Direction::Up.is_opposite(Direction::Left));
        assert!(!Direction::Up.is_opposite(Direction::Right));
        assert!(!Direction::Up.is_opposite(Direction::Up));
    }

    #[test]
    fn test_direction_delta() {
        assert_eq!(Direction::Up.delta(), (-1, 0));
        assert_eq!(Direction::Down.delta(), (1, 0));
        assert_eq!(Direction::Left.delta(), (0, -1));
        assert_eq!(Direction::Right.delta(), (0, 1));
    }

    #[test]
    fn test_reversal_rejected_for_every_direction() {
        for dir in Direction::ALL {
            let mut queue = DirectionQueue::new();
            assert!(queue.offer(dir, None));
            let before = queue.clone();

            assert!(!queue.offer(dir.opposite(), None));
            assert_eq!(queue, before);
        }
    }

    #[test]
    fn test_duplicate_request_queued_once() {
        let mut queue = DirectionQueue::new();
        assert!(queue.offer(Direction::Left, None));
        assert!(!queue.offer(Direction::Left, None));
        assert_eq!(queue.len(), 1);
    }

    #[test]
    fn test_checks_against_current_when_empty() {
        let mut queue = DirectionQueue::new();
        assert!(!queue.offer(Direction::Left, Some(Direction::Right)));
        assert!(!queue.offer(Direction::Right, Some(Direction::Right)));
        assert!(queue.is_empty());

        assert!(queue.offer(Direction::Up, Some(Direction::Right)));
        assert_eq!(queue.front(), Some(Direction::Up));
    }

    #[test]
    fn test_full_queue_replaces_newest() {
        let mut queue = DirectionQueue::new();
        queue.offer(Direction::Up, Some(Direction::Right));
        queue.offer(Direction::Left, Some(Direction::Right));
        assert_eq!(queue.len(), 2);

        // Validated against Left, the newest entry
        assert!(queue.offer(Direction::Down, Some(Direction::Right)));

        let turns: Vec<_> = queue.iter().collect();
        assert_eq!(turns, vec![Direction::Up, Direction::Down]);
    }

    #[test]
    fn test_full_queue_still_rejects_reversal_of_newest() {
        let mut queue = DirectionQueue::new();
        queue.offer(Direction::Up, Some(Direction::Right));
        queue.offer(Direction::Left, Some(Direction::Right));

        assert!(!queue.offer(Direction::Right, Some(Direction::Right)));
        let turns: Vec<_> = queue.iter().collect();
        assert_eq!(turns, vec![Direction::Up, Direction::Left]);
    }

    #[test]
    fn test_direction_serializes_lowercase() {
        let json = serde_json::to_string(&Direction::Left).unwrap();
        assert_eq!(json, "\"left\"");
    }
}
