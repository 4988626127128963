use std::collections::VecDeque;

use super::direction::{Direction, DirectionQueue};
use super::grid::{Grid, Segment};

/// What a single call to [`Snake::advance`] did
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MoveInfo {
    /// False when no direction has been requested yet
    pub moved: bool,
    /// The tail was kept this tick
    pub grew: bool,
    /// The new head landed on another segment
    pub self_collision: bool,
}

/// The snake: body geometry, heading, queued turns and pending growth
///
/// Segment 0 is the head. The grid is passed into every call that moves the
/// snake, so a resize between ticks needs no bookkeeping here.
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    body: VecDeque<Segment>,
    direction: Option<Direction>,
    queue: DirectionQueue,
    pending_growth: u32,
}

impl Snake {
    /// A one-segment snake that has not started moving
    pub fn new(start: Segment) -> Self {
        let mut body = VecDeque::new();
        body.push_back(start);
        Self {
            body,
            direction: None,
            queue: DirectionQueue::new(),
            pending_growth: 0,
        }
    }

    /// Build a snake from explicit segments, head first
    pub fn from_body<I>(segments: I, direction: Option<Direction>) -> Option<Self>
    where
        I: IntoIterator<Item = Segment>,
    {
        let body: VecDeque<Segment> = segments.into_iter().collect();
        if body.is_empty() {
            return None;
        }
        Some(Self {
            body,
            direction,
            queue: DirectionQueue::new(),
            pending_growth: 0,
        })
    }

    /// Queue a turn. Duplicates and reversals of the last accepted direction
    /// are ignored; returns whether the turn was accepted.
    pub fn set_direction(&mut self, requested: Direction) -> bool {
        self.queue.offer(requested, self.direction)
    }

    /// Request one segment of growth on a later move
    pub fn grow(&mut self) {
        self.pending_growth = self.pending_growth.saturating_add(1);
    }

    /// Advance one tick.
    ///
    /// The first queued turn becomes the heading before the step is taken.
    /// With growth pending the old tail stays in place.
    pub fn advance(&mut self, grid: Grid) -> MoveInfo {
        if let Some(turn) = self.queue.pop_front() {
            self.direction = Some(turn);
        }
        let Some(direction) = self.direction else {
            return MoveInfo::default();
        };

        let new_head = self.head().stepped(direction, grid);
        let grew = self.pending_growth > 0;

        self.body.push_front(new_head);
        if grew {
            self.pending_growth -= 1;
        } else {
            self.body.pop_back();
        }

        MoveInfo {
            moved: true,
            grew,
            self_collision: self.has_self_collision(),
        }
    }

    /// True if any non-head segment shares the head's cell
    pub fn has_self_collision(&self) -> bool {
        let head = self.head();
        self.body.iter().skip(1).any(|seg| *seg == head)
    }

    /// The direction the next [`advance`](Self::advance) will use
    pub fn next_direction(&self) -> Option<Direction> {
        self.queue.front().or(self.direction)
    }

    /// Where the head would be after the next tick, without moving
    pub fn next_head(&self, grid: Grid) -> Option<Segment> {
        self.next_direction()
            .map(|direction| self.head().stepped(direction, grid))
    }

    /// Predict whether the next tick ends in a self-collision.
    ///
    /// Agrees with `has_self_collision` evaluated after `advance`: the current
    /// tail is vacated on this tick unless growth is pending.
    pub fn predicts_self_collision(&self, grid: Grid) -> bool {
        let Some(next) = self.next_head(grid) else {
            return false;
        };
        let keep = if self.pending_growth > 0 {
            self.body.len()
        } else {
            self.body.len() - 1
        };
        self.body.iter().take(keep).any(|seg| *seg == next)
    }

    /// Fold every segment into a (possibly smaller) grid
    pub fn wrap_into(&mut self, grid: Grid) {
        for seg in self.body.iter_mut() {
            *seg = seg.wrapped_into(grid);
        }
    }

    pub fn head(&self) -> Segment {
        self.body[0]
    }

    pub fn tail(&self) -> Segment {
        self.body[self.body.len() - 1]
    }

    pub fn segment(&self, index: usize) -> Option<&Segment> {
        self.body.get(index)
    }

    /// Body segments, head first
    pub fn body(&self) -> impl DoubleEndedIterator<Item = &Segment> + ExactSizeIterator + '_ {
        self.body.iter()
    }

    pub fn occupies(&self, cell: Segment) -> bool {
        self.body.contains(&cell)
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Always false; a snake keeps at least its head
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    pub fn direction(&self) -> Option<Direction> {
        self.direction
    }

    pub fn queued_turns(&self) -> &DirectionQueue {
        &self.queue
    }

    pub fn pending_growth(&self) -> u32 {
        self.pending_growth
    }
}
