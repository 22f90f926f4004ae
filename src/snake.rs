use std::collections::VecDeque;

use crate::grid::Board;
use crate::input::Direction;

/// Cell position in pixel coordinates (multiples of the tile size).
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    /// Returns true when the position lies inside the board.
    #[must_use]
    pub fn is_within_bounds(self, board: Board) -> bool {
        self.x >= 0 && self.y >= 0 && self.x < board.board_size && self.y < board.board_size
    }

    /// Returns this position wrapped onto the opposite edge on each axis.
    #[must_use]
    pub fn wrapped(self, board: Board) -> Self {
        Self {
            x: wrap_axis(self.x, board.board_size),
            y: wrap_axis(self.y, board.board_size),
        }
    }

    /// Returns the neighbouring cell one tile away in `direction`.
    #[must_use]
    pub fn stepped(self, direction: Direction, tile_size: i32) -> Self {
        let (dx, dy) = direction.vector(tile_size);
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

fn wrap_axis(value: i32, upper_bound: i32) -> i32 {
    let wrapped = value % upper_bound;
    if wrapped < 0 {
        wrapped + upper_bound
    } else {
        wrapped
    }
}

/// Ordered snake body, head first.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Snake {
    body: VecDeque<Position>,
}

impl Snake {
    /// Creates a one-cell snake at `start`.
    #[must_use]
    pub fn new(start: Position) -> Self {
        let mut body = VecDeque::new();
        body.push_front(start);

        Self { body }
    }

    /// Creates a snake from explicit body segments (front is head).
    ///
    /// Returns `None` for an empty segment list.
    #[must_use]
    pub fn from_segments(segments: Vec<Position>) -> Option<Self> {
        if segments.is_empty() {
            return None;
        }

        Some(Self {
            body: VecDeque::from(segments),
        })
    }

    /// Returns the current head position.
    #[must_use]
    pub fn head(&self) -> Position {
        self.body.front().copied().unwrap_or(Position { x: 0, y: 0 })
    }

    /// Returns the last segment.
    #[must_use]
    pub fn tail(&self) -> Position {
        self.body.back().copied().unwrap_or_else(|| self.head())
    }

    /// Returns true when `position` hits any segment behind the head.
    ///
    /// The current head is skipped since it is about to be replaced by the
    /// next head.
    #[must_use]
    pub fn body_collides(&self, position: Position) -> bool {
        self.body.iter().skip(1).any(|segment| *segment == position)
    }

    /// Returns true if any segment occupies `position`.
    #[must_use]
    pub fn occupies(&self, position: Position) -> bool {
        self.body.contains(&position)
    }

    /// Inserts a new head in front of the body.
    pub fn push_head(&mut self, head: Position) {
        self.body.push_front(head);
    }

    /// Drops the last segment, keeping at least the head.
    pub fn pop_tail(&mut self) {
        if self.body.len() > 1 {
            let _ = self.body.pop_back();
        }
    }

    /// Appends `count` copies of the current tail cell.
    ///
    /// The copies spread out into trailing cells as the body shifts forward.
    pub fn extend_tail(&mut self, count: usize) {
        let tail = self.tail();
        self.body.extend(std::iter::repeat_n(tail, count));
    }

    /// Returns current segment count.
    #[must_use]
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Returns true when there are no segments.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// Iterates over body segments from head to tail.
    pub fn segments(&self) -> impl Iterator<Item = &Position> {
        self.body.iter()
    }
}
