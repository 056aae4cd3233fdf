use std::collections::VecDeque;

use crate::board::Position;
use Direction::*;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    #[cfg(test)]
    pub const ALL: [Direction; 4] = [Up, Down, Left, Right];

    pub fn opposite(self) -> Self {
        match self {
            Up => Down,
            Down => Up,
            Left => Right,
            Right => Left,
        }
    }

    pub fn delta(self) -> (i16, i16) {
        match self {
            Up => (0, -1),
            Down => (0, 1),
            Left => (-1, 0),
            Right => (1, 0),
        }
    }

    /// Direction to travel in when `requested` arrives while moving towards `self`.
    /// A full reversal would drive the head through the neck, so it is ignored.
    pub fn resolve(self, requested: Direction) -> Self {
        if requested == self.opposite() {
            self
        } else {
            requested
        }
    }

    pub fn head_char(self) -> char {
        match self {
            Up => '^',
            Down => 'v',
            Left => '<',
            Right => '>',
        }
    }
}

/// Body segments, head first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snake {
    body: VecDeque<Position>,
    direction: Direction,
}

impl Snake {
    /// A straight snake with its head at `head`, trailing away from `direction`.
    pub fn new(head: Position, size: usize, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        let body = (0..size as i16)
            .map(|i| Position::new(head.x - dx * i, head.y - dy * i))
            .collect();
        Snake { body, direction }
    }

    /// Builds a snake from explicit segments. Panics on fewer than two segments.
    #[cfg(test)]
    pub fn from_segments(segments: &[Position], direction: Direction) -> Self {
        assert!(segments.len() >= 2, "a snake needs a head and a neck");
        Snake { body: segments.iter().copied().collect(), direction }
    }

    pub fn head(&self) -> Position {
        self.body[0]
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn segments(&self) -> impl Iterator<Item = &Position> + '_ {
        self.body.iter()
    }

    pub fn occupies(&self, pos: Position) -> bool {
        self.body.contains(&pos)
    }

    /// Moves onto `new_head` and drops the tail.
    pub fn advance(&mut self, new_head: Position, direction: Direction) {
        self.body.push_front(new_head);
        self.body.pop_back();
        self.direction = direction;
    }

    /// Moves onto `new_head` keeping the tail in place.
    pub fn grow(&mut self, new_head: Position, direction: Direction) {
        self.body.push_front(new_head);
        self.direction = direction;
    }
}
