use std::collections::VecDeque;

use log::trace;

use crate::grid::{Cell, Heading};

/// Player input, mapped onto grid axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl From<Direction> for Heading {
    fn from(dir: Direction) -> Self {
        match dir {
            Direction::Up => Heading::NegZ,
            Direction::Down => Heading::PosZ,
            Direction::Left => Heading::NegX,
            Direction::Right => Heading::PosX,
        }
    }
}

/// Head cell plus the trail of positions the head has left behind.
///
/// Entry `i` of the trail is body segment `i + 1`, so every segment sits
/// where the segment ahead of it was one tick earlier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snake {
    head: Cell,
    trail: VecDeque<Cell>,
    heading: Option<Heading>,
    /// Heading of the last committed step.
    last_step: Option<Heading>,
    /// Cell the tail gave up on the last step; where a new segment goes.
    vacated: Option<Cell>,
}

impl Snake {
    /// Fresh snake with no body. With no heading it stays put until steered.
    pub fn new(head: Cell, heading: Option<Heading>) -> Self {
        Self {
            head,
            trail: VecDeque::new(),
            heading,
            last_step: None,
            vacated: None,
        }
    }

    /// Snake laid out explicitly, body listed from the neck to the tail.
    /// It is treated as having just moved along `heading`.
    pub fn from_cells(head: Cell, body: impl IntoIterator<Item = Cell>, heading: Heading) -> Self {
        Self {
            head,
            trail: body.into_iter().collect(),
            heading: Some(heading),
            last_step: Some(heading),
            vacated: None,
        }
    }

    pub fn head(&self) -> Cell {
        self.head
    }

    pub fn heading(&self) -> Option<Heading> {
        self.heading
    }

    /// Body segments, excluding the head.
    pub fn body(&self) -> impl Iterator<Item = &Cell> {
        self.trail.iter()
    }

    /// Every occupied cell, head first.
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        std::iter::once(self.head).chain(self.trail.iter().copied())
    }

    /// Number of occupied cells, head included.
    pub fn len(&self) -> usize {
        self.trail.len() + 1
    }

    pub fn body_contains(&self, cell: Cell) -> bool {
        self.trail.contains(&cell)
    }

    /// Change heading unless it would double back on itself.
    ///
    /// The request is checked against both the pending heading and the
    /// direction of the last step, so two quick turns cannot add up to a
    /// reversal before the next tick. Returns whether the heading changed.
    pub fn set_heading(&mut self, heading: Heading) -> bool {
        let reverses = |h: Option<Heading>| h.is_some_and(|h| h.is_opposite(heading));
        if reverses(self.heading) || reverses(self.last_step) {
            trace!("ignoring reversal to {heading:?}");
            return false;
        }
        let changed = self.heading != Some(heading);
        self.heading = Some(heading);
        changed
    }

    /// Where the head goes on the next step, if the snake is moving.
    pub fn next_head(&self) -> Option<Cell> {
        self.heading.map(|h| self.head.step(h))
    }

    /// Move the head to `new_head` and pull every segment forward by one.
    pub(crate) fn advance(&mut self, new_head: Cell) {
        self.trail.push_front(self.head);
        self.head = new_head;
        self.vacated = self.trail.pop_back();
        self.last_step = self.heading;
    }

    /// Append one segment on the cell the tail just left.
    ///
    /// Only possible once per step; returns false if there is nothing to grow into.
    pub fn grow(&mut self) -> bool {
        match self.vacated.take() {
            Some(cell) => {
                self.trail.push_back(cell);
                true
            }
            None => false,
        }
    }
}
