use std::collections::VecDeque;

use crate::direction::Direction;
use crate::grid::{Cell, CELL_NUM_X, CELL_NUM_Y};

pub const INITIAL_LENGTH: usize = 3;

const SPAWN: Cell = Cell {
    x: CELL_NUM_X / 4,
    y: CELL_NUM_Y / 2,
};
const SPAWN_DIRECTION: Direction = Direction::Right;

pub struct Snake {
    segments: VecDeque<Cell>,
    pub direction: Direction,
    pub allow_loop_around: bool,
    tail_pos: Option<Cell>,
}

impl Snake {
    pub fn new() -> Self {
        Snake {
            segments: Self::spawn_segments(),
            direction: SPAWN_DIRECTION,
            allow_loop_around: true,
            tail_pos: None,
        }
    }

    // Head at the spawn cell, body trailing off to the left.
    fn spawn_segments() -> VecDeque<Cell> {
        (0..INITIAL_LENGTH as i16)
            .map(|i| Cell::new(SPAWN.x - i, SPAWN.y))
            .collect()
    }

    pub fn head(&self) -> Cell {
        self.segments[0]
    }

    pub fn body(&self) -> impl Iterator<Item = Cell> + '_ {
        self.segments.iter().skip(1).copied()
    }

    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        self.segments.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn occupies(&self, cell: Cell) -> bool {
        self.segments.contains(&cell)
    }

    // One tick of movement. The head steps by the current direction; every
    // body segment takes the cell its predecessor held before this tick.
    // Only the head needs boundary treatment since the rest follow.
    pub fn advance(&mut self) {
        let mut new_head = self.head().step(self.direction);
        if self.allow_loop_around {
            new_head = new_head.wrapped();
        }
        self.segments.push_front(new_head);
        self.tail_pos = self.segments.pop_back();
    }

    // Grows the chain into the cell the tail just vacated. Must happen
    // before the next advance overwrites tail_pos.
    pub fn add_segment(&mut self) {
        if let Some(tail) = self.tail_pos {
            self.segments.push_back(tail);
        }
    }

    pub fn reset(&mut self) {
        self.segments = Self::spawn_segments();
        self.direction = SPAWN_DIRECTION;
        self.tail_pos = None;
    }
}
