use crate::direction::Direction;

pub const CELL_NUM_X: i16 = 40;
pub const CELL_NUM_Y: i16 = 24;

// Interior play field: outer ring is the border, top rows hold the score bar.
pub const MIN_X: i16 = 1;
pub const MAX_X: i16 = CELL_NUM_X - 2;
pub const MIN_Y: i16 = 3;
pub const MAX_Y: i16 = CELL_NUM_Y - 2;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cell {
    pub x: i16,
    pub y: i16,
}

impl Cell {
    pub fn new(x: i16, y: i16) -> Self {
        Cell { x, y }
    }

    pub fn step(self, direction: Direction) -> Cell {
        let (dx, dy) = direction.delta();
        Cell {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    pub fn in_interior(self) -> bool {
        self.x >= MIN_X && self.x <= MAX_X && self.y >= MIN_Y && self.y <= MAX_Y
    }

    // Portal-mode mapping: a coordinate past one edge reappears at the
    // opposite edge's innermost valid coordinate.
    pub fn wrapped(self) -> Cell {
        let mut cell = self;
        if cell.x < MIN_X {
            cell.x = MAX_X;
        }
        if cell.x > MAX_X {
            cell.x = MIN_X;
        }
        if cell.y < MIN_Y {
            cell.y = MAX_Y;
        }
        if cell.y > MAX_Y {
            cell.y = MIN_Y;
        }
        cell
    }
}
