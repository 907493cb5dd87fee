use rand::Rng;

use crate::grid::{Cell, MAX_X, MAX_Y, MIN_X, MIN_Y};
use crate::snake::Snake;

pub const FOOD_VALUES: [u32; 3] = [1, 5, 10];

#[derive(Clone, Copy, Debug)]
pub struct FoodItem {
    pub cell: Cell,
    pub value: u32,
}

// Three fixed value tiers, created once and repositioned forever after.
// Only the active tier is visible and collidable.
pub struct FoodTray {
    items: [FoodItem; 3],
    active: usize,
}

impl FoodTray {
    pub fn new(rng: &mut impl Rng, snake: &Snake) -> Self {
        let items = FOOD_VALUES.map(|value| FoodItem {
            cell: Cell::new(0, 0),
            value,
        });
        let mut tray = FoodTray { items, active: 0 };
        tray.place_active(rng, snake);
        tray
    }

    pub fn active_item(&self) -> FoodItem {
        self.items[self.active]
    }

    pub fn active_tier(&self) -> usize {
        self.active
    }

    // Rejection sampling: redraw until the cell misses the whole snake.
    // Bounded in practice by field size versus snake length.
    pub fn place_active(&mut self, rng: &mut impl Rng, snake: &Snake) {
        let cell = loop {
            let candidate = Cell::new(
                rng.gen_range(MIN_X..=MAX_X),
                rng.gen_range(MIN_Y..=MAX_Y),
            );
            if !snake.occupies(candidate) {
                break candidate;
            }
        };
        self.items[self.active].cell = cell;
    }

    // Pick the next visible tier from how many items have been eaten so
    // far: every 10th is the big one, every 5th the medium, plain otherwise.
    pub fn rotate(&mut self, food_eaten: u32, rng: &mut impl Rng, snake: &Snake) {
        self.active = if food_eaten % 10 == 0 {
            2
        } else if food_eaten % 5 == 0 {
            1
        } else {
            0
        };
        self.place_active(rng, snake);
    }

    pub fn reset(&mut self, rng: &mut impl Rng, snake: &Snake) {
        self.active = 0;
        self.place_active(rng, snake);
    }

    #[cfg(test)]
    pub(crate) fn set_active_cell(&mut self, cell: Cell) {
        self.items[self.active].cell = cell;
    }
}
