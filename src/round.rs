use rand::Rng;

use crate::direction::Direction;
use crate::food::FoodTray;
use crate::input::InputBuffer;
use crate::snake::Snake;

pub const START_INTERVAL_MS: u64 = 300;
pub const INTERVAL_STEP_MS: u64 = 10;
pub const MIN_INTERVAL_MS: u64 = 50;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    Portal,
    Wall,
}

impl Mode {
    pub fn label(self) -> &'static str {
        match self {
            Mode::Portal => "Portal",
            Mode::Wall => "Wall",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    Moved,
    Ate(u32),
    HitSelf,
    HitWall,
}

pub struct Round {
    pub snake: Snake,
    pub food: FoodTray,
    pub input: InputBuffer,
    pub score: u32,
    pub food_eaten: u32,
    pub interval_ms: u64,
    pub mode: Mode,
    pub active: bool,
}

impl Round {
    pub fn new(mode: Mode, rng: &mut impl Rng) -> Self {
        let mut snake = Snake::new();
        snake.allow_loop_around = mode == Mode::Portal;
        let food = FoodTray::new(rng, &snake);
        Round {
            snake,
            food,
            input: InputBuffer::new(),
            score: 0,
            food_eaten: 0,
            interval_ms: START_INTERVAL_MS,
            mode,
            active: true,
        }
    }

    pub fn set_mode(&mut self, mode: Mode) {
        self.mode = mode;
        self.snake.allow_loop_around = mode == Mode::Portal;
    }

    pub fn queue_direction(&mut self, requested: Direction) {
        self.input.push(requested, self.snake.direction);
    }

    // One simulation step: consume at most one buffered direction, advance
    // the chain, then judge collisions in fixed order (food, self, wall).
    pub fn tick(&mut self, rng: &mut impl Rng) -> TickOutcome {
        if !self.active {
            return TickOutcome::Moved;
        }

        if let Some(direction) = self.input.pop() {
            self.snake.direction = direction;
        }
        self.snake.advance();

        let mut ate = None;
        if self.snake.head() == self.food.active_item().cell {
            let value = self.food.active_item().value;
            self.snake.add_segment();
            if self.interval_ms > MIN_INTERVAL_MS {
                self.interval_ms -= INTERVAL_STEP_MS;
            }
            self.score += value;
            self.food_eaten += 1;
            self.food.rotate(self.food_eaten, rng, &self.snake);
            ate = Some(value);
        }

        let head = self.snake.head();
        if self.snake.body().any(|cell| cell == head) {
            self.active = false;
            return TickOutcome::HitSelf;
        }

        if self.mode == Mode::Wall && !head.in_interior() {
            self.active = false;
            return TickOutcome::HitWall;
        }

        match ate {
            Some(value) => TickOutcome::Ate(value),
            None => TickOutcome::Moved,
        }
    }

    pub fn reset(&mut self, rng: &mut impl Rng) {
        self.score = 0;
        self.food_eaten = 0;
        self.interval_ms = START_INTERVAL_MS;
        self.input.clear();
        self.active = true;
        self.snake.reset();
        self.snake.allow_loop_around = self.mode == Mode::Portal;
        self.food.reset(rng, &self.snake);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::{Cell, MAX_X, MIN_X, MIN_Y};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn round(mode: Mode) -> (Round, StdRng) {
        let mut rng = StdRng::seed_from_u64(99);
        let round = Round::new(mode, &mut rng);
        (round, rng)
    }

    // Park the active food somewhere the snake won't reach going right.
    fn park_food(round: &mut Round) {
        round.food.set_active_cell(Cell::new(MIN_X, MIN_Y));
    }

    fn feed(round: &mut Round, rng: &mut StdRng) -> u32 {
        let mut target = round.snake.head().step(round.snake.direction);
        if round.snake.allow_loop_around {
            target = target.wrapped();
        }
        round.food.set_active_cell(target);
        let value = round.food.active_item().value;
        match round.tick(rng) {
            TickOutcome::Ate(v) => assert_eq!(v, value),
            other => panic!("expected food collision, got {:?}", other),
        }
        value
    }

    #[test]
    fn eating_grows_scores_and_speeds_up() {
        let (mut round, mut rng) = round(Mode::Wall);
        let length = round.snake.len();
        let value = feed(&mut round, &mut rng);
        assert_eq!(round.snake.len(), length + 1);
        assert_eq!(round.score, value);
        assert_eq!(round.food_eaten, 1);
        assert_eq!(round.interval_ms, START_INTERVAL_MS - INTERVAL_STEP_MS);
        assert!(round.active);
    }

    #[test]
    fn interval_never_drops_below_the_floor() {
        let (mut round, mut rng) = round(Mode::Portal);
        let mut prev = round.interval_ms;
        // 25 meals walk the interval from 300 ms down to the 50 ms floor.
        for _ in 0..25 {
            feed(&mut round, &mut rng);
            assert!(round.interval_ms <= prev);
            assert!(round.interval_ms >= MIN_INTERVAL_MS);
            prev = round.interval_ms;
        }
        assert_eq!(round.interval_ms, MIN_INTERVAL_MS);
        // One more meal must not push past the floor.
        feed(&mut round, &mut rng);
        assert_eq!(round.interval_ms, MIN_INTERVAL_MS);
    }

    #[test]
    fn fifth_meal_activates_the_middle_tier() {
        let (mut round, mut rng) = round(Mode::Portal);
        let mut total = 0;
        for _ in 0..5 {
            total += feed(&mut round, &mut rng);
        }
        assert_eq!(round.food_eaten, 5);
        assert_eq!(round.food.active_tier(), 1);
        assert_eq!(round.food.active_item().value, 5);
        assert_eq!(round.score, total);
    }

    #[test]
    fn self_collision_ends_the_round() {
        let (mut round, mut rng) = round(Mode::Portal);
        park_food(&mut round);
        // Grow long enough to turn back into the body.
        for _ in 0..2 {
            feed(&mut round, &mut rng);
        }
        park_food(&mut round);
        // A tight U-turn: up, left, down lands the head on its own body.
        round.queue_direction(Direction::Up);
        round.queue_direction(Direction::Left);
        assert_eq!(round.tick(&mut rng), TickOutcome::Moved);
        assert_eq!(round.tick(&mut rng), TickOutcome::Moved);
        round.queue_direction(Direction::Down);
        assert_eq!(round.tick(&mut rng), TickOutcome::HitSelf);
        assert!(!round.active);
    }

    #[test]
    fn wall_mode_ends_at_the_boundary() {
        let (mut round, mut rng) = round(Mode::Wall);
        park_food(&mut round);
        let mut outcome = TickOutcome::Moved;
        for _ in 0..MAX_X {
            outcome = round.tick(&mut rng);
            if outcome != TickOutcome::Moved {
                break;
            }
        }
        assert_eq!(outcome, TickOutcome::HitWall);
        assert!(!round.active);
        assert_eq!(round.score, 0);
    }

    #[test]
    fn portal_mode_never_ends_at_the_boundary() {
        let (mut round, mut rng) = round(Mode::Portal);
        park_food(&mut round);
        // More than one full lap of the field.
        for _ in 0..(MAX_X as usize * 2) {
            let outcome = round.tick(&mut rng);
            assert!(outcome == TickOutcome::Moved || outcome == TickOutcome::Ate(1));
            assert!(round.snake.head().in_interior());
        }
        assert!(round.active);
    }

    #[test]
    fn game_over_freezes_the_simulation() {
        let (mut round, mut rng) = round(Mode::Wall);
        park_food(&mut round);
        while round.tick(&mut rng) == TickOutcome::Moved {}
        let head = round.snake.head();
        assert_eq!(round.tick(&mut rng), TickOutcome::Moved);
        assert_eq!(round.snake.head(), head);
    }

    #[test]
    fn reset_restores_a_fresh_round() {
        let (mut round, mut rng) = round(Mode::Wall);
        for _ in 0..3 {
            feed(&mut round, &mut rng);
        }
        round.reset(&mut rng);
        assert_eq!(round.score, 0);
        assert_eq!(round.food_eaten, 0);
        assert_eq!(round.interval_ms, START_INTERVAL_MS);
        assert_eq!(round.food.active_tier(), 0);
        assert!(round.active);
        assert_eq!(round.mode, Mode::Wall);
    }
}
