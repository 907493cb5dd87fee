use std::collections::VecDeque;

use crossterm::event::KeyCode;

use crate::direction::Direction;

const MAX_PENDING: usize = 2;

// Queues up to two direction changes between ticks. A requested direction
// is rejected when it reverses the reference direction: the snake's current
// heading when the buffer is empty, the last queued direction otherwise.
#[derive(Default)]
pub struct InputBuffer {
    pending: VecDeque<Direction>,
}

impl InputBuffer {
    pub fn new() -> Self {
        InputBuffer {
            pending: VecDeque::new(),
        }
    }

    pub fn push(&mut self, requested: Direction, current: Direction) {
        let reference = match self.pending.back() {
            Some(&last) => last,
            None => current,
        };
        if self.pending.len() < MAX_PENDING && requested != reference.opposite() {
            self.pending.push_back(requested);
        }
    }

    pub fn pop(&mut self) -> Option<Direction> {
        self.pending.pop_front()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }
}

// WASD and arrow keys both steer.
pub fn direction_for_key(code: KeyCode) -> Option<Direction> {
    match code {
        KeyCode::Up | KeyCode::Char('w') => Some(Direction::Up),
        KeyCode::Down | KeyCode::Char('s') => Some(Direction::Down),
        KeyCode::Left | KeyCode::Char('a') => Some(Direction::Left),
        KeyCode::Right | KeyCode::Char('d') => Some(Direction::Right),
        _ => None,
    }
}
