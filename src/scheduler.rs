use std::time::{Duration, Instant};

// Repeating-tick timer driven by an externally supplied clock reading, so
// the simulation can be stepped in tests without waiting on real time.
// Re-arming (enable or interval change) schedules the next wake a full
// interval out; there is no catch-up tick.
pub struct Scheduler {
    interval: Duration,
    next_wake: Option<Instant>,
}

impl Scheduler {
    pub fn new(interval_ms: u64) -> Self {
        Scheduler {
            interval: Duration::from_millis(interval_ms),
            next_wake: None,
        }
    }

    pub fn enable(&mut self, now: Instant) {
        self.next_wake = Some(now + self.interval);
    }

    pub fn disable(&mut self) {
        self.next_wake = None;
    }

    pub fn is_enabled(&self) -> bool {
        self.next_wake.is_some()
    }

    pub fn set_interval(&mut self, interval_ms: u64, now: Instant) {
        self.interval = Duration::from_millis(interval_ms);
        if self.next_wake.is_some() {
            self.next_wake = Some(now + self.interval);
        }
    }

    // True exactly once per elapsed interval; re-arms itself on fire.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.next_wake {
            Some(wake) if now >= wake => {
                self.next_wake = Some(now + self.interval);
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fires_once_per_interval() {
        let start = Instant::now();
        let mut scheduler = Scheduler::new(100);
        scheduler.enable(start);

        assert!(!scheduler.poll(start + Duration::from_millis(50)));
        assert!(scheduler.poll(start + Duration::from_millis(100)));
        assert!(!scheduler.poll(start + Duration::from_millis(150)));
        assert!(scheduler.poll(start + Duration::from_millis(210)));
    }

    #[test]
    fn never_fires_while_disabled() {
        let start = Instant::now();
        let mut scheduler = Scheduler::new(100);
        assert!(!scheduler.poll(start + Duration::from_secs(10)));
        scheduler.enable(start);
        scheduler.disable();
        assert!(!scheduler.poll(start + Duration::from_secs(10)));
    }

    #[test]
    fn interval_change_rearms_without_catch_up() {
        let start = Instant::now();
        let mut scheduler = Scheduler::new(100);
        scheduler.enable(start);

        let mid = start + Duration::from_millis(90);
        scheduler.set_interval(50, mid);
        // The old 100 ms deadline is gone; next wake is 50 ms from re-arm.
        assert!(!scheduler.poll(start + Duration::from_millis(100)));
        assert!(scheduler.poll(mid + Duration::from_millis(50)));
    }

    #[test]
    fn interval_change_while_disabled_stays_disabled() {
        let start = Instant::now();
        let mut scheduler = Scheduler::new(100);
        scheduler.set_interval(50, start);
        assert!(!scheduler.is_enabled());
        assert!(!scheduler.poll(start + Duration::from_secs(1)));
    }
}
