use rand::Rng;

use crate::snake::Position;

/// Static obstacle cell. Never removed during a session.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Obstacle {
    pub position: Position,
}

/// Timer, probability gate and cap governing obstacle placement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObstacleSchedule {
    pub interval_ms: u64,
    pub cap: usize,
    pub spawn_probability: f64,
}

impl ObstacleSchedule {
    /// Returns true when the interval since the last check has elapsed.
    #[must_use]
    pub fn is_due(&self, last_check_ms: u64, now_ms: u64) -> bool {
        now_ms.saturating_sub(last_check_ms) >= self.interval_ms
    }

    /// Rolls the probability gate, honouring the cap.
    ///
    /// The gate is not rolled at all once `placed` reaches the cap.
    pub fn should_place<R: Rng + ?Sized>(&self, placed: usize, rng: &mut R) -> bool {
        placed < self.cap && rng.gen_bool(self.spawn_probability)
    }
}
