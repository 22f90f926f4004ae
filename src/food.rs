use rand::Rng;

use crate::grid::{Board, find_free_cell};
use crate::snake::Position;

/// Points granted by a normal food item.
pub const NORMAL_FOOD_POINTS: u32 = 1;

/// Points granted by a golden food item.
pub const GOLDEN_FOOD_POINTS: u32 = 10;

/// Extra tail segments appended when golden food is eaten.
pub const GOLDEN_EXTRA_SEGMENTS: usize = 9;

/// Food type.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum FoodKind {
    Normal,
    Golden,
}

/// Food entity currently active on the board.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Food {
    pub position: Position,
    pub kind: FoodKind,
    pub spawn_time_ms: u64,
}

impl Food {
    /// Creates a normal food at `position`.
    #[must_use]
    pub fn normal(position: Position, spawn_time_ms: u64) -> Self {
        Self {
            position,
            kind: FoodKind::Normal,
            spawn_time_ms,
        }
    }

    /// Creates a golden food at `position`.
    #[must_use]
    pub fn golden(position: Position, spawn_time_ms: u64) -> Self {
        Self {
            position,
            kind: FoodKind::Golden,
            spawn_time_ms,
        }
    }

    #[must_use]
    pub fn is_golden(self) -> bool {
        self.kind == FoodKind::Golden
    }

    /// Returns the score value granted when eaten.
    #[must_use]
    pub fn points(self) -> u32 {
        match self.kind {
            FoodKind::Normal => NORMAL_FOOD_POINTS,
            FoodKind::Golden => GOLDEN_FOOD_POINTS,
        }
    }

    /// Returns how long the food has been on the board.
    #[must_use]
    pub fn age_ms(self, now_ms: u64) -> u64 {
        now_ms.saturating_sub(self.spawn_time_ms)
    }

    /// Returns true once the age exceeds `lifetime_ms`.
    #[must_use]
    pub fn is_expired(self, now_ms: u64, lifetime_ms: u64) -> bool {
        self.age_ms(now_ms) > lifetime_ms
    }

    /// Returns the remaining share of the lifetime in `[0.0, 1.0]`.
    #[must_use]
    pub fn remaining_life(self, now_ms: u64, lifetime_ms: u64) -> f64 {
        if lifetime_ms == 0 {
            return 0.0;
        }

        let remaining = lifetime_ms.saturating_sub(self.age_ms(now_ms));
        remaining as f64 / lifetime_ms as f64
    }

    /// Spawns food on a free cell, golden with probability `golden_probability`.
    pub fn spawn<R, F>(
        rng: &mut R,
        board: Board,
        golden_probability: f64,
        now_ms: u64,
        is_occupied: F,
    ) -> Self
    where
        R: Rng + ?Sized,
        F: Fn(Position) -> bool,
    {
        let golden = rng.gen_bool(golden_probability);
        let position = find_free_cell(rng, board, is_occupied);

        if golden {
            Self::golden(position, now_ms)
        } else {
            Self::normal(position, now_ms)
        }
    }
}
