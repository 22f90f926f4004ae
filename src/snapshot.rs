use crate::config::GameConfig;
use crate::game::{DeathReason, GameState, GameStatus};
use crate::grid::Board;
use crate::input::Direction;
use crate::snake::Position;

/// Food as seen by a renderer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FoodView {
    pub position: Position,
    pub golden: bool,
    /// Share of the lifetime still left, from `1.0` (fresh) to `0.0`.
    pub remaining_life: f64,
}

/// Read-only copy of everything a renderer needs for one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct GameSnapshot {
    pub board: Board,
    /// Head first.
    pub snake: Vec<Position>,
    pub foods: Vec<FoodView>,
    pub obstacles: Vec<Position>,
    pub score: u32,
    pub status: GameStatus,
    pub death_reason: Option<DeathReason>,
    /// Heading for orienting the head sprite.
    pub direction: Option<Direction>,
}

impl GameSnapshot {
    #[must_use]
    pub fn capture(state: &GameState, config: &GameConfig, now_ms: u64) -> Self {
        Self {
            board: config.board(),
            snake: state.snake.segments().copied().collect(),
            foods: state
                .foods
                .iter()
                .map(|food| FoodView {
                    position: food.position,
                    golden: food.is_golden(),
                    remaining_life: food.remaining_life(now_ms, config.apple_lifetime_ms),
                })
                .collect(),
            obstacles: state
                .obstacles
                .iter()
                .map(|obstacle| obstacle.position)
                .collect(),
            score: state.score,
            status: state.status,
            death_reason: state.death_reason,
            direction: state.current_direction,
        }
    }

    #[must_use]
    pub fn is_over(&self) -> bool {
        self.status == GameStatus::GameOver
    }

    #[must_use]
    pub fn snake_len(&self) -> usize {
        self.snake.len()
    }
}

#[cfg(test)]
mod tests {
    use super::GameSnapshot;
    use crate::config::GameConfig;
    use crate::food::Food;
    use crate::game::GameState;
    use crate::snake::Position;

    #[test]
    fn snapshot_reports_food_life_and_state() {
        let config = GameConfig::default();
        let mut state = GameState::new(config.board(), 0);
        state.foods = vec![
            Food::normal(Position { x: 20, y: 20 }, 0),
            Food::golden(Position { x: 40, y: 40 }, 3_500),
        ];
        state.score = 7;

        let snapshot = GameSnapshot::capture(&state, &config, 3_500);

        assert_eq!(snapshot.snake, vec![Position { x: 300, y: 300 }]);
        assert_eq!(snapshot.score, 7);
        assert!(!snapshot.is_over());
        assert!((snapshot.foods[0].remaining_life - 0.5).abs() < f64::EPSILON);
        assert!(snapshot.foods[1].golden);
        assert!((snapshot.foods[1].remaining_life - 1.0).abs() < f64::EPSILON);
    }
}
