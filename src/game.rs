use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::{BoundaryPolicy, ConfigError, GameConfig};
use crate::food::{Food, GOLDEN_EXTRA_SEGMENTS};
use crate::grid::{Board, find_free_cell};
use crate::input::{Direction, direction_change_is_valid};
use crate::obstacle::Obstacle;
use crate::snake::{Position, Snake};
use crate::snapshot::GameSnapshot;

/// Session lifecycle: `Idle -> Running -> GameOver`.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum GameStatus {
    /// No direction has been committed yet.
    Idle,
    Running,
    /// Terminal until the engine is restarted.
    GameOver,
}

/// Why a session ended.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum DeathReason {
    Wall,
    SelfCollision,
    Obstacle,
}

/// Notification raised synchronously during a tick, e.g. for audio cues.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum GameEvent {
    FoodEaten { golden: bool, points: u32 },
    GameOver { score: u32, reason: DeathReason },
}

/// Outcome of one call to [`GameEngine::tick`].
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct TickReport {
    pub status: GameStatus,
    pub events: Vec<GameEvent>,
}

/// Complete mutable game state for one session.
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    pub snake: Snake,
    /// Direction applied by the most recent tick. `None` while idle.
    pub current_direction: Option<Direction>,
    /// Latest accepted input, committed at the start of the next tick.
    pub pending_direction: Option<Direction>,
    pub foods: Vec<Food>,
    pub obstacles: Vec<Obstacle>,
    pub score: u32,
    pub status: GameStatus,
    pub death_reason: Option<DeathReason>,
    pub tick_count: u64,
    pub last_obstacle_check_ms: u64,
}

impl GameState {
    /// Creates a one-cell snake at the board center, heading right, with no
    /// food or obstacles yet.
    #[must_use]
    pub fn new(board: Board, now_ms: u64) -> Self {
        Self {
            snake: Snake::new(board.center()),
            current_direction: Some(Direction::Right),
            pending_direction: Some(Direction::Right),
            foods: Vec::new(),
            obstacles: Vec::new(),
            score: 0,
            status: GameStatus::Idle,
            death_reason: None,
            tick_count: 0,
            last_obstacle_check_ms: now_ms,
        }
    }

    #[must_use]
    pub fn is_over(&self) -> bool {
        self.status == GameStatus::GameOver
    }

    /// Returns true if an obstacle sits on `position`.
    #[must_use]
    pub fn has_obstacle_at(&self, position: Position) -> bool {
        self.obstacles
            .iter()
            .any(|obstacle| obstacle.position == position)
    }

    /// Returns true if the snake, a food item or an obstacle holds `position`.
    #[must_use]
    pub fn is_occupied(&self, position: Position) -> bool {
        self.snake.occupies(position)
            || self.foods.iter().any(|food| food.position == position)
            || self.has_obstacle_at(position)
    }
}

/// Rules engine that owns one [`GameState`] and advances it tick by tick.
///
/// All timing comes from the `now_ms` timestamps passed in by the caller, so
/// a session can be replayed exactly with a seeded random source.
#[derive(Debug, Clone)]
pub struct GameEngine<R = StdRng> {
    config: GameConfig,
    state: GameState,
    rng: R,
}

impl GameEngine<StdRng> {
    /// Starts a session with an entropy-seeded random source.
    pub fn new(config: GameConfig, now_ms: u64) -> Result<Self, ConfigError> {
        Self::with_rng(config, now_ms, StdRng::from_entropy())
    }

    /// Creates a deterministic session for tests and reproducible simulations.
    pub fn new_with_seed(config: GameConfig, now_ms: u64, seed: u64) -> Result<Self, ConfigError> {
        Self::with_rng(config, now_ms, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> GameEngine<R> {
    /// Validates `config` and starts a session with the initial food spawned.
    pub fn with_rng(config: GameConfig, now_ms: u64, rng: R) -> Result<Self, ConfigError> {
        config.validate()?;

        let state = GameState::new(config.board(), now_ms);
        let mut engine = Self { config, state, rng };
        engine.replenish_food(now_ms);

        log::info!(
            "session started: {} apples, {:?} boundary, obstacle cap {}",
            engine.config.apple_count,
            engine.config.boundary_policy,
            engine.config.obstacle_cap
        );

        Ok(engine)
    }

    /// Resumes from an explicit state, e.g. a prepared test position.
    pub fn from_state(config: GameConfig, state: GameState, rng: R) -> Result<Self, ConfigError> {
        config.validate()?;

        Ok(Self { config, state, rng })
    }

    /// Throws away the current session and starts a fresh one.
    pub fn restart(&mut self, now_ms: u64) {
        self.state = GameState::new(self.config.board(), now_ms);
        self.replenish_food(now_ms);

        log::info!("session restarted");
    }

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Read-only view for renderers.
    #[must_use]
    pub fn snapshot(&self, now_ms: u64) -> GameSnapshot {
        GameSnapshot::capture(&self.state, &self.config, now_ms)
    }

    /// Requests a new heading for the next tick.
    ///
    /// Requests along the axis the snake currently moves on are ignored, as
    /// are all requests after game over. Several requests between two ticks
    /// collapse to the last accepted one.
    pub fn set_direction(&mut self, requested: Direction) {
        if self.state.is_over() {
            return;
        }

        if direction_change_is_valid(self.state.current_direction, requested) {
            self.state.pending_direction = Some(requested);
        }
    }

    /// Advances the simulation by one step.
    pub fn tick(&mut self, now_ms: u64) -> TickReport {
        let mut events = Vec::new();

        if self.state.is_over() {
            return self.report(events);
        }

        self.state.current_direction = self.state.pending_direction;
        let Some(direction) = self.state.current_direction else {
            return self.report(events);
        };

        self.state.status = GameStatus::Running;
        self.state.tick_count += 1;

        let board = self.config.board();
        let mut head = self.state.snake.head().stepped(direction, board.tile_size);
        if !head.is_within_bounds(board) {
            match self.config.boundary_policy {
                BoundaryPolicy::Wall => {
                    self.end_game(DeathReason::Wall, &mut events);
                    return self.report(events);
                }
                BoundaryPolicy::Wraparound => head = head.wrapped(board),
            }
        }

        if self.state.snake.body_collides(head) {
            self.end_game(DeathReason::SelfCollision, &mut events);
            return self.report(events);
        }
        if self.state.has_obstacle_at(head) {
            self.end_game(DeathReason::Obstacle, &mut events);
            return self.report(events);
        }

        self.state.snake.push_head(head);

        let eaten_index = self
            .state
            .foods
            .iter()
            .position(|food| food.position == head);

        match eaten_index.map(|index| self.state.foods.remove(index)) {
            Some(food) => {
                self.state.score += food.points();
                if food.is_golden() {
                    self.state.snake.extend_tail(GOLDEN_EXTRA_SEGMENTS);
                }

                log::debug!(
                    "ate {:?} food at ({}, {}), score {}",
                    food.kind,
                    head.x,
                    head.y,
                    self.state.score
                );
                events.push(GameEvent::FoodEaten {
                    golden: food.is_golden(),
                    points: food.points(),
                });
            }
            None => self.state.snake.pop_tail(),
        }

        self.replenish_food(now_ms);
        self.expire_food(now_ms);
        self.update_obstacles(now_ms);

        self.report(events)
    }

    fn report(&self, events: Vec<GameEvent>) -> TickReport {
        TickReport {
            status: self.state.status,
            events,
        }
    }

    fn end_game(&mut self, reason: DeathReason, events: &mut Vec<GameEvent>) {
        self.state.status = GameStatus::GameOver;
        self.state.death_reason = Some(reason);

        log::info!(
            "game over after {} ticks: {reason:?}, score {}",
            self.state.tick_count,
            self.state.score
        );
        events.push(GameEvent::GameOver {
            score: self.state.score,
            reason,
        });
    }

    /// Tops the live food set back up to the configured count.
    fn replenish_food(&mut self, now_ms: u64) {
        let board = self.config.board();

        while self.state.foods.len() < self.config.apple_count {
            let food = Food::spawn(
                &mut self.rng,
                board,
                self.config.golden_probability,
                now_ms,
                |cell| self.state.is_occupied(cell),
            );
            self.state.foods.push(food);
        }
    }

    /// Drops food older than the configured lifetime and replaces it.
    fn expire_food(&mut self, now_ms: u64) {
        let lifetime_ms = self.config.apple_lifetime_ms;
        let before = self.state.foods.len();
        self.state
            .foods
            .retain(|food| !food.is_expired(now_ms, lifetime_ms));

        let expired = before - self.state.foods.len();
        if expired > 0 {
            log::debug!("{expired} food item(s) expired");
            self.replenish_food(now_ms);
        }
    }

    fn update_obstacles(&mut self, now_ms: u64) {
        let schedule = self.config.obstacle_schedule();
        if !schedule.is_due(self.state.last_obstacle_check_ms, now_ms) {
            return;
        }

        self.state.last_obstacle_check_ms = now_ms;
        if !schedule.should_place(self.state.obstacles.len(), &mut self.rng) {
            return;
        }

        let position = find_free_cell(&mut self.rng, self.config.board(), |cell| {
            self.state.is_occupied(cell)
        });
        log::debug!(
            "obstacle {} placed at ({}, {})",
            self.state.obstacles.len() + 1,
            position.x,
            position.y
        );
        self.state.obstacles.push(Obstacle { position });
    }
}
