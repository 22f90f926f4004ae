use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use ratatui::style::Color;
use ratatui::symbols::border;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::grid::Board;
use crate::obstacle::ObstacleSchedule;

const APP_DIR_NAME: &str = "snake-chase";
const CONFIG_FILE_NAME: &str = "config.json";

/// Default board edge length in pixels.
pub const DEFAULT_BOARD_SIZE: i32 = 600;

/// Default cell edge length in pixels.
pub const DEFAULT_TILE_SIZE: i32 = 20;

/// Smallest and largest number of simultaneous food items.
pub const MIN_APPLE_COUNT: usize = 1;
pub const MAX_APPLE_COUNT: usize = 20;

/// Food lifetime in milliseconds.
pub const DEFAULT_APPLE_LIFETIME_MS: u64 = 7_000;

/// Chance that a freshly spawned food item is golden.
pub const DEFAULT_GOLDEN_PROBABILITY: f64 = 0.1;

/// Delay between obstacle placement checks.
pub const DEFAULT_OBSTACLE_INTERVAL_MS: u64 = 5_000;

/// Maximum number of obstacles in one session.
pub const DEFAULT_OBSTACLE_CAP: usize = 20;

/// Chance that an obstacle check actually places an obstacle.
pub const DEFAULT_OBSTACLE_SPAWN_PROBABILITY: f64 = 1.0;

/// Delay between scheduled ticks in the front end.
pub const DEFAULT_TICK_INTERVAL_MS: u64 = 100;

/// What happens when the head leaves the board.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BoundaryPolicy {
    /// Leaving the board ends the game.
    Wall,
    /// Leaving the board re-enters on the opposite edge.
    #[default]
    Wraparound,
}

/// Rejected configuration, or a configuration file that could not be loaded.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("tile size must be positive, got {0}")]
    InvalidTileSize(i32),
    #[error("board size must be positive, got {0}")]
    InvalidBoardSize(i32),
    #[error("board size {board_size} is not a multiple of tile size {tile_size}")]
    UnevenGrid { board_size: i32, tile_size: i32 },
    #[error("apple count must be between 1 and 20, got {0}")]
    AppleCountOutOfRange(usize),
    #[error("{name} must be within [0, 1], got {value}")]
    InvalidProbability { name: &'static str, value: f64 },
    #[error("{0} must be greater than zero")]
    ZeroDuration(&'static str),
    #[error("failed to read config file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse config file {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Options supplied at game start.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GameConfig {
    pub board_size: i32,
    pub tile_size: i32,
    /// Target number of simultaneous food items.
    pub apple_count: usize,
    pub apple_lifetime_ms: u64,
    pub golden_probability: f64,
    pub obstacle_interval_ms: u64,
    pub obstacle_cap: usize,
    pub obstacle_spawn_probability: f64,
    pub boundary_policy: BoundaryPolicy,
    /// Scheduling cadence for the driver; the engine itself never reads it.
    pub tick_interval_ms: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            board_size: DEFAULT_BOARD_SIZE,
            tile_size: DEFAULT_TILE_SIZE,
            apple_count: MIN_APPLE_COUNT,
            apple_lifetime_ms: DEFAULT_APPLE_LIFETIME_MS,
            golden_probability: DEFAULT_GOLDEN_PROBABILITY,
            obstacle_interval_ms: DEFAULT_OBSTACLE_INTERVAL_MS,
            obstacle_cap: DEFAULT_OBSTACLE_CAP,
            obstacle_spawn_probability: DEFAULT_OBSTACLE_SPAWN_PROBABILITY,
            boundary_policy: BoundaryPolicy::Wraparound,
            tick_interval_ms: DEFAULT_TICK_INTERVAL_MS,
        }
    }
}

impl GameConfig {
    /// Checks geometry, counts, probabilities and durations.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tile_size <= 0 {
            return Err(ConfigError::InvalidTileSize(self.tile_size));
        }
        if self.board_size <= 0 {
            return Err(ConfigError::InvalidBoardSize(self.board_size));
        }
        if self.board_size % self.tile_size != 0 {
            return Err(ConfigError::UnevenGrid {
                board_size: self.board_size,
                tile_size: self.tile_size,
            });
        }
        if !(MIN_APPLE_COUNT..=MAX_APPLE_COUNT).contains(&self.apple_count) {
            return Err(ConfigError::AppleCountOutOfRange(self.apple_count));
        }

        check_probability("golden_probability", self.golden_probability)?;
        check_probability(
            "obstacle_spawn_probability",
            self.obstacle_spawn_probability,
        )?;

        if self.apple_lifetime_ms == 0 {
            return Err(ConfigError::ZeroDuration("apple_lifetime_ms"));
        }
        if self.obstacle_interval_ms == 0 {
            return Err(ConfigError::ZeroDuration("obstacle_interval_ms"));
        }
        if self.tick_interval_ms == 0 {
            return Err(ConfigError::ZeroDuration("tick_interval_ms"));
        }

        Ok(())
    }

    #[must_use]
    pub fn board(&self) -> Board {
        Board {
            board_size: self.board_size,
            tile_size: self.tile_size,
        }
    }

    #[must_use]
    pub fn obstacle_schedule(&self) -> ObstacleSchedule {
        ObstacleSchedule {
            interval_ms: self.obstacle_interval_ms,
            cap: self.obstacle_cap,
            spawn_probability: self.obstacle_spawn_probability,
        }
    }

    /// Reads a JSON configuration file. Missing fields take their defaults.
    pub fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Loads the user configuration file when present, defaults otherwise.
    pub fn load_user_or_default() -> Result<Self, ConfigError> {
        match user_config_path() {
            Some(path) if path.is_file() => Self::load_from_path(&path),
            _ => Ok(Self::default()),
        }
    }
}

fn check_probability(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::InvalidProbability { name, value })
    }
}

/// Returns the platform-correct user configuration file path.
#[must_use]
pub fn user_config_path() -> Option<PathBuf> {
    let mut base = dirs::config_dir()?;
    base.push(APP_DIR_NAME);
    base.push(CONFIG_FILE_NAME);
    Some(base)
}

/// Returns the default log file path in the local data directory.
#[must_use]
pub fn default_log_path() -> PathBuf {
    let mut base = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    base.push(APP_DIR_NAME);
    base.push("snake-chase.log");
    base
}

/// Colors for every visual element.
#[derive(Debug)]
pub struct Theme {
    pub snake_head: Color,
    pub snake_body: Color,
    pub food: Color,
    pub golden_food: Color,
    pub obstacle: Color,
    /// Food timer bar colors, from plenty of time left to about to expire.
    pub timer_fresh: Color,
    pub timer_warning: Color,
    pub timer_critical: Color,
    pub play_bg: Color,
    pub border_fg: Color,
    pub border_bg: Color,
    pub hud_score: Color,
    pub menu_title: Color,
    pub menu_footer: Color,
}

pub const THEME_CLASSIC: Theme = Theme {
    snake_head: Color::LightGreen,
    snake_body: Color::Green,
    food: Color::Red,
    golden_food: Color::Yellow,
    obstacle: Color::Gray,
    timer_fresh: Color::Green,
    timer_warning: Color::Yellow,
    timer_critical: Color::Red,
    play_bg: Color::Black,
    border_fg: Color::White,
    border_bg: Color::DarkGray,
    hud_score: Color::White,
    menu_title: Color::Green,
    menu_footer: Color::DarkGray,
};

/// Half-block border set: solid side faces the play area.
pub const BORDER_HALF_BLOCK: border::Set = border::Set {
    top_left: "▄",
    top_right: "▄",
    bottom_left: "▀",
    bottom_right: "▀",
    vertical_left: "█",
    vertical_right: "█",
    horizontal_top: "▄",
    horizontal_bottom: "▀",
};

pub const GLYPH_SNAKE_HEAD: &str = "██";
pub const GLYPH_SNAKE_BODY: &str = "▓▓";
pub const GLYPH_FOOD: &str = "●";
pub const GLYPH_OBSTACLE: &str = "▒▒";

/// Timer bar glyphs from full to nearly empty.
pub const GLYPHS_TIMER: [&str; 4] = ["█", "▆", "▄", "▂"];
