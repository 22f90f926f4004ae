use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};
use std::process;
use std::time::{Duration, Instant};

use clap::Parser;
use log::LevelFilter;
use simplelog::WriteLogger;
use snake_chase::config::{
    BoundaryPolicy, ConfigError, GameConfig, THEME_CLASSIC, default_log_path,
};
use snake_chase::game::{GameEngine, GameEvent};
use snake_chase::input::{GameInput, poll_input};
use snake_chase::renderer::{self, Screen};
use snake_chase::terminal_runtime::{TerminalSession, install_panic_hook};
use snake_chase::ui::hud::HudInfo;

const FRAME_POLL_INTERVAL: Duration = Duration::from_millis(16);

#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// JSON config file. Defaults to the user config file when one exists.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Number of apples on the board at once (1-20).
    #[arg(long)]
    apples: Option<usize>,

    #[arg(long)]
    board_size: Option<i32>,

    #[arg(long)]
    tile_size: Option<i32>,

    /// End the game at the board edge instead of wrapping around.
    #[arg(long)]
    wall: bool,

    #[arg(long)]
    obstacle_cap: Option<usize>,

    /// Chance that an obstacle check places an obstacle (0.0-1.0).
    #[arg(long)]
    obstacle_probability: Option<f64>,

    /// Delay between ticks in milliseconds.
    #[arg(long = "tick-ms")]
    tick_ms: Option<u64>,

    /// Seed for a reproducible session.
    #[arg(long)]
    seed: Option<u64>,

    #[arg(long)]
    log_file: Option<PathBuf>,

    #[arg(long, default_value = "info")]
    log_level: LevelFilter,
}

impl Cli {
    /// Loads the file-based configuration, then layers CLI flags over it.
    fn resolve_config(&self) -> Result<GameConfig, ConfigError> {
        let config = match &self.config {
            Some(path) => GameConfig::load_from_path(path)?,
            None => GameConfig::load_user_or_default()?,
        };

        let config = self.apply_overrides(config);
        config.validate()?;
        Ok(config)
    }

    fn apply_overrides(&self, mut config: GameConfig) -> GameConfig {
        if let Some(apples) = self.apples {
            config.apple_count = apples;
        }
        if let Some(board_size) = self.board_size {
            config.board_size = board_size;
        }
        if let Some(tile_size) = self.tile_size {
            config.tile_size = tile_size;
        }
        if self.wall {
            config.boundary_policy = BoundaryPolicy::Wall;
        }
        if let Some(cap) = self.obstacle_cap {
            config.obstacle_cap = cap;
        }
        if let Some(probability) = self.obstacle_probability {
            config.obstacle_spawn_probability = probability;
        }
        if let Some(tick_ms) = self.tick_ms {
            config.tick_interval_ms = tick_ms;
        }

        config
    }
}

fn main() -> io::Result<()> {
    let cli = Cli::parse();

    let config = match cli.resolve_config() {
        Ok(config) => config,
        Err(error) => {
            eprintln!("Invalid configuration: {error}");
            process::exit(2);
        }
    };

    let log_path = cli.log_file.clone().unwrap_or_else(default_log_path);
    if let Err(error) = init_logger(&log_path, cli.log_level) {
        eprintln!("Logging disabled ({}): {error}", log_path.display());
    }

    let engine = match cli.seed {
        Some(seed) => GameEngine::new_with_seed(config, 0, seed),
        None => GameEngine::new(config, 0),
    };
    let engine = match engine {
        Ok(engine) => engine,
        Err(error) => {
            eprintln!("Invalid configuration: {error}");
            process::exit(2);
        }
    };

    install_panic_hook();
    run(engine)
}

fn init_logger(path: &Path, level: LevelFilter) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let file = File::create(path)?;
    WriteLogger::init(level, simplelog::Config::default(), file)
        .map_err(io::Error::other)
}

fn run(mut engine: GameEngine) -> io::Result<()> {
    let mut session = TerminalSession::enter()?;
    let tick_interval = Duration::from_millis(engine.config().tick_interval_ms);

    let mut clock = SessionClock::paused();
    let mut screen = Screen::Start;
    let mut last_tick = Instant::now();
    let mut score_changed_at = None;

    loop {
        let snapshot = engine.snapshot(clock.now_ms());
        let hud_info = HudInfo {
            theme: &THEME_CLASSIC,
            boundary_policy: engine.config().boundary_policy,
            paused: screen == Screen::Paused,
            now: Instant::now(),
            score_changed_at,
        };
        session.draw(|frame| renderer::render(frame, &snapshot, engine.config(), screen, hud_info))?;

        if let Some(input) = poll_input(FRAME_POLL_INTERVAL)? {
            match (input, screen) {
                (GameInput::Quit, _) => break,
                (GameInput::Confirm, Screen::Start) => {
                    clock.resume();
                    last_tick = Instant::now();
                    screen = Screen::Playing;
                }
                (GameInput::Confirm, Screen::GameOver) => {
                    clock = SessionClock::running();
                    engine.restart(clock.now_ms());
                    last_tick = Instant::now();
                    score_changed_at = None;
                    screen = Screen::Playing;
                }
                (GameInput::Pause, Screen::Playing) => {
                    clock.pause();
                    screen = Screen::Paused;
                }
                (GameInput::Pause, Screen::Paused) => {
                    clock.resume();
                    screen = Screen::Playing;
                }
                (GameInput::Direction(direction), Screen::Playing) => {
                    engine.set_direction(direction);
                }
                _ => {}
            }
        }

        // No tick is scheduled once the session has ended.
        if screen == Screen::Playing && last_tick.elapsed() >= tick_interval {
            let report = engine.tick(clock.now_ms());
            last_tick = Instant::now();

            for event in report.events {
                match event {
                    GameEvent::FoodEaten { .. } => score_changed_at = Some(last_tick),
                    GameEvent::GameOver { .. } => {
                        clock.pause();
                        screen = Screen::GameOver;
                    }
                }
            }
        }
    }

    log::info!("exiting with score {}", engine.state().score);
    Ok(())
}

/// Milliseconds of play time, excluding time spent paused or in menus.
#[derive(Debug, Clone, Copy)]
struct SessionClock {
    started: Instant,
    paused_at: Option<Instant>,
    paused_total: Duration,
}

impl SessionClock {
    fn running() -> Self {
        Self {
            started: Instant::now(),
            paused_at: None,
            paused_total: Duration::ZERO,
        }
    }

    fn paused() -> Self {
        let now = Instant::now();
        Self {
            started: now,
            paused_at: Some(now),
            paused_total: Duration::ZERO,
        }
    }

    fn pause(&mut self) {
        if self.paused_at.is_none() {
            self.paused_at = Some(Instant::now());
        }
    }

    fn resume(&mut self) {
        if let Some(paused_at) = self.paused_at.take() {
            self.paused_total += paused_at.elapsed();
        }
    }

    fn now_ms(&self) -> u64 {
        self.elapsed_at(Instant::now())
    }

    fn elapsed_at(&self, now: Instant) -> u64 {
        let end = self.paused_at.unwrap_or(now);
        let played = end
            .saturating_duration_since(self.started)
            .saturating_sub(self.paused_total);
        u64::try_from(played.as_millis()).unwrap_or(u64::MAX)
    }
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};

    use clap::Parser;
    use snake_chase::config::{BoundaryPolicy, GameConfig};

    use super::{Cli, SessionClock};

    #[test]
    fn paused_clock_does_not_advance() {
        let clock = SessionClock::paused();

        let later = Instant::now() + Duration::from_secs(5);

        assert_eq!(clock.elapsed_at(later), 0);
    }

    #[test]
    fn paused_time_is_excluded() {
        let start = Instant::now();
        let clock = SessionClock {
            started: start,
            paused_at: None,
            paused_total: Duration::from_millis(300),
        };

        assert_eq!(clock.elapsed_at(start + Duration::from_millis(1_000)), 700);
    }

    #[test]
    fn cli_flags_override_file_config() {
        let cli = Cli::try_parse_from([
            "snake-chase",
            "--apples",
            "4",
            "--wall",
            "--obstacle-probability",
            "0.5",
            "--tick-ms",
            "90",
        ])
        .expect("flags should parse");

        let config = cli.apply_overrides(GameConfig::default());

        assert_eq!(config.apple_count, 4);
        assert_eq!(config.boundary_policy, BoundaryPolicy::Wall);
        assert!((config.obstacle_spawn_probability - 0.5).abs() < f64::EPSILON);
        assert_eq!(config.tick_interval_ms, 90);
        assert_eq!(config.obstacle_cap, GameConfig::default().obstacle_cap);
    }

    #[test]
    fn missing_explicit_config_file_is_an_error() {
        let cli = Cli::parse_from(["snake-chase", "--config", "/nonexistent/snake-chase.json"]);

        assert!(cli.resolve_config().is_err());
    }

    #[test]
    fn out_of_range_apples_fail_validation() {
        let cli = Cli::parse_from(["snake-chase", "--apples", "25"]);

        assert!(cli.apply_overrides(GameConfig::default()).validate().is_err());
    }
}
