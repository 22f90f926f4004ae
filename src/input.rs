use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};

/// Canonical movement directions for snake input.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Returns true for directions along the x axis.
    #[must_use]
    pub fn is_horizontal(self) -> bool {
        matches!(self, Self::Left | Self::Right)
    }

    /// Returns the `(dx, dy)` movement vector for one tile.
    #[must_use]
    pub fn vector(self, tile_size: i32) -> (i32, i32) {
        match self {
            Self::Up => (0, -tile_size),
            Self::Down => (0, tile_size),
            Self::Left => (-tile_size, 0),
            Self::Right => (tile_size, 0),
        }
    }
}

/// High-level input events consumed by the game loop.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum GameInput {
    Direction(Direction),
    Pause,
    Quit,
    Confirm,
}

/// Returns whether a direction change is legal.
///
/// Changes along the axis the snake is currently moving on are refused, so
/// the snake can never turn back into its own neck. An idle snake accepts
/// any direction.
#[must_use]
pub fn direction_change_is_valid(current: Option<Direction>, next: Direction) -> bool {
    match current {
        None => true,
        Some(current) => current.is_horizontal() != next.is_horizontal(),
    }
}

/// Maps one key press to a game input.
#[must_use]
pub fn map_key_event(key: KeyEvent) -> Option<GameInput> {
    if key.kind != KeyEventKind::Press {
        return None;
    }

    match key.code {
        KeyCode::Up | KeyCode::Char('w' | 'W') => Some(GameInput::Direction(Direction::Up)),
        KeyCode::Down | KeyCode::Char('s' | 'S') => Some(GameInput::Direction(Direction::Down)),
        KeyCode::Left | KeyCode::Char('a' | 'A') => Some(GameInput::Direction(Direction::Left)),
        KeyCode::Right | KeyCode::Char('d' | 'D') => Some(GameInput::Direction(Direction::Right)),
        KeyCode::Char('p' | 'P') => Some(GameInput::Pause),
        KeyCode::Char('q' | 'Q') | KeyCode::Esc => Some(GameInput::Quit),
        KeyCode::Enter | KeyCode::Char(' ') => Some(GameInput::Confirm),
        _ => None,
    }
}

/// Waits up to `timeout` for a key press and maps it to a game input.
pub fn poll_input(timeout: Duration) -> io::Result<Option<GameInput>> {
    if !event::poll(timeout)? {
        return Ok(None);
    }

    match event::read()? {
        Event::Key(key) => Ok(map_key_event(key)),
        _ => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

    use super::{Direction, GameInput, direction_change_is_valid, map_key_event};

    #[test]
    fn same_axis_changes_are_rejected() {
        let right = Some(Direction::Right);
        assert!(!direction_change_is_valid(right, Direction::Left));
        assert!(!direction_change_is_valid(right, Direction::Right));
        assert!(direction_change_is_valid(right, Direction::Up));
        assert!(direction_change_is_valid(right, Direction::Down));

        let up = Some(Direction::Up);
        assert!(!direction_change_is_valid(up, Direction::Down));
        assert!(direction_change_is_valid(up, Direction::Left));
    }

    #[test]
    fn idle_snake_accepts_any_direction() {
        for direction in [
            Direction::Up,
            Direction::Down,
            Direction::Left,
            Direction::Right,
        ] {
            assert!(direction_change_is_valid(None, direction));
        }
    }

    #[test]
    fn vectors_scale_with_tile_size() {
        assert_eq!(Direction::Right.vector(20), (20, 0));
        assert_eq!(Direction::Up.vector(16), (0, -16));
    }

    #[test]
    fn wasd_and_arrows_map_to_directions() {
        let press = |code| KeyEvent::new(code, KeyModifiers::NONE);

        assert_eq!(
            map_key_event(press(KeyCode::Char('w'))),
            Some(GameInput::Direction(Direction::Up))
        );
        assert_eq!(
            map_key_event(press(KeyCode::Left)),
            Some(GameInput::Direction(Direction::Left))
        );
        assert_eq!(map_key_event(press(KeyCode::Esc)), Some(GameInput::Quit));
        assert_eq!(map_key_event(press(KeyCode::Char('x'))), None);
    }

    #[test]
    fn key_release_is_ignored() {
        let mut key = KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE);
        key.kind = KeyEventKind::Release;

        assert_eq!(map_key_event(key), None);
    }
}
