//! Grid-based snake chase: timed food, golden food, and obstacles that pile
//! up over time.
//!
//! The [`game::GameEngine`] is a pure rules engine driven by caller-supplied
//! timestamps. The renderer and terminal modules are a thin front end.

pub mod config;
pub mod food;
pub mod game;
pub mod grid;
pub mod input;
pub mod obstacle;
pub mod renderer;
pub mod snake;
pub mod snapshot;
pub mod terminal_runtime;
pub mod ui;
