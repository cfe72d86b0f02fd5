//! Grid snake: a deterministic game core plus a thin terminal driver.
//!
//! [`game::GameState`] is advanced one tick at a time by whatever loop owns
//! the clock; everything under [`renderer`], [`ui`] and
//! [`terminal_runtime`] only reads [`game::Snapshot`]s.

pub mod config;
pub mod difficulty;
pub mod food;
pub mod game;
pub mod input;
pub mod renderer;
pub mod snake;
pub mod terminal_runtime;
pub mod ui;
