//! Terminal Space-Invaders: scene state machine and per-frame simulation.
//!
//! The binary owns the terminal and the input thread; everything here is
//! deterministic given its inputs, an RNG seed and a `Clock`.

pub mod collision;
pub mod compute;
pub mod config;
pub mod director;
pub mod display;
pub mod entities;
pub mod error;
pub mod formation;
pub mod input;
pub mod scenes;
pub mod widgets;

pub use error::{GameError, Result};
