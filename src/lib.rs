//! Conway's Game of Life
//!
//! A toroidal board of cells advanced in synchronized generations, with
//! plain-text frame persistence, symmetry and stability experiments, and a
//! keyboard-driven terminal loop.

pub mod analysis;
pub mod app;
pub mod config;
pub mod game_of_life;
pub mod utils;

pub use config::Settings;
pub use game_of_life::{Board, BoardError, Cell};
