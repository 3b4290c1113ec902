//! Game of Life core: cells, the toroidal board, and frame persistence

pub mod board;
pub mod cell;
pub mod error;
pub mod io;

pub use board::{Board, DEFAULT_LIVE_DENSITY};
pub use cell::Cell;
pub use error::BoardError;
pub use io::{apply_frame, create_example_patterns, frame_to_string, load_state, save_state};
