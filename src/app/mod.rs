//! Keyboard-driven host loop around a board

pub mod command;
pub mod patterns;
pub mod session;
pub mod terminal;

pub use command::Command;
pub use patterns::PatternCycle;
pub use session::{board_from_config, Flow, Session};
pub use terminal::run_interactive;
