//! Configuration management for the Game of Life runner

pub mod settings;

pub use settings::{
    BoardConfig, CliOverrides, FilesConfig, Settings, SimulationConfig, StabilityConfig,
};
