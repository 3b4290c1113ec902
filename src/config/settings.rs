//! Configuration settings for the Game of Life runner

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::analysis::StabilityCriterion;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    pub board: BoardConfig,
    pub simulation: SimulationConfig,
    pub files: FilesConfig,
    pub stability: StabilityConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoardConfig {
    pub width: usize,
    pub height: usize,
    pub cell_size: usize,
    pub live_density: f64,
    /// Fixed seed for reproducible boards; entropy when absent
    #[serde(default)]
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    pub tick_interval_ms: u64,
    pub symmetry_generations: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilesConfig {
    pub frame_path: PathBuf,
    pub patterns_directory: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StabilityConfig {
    pub trials: usize,
    pub max_generations: usize,
    pub criterion: StabilityCriterion,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            board: BoardConfig {
                width: 60,
                height: 20,
                cell_size: 1,
                live_density: crate::game_of_life::DEFAULT_LIVE_DENSITY,
                seed: None,
            },
            simulation: SimulationConfig {
                tick_interval_ms: 100,
                symmetry_generations: 100,
            },
            files: FilesConfig {
                frame_path: PathBuf::from("frames/frame.txt"),
                patterns_directory: PathBuf::from("patterns"),
            },
            stability: StabilityConfig {
                trials: 10,
                max_generations: 5000,
                criterion: StabilityCriterion::LiveCountPlateau { window: 50 },
            },
        }
    }
}

impl Settings {
    /// Load settings from a YAML file
    pub fn from_file(path: &PathBuf) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let settings: Settings = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        settings.validate()?;
        Ok(settings)
    }

    /// Save settings to a YAML file
    pub fn to_file(&self, path: &PathBuf) -> Result<()> {
        let content = serde_yaml::to_string(self).context("Failed to serialize settings")?;

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Validate the settings.
    /// Live density is deliberately left unchecked; out-of-range values saturate.
    pub fn validate(&self) -> Result<()> {
        if self.board.cell_size == 0 {
            anyhow::bail!("Cell size must be positive");
        }

        if self.simulation.tick_interval_ms == 0 {
            anyhow::bail!("Tick interval must be positive");
        }

        if self.stability.trials == 0 {
            anyhow::bail!("Number of stability trials must be positive");
        }

        if self.stability.max_generations == 0 {
            anyhow::bail!("Stability generation cutoff must be positive");
        }

        self.stability.criterion.validate()?;

        Ok(())
    }

    /// Merge settings with command line overrides
    pub fn merge_with_cli(&mut self, cli_overrides: &CliOverrides) {
        if let Some(width) = cli_overrides.width {
            self.board.width = width;
        }
        if let Some(height) = cli_overrides.height {
            self.board.height = height;
        }
        if let Some(cell_size) = cli_overrides.cell_size {
            self.board.cell_size = cell_size;
        }
        if let Some(density) = cli_overrides.live_density {
            self.board.live_density = density;
        }
        if let Some(seed) = cli_overrides.seed {
            self.board.seed = Some(seed);
        }
        if let Some(ref frame) = cli_overrides.frame_path {
            self.files.frame_path = frame.clone();
        }
    }
}

/// Command line overrides for settings
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub width: Option<usize>,
    pub height: Option<usize>,
    pub cell_size: Option<usize>,
    pub live_density: Option<f64>,
    pub seed: Option<u64>,
    pub frame_path: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_settings_are_valid() {
        assert!(Settings::default().validate().is_ok());
    }

    #[test]
    fn test_yaml_round_trip() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("config/default.yaml");

        let mut settings = Settings::default();
        settings.board.seed = Some(7);
        settings.stability.criterion = StabilityCriterion::StateRepeat { history: 12 };
        settings.to_file(&path).unwrap();

        let loaded = Settings::from_file(&path).unwrap();
        assert_eq!(loaded, settings);
    }

    #[test]
    fn test_criterion_yaml_shape() {
        let yaml = "kind: live_count_plateau\nwindow: 30\n";
        let criterion: StabilityCriterion = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(criterion, StabilityCriterion::LiveCountPlateau { window: 30 });
    }

    #[test]
    fn test_validation_rejects_zero_cell_size() {
        let mut settings = Settings::default();
        settings.board.cell_size = 0;
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_validation_ignores_density_range() {
        let mut settings = Settings::default();
        settings.board.live_density = 1.5;
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_merge_with_cli() {
        let mut settings = Settings::default();
        settings.merge_with_cli(&CliOverrides {
            width: Some(10),
            cell_size: Some(2),
            seed: Some(3),
            ..Default::default()
        });

        assert_eq!(settings.board.width, 10);
        assert_eq!(settings.board.height, 20);
        assert_eq!(settings.board.cell_size, 2);
        assert_eq!(settings.board.seed, Some(3));
    }
}
