//! Command dispatch for the interactive loop, independent of the terminal

use super::{Command, PatternCycle};
use crate::analysis::{average_symmetry, StabilityExperiment};
use crate::config::{BoardConfig, Settings};
use crate::game_of_life::{load_state, save_state, Board};
use crate::utils::{BoardFormatter, ColorOutput};

/// Whether the loop keeps going after a command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Build the board described by the `board` settings section
pub fn board_from_config(config: &BoardConfig) -> Board {
    match config.seed {
        Some(seed) => Board::with_seed(
            config.width,
            config.height,
            config.cell_size,
            config.live_density,
            seed,
        ),
        None => Board::new(config.width, config.height, config.cell_size, config.live_density),
    }
}

/// A running board plus the state the key commands act on
#[derive(Debug)]
pub struct Session {
    board: Board,
    settings: Settings,
    patterns: PatternCycle,
    generation: u64,
    message: Option<String>,
}

impl Session {
    pub fn new(settings: Settings) -> Self {
        let patterns = match PatternCycle::from_directory(&settings.files.patterns_directory) {
            Ok(patterns) => patterns,
            Err(e) => {
                tracing::warn!("pattern directory unavailable: {:#}", e);
                PatternCycle::default()
            }
        };
        Self::with_patterns(settings, patterns)
    }

    pub fn with_patterns(settings: Settings, patterns: PatternCycle) -> Self {
        Self {
            board: board_from_config(&settings.board),
            settings,
            patterns,
            generation: 0,
            message: None,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Outcome of the last non-step command, if any
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn dispatch(&mut self, command: Command) -> Flow {
        match command {
            Command::Quit => return Flow::Quit,
            Command::Step => self.step(),
            Command::NextPattern => self.next_pattern(),
            Command::Save => self.save(),
            Command::Load => self.load(),
            Command::StabilityExperiment => self.stability_experiment(),
            Command::SymmetryAverage => self.symmetry_average(),
        }
        Flow::Continue
    }

    fn step(&mut self) {
        self.board.advance();
        self.generation += 1;
    }

    fn next_pattern(&mut self) {
        let Some(path) = self.patterns.next_pattern().map(|p| p.to_path_buf()) else {
            self.message = Some(ColorOutput::warning("No pattern files available"));
            return;
        };

        let mut board = self.board.clone();
        board.clear();
        match load_state(&mut board, &path) {
            Ok(()) => {
                self.board = board;
                self.generation = 0;
                self.message = Some(ColorOutput::info(&format!("Pattern {}", path.display())));
            }
            Err(e) => {
                tracing::warn!("{}", e);
                self.message = Some(ColorOutput::error(&e.to_string()));
            }
        }
    }

    fn save(&mut self) {
        let path = &self.settings.files.frame_path;
        self.message = Some(match save_state(&self.board, path) {
            Ok(()) => ColorOutput::success(&format!("Saved frame to {}", path.display())),
            Err(e) => {
                tracing::warn!("{}", e);
                ColorOutput::error(&e.to_string())
            }
        });
    }

    fn load(&mut self) {
        let path = &self.settings.files.frame_path;
        self.message = Some(match load_state(&mut self.board, path) {
            Ok(()) => ColorOutput::success(&format!("Loaded frame from {}", path.display())),
            Err(e) => {
                tracing::warn!("{}", e);
                ColorOutput::error(&e.to_string())
            }
        });
    }

    fn stability_experiment(&mut self) {
        let report = StabilityExperiment::from_settings(&self.settings).run();
        self.message = Some(report.to_string());
    }

    fn symmetry_average(&mut self) {
        let generations = self.settings.simulation.symmetry_generations;
        let summary = average_symmetry(&mut self.board, generations);
        self.generation += generations as u64;
        self.message = Some(summary.to_string());
    }

    /// Full screen: grid, counters, last message, key legend
    pub fn render(&self) -> String {
        let mut output = BoardFormatter::format_board(&self.board);
        output.push_str(&format!("Generation: {}\n", self.generation));
        output.push_str(&BoardFormatter::format_status(&self.board));
        if let Some(message) = &self.message {
            output.push_str(message);
            if !message.ends_with('\n') {
                output.push('\n');
            }
        }
        output.push_str(BoardFormatter::format_help());
        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::StabilityCriterion;
    use crate::game_of_life::create_example_patterns;
    use tempfile::{tempdir, TempDir};

    fn test_settings(dir: &TempDir) -> Settings {
        let mut settings = Settings::default();
        settings.board.width = 10;
        settings.board.height = 8;
        settings.board.live_density = 0.3;
        settings.board.seed = Some(5);
        settings.simulation.symmetry_generations = 3;
        settings.files.frame_path = dir.path().join("frames/frame.txt");
        settings.files.patterns_directory = dir.path().join("patterns");
        settings.stability.trials = 2;
        settings.stability.max_generations = 50;
        settings.stability.criterion = StabilityCriterion::StateRepeat { history: 2 };
        settings
    }

    #[test]
    fn test_step_and_quit() {
        let dir = tempdir().unwrap();
        let mut session = Session::new(test_settings(&dir));

        let mut expected = session.board().clone();
        expected.advance();

        assert_eq!(session.dispatch(Command::Step), Flow::Continue);
        assert_eq!(session.board().snapshot(), expected.snapshot());
        assert_eq!(session.generation(), 1);

        assert_eq!(session.dispatch(Command::Quit), Flow::Quit);
    }

    #[test]
    fn test_save_then_load_restores_frame() {
        let dir = tempdir().unwrap();
        let mut session = Session::new(test_settings(&dir));
        let saved = session.board().snapshot();

        session.dispatch(Command::Save);
        assert!(dir.path().join("frames/frame.txt").exists());

        session.dispatch(Command::Step);
        session.dispatch(Command::Step);
        session.dispatch(Command::Load);

        assert_eq!(session.board().snapshot(), saved);
        assert!(session.message().unwrap().contains("Loaded frame"));
    }

    #[test]
    fn test_load_missing_frame_keeps_board() {
        let dir = tempdir().unwrap();
        let mut session = Session::new(test_settings(&dir));
        let before = session.board().snapshot();

        assert_eq!(session.dispatch(Command::Load), Flow::Continue);
        assert_eq!(session.board().snapshot(), before);
        assert!(session.message().unwrap().contains("not found"));
    }

    #[test]
    fn test_next_pattern_replaces_board() {
        let dir = tempdir().unwrap();
        create_example_patterns(dir.path().join("patterns")).unwrap();
        let mut session = Session::new(test_settings(&dir));

        // beacon.txt comes first
        session.dispatch(Command::NextPattern);
        assert_eq!(session.board().count_live_cells(), 8);
        assert_eq!(session.generation(), 0);

        // blinker.txt
        session.dispatch(Command::NextPattern);
        assert_eq!(session.board().live_positions(), vec![(2, 2), (3, 2), (4, 2)]);
    }

    #[test]
    fn test_next_pattern_without_files() {
        let dir = tempdir().unwrap();
        let mut session = Session::new(test_settings(&dir));
        let before = session.board().snapshot();

        session.dispatch(Command::NextPattern);
        assert_eq!(session.board().snapshot(), before);
        assert!(session.message().unwrap().contains("No pattern files"));
    }

    #[test]
    fn test_symmetry_average_advances_board() {
        let dir = tempdir().unwrap();
        let mut session = Session::new(test_settings(&dir));

        session.dispatch(Command::SymmetryAverage);
        assert_eq!(session.generation(), 3);
        assert!(session.message().unwrap().contains("over 3 generations"));
    }

    #[test]
    fn test_stability_experiment_reports() {
        let dir = tempdir().unwrap();
        let mut session = Session::new(test_settings(&dir));
        let before = session.board().snapshot();

        session.dispatch(Command::StabilityExperiment);
        assert!(session.message().unwrap().contains("Trials: 2"));
        assert_eq!(session.board().snapshot(), before);
    }

    #[test]
    fn test_render_contains_counters() {
        let dir = tempdir().unwrap();
        let session = Session::new(test_settings(&dir));
        let screen = session.render();

        assert!(screen.contains("Live cells:"));
        assert!(screen.contains("Symmetric elements:"));
        assert_eq!(screen.lines().take(8).count(), 8);
        assert!(screen.lines().next().unwrap().chars().all(|c| c == '#' || c == '.'));
    }
}
