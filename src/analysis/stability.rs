//! Repeated-trial stability timing
//!
//! Each trial advances a fresh random board until a caller-chosen
//! [`StabilityCriterion`] holds or a generation cutoff is reached.

use crate::config::Settings;
use crate::game_of_life::Board;
use anyhow::Result;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::fmt;

/// When a board counts as stable
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StabilityCriterion {
    /// Live-cell count unchanged for `window` consecutive advances
    LiveCountPlateau { window: usize },
    /// Grid state equal to one of the previous `history` states
    StateRepeat { history: usize },
}

impl StabilityCriterion {
    pub fn validate(&self) -> Result<()> {
        match self {
            StabilityCriterion::LiveCountPlateau { window: 0 } => {
                anyhow::bail!("Plateau window must be positive")
            }
            StabilityCriterion::StateRepeat { history: 0 } => {
                anyhow::bail!("State history length must be positive")
            }
            _ => Ok(()),
        }
    }

    pub fn tracker(&self) -> StabilityTracker {
        match *self {
            StabilityCriterion::LiveCountPlateau { window } => StabilityTracker::Plateau {
                window,
                last_count: None,
                unchanged: 0,
            },
            StabilityCriterion::StateRepeat { history } => StabilityTracker::Repeat {
                history,
                seen: VecDeque::with_capacity(history),
            },
        }
    }
}

impl fmt::Display for StabilityCriterion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StabilityCriterion::LiveCountPlateau { window } => {
                write!(f, "live count unchanged for {} generations", window)
            }
            StabilityCriterion::StateRepeat { history } => {
                write!(f, "state repeats within {} generations", history)
            }
        }
    }
}

/// Running state for one criterion over one board's history
#[derive(Debug, Clone)]
pub enum StabilityTracker {
    Plateau {
        window: usize,
        last_count: Option<usize>,
        unchanged: usize,
    },
    Repeat {
        history: usize,
        seen: VecDeque<Vec<bool>>,
    },
}

impl StabilityTracker {
    /// Record the board's current generation; true once the criterion holds
    pub fn observe(&mut self, board: &Board) -> bool {
        match self {
            StabilityTracker::Plateau {
                window,
                last_count,
                unchanged,
            } => {
                let count = board.count_live_cells();
                *unchanged = match *last_count {
                    Some(previous) if previous == count => *unchanged + 1,
                    _ => 0,
                };
                *last_count = Some(count);
                *unchanged >= *window
            }
            StabilityTracker::Repeat { history, seen } => {
                let state = board.snapshot();
                let repeated = seen.contains(&state);
                if seen.len() == *history {
                    seen.pop_front();
                }
                seen.push_back(state);
                repeated
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum TrialOutcome {
    Stabilized { generations: usize },
    CutOff,
}

/// Advance `board` until `criterion` holds, at most `max_generations` times
pub fn run_trial(
    board: &mut Board,
    criterion: &StabilityCriterion,
    max_generations: usize,
) -> TrialOutcome {
    let mut tracker = criterion.tracker();
    tracker.observe(board);

    for generation in 1..=max_generations {
        board.advance();
        if tracker.observe(board) {
            return TrialOutcome::Stabilized {
                generations: generation,
            };
        }
    }

    TrialOutcome::CutOff
}

/// Parameters of a stability-timing experiment
#[derive(Debug, Clone, PartialEq)]
pub struct StabilityExperiment {
    pub width: usize,
    pub height: usize,
    pub cell_size: usize,
    pub live_density: f64,
    /// Trial `i` uses `seed + i`; entropy when absent
    pub seed: Option<u64>,
    pub trials: usize,
    pub max_generations: usize,
    pub criterion: StabilityCriterion,
}

impl StabilityExperiment {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            width: settings.board.width,
            height: settings.board.height,
            cell_size: settings.board.cell_size,
            live_density: settings.board.live_density,
            seed: settings.board.seed,
            trials: settings.stability.trials,
            max_generations: settings.stability.max_generations,
            criterion: settings.stability.criterion.clone(),
        }
    }

    fn fresh_board(&self, trial: usize) -> Board {
        match self.seed {
            Some(seed) => Board::with_seed(
                self.width,
                self.height,
                self.cell_size,
                self.live_density,
                seed.wrapping_add(trial as u64),
            ),
            None => Board::new(self.width, self.height, self.cell_size, self.live_density),
        }
    }

    /// Run every trial on its own fresh board
    pub fn run(&self) -> StabilityReport {
        let outcomes: Vec<TrialOutcome> = (0..self.trials)
            .into_par_iter()
            .map(|trial| {
                let mut board = self.fresh_board(trial);
                let outcome = run_trial(&mut board, &self.criterion, self.max_generations);
                tracing::debug!(trial, ?outcome, "stability trial finished");
                outcome
            })
            .collect();

        let report = StabilityReport::new(self.criterion.clone(), self.max_generations, outcomes);
        tracing::info!(
            trials = self.trials,
            stabilized = report.stabilized,
            cut_off = report.cut_off,
            "stability experiment finished"
        );
        report
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StabilityReport {
    pub criterion: StabilityCriterion,
    pub max_generations: usize,
    pub outcomes: Vec<TrialOutcome>,
    pub stabilized: usize,
    pub cut_off: usize,
    /// Mean over stabilized trials only
    pub average_generations: Option<f64>,
}

impl StabilityReport {
    pub fn new(
        criterion: StabilityCriterion,
        max_generations: usize,
        outcomes: Vec<TrialOutcome>,
    ) -> Self {
        let generations: Vec<usize> = outcomes
            .iter()
            .filter_map(|outcome| match outcome {
                TrialOutcome::Stabilized { generations } => Some(*generations),
                TrialOutcome::CutOff => None,
            })
            .collect();

        let stabilized = generations.len();
        let average_generations = (stabilized > 0)
            .then(|| generations.iter().sum::<usize>() as f64 / stabilized as f64);

        Self {
            criterion,
            max_generations,
            cut_off: outcomes.len() - stabilized,
            stabilized,
            outcomes,
            average_generations,
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

impl fmt::Display for StabilityReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Stability experiment ({})", self.criterion)?;
        writeln!(f, "  Trials: {}", self.outcomes.len())?;
        writeln!(f, "  Stabilized: {}", self.stabilized)?;
        writeln!(
            f,
            "  Cut off at {} generations: {}",
            self.max_generations, self.cut_off
        )?;
        match self.average_generations {
            Some(average) => writeln!(f, "  Average generations to stability: {:.1}", average),
            None => writeln!(f, "  Average generations to stability: n/a"),
        }
    }
}
