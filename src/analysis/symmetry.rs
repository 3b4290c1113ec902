//! Left-right symmetry sampled across generations

use crate::game_of_life::Board;
use itertools::{Itertools, MinMaxResult};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SymmetrySummary {
    /// Board positions compared per sample
    pub elements: usize,
    /// Symmetric-element count before each advance
    pub samples: Vec<usize>,
}

impl SymmetrySummary {
    pub fn mean(&self) -> Option<f64> {
        (!self.samples.is_empty())
            .then(|| self.samples.iter().sum::<usize>() as f64 / self.samples.len() as f64)
    }

    pub fn range(&self) -> Option<(usize, usize)> {
        match self.samples.iter().copied().minmax() {
            MinMaxResult::NoElements => None,
            MinMaxResult::OneElement(value) => Some((value, value)),
            MinMaxResult::MinMax(min, max) => Some((min, max)),
        }
    }
}

impl fmt::Display for SymmetrySummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.mean(), self.range()) {
            (Some(mean), Some((min, max))) => write!(
                f,
                "Average symmetric elements over {} generations: {:.1} of {} (min {}, max {})",
                self.samples.len(),
                mean,
                self.elements,
                min,
                max
            ),
            _ => write!(f, "No generations sampled"),
        }
    }
}

/// Sample the symmetry count, then advance, `generations` times.
/// The board is left `generations` steps further on.
pub fn average_symmetry(board: &mut Board, generations: usize) -> SymmetrySummary {
    let samples = (0..generations)
        .map(|_| {
            let count = board.count_symmetric_elements();
            board.advance();
            count
        })
        .collect();

    SymmetrySummary {
        elements: board.count_elements(),
        samples,
    }
}
