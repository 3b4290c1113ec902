//! Multi-generation experiments over boards

pub mod stability;
pub mod symmetry;

pub use stability::{
    run_trial, StabilityCriterion, StabilityExperiment, StabilityReport, StabilityTracker,
    TrialOutcome,
};
pub use symmetry::{average_symmetry, SymmetrySummary};
