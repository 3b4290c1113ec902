//! Single-key commands of the interactive loop

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    NextPattern,
    Save,
    Load,
    StabilityExperiment,
    SymmetryAverage,
    Quit,
    /// Any other key, or none
    Step,
}

impl Command {
    /// Map a polled key (case-insensitive) to its command
    pub fn from_key(key: Option<char>) -> Self {
        match key.map(|c| c.to_ascii_uppercase()) {
            Some('N') => Command::NextPattern,
            Some('S') => Command::Save,
            Some('L') => Command::Load,
            Some('A') => Command::StabilityExperiment,
            Some('Y') => Command::SymmetryAverage,
            Some('Q') => Command::Quit,
            _ => Command::Step,
        }
    }
}
