//! Cycling through the predefined pattern frames

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Pattern files of a directory in name order, visited round-robin
#[derive(Debug, Clone, Default)]
pub struct PatternCycle {
    files: Vec<PathBuf>,
    next: usize,
}

impl PatternCycle {
    pub fn new(files: Vec<PathBuf>) -> Self {
        Self { files, next: 0 }
    }

    /// Collect the `.txt` frames in `dir`, sorted by file name
    pub fn from_directory<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let dir = dir.as_ref();
        let entries = std::fs::read_dir(dir)
            .with_context(|| format!("Failed to read pattern directory: {}", dir.display()))?;

        let mut files = Vec::new();
        for entry in entries {
            let path = entry.context("Failed to read directory entry")?.path();
            if path.is_file() && path.extension().is_some_and(|ext| ext == "txt") {
                files.push(path);
            }
        }
        files.sort();

        tracing::debug!(dir = %dir.display(), count = files.len(), "pattern files found");
        Ok(Self::new(files))
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Next pattern file, wrapping after the last
    pub fn next_pattern(&mut self) -> Option<&Path> {
        if self.files.is_empty() {
            return None;
        }
        let current = self.next;
        self.next = (self.next + 1) % self.files.len();
        Some(&self.files[current])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_of_life::create_example_patterns;
    use tempfile::tempdir;

    #[test]
    fn test_cycle_wraps_in_name_order() {
        let temp_dir = tempdir().unwrap();
        create_example_patterns(temp_dir.path()).unwrap();
        std::fs::write(temp_dir.path().join("notes.md"), "ignored").unwrap();

        let mut cycle = PatternCycle::from_directory(temp_dir.path()).unwrap();
        assert_eq!(cycle.len(), 5);

        let names: Vec<String> = (0..6)
            .map(|_| {
                let path = cycle.next_pattern().unwrap();
                path.file_name().unwrap().to_string_lossy().into_owned()
            })
            .collect();
        assert_eq!(
            names,
            ["beacon.txt", "blinker.txt", "block.txt", "glider.txt", "toad.txt", "beacon.txt"]
        );
    }

    #[test]
    fn test_empty_cycle() {
        let mut cycle = PatternCycle::default();
        assert!(cycle.is_empty());
        assert!(cycle.next_pattern().is_none());
    }

    #[test]
    fn test_missing_directory_is_error() {
        let temp_dir = tempdir().unwrap();
        assert!(PatternCycle::from_directory(temp_dir.path().join("nope")).is_err());
    }
}
