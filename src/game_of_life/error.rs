//! Errors raised by board operations

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BoardError {
    #[error("cell ({x}, {y}) is outside the {columns}x{rows} board")]
    OutOfBounds {
        x: usize,
        y: usize,
        columns: usize,
        rows: usize,
    },

    #[error("frame file not found: {}", path.display())]
    FrameNotFound { path: PathBuf },

    #[error("I/O error on frame file {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl BoardError {
    /// Map an I/O error on `path`, keeping not-found distinct
    pub(crate) fn from_io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        if source.kind() == std::io::ErrorKind::NotFound {
            BoardError::FrameNotFound { path }
        } else {
            BoardError::Io { path, source }
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, BoardError::FrameNotFound { .. })
    }
}
