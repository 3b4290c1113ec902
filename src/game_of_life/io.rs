//! Plain-text frame persistence
//!
//! One line per row, `'*'` for a live cell and `' '` for a dead one. No
//! header: the board's own dimensions decide how much of a file is used.

use super::{Board, BoardError};
use anyhow::{Context, Result};
use std::path::Path;

const ALIVE: char = '*';
const DEAD: char = ' ';

/// Write the board as a frame, overwriting `path`
pub fn save_state<P: AsRef<Path>>(board: &Board, path: P) -> Result<(), BoardError> {
    let path = path.as_ref();

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| BoardError::from_io(parent, e))?;
    }
    std::fs::write(path, frame_to_string(board)).map_err(|e| BoardError::from_io(path, e))?;

    tracing::info!(path = %path.display(), live = board.count_live_cells(), "frame saved");
    Ok(())
}

/// Overlay a saved frame onto the board.
///
/// The whole file is read before any cell changes, so a failure leaves the
/// board as it was. Cells outside the file's extent keep their state.
pub fn load_state<P: AsRef<Path>>(board: &mut Board, path: P) -> Result<(), BoardError> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|e| BoardError::from_io(path, e))?;

    apply_frame(board, &content);
    tracing::info!(path = %path.display(), live = board.count_live_cells(), "frame loaded");
    Ok(())
}

/// Encode the board as frame text
pub fn frame_to_string(board: &Board) -> String {
    let mut result = String::with_capacity(board.rows() * (board.columns() + 1));

    for y in 0..board.rows() {
        for x in 0..board.columns() {
            result.push(if board.is_alive(x, y) { ALIVE } else { DEAD });
        }
        result.push('\n');
    }

    result
}

/// Apply frame text to the board, clipped to both extents
pub fn apply_frame(board: &mut Board, content: &str) {
    let (columns, rows) = (board.columns(), board.rows());

    for (y, line) in content.lines().take(rows).enumerate() {
        for (x, ch) in line.chars().take(columns).enumerate() {
            // Indices are clipped above
            let _ = board.set_alive(x, y, ch == ALIVE);
        }
    }
}

/// Write the predefined pattern frames used by the pattern cycle
pub fn create_example_patterns<P: AsRef<Path>>(output_dir: P) -> Result<()> {
    let dir = output_dir.as_ref();
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create directory: {}", dir.display()))?;

    let patterns: [(&str, &str); 5] = [
        ("beacon.txt", "\n **\n **\n   **\n   **\n"),
        ("blinker.txt", "\n\n  ***\n"),
        ("block.txt", "\n **\n **\n"),
        ("glider.txt", "\n   *\n * *\n  **\n"),
        ("toad.txt", "\n\n  ***\n ***\n"),
    ];

    for (name, content) in patterns {
        std::fs::write(dir.join(name), content)
            .with_context(|| format!("Failed to write {}", name))?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn empty_board(columns: usize, rows: usize) -> Board {
        Board::with_seed(columns, rows, 1, 0.0, 0)
    }

    #[test]
    fn test_frame_to_string() {
        let mut board = empty_board(3, 3);
        board.set_alive(1, 0, true).unwrap();
        board.set_alive(0, 1, true).unwrap();
        board.set_alive(2, 1, true).unwrap();

        assert_eq!(frame_to_string(&board), " * \n* *\n   \n");
    }

    #[test]
    fn test_save_load_round_trip() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("frame.txt");

        let original = Board::with_seed(12, 7, 1, 0.4, 9);
        save_state(&original, &path).unwrap();

        let mut restored = Board::with_seed(12, 7, 1, 0.6, 10);
        load_state(&mut restored, &path).unwrap();

        assert_eq!(original.snapshot(), restored.snapshot());
    }

    #[test]
    fn test_save_writes_exact_extent() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("nested/dir/frame.txt");

        let board = Board::with_seed(6, 4, 1, 0.5, 3);
        save_state(&board, &path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.split_terminator('\n').collect();
        assert_eq!(lines.len(), 4);
        assert!(lines.iter().all(|line| line.chars().count() == 6));
        assert!(content.ends_with('\n'));
    }

    #[test]
    fn test_load_missing_file_leaves_board_untouched() {
        let temp_dir = tempdir().unwrap();
        let mut board = Board::with_seed(8, 8, 1, 0.5, 77);
        let before = board.snapshot();

        let err = load_state(&mut board, temp_dir.path().join("absent.txt")).unwrap_err();

        assert!(err.is_not_found());
        assert_eq!(board.snapshot(), before);
    }

    #[test]
    fn test_load_does_not_reset_outside_extent() {
        let mut board = Board::with_seed(4, 3, 1, 1.0, 0);

        // Short first line, one missing line
        apply_frame(&mut board, "* \n  * *  \n");

        assert!(board.is_alive(0, 0));
        assert!(!board.is_alive(1, 0));
        assert!(board.is_alive(2, 0));
        assert!(board.is_alive(3, 0));

        assert!(!board.is_alive(0, 1));
        assert!(!board.is_alive(1, 1));
        assert!(board.is_alive(2, 1));
        assert!(!board.is_alive(3, 1));

        assert!((0..4).all(|x| board.is_alive(x, 2)));
    }

    #[test]
    fn test_load_accepts_crlf_and_other_characters_as_dead() {
        let mut board = Board::with_seed(3, 2, 1, 1.0, 0);
        apply_frame(&mut board, "*x*\r\n.*.\r\n");

        assert_eq!(board.live_positions(), vec![(0, 0), (2, 0), (1, 1)]);
    }

    #[test]
    fn test_create_example_patterns() {
        let temp_dir = tempdir().unwrap();
        create_example_patterns(temp_dir.path()).unwrap();

        for name in ["beacon.txt", "blinker.txt", "block.txt", "glider.txt", "toad.txt"] {
            assert!(temp_dir.path().join(name).exists(), "{name}");
        }

        let mut board = empty_board(8, 8);
        load_state(&mut board, temp_dir.path().join("glider.txt")).unwrap();
        assert_eq!(board.count_live_cells(), 5);

        let mut board = empty_board(8, 8);
        load_state(&mut board, temp_dir.path().join("block.txt")).unwrap();
        board.advance();
        assert_eq!(board.live_positions(), vec![(1, 1), (2, 1), (1, 2), (2, 2)]);
    }
}
