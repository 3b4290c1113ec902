//! Display and output formatting utilities

use crate::game_of_life::Board;

/// Format boards for console output
pub struct BoardFormatter;

impl BoardFormatter {
    /// Grid as `'#'`/`'.'` rows
    pub fn format_board(board: &Board) -> String {
        board.to_string()
    }

    /// Live-cell and symmetry counters shown under the grid
    pub fn format_status(board: &Board) -> String {
        format!(
            "Live cells: {}\nSymmetric elements: {}\n",
            board.count_live_cells(),
            board.count_symmetric_elements()
        )
    }

    /// Format a board with coordinates
    pub fn format_board_with_coords(board: &Board) -> String {
        let mut output = String::new();

        // Header with column numbers
        output.push_str("   ");
        for x in 0..board.columns() {
            output.push_str(&format!("{}", x % 10));
        }
        output.push('\n');

        // Rows with row numbers
        for y in 0..board.rows() {
            output.push_str(&format!("{:2} ", y));
            for x in 0..board.columns() {
                output.push(if board.is_alive(x, y) { '#' } else { '.' });
            }
            output.push('\n');
        }

        output
    }

    /// Key legend for the interactive loop
    pub fn format_help() -> &'static str {
        "[N]ext pattern  [S]ave  [L]oad  [A] stability  [Y] symmetry  [Q]uit  other: step\n"
    }

    /// Convert `\n` to `\r\n` for a terminal in raw mode
    pub fn to_raw_lines(text: &str) -> String {
        text.replace('\n', "\r\n")
    }
}

/// Color output utilities
pub struct ColorOutput;

impl ColorOutput {
    /// Format text with color (if terminal supports it)
    pub fn colored(text: &str, color: Color) -> String {
        if Self::supports_color() {
            format!("\x1b[{}m{}\x1b[0m", color.code(), text)
        } else {
            text.to_string()
        }
    }

    /// Check if terminal supports color
    fn supports_color() -> bool {
        std::env::var("NO_COLOR").is_err()
            && (std::env::var("TERM").unwrap_or_default() != "dumb")
    }

    pub fn success(text: &str) -> String {
        Self::colored(text, Color::Green)
    }

    pub fn error(text: &str) -> String {
        Self::colored(text, Color::Red)
    }

    pub fn warning(text: &str) -> String {
        Self::colored(text, Color::Yellow)
    }

    pub fn info(text: &str) -> String {
        Self::colored(text, Color::Blue)
    }
}

#[derive(Debug, Clone, Copy)]
pub enum Color {
    Red,
    Green,
    Yellow,
    Blue,
}

impl Color {
    fn code(self) -> u8 {
        match self {
            Color::Red => 31,
            Color::Green => 32,
            Color::Yellow => 33,
            Color::Blue => 34,
        }
    }
}
