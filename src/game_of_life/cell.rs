//! Single automaton cell

/// Number of neighbor slots every cell carries (Moore neighborhood)
pub const NEIGHBOR_COUNT: usize = 8;

/// One cell of the board.
///
/// Neighbors are flat indices into the arena owned by the board, so cells
/// never hold references to each other.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    pub alive: bool,
    pending_alive: bool,
    neighbors: [usize; NEIGHBOR_COUNT],
}

impl Cell {
    /// Create a dead cell wired to the given neighbor indices
    pub fn new(neighbors: [usize; NEIGHBOR_COUNT]) -> Self {
        Self {
            alive: false,
            pending_alive: false,
            neighbors,
        }
    }

    /// Neighbor indices in wiring order
    pub fn neighbors(&self) -> &[usize; NEIGHBOR_COUNT] {
        &self.neighbors
    }

    /// Count committed live neighbors, resolving indices through `cells`
    pub fn live_neighbors(&self, cells: &[Cell]) -> usize {
        self.neighbors
            .iter()
            .filter(|&&index| cells[index].alive)
            .count()
    }

    /// Conway's rule: survive on 2 or 3, birth on exactly 3
    pub fn next_state(alive: bool, live_neighbors: usize) -> bool {
        matches!((alive, live_neighbors), (true, 2) | (true, 3) | (false, 3))
    }

    /// Stage the next-generation state from a neighbor census.
    /// `alive` is left untouched until [`Cell::commit`].
    pub fn determine_next_state(&mut self, live_neighbors: usize) {
        self.pending_alive = Self::next_state(self.alive, live_neighbors);
    }

    pub fn commit(&mut self) {
        self.alive = self.pending_alive;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rule_logic() {
        assert!(Cell::next_state(true, 2));
        assert!(Cell::next_state(true, 3));
        assert!(Cell::next_state(false, 3));
        assert!(!Cell::next_state(true, 1));
        assert!(!Cell::next_state(true, 4));
        assert!(!Cell::next_state(false, 2));
        assert!(!Cell::next_state(false, 8));
    }

    #[test]
    fn test_pending_state_is_not_visible_until_commit() {
        let mut cell = Cell::new([0; NEIGHBOR_COUNT]);
        cell.determine_next_state(3);
        assert!(!cell.alive);

        cell.commit();
        assert!(cell.alive);

        cell.determine_next_state(1);
        assert!(cell.alive);
        cell.commit();
        assert!(!cell.alive);
    }

    #[test]
    fn test_live_neighbor_census() {
        let mut cells: Vec<Cell> = (0..9).map(|_| Cell::new([0; NEIGHBOR_COUNT])).collect();
        cells[1].alive = true;
        cells[2].alive = true;
        cells[4].alive = true;

        let probe = Cell::new([1, 2, 3, 4, 5, 6, 7, 8]);
        assert_eq!(probe.live_neighbors(&cells), 3);

        // Repeated slots count once per slot
        let repeated = Cell::new([1; NEIGHBOR_COUNT]);
        assert_eq!(repeated.live_neighbors(&cells), 8);
    }
}
