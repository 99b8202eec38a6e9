use std::collections::{HashMap, HashSet};

use super::Cell;

/// One generation of the board: bounds plus a sparse map of active cells,
/// keyed by x with the set of active y values for that column. Storage cost
/// follows the live population, not m * n.
pub struct Frame {
    m: i64,
    n: i64,
    cell_array: HashMap<i64, HashSet<i64>>,
}

impl Frame {
    /// Bounds are kept verbatim and only ever used as the candidate filter;
    /// off-board input cells are tolerated here and dropped during advance.
    pub fn new(m: i64, n: i64, live_cells: impl IntoIterator<Item = Cell>) -> Self {
        let mut cell_array: HashMap<i64, HashSet<i64>> = HashMap::new();
        for cell in live_cells {
            cell_array.entry(cell.x).or_default().insert(cell.y);
        }
        Self { m, n, cell_array }
    }

    pub fn is_active(&self, cell: Cell) -> bool {
        self.cell_array
            .get(&cell.x)
            .map_or(false, |set_y| set_y.contains(&cell.y))
    }

    fn neighbors(cell: Cell) -> impl Iterator<Item = Cell> {
        (0..9).filter(|&z| z != 4).map(move |z| {
            let x = 1 - z % 3;
            let y = 1 - z / 3;
            Cell::new(cell.x + x, cell.y + y)
        })
    }

    fn on_board(&self, cell: Cell) -> bool {
        0 <= cell.x && cell.x < self.m && 0 <= cell.y && cell.y < self.n
    }

    /// Only cells touching a live cell can change state; everything else
    /// stays dead. Neighborhoods of all live cells, deduplicated, then
    /// clipped to the board.
    pub fn cells_to_investigate(&self) -> Vec<Cell> {
        let mut candidates = HashSet::new();
        for (&x, set_y) in self.cell_array.iter() {
            for &y in set_y.iter() {
                candidates.extend(Self::neighbors(Cell::new(x, y)));
            }
        }
        candidates
            .into_iter()
            .filter(|&cell| self.on_board(cell))
            .collect()
    }

    pub fn surrounding_active(&self, cell: Cell) -> usize {
        Self::neighbors(cell)
            .filter(|&neighbor| self.is_active(neighbor))
            .count()
    }

    /// Applies B3/S23 to every candidate and returns the successor frame,
    /// leaving `self` untouched. A count of 2 keeps a cell only if it is
    /// already active; a count of 3 activates it unconditionally.
    pub fn advance(&self) -> Frame {
        let new_active_cells = self
            .cells_to_investigate()
            .into_iter()
            .filter(|&cell| match self.surrounding_active(cell) {
                2 => self.is_active(cell),
                3 => true,
                _ => false,
            });
        Frame::new(self.m, self.n, new_active_cells)
    }

    pub fn active_cells(&self) -> Vec<Cell> {
        self.cell_array
            .iter()
            .flat_map(|(&x, set_y)| set_y.iter().map(move |&y| Cell::new(x, y)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::{Cell, Frame};

    fn frame(m: i64, n: i64, cells: &[(i64, i64)]) -> Frame {
        Frame::new(m, n, cells.iter().map(|&(x, y)| Cell::new(x, y)))
    }

    fn active_set(frame: &Frame) -> HashSet<(i64, i64)> {
        frame
            .active_cells()
            .into_iter()
            .map(|cell| (cell.x, cell.y))
            .collect()
    }

    #[test]
    fn empty_board_stays_empty() {
        let next = frame(10, 10, &[]).advance();
        assert!(active_set(&next).is_empty());
    }

    #[test]
    fn isolated_cell_dies() {
        let next = frame(10, 10, &[(4, 4)]).advance();
        assert!(active_set(&next).is_empty());
    }

    #[test]
    fn block_is_a_still_life() {
        let block = [(1, 1), (1, 2), (2, 1), (2, 2)];
        let next = frame(4, 4, &block).advance();
        assert_eq!(active_set(&next), block.iter().copied().collect());
    }

    #[test]
    fn l_tromino_births_the_fourth_corner() {
        let next = frame(4, 4, &[(1, 1), (1, 2), (2, 1)]).advance();
        let expected = [(1, 1), (1, 2), (2, 1), (2, 2)].iter().copied().collect();
        assert_eq!(active_set(&next), expected);
    }

    #[test]
    fn single_cell_board_clips_all_neighbors() {
        let next = frame(1, 1, &[(0, 0)]).advance();
        assert!(active_set(&next).is_empty());
    }

    #[test]
    fn advance_leaves_the_source_frame_unchanged() {
        let source = frame(5, 5, &[(1, 1), (1, 2), (2, 1)]);
        let first = active_set(&source.advance());
        let second = active_set(&source.advance());
        assert_eq!(first, second);
        assert_eq!(
            active_set(&source),
            [(1, 1), (1, 2), (2, 1)].iter().copied().collect()
        );
    }

    #[test]
    fn extraction_round_trips_construction() {
        let cells = [(0, 0), (3, 7), (3, 2), (9, 9)];
        let built = frame(10, 10, &cells);
        assert_eq!(active_set(&built), cells.iter().copied().collect());
    }

    #[test]
    fn duplicate_input_cells_collapse() {
        let built = frame(10, 10, &[(2, 2), (2, 2), (2, 2)]);
        assert_eq!(active_set(&built).len(), 1);
    }

    #[test]
    fn non_positive_bounds_give_an_empty_successor() {
        let next = frame(-3, -3, &[(0, 0), (1, 1), (0, 1)]).advance();
        assert!(active_set(&next).is_empty());
    }

    #[test]
    fn off_board_cells_never_become_candidates() {
        let candidates = frame(3, 3, &[(0, 0)]).cells_to_investigate();
        assert!(candidates
            .iter()
            .all(|cell| 0 <= cell.x && cell.x < 3 && 0 <= cell.y && cell.y < 3));
        // (0,0) itself only shows up as a neighbor of its neighbors, never
        // as its own candidate.
        let as_set: HashSet<_> = candidates.iter().map(|c| (c.x, c.y)).collect();
        assert_eq!(
            as_set,
            [(0, 1), (1, 0), (1, 1)].iter().copied().collect::<HashSet<_>>()
        );
    }

    #[test]
    fn neighbor_count_checks_all_eight_positions() {
        let ring = [
            (1, 1), (1, 2), (1, 3),
            (2, 1),         (2, 3),
            (3, 1), (3, 2), (3, 3),
        ];
        let full = frame(5, 5, &ring);
        assert_eq!(full.surrounding_active(Cell::new(2, 2)), 8);
        assert_eq!(full.surrounding_active(Cell::new(0, 0)), 1);
        assert_eq!(frame(5, 5, &[]).surrounding_active(Cell::new(2, 2)), 0);
    }

    #[test]
    fn blinker_oscillates() {
        let next = frame(5, 5, &[(1, 2), (2, 2), (3, 2)]).advance();
        let expected = [(2, 1), (2, 2), (2, 3)].iter().copied().collect();
        assert_eq!(active_set(&next), expected);
    }
}
