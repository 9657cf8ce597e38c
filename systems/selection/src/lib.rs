#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Selection path tracking across a letter grid.
//!
//! A path is an ordered sequence of distinct cells where every consecutive
//! pair touches in one of the eight directions. Each proposed extension is
//! validated immediately rather than at commit time, so the presentation
//! layer can highlight valid steps and silently drop diagonal jumps caused by
//! fast pointer movement skipping intermediate cells.

use nird_crash_core::{Cell, LetterGrid};

/// Geometric centre of a selection path, used only for effect placement.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PathCentroid {
    /// Average row index across the path's cells.
    pub row: f32,
    /// Average column index across the path's cells.
    pub col: f32,
}

/// Ordered sequence of selected, non-repeating, adjacent cells and the word
/// they spell.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SelectionPath {
    cells: Vec<Cell>,
    word: String,
}

impl SelectionPath {
    /// Creates a new, empty selection path.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            cells: Vec::new(),
            word: String::new(),
        }
    }

    /// Begins a new path anchored at the provided cell.
    ///
    /// Any in-progress path is discarded: a new gesture supersedes an
    /// incomplete one without requiring explicit cancellation. Cells outside
    /// the grid are ignored and leave the path empty.
    pub fn start(&mut self, cell: Cell, grid: &LetterGrid) {
        self.reset();
        if let Some(letter) = grid.letter(cell) {
            self.cells.push(cell);
            self.word.push(letter);
        }
    }

    /// Reports whether the path may grow to include the provided cell.
    ///
    /// An empty path accepts any cell; otherwise the cell must touch the
    /// path's last cell and must not already be selected.
    #[must_use]
    pub fn can_extend(&self, cell: Cell) -> bool {
        match self.cells.last() {
            None => true,
            Some(last) => last.is_adjacent(cell) && !self.cells.contains(&cell),
        }
    }

    /// Appends the cell when the extension is valid and in bounds.
    ///
    /// Invalid steps are silently ignored: they are expected during fast
    /// pointer movement and are not an error condition. Returns `true` when
    /// the path grew.
    pub fn extend(&mut self, cell: Cell, grid: &LetterGrid) -> bool {
        if !self.can_extend(cell) {
            return false;
        }
        let Some(letter) = grid.letter(cell) else {
            return false;
        };
        self.cells.push(cell);
        self.word.push(letter);
        true
    }

    /// Word spelled by the path, in selection order.
    #[must_use]
    pub fn word(&self) -> &str {
        &self.word
    }

    /// Cells selected so far, in selection order.
    #[must_use]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Number of cells in the path.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Reports whether the path holds no cells.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Average row and column of the selected cells.
    ///
    /// Presentation-only: the session never consumes this value.
    #[must_use]
    pub fn centroid(&self) -> Option<PathCentroid> {
        if self.cells.is_empty() {
            return None;
        }
        let count = self.cells.len() as f32;
        let row_sum: f32 = self.cells.iter().map(|cell| cell.row() as f32).sum();
        let col_sum: f32 = self.cells.iter().map(|cell| cell.col() as f32).sum();
        Some(PathCentroid {
            row: row_sum / count,
            col: col_sum / count,
        })
    }

    /// Clears the path to empty.
    pub fn reset(&mut self) {
        self.cells.clear();
        self.word.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::SelectionPath;
    use nird_crash_core::{Cell, LetterGrid};

    fn grid(rows: &[&str]) -> LetterGrid {
        let rows: Vec<Vec<char>> = rows.iter().map(|row| row.chars().collect()).collect();
        LetterGrid::from_rows(&rows).expect("test grid")
    }

    #[test]
    fn start_anchors_the_path() {
        let letters = grid(&["CA", "TS"]);
        let mut path = SelectionPath::new();
        path.start(Cell::new(0, 0), &letters);
        assert_eq!(path.word(), "C");
        assert_eq!(path.cells(), &[Cell::new(0, 0)]);
    }

    #[test]
    fn start_supersedes_an_unfinished_path() {
        let letters = grid(&["CA", "TS"]);
        let mut path = SelectionPath::new();
        path.start(Cell::new(0, 0), &letters);
        assert!(path.extend(Cell::new(0, 1), &letters));

        path.start(Cell::new(1, 0), &letters);
        assert_eq!(path.word(), "T");
        assert_eq!(path.len(), 1);
    }

    #[test]
    fn extension_requires_adjacency() {
        let letters = grid(&["CAR", "TSE", "NUX"]);
        let mut path = SelectionPath::new();
        path.start(Cell::new(0, 0), &letters);
        assert!(!path.extend(Cell::new(0, 2), &letters));
        assert!(!path.extend(Cell::new(2, 2), &letters));
        assert_eq!(path.word(), "C");
    }

    #[test]
    fn extension_rejects_already_selected_cells() {
        let letters = grid(&["CA", "TS"]);
        let mut path = SelectionPath::new();
        path.start(Cell::new(0, 0), &letters);
        assert!(path.extend(Cell::new(0, 1), &letters));
        assert!(!path.extend(Cell::new(0, 0), &letters));
        assert_eq!(path.word(), "CA");
    }

    #[test]
    fn derived_word_matches_letters_in_path_order() {
        let letters = grid(&["CA", "TS"]);
        let mut path = SelectionPath::new();
        path.start(Cell::new(0, 0), &letters);
        assert!(path.extend(Cell::new(0, 1), &letters));
        assert!(path.extend(Cell::new(1, 0), &letters));

        let recomputed: String = path
            .cells()
            .iter()
            .map(|&cell| letters.letter(cell).expect("letter"))
            .collect();
        assert_eq!(path.word(), recomputed);
        assert_eq!(path.word(), "CAT");
    }

    #[test]
    fn invariants_hold_after_arbitrary_extension_attempts() {
        let letters = grid(&["ABCD", "EFGH", "IJKL", "MNOP"]);
        let mut path = SelectionPath::new();
        path.start(Cell::new(1, 1), &letters);

        let attempts = [
            Cell::new(0, 0),
            Cell::new(3, 3),
            Cell::new(1, 2),
            Cell::new(1, 1),
            Cell::new(2, 2),
            Cell::new(0, 3),
            Cell::new(2, 3),
            Cell::new(9, 9),
        ];
        for cell in attempts {
            let _ = path.extend(cell, &letters);
        }

        for (index, cell) in path.cells().iter().enumerate() {
            assert_eq!(
                path.cells().iter().filter(|other| *other == cell).count(),
                1,
                "cell {cell:?} appears more than once"
            );
            if index > 0 {
                assert!(path.cells()[index - 1].is_adjacent(*cell));
            }
        }
    }

    #[test]
    fn centroid_averages_rows_and_columns() {
        let letters = grid(&["CA", "TS"]);
        let mut path = SelectionPath::new();
        assert!(path.centroid().is_none());

        path.start(Cell::new(0, 0), &letters);
        assert!(path.extend(Cell::new(0, 1), &letters));
        assert!(path.extend(Cell::new(1, 0), &letters));

        let centroid = path.centroid().expect("centroid");
        assert!((centroid.row - 1.0 / 3.0).abs() < f32::EPSILON);
        assert!((centroid.col - 1.0 / 3.0).abs() < f32::EPSILON);
    }

    #[test]
    fn reset_clears_cells_and_word() {
        let letters = grid(&["CA", "TS"]);
        let mut path = SelectionPath::new();
        path.start(Cell::new(0, 0), &letters);
        path.reset();
        assert!(path.is_empty());
        assert_eq!(path.word(), "");
    }

    #[test]
    fn out_of_grid_cells_are_ignored() {
        let letters = grid(&["CA", "TS"]);
        let mut path = SelectionPath::new();
        path.start(Cell::new(5, 5), &letters);
        assert!(path.is_empty());

        path.start(Cell::new(1, 1), &letters);
        assert!(!path.extend(Cell::new(1, 2), &letters));
        assert_eq!(path.word(), "S");
    }
}
