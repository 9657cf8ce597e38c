#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure gesture system that unifies heterogeneous input modalities.
//!
//! Mouse press-drag-release, touch press-move-release, and discrete tap
//! sequences all reduce to the same three abstract actions: start a
//! selection, extend it, end it. Each input modality is a thin adapter
//! producing [`GestureInput`] values; the state machine below stays
//! input-agnostic and responds exclusively with command batches.

use nird_crash_core::{Cell, Command, LetterGrid, MIN_WORD_LEN};
use nird_crash_system_selection::{PathCentroid, SelectionPath};

/// Normalized input actions produced by the adapter's event handlers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GestureInput {
    /// A pointer or touch pressed down on a cell, starting a drag.
    Press {
        /// Cell under the pointer when the press began.
        cell: Cell,
    },
    /// The pointer entered a cell while a drag is in progress.
    Enter {
        /// Cell the pointer moved onto.
        cell: Cell,
    },
    /// The pointer or touch was released, ending the drag.
    Release,
    /// The pointer left the grid entirely while a gesture was in progress.
    Leave,
    /// A discrete tap on a cell, used by the accessibility click mode.
    Tap {
        /// Cell that was tapped.
        cell: Cell,
    },
    /// The explicit validate control was pressed.
    Submit,
    /// The explicit clear control was pressed.
    Clear,
}

/// Snapshot of the last committed selection, kept for effect placement.
#[derive(Clone, Debug, PartialEq)]
pub struct CommitMark {
    /// Word that was committed for resolution.
    pub word: String,
    /// Geometric centre of the committed path.
    pub centroid: PathCentroid,
}

/// Gesture state machine that drives the selection path tracker and emits
/// word commit commands.
#[derive(Clone, Debug, Default)]
pub struct Gesture {
    path: SelectionPath,
    dragging: bool,
    last_commit: Option<CommitMark>,
}

impl Gesture {
    /// Creates a new gesture system with an empty selection.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            path: SelectionPath::new(),
            dragging: false,
            last_commit: None,
        }
    }

    /// Consumes normalized inputs and emits commit commands.
    ///
    /// A start action always begins a new path regardless of any in-progress
    /// one; extend actions without a preceding start are ignored; ending a
    /// gesture commits the derived word only when it reaches the minimum
    /// playable length, otherwise the path is discarded silently.
    pub fn handle(&mut self, inputs: &[GestureInput], grid: &LetterGrid, out: &mut Vec<Command>) {
        for input in inputs {
            match *input {
                GestureInput::Press { cell } => {
                    self.dragging = true;
                    self.path.start(cell, grid);
                }
                GestureInput::Enter { cell } => {
                    if self.dragging {
                        let _ = self.path.extend(cell, grid);
                    }
                }
                GestureInput::Release => {
                    if self.dragging {
                        self.dragging = false;
                        self.commit(out);
                    }
                }
                GestureInput::Leave => {
                    // A pointer escaping the grid must not leave a stuck
                    // selection behind.
                    if self.dragging {
                        self.dragging = false;
                        self.commit(out);
                    }
                }
                GestureInput::Tap { cell } => self.tap(cell, grid),
                GestureInput::Submit => {
                    self.dragging = false;
                    self.commit(out);
                }
                GestureInput::Clear => {
                    self.dragging = false;
                    self.path.reset();
                }
            }
        }
    }

    /// Selection path currently tracked by the gesture.
    #[must_use]
    pub fn path(&self) -> &SelectionPath {
        &self.path
    }

    /// Word spelled by the in-progress selection.
    #[must_use]
    pub fn current_word(&self) -> &str {
        self.path.word()
    }

    /// Snapshot of the most recent commit, for effect placement.
    #[must_use]
    pub fn last_commit(&self) -> Option<&CommitMark> {
        self.last_commit.as_ref()
    }

    fn tap(&mut self, cell: Cell, grid: &LetterGrid) {
        if self.path.is_empty() {
            self.path.start(cell, grid);
            return;
        }

        if self.path.can_extend(cell) {
            let _ = self.path.extend(cell, grid);
            return;
        }

        // Tapping the sole selected cell again cancels the selection.
        if self.path.len() == 1 && self.path.cells() == [cell] {
            self.path.reset();
        }
    }

    /// Shared commit path for drag-release and the explicit validate control:
    /// both submit with identical validation.
    fn commit(&mut self, out: &mut Vec<Command>) {
        if self.path.len() >= MIN_WORD_LEN {
            if let Some(centroid) = self.path.centroid() {
                let word = self.path.word().to_owned();
                self.last_commit = Some(CommitMark {
                    word: word.clone(),
                    centroid,
                });
                out.push(Command::CommitWord { word });
            }
        }
        self.path.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::{Gesture, GestureInput};
    use nird_crash_core::{Cell, Command, LetterGrid};

    fn grid(rows: &[&str]) -> LetterGrid {
        let rows: Vec<Vec<char>> = rows.iter().map(|row| row.chars().collect()).collect();
        LetterGrid::from_rows(&rows).expect("test grid")
    }

    fn drive(gesture: &mut Gesture, grid: &LetterGrid, inputs: &[GestureInput]) -> Vec<Command> {
        let mut out = Vec::new();
        gesture.handle(inputs, grid, &mut out);
        out
    }

    #[test]
    fn drag_across_three_cells_commits_the_word() {
        let letters = grid(&["CA", "TS"]);
        let mut gesture = Gesture::new();
        let commands = drive(
            &mut gesture,
            &letters,
            &[
                GestureInput::Press { cell: Cell::new(0, 0) },
                GestureInput::Enter { cell: Cell::new(0, 1) },
                GestureInput::Enter { cell: Cell::new(1, 0) },
                GestureInput::Release,
            ],
        );
        assert_eq!(
            commands,
            vec![Command::CommitWord {
                word: "CAT".to_owned()
            }]
        );
        assert!(gesture.path().is_empty());

        let mark = gesture.last_commit().expect("commit mark");
        assert_eq!(mark.word, "CAT");
        assert!((mark.centroid.row - 1.0 / 3.0).abs() < f32::EPSILON);
    }

    #[test]
    fn short_release_discards_without_commit() {
        let letters = grid(&["CA", "TS"]);
        let mut gesture = Gesture::new();
        let commands = drive(
            &mut gesture,
            &letters,
            &[
                GestureInput::Press { cell: Cell::new(0, 0) },
                GestureInput::Enter { cell: Cell::new(0, 1) },
                GestureInput::Release,
            ],
        );
        assert!(commands.is_empty());
        assert!(gesture.path().is_empty());
        assert!(gesture.last_commit().is_none());
    }

    #[test]
    fn enter_and_release_without_press_are_ignored() {
        let letters = grid(&["CA", "TS"]);
        let mut gesture = Gesture::new();
        let commands = drive(
            &mut gesture,
            &letters,
            &[
                GestureInput::Enter { cell: Cell::new(0, 0) },
                GestureInput::Release,
            ],
        );
        assert!(commands.is_empty());
        assert!(gesture.path().is_empty());
    }

    #[test]
    fn press_supersedes_an_unfinished_gesture() {
        let letters = grid(&["CA", "TS"]);
        let mut gesture = Gesture::new();
        let commands = drive(
            &mut gesture,
            &letters,
            &[
                GestureInput::Press { cell: Cell::new(0, 0) },
                GestureInput::Enter { cell: Cell::new(0, 1) },
                GestureInput::Press { cell: Cell::new(1, 1) },
            ],
        );
        assert!(commands.is_empty());
        assert_eq!(gesture.current_word(), "S");
    }

    #[test]
    fn leaving_the_grid_ends_the_gesture() {
        let letters = grid(&["CA", "TS"]);
        let mut gesture = Gesture::new();
        let commands = drive(
            &mut gesture,
            &letters,
            &[
                GestureInput::Press { cell: Cell::new(0, 0) },
                GestureInput::Enter { cell: Cell::new(0, 1) },
                GestureInput::Enter { cell: Cell::new(1, 0) },
                GestureInput::Leave,
            ],
        );
        assert_eq!(
            commands,
            vec![Command::CommitWord {
                word: "CAT".to_owned()
            }]
        );
        assert!(gesture.path().is_empty());
    }

    #[test]
    fn tap_sequence_builds_and_submit_commits() {
        let letters = grid(&["CA", "TS"]);
        let mut gesture = Gesture::new();
        let commands = drive(
            &mut gesture,
            &letters,
            &[
                GestureInput::Tap { cell: Cell::new(0, 0) },
                GestureInput::Tap { cell: Cell::new(0, 1) },
                GestureInput::Tap { cell: Cell::new(1, 0) },
                GestureInput::Submit,
            ],
        );
        assert_eq!(
            commands,
            vec![Command::CommitWord {
                word: "CAT".to_owned()
            }]
        );
    }

    #[test]
    fn tapping_the_sole_cell_again_cancels() {
        let letters = grid(&["CA", "TS"]);
        let mut gesture = Gesture::new();
        let commands = drive(
            &mut gesture,
            &letters,
            &[
                GestureInput::Tap { cell: Cell::new(0, 0) },
                GestureInput::Tap { cell: Cell::new(0, 0) },
            ],
        );
        assert!(commands.is_empty());
        assert!(gesture.path().is_empty());
    }

    #[test]
    fn invalid_tap_extension_is_ignored() {
        let letters = grid(&["CAR", "TSE", "NUX"]);
        let mut gesture = Gesture::new();
        let commands = drive(
            &mut gesture,
            &letters,
            &[
                GestureInput::Tap { cell: Cell::new(0, 0) },
                GestureInput::Tap { cell: Cell::new(0, 1) },
                GestureInput::Tap { cell: Cell::new(2, 2) },
            ],
        );
        assert!(commands.is_empty());
        assert_eq!(gesture.current_word(), "CA");
    }

    #[test]
    fn clear_resets_the_selection() {
        let letters = grid(&["CA", "TS"]);
        let mut gesture = Gesture::new();
        let commands = drive(
            &mut gesture,
            &letters,
            &[
                GestureInput::Press { cell: Cell::new(0, 0) },
                GestureInput::Enter { cell: Cell::new(0, 1) },
                GestureInput::Clear,
                GestureInput::Release,
            ],
        );
        assert!(commands.is_empty());
        assert!(gesture.path().is_empty());
    }

    #[test]
    fn submit_without_enough_letters_is_a_no_op() {
        let letters = grid(&["CA", "TS"]);
        let mut gesture = Gesture::new();
        let commands = drive(
            &mut gesture,
            &letters,
            &[
                GestureInput::Tap { cell: Cell::new(0, 0) },
                GestureInput::Submit,
            ],
        );
        assert!(commands.is_empty());
        assert!(gesture.path().is_empty());
    }
}
