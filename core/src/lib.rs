#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the NIRD Crash word-search engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative session, and pure systems. Adapters submit [`Command`] values
//! describing desired mutations, the session executes those commands via its
//! `apply` entry point, and then broadcasts [`Event`] values for the
//! presentation layer to render as toasts, highlights, and effects. Systems
//! consume raw input, query immutable snapshots, and respond exclusively with
//! new command batches.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Minimum number of letters a selection must spell before it may be
/// committed for resolution.
pub const MIN_WORD_LEN: usize = 3;

/// Bonus points awarded for solving a level's riddle.
pub const RIDDLE_BONUS_POINTS: u32 = 50;

/// Location of a single letter cell expressed as row and column coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Cell {
    row: u32,
    col: u32,
}

impl Cell {
    /// Creates a new grid cell coordinate.
    #[must_use]
    pub const fn new(row: u32, col: u32) -> Self {
        Self { row, col }
    }

    /// Zero-based row index of the cell.
    #[must_use]
    pub const fn row(&self) -> u32 {
        self.row
    }

    /// Zero-based column index of the cell.
    #[must_use]
    pub const fn col(&self) -> u32 {
        self.col
    }

    /// Reports whether two cells touch in any of the eight directions.
    ///
    /// Two cells are adjacent when their rows and columns each differ by at
    /// most one and the cells are not the same position.
    #[must_use]
    pub fn is_adjacent(self, other: Cell) -> bool {
        let row_diff = self.row.abs_diff(other.row);
        let col_diff = self.col.abs_diff(other.col);
        row_diff <= 1 && col_diff <= 1 && self != other
    }
}

/// Rectangular grid of letters assigned at level load and fixed during play.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LetterGrid {
    rows: u32,
    cols: u32,
    letters: Vec<char>,
}

impl LetterGrid {
    /// Builds a grid from row-major letter rows.
    ///
    /// Returns `None` when the input is empty, ragged, or contains
    /// whitespace placeholders, so callers can reject malformed level
    /// configuration without panicking.
    #[must_use]
    pub fn from_rows(rows: &[Vec<char>]) -> Option<Self> {
        let first = rows.first()?;
        if first.is_empty() {
            return None;
        }

        let width = first.len();
        let mut letters = Vec::with_capacity(width * rows.len());
        for row in rows {
            if row.len() != width {
                return None;
            }
            for &letter in row {
                if letter.is_whitespace() {
                    return None;
                }
                letters.push(letter);
            }
        }

        let cols = u32::try_from(width).ok()?;
        let row_count = u32::try_from(rows.len()).ok()?;
        Some(Self {
            rows: row_count,
            cols,
            letters,
        })
    }

    /// Number of rows contained in the grid.
    #[must_use]
    pub const fn rows(&self) -> u32 {
        self.rows
    }

    /// Number of columns contained in the grid.
    #[must_use]
    pub const fn cols(&self) -> u32 {
        self.cols
    }

    /// Reports whether the cell lies within the grid bounds.
    #[must_use]
    pub fn contains(&self, cell: Cell) -> bool {
        cell.row() < self.rows && cell.col() < self.cols
    }

    /// Returns the letter stored at the provided cell, if in bounds.
    #[must_use]
    pub fn letter(&self, cell: Cell) -> Option<char> {
        self.index(cell).and_then(|index| self.letters.get(index).copied())
    }

    /// Iterator over the grid rows in top-to-bottom order.
    pub fn iter_rows(&self) -> impl Iterator<Item = &[char]> {
        self.letters.chunks(self.cols as usize)
    }

    fn index(&self, cell: Cell) -> Option<usize> {
        if !self.contains(cell) {
            return None;
        }
        let row = usize::try_from(cell.row()).ok()?;
        let col = usize::try_from(cell.col()).ok()?;
        let width = usize::try_from(self.cols).ok()?;
        Some(row * width + col)
    }
}

/// Unique identifier assigned to a level.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LevelId(u32);

impl LevelId {
    /// Creates a new level identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// A target word with its base score value.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelWord {
    word: String,
    points: u32,
}

impl LevelWord {
    /// Creates a new target word descriptor.
    #[must_use]
    pub fn new(word: impl Into<String>, points: u32) -> Self {
        Self {
            word: word.into(),
            points,
        }
    }

    /// Target word as written in the level configuration.
    #[must_use]
    pub fn word(&self) -> &str {
        &self.word
    }

    /// Base points awarded when the word is found.
    #[must_use]
    pub const fn points(&self) -> u32 {
        self.points
    }
}

/// Optional riddle attached to a level for bonus points.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Riddle {
    prompt: String,
    answer: String,
}

impl Riddle {
    /// Creates a new riddle with the provided prompt and expected answer.
    #[must_use]
    pub fn new(prompt: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            answer: answer.into(),
        }
    }

    /// Question shown to the player.
    #[must_use]
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    /// Expected answer, compared after normalization.
    #[must_use]
    pub fn answer(&self) -> &str {
        &self.answer
    }
}

/// Immutable configuration of a level: its letter grid, target word list,
/// completion threshold, and optional riddle.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelConfig {
    id: LevelId,
    grid_letters: Vec<Vec<char>>,
    words: Vec<LevelWord>,
    required_words: u32,
    #[serde(default)]
    riddle: Option<Riddle>,
}

impl LevelConfig {
    /// Creates a new level configuration.
    #[must_use]
    pub fn new(
        id: LevelId,
        grid_letters: Vec<Vec<char>>,
        words: Vec<LevelWord>,
        required_words: u32,
        riddle: Option<Riddle>,
    ) -> Self {
        Self {
            id,
            grid_letters,
            words,
            required_words,
            riddle,
        }
    }

    /// Identifier of the level.
    #[must_use]
    pub const fn id(&self) -> LevelId {
        self.id
    }

    /// Row-major letter layout of the grid.
    #[must_use]
    pub fn grid_letters(&self) -> &[Vec<char>] {
        &self.grid_letters
    }

    /// Target words the player may find in this level.
    #[must_use]
    pub fn words(&self) -> &[LevelWord] {
        &self.words
    }

    /// Number of found words that completes the level.
    #[must_use]
    pub const fn required_words(&self) -> u32 {
        self.required_words
    }

    /// Riddle configured for the level, if any.
    #[must_use]
    pub fn riddle(&self) -> Option<&Riddle> {
        self.riddle.as_ref()
    }

    /// Classifies the configuration, reporting the first defect found.
    ///
    /// The session uses this as its load guard: a rejected configuration
    /// leaves the session untouched.
    pub fn validate(&self) -> Result<(), LevelConfigError> {
        if LetterGrid::from_rows(&self.grid_letters).is_none() {
            return Err(LevelConfigError::MalformedGrid);
        }

        if self.words.is_empty() {
            return Err(LevelConfigError::NoWords);
        }

        let mut seen: Vec<String> = Vec::with_capacity(self.words.len());
        for word in &self.words {
            let normalized = normalize_word(word.word());
            if normalized.chars().count() < MIN_WORD_LEN {
                return Err(LevelConfigError::WordTooShort);
            }
            if word.points() == 0 {
                return Err(LevelConfigError::ZeroPointWord);
            }
            if seen.contains(&normalized) {
                return Err(LevelConfigError::DuplicateWord);
            }
            seen.push(normalized);
        }

        if self.required_words == 0 {
            return Err(LevelConfigError::ZeroRequired);
        }

        if self.required_words as usize > self.words.len() {
            return Err(LevelConfigError::RequiredBeyondWordCount);
        }

        Ok(())
    }
}

/// Reasons a level configuration may be rejected at load time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LevelConfigError {
    /// The letter grid is empty, ragged, or holds whitespace placeholders.
    MalformedGrid,
    /// The target word list is empty.
    NoWords,
    /// A target word normalizes to fewer letters than the playable minimum.
    WordTooShort,
    /// A target word carries no points.
    ZeroPointWord,
    /// Two target words normalize to the same string.
    DuplicateWord,
    /// The completion threshold is zero, so the level would complete instantly.
    ZeroRequired,
    /// The completion threshold exceeds the number of target words.
    RequiredBeyondWordCount,
}

/// Describes the active phase of a game session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Phase {
    /// No level is loaded; gestures and commits are ignored.
    Idle,
    /// A level is loaded and the session accepts word commits.
    Playing,
    /// The completion threshold was reached; terminal for the session.
    LevelComplete,
}

/// Reasons a committed word was rejected by the resolver.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RejectReason {
    /// The word was already found earlier in this session.
    AlreadyFound,
    /// The word does not appear in the level's target list.
    NotInLevel,
}

/// Summary emitted when a level completes, consumed by the profile store.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionSummary {
    /// Final score accumulated during the level.
    pub score: u32,
    /// Normalized words found, in discovery order.
    pub words_found: Vec<String>,
    /// Star rating earned for the level.
    pub stars: u8,
    /// Indicates whether the level's riddle was solved.
    pub riddle_solved: bool,
}

/// Commands that express all permissible session mutations.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// Loads a level, resetting all per-level session state.
    LoadLevel {
        /// Configuration of the level to start.
        config: LevelConfig,
    },
    /// Discards the active session and returns to the idle phase.
    UnloadLevel,
    /// Advances the session clock by the provided delta time.
    Tick {
        /// Duration of wall-clock time that elapsed since the previous tick.
        dt: Duration,
    },
    /// Commits a candidate word assembled by the selection tracker.
    CommitWord {
        /// Word spelled by the committed selection path.
        word: String,
    },
    /// Submits an answer to the level's riddle.
    AnswerRiddle {
        /// Player-provided answer, compared after normalization.
        answer: String,
    },
}

/// Events broadcast by the session after processing commands.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    /// Confirms that a level was loaded and play began.
    LevelLoaded {
        /// Identifier of the loaded level.
        level_id: LevelId,
    },
    /// Reports that a level configuration was rejected without mutation.
    LevelRejected {
        /// Identifier carried by the rejected configuration.
        level_id: LevelId,
        /// Specific defect that caused the rejection.
        reason: LevelConfigError,
    },
    /// Confirms that the active session was discarded.
    LevelUnloaded,
    /// Indicates that the session clock advanced.
    TimeAdvanced {
        /// Duration of wall-clock time that elapsed in the tick.
        dt: Duration,
    },
    /// Confirms that a committed word matched a target word.
    WordAccepted {
        /// Normalized word that matched.
        word: String,
        /// Base points carried by the matched target word.
        base_points: u32,
        /// Combo multiplier in effect for this match.
        multiplier: u32,
        /// Points added to the score: base points times multiplier.
        awarded_points: u32,
    },
    /// Reports that a committed word was classified as a no-op.
    WordRejected {
        /// Normalized word that was rejected.
        word: String,
        /// Classification of the rejection.
        reason: RejectReason,
    },
    /// Announces that the combo multiplier decayed after idle time.
    ComboExpired,
    /// Confirms that the level's riddle was answered correctly.
    RiddleSolved {
        /// Bonus points added to the score.
        bonus_points: u32,
    },
    /// Reports that a riddle answer did not match.
    RiddleRejected,
    /// Announces that the completion threshold was reached.
    LevelCompleted {
        /// Final statistics for the completed level.
        summary: CompletionSummary,
    },
}

/// Normalizes a candidate word for resolution: trimmed and uppercased.
#[must_use]
pub fn normalize_word(word: &str) -> String {
    word.trim().to_uppercase()
}

/// Computes the star rating for a completed level.
///
/// The rating is a deterministic function of the completion ratio: finding
/// every word earns three stars, three quarters earns two, half earns one.
/// A level with no target words rates zero stars.
#[must_use]
pub fn star_rating(words_found: usize, total_words: usize) -> u8 {
    if total_words == 0 {
        return 0;
    }

    let ratio = words_found as f64 / total_words as f64;
    if ratio >= 1.0 {
        3
    } else if ratio >= 0.75 {
        2
    } else if ratio >= 0.5 {
        1
    } else {
        0
    }
}
