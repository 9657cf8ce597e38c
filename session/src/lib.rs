#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative per-level session state for NIRD Crash.
//!
//! The session owns everything mutable during a level playthrough: the
//! found-word list, the score, the combo state, and the phase machine. All
//! mutation flows through [`apply`], which consumes [`Command`] values and
//! broadcasts [`Event`] values describing what happened. Every invalid input
//! is absorbed by an early-return guard that leaves the session untouched;
//! there is no exception-based error flow.

use std::time::Duration;

use nird_crash_core::{
    normalize_word, star_rating, Command, CompletionSummary, Event, LetterGrid, LevelConfig,
    LevelId, LevelWord, Phase, RejectReason, Riddle, MIN_WORD_LEN, RIDDLE_BONUS_POINTS,
};
use nird_crash_system_scoring::ComboState;

/// Level configuration resolved into its playable form at load time.
#[derive(Clone, Debug)]
struct LoadedLevel {
    id: LevelId,
    grid: LetterGrid,
    words: Vec<LevelWord>,
    required_words: usize,
    riddle: Option<Riddle>,
}

/// Represents the authoritative state of one level playthrough.
#[derive(Clone, Debug)]
pub struct Session {
    phase: Phase,
    clock: Duration,
    level: Option<LoadedLevel>,
    found_words: Vec<String>,
    score: u32,
    combo: ComboState,
    riddle_solved: bool,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    /// Creates a new idle session with no level loaded.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            phase: Phase::Idle,
            clock: Duration::ZERO,
            level: None,
            found_words: Vec::new(),
            score: 0,
            combo: ComboState::new(),
            riddle_solved: false,
        }
    }

    fn reset_for(&mut self, level: LoadedLevel) {
        self.phase = Phase::Playing;
        self.clock = Duration::ZERO;
        self.level = Some(level);
        self.found_words.clear();
        self.score = 0;
        self.combo = ComboState::new();
        self.riddle_solved = false;
    }
}

/// Classification of a committed word against the level's word list.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Resolution<'a> {
    /// The word was already found earlier in the session.
    AlreadyFound,
    /// The word matched a target word that was not yet found.
    Matched(&'a LevelWord),
    /// The word does not appear in the level's word list.
    NoMatch,
}

/// Resolves a normalized word against the level word list and found set.
///
/// This is a pure lookup by exact string equality: no fuzzy matching and no
/// partial credit. The `words` slice must already hold normalized words, as
/// produced at level load.
#[must_use]
pub fn resolve<'a>(word: &str, words: &'a [LevelWord], found: &[String]) -> Resolution<'a> {
    if found.iter().any(|existing| existing == word) {
        return Resolution::AlreadyFound;
    }
    match words.iter().find(|target| target.word() == word) {
        Some(target) => Resolution::Matched(target),
        None => Resolution::NoMatch,
    }
}

/// Applies the provided command to the session, mutating state deterministically.
pub fn apply(session: &mut Session, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::LoadLevel { config } => load_level(session, config, out_events),
        Command::UnloadLevel => {
            if session.level.take().is_some() {
                session.phase = Phase::Idle;
                session.found_words.clear();
                session.score = 0;
                session.combo = ComboState::new();
                session.riddle_solved = false;
                session.clock = Duration::ZERO;
                out_events.push(Event::LevelUnloaded);
            }
        }
        Command::Tick { dt } => {
            session.clock = session.clock.saturating_add(dt);
            out_events.push(Event::TimeAdvanced { dt });

            if session.phase == Phase::Playing && session.combo.expire_if_idle(session.clock) {
                out_events.push(Event::ComboExpired);
            }
        }
        Command::CommitWord { word } => commit_word(session, &word, out_events),
        Command::AnswerRiddle { answer } => answer_riddle(session, &answer, out_events),
    }
}

fn load_level(session: &mut Session, config: LevelConfig, out_events: &mut Vec<Event>) {
    // A load request only supersedes an idle or finished session; an active
    // playthrough must be unloaded explicitly first.
    if session.phase == Phase::Playing {
        return;
    }

    if let Err(reason) = config.validate() {
        out_events.push(Event::LevelRejected {
            level_id: config.id(),
            reason,
        });
        return;
    }

    let Some(grid) = LetterGrid::from_rows(config.grid_letters()) else {
        // validate() already vouched for the grid shape.
        return;
    };

    let words: Vec<LevelWord> = config
        .words()
        .iter()
        .map(|word| LevelWord::new(normalize_word(word.word()), word.points()))
        .collect();

    let level = LoadedLevel {
        id: config.id(),
        grid,
        required_words: config.required_words() as usize,
        riddle: config.riddle().cloned(),
        words,
    };

    let level_id = level.id;
    session.reset_for(level);
    out_events.push(Event::LevelLoaded { level_id });
}

fn commit_word(session: &mut Session, word: &str, out_events: &mut Vec<Event>) {
    if session.phase != Phase::Playing {
        return;
    }

    let normalized = normalize_word(word);
    if normalized.chars().count() < MIN_WORD_LEN {
        // The gesture layer already discards sub-minimum selections; this
        // guard absorbs malformed callers.
        return;
    }

    let resolved = {
        let Some(level) = session.level.as_ref() else {
            return;
        };
        match resolve(&normalized, &level.words, &session.found_words) {
            Resolution::AlreadyFound => Resolved::Already,
            Resolution::NoMatch => Resolved::Unknown,
            Resolution::Matched(target) => Resolved::Matched {
                base_points: target.points(),
            },
        }
    };

    match resolved {
        Resolved::Already => out_events.push(Event::WordRejected {
            word: normalized,
            reason: RejectReason::AlreadyFound,
        }),
        Resolved::Unknown => out_events.push(Event::WordRejected {
            word: normalized,
            reason: RejectReason::NotInLevel,
        }),
        Resolved::Matched { base_points } => {
            let multiplier = session.combo.register_match(session.clock);
            let awarded_points = ComboState::award(base_points, multiplier);

            session.found_words.push(normalized.clone());
            session.score = session.score.saturating_add(awarded_points);
            out_events.push(Event::WordAccepted {
                word: normalized,
                base_points,
                multiplier,
                awarded_points,
            });

            let Some(level) = session.level.as_ref() else {
                return;
            };
            if session.found_words.len() >= level.required_words {
                session.phase = Phase::LevelComplete;
                out_events.push(Event::LevelCompleted {
                    summary: CompletionSummary {
                        score: session.score,
                        words_found: session.found_words.clone(),
                        stars: star_rating(session.found_words.len(), level.words.len()),
                        riddle_solved: session.riddle_solved,
                    },
                });
            }
        }
    }
}

fn answer_riddle(session: &mut Session, answer: &str, out_events: &mut Vec<Event>) {
    if session.phase != Phase::Playing || session.riddle_solved {
        return;
    }

    let correct = {
        let Some(riddle) = session.level.as_ref().and_then(|level| level.riddle.as_ref()) else {
            return;
        };
        normalize_word(answer) == normalize_word(riddle.answer())
    };

    if correct {
        session.riddle_solved = true;
        session.score = session.score.saturating_add(RIDDLE_BONUS_POINTS);
        out_events.push(Event::RiddleSolved {
            bonus_points: RIDDLE_BONUS_POINTS,
        });
    } else {
        out_events.push(Event::RiddleRejected);
    }
}

enum Resolved {
    Already,
    Unknown,
    Matched { base_points: u32 },
}

/// Query functions that provide read-only access to the session state.
pub mod query {
    use std::time::Duration;

    use super::Session;
    use nird_crash_core::{LetterGrid, LevelId, Phase, Riddle};

    /// Active phase of the session's state machine.
    #[must_use]
    pub fn phase(session: &Session) -> Phase {
        session.phase
    }

    /// Identifier of the loaded level, if any.
    #[must_use]
    pub fn level_id(session: &Session) -> Option<LevelId> {
        session.level.as_ref().map(|level| level.id)
    }

    /// Letter grid of the loaded level, if any.
    #[must_use]
    pub fn grid(session: &Session) -> Option<&LetterGrid> {
        session.level.as_ref().map(|level| &level.grid)
    }

    /// Score accumulated so far in this playthrough.
    #[must_use]
    pub fn score(session: &Session) -> u32 {
        session.score
    }

    /// Normalized words found so far, in discovery order.
    #[must_use]
    pub fn found_words(session: &Session) -> &[String] {
        &session.found_words
    }

    /// Combo multiplier currently in effect.
    #[must_use]
    pub fn combo_multiplier(session: &Session) -> u32 {
        session.combo.multiplier()
    }

    /// Session clock: accumulated tick time since the level loaded.
    #[must_use]
    pub fn clock(session: &Session) -> Duration {
        session.clock
    }

    /// Riddle configured for the loaded level, if any.
    #[must_use]
    pub fn riddle(session: &Session) -> Option<&Riddle> {
        session.level.as_ref().and_then(|level| level.riddle.as_ref())
    }

    /// Reports whether the level's riddle has been solved.
    #[must_use]
    pub fn riddle_solved(session: &Session) -> bool {
        session.riddle_solved
    }

    /// Captures a read-only view of the level's word list with found flags.
    #[must_use]
    pub fn word_view(session: &Session) -> WordView {
        let entries = session
            .level
            .as_ref()
            .map(|level| {
                level
                    .words
                    .iter()
                    .map(|word| WordEntry {
                        word: word.word().to_owned(),
                        points: word.points(),
                        found: session.found_words.iter().any(|found| found == word.word()),
                    })
                    .collect()
            })
            .unwrap_or_default();
        WordView { entries }
    }

    /// Read-only snapshot of the level's word list for display.
    #[derive(Clone, Debug, Default)]
    pub struct WordView {
        entries: Vec<WordEntry>,
    }

    impl WordView {
        /// Iterator over the word entries in configuration order.
        pub fn iter(&self) -> impl Iterator<Item = &WordEntry> {
            self.entries.iter()
        }

        /// Consumes the view, yielding the underlying entries.
        #[must_use]
        pub fn into_vec(self) -> Vec<WordEntry> {
            self.entries
        }
    }

    /// Immutable representation of one target word's display state.
    #[derive(Clone, Debug, PartialEq, Eq)]
    pub struct WordEntry {
        /// Normalized target word.
        pub word: String,
        /// Base points the word is worth.
        pub points: u32,
        /// Indicates whether the word has been found this session.
        pub found: bool,
    }
}
