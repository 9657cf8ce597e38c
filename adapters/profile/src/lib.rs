#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Persistent player profile for cross-level progression.
//!
//! The session core never touches storage; it only emits
//! [`CompletionSummary`] values. This adapter consumes those summaries to
//! maintain totals, unlocked levels, and badges, and persists the whole
//! document as JSON. Writes go through a temporary file that is atomically
//! renamed into place, so a crash mid-save never corrupts the profile.

use std::collections::BTreeMap;
use std::fs;
use std::io::Write as _;
use std::path::Path;

use serde::{Deserialize, Serialize};

use nird_crash_core::{CompletionSummary, LevelId};

/// Errors that can occur while loading or saving a profile.
#[derive(Debug, thiserror::Error)]
pub enum ProfileError {
    /// Reading or writing the profile file failed.
    #[error("profile io: {0}")]
    Io(#[from] std::io::Error),
    /// The profile file holds malformed JSON.
    #[error("profile parse: {0}")]
    Parse(#[from] serde_json::Error),
    /// Persisting the temporary file into place failed.
    #[error("profile persist: {0}")]
    Persist(#[from] tempfile::PersistError),
}

/// Identifier of an unlockable badge.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BadgeId(String);

impl BadgeId {
    /// Creates a new badge identifier.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Retrieves the textual representation of the identifier.
    #[must_use]
    pub fn get(&self) -> &str {
        &self.0
    }
}

/// Threshold a profile must reach for a badge to unlock.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum BadgeRequirement {
    /// Total words found across all playthroughs reaches the count.
    TotalWordsFound(u32),
    /// Number of distinct completed levels reaches the count.
    LevelsCompleted(u32),
    /// Number of distinct solved riddles reaches the count.
    RiddlesSolved(u32),
    /// Number of levels completed with three stars reaches the count.
    PerfectLevels(u32),
}

/// Declarative badge description supplied by the campaign content.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BadgeSpec {
    /// Identifier recorded in the profile once unlocked.
    pub id: BadgeId,
    /// Threshold that unlocks the badge.
    pub requirement: BadgeRequirement,
}

/// Best recorded statistics for one completed level.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelStats {
    /// Highest score achieved on the level.
    pub score: u32,
    /// Most words found in a single playthrough.
    pub words_found: u32,
    /// Best star rating achieved.
    pub stars: u8,
    /// Indicates whether the riddle was ever solved.
    pub riddle_solved: bool,
}

/// Persistent cross-level player progression document.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    level_count: u32,
    unlocked_levels: Vec<LevelId>,
    completed_levels: Vec<LevelId>,
    total_score: u32,
    total_words_found: u32,
    riddles_solved: Vec<LevelId>,
    badges: Vec<BadgeId>,
    level_stats: BTreeMap<u32, LevelStats>,
}

impl Profile {
    /// Creates a fresh profile for a campaign with the provided level count.
    ///
    /// The first level starts unlocked.
    #[must_use]
    pub fn new(level_count: u32) -> Self {
        let unlocked_levels = if level_count > 0 {
            vec![LevelId::new(1)]
        } else {
            Vec::new()
        };
        Self {
            level_count,
            unlocked_levels,
            completed_levels: Vec::new(),
            total_score: 0,
            total_words_found: 0,
            riddles_solved: Vec::new(),
            badges: Vec::new(),
            level_stats: BTreeMap::new(),
        }
    }

    /// Number of levels in the campaign this profile tracks.
    #[must_use]
    pub const fn level_count(&self) -> u32 {
        self.level_count
    }

    /// Levels the player may currently enter.
    #[must_use]
    pub fn unlocked_levels(&self) -> &[LevelId] {
        &self.unlocked_levels
    }

    /// Levels the player has completed at least once.
    #[must_use]
    pub fn completed_levels(&self) -> &[LevelId] {
        &self.completed_levels
    }

    /// Sum of all completion scores recorded so far.
    #[must_use]
    pub const fn total_score(&self) -> u32 {
        self.total_score
    }

    /// Number of words found across all completions.
    #[must_use]
    pub const fn total_words_found(&self) -> u32 {
        self.total_words_found
    }

    /// Badges unlocked so far, in unlock order.
    #[must_use]
    pub fn badges(&self) -> &[BadgeId] {
        &self.badges
    }

    /// Best recorded statistics for the provided level.
    #[must_use]
    pub fn level_stats(&self, level_id: LevelId) -> Option<&LevelStats> {
        self.level_stats.get(&level_id.get())
    }

    /// Reports whether the provided level may be entered.
    #[must_use]
    pub fn is_unlocked(&self, level_id: LevelId) -> bool {
        self.unlocked_levels.contains(&level_id)
    }

    /// Records a level completion summary into the profile.
    ///
    /// Totals accumulate on every completion; per-level statistics keep the
    /// best values across repeats. Completing a level unlocks the next one,
    /// capped at the campaign's level count.
    pub fn complete_level(&mut self, level_id: LevelId, summary: &CompletionSummary) {
        if !self.completed_levels.contains(&level_id) {
            self.completed_levels.push(level_id);
        }

        self.total_score = self.total_score.saturating_add(summary.score);
        let words = u32::try_from(summary.words_found.len()).unwrap_or(u32::MAX);
        self.total_words_found = self.total_words_found.saturating_add(words);

        if summary.riddle_solved && !self.riddles_solved.contains(&level_id) {
            self.riddles_solved.push(level_id);
        }

        let entry = self
            .level_stats
            .entry(level_id.get())
            .or_insert(LevelStats {
                score: 0,
                words_found: 0,
                stars: 0,
                riddle_solved: false,
            });
        entry.score = entry.score.max(summary.score);
        entry.words_found = entry.words_found.max(words);
        entry.stars = entry.stars.max(summary.stars);
        entry.riddle_solved = entry.riddle_solved || summary.riddle_solved;

        let next = LevelId::new(level_id.get().saturating_add(1));
        if next.get() <= self.level_count && !self.unlocked_levels.contains(&next) {
            self.unlocked_levels.push(next);
        }
    }

    /// Evaluates badge requirements against the profile, unlocking any newly
    /// satisfied badges.
    ///
    /// Returns the identifiers unlocked by this call. Already unlocked badges
    /// are never re-awarded, so the badge list grows monotonically.
    pub fn check_badges(&mut self, specs: &[BadgeSpec]) -> Vec<BadgeId> {
        let mut newly_unlocked = Vec::new();
        for spec in specs {
            if self.badges.contains(&spec.id) {
                continue;
            }
            if self.satisfies(spec.requirement) {
                self.badges.push(spec.id.clone());
                newly_unlocked.push(spec.id.clone());
            }
        }
        newly_unlocked
    }

    fn satisfies(&self, requirement: BadgeRequirement) -> bool {
        match requirement {
            BadgeRequirement::TotalWordsFound(count) => self.total_words_found >= count,
            BadgeRequirement::LevelsCompleted(count) => {
                self.completed_levels.len() as u32 >= count
            }
            BadgeRequirement::RiddlesSolved(count) => self.riddles_solved.len() as u32 >= count,
            BadgeRequirement::PerfectLevels(count) => {
                let perfect = self
                    .level_stats
                    .values()
                    .filter(|stats| stats.stars == 3)
                    .count();
                perfect as u32 >= count
            }
        }
    }

    /// Loads a profile from the provided JSON file.
    pub fn load(path: &Path) -> Result<Self, ProfileError> {
        let raw = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Saves the profile as pretty JSON, atomically replacing the target.
    pub fn save(&self, path: &Path) -> Result<(), ProfileError> {
        let directory = path.parent().unwrap_or_else(|| Path::new("."));
        fs::create_dir_all(directory)?;

        let mut file = tempfile::NamedTempFile::new_in(directory)?;
        serde_json::to_writer_pretty(&mut file, self)?;
        file.write_all(b"\n")?;
        let _ = file.persist(path)?;
        Ok(())
    }
}
