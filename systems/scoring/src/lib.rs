#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure combo scoring engine for consecutive word matches.
//!
//! Consecutive successful matches made within a rolling time window grow a
//! multiplier applied to each match's base points. The window is measured on
//! the session's monotonic clock, so callers pass explicit timestamps and the
//! engine stays free of wall-clock reads.

use std::time::Duration;

/// Rolling window within which consecutive matches grow the combo.
pub const COMBO_WINDOW: Duration = Duration::from_millis(5000);

/// Tracks the combo multiplier and the clock reading of the last match.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ComboState {
    multiplier: u32,
    last_match: Option<Duration>,
}

impl Default for ComboState {
    fn default() -> Self {
        Self::new()
    }
}

impl ComboState {
    /// Creates a fresh combo state with no recorded match.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            multiplier: 1,
            last_match: None,
        }
    }

    /// Current multiplier; always at least one.
    #[must_use]
    pub const fn multiplier(&self) -> u32 {
        self.multiplier
    }

    /// Clock reading of the most recent match, if the combo is live.
    #[must_use]
    pub const fn last_match(&self) -> Option<Duration> {
        self.last_match
    }

    /// Records a successful match at the provided clock reading and returns
    /// the multiplier awarded to it.
    ///
    /// A match within [`COMBO_WINDOW`] of the previous one is awarded the
    /// incremented multiplier; otherwise the combo restarts at one.
    pub fn register_match(&mut self, now: Duration) -> u32 {
        let chained = self
            .last_match
            .is_some_and(|last| now.saturating_sub(last) < COMBO_WINDOW);

        let awarded = if chained {
            self.multiplier.saturating_add(1)
        } else {
            1
        };

        self.multiplier = awarded;
        self.last_match = Some(now);
        awarded
    }

    /// Lazily decays the combo once the window elapses with no match.
    ///
    /// Returns `true` when this call performed the reset, so the session can
    /// announce the expiry exactly once.
    pub fn expire_if_idle(&mut self, now: Duration) -> bool {
        let expired = self
            .last_match
            .is_some_and(|last| now.saturating_sub(last) >= COMBO_WINDOW);

        if expired {
            self.multiplier = 1;
            self.last_match = None;
        }
        expired
    }

    /// Points awarded for a match with the provided base value.
    #[must_use]
    pub fn award(base_points: u32, multiplier: u32) -> u32 {
        base_points.saturating_mul(multiplier)
    }
}

#[cfg(test)]
mod tests {
    use super::{ComboState, COMBO_WINDOW};
    use std::time::Duration;

    #[test]
    fn consecutive_matches_grow_the_multiplier() {
        let mut combo = ComboState::new();
        assert_eq!(combo.register_match(Duration::from_millis(0)), 1);
        assert_eq!(combo.register_match(Duration::from_millis(1000)), 2);
        assert_eq!(combo.register_match(Duration::from_millis(2000)), 3);
    }

    #[test]
    fn match_outside_the_window_restarts_at_one() {
        let mut combo = ComboState::new();
        assert_eq!(combo.register_match(Duration::from_millis(0)), 1);
        assert_eq!(combo.register_match(Duration::from_millis(5001)), 1);
    }

    #[test]
    fn match_exactly_at_the_window_edge_restarts() {
        let mut combo = ComboState::new();
        let _ = combo.register_match(Duration::ZERO);
        assert_eq!(combo.register_match(COMBO_WINDOW), 1);
    }

    #[test]
    fn idle_expiry_resets_once() {
        let mut combo = ComboState::new();
        let _ = combo.register_match(Duration::ZERO);
        let _ = combo.register_match(Duration::from_millis(1000));
        assert_eq!(combo.multiplier(), 2);

        assert!(!combo.expire_if_idle(Duration::from_millis(4000)));
        assert!(combo.expire_if_idle(Duration::from_millis(6000)));
        assert_eq!(combo.multiplier(), 1);
        assert!(combo.last_match().is_none());

        assert!(!combo.expire_if_idle(Duration::from_millis(20000)));
    }

    #[test]
    fn award_scales_base_points() {
        assert_eq!(ComboState::award(10, 1), 10);
        assert_eq!(ComboState::award(5, 2), 10);
        assert_eq!(ComboState::award(u32::MAX, 2), u32::MAX);
    }
}
