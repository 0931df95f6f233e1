use crate::pool::PracticeLanguage;
use std::time::{Duration, SystemTime};

pub const DEFAULT_POSITION_ITEMS: usize = 50;
pub const DEFAULT_WORD_ITEMS: usize = 50;

/// Input gap after which the session counts as paused.
pub const PAUSE_THRESHOLD_SECS: f64 = 3.0;
/// Floor for elapsed time wherever it becomes a divisor.
pub const MIN_ELAPSED_SECS: f64 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    PositionDrill,
    WordDrill,
    Completed,
}

#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub language: PracticeLanguage,
    pub category: String,
    pub position_items: usize,
    pub word_items: usize,
    /// Standalone word drill: skip the position stage entirely.
    pub words_only: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            language: PracticeLanguage::Korean,
            category: "home-row".to_string(),
            position_items: DEFAULT_POSITION_ITEMS,
            word_items: DEFAULT_WORD_ITEMS,
            words_only: false,
        }
    }
}

/// One committed item. Appended to the session history and never mutated;
/// the history is the sole input to final aggregation.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemOutcome {
    pub item: String,
    pub submitted: String,
    pub is_correct: bool,
    pub started_at: SystemTime,
    pub committed_at: SystemTime,
    pub duration_ms: u64,
    pub units_per_minute: f64,
}

/// The finalized figures handed to the reporter. Computed exactly once, at
/// the transition to `Completed`.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionResult {
    pub accuracy_percent: f64,
    pub speed: f64,
    pub words_per_minute: f64,
    pub elapsed_seconds: f64,
    pub total_key_presses: usize,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PauseState {
    Active,
    Paused { since: SystemTime },
}

/// Session clocks and the append-only outcome log. Owned exclusively by the
/// drill; other components see snapshots or explicit parameters.
#[derive(Debug, Clone)]
pub struct SessionState {
    pub started_at: Option<SystemTime>,
    pub item_started_at: Option<SystemTime>,
    pub last_input_at: Option<SystemTime>,
    pub pause: PauseState,
    pub paused_total: Duration,
    pub total_key_presses: usize,
    pub history: Vec<ItemOutcome>,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            started_at: None,
            item_started_at: None,
            last_input_at: None,
            pause: PauseState::Active,
            paused_total: Duration::ZERO,
            total_key_presses: 0,
            history: Vec::new(),
        }
    }
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an input signal: starts the session clock on the very first
    /// input, and resumes from a pause by folding the paused span into the
    /// running total.
    pub fn note_input_at(&mut self, now: SystemTime) {
        if self.started_at.is_none() {
            self.started_at = Some(now);
        }
        if let PauseState::Paused { since } = self.pause {
            self.paused_total += now.duration_since(since).unwrap_or_default();
            self.pause = PauseState::Active;
        }
        self.last_input_at = Some(now);
    }

    /// Start the per-item clock on the first character of a fresh item.
    /// Idle time before the first keystroke is reaction time the item clock
    /// must not include, so issuance does not call this.
    pub fn begin_item_at(&mut self, now: SystemTime) {
        if self.item_started_at.is_none() {
            self.item_started_at = Some(now);
        }
    }

    pub fn clear_item_clock(&mut self) {
        self.item_started_at = None;
    }

    /// The 1-second inactivity poll. Once the gap since the last input
    /// crosses the threshold, the session pauses with the pause start
    /// recorded retroactively at `now − threshold`.
    pub fn check_pause_at(&mut self, now: SystemTime) {
        if self.pause != PauseState::Active {
            return;
        }
        let Some(last) = self.last_input_at else {
            return;
        };
        let gap = now.duration_since(last).unwrap_or_default();
        if gap.as_secs_f64() > PAUSE_THRESHOLD_SECS {
            let since = now - Duration::from_secs_f64(PAUSE_THRESHOLD_SECS);
            self.pause = PauseState::Paused { since };
        }
    }

    pub fn is_paused(&self) -> bool {
        matches!(self.pause, PauseState::Paused { .. })
    }

    /// Net elapsed seconds: wall time since the first input minus the
    /// accumulated pause time, clamped to the positive floor.
    pub fn elapsed_seconds_at(&self, now: SystemTime) -> f64 {
        let Some(start) = self.started_at else {
            return MIN_ELAPSED_SECS;
        };
        let gross = now.duration_since(start).unwrap_or_default();
        gross
            .saturating_sub(self.paused_total)
            .as_secs_f64()
            .max(MIN_ELAPSED_SECS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::UNIX_EPOCH;

    fn at(secs: f64) -> SystemTime {
        UNIX_EPOCH + Duration::from_secs_f64(secs)
    }

    #[test]
    fn test_first_input_starts_session_clock() {
        let mut state = SessionState::new();
        assert!(state.started_at.is_none());

        state.note_input_at(at(10.0));
        assert_eq!(state.started_at, Some(at(10.0)));

        // Later inputs do not move the start
        state.note_input_at(at(12.0));
        assert_eq!(state.started_at, Some(at(10.0)));
    }

    #[test]
    fn test_item_clock_starts_once_per_item() {
        let mut state = SessionState::new();
        state.begin_item_at(at(5.0));
        state.begin_item_at(at(7.0));
        assert_eq!(state.item_started_at, Some(at(5.0)));

        state.clear_item_clock();
        state.begin_item_at(at(9.0));
        assert_eq!(state.item_started_at, Some(at(9.0)));
    }

    #[test]
    fn test_pause_needs_input_first() {
        let mut state = SessionState::new();
        state.check_pause_at(at(100.0));
        assert!(!state.is_paused());
    }

    #[test]
    fn test_pause_triggers_past_threshold() {
        let mut state = SessionState::new();
        state.note_input_at(at(10.0));

        state.check_pause_at(at(12.0)); // inside grace
        assert!(!state.is_paused());

        state.check_pause_at(at(13.5)); // past 3s threshold
        assert!(state.is_paused());
    }

    #[test]
    fn test_pause_start_is_retroactive() {
        let mut state = SessionState::new();
        state.note_input_at(at(10.0));
        state.check_pause_at(at(14.0));

        match state.pause {
            PauseState::Paused { since } => assert_eq!(since, at(11.0)), // now − threshold
            PauseState::Active => panic!("expected paused"),
        }
    }

    #[test]
    fn test_resume_accumulates_pause_total() {
        let mut state = SessionState::new();
        state.note_input_at(at(10.0));
        state.check_pause_at(at(14.0)); // paused since 11.0

        state.note_input_at(at(20.0)); // resume: 9s of pause
        assert!(!state.is_paused());
        assert_eq!(state.paused_total, Duration::from_secs(9));
    }

    #[test]
    fn test_elapsed_excludes_pause() {
        let mut state = SessionState::new();
        state.note_input_at(at(10.0));
        state.check_pause_at(at(14.0));
        state.note_input_at(at(20.0));

        // 12s wall clock, 9s paused
        let elapsed = state.elapsed_seconds_at(at(22.0));
        assert!((elapsed - 3.0).abs() < 1e-9, "got {elapsed}");
    }

    #[test]
    fn test_elapsed_is_floored() {
        let state = SessionState::new();
        assert_eq!(state.elapsed_seconds_at(at(0.0)), MIN_ELAPSED_SECS);

        let mut started = SessionState::new();
        started.note_input_at(at(10.0));
        assert_eq!(started.elapsed_seconds_at(at(10.0)), MIN_ELAPSED_SECS);
    }

    #[test]
    fn test_no_double_pause() {
        let mut state = SessionState::new();
        state.note_input_at(at(10.0));
        state.check_pause_at(at(14.0));
        let first = state.pause;

        // Polls keep firing while paused; the pause start must not move.
        state.check_pause_at(at(30.0));
        assert_eq!(state.pause, first);
    }

    #[test]
    fn test_default_config_stage_lengths() {
        let config = SessionConfig::default();
        assert_eq!(config.position_items, DEFAULT_POSITION_ITEMS);
        assert_eq!(config.word_items, DEFAULT_WORD_ITEMS);
        assert!(!config.words_only);
    }
}
