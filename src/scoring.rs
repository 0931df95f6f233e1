use crate::compose::judge;
use crate::hangul::decompose_word;
use crate::session::{ItemOutcome, SessionResult, MIN_ELAPSED_SECS};
use crate::util::mean;
use std::time::SystemTime;

/// Items whose position-wise match ratio falls below this contribute no
/// speed signal, only an accuracy penalty.
pub const SPEED_FLOOR_RATIO: f64 = 0.5;

/// Fixed units-per-word convention for the WPM figure.
pub const UNITS_PER_WORD: f64 = 5.0;

/// Per-item grading, independent of timing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ItemGrade {
    /// Exact-match judgment; the only thing that counts as correct.
    pub is_correct: bool,
    /// Position-wise phonetic-unit match ratio against the target, separate
    /// from the binary judgment.
    pub match_ratio: f64,
    /// Unit count of the target; the typing-volume figure for rate math.
    pub target_units: usize,
}

/// Grade a submitted text against its target. Comparison runs over
/// decomposed phonetic units, so for syllable text one wrong jamo is a
/// partial miss rather than a whole-character miss; for Latin text the
/// decomposition is the identity and this is the plain per-character ratio.
pub fn grade(submitted: &str, target: &str) -> ItemGrade {
    let target_units = decompose_word(target);
    let submitted_units = decompose_word(submitted);

    let matched = target_units
        .iter()
        .zip(submitted_units.iter())
        .filter(|(t, s)| t == s)
        .count();

    let match_ratio = if target_units.is_empty() {
        if submitted_units.is_empty() {
            1.0
        } else {
            0.0
        }
    } else {
        matched as f64 / target_units.len() as f64
    };

    ItemGrade {
        is_correct: judge(submitted, target),
        match_ratio,
        target_units: target_units.len(),
    }
}

/// Build the immutable outcome record for one committed item.
///
/// Units-per-minute is the target's unit count over the item's elapsed time,
/// zeroed for heavily mistyped items per [`SPEED_FLOOR_RATIO`]. The elapsed
/// milliseconds are clamped to ≥ 1 before dividing.
pub fn item_outcome(
    item: &str,
    submitted: &str,
    started_at: SystemTime,
    committed_at: SystemTime,
) -> ItemOutcome {
    let graded = grade(submitted, item);
    let duration_ms = committed_at
        .duration_since(started_at)
        .unwrap_or_default()
        .as_millis() as u64;

    let units_per_minute = if graded.match_ratio < SPEED_FLOOR_RATIO {
        0.0
    } else {
        let minutes = duration_ms.max(1) as f64 / 60_000.0;
        graded.target_units as f64 / minutes
    };

    ItemOutcome {
        item: item.to_string(),
        submitted: submitted.to_string(),
        is_correct: graded.is_correct,
        started_at,
        committed_at,
        duration_ms,
        units_per_minute,
    }
}

/// Aggregate a completed session.
///
/// Accuracy is the share of correct commits; the speed average runs only
/// over items with a nonzero recorded speed; the final speed is damped by
/// the accuracy ratio — never amplified — and WPM divides by the fixed
/// units-per-word convention.
pub fn finalize(
    history: &[ItemOutcome],
    elapsed_seconds: f64,
    total_key_presses: usize,
) -> SessionResult {
    let total = history.len();
    let correct = history.iter().filter(|o| o.is_correct).count();

    let accuracy_percent = if total == 0 {
        0.0
    } else {
        (100.0 * correct as f64 / total as f64).round()
    };

    let speeds: Vec<f64> = history
        .iter()
        .map(|o| o.units_per_minute)
        .filter(|s| *s > 0.0)
        .collect();
    let average_speed = mean(&speeds).unwrap_or(0.0);

    let speed = (average_speed * (accuracy_percent / 100.0)).round();
    let words_per_minute = (speed / UNITS_PER_WORD).round();

    SessionResult {
        accuracy_percent,
        speed,
        words_per_minute,
        elapsed_seconds: elapsed_seconds.max(MIN_ELAPSED_SECS),
        total_key_presses,
    }
}
