use crate::hangul::decompose_word;

/// Whether the input surface is mid-way through assembling a character.
/// Flipped by the composition lifecycle signals; judgment never happens on
/// these signals alone, because composition end fires per character, not per
/// item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CompositionState {
    #[default]
    Idle,
    Composing,
}

/// A practice item broken into ordered phonetic units. For non-composing
/// text the units are just the characters, so every consumer can treat the
/// two languages uniformly.
#[derive(Debug, Clone, PartialEq)]
pub struct DecomposedTarget {
    pub item: String,
    pub units: Vec<char>,
}

impl DecomposedTarget {
    pub fn new(item: &str) -> Self {
        Self {
            item: item.to_string(),
            units: decompose_word(item),
        }
    }

    pub fn unit_count(&self) -> usize {
        self.units.len()
    }
}

/// Tracks the composition lifecycle of the input surface.
#[derive(Debug, Clone, Copy, Default)]
pub struct Reconciler {
    state: CompositionState,
}

impl Reconciler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin_composition(&mut self) {
        self.state = CompositionState::Composing;
    }

    pub fn end_composition(&mut self) {
        self.state = CompositionState::Idle;
    }

    /// Back to `Idle`, used when an item is committed or the session resets.
    pub fn reset(&mut self) {
        self.state = CompositionState::Idle;
    }

    pub fn is_composing(&self) -> bool {
        self.state == CompositionState::Composing
    }

    pub fn state(&self) -> CompositionState {
        self.state
    }
}

/// The highlight cursor into `target` for the current raw input text.
///
/// Recomputed on every raw change, composing or not, so the visual target
/// advances in step with partially-assembled characters. Clamped to the last
/// unit; the cursor never points past the end of the target.
pub fn logical_position(input: &str, target: &DecomposedTarget) -> usize {
    decompose_word(input)
        .len()
        .min(target.units.len().saturating_sub(1))
}

/// Whether a committed text matches the target: exact string equality only,
/// case sensitive for Latin and code-point exact for syllables. Matching
/// every phonetic unit but transposing or trailing extra input still fails.
pub fn judge(submitted: &str, target: &str) -> bool {
    submitted == target
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_units_for_syllables() {
        let target = DecomposedTarget::new("값");
        assert_eq!(target.units, vec!['ㄱ', 'ㅏ', 'ㅄ']);
        assert_eq!(target.unit_count(), 3);
    }

    #[test]
    fn test_target_units_for_latin() {
        let target = DecomposedTarget::new("hi");
        assert_eq!(target.units, vec!['h', 'i']);
    }

    #[test]
    fn test_cursor_advances_with_partial_assembly() {
        // Mid-composition snapshots of typing 한: ㅎ → 하 → 한
        let target = DecomposedTarget::new("한");
        assert_eq!(logical_position("", &target), 0);
        assert_eq!(logical_position("ㅎ", &target), 1);
        assert_eq!(logical_position("하", &target), 2);
        assert_eq!(logical_position("한", &target), 2); // clamped to last unit
    }

    #[test]
    fn test_cursor_never_passes_end_of_target() {
        let target = DecomposedTarget::new("한");
        assert_eq!(logical_position("한글자더", &target), 2);

        let latin = DecomposedTarget::new("hi");
        assert_eq!(logical_position("hello", &latin), 1);
    }

    #[test]
    fn test_cursor_is_text_length_for_latin() {
        let target = DecomposedTarget::new("hello");
        assert_eq!(logical_position("he", &target), 2);
        assert_eq!(logical_position("hell", &target), 4);
    }

    #[test]
    fn test_cursor_on_empty_target() {
        let target = DecomposedTarget::new("");
        assert_eq!(logical_position("anything", &target), 0);
    }

    #[test]
    fn test_composition_lifecycle() {
        let mut rec = Reconciler::new();
        assert_eq!(rec.state(), CompositionState::Idle);

        rec.begin_composition();
        assert!(rec.is_composing());

        rec.end_composition();
        assert!(!rec.is_composing());

        rec.begin_composition();
        rec.reset();
        assert_eq!(rec.state(), CompositionState::Idle);
    }

    #[test]
    fn test_judge_exact_match_only() {
        assert!(judge("한글", "한글"));
        assert!(!judge("한그", "한글"));
        assert!(!judge("한글 ", "한글")); // trailing extra input fails
        assert!(!judge("", "한글"));
    }

    #[test]
    fn test_judge_is_case_sensitive() {
        assert!(judge("glad", "glad"));
        assert!(!judge("Glad", "glad"));
    }

    #[test]
    fn test_judge_rejects_transposition_with_matching_units() {
        // Same multiset of jamo, different order
        assert!(!judge("글한", "한글"));
    }
}
