/// First code point of the precomposed syllable block (가).
const SYLLABLE_BASE: u32 = 0xAC00;
/// Number of precomposed syllables (19 leads × 21 vowels × 28 tails).
const SYLLABLE_COUNT: u32 = 11172;

/// Code-point strides inside the syllable block: one leading-consonant step
/// spans every vowel/tail combination, one vowel step spans every tail.
const LEAD_STRIDE: u32 = 588;
const TAIL_STRIDE: u32 = 28;

/// Leading consonants (choseong) in structural order, compatibility-jamo forms.
const LEADS: [char; 19] = [
    'ㄱ', 'ㄲ', 'ㄴ', 'ㄷ', 'ㄸ', 'ㄹ', 'ㅁ', 'ㅂ', 'ㅃ', 'ㅅ', 'ㅆ', 'ㅇ', 'ㅈ', 'ㅉ', 'ㅊ',
    'ㅋ', 'ㅌ', 'ㅍ', 'ㅎ',
];

/// Vowels (jungseong) in structural order.
const VOWELS: [char; 21] = [
    'ㅏ', 'ㅐ', 'ㅑ', 'ㅒ', 'ㅓ', 'ㅔ', 'ㅕ', 'ㅖ', 'ㅗ', 'ㅘ', 'ㅙ', 'ㅚ', 'ㅛ', 'ㅜ', 'ㅝ',
    'ㅞ', 'ㅟ', 'ㅠ', 'ㅡ', 'ㅢ', 'ㅣ',
];

/// Trailing consonants (jongseong) for structural indices 1..=27; index 0 is
/// the null tail and produces no unit. Compound tails stay single units.
const TAILS: [char; 27] = [
    'ㄱ', 'ㄲ', 'ㄳ', 'ㄴ', 'ㄵ', 'ㄶ', 'ㄷ', 'ㄹ', 'ㄺ', 'ㄻ', 'ㄼ', 'ㄽ', 'ㄾ', 'ㄿ', 'ㅀ',
    'ㅁ', 'ㅂ', 'ㅄ', 'ㅅ', 'ㅆ', 'ㅇ', 'ㅈ', 'ㅊ', 'ㅋ', 'ㅌ', 'ㅍ', 'ㅎ',
];

/// Whether `c` is a precomposed Hangul syllable.
pub fn is_syllable(c: char) -> bool {
    let cp = c as u32;
    (SYLLABLE_BASE..SYLLABLE_BASE + SYLLABLE_COUNT).contains(&cp)
}

/// Decompose a single character into its ordered phonetic units.
///
/// Syllables yield their leading consonant, vowel, and (when present)
/// trailing consonant. Anything else — bare jamo, Latin letters,
/// punctuation — comes back unchanged as a one-element vector. Total over
/// all of `char`; never panics.
pub fn decompose(c: char) -> Vec<char> {
    if !is_syllable(c) {
        return vec![c];
    }

    let offset = c as u32 - SYLLABLE_BASE;
    let lead = (offset / LEAD_STRIDE) as usize;
    let vowel = ((offset % LEAD_STRIDE) / TAIL_STRIDE) as usize;
    let tail = (offset % TAIL_STRIDE) as usize;

    let mut units = vec![LEADS[lead], VOWELS[vowel]];
    if tail > 0 {
        units.push(TAILS[tail - 1]);
    }
    units
}

/// Decompose every character of `word` and flatten the result.
///
/// The unit count of the returned vector stands in for keystroke count
/// wherever typing volume is measured; for non-syllable text it equals the
/// character count.
pub fn decompose_word(word: &str) -> Vec<char> {
    word.chars().flat_map(decompose).collect()
}

/// Recompose a syllable from its structural parts. Returns `None` when any
/// part is not a valid jamo for its slot. Inverse of `decompose` over the
/// syllable block.
pub fn compose(lead: char, vowel: char, tail: Option<char>) -> Option<char> {
    let l = LEADS.iter().position(|&c| c == lead)? as u32;
    let v = VOWELS.iter().position(|&c| c == vowel)? as u32;
    let t = match tail {
        Some(tc) => TAILS.iter().position(|&c| c == tc)? as u32 + 1,
        None => 0,
    };
    char::from_u32(SYLLABLE_BASE + l * LEAD_STRIDE + v * TAIL_STRIDE + t)
}
