//! Codepoint classification for the two script profiles.
//!
//! A classifier is a pure predicate deciding whether a codepoint can be part
//! of a token. Everything a classifier rejects acts as a token boundary and
//! is skipped by the tokenizer, never reported as an error.

/// The `+` character, used in Extended Wylie to mark Tibetanized-Sanskrit
/// consonant stacking (e.g. "pad+ma").
pub const STACK_MARKER: char = '+';

/// Check whether a codepoint is a Tibetan letter or digit.
///
/// Covers the Tibetan consonant and vowel-sign/subjoined ranges, the Tibetan
/// digits, and the syllable marker ༀ (U+0F00). Tsek, shad and all other
/// punctuation fall outside these ranges and act as token boundaries.
pub fn is_tibetan_letter_or_digit(c: char) -> bool {
    matches!(c,
        '\u{0F40}'..='\u{0F83}'
        | '\u{0F90}'..='\u{0FBC}'
        | '\u{0F20}'..='\u{0F33}'
        | '\u{0F00}')
}

/// Check whether a codepoint can be part of a Wylie token.
///
/// Letters and digits in the Unicode sense, plus the apostrophe (Wylie -a
/// chung) and the `+` stack marker. This does a decent job on Wylie mixed
/// with most European languages, but not on scripts without word separators.
pub fn is_wylie_char(c: char) -> bool {
    c.is_alphanumeric() || c == '\'' || c == STACK_MARKER
}

/// A script profile selecting one of the codepoint classifiers.
///
/// Profiles are stateless and `Copy`; a single value can serve any number of
/// concurrent pipelines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharProfile {
    /// Tibetan-script letters and digits only.
    TibetanScript,
    /// Wylie transliteration characters.
    WylieChars,
}

impl CharProfile {
    /// Whether `c` is a token constituent under this profile.
    pub fn is_token_char(self, c: char) -> bool {
        match self {
            CharProfile::TibetanScript => is_tibetan_letter_or_digit(c),
            CharProfile::WylieChars => is_wylie_char(c),
        }
    }
}
