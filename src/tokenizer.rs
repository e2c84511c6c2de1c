//! Character-run tokenizers.
//!
//! A [`CharTokenizer`] scans its input once, skipping codepoints the selected
//! classifier rejects and emitting each maximal run of accepted codepoints as
//! one token. The two profile constructors cover Tibetan script and Wylie
//! transliteration.

use crate::char_classes::CharProfile;
use crate::stream::{AnalysisError, CharSource, StrChars, TokenStream};
use crate::token::Token;

/// A tokenizer that splits text on classifier boundaries.
///
/// Lazy, single-pass, non-restartable; one instance per input stream. Offsets
/// on emitted tokens are char positions in the input. A token is never empty:
/// a run is only started on an accepted codepoint.
pub struct CharTokenizer<S: CharSource> {
    source: S,
    profile: CharProfile,
    /// Char index of the next codepoint to be read.
    pos: usize,
    done: bool,
}

impl<'a> CharTokenizer<StrChars<'a>> {
    /// Convenience constructor over a borrowed string.
    pub fn from_str(text: &'a str, profile: CharProfile) -> Self {
        CharTokenizer::new(StrChars::new(text), profile)
    }
}

impl<S: CharSource> CharTokenizer<S> {
    /// Create a tokenizer over `source` with the given classifier profile.
    pub fn new(source: S, profile: CharProfile) -> Self {
        CharTokenizer {
            source,
            profile,
            pos: 0,
            done: false,
        }
    }

    /// A tokenizer over Tibetan-script letters and digits.
    pub fn tibetan(source: S) -> Self {
        CharTokenizer::new(source, CharProfile::TibetanScript)
    }

    /// A tokenizer over Wylie transliteration characters.
    pub fn wylie(source: S) -> Self {
        CharTokenizer::new(source, CharProfile::WylieChars)
    }
}

impl<S: CharSource> TokenStream for CharTokenizer<S> {
    fn next_token(&mut self) -> Result<Option<Token>, AnalysisError> {
        if self.done {
            return Ok(None);
        }

        // Skip separators up to the next constituent codepoint.
        let (start, first) = loop {
            match self.source.next_char()? {
                Some(c) => {
                    let at = self.pos;
                    self.pos += 1;
                    if self.profile.is_token_char(c) {
                        break (at, c);
                    }
                }
                None => {
                    self.done = true;
                    return Ok(None);
                }
            }
        };

        let mut text = String::new();
        text.push(first);

        // Accumulate the maximal run. The codepoint that ends the run is a
        // separator and is consumed here; it never needs re-reading.
        loop {
            match self.source.next_char()? {
                Some(c) => {
                    self.pos += 1;
                    if self.profile.is_token_char(c) {
                        text.push(c);
                    } else {
                        return Ok(Some(Token::new(text, start, self.pos - 1)));
                    }
                }
                None => {
                    self.done = true;
                    return Ok(Some(Token::new(text, start, self.pos)));
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drain<S: CharSource>(mut t: CharTokenizer<S>) -> Vec<Token> {
        let mut out = Vec::new();
        while let Some(tok) = t.next_token().unwrap() {
            out.push(tok);
        }
        out
    }

    #[test]
    fn test_wylie_offsets() {
        let tokens = drain(CharTokenizer::from_str(
            "pad+ma rig+pa",
            CharProfile::WylieChars,
        ));
        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[0].text, "pad+ma");
        assert_eq!((tokens[0].start, tokens[0].end), (0, 6));
        assert_eq!(tokens[1].text, "rig+pa");
        assert_eq!((tokens[1].start, tokens[1].end), (7, 13));
    }

    #[test]
    fn test_tibetan_splits_on_tsek() {
        let tokens = drain(CharTokenizer::from_str(
            "བཀྲ་ཤིས་བདེ་ལེགས།",
            CharProfile::TibetanScript,
        ));
        let texts: Vec<&str> = tokens.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, vec!["བཀྲ", "ཤིས", "བདེ", "ལེགས"]);
        // ་ and ། are boundaries, never part of a token
        assert!(tokens.iter().all(|t| !t.text.contains('་')));
    }

    #[test]
    fn test_tibetan_char_offsets() {
        let text = "བཀྲ་ཤིས";
        let tokens = drain(CharTokenizer::from_str(text, CharProfile::TibetanScript));
        assert_eq!((tokens[0].start, tokens[0].end), (0, 3));
        assert_eq!((tokens[1].start, tokens[1].end), (4, 7));
    }

    #[test]
    fn test_empty_input() {
        let mut t = CharTokenizer::from_str("", CharProfile::WylieChars);
        assert_eq!(t.next_token().unwrap(), None);
        // Stays exhausted
        assert_eq!(t.next_token().unwrap(), None);
    }

    #[test]
    fn test_all_separators() {
        let tokens = drain(CharTokenizer::from_str(" .,;!  ", CharProfile::WylieChars));
        assert!(tokens.is_empty());
    }

    #[test]
    fn test_token_at_end_of_input() {
        let tokens = drain(CharTokenizer::from_str("om mani", CharProfile::WylieChars));
        assert_eq!(tokens.len(), 2);
        assert_eq!((tokens[1].start, tokens[1].end), (3, 7));
    }

    #[test]
    fn test_never_emits_empty_token() {
        let tokens = drain(CharTokenizer::from_str(
            "  a  b  ",
            CharProfile::WylieChars,
        ));
        assert!(tokens.iter().all(|t| !t.text.is_empty()));
    }

    #[test]
    fn test_control_codepoints_are_boundaries() {
        let tokens = drain(CharTokenizer::from_str(
            "ka\u{0000}kha",
            CharProfile::WylieChars,
        ));
        let texts: Vec<&str> = tokens.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, vec!["ka", "kha"]);
    }

    #[test]
    fn test_reconstruction_property() {
        // Concatenating token texts and skipped separators in order must
        // rebuild the original input.
        let input = "བཀྲ་ཤིས། ༡༢༣ tr བདེ་ལེགས";
        let tokens = drain(CharTokenizer::from_str(input, CharProfile::TibetanScript));

        let chars: Vec<char> = input.chars().collect();
        let mut rebuilt = String::new();
        let mut cursor = 0;
        for tok in &tokens {
            while cursor < tok.start {
                rebuilt.push(chars[cursor]);
                cursor += 1;
            }
            rebuilt.push_str(&tok.text);
            cursor = tok.end;
        }
        while cursor < chars.len() {
            rebuilt.push(chars[cursor]);
            cursor += 1;
        }
        assert_eq!(rebuilt, input);
    }
}
