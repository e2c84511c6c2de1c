//! Per-token transforms applied downstream of a tokenizer.
//!
//! Every filter owns its upstream stage and implements [`TokenStream`]
//! itself, so pipelines are built as nested values. Filters rewrite or drop
//! tokens; none of them ever touches the start/end offsets fixed by the
//! tokenizer.

use std::collections::HashSet;
use std::sync::Arc;

use regex::Regex;
use unicode_normalization::UnicodeNormalization;

use crate::char_classes::STACK_MARKER;
use crate::stream::{AnalysisError, TokenStream};
use crate::token::Token;

/// Removes the `+` stack marker from token text.
///
/// "pad+ma" and "padma" index to the same term, so searches match either
/// spelling. The text shrinks in place; offsets keep describing the original
/// span. A token consisting entirely of `+` comes out with empty text and is
/// still passed through, not dropped, so downstream stages must tolerate
/// zero-length terms.
pub struct StackMarkerFilter<S: TokenStream> {
    input: S,
}

impl<S: TokenStream> StackMarkerFilter<S> {
    /// Wrap `input` in a stack-marker removal stage.
    pub fn new(input: S) -> Self {
        StackMarkerFilter { input }
    }
}

impl<S: TokenStream> TokenStream for StackMarkerFilter<S> {
    fn next_token(&mut self) -> Result<Option<Token>, AnalysisError> {
        match self.input.next_token()? {
            Some(mut token) => {
                if token.text.contains(STACK_MARKER) {
                    token.text.retain(|c| c != STACK_MARKER);
                }
                Ok(Some(token))
            }
            None => Ok(None),
        }
    }
}

/// An immutable set of stop words, shared read-only across pipelines.
///
/// Entries are NFC-normalized at construction so that composed and decomposed
/// spellings of a Tibetan particle match the same entry. Build one set per
/// profile at startup and reuse it; it is never mutated afterwards.
#[derive(Debug)]
pub struct StopWordSet {
    words: HashSet<String>,
    ignore_case: bool,
}

impl StopWordSet {
    /// Build a set from a list of words. With `ignore_case`, membership tests
    /// are case-insensitive.
    pub fn new<I, T>(words: I, ignore_case: bool) -> Self
    where
        I: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        let words = words
            .into_iter()
            .map(|w| {
                let normalized: String = w.as_ref().nfc().collect();
                if ignore_case {
                    normalized.to_lowercase()
                } else {
                    normalized
                }
            })
            .collect();
        StopWordSet { words, ignore_case }
    }

    /// Whether `text` matches a stop word.
    pub fn contains(&self, text: &str) -> bool {
        let normalized: String = text.nfc().collect();
        if self.ignore_case {
            self.words.contains(&normalized.to_lowercase())
        } else {
            self.words.contains(&normalized)
        }
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

/// Drops tokens whose text is in a shared [`StopWordSet`].
///
/// With position increments disabled (the default here, and what every
/// analyzer profile uses), a survivor keeps its upstream increment, so the
/// gap left by dropped stop words is invisible to phrase-position arithmetic:
/// "rgyal po dang blon po" indexes with "dang" removed and "blon" adjacent to
/// "po". With increments enabled, the increments of dropped tokens accumulate
/// onto the next survivor instead.
pub struct StopFilter<S: TokenStream> {
    input: S,
    stop_words: Arc<StopWordSet>,
    enable_position_increments: bool,
}

impl<S: TokenStream> StopFilter<S> {
    /// Wrap `input`, dropping tokens found in `stop_words`. Position
    /// increments start out disabled.
    pub fn new(input: S, stop_words: Arc<StopWordSet>) -> Self {
        StopFilter {
            input,
            stop_words,
            enable_position_increments: false,
        }
    }

    /// Accumulate dropped tokens' increments onto the next survivor.
    pub fn with_position_increments(mut self) -> Self {
        self.enable_position_increments = true;
        self
    }
}

impl<S: TokenStream> TokenStream for StopFilter<S> {
    fn next_token(&mut self) -> Result<Option<Token>, AnalysisError> {
        let mut skipped: u32 = 0;
        while let Some(mut token) = self.input.next_token()? {
            if self.stop_words.contains(&token.text) {
                skipped += token.position_increment;
                continue;
            }
            if self.enable_position_increments {
                token.position_increment += skipped;
            }
            return Ok(Some(token));
        }
        Ok(None)
    }
}

/// A table of grammatical particles stripped from token endings.
///
/// The linguistic content comes from the caller (typically loaded from a rule
/// file at startup); this type only provides the matching machinery: an
/// end-anchored alternation that prefers the longest particle. Like the stop
/// sets, a table is built once, wrapped in an `Arc` and shared read-only.
#[derive(Debug)]
pub struct SuffixRules {
    pattern: Regex,
}

impl SuffixRules {
    /// Compile a rule table from particle strings. Empty entries are ignored.
    ///
    /// Returns `None` when no usable particle is supplied, in which case the
    /// suffix stage should simply be left out of the pipeline.
    pub fn new<I, T>(particles: I) -> Option<Self>
    where
        I: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        let mut particles: Vec<String> = particles
            .into_iter()
            .map(|p| p.as_ref().nfc().collect())
            .filter(|p: &String| !p.is_empty())
            .collect();
        if particles.is_empty() {
            return None;
        }

        // Longest alternative first so "gyis" wins over "s".
        particles.sort_by(|a, b| b.chars().count().cmp(&a.chars().count()).then(a.cmp(b)));
        particles.dedup();

        let alternation: Vec<String> = particles.iter().map(|p| regex::escape(p)).collect();
        let pattern = Regex::new(&format!("(?:{})$", alternation.join("|")))
            .expect("escaped alternation is always a valid pattern");

        Some(SuffixRules { pattern })
    }

    /// Length in bytes of the particle ending `text`, if any.
    fn trailing_len(&self, text: &str) -> Option<usize> {
        self.pattern.find(text).map(|m| m.end() - m.start())
    }
}

/// Strips one trailing grammatical particle from each token.
///
/// A strict 1:1 transform: never drops, splits or merges tokens, never
/// touches offsets, and strips at most one particle per token. "sangs
/// rgyas kyis" and "sangs rgyas" normalize to the same terms when the rule
/// table carries "kyis".
pub struct SuffixFilter<S: TokenStream> {
    input: S,
    rules: Arc<SuffixRules>,
}

impl<S: TokenStream> SuffixFilter<S> {
    /// Wrap `input` in a suffix-normalization stage using `rules`.
    pub fn new(input: S, rules: Arc<SuffixRules>) -> Self {
        SuffixFilter { input, rules }
    }
}

impl<S: TokenStream> TokenStream for SuffixFilter<S> {
    fn next_token(&mut self) -> Result<Option<Token>, AnalysisError> {
        match self.input.next_token()? {
            Some(mut token) => {
                if let Some(len) = self.rules.trailing_len(&token.text) {
                    // Keep at least something of the stem; a token that is
                    // nothing but a particle is left for the stop filter.
                    if len < token.text.len() {
                        let cut = token.text.len() - len;
                        token.text.truncate(cut);
                    }
                }
                Ok(Some(token))
            }
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::Token;

    /// A canned upstream for filter tests.
    struct VecStream {
        tokens: std::vec::IntoIter<Token>,
    }

    impl VecStream {
        fn new(tokens: Vec<Token>) -> Self {
            VecStream {
                tokens: tokens.into_iter(),
            }
        }

        fn of(texts: &[&str]) -> Self {
            let tokens = texts
                .iter()
                .scan(0usize, |pos, text| {
                    let start = *pos;
                    let end = start + text.chars().count();
                    *pos = end + 1;
                    Some(Token::new(text.to_string(), start, end))
                })
                .collect();
            VecStream::new(tokens)
        }
    }

    impl TokenStream for VecStream {
        fn next_token(&mut self) -> Result<Option<Token>, AnalysisError> {
            Ok(self.tokens.next())
        }
    }

    fn drain<S: TokenStream>(mut stream: S) -> Vec<Token> {
        let mut out = Vec::new();
        while let Some(tok) = stream.next_token().unwrap() {
            out.push(tok);
        }
        out
    }

    #[test]
    fn test_stack_marker_removal() {
        let tokens = drain(StackMarkerFilter::new(VecStream::of(&["pad+ma"])));
        assert_eq!(tokens[0].text, "padma");
        assert_eq!((tokens[0].start, tokens[0].end), (0, 6));
    }

    #[test]
    fn test_stack_marker_multiple() {
        let tokens = drain(StackMarkerFilter::new(VecStream::of(&["sid+d+hi"])));
        assert_eq!(tokens[0].text, "siddhi");
    }

    #[test]
    fn test_stack_marker_idempotent_on_plain_text() {
        let tokens = drain(StackMarkerFilter::new(VecStream::of(&["padma"])));
        assert_eq!(tokens[0].text, "padma");
    }

    #[test]
    fn test_all_markers_yields_empty_passthrough() {
        let tokens = drain(StackMarkerFilter::new(VecStream::of(&["+++"])));
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].text, "");
        assert_eq!(tokens[0].width(), 3);
    }

    #[test]
    fn test_stop_filter_drops_and_hides_gap() {
        let stop = Arc::new(StopWordSet::new(["kyi"], false));
        let tokens = drain(StopFilter::new(VecStream::of(&["mo", "kyi", "pad"]), stop));
        let texts: Vec<&str> = tokens.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, vec!["mo", "pad"]);
        assert_eq!(tokens[0].position_increment, 1);
        assert_eq!(tokens[1].position_increment, 1);
    }

    #[test]
    fn test_stop_filter_with_increments_enabled() {
        let stop = Arc::new(StopWordSet::new(["kyi", "gi"], false));
        let tokens = drain(
            StopFilter::new(VecStream::of(&["mo", "kyi", "gi", "pad"]), stop)
                .with_position_increments(),
        );
        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[0].position_increment, 1);
        // Two dropped tokens accumulate onto "pad"
        assert_eq!(tokens[1].position_increment, 3);
    }

    #[test]
    fn test_stop_filter_keeps_offsets() {
        let stop = Arc::new(StopWordSet::new(["kyi"], false));
        let tokens = drain(StopFilter::new(VecStream::of(&["mo", "kyi", "pad"]), stop));
        // "pad" still carries its original span, after the dropped "kyi"
        assert_eq!((tokens[1].start, tokens[1].end), (7, 10));
    }

    #[test]
    fn test_stop_filter_all_stopped() {
        let stop = Arc::new(StopWordSet::new(["na", "la"], false));
        let tokens = drain(StopFilter::new(VecStream::of(&["na", "la"]), stop));
        assert!(tokens.is_empty());
    }

    #[test]
    fn test_stop_set_case_sensitivity() {
        let sensitive = StopWordSet::new(["dang"], false);
        assert!(sensitive.contains("dang"));
        assert!(!sensitive.contains("Dang"));

        let insensitive = StopWordSet::new(["dang"], true);
        assert!(insensitive.contains("Dang"));
        assert!(insensitive.contains("DANG"));
    }

    #[test]
    fn test_stop_set_nfc_matching() {
        // ཀྵ U+0F69 decomposes to U+0F40 U+0FB5; both spellings must match
        let set = StopWordSet::new(["\u{0F40}\u{0FB5}"], false);
        assert!(set.contains("\u{0F69}"));
        assert!(set.contains("\u{0F40}\u{0FB5}"));
    }

    #[test]
    fn test_suffix_filter_strips_longest() {
        let rules = Arc::new(SuffixRules::new(["s", "gis", "gyis"]).unwrap());
        let tokens = drain(SuffixFilter::new(VecStream::of(&["rgyalgyis"]), rules));
        assert_eq!(tokens[0].text, "rgyal");
    }

    #[test]
    fn test_suffix_filter_is_one_to_one() {
        let rules = Arc::new(SuffixRules::new(["kyis"]).unwrap());
        let tokens = drain(SuffixFilter::new(
            VecStream::of(&["rgyaskyis", "chos", "kyis"]),
            rules,
        ));
        assert_eq!(tokens.len(), 3);
        assert_eq!(tokens[0].text, "rgyas");
        assert_eq!(tokens[1].text, "chos");
        // Bare particle is left intact for the stop filter
        assert_eq!(tokens[2].text, "kyis");
    }

    #[test]
    fn test_suffix_filter_keeps_offsets() {
        let rules = Arc::new(SuffixRules::new(["s"]).unwrap());
        let tokens = drain(SuffixFilter::new(VecStream::of(&["chos"]), rules));
        assert_eq!(tokens[0].text, "cho");
        assert_eq!((tokens[0].start, tokens[0].end), (0, 4));
    }

    #[test]
    fn test_suffix_rules_reject_empty_table() {
        assert!(SuffixRules::new(Vec::<&str>::new()).is_none());
        assert!(SuffixRules::new(["", ""]).is_none());
    }

    #[test]
    fn test_filters_tolerate_zero_length_text() {
        let stop = Arc::new(StopWordSet::new(["kyi"], false));
        let rules = Arc::new(SuffixRules::new(["s"]).unwrap());
        let upstream = VecStream::new(vec![Token::new(String::new(), 0, 3)]);
        let tokens = drain(StopFilter::new(
            SuffixFilter::new(StackMarkerFilter::new(upstream), rules),
            stop,
        ));
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].text, "");
    }
}
