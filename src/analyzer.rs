//! Analysis pipeline profiles.
//!
//! An [`Analyzer`] names a fixed composition of one tokenizer and a chain of
//! filters. Calling [`Analyzer::token_stream`] builds a fresh pipeline over
//! one input; the only state shared between pipelines is the immutable stop
//! sets and suffix rule tables.

use std::io::Read;
use std::sync::Arc;

use once_cell::sync::Lazy;

use crate::filters::{StackMarkerFilter, StopFilter, StopWordSet, SuffixFilter, SuffixRules};
use crate::stream::{AnalysisError, CharSource, StrChars, TokenStream, Utf8Reader};
use crate::token::Token;
use crate::tokenizer::CharTokenizer;

/// Wylie grammatical particles excluded from indexing.
///
/// Genitive/agentive particles, the la-don group, final emphatic particles
/// and "dang".
static WYLIE_STOP_WORDS_LIST: &[&str] = &[
    "gi", "kyi", "gyi", "yi", "gis", "kyis", "gyis", "yis", // genitive, agentive
    "su", "ru", "ra", "du", "na", "la", "tu", // la-don
    "go", "ngo", "do", "no", "po", "mo", "ro", "lo", "so", "to", // final particles
    "dang",
];

/// Tibetan-script stop words: གིས ཀྱིས གྱིས ཡིས ན.
static TIBETAN_STOP_WORDS_LIST: &[&str] = &[
    "\u{0F42}\u{0F72}\u{0F66}",
    "\u{0F40}\u{0FB1}\u{0F72}\u{0F66}",
    "\u{0F42}\u{0FB1}\u{0F72}\u{0F66}",
    "\u{0F61}\u{0F72}\u{0F66}",
    "\u{0F53}",
];

/// The shared stop set for Wylie text, built on first use.
pub static WYLIE_STOP_WORDS: Lazy<Arc<StopWordSet>> =
    Lazy::new(|| Arc::new(StopWordSet::new(WYLIE_STOP_WORDS_LIST, false)));

/// The shared stop set for Tibetan-script text, built on first use.
pub static TIBETAN_STOP_WORDS: Lazy<Arc<StopWordSet>> =
    Lazy::new(|| Arc::new(StopWordSet::new(TIBETAN_STOP_WORDS_LIST, false)));

/// The named pipeline compositions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Profile {
    /// Wylie tokenizer, stack-marker removal, suffix normalization, Wylie
    /// stop words.
    #[default]
    Chunk,
    /// Tibetan-script tokenizer alone; raw segmentation, no normalization.
    TibetanWhitespace,
    /// Tibetan-script tokenizer, suffix normalization, Tibetan stop words.
    TibetanFiltered,
}

impl Profile {
    /// Parse a profile name as used by the CLI.
    pub fn from_name(name: &str) -> Option<Profile> {
        match name {
            "chunk" => Some(Profile::Chunk),
            "tibetan" => Some(Profile::TibetanWhitespace),
            "tibetan-filtered" => Some(Profile::TibetanFiltered),
            _ => None,
        }
    }
}

/// A reusable pipeline factory for one [`Profile`].
///
/// The analyzer itself holds no per-document state; every `token_stream`
/// call creates an independent tokenizer/filter chain over its own input.
/// Suffix rule tables are linguistic data supplied by the caller; when a
/// profile has none, its suffix stage is skipped.
pub struct Analyzer {
    profile: Profile,
    stop_words: Option<Arc<StopWordSet>>,
    suffix_rules: Option<Arc<SuffixRules>>,
    /// Host-engine compatibility tag; accepted and remembered, but the
    /// analysis behavior does not depend on it.
    match_version: Option<String>,
}

impl Analyzer {
    /// Create an analyzer for `profile` with its default stop set and no
    /// suffix rules.
    pub fn new(profile: Profile) -> Self {
        Analyzer {
            profile,
            stop_words: None,
            suffix_rules: None,
            match_version: None,
        }
    }

    /// Replace the profile's default stop set.
    pub fn with_stop_words(mut self, stop_words: Arc<StopWordSet>) -> Self {
        self.stop_words = Some(stop_words);
        self
    }

    /// Supply the suffix-normalization rule table for this profile.
    pub fn with_suffix_rules(mut self, rules: Arc<SuffixRules>) -> Self {
        self.suffix_rules = Some(rules);
        self
    }

    /// Record a host-engine compatibility tag.
    pub fn with_match_version(mut self, tag: impl Into<String>) -> Self {
        self.match_version = Some(tag.into());
        self
    }

    /// The compatibility tag, if one was set.
    pub fn match_version(&self) -> Option<&str> {
        self.match_version.as_deref()
    }

    /// The profile this analyzer composes.
    pub fn profile(&self) -> Profile {
        self.profile
    }

    fn stop_set(&self) -> Arc<StopWordSet> {
        if let Some(ref set) = self.stop_words {
            return Arc::clone(set);
        }
        match self.profile {
            Profile::Chunk => Arc::clone(&WYLIE_STOP_WORDS),
            Profile::TibetanWhitespace | Profile::TibetanFiltered => {
                Arc::clone(&TIBETAN_STOP_WORDS)
            }
        }
    }

    fn build<'a, S: CharSource + 'a>(&self, source: S) -> Box<dyn TokenStream + 'a> {
        match self.profile {
            Profile::Chunk => {
                let tokenizer = CharTokenizer::wylie(source);
                let stripped = StackMarkerFilter::new(tokenizer);
                match self.suffix_rules {
                    Some(ref rules) => Box::new(StopFilter::new(
                        SuffixFilter::new(stripped, Arc::clone(rules)),
                        self.stop_set(),
                    )),
                    None => Box::new(StopFilter::new(stripped, self.stop_set())),
                }
            }
            Profile::TibetanWhitespace => Box::new(CharTokenizer::tibetan(source)),
            Profile::TibetanFiltered => {
                let tokenizer = CharTokenizer::tibetan(source);
                match self.suffix_rules {
                    Some(ref rules) => Box::new(StopFilter::new(
                        SuffixFilter::new(tokenizer, Arc::clone(rules)),
                        self.stop_set(),
                    )),
                    None => Box::new(StopFilter::new(tokenizer, self.stop_set())),
                }
            }
        }
    }

    /// Build a fresh pipeline over a borrowed string.
    pub fn token_stream<'a>(&self, text: &'a str) -> Box<dyn TokenStream + 'a> {
        self.build(StrChars::new(text))
    }

    /// Build a fresh pipeline over a byte reader, decoding UTF-8 as it goes.
    pub fn token_stream_from_reader<R: Read + 'static>(&self, reader: R) -> Box<dyn TokenStream> {
        self.build(Utf8Reader::new(reader))
    }

    /// Analyze a whole string, collecting all surviving tokens.
    pub fn analyze(&self, text: &str) -> Result<Vec<Token>, AnalysisError> {
        let mut stream = self.token_stream(text);
        let mut tokens = Vec::new();
        while let Some(token) = stream.next_token()? {
            tokens.push(token);
        }
        Ok(tokens)
    }
}
