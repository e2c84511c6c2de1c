//! # tibsearch
//!
//! Search-token analyzers for Tibetan text, in native Tibetan script or in
//! Wylie transliteration.
//!
//! The crate segments input into normalized terms for a search index: a
//! codepoint-classifying tokenizer delimits tokens, and a chain of pull-based
//! filters normalizes orthographic variation (Sanskrit `+` stacking in
//! Wylie), strips grammatical suffix particles, and drops high-frequency stop
//! words without widening phrase-position gaps.
//!
//! ## Quick Start
//!
//! ```rust
//! use tibsearch::{Analyzer, Profile};
//!
//! let analyzer = Analyzer::new(Profile::Chunk);
//! let tokens = analyzer.analyze("pad+ma dang rig+pa").unwrap();
//!
//! // "+" is removed, the particle "dang" is dropped
//! let texts: Vec<&str> = tokens.iter().map(|t| t.text.as_str()).collect();
//! assert_eq!(texts, vec!["padma", "rigpa"]);
//! ```
//!
//! ## Tibetan script
//!
//! ```rust
//! use tibsearch::{Analyzer, Profile};
//!
//! let analyzer = Analyzer::new(Profile::TibetanWhitespace);
//! let tokens = analyzer.analyze("བཀྲ་ཤིས་བདེ་ལེགས།").unwrap();
//! assert_eq!(tokens.len(), 4);
//! ```
//!
//! ## Custom pipelines
//!
//! Each tokenizer and filter implements [`TokenStream`], so stages can be
//! composed by hand when the named profiles don't fit:
//!
//! ```rust
//! use tibsearch::{CharTokenizer, StackMarkerFilter, StrChars, TokenStream};
//!
//! let tokenizer = CharTokenizer::wylie(StrChars::new("sid+d+hi"));
//! let mut stream = StackMarkerFilter::new(tokenizer);
//! let token = stream.next_token().unwrap().unwrap();
//! assert_eq!(token.text, "siddhi");
//! ```

pub mod analyzer;
pub mod char_classes;
pub mod filters;
pub mod stream;
pub mod token;
pub mod tokenizer;

// Re-export main types for convenience
pub use analyzer::{Analyzer, Profile, TIBETAN_STOP_WORDS, WYLIE_STOP_WORDS};
pub use char_classes::{is_tibetan_letter_or_digit, is_wylie_char, CharProfile, STACK_MARKER};
pub use filters::{StackMarkerFilter, StopFilter, StopWordSet, SuffixFilter, SuffixRules};
pub use stream::{AnalysisError, CharSource, StrChars, TokenStream, Utf8Reader};
pub use token::{Token, TYPE_WORD};
pub use tokenizer::CharTokenizer;

/// Version of the library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
