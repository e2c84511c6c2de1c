//! Token representation for analyzed text.
//!
//! A Token is one normalized search term together with the source span it
//! came from and its position bookkeeping for phrase queries.

use serde::Serialize;

/// The default type tag for tokens produced by the character tokenizers.
pub const TYPE_WORD: &str = "word";

/// A single token emitted by an analysis pipeline.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Token {
    /// The term text. Filters may shrink this in place (down to empty), but
    /// it never grows past what the tokenizer emitted.
    pub text: String,

    /// Char offset of the first constituent codepoint in the original input.
    ///
    /// Offsets are fixed at tokenization time and always describe the span in
    /// the *original* input, even after filters shorten the text. Offset
    /// based highlighting operates on the original text, not on the
    /// normalized term.
    pub start: usize,

    /// Char offset one past the last constituent codepoint.
    pub end: usize,

    /// Position gap to the previous emitted token; 1 for adjacent tokens,
    /// 0 for "same position as predecessor".
    pub position_increment: u32,

    /// Classification label for the token.
    pub token_type: &'static str,
}

impl Token {
    /// Create a token with the default increment and type tag.
    pub fn new(text: String, start: usize, end: usize) -> Self {
        Token {
            text,
            start,
            end,
            position_increment: 1,
            token_type: TYPE_WORD,
        }
    }

    /// Width of the original span in chars. Unlike [`Token::text`], this
    /// never shrinks during filtering.
    pub fn width(&self) -> usize {
        self.end - self.start
    }
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} [{}..{}]", self.text, self.start, self.end)
    }
}
