//! Streaming primitives shared by tokenizers and filters.
//!
//! Input is consumed codepoint by codepoint through [`CharSource`]; tokens
//! flow downstream through [`TokenStream`]. Both are strictly pull-based and
//! single-pass: every call either yields the next item, signals a clean end
//! with `Ok(None)`, or fails fatally for this analysis call.

use std::io::Read;

use crate::token::Token;

/// Errors that can occur while analyzing an input stream.
///
/// All variants are fatal to the pipeline instance that produced them; there
/// is no retry or partial recovery. Other pipeline instances and the shared
/// stop-word sets are unaffected.
#[derive(Debug)]
pub enum AnalysisError {
    /// Read failure in the underlying input stream.
    Io(String),
    /// The input bytes are not valid UTF-8.
    InvalidUtf8 {
        /// Byte offset of the offending sequence.
        offset: usize,
    },
}

impl std::fmt::Display for AnalysisError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AnalysisError::Io(msg) => write!(f, "IO error: {}", msg),
            AnalysisError::InvalidUtf8 { offset } => {
                write!(f, "invalid UTF-8 at byte offset {}", offset)
            }
        }
    }
}

impl std::error::Error for AnalysisError {}

/// A sequential source of codepoints.
///
/// `Ok(None)` signals end of input. A source is not restartable; once it
/// returns `None` or an error it stays exhausted.
pub trait CharSource {
    /// Read the next codepoint, if any.
    fn next_char(&mut self) -> Result<Option<char>, AnalysisError>;
}

/// An infallible [`CharSource`] over a borrowed string.
pub struct StrChars<'a> {
    chars: std::str::Chars<'a>,
}

impl<'a> StrChars<'a> {
    /// Create a source reading `text` from the beginning.
    pub fn new(text: &'a str) -> Self {
        StrChars {
            chars: text.chars(),
        }
    }
}

impl<'a> CharSource for StrChars<'a> {
    fn next_char(&mut self) -> Result<Option<char>, AnalysisError> {
        Ok(self.chars.next())
    }
}

/// A [`CharSource`] that incrementally decodes UTF-8 from any reader.
///
/// Wrap the reader in a `BufReader` for anything bigger than a test string;
/// this type reads one codepoint at a time.
pub struct Utf8Reader<R: Read> {
    inner: R,
    /// Byte offset of the next unread byte, for error reporting.
    byte_pos: usize,
}

impl<R: Read> Utf8Reader<R> {
    /// Create a decoding source over `inner`.
    pub fn new(inner: R) -> Self {
        Utf8Reader { inner, byte_pos: 0 }
    }

    fn read_byte(&mut self) -> Result<Option<u8>, AnalysisError> {
        let mut buf = [0u8; 1];
        loop {
            match self.inner.read(&mut buf) {
                Ok(0) => return Ok(None),
                Ok(_) => {
                    self.byte_pos += 1;
                    return Ok(Some(buf[0]));
                }
                Err(ref e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(AnalysisError::Io(e.to_string())),
            }
        }
    }
}

impl<R: Read> CharSource for Utf8Reader<R> {
    fn next_char(&mut self) -> Result<Option<char>, AnalysisError> {
        let start = self.byte_pos;
        let first = match self.read_byte()? {
            Some(b) => b,
            None => return Ok(None),
        };

        let len = match first {
            0x00..=0x7F => return Ok(Some(first as char)),
            0xC0..=0xDF => 2,
            0xE0..=0xEF => 3,
            0xF0..=0xF7 => 4,
            _ => return Err(AnalysisError::InvalidUtf8 { offset: start }),
        };

        let mut bytes = [first, 0, 0, 0];
        for slot in bytes.iter_mut().take(len).skip(1) {
            *slot = match self.read_byte()? {
                Some(b) => b,
                // Truncated sequence at end of input
                None => return Err(AnalysisError::InvalidUtf8 { offset: start }),
            };
        }

        match std::str::from_utf8(&bytes[..len]) {
            Ok(s) => Ok(s.chars().next()),
            Err(_) => Err(AnalysisError::InvalidUtf8 { offset: start }),
        }
    }
}

/// The capability interface every tokenizer and filter implements.
///
/// A pipeline is built by nesting values of this trait: each filter owns its
/// upstream stage and pulls from it on demand. `Ok(None)` is the clean
/// end-of-stream signal; after an `Err` the stream must not be pulled again.
pub trait TokenStream {
    /// Pull the next token from this stage.
    fn next_token(&mut self) -> Result<Option<Token>, AnalysisError>;
}

impl<T: TokenStream + ?Sized> TokenStream for Box<T> {
    fn next_token(&mut self) -> Result<Option<Token>, AnalysisError> {
        (**self).next_token()
    }
}
