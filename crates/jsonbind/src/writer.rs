//! The output side of the token vocabulary.
//!
//! [`JsonWriter`] is what [`JsonDump`](crate::JsonDump) impls write into.
//! [`StreamWriter`] serializes to bytes through `struson`;
//! [`TokenRecorder`] keeps the [`Token`]s instead.
use std::io;

use struson::writer::{JsonNumberError, JsonStreamWriter, JsonWriter as _};

use crate::{DumpResult, Token, WriteError, lexer::ReplayLexer};

/// Sink for lexical JSON events.
///
/// Callers are expected to emit a well-formed sequence: one top-level
/// value, keys only directly inside objects, balanced brackets.
pub trait JsonWriter {
    fn null(&mut self) -> DumpResult;
    fn boolean(&mut self, value: bool) -> DumpResult;
    fn int(&mut self, value: i32) -> DumpResult;
    fn uint(&mut self, value: u32) -> DumpResult;
    fn int64(&mut self, value: i64) -> DumpResult;
    fn uint64(&mut self, value: u64) -> DumpResult;
    /// # Errors
    ///
    /// [`WriteError::InvalidNumber`] for NaN and infinities, when the sink
    /// produces JSON text.
    fn double(&mut self, value: f64) -> DumpResult;
    fn string(&mut self, value: &str) -> DumpResult;
    fn start_object(&mut self) -> DumpResult;
    fn key(&mut self, key: &str) -> DumpResult;
    fn end_object(&mut self) -> DumpResult;
    fn start_array(&mut self) -> DumpResult;
    fn end_array(&mut self) -> DumpResult;
}

/// Compact JSON text written to an [`io::Write`].
///
/// Misuse of the event sequence (a value where a key is required, a second
/// top-level value) is a bug in the caller and panics.
pub struct StreamWriter<W: io::Write> {
    inner: JsonStreamWriter<W>,
}

impl<W: io::Write> StreamWriter<W> {
    pub fn new(output: W) -> Self {
        Self {
            inner: JsonStreamWriter::new(output),
        }
    }

    /// Flushes buffered output. The document must be complete.
    ///
    /// # Errors
    ///
    /// The I/O error raised while flushing.
    pub fn finish(self) -> DumpResult {
        self.inner.finish_document()?;
        Ok(())
    }
}

impl<W: io::Write> JsonWriter for StreamWriter<W> {
    fn null(&mut self) -> DumpResult {
        Ok(self.inner.null_value()?)
    }

    fn boolean(&mut self, value: bool) -> DumpResult {
        Ok(self.inner.bool_value(value)?)
    }

    fn int(&mut self, value: i32) -> DumpResult {
        Ok(self.inner.number_value(value)?)
    }

    fn uint(&mut self, value: u32) -> DumpResult {
        Ok(self.inner.number_value(value)?)
    }

    fn int64(&mut self, value: i64) -> DumpResult {
        Ok(self.inner.number_value(value)?)
    }

    fn uint64(&mut self, value: u64) -> DumpResult {
        Ok(self.inner.number_value(value)?)
    }

    fn double(&mut self, value: f64) -> DumpResult {
        self.inner.fp_number_value(value).map_err(|error| match error {
            JsonNumberError::InvalidNumber(message) => WriteError::InvalidNumber(message),
            JsonNumberError::IoError(error) => WriteError::Io(error),
        })
    }

    fn string(&mut self, value: &str) -> DumpResult {
        Ok(self.inner.string_value(value)?)
    }

    fn start_object(&mut self) -> DumpResult {
        Ok(self.inner.begin_object()?)
    }

    fn key(&mut self, key: &str) -> DumpResult {
        Ok(self.inner.name(key)?)
    }

    fn end_object(&mut self) -> DumpResult {
        Ok(self.inner.end_object()?)
    }

    fn start_array(&mut self) -> DumpResult {
        Ok(self.inner.begin_array()?)
    }

    fn end_array(&mut self) -> DumpResult {
        Ok(self.inner.end_array()?)
    }
}

#[derive(Debug, Clone, Copy)]
enum Open {
    Object(u32),
    Array(u32),
}

/// Records written events as [`Token`]s, end tokens carrying their element
/// counts the way a lexer reports them.
///
/// ```rust
/// use jsonbind::{Token, TokenRecorder, dump};
///
/// let mut recorder = TokenRecorder::new();
/// dump(&vec![Some(1u8), None], &mut recorder).unwrap();
/// assert_eq!(
///     recorder.tokens(),
///     [Token::StartArray, Token::Uint(1), Token::Null, Token::EndArray(2)]
/// );
/// ```
#[derive(Debug, Clone, Default)]
pub struct TokenRecorder {
    tokens: Vec<Token>,
    open: Vec<Open>,
}

impl TokenRecorder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    #[must_use]
    pub fn into_tokens(self) -> Vec<Token> {
        self.tokens
    }

    /// A lexer that replays everything recorded so far.
    #[must_use]
    pub fn into_lexer(self) -> ReplayLexer {
        ReplayLexer::new(self.tokens)
    }

    fn value(&mut self, token: Token) -> DumpResult {
        if let Some(Open::Array(count)) = self.open.last_mut() {
            *count = count.saturating_add(1);
        }
        self.tokens.push(token);
        Ok(())
    }
}

impl JsonWriter for TokenRecorder {
    fn null(&mut self) -> DumpResult {
        self.value(Token::Null)
    }

    fn boolean(&mut self, value: bool) -> DumpResult {
        self.value(Token::Bool(value))
    }

    fn int(&mut self, value: i32) -> DumpResult {
        self.value(Token::Int(value))
    }

    fn uint(&mut self, value: u32) -> DumpResult {
        self.value(Token::Uint(value))
    }

    fn int64(&mut self, value: i64) -> DumpResult {
        self.value(Token::Int64(value))
    }

    fn uint64(&mut self, value: u64) -> DumpResult {
        self.value(Token::Uint64(value))
    }

    fn double(&mut self, value: f64) -> DumpResult {
        self.value(Token::Double(value))
    }

    fn string(&mut self, value: &str) -> DumpResult {
        self.value(Token::String(value.to_owned()))
    }

    fn start_object(&mut self) -> DumpResult {
        self.value(Token::StartObject)?;
        self.open.push(Open::Object(0));
        Ok(())
    }

    fn key(&mut self, key: &str) -> DumpResult {
        if let Some(Open::Object(count)) = self.open.last_mut() {
            *count = count.saturating_add(1);
        }
        self.tokens.push(Token::Key(key.to_owned()));
        Ok(())
    }

    fn end_object(&mut self) -> DumpResult {
        let members = match self.open.pop() {
            Some(Open::Object(count)) => count,
            _ => 0,
        };
        self.tokens.push(Token::EndObject(members));
        Ok(())
    }

    fn start_array(&mut self) -> DumpResult {
        self.value(Token::StartArray)?;
        self.open.push(Open::Array(0));
        Ok(())
    }

    fn end_array(&mut self) -> DumpResult {
        let elements = match self.open.pop() {
            Some(Open::Array(count)) => count,
            _ => 0,
        };
        self.tokens.push(Token::EndArray(elements));
        Ok(())
    }
}
