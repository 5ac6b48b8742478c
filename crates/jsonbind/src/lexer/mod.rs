//! The push side of the token pipeline.
//!
//! A [`Lexer`] turns some input into [`Token`]s, pushing them one at a time
//! into a [`TokenHandler`]. [`TokenStream`](crate::TokenStream) drives a lexer
//! with a one-slot handler to obtain pull-style lookahead.
//!
//! Two lexers are provided: [`StreamLexer`] reads JSON bytes, and
//! [`ReplayLexer`] replays tokens recorded earlier, for example by a
//! [`TokenRecorder`](crate::TokenRecorder).
mod stream;

use std::collections::VecDeque;

pub use stream::StreamLexer;

use crate::{LexError, Token};

/// Receives lexical events, one call per event.
///
/// Every event funnels into [`emit`](Self::emit); the per-event methods exist
/// so lexers can report events without building tokens themselves.
pub trait TokenHandler {
    /// Accept one token.
    fn emit(&mut self, token: Token);

    fn null(&mut self) {
        self.emit(Token::Null);
    }

    fn bool(&mut self, value: bool) {
        self.emit(Token::Bool(value));
    }

    fn int(&mut self, value: i32) {
        self.emit(Token::Int(value));
    }

    fn uint(&mut self, value: u32) {
        self.emit(Token::Uint(value));
    }

    fn int64(&mut self, value: i64) {
        self.emit(Token::Int64(value));
    }

    fn uint64(&mut self, value: u64) {
        self.emit(Token::Uint64(value));
    }

    fn double(&mut self, value: f64) {
        self.emit(Token::Double(value));
    }

    fn raw_number(&mut self, text: String) {
        self.emit(Token::RawNumber(text));
    }

    fn string(&mut self, value: String) {
        self.emit(Token::String(value));
    }

    fn start_object(&mut self) {
        self.emit(Token::StartObject);
    }

    fn key(&mut self, key: String) {
        self.emit(Token::Key(key));
    }

    fn end_object(&mut self, members: u32) {
        self.emit(Token::EndObject(members));
    }

    fn start_array(&mut self) {
        self.emit(Token::StartArray);
    }

    fn end_array(&mut self, elements: u32) {
        self.emit(Token::EndArray(elements));
    }
}

/// A resumable, one-event-at-a-time tokenizer.
pub trait Lexer {
    /// Push at most one event into `handler`.
    ///
    /// Returning `Ok(())` without pushing an event is only legal once
    /// [`is_complete`](Self::is_complete) is `true`. A lexer may need one
    /// such advance after the last event to confirm nothing else follows.
    ///
    /// # Errors
    ///
    /// [`LexError::Syntax`] on malformed input. An error is terminal: the
    /// lexer pushes nothing afterwards and later calls fail as well.
    fn advance<H: TokenHandler>(&mut self, handler: &mut H) -> Result<(), LexError>;

    /// Whether the whole input has been tokenized. Never `true` after an
    /// error.
    fn is_complete(&self) -> bool;
}

/// Replays a recorded token sequence.
///
/// No structural validation is performed: the tokens are trusted to
/// describe a single well-formed value.
#[derive(Debug, Clone, Default)]
pub struct ReplayLexer {
    tokens: VecDeque<Token>,
}

impl ReplayLexer {
    pub fn new(tokens: impl IntoIterator<Item = Token>) -> Self {
        Self {
            tokens: tokens.into_iter().collect(),
        }
    }
}

impl Lexer for ReplayLexer {
    fn advance<H: TokenHandler>(&mut self, handler: &mut H) -> Result<(), LexError> {
        if let Some(token) = self.tokens.pop_front() {
            handler.emit(token);
        }
        Ok(())
    }

    fn is_complete(&self) -> bool {
        self.tokens.is_empty()
    }
}
