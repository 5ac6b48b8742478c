//! Pull-style cursor over a push-style [`Lexer`].
//!
//! [`TokenStream`] holds at most one buffered token. `peek` and `next` pull a
//! single event from the lexer only when the buffer is empty, so the lexer is
//! never more than one token ahead of the parser. Path observation happens on
//! acquisition, which means [`TokenSource::path`] describes the buffered
//! token.
use std::io::Read;

use crate::{
    JsonPath, LexerOptions, NoPath, PathObserver, Token,
    lexer::{Lexer, StreamLexer, TokenHandler},
};

/// What the typed parser consumes.
///
/// [`TokenStream`] is the implementation shipped with the crate; the trait
/// exists so parsers can be driven from any token source and tested without
/// a lexer.
pub trait TokenSource {
    /// Returns the next token without consuming it. Repeated calls return
    /// the same token.
    fn peek(&mut self) -> Option<&Token>;

    /// Consumes and returns the next token.
    ///
    /// `None` means either the input is exhausted or the source is in its
    /// error state; [`has_error`](Self::has_error) tells the two apart.
    #[allow(clippy::should_implement_trait)]
    fn next(&mut self) -> Option<Token>;

    /// Whether the underlying lexer failed. Once `true`, stays `true`.
    fn has_error(&self) -> bool {
        self.error().is_some()
    }

    /// Message of the lexer failure, if any.
    fn error(&self) -> Option<&str>;

    /// Whether every token has been consumed and the lexer has no input left.
    ///
    /// This reads only state that has already been observed. After the last
    /// token is consumed, one more [`peek`](Self::peek) or
    /// [`next`](Self::next) may be needed to let the lexer confirm that
    /// nothing follows; that call returns `None`.
    fn is_complete(&self) -> bool;

    /// Location of the buffered (or most recently consumed) token, or `None`
    /// when locations are not tracked.
    fn path(&self) -> Option<String>;
}

/// One-token buffer the lexer pushes into.
#[derive(Debug, Default)]
struct TokenSlot {
    token: Option<Token>,
}

impl TokenHandler for TokenSlot {
    fn emit(&mut self, token: Token) {
        debug_assert!(self.token.is_none(), "lexer emitted two tokens in one advance");
        self.token = Some(token);
    }
}

/// Token cursor over a [`Lexer`], optionally tracking the JSON path.
///
/// `P` selects location tracking: [`JsonPath`] (the default) renders paths
/// such as `root.items[2].name`, [`NoPath`] skips the bookkeeping.
///
/// ```rust
/// use jsonbind::{Token, TokenSource, TokenStream};
///
/// let mut tokens: TokenStream<_> = TokenStream::from_json(r#"{"a": [true]}"#);
/// assert_eq!(tokens.next(), Some(Token::StartObject));
/// assert_eq!(tokens.next(), Some(Token::Key("a".into())));
/// assert_eq!(tokens.next(), Some(Token::StartArray));
/// assert_eq!(tokens.peek(), Some(&Token::Bool(true)));
/// assert_eq!(tokens.path().as_deref(), Some("root.a[0]"));
/// ```
#[derive(Debug)]
pub struct TokenStream<L, P = JsonPath> {
    lexer: L,
    slot: TokenSlot,
    error: Option<String>,
    path: P,
}

/// A [`TokenStream`] that does not track locations.
pub type PlainTokenStream<L> = TokenStream<L, NoPath>;

impl<L: Lexer, P: PathObserver> TokenStream<L, P> {
    pub fn new(lexer: L) -> Self {
        Self {
            lexer,
            slot: TokenSlot::default(),
            error: None,
            path: P::default(),
        }
    }

    /// The wrapped lexer.
    pub fn lexer(&self) -> &L {
        &self.lexer
    }

    /// Unwraps the stream, dropping any buffered token.
    pub fn into_lexer(self) -> L {
        self.lexer
    }

    /// Ensures a token is buffered, unless the stream is done or failed.
    fn fill(&mut self) {
        if self.slot.token.is_some() || self.error.is_some() || self.lexer.is_complete() {
            return;
        }

        match self.lexer.advance(&mut self.slot) {
            Ok(()) => {
                if let Some(token) = &self.slot.token {
                    self.path.observe(token);
                } else if !self.lexer.is_complete() {
                    self.fail("Unexpected state: no token acquired, possibly a bug".to_owned());
                }
            }
            Err(error) => {
                self.slot.token = None;
                self.fail(error.to_string());
            }
        }
    }

    fn fail(&mut self, message: String) {
        log::debug!("token stream failed: {message}");
        self.error = Some(message);
    }
}

impl<'a, P: PathObserver> TokenStream<StreamLexer<&'a [u8]>, P> {
    /// Stream over a JSON document held in memory.
    pub fn from_json(json: &'a str) -> Self {
        Self::from_bytes(json.as_bytes())
    }

    pub fn from_bytes(bytes: &'a [u8]) -> Self {
        Self::from_bytes_with_options(bytes, LexerOptions::default())
    }

    pub fn from_bytes_with_options(bytes: &'a [u8], options: LexerOptions) -> Self {
        Self::new(StreamLexer::with_options(bytes, options))
    }
}

impl<R: Read, P: PathObserver> TokenStream<StreamLexer<R>, P> {
    /// Stream over any byte reader. The reader is consumed lazily, one token
    /// at a time.
    pub fn from_reader(reader: R) -> Self {
        Self::from_reader_with_options(reader, LexerOptions::default())
    }

    pub fn from_reader_with_options(reader: R, options: LexerOptions) -> Self {
        Self::new(StreamLexer::with_options(reader, options))
    }
}

impl<L: Lexer, P: PathObserver> TokenSource for TokenStream<L, P> {
    fn peek(&mut self) -> Option<&Token> {
        self.fill();
        self.slot.token.as_ref()
    }

    fn next(&mut self) -> Option<Token> {
        self.fill();
        self.slot.token.take()
    }

    fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    fn is_complete(&self) -> bool {
        self.slot.token.is_none() && self.error.is_none() && self.lexer.is_complete()
    }

    fn path(&self) -> Option<String> {
        self.path.current()
    }
}
