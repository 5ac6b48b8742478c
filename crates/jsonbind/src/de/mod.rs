//! Type-driven parsing.
//!
//! The target type picks the strategy, never the JSON being read. Every
//! parsable type implements [`JsonParse`]; the crate provides it for
//! primitives, `Option`, `Box`, the standard sequences, sets and
//! string-keyed maps. User types implement it by hand, usually in terms of
//! [`parse_object`] or [`parse_from`]. Types that cannot carry an impl are
//! parsed through an adapter, see [`Deserializable`](crate::Deserializable).
mod collections;
mod object;
mod primitive;

pub use collections::{ArrayLike, MapLike, parse_array, parse_map};
pub use object::{Field, FieldSet, FieldSlot, parse_from, parse_object, try_parse_from};

use crate::{Error, ParseResult, Token, TokenKind, TokenSource};

/// A type that knows how to read itself from a token stream.
///
/// ```rust
/// use jsonbind::{Field, JsonParse, ParseResult, TokenSource, from_str, parse_object};
///
/// #[derive(Debug, Default, PartialEq)]
/// struct Point {
///     x: i32,
///     y: i32,
///     label: Option<String>,
/// }
///
/// impl JsonParse for Point {
///     fn json_parse<S: TokenSource + ?Sized>(tokens: &mut S) -> ParseResult<Self> {
///         let mut point = Point::default();
///         parse_object(
///             tokens,
///             (
///                 Field::new("x", &mut point.x),
///                 Field::new("y", &mut point.y),
///                 Field::new("label", &mut point.label),
///             ),
///         )?;
///         Ok(point)
///     }
/// }
///
/// let point: Point = from_str(r#"{"y": 2, "x": 1}"#).unwrap();
/// assert_eq!(point, Point { x: 1, y: 2, label: None });
/// ```
pub trait JsonParse: Sized {
    /// Whether an object field of this type may be left out.
    ///
    /// Only `Option<T>` (and wrappers forwarding to it) set this.
    const OPTIONAL: bool = false;

    /// Reads exactly one JSON value.
    ///
    /// # Errors
    ///
    /// A parse error if the value does not fit `Self`, or a JSON error if the
    /// stream failed while reading it. Errors from nested values are returned
    /// unchanged.
    fn json_parse<S: TokenSource + ?Sized>(tokens: &mut S) -> ParseResult<Self>;
}

/// Parses one `T` from `tokens` with `T`'s own [`JsonParse`] impl.
///
/// # Errors
///
/// Whatever `T::json_parse` reports.
pub fn parse<T: JsonParse, S: TokenSource + ?Sized>(tokens: &mut S) -> ParseResult<T> {
    T::json_parse(tokens)
}

/// The error to report when a token was required but none arrived.
///
/// A lexer failure takes precedence and becomes a JSON error; otherwise the
/// input simply ended early.
pub fn missing_token<S: TokenSource + ?Sized>(tokens: &S) -> Error {
    match tokens.error() {
        Some(message) => Error::json(message, tokens.path()),
        None => Error::parse("Unexpected end of json", tokens.path()),
    }
}

/// Consumes the next token, failing if there is none.
///
/// # Errors
///
/// See [`missing_token`].
pub fn expect_next<S: TokenSource + ?Sized>(tokens: &mut S) -> ParseResult<Token> {
    match tokens.next() {
        Some(token) => Ok(token),
        None => Err(missing_token(tokens)),
    }
}

/// Kind of the next token, without consuming it.
///
/// # Errors
///
/// See [`missing_token`].
pub fn peek_kind<S: TokenSource + ?Sized>(tokens: &mut S) -> ParseResult<TokenKind> {
    let kind = tokens.peek().map(Token::kind);
    kind.ok_or_else(|| missing_token(tokens))
}

/// Consumes the next token and checks it is of kind `expected`.
///
/// # Errors
///
/// A parse error naming both kinds on mismatch, or see [`missing_token`].
pub fn expect_token<S: TokenSource + ?Sized>(
    tokens: &mut S,
    expected: TokenKind,
) -> ParseResult<Token> {
    let token = expect_next(tokens)?;
    if token.is(expected) {
        Ok(token)
    } else {
        Err(unexpected_token(tokens, &token, &[expected]))
    }
}

/// Builds the error for a token that is none of `expected`.
pub fn unexpected_token<S: TokenSource + ?Sized>(
    tokens: &S,
    token: &Token,
    expected: &[TokenKind],
) -> Error {
    let expected = expected
        .iter()
        .map(|kind| kind.name())
        .collect::<Vec<_>>()
        .join(", ");
    Error::parse(format!("Expected {expected}, got {}", token.name()), tokens.path())
}

impl<T: JsonParse> JsonParse for Option<T> {
    const OPTIONAL: bool = true;

    fn json_parse<S: TokenSource + ?Sized>(tokens: &mut S) -> ParseResult<Self> {
        if peek_kind(tokens)? == TokenKind::Null {
            tokens.next();
            return Ok(None);
        }
        T::json_parse(tokens).map(Some)
    }
}

impl<T: JsonParse> JsonParse for Box<T> {
    const OPTIONAL: bool = T::OPTIONAL;

    fn json_parse<S: TokenSource + ?Sized>(tokens: &mut S) -> ParseResult<Self> {
        T::json_parse(tokens).map(Box::new)
    }
}
