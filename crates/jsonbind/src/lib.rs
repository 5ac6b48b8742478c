//! Type-driven JSON parsing and dumping over a streaming token cursor.
//!
//! There is no intermediate document tree. Parsing pulls [`Token`]s from a
//! [`TokenStream`] and lets the *target type* decide what it expects next;
//! dumping visits a value by its static type and pushes events into a
//! [`JsonWriter`]. Errors name the location at which they were detected,
//! e.g. `Unexpected bool at root.inners[0].str`.
//!
//! ```rust
//! use std::collections::BTreeMap;
//!
//! let scores: BTreeMap<String, Vec<u8>> = jsonbind::from_str(r#"{"ann": [9, 7]}"#).unwrap();
//! assert_eq!(scores["ann"], [9, 7]);
//! assert_eq!(jsonbind::to_string(&scores).unwrap(), r#"{"ann":[9,7]}"#);
//!
//! let error = jsonbind::from_str::<Vec<u8>>("[1, 256]").unwrap_err();
//! assert_eq!(error.to_string(), "Integer value not in range at root[1]");
//! ```
#![allow(missing_docs)]

mod adapter;
pub mod de;
mod error;
mod lexer;
mod options;
mod path;
pub mod ser;
mod stream;
mod token;
mod writer;

use std::io::{Read, Write};

pub use adapter::{Adapted, Deserializable, Own, Serializable, dump_with, parse_with};
pub use de::{
    ArrayLike, Field, FieldSet, FieldSlot, JsonParse, MapLike, parse, parse_array, parse_from,
    parse_map, parse_object, try_parse_from,
};
pub use error::{DumpResult, Error, ErrorKind, LexError, ParseResult, WriteError};
pub use lexer::{Lexer, ReplayLexer, StreamLexer, TokenHandler};
pub use options::LexerOptions;
#[doc(hidden)]
pub use path::PathSegment;
pub use path::{JsonPath, NoPath, PathFrame, PathObserver};
pub use ser::{JsonDump, dump};
pub use stream::{PlainTokenStream, TokenSource, TokenStream};
pub use token::{Token, TokenKind};
pub use writer::{JsonWriter, StreamWriter, TokenRecorder};

/// Parses a whole JSON document into a `T`.
///
/// # Errors
///
/// A JSON error for malformed input (including anything but whitespace after
/// the value), a parse error when the document does not fit `T`.
pub fn from_str<T: JsonParse>(json: &str) -> ParseResult<T> {
    from_slice(json.as_bytes())
}

/// Like [`from_str`], for bytes.
///
/// # Errors
///
/// See [`from_str`].
pub fn from_slice<T: JsonParse>(bytes: &[u8]) -> ParseResult<T> {
    from_slice_with_options(bytes, LexerOptions::default())
}

/// Like [`from_slice`], with a configured lexer.
///
/// # Errors
///
/// See [`from_str`].
pub fn from_slice_with_options<T: JsonParse>(
    bytes: &[u8],
    options: LexerOptions,
) -> ParseResult<T> {
    let mut tokens: TokenStream<_> = TokenStream::from_bytes_with_options(bytes, options);
    from_tokens(&mut tokens)
}

/// Parses a whole JSON document read from `reader`.
///
/// # Errors
///
/// See [`from_str`]. I/O failures are reported as JSON errors.
pub fn from_reader<R: Read, T: JsonParse>(reader: R) -> ParseResult<T> {
    let mut tokens: TokenStream<_> = TokenStream::from_reader(reader);
    from_tokens(&mut tokens)
}

/// Parses one `T` and checks that `tokens` holds nothing after it.
///
/// # Errors
///
/// Whatever parsing `T` reports, then `Unexpected trailing tokens` if the
/// source still has tokens, or the source's own error.
pub fn from_tokens<T: JsonParse, S: TokenSource + ?Sized>(tokens: &mut S) -> ParseResult<T> {
    let value = T::json_parse(tokens)?;
    if tokens.peek().is_some() {
        return Err(Error::parse("Unexpected trailing tokens", tokens.path()));
    }
    if let Some(message) = tokens.error() {
        return Err(Error::json(message, tokens.path()));
    }
    Ok(value)
}

/// Writes `value` as compact JSON text.
///
/// # Errors
///
/// [`WriteError::InvalidNumber`] for a NaN or infinite float.
pub fn to_string<T: JsonDump + ?Sized>(value: &T) -> Result<String, WriteError> {
    Ok(String::from_utf8(to_vec(value)?)?)
}

/// Writes `value` as compact JSON bytes.
///
/// # Errors
///
/// See [`to_string`].
pub fn to_vec<T: JsonDump + ?Sized>(value: &T) -> Result<Vec<u8>, WriteError> {
    let mut out = Vec::new();
    to_writer(&mut out, value)?;
    Ok(out)
}

/// Writes `value` as compact JSON into `output`.
///
/// # Errors
///
/// See [`to_string`], plus any I/O error from `output`.
pub fn to_writer<W: Write, T: JsonDump + ?Sized>(output: W, value: &T) -> DumpResult {
    let mut writer = StreamWriter::new(output);
    value.json_dump(&mut writer)?;
    writer.finish()
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn trailing_data_is_a_json_error() {
        let error = from_str::<u8>("1 2").unwrap_err();
        assert!(error.is_json_error(), "{error}");
    }

    #[test]
    fn replayed_trailing_tokens_are_rejected() {
        let mut tokens: TokenStream<_> =
            TokenStream::new(ReplayLexer::new([Token::Bool(true), Token::Null]));
        let error = from_tokens::<bool, _>(&mut tokens).unwrap_err();
        assert_eq!(error.to_string(), "Unexpected trailing tokens at root");
    }

    #[test]
    fn reads_from_io() {
        let value: Vec<Option<i64>> = from_reader(&b"[null, -9000000000]"[..]).unwrap();
        assert_eq!(value, [None, Some(-9_000_000_000)]);
    }

    #[test]
    fn nan_cannot_be_written() {
        assert!(matches!(
            to_string(&[1.0, f64::NAN]),
            Err(WriteError::InvalidNumber(_))
        ));
    }
}
