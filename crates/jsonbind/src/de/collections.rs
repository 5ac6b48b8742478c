use std::{
    collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque},
    hash::{BuildHasher, Hash},
};

use super::{JsonParse, expect_next, expect_token, peek_kind, unexpected_token};
use crate::{ParseResult, Token, TokenKind, TokenSource};

/// A container parsed from a JSON array.
///
/// Implement this for a custom container and forward its
/// [`JsonParse::json_parse`] to [`parse_array`].
pub trait ArrayLike: Default {
    type Item: JsonParse;

    /// Adds one parsed element. Sequences append, sets insert.
    fn push_item(&mut self, item: Self::Item);
}

/// A string-keyed container parsed from a JSON object.
pub trait MapLike: Default {
    type Value: JsonParse;

    /// Adds one parsed member. When a key repeats, the first value is kept.
    fn insert_entry(&mut self, key: String, value: Self::Value);
}

/// Reads `[ item, ... ]` into `C`.
///
/// # Errors
///
/// A parse error if the next token is not a start-array token, or the first
/// error raised by an element.
pub fn parse_array<C: ArrayLike, S: TokenSource + ?Sized>(tokens: &mut S) -> ParseResult<C> {
    log::trace!("parse_array: {}", core::any::type_name::<C>());
    expect_token(tokens, TokenKind::StartArray)?;

    let mut container = C::default();
    while peek_kind(tokens)? != TokenKind::EndArray {
        container.push_item(<C::Item as JsonParse>::json_parse(tokens)?);
    }
    tokens.next();
    Ok(container)
}

/// Reads `{ "key": value, ... }` into `C`.
///
/// # Errors
///
/// A parse error if the next token is not a start-object token, or the first
/// error raised by a value.
pub fn parse_map<C: MapLike, S: TokenSource + ?Sized>(tokens: &mut S) -> ParseResult<C> {
    log::trace!("parse_map: {}", core::any::type_name::<C>());
    expect_token(tokens, TokenKind::StartObject)?;

    let mut container = C::default();
    loop {
        match expect_next(tokens)? {
            Token::Key(key) => {
                let value = <C::Value as JsonParse>::json_parse(tokens)?;
                container.insert_entry(key, value);
            }
            Token::EndObject(_) => return Ok(container),
            token => {
                return Err(unexpected_token(
                    tokens,
                    &token,
                    &[TokenKind::Key, TokenKind::EndObject],
                ));
            }
        }
    }
}

impl<T: JsonParse> ArrayLike for Vec<T> {
    type Item = T;

    fn push_item(&mut self, item: T) {
        self.push(item);
    }
}

impl<T: JsonParse> ArrayLike for VecDeque<T> {
    type Item = T;

    fn push_item(&mut self, item: T) {
        self.push_back(item);
    }
}

impl<T: JsonParse + Ord> ArrayLike for BTreeSet<T> {
    type Item = T;

    fn push_item(&mut self, item: T) {
        self.insert(item);
    }
}

impl<T: JsonParse + Eq + Hash, H: BuildHasher + Default> ArrayLike for HashSet<T, H> {
    type Item = T;

    fn push_item(&mut self, item: T) {
        self.insert(item);
    }
}

impl<V: JsonParse> MapLike for BTreeMap<String, V> {
    type Value = V;

    fn insert_entry(&mut self, key: String, value: V) {
        self.entry(key).or_insert(value);
    }
}

impl<V: JsonParse, H: BuildHasher + Default> MapLike for HashMap<String, V, H> {
    type Value = V;

    fn insert_entry(&mut self, key: String, value: V) {
        self.entry(key).or_insert(value);
    }
}

macro_rules! impl_parse_via {
    ($parse:ident => $([$($generics:tt)*] $t:ty),+ $(,)?) => {
        $(
            impl<$($generics)*> JsonParse for $t {
                fn json_parse<S: TokenSource + ?Sized>(tokens: &mut S) -> ParseResult<Self> {
                    $parse(tokens)
                }
            }
        )+
    };
}

impl_parse_via!(parse_array =>
    [T: JsonParse] Vec<T>,
    [T: JsonParse] VecDeque<T>,
    [T: JsonParse + Ord] BTreeSet<T>,
    [T: JsonParse + Eq + Hash, H: BuildHasher + Default] HashSet<T, H>,
);

impl_parse_via!(parse_map =>
    [V: JsonParse] BTreeMap<String, V>,
    [V: JsonParse, H: BuildHasher + Default] HashMap<String, V, H>,
);
