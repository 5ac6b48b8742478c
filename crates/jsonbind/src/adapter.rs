//! Out-of-band parse and dump support.
//!
//! [`JsonParse`] and [`JsonDump`] must be implemented by the type itself.
//! When that is impossible (a type from another crate) or undesirable (a
//! second wire format for the same type), implement [`Deserializable`] and
//! [`Serializable`] on a marker type instead and select it explicitly with
//! [`parse_with`], [`dump_with`], [`Field::via`](crate::Field::via) or the
//! [`Adapted`] wrapper.
//!
//! A type's own impl always wins: [`parse`](crate::parse) and
//! [`dump`](crate::dump) never consult an adapter.
//!
//! ```rust
//! use std::time::Duration;
//!
//! use jsonbind::{Adapted, Deserializable, ParseResult, TokenSource, from_str, parse};
//!
//! /// Durations as a number of milliseconds.
//! struct Millis;
//!
//! impl Deserializable<Duration> for Millis {
//!     fn parse<S: TokenSource + ?Sized>(tokens: &mut S) -> ParseResult<Duration> {
//!         parse::<u64, _>(tokens).map(Duration::from_millis)
//!     }
//! }
//!
//! let timeouts: Vec<Adapted<Duration, Millis>> = from_str("[250, 1000]").unwrap();
//! assert_eq!(*timeouts[1], Duration::from_secs(1));
//! ```
use core::{fmt, marker::PhantomData, ops::Deref};

use crate::{DumpResult, JsonDump, JsonParse, JsonWriter, ParseResult, TokenSource};

/// Parses a `T` on behalf of a type that does not implement [`JsonParse`].
pub trait Deserializable<T> {
    /// Whether an object field parsed through this adapter may be left out.
    const OPTIONAL: bool = false;

    /// Reads exactly one JSON value as a `T`.
    ///
    /// # Errors
    ///
    /// Same contract as [`JsonParse::json_parse`].
    fn parse<S: TokenSource + ?Sized>(tokens: &mut S) -> ParseResult<T>;
}

/// Dumps a `T` on behalf of a type that does not implement [`JsonDump`].
pub trait Serializable<T: ?Sized> {
    /// Writes `value` as exactly one JSON value.
    ///
    /// # Errors
    ///
    /// Same contract as [`JsonDump::json_dump`].
    fn dump<W: JsonWriter + ?Sized>(value: &T, writer: &mut W) -> DumpResult;
}

/// The strategy that defers to the type's own [`JsonParse`] / [`JsonDump`].
#[derive(Debug, Clone, Copy, Default)]
pub struct Own;

impl<T: JsonParse> Deserializable<T> for Own {
    const OPTIONAL: bool = T::OPTIONAL;

    fn parse<S: TokenSource + ?Sized>(tokens: &mut S) -> ParseResult<T> {
        T::json_parse(tokens)
    }
}

impl<T: JsonDump + ?Sized> Serializable<T> for Own {
    fn dump<W: JsonWriter + ?Sized>(value: &T, writer: &mut W) -> DumpResult {
        value.json_dump(writer)
    }
}

/// Parses a `T` through the adapter `A`.
///
/// # Errors
///
/// Whatever `A::parse` reports.
pub fn parse_with<A: Deserializable<T>, T, S: TokenSource + ?Sized>(
    tokens: &mut S,
) -> ParseResult<T> {
    A::parse(tokens)
}

/// Dumps `value` through the adapter `A`.
///
/// # Errors
///
/// Whatever `A::dump` reports.
pub fn dump_with<A: Serializable<T>, T: ?Sized, W: JsonWriter + ?Sized>(
    value: &T,
    writer: &mut W,
) -> DumpResult {
    A::dump(value, writer)
}

/// A `T` that parses and dumps through the adapter `A`.
///
/// Useful where an adapter cannot be named directly, such as the element
/// type of a container.
pub struct Adapted<T, A> {
    value: T,
    adapter: PhantomData<fn() -> A>,
}

impl<T, A> Adapted<T, A> {
    pub const fn new(value: T) -> Self {
        Self {
            value,
            adapter: PhantomData,
        }
    }

    pub fn into_inner(self) -> T {
        self.value
    }
}

impl<T, A> From<T> for Adapted<T, A> {
    fn from(value: T) -> Self {
        Self::new(value)
    }
}

impl<T, A> Deref for Adapted<T, A> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.value
    }
}

impl<T: fmt::Debug, A> fmt::Debug for Adapted<T, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Adapted").field(&self.value).finish()
    }
}

impl<T: Clone, A> Clone for Adapted<T, A> {
    fn clone(&self) -> Self {
        Self::new(self.value.clone())
    }
}

impl<T: PartialEq, A> PartialEq for Adapted<T, A> {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl<T, A: Deserializable<T>> JsonParse for Adapted<T, A> {
    const OPTIONAL: bool = A::OPTIONAL;

    fn json_parse<S: TokenSource + ?Sized>(tokens: &mut S) -> ParseResult<Self> {
        A::parse(tokens).map(Self::new)
    }
}

impl<T, A: Serializable<T>> JsonDump for Adapted<T, A> {
    fn json_dump<W: JsonWriter + ?Sized>(&self, writer: &mut W) -> DumpResult {
        A::dump(&self.value, writer)
    }
}
