//! Lexical JSON events.
//!
//! A [`Token`] is one event produced by a [`Lexer`](crate::Lexer): a scalar
//! value, an object key, or a structural bracket. Integers arrive already
//! classified into the narrowest of four widths, the way the lexer saw them.
//!
//! ```
//! use jsonbind::{Token, TokenKind};
//!
//! let token = Token::Key("name".to_string());
//! assert_eq!(token.kind(), TokenKind::Key);
//! assert_eq!(token.name(), "key");
//! ```
use core::fmt;

/// One lexical JSON event.
#[cfg_attr(any(test, feature = "serde"), derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    Null,
    Bool(bool),
    /// Integer that fits in `i32`. The lexer only uses it for negative
    /// values; writers also use it for zero.
    Int(i32),
    /// Non-negative integer that fits in `u32`.
    Uint(u32),
    /// Negative integer that fits in `i64` but not `i32`.
    Int64(i64),
    /// Non-negative integer that fits in `u64` but not `u32`.
    Uint64(u64),
    /// Any number with a fraction or exponent, or an integer too wide for
    /// 64 bits.
    Double(f64),
    /// Unclassified number text, only produced when the lexer is configured
    /// with [`LexerOptions::raw_numbers`](crate::LexerOptions::raw_numbers).
    RawNumber(String),
    String(String),
    StartObject,
    Key(String),
    /// End of an object, carrying the number of members it had.
    EndObject(u32),
    StartArray,
    /// End of an array, carrying the number of elements it had.
    EndArray(u32),
}

/// The tag of a [`Token`], without its payload.
#[cfg_attr(any(test, feature = "serde"), derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Null,
    Bool,
    Int,
    Uint,
    Int64,
    Uint64,
    Double,
    RawNumber,
    String,
    StartObject,
    Key,
    EndObject,
    StartArray,
    EndArray,
}

impl TokenKind {
    /// Human readable name used in error messages.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool => "bool",
            Self::Int => "int",
            Self::Uint => "uint",
            Self::Int64 => "int64",
            Self::Uint64 => "uint64",
            Self::Double => "double",
            Self::RawNumber => "number",
            Self::String => "string",
            Self::StartObject => "start object",
            Self::Key => "key",
            Self::EndObject => "end object",
            Self::StartArray => "start array",
            Self::EndArray => "end array",
        }
    }

    /// Returns `true` for the kinds that carry a number.
    #[must_use]
    pub const fn is_number(self) -> bool {
        matches!(
            self,
            Self::Int | Self::Uint | Self::Int64 | Self::Uint64 | Self::Double | Self::RawNumber
        )
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Token {
    /// Returns the tag of this token.
    #[must_use]
    pub const fn kind(&self) -> TokenKind {
        match self {
            Self::Null => TokenKind::Null,
            Self::Bool(_) => TokenKind::Bool,
            Self::Int(_) => TokenKind::Int,
            Self::Uint(_) => TokenKind::Uint,
            Self::Int64(_) => TokenKind::Int64,
            Self::Uint64(_) => TokenKind::Uint64,
            Self::Double(_) => TokenKind::Double,
            Self::RawNumber(_) => TokenKind::RawNumber,
            Self::String(_) => TokenKind::String,
            Self::StartObject => TokenKind::StartObject,
            Self::Key(_) => TokenKind::Key,
            Self::EndObject(_) => TokenKind::EndObject,
            Self::StartArray => TokenKind::StartArray,
            Self::EndArray(_) => TokenKind::EndArray,
        }
    }

    /// Name of this token's kind, see [`TokenKind::name`].
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.kind().name()
    }

    /// Returns `true` if this token is of the given kind.
    #[must_use]
    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind() == kind
    }
}
