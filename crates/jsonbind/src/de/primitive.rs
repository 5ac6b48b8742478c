//! Scalars: one token in, one value out.
//!
//! Each primitive lists the token kinds it accepts, in the order they are
//! tried. Integers widen through `i128` so the range check is exact for
//! every source/target combination.
use super::{JsonParse, expect_next};
use crate::{Error, ParseResult, Token, TokenKind, TokenSource};

const INTEGER_TOKENS: &[TokenKind] = &[
    TokenKind::Int,
    TokenKind::Uint,
    TokenKind::Int64,
    TokenKind::Uint64,
    TokenKind::Double,
    TokenKind::RawNumber,
];

const FLOAT_TOKENS: &[TokenKind] = &[
    TokenKind::Int,
    TokenKind::Uint,
    TokenKind::Int64,
    TokenKind::Uint64,
    TokenKind::Double,
    TokenKind::RawNumber,
];

/// Outcome of converting a single token.
enum Conversion<T> {
    Value(T),
    /// The token kind is accepted but its value does not fit.
    Invalid(&'static str),
}

trait Primitive: Sized {
    /// Token kinds this type can be read from.
    const ACCEPTS: &'static [TokenKind];

    /// Converts a token whose kind is in [`ACCEPTS`](Self::ACCEPTS).
    fn from_token(token: Token) -> Conversion<Self>;
}

fn parse_primitive<T: Primitive, S: TokenSource + ?Sized>(tokens: &mut S) -> ParseResult<T> {
    let token = expect_next(tokens)?;
    if !T::ACCEPTS.contains(&token.kind()) {
        return Err(Error::parse(format!("Unexpected {}", token.name()), tokens.path()));
    }
    match T::from_token(token) {
        Conversion::Value(value) => Ok(value),
        Conversion::Invalid(message) => Err(Error::parse(message, tokens.path())),
    }
}

impl Primitive for bool {
    const ACCEPTS: &'static [TokenKind] = &[TokenKind::Bool];

    fn from_token(token: Token) -> Conversion<Self> {
        match token {
            Token::Bool(value) => Conversion::Value(value),
            _ => Conversion::Invalid("Expected bool"),
        }
    }
}

/// What an integer target makes of a numeric token.
enum Integral {
    Value(i128),
    /// Integral, but wider than anything the targets can hold.
    TooWide,
    /// Not an integer at all.
    Fraction,
    Malformed,
}

/// Widens an integral token.
fn integer_value(token: &Token) -> Integral {
    match *token {
        Token::Int(value) => Integral::Value(value.into()),
        Token::Uint(value) => Integral::Value(value.into()),
        Token::Int64(value) => Integral::Value(value.into()),
        Token::Uint64(value) => Integral::Value(value.into()),
        // Literals past 64 bits reach the parser as doubles.
        #[allow(clippy::cast_possible_truncation, clippy::float_cmp)]
        Token::Double(value) if value.is_finite() && value.fract() == 0.0 => {
            // Saturates, which no target can hold either.
            Integral::Value(value as i128)
        }
        Token::Double(_) => Integral::Fraction,
        Token::RawNumber(ref text) => match text.parse() {
            Ok(value) => Integral::Value(value),
            Err(_) if is_integer_literal(text) => Integral::TooWide,
            Err(_) => Integral::Malformed,
        },
        _ => Integral::Malformed,
    }
}

fn is_integer_literal(text: &str) -> bool {
    let digits = text.strip_prefix('-').unwrap_or(text);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

macro_rules! impl_integer {
    ($($t:ty),+ $(,)?) => {
        $(
            impl Primitive for $t {
                const ACCEPTS: &'static [TokenKind] = INTEGER_TOKENS;

                fn from_token(token: Token) -> Conversion<Self> {
                    let is_double = token.is(TokenKind::Double);
                    let value = match integer_value(&token) {
                        Integral::Value(value) => value,
                        Integral::TooWide => {
                            return Conversion::Invalid("Integer value not in range");
                        }
                        Integral::Fraction => return Conversion::Invalid("Unexpected double"),
                        Integral::Malformed => return Conversion::Invalid("Expected integer"),
                    };
                    match <$t>::try_from(value) {
                        // Doubles only stand in for integers that overflow the target.
                        Ok(_) if is_double => Conversion::Invalid("Unexpected double"),
                        Ok(value) => Conversion::Value(value),
                        Err(_) => Conversion::Invalid("Integer value not in range"),
                    }
                }
            }

            impl JsonParse for $t {
                fn json_parse<S: TokenSource + ?Sized>(tokens: &mut S) -> ParseResult<Self> {
                    parse_primitive(tokens)
                }
            }
        )+
    };
}
impl_integer!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

macro_rules! impl_float {
    ($($t:ty),+ $(,)?) => {
        $(
            impl Primitive for $t {
                const ACCEPTS: &'static [TokenKind] = FLOAT_TOKENS;

                #[allow(
                    clippy::cast_lossless,
                    clippy::cast_possible_truncation,
                    clippy::cast_precision_loss,
                    clippy::unnecessary_cast
                )]
                fn from_token(token: Token) -> Conversion<Self> {
                    let value: $t = match token {
                        Token::Int(value) => value as $t,
                        Token::Uint(value) => value as $t,
                        Token::Int64(value) => value as $t,
                        Token::Uint64(value) => value as $t,
                        Token::Double(value) => value as $t,
                        Token::RawNumber(text) => match text.parse() {
                            Ok(value) => value,
                            Err(_) => return Conversion::Invalid("Expected number"),
                        },
                        _ => return Conversion::Invalid("Expected number"),
                    };
                    // JSON numbers are finite; overflowing the target is not.
                    if value.is_finite() {
                        Conversion::Value(value)
                    } else {
                        Conversion::Invalid("Float value not in range")
                    }
                }
            }

            impl JsonParse for $t {
                fn json_parse<S: TokenSource + ?Sized>(tokens: &mut S) -> ParseResult<Self> {
                    parse_primitive(tokens)
                }
            }
        )+
    };
}
impl_float!(f32, f64);

impl Primitive for String {
    const ACCEPTS: &'static [TokenKind] = &[TokenKind::String, TokenKind::RawNumber];

    fn from_token(token: Token) -> Conversion<Self> {
        match token {
            Token::String(value) | Token::RawNumber(value) => Conversion::Value(value),
            _ => Conversion::Invalid("Expected string"),
        }
    }
}

impl JsonParse for bool {
    fn json_parse<S: TokenSource + ?Sized>(tokens: &mut S) -> ParseResult<Self> {
        parse_primitive(tokens)
    }
}

impl JsonParse for String {
    fn json_parse<S: TokenSource + ?Sized>(tokens: &mut S) -> ParseResult<Self> {
        parse_primitive(tokens)
    }
}
