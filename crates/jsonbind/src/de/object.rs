//! Objects with a fixed set of named fields.
//!
//! A [`Field`] binds a JSON key to a slot inside the value being built. The
//! fields of one object travel as a tuple, so their number and types are
//! known at compile time and no field is boxed. Keys may come in any order;
//! unknown and repeated keys are rejected, and every field that is not
//! optional must be present.
use core::marker::PhantomData;
use std::collections::HashMap;

use super::{JsonParse, expect_next, expect_token, unexpected_token};
use crate::{Deserializable, Error, Own, ParseResult, Token, TokenKind, TokenSource};

/// Binds the JSON key `name` to `slot` for the duration of one
/// [`parse_object`] call.
///
/// `P` is the parse strategy: [`Own`] uses the slot type's [`JsonParse`]
/// impl, an adapter selected with [`via`](Self::via) replaces it. A field is
/// optional exactly when its strategy says so, which for [`Own`] means the
/// slot is an `Option<_>`.
pub struct Field<'a, T, P = Own> {
    name: &'a str,
    slot: &'a mut T,
    set: bool,
    strategy: PhantomData<fn() -> P>,
}

impl<'a, T> Field<'a, T> {
    pub fn new(name: &'a str, slot: &'a mut T) -> Self {
        Self {
            name,
            slot,
            set: false,
            strategy: PhantomData,
        }
    }
}

impl<'a, T, P> Field<'a, T, P> {
    /// Parses this field through the adapter `A` instead.
    #[must_use]
    pub fn via<A: Deserializable<T>>(self) -> Field<'a, T, A> {
        Field {
            name: self.name,
            slot: self.slot,
            set: self.set,
            strategy: PhantomData,
        }
    }
}

/// One entry of a [`FieldSet`], erased of its slot type.
pub trait FieldSlot {
    fn name(&self) -> &str;

    /// Whether the field may be missing from the input.
    fn is_optional(&self) -> bool;

    /// Whether a value has been stored.
    fn is_set(&self) -> bool;

    /// Set, or allowed to stay unset.
    fn is_ready(&self) -> bool {
        self.is_set() || self.is_optional()
    }

    /// Parses one value into the slot and marks the field set.
    ///
    /// # Errors
    ///
    /// The value's parse error; the slot is left untouched.
    fn set<S: TokenSource + ?Sized>(&mut self, tokens: &mut S) -> ParseResult<()>;
}

impl<T, P: Deserializable<T>> FieldSlot for Field<'_, T, P> {
    fn name(&self) -> &str {
        self.name
    }

    fn is_optional(&self) -> bool {
        P::OPTIONAL
    }

    fn is_set(&self) -> bool {
        self.set
    }

    fn set<S: TokenSource + ?Sized>(&mut self, tokens: &mut S) -> ParseResult<()> {
        *self.slot = P::parse(tokens)?;
        self.set = true;
        Ok(())
    }
}

/// A fixed, ordered collection of fields, addressed by position.
///
/// Implemented for `()` and for tuples of up to sixteen [`FieldSlot`]s.
pub trait FieldSet {
    /// Number of fields.
    const LEN: usize;

    fn name(&self, index: usize) -> &str;

    fn is_set(&self, index: usize) -> bool;

    fn is_ready(&self, index: usize) -> bool;

    /// Parses the value of the field at `index`.
    ///
    /// # Errors
    ///
    /// The field's parse error.
    fn parse_nth<S: TokenSource + ?Sized>(
        &mut self,
        index: usize,
        tokens: &mut S,
    ) -> ParseResult<()>;
}

fn no_such_field<S: TokenSource + ?Sized>(index: usize, tokens: &S) -> Error {
    Error::parse(
        format!("Unexpected error: no field at index {index}, possibly a bug"),
        tokens.path(),
    )
}

impl FieldSet for () {
    const LEN: usize = 0;

    fn name(&self, _index: usize) -> &str {
        ""
    }

    fn is_set(&self, _index: usize) -> bool {
        false
    }

    fn is_ready(&self, _index: usize) -> bool {
        true
    }

    fn parse_nth<S: TokenSource + ?Sized>(
        &mut self,
        index: usize,
        tokens: &mut S,
    ) -> ParseResult<()> {
        Err(no_such_field(index, tokens))
    }
}

macro_rules! impl_field_set {
    ($len:literal; $($F:ident: $idx:tt),+) => {
        impl<$($F: FieldSlot),+> FieldSet for ($($F,)+) {
            const LEN: usize = $len;

            fn name(&self, index: usize) -> &str {
                match index {
                    $($idx => self.$idx.name(),)+
                    _ => "",
                }
            }

            fn is_set(&self, index: usize) -> bool {
                match index {
                    $($idx => self.$idx.is_set(),)+
                    _ => false,
                }
            }

            fn is_ready(&self, index: usize) -> bool {
                match index {
                    $($idx => self.$idx.is_ready(),)+
                    _ => true,
                }
            }

            fn parse_nth<S: TokenSource + ?Sized>(
                &mut self,
                index: usize,
                tokens: &mut S,
            ) -> ParseResult<()> {
                match index {
                    $($idx => self.$idx.set(tokens),)+
                    _ => Err(no_such_field(index, tokens)),
                }
            }
        }
    };
}

impl_field_set!(1; F0: 0);
impl_field_set!(2; F0: 0, F1: 1);
impl_field_set!(3; F0: 0, F1: 1, F2: 2);
impl_field_set!(4; F0: 0, F1: 1, F2: 2, F3: 3);
impl_field_set!(5; F0: 0, F1: 1, F2: 2, F3: 3, F4: 4);
impl_field_set!(6; F0: 0, F1: 1, F2: 2, F3: 3, F4: 4, F5: 5);
impl_field_set!(7; F0: 0, F1: 1, F2: 2, F3: 3, F4: 4, F5: 5, F6: 6);
impl_field_set!(8; F0: 0, F1: 1, F2: 2, F3: 3, F4: 4, F5: 5, F6: 6, F7: 7);
impl_field_set!(9; F0: 0, F1: 1, F2: 2, F3: 3, F4: 4, F5: 5, F6: 6, F7: 7, F8: 8);
impl_field_set!(10; F0: 0, F1: 1, F2: 2, F3: 3, F4: 4, F5: 5, F6: 6, F7: 7, F8: 8, F9: 9);
impl_field_set!(11; F0: 0, F1: 1, F2: 2, F3: 3, F4: 4, F5: 5, F6: 6, F7: 7, F8: 8, F9: 9, F10: 10);
impl_field_set!(12; F0: 0, F1: 1, F2: 2, F3: 3, F4: 4, F5: 5, F6: 6, F7: 7, F8: 8, F9: 9, F10: 10,
    F11: 11);
impl_field_set!(13; F0: 0, F1: 1, F2: 2, F3: 3, F4: 4, F5: 5, F6: 6, F7: 7, F8: 8, F9: 9, F10: 10,
    F11: 11, F12: 12);
impl_field_set!(14; F0: 0, F1: 1, F2: 2, F3: 3, F4: 4, F5: 5, F6: 6, F7: 7, F8: 8, F9: 9, F10: 10,
    F11: 11, F12: 12, F13: 13);
impl_field_set!(15; F0: 0, F1: 1, F2: 2, F3: 3, F4: 4, F5: 5, F6: 6, F7: 7, F8: 8, F9: 9, F10: 10,
    F11: 11, F12: 12, F13: 13, F14: 14);
impl_field_set!(16; F0: 0, F1: 1, F2: 2, F3: 3, F4: 4, F5: 5, F6: 6, F7: 7, F8: 8, F9: 9, F10: 10,
    F11: 11, F12: 12, F13: 13, F14: 14, F15: 15);

/// Reads a JSON object whose members are described by `fields`.
///
/// Each member's value is parsed straight into its field's slot. Parsing
/// stops at the first error; slots filled before it keep their new values.
///
/// # Errors
///
/// - `Unexpected key: <key>` for a key that names no field.
/// - `Duplicate key: <key>` for a key seen twice.
/// - `Missing keys: <a, b>, got end object` when the object closes before
///   every required field was seen.
/// - Any error raised while parsing a member's value, unchanged.
pub fn parse_object<F: FieldSet, S: TokenSource + ?Sized>(
    tokens: &mut S,
    mut fields: F,
) -> ParseResult<()> {
    log::trace!("parse_object: {} fields", F::LEN);
    expect_token(tokens, TokenKind::StartObject)?;

    let lookup: HashMap<String, usize> = (0..F::LEN)
        .map(|index| (fields.name(index).to_owned(), index))
        .collect();

    loop {
        match expect_next(tokens)? {
            Token::Key(key) => {
                let Some(&index) = lookup.get(&key) else {
                    return Err(Error::parse(format!("Unexpected key: {key}"), tokens.path()));
                };
                if fields.is_set(index) {
                    return Err(Error::parse(format!("Duplicate key: {key}"), tokens.path()));
                }
                fields.parse_nth(index, tokens)?;
            }
            token @ Token::EndObject(_) => {
                let missing = (0..F::LEN)
                    .filter(|&index| !fields.is_ready(index))
                    .map(|index| fields.name(index))
                    .collect::<Vec<_>>();
                if missing.is_empty() {
                    return Ok(());
                }
                return Err(Error::parse(
                    format!("Missing keys: {}, got {}", missing.join(", "), token.name()),
                    tokens.path(),
                ));
            }
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

/// Parses a `T`, then converts it with `convert`.
///
/// For types stored as a single JSON value of another type.
///
/// # Errors
///
/// The error from parsing the `T`.
pub fn parse_from<T, U, S, F>(tokens: &mut S, convert: F) -> ParseResult<U>
where
    T: JsonParse,
    S: TokenSource + ?Sized,
    F: FnOnce(T) -> U,
{
    T::json_parse(tokens).map(convert)
}

/// Parses a `T`, then converts it with a fallible `convert`.
///
/// Whatever `convert` returns, success or error, is returned as is.
///
/// ```rust
/// use jsonbind::{Error, JsonParse, ParseResult, TokenSource, from_str, try_parse_from};
///
/// #[derive(Debug, PartialEq)]
/// struct Tag(String);
///
/// impl JsonParse for Tag {
///     fn json_parse<S: TokenSource + ?Sized>(tokens: &mut S) -> ParseResult<Self> {
///         try_parse_from(tokens, |text: String| match text.strip_prefix('#') {
///             Some(tag) => Ok(Tag(tag.to_owned())),
///             None => Err(Error::parse(format!("Tag without '#': {text}"), None)),
///         })
///     }
/// }
///
/// assert_eq!(from_str::<Tag>(r##""#rust""##), Ok(Tag("rust".into())));
/// assert!(from_str::<Tag>(r#""rust""#).is_err());
/// ```
///
/// # Errors
///
/// The error from parsing the `T`, or the one `convert` returned.
pub fn try_parse_from<T, U, S, F>(tokens: &mut S, convert: F) -> ParseResult<U>
where
    T: JsonParse,
    S: TokenSource + ?Sized,
    F: FnOnce(T) -> ParseResult<U>,
{
    T::json_parse(tokens).and_then(convert)
}

#[cfg(test)]
mod test {
    use rstest::rstest;

    use super::*;
    use crate::{TokenStream, parse_with};

    #[derive(Debug, Default, PartialEq)]
    struct Account {
        id: u32,
        name: String,
        email: Option<String>,
    }

    impl JsonParse for Account {
        fn json_parse<S: TokenSource + ?Sized>(tokens: &mut S) -> ParseResult<Self> {
            let mut account = Self::default();
            parse_object(
                tokens,
                (
                    Field::new("id", &mut account.id),
                    Field::new("name", &mut account.name),
                    Field::new("email", &mut account.email),
                ),
            )?;
            Ok(account)
        }
    }

    fn parse_json<T: JsonParse>(json: &str) -> ParseResult<T> {
        let mut tokens: TokenStream<_> = TokenStream::from_json(json);
        crate::parse(&mut tokens)
    }

    #[test]
    fn keys_in_any_order() {
        let account = parse_json::<Account>(r#"{"name": "ann", "id": 7}"#).unwrap();
        assert_eq!(
            account,
            Account {
                id: 7,
                name: "ann".into(),
                email: None,
            }
        );
    }

    #[test]
    fn optional_field_accepts_null() {
        let account = parse_json::<Account>(r#"{"id": 1, "name": "", "email": null}"#).unwrap();
        assert_eq!(account.email, None);
    }

    #[rstest]
    #[case("{}", "Missing keys: id, name, got end object at root")]
    #[case(r#"{"id": 1}"#, "Missing keys: name, got end object at root")]
    #[case(r#"{"id": 1, "id": 2}"#, "Duplicate key: id at root.id")]
    #[case(r#"{"id": 1, "other": 2}"#, "Unexpected key: other at root.other")]
    #[case(r#"{"id": "1"}"#, "Unexpected string at root.id")]
    #[case("[]", "Expected start object, got start array at root")]
    fn rejected_objects(#[case] json: &str, #[case] expected: &str) {
        let error = parse_json::<Account>(json).unwrap_err();
        assert!(error.is_parse_error());
        assert_eq!(error.to_string(), expected);
    }

    #[test]
    fn duplicate_null_of_optional_field() {
        let error =
            parse_json::<Account>(r#"{"id": 1, "name": "", "email": null, "email": null}"#)
                .unwrap_err();
        assert_eq!(error.message(), "Duplicate key: email");
    }

    #[test]
    fn zero_fields_accept_only_an_empty_object() {
        let mut tokens: TokenStream<_> = TokenStream::from_json("{}");
        assert_eq!(parse_object(&mut tokens, ()), Ok(()));

        let mut tokens: TokenStream<_> = TokenStream::from_json(r#"{"a": 1}"#);
        let error = parse_object(&mut tokens, ()).unwrap_err();
        assert_eq!(error.to_string(), "Unexpected key: a at root.a");
    }

    struct Percent;

    impl Deserializable<u8> for Percent {
        fn parse<S: TokenSource + ?Sized>(tokens: &mut S) -> ParseResult<u8> {
            let value = f64::json_parse(tokens)?;
            if !(0.0..=1.0).contains(&value) {
                return Err(Error::parse("Expected a fraction", tokens.path()));
            }
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            let percent = (value * 100.0).round() as u8;
            Ok(percent)
        }
    }

    #[test]
    fn field_via_adapter() {
        let mut level = 0u8;
        let mut tokens: TokenStream<_> = TokenStream::from_json(r#"{"level": 0.25}"#);
        parse_object(&mut tokens, (Field::new("level", &mut level).via::<Percent>(),)).unwrap();
        assert_eq!(level, 25);

        let mut tokens: TokenStream<_> = TokenStream::from_json("2");
        assert!(parse_with::<Percent, u8, _>(&mut tokens).is_err());
    }

    #[test]
    fn parse_from_converts() {
        let mut tokens: TokenStream<_> = TokenStream::from_json(r#""abc""#);
        let length = parse_from(&mut tokens, |text: String| text.len());
        assert_eq!(length, Ok(3));
    }

    #[test]
    fn try_parse_from_passes_errors_through() {
        let mut tokens: TokenStream<_> = TokenStream::from_json("-3");
        let result: ParseResult<u32> = try_parse_from(&mut tokens, |value: i64| {
            u32::try_from(value).map_err(|_| Error::parse("negative", None))
        });
        assert_eq!(result, Err(Error::parse("negative", None)));
    }
}
