//! Type-driven dumping, the mirror of [`de`](crate::de).
//!
//! Unlike parsing, nothing here inspects JSON: a value is visited according
//! to its static type and every visit emits a fixed event shape.
mod object;

use std::{
    collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque},
    hash::BuildHasher,
};

pub use object::{DumpField, DumpFieldSet, Field, dump_object};

use crate::{DumpResult, JsonWriter};

/// A type that knows how to write itself as one JSON value.
///
/// ```rust
/// use jsonbind::{DumpResult, JsonDump, JsonWriter, ser, to_string};
///
/// struct Point {
///     x: i32,
///     y: i32,
/// }
///
/// impl JsonDump for Point {
///     fn json_dump<W: JsonWriter + ?Sized>(&self, writer: &mut W) -> DumpResult {
///         ser::dump_object(writer, (ser::Field::new("x", &self.x), ser::Field::new("y", &self.y)))
///     }
/// }
///
/// assert_eq!(to_string(&Point { x: 1, y: -2 }).unwrap(), r#"{"x":1,"y":-2}"#);
/// ```
pub trait JsonDump {
    /// # Errors
    ///
    /// Whatever the writer reports.
    fn json_dump<W: JsonWriter + ?Sized>(&self, writer: &mut W) -> DumpResult;
}

/// Writes `value` into `writer` with `T`'s own [`JsonDump`] impl.
///
/// # Errors
///
/// Whatever the writer reports.
pub fn dump<T: JsonDump + ?Sized, W: JsonWriter + ?Sized>(value: &T, writer: &mut W) -> DumpResult {
    value.json_dump(writer)
}

/// Writes an integer using the narrowest event able to hold it.
///
/// Width follows the runtime value, not the static type: `5u64` is written
/// as a `uint`, `-5i64` as an `int`.
///
/// # Errors
///
/// Whatever the writer reports.
pub fn write_integer<W: JsonWriter + ?Sized>(value: i128, writer: &mut W) -> DumpResult {
    if value > 0 {
        if let Ok(value) = u32::try_from(value) {
            return writer.uint(value);
        }
        if let Ok(value) = u64::try_from(value) {
            return writer.uint64(value);
        }
    } else {
        if let Ok(value) = i32::try_from(value) {
            return writer.int(value);
        }
        if let Ok(value) = i64::try_from(value) {
            return writer.int64(value);
        }
    }
    // Wider than 64 bits.
    #[allow(clippy::cast_precision_loss)]
    let value = value as f64;
    writer.double(value)
}

impl JsonDump for bool {
    fn json_dump<W: JsonWriter + ?Sized>(&self, writer: &mut W) -> DumpResult {
        writer.boolean(*self)
    }
}

macro_rules! impl_dump_integer {
    ($($t:ty),+ $(,)?) => {
        $(
            impl JsonDump for $t {
                #[allow(clippy::cast_lossless, clippy::cast_possible_wrap)]
                fn json_dump<W: JsonWriter + ?Sized>(&self, writer: &mut W) -> DumpResult {
                    write_integer(*self as i128, writer)
                }
            }
        )+
    };
}
impl_dump_integer!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

impl JsonDump for f32 {
    fn json_dump<W: JsonWriter + ?Sized>(&self, writer: &mut W) -> DumpResult {
        writer.double(f64::from(*self))
    }
}

impl JsonDump for f64 {
    fn json_dump<W: JsonWriter + ?Sized>(&self, writer: &mut W) -> DumpResult {
        writer.double(*self)
    }
}

impl JsonDump for str {
    fn json_dump<W: JsonWriter + ?Sized>(&self, writer: &mut W) -> DumpResult {
        writer.string(self)
    }
}

impl JsonDump for String {
    fn json_dump<W: JsonWriter + ?Sized>(&self, writer: &mut W) -> DumpResult {
        writer.string(self)
    }
}

impl<T: JsonDump + ?Sized> JsonDump for &T {
    fn json_dump<W: JsonWriter + ?Sized>(&self, writer: &mut W) -> DumpResult {
        (**self).json_dump(writer)
    }
}

impl<T: JsonDump + ?Sized> JsonDump for Box<T> {
    fn json_dump<W: JsonWriter + ?Sized>(&self, writer: &mut W) -> DumpResult {
        (**self).json_dump(writer)
    }
}

impl<T: JsonDump> JsonDump for Option<T> {
    fn json_dump<W: JsonWriter + ?Sized>(&self, writer: &mut W) -> DumpResult {
        match self {
            Some(value) => value.json_dump(writer),
            None => writer.null(),
        }
    }
}

/// Writes every item of `items` as one JSON array.
///
/// # Errors
///
/// Whatever the writer reports.
pub fn dump_array<'a, T, I, W>(items: I, writer: &mut W) -> DumpResult
where
    T: JsonDump + 'a,
    I: IntoIterator<Item = &'a T>,
    W: JsonWriter + ?Sized,
{
    writer.start_array()?;
    for item in items {
        item.json_dump(writer)?;
    }
    writer.end_array()
}

/// Writes `(key, value)` pairs as one JSON object, in iteration order.
///
/// # Errors
///
/// Whatever the writer reports.
pub fn dump_map<'a, K, V, I, W>(entries: I, writer: &mut W) -> DumpResult
where
    K: AsRef<str> + 'a,
    V: JsonDump + 'a,
    I: IntoIterator<Item = (&'a K, &'a V)>,
    W: JsonWriter + ?Sized,
{
    log::trace!("dump_map");
    writer.start_object()?;
    for (key, value) in entries {
        writer.key(key.as_ref())?;
        value.json_dump(writer)?;
    }
    writer.end_object()
}

impl<T: JsonDump> JsonDump for [T] {
    fn json_dump<W: JsonWriter + ?Sized>(&self, writer: &mut W) -> DumpResult {
        dump_array(self, writer)
    }
}

impl<T: JsonDump, const N: usize> JsonDump for [T; N] {
    fn json_dump<W: JsonWriter + ?Sized>(&self, writer: &mut W) -> DumpResult {
        dump_array(self, writer)
    }
}

impl<T: JsonDump> JsonDump for Vec<T> {
    fn json_dump<W: JsonWriter + ?Sized>(&self, writer: &mut W) -> DumpResult {
        dump_array(self, writer)
    }
}

impl<T: JsonDump> JsonDump for VecDeque<T> {
    fn json_dump<W: JsonWriter + ?Sized>(&self, writer: &mut W) -> DumpResult {
        dump_array(self, writer)
    }
}

impl<T: JsonDump> JsonDump for BTreeSet<T> {
    fn json_dump<W: JsonWriter + ?Sized>(&self, writer: &mut W) -> DumpResult {
        dump_array(self, writer)
    }
}

impl<T: JsonDump, H: BuildHasher> JsonDump for HashSet<T, H> {
    fn json_dump<W: JsonWriter + ?Sized>(&self, writer: &mut W) -> DumpResult {
        dump_array(self, writer)
    }
}

impl<V: JsonDump> JsonDump for BTreeMap<String, V> {
    fn json_dump<W: JsonWriter + ?Sized>(&self, writer: &mut W) -> DumpResult {
        dump_map(self, writer)
    }
}

impl<V: JsonDump, H: BuildHasher> JsonDump for HashMap<String, V, H> {
    fn json_dump<W: JsonWriter + ?Sized>(&self, writer: &mut W) -> DumpResult {
        dump_map(self, writer)
    }
}

#[cfg(test)]
mod test {
    use rstest::rstest;

    use super::*;
    use crate::{Token, TokenRecorder};

    fn record<T: JsonDump + ?Sized>(value: &T) -> Vec<Token> {
        let mut recorder = TokenRecorder::new();
        dump(value, &mut recorder).unwrap();
        recorder.into_tokens()
    }

    #[rstest]
    #[case(0, Token::Int(0))]
    #[case(1, Token::Uint(1))]
    #[case(-1, Token::Int(-1))]
    #[case(i128::from(u32::MAX), Token::Uint(u32::MAX))]
    #[case(i128::from(u32::MAX) + 1, Token::Uint64(1 << 32))]
    #[case(i128::from(i32::MIN), Token::Int(i32::MIN))]
    #[case(i128::from(i32::MIN) - 1, Token::Int64(-(1 << 31) - 1))]
    #[case(i128::from(u64::MAX), Token::Uint64(u64::MAX))]
    #[case(i128::from(i64::MIN), Token::Int64(i64::MIN))]
    fn integers_use_the_narrowest_event(#[case] value: i128, #[case] expected: Token) {
        let mut recorder = TokenRecorder::new();
        write_integer(value, &mut recorder).unwrap();
        assert_eq!(recorder.into_tokens(), [expected]);
    }

    #[test]
    fn width_follows_the_value_not_the_type() {
        assert_eq!(record(&7u64), [Token::Uint(7)]);
        assert_eq!(record(&-7i64), [Token::Int(-7)]);
        assert_eq!(record(&0u8), [Token::Int(0)]);
    }

    #[test]
    fn options_and_references() {
        assert_eq!(record(&None::<u8>), [Token::Null]);
        assert_eq!(record(&Some("a")), [Token::String("a".into())]);
        assert_eq!(record(&Box::new(0.5f32)), [Token::Double(0.5)]);
    }

    #[test]
    fn sequences_in_container_order() {
        assert_eq!(
            record(&VecDeque::from([true, false])),
            [
                Token::StartArray,
                Token::Bool(true),
                Token::Bool(false),
                Token::EndArray(2),
            ]
        );
        assert_eq!(
            record(&BTreeSet::from([3u8, 1])),
            [
                Token::StartArray,
                Token::Uint(1),
                Token::Uint(3),
                Token::EndArray(2),
            ]
        );
        assert_eq!(
            record::<[u8]>(&[]),
            [Token::StartArray, Token::EndArray(0)]
        );
    }

    #[test]
    fn maps_write_keys_before_values() {
        let map = BTreeMap::from([("b".to_owned(), vec![1u8]), ("a".to_owned(), vec![])]);
        assert_eq!(
            record(&map),
            [
                Token::StartObject,
                Token::Key("a".into()),
                Token::StartArray,
                Token::EndArray(0),
                Token::Key("b".into()),
                Token::StartArray,
                Token::Uint(1),
                Token::EndArray(1),
                Token::EndObject(2),
            ]
        );
    }
}
