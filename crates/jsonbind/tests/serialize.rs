#![expect(missing_docs)]

mod common;

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};

use jsonbind::{
    DumpResult, JsonDump, JsonWriter, Serializable, Token, TokenRecorder, dump, dump_with, ser,
    to_string, to_vec, to_writer,
};
use rstest::rstest;

use crate::common::{Inner, Outer};

#[test]
fn bool_is_dumped() {
    assert_eq!(to_string(&true).unwrap(), "true");
    assert_eq!(to_string(&false).unwrap(), "false");
}

macro_rules! integer_extremes {
    ($($t:ty),+) => {
        $(
            for value in [0, <$t>::MAX, <$t>::MIN, <$t>::MAX / 2, <$t>::MIN / 2] {
                assert_eq!(to_string(&value).unwrap(), value.to_string(), stringify!($t));
            }
        )+
    };
}

#[test]
fn integers_are_dumped() {
    integer_extremes!(i8, i16, i32, i64, u8, u16, u32, u64);
}

#[rstest]
#[case(0.0)]
#[case(f64::MAX)]
#[case(f64::MIN)]
#[case(f64::MAX / 2.0)]
#[case(f64::MIN / 2.0)]
#[case(1e-6)]
#[case(-1e-6)]
fn doubles_are_dumped(#[case] value: f64) {
    let json = to_string(&value).unwrap();
    let read: f64 = json.parse().unwrap();
    assert!((read - value).abs() <= value.abs() * f64::EPSILON, "{value} dumped as {json}");
}

#[rstest]
#[case(f32::MAX)]
#[case(f32::MIN)]
#[case(1e-6)]
#[case(-1e-6)]
fn floats_are_dumped(#[case] value: f32) {
    let json = to_string(&value).unwrap();
    let read: f32 = json.parse().unwrap();
    assert!((read - value).abs() <= value.abs() * f32::EPSILON, "{value} dumped as {json}");
}

#[test]
fn integer_width_follows_the_value() {
    let mut recorder = TokenRecorder::new();
    dump(&[u64::MAX, 1, 0], &mut recorder).unwrap();
    dump(&[i64::MIN, -1], &mut recorder).unwrap();
    assert_eq!(
        recorder.into_tokens(),
        [
            Token::StartArray,
            Token::Uint64(u64::MAX),
            Token::Uint(1),
            Token::Int(0),
            Token::EndArray(3),
            Token::StartArray,
            Token::Int64(i64::MIN),
            Token::Int(-1),
            Token::EndArray(2),
        ]
    );
}

#[test]
fn strings_are_escaped() {
    assert_eq!(to_string("example").unwrap(), r#""example""#);
    assert_eq!(to_string("a\"b\\c\n").unwrap(), r#""a\"b\\c\n""#);
}

#[test]
fn optional_is_dumped() {
    assert_eq!(to_string(&Some("example")).unwrap(), r#""example""#);
    assert_eq!(to_string(&None::<String>).unwrap(), "null");
}

fn joined(items: impl IntoIterator<Item = String>) -> String {
    items.into_iter().collect::<Vec<_>>().join(",")
}

#[rstest]
fn arrays_are_dumped(#[values(0, 1, 2, 42)] size: i32) {
    let vec = (0..size).collect::<Vec<_>>();
    let expected = format!("[{}]", joined(vec.iter().map(ToString::to_string)));
    assert_eq!(to_string(&vec).unwrap(), expected);

    let set = (0..size).collect::<BTreeSet<_>>();
    assert_eq!(to_string(&set).unwrap(), expected);

    // Iteration order of a hash set is unspecified, so compare its elements.
    let set = (0..size).collect::<HashSet<_>>();
    let expected = format!("[{}]", joined(set.iter().map(ToString::to_string)));
    assert_eq!(to_string(&set).unwrap(), expected);
}

#[rstest]
fn dicts_are_dumped(#[values(0, 1, 2, 42)] size: i32) {
    let entries = (0..size).map(|i| {
        let parity = if i % 2 == 0 { "even" } else { "odd" };
        (format!("{parity}{i}"), i)
    });
    let member = |(key, value): (&String, &i32)| format!(r#""{key}":{value}"#);

    let map = entries.clone().collect::<BTreeMap<_, _>>();
    assert_eq!(
        to_string(&map).unwrap(),
        format!("{{{}}}", joined(map.iter().map(member)))
    );

    let map = entries.collect::<HashMap<_, _>>();
    assert_eq!(
        to_string(&map).unwrap(),
        format!("{{{}}}", joined(map.iter().map(member)))
    );
}

struct Labeled {
    label: String,
    integer: i32,
}

impl JsonDump for Labeled {
    fn json_dump<W: JsonWriter + ?Sized>(&self, writer: &mut W) -> DumpResult {
        ser::dump_object(
            writer,
            (
                ser::Field::new("str", &self.label),
                ser::Field::new("integer", &self.integer),
            ),
        )
    }
}

#[test]
fn object_with_own_dump_method() {
    let value = Labeled {
        label: "example".into(),
        integer: 42,
    };
    assert_eq!(to_string(&value).unwrap(), r#"{"str":"example","integer":42}"#);
}

/// A type from elsewhere; it only gains dump support through [`AsObject`].
struct Toggle {
    on: bool,
    level: Option<i32>,
}

struct AsObject;

impl Serializable<Toggle> for AsObject {
    fn dump<W: JsonWriter + ?Sized>(value: &Toggle, writer: &mut W) -> DumpResult {
        ser::dump_object(
            writer,
            (
                ser::Field::new("boolean", &value.on),
                ser::Field::new("oint", &value.level),
            ),
        )
    }
}

#[test]
fn object_through_an_adapter() {
    let toggle = Toggle {
        on: false,
        level: Some(42),
    };
    let mut out = Vec::new();
    let mut writer = jsonbind::StreamWriter::new(&mut out);
    dump_with::<AsObject, _, _>(&toggle, &mut writer).unwrap();
    writer.finish().unwrap();
    assert_eq!(out, br#"{"boolean":false,"oint":42}"#);

    let toggles = vec![jsonbind::Adapted::<Toggle, AsObject>::new(Toggle {
        on: true,
        level: None,
    })];
    assert_eq!(
        to_string(&toggles).unwrap(),
        r#"[{"boolean":true,"oint":null}]"#
    );
}

#[test]
fn nested_objects_are_dumped() {
    let outer = Outer {
        boolean: false,
        text: "example".into(),
        opt: None,
        arr: vec![Inner::new("one", Some(1)), Inner::new("none", None)],
        map: BTreeMap::from([("k".to_owned(), Inner::new("v", Some(-2)))]),
    };
    assert_eq!(
        to_string(&outer).unwrap(),
        concat!(
            r#"{"boolean":false,"str":"example","opt":null,"#,
            r#""arr":[{"str":"one","oint":1},{"str":"none","oint":null}],"#,
            r#""map":{"k":{"str":"v","oint":-2}}}"#,
        )
    );
}

#[test]
fn output_sinks_agree() {
    let value = vec![Inner::new("a", None)];
    let text = to_string(&value).unwrap();
    assert_eq!(to_vec(&value).unwrap(), text.as_bytes());

    let mut out = Vec::new();
    to_writer(&mut out, &value).unwrap();
    assert_eq!(out, text.as_bytes());
}
