#![no_main]
use std::collections::BTreeMap;
use std::fmt::Debug;

use arbitrary::{Arbitrary, Unstructured};
use jsonbind::{JsonDump, JsonParse, LexerOptions};
use libfuzzer_sys::{fuzz_mutator, fuzz_target, fuzzer_mutate};
use serde_json::{Map, Value};

const HEADER: usize = 1; // option flags

/// Every tenth mutation replaces the body with a well-formed document built
/// from the current bytes, so the typed layer sees more than syntax errors.
fn mutator(data: &mut [u8], size: usize, max_size: usize, seed: u32) -> usize {
    if size <= HEADER || !seed.is_multiple_of(10) {
        return fuzzer_mutate(data, size, max_size);
    }

    let Ok(value) = ArbitraryValue::arbitrary(&mut Unstructured::new(&data[HEADER..size])) else {
        return fuzzer_mutate(data, size, max_size);
    };
    let Ok(serialized) = serde_json::to_vec(&value.0) else {
        return fuzzer_mutate(data, size, max_size);
    };

    let len = serialized.len().min(max_size - HEADER);
    data[HEADER..HEADER + len].copy_from_slice(&serialized[..len]);
    HEADER + len
}

fuzz_mutator!(|data: &mut [u8], size: usize, max_size: usize, seed: u32| {
    mutator(data, size, max_size, seed)
});

#[derive(Debug)]
struct ArbitraryValue(Value);

impl<'a> Arbitrary<'a> for ArbitraryValue {
    fn arbitrary(u: &mut Unstructured<'_>) -> arbitrary::Result<Self> {
        let value = match u.choose_index(16)? {
            0 => Value::Null,
            1 => Value::Bool(u.arbitrary()?),
            2 => Value::from(u.arbitrary::<i64>()?),
            3 => Value::from(u.arbitrary::<u64>()?),
            4 => {
                let n: f64 = u.arbitrary()?;
                Value::Number(
                    serde_json::Number::from_f64(n).ok_or(arbitrary::Error::IncorrectFormat)?,
                )
            }
            5..=8 => Value::String(u.arbitrary()?),
            9..=12 => {
                let elems: Vec<ArbitraryValue> = u.arbitrary()?;
                Value::Array(elems.into_iter().map(|v| v.0).collect())
            }
            _ => {
                let m: Vec<(String, ArbitraryValue)> = u.arbitrary()?;
                Value::Object(Map::from_iter(m.into_iter().map(|(k, v)| (k, v.0))))
            }
        };
        Ok(ArbitraryValue(value))
    }
}

/// Whatever parses must dump, and the dump must parse back to the same value.
fn roundtrip<T: JsonParse + JsonDump + PartialEq + Debug>(data: &[u8], options: LexerOptions) {
    let Ok(value) = jsonbind::from_slice_with_options::<T>(data, options) else {
        return;
    };
    let json = jsonbind::to_vec(&value).expect("parsed values are finite");
    let again = jsonbind::from_slice::<T>(&json).expect("dumped JSON parses");
    assert_eq!(value, again);
}

fn parse(data: &[u8]) {
    let Some((&flags, data)) = data.split_first() else {
        return;
    };

    let options = LexerOptions {
        reject_trailing_commas: flags & 1 != 0,
        allow_comments: flags & 2 != 0,
        raw_numbers: flags & 4 != 0,
    };

    roundtrip::<Option<bool>>(data, options);
    roundtrip::<Vec<Option<i64>>>(data, options);
    roundtrip::<Vec<f64>>(data, options);
    roundtrip::<BTreeMap<String, String>>(data, options);
    roundtrip::<BTreeMap<String, Vec<Option<u64>>>>(data, options);
}

fuzz_target!(|data: &[u8]| parse(data));
