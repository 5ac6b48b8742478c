#![allow(missing_docs)]
#![allow(dead_code)]

use std::collections::BTreeMap;

use jsonbind::{
    DumpResult, Field, JsonDump, JsonParse, JsonWriter, ParseResult, TokenSource, parse_object,
    ser,
};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Inner {
    pub text: String,
    pub oint: Option<i32>,
}

impl Inner {
    pub fn new(text: &str, oint: Option<i32>) -> Self {
        Self {
            text: text.to_owned(),
            oint,
        }
    }
}

impl JsonParse for Inner {
    fn json_parse<S: TokenSource + ?Sized>(tokens: &mut S) -> ParseResult<Self> {
        let mut inner = Self::default();
        parse_object(
            tokens,
            (
                Field::new("str", &mut inner.text),
                Field::new("oint", &mut inner.oint),
            ),
        )?;
        Ok(inner)
    }
}

impl JsonDump for Inner {
    fn json_dump<W: JsonWriter + ?Sized>(&self, writer: &mut W) -> DumpResult {
        ser::dump_object(
            writer,
            (
                ser::Field::new("str", &self.text),
                ser::Field::new("oint", &self.oint),
            ),
        )
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Outer {
    pub boolean: bool,
    pub text: String,
    pub opt: Option<Inner>,
    pub arr: Vec<Inner>,
    pub map: BTreeMap<String, Inner>,
}

impl JsonParse for Outer {
    fn json_parse<S: TokenSource + ?Sized>(tokens: &mut S) -> ParseResult<Self> {
        let mut outer = Self::default();
        parse_object(
            tokens,
            (
                Field::new("boolean", &mut outer.boolean),
                Field::new("str", &mut outer.text),
                Field::new("opt", &mut outer.opt),
                Field::new("arr", &mut outer.arr),
                Field::new("map", &mut outer.map),
            ),
        )?;
        Ok(outer)
    }
}

impl JsonDump for Outer {
    fn json_dump<W: JsonWriter + ?Sized>(&self, writer: &mut W) -> DumpResult {
        ser::dump_object(
            writer,
            (
                ser::Field::new("boolean", &self.boolean),
                ser::Field::new("str", &self.text),
                ser::Field::new("opt", &self.opt),
                ser::Field::new("arr", &self.arr),
                ser::Field::new("map", &self.map),
            ),
        )
    }
}

/// Every member required.
#[derive(Debug, Default, PartialEq)]
pub struct Entry {
    pub text: String,
    pub integer: i32,
}

impl JsonParse for Entry {
    fn json_parse<S: TokenSource + ?Sized>(tokens: &mut S) -> ParseResult<Self> {
        let mut entry = Self::default();
        parse_object(
            tokens,
            (
                Field::new("str", &mut entry.text),
                Field::new("integer", &mut entry.integer),
            ),
        )?;
        Ok(entry)
    }
}

#[derive(Debug, Default, PartialEq)]
pub struct Batch {
    pub number: f64,
    pub entries: Vec<Entry>,
}

impl JsonParse for Batch {
    fn json_parse<S: TokenSource + ?Sized>(tokens: &mut S) -> ParseResult<Self> {
        let mut batch = Self::default();
        parse_object(
            tokens,
            (
                Field::new("number", &mut batch.number),
                Field::new("inners", &mut batch.entries),
            ),
        )?;
        Ok(batch)
    }
}
