//! Location tracking inside a JSON document.
//!
//! [`JsonPath`] is fed every token a stream produces and keeps one frame per
//! open container. Rendering starts at `root` and appends `.key` for objects
//! that have seen a key and `[index]` for arrays that have seen an element,
//! e.g. `root.items[2].name`.
use core::fmt;

use crate::Token;

/// One open container on the path stack.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathFrame {
    /// An object; `key` is the most recent key, `None` before the first one.
    Object { key: Option<String> },
    /// An array; `index` is the current element, `None` before the first one.
    Array { index: Option<usize> },
}

impl PathFrame {
    fn write_to(&self, out: &mut String) {
        match self {
            Self::Object { key: Some(key) } => {
                out.push('.');
                out.push_str(key);
            }
            Self::Array { index: Some(index) } => {
                out.push('[');
                out.push_str(&index.to_string());
                out.push(']');
            }
            Self::Object { key: None } | Self::Array { index: None } => {}
        }
    }
}

/// Stack of [`PathFrame`]s mirroring the current nesting depth.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JsonPath {
    frames: Vec<PathFrame>,
}

impl JsonPath {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Called on a start-object token.
    pub fn start_object(&mut self) {
        self.advance_array();
        self.frames.push(PathFrame::Object { key: None });
    }

    /// Called on a key token.
    pub fn key(&mut self, key: &str) {
        match self.frames.last_mut() {
            Some(PathFrame::Object { key: current }) => {
                let current = current.get_or_insert_with(String::new);
                current.clear();
                current.push_str(key);
            }
            _ => debug_assert!(false, "key outside of an object"),
        }
    }

    /// Called on an end-object token.
    pub fn end_object(&mut self) {
        debug_assert!(matches!(self.frames.last(), Some(PathFrame::Object { .. })));
        self.frames.pop();
    }

    /// Called on a start-array token.
    pub fn start_array(&mut self) {
        self.advance_array();
        self.frames.push(PathFrame::Array { index: None });
    }

    /// Called on an end-array token.
    pub fn end_array(&mut self) {
        debug_assert!(matches!(self.frames.last(), Some(PathFrame::Array { .. })));
        self.frames.pop();
    }

    /// Called on any scalar value token.
    pub fn value(&mut self) {
        self.advance_array();
    }

    /// Current nesting depth.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    #[must_use]
    pub fn frames(&self) -> &[PathFrame] {
        &self.frames
    }

    /// Renders the path, always beginning with `root`.
    #[must_use]
    pub fn render(&self) -> String {
        let mut out = String::from("root");
        for frame in &self.frames {
            frame.write_to(&mut out);
        }
        out
    }

    // A new element entered inside an array bumps its index before descending.
    fn advance_array(&mut self) {
        if let Some(PathFrame::Array { index }) = self.frames.last_mut() {
            *index = Some(index.map_or(0, |i| i + 1));
        }
    }
}

impl fmt::Display for JsonPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

/// Hook run by a [`TokenStream`](crate::TokenStream) after every token it
/// acquires.
pub trait PathObserver: Default {
    /// Update state for a freshly acquired token.
    fn observe(&mut self, token: &Token);

    /// Rendered location of the most recent token, if tracked.
    fn current(&self) -> Option<String>;
}

impl PathObserver for JsonPath {
    fn observe(&mut self, token: &Token) {
        match token {
            Token::StartObject => self.start_object(),
            Token::Key(key) => self.key(key),
            Token::EndObject(_) => self.end_object(),
            Token::StartArray => self.start_array(),
            Token::EndArray(_) => self.end_array(),
            _ => self.value(),
        }
    }

    fn current(&self) -> Option<String> {
        Some(self.render())
    }
}

/// Observer for streams that do not track their location.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoPath;

impl PathObserver for NoPath {
    fn observe(&mut self, _token: &Token) {}

    fn current(&self) -> Option<String> {
        None
    }
}

#[doc(hidden)]
pub trait PathSegment {
    fn render_segment(&self, out: &mut String);
}

impl PathSegment for &str {
    fn render_segment(&self, out: &mut String) {
        out.push('.');
        out.push_str(self);
    }
}

impl PathSegment for String {
    fn render_segment(&self, out: &mut String) {
        self.as_str().render_segment(out);
    }
}

macro_rules! impl_index_segment {
    ($($t:ty),+) => {
        $(
            impl PathSegment for $t {
                fn render_segment(&self, out: &mut String) {
                    out.push('[');
                    out.push_str(&self.to_string());
                    out.push(']');
                }
            }
        )+
    };
}
impl_index_segment!(u8, u16, u32, u64, usize, i32);

/// Renders a path from a list of keys and indices, the same way
/// [`JsonPath::render`] does.
///
/// ```rust
/// assert_eq!(jsonbind::json_path!["items", 2, "name"], "root.items[2].name");
/// assert_eq!(jsonbind::json_path![], "root");
/// ```
#[macro_export]
macro_rules! json_path {
    ( $( $segment:expr ),* $(,)? ) => {{
        #[allow(unused_mut)]
        let mut rendered = ::std::string::String::from("root");
        $( $crate::PathSegment::render_segment(&$segment, &mut rendered); )*
        rendered
    }};
}

#[cfg(test)]
mod test {
    use super::*;

    fn observed(tokens: &[Token]) -> Vec<String> {
        let mut path = JsonPath::new();
        tokens
            .iter()
            .map(|token| {
                path.observe(token);
                path.render()
            })
            .collect()
    }

    #[test]
    fn array_index_advances_before_descending() {
        let paths = observed(&[
            Token::StartArray,
            Token::Uint(1),
            Token::StartObject,
            Token::Key("a".into()),
            Token::Null,
            Token::EndObject(1),
            Token::StartArray,
            Token::EndArray(0),
            Token::EndArray(3),
        ]);

        assert_eq!(
            paths,
            [
                "root",
                "root[0]",
                "root[1]",
                "root[1].a",
                "root[1].a",
                "root[1]",
                "root[2]",
                "root[2]",
                "root",
            ]
        );
    }

    #[test]
    fn keys_replace_previous_key() {
        let mut path = JsonPath::new();
        path.start_object();
        path.key("first");
        path.value();
        path.key("second");
        assert_eq!(path.render(), "root.second");
        assert_eq!(path.depth(), 1);
        assert_eq!(
            path.frames(),
            [PathFrame::Object {
                key: Some("second".into())
            }]
        );
    }

    #[test]
    fn empty_frames_render_nothing() {
        let mut path = JsonPath::new();
        path.start_object();
        path.start_array();
        assert_eq!(path.to_string(), "root");
    }

    #[test]
    fn no_path_never_renders() {
        let mut path = NoPath;
        path.observe(&Token::StartObject);
        assert_eq!(path.current(), None);
    }

    #[test]
    fn macro_matches_renderer() {
        assert_eq!(crate::json_path!["inners", 0, "str"], "root.inners[0].str");
        assert_eq!(crate::json_path![String::from("k"), 3usize], "root.k[3]");
    }
}
