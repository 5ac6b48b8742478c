use std::{io, string::FromUtf8Error};

use thiserror::Error;

/// Which side of the boundary rejected the input.
#[cfg_attr(any(test, feature = "serde"), derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The input is not well-formed JSON; reported by the lexer.
    Json,
    /// The input is valid JSON but does not match the target type.
    Parse,
}

/// A parse failure, with the location at which it was detected when the
/// token stream tracks paths.
#[cfg_attr(any(test, feature = "serde"), derive(serde::Serialize, serde::Deserialize))]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}{}", at_path(.path))]
pub struct Error {
    kind: ErrorKind,
    message: String,
    path: Option<String>,
}

fn at_path(path: &Option<String>) -> String {
    path.as_ref().map(|path| format!(" at {path}")).unwrap_or_default()
}

/// Result of parsing a value of type `T`.
pub type ParseResult<T> = Result<T, Error>;

impl Error {
    /// A malformed-JSON error.
    pub fn json(message: impl Into<String>, path: Option<String>) -> Self {
        Self {
            kind: ErrorKind::Json,
            message: message.into(),
            path,
        }
    }

    /// A domain error: well-formed JSON of the wrong shape or value.
    pub fn parse(message: impl Into<String>, path: Option<String>) -> Self {
        Self {
            kind: ErrorKind::Parse,
            message: message.into(),
            path,
        }
    }

    /// Replaces the recorded location.
    #[must_use]
    pub fn at(mut self, path: Option<String>) -> Self {
        self.path = path;
        self
    }

    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    #[must_use]
    pub fn is_json_error(&self) -> bool {
        self.kind == ErrorKind::Json
    }

    #[must_use]
    pub fn is_parse_error(&self) -> bool {
        self.kind == ErrorKind::Parse
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    #[must_use]
    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }
}

/// Failure reported by a [`Lexer`](crate::Lexer).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LexError {
    /// The input is malformed.
    #[error("{0}")]
    Syntax(String),
    /// The lexer reached a state that only a bug can produce.
    #[error("Unexpected error: {0}, possibly a bug")]
    Internal(String),
}

/// Failure while dumping a value.
#[derive(Error, Debug)]
pub enum WriteError {
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    /// NaN and infinities have no JSON representation.
    #[error("invalid number: {0}")]
    InvalidNumber(String),
    #[error("output is not valid UTF-8: {0}")]
    Utf8(#[from] FromUtf8Error),
}

/// Result of dumping a value.
pub type DumpResult = Result<(), WriteError>;

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn renders_path_when_present() {
        let error = Error::parse("Unexpected key: c", Some("root.c".into()));
        assert_eq!(error.to_string(), "Unexpected key: c at root.c");
        assert!(error.is_parse_error());
        assert!(!error.is_json_error());
        assert_eq!(error.path(), Some("root.c"));
    }

    #[test]
    fn renders_message_without_path() {
        let error = Error::json("Missing a closing quotation mark", None);
        assert_eq!(error.to_string(), "Missing a closing quotation mark");
        assert_eq!(error.kind(), ErrorKind::Json);
        assert_eq!(error.at(Some("root".into())).path(), Some("root"));
    }

    #[test]
    fn internal_lex_errors_are_flagged() {
        let error = LexError::Internal("no token".into());
        assert_eq!(error.to_string(), "Unexpected error: no token, possibly a bug");
    }

    #[test]
    fn serializes_with_serde() {
        let error = Error::parse("Integer value not in range", Some("root[0]".into()));
        let value = serde_json::to_value(&error).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "kind": "Parse",
                "message": "Integer value not in range",
                "path": "root[0]",
            })
        );
    }
}
