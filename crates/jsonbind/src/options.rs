/// Configuration for the byte-level lexer behind a
/// [`TokenStream`](crate::TokenStream).
///
/// # Examples
///
/// ```rust
/// use jsonbind::{LexerOptions, from_slice_with_options};
///
/// let options = LexerOptions {
///     allow_comments: true,
///     ..Default::default()
/// };
/// let value: Vec<u8> = from_slice_with_options(b"[1, /* two */ 2]", options).unwrap();
/// assert_eq!(value, [1, 2]);
/// ```
///
/// # Default
///
/// All options default to `false`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LexerOptions {
    /// Whether a trailing comma before `]` or `}` is a syntax error.
    ///
    /// By default a single trailing comma after the last element of an array
    /// or the last member of an object is tolerated:
    ///
    /// ```json
    /// {"a": [1, 2,],}
    /// ```
    ///
    /// A comma with no preceding element, such as `{,}`, is always an error.
    ///
    /// # Default
    ///
    /// `false`
    pub reject_trailing_commas: bool,

    /// Whether to accept `//` line comments and `/* */` block comments
    /// wherever whitespace is allowed.
    ///
    /// # Default
    ///
    /// `false`
    pub allow_comments: bool,

    /// Whether to deliver numbers as unclassified
    /// [`Token::RawNumber`](crate::Token::RawNumber) text.
    ///
    /// When `false`, each number is classified into the narrowest of
    /// `Int`, `Uint`, `Int64`, `Uint64`, falling back to `Double`.
    ///
    /// # Default
    ///
    /// `false`
    pub raw_numbers: bool,
}
