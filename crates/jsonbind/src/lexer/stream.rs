use std::io::Read;

use struson::reader::{JsonReader, JsonStreamReader, ReaderError, ReaderSettings, ValueType};

use super::{Lexer, TokenHandler};
use crate::{LexError, LexerOptions};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Container {
    Object,
    Array,
}

#[derive(Debug)]
struct Frame {
    container: Container,
    count: u32,
    /// Inside an object, a key has been emitted and its value is next.
    awaiting_value: bool,
}

impl Frame {
    fn new(container: Container) -> Self {
        Self {
            container,
            count: 0,
            awaiting_value: false,
        }
    }
}

/// Lexer over a byte source, backed by a `struson` pull reader.
///
/// Each [`advance`](Lexer::advance) reads exactly enough input to produce one
/// event. After the top-level value closes, the next advance checks that only
/// whitespace remains and marks the lexer complete. Once an advance fails,
/// every later advance returns the same error.
pub struct StreamLexer<R: Read> {
    reader: Option<JsonStreamReader<R>>,
    frames: Vec<Frame>,
    started: bool,
    finished: bool,
    failed: Option<LexError>,
    raw_numbers: bool,
}

impl<R: Read> StreamLexer<R> {
    pub fn new(input: R) -> Self {
        Self::with_options(input, LexerOptions::default())
    }

    pub fn with_options(input: R, options: LexerOptions) -> Self {
        let settings = ReaderSettings {
            allow_trailing_comma: !options.reject_trailing_commas,
            allow_comments: options.allow_comments,
            ..Default::default()
        };
        Self {
            reader: Some(JsonStreamReader::new_custom(input, settings)),
            frames: Vec::new(),
            started: false,
            finished: false,
            failed: None,
            raw_numbers: options.raw_numbers,
        }
    }

    fn step<H: TokenHandler>(&mut self, handler: &mut H) -> Result<(), LexError> {
        let Some(reader) = self.reader.as_mut() else {
            return Ok(());
        };

        if !self.started {
            self.started = true;
            return read_value(reader, &mut self.frames, self.raw_numbers, handler);
        }

        let Some(frame) = self.frames.last_mut() else {
            return self.finish();
        };

        match frame.container {
            Container::Object if frame.awaiting_value => {
                frame.awaiting_value = false;
                read_value(reader, &mut self.frames, self.raw_numbers, handler)
            }
            Container::Object => {
                if reader.has_next()? {
                    let key = reader.next_name_owned()?;
                    frame.count = frame.count.saturating_add(1);
                    frame.awaiting_value = true;
                    handler.key(key);
                } else {
                    reader.end_object()?;
                    let members = frame.count;
                    self.frames.pop();
                    handler.end_object(members);
                }
                Ok(())
            }
            Container::Array => {
                if reader.has_next()? {
                    frame.count = frame.count.saturating_add(1);
                    read_value(reader, &mut self.frames, self.raw_numbers, handler)
                } else {
                    reader.end_array()?;
                    let elements = frame.count;
                    self.frames.pop();
                    handler.end_array(elements);
                    Ok(())
                }
            }
        }
    }

    fn finish(&mut self) -> Result<(), LexError> {
        if let Some(reader) = self.reader.take() {
            reader.consume_trailing_whitespace()?;
        }
        self.finished = true;
        Ok(())
    }
}

impl<R: Read> Lexer for StreamLexer<R> {
    fn advance<H: TokenHandler>(&mut self, handler: &mut H) -> Result<(), LexError> {
        if let Some(error) = &self.failed {
            return Err(error.clone());
        }
        self.step(handler).inspect_err(|error| {
            // The reader may be mid-value; nothing it yields now is trustworthy.
            self.reader = None;
            self.frames.clear();
            self.failed = Some(error.clone());
        })
    }

    fn is_complete(&self) -> bool {
        self.finished
    }
}

impl<R: Read> core::fmt::Debug for StreamLexer<R> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("StreamLexer")
            .field("frames", &self.frames)
            .field("started", &self.started)
            .field("finished", &self.finished)
            .field("failed", &self.failed)
            .field("raw_numbers", &self.raw_numbers)
            .finish_non_exhaustive()
    }
}

fn read_value<R: Read, H: TokenHandler>(
    reader: &mut JsonStreamReader<R>,
    frames: &mut Vec<Frame>,
    raw_numbers: bool,
    handler: &mut H,
) -> Result<(), LexError> {
    match reader.peek()? {
        ValueType::Object => {
            reader.begin_object()?;
            frames.push(Frame::new(Container::Object));
            handler.start_object();
        }
        ValueType::Array => {
            reader.begin_array()?;
            frames.push(Frame::new(Container::Array));
            handler.start_array();
        }
        ValueType::String => handler.string(reader.next_string()?),
        ValueType::Number => {
            let text = reader.next_number_as_string()?;
            if raw_numbers {
                handler.raw_number(text);
            } else {
                classify_number(&text, handler)?;
            }
        }
        ValueType::Boolean => handler.bool(reader.next_bool()?),
        ValueType::Null => {
            reader.next_null()?;
            handler.null();
        }
    }
    Ok(())
}

/// Emits the narrowest token able to hold the number spelled by `text`.
fn classify_number<H: TokenHandler>(text: &str, handler: &mut H) -> Result<(), LexError> {
    let integral = !text.contains(['.', 'e', 'E']);
    if integral {
        if let Ok(value) = text.parse::<i128>() {
            if value < 0 {
                if let Ok(value) = i32::try_from(value) {
                    handler.int(value);
                    return Ok(());
                }
                if let Ok(value) = i64::try_from(value) {
                    handler.int64(value);
                    return Ok(());
                }
            } else {
                if let Ok(value) = u32::try_from(value) {
                    handler.uint(value);
                    return Ok(());
                }
                if let Ok(value) = u64::try_from(value) {
                    handler.uint64(value);
                    return Ok(());
                }
            }
        }
    }

    let value = text
        .parse::<f64>()
        .map_err(|e| LexError::Internal(format!("number '{text}' rejected: {e}")))?;
    if !value.is_finite() {
        return Err(LexError::Syntax(format!(
            "Number too big to be stored in double: {text}"
        )));
    }
    handler.double(value);
    Ok(())
}

impl From<ReaderError> for LexError {
    fn from(error: ReaderError) -> Self {
        match error {
            // Calling the reader in the wrong state is on us, not the input.
            ReaderError::UnexpectedValueType { .. } | ReaderError::UnexpectedStructure { .. } => {
                Self::Internal(error.to_string())
            }
            _ => Self::Syntax(error.to_string()),
        }
    }
}
