//! Engine backed by sonic-rs SIMD parsing
//!
//! Documents are returned as [`LazyValue`]s borrowing the input, so nothing is
//! materialized until a caller reads into them. Every document is fully
//! validated before its handle is handed out.

use super::{DiagnosticCode, DocumentStream, EngineError, JsonEngine};
use crate::config::EngineConfig;
use sonic_rs::{Deserializer, LazyValue, Read, StreamDeserializer, Value, error::Category};
use std::str::Utf8Error;
use tracing::trace;

/// sonic-rs backed engine handle
#[derive(Debug, Clone, Default)]
pub struct SonicEngine {
    config: EngineConfig,
}

impl SonicEngine {
    /// Create a new SonicEngine with default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new SonicEngine with custom configuration
    pub fn with_config(config: EngineConfig) -> Self {
        Self { config }
    }
}

impl JsonEngine for SonicEngine {
    fn config(&self) -> &EngineConfig {
        &self.config
    }

    fn iterate_one<'a>(&mut self, input: &'a [u8]) -> Result<LazyValue<'a>, EngineError> {
        if input.iter().all(|b| is_json_whitespace(*b)) {
            return Err(EngineError::new(
                DiagnosticCode::EmptyInput,
                "no JSON value present in input",
            ));
        }

        trace!(len = input.len(), "iterating single document");
        let text = std::str::from_utf8(input).map_err(|err| invalid_utf8(input, err))?;
        // the lazy parse skips string bodies, so escapes are checked here
        sonic_rs::from_str::<Value>(text).map_err(translate)?;
        sonic_rs::from_str::<LazyValue<'a>>(text).map_err(translate)
    }

    fn iterate_many<'a>(&mut self, input: &'a [u8]) -> DocumentStream<'a> {
        trace!(len = input.len(), "iterating document stream");
        DocumentStream::new(SonicStream::new(input))
    }
}

/// Documents delimited one at a time, each validated before it is yielded
///
/// Two sonic streams run in lockstep over the same text: the first fully
/// parses each value so malformations are reported with their real position,
/// the second hands out the lazy view.
struct SonicStream<'a> {
    text: &'a str,
    consumed: usize,
    validate: StreamDeserializer<'a, Value, Read<'a>>,
    lazy: StreamDeserializer<'a, LazyValue<'a>, Read<'a>>,
    /// Reported once the valid UTF-8 prefix `text` is used up
    invalid_utf8: Option<EngineError>,
    done: bool,
}

impl<'a> SonicStream<'a> {
    fn new(input: &'a [u8]) -> Self {
        let (text, invalid_utf8) = match std::str::from_utf8(input) {
            Ok(text) => (text, None),
            Err(err) => {
                let text = std::str::from_utf8(&input[..err.valid_up_to()]).unwrap_or_default();
                (text, Some(invalid_utf8(input, err)))
            }
        };
        Self {
            text,
            consumed: 0,
            validate: Deserializer::from_str(text).into_stream(),
            lazy: Deserializer::from_str(text).into_stream(),
            invalid_utf8,
            done: false,
        }
    }

    fn fail(&mut self, err: EngineError) -> Option<Result<LazyValue<'a>, EngineError>> {
        self.done = true;
        Some(Err(err))
    }
}

impl<'a> Iterator for SonicStream<'a> {
    type Item = Result<LazyValue<'a>, EngineError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let rest = &self.text.as_bytes()[self.consumed..];
        let start = self.consumed + rest.iter().take_while(|b| is_json_whitespace(**b)).count();
        if start == self.text.len() {
            self.done = true;
            return self.invalid_utf8.take().map(Err);
        }

        match self.validate.next() {
            Some(Ok(_)) => {}
            Some(Err(err)) => {
                // a value cut short by the invalid byte is a UTF-8 fault
                let err = match self.invalid_utf8.take() {
                    Some(utf8) if err.is_eof() => utf8,
                    _ => translate(err),
                };
                return self.fail(err);
            }
            None => {
                self.done = true;
                return None;
            }
        }

        match self.lazy.next() {
            Some(Ok(value)) => {
                let raw = value.as_raw_str();
                self.consumed = start + raw.len();
                // `12` followed by a bad byte is not a complete number
                let closed = matches!(raw.as_bytes().last(), Some(b']' | b'}' | b'"'));
                if self.consumed == self.text.len() && !closed {
                    if let Some(utf8) = self.invalid_utf8.take() {
                        return self.fail(utf8);
                    }
                }
                Some(Ok(value))
            }
            Some(Err(err)) => self.fail(translate(err)),
            None => {
                self.done = true;
                None
            }
        }
    }
}

/// JSON insignificant whitespace (RFC 8259 section 2)
fn is_json_whitespace(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | b'\r')
}

fn translate(err: sonic_rs::Error) -> EngineError {
    let code = match err.classify() {
        Category::Eof => DiagnosticCode::UnexpectedEof,
        Category::Syntax => DiagnosticCode::Syntax,
        Category::TypeUnmatched | Category::NotFound => DiagnosticCode::InvalidData,
        Category::Io => DiagnosticCode::Io,
        _ => DiagnosticCode::InvalidData,
    };
    EngineError::new(code, err.to_string()).at(err.line(), err.column())
}

fn invalid_utf8(input: &[u8], err: Utf8Error) -> EngineError {
    let index = err.valid_up_to();
    let (line, column) = line_column(input, index);
    EngineError::new(
        DiagnosticCode::InvalidUtf8,
        format!("invalid UTF-8 at byte {index}"),
    )
    .at(line, column)
}

/// One-based line and column of byte `index`
fn line_column(input: &[u8], index: usize) -> (usize, usize) {
    let before = &input[..index];
    let line = before.iter().filter(|b| **b == b'\n').count() + 1;
    let column = match before.iter().rposition(|b| *b == b'\n') {
        Some(newline) => index - newline,
        None => index + 1,
    };
    (line, column)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sonic_rs::{JsonType, JsonValueTrait};

    #[test]
    fn test_sonic_engine_creation() {
        let engine = SonicEngine::new();
        assert_eq!(engine.padding(), 64);

        let engine = SonicEngine::with_config(EngineConfig::default().with_padding(16));
        assert_eq!(engine.padding(), 16);
    }

    #[test]
    fn test_iterate_one_object() {
        let mut engine = SonicEngine::new();
        let doc = engine.iterate_one(br#"{"a":1}"#).unwrap();
        assert_eq!(doc.as_raw_str(), r#"{"a":1}"#);
        assert_eq!(doc.get_type(), JsonType::Object);
    }

    #[test]
    fn test_iterate_one_scalar_with_whitespace() {
        let mut engine = SonicEngine::new();
        let doc = engine.iterate_one(b"  42 \n").unwrap();
        assert_eq!(doc.as_raw_str(), "42");
    }

    #[test]
    fn test_iterate_one_rejects_trailing_garbage() {
        let mut engine = SonicEngine::new();
        assert!(engine.iterate_one(br#"{"a":1} x"#).is_err());
        assert!(engine.iterate_one(b"[1] [2]").is_err());
    }

    #[test]
    fn test_iterate_one_empty_input() {
        let mut engine = SonicEngine::new();
        let err = engine.iterate_one(b"").unwrap_err();
        assert_eq!(err.code(), DiagnosticCode::EmptyInput);

        let err = engine.iterate_one(b" \r\n\t").unwrap_err();
        assert_eq!(err.code(), DiagnosticCode::EmptyInput);
    }

    #[test]
    fn test_iterate_one_truncated_input() {
        let mut engine = SonicEngine::new();
        let err = engine.iterate_one(br#"{"a":"#).unwrap_err();
        assert!(!err.message().is_empty());
        assert!(err.position().is_some());
    }

    #[test]
    fn test_iterate_many_in_order() {
        let mut engine = SonicEngine::new();
        let docs: Vec<String> = engine
            .iterate_many(b"1 [2] {\"c\":3}\n\"four\"")
            .map(|doc| doc.unwrap().as_raw_str().to_string())
            .collect();
        assert_eq!(docs, vec!["1", "[2]", r#"{"c":3}"#, r#""four""#]);
    }

    #[test]
    fn test_iterate_many_empty() {
        let mut engine = SonicEngine::new();
        assert!(engine.iterate_many(b"").next().is_none());
        assert!(engine.iterate_many(b" \n ").next().is_none());
    }

    #[test]
    fn test_iterate_many_ends_cleanly() {
        let mut engine = SonicEngine::new();
        let mut stream = engine.iterate_many(b"[\"plain\"]\n[1]\n  ");
        assert_eq!(stream.next().unwrap().unwrap().as_raw_str(), r#"["plain"]"#);
        assert_eq!(stream.next().unwrap().unwrap().as_raw_str(), "[1]");
        assert!(stream.next().is_none());
        assert!(stream.next().is_none());
    }

    #[test]
    fn test_iterate_many_escaped_top_level_string() {
        let mut engine = SonicEngine::new();
        let docs: Vec<String> = engine
            .iterate_many(br#""a\nb" "c""#)
            .map(|doc| doc.unwrap().as_raw_str().to_string())
            .collect();
        assert_eq!(docs, vec![r#""a\nb""#, r#""c""#]);
    }

    #[test]
    fn test_iterate_many_truncated_last_document() {
        let mut engine = SonicEngine::new();
        let mut stream = engine.iterate_many(b"{\"a\":1}\n{\"b\":");
        assert!(stream.next().unwrap().is_ok());
        let err = stream.next().unwrap().unwrap_err();
        assert_eq!(err.code(), DiagnosticCode::UnexpectedEof);
        assert!(stream.next().is_none());
    }

    #[test]
    fn test_invalid_escape_is_rejected() {
        let mut engine = SonicEngine::new();
        let err = engine.iterate_one(br#"{"a":"\uZZZZ"}"#).unwrap_err();
        assert_eq!(err.code(), DiagnosticCode::Syntax);

        let mut stream = engine.iterate_many(b"1\n{\"a\":\"\\uZZZZ\"}\n2");
        assert_eq!(stream.next().unwrap().unwrap().as_raw_str(), "1");
        assert_eq!(stream.next().unwrap().unwrap_err().code(), DiagnosticCode::Syntax);
        assert!(stream.next().is_none());
    }

    #[test]
    fn test_invalid_utf8_is_rejected() {
        let mut engine = SonicEngine::new();
        let err = engine.iterate_one(b"[\"\xff\xfe\"]").unwrap_err();
        assert_eq!(err.code(), DiagnosticCode::InvalidUtf8);
        assert_eq!(err.position(), Some((1, 3)));

        let mut stream = engine.iterate_many(b"[1]\n[\"\xff\"]\n[2]");
        assert_eq!(stream.next().unwrap().unwrap().as_raw_str(), "[1]");
        let err = stream.next().unwrap().unwrap_err();
        assert_eq!(err.code(), DiagnosticCode::InvalidUtf8);
        assert_eq!(err.position(), Some((2, 3)));
        assert!(stream.next().is_none());
    }

    #[test]
    fn test_invalid_utf8_touching_a_number() {
        let mut engine = SonicEngine::new();
        let mut stream = engine.iterate_many(b"12\xff");
        assert_eq!(stream.next().unwrap().unwrap_err().code(), DiagnosticCode::InvalidUtf8);
        assert!(stream.next().is_none());

        let mut stream = engine.iterate_many(b"[1]\xff");
        assert_eq!(stream.next().unwrap().unwrap().as_raw_str(), "[1]");
        assert_eq!(stream.next().unwrap().unwrap_err().code(), DiagnosticCode::InvalidUtf8);
    }

    #[test]
    fn test_translate_categories() {
        let eof = sonic_rs::from_str::<Value>("[1,").unwrap_err();
        assert_eq!(translate(eof).code(), DiagnosticCode::UnexpectedEof);

        let syntax = sonic_rs::from_str::<Value>("[1,]").unwrap_err();
        assert_eq!(translate(syntax).code(), DiagnosticCode::Syntax);

        let unmatched = sonic_rs::from_str::<u64>("\"text\"").unwrap_err();
        assert_eq!(translate(unmatched).code(), DiagnosticCode::InvalidData);
    }

    #[test]
    fn test_line_column() {
        assert_eq!(line_column(b"abc", 0), (1, 1));
        assert_eq!(line_column(b"abc", 2), (1, 3));
        assert_eq!(line_column(b"a\nbc", 3), (2, 2));
    }

    #[test]
    fn test_is_json_whitespace() {
        assert!(is_json_whitespace(b' '));
        assert!(is_json_whitespace(b'\n'));
        assert!(!is_json_whitespace(0x0c));
        assert!(!is_json_whitespace(b'x'));
    }
}
