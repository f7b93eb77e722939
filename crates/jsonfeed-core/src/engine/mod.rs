//! JSON engine capability consumed by document sources
//!
//! An engine turns a byte slice into on-demand [`LazyValue`] handles, either as
//! exactly one document or as a lazily delimited stream of documents. Engines
//! hold mutable scanning state and are borrowed exclusively by one source at a
//! time; run one engine per worker thread.

pub mod sonic;

pub use sonic::SonicEngine;

use crate::config::EngineConfig;
use sonic_rs::LazyValue;
use std::fmt;

/// Stable diagnostic codes for input the engine rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticCode {
    /// No JSON value present
    EmptyInput = 1,
    /// Input ended inside a value
    UnexpectedEof = 2,
    /// Structural or lexical malformation
    Syntax = 3,
    /// Well-formed text that the engine could not represent
    InvalidData = 4,
    /// Engine-internal read failure
    Io = 5,
    /// Input bytes are not valid UTF-8
    InvalidUtf8 = 6,
}

impl DiagnosticCode {
    /// Numeric value of the code
    pub fn as_u32(self) -> u32 {
        self as u32
    }

    /// Short lowercase name
    pub fn name(self) -> &'static str {
        match self {
            Self::EmptyInput => "empty",
            Self::UnexpectedEof => "eof",
            Self::Syntax => "syntax",
            Self::InvalidData => "data",
            Self::Io => "io",
            Self::InvalidUtf8 => "utf8",
        }
    }
}

impl fmt::Display for DiagnosticCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.as_u32(), self.name())
    }
}

/// Diagnostic reported by an engine for malformed input
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineError {
    code: DiagnosticCode,
    message: String,
    position: Option<(usize, usize)>,
}

impl EngineError {
    /// Create a diagnostic without position information
    pub fn new(code: DiagnosticCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            position: None,
        }
    }

    /// Attach a 1-based line and column
    pub fn at(mut self, line: usize, column: usize) -> Self {
        self.position = Some((line, column));
        self
    }

    /// Diagnostic code
    pub fn code(&self) -> DiagnosticCode {
        self.code
    }

    /// Engine-provided description
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Line and column where the engine stopped, if known
    pub fn position(&self) -> Option<(usize, usize)> {
        self.position
    }
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

impl std::error::Error for EngineError {}

/// Lazy, forward-only sequence of documents delimited by an engine
pub struct DocumentStream<'a> {
    inner: Box<dyn Iterator<Item = Result<LazyValue<'a>, EngineError>> + 'a>,
}

impl<'a> DocumentStream<'a> {
    /// Wrap an engine-specific document iterator
    pub fn new<I>(iter: I) -> Self
    where
        I: Iterator<Item = Result<LazyValue<'a>, EngineError>> + 'a,
    {
        Self {
            inner: Box::new(iter),
        }
    }

    /// A stream with no documents
    pub fn empty() -> Self {
        Self::new(std::iter::empty())
    }
}

impl<'a> Iterator for DocumentStream<'a> {
    type Item = Result<LazyValue<'a>, EngineError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }
}

impl fmt::Debug for DocumentStream<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DocumentStream").finish_non_exhaustive()
    }
}

/// Parsing engine used by document sources
///
/// The iteration methods take `&mut self` for engines that keep scanner state
/// between calls; returned documents borrow only the input.
pub trait JsonEngine {
    /// Engine configuration, including the required padding
    fn config(&self) -> &EngineConfig;

    /// Over-read padding every input buffer must provide
    fn padding(&self) -> usize {
        self.config().padding
    }

    /// Interpret `input` as exactly one JSON value, validating all of it
    fn iterate_one<'a>(&mut self, input: &'a [u8]) -> Result<LazyValue<'a>, EngineError>;

    /// Delimit `input` into consecutive JSON values on demand
    fn iterate_many<'a>(&mut self, input: &'a [u8]) -> DocumentStream<'a>;
}
