//! # jsonfeed
//!
//! Turns a caller-owned byte buffer into a lazy sequence of parsed JSON
//! documents over the sonic-rs SIMD engine. Two framing modes share one cursor
//! protocol:
//!
//! - [`WholeBufferSource`]: the buffer is exactly one JSON value
//! - [`StreamingSource`]: the buffer is a run of whitespace-separated values
//!   (NDJSON), delimited lazily one document at a time
//!
//! Buffers are never mutated. Document handles borrow the source and
//! the buffer, so they cannot be used after the cursor moves.

#![warn(rust_2018_idioms)]
#![deny(unsafe_code)]

pub mod buffer;
pub mod config;
pub mod engine;
pub mod error;
pub mod source;

pub use buffer::{InputBuffer, PaddedBuffer};
pub use config::{DEFAULT_MAX_INPUT_SIZE, DEFAULT_PADDING, EngineConfig, FramingMode};
pub use engine::{DiagnosticCode, DocumentStream, EngineError, JsonEngine, SonicEngine};
pub use error::{Error, Result};
pub use source::{
    Document, DocumentSource, JsonSource, ParseStats, StreamingSource, WholeBufferSource,
};

/// Re-export commonly used types
pub mod prelude {
    pub use super::{
        Document, DocumentSource, EngineConfig, Error, FramingMode, InputBuffer, JsonEngine,
        JsonSource, PaddedBuffer, Result, SonicEngine,
    };
}
