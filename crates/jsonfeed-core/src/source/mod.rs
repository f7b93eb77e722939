//! Document sources: forward-only cursors over documents in one input buffer
//!
//! A source is bound to an engine, handed a buffer with [`DocumentSource::parse`]
//! and then walked with [`DocumentSource::current_document`] and
//! [`DocumentSource::advance`] until [`Error::EndOfStream`].
//!
//! ```no_run
//! use jsonfeed::{DocumentSource, PaddedBuffer, SonicEngine, StreamingSource};
//!
//! # fn main() -> jsonfeed::Result<()> {
//! let mut engine = SonicEngine::new();
//! let buffer = PaddedBuffer::new(b"{\"a\":1}\n{\"b\":2}\n", 64);
//!
//! let mut source = StreamingSource::new(&mut engine);
//! source.parse(buffer.as_input())?;
//! let seen = source.drain_with(|doc| {
//!     println!("{}", doc.as_raw_str());
//!     Ok(())
//! })?;
//! assert_eq!(seen, 2);
//! # Ok(())
//! # }
//! ```

pub mod dispatch;
pub mod stream;
pub mod whole;

pub use dispatch::JsonSource;
pub use stream::StreamingSource;
pub use whole::WholeBufferSource;

use crate::{
    buffer::InputBuffer,
    engine::JsonEngine,
    error::{Error, Result},
};
use sonic_rs::{JsonType, JsonValueTrait, LazyValue};
use std::fmt;

/// Common cursor protocol of both framing modes
pub trait DocumentSource<'a> {
    /// Bind a new buffer and reset the cursor to the first document
    ///
    /// Any previous cursor state is discarded. Fails with
    /// [`Error::InsufficientPadding`] or [`Error::InputTooLarge`] when the buffer
    /// breaks the engine contract.
    fn parse(&mut self, input: InputBuffer<'a>) -> Result<()>;

    /// Document at the cursor; repeated calls return the same document
    fn current_document(&self) -> Result<Document<'_, 'a>>;

    /// Move to the next document, or report [`Error::EndOfStream`]
    fn advance(&mut self) -> Result<()>;

    /// Counters accumulated over the lifetime of this source
    fn stats(&self) -> &ParseStats;

    /// Visit every remaining document, returning how many were visited
    ///
    /// Stops cleanly at end of stream. Malformed input and errors returned by
    /// `visit` abort the walk.
    fn drain_with<F>(&mut self, mut visit: F) -> Result<usize>
    where
        Self: Sized,
        F: FnMut(Document<'_, 'a>) -> Result<()>,
    {
        let mut visited = 0;
        loop {
            match self.current_document() {
                Ok(doc) => {
                    visit(doc)?;
                    visited += 1;
                }
                Err(Error::EndOfStream) => return Ok(visited),
                Err(err) => return Err(err),
            }
            match self.advance() {
                Ok(()) => {}
                Err(Error::EndOfStream) => return Ok(visited),
                Err(err) => return Err(err),
            }
        }
    }
}

/// Borrowed handle to the document at a source's cursor
///
/// The handle borrows the source, so it cannot outlive the next
/// `advance` or `parse` call.
#[derive(Clone, Copy)]
pub struct Document<'s, 'a> {
    value: &'s LazyValue<'a>,
}

impl<'s, 'a> Document<'s, 'a> {
    pub(crate) fn new(value: &'s LazyValue<'a>) -> Self {
        Self { value }
    }

    /// Raw JSON text of the document, exactly as it appears in the buffer
    pub fn as_raw_str(&self) -> &'s str {
        self.value.as_raw_str()
    }

    /// Raw JSON bytes of the document
    pub fn as_bytes(&self) -> &'s [u8] {
        self.as_raw_str().as_bytes()
    }

    /// Top-level JSON type
    pub fn kind(&self) -> JsonType {
        self.value.get_type()
    }

    /// Underlying on-demand value, for typed extraction downstream
    pub fn lazy(&self) -> &'s LazyValue<'a> {
        self.value
    }
}

impl fmt::Debug for Document<'_, '_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Document").field(&self.as_raw_str()).finish()
    }
}

/// Per-source counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParseStats {
    /// Buffers accepted by `parse`
    pub buffers_bound: u64,
    /// Documents the cursor has been positioned on
    pub documents_yielded: u64,
    /// Malformed inputs reached
    pub malformed_inputs: u64,
}

/// Cursor position shared by both sources
pub(crate) enum Cursor<'a> {
    NotStarted,
    Active(LazyValue<'a>),
    /// Malformed document found while priming; reported until moved past
    Faulted(Error),
    Exhausted,
}

impl<'a> Cursor<'a> {
    pub(crate) fn document(&self) -> Result<Document<'_, 'a>> {
        match self {
            Cursor::Active(value) => Ok(Document::new(value)),
            Cursor::Faulted(err) => Err(err.clone()),
            Cursor::NotStarted | Cursor::Exhausted => Err(Error::EndOfStream),
        }
    }
}

impl fmt::Debug for Cursor<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cursor::NotStarted => f.write_str("NotStarted"),
            Cursor::Active(value) => f.debug_tuple("Active").field(&value.as_raw_str()).finish(),
            Cursor::Faulted(err) => f.debug_tuple("Faulted").field(err).finish(),
            Cursor::Exhausted => f.write_str("Exhausted"),
        }
    }
}

/// Enforce the engine's buffer contract and return the logical bytes
pub(crate) fn bind<'a, E>(engine: &E, input: &InputBuffer<'a>) -> Result<&'a [u8]>
where
    E: JsonEngine + ?Sized,
{
    let bytes = input.checked(engine.padding())?;
    let max = engine.config().max_input_size;
    if bytes.len() > max {
        return Err(Error::InputTooLarge {
            size: bytes.len(),
            max,
        });
    }
    Ok(bytes)
}
