//! Source treating the entire buffer as one JSON value

use super::{Cursor, Document, DocumentSource, ParseStats, bind};
use crate::{
    buffer::InputBuffer,
    engine::JsonEngine,
    error::{Error, Result},
};
use tracing::debug;

/// Whole-buffer document source
///
/// `parse` validates the complete buffer up front; there is exactly one
/// document and `advance` always ends the stream.
pub struct WholeBufferSource<'e, 'a, E: JsonEngine + ?Sized> {
    engine: &'e mut E,
    cursor: Cursor<'a>,
    stats: ParseStats,
}

impl<'e, 'a, E: JsonEngine + ?Sized> WholeBufferSource<'e, 'a, E> {
    /// Create a source borrowing `engine` for its whole lifetime
    pub fn new(engine: &'e mut E) -> Self {
        Self {
            engine,
            cursor: Cursor::NotStarted,
            stats: ParseStats::default(),
        }
    }
}

impl<'a, E: JsonEngine + ?Sized> DocumentSource<'a> for WholeBufferSource<'_, 'a, E> {
    fn parse(&mut self, input: InputBuffer<'a>) -> Result<()> {
        self.cursor = Cursor::Exhausted;
        let bytes = bind(&*self.engine, &input)?;
        self.stats.buffers_bound += 1;

        match self.engine.iterate_one(bytes) {
            Ok(value) => {
                debug!(len = bytes.len(), "bound whole-buffer document");
                self.cursor = Cursor::Active(value);
                self.stats.documents_yielded += 1;
                Ok(())
            }
            Err(err) => {
                self.stats.malformed_inputs += 1;
                debug!(code = %err.code(), len = bytes.len(), "malformed whole-buffer input");
                Err(err.into())
            }
        }
    }

    fn current_document(&self) -> Result<Document<'_, 'a>> {
        self.cursor.document()
    }

    fn advance(&mut self) -> Result<()> {
        if !matches!(self.cursor, Cursor::NotStarted) {
            self.cursor = Cursor::Exhausted;
        }
        Err(Error::EndOfStream)
    }

    fn stats(&self) -> &ParseStats {
        &self.stats
    }
}
