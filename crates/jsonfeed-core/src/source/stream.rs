//! Source over a buffer of consecutive JSON values (NDJSON and friends)
//!
//! Documents are delimited lazily, one per `advance`. The first document is
//! located by `parse` so that `current_document` works straight away, but a
//! malformed first document is only reported once the caller looks at it.

use super::{Cursor, Document, DocumentSource, ParseStats, bind};
use crate::{
    buffer::InputBuffer,
    engine::{DocumentStream, JsonEngine},
    error::{Error, Result},
};
use tracing::{debug, trace};

/// Streaming document source
pub struct StreamingSource<'e, 'a, E: JsonEngine + ?Sized> {
    engine: &'e mut E,
    stream: DocumentStream<'a>,
    cursor: Cursor<'a>,
    stats: ParseStats,
}

impl<'e, 'a, E: JsonEngine + ?Sized> StreamingSource<'e, 'a, E> {
    /// Create a source borrowing `engine` for its whole lifetime
    pub fn new(engine: &'e mut E) -> Self {
        Self {
            engine,
            stream: DocumentStream::empty(),
            cursor: Cursor::NotStarted,
            stats: ParseStats::default(),
        }
    }

    /// Pull the next document from the engine into the cursor
    fn pull(&mut self) -> Result<()> {
        match self.stream.next() {
            Some(Ok(value)) => {
                self.cursor = Cursor::Active(value);
                self.stats.documents_yielded += 1;
                trace!(index = self.stats.documents_yielded, "cursor moved");
                Ok(())
            }
            Some(Err(err)) => {
                self.cursor = Cursor::Exhausted;
                self.stats.malformed_inputs += 1;
                debug!(
                    code = %err.code(),
                    after = self.stats.documents_yielded,
                    "malformed document in stream"
                );
                Err(err.into())
            }
            None => {
                self.cursor = Cursor::Exhausted;
                trace!("document stream exhausted");
                Err(Error::EndOfStream)
            }
        }
    }
}

impl<'a, E: JsonEngine + ?Sized> DocumentSource<'a> for StreamingSource<'_, 'a, E> {
    fn parse(&mut self, input: InputBuffer<'a>) -> Result<()> {
        self.cursor = Cursor::Exhausted;
        self.stream = DocumentStream::empty();
        let bytes = bind(&*self.engine, &input)?;

        self.stream = self.engine.iterate_many(bytes);
        self.stats.buffers_bound += 1;
        debug!(len = bytes.len(), "bound document stream");

        match self.pull() {
            Ok(()) | Err(Error::EndOfStream) => Ok(()),
            Err(err) => {
                self.cursor = Cursor::Faulted(err);
                Ok(())
            }
        }
    }

    fn current_document(&self) -> Result<Document<'_, 'a>> {
        self.cursor.document()
    }

    fn advance(&mut self) -> Result<()> {
        match std::mem::replace(&mut self.cursor, Cursor::Exhausted) {
            Cursor::Active(_) => self.pull(),
            Cursor::Faulted(err) => Err(err),
            Cursor::NotStarted => {
                self.cursor = Cursor::NotStarted;
                Err(Error::EndOfStream)
            }
            Cursor::Exhausted => Err(Error::EndOfStream),
        }
    }

    fn stats(&self) -> &ParseStats {
        &self.stats
    }
}
