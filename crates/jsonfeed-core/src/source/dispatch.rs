//! Framing-mode dispatch over the two source variants

use super::{Document, DocumentSource, ParseStats, StreamingSource, WholeBufferSource};
use crate::{buffer::InputBuffer, config::FramingMode, engine::JsonEngine, error::Result};

/// Document source selected by [`FramingMode`]
pub enum JsonSource<'e, 'a, E: JsonEngine + ?Sized> {
    /// One JSON value per buffer
    WholeBuffer(WholeBufferSource<'e, 'a, E>),
    /// Consecutive JSON values per buffer
    Streaming(StreamingSource<'e, 'a, E>),
}

impl<'e, 'a, E: JsonEngine + ?Sized> JsonSource<'e, 'a, E> {
    /// Build the source for `mode` on top of `engine`
    pub fn new(mode: FramingMode, engine: &'e mut E) -> Self {
        match mode {
            FramingMode::WholeBuffer => Self::WholeBuffer(WholeBufferSource::new(engine)),
            FramingMode::Streaming => Self::Streaming(StreamingSource::new(engine)),
        }
    }

    /// Framing mode of the wrapped source
    pub fn mode(&self) -> FramingMode {
        match self {
            Self::WholeBuffer(_) => FramingMode::WholeBuffer,
            Self::Streaming(_) => FramingMode::Streaming,
        }
    }
}

impl<'a, E: JsonEngine + ?Sized> DocumentSource<'a> for JsonSource<'_, 'a, E> {
    fn parse(&mut self, input: InputBuffer<'a>) -> Result<()> {
        match self {
            Self::WholeBuffer(source) => source.parse(input),
            Self::Streaming(source) => source.parse(input),
        }
    }

    fn current_document(&self) -> Result<Document<'_, 'a>> {
        match self {
            Self::WholeBuffer(source) => source.current_document(),
            Self::Streaming(source) => source.current_document(),
        }
    }

    fn advance(&mut self) -> Result<()> {
        match self {
            Self::WholeBuffer(source) => source.advance(),
            Self::Streaming(source) => source.advance(),
        }
    }

    fn stats(&self) -> &ParseStats {
        match self {
            Self::WholeBuffer(source) => source.stats(),
            Self::Streaming(source) => source.stats(),
        }
    }
}
