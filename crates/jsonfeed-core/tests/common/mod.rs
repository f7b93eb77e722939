//! Common test utilities and engine doubles
//!
//! Provides padded buffers and a scripted engine for driving sources through
//! failure paths the real engine cannot be forced into.

#![allow(dead_code)]

use jsonfeed::{
    DiagnosticCode, DocumentSource, DocumentStream, EngineConfig, EngineError, Error, JsonEngine,
    PaddedBuffer, SonicEngine,
};
use sonic_rs::LazyValue;

/// Copy `text` into a buffer with the default engine padding
pub fn padded(text: &str) -> PaddedBuffer {
    PaddedBuffer::new(text.as_bytes(), jsonfeed::DEFAULT_PADDING)
}

/// Walk a source to its end, collecting raw documents and the terminating error
pub fn collect_raw<'a, S: DocumentSource<'a>>(source: &mut S) -> (Vec<String>, Error) {
    let mut docs = Vec::new();
    loop {
        match source.current_document() {
            Ok(doc) => docs.push(doc.as_raw_str().to_string()),
            Err(err) => return (docs, err),
        }
        if let Err(err) = source.advance() {
            return (docs, err);
        }
    }
}

/// Engine that delegates to sonic-rs but can inject a diagnostic
///
/// When `fail_at` is set, the document at that index (or the single document
/// for `iterate_one`) is replaced by the scripted error.
pub struct ScriptedEngine {
    inner: SonicEngine,
    fail_at: Option<(usize, EngineError)>,
    pub one_calls: usize,
    pub many_calls: usize,
}

impl ScriptedEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            inner: SonicEngine::with_config(config),
            fail_at: None,
            one_calls: 0,
            many_calls: 0,
        }
    }

    pub fn failing_at(mut self, index: usize, code: DiagnosticCode, message: &str) -> Self {
        self.fail_at = Some((index, EngineError::new(code, message)));
        self
    }
}

impl JsonEngine for ScriptedEngine {
    fn config(&self) -> &EngineConfig {
        self.inner.config()
    }

    fn iterate_one<'a>(&mut self, input: &'a [u8]) -> Result<LazyValue<'a>, EngineError> {
        self.one_calls += 1;
        match &self.fail_at {
            Some((_, err)) => Err(err.clone()),
            None => self.inner.iterate_one(input),
        }
    }

    fn iterate_many<'a>(&mut self, input: &'a [u8]) -> DocumentStream<'a> {
        self.many_calls += 1;
        let fail_at = self.fail_at.clone();
        let stream = self.inner.iterate_many(input);
        DocumentStream::new(stream.enumerate().map(move |(index, item)| {
            match &fail_at {
                Some((at, err)) if *at == index => Err(err.clone()),
                _ => item,
            }
        }))
    }
}
