//! Ingest a JSON or NDJSON file and report every document
//!
//! ```text
//! RUST_LOG=jsonfeed=debug cargo run --example ndjson_ingest -- streaming data.ndjson
//! ```
//!
//! Without a file argument a small built-in batch is used.

use jsonfeed::prelude::*;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

const SAMPLE: &str = r#"{"id":1,"event":"login"}
{"id":2,"event":"click","target":"buy"}
{"id":3,"event":"logout"}
"#;

fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut args = std::env::args().skip(1);
    let mode = match args.next().as_deref() {
        Some("whole") | Some("whole_buffer") => FramingMode::WholeBuffer,
        _ => FramingMode::Streaming,
    };
    let bytes = match args.next() {
        Some(path) => std::fs::read(path)?,
        None => SAMPLE.as_bytes().to_vec(),
    };

    let mut engine = SonicEngine::new();
    let buffer = PaddedBuffer::new(&bytes, engine.padding());
    let mut source = JsonSource::new(mode, &mut engine);
    source.parse(buffer.as_input())?;

    match source.drain_with(|doc| {
        println!("{:?}\t{}", doc.kind(), doc.as_raw_str());
        Ok(())
    }) {
        Ok(count) => info!(count, ?mode, "ingested documents"),
        Err(err) => warn!(%err, "batch aborted"),
    }

    let stats = source.stats();
    info!(
        buffers = stats.buffers_bound,
        documents = stats.documents_yielded,
        malformed = stats.malformed_inputs,
        "done"
    );
    Ok(())
}
