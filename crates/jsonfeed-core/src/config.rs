//! Engine and framing configuration

use serde::{Deserialize, Serialize};

/// Over-read padding required past the logical end of every input buffer.
///
/// Matches the widest chunk read by the vectorized scanners (64 bytes).
pub const DEFAULT_PADDING: usize = 64;

/// Default upper bound on the logical length of a single input buffer (100MB)
pub const DEFAULT_MAX_INPUT_SIZE: usize = 100 * 1024 * 1024;

/// Configuration for a JSON engine instance
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Bytes that must be allocated past the logical end of the input
    pub padding: usize,
    /// Maximum logical input size in bytes
    pub max_input_size: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            padding: DEFAULT_PADDING,
            max_input_size: DEFAULT_MAX_INPUT_SIZE,
        }
    }
}

impl EngineConfig {
    /// Override the required padding
    pub fn with_padding(mut self, padding: usize) -> Self {
        self.padding = padding;
        self
    }

    /// Override the input size limit
    pub fn with_max_input_size(mut self, max_input_size: usize) -> Self {
        self.max_input_size = max_input_size;
        self
    }
}

/// How an input buffer is split into documents
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FramingMode {
    /// The whole buffer is exactly one JSON value
    #[default]
    WholeBuffer,
    /// The buffer holds consecutive whitespace-separated JSON values
    Streaming,
}
