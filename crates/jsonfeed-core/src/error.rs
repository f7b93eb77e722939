//! Error types for document source operations

use crate::engine::{DiagnosticCode, EngineError};

/// Result type alias for document source operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for document source operations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// Input bytes do not form valid JSON at the point reached
    #[error("Parse json data failed. code: {code}, error info: {message}")]
    MalformedInput {
        /// Diagnostic code reported by the engine
        code: DiagnosticCode,
        /// Engine-provided description
        message: String,
    },

    /// No document at the cursor; iteration is complete
    #[error("read json document end")]
    EndOfStream,

    /// Buffer capacity does not cover the logical length plus engine padding
    #[error(
        "Buffer capacity {capacity} is below length {len} plus required padding {padding}"
    )]
    InsufficientPadding {
        /// Logical byte count
        len: usize,
        /// Allocated byte count
        capacity: usize,
        /// Over-read padding the engine requires
        padding: usize,
    },

    /// Logical length exceeds the configured input limit
    #[error("Input size {size} exceeds maximum allowed {max} bytes")]
    InputTooLarge {
        /// Logical byte count
        size: usize,
        /// Configured maximum
        max: usize,
    },
}

impl Error {
    /// Create a malformed input error
    pub fn malformed(code: DiagnosticCode, message: impl Into<String>) -> Self {
        Self::MalformedInput {
            code,
            message: message.into(),
        }
    }

    /// True for the iteration-completion signal
    pub fn is_end_of_stream(&self) -> bool {
        matches!(self, Self::EndOfStream)
    }

    /// True when the input itself was rejected
    pub fn is_malformed(&self) -> bool {
        matches!(self, Self::MalformedInput { .. })
    }

    /// True for call-site contract violations rather than data-quality problems
    pub fn is_precondition(&self) -> bool {
        matches!(
            self,
            Self::InsufficientPadding { .. } | Self::InputTooLarge { .. }
        )
    }

    /// Diagnostic code for malformed input
    pub fn diagnostic_code(&self) -> Option<DiagnosticCode> {
        match self {
            Self::MalformedInput { code, .. } => Some(*code),
            _ => None,
        }
    }
}

impl From<EngineError> for Error {
    fn from(err: EngineError) -> Self {
        Error::MalformedInput {
            code: err.code(),
            message: err.message().to_owned(),
        }
    }
}
