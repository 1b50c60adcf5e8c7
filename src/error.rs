//! Error types for drum transcription

use std::fmt;

/// Errors that can occur during transcription
#[derive(Debug, Clone, PartialEq)]
pub enum TranscribeError {
    /// Invalid input parameters (zero sample rate, zero frame/hop size, etc.)
    InvalidInput(String),

    /// The input could not be reduced to a finite, normalized buffer.
    ///
    /// Fatal: aborts the whole transcription, no partial result is returned.
    InvalidSignal(String),

    /// A class's band corners are degenerate even after Nyquist clamping.
    ///
    /// Recoverable at the pipeline level: the class is skipped with zero
    /// events and reported in the result metadata, sibling classes continue.
    FilterDesign(String),
}

impl fmt::Display for TranscribeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TranscribeError::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            TranscribeError::InvalidSignal(msg) => write!(f, "Invalid signal: {}", msg),
            TranscribeError::FilterDesign(msg) => write!(f, "Filter design failed: {}", msg),
        }
    }
}

impl std::error::Error for TranscribeError {}
