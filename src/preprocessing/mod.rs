//! Audio preprocessing modules
//!
//! Prepares raw audio for detection:
//! - Signal conditioning (sanitization + peak normalization)
//!
//! Multi-channel downmixing happens before this stage, by the caller.

pub mod conditioner;

pub use conditioner::{condition, SampleBuffer};
