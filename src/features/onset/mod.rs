//! Onset and peak detection
//!
//! Two detector variants, selected per drum class:
//! - Adaptive onset-strength detector (dense transient classes)
//! - Static-threshold peak picker (waveform magnitude or RMS envelope)
//!
//! Both emit [`PeakEvent`]s with strictly increasing indices respecting the
//! class's minimum separation. Finding no peaks is the valid empty case,
//! never an error.

pub mod adaptive;
pub mod peak_picker;

/// A detected peak, consumed immediately by the velocity mapper
///
/// `index` is a sample index for waveform detection and a frame index for
/// envelope or onset-strength detection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PeakEvent {
    /// Sample or frame index of the peak
    pub index: usize,

    /// Local amplitude of the detected signal at the peak
    pub amplitude: f32,
}
