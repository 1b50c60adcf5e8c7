//! Band filter bank
//!
//! One zero-phase Butterworth band-pass per drum class:
//! - Filter design (cascaded biquad sections, Nyquist-clamped corners)
//! - Forward-backward application (zero net group delay)

pub mod bandpass;
pub mod zero_phase;

pub use bandpass::{design_bandpass, BandpassFilter};
pub use zero_phase::filtfilt;
