//! Signal conditioning: sanitization and peak normalization
//!
//! Reduces an arbitrary mono sample sequence to a finite, amplitude-normalized
//! buffer the rest of the pipeline can rely on:
//!
//! 1. Replace non-finite samples (NaN -> 0.0, +/-Inf -> +/-1.0)
//! 2. Clip to [-1.0, 1.0]
//! 3. Mask any still-non-finite samples to 0.0 (defensive second pass)
//! 4. Verify every sample is finite, or fail with `InvalidSignal`
//! 5. Scale so the peak absolute value is 1.0 (skipped for silent buffers)
//!
//! Conditioning is idempotent: running it on an already-conditioned buffer is
//! a no-op.

use crate::error::TranscribeError;

/// Silence threshold: buffers whose peak is below this are left unscaled
const SILENCE_EPSILON: f32 = 1e-10;

/// A conditioned, immutable mono sample buffer with a known sample rate
///
/// Invariant: every sample is finite and within [-1.0, 1.0], and the peak
/// absolute value is 1.0 unless the buffer is silent.
#[derive(Debug, Clone)]
pub struct SampleBuffer {
    samples: Vec<f32>,
    sample_rate: u32,
}

impl SampleBuffer {
    /// Read-only view of the samples
    pub fn samples(&self) -> &[f32] {
        &self.samples
    }

    /// Sample rate in Hz
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Number of samples
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// True if the buffer holds no samples
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Buffer duration in seconds
    pub fn duration_seconds(&self) -> f32 {
        self.samples.len() as f32 / self.sample_rate as f32
    }
}

/// Condition raw samples into a [`SampleBuffer`]
///
/// # Arguments
///
/// * `samples` - Mono samples, any range, possibly containing NaN/Inf
/// * `sample_rate` - Sample rate in Hz (must be non-zero, validated upstream)
///
/// # Errors
///
/// Returns `TranscribeError::InvalidSignal` if any sample remains non-finite
/// after cleanup. This signals a corrupt source and aborts the pipeline.
pub fn condition(samples: &[f32], sample_rate: u32) -> Result<SampleBuffer, TranscribeError> {
    log::debug!(
        "Conditioning {} samples at {} Hz",
        samples.len(),
        sample_rate
    );

    let mut cleaned: Vec<f32> = samples
        .iter()
        .map(|&x| {
            if x.is_nan() {
                0.0
            } else if x == f32::INFINITY {
                1.0
            } else if x == f32::NEG_INFINITY {
                -1.0
            } else {
                x
            }
        })
        .map(|x| x.clamp(-1.0, 1.0))
        .collect();

    // Defensive second pass: mask anything the replacement above missed
    let mut masked = 0usize;
    for x in cleaned.iter_mut() {
        if !x.is_finite() {
            *x = 0.0;
            masked += 1;
        }
    }
    if masked > 0 {
        log::warn!("Masked {} non-finite samples after cleanup", masked);
    }

    if cleaned.iter().any(|x| !x.is_finite()) {
        return Err(TranscribeError::InvalidSignal(
            "non-finite samples remain after cleanup".to_string(),
        ));
    }

    normalize_peak(&mut cleaned);

    Ok(SampleBuffer {
        samples: cleaned,
        sample_rate,
    })
}

/// Scale the buffer so its peak absolute value is 1.0
///
/// Silent buffers (peak below [`SILENCE_EPSILON`]) are left unscaled.
fn normalize_peak(samples: &mut [f32]) {
    let peak = samples.iter().map(|&x| x.abs()).fold(0.0f32, f32::max);

    if peak < SILENCE_EPSILON {
        log::debug!("Buffer is silent (peak {:e}), skipping normalization", peak);
        return;
    }

    let gain = 1.0 / peak;
    for sample in samples.iter_mut() {
        *sample *= gain;
    }

    log::debug!("Peak normalization applied: peak={:.6}, gain={:.6}", peak, gain);
}
