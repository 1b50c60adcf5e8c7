//! Short-time RMS envelope extraction
//!
//! Reduces a filtered signal to one non-negative energy value per analysis
//! frame. Used for decay-dominated classes (cymbals), whose useful
//! discriminator is energy decay over time rather than a sharp transient;
//! transient classes detect on the raw filtered waveform instead.
//!
//! Frames start at `frame_index * hop` and span `frame_size` samples; frame
//! time maps back as `frame_index * hop / sample_rate`.

use crate::error::TranscribeError;

/// Compute the short-time RMS envelope of a signal
///
/// # Arguments
///
/// * `samples` - Input signal (typically a band-filtered waveform)
/// * `frame_size` - Analysis frame length in samples (typically 2048)
/// * `hop_size` - Hop between frame starts in samples (typically 512)
///
/// # Returns
///
/// One RMS value per frame; empty if the signal is shorter than one frame.
///
/// # Errors
///
/// Returns `TranscribeError::InvalidInput` if `frame_size` or `hop_size` is
/// zero.
pub fn rms_envelope(
    samples: &[f32],
    frame_size: usize,
    hop_size: usize,
) -> Result<Vec<f32>, TranscribeError> {
    if frame_size == 0 {
        return Err(TranscribeError::InvalidInput(
            "Frame size must be > 0".to_string(),
        ));
    }
    if hop_size == 0 {
        return Err(TranscribeError::InvalidInput(
            "Hop size must be > 0".to_string(),
        ));
    }

    if samples.len() < frame_size {
        return Ok(Vec::new());
    }

    let num_frames = (samples.len() - frame_size) / hop_size + 1;
    let mut envelope = Vec::with_capacity(num_frames);

    for i in 0..num_frames {
        let start = i * hop_size;
        let end = start + frame_size;
        let sum_sq: f32 = samples[start..end].iter().map(|&x| x * x).sum();
        envelope.push((sum_sq / frame_size as f32).sqrt());
    }

    log::debug!(
        "RMS envelope: {} samples -> {} frames (frame={}, hop={})",
        samples.len(),
        envelope.len(),
        frame_size,
        hop_size
    );

    Ok(envelope)
}

/// Map a frame index back to seconds
pub fn frame_to_seconds(frame_index: usize, hop_size: usize, sample_rate: u32) -> f32 {
    (frame_index * hop_size) as f32 / sample_rate as f32
}
