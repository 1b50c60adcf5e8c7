//! Adaptive onset-strength detection
//!
//! For high-density transient classes (closed hi-hat), a static amplitude
//! threshold either drowns in bleed or misses ghost hits; this detector
//! instead thresholds each frame against its own neighborhood.
//!
//! Algorithm:
//! 1. Frame the signal and compute RMS energy per frame
//! 2. Onset strength = positive energy flux, `max(0, E[n] - E[n-1])`
//! 3. Flag frame `n` as an onset when:
//!    - `strength[n]` is the maximum over `[n - pre_max, n + post_max]`
//!    - `strength[n] >= mean over [n - pre_avg, n + post_avg] + delta`
//!    - at least `wait` frames have passed since the previous onset
//!
//! The pre/post window sizes and `delta` are per-class constants tuned for
//! rapid eighth/sixteenth-note patterns.

use crate::error::TranscribeError;
use crate::features::envelope::rms_envelope;
use crate::features::onset::PeakEvent;

/// Averaging and local-maximum window sizes for the adaptive detector
#[derive(Debug, Clone, Copy)]
pub struct AdaptiveWindows {
    /// Frames before the candidate in the local-maximum window
    pub pre_max: usize,
    /// Frames after the candidate in the local-maximum window
    pub post_max: usize,
    /// Frames before the candidate in the averaging window
    pub pre_avg: usize,
    /// Frames after the candidate in the averaging window
    pub post_avg: usize,
}

/// Detect onsets with an adaptive local threshold
///
/// # Arguments
///
/// * `samples` - Band-filtered waveform
/// * `frame_size` - Analysis frame length in samples
/// * `hop_size` - Hop between frames in samples
/// * `delta` - Required margin above the local average (threshold sensitivity)
/// * `wait` - Refractory period in frames between accepted onsets
/// * `windows` - Pre/post averaging and maximum window sizes in frames
///
/// # Returns
///
/// `PeakEvent`s whose `index` is the onset frame (strictly increasing,
/// separated by more than `wait` frames) and whose `amplitude` is the onset
/// strength at that frame.
///
/// # Errors
///
/// Returns `TranscribeError::InvalidInput` for zero frame or hop sizes.
pub fn detect_onsets(
    samples: &[f32],
    frame_size: usize,
    hop_size: usize,
    delta: f32,
    wait: usize,
    windows: AdaptiveWindows,
) -> Result<Vec<PeakEvent>, TranscribeError> {
    let energies = rms_envelope(samples, frame_size, hop_size)?;
    if energies.len() < 2 {
        return Ok(Vec::new());
    }

    // Onset strength: positive energy flux, aligned so strength[n]
    // corresponds to the rise into frame n
    let mut strength = Vec::with_capacity(energies.len());
    strength.push(0.0f32);
    for i in 1..energies.len() {
        strength.push((energies[i] - energies[i - 1]).max(0.0));
    }

    let mut onsets = Vec::new();
    let mut last_onset: Option<usize> = None;

    for n in 0..strength.len() {
        let s = strength[n];
        if s <= 0.0 {
            continue;
        }

        // Local-maximum condition over the pre/post max window
        let max_lo = n.saturating_sub(windows.pre_max);
        let max_hi = (n + windows.post_max + 1).min(strength.len());
        let window_max = strength[max_lo..max_hi]
            .iter()
            .copied()
            .fold(f32::NEG_INFINITY, f32::max);
        if s < window_max {
            continue;
        }

        // Mean-plus-delta condition over the pre/post averaging window
        let avg_lo = n.saturating_sub(windows.pre_avg);
        let avg_hi = (n + windows.post_avg + 1).min(strength.len());
        let window_mean =
            strength[avg_lo..avg_hi].iter().sum::<f32>() / (avg_hi - avg_lo) as f32;
        if s < window_mean + delta {
            continue;
        }

        // Refractory condition
        if let Some(last) = last_onset {
            if n - last <= wait {
                continue;
            }
        }

        onsets.push(PeakEvent {
            index: n,
            amplitude: s,
        });
        last_onset = Some(n);
    }

    log::debug!(
        "Adaptive detector: {} frames -> {} onsets (delta {}, wait {})",
        strength.len(),
        onsets.len(),
        delta,
        wait
    );

    Ok(onsets)
}
