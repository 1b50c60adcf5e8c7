//! Static-threshold peak picking
//!
//! Scans a magnitude signal (absolute filtered waveform or RMS envelope) for
//! local maxima above a fixed height threshold, then enforces a minimum
//! distance between accepted peaks, keeping the highest peaks first.
//!
//! The height threshold is an absolute amplitude, not relative to the
//! per-file peak: detection sensitivity varies with recording loudness by
//! documented policy. Plateau ties resolve to the first index.

use crate::features::onset::PeakEvent;

/// Find peaks above `height`, separated by at least `min_distance` indices
///
/// Candidates are local maxima (`x[i] > x[i-1] && x[i] >= x[i+1]`, so a flat
/// plateau reports its first index). Distance pruning accepts candidates in
/// descending amplitude order, discarding any candidate closer than
/// `min_distance` to an already-accepted peak, then reports the survivors in
/// index order.
///
/// # Arguments
///
/// * `signal` - Non-negative magnitude signal
/// * `height` - Absolute amplitude threshold (peaks must exceed it)
/// * `min_distance` - Minimum index separation between accepted peaks
///   (values below 1 are treated as 1)
pub fn pick_peaks(signal: &[f32], height: f32, min_distance: usize) -> Vec<PeakEvent> {
    if signal.len() < 3 {
        return Vec::new();
    }

    let min_distance = min_distance.max(1);

    // Collect local maxima above the threshold
    let mut candidates: Vec<PeakEvent> = Vec::new();
    for i in 1..signal.len() - 1 {
        if signal[i] > signal[i - 1] && signal[i] >= signal[i + 1] && signal[i] > height {
            candidates.push(PeakEvent {
                index: i,
                amplitude: signal[i],
            });
        }
    }

    if candidates.is_empty() {
        return Vec::new();
    }

    // Enforce minimum distance, highest peaks first
    let mut by_amplitude: Vec<usize> = (0..candidates.len()).collect();
    by_amplitude.sort_by(|&a, &b| {
        candidates[b]
            .amplitude
            .partial_cmp(&candidates[a].amplitude)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let mut keep = vec![true; candidates.len()];
    for &k in &by_amplitude {
        if !keep[k] {
            continue;
        }
        let idx = candidates[k].index;
        // Suppress weaker neighbors within the refractory distance
        for (j, other) in candidates.iter().enumerate() {
            if j != k && keep[j] && idx.abs_diff(other.index) < min_distance {
                keep[j] = false;
            }
        }
    }

    let peaks: Vec<PeakEvent> = candidates
        .into_iter()
        .zip(keep)
        .filter_map(|(peak, kept)| kept.then_some(peak))
        .collect();

    log::debug!(
        "Peak picker: {} candidates -> {} peaks (height {}, distance {})",
        by_amplitude.len(),
        peaks.len(),
        height,
        min_distance
    );

    peaks
}
