//! # Drumscribe
//!
//! A classical-DSP drum transcription engine: converts a raw percussion
//! waveform into a timed sequence of symbolic note events (drum class, onset
//! time, velocity, duration) with no machine-learned model.
//!
//! ## Pipeline
//!
//! ```text
//! Samples -> Conditioning -> per class: Band-pass (zero-phase) ->
//!   Envelope/Onset detection -> Velocity mapping -> Note events -> Result
//! ```
//!
//! Classes are processed independently with no cross-class state; each runs
//! as a parallel task over the shared, immutable conditioned buffer, joined
//! at a final merge.
//!
//! ## Quick start
//!
//! ```no_run
//! use drumscribe::{transcribe, TranscriptionConfig};
//!
//! // Mono samples, any nominal range; the conditioner normalizes them
//! let samples: Vec<f32> = vec![]; // your audio data
//! let result = transcribe(&samples, 44100, TranscriptionConfig::default())?;
//!
//! for note in &result.notes {
//!     println!(
//!         "{:?} pitch {} at {:.3}s velocity {}",
//!         note.class, note.pitch, note.onset_seconds, note.velocity
//!     );
//! }
//! # Ok::<(), drumscribe::TranscribeError>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod analysis;
pub mod config;
pub mod error;
pub mod features;
pub mod filter;
pub mod preprocessing;

use std::collections::BTreeMap;
use std::time::Instant;

use rayon::prelude::*;

use analysis::assembler::assemble;
use features::envelope::rms_envelope;
use features::onset::adaptive::{detect_onsets, AdaptiveWindows};
use features::onset::peak_picker::pick_peaks;

// Re-export main types
pub use analysis::result::{
    NoteEvent, SkippedClass, TranscriptionMetadata, TranscriptionResult,
};
pub use config::{ClassConfig, DetectorVariant, DrumClass, TranscriptionConfig};
pub use error::TranscribeError;
pub use preprocessing::SampleBuffer;

/// Transcribe a percussion waveform into timed note events
///
/// # Arguments
///
/// * `samples` - Mono samples (multi-channel sources are downmixed upstream)
/// * `sample_rate` - Sample rate in Hz
/// * `config` - Per-class tuning; `TranscriptionConfig::default()` reproduces
///   the documented reference behavior
///
/// # Returns
///
/// A [`TranscriptionResult`] with all note events sorted by onset time and a
/// per-class hit-count map. A zero-length or all-silent buffer legitimately
/// yields zero events for every class rather than erroring.
///
/// # Errors
///
/// * [`TranscribeError::InvalidInput`] - zero sample rate or frame/hop size
/// * [`TranscribeError::InvalidSignal`] - the input could not be reduced to a
///   finite normalized buffer (fatal, no partial result)
///
/// Per-class filter design failures are *not* errors at this level: the
/// class is skipped with zero events and reported in
/// [`TranscriptionMetadata::skipped_classes`].
pub fn transcribe(
    samples: &[f32],
    sample_rate: u32,
    config: TranscriptionConfig,
) -> Result<TranscriptionResult, TranscribeError> {
    let start_time = Instant::now();

    if sample_rate == 0 {
        return Err(TranscribeError::InvalidInput(
            "Sample rate must be > 0".to_string(),
        ));
    }
    if config.frame_size == 0 {
        return Err(TranscribeError::InvalidInput(
            "Frame size must be > 0".to_string(),
        ));
    }
    if config.hop_size == 0 {
        return Err(TranscribeError::InvalidInput(
            "Hop size must be > 0".to_string(),
        ));
    }

    log::debug!(
        "Transcribing {} samples at {} Hz across {} classes",
        samples.len(),
        sample_rate,
        config.classes.len()
    );

    // Conditioning is the only stage that touches the raw input; everything
    // after fans out over the shared immutable buffer.
    let buffer = preprocessing::condition(samples, sample_rate)?;

    // Fan-out: one independent task per class, no shared mutable state.
    let outcomes: Vec<(DrumClass, Result<Vec<NoteEvent>, TranscribeError>)> = config
        .classes
        .par_iter()
        .map(|(&class, class_config)| {
            (
                class,
                transcribe_class(
                    &buffer,
                    class,
                    class_config,
                    config.frame_size,
                    config.hop_size,
                ),
            )
        })
        .collect();

    // Fan-in: merge per-class streams, isolating recoverable failures.
    let mut notes: Vec<NoteEvent> = Vec::new();
    let mut hit_counts: BTreeMap<DrumClass, usize> = BTreeMap::new();
    let mut skipped_classes: Vec<SkippedClass> = Vec::new();
    let mut warnings: Vec<String> = Vec::new();

    for (class, outcome) in outcomes {
        match outcome {
            Ok(class_notes) => {
                hit_counts.insert(class, class_notes.len());
                notes.extend(class_notes);
            }
            Err(TranscribeError::FilterDesign(reason)) => {
                log::warn!("Skipping {}: {}", class.name(), reason);
                warnings.push(format!("skipped {}: {}", class.name(), reason));
                hit_counts.insert(class, 0);
                skipped_classes.push(SkippedClass { class, reason });
            }
            Err(err) => return Err(err),
        }
    }

    notes.sort_by(|a, b| {
        a.onset_seconds
            .partial_cmp(&b.onset_seconds)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then(a.class.cmp(&b.class))
    });

    let processing_time_ms = start_time.elapsed().as_secs_f32() * 1000.0;
    log::debug!(
        "Transcription finished: {} events in {:.2} ms",
        notes.len(),
        processing_time_ms
    );

    Ok(TranscriptionResult {
        notes,
        hit_counts,
        metadata: TranscriptionMetadata {
            duration_seconds: buffer.duration_seconds(),
            sample_rate,
            processing_time_ms,
            skipped_classes,
            warnings,
        },
    })
}

/// Run the per-class pipeline: filter, detect, assemble
fn transcribe_class(
    buffer: &SampleBuffer,
    class: DrumClass,
    config: &ClassConfig,
    frame_size: usize,
    hop_size: usize,
) -> Result<Vec<NoteEvent>, TranscribeError> {
    let sample_rate = buffer.sample_rate();

    let mut filter = filter::design_bandpass(
        config.low_hz,
        config.high_hz,
        config.filter_order,
        sample_rate,
    )?;
    let filtered = filter::filtfilt(&mut filter, buffer.samples());

    match config.detector {
        DetectorVariant::WaveformPeaks => {
            let magnitude: Vec<f32> = filtered.iter().map(|&x| x.abs()).collect();
            let min_distance =
                (config.min_separation_s * sample_rate as f32).round() as usize;
            let peaks = pick_peaks(&magnitude, config.threshold, min_distance);
            log::debug!("{}: {} waveform peaks", class.name(), peaks.len());
            Ok(assemble(class, config, &peaks, buffer, 1))
        }
        DetectorVariant::EnvelopePeaks => {
            let envelope = rms_envelope(&filtered, frame_size, hop_size)?;
            let min_distance = (config.min_separation_s * sample_rate as f32
                / hop_size as f32)
                .round() as usize;
            let peaks = pick_peaks(&envelope, config.threshold, min_distance);
            log::debug!("{}: {} envelope peaks", class.name(), peaks.len());
            Ok(assemble(class, config, &peaks, buffer, hop_size))
        }
        DetectorVariant::AdaptiveOnset {
            pre_max,
            post_max,
            pre_avg,
            post_avg,
        } => {
            let wait = (config.min_separation_s * sample_rate as f32 / hop_size as f32)
                .round() as usize;
            let windows = AdaptiveWindows {
                pre_max,
                post_max,
                pre_avg,
                post_avg,
            };
            let onsets = detect_onsets(
                &filtered,
                frame_size,
                hop_size,
                config.threshold,
                wait,
                windows,
            )?;
            log::debug!("{}: {} adaptive onsets", class.name(), onsets.len());
            Ok(assemble(class, config, &onsets, buffer, hop_size))
        }
    }
}
