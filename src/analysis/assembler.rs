//! Event assembly
//!
//! Converts a class's detected peaks into [`NoteEvent`]s: onset time from the
//! peak's sample (or frame) index, velocity from the conditioned signal's
//! local amplitude, duration from the class's fixed constant. No cross-class
//! deduplication: a kick and snare struck together yield two independent
//! events at the same onset time.

use crate::analysis::result::NoteEvent;
use crate::analysis::velocity::map_velocity;
use crate::config::{ClassConfig, DrumClass};
use crate::features::onset::PeakEvent;
use crate::preprocessing::SampleBuffer;

/// Build note events for one class from its detected peaks
///
/// `samples_per_index` converts peak indices to sample positions: 1 for
/// waveform-domain peaks, the hop size for frame-domain peaks (envelope or
/// onset-strength detection).
pub fn assemble(
    class: DrumClass,
    config: &ClassConfig,
    peaks: &[PeakEvent],
    buffer: &SampleBuffer,
    samples_per_index: usize,
) -> Vec<NoteEvent> {
    let sample_rate = buffer.sample_rate();

    let notes: Vec<NoteEvent> = peaks
        .iter()
        .map(|peak| {
            let sample_index = peak.index * samples_per_index;
            NoteEvent {
                class,
                pitch: config.pitch,
                onset_seconds: sample_index as f32 / sample_rate as f32,
                velocity: map_velocity(buffer.samples(), sample_index, config.base_velocity),
                duration_seconds: config.note_duration_s,
            }
        })
        .collect();

    log::debug!("{}: assembled {} note events", class.name(), notes.len());

    notes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::preprocessing::condition;

    #[test]
    fn test_waveform_peaks_map_directly_to_time() {
        let mut samples = vec![0.0f32; 44100];
        samples[11025] = 1.0;
        let buffer = condition(&samples, 44100).unwrap();

        let config = ClassConfig::defaults_for(DrumClass::Kick);
        let peaks = vec![PeakEvent {
            index: 11025,
            amplitude: 0.9,
        }];

        let notes = assemble(DrumClass::Kick, &config, &peaks, &buffer, 1);
        assert_eq!(notes.len(), 1);
        assert!((notes[0].onset_seconds - 0.25).abs() < 1e-6);
        assert_eq!(notes[0].pitch, 36);
        assert_eq!(notes[0].velocity, 127, "unit amplitude saturates velocity");
        assert!((notes[0].duration_seconds - 0.1).abs() < 1e-6);
    }

    #[test]
    fn test_frame_peaks_scale_by_hop() {
        let mut samples = vec![0.0f32; 44100];
        samples[5 * 512] = 1.0;
        let buffer = condition(&samples, 44100).unwrap();

        let config = ClassConfig::defaults_for(DrumClass::Crash);
        let peaks = vec![PeakEvent {
            index: 5,
            amplitude: 0.2,
        }];

        let notes = assemble(DrumClass::Crash, &config, &peaks, &buffer, 512);
        assert_eq!(notes.len(), 1);
        assert!((notes[0].onset_seconds - 2560.0 / 44100.0).abs() < 1e-6);
        assert_eq!(notes[0].class, DrumClass::Crash);
        assert!((notes[0].duration_seconds - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_no_peaks_yields_no_notes() {
        let buffer = condition(&vec![0.0f32; 1024], 44100).unwrap();
        let config = ClassConfig::defaults_for(DrumClass::Snare);
        let notes = assemble(DrumClass::Snare, &config, &[], &buffer, 1);
        assert!(notes.is_empty());
    }
}
