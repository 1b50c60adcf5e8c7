//! Transcription result types

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::config::DrumClass;

/// A single transcribed drum hit
///
/// Immutable once created; the final output unit of the pipeline. Downstream
/// encoders can match exhaustively on `class`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NoteEvent {
    /// Drum class that produced this hit
    pub class: DrumClass,

    /// Symbolic pitch identifier (General MIDI percussion numbering)
    pub pitch: u8,

    /// Onset time in seconds from the start of the buffer
    pub onset_seconds: f32,

    /// Loudness in [0, 127]
    pub velocity: u8,

    /// Fixed per-class note duration in seconds
    pub duration_seconds: f32,
}

/// A class that was skipped due to a recoverable per-class failure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkippedClass {
    /// The skipped class
    pub class: DrumClass,

    /// Why it was skipped (e.g. degenerate band after clamping)
    pub reason: String,
}

/// Transcription metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranscriptionMetadata {
    /// Source buffer duration in seconds
    pub duration_seconds: f32,

    /// Sample rate in Hz
    pub sample_rate: u32,

    /// Processing time in milliseconds
    pub processing_time_ms: f32,

    /// Classes skipped due to per-class filter design failures. Never
    /// silently suppressed: every skipped class appears here.
    pub skipped_classes: Vec<SkippedClass>,

    /// Human-readable warnings (skipped classes, degenerate input, etc.)
    pub warnings: Vec<String>,
}

/// Complete transcription result
///
/// The sole externally visible artifact of the pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranscriptionResult {
    /// All note events, sorted by onset time (simultaneous cross-class hits
    /// remain separate events)
    pub notes: Vec<NoteEvent>,

    /// Number of detected hits per configured class (zero for skipped and
    /// silent classes)
    pub hit_counts: BTreeMap<DrumClass, usize>,

    /// Metadata about this transcription run
    pub metadata: TranscriptionMetadata,
}

impl TranscriptionResult {
    /// Iterate over the events of a single class, in onset order
    pub fn notes_for(&self, class: DrumClass) -> impl Iterator<Item = &NoteEvent> {
        self.notes.iter().filter(move |n| n.class == class)
    }

    /// Total number of detected hits across all classes
    pub fn total_hits(&self) -> usize {
        self.hit_counts.values().sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn note(class: DrumClass, onset: f32) -> NoteEvent {
        NoteEvent {
            class,
            pitch: 36,
            onset_seconds: onset,
            velocity: 100,
            duration_seconds: 0.1,
        }
    }

    #[test]
    fn test_notes_for_filters_by_class() {
        let result = TranscriptionResult {
            notes: vec![
                note(DrumClass::Kick, 0.0),
                note(DrumClass::Snare, 0.5),
                note(DrumClass::Kick, 1.0),
            ],
            hit_counts: BTreeMap::from([(DrumClass::Kick, 2), (DrumClass::Snare, 1)]),
            metadata: TranscriptionMetadata {
                duration_seconds: 2.0,
                sample_rate: 44100,
                processing_time_ms: 1.0,
                skipped_classes: vec![],
                warnings: vec![],
            },
        };

        let kicks: Vec<_> = result.notes_for(DrumClass::Kick).collect();
        assert_eq!(kicks.len(), 2);
        assert_eq!(result.total_hits(), 3);
    }

    #[test]
    fn test_result_serializes_to_json() {
        let result = TranscriptionResult {
            notes: vec![note(DrumClass::Crash, 0.25)],
            hit_counts: BTreeMap::from([(DrumClass::Crash, 1)]),
            metadata: TranscriptionMetadata {
                duration_seconds: 1.0,
                sample_rate: 44100,
                processing_time_ms: 0.5,
                skipped_classes: vec![SkippedClass {
                    class: DrumClass::Ride,
                    reason: "degenerate band".to_string(),
                }],
                warnings: vec!["skipped ride".to_string()],
            },
        };

        let json = serde_json::to_string(&result).unwrap();
        let back: TranscriptionResult = serde_json::from_str(&json).unwrap();
        assert_eq!(back, result);
    }
}
