//! Configuration parameters for drum transcription
//!
//! All per-class tuning (band corners, filter order, detector variant,
//! thresholds, separation, pitch mapping) lives here. The defaults reproduce
//! the documented reference behavior; any subset may be overridden through
//! [`TranscriptionConfig::classes`].

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// The fixed set of drum classes recognized by the transcriber
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum DrumClass {
    /// Bass drum (30-150 Hz by default)
    Kick,
    /// Snare drum (200-700 Hz)
    Snare,
    /// Closed hi-hat (1200-16000 Hz), the densest class
    ClosedHiHat,
    /// High tom (450-550 Hz)
    HighTom,
    /// Low tom (200-350 Hz)
    LowTom,
    /// Crash cymbal (5000-15000 Hz), detected on its energy decay
    Crash,
    /// Ride cymbal (2000-7000 Hz), detected on its energy decay
    Ride,
}

impl DrumClass {
    /// All classes, in processing order
    pub const ALL: [DrumClass; 7] = [
        DrumClass::Kick,
        DrumClass::Snare,
        DrumClass::ClosedHiHat,
        DrumClass::HighTom,
        DrumClass::LowTom,
        DrumClass::Crash,
        DrumClass::Ride,
    ];

    /// Human-readable class name
    pub fn name(&self) -> &'static str {
        match self {
            DrumClass::Kick => "kick",
            DrumClass::Snare => "snare",
            DrumClass::ClosedHiHat => "closed hi-hat",
            DrumClass::HighTom => "high tom",
            DrumClass::LowTom => "low tom",
            DrumClass::Crash => "crash",
            DrumClass::Ride => "ride",
        }
    }
}

/// Detector variant used for a drum class
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum DetectorVariant {
    /// Adaptive onset-strength detector over framed energy flux.
    ///
    /// A frame is flagged when its strength is the maximum of the surrounding
    /// `pre_max`/`post_max` window and exceeds the mean of the surrounding
    /// `pre_avg`/`post_avg` window by the class threshold (delta). Used for
    /// the densest, most rhythmically regular classes.
    AdaptiveOnset {
        /// Frames before the candidate in the local-maximum window
        pre_max: usize,
        /// Frames after the candidate in the local-maximum window
        post_max: usize,
        /// Frames before the candidate in the averaging window
        pre_avg: usize,
        /// Frames after the candidate in the averaging window
        post_avg: usize,
    },

    /// Static-threshold peak picking over the absolute filtered waveform
    WaveformPeaks,

    /// Static-threshold peak picking over the short-time RMS envelope,
    /// for classes whose discriminator is energy decay (cymbals)
    EnvelopePeaks,
}

/// Per-class tuning parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassConfig {
    /// Passband low corner in Hz
    pub low_hz: f32,

    /// Passband high corner in Hz
    pub high_hz: f32,

    /// Butterworth filter order (typically 3-5; higher is sharper but less
    /// numerically stable under the two-pass zero-phase compensation)
    pub filter_order: usize,

    /// Detector variant for this class
    pub detector: DetectorVariant,

    /// Amplitude threshold: peak height for the static picker, delta above
    /// the local average for the adaptive detector.
    ///
    /// Absolute values, not relative to the per-file peak: detection
    /// sensitivity varies with recording loudness by documented policy.
    pub threshold: f32,

    /// Minimum time between accepted peaks (refractory period), in seconds
    pub min_separation_s: f32,

    /// Symbolic pitch identifier emitted for this class (General MIDI
    /// percussion numbering)
    pub pitch: u8,

    /// Base velocity before amplitude scaling
    pub base_velocity: u8,

    /// Fixed duration of emitted notes, in seconds (short for percussive
    /// hits, longer for cymbals to represent decay)
    pub note_duration_s: f32,
}

impl ClassConfig {
    /// Documented default configuration for a class
    pub fn defaults_for(class: DrumClass) -> Self {
        match class {
            DrumClass::Kick => Self {
                low_hz: 30.0,
                high_hz: 150.0,
                filter_order: 3,
                detector: DetectorVariant::WaveformPeaks,
                threshold: 0.15,
                min_separation_s: 0.25,
                pitch: 36,
                base_velocity: 100,
                note_duration_s: 0.1,
            },
            DrumClass::Snare => Self {
                low_hz: 200.0,
                high_hz: 700.0,
                filter_order: 3,
                detector: DetectorVariant::WaveformPeaks,
                threshold: 0.15,
                min_separation_s: 0.25,
                pitch: 38,
                base_velocity: 90,
                note_duration_s: 0.1,
            },
            DrumClass::ClosedHiHat => Self {
                low_hz: 1200.0,
                high_hz: 16000.0,
                filter_order: 3,
                detector: DetectorVariant::AdaptiveOnset {
                    pre_max: 20,
                    post_max: 20,
                    pre_avg: 100,
                    post_avg: 100,
                },
                threshold: 0.03,
                // Two analysis frames at the reference 22.05 kHz rate
                min_separation_s: 0.046,
                pitch: 42,
                base_velocity: 70,
                note_duration_s: 0.1,
            },
            DrumClass::HighTom => Self {
                low_hz: 450.0,
                high_hz: 550.0,
                filter_order: 5,
                detector: DetectorVariant::WaveformPeaks,
                threshold: 0.1,
                min_separation_s: 0.0023,
                pitch: 50,
                base_velocity: 85,
                note_duration_s: 0.1,
            },
            DrumClass::LowTom => Self {
                low_hz: 200.0,
                high_hz: 350.0,
                filter_order: 5,
                detector: DetectorVariant::WaveformPeaks,
                threshold: 0.1,
                min_separation_s: 0.0023,
                pitch: 45,
                base_velocity: 85,
                note_duration_s: 0.1,
            },
            DrumClass::Crash => Self {
                low_hz: 5000.0,
                high_hz: 15000.0,
                filter_order: 5,
                detector: DetectorVariant::EnvelopePeaks,
                threshold: 0.1,
                // 50 envelope frames at the reference rate and hop
                min_separation_s: 1.16,
                pitch: 49,
                base_velocity: 90,
                note_duration_s: 1.0,
            },
            DrumClass::Ride => Self {
                low_hz: 2000.0,
                high_hz: 7000.0,
                filter_order: 5,
                detector: DetectorVariant::EnvelopePeaks,
                threshold: 0.1,
                min_separation_s: 1.16,
                pitch: 51,
                base_velocity: 85,
                note_duration_s: 0.5,
            },
        }
    }
}

/// Transcription configuration parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranscriptionConfig {
    /// Analysis frame size in samples for envelopes and onset strength
    /// (default: 2048)
    pub frame_size: usize,

    /// Hop size in samples between analysis frames (default: 512)
    pub hop_size: usize,

    /// Per-class configuration. Populated with all seven classes by default;
    /// removing an entry omits that class from transcription entirely.
    pub classes: BTreeMap<DrumClass, ClassConfig>,
}

impl Default for TranscriptionConfig {
    fn default() -> Self {
        let classes = DrumClass::ALL
            .iter()
            .map(|&class| (class, ClassConfig::defaults_for(class)))
            .collect();

        Self {
            frame_size: 2048,
            hop_size: 512,
            classes,
        }
    }
}

impl TranscriptionConfig {
    /// Override one class's configuration, returning `self` for chaining
    pub fn with_class(mut self, class: DrumClass, config: ClassConfig) -> Self {
        self.classes.insert(class, config);
        self
    }
}
