//! Velocity mapping
//!
//! Converts a detected peak's local amplitude into a bounded integer
//! loudness value:
//!
//! `velocity = clamp(round(base_velocity * amplitude / 0.1), 0, 127)`
//!
//! The amplitude is read from the *conditioned* signal at the peak's sample
//! index, not the band-filtered one, so every class scales against the same
//! loudness reference. This is a linear-with-clipping law, not a perceptual
//! (logarithmic) one.

/// Amplitude at which a class emits exactly its base velocity
pub const REFERENCE_AMPLITUDE: f32 = 0.1;

/// Map a peak's local amplitude to a velocity in [0, 127]
///
/// `sample_index` is clamped to the buffer end; an empty buffer maps to 0.
pub fn map_velocity(conditioned: &[f32], sample_index: usize, base_velocity: u8) -> u8 {
    if conditioned.is_empty() {
        return 0;
    }

    let index = sample_index.min(conditioned.len() - 1);
    let amplitude = conditioned[index].abs();
    let scaled = (base_velocity as f32 * amplitude / REFERENCE_AMPLITUDE).round();
    scaled.clamp(0.0, 127.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_amplitude_maps_to_base_velocity() {
        let signal = vec![0.1f32];
        assert_eq!(map_velocity(&signal, 0, 100), 100);
        assert_eq!(map_velocity(&signal, 0, 70), 70);
    }

    #[test]
    fn test_loud_peak_clips_at_127() {
        let signal = vec![1.0f32];
        assert_eq!(map_velocity(&signal, 0, 100), 127);
    }

    #[test]
    fn test_quiet_peak_scales_down() {
        let signal = vec![0.05f32];
        assert_eq!(map_velocity(&signal, 0, 100), 50);
    }

    #[test]
    fn test_silence_maps_to_zero() {
        let signal = vec![0.0f32; 8];
        assert_eq!(map_velocity(&signal, 3, 100), 0);
    }

    #[test]
    fn test_negative_amplitude_uses_magnitude() {
        let signal = vec![-0.1f32];
        assert_eq!(map_velocity(&signal, 0, 90), 90);
    }

    #[test]
    fn test_index_clamped_to_buffer_end() {
        let signal = vec![0.0, 0.0, 0.1];
        assert_eq!(map_velocity(&signal, 999, 100), 100);
    }

    #[test]
    fn test_empty_buffer() {
        assert_eq!(map_velocity(&[], 0, 100), 0);
    }
}
