//! Butterworth band-pass filter design
//!
//! A band-pass of order N is realized as an order-N Butterworth high-pass at
//! the low corner cascaded with an order-N Butterworth low-pass at the high
//! corner, each built from second-order (biquad) sections with Butterworth
//! pole Q values; odd orders add one first-order section.
//!
//! Corner frequencies are normalized by the Nyquist limit and clamped to the
//! open interval (0.001, 0.99) so the design stays numerically stable even
//! when a class band exceeds the source's true bandwidth (e.g. a cymbal band
//! against a low sample-rate source).

use crate::error::TranscribeError;

/// Lower clamp for normalized corner frequencies (fraction of Nyquist)
const MIN_NORMALIZED_CORNER: f32 = 0.001;

/// Upper clamp for normalized corner frequencies (fraction of Nyquist)
const MAX_NORMALIZED_CORNER: f32 = 0.99;

/// Second-order IIR section, Direct Form II transposed
///
/// First-order sections are represented with `b2 = a2 = 0`.
#[derive(Debug, Clone)]
pub struct Biquad {
    b0: f32,
    b1: f32,
    b2: f32,
    a1: f32,
    a2: f32,
    // State
    z1: f32,
    z2: f32,
}

impl Biquad {
    /// Second-order low-pass at normalized corner `norm` (fraction of
    /// Nyquist) with quality factor `q`
    fn lowpass(norm: f32, q: f32) -> Self {
        let w0 = std::f32::consts::PI * norm;
        let cos_w0 = w0.cos();
        let sin_w0 = w0.sin();
        let alpha = sin_w0 / (2.0 * q);

        let b0 = (1.0 - cos_w0) / 2.0;
        let b1 = 1.0 - cos_w0;
        let b2 = (1.0 - cos_w0) / 2.0;
        let a0 = 1.0 + alpha;
        let a1 = -2.0 * cos_w0;
        let a2 = 1.0 - alpha;

        Self::from_coefficients(b0, b1, b2, a0, a1, a2)
    }

    /// Second-order high-pass at normalized corner `norm` with quality
    /// factor `q`
    fn highpass(norm: f32, q: f32) -> Self {
        let w0 = std::f32::consts::PI * norm;
        let cos_w0 = w0.cos();
        let sin_w0 = w0.sin();
        let alpha = sin_w0 / (2.0 * q);

        let b0 = (1.0 + cos_w0) / 2.0;
        let b1 = -(1.0 + cos_w0);
        let b2 = (1.0 + cos_w0) / 2.0;
        let a0 = 1.0 + alpha;
        let a1 = -2.0 * cos_w0;
        let a2 = 1.0 - alpha;

        Self::from_coefficients(b0, b1, b2, a0, a1, a2)
    }

    /// First-order low-pass via the bilinear transform
    fn lowpass_first_order(norm: f32) -> Self {
        let k = (std::f32::consts::PI * norm / 2.0).tan();
        let b0 = k / (k + 1.0);
        let b1 = k / (k + 1.0);
        let a1 = (k - 1.0) / (k + 1.0);

        Self::from_coefficients(b0, b1, 0.0, 1.0, a1, 0.0)
    }

    /// First-order high-pass via the bilinear transform
    fn highpass_first_order(norm: f32) -> Self {
        let k = (std::f32::consts::PI * norm / 2.0).tan();
        let b0 = 1.0 / (k + 1.0);
        let b1 = -1.0 / (k + 1.0);
        let a1 = (k - 1.0) / (k + 1.0);

        Self::from_coefficients(b0, b1, 0.0, 1.0, a1, 0.0)
    }

    fn from_coefficients(b0: f32, b1: f32, b2: f32, a0: f32, a1: f32, a2: f32) -> Self {
        Self {
            b0: b0 / a0,
            b1: b1 / a0,
            b2: b2 / a0,
            a1: a1 / a0,
            a2: a2 / a0,
            z1: 0.0,
            z2: 0.0,
        }
    }

    /// Process a single sample
    pub fn process(&mut self, sample: f32) -> f32 {
        let output = self.b0 * sample + self.z1;
        self.z1 = self.b1 * sample + self.z2 - self.a1 * output;
        self.z2 = self.b2 * sample - self.a2 * output;
        output
    }

    /// Reset filter state
    pub fn reset(&mut self) {
        self.z1 = 0.0;
        self.z2 = 0.0;
    }
}

/// Butterworth band-pass filter: a cascade of biquad sections
#[derive(Debug, Clone)]
pub struct BandpassFilter {
    sections: Vec<Biquad>,
}

impl BandpassFilter {
    /// Process one sample through the cascade
    pub fn process(&mut self, sample: f32) -> f32 {
        self.sections
            .iter_mut()
            .fold(sample, |x, section| section.process(x))
    }

    /// Reset the state of every section
    pub fn reset(&mut self) {
        for section in self.sections.iter_mut() {
            section.reset();
        }
    }
}

/// Butterworth pole Q values for an order-N filter
///
/// Returns the Q of each second-order section; an odd order additionally
/// carries a first-order section handled by the caller.
fn butterworth_qs(order: usize) -> Vec<f32> {
    let pairs = order / 2;
    (0..pairs)
        .map(|k| {
            // Pole pair k sits at angle theta from the imaginary axis
            let theta = std::f32::consts::PI * (2 * k + 1) as f32 / (2.0 * order as f32);
            1.0 / (2.0 * theta.sin())
        })
        .collect()
}

/// Design a Butterworth band-pass filter for one drum class's passband
///
/// # Arguments
///
/// * `low_hz` - Low corner frequency in Hz
/// * `high_hz` - High corner frequency in Hz
/// * `order` - Butterworth order for each edge (typically 3-5)
/// * `sample_rate` - Sample rate in Hz
///
/// # Errors
///
/// Returns `TranscribeError::FilterDesign` if the order is zero or the
/// corners are degenerate (low >= high) after Nyquist clamping.
pub fn design_bandpass(
    low_hz: f32,
    high_hz: f32,
    order: usize,
    sample_rate: u32,
) -> Result<BandpassFilter, TranscribeError> {
    if order == 0 {
        return Err(TranscribeError::FilterDesign(
            "filter order must be at least 1".to_string(),
        ));
    }

    let nyquist = sample_rate as f32 / 2.0;
    let low = (low_hz / nyquist).clamp(MIN_NORMALIZED_CORNER, MAX_NORMALIZED_CORNER);
    let high = (high_hz / nyquist).clamp(MIN_NORMALIZED_CORNER, MAX_NORMALIZED_CORNER);

    if low >= high {
        return Err(TranscribeError::FilterDesign(format!(
            "degenerate band after clamping: low {:.4} >= high {:.4} ({}-{} Hz at {} Hz)",
            low, high, low_hz, high_hz, sample_rate
        )));
    }

    log::debug!(
        "Band-pass design: {}-{} Hz -> normalized {:.4}-{:.4}, order {}",
        low_hz,
        high_hz,
        low,
        high,
        order
    );

    let qs = butterworth_qs(order);
    let mut sections = Vec::with_capacity(order.div_ceil(2) * 2);

    // High-pass edge at the low corner
    for &q in &qs {
        sections.push(Biquad::highpass(low, q));
    }
    if order % 2 == 1 {
        sections.push(Biquad::highpass_first_order(low));
    }

    // Low-pass edge at the high corner
    for &q in &qs {
        sections.push(Biquad::lowpass(high, q));
    }
    if order % 2 == 1 {
        sections.push(Biquad::lowpass_first_order(high));
    }

    Ok(BandpassFilter { sections })
}
