//! Coarse spectral shape estimation
//!
//! Non-overlapping 1024-sample frames are reduced to a decimated magnitude
//! estimate: only every 4th bin is evaluated, each from every 8th rectified
//! sample. This is a fixed low-resolution approximation, not a DFT. The bin
//! and sample strides set the frequency resolution the scorer relies on.
//!
//! Per-frame outputs are spectral centroid and brightness (share of magnitude
//! above 60% of the bin range). Across frames they are averaged, and the
//! harmonic-richness proxy is `min(1, mean_centroid / 2000)`.

use serde::{Deserialize, Serialize};
use std::f32::consts::PI;

use super::stats;

/// Only every `BIN_STRIDE`-th bin is evaluated
const BIN_STRIDE: usize = 4;

/// Only every `SAMPLE_STRIDE`-th sample contributes to a bin
const SAMPLE_STRIDE: usize = 8;

/// Bins at or below `len * BRIGHTNESS_SPLIT` count as "dark"
const BRIGHTNESS_SPLIT: f32 = 0.6;

/// Centroid at which the harmonic-richness proxy saturates (Hz)
const RICHNESS_CENTROID_HZ: f32 = 2000.0;

/// Aggregate spectral statistics
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpectralStats {
    /// Mean spectral centroid across frames (Hz)
    pub centroid_hz: f32,
    /// Mean brightness ratio across frames, in [0, 1]
    pub brightness_ratio: f32,
    /// `min(1, centroid_hz / 2000)`
    pub harmonic_richness: f32,
}

/// Decimated magnitude estimate of length `frame.len() / 2`
///
/// Bin `k` (for `k` a multiple of 4) is `|Σ_{n step 8} |x[n]| · cos(2πkn/N)|`.
/// All other bins stay 0.0.
pub fn simplified_spectrum(frame: &[f32]) -> Vec<f32> {
    let n = frame.len();
    let mut spectrum = vec![0.0f32; n / 2];
    if n == 0 {
        return spectrum;
    }

    for k in (0..n / 2).step_by(BIN_STRIDE) {
        let mut acc = 0.0f32;
        for i in (0..n).step_by(SAMPLE_STRIDE) {
            let phase = 2.0 * PI * k as f32 * i as f32 / n as f32;
            acc += frame[i].abs() * phase.cos();
        }
        spectrum[k] = acc.abs();
    }
    spectrum
}

/// Magnitude-weighted mean frequency, 0.0 if the spectrum is empty or silent
///
/// Bin `i` maps to `i * sample_rate / (2 * len)` Hz.
pub fn spectral_centroid(spectrum: &[f32], sample_rate: u32) -> f32 {
    let total: f32 = spectrum.iter().sum();
    if total == 0.0 {
        return 0.0;
    }
    let bin_hz = sample_rate as f32 / (2.0 * spectrum.len() as f32);
    let weighted: f32 = spectrum
        .iter()
        .enumerate()
        .map(|(i, &mag)| i as f32 * bin_hz * mag)
        .sum();
    weighted / total
}

/// Share of magnitude above bin `0.6 * len`, 0.0 if silent
pub fn brightness(spectrum: &[f32]) -> f32 {
    let total: f32 = spectrum.iter().sum();
    if total == 0.0 {
        return 0.0;
    }
    let split = spectrum.len() as f32 * BRIGHTNESS_SPLIT;
    let high: f32 = spectrum
        .iter()
        .enumerate()
        .filter(|(i, _)| *i as f32 > split)
        .map(|(_, &mag)| mag)
        .sum();
    high / total
}

/// Run the spectral analyzer over non-overlapping frames
pub fn analyze_spectrum(samples: &[f32], sample_rate: u32, frame_size: usize) -> SpectralStats {
    if frame_size == 0 {
        return SpectralStats {
            centroid_hz: 0.0,
            brightness_ratio: 0.0,
            harmonic_richness: 0.0,
        };
    }

    let (centroids, brightnesses): (Vec<f32>, Vec<f32>) = samples
        .chunks_exact(frame_size)
        .map(|frame| {
            let spectrum = simplified_spectrum(frame);
            (spectral_centroid(&spectrum, sample_rate), brightness(&spectrum))
        })
        .unzip();

    let centroid_hz = stats::mean(&centroids);
    let brightness_ratio = stats::mean(&brightnesses).clamp(0.0, 1.0);
    let harmonic_richness = (centroid_hz / RICHNESS_CENTROID_HZ).min(1.0);

    log::debug!(
        "Spectral: {} frames, centroid={:.1} Hz, brightness={:.3}, richness={:.3}",
        centroids.len(),
        centroid_hz,
        brightness_ratio,
        harmonic_richness
    );

    SpectralStats {
        centroid_hz,
        brightness_ratio,
        harmonic_richness,
    }
}
