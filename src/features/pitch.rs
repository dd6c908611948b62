//! Autocorrelation pitch tracking
//!
//! Brute-force, unnormalized time-domain autocorrelation over overlapping
//! frames (2048 samples, hop 512 by default).
//!
//! Algorithm per frame:
//! 1. For each candidate period in `[floor(sr / max_hz), floor(sr / min_hz)]`
//! 2. Compute `r[p] = Σ x[i] · x[i + p]` over the valid overlap
//! 3. Keep the period with the largest positive `r[p]` (later periods win ties)
//! 4. Pitch = `sr / p`, or 0.0 if no period correlates positively
//!
//! The correlation is not normalized by frame energy, so louder frames and
//! longer overlaps weigh more. The downstream scoring thresholds were tuned
//! against exactly this estimator.
//!
//! # Example
//!
//! ```
//! use vocalscore_dsp::features::pitch::detect_pitch;
//!
//! let frame: Vec<f32> = (0..2048)
//!     .map(|i| (2.0 * std::f32::consts::PI * 220.0 * i as f32 / 44100.0).sin())
//!     .collect();
//! let hz = detect_pitch(&frame, 44100, 80.0, 1000.0);
//! assert!((hz - 220.0).abs() < 5.0);
//! ```

use serde::{Deserialize, Serialize};

use super::stats;
use crate::io::SampleBuffer;

/// Stability reported when no frame was voiced
const UNVOICED_STABILITY: f32 = 0.3;

/// Aggregate pitch statistics over voiced frames
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PitchStats {
    /// Mean pitch of voiced frames (Hz)
    pub average_hz: f32,

    /// `max(0, 1 - std_dev / average_hz)`, in [0, 1]
    pub stability_ratio: f32,

    /// Max minus min voiced pitch (Hz)
    pub range_hz: f32,

    /// Standard deviation of voiced pitch (Hz)
    pub variation_hz: f32,

    /// Number of voiced frames
    pub sample_count: usize,
}

impl PitchStats {
    /// Mild-penalty statistics used when nothing was voiced
    pub fn unvoiced() -> Self {
        Self {
            average_hz: 0.0,
            stability_ratio: UNVOICED_STABILITY,
            range_hz: 0.0,
            variation_hz: 0.0,
            sample_count: 0,
        }
    }

    /// True if at least one frame produced a pitch
    pub fn is_voiced(&self) -> bool {
        self.sample_count > 0
    }
}

/// Estimate the fundamental of one frame, 0.0 if none found
///
/// # Arguments
///
/// * `frame` - Raw samples for one analysis window
/// * `sample_rate` - Sample rate in Hz
/// * `min_hz` - Lowest fundamental considered (sets the longest period)
/// * `max_hz` - Highest fundamental considered (sets the shortest period)
pub fn detect_pitch(frame: &[f32], sample_rate: u32, min_hz: f32, max_hz: f32) -> f32 {
    let sr = sample_rate as f32;
    let min_period = ((sr / max_hz).floor() as usize).max(1);
    let max_period = (sr / min_hz).floor() as usize;

    let mut best_period = 0usize;
    let mut best_correlation = 0.0f32;

    for period in min_period..=max_period {
        if period >= frame.len() {
            break;
        }
        let correlation: f32 = frame[..frame.len() - period]
            .iter()
            .zip(&frame[period..])
            .map(|(&a, &b)| a * b)
            .sum();

        if correlation > 0.0 && correlation >= best_correlation {
            best_correlation = correlation;
            best_period = period;
        }
    }

    if best_period == 0 {
        0.0
    } else {
        sr / best_period as f32
    }
}

/// Per-frame pitch track, one entry per frame (0.0 where unvoiced)
pub fn pitch_track(
    buffer: &SampleBuffer,
    frame_size: usize,
    hop_size: usize,
    min_hz: f32,
    max_hz: f32,
) -> Vec<f32> {
    buffer
        .frames(frame_size, hop_size)
        .map(|frame| detect_pitch(frame, buffer.sample_rate(), min_hz, max_hz))
        .collect()
}

/// Aggregate a pitch track into [`PitchStats`]
pub fn pitch_stats(track: &[f32]) -> PitchStats {
    let voiced: Vec<f32> = track.iter().copied().filter(|&hz| hz > 0.0).collect();
    if voiced.is_empty() {
        return PitchStats::unvoiced();
    }

    let average_hz = stats::mean(&voiced);
    let variation_hz = stats::std_dev(&voiced, average_hz);
    let denominator = if average_hz == 0.0 { 1.0 } else { average_hz };
    let stability_ratio = (1.0 - variation_hz / denominator).clamp(0.0, 1.0);

    let max = voiced.iter().copied().fold(f32::MIN, f32::max);
    let min = voiced.iter().copied().fold(f32::MAX, f32::min);

    PitchStats {
        average_hz,
        stability_ratio,
        range_hz: max - min,
        variation_hz,
        sample_count: voiced.len(),
    }
}

/// Run the pitch analyzer over a buffer
pub fn analyze_pitch(
    buffer: &SampleBuffer,
    frame_size: usize,
    hop_size: usize,
    min_hz: f32,
    max_hz: f32,
) -> PitchStats {
    let track = pitch_track(buffer, frame_size, hop_size, min_hz, max_hz);
    let stats = pitch_stats(&track);

    log::debug!(
        "Pitch: {}/{} voiced frames, avg={:.1} Hz, stability={:.3}, range={:.1} Hz",
        stats.sample_count,
        track.len(),
        stats.average_hz,
        stats.stability_ratio,
        stats.range_hz
    );

    stats
}
