//! Onset detection and rhythm statistics
//!
//! Works on the non-overlapping RMS frame series from the energy analyzer.
//! An onset is a frame whose RMS jumps by more than `rise_ratio` over its
//! predecessor while exceeding a small absolute floor.

use serde::{Deserialize, Serialize};

use super::stats;

/// Regularity reported when there are too few onsets to measure
const NEUTRAL_REGULARITY: f32 = 0.5;

/// Temporal statistics for one recording
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemporalStats {
    /// Number of detected onsets
    pub onset_count: usize,
    /// Onset times in seconds, ascending
    pub onset_times: Vec<f32>,
    /// `max(0, 1 - std/mean)` of inter-onset intervals, 0.5 with < 2 onsets
    pub rhythm_regularity: f32,
    /// Coefficient of variation of frame RMS
    pub energy_variation: f32,
    /// Mean frame RMS
    pub average_energy: f32,
}

/// Frame indices where RMS rises sharply
///
/// Frame `i > 0` is an onset when `rms[i] > rms[i - 1] * rise_ratio` and
/// `rms[i] > min_rms`.
pub fn detect_onsets(frame_rms: &[f32], rise_ratio: f32, min_rms: f32) -> Vec<usize> {
    frame_rms
        .windows(2)
        .enumerate()
        .filter(|(_, pair)| pair[1] > pair[0] * rise_ratio && pair[1] > min_rms)
        .map(|(i, _)| i + 1)
        .collect()
}

/// Convert onset frame indices to seconds
pub fn onset_times(onsets: &[usize], frame_size: usize, sample_rate: u32) -> Vec<f32> {
    onsets
        .iter()
        .map(|&idx| (idx * frame_size) as f32 / sample_rate as f32)
        .collect()
}

/// Regularity of inter-onset intervals in [0, 1]
///
/// Returns 0.5 when fewer than two onsets exist.
pub fn rhythm_regularity(onset_times: &[f32]) -> f32 {
    if onset_times.len() < 2 {
        return NEUTRAL_REGULARITY;
    }
    let intervals: Vec<f32> = onset_times.windows(2).map(|w| w[1] - w[0]).collect();
    let mean = stats::mean(&intervals);
    if mean <= 0.0 {
        return 0.0;
    }
    let std_dev = stats::std_dev(&intervals, mean);
    (1.0 - std_dev / mean).max(0.0)
}

/// Coefficient of variation `std / mean` of the RMS series, 0.0 if mean is 0
pub fn energy_variation(frame_rms: &[f32]) -> f32 {
    let mean = stats::mean(frame_rms);
    if mean == 0.0 {
        return 0.0;
    }
    stats::std_dev(frame_rms, mean) / mean
}

/// Run the temporal analyzer over an RMS frame series
pub fn analyze_temporal(
    frame_rms: &[f32],
    frame_size: usize,
    sample_rate: u32,
    rise_ratio: f32,
    min_rms: f32,
) -> TemporalStats {
    let onsets = detect_onsets(frame_rms, rise_ratio, min_rms);
    let times = onset_times(&onsets, frame_size, sample_rate);
    let regularity = rhythm_regularity(&times);
    let variation = energy_variation(frame_rms);

    log::debug!(
        "Temporal: {} onsets, regularity={:.3}, energy_cv={:.3}",
        onsets.len(),
        regularity,
        variation
    );

    TemporalStats {
        onset_count: onsets.len(),
        onset_times: times,
        rhythm_regularity: regularity,
        energy_variation: variation,
        average_energy: stats::mean(frame_rms),
    }
}
