//! Onset-to-lyric alignment and karaoke scoring
//!
//! Detected onsets are greedily paired with reference lines, walking both
//! sorted sequences with two pointers. Timing accuracy comes from the median
//! pairing error plus a coverage boost. Five energy-derived proxies
//! (stability, clarity, dynamics, breath, transitions) complete the score.
//!
//! Every sub-score is computed in [0, 1] and shown on a 1-10 scale via
//! `1 + 9x`. The overall score weights the [0, 1] values and scales to 100.

use serde::{Deserialize, Serialize};

use super::timeline::LyricTimeline;
use super::tracker::{EnergySample, KaraokeTake};
use crate::config::KaraokeConfig;
use crate::features::stats::{self, round1};

/// Median error assumed when nothing paired (seconds)
const UNPAIRED_MEDIAN_ERROR: f32 = 1.0;

/// Largest timing boost from coverage
const MAX_COVERAGE_BOOST: f32 = 0.2;

/// Voiced frames needed before dynamics are measured
const MIN_DYNAMICS_FRAMES: usize = 10;

const STABILITY_VARIANCE_SCALE: f32 = 90.0;
const CLARITY_FRACTION_SCALE: f32 = 1.6;
const DYNAMICS_SPREAD_SCALE: f32 = 5.0;
const BREATH_SPREAD_SCALE: f32 = 8.0;

const WEIGHT_TIMING: f32 = 0.25;
const WEIGHT_STABILITY: f32 = 0.15;
const WEIGHT_CLARITY: f32 = 0.15;
const WEIGHT_DYNAMICS: f32 = 0.10;
const WEIGHT_BREATH: f32 = 0.15;
const WEIGHT_TRANSITIONS: f32 = 0.20;

/// One onset matched to one lyric line
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pairing {
    /// Index into the timeline
    pub line_index: usize,
    /// Index into the sorted onset list
    pub onset_index: usize,
    /// Line start (seconds)
    pub line_time: f32,
    /// Onset time (seconds)
    pub onset_time: f32,
}

impl Pairing {
    /// Signed error, positive when the singer came in late
    pub fn error(&self) -> f32 {
        self.onset_time - self.line_time
    }
}

/// Karaoke sub-scores, each on a 1-10 scale
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KaraokeScores {
    /// Onset timing against the lyric lines
    pub rhythm_timing: f32,
    /// Steadiness of voiced energy
    pub pitch_stability: f32,
    /// Share of frames in the clear-voice band
    pub vocal_clarity: f32,
    /// 10th-90th percentile spread of voiced energy
    pub dynamic_range: f32,
    /// Consistency of energy across lyric lines
    pub breath_control: f32,
    /// Onset density relative to line count
    pub note_transitions: f32,
}

/// Complete karaoke result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KaraokeResult {
    /// Display scores (1-10, one decimal)
    pub scores: KaraokeScores,
    /// Underlying [0, 1] values in the same order as `scores`
    pub components: KaraokeScores,
    /// Matched onset/line pairs in timeline order
    pub pairings: Vec<Pairing>,
    /// Paired lines over total lines
    pub coverage: f32,
    /// Median |onset - line| over pairings (seconds)
    pub median_abs_error: f32,
    /// Weighted overall score (0-100)
    pub overall_score: u32,
}

/// Greedy two-pointer pairing of sorted line times and sorted onsets
///
/// A line and onset pair when their gap is within `tolerance`. Otherwise the
/// earlier of the two is skipped. Both index sequences in the output are
/// strictly increasing.
pub fn pair_onsets(line_times: &[f32], onsets: &[f32], tolerance: f32) -> Vec<Pairing> {
    let mut pairings = Vec::with_capacity(line_times.len().min(onsets.len()));
    let (mut i, mut j) = (0usize, 0usize);

    while i < line_times.len() && j < onsets.len() {
        let (line_time, onset_time) = (line_times[i], onsets[j]);
        if (onset_time - line_time).abs() <= tolerance {
            pairings.push(Pairing {
                line_index: i,
                onset_index: j,
                line_time,
                onset_time,
            });
            i += 1;
            j += 1;
        } else if onset_time < line_time {
            j += 1;
        } else {
            i += 1;
        }
    }
    pairings
}

/// Map a [0, 1] value to the 1-10 display scale
pub fn to_display_score(x: f32) -> f32 {
    round1(1.0 + 9.0 * x.clamp(0.0, 1.0))
}

/// Timing accuracy from median error and coverage
pub fn timing_component(median_abs_error: f32, coverage: f32, error_scale: f32) -> f32 {
    let timing = (1.0 - median_abs_error / error_scale).max(0.0);
    let boost = ((coverage - 0.5) * 0.4).clamp(0.0, MAX_COVERAGE_BOOST);
    (timing + boost).clamp(0.0, 1.0)
}

fn voiced_rms(energy: &[EnergySample], floor: f32) -> Vec<f32> {
    energy
        .iter()
        .filter(|e| e.rms >= floor)
        .map(|e| e.rms)
        .collect()
}

/// Steadiness of voiced energy: `1 - min(1, var * 90)`
fn stability_component(voiced: &[f32]) -> f32 {
    let mean = stats::mean(voiced);
    let variance = stats::variance(voiced, mean);
    (1.0 - (variance * STABILITY_VARIANCE_SCALE).min(1.0)).max(0.0)
}

/// Share of all frames inside the clear-voice band, scaled by 1.6
fn clarity_component(energy: &[EnergySample], low: f32, high: f32) -> f32 {
    let in_band = energy
        .iter()
        .filter(|e| e.rms >= low && e.rms <= high)
        .count();
    (in_band as f32 / energy.len().max(1) as f32 * CLARITY_FRACTION_SCALE).min(1.0)
}

/// 10th-90th percentile spread of voiced energy
fn dynamics_component(voiced: &[f32]) -> f32 {
    if voiced.len() <= MIN_DYNAMICS_FRAMES {
        return 0.0;
    }
    let mut sorted = voiced.to_vec();
    sorted.sort_by(f32::total_cmp);
    let percentile = |q: f32| sorted[((sorted.len() as f32 * q) as usize).min(sorted.len() - 1)];
    ((percentile(0.9) - percentile(0.1)) * DYNAMICS_SPREAD_SCALE).clamp(0.0, 1.0)
}

/// Consistency of mean energy in a window opened at each lyric line
fn breath_component(energy: &[EnergySample], line_times: &[f32], window: f32) -> f32 {
    let line_means: Vec<f32> = line_times
        .iter()
        .map(|&start| {
            let segment: Vec<f32> = energy
                .iter()
                .filter(|e| e.time_seconds >= start && e.time_seconds <= start + window)
                .map(|e| e.rms)
                .collect();
            stats::mean(&segment)
        })
        .filter(|&m| m > 0.0)
        .collect();

    let mean = stats::mean(&line_means);
    let spread = stats::std_dev(&line_means, mean);
    (1.0 - (spread * BREATH_SPREAD_SCALE).min(1.0)).max(0.0)
}

/// Onsets per line, penalized for deviating from one per line
fn transitions_component(onset_count: usize, line_count: usize) -> f32 {
    let density = onset_count as f32 / line_count.max(1) as f32;
    (1.0 - (density - 1.0).abs()).max(0.0)
}

/// Score a finished take against its reference timeline
pub fn analyze_karaoke(
    timeline: &LyricTimeline,
    take: &KaraokeTake,
    config: &KaraokeConfig,
) -> KaraokeResult {
    let line_times = timeline.times();
    let mut onsets = take.onsets.clone();
    onsets.sort_by(f32::total_cmp);

    let pairings = pair_onsets(&line_times, &onsets, config.pairing_tolerance_seconds);
    let coverage = pairings.len() as f32 / line_times.len().max(1) as f32;
    let abs_errors: Vec<f32> = pairings.iter().map(|p| p.error().abs()).collect();
    let median_abs_error = stats::median(&abs_errors).unwrap_or(UNPAIRED_MEDIAN_ERROR);

    let voiced = voiced_rms(&take.energy, config.voiced_rms);

    let components = KaraokeScores {
        rhythm_timing: timing_component(
            median_abs_error,
            coverage,
            config.timing_error_scale_seconds,
        ),
        pitch_stability: stability_component(&voiced),
        vocal_clarity: clarity_component(
            &take.energy,
            config.clarity_band_low,
            config.clarity_band_high,
        ),
        dynamic_range: dynamics_component(&voiced),
        breath_control: breath_component(&take.energy, &line_times, config.line_window_seconds),
        note_transitions: transitions_component(onsets.len(), line_times.len()),
    };

    let overall = components.rhythm_timing * WEIGHT_TIMING
        + components.pitch_stability * WEIGHT_STABILITY
        + components.vocal_clarity * WEIGHT_CLARITY
        + components.dynamic_range * WEIGHT_DYNAMICS
        + components.breath_control * WEIGHT_BREATH
        + components.note_transitions * WEIGHT_TRANSITIONS;
    let overall_score = (overall * 100.0).round().clamp(0.0, 100.0) as u32;

    let scores = KaraokeScores {
        rhythm_timing: to_display_score(components.rhythm_timing),
        pitch_stability: to_display_score(components.pitch_stability),
        vocal_clarity: to_display_score(components.vocal_clarity),
        dynamic_range: to_display_score(components.dynamic_range),
        breath_control: to_display_score(components.breath_control),
        note_transitions: to_display_score(components.note_transitions),
    };

    log::debug!(
        "Karaoke: {}/{} lines paired, median error {:.3}s, overall {}",
        pairings.len(),
        line_times.len(),
        median_abs_error,
        overall_score
    );

    KaraokeResult {
        scores,
        components,
        pairings,
        coverage,
        median_abs_error,
        overall_score,
    }
}
