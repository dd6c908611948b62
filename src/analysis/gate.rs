//! Singing detection gate
//!
//! Six boolean indicators vote on whether a recording contains singing.
//! At least four must hold; otherwise the recording is treated as silence
//! or noise and bypasses feature-driven scoring.

use serde::{Deserialize, Serialize};

use crate::features::FeatureSet;

const MIN_GLOBAL_RMS: f32 = 0.008;
const MIN_VOICED_FRAMES: usize = 8;
const SINGING_PITCH_LOW_HZ: f32 = 100.0;
const SINGING_PITCH_HIGH_HZ: f32 = 800.0;
const MIN_CENTROID_HZ: f32 = 400.0;
const MIN_ONSETS: usize = 1;
const MIN_STABILITY: f32 = 0.2;

/// Votes required for a singing classification
pub const REQUIRED_VOTES: usize = 4;

/// Gate verdict
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VoiceClassification {
    /// Enough indicators agree the clip is sung
    Singing,
    /// Silence, noise, or speech-like input
    SilenceOrNoise,
}

/// Individual indicator outcomes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GateIndicators {
    /// Global RMS above 0.008
    pub loud_enough: bool,
    /// More than 8 voiced pitch frames
    pub enough_voiced_frames: bool,
    /// Average pitch strictly inside (100, 800) Hz
    pub pitch_in_singing_range: bool,
    /// Mean spectral centroid above 400 Hz
    pub bright_enough: bool,
    /// More than one onset
    pub has_onsets: bool,
    /// Pitch stability above 0.2 (measured, not the unvoiced fallback)
    pub pitch_stable: bool,
}

impl GateIndicators {
    /// Evaluate all six indicators over a feature set
    pub fn evaluate(features: &FeatureSet) -> Self {
        let pitch = &features.pitch;
        Self {
            loud_enough: features.energy.global_rms > MIN_GLOBAL_RMS,
            enough_voiced_frames: pitch.sample_count > MIN_VOICED_FRAMES,
            pitch_in_singing_range: pitch.average_hz > SINGING_PITCH_LOW_HZ
                && pitch.average_hz < SINGING_PITCH_HIGH_HZ,
            bright_enough: features.spectral.centroid_hz > MIN_CENTROID_HZ,
            has_onsets: features.temporal.onset_count > MIN_ONSETS,
            pitch_stable: pitch.is_voiced() && pitch.stability_ratio > MIN_STABILITY,
        }
    }

    /// Number of indicators that hold
    pub fn votes(&self) -> usize {
        [
            self.loud_enough,
            self.enough_voiced_frames,
            self.pitch_in_singing_range,
            self.bright_enough,
            self.has_onsets,
            self.pitch_stable,
        ]
        .iter()
        .filter(|&&v| v)
        .count()
    }

    /// Classification implied by the vote count
    pub fn classification(&self) -> VoiceClassification {
        if self.votes() >= REQUIRED_VOTES {
            VoiceClassification::Singing
        } else {
            VoiceClassification::SilenceOrNoise
        }
    }
}

/// Gate outcome with the evidence behind it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GateReport {
    /// Per-indicator outcomes
    pub indicators: GateIndicators,
    /// How many indicators held
    pub votes: usize,
    /// Final verdict
    pub classification: VoiceClassification,
}

/// Classify a feature set as singing or silence/noise
pub fn classify(features: &FeatureSet) -> GateReport {
    let indicators = GateIndicators::evaluate(features);
    let votes = indicators.votes();
    let classification = indicators.classification();

    log::debug!(
        "Singing gate: {}/6 indicators -> {:?}",
        votes,
        classification
    );

    GateReport {
        indicators,
        votes,
        classification,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::energy::{EnergyStats, VolumeConsistency};
    use crate::features::{PitchStats, SpectralStats, TemporalStats};

    fn features(global_rms: f32, pitch: PitchStats, centroid_hz: f32, onsets: usize) -> FeatureSet {
        FeatureSet {
            energy: EnergyStats {
                global_rms,
                frame_rms: vec![],
                frame_size: 1024,
                consistency: VolumeConsistency {
                    mean: 0.0,
                    std_dev: 0.0,
                    consistency: 0.0,
                },
            },
            pitch,
            spectral: SpectralStats {
                centroid_hz,
                brightness_ratio: 0.0,
                harmonic_richness: 0.0,
            },
            temporal: TemporalStats {
                onset_count: onsets,
                onset_times: vec![],
                rhythm_regularity: 0.5,
                energy_variation: 0.0,
                average_energy: 0.0,
            },
        }
    }

    fn voiced(average_hz: f32, stability_ratio: f32, sample_count: usize) -> PitchStats {
        PitchStats {
            average_hz,
            stability_ratio,
            range_hz: 10.0,
            variation_hz: 2.0,
            sample_count,
        }
    }

    #[test]
    fn test_unvoiced_silence_casts_no_votes() {
        let report = classify(&features(0.0, PitchStats::unvoiced(), 0.0, 0));
        assert_eq!(report.votes, 0);
        assert_eq!(report.classification, VoiceClassification::SilenceOrNoise);
    }

    #[test]
    fn test_all_indicators_singing() {
        let report = classify(&features(0.1, voiced(220.0, 0.9, 50), 900.0, 5));
        assert_eq!(report.votes, 6);
        assert_eq!(report.classification, VoiceClassification::Singing);
    }

    #[test]
    fn test_four_votes_is_enough() {
        // Quiet and dark, but pitched and stable
        let report = classify(&features(0.001, voiced(300.0, 0.7, 20), 100.0, 3));
        assert_eq!(report.votes, 4);
        assert_eq!(report.classification, VoiceClassification::Singing);
    }

    #[test]
    fn test_three_votes_is_not_enough() {
        let report = classify(&features(0.05, voiced(900.0, 0.1, 20), 100.0, 3));
        assert_eq!(report.votes, 3);
        assert_eq!(report.classification, VoiceClassification::SilenceOrNoise);
    }

    #[test]
    fn test_pitch_range_bounds_are_exclusive() {
        let at_low = GateIndicators::evaluate(&features(0.0, voiced(100.0, 0.5, 1), 0.0, 0));
        assert!(!at_low.pitch_in_singing_range);
        let at_high = GateIndicators::evaluate(&features(0.0, voiced(800.0, 0.5, 1), 0.0, 0));
        assert!(!at_high.pitch_in_singing_range);
    }
}
