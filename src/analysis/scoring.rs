//! Free-form vocal scoring
//!
//! Maps a [`FeatureSet`] onto ten weighted vocal parameters. Each parameter
//! is a linear blend of features plus a fixed engagement bonus, clamped to
//! [1, 10] and rounded to one decimal. The overall score is the weighted sum
//! scaled to [0, 100].

use serde::{Deserialize, Serialize};

use crate::features::stats::round1;
use crate::features::FeatureSet;

/// Added to every parameter before clamping
const ENGAGEMENT_BONUS: f32 = 1.5;

const MIN_PARAMETER_SCORE: f32 = 1.0;
const MAX_PARAMETER_SCORE: f32 = 10.0;

/// Pitch accuracy blend used when no frame was voiced
const UNVOICED_PITCH_ACCURACY: f32 = 2.0;

/// Vibrato blend used when no frame was voiced
const UNVOICED_VIBRATO: f32 = 5.0;

/// Relative pitch wobble considered ideal vibrato
const IDEAL_VIBRATO_RATIO: f32 = 0.02;

/// Energy coefficient of variation considered ideal dynamics
const IDEAL_ENERGY_VARIATION: f32 = 0.3;

/// The ten scored vocal dimensions, in weighting order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VocalParameter {
    /// How well notes match the intended pitch
    PitchAccuracy,
    /// Warmth, brightness and richness of the voice
    ToneQuality,
    /// Staying in time with the beat
    RhythmTiming,
    /// Consistency of sustained notes without wobble
    PitchStability,
    /// Clear articulation and pronunciation
    VocalClarity,
    /// Control of volume and vocal strength
    DynamicRange,
    /// Smooth phrasing and breathing technique
    BreathControl,
    /// Smoothness between different notes
    NoteTransitions,
    /// Natural vibrato characteristics
    VibratoControl,
    /// Emotional delivery and musical style
    Expression,
}

impl VocalParameter {
    /// All parameters in weighting order
    pub const ALL: [VocalParameter; 10] = [
        VocalParameter::PitchAccuracy,
        VocalParameter::ToneQuality,
        VocalParameter::RhythmTiming,
        VocalParameter::PitchStability,
        VocalParameter::VocalClarity,
        VocalParameter::DynamicRange,
        VocalParameter::BreathControl,
        VocalParameter::NoteTransitions,
        VocalParameter::VibratoControl,
        VocalParameter::Expression,
    ];

    /// Display name
    pub fn name(&self) -> &'static str {
        match self {
            VocalParameter::PitchAccuracy => "Pitch Accuracy",
            VocalParameter::ToneQuality => "Tone Quality",
            VocalParameter::RhythmTiming => "Rhythm & Timing",
            VocalParameter::PitchStability => "Pitch Stability",
            VocalParameter::VocalClarity => "Vocal Clarity",
            VocalParameter::DynamicRange => "Dynamic Range",
            VocalParameter::BreathControl => "Breath Control",
            VocalParameter::NoteTransitions => "Note Transitions",
            VocalParameter::VibratoControl => "Vibrato Control",
            VocalParameter::Expression => "Expression",
        }
    }

    /// One-line description
    pub fn description(&self) -> &'static str {
        match self {
            VocalParameter::PitchAccuracy => "How well your notes match the intended pitch",
            VocalParameter::ToneQuality => "The warmth, brightness and richness of your voice",
            VocalParameter::RhythmTiming => "How well you stay in time with the beat",
            VocalParameter::PitchStability => "Consistency of sustained notes without wobble",
            VocalParameter::VocalClarity => "Clear articulation and pronunciation",
            VocalParameter::DynamicRange => "Control of volume and vocal strength",
            VocalParameter::BreathControl => "Smooth phrasing and breathing technique",
            VocalParameter::NoteTransitions => "Smoothness between different notes",
            VocalParameter::VibratoControl => "Natural vibrato characteristics",
            VocalParameter::Expression => "Emotional delivery and musical style",
        }
    }

    /// Contribution to the overall score (weights sum to 1.0)
    pub fn weight(&self) -> f32 {
        match self {
            VocalParameter::PitchAccuracy => 0.15,
            VocalParameter::ToneQuality => 0.12,
            VocalParameter::RhythmTiming => 0.12,
            VocalParameter::PitchStability => 0.11,
            VocalParameter::VocalClarity => 0.10,
            VocalParameter::DynamicRange => 0.10,
            VocalParameter::BreathControl => 0.10,
            VocalParameter::NoteTransitions => 0.08,
            VocalParameter::VibratoControl => 0.07,
            VocalParameter::Expression => 0.05,
        }
    }
}

/// Score for one vocal parameter
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ParameterScore {
    /// Which dimension
    pub parameter: VocalParameter,
    /// Score in [0, 10]
    pub score: f32,
}

/// Apply the engagement bonus, clamp to [1, 10], round to one decimal
///
/// A non-finite blend scores the minimum.
fn finalize(blend: f32) -> f32 {
    if !blend.is_finite() {
        return MIN_PARAMETER_SCORE;
    }
    round1((blend + ENGAGEMENT_BONUS).clamp(MIN_PARAMETER_SCORE, MAX_PARAMETER_SCORE))
}

fn bonus_if(condition: bool, yes: f32, no: f32) -> f32 {
    if condition {
        yes
    } else {
        no
    }
}

/// Raw blend for one parameter before bonus and clamping
fn blend(parameter: VocalParameter, features: &FeatureSet) -> f32 {
    let pitch = &features.pitch;
    let stability = pitch.stability_ratio.clamp(0.0, 1.0);
    let richness = features.spectral.harmonic_richness.clamp(0.0, 1.0);
    let brightness = features.spectral.brightness_ratio.clamp(0.0, 1.0);
    let consistency = features.energy.consistency.consistency.clamp(0.0, 1.0);
    let regularity = features.temporal.rhythm_regularity.clamp(0.0, 1.0);
    let energy_variation = features.temporal.energy_variation;
    let global_rms = features.energy.global_rms;
    let voiced = pitch.sample_count;

    match parameter {
        VocalParameter::PitchAccuracy => {
            if !pitch.is_voiced() {
                UNVOICED_PITCH_ACCURACY
            } else {
                stability * 7.0 + bonus_if(voiced > 10, 2.0, 0.0) + 1.0
            }
        }
        VocalParameter::ToneQuality => {
            richness * 4.0 + brightness * 3.0 + bonus_if(global_rms > 0.01, 2.0, 0.0) + 1.0
        }
        VocalParameter::RhythmTiming => {
            regularity * 5.0
                + bonus_if(features.temporal.onset_count > 0, 3.0, 1.0)
                + bonus_if(voiced > 5, 1.0, 0.0)
                + 1.0
        }
        VocalParameter::PitchStability => stability * 8.0 + 1.0,
        VocalParameter::VocalClarity => {
            bonus_if(global_rms > 0.02, 4.0, 1.0)
                + consistency * 3.0
                + bonus_if(features.spectral.centroid_hz > 800.0, 2.0, 1.0)
                + 1.0
        }
        VocalParameter::DynamicRange => {
            6.0 - (energy_variation - IDEAL_ENERGY_VARIATION).abs() * 10.0 + 2.0
        }
        VocalParameter::BreathControl => {
            consistency * 6.0 + bonus_if(features.temporal.average_energy > 0.01, 2.0, 0.0) + 1.0
        }
        VocalParameter::NoteTransitions => {
            stability * 4.0 + regularity * 3.0 + richness * 2.0 + 1.0
        }
        VocalParameter::VibratoControl => {
            if !pitch.is_voiced() || pitch.average_hz <= 0.0 {
                UNVOICED_VIBRATO
            } else {
                let wobble = pitch.variation_hz / pitch.average_hz;
                (7.0 - (wobble - IDEAL_VIBRATO_RATIO).abs() * 100.0).max(1.0)
            }
        }
        VocalParameter::Expression => {
            energy_variation.clamp(0.0, 1.0) * 4.0
                + brightness * 3.0
                + bonus_if(pitch.range_hz > 50.0, 2.0, 0.0)
                + 1.0
        }
    }
}

/// Score all ten parameters from extracted features
pub fn score_features(features: &FeatureSet) -> Vec<ParameterScore> {
    VocalParameter::ALL
        .iter()
        .map(|&parameter| ParameterScore {
            parameter,
            score: finalize(blend(parameter, features)),
        })
        .collect()
}

/// Flat scores for a recording the gate rejected
///
/// Every parameter receives the same `value`, clamped to [0, 10].
pub fn flat_scores(value: f32) -> Vec<ParameterScore> {
    let score = value.clamp(0.0, MAX_PARAMETER_SCORE);
    VocalParameter::ALL
        .iter()
        .map(|&parameter| ParameterScore { parameter, score })
        .collect()
}

/// Weighted overall score in [0, 100]
pub fn overall_score(scores: &[ParameterScore]) -> u32 {
    let weighted: f32 = scores
        .iter()
        .map(|s| s.score.clamp(0.0, MAX_PARAMETER_SCORE) * s.parameter.weight())
        .sum();
    (weighted * 10.0).clamp(0.0, 100.0).round() as u32
}
