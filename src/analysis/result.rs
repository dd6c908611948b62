//! Analysis result types

use serde::{Deserialize, Serialize};

use super::gate::{GateReport, VoiceClassification};
use super::grade::GradeBand;
use super::scoring::{ParameterScore, VocalParameter};
use crate::features::FeatureSet;

/// Sequential phases of the free-form pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AnalysisPhase {
    /// Frame RMS and volume consistency
    Energy,
    /// Autocorrelation pitch tracking
    Pitch,
    /// Decimated spectral shape
    Spectral,
    /// Onsets and rhythm
    Temporal,
    /// Singing classification
    Gate,
    /// Parameter and overall scoring
    Scoring,
}

impl AnalysisPhase {
    /// Phases in execution order
    pub const ORDER: [AnalysisPhase; 6] = [
        AnalysisPhase::Energy,
        AnalysisPhase::Pitch,
        AnalysisPhase::Spectral,
        AnalysisPhase::Temporal,
        AnalysisPhase::Gate,
        AnalysisPhase::Scoring,
    ];

    /// Progress label for display
    pub fn label(&self) -> &'static str {
        match self {
            AnalysisPhase::Energy => "Processing audio levels...",
            AnalysisPhase::Pitch => "Extracting pitch information...",
            AnalysisPhase::Spectral => "Analyzing tone quality...",
            AnalysisPhase::Temporal => "Measuring rhythm patterns...",
            AnalysisPhase::Gate => "Evaluating vocal stability...",
            AnalysisPhase::Scoring => "Calculating final scores...",
        }
    }
}

/// Grade descriptor attached to a result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grade {
    /// Letter grade (e.g. "B+")
    pub letter: String,
    /// Short headline
    pub title: String,
    /// Feedback message
    pub message: String,
}

impl From<&GradeBand> for Grade {
    fn from(band: &GradeBand) -> Self {
        Self {
            letter: band.letter.to_string(),
            title: band.title.to_string(),
            message: band.message.to_string(),
        }
    }
}

/// Analysis metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisMetadata {
    /// Audio duration in seconds
    pub duration_seconds: f32,

    /// Sample rate in Hz
    pub sample_rate: u32,

    /// Processing time in milliseconds
    pub processing_time_ms: f32,

    /// Algorithm version
    pub algorithm_version: String,

    /// Warnings about the input (short recording, etc.)
    pub warnings: Vec<String>,
}

/// Complete free-form analysis result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PerformanceResult {
    /// Extracted features
    pub features: FeatureSet,

    /// Singing gate outcome
    pub gate: GateReport,

    /// Ten parameter scores in weighting order
    pub scores: Vec<ParameterScore>,

    /// Weighted overall score (0-100)
    pub overall_score: u32,

    /// Grade for `overall_score`
    pub grade: Grade,

    /// Analysis metadata
    pub metadata: AnalysisMetadata,
}

impl PerformanceResult {
    /// Gate verdict
    pub fn classification(&self) -> VoiceClassification {
        self.gate.classification
    }

    /// Score for a given parameter
    pub fn score(&self, parameter: VocalParameter) -> Option<f32> {
        self.scores
            .iter()
            .find(|s| s.parameter == parameter)
            .map(|s| s.score)
    }
}
