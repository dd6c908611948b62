//! Configuration parameters for vocal analysis

use serde::{Deserialize, Serialize};

use crate::error::AnalysisError;

/// Free-form analysis configuration parameters
///
/// The defaults are the tuned constants the scoring thresholds were
/// calibrated against. Changing them shifts every downstream score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    // Energy / temporal
    /// Non-overlapping RMS frame size in samples (default: 1024)
    pub energy_frame_size: usize,

    /// Onset rise ratio against the previous RMS frame (default: 1.5)
    pub onset_rise_ratio: f32,

    /// Minimum RMS for a frame to count as an onset (default: 0.01)
    pub onset_min_rms: f32,

    // Pitch
    /// Autocorrelation frame size in samples (default: 2048)
    pub pitch_frame_size: usize,

    /// Hop between pitch frames in samples (default: 512)
    pub pitch_hop_size: usize,

    /// Lowest fundamental considered (default: 80.0 Hz)
    pub min_pitch_hz: f32,

    /// Highest fundamental considered (default: 1000.0 Hz)
    pub max_pitch_hz: f32,

    // Spectral
    /// Non-overlapping spectral frame size in samples (default: 1024)
    pub spectral_frame_size: usize,

    // Silence fallback
    /// Seed for the silence-branch score draw. `None` draws from OS entropy.
    pub silence_seed: Option<u64>,

    /// Recordings shorter than this are scored but flagged (default: 3.0 s)
    pub min_recording_seconds: f32,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            energy_frame_size: 1024,
            onset_rise_ratio: 1.5,
            onset_min_rms: 0.01,
            pitch_frame_size: 2048,
            pitch_hop_size: 512,
            min_pitch_hz: 80.0,
            max_pitch_hz: 1000.0,
            spectral_frame_size: 1024,
            silence_seed: None,
            min_recording_seconds: 3.0,
        }
    }
}

impl AnalysisConfig {
    /// Check that frame geometry and pitch range are usable
    pub fn validate(&self) -> Result<(), AnalysisError> {
        if self.energy_frame_size == 0
            || self.pitch_frame_size == 0
            || self.spectral_frame_size == 0
        {
            return Err(AnalysisError::InvalidConfig(
                "Frame sizes must be > 0".to_string(),
            ));
        }
        if self.pitch_hop_size == 0 {
            return Err(AnalysisError::InvalidConfig(
                "Pitch hop size must be > 0".to_string(),
            ));
        }
        if self.min_pitch_hz.is_nan()
            || self.min_pitch_hz <= 0.0
            || self.max_pitch_hz.is_nan()
            || self.max_pitch_hz <= self.min_pitch_hz
        {
            return Err(AnalysisError::InvalidConfig(format!(
                "Pitch range [{}, {}] Hz is inverted or empty",
                self.min_pitch_hz, self.max_pitch_hz
            )));
        }
        Ok(())
    }
}

/// Karaoke (reference-timeline) scoring configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KaraokeConfig {
    /// Max |onset - line| gap for a pairing, in seconds (default: 1.2)
    pub pairing_tolerance_seconds: f32,

    /// Median error at which timing accuracy reaches zero (default: 0.6 s)
    pub timing_error_scale_seconds: f32,

    /// RMS floor for a frame to count as voiced (default: 0.03)
    pub voiced_rms: f32,

    /// Lower edge of the clear-voice RMS band (default: 0.035)
    pub clarity_band_low: f32,

    /// Upper edge of the clear-voice RMS band (default: 0.25)
    pub clarity_band_high: f32,

    /// Energy window opened at each lyric line, in seconds (default: 1.2)
    pub line_window_seconds: f32,

    // Incremental tracker
    /// RMS floor for a streamed onset (default: 0.04)
    pub tracker_min_rms: f32,

    /// Rise ratio against the sample `tracker_lag` steps back (default: 1.8)
    pub tracker_rise_ratio: f32,

    /// How many samples back the rise is measured against (default: 5)
    pub tracker_lag: usize,

    /// Minimum spacing between streamed onsets (default: 0.25 s)
    pub tracker_min_gap_seconds: f32,
}

impl Default for KaraokeConfig {
    fn default() -> Self {
        Self {
            pairing_tolerance_seconds: 1.2,
            timing_error_scale_seconds: 0.6,
            voiced_rms: 0.03,
            clarity_band_low: 0.035,
            clarity_band_high: 0.25,
            line_window_seconds: 1.2,
            tracker_min_rms: 0.04,
            tracker_rise_ratio: 1.8,
            tracker_lag: 5,
            tracker_min_gap_seconds: 0.25,
        }
    }
}

impl KaraokeConfig {
    /// Check that tolerances, scales and the clarity band are usable
    pub fn validate(&self) -> Result<(), AnalysisError> {
        let positive = [
            ("pairing_tolerance_seconds", self.pairing_tolerance_seconds),
            ("timing_error_scale_seconds", self.timing_error_scale_seconds),
            ("line_window_seconds", self.line_window_seconds),
            ("tracker_rise_ratio", self.tracker_rise_ratio),
        ];
        for (name, value) in positive {
            if value.is_nan() || value <= 0.0 {
                return Err(AnalysisError::InvalidConfig(format!(
                    "{} must be > 0, got {}",
                    name, value
                )));
            }
        }
        let non_negative = [
            ("voiced_rms", self.voiced_rms),
            ("tracker_min_rms", self.tracker_min_rms),
            ("tracker_min_gap_seconds", self.tracker_min_gap_seconds),
        ];
        for (name, value) in non_negative {
            if value.is_nan() || value < 0.0 {
                return Err(AnalysisError::InvalidConfig(format!(
                    "{} must be >= 0, got {}",
                    name, value
                )));
            }
        }
        if self.clarity_band_low.is_nan()
            || self.clarity_band_low < 0.0
            || self.clarity_band_high.is_nan()
            || self.clarity_band_high < self.clarity_band_low
        {
            return Err(AnalysisError::InvalidConfig(format!(
                "Clarity band [{}, {}] is inverted or negative",
                self.clarity_band_low, self.clarity_band_high
            )));
        }
        if self.tracker_lag == 0 {
            return Err(AnalysisError::InvalidConfig(
                "Tracker lag must be > 0".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(AnalysisConfig::default().validate().is_ok());
    }

    #[test]
    fn test_invalid_configs_rejected() {
        let config = AnalysisConfig {
            pitch_hop_size: 0,
            ..AnalysisConfig::default()
        };
        assert!(config.validate().is_err());

        let config = AnalysisConfig {
            min_pitch_hz: 1000.0,
            max_pitch_hz: 80.0,
            ..AnalysisConfig::default()
        };
        assert!(config.validate().is_err());

        let config = AnalysisConfig {
            energy_frame_size: 0,
            ..AnalysisConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_nan_pitch_range_rejected() {
        let config = AnalysisConfig {
            min_pitch_hz: f32::NAN,
            ..AnalysisConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_karaoke_config_validation() {
        assert!(KaraokeConfig::default().validate().is_ok());

        let config = KaraokeConfig {
            timing_error_scale_seconds: 0.0,
            ..KaraokeConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(AnalysisError::InvalidConfig(_))
        ));

        let config = KaraokeConfig {
            pairing_tolerance_seconds: -1.0,
            ..KaraokeConfig::default()
        };
        assert!(config.validate().is_err());

        let config = KaraokeConfig {
            clarity_band_low: 0.3,
            clarity_band_high: 0.1,
            ..KaraokeConfig::default()
        };
        assert!(config.validate().is_err());

        let config = KaraokeConfig {
            tracker_lag: 0,
            ..KaraokeConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_partial_deserialize() {
        // Missing fields fall back to defaults
        let config: AnalysisConfig =
            serde_json::from_str(r#"{ "silence_seed": 7 }"#).unwrap();
        assert_eq!(config.silence_seed, Some(7));
        assert_eq!(config.pitch_frame_size, 2048);

        let karaoke: KaraokeConfig =
            serde_json::from_str(r#"{ "pairing_tolerance_seconds": 0.8 }"#).unwrap();
        assert_eq!(karaoke.pairing_tolerance_seconds, 0.8);
        assert_eq!(karaoke.tracker_lag, 5);
    }
}
