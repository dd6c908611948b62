//! Incremental energy and onset tracking for a karaoke take
//!
//! One producer pushes `(time, rms)` samples while the take records. The
//! tracker only appends; scoring reads the finished [`KaraokeTake`] after
//! recording stops. Stopping early simply yields a shorter take.

use serde::{Deserialize, Serialize};

use crate::config::{AnalysisConfig, KaraokeConfig};
use crate::features::{energy, temporal};
use crate::io::SampleBuffer;

/// Energy reading at a point in the take
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnergySample {
    /// Playback time in seconds
    pub time_seconds: f32,
    /// RMS of the analysis window starting at `time_seconds`
    pub rms: f32,
}

/// Completed take: energy history plus detected onsets
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KaraokeTake {
    /// Energy samples in push order
    pub energy: Vec<EnergySample>,
    /// Onset times in seconds
    pub onsets: Vec<f32>,
}

impl KaraokeTake {
    /// Build a take offline from a decoded buffer
    ///
    /// Uses the free-form RMS frames and onset detector; frame `i` sits at
    /// `i * frame_size / sample_rate` seconds.
    pub fn from_buffer(buffer: &SampleBuffer, config: &AnalysisConfig) -> Self {
        let frame_size = config.energy_frame_size;
        let sample_rate = buffer.sample_rate();
        let rms = energy::frame_rms(buffer.samples(), frame_size);

        let onset_frames =
            temporal::detect_onsets(&rms, config.onset_rise_ratio, config.onset_min_rms);
        let onsets = temporal::onset_times(&onset_frames, frame_size, sample_rate);

        let energy = rms
            .iter()
            .enumerate()
            .map(|(i, &rms)| EnergySample {
                time_seconds: (i * frame_size) as f32 / sample_rate as f32,
                rms,
            })
            .collect();

        Self { energy, onsets }
    }
}

/// Streaming onset detector
///
/// An onset fires when the newest RMS exceeds `tracker_min_rms`, exceeds
/// `tracker_rise_ratio` times the RMS `tracker_lag` samples earlier, and at
/// least `tracker_min_gap_seconds` has passed since the previous onset.
#[derive(Debug, Clone)]
pub struct OnsetTracker {
    min_rms: f32,
    rise_ratio: f32,
    lag: usize,
    min_gap_seconds: f32,
    take: KaraokeTake,
}

impl OnsetTracker {
    /// Create a tracker with the karaoke thresholds
    pub fn new(config: &KaraokeConfig) -> Self {
        Self {
            min_rms: config.tracker_min_rms,
            rise_ratio: config.tracker_rise_ratio,
            lag: config.tracker_lag.max(1),
            min_gap_seconds: config.tracker_min_gap_seconds,
            take: KaraokeTake::default(),
        }
    }

    /// Append an energy reading; returns the onset time if one fired
    pub fn push(&mut self, time_seconds: f32, rms: f32) -> Option<f32> {
        self.take.energy.push(EnergySample { time_seconds, rms });

        let n = self.take.energy.len();
        if n <= self.lag {
            return None;
        }
        let previous = self.take.energy[n - 1 - self.lag].rms;
        let gap_ok = self
            .take
            .onsets
            .last()
            .map_or(true, |&last| time_seconds - last > self.min_gap_seconds);

        if rms > self.min_rms && rms > previous * self.rise_ratio && gap_ok {
            self.take.onsets.push(time_seconds);
            log::debug!("Onset at {:.3}s (rms {:.4})", time_seconds, rms);
            return Some(time_seconds);
        }
        None
    }

    /// Compute the RMS of a window of samples and push it
    ///
    /// `time_seconds` is the start of the window.
    pub fn push_window(&mut self, time_seconds: f32, window: &[f32]) -> Option<f32> {
        self.push(time_seconds, energy::global_rms(window))
    }

    /// Onsets detected so far
    pub fn onsets(&self) -> &[f32] {
        &self.take.onsets
    }

    /// Number of energy samples pushed so far
    pub fn len(&self) -> usize {
        self.take.energy.len()
    }

    /// True if nothing has been pushed
    pub fn is_empty(&self) -> bool {
        self.take.energy.is_empty()
    }

    /// Stop tracking and hand over the take
    pub fn finish(self) -> KaraokeTake {
        log::debug!(
            "Take finished: {} energy samples, {} onsets",
            self.take.energy.len(),
            self.take.onsets.len()
        );
        self.take
    }
}
