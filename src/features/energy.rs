//! Frame-wise energy analysis
//!
//! Global RMS, non-overlapping RMS frames, and a volume-consistency
//! statistic derived from the frame series.

use serde::{Deserialize, Serialize};

use super::stats;

/// Frame RMS series plus summary statistics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnergyStats {
    /// RMS over the whole buffer
    pub global_rms: f32,

    /// Per-frame RMS, one value per full `frame_size` window
    pub frame_rms: Vec<f32>,

    /// Frame size used for `frame_rms`, in samples
    pub frame_size: usize,

    /// Consistency of the frame RMS series
    pub consistency: VolumeConsistency,
}

/// Volume consistency over a frame RMS series
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VolumeConsistency {
    /// Mean frame RMS
    pub mean: f32,
    /// Population standard deviation of frame RMS
    pub std_dev: f32,
    /// `max(0, 1 - std_dev * 10)`, 0.0 when there are no frames
    pub consistency: f32,
}

/// Root-mean-square over all samples, 0.0 for empty input
pub fn global_rms(samples: &[f32]) -> f32 {
    if samples.is_empty() {
        return 0.0;
    }
    let sum_sq: f64 = samples.iter().map(|&x| f64::from(x) * f64::from(x)).sum();
    (sum_sq / samples.len() as f64).sqrt() as f32
}

/// RMS of consecutive non-overlapping frames
///
/// A trailing frame shorter than `frame_size` is dropped.
pub fn frame_rms(samples: &[f32], frame_size: usize) -> Vec<f32> {
    if frame_size == 0 {
        return Vec::new();
    }
    samples.chunks_exact(frame_size).map(global_rms).collect()
}

/// Mean, spread, and consistency of a frame RMS series
pub fn volume_consistency(frame_rms: &[f32]) -> VolumeConsistency {
    if frame_rms.is_empty() {
        return VolumeConsistency {
            mean: 0.0,
            std_dev: 0.0,
            consistency: 0.0,
        };
    }
    let mean = stats::mean(frame_rms);
    let std_dev = stats::std_dev(frame_rms, mean);
    VolumeConsistency {
        mean,
        std_dev,
        consistency: (1.0 - std_dev * 10.0).max(0.0),
    }
}

/// Run the energy analyzer over a buffer
pub fn analyze_energy(samples: &[f32], frame_size: usize) -> EnergyStats {
    let frames = frame_rms(samples, frame_size);
    let consistency = volume_consistency(&frames);
    let global = global_rms(samples);

    log::debug!(
        "Energy: global_rms={:.5}, {} frames, consistency={:.3}",
        global,
        frames.len(),
        consistency.consistency
    );

    EnergyStats {
        global_rms: global,
        frame_rms: frames,
        frame_size,
        consistency,
    }
}
