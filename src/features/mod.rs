//! Feature extraction modules
//!
//! Four independent analyzers run over the same immutable buffer:
//! - Energy (frame RMS, volume consistency)
//! - Pitch (autocorrelation pitch track)
//! - Spectral (decimated magnitude estimate)
//! - Temporal (onsets, rhythm regularity)

pub mod energy;
pub mod pitch;
pub mod spectral;
pub mod stats;
pub mod temporal;

use serde::{Deserialize, Serialize};

pub use energy::EnergyStats;
pub use pitch::PitchStats;
pub use spectral::SpectralStats;
pub use temporal::TemporalStats;

/// All features extracted from one buffer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureSet {
    /// Energy analyzer output
    pub energy: EnergyStats,
    /// Pitch analyzer output
    pub pitch: PitchStats,
    /// Spectral analyzer output
    pub spectral: SpectralStats,
    /// Temporal analyzer output
    pub temporal: TemporalStats,
}
