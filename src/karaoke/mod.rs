//! Karaoke mode: scoring a take against a timestamped lyric timeline
//!
//! - Timeline validation (sorted reference lines)
//! - Incremental onset tracking while a take is recorded
//! - Onset-to-line alignment and alignment-centric scoring

pub mod aligner;
pub mod timeline;
pub mod tracker;

pub use aligner::{analyze_karaoke, KaraokeResult, KaraokeScores, Pairing};
pub use timeline::{LyricLine, LyricTimeline};
pub use tracker::{EnergySample, KaraokeTake, OnsetTracker};
