//! Reference lyric timeline
//!
//! Lines arrive pre-parsed from a timed-lyric file. The timeline rejects
//! input that is not sorted ascending so the aligner can walk it with a
//! single pointer.

use serde::{Deserialize, Serialize};

use crate::error::AnalysisError;

/// One timestamped reference line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LyricLine {
    /// Line start in seconds
    pub timestamp_seconds: f32,
    /// Lyric text
    pub text: String,
}

impl LyricLine {
    /// Create a line
    pub fn new(timestamp_seconds: f32, text: impl Into<String>) -> Self {
        Self {
            timestamp_seconds,
            text: text.into(),
        }
    }
}

/// Validated, ascending sequence of lyric lines
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LyricTimeline {
    lines: Vec<LyricLine>,
}

impl LyricTimeline {
    /// Validate and wrap lyric lines
    ///
    /// Equal consecutive timestamps are allowed.
    ///
    /// # Errors
    ///
    /// Returns `AnalysisError::InvalidTimeline` if a timestamp is negative,
    /// non-finite, or earlier than its predecessor.
    pub fn new(lines: Vec<LyricLine>) -> Result<Self, AnalysisError> {
        for (i, line) in lines.iter().enumerate() {
            if !line.timestamp_seconds.is_finite() || line.timestamp_seconds < 0.0 {
                return Err(AnalysisError::InvalidTimeline(format!(
                    "line {} has invalid timestamp {}",
                    i, line.timestamp_seconds
                )));
            }
            if i > 0 && line.timestamp_seconds < lines[i - 1].timestamp_seconds {
                return Err(AnalysisError::InvalidTimeline(format!(
                    "line {} ({:.3}s) precedes line {} ({:.3}s)",
                    i,
                    line.timestamp_seconds,
                    i - 1,
                    lines[i - 1].timestamp_seconds
                )));
            }
        }
        Ok(Self { lines })
    }

    /// Build from `(timestamp, text)` pairs
    pub fn from_pairs<S: Into<String>>(
        pairs: impl IntoIterator<Item = (f32, S)>,
    ) -> Result<Self, AnalysisError> {
        Self::new(
            pairs
                .into_iter()
                .map(|(t, text)| LyricLine::new(t, text))
                .collect(),
        )
    }

    /// All lines in order
    pub fn lines(&self) -> &[LyricLine] {
        &self.lines
    }

    /// Line start times in order
    pub fn times(&self) -> Vec<f32> {
        self.lines.iter().map(|l| l.timestamp_seconds).collect()
    }

    /// Number of lines
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// True if there are no lines
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Index of the line active at `time_seconds` (the last line starting at or before it)
    ///
    /// Returns `None` for an empty timeline. Before the first line, index 0 is returned.
    pub fn active_index(&self, time_seconds: f32) -> Option<usize> {
        if self.lines.is_empty() {
            return None;
        }
        let after = self
            .lines
            .partition_point(|l| l.timestamp_seconds <= time_seconds);
        Some(after.saturating_sub(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sorted_timeline_accepted() {
        let timeline =
            LyricTimeline::from_pairs([(0.5, "one"), (2.0, "two"), (2.0, "two again"), (4.0, "three")])
                .unwrap();
        assert_eq!(timeline.len(), 4);
        assert_eq!(timeline.times(), vec![0.5, 2.0, 2.0, 4.0]);
    }

    #[test]
    fn test_non_monotonic_timeline_rejected() {
        let err = LyricTimeline::from_pairs([(1.0, "a"), (3.0, "b"), (2.0, "c")]).unwrap_err();
        assert!(matches!(err, AnalysisError::InvalidTimeline(_)));
    }

    #[test]
    fn test_invalid_timestamps_rejected() {
        assert!(LyricLine::new(f32::NAN, "x").timestamp_seconds.is_nan());
        assert!(LyricTimeline::from_pairs([(f32::NAN, "x")]).is_err());
        assert!(LyricTimeline::from_pairs([(-1.0, "x")]).is_err());
        assert!(LyricTimeline::from_pairs(Vec::<(f32, String)>::new()).is_ok());
    }

    #[test]
    fn test_active_index() {
        let timeline = LyricTimeline::from_pairs([(1.0, "a"), (3.0, "b"), (5.0, "c")]).unwrap();
        assert_eq!(timeline.active_index(0.0), Some(0));
        assert_eq!(timeline.active_index(3.0), Some(1));
        assert_eq!(timeline.active_index(4.9), Some(1));
        assert_eq!(timeline.active_index(60.0), Some(2));
        let empty = LyricTimeline::new(vec![]).unwrap();
        assert_eq!(empty.active_index(1.0), None);
    }
}
