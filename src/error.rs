//! Error types for the vocal analysis engine
//!
//! Audio content never fails analysis. Errors only come from boundary
//! validation: malformed buffers, configs, or reference timelines.

use thiserror::Error;

/// Errors that can occur before analysis starts
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AnalysisError {
    /// Invalid sample buffer (zero sample rate, non-finite samples)
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Reference lyric timeline is malformed (unsorted or non-finite timestamps)
    #[error("Invalid timeline: {0}")]
    InvalidTimeline(String),

    /// Analysis configuration is unusable (zero frame size, inverted ranges)
    #[error("Invalid config: {0}")]
    InvalidConfig(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = AnalysisError::InvalidTimeline("line 3 precedes line 2".to_string());
        assert_eq!(err.to_string(), "Invalid timeline: line 3 precedes line 2");

        let err = AnalysisError::InvalidConfig("frame size must be > 0".to_string());
        assert_eq!(err.to_string(), "Invalid config: frame size must be > 0");
    }
}
