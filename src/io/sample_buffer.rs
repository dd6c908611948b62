//! Immutable decoded sample buffer and windowing helpers

use crate::error::AnalysisError;

/// Decoded mono audio handed to the analyzers
///
/// Samples are expected in roughly [-1.0, 1.0]. The buffer is never mutated
/// after construction; every analyzer windows it independently.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleBuffer {
    samples: Vec<f32>,
    sample_rate: u32,
}

impl SampleBuffer {
    /// Wrap decoded samples
    ///
    /// # Errors
    ///
    /// Returns `AnalysisError::InvalidInput` if `sample_rate` is 0 or any
    /// sample is NaN or infinite. An empty sample vector is accepted.
    pub fn new(samples: Vec<f32>, sample_rate: u32) -> Result<Self, AnalysisError> {
        if sample_rate == 0 {
            return Err(AnalysisError::InvalidInput(
                "Sample rate must be > 0".to_string(),
            ));
        }
        if let Some(pos) = samples.iter().position(|s| !s.is_finite()) {
            return Err(AnalysisError::InvalidInput(format!(
                "Non-finite sample at index {}",
                pos
            )));
        }
        Ok(Self {
            samples,
            sample_rate,
        })
    }

    /// Raw samples
    pub fn samples(&self) -> &[f32] {
        &self.samples
    }

    /// Sample rate in Hz
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Number of samples
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// True if the buffer holds no samples
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Duration in seconds
    pub fn duration_seconds(&self) -> f32 {
        self.samples.len() as f32 / self.sample_rate as f32
    }

    /// Iterate full windows of `frame_size` samples advancing by `hop_size`
    ///
    /// A trailing partial window is dropped. Yields nothing if either size is 0.
    pub fn frames(&self, frame_size: usize, hop_size: usize) -> Frames<'_> {
        Frames {
            samples: &self.samples,
            frame_size,
            hop_size,
            position: 0,
        }
    }
}

/// Iterator over fixed-size windows of a [`SampleBuffer`]
#[derive(Debug, Clone)]
pub struct Frames<'a> {
    samples: &'a [f32],
    frame_size: usize,
    hop_size: usize,
    position: usize,
}

impl<'a> Iterator for Frames<'a> {
    type Item = &'a [f32];

    fn next(&mut self) -> Option<Self::Item> {
        if self.frame_size == 0 || self.hop_size == 0 {
            return None;
        }
        let end = self.position.checked_add(self.frame_size)?;
        if end > self.samples.len() {
            return None;
        }
        let window = &self.samples[self.position..end];
        self.position += self.hop_size;
        Some(window)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_zero_sample_rate() {
        assert!(SampleBuffer::new(vec![0.0; 10], 0).is_err());
    }

    #[test]
    fn test_rejects_non_finite_samples() {
        let err = SampleBuffer::new(vec![0.0, f32::NAN, 0.1], 44100).unwrap_err();
        assert!(matches!(err, AnalysisError::InvalidInput(_)));
    }

    #[test]
    fn test_duration() {
        let buffer = SampleBuffer::new(vec![0.0; 22050], 44100).unwrap();
        assert!((buffer.duration_seconds() - 0.5).abs() < 1e-6);
        assert!(SampleBuffer::new(vec![], 44100).unwrap().is_empty());
    }

    #[test]
    fn test_frames_drop_partial_tail() {
        let buffer = SampleBuffer::new(vec![0.0; 2500], 44100).unwrap();
        assert_eq!(buffer.frames(1024, 1024).count(), 2);
        // 75% overlap: (2500 - 2048) / 512 + 1
        assert_eq!(buffer.frames(2048, 512).count(), 1);
        assert_eq!(buffer.frames(4096, 512).count(), 0);
        assert_eq!(buffer.frames(0, 512).count(), 0);
    }
}
