//! Integration tests for the vocal analysis engine

use std::f32::consts::PI;

use vocalscore_dsp::{
    analyze_karaoke, analyze_performance, extract_features, AnalysisConfig, KaraokeConfig,
    KaraokeTake, LyricTimeline, OnsetTracker, SampleBuffer, VoiceClassification,
};

const SAMPLE_RATE: u32 = 44100;

/// Pure sine tone
fn sine(freq: f32, seconds: f32, amplitude: f32) -> Vec<f32> {
    let n = (seconds * SAMPLE_RATE as f32) as usize;
    (0..n)
        .map(|i| amplitude * (2.0 * PI * freq * i as f32 / SAMPLE_RATE as f32).sin())
        .collect()
}

/// Short sung-like phrase: notes separated by silent gaps
fn melody(notes: &[f32], note_seconds: f32, gap_seconds: f32, amplitude: f32) -> Vec<f32> {
    let gap = vec![0.0f32; (gap_seconds * SAMPLE_RATE as f32) as usize];
    let mut samples = Vec::new();
    for &freq in notes {
        samples.extend_from_slice(&gap);
        samples.extend(sine(freq, note_seconds, amplitude));
    }
    samples.extend_from_slice(&gap);
    samples
}

const FRAME: usize = 1024;

/// Lyric lines starting on RMS frame boundaries
const LINE_FRAMES: [usize; 4] = [22, 65, 108, 151];

fn frame_time(frame: usize) -> f32 {
    (frame * FRAME) as f32 / SAMPLE_RATE as f32
}

/// Tone bursts starting at the given RMS frames
fn bursts(start_frames: &[usize], burst_seconds: f32, total_seconds: f32) -> Vec<f32> {
    let mut samples = vec![0.0f32; (total_seconds * SAMPLE_RATE as f32) as usize];
    let tone = sine(330.0, burst_seconds, 0.3);
    for &frame in start_frames {
        let offset = frame * FRAME;
        for (i, &s) in tone.iter().enumerate() {
            if let Some(slot) = samples.get_mut(offset + i) {
                *slot = s;
            }
        }
    }
    samples
}

/// Deterministic pseudo-random noise
fn noise(seconds: f32, amplitude: f32, seed: u32) -> Vec<f32> {
    let n = (seconds * SAMPLE_RATE as f32) as usize;
    let mut state = seed.wrapping_mul(747796405).wrapping_add(2891336453);
    (0..n)
        .map(|_| {
            state = state.wrapping_mul(1664525).wrapping_add(1013904223);
            amplitude * ((state >> 8) as f32 / (1u32 << 24) as f32 * 2.0 - 1.0)
        })
        .collect()
}

fn buffer(samples: Vec<f32>) -> SampleBuffer {
    SampleBuffer::new(samples, SAMPLE_RATE).expect("valid buffer")
}

fn seeded_config() -> AnalysisConfig {
    AnalysisConfig {
        silence_seed: Some(1234),
        ..AnalysisConfig::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_zero_buffer_is_silence() {
        let result = analyze_performance(&buffer(vec![0.0; SAMPLE_RATE as usize * 2]), &seeded_config())
            .expect("Analysis should succeed");

        assert_eq!(result.gate.votes, 0);
        assert_eq!(result.classification(), VoiceClassification::SilenceOrNoise);

        let first = result.scores[0].score;
        assert!((0.1..=0.8).contains(&first), "silence score {}", first);
        assert!(result.scores.iter().all(|s| s.score == first));
        assert!(result.overall_score <= 8);
        assert_eq!(result.grade.letter, "D");
    }

    #[test]
    fn test_empty_buffer_does_not_fail() {
        let result = analyze_performance(&buffer(vec![]), &seeded_config())
            .expect("Empty audio should still score");
        assert_eq!(result.classification(), VoiceClassification::SilenceOrNoise);
        assert_eq!(result.features.energy.global_rms, 0.0);
        assert_eq!(result.features.energy.consistency.consistency, 0.0);
        assert_eq!(result.features.pitch.sample_count, 0);
        assert!(result.overall_score <= 100);
    }

    #[test]
    fn test_sine_220_pitch() {
        let features = extract_features(&buffer(sine(220.0, 1.0, 0.5)), &AnalysisConfig::default());
        let pitch = features.pitch;
        assert!(
            (pitch.average_hz - 220.0).abs() <= 22.0,
            "average pitch {:.2} Hz not within 10% of 220",
            pitch.average_hz
        );
        assert!(pitch.stability_ratio > 0.8, "stability {:.3}", pitch.stability_ratio);
    }

    #[test]
    fn test_constant_amplitude_consistency() {
        // DC level gives identical RMS in every frame
        let features = extract_features(&buffer(vec![0.5; 1024 * 20]), &AnalysisConfig::default());
        assert_eq!(features.energy.consistency.consistency, 1.0);
        assert_eq!(features.temporal.onset_count, 0);
        assert_eq!(features.temporal.rhythm_regularity, 0.5);
    }

    #[test]
    fn test_features_are_deterministic() {
        let samples = melody(&[220.0, 247.0, 262.0], 0.3, 0.1, 0.4);
        let a = extract_features(&buffer(samples.clone()), &AnalysisConfig::default());
        let b = extract_features(&buffer(samples), &AnalysisConfig::default());
        assert_eq!(a, b);
        assert_eq!(
            serde_json::to_string(&a).unwrap(),
            serde_json::to_string(&b).unwrap()
        );
    }

    #[test]
    fn test_melody_is_classified_as_singing() {
        let samples = melody(&[220.0, 247.0, 262.0, 294.0, 262.0], 0.3, 0.1, 0.4);
        let result = analyze_performance(&buffer(samples), &seeded_config())
            .expect("Analysis should succeed");

        assert!(result.features.temporal.onset_count >= 4);
        assert!(result.features.pitch.sample_count > 8);
        assert_eq!(result.classification(), VoiceClassification::Singing);
        assert_eq!(result.scores.len(), 10);
        for s in &result.scores {
            assert!(
                (1.0..=10.0).contains(&s.score),
                "{} = {}",
                s.parameter.name(),
                s.score
            );
        }
        assert!(result.overall_score <= 100);
        println!(
            "Melody: overall={} grade={} votes={} centroid={:.1} Hz",
            result.overall_score,
            result.grade.letter,
            result.gate.votes,
            result.features.spectral.centroid_hz
        );
    }

    #[test]
    fn test_scores_bounded_for_noisy_input() {
        for (seed, amplitude) in [(1u32, 0.01f32), (2, 0.2), (3, 0.9)] {
            let result = analyze_performance(&buffer(noise(0.5, amplitude, seed)), &seeded_config())
                .expect("Noise should still score");
            for s in &result.scores {
                assert!((0.0..=10.0).contains(&s.score));
                if result.classification() == VoiceClassification::Singing {
                    assert!(s.score >= 1.0);
                }
            }
            assert!(result.overall_score <= 100);
        }
    }

    #[test]
    fn test_extremely_loud_input_keeps_scores_finite() {
        let result = analyze_performance(&buffer(sine(220.0, 2.0, 1.0e20)), &seeded_config())
            .expect("Loud audio should still score");

        assert!(result.features.energy.global_rms.is_finite());
        assert!(result.features.temporal.energy_variation.is_finite());
        for s in &result.scores {
            assert!(s.score.is_finite(), "{} = {}", s.parameter.name(), s.score);
            if result.classification() == VoiceClassification::Singing {
                assert!((1.0..=10.0).contains(&s.score));
            }
        }
        if result.classification() == VoiceClassification::Singing {
            assert!(result.overall_score >= 10);
        }
    }

    #[test]
    fn test_karaoke_offline_take() {
        let line_starts: Vec<f32> = LINE_FRAMES.iter().map(|&f| frame_time(f)).collect();
        let samples = bursts(&LINE_FRAMES, 0.4, 4.5);
        let take = KaraokeTake::from_buffer(&buffer(samples), &AnalysisConfig::default());
        let timeline = LyricTimeline::from_pairs(
            line_starts.iter().map(|&t| (t, format!("line at {t}"))),
        )
        .unwrap();

        let result = analyze_karaoke(&timeline, &take, &KaraokeConfig::default());
        assert_eq!(take.onsets.len(), 4);
        assert_eq!(result.pairings.len(), 4);
        assert_eq!(result.coverage, 1.0);
        assert_eq!(result.median_abs_error, 0.0);
        assert_eq!(result.components.rhythm_timing, 1.0);
        assert_eq!(result.scores.rhythm_timing, 10.0);
        assert_eq!(result.scores.note_transitions, 10.0);
        assert!(result.overall_score <= 100);

        // Pairings keep timeline and onset order
        for w in result.pairings.windows(2) {
            assert!(w[1].line_index > w[0].line_index);
            assert!(w[1].onset_index > w[0].onset_index);
        }
    }

    #[test]
    fn test_karaoke_streamed_take_matches_lines() {
        let line_starts: Vec<f32> = LINE_FRAMES.iter().map(|&f| frame_time(f)).collect();
        let samples = bursts(&LINE_FRAMES, 0.4, 4.5);

        let mut tracker = OnsetTracker::new(&KaraokeConfig::default());
        for (i, window) in samples.chunks_exact(FRAME).enumerate() {
            tracker.push_window(frame_time(i), window);
        }
        let take = tracker.finish();
        assert_eq!(take.onsets.len(), 4);

        let timeline =
            LyricTimeline::from_pairs(line_starts.iter().map(|&t| (t, "la la"))).unwrap();
        let result = analyze_karaoke(&timeline, &take, &KaraokeConfig::default());
        assert_eq!(result.pairings.len(), 4);
        for p in &result.pairings {
            assert_eq!(p.error(), 0.0);
        }
    }

    #[test]
    fn test_karaoke_rejects_unsorted_timeline() {
        assert!(LyricTimeline::from_pairs([(2.0, "b"), (1.0, "a")]).is_err());
    }
}
