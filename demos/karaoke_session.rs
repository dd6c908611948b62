//! Example: Score a karaoke take against a lyric timeline
//!
//! The take is streamed window by window through the onset tracker, the way a
//! live recording would be, then scored once it finishes.
//!
//! Usage: `cargo run --example karaoke_session -- take.wav lines.json`
//!
//! `lines.json` is a JSON array of `{"timestamp_seconds": f32, "text": str}`.

use vocalscore_dsp::{analyze_karaoke, KaraokeConfig, LyricLine, LyricTimeline, OnsetTracker};

const WINDOW: usize = 1024;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut args = std::env::args().skip(1);
    let (wav_path, lines_path) = match (args.next(), args.next()) {
        (Some(w), Some(l)) => (w, l),
        _ => return Err("usage: karaoke_session <take.wav> <lines.json>".into()),
    };

    let lines: Vec<LyricLine> = serde_json::from_str(&std::fs::read_to_string(&lines_path)?)?;
    let timeline = LyricTimeline::new(lines)?;

    let mut reader = hound::WavReader::open(&wav_path)?;
    let spec = reader.spec();
    let channels = spec.channels.max(1) as usize;
    let raw: Vec<f32> = match spec.sample_format {
        hound::SampleFormat::Float => reader.samples::<f32>().collect::<Result<_, _>>()?,
        hound::SampleFormat::Int => {
            let max_value = (1i64 << (spec.bits_per_sample - 1)) as f32;
            reader
                .samples::<i32>()
                .map(|s| s.map(|s| s as f32 / max_value))
                .collect::<Result<_, _>>()?
        }
    };
    let mono: Vec<f32> = raw
        .chunks(channels)
        .map(|frame| frame.iter().sum::<f32>() / frame.len() as f32)
        .collect();

    let config = KaraokeConfig::default();
    config.validate()?;
    let mut tracker = OnsetTracker::new(&config);
    for (i, window) in mono.chunks_exact(WINDOW).enumerate() {
        let time = (i * WINDOW) as f32 / spec.sample_rate as f32;
        if let Some(onset) = tracker.push_window(time, window) {
            if let Some(idx) = timeline.active_index(onset) {
                log::info!("{:6.2}s  onset during \"{}\"", onset, timeline.lines()[idx].text);
            }
        }
    }
    let take = tracker.finish();

    let result = analyze_karaoke(&timeline, &take, &config);
    println!("Karaoke Results ({} of {} lines matched):", result.pairings.len(), timeline.len());
    println!("  Rhythm & Timing   {:>4.1}/10", result.scores.rhythm_timing);
    println!("  Pitch Stability   {:>4.1}/10", result.scores.pitch_stability);
    println!("  Vocal Clarity     {:>4.1}/10", result.scores.vocal_clarity);
    println!("  Dynamic Range     {:>4.1}/10", result.scores.dynamic_range);
    println!("  Breath Control    {:>4.1}/10", result.scores.breath_control);
    println!("  Note Transitions  {:>4.1}/10", result.scores.note_transitions);
    println!("  Overall: {}/100", result.overall_score);

    Ok(())
}
