//! Example: Score a single WAV recording
//!
//! Usage: `cargo run --example analyze_file -- path/to/take.wav`

use vocalscore_dsp::{analyze_performance_with_progress, AnalysisConfig, SampleBuffer};

/// Load a WAV file as mono f32 samples
fn load_wav(path: &str) -> Result<(Vec<f32>, u32), Box<dyn std::error::Error>> {
    let mut reader = hound::WavReader::open(path)?;
    let spec = reader.spec();

    let samples: Vec<f32> = match spec.sample_format {
        hound::SampleFormat::Float => reader.samples::<f32>().collect::<Result<Vec<_>, _>>()?,
        hound::SampleFormat::Int => {
            let max_value = (1i64 << (spec.bits_per_sample - 1)) as f32;
            reader
                .samples::<i32>()
                .map(|s| s.map(|s| s as f32 / max_value))
                .collect::<Result<Vec<_>, _>>()?
        }
    };

    let channels = spec.channels.max(1) as usize;
    let mono = samples
        .chunks(channels)
        .map(|frame| frame.iter().sum::<f32>() / frame.len() as f32)
        .collect();

    Ok((mono, spec.sample_rate))
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let path = std::env::args()
        .nth(1)
        .ok_or("usage: analyze_file <recording.wav>")?;

    let (samples, sample_rate) = load_wav(&path)?;
    let buffer = SampleBuffer::new(samples, sample_rate)?;

    let result = analyze_performance_with_progress(&buffer, &AnalysisConfig::default(), |phase| {
        log::info!("{}", phase.label());
    })?;

    println!("Analysis Results for {}:", path);
    println!("  Classification: {:?} ({}/6 indicators)", result.classification(), result.gate.votes);
    for s in &result.scores {
        println!("  {:<18} {:>4.1}/10", s.parameter.name(), s.score);
    }
    println!("  Overall: {}/100  {} - {}", result.overall_score, result.grade.letter, result.grade.title);
    println!("  {}", result.grade.message);
    for warning in &result.metadata.warnings {
        println!("  warning: {}", warning);
    }
    println!("  Processing time: {:.2} ms", result.metadata.processing_time_ms);

    Ok(())
}
