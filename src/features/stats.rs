//! Small descriptive statistics shared by the analyzers
//!
//! All helpers return 0.0 on empty input instead of dividing by zero.
//! Sums accumulate in f64 so very loud input cannot overflow to infinity.

/// Arithmetic mean, 0.0 for an empty slice
pub fn mean(values: &[f32]) -> f32 {
    if values.is_empty() {
        return 0.0;
    }
    (values.iter().map(|&v| f64::from(v)).sum::<f64>() / values.len() as f64) as f32
}

/// Population variance around `mean`, 0.0 for an empty slice
pub fn variance(values: &[f32], mean: f32) -> f32 {
    if values.is_empty() {
        return 0.0;
    }
    let mean = f64::from(mean);
    let sum_sq: f64 = values
        .iter()
        .map(|&v| {
            let d = f64::from(v) - mean;
            d * d
        })
        .sum();
    (sum_sq / values.len() as f64) as f32
}

/// Population standard deviation around `mean`
pub fn std_dev(values: &[f32], mean: f32) -> f32 {
    variance(values, mean).sqrt()
}

/// Median, averaging the two middle values for even lengths
///
/// Returns `None` for an empty slice.
pub fn median(values: &[f32]) -> Option<f32> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f32::total_cmp);
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 1 {
        Some(sorted[mid])
    } else {
        Some(0.5 * (sorted[mid - 1] + sorted[mid]))
    }
}

/// Round to one decimal place
pub fn round1(value: f32) -> f32 {
    (value * 10.0).round() / 10.0
}
