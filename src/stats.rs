//! Reward-series statistics for reporting

/// Arithmetic mean; 0.0 for an empty series.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        0.0
    } else {
        values.iter().sum::<f64>() / values.len() as f64
    }
}

/// Maximum of a series; 0.0 for an empty series.
pub fn max(values: &[f64]) -> f64 {
    if values.is_empty() {
        0.0
    } else {
        values.iter().copied().fold(f64::NEG_INFINITY, f64::max)
    }
}

/// Moving average with valid-convolution semantics.
///
/// Only full windows contribute, so the output has `N - window + 1` points
/// for `N` inputs, and is empty when the series is shorter than the window.
/// This is the series a plotting collaborator consumes to smooth per-episode
/// rewards (window 10 over N episodes yields N-9 points).
pub fn moving_average(values: &[f64], window: usize) -> Vec<f64> {
    if window == 0 || values.len() < window {
        return Vec::new();
    }
    values
        .windows(window)
        .map(|chunk| chunk.iter().sum::<f64>() / window as f64)
        .collect()
}
