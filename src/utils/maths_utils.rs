use argminmax::ArgMinMax;
use statrs::statistics::Statistics;

/// The last `n` items of `values` (all of them when fewer exist)
pub fn tail<T>(values: &[T], n: usize) -> &[T] {
    &values[values.len().saturating_sub(n)..]
}

pub fn get_max(vec: &[f64]) -> Option<f64> {
    if vec.is_empty() {
        return None;
    }
    let max_index: usize = vec.argmax();
    Some(vec[max_index])
}

pub fn get_min(vec: &[f64]) -> Option<f64> {
    if vec.is_empty() {
        return None;
    }
    let min_index: usize = vec.argmin();
    Some(vec[min_index])
}

/// Arithmetic mean, `None` for an empty slice
pub fn mean(vec: &[f64]) -> Option<f64> {
    if vec.is_empty() {
        return None;
    }
    Some(vec.iter().mean())
}

/// Where `value` sits inside `[low, high]` as a 0..1 fraction.
/// A zero-width range returns `fallback` instead of dividing by zero.
pub fn position_in_range(value: f64, low: f64, high: f64, fallback: f64) -> f64 {
    if high == low {
        return fallback;
    }
    (value - low) / (high - low)
}
