use argminmax::ArgMinMax;
use statrs::statistics::Statistics;

pub fn get_max(vec: &[f64]) -> f64 {
    let max_index: usize = vec.argmax();
    vec[max_index]
}

pub fn get_min(vec: &[f64]) -> f64 {
    let min_index: usize = vec.argmin();
    vec[min_index]
}

pub fn get_min_max(vec: &[f64]) -> (f64, f64) {
    (get_min(vec), get_max(vec))
}

/// Arithmetic mean; 0.0 for an empty slice (statrs would give NaN).
pub fn mean(vec: &[f64]) -> f64 {
    if vec.is_empty() {
        return 0.0;
    }
    Statistics::mean(vec.iter())
}

/// Population standard deviation (divides by n, not n-1).
pub fn population_std(vec: &[f64]) -> f64 {
    if vec.is_empty() {
        return 0.0;
    }
    vec.iter().population_std_dev()
}

/// Ordinary least-squares slope of y on x.
/// Returns None if fewer than 2 points or x has no variance.
pub fn ols_slope(x: &[f64], y: &[f64]) -> Option<f64> {
    if x.len() != y.len() || x.len() < 2 {
        return None;
    }

    let n = x.len() as f64;
    let x_mean = x.iter().sum::<f64>() / n;
    let y_mean = y.iter().sum::<f64>() / n;

    let mut numerator = 0.0_f64;
    let mut denominator = 0.0_f64;
    for (xi, yi) in x.iter().zip(y.iter()) {
        let dx = xi - x_mean;
        numerator += dx * (yi - y_mean);
        denominator += dx * dx;
    }

    if denominator.abs() < f64::EPSILON {
        return None;
    }
    Some(numerator / denominator)
}

/// `count` geometrically spaced values between `start` and `end` (inclusive).
/// Both bounds must be positive; start < end.
pub fn geometric_spacing(start: f64, end: f64, count: usize) -> Vec<f64> {
    if count == 0 || start <= 0.0 || end <= start {
        return Vec::new();
    }
    if count == 1 {
        return vec![start];
    }
    let log_start = start.ln();
    let step = (end.ln() - log_start) / (count - 1) as f64;
    (0..count)
        .map(|i| (log_start + step * i as f64).exp())
        .collect()
}

/// Log-spaced integer lags up to `max_lag`, deduplicated, ascending.
/// This is the lag ladder used by R/S analysis. The ladder starts at
/// 10^0.5, so the smallest lag emitted is 3, not 2.
pub fn log_spaced_lags(max_lag: usize, count: usize) -> Vec<usize> {
    if max_lag < 2 {
        return Vec::new();
    }
    let mut lags: Vec<usize> = geometric_spacing(10f64.powf(0.5), max_lag as f64, count)
        .into_iter()
        .map(|v| v as usize)
        .filter(|&lag| lag >= 2)
        .collect();
    lags.sort_unstable();
    lags.dedup();
    lags
}
