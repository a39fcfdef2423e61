//! Global series statistics: box-counting fractal dimension and R/S Hurst
//! exponent. Both are pure functions that substitute neutral defaults on
//! degenerate input instead of failing.

use std::collections::HashSet;

use crate::utils::maths_utils::{geometric_spacing, get_min_max, log_spaced_lags, ols_slope};

/// Neutral dimension for series too short or too flat to measure.
pub const DEFAULT_FRACTAL_DIMENSION: f64 = 1.5;

/// Random-walk Hurst exponent, the neutral default.
pub const DEFAULT_HURST: f64 = 0.5;

const BOX_COUNT_SCALES: usize = 20;
const HURST_LAG_COUNT: usize = 10;
const MIN_LEN_FOR_DIMENSION: usize = 10;
const MIN_LEN_FOR_HURST: usize = 20;

/// Box-counting fractal dimension of the price curve, clamped to [1, 2].
///
/// Prices are normalized to [0, 1] and overlaid with square grids at ~20
/// geometrically spaced scales between 1/n and 1/2; the dimension is the OLS
/// slope of log(occupied boxes) against log(1/scale).
pub fn fractal_dimension(closes: &[f64]) -> f64 {
    let n = closes.len();
    if n < MIN_LEN_FOR_DIMENSION {
        return DEFAULT_FRACTAL_DIMENSION;
    }

    let (price_min, price_max) = get_min_max(closes);
    let price_range = price_max - price_min;
    if price_range <= 0.0 || !price_range.is_finite() {
        log::debug!("fractal_dimension: zero price range, returning neutral default");
        return DEFAULT_FRACTAL_DIMENSION;
    }

    let normalized: Vec<f64> = closes.iter().map(|&p| (p - price_min) / price_range).collect();

    let mut log_inv_scales = Vec::with_capacity(BOX_COUNT_SCALES);
    let mut log_counts = Vec::with_capacity(BOX_COUNT_SCALES);

    for scale in geometric_spacing(1.0 / n as f64, 0.5, BOX_COUNT_SCALES) {
        let grid_size = (1.0 / scale) as usize;
        if grid_size < 2 {
            continue;
        }

        let mut boxes: HashSet<(usize, usize)> = HashSet::new();
        for (i, &price) in normalized.iter().enumerate() {
            let x_box = i * grid_size / n;
            let y_box = ((price * grid_size as f64) as usize).min(grid_size - 1);
            boxes.insert((x_box, y_box));
        }

        log_inv_scales.push((1.0 / scale).ln());
        log_counts.push((boxes.len() as f64).ln());
    }

    if log_counts.len() < 2 {
        return DEFAULT_FRACTAL_DIMENSION;
    }

    match ols_slope(&log_inv_scales, &log_counts) {
        Some(slope) => slope.clamp(1.0, 2.0),
        None => DEFAULT_FRACTAL_DIMENSION,
    }
}

/// Hurst exponent via rescaled-range (R/S) analysis, clamped to [0, 1].
///
/// H ~ 0.5 indicates a random walk, H > 0.5 trending persistence, H < 0.5
/// mean reversion. Flat or too-short series return the random-walk default.
pub fn hurst_exponent(closes: &[f64]) -> f64 {
    if closes.len() < MIN_LEN_FOR_HURST {
        return DEFAULT_HURST;
    }

    // Log returns; non-positive prices are floored so the log stays finite.
    let log_returns: Vec<f64> = closes
        .windows(2)
        .map(|w| (w[1].max(1e-10)).ln() - (w[0].max(1e-10)).ln())
        .collect();
    let n = log_returns.len();

    let lags = log_spaced_lags(n / 4, HURST_LAG_COUNT);
    if lags.len() < 2 {
        return DEFAULT_HURST;
    }

    let mut log_lags = Vec::with_capacity(lags.len());
    let mut log_rs = Vec::with_capacity(lags.len());

    for lag in lags {
        let periods = n / lag;
        if periods < 2 {
            continue;
        }

        let mut rs_sum = 0.0;
        let mut valid_periods = 0usize;

        for p in 0..periods {
            let window = &log_returns[p * lag..p * lag + lag];
            let mean = window.iter().sum::<f64>() / lag as f64;

            // Cumulative deviation from the window mean.
            let mut running = 0.0;
            let mut dev_min = f64::INFINITY;
            let mut dev_max = f64::NEG_INFINITY;
            for &r in window {
                running += r - mean;
                dev_min = dev_min.min(running);
                dev_max = dev_max.max(running);
            }
            let range = dev_max - dev_min;

            let variance = window.iter().map(|r| (r - mean).powi(2)).sum::<f64>() / lag as f64;
            let std_dev = variance.sqrt();

            if std_dev > 0.0 {
                rs_sum += range / std_dev;
                valid_periods += 1;
            }
        }

        if valid_periods == 0 {
            continue;
        }
        let mean_rs = rs_sum / valid_periods as f64;
        if mean_rs > 0.0 {
            log_lags.push((lag as f64).ln());
            log_rs.push(mean_rs.ln());
        }
    }

    if log_rs.len() < 2 {
        log::debug!("hurst_exponent: too few valid lags, returning random-walk default");
        return DEFAULT_HURST;
    }

    match ols_slope(&log_lags, &log_rs) {
        Some(slope) => slope.clamp(0.0, 1.0),
        None => DEFAULT_HURST,
    }
}

/// Hurst exponent of the sub-series centred on `index`, used to annotate
/// individual fractal points. Sub-windows shorter than 10 samples carry no
/// usable information and fall back to the random-walk default.
pub fn local_hurst(closes: &[f64], index: usize, hurst_window: usize) -> f64 {
    let n = closes.len();
    let window = hurst_window.min(n / 4);
    let start = index.saturating_sub(window / 2);
    let end = (index + window / 2).min(n);

    let local = &closes[start..end];
    if local.len() < 10 {
        return DEFAULT_HURST;
    }
    hurst_exponent(local)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn trending_series(len: usize) -> Vec<f64> {
        let mut v = Vec::with_capacity(len);
        let mut price = 100.0;
        for i in 0..len {
            price += 0.5 + 0.1 * (i as f64).sin().abs();
            v.push(price);
        }
        v
    }

    fn oscillating_series(len: usize) -> Vec<f64> {
        (0..len)
            .map(|i| 100.0 + if i % 2 == 0 { 5.0 } else { -5.0 } + 0.01 * i as f64)
            .collect()
    }

    fn pseudorandom_walk(len: usize, seed: u64) -> Vec<f64> {
        let mut v = Vec::with_capacity(len);
        let mut price = 100.0;
        let mut state = seed;
        for _ in 0..len {
            // xorshift64
            state ^= state << 13;
            state ^= state >> 7;
            state ^= state << 17;
            price += (state as f64 / u64::MAX as f64) - 0.5;
            v.push(price);
        }
        v
    }

    #[test]
    fn test_dimension_always_in_bounds() {
        for series in [
            trending_series(256),
            oscillating_series(256),
            pseudorandom_walk(256, 42),
        ] {
            let d = fractal_dimension(&series);
            assert!((1.0..=2.0).contains(&d), "dimension {} out of [1,2]", d);
        }
    }

    #[test]
    fn test_dimension_short_series_default() {
        assert_eq!(fractal_dimension(&[1.0, 2.0, 3.0]), DEFAULT_FRACTAL_DIMENSION);
    }

    #[test]
    fn test_dimension_flat_series_default() {
        let flat = vec![42.0; 100];
        assert_eq!(fractal_dimension(&flat), DEFAULT_FRACTAL_DIMENSION);
    }

    #[test]
    fn test_dimension_smooth_below_jagged() {
        // A straight line is closer to dimension 1 than a sawtooth.
        let line: Vec<f64> = (0..256).map(|i| i as f64).collect();
        let jagged = oscillating_series(256);
        assert!(fractal_dimension(&line) < fractal_dimension(&jagged));
    }

    #[test]
    fn test_hurst_always_in_bounds() {
        for series in [
            trending_series(256),
            oscillating_series(256),
            pseudorandom_walk(512, 7),
        ] {
            let h = hurst_exponent(&series);
            assert!((0.0..=1.0).contains(&h), "H {} out of [0,1]", h);
        }
    }

    #[test]
    fn test_hurst_short_series_default() {
        assert_eq!(hurst_exponent(&trending_series(19)), DEFAULT_HURST);
    }

    #[test]
    fn test_hurst_flat_series_default() {
        // Zero variance in every window: no valid R/S pairs.
        let flat = vec![100.0; 200];
        assert_eq!(hurst_exponent(&flat), DEFAULT_HURST);
    }

    #[test]
    fn test_hurst_trending_above_mean_reverting() {
        let trending = hurst_exponent(&trending_series(512));
        let reverting = hurst_exponent(&oscillating_series(512));
        assert!(
            trending > reverting,
            "trending H {} should exceed mean-reverting H {}",
            trending,
            reverting
        );
    }

    #[test]
    fn test_hurst_is_pure() {
        let series = pseudorandom_walk(300, 99);
        let first = hurst_exponent(&series);
        let second = hurst_exponent(&series);
        assert_eq!(first, second);
    }

    #[test]
    fn test_hurst_tolerates_non_positive_prices() {
        let mut series = trending_series(100);
        series[10] = 0.0;
        series[11] = -5.0;
        let h = hurst_exponent(&series);
        assert!((0.0..=1.0).contains(&h));
    }

    #[test]
    fn test_local_hurst_short_window_default() {
        let series = trending_series(30);
        // n/4 = 7 < 10 samples around the point
        assert_eq!(local_hurst(&series, 15, 50), DEFAULT_HURST);
    }

    #[test]
    fn test_local_hurst_in_bounds() {
        let series = trending_series(400);
        let h = local_hurst(&series, 200, 50);
        assert!((0.0..=1.0).contains(&h));
    }
}
