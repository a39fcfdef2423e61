//! Fractal point detection: strict local extrema over a symmetric window,
//! annotated with strength, local Hurst, volume confirmation and momentum
//! divergence, then filtered to the significant set.

use crate::analysis::series_stats::local_hurst;
use crate::config::{
    AnalysisConfig, MIN_FRACTAL_STRENGTH, MOMENTUM_DIVERGENCE_PERIOD, VOLUME_CONFIRMATION_FACTOR,
};
use crate::domain::fractal::{FractalKind, FractalPoint};
use crate::models::OhlcvTimeSeries;
use crate::utils::maths_utils::{get_max, get_min, mean};

/// Scan the series for fractal highs and lows.
///
/// A bar is a fractal high when its high strictly exceeds every other high
/// within `fractal_window` bars on each side; lows mirror with strict minima.
/// Series shorter than `2 * window + 1` yield no points. Only points with
/// strength at or above the significance threshold survive.
pub fn identify_fractal_points(series: &OhlcvTimeSeries, config: &AnalysisConfig) -> Vec<FractalPoint> {
    let window = config.fractal_window;
    let n = series.close_prices.len();
    let mut points = Vec::new();

    if n < config.min_series_len() {
        log::debug!(
            "{}: {} klines below fractal minimum {}, no fractal points",
            series.pair_interval.name,
            n,
            config.min_series_len()
        );
        return points;
    }

    let highs = &series.high_prices;
    let lows = &series.low_prices;
    let closes = &series.close_prices;
    let has_volumes = series.has_volumes();

    for i in window..n - window {
        let is_high = (i - window..=i + window).all(|j| j == i || highs[j] < highs[i]);
        let is_low = (i - window..=i + window).all(|j| j == i || lows[j] > lows[i]);

        if !is_high && !is_low {
            continue;
        }

        let strength = fractal_strength(highs, lows, i, window);
        if strength < MIN_FRACTAL_STRENGTH {
            continue;
        }

        // A bar that is simultaneously a strict high and a strict low only
        // happens on pathological data; mark it Neutral rather than guessing.
        let (kind, price) = if is_high && is_low {
            (FractalKind::Neutral, highs[i])
        } else if is_high {
            (FractalKind::Up, highs[i])
        } else {
            (FractalKind::Down, lows[i])
        };

        let volume_confirmed = if config.volume_confirmation && has_volumes {
            check_volume_confirmation(&series.base_asset_volumes, i, window)
        } else {
            false
        };

        points.push(FractalPoint {
            index: i,
            price,
            timestamp_ms: series.timestamp_ms_at(i),
            kind,
            strength,
            local_hurst: local_hurst(closes, i, config.hurst_window),
            volume_confirmed,
            momentum_divergent: check_momentum_divergence(closes, i, is_high || kind == FractalKind::Neutral),
        });
    }

    log::debug!(
        "{}: {} significant fractal points from {} klines",
        series.pair_interval.name,
        points.len(),
        n
    );
    points
}

/// Relative prominence of the extremum within its local window, in [0, 1].
fn fractal_strength(highs: &[f64], lows: &[f64], index: usize, window: usize) -> f64 {
    let start = index.saturating_sub(window);
    let end = (index + window + 1).min(highs.len());

    let local_high = get_max(&highs[start..end]);
    let local_low = get_min(&lows[start..end]);
    let local_range = local_high - local_low;
    if local_range <= 0.0 {
        return 0.0;
    }

    let prominence = if highs[index] == local_high {
        (highs[index] - mean(&highs[start..end])) / local_range
    } else {
        (mean(&lows[start..end]) - lows[index]) / local_range
    };

    prominence.clamp(0.0, 1.0)
}

/// Volume at the fractal bar must exceed the local window average by the
/// confirmation factor.
fn check_volume_confirmation(volumes: &[f64], index: usize, window: usize) -> bool {
    let start = index.saturating_sub(window);
    let end = (index + window + 1).min(volumes.len());

    let avg_volume = mean(&volumes[start..end]);
    volumes[index] > avg_volume * VOLUME_CONFIRMATION_FACTOR
}

/// Divergence between the 14-period momentum and the last bar's direction.
/// Highs diverge when momentum is negative while price still rose into the
/// bar; lows mirror.
fn check_momentum_divergence(closes: &[f64], index: usize, is_high: bool) -> bool {
    if index < MOMENTUM_DIVERGENCE_PERIOD {
        return false;
    }

    let momentum = closes[index] - closes[index - MOMENTUM_DIVERGENCE_PERIOD];
    let last_change = closes[index] - closes[index - 1];

    if is_high {
        momentum < 0.0 && last_change > 0.0
    } else {
        momentum > 0.0 && last_change < 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series_from_closes(closes: Vec<f64>) -> OhlcvTimeSeries {
        OhlcvTimeSeries::from_closes("TESTUSDT", 3_600_000, closes)
    }

    // Triangle wave with a pronounced peak every 8 bars.
    fn sawtooth(len: usize) -> Vec<f64> {
        (0..len)
            .map(|i| {
                let phase = i % 8;
                let tri = if phase <= 4 { phase as f64 } else { (8 - phase) as f64 };
                100.0 + tri * 5.0
            })
            .collect()
    }

    #[test]
    fn test_short_series_yields_no_points() {
        let config = AnalysisConfig::default();
        let series = series_from_closes(vec![100.0; 5]);
        assert!(identify_fractal_points(&series, &config).is_empty());
    }

    #[test]
    fn test_flat_series_yields_no_points() {
        let config = AnalysisConfig::default();
        let series = series_from_closes(vec![100.0; 64]);
        assert!(identify_fractal_points(&series, &config).is_empty());
    }

    #[test]
    fn test_detects_alternating_extrema() {
        let config = AnalysisConfig {
            fractal_window: 3,
            ..AnalysisConfig::default()
        };
        let series = series_from_closes(sawtooth(64));
        let points = identify_fractal_points(&series, &config);
        assert!(!points.is_empty());

        // Strict extrema on a triangle wave alternate between kinds.
        for pair in points.windows(2) {
            assert_ne!(pair[0].kind, pair[1].kind);
        }
        for p in &points {
            assert!(p.strength >= MIN_FRACTAL_STRENGTH);
            assert!((0.0..=1.0).contains(&p.strength));
            assert!((0.0..=1.0).contains(&p.local_hurst));
        }
    }

    #[test]
    fn test_zigzag_closes_alternate_kinds() {
        let config = AnalysisConfig {
            fractal_window: 1,
            ..AnalysisConfig::default()
        };
        let series = series_from_closes(vec![100.0, 120.0, 110.0, 140.0, 130.0, 170.0]);
        let points = identify_fractal_points(&series, &config);

        let kinds: Vec<FractalKind> = points.iter().map(|p| p.kind).collect();
        assert_eq!(
            kinds,
            vec![FractalKind::Up, FractalKind::Down, FractalKind::Up, FractalKind::Down]
        );
        assert_eq!(points[0].price, 120.0);
        assert_eq!(points[1].price, 110.0);
    }

    #[test]
    fn test_indices_respect_window_margin() {
        let config = AnalysisConfig {
            fractal_window: 3,
            ..AnalysisConfig::default()
        };
        let series = series_from_closes(sawtooth(64));
        let n = series.close_prices.len();
        for p in identify_fractal_points(&series, &config) {
            assert!(p.index >= config.fractal_window);
            assert!(p.index < n - config.fractal_window);
        }
    }

    #[test]
    fn test_points_sorted_by_index() {
        let config = AnalysisConfig {
            fractal_window: 2,
            ..AnalysisConfig::default()
        };
        let series = series_from_closes(sawtooth(96));
        let points = identify_fractal_points(&series, &config);
        assert!(points.windows(2).all(|w| w[0].index < w[1].index));
    }

    #[test]
    fn test_momentum_divergence_requires_lookback() {
        let closes: Vec<f64> = (0..30).map(|i| 100.0 + i as f64).collect();
        assert!(!check_momentum_divergence(&closes, 5, true));
    }

    #[test]
    fn test_momentum_divergence_at_high() {
        // 14-period momentum negative, last change positive.
        let mut closes = vec![120.0; 30];
        for (i, c) in closes.iter_mut().enumerate() {
            *c = 120.0 - i as f64 * 0.5;
        }
        closes[20] = closes[19] + 1.0;
        assert!(check_momentum_divergence(&closes, 20, true));
        assert!(!check_momentum_divergence(&closes, 20, false));
    }

    #[test]
    fn test_volume_confirmation_threshold() {
        let mut volumes = vec![100.0; 21];
        volumes[10] = 130.0;
        assert!(check_volume_confirmation(&volumes, 10, 5));

        volumes[10] = 110.0;
        assert!(!check_volume_confirmation(&volumes, 10, 5));
    }
}
