//! Builds directional wave segments between consecutive fractal points and
//! tags each with its Fibonacci relationships to recent predecessors.

use std::collections::HashMap;

use itertools::Itertools;

use crate::config::{AnalysisConfig, FIBONACCI_RATIOS};
use crate::domain::fractal::FractalPoint;
use crate::domain::wave::{WaveDegree, WavePosition, WaveType};
use crate::models::WaveSegment;

const FIBONACCI_LOOKBACK_SEGMENTS: usize = 3;

/// Connect consecutive fractal points into segments. Fewer than two points
/// yield no segments. Classification fields are placeholders until the
/// classifier annotates them.
pub fn create_wave_segments(
    fractal_points: &[FractalPoint],
    closes: &[f64],
    config: &AnalysisConfig,
) -> Vec<WaveSegment> {
    let mut segments: Vec<WaveSegment> = Vec::new();

    for (start, end) in fractal_points.iter().tuple_windows() {
        let length = (end.price - start.price).abs();
        let duration = end.index - start.index;
        let slope = if duration > 0 {
            (end.price - start.price) / duration as f64
        } else {
            0.0
        };

        let momentum = segment_momentum(&closes[start.index..=end.index.min(closes.len() - 1)]);
        let fibonacci_matches = segment_fibonacci_matches(start, end, &segments, config);

        segments.push(WaveSegment {
            start: start.clone(),
            end: end.clone(),
            wave_type: WaveType::Unknown,
            wave_position: WavePosition::Unknown,
            degree: WaveDegree::Minor,
            length,
            duration,
            slope,
            momentum,
            fibonacci_matches,
            sub_waves: Vec::new(),
            confidence: 0.5,
        });
    }

    segments
}

/// Average close-price change per sample over the enclosed sub-series.
fn segment_momentum(segment_closes: &[f64]) -> f64 {
    if segment_closes.len() < 2 {
        return 0.0;
    }
    let price_change = segment_closes[segment_closes.len() - 1] - segment_closes[0];
    price_change / segment_closes.len() as f64
}

/// Length ratios against the last few segments that fall within tolerance of
/// a named Fibonacci ratio, keyed `<ratio_name>_vs_segment_<k>` where k
/// counts backwards (1 = immediately preceding segment).
fn segment_fibonacci_matches(
    start: &FractalPoint,
    end: &FractalPoint,
    previous: &[WaveSegment],
    config: &AnalysisConfig,
) -> HashMap<String, f64> {
    let mut matches = HashMap::new();
    if previous.is_empty() {
        return matches;
    }

    let current_length = (end.price - start.price).abs();
    let lookback_start = previous.len().saturating_sub(FIBONACCI_LOOKBACK_SEGMENTS);

    for (i, prev) in previous.iter().enumerate().skip(lookback_start) {
        if prev.length <= 0.0 {
            continue;
        }
        let ratio = current_length / prev.length;
        let segments_back = previous.len() - i;

        for &(fib_name, fib_value) in FIBONACCI_RATIOS {
            if (ratio - fib_value).abs() < config.fibonacci_tolerance {
                matches.insert(format!("{fib_name}_vs_segment_{segments_back}"), ratio);
            }
        }
    }

    matches
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::fractal::FractalKind;

    fn point(index: usize, price: f64, kind: FractalKind) -> FractalPoint {
        FractalPoint {
            index,
            price,
            timestamp_ms: index as i64 * 3_600_000,
            kind,
            strength: 0.6,
            local_hurst: 0.5,
            volume_confirmed: false,
            momentum_divergent: false,
        }
    }

    fn closes_through(points: &[FractalPoint]) -> Vec<f64> {
        // Linear interpolation between fractal prices, enough for momentum.
        let last_index = points.last().map(|p| p.index).unwrap_or(0);
        let mut closes = vec![0.0; last_index + 1];
        for pair in points.windows(2) {
            let (a, b) = (&pair[0], &pair[1]);
            let span = (b.index - a.index) as f64;
            for i in a.index..=b.index {
                let t = (i - a.index) as f64 / span;
                closes[i] = a.price + (b.price - a.price) * t;
            }
        }
        closes
    }

    #[test]
    fn test_fewer_than_two_points_no_segments() {
        let config = AnalysisConfig::default();
        let single = [point(5, 100.0, FractalKind::Down)];
        assert!(create_wave_segments(&single, &[100.0; 20], &config).is_empty());
        assert!(create_wave_segments(&[], &[100.0; 20], &config).is_empty());
    }

    #[test]
    fn test_segment_geometry() {
        let config = AnalysisConfig::default();
        let points = [
            point(5, 100.0, FractalKind::Down),
            point(15, 120.0, FractalKind::Up),
            point(25, 110.0, FractalKind::Down),
        ];
        let closes = closes_through(&points);
        let segments = create_wave_segments(&points, &closes, &config);

        assert_eq!(segments.len(), 2);
        assert!((segments[0].length - 20.0).abs() < 1e-9);
        assert_eq!(segments[0].duration, 10);
        assert!((segments[0].slope - 2.0).abs() < 1e-9);
        assert!(segments[0].is_upward());
        assert!(!segments[1].is_upward());
        assert_eq!(segments[0].wave_type, WaveType::Unknown);
        assert_eq!(segments[0].wave_position, WavePosition::Unknown);
    }

    #[test]
    fn test_momentum_sign_follows_direction() {
        let config = AnalysisConfig::default();
        let points = [
            point(0, 100.0, FractalKind::Down),
            point(10, 130.0, FractalKind::Up),
            point(20, 105.0, FractalKind::Down),
        ];
        let closes = closes_through(&points);
        let segments = create_wave_segments(&points, &closes, &config);

        assert!(segments[0].momentum > 0.0);
        assert!(segments[1].momentum < 0.0);
    }

    #[test]
    fn test_fibonacci_match_against_previous_segment() {
        let config = AnalysisConfig::default();
        // Second leg retraces exactly 61.8% of the first.
        let points = [
            point(0, 100.0, FractalKind::Down),
            point(10, 200.0, FractalKind::Up),
            point(20, 138.2, FractalKind::Down),
        ];
        let closes = closes_through(&points);
        let segments = create_wave_segments(&points, &closes, &config);

        assert!(
            segments[1]
                .fibonacci_matches
                .contains_key("retracement_61_8_vs_segment_1"),
            "matches: {:?}",
            segments[1].fibonacci_matches
        );
    }

    #[test]
    fn test_first_segment_has_no_matches() {
        let config = AnalysisConfig::default();
        let points = [
            point(0, 100.0, FractalKind::Down),
            point(10, 150.0, FractalKind::Up),
        ];
        let closes = closes_through(&points);
        let segments = create_wave_segments(&points, &closes, &config);
        assert!(segments[0].fibonacci_matches.is_empty());
    }
}
