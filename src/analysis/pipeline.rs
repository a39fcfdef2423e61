//! The analysis entry point. `WaveAnalyzer` wires the detector, segmenter,
//! classifier and target generator into one pass and assembles the result.
//!
//! Data problems never error out of `analyze`: a series without enough
//! structure produces a neutral result with confidence 0 and a Hold signal.
//! Configuration problems fail eagerly in `new`.

use std::collections::HashMap;

use anyhow::Result;

use crate::analysis::classifier::classify_pattern;
use crate::analysis::fractal_detector::identify_fractal_points;
use crate::analysis::multi_timeframe::{Timeframe, analyze_across_timeframes};
use crate::analysis::segmenter::create_wave_segments;
use crate::analysis::series_stats::{fractal_dimension, hurst_exponent};
use crate::analysis::targets::{
    ZoneSet, degenerate_zones, fibonacci_levels, generate_signal, probability_zones,
    signal_strength, target_levels,
};
use crate::config::{AnalysisConfig, FIBONACCI_RATIOS, MIN_FRACTALS_FOR_PATTERN, is_harmonic};
use crate::domain::fractal::FractalPoint;
use crate::domain::wave::{WavePosition, WaveType};
use crate::models::{OhlcvTimeSeries, RiskLevel, Signal, WaveAnalysis, WavePattern, WaveSegment};
use crate::utils::maths_utils::{mean, population_std};

pub struct WaveAnalyzer {
    config: AnalysisConfig,
}

impl WaveAnalyzer {
    /// Build an analyzer, rejecting invalid configuration up front.
    pub fn new(config: AnalysisConfig) -> Result<Self> {
        config.validate()?;
        Ok(WaveAnalyzer { config })
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Run the full wave analysis over one series. Pure with respect to the
    /// analyzer: repeated calls on the same input yield identical results.
    pub fn analyze(&self, series: &OhlcvTimeSeries) -> WaveAnalysis {
        let closes = &series.close_prices;
        let series_dimension = fractal_dimension(closes);
        let series_hurst = hurst_exponent(closes);

        let fractal_points = identify_fractal_points(series, &self.config);

        if fractal_points.len() < MIN_FRACTALS_FOR_PATTERN {
            log::info!(
                "{}: {} significant fractal points, below the {} needed for wave counting",
                series.pair_interval.name,
                fractal_points.len(),
                MIN_FRACTALS_FOR_PATTERN
            );
            return self.neutral_analysis(series, fractal_points, series_dimension, series_hurst);
        }

        let mut segments = create_wave_segments(&fractal_points, closes, &self.config);
        let classification = classify_pattern(&mut segments, closes);

        let levels = fibonacci_levels(&segments);
        let harmonic_ratios = harmonic_ratios(&segments, &self.config);

        let current_price = segments
            .last()
            .map(|seg| seg.end.price)
            .unwrap_or_else(|| closes[closes.len() - 1]);

        let zones = if levels.is_empty() {
            degenerate_zones(current_price)
        } else {
            probability_zones(&segments, &levels)
        };
        let targets = target_levels(&segments);

        let signal = generate_signal(classification.wave_type, classification.current_position);
        let strength = signal_strength(&segments, classification.wave_type, classification.confidence);

        // Pattern confidence blended with data quality, then bounded away
        // from false certainty in either direction.
        let data_quality = (fractal_points.len() as f64 / 10.0).min(1.0);
        let confidence =
            (classification.confidence * 0.7 + data_quality * 0.3).clamp(0.2, 0.9);

        let volatility = relative_volatility(closes);
        let risk_level = assess_risk(classification.wave_type, confidence, volatility);

        let pattern = WavePattern {
            wave_type: classification.wave_type,
            current_position: classification.current_position,
            degree: classification.degree,
            fractal_dimension: series_dimension,
            hurst_exponent: series_hurst,
            wave_start: fractal_points[0].price,
            wave_end: fractal_points[fractal_points.len() - 1].price,
            fibonacci_levels: levels,
            harmonic_ratios,
            nested_patterns: Vec::new(),
            confidence: classification.confidence,
            personality: classification.personality,
            segments,
        };

        let timeframe_analysis = if self.config.multi_timeframe {
            analyze_across_timeframes(series, &Timeframe::ALL, &self.config)
                .into_iter()
                .map(|(tf, summary)| (tf.shorthand().to_string(), summary))
                .collect()
        } else {
            HashMap::new()
        };

        let interpretation = wave_interpretation(pattern.current_position).to_string();
        let volume_confirmation_score = volume_confirmation_score(series, &fractal_points);
        let momentum_divergence = momentum_divergence_map(&fractal_points);
        let wave_alternation = wave_alternation_map(&pattern);
        let ZoneSet { support, resistance } = zones;

        WaveAnalysis {
            pattern,
            fractal_points,
            timeframe_analysis,
            target_levels: targets,
            support_zones: support,
            resistance_zones: resistance,
            signal,
            signal_strength: strength,
            confidence,
            risk_level,
            fractal_dimension: series_dimension,
            hurst_exponent: series_hurst,
            volume_confirmation_score,
            momentum_divergence,
            wave_alternation,
            interpretation,
        }
    }

    /// Well-formed result for series without enough structure to count waves.
    fn neutral_analysis(
        &self,
        series: &OhlcvTimeSeries,
        fractal_points: Vec<FractalPoint>,
        series_dimension: f64,
        series_hurst: f64,
    ) -> WaveAnalysis {
        let closes = &series.close_prices;
        let (wave_start, wave_end) = match closes.len() {
            0 => (0.0, 0.0),
            n => (closes[0], closes[n - 1]),
        };

        let mut pattern = WavePattern::unknown(wave_start, wave_end);
        pattern.fractal_dimension = series_dimension;
        pattern.hurst_exponent = series_hurst;

        let volatility = relative_volatility(closes);
        let risk_level = assess_risk(WaveType::Unknown, 0.0, volatility);
        let volume_confirmation_score = volume_confirmation_score(series, &fractal_points);

        WaveAnalysis {
            pattern,
            fractal_points,
            timeframe_analysis: HashMap::new(),
            target_levels: HashMap::new(),
            support_zones: HashMap::new(),
            resistance_zones: HashMap::new(),
            signal: Signal::Hold,
            signal_strength: 0.0,
            confidence: 0.0,
            risk_level,
            fractal_dimension: series_dimension,
            hurst_exponent: series_hurst,
            volume_confirmation_score,
            momentum_divergence: HashMap::new(),
            wave_alternation: HashMap::new(),
            interpretation: wave_interpretation(WavePosition::Unknown).to_string(),
        }
    }
}

/// Consecutive-segment length ratios plus any harmonic constants they match.
fn harmonic_ratios(segments: &[WaveSegment], config: &AnalysisConfig) -> HashMap<String, f64> {
    let mut ratios = HashMap::new();

    for (i, pair) in segments.windows(2).enumerate() {
        let (first, second) = (&pair[0], &pair[1]);
        if first.length <= 0.0 {
            continue;
        }
        let ratio = second.length / first.length;
        ratios.insert(format!("segment_{}_to_{}_ratio", i + 1, i), ratio);

        for &(name, value) in FIBONACCI_RATIOS {
            if is_harmonic(name) && (ratio - value).abs() < config.fibonacci_tolerance {
                ratios.insert(format!("{}_segments_{}_{}", name, i, i + 1), ratio);
            }
        }
    }

    ratios
}

/// Population standard deviation over the mean; 0 for degenerate series.
fn relative_volatility(closes: &[f64]) -> f64 {
    if closes.len() < 2 {
        return 0.0;
    }
    let avg = mean(closes);
    if avg == 0.0 {
        return 0.0;
    }
    population_std(closes) / avg
}

/// Additive risk factors: unclear pattern, weak confidence, high volatility.
fn assess_risk(wave_type: WaveType, confidence: f64, volatility: f64) -> RiskLevel {
    let mut risk_factors = 0u32;

    if wave_type == WaveType::Unknown {
        risk_factors += 2;
    }
    if confidence < 0.4 {
        risk_factors += 1;
    }
    if volatility > 0.25 {
        risk_factors += 1;
    }

    match risk_factors {
        0 => RiskLevel::Low,
        1 | 2 => RiskLevel::Medium,
        _ => RiskLevel::High,
    }
}

fn wave_interpretation(position: WavePosition) -> &'static str {
    match position {
        WavePosition::Wave1 => "Initial impulse move, expect correction",
        WavePosition::Wave2 => "Corrective phase, prepare for strong move",
        WavePosition::Wave3 => "Strongest impulse wave, momentum building",
        WavePosition::Wave4 => "Final correction before last push",
        WavePosition::Wave5 => "Final impulse wave, reversal approaching",
        WavePosition::WaveA => "First leg of correction",
        WavePosition::WaveB => "Counter-trend bounce in correction",
        WavePosition::WaveC => "Final leg of correction",
        _ => "Pattern unclear, await confirmation",
    }
}

/// Fraction of significant fractal points with confirming volume; 0.5 when
/// the series carries no volume data at all.
fn volume_confirmation_score(series: &OhlcvTimeSeries, fractal_points: &[FractalPoint]) -> f64 {
    if !series.has_volumes() {
        return 0.5;
    }
    if fractal_points.is_empty() {
        return 0.0;
    }
    fractal_points.iter().filter(|p| p.volume_confirmed).count() as f64
        / fractal_points.len() as f64
}

/// Divergence flags for the most recent fractal points, keyed by kind and
/// bar index.
fn momentum_divergence_map(fractal_points: &[FractalPoint]) -> HashMap<String, bool> {
    const RECENT_POINTS: usize = 5;
    fractal_points
        .iter()
        .rev()
        .take(RECENT_POINTS)
        .map(|p| (format!("{}_at_{}", p.kind, p.index), p.momentum_divergent))
        .collect()
}

/// Alternation guideline for impulse counts: waves 2 and 4 should differ in
/// character, which shows up as clearly different correction slopes.
fn wave_alternation_map(pattern: &WavePattern) -> HashMap<String, bool> {
    let mut map = HashMap::new();
    if pattern.wave_type != WaveType::Impulse || pattern.segments.len() < 4 {
        return map;
    }

    let wave_2_slope = pattern.segments[1].slope.abs();
    let wave_4_slope = pattern.segments[3].slope.abs();
    let alternating = if wave_4_slope > 0.0 {
        let ratio = wave_2_slope / wave_4_slope;
        !(0.5..=2.0).contains(&ratio)
    } else {
        wave_2_slope > 0.0
    };
    map.insert("wave_2_vs_wave_4".to_string(), alternating);
    map
}
