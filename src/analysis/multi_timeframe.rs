//! Runs the wave count across resampled timeframes in parallel. Each
//! timeframe is summarized independently; no consensus is forced.

use std::collections::HashMap;
use std::fmt;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::analysis::classifier::classify_pattern;
use crate::analysis::fractal_detector::identify_fractal_points;
use crate::analysis::segmenter::create_wave_segments;
use crate::config::AnalysisConfig;
use crate::models::{OhlcvTimeSeries, TimeframeSummary};

/// Analysis timeframes, expressed as multiples of the base hourly interval.
#[derive(
    Copy, Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize, strum_macros::EnumIter,
)]
pub enum Timeframe {
    H1,
    H4,
    D1,
    W1,
}

impl Timeframe {
    pub const ALL: [Timeframe; 4] = [Timeframe::H1, Timeframe::H4, Timeframe::D1, Timeframe::W1];

    /// Resampling factor relative to the source interval.
    pub fn factor(&self) -> usize {
        match self {
            Timeframe::H1 => 1,
            Timeframe::H4 => 4,
            Timeframe::D1 => 24,
            Timeframe::W1 => 168,
        }
    }

    pub fn shorthand(&self) -> &'static str {
        match self {
            Timeframe::H1 => "1h",
            Timeframe::H4 => "4h",
            Timeframe::D1 => "1d",
            Timeframe::W1 => "1w",
        }
    }
}

impl fmt::Display for Timeframe {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.shorthand())
    }
}

/// Summaries for each requested timeframe, computed on rayon workers and
/// merged by key. Timeframes whose resampled series carries too little
/// structure summarize as Unknown with zero confidence.
pub fn analyze_across_timeframes(
    series: &OhlcvTimeSeries,
    timeframes: &[Timeframe],
    config: &AnalysisConfig,
) -> HashMap<Timeframe, TimeframeSummary> {
    timeframes
        .par_iter()
        .map(|&tf| (tf, analyze_single_timeframe(series, tf, config)))
        .collect()
}

fn analyze_single_timeframe(
    series: &OhlcvTimeSeries,
    timeframe: Timeframe,
    config: &AnalysisConfig,
) -> TimeframeSummary {
    let factor = timeframe.factor();
    let resampled;
    let view = if factor == 1 {
        series
    } else {
        resampled = series.resample(factor);
        &resampled
    };

    let fractal_points = identify_fractal_points(view, config);
    if fractal_points.len() < 3 {
        log::debug!(
            "{} {}: {} fractal points, summarizing as unknown",
            series.pair_interval.name,
            timeframe,
            fractal_points.len()
        );
        return TimeframeSummary::unknown();
    }

    let mut segments = create_wave_segments(&fractal_points, &view.close_prices, config);
    let classification = classify_pattern(&mut segments, &view.close_prices);

    TimeframeSummary {
        wave_type: classification.wave_type,
        position: classification.current_position,
        confidence: classification.confidence,
        fractal_count: fractal_points.len(),
    }
}
