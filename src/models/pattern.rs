use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::domain::wave::{WaveDegree, WavePosition, WaveType};
use crate::models::segment::WaveSegment;

/// The classified wave structure for one analysis run.
///
/// Owns its segments and any nested patterns outright, so the structure is a
/// strict tree and cannot form cycles.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WavePattern {
    pub wave_type: WaveType,
    pub current_position: WavePosition,
    pub degree: WaveDegree,
    pub segments: Vec<WaveSegment>,
    /// Box-counting dimension of the source series, in [1, 2]
    pub fractal_dimension: f64,
    /// R/S Hurst exponent of the source series, in [0, 1]
    pub hurst_exponent: f64,
    pub wave_start: f64,
    pub wave_end: f64,
    pub fibonacci_levels: HashMap<String, f64>,
    pub harmonic_ratios: HashMap<String, f64>,
    pub nested_patterns: Vec<WavePattern>,
    pub confidence: f64,
    /// Personality traits of the current wave position (trait → score)
    pub personality: HashMap<String, f64>,
}

impl WavePattern {
    /// Neutral pattern for when the series lacks structure. Never an error:
    /// downstream consumers always receive a well-formed result.
    pub fn unknown(wave_start: f64, wave_end: f64) -> Self {
        WavePattern {
            wave_type: WaveType::Unknown,
            current_position: WavePosition::Unknown,
            degree: WaveDegree::Minor,
            segments: Vec::new(),
            fractal_dimension: 1.5,
            hurst_exponent: 0.5,
            wave_start,
            wave_end,
            fibonacci_levels: HashMap::new(),
            harmonic_ratios: HashMap::new(),
            nested_patterns: Vec::new(),
            confidence: 0.0,
            personality: HashMap::new(),
        }
    }

    /// Total count of Fibonacci matches across all segments.
    pub fn fibonacci_match_count(&self) -> usize {
        self.segments
            .iter()
            .map(|seg| seg.fibonacci_matches.len())
            .sum()
    }

    /// Matches per segment; 0.0 with no segments.
    pub fn fibonacci_density(&self) -> f64 {
        if self.segments.is_empty() {
            return 0.0;
        }
        self.fibonacci_match_count() as f64 / self.segments.len() as f64
    }
}
