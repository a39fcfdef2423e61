use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

use crate::domain::fractal::FractalPoint;
use crate::domain::wave::{WavePosition, WaveType};
use crate::models::pattern::WavePattern;

/// Directional trading signal.
#[derive(
    Copy, Clone, PartialEq, Eq, Hash, Default, Debug, Serialize, Deserialize, strum_macros::EnumIter,
)]
pub enum Signal {
    Buy,
    Sell,
    #[default]
    Hold,
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Signal::Buy => write!(f, "buy"),
            Signal::Sell => write!(f, "sell"),
            Signal::Hold => write!(f, "hold"),
        }
    }
}

#[derive(
    Copy, Clone, PartialEq, Eq, Hash, Default, Debug, Serialize, Deserialize, strum_macros::EnumIter,
)]
pub enum RiskLevel {
    Low,
    #[default]
    Medium,
    High,
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            RiskLevel::Low => write!(f, "low"),
            RiskLevel::Medium => write!(f, "medium"),
            RiskLevel::High => write!(f, "high"),
        }
    }
}

/// A Fibonacci level classified as support or resistance, with the
/// probability of price reaching it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProbabilityZone {
    pub price: f64,
    /// In [0.1, 0.9]: base 0.5 adjusted by momentum alignment
    pub probability: f64,
    pub strength: f64,
}

/// Forward price projection from the most recent wave relationship.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceTarget {
    pub price: f64,
    pub probability: f64,
    /// Projection ratio applied to the second-to-last segment
    pub ratio: f64,
}

/// Condensed per-timeframe view: no forced consensus, callers vote if they
/// want to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeframeSummary {
    pub wave_type: WaveType,
    pub position: WavePosition,
    pub confidence: f64,
    pub fractal_count: usize,
}

impl TimeframeSummary {
    pub fn unknown() -> Self {
        TimeframeSummary {
            wave_type: WaveType::Unknown,
            position: WavePosition::Unknown,
            confidence: 0.0,
            fractal_count: 0,
        }
    }
}

/// Everything one analysis run produces. Created fresh per call; the engine
/// holds no state between runs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WaveAnalysis {
    pub pattern: WavePattern,
    pub fractal_points: Vec<FractalPoint>,
    /// Timeframe shorthand ("1h", "4h", ...) → summary; empty when
    /// multi-timeframe analysis is disabled
    pub timeframe_analysis: HashMap<String, TimeframeSummary>,
    pub target_levels: HashMap<String, PriceTarget>,
    pub support_zones: HashMap<String, ProbabilityZone>,
    pub resistance_zones: HashMap<String, ProbabilityZone>,
    pub signal: Signal,
    pub signal_strength: f64,
    pub confidence: f64,
    pub risk_level: RiskLevel,
    pub fractal_dimension: f64,
    pub hurst_exponent: f64,
    /// Fraction of significant fractal points carrying volume confirmation;
    /// 0.5 when the series has no volume data
    pub volume_confirmation_score: f64,
    /// Named divergence observations on recent fractal points
    pub momentum_divergence: HashMap<String, bool>,
    /// Alternation compliance checks for impulse counts
    pub wave_alternation: HashMap<String, bool>,
    pub interpretation: String,
}
