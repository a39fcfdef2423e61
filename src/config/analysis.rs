//! Analysis and computation configuration

use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};

/// The Master Analysis Configuration
///
/// Every analysis call takes its configuration explicitly; there is no
/// process-wide mutable state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Half-width of the local-extremum window used by the fractal detector
    pub fractal_window: usize,
    /// Minimum wave length as a fraction of the total price range.
    /// Recognized and validated, but the significance filter currently gates
    /// on fractal strength alone and does not consult it.
    pub min_wave_length: f64,
    /// Sub-window size for local Hurst estimation
    pub hurst_window: usize,
    /// Matching tolerance for Fibonacci/harmonic ratio comparisons
    pub fibonacci_tolerance: f64,
    /// Enable the volume check on fractal points
    pub volume_confirmation: bool,
    /// Enable the multi-timeframe orchestrator
    pub multi_timeframe: bool,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            fractal_window: 5,
            min_wave_length: 0.03,
            hurst_window: 50,
            fibonacci_tolerance: 0.05,
            volume_confirmation: true,
            multi_timeframe: true,
        }
    }
}

impl AnalysisConfig {
    /// Reject invalid configuration eagerly, before any analysis runs.
    /// Bad data degrades to neutral results; bad configuration is a caller bug.
    pub fn validate(&self) -> Result<()> {
        if self.fractal_window == 0 {
            bail!("fractal_window must be at least 1, got 0");
        }
        if self.hurst_window < 8 {
            bail!(
                "hurst_window must be at least 8 for R/S analysis, got {}",
                self.hurst_window
            );
        }
        if !(self.fibonacci_tolerance > 0.0 && self.fibonacci_tolerance < 1.0) {
            bail!(
                "fibonacci_tolerance must lie in (0, 1), got {}",
                self.fibonacci_tolerance
            );
        }
        if self.min_wave_length < 0.0 {
            bail!(
                "min_wave_length must be non-negative, got {}",
                self.min_wave_length
            );
        }
        Ok(())
    }

    /// Minimum series length for the detector to produce any structure.
    pub fn min_series_len(&self) -> usize {
        2 * self.fractal_window + 1
    }
}

/// Minimum significant fractal strength; weaker points are dropped.
pub const MIN_FRACTAL_STRENGTH: f64 = 0.3;

/// Volume must exceed the window mean by this factor to count as confirmation.
pub const VOLUME_CONFIRMATION_FACTOR: f64 = 1.2;

/// Lookback for the momentum-divergence heuristic (classic RSI period).
pub const MOMENTUM_DIVERGENCE_PERIOD: usize = 14;

/// Fractal points needed before wave counting is attempted.
pub const MIN_FRACTALS_FOR_PATTERN: usize = 5;
