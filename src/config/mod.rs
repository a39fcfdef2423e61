//! Configuration module for the wave analysis engine.

pub mod analysis;
pub mod fibonacci;

// Re-export commonly used items
pub use analysis::{
    AnalysisConfig, MIN_FRACTAL_STRENGTH, MIN_FRACTALS_FOR_PATTERN, MOMENTUM_DIVERGENCE_PERIOD,
    VOLUME_CONFIRMATION_FACTOR,
};
pub use fibonacci::{
    FIBONACCI_RATIOS, GOLDEN_RATIO, TARGET_PROJECTION_RATIOS, is_extension, is_harmonic,
    is_retracement,
};
