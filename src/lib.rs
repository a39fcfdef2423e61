#![allow(clippy::collapsible_if)]
#![allow(clippy::collapsible_else_if)]
#![allow(clippy::type_complexity)]

// Core modules
pub mod analysis;
pub mod config;
pub mod domain;
pub mod models;
pub mod utils;

// Re-export commonly used types
pub use analysis::{Timeframe, WaveAnalyzer};
pub use config::AnalysisConfig;
pub use domain::{FractalKind, FractalPoint, WaveDegree, WavePosition, WaveType};
pub use models::{OhlcvTimeSeries, PairInterval, Signal, WaveAnalysis, WavePattern, WaveSegment};
