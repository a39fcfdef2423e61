pub mod analysis_result;
pub mod pattern;
pub mod segment;
pub mod timeseries;

pub use analysis_result::{
    PriceTarget, ProbabilityZone, RiskLevel, Signal, TimeframeSummary, WaveAnalysis,
};
pub use pattern::WavePattern;
pub use segment::WaveSegment;
pub use timeseries::{OhlcvTimeSeries, PairInterval};
