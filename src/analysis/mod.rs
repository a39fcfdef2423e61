// Wave detection, classification and projection algorithms
pub mod classifier;
pub mod fractal_detector;
pub mod multi_timeframe;
pub mod pipeline;
pub mod segmenter;
pub mod series_stats;
pub mod targets;

// Re-export commonly used types
pub use multi_timeframe::Timeframe;
pub use pipeline::WaveAnalyzer;
