use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::domain::fractal::FractalPoint;
use crate::domain::wave::{WaveDegree, WavePosition, WaveType};

/// One directional leg between two consecutive fractal points.
///
/// Built by the segmenter with placeholder classification; the classifier
/// annotates `wave_type`/`wave_position` in place afterwards. Invariant:
/// `start.index < end.index`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WaveSegment {
    pub start: FractalPoint,
    pub end: FractalPoint,
    pub wave_type: WaveType,
    pub wave_position: WavePosition,
    pub degree: WaveDegree,
    /// Absolute price distance covered
    pub length: f64,
    /// Index distance covered
    pub duration: usize,
    /// Price change per period
    pub slope: f64,
    /// Close-price change over the enclosed sub-series, per sample
    pub momentum: f64,
    /// Named Fibonacci/harmonic matches against prior segments,
    /// keyed `<ratio_name>_vs_segment_<k>` where k counts back (1 = previous)
    pub fibonacci_matches: HashMap<String, f64>,
    /// Nested sub-waves, owned by this segment
    pub sub_waves: Vec<WaveSegment>,
    pub confidence: f64,
}

impl WaveSegment {
    pub fn is_upward(&self) -> bool {
        self.end.price > self.start.price
    }

    /// Average of the two endpoint strengths.
    pub fn endpoint_strength(&self) -> f64 {
        (self.start.strength + self.end.strength) / 2.0
    }

    pub fn has_volume_confirmation(&self) -> bool {
        self.start.volume_confirmed || self.end.volume_confirmed
    }
}
