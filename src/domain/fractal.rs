use serde::{Deserialize, Serialize};
use std::fmt;

/// What kind of local extremum a fractal point marks.
///
/// `Neutral` covers the degenerate case where an index qualifies as both an
/// up- and a down-fractal (only possible in flat data). `Complex` is reserved
/// for composite structures and is never emitted by the detector itself.
#[derive(
    Copy, Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize, strum_macros::EnumIter,
)]
pub enum FractalKind {
    Up,
    Down,
    Neutral,
    Complex,
}

impl fmt::Display for FractalKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            FractalKind::Up => write!(f, "up_fractal"),
            FractalKind::Down => write!(f, "down_fractal"),
            FractalKind::Neutral => write!(f, "neutral_fractal"),
            FractalKind::Complex => write!(f, "complex_fractal"),
        }
    }
}

/// A local price extremum with its quality annotations.
///
/// Immutable after creation. Adjacent wave segments may both reference the
/// same point as their shared boundary; it is never mutated through either.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FractalPoint {
    /// Position in the source series
    pub index: usize,
    pub price: f64,
    pub timestamp_ms: i64,
    pub kind: FractalKind,
    /// Local prominence relative to the window's high-low range, in [0, 1]
    pub strength: f64,
    /// Hurst exponent of the sub-series centred on this point, in [0, 1]
    pub local_hurst: f64,
    pub volume_confirmed: bool,
    pub momentum_divergent: bool,
}

impl FractalPoint {
    pub fn is_up(&self) -> bool {
        self.kind == FractalKind::Up
    }

    pub fn is_down(&self) -> bool {
        self.kind == FractalKind::Down
    }
}
