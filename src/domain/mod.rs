pub mod candle;
pub mod fractal;
pub mod wave;

pub use candle::{Candle, CandleType};
pub use fractal::{FractalKind, FractalPoint};
pub use wave::{WaveDegree, WavePosition, WaveType};
