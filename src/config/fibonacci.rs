//! Fibonacci and harmonic ratio constants used throughout the pipeline.

/// Named ratio table: standard retracements, standard extensions, and the
/// advanced harmonic relationships.
pub const FIBONACCI_RATIOS: &[(&str, f64)] = &[
    // Standard retracements
    ("retracement_23_6", 0.236),
    ("retracement_38_2", 0.382),
    ("retracement_50_0", 0.500),
    ("retracement_61_8", 0.618),
    ("retracement_78_6", 0.786),
    // Standard extensions
    ("extension_127_2", 1.272),
    ("extension_161_8", 1.618),
    ("extension_200_0", 2.000),
    ("extension_261_8", 2.618),
    ("extension_314_0", 3.140),
    ("extension_423_6", 4.236),
    // Advanced harmonic ratios
    ("harmonic_88_6", 0.886),
    ("harmonic_113_0", 1.130),
    ("harmonic_141_4", 1.414),
    ("harmonic_224_0", 2.240),
    ("harmonic_354_0", 3.540),
];

pub const GOLDEN_RATIO: f64 = 1.618;

/// Forward projection ratios with their assigned probabilities, nearest first.
pub const TARGET_PROJECTION_RATIOS: &[(f64, f64)] = &[
    (1.0, 0.80),
    (1.272, 0.65),
    (1.618, 0.50),
    (2.618, 0.35),
];

pub fn is_retracement(name: &str) -> bool {
    name.starts_with("retracement")
}

pub fn is_extension(name: &str) -> bool {
    name.starts_with("extension")
}

pub fn is_harmonic(name: &str) -> bool {
    name.starts_with("harmonic")
}
