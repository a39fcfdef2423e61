use serde::{Deserialize, Serialize};
use std::fmt;

/// Elliott Wave structure types.
#[derive(
    Copy, Clone, PartialEq, Eq, Hash, Default, Debug, Serialize, Deserialize, strum_macros::EnumIter,
)]
pub enum WaveType {
    Impulse,
    Corrective,
    Diagonal,
    Triangle,
    Flat,
    Zigzag,
    Complex,
    #[default]
    Unknown,
}

impl WaveType {
    /// True for any member of the corrective family (A-B-C structures).
    pub fn is_corrective_family(&self) -> bool {
        matches!(
            self,
            WaveType::Corrective
                | WaveType::Triangle
                | WaveType::Flat
                | WaveType::Zigzag
                | WaveType::Complex
        )
    }
}

impl fmt::Display for WaveType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            WaveType::Impulse => "impulse",
            WaveType::Corrective => "corrective",
            WaveType::Diagonal => "diagonal",
            WaveType::Triangle => "triangle",
            WaveType::Flat => "flat",
            WaveType::Zigzag => "zigzag",
            WaveType::Complex => "complex",
            WaveType::Unknown => "unknown",
        };
        write!(f, "{}", name)
    }
}

/// Position within a wave cycle: 1-5 for impulses, A-E for corrections.
#[derive(
    Copy, Clone, PartialEq, Eq, Hash, Default, Debug, Serialize, Deserialize, strum_macros::EnumIter,
)]
pub enum WavePosition {
    Wave1,
    Wave2,
    Wave3,
    Wave4,
    Wave5,
    WaveA,
    WaveB,
    WaveC,
    WaveD,
    WaveE,
    #[default]
    Unknown,
}

impl WavePosition {
    pub fn is_motive(&self) -> bool {
        matches!(
            self,
            WavePosition::Wave1 | WavePosition::Wave3 | WavePosition::Wave5
        )
    }

    pub fn is_impulse_correction(&self) -> bool {
        matches!(self, WavePosition::Wave2 | WavePosition::Wave4)
    }
}

impl fmt::Display for WavePosition {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            WavePosition::Wave1 => "wave_1",
            WavePosition::Wave2 => "wave_2",
            WavePosition::Wave3 => "wave_3",
            WavePosition::Wave4 => "wave_4",
            WavePosition::Wave5 => "wave_5",
            WavePosition::WaveA => "wave_a",
            WavePosition::WaveB => "wave_b",
            WavePosition::WaveC => "wave_c",
            WavePosition::WaveD => "wave_d",
            WavePosition::WaveE => "wave_e",
            WavePosition::Unknown => "unknown",
        };
        write!(f, "{}", name)
    }
}

/// Relative time/price scale of a wave structure, largest first.
#[derive(
    Copy,
    Clone,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Default,
    Debug,
    Serialize,
    Deserialize,
    strum_macros::EnumIter,
)]
pub enum WaveDegree {
    Supercycle,
    Cycle,
    Primary,
    Intermediate,
    #[default]
    Minor,
    Minute,
    Minuette,
    Subminuette,
}

impl fmt::Display for WaveDegree {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            WaveDegree::Supercycle => "supercycle",
            WaveDegree::Cycle => "cycle",
            WaveDegree::Primary => "primary",
            WaveDegree::Intermediate => "intermediate",
            WaveDegree::Minor => "minor",
            WaveDegree::Minute => "minute",
            WaveDegree::Minuette => "minuette",
            WaveDegree::Subminuette => "subminuette",
        };
        write!(f, "{}", name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_corrective_family() {
        assert!(WaveType::Zigzag.is_corrective_family());
        assert!(WaveType::Flat.is_corrective_family());
        assert!(!WaveType::Impulse.is_corrective_family());
        assert!(!WaveType::Unknown.is_corrective_family());
    }

    #[test]
    fn test_position_parity_helpers() {
        assert!(WavePosition::Wave3.is_motive());
        assert!(WavePosition::Wave4.is_impulse_correction());
        assert!(!WavePosition::WaveC.is_motive());
    }

    #[test]
    fn test_display_names() {
        assert_eq!(WaveType::Impulse.to_string(), "impulse");
        assert_eq!(WavePosition::WaveC.to_string(), "wave_c");
        assert_eq!(WaveDegree::Minuette.to_string(), "minuette");
    }
}
