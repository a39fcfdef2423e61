//! Wave pattern classification: scores the segment sequence against impulse
//! and corrective templates, assigns positions and degree, and derives the
//! personality profile of the current wave.

use std::collections::HashMap;

use crate::config::GOLDEN_RATIO;
use crate::domain::wave::{WaveDegree, WavePosition, WaveType};
use crate::models::WaveSegment;
use crate::utils::maths_utils::{mean, population_std};

const MIN_SEGMENTS_FOR_IMPULSE: usize = 5;
const MIN_SEGMENTS_FOR_CORRECTIVE: usize = 3;

/// Outcome of one classification pass over a segment sequence.
#[derive(Debug, Clone)]
pub struct Classification {
    pub wave_type: WaveType,
    pub current_position: WavePosition,
    pub degree: WaveDegree,
    pub confidence: f64,
    pub personality: HashMap<String, f64>,
}

/// Classify the segment sequence and annotate the segments in place with
/// their positions and the shared degree.
pub fn classify_pattern(segments: &mut [WaveSegment], closes: &[f64]) -> Classification {
    let (wave_type, current_position) = identify_primary_pattern(segments);
    let degree = determine_wave_degree(segments, closes);

    let confidence = if wave_type == WaveType::Unknown && !segments.is_empty() {
        // Neither template fits; low fixed confidence instead of the additive
        // formula, which would reward strong fractals on a shapeless sequence.
        0.2
    } else {
        pattern_confidence(segments, wave_type)
    };

    annotate_segments(segments, wave_type, degree);
    let personality = wave_personality(current_position, segments);

    Classification {
        wave_type,
        current_position,
        degree,
        confidence,
        personality,
    }
}

/// Pick the better-fitting template. Both scores zero means neither the
/// 5-wave nor the 3-wave shape is present.
fn identify_primary_pattern(segments: &[WaveSegment]) -> (WaveType, WavePosition) {
    if segments.is_empty() {
        return (WaveType::Unknown, WavePosition::Unknown);
    }

    let impulse = impulse_pattern_score(segments);
    let corrective = corrective_pattern_score(segments);

    if impulse == 0.0 && corrective == 0.0 {
        return (WaveType::Unknown, WavePosition::Unknown);
    }

    if impulse > corrective {
        (WaveType::Impulse, impulse_position(segments))
    } else {
        (classify_corrective_type(segments), corrective_position(segments))
    }
}

/// Fit against the 5-wave impulse template, in [0, 1].
fn impulse_pattern_score(segments: &[WaveSegment]) -> f64 {
    if segments.len() < MIN_SEGMENTS_FOR_IMPULSE {
        return 0.0;
    }

    let mut score = 0.0;

    // Wave 3 may never be the shortest; longest of the five scores best.
    let wave_3_length = segments[2].length;
    if segments[..MIN_SEGMENTS_FOR_IMPULSE]
        .iter()
        .all(|seg| seg.length <= wave_3_length)
    {
        score += 0.3;
    }

    // Wave 4 must not cross back past the end of wave 1.
    let wave_1 = &segments[0];
    let wave_4_end = segments[3].end.price;
    let no_overlap = if wave_1.is_upward() {
        wave_4_end > wave_1.end.price
    } else {
        wave_4_end < wave_1.end.price
    };
    if no_overlap {
        score += 0.2;
    }

    let fib_density = segments.iter().map(|seg| seg.fibonacci_matches.len()).sum::<usize>() as f64
        / segments.len() as f64;
    score += (fib_density * 0.1).min(0.3);

    score.min(1.0)
}

/// Fit against the A-B-C corrective template, in [0, 1].
fn corrective_pattern_score(segments: &[WaveSegment]) -> f64 {
    if segments.len() < MIN_SEGMENTS_FOR_CORRECTIVE {
        return 0.0;
    }

    let wave_a = &segments[0];
    let wave_b = &segments[1];
    let wave_c = &segments[2];

    let mut score = 0.0;

    // C tends toward equality with A.
    let longer = wave_a.length.max(wave_c.length);
    if longer > 0.0 {
        score += (wave_a.length.min(wave_c.length) / longer) * 0.4;
    }

    // B is a partial retracement of A.
    if wave_b.length < wave_a.length {
        score += 0.3;
    }

    score.min(1.0)
}

/// Zigzag: A and C share direction and B is the shallower move. Flat: B
/// nearly equals A. Anything else stays generic corrective.
fn classify_corrective_type(segments: &[WaveSegment]) -> WaveType {
    if segments.len() < MIN_SEGMENTS_FOR_CORRECTIVE {
        return WaveType::Corrective;
    }

    let wave_a = &segments[0];
    let wave_b = &segments[1];
    let wave_c = &segments[2];

    if wave_a.slope * wave_c.slope > 0.0 && wave_b.slope.abs() < wave_a.slope.abs() {
        return WaveType::Zigzag;
    }

    if wave_a.length > 0.0 && (wave_b.length / wave_a.length - 1.0).abs() < 0.3 {
        return WaveType::Flat;
    }

    WaveType::Corrective
}

fn impulse_position(segments: &[WaveSegment]) -> WavePosition {
    match segments.len() {
        0 | 1 => WavePosition::Wave1,
        2 => WavePosition::Wave2,
        3 => WavePosition::Wave3,
        4 => WavePosition::Wave4,
        _ => WavePosition::Wave5,
    }
}

fn corrective_position(segments: &[WaveSegment]) -> WavePosition {
    match segments.len() {
        0 | 1 => WavePosition::WaveA,
        2 => WavePosition::WaveB,
        _ => WavePosition::WaveC,
    }
}

/// Degree from average segment duration and relative price volatility.
pub fn determine_wave_degree(segments: &[WaveSegment], closes: &[f64]) -> WaveDegree {
    if segments.is_empty() {
        return WaveDegree::Minor;
    }

    let avg_duration =
        segments.iter().map(|seg| seg.duration).sum::<usize>() as f64 / segments.len() as f64;

    let volatility = if closes.len() > 1 {
        let avg_close = mean(closes);
        if avg_close != 0.0 {
            population_std(closes) / avg_close
        } else {
            0.0
        }
    } else {
        0.0
    };

    if avg_duration > 100.0 && volatility > 0.1 {
        WaveDegree::Primary
    } else if avg_duration > 50.0 && volatility > 0.05 {
        WaveDegree::Intermediate
    } else if avg_duration > 20.0 {
        WaveDegree::Minor
    } else {
        WaveDegree::Minute
    }
}

/// Additive confidence: Fibonacci evidence, fractal strength, volume
/// confirmation, and a flat bonus for a recognized type. Clamped to [0, 1].
pub fn pattern_confidence(segments: &[WaveSegment], wave_type: WaveType) -> f64 {
    if segments.is_empty() {
        return 0.0;
    }

    let mut confidence = 0.0;

    let fib_count: usize = segments.iter().map(|seg| seg.fibonacci_matches.len()).sum();
    confidence += (fib_count as f64 * 0.05).min(0.3);

    let avg_strength = segments
        .iter()
        .map(|seg| seg.endpoint_strength())
        .sum::<f64>()
        / segments.len() as f64;
    confidence += avg_strength * 0.3;

    let volume_confirmed = segments
        .iter()
        .filter(|seg| seg.has_volume_confirmation())
        .count();
    confidence += (volume_confirmed as f64 / segments.len() as f64) * 0.2;

    if wave_type != WaveType::Unknown {
        confidence += 0.2;
    }

    confidence.min(1.0)
}

/// Stamp positions onto the segments by their place in the count and apply
/// the shared degree. Unknown sequences keep their placeholders.
fn annotate_segments(segments: &mut [WaveSegment], wave_type: WaveType, degree: WaveDegree) {
    const IMPULSE_CYCLE: [WavePosition; 5] = [
        WavePosition::Wave1,
        WavePosition::Wave2,
        WavePosition::Wave3,
        WavePosition::Wave4,
        WavePosition::Wave5,
    ];
    const CORRECTIVE_CYCLE: [WavePosition; 3] =
        [WavePosition::WaveA, WavePosition::WaveB, WavePosition::WaveC];

    for (i, segment) in segments.iter_mut().enumerate() {
        segment.degree = degree;

        match wave_type {
            WaveType::Impulse => {
                segment.wave_position = IMPULSE_CYCLE[i % 5];
                segment.wave_type = if i % 2 == 0 {
                    WaveType::Impulse
                } else {
                    WaveType::Corrective
                };
            }
            WaveType::Unknown => {}
            corrective => {
                segment.wave_position = CORRECTIVE_CYCLE[i % 3];
                segment.wave_type = corrective;
            }
        }
    }
}

/// Personality profile for the current position, scaled by the observed
/// momentum of the final segment and boosted when it runs to a golden-ratio
/// extension of the preceding average.
fn wave_personality(position: WavePosition, segments: &[WaveSegment]) -> HashMap<String, f64> {
    let base: &[(&str, f64)] = match position {
        WavePosition::Wave1 => &[("impulsive", 0.7), ("corrective", 0.3), ("extension_probability", 0.2)],
        WavePosition::Wave2 => &[("sharp", 0.6), ("sideways", 0.4), ("deep_retracement", 0.8)],
        WavePosition::Wave3 => &[("impulsive", 0.9), ("extended", 0.6), ("strongest", 0.8)],
        WavePosition::Wave4 => &[("complex", 0.7), ("sideways", 0.8), ("alternation", 0.9)],
        WavePosition::Wave5 => &[("impulsive", 0.6), ("extension_probability", 0.3), ("divergence", 0.4)],
        WavePosition::WaveA => &[("corrective", 0.8), ("three_wave", 0.6), ("five_wave", 0.4)],
        WavePosition::WaveB => &[("corrective", 0.9), ("irregular", 0.5), ("complex", 0.6)],
        WavePosition::WaveC => &[("impulsive", 0.7), ("five_wave", 0.8), ("completion", 0.8)],
        _ => &[],
    };

    let mut personality: HashMap<String, f64> =
        base.iter().map(|&(name, score)| (name.to_string(), score)).collect();

    let Some(last) = segments.last() else {
        return personality;
    };

    if let Some(impulsive) = personality.get_mut("impulsive") {
        *impulsive *= (last.momentum.abs() / 0.1).min(1.0);
    }

    if segments.len() > 1
        && let Some(extension) = personality.get_mut("extension_probability")
    {
        let prior = &segments[..segments.len() - 1];
        let avg_length = prior.iter().map(|seg| seg.length).sum::<f64>() / prior.len() as f64;
        if last.length > avg_length * GOLDEN_RATIO {
            *extension = (*extension * 1.5).min(1.0);
        }
    }

    personality
}
