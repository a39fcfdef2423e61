//! Fibonacci levels, probability-weighted support/resistance zones, forward
//! price targets and the trading signal.

use std::collections::HashMap;

use crate::config::{FIBONACCI_RATIOS, TARGET_PROJECTION_RATIOS, is_extension, is_retracement};
use crate::domain::wave::{WavePosition, WaveType};
use crate::models::{PriceTarget, ProbabilityZone, Signal, WaveSegment};

/// Support and resistance zones split around the current price.
#[derive(Debug, Default, Clone)]
pub struct ZoneSet {
    pub support: HashMap<String, ProbabilityZone>,
    pub resistance: HashMap<String, ProbabilityZone>,
}

/// Fibonacci retracement and extension levels over the extremes of all
/// segment endpoints. Retracements measure down from the high; extensions
/// project past both ends, keyed `_up` and `_down`.
pub fn fibonacci_levels(segments: &[WaveSegment]) -> HashMap<String, f64> {
    let mut levels = HashMap::new();
    if segments.is_empty() {
        return levels;
    }

    let mut price_high = f64::NEG_INFINITY;
    let mut price_low = f64::INFINITY;
    for segment in segments {
        for price in [segment.start.price, segment.end.price] {
            price_high = price_high.max(price);
            price_low = price_low.min(price);
        }
    }

    let price_range = price_high - price_low;
    if price_range <= 0.0 {
        return levels;
    }

    for &(name, ratio) in FIBONACCI_RATIOS {
        if is_retracement(name) {
            levels.insert(name.to_string(), price_high - price_range * ratio);
        } else if is_extension(name) {
            levels.insert(format!("{name}_up"), price_high + price_range * (ratio - 1.0));
            levels.insert(format!("{name}_down"), price_low - price_range * (ratio - 1.0));
        }
    }

    levels
}

/// Sort the Fibonacci levels into support (below current price) and
/// resistance (above) zones, each weighted by momentum alignment.
pub fn probability_zones(
    segments: &[WaveSegment],
    levels: &HashMap<String, f64>,
) -> ZoneSet {
    let mut zones = ZoneSet::default();
    let Some(last) = segments.last() else {
        return zones;
    };
    let current_price = last.end.price;

    for (name, &level_price) in levels {
        if level_price == current_price {
            continue;
        }
        let probability = level_probability(level_price, last);
        let zone = ProbabilityZone {
            price: level_price,
            probability,
            strength: (probability * 1.2).min(1.0),
        };
        if level_price < current_price {
            zones.support.insert(name.clone(), zone);
        } else {
            zones.resistance.insert(name.clone(), zone);
        }
    }

    zones
}

/// Probability of price reaching a level: base 0.5, pushed up when the last
/// segment's momentum points toward it and down when it points away.
/// Always within [0.1, 0.9].
fn level_probability(level_price: f64, last: &WaveSegment) -> f64 {
    let momentum_factor = (last.momentum.abs() / 0.1).min(1.0);
    let current_price = last.end.price;

    let toward_level = (level_price > current_price && last.slope > 0.0)
        || (level_price < current_price && last.slope < 0.0);

    let probability = if toward_level {
        0.5 + momentum_factor * 0.3
    } else {
        0.5 - momentum_factor * 0.2
    };

    probability.clamp(0.1, 0.9)
}

/// Forward projections of the second-to-last segment length from the current
/// price, in the direction of the last segment. Needs at least two segments.
pub fn target_levels(segments: &[WaveSegment]) -> HashMap<String, PriceTarget> {
    let mut targets = HashMap::new();
    if segments.len() < 2 {
        return targets;
    }

    let last = &segments[segments.len() - 1];
    let prev = &segments[segments.len() - 2];
    let current_price = last.end.price;
    let direction = if last.slope > 0.0 { 1.0 } else { -1.0 };

    for (i, &(ratio, probability)) in TARGET_PROJECTION_RATIOS.iter().enumerate() {
        targets.insert(
            format!("target_{}", i + 1),
            PriceTarget {
                price: current_price + prev.length * ratio * direction,
                probability,
                ratio,
            },
        );
    }

    targets
}

/// Fallback zones when the series carries no usable range: conventional
/// bands around the current price so downstream consumers always see levels.
pub fn degenerate_zones(current_price: f64) -> ZoneSet {
    let mut zones = ZoneSet::default();
    for (key, offset) in [("support_near", -0.2), ("support_far", -0.5)] {
        zones.support.insert(
            key.to_string(),
            ProbabilityZone {
                price: current_price * (1.0 + offset),
                probability: 0.5,
                strength: 0.6,
            },
        );
    }
    for (key, offset) in [("resistance_near", 0.2), ("resistance_far", 0.5)] {
        zones.resistance.insert(
            key.to_string(),
            ProbabilityZone {
                price: current_price * (1.0 + offset),
                probability: 0.5,
                strength: 0.6,
            },
        );
    }
    zones
}

/// Signal from the wave count: motive impulse waves and the end of a
/// correction are long opportunities, corrections within an impulse short.
pub fn generate_signal(wave_type: WaveType, position: WavePosition) -> Signal {
    match wave_type {
        WaveType::Impulse => match position {
            WavePosition::Wave1 | WavePosition::Wave3 | WavePosition::Wave5 => Signal::Buy,
            WavePosition::Wave2 | WavePosition::Wave4 => Signal::Sell,
            _ => Signal::Hold,
        },
        WaveType::Unknown => Signal::Hold,
        _ => {
            if position == WavePosition::WaveC {
                Signal::Buy
            } else {
                Signal::Sell
            }
        }
    }
}

/// Composite strength in [0, 1]: confidence, final-segment momentum, pattern
/// clarity and Fibonacci alignment.
pub fn signal_strength(segments: &[WaveSegment], wave_type: WaveType, confidence: f64) -> f64 {
    if segments.is_empty() {
        return 0.0;
    }

    let mut strength = confidence * 0.4;

    if let Some(last) = segments.last() {
        strength += (last.momentum.abs() / 0.1).min(1.0) * 0.3;
    }

    strength += match wave_type {
        WaveType::Impulse | WaveType::Zigzag => 0.2,
        WaveType::Unknown => 0.0,
        _ => 0.1,
    };

    let fib_density = segments.iter().map(|seg| seg.fibonacci_matches.len()).sum::<usize>() as f64
        / segments.len() as f64;
    strength += (fib_density * 0.02).min(0.1);

    strength.min(1.0)
}
