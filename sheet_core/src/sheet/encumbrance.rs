//! EncumbranceCalculator - load tiers and their move/dodge/sprint

use serde::{Deserialize, Serialize};

/// Load multiples of basic lift for each tier
pub const TIER_MULTIPLIERS: [f64; 5] = [1.0, 2.0, 3.0, 6.0, 10.0];

/// Tier display names
pub const TIER_NAMES: [&str; 5] = ["None", "Light", "Medium", "Heavy", "X-Heavy"];

/// One encumbrance tier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EncumbranceLevel {
    /// Tier index, 0-4
    pub level: usize,
    pub name: String,
    /// Maximum carried weight for this tier
    pub weight: f64,
    #[serde(rename = "move")]
    pub move_: i32,
    pub dodge: i32,
    pub sprint: f64,
    pub current: bool,
}

/// How the current tier is chosen
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TierSelection {
    /// First tier whose threshold covers the carried weight
    Automatic { carried_weight: f64 },
    /// Explicitly stored tier index
    Manual(usize),
}

/// Everything the calculator reads
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EncumbranceInput {
    pub st: i32,
    pub basic_move: i32,
    pub basic_dodge: i32,
    pub reeling: bool,
    pub exhausted: bool,
    pub selection: TierSelection,
}

/// Basic lift: `round(ST² / 5)`
pub fn basic_lift(st: i32) -> f64 {
    (f64::from(st) * f64::from(st) / 5.0).round()
}

fn half_up(value: i32) -> i32 {
    (f64::from(value) / 2.0).ceil() as i32
}

/// Index of the current tier. Loads beyond the last threshold stay in the last tier.
pub fn select_tier(thresholds: &[f64], selection: TierSelection) -> usize {
    let last = thresholds.len().saturating_sub(1);
    match selection {
        TierSelection::Automatic { carried_weight } => thresholds
            .iter()
            .position(|&t| t >= carried_weight)
            .unwrap_or(last),
        TierSelection::Manual(index) => index.min(last),
    }
}

/// Build the full tier list. The list is always built from scratch so that
/// exactly one tier is current.
pub fn calculate_encumbrance(input: &EncumbranceInput) -> Vec<EncumbranceLevel> {
    let lift = basic_lift(input.st);
    let thresholds: Vec<f64> = TIER_MULTIPLIERS.iter().map(|m| lift * m).collect();
    let current = select_tier(&thresholds, input.selection);

    thresholds
        .iter()
        .enumerate()
        .map(|(i, &weight)| {
            let step = i as i32;
            let mut move_ = (input.basic_move * (5 - step)).div_euclid(5).max(1);
            let mut dodge = (input.basic_dodge - step).max(1);
            let mut sprint = (f64::from(move_) * 1.2).max(1.0);

            for halved in [input.reeling, input.exhausted] {
                if halved {
                    move_ = half_up(move_);
                    dodge = half_up(dodge);
                    sprint = (sprint / 2.0).ceil();
                }
            }

            EncumbranceLevel {
                level: i,
                name: TIER_NAMES[i].to_string(),
                weight,
                move_,
                dodge,
                sprint,
                current: i == current,
            }
        })
        .collect()
}
