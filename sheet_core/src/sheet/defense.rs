//! DefenseAggregator - defense bonuses and best equipped parry/block

use crate::bonus::{grammar, BonusDescriptor};
use crate::source::HasAttacks;
use crate::types::AttackKind;
use serde::{Deserialize, Serialize};

/// Defense totals for one pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DefenseTotals {
    pub parry_bonus: i32,
    pub block_bonus: i32,
    pub dodge_bonus: i32,
    /// Best parry among ready melee attacks
    pub equipped_parry: Option<i32>,
    /// Best block among ready melee attacks
    pub equipped_block: Option<i32>,
}

impl DefenseTotals {
    /// Best parry including the defense bonus
    pub fn parry(&self) -> Option<i32> {
        self.equipped_parry.map(|p| p + self.parry_bonus)
    }

    /// Best block including the defense bonus
    pub fn block(&self) -> Option<i32> {
        self.equipped_block.map(|b| b + self.block_bonus)
    }
}

/// Sum every `[+N DB]` tag across the bonus texts. One tag counts toward
/// parry, block and dodge alike.
pub fn defense_bonus(bonuses: &[BonusDescriptor]) -> i32 {
    bonuses
        .iter()
        .flat_map(|b| grammar::defense(&b.text))
        .sum()
}

/// Aggregate defense bonuses and the best ready parry/block scores.
/// Unparsable scores ("No", "-") are left out rather than counted as zero.
pub fn aggregate_defenses<I: HasAttacks>(
    bonuses: &[BonusDescriptor],
    items: &[I],
    check_equipped_only: bool,
) -> DefenseTotals {
    let bonus = defense_bonus(bonuses);

    let melee: Vec<_> = items
        .iter()
        .filter(|item| item.is_ready(check_equipped_only))
        .flat_map(|item| item.attacks(AttackKind::Melee))
        .collect();

    DefenseTotals {
        parry_bonus: bonus,
        block_bonus: bonus,
        dodge_bonus: bonus,
        equipped_parry: melee.iter().filter_map(|a| a.parry_score()).max(),
        equipped_block: melee.iter().filter_map(|a| a.block_score()).max(),
    }
}
