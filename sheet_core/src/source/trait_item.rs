//! TraitItem - Advantages, disadvantages and other character traits

use crate::bonus::BonusDescriptor;
use crate::source::{HasAttacks, HasGlobalBonuses, ItemInfo};
use crate::types::{AttackEntry, AttackKind};
use serde::{Deserialize, Serialize};

/// A character trait. Traits are active unless switched off.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraitItem {
    #[serde(flatten)]
    pub info: ItemInfo,
    #[serde(default)]
    pub disabled: bool,
    /// Natural attacks (Punch, Claws, ...)
    #[serde(default)]
    pub attacks: Vec<AttackEntry>,
}

impl TraitItem {
    /// Create a new trait
    pub fn new(name: impl Into<String>) -> Self {
        TraitItem {
            info: ItemInfo::new(name),
            disabled: false,
            attacks: Vec::new(),
        }
    }

    pub fn with_bonuses(mut self, bonuses: impl Into<String>) -> Self {
        self.info.bonuses = bonuses.into();
        self
    }

    pub fn with_attack(mut self, attack: AttackEntry) -> Self {
        self.attacks.push(attack);
        self
    }

    pub fn with_user_mod(mut self, modifier: impl Into<String>) -> Self {
        self.info.user_mods.push(modifier.into());
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }
}

impl HasGlobalBonuses for TraitItem {
    fn name(&self) -> &str {
        &self.info.name
    }

    fn is_active(&self) -> bool {
        !self.disabled
    }

    fn global_bonuses(&self) -> Vec<BonusDescriptor> {
        self.info.bonuses()
    }
}

impl HasAttacks for TraitItem {
    fn attacks(&self, kind: AttackKind) -> Vec<&AttackEntry> {
        self.attacks.iter().filter(|a| a.kind == kind).collect()
    }

    fn is_ready(&self, _check_equipped_only: bool) -> bool {
        !self.disabled
    }
}
