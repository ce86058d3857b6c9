//! Equipment - Carried and equipped gear

use crate::bonus::BonusDescriptor;
use crate::source::{HasAttacks, HasGlobalBonuses, ItemInfo};
use crate::types::{AttackEntry, AttackKind};
use serde::{Deserialize, Serialize};

/// A piece of gear. Bonuses only apply while it is carried and equipped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Equipment {
    #[serde(flatten)]
    pub info: ItemInfo,
    /// Weight of a single unit
    pub weight: f64,
    #[serde(default = "default_count")]
    pub count: u32,
    #[serde(default = "default_carried")]
    pub carried: bool,
    #[serde(default)]
    pub equipped: bool,
    #[serde(default)]
    pub attacks: Vec<AttackEntry>,
}

fn default_count() -> u32 {
    1
}

fn default_carried() -> bool {
    true
}

impl Equipment {
    /// Create a new carried, unequipped item
    pub fn new(name: impl Into<String>, weight: f64) -> Self {
        Equipment {
            info: ItemInfo::new(name),
            weight,
            count: 1,
            carried: true,
            equipped: false,
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

    pub fn with_count(mut self, count: u32) -> Self {
        self.count = count;
        self
    }

    pub fn equipped(mut self, equipped: bool) -> Self {
        self.equipped = equipped;
        self
    }

    pub fn carried(mut self, carried: bool) -> Self {
        self.carried = carried;
        self
    }

    /// Weight this entry adds to the carried load
    pub fn carried_weight(&self) -> f64 {
        if self.carried {
            self.weight * self.count as f64
        } else {
            0.0
        }
    }
}

impl HasGlobalBonuses for Equipment {
    fn name(&self) -> &str {
        &self.info.name
    }

    fn is_active(&self) -> bool {
        self.carried && self.equipped
    }

    fn global_bonuses(&self) -> Vec<BonusDescriptor> {
        self.info.bonuses()
    }
}

impl HasAttacks for Equipment {
    fn attacks(&self, kind: AttackKind) -> Vec<&AttackEntry> {
        self.attacks.iter().filter(|a| a.kind == kind).collect()
    }

    fn is_ready(&self, check_equipped_only: bool) -> bool {
        if check_equipped_only {
            self.is_active()
        } else {
            self.carried
        }
    }
}
