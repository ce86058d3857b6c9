//! Spell - Spells whose bonuses apply while maintained

use crate::bonus::BonusDescriptor;
use crate::source::{HasGlobalBonuses, ItemInfo};
use serde::{Deserialize, Serialize};

/// A known spell
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Spell {
    #[serde(flatten)]
    pub info: ItemInfo,
    /// Whether the spell is currently cast and maintained
    #[serde(default)]
    pub maintained: bool,
}

impl Spell {
    pub fn new(name: impl Into<String>) -> Self {
        Spell {
            info: ItemInfo::new(name),
            maintained: false,
        }
    }

    pub fn with_bonuses(mut self, bonuses: impl Into<String>) -> Self {
        self.info.bonuses = bonuses.into();
        self
    }

    pub fn with_user_mod(mut self, modifier: impl Into<String>) -> Self {
        self.info.user_mods.push(modifier.into());
        self
    }

    pub fn maintained(mut self, maintained: bool) -> Self {
        self.maintained = maintained;
        self
    }
}

impl HasGlobalBonuses for Spell {
    fn name(&self) -> &str {
        &self.info.name
    }

    fn is_active(&self) -> bool {
        self.maintained
    }

    fn global_bonuses(&self) -> Vec<BonusDescriptor> {
        self.info.bonuses()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spell_active_while_maintained() {
        let spell = Spell::new("Armor").with_bonuses("DR+2");
        assert!(!spell.is_active());
        assert!(spell.clone().maintained(true).is_active());
        assert_eq!(spell.global_bonuses()[0].amount, 2);
    }
}
