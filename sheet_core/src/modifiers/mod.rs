//! Standing roll modifiers and the tagged resolver that pushes them onto a roll

mod reference;
mod tagged;

pub use reference::{RollAction, RollKind, RollReference};
pub use tagged::{applicable_tags, resolve_tagged_modifiers};

use crate::persistence::PersistenceError;
use crate::sheet::Character;
use crate::source::Item;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::{Mutex, PoisonError};

/// One entry on the external roll-modifier stack
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModifierStackEntry {
    pub amount: i32,
    pub description: String,
    pub tags: Vec<String>,
}

/// The external roll-modifier stack
#[async_trait]
pub trait ModifierStack: Send + Sync {
    async fn push(&self, entry: ModifierStackEntry) -> Result<(), PersistenceError>;
}

/// Modifier stack kept in memory
#[derive(Debug, Default)]
pub struct MemoryStack {
    entries: Mutex<Vec<ModifierStackEntry>>,
}

impl MemoryStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Entries pushed so far, oldest first
    pub fn entries(&self) -> Vec<ModifierStackEntry> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Sum of every pushed amount
    pub fn total(&self) -> i32 {
        self.entries().iter().map(|e| e.amount).sum()
    }
}

#[async_trait]
impl ModifierStack for MemoryStack {
    async fn push(&self, entry: ModifierStackEntry) -> Result<(), PersistenceError> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(entry);
        Ok(())
    }
}

/// Read-only view of the entities the acting user currently targets
pub trait TargetingSource {
    /// The target-situational modifiers of every targeted entity
    fn target_modifiers(&self) -> Vec<String>;
}

/// Nothing targeted
#[derive(Debug, Clone, Copy, Default)]
pub struct NoTargets;

impl TargetingSource for NoTargets {
    fn target_modifiers(&self) -> Vec<String> {
        Vec::new()
    }
}

impl TargetingSource for [&Character] {
    fn target_modifiers(&self) -> Vec<String> {
        self.iter()
            .flat_map(|c| c.conditions.target_mods.iter().cloned())
            .collect()
    }
}

impl TargetingSource for Vec<&Character> {
    fn target_modifiers(&self) -> Vec<String> {
        self.as_slice().target_modifiers()
    }
}

/// Where a standing modifier came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModifierOrigin {
    Item,
    SelfMod,
    Target,
}

/// A standing free-text modifier gathered for one roll
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StandingModifier {
    pub text: String,
    pub origin: ModifierOrigin,
    /// Set for user modifiers entered on an item
    pub item_path: Option<String>,
}

/// Per-item user modifiers, rebuilt from the items each time they are needed
pub fn collect_user_modifiers(items: &[Item]) -> Vec<StandingModifier> {
    items
        .iter()
        .flat_map(|item| {
            let info = item.info();
            info.user_mods.iter().map(move |text| StandingModifier {
                text: text.clone(),
                origin: ModifierOrigin::Item,
                item_path: Some(info.path.clone()),
            })
        })
        .collect()
}

/// Every standing modifier relevant to a roll by `character`: item user
/// modifiers, the character's own situational modifiers, then those of
/// whatever it targets.
pub fn collect_standing_modifiers<T: TargetingSource + ?Sized>(
    character: &Character,
    targets: &T,
) -> Vec<StandingModifier> {
    let own = character
        .conditions
        .self_mods
        .iter()
        .cloned()
        .map(|text| (text, ModifierOrigin::SelfMod));
    let targeted = targets
        .target_modifiers()
        .into_iter()
        .map(|text| (text, ModifierOrigin::Target));

    let mut modifiers = collect_user_modifiers(&character.items);
    modifiers.extend(own.chain(targeted).map(|(text, origin)| StandingModifier {
        text,
        origin,
        item_path: None,
    }));
    modifiers
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::{Equipment, TraitItem};

    #[test]
    fn test_user_modifiers_carry_item_path() {
        let items: Vec<Item> = vec![
            Equipment::new("Long Bow", 3.0)
                .with_user_mod("+1 Elven make #ranged")
                .into(),
            TraitItem::new("Klutz").into(),
        ];
        let mods = collect_user_modifiers(&items);
        assert_eq!(mods.len(), 1);
        assert_eq!(mods[0].item_path.as_deref(), Some("long_bow"));
        assert_eq!(mods[0].origin, ModifierOrigin::Item);
    }

    #[test]
    fn test_standing_modifiers_from_all_sources() {
        let mut actor = Character::new("a", "Archer")
            .with_item(Equipment::new("Long Bow", 3.0).with_user_mod("+1 Elven make #ranged"));
        actor.conditions.self_mods.push("-2 Shaken #allRolls".to_string());

        let mut target = Character::new("t", "Goblin");
        target.conditions.target_mods.push("+1 Prone target #attack".to_string());

        let mods = collect_standing_modifiers(&actor, &vec![&target]);
        let origins: Vec<_> = mods.iter().map(|m| m.origin).collect();
        assert_eq!(
            origins,
            vec![ModifierOrigin::Item, ModifierOrigin::SelfMod, ModifierOrigin::Target]
        );

        // Nothing accumulates between calls
        assert_eq!(collect_standing_modifiers(&actor, &NoTargets).len(), 2);
    }
}
