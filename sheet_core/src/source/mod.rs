//! Item sources - the things attached to a character that grant bonuses

mod equipment;
mod spell;
mod trait_item;

pub use equipment::Equipment;
pub use spell::Spell;
pub use trait_item::TraitItem;

use crate::bonus::BonusDescriptor;
use crate::types::{AttackEntry, AttackKind};
use serde::{Deserialize, Serialize};

/// Anything that can contribute bonuses to a character
pub trait HasGlobalBonuses {
    /// Display name, used as the bonus source
    fn name(&self) -> &str;

    /// Whether the item currently grants its bonuses
    fn is_active(&self) -> bool;

    /// The bonuses this item grants, in declaration order
    fn global_bonuses(&self) -> Vec<BonusDescriptor>;
}

/// Items that carry attack entries
pub trait HasAttacks {
    /// Attacks of the given kind
    fn attacks(&self, kind: AttackKind) -> Vec<&AttackEntry>;

    /// Whether the attacks are usable right now. With `check_equipped_only`
    /// unset, carried gear counts as ready.
    fn is_ready(&self, check_equipped_only: bool) -> bool;
}

/// Fields every item kind shares
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ItemInfo {
    pub name: String,
    /// Stable path identifying the item inside the character document
    #[serde(default)]
    pub path: String,
    /// Multi-line bonus text, one bonus per line
    #[serde(default)]
    pub bonuses: String,
    /// User-entered standing roll modifiers scoped to this item
    #[serde(default)]
    pub user_mods: Vec<String>,
}

impl ItemInfo {
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        ItemInfo {
            path: name.to_lowercase().replace(' ', "_"),
            name,
            bonuses: String::new(),
            user_mods: Vec::new(),
        }
    }

    fn bonuses(&self) -> Vec<BonusDescriptor> {
        BonusDescriptor::parse_block(&self.name, &self.bonuses)
    }
}

/// Every item kind a character can hold
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "type")]
pub enum Item {
    Trait(TraitItem),
    Equipment(Equipment),
    Spell(Spell),
}

impl Item {
    /// Shared item fields
    pub fn info(&self) -> &ItemInfo {
        match self {
            Item::Trait(item) => &item.info,
            Item::Equipment(item) => &item.info,
            Item::Spell(item) => &item.info,
        }
    }

    /// Equipment view of this item, if it is equipment
    pub fn as_equipment(&self) -> Option<&Equipment> {
        match self {
            Item::Equipment(item) => Some(item),
            _ => None,
        }
    }
}

impl HasGlobalBonuses for Item {
    fn name(&self) -> &str {
        &self.info().name
    }

    fn is_active(&self) -> bool {
        match self {
            Item::Trait(item) => item.is_active(),
            Item::Equipment(item) => item.is_active(),
            Item::Spell(item) => item.is_active(),
        }
    }

    fn global_bonuses(&self) -> Vec<BonusDescriptor> {
        match self {
            Item::Trait(item) => item.global_bonuses(),
            Item::Equipment(item) => item.global_bonuses(),
            Item::Spell(item) => item.global_bonuses(),
        }
    }
}

impl HasAttacks for Item {
    fn attacks(&self, kind: AttackKind) -> Vec<&AttackEntry> {
        match self {
            Item::Trait(item) => item.attacks(kind),
            Item::Equipment(item) => item.attacks(kind),
            Item::Spell(_) => Vec::new(),
        }
    }

    fn is_ready(&self, check_equipped_only: bool) -> bool {
        match self {
            Item::Trait(item) => item.is_ready(check_equipped_only),
            Item::Equipment(item) => item.is_ready(check_equipped_only),
            Item::Spell(_) => false,
        }
    }
}

impl From<TraitItem> for Item {
    fn from(item: TraitItem) -> Self {
        Item::Trait(item)
    }
}

impl From<Equipment> for Item {
    fn from(item: Equipment) -> Self {
        Item::Equipment(item)
    }
}

impl From<Spell> for Item {
    fn from(item: Spell) -> Self {
        Item::Spell(item)
    }
}
