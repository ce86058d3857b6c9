//! Roll references - what a roll is for, and which tag groups it draws on

use crate::config::TagGroup;
use crate::types::keys;
use serde::{Deserialize, Serialize};

/// Kind of roll being made
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RollKind {
    /// Any attack, melee or ranged
    Attack,
    MeleeAttack,
    RangedAttack,
    Parry,
    Block,
    Dodge,
    Damage,
    Skill,
    Spell,
    Attribute,
    /// Anything else, such as a plain numeric check
    Check,
}

impl RollKind {
    /// Tag groups consulted for this kind of roll, besides `AllRolls`
    pub fn tag_groups(self) -> &'static [TagGroup] {
        use TagGroup as G;
        match self {
            RollKind::Attack => &[G::Attack],
            RollKind::MeleeAttack => &[G::Attack, G::MeleeAttack],
            RollKind::RangedAttack => &[G::Attack, G::RangedAttack],
            RollKind::Parry => &[G::Defense, G::Parry],
            RollKind::Block => &[G::Defense, G::Block],
            RollKind::Dodge => &[G::Defense, G::Dodge],
            RollKind::Damage => &[G::Damage],
            RollKind::Skill => &[G::Skill],
            RollKind::Spell => &[G::Spell],
            RollKind::Attribute => &[G::Attribute],
            RollKind::Check => &[G::Check],
        }
    }
}

/// A structured roll request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollAction {
    pub kind: RollKind,
    /// Item, skill or attribute name the roll is made against
    #[serde(default)]
    pub name: String,
    /// Path of the item the roll comes from, if any
    #[serde(default)]
    pub item_path: Option<String>,
    /// Ad-hoc tags carried by the action or its item
    #[serde(default)]
    pub tags: Vec<String>,
}

impl RollAction {
    pub fn new(kind: RollKind, name: impl Into<String>) -> Self {
        RollAction {
            kind,
            name: name.into(),
            item_path: None,
            tags: Vec::new(),
        }
    }

    pub fn with_item_path(mut self, path: impl Into<String>) -> Self {
        self.item_path = Some(path.into());
        self
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    /// Parse a chat-style reference such as `S:Broadsword`, `[P:"Short Staff"]`,
    /// `Dodge` or `IQ`. Anything unrecognised becomes a plain check.
    pub fn from_token(token: &str) -> Self {
        let token = token.trim().trim_start_matches('[').trim_end_matches(']').trim();

        // Longer prefixes first so `Sp:` is not read as `S:`
        const PREFIXES: [(&str, RollKind); 8] = [
            ("Sp:", RollKind::Spell),
            ("M:", RollKind::MeleeAttack),
            ("R:", RollKind::RangedAttack),
            ("A:", RollKind::Attack),
            ("S:", RollKind::Skill),
            ("P:", RollKind::Parry),
            ("B:", RollKind::Block),
            ("D:", RollKind::Damage),
        ];
        for (prefix, kind) in PREFIXES {
            let Some(head) = token.get(..prefix.len()) else {
                continue;
            };
            if head.eq_ignore_ascii_case(prefix) {
                let name = token[prefix.len()..].trim().trim_matches('"');
                return RollAction::new(kind, name);
            }
        }

        if token.eq_ignore_ascii_case("dodge") {
            return RollAction::new(RollKind::Dodge, "Dodge");
        }

        let attributes = [keys::ST, keys::DX, keys::IQ, keys::HT, keys::WILL, keys::PER];
        if let Some(key) = attributes.iter().find(|k| k.eq_ignore_ascii_case(token)) {
            return RollAction::new(RollKind::Attribute, *key).with_tag(key.to_ascii_lowercase());
        }

        RollAction::new(RollKind::Check, token)
    }

    /// Whether `reference` (an `@` reference of a modifier) names this action's item
    pub fn refers_to(&self, reference: &str) -> bool {
        reference.eq_ignore_ascii_case(&self.name)
            || self
                .item_path
                .as_deref()
                .is_some_and(|path| reference.eq_ignore_ascii_case(path))
    }
}

/// A roll context as handed to the tagged modifier resolver
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RollReference {
    Action(RollAction),
    Token(String),
}

impl RollReference {
    /// The structured action behind this reference
    pub fn action(&self) -> RollAction {
        match self {
            RollReference::Action(action) => action.clone(),
            RollReference::Token(token) => RollAction::from_token(token),
        }
    }
}

impl From<RollAction> for RollReference {
    fn from(action: RollAction) -> Self {
        RollReference::Action(action)
    }
}

impl From<&str> for RollReference {
    fn from(token: &str) -> Self {
        RollReference::Token(token.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_prefixes() {
        let skill = RollAction::from_token("S:Broadsword");
        assert_eq!(skill.kind, RollKind::Skill);
        assert_eq!(skill.name, "Broadsword");

        let spell = RollAction::from_token("Sp:Fireball");
        assert_eq!(spell.kind, RollKind::Spell);
        assert_eq!(spell.name, "Fireball");

        let parry = RollAction::from_token("[P:\"Short Staff\"]");
        assert_eq!(parry.kind, RollKind::Parry);
        assert_eq!(parry.name, "Short Staff");

        assert_eq!(RollAction::from_token("m:Axe").kind, RollKind::MeleeAttack);
        assert_eq!(RollAction::from_token("R:Bow").kind, RollKind::RangedAttack);
        assert_eq!(RollAction::from_token("A:Bow").kind, RollKind::Attack);
        assert_eq!(RollAction::from_token("B:Shield").kind, RollKind::Block);
        assert_eq!(RollAction::from_token("D:Axe").kind, RollKind::Damage);
    }

    #[test]
    fn test_token_dodge_and_attributes() {
        assert_eq!(RollAction::from_token("Dodge").kind, RollKind::Dodge);

        let iq = RollAction::from_token("iq");
        assert_eq!(iq.kind, RollKind::Attribute);
        assert_eq!(iq.name, "IQ");
        assert_eq!(iq.tags, vec!["iq".to_string()]);

        let check = RollAction::from_token("12");
        assert_eq!(check.kind, RollKind::Check);
        assert_eq!(check.name, "12");
    }

    #[test]
    fn test_tag_groups_table() {
        assert_eq!(
            RollKind::MeleeAttack.tag_groups(),
            &[TagGroup::Attack, TagGroup::MeleeAttack]
        );
        assert_eq!(RollKind::Dodge.tag_groups(), &[TagGroup::Defense, TagGroup::Dodge]);
        assert_eq!(RollKind::Damage.tag_groups(), &[TagGroup::Damage]);
    }

    #[test]
    fn test_refers_to() {
        let action = RollAction::new(RollKind::MeleeAttack, "Broadsword").with_item_path("broadsword");
        assert!(action.refers_to("broadsword"));
        assert!(action.refers_to("BROADSWORD"));
        assert!(!action.refers_to("Axe"));
    }
}
