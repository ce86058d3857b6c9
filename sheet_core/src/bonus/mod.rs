//! Bonus descriptors - the flat, per-pass list of bonuses granted by items

mod collector;
pub mod grammar;

pub use collector::collect_bonuses;

use serde::{Deserialize, Serialize};

/// What a bonus descriptor is addressed at
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "key")]
pub enum BonusTarget {
    /// An attribute key such as `ST`, or the synthetic `DODGE`
    Attribute(String),
    HitLocation,
    Defense,
    Reaction,
}

/// A single bonus granted by an item for the current pass. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BonusDescriptor {
    /// Name of the item that granted this bonus
    pub source: String,
    pub target: BonusTarget,
    /// The original bonus text, used by the text-matching consumers
    pub text: String,
    pub amount: i32,
}

impl BonusDescriptor {
    /// Classify one line of bonus text. Text no production recognises is skipped.
    pub fn parse(source: &str, line: &str) -> Option<Self> {
        let text = line.trim();
        if text.is_empty() {
            return None;
        }

        let (target, amount) = if let Some(dr) = grammar::dr(text) {
            (BonusTarget::HitLocation, dr.amount)
        } else if let Some((amount, _)) = grammar::reaction(text) {
            (BonusTarget::Reaction, amount)
        } else if let Some((key, amount)) = grammar::attribute(text) {
            (BonusTarget::Attribute(key), amount)
        } else {
            let amounts = grammar::defense(text);
            if amounts.is_empty() {
                tracing::trace!(source, text, "skipping unrecognised bonus text");
                return None;
            }
            (BonusTarget::Defense, amounts.iter().fold(0i32, |sum, n| sum.saturating_add(*n)))
        };

        Some(BonusDescriptor {
            source: source.to_string(),
            target,
            text: text.to_string(),
            amount,
        })
    }

    /// Parse every line of a multi-line bonus block
    pub fn parse_block(source: &str, block: &str) -> Vec<Self> {
        block
            .lines()
            .filter_map(|line| Self::parse(source, line))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_targets() {
        let st = BonusDescriptor::parse("Gloves", "ST+1").unwrap();
        assert_eq!(st.target, BonusTarget::Attribute("ST".to_string()));
        assert_eq!(st.amount, 1);

        let dr = BonusDescriptor::parse("Helm", "DR+3 skull, face").unwrap();
        assert_eq!(dr.target, BonusTarget::HitLocation);
        assert_eq!(dr.amount, 3);

        let db = BonusDescriptor::parse("Shield", "Medium Shield [+2 DB]").unwrap();
        assert_eq!(db.target, BonusTarget::Defense);
        assert_eq!(db.amount, 2);

        let labelled = BonusDescriptor::parse("Armor", "Toughness DR+2 torso").unwrap();
        assert_eq!(labelled.target, BonusTarget::HitLocation);
        assert_eq!(labelled.amount, 2);

        let reaction = BonusDescriptor::parse("Charisma", "Reaction+1 from everyone").unwrap();
        assert_eq!(reaction.target, BonusTarget::Reaction);
    }

    #[test]
    fn test_parse_skips_free_text() {
        assert!(BonusDescriptor::parse("Cloak", "Looks dashing").is_none());
        assert!(BonusDescriptor::parse("Cloak", "   ").is_none());
    }

    #[test]
    fn test_parse_block_keeps_line_order() {
        let bonuses = BonusDescriptor::parse_block("Armor", "DR+2\nnot a bonus\nDX-1");
        assert_eq!(bonuses.len(), 2);
        assert_eq!(bonuses[0].target, BonusTarget::HitLocation);
        assert_eq!(bonuses[1].target, BonusTarget::Attribute("DX".to_string()));
    }
}
