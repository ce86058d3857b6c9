//! AttributeResolver - applies attribute bonuses onto base values

use crate::bonus::{BonusDescriptor, BonusTarget};
use crate::types::keys;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A character attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attribute {
    /// Stored (imported) value
    pub import: i32,
    /// Value after this pass's bonuses
    pub value: i32,
}

impl Attribute {
    pub fn new(import: i32) -> Self {
        Attribute {
            import,
            value: import,
        }
    }

    /// Back to the imported value, start of every pass
    pub fn reset(&mut self) {
        self.value = self.import;
    }
}

/// Basic dodge, kept outside the attribute map
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Dodge {
    pub import: i32,
    /// Sum of `DODGE` attribute bonuses this pass
    pub bonus: i32,
}

impl Dodge {
    pub fn new(import: i32) -> Self {
        Dodge { import, bonus: 0 }
    }

    pub fn value(&self) -> i32 {
        self.import + self.bonus
    }

    pub fn reset(&mut self) {
        self.bonus = 0;
    }
}

/// Apply every attribute-targeted bonus. Unknown keys are ignored.
pub fn apply_attribute_bonuses(
    attributes: &mut BTreeMap<String, Attribute>,
    dodge: &mut Dodge,
    bonuses: &[BonusDescriptor],
) {
    for bonus in bonuses {
        let BonusTarget::Attribute(key) = &bonus.target else {
            continue;
        };

        if key == keys::DODGE {
            dodge.bonus = dodge.bonus.saturating_add(bonus.amount);
        }
        if let Some(attribute) = attributes.get_mut(key) {
            attribute.value = attribute.value.saturating_add(bonus.amount);
        } else if key != keys::DODGE {
            tracing::trace!(key = key.as_str(), source = bonus.source.as_str(), "unknown attribute");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attributes() -> BTreeMap<String, Attribute> {
        [(keys::ST, 10), (keys::DX, 12)]
            .into_iter()
            .map(|(k, v)| (k.to_string(), Attribute::new(v)))
            .collect()
    }

    fn bonus(text: &str) -> BonusDescriptor {
        BonusDescriptor::parse("test", text).unwrap()
    }

    #[test]
    fn test_attribute_bonus_applied() {
        let mut attrs = attributes();
        let mut dodge = Dodge::new(8);
        apply_attribute_bonuses(&mut attrs, &mut dodge, &[bonus("ST+2"), bonus("ST-1"), bonus("DX+1")]);

        assert_eq!(attrs[keys::ST].value, 11);
        assert_eq!(attrs[keys::ST].import, 10);
        assert_eq!(attrs[keys::DX].value, 13);
    }

    #[test]
    fn test_dodge_goes_to_separate_value() {
        let mut attrs = attributes();
        let mut dodge = Dodge::new(8);
        apply_attribute_bonuses(&mut attrs, &mut dodge, &[bonus("Dodge+1")]);

        assert_eq!(dodge.value(), 9);
        assert!(!attrs.contains_key(keys::DODGE));
    }

    #[test]
    fn test_unknown_attribute_ignored() {
        let mut attrs = attributes();
        let mut dodge = Dodge::new(8);
        apply_attribute_bonuses(&mut attrs, &mut dodge, &[bonus("Luck+3")]);

        assert_eq!(attrs, attributes());
        assert_eq!(dodge.value(), 8);
    }

    #[test]
    fn test_non_attribute_bonuses_skipped() {
        let mut attrs = attributes();
        let mut dodge = Dodge::new(8);
        apply_attribute_bonuses(&mut attrs, &mut dodge, &[bonus("DR+2"), bonus("[+1 DB]")]);
        assert_eq!(attrs, attributes());
    }
}
