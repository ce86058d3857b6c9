//! BonusCollector - flattens the bonuses of every active item

use crate::bonus::BonusDescriptor;
use crate::source::HasGlobalBonuses;

/// Collect the bonuses of all active items, in item-then-declaration order.
///
/// Items decide for themselves whether they are active; nothing else is
/// filtered here.
pub fn collect_bonuses<I: HasGlobalBonuses>(items: &[I]) -> Vec<BonusDescriptor> {
    let bonuses: Vec<BonusDescriptor> = items
        .iter()
        .filter(|item| item.is_active())
        .flat_map(|item| item.global_bonuses())
        .collect();
    tracing::trace!(items = items.len(), bonuses = bonuses.len(), "collected bonuses");
    bonuses
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::{Equipment, Item, TraitItem};

    #[test]
    fn test_collects_in_item_order() {
        let items = vec![
            Item::Trait(TraitItem::new("Strong").with_bonuses("ST+2\nHT+1")),
            Item::Equipment(Equipment::new("Gloves", 1.0).equipped(true).with_bonuses("DX+1")),
        ];

        let bonuses = collect_bonuses(&items);
        let sources: Vec<_> = bonuses.iter().map(|b| b.text.as_str()).collect();
        assert_eq!(sources, vec!["ST+2", "HT+1", "DX+1"]);
    }

    #[test]
    fn test_inactive_items_contribute_nothing() {
        let items = vec![Item::Equipment(
            Equipment::new("Gloves", 1.0).equipped(false).with_bonuses("DX+1"),
        )];
        assert!(collect_bonuses(&items).is_empty());
    }

    #[test]
    fn test_empty_collection() {
        let items: Vec<Item> = Vec::new();
        assert!(collect_bonuses(&items).is_empty());
    }
}
