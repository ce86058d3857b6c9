//! Tagged modifiers and damage accumulators across the async boundary

mod common;

use common::RecordingDispatcher;
use sheet_core::modifiers::MemoryStack;
use sheet_core::persistence::MemoryStore;
use sheet_core::prelude::*;
use sheet_core::resolve_tagged_modifiers;

#[tokio::test]
async fn test_melee_attack_picks_up_item_and_target_modifiers() {
    common::init_logging();
    let character = common::swordsman();
    let mut goblin = Character::new("goblin", "Goblin");
    goblin.conditions.target_mods.push("+2 Target is prone #attack".to_string());
    goblin.conditions.target_mods.push("-2 Target in cover #ranged".to_string());

    let stack = MemoryStack::new();
    let action = RollAction::new(RollKind::MeleeAttack, "Broadsword").with_item_path("broadsword");
    let is_damage = resolve_tagged_modifiers(
        &character,
        &action.into(),
        &vec![&goblin],
        &default_settings(),
        true,
        &stack,
    )
    .await
    .unwrap();

    assert!(!is_damage);
    let descriptions: Vec<_> = stack.entries().into_iter().map(|e| e.description).collect();
    assert_eq!(descriptions, vec!["Balanced", "Target is prone"]);
    assert_eq!(stack.total(), 3);
}

#[tokio::test]
async fn test_accumulate_then_apply() {
    let mut character = common::swordsman();
    let store = MemoryStore::new();
    let dispatcher = RecordingDispatcher::default();

    let request = DamageAccumulatorEntry::new("broadsword:swung", "2d+1 cut").with_costs("*Costs 1 FP");
    for _ in 0..3 {
        character.accumulate_damage(request.clone(), &store).await.unwrap();
    }
    assert_eq!(character.damage_accumulators()[0].count, 3);

    let roll = character.apply_accumulator(0, &store, &dispatcher).await.unwrap();
    assert_eq!(roll.formula, "6d+3 cut");
    assert_eq!(roll.costs.as_deref(), Some("*Costs 3 FP"));
    assert_eq!(dispatcher.rolls(), vec![roll.clone()]);

    character.clear_accumulator(0, &store).await.unwrap();
    assert!(character.damage_accumulators().is_empty());
    assert_eq!(store.update_count(), 5);
}

#[tokio::test]
async fn test_failed_persist_keeps_accumulators() {
    let mut character = common::swordsman();
    let store = MemoryStore::new();
    character
        .accumulate_damage(DamageAccumulatorEntry::new("axe", "1d+2 cut"), &store)
        .await
        .unwrap();

    let result = character.increment_accumulator(0, &common::RejectingStore).await;

    assert!(result.is_err());
    assert_eq!(character.damage_accumulators()[0].count, 1);
}
