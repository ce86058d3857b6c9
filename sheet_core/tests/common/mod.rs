//! Shared test doubles and fixtures

#![allow(dead_code)]

use async_trait::async_trait;
use sheet_core::prelude::*;
use std::sync::{Mutex, PoisonError};
use tracing_subscriber::{fmt, EnvFilter};

/// Route engine logs to the test output. Use `RUST_LOG` to raise the level.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = fmt().with_env_filter(filter).with_test_writer().try_init();
}

/// Roll system double that records every dispatched roll
#[derive(Debug, Default)]
pub struct RecordingDispatcher {
    rolls: Mutex<Vec<DamageAccumulatorEntry>>,
}

impl RecordingDispatcher {
    pub fn rolls(&self) -> Vec<DamageAccumulatorEntry> {
        self.rolls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[async_trait]
impl RollDispatcher for RecordingDispatcher {
    async fn dispatch(&self, roll: &DamageAccumulatorEntry) -> Result<(), PersistenceError> {
        self.rolls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(roll.clone());
        Ok(())
    }
}

/// Persistence double that refuses every update
#[derive(Debug, Default)]
pub struct RejectingStore;

#[async_trait]
impl Persistence for RejectingStore {
    async fn apply_changes(&self, _changes: sheet_core::ChangeSet) -> Result<(), PersistenceError> {
        Err(PersistenceError::Rejected("read-only document".to_string()))
    }
}

/// ST 13 swordsman carrying 40 lbs, with a humanoid body plan
pub fn swordsman() -> Character {
    let mut character = Character::new("swordsman", "Swordsman")
        .with_attribute(keys::ST, 13)
        .with_attribute(keys::DX, 12)
        .with_dodge(9)
        .with_item(TraitItem::new("Combat Reflexes").with_bonuses("[+1 DB]"))
        .with_item(
            Equipment::new("Broadsword", 3.0)
                .equipped(true)
                .with_attack(AttackEntry::melee("Swung", "sw+1 cut").with_parry("9"))
                .with_user_mod("+1 Balanced #melee"),
        )
        .with_item(
            Equipment::new("Steel Helm", 5.0)
                .equipped(true)
                .with_bonuses("DR+4 skull"),
        )
        .with_item(Equipment::new("Pack", 32.0));
    let plans = default_body_plans();
    if let Some(humanoid) = plans.get("humanoid") {
        character.apply_body_plan(humanoid);
    }
    character
}
