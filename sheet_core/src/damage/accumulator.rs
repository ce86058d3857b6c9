//! DamageAccumulator - pending damage rolls scaled by a repeat count
//!
//! Every operation takes the character mutably, so operations on one
//! character cannot interleave. The new list is persisted first and only
//! committed locally once persistence succeeds.

use super::dice::{multiply_costs, multiply_formula};
use crate::error::SheetError;
use crate::persistence::{ChangeSet, Persistence, PersistenceError};
use crate::sheet::Character;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Document path of the accumulator list
pub const ACCUMULATORS_PATH: &str = "system.conditions.damageAccumulators";

/// One pending damage roll
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DamageAccumulatorEntry {
    /// Identifies the roll request this entry accumulates
    pub signature: String,
    pub formula: String,
    /// Always at least 1
    pub count: u32,
    #[serde(default)]
    pub costs: Option<String>,
}

impl DamageAccumulatorEntry {
    pub fn new(signature: impl Into<String>, formula: impl Into<String>) -> Self {
        DamageAccumulatorEntry {
            signature: signature.into(),
            formula: formula.into(),
            count: 1,
            costs: None,
        }
    }

    pub fn with_costs(mut self, costs: impl Into<String>) -> Self {
        self.costs = Some(costs.into());
        self
    }

    /// The single roll this entry stands for: formula and costs scaled by count
    pub fn scaled(&self) -> Self {
        DamageAccumulatorEntry {
            signature: self.signature.clone(),
            formula: multiply_formula(&self.formula, self.count),
            count: 1,
            costs: self
                .costs
                .as_deref()
                .map(|costs| multiply_costs(costs, self.count)),
        }
    }
}

/// The external roll-execution system
#[async_trait]
pub trait RollDispatcher: Send + Sync {
    async fn dispatch(&self, roll: &DamageAccumulatorEntry) -> Result<(), PersistenceError>;
}

fn change_set(entries: &[DamageAccumulatorEntry]) -> Result<ChangeSet, PersistenceError> {
    let mut changes = ChangeSet::new();
    changes.insert(ACCUMULATORS_PATH.to_string(), serde_json::to_value(entries)?);
    Ok(changes)
}

impl Character {
    /// Pending damage rolls
    pub fn damage_accumulators(&self) -> &[DamageAccumulatorEntry] {
        &self.conditions.damage_accumulators
    }

    async fn store_accumulators<P: Persistence + ?Sized>(
        &mut self,
        entries: Vec<DamageAccumulatorEntry>,
        persistence: &P,
    ) -> Result<(), SheetError> {
        persistence.apply_changes(change_set(&entries)?).await?;
        self.conditions.damage_accumulators = entries;
        Ok(())
    }

    fn accumulator_index(&self, index: usize) -> Result<usize, SheetError> {
        if index < self.conditions.damage_accumulators.len() {
            Ok(index)
        } else {
            Err(SheetError::UnknownAccumulatorEntry(index))
        }
    }

    /// Add a roll request: a repeated signature bumps the existing entry's
    /// count, a new one starts at 1. Returns the entry's index.
    pub async fn accumulate_damage<P: Persistence + ?Sized>(
        &mut self,
        request: DamageAccumulatorEntry,
        persistence: &P,
    ) -> Result<usize, SheetError> {
        let mut entries = self.conditions.damage_accumulators.clone();
        let index = match entries.iter().position(|e| e.signature == request.signature) {
            Some(index) => {
                entries[index].count += 1;
                index
            }
            None => {
                entries.push(DamageAccumulatorEntry { count: 1, ..request });
                entries.len() - 1
            }
        };
        self.store_accumulators(entries, persistence).await?;
        Ok(index)
    }

    pub async fn increment_accumulator<P: Persistence + ?Sized>(
        &mut self,
        index: usize,
        persistence: &P,
    ) -> Result<(), SheetError> {
        let index = self.accumulator_index(index)?;
        let mut entries = self.conditions.damage_accumulators.clone();
        entries[index].count += 1;
        self.store_accumulators(entries, persistence).await
    }

    /// Decrease the count; an entry that drops below 1 is removed
    pub async fn decrement_accumulator<P: Persistence + ?Sized>(
        &mut self,
        index: usize,
        persistence: &P,
    ) -> Result<(), SheetError> {
        let index = self.accumulator_index(index)?;
        let mut entries = self.conditions.damage_accumulators.clone();
        if entries[index].count <= 1 {
            entries.remove(index);
        } else {
            entries[index].count -= 1;
        }
        self.store_accumulators(entries, persistence).await
    }

    pub async fn clear_accumulator<P: Persistence + ?Sized>(
        &mut self,
        index: usize,
        persistence: &P,
    ) -> Result<(), SheetError> {
        let index = self.accumulator_index(index)?;
        let mut entries = self.conditions.damage_accumulators.clone();
        entries.remove(index);
        self.store_accumulators(entries, persistence).await
    }

    /// Turn an entry into one scaled roll, persist it in place of the
    /// entry and hand it to the roll system. Clearing the entry afterwards
    /// is left to the caller.
    pub async fn apply_accumulator<P, D>(
        &mut self,
        index: usize,
        persistence: &P,
        dispatcher: &D,
    ) -> Result<DamageAccumulatorEntry, SheetError>
    where
        P: Persistence + ?Sized,
        D: RollDispatcher + ?Sized,
    {
        let index = self.accumulator_index(index)?;
        let mut entries = self.conditions.damage_accumulators.clone();
        let roll = entries[index].scaled();
        tracing::info!(
            character = self.id.as_str(),
            signature = roll.signature.as_str(),
            count = entries[index].count,
            formula = roll.formula.as_str(),
            "applying damage accumulator"
        );
        entries[index] = roll.clone();
        self.store_accumulators(entries, persistence).await?;
        dispatcher.dispatch(&roll).await?;
        Ok(roll)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStore;

    fn request(signature: &str) -> DamageAccumulatorEntry {
        DamageAccumulatorEntry::new(signature, "2d+1 cut")
    }

    #[tokio::test]
    async fn test_accumulate_same_signature_counts() {
        let mut character = Character::new("c", "Brute");
        let store = MemoryStore::new();

        character.accumulate_damage(request("axe"), &store).await.unwrap();
        let index = character.accumulate_damage(request("axe"), &store).await.unwrap();

        assert_eq!(index, 0);
        assert_eq!(character.damage_accumulators().len(), 1);
        assert_eq!(character.damage_accumulators()[0].count, 2);
        assert_eq!(store.update_count(), 2);
    }

    #[tokio::test]
    async fn test_decrement_and_clear() {
        let mut character = Character::new("c", "Brute");
        let store = MemoryStore::new();
        character.accumulate_damage(request("axe"), &store).await.unwrap();
        character.accumulate_damage(request("bow"), &store).await.unwrap();
        character.increment_accumulator(0, &store).await.unwrap();

        character.decrement_accumulator(0, &store).await.unwrap();
        assert_eq!(character.damage_accumulators()[0].count, 1);

        character.decrement_accumulator(0, &store).await.unwrap();
        assert_eq!(character.damage_accumulators().len(), 1);
        assert_eq!(character.damage_accumulators()[0].signature, "bow");

        character.clear_accumulator(0, &store).await.unwrap();
        assert!(character.damage_accumulators().is_empty());
        assert_eq!(store.get(ACCUMULATORS_PATH), Some(serde_json::json!([])));
    }

    #[tokio::test]
    async fn test_unknown_index() {
        let mut character = Character::new("c", "Brute");
        let store = MemoryStore::new();
        let err = character.decrement_accumulator(3, &store).await.unwrap_err();
        assert!(matches!(err, SheetError::UnknownAccumulatorEntry(3)));
        assert_eq!(store.update_count(), 0);
    }

    #[test]
    fn test_scaled_entry() {
        let mut entry = request("axe").with_costs("*Costs 1 FP");
        entry.count = 3;
        let scaled = entry.scaled();
        assert_eq!(scaled.formula, "6d+3 cut");
        assert_eq!(scaled.costs.as_deref(), Some("*Costs 3 FP"));
        assert_eq!(scaled.count, 1);
    }

    #[test]
    fn test_document_field_names() {
        let value = serde_json::to_value(request("axe")).unwrap();
        assert_eq!(value["signature"], "axe");
        assert_eq!(value["count"], 1);
        assert!(value["costs"].is_null());
    }
}
