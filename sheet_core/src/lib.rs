//! sheet_core - Derived-statistics engine for GURPS-style character sheets
//!
//! This library provides:
//! - Bonus collection: one flat list of item bonuses per recompute pass
//! - Character: attributes, hit-location DR, defenses, encumbrance and move
//! - Tagged modifiers: standing roll modifiers pushed by hashtag
//! - Damage accumulators: count-scaled pending damage rolls

pub mod bonus;
pub mod config;
pub mod damage;
pub mod error;
pub mod modifiers;
pub mod persistence;
pub mod prelude;
pub mod sheet;
pub mod source;
pub mod types;

// Re-export core types for convenience
pub use bonus::{collect_bonuses, BonusDescriptor, BonusTarget};
pub use config::{
    default_body_plans, default_settings, BodyPlan, BodyPlanRegistry, ConfigError, EngineSettings,
    TagGroup, TagSettings,
};
pub use damage::{DamageAccumulatorEntry, DiceFormula, RollDispatcher};
pub use error::SheetError;
pub use modifiers::{
    resolve_tagged_modifiers, ModifierStack, ModifierStackEntry, RollAction, RollKind,
    RollReference, TargetingSource,
};
pub use persistence::{ChangeSet, Persistence, PersistenceError};
pub use sheet::{Character, DerivedStats, DrChangeOutcome, EncumbranceLevel, HitLocation, MoveResult};
pub use source::{Equipment, HasAttacks, HasGlobalBonuses, Item, Spell, TraitItem};
pub use types::{AttackEntry, AttackKind, Pool};
