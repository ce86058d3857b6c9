//! Prelude module for convenient imports
//!
//! ```rust
//! use sheet_core::prelude::*;
//! ```

// Character and derived values
pub use crate::sheet::{Character, Conditions, DerivedStats, Maneuver, MoveMode, MoveModeKind, Posture};
pub use crate::types::{keys, AttackEntry, Pool};

// Items
pub use crate::source::{Equipment, Item, Spell, TraitItem};

// Async boundary
pub use crate::damage::{DamageAccumulatorEntry, RollDispatcher};
pub use crate::modifiers::{ModifierStack, RollAction, RollKind, RollReference, TargetingSource};
pub use crate::persistence::{Persistence, PersistenceError};

// Config
pub use crate::config::{default_body_plans, default_settings, EngineSettings};
pub use crate::error::SheetError;
