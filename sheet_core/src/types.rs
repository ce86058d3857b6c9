//! Core types shared across the engine

use crate::bonus::grammar;
use serde::{Deserialize, Serialize};

/// Standard attribute keys
pub mod keys {
    pub const ST: &str = "ST";
    pub const DX: &str = "DX";
    pub const IQ: &str = "IQ";
    pub const HT: &str = "HT";
    pub const WILL: &str = "WILL";
    pub const PER: &str = "PER";
    /// Basic move, stored alongside the attributes
    pub const MOVE: &str = "MOVE";
    /// Synthetic key that addresses the dodge value instead of an attribute
    pub const DODGE: &str = "DODGE";
}

/// Kind of attack entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttackKind {
    Melee,
    Ranged,
}

/// One usage of an attack-bearing item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttackEntry {
    pub kind: AttackKind,
    /// Usage mode, e.g. "Swung" or "Thrust"
    #[serde(default)]
    pub mode: String,
    #[serde(default)]
    pub damage: String,
    /// Parry score as written, e.g. "9", "8F" or "No"
    #[serde(default)]
    pub parry: String,
    /// Block score as written
    #[serde(default)]
    pub block: String,
}

impl AttackEntry {
    pub fn melee(mode: impl Into<String>, damage: impl Into<String>) -> Self {
        AttackEntry {
            kind: AttackKind::Melee,
            mode: mode.into(),
            damage: damage.into(),
            parry: String::new(),
            block: String::new(),
        }
    }

    pub fn ranged(mode: impl Into<String>, damage: impl Into<String>) -> Self {
        AttackEntry {
            kind: AttackKind::Ranged,
            ..Self::melee(mode, damage)
        }
    }

    pub fn with_parry(mut self, parry: impl Into<String>) -> Self {
        self.parry = parry.into();
        self
    }

    pub fn with_block(mut self, block: impl Into<String>) -> Self {
        self.block = block.into();
        self
    }

    /// Parsed parry score; `None` for "No", "-" or an empty field
    pub fn parry_score(&self) -> Option<i32> {
        grammar::leading_int(&self.parry)
    }

    /// Parsed block score
    pub fn block_score(&self) -> Option<i32> {
        grammar::leading_int(&self.block)
    }
}

/// A depletable resource such as HP or FP
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pool {
    pub value: i32,
    pub max: i32,
}

impl Pool {
    pub fn full(max: i32) -> Self {
        Pool { value: max, max }
    }

    /// Below a third of maximum (reeling for HP, exhausted for FP)
    pub fn is_below_third(&self) -> bool {
        (self.value as f64) < self.max as f64 / 3.0
    }
}

impl Default for Pool {
    fn default() -> Self {
        Pool::full(10)
    }
}
