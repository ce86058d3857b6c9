//! Character sheet - stored base data and the derived values recomputed from it

mod attributes;
mod defense;
mod encumbrance;
mod hit_location;
mod movement;

pub use attributes::{apply_attribute_bonuses, Attribute, Dodge};
pub use defense::{aggregate_defenses, defense_bonus, DefenseTotals};
pub use encumbrance::{
    basic_lift, calculate_encumbrance, select_tier, EncumbranceInput, EncumbranceLevel,
    TierSelection, TIER_MULTIPLIERS, TIER_NAMES,
};
pub use hit_location::{apply_dr_bonuses, change_dr, DrChangeOutcome, DrFormula, HitLocation, NamePattern};
pub use movement::{
    resolve_move, set_default_move_mode, Maneuver, MoveMode, MoveModeKind, MoveOverride,
    MoveResult, Posture,
};

use crate::bonus::{collect_bonuses, grammar, BonusDescriptor, BonusTarget};
use crate::config::{BodyPlan, EngineSettings};
use crate::damage::DamageAccumulatorEntry;
use crate::error::SheetError;
use crate::persistence::Persistence;
use crate::source::Item;
use crate::types::{keys, Pool};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A reaction modifier granted by an item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reaction {
    pub modifier: i32,
    pub situation: String,
    pub source: String,
}

/// Reaction modifiers among this pass's bonuses
pub fn collect_reactions(bonuses: &[BonusDescriptor]) -> Vec<Reaction> {
    bonuses
        .iter()
        .filter(|b| b.target == BonusTarget::Reaction)
        .filter_map(|b| {
            let (modifier, situation) = grammar::reaction(&b.text)?;
            Some(Reaction {
                modifier,
                situation,
                source: b.source.clone(),
            })
        })
        .collect()
}

/// Per-turn combat state and standing modifiers
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Conditions {
    #[serde(default)]
    pub maneuver: Maneuver,
    #[serde(default)]
    pub posture: Posture,
    /// Situational modifiers the character applies to their own rolls
    #[serde(default)]
    pub self_mods: Vec<String>,
    /// Situational modifiers others pick up when targeting this character
    #[serde(default)]
    pub target_mods: Vec<String>,
    /// Pending damage rolls
    #[serde(default)]
    pub damage_accumulators: Vec<DamageAccumulatorEntry>,
}

/// Everything derived by a recompute pass
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DerivedStats {
    pub bonus_count: usize,
    pub defense: DefenseTotals,
    pub reactions: Vec<Reaction>,
    pub basic_lift: f64,
    pub carried_weight: f64,
    pub encumbrance_level: usize,
    pub current_move: MoveResult,
    /// Maneuver as shown to players other than the owner, when visible to them
    pub public_maneuver: Option<String>,
    pub current_dodge: i32,
    pub current_sprint: f64,
}

/// A character and its derived statistics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Character {
    pub id: String,
    pub name: String,

    // === Stored base data ===
    pub attributes: BTreeMap<String, Attribute>,
    pub dodge: Dodge,
    pub hp: Pool,
    pub fp: Pool,
    #[serde(default)]
    pub move_modes: Vec<MoveMode>,
    #[serde(default)]
    pub body_plan: Option<String>,
    #[serde(default)]
    pub hit_locations: Vec<HitLocation>,
    /// Tier used when encumbrance is selected manually
    #[serde(default)]
    pub manual_encumbrance: usize,
    #[serde(default)]
    pub items: Vec<Item>,
    #[serde(default)]
    pub conditions: Conditions,

    // === Recomputed every pass ===
    #[serde(default)]
    pub encumbrance: Vec<EncumbranceLevel>,
    #[serde(skip)]
    pub derived: DerivedStats,
}

impl Character {
    /// Create a character with average attributes (10), basic move 5 and dodge 8
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        let attributes = [keys::ST, keys::DX, keys::IQ, keys::HT, keys::WILL, keys::PER]
            .into_iter()
            .map(|k| (k.to_string(), Attribute::new(10)))
            .chain(std::iter::once((keys::MOVE.to_string(), Attribute::new(5))))
            .collect();

        Character {
            id: id.into(),
            name: name.into(),
            attributes,
            dodge: Dodge::new(8),
            hp: Pool::full(10),
            fp: Pool::full(10),
            move_modes: Vec::new(),
            body_plan: None,
            hit_locations: Vec::new(),
            manual_encumbrance: 0,
            items: Vec::new(),
            conditions: Conditions::default(),
            encumbrance: Vec::new(),
            derived: DerivedStats::default(),
        }
    }

    /// Set an attribute's stored value
    pub fn with_attribute(mut self, key: &str, import: i32) -> Self {
        self.attributes
            .insert(key.to_ascii_uppercase(), Attribute::new(import));
        self
    }

    pub fn with_dodge(mut self, import: i32) -> Self {
        self.dodge = Dodge::new(import);
        self
    }

    pub fn with_item(mut self, item: impl Into<Item>) -> Self {
        self.items.push(item.into());
        self
    }

    /// Current value of an attribute, 0 when the character lacks it
    pub fn attribute(&self, key: &str) -> i32 {
        self.attributes.get(key).map(|a| a.value).unwrap_or(0)
    }

    /// Create hit locations from a body plan. Existing locations are kept
    /// when the plan is already in use; returns whether locations were created.
    pub fn apply_body_plan(&mut self, plan: &BodyPlan) -> bool {
        if self.body_plan.as_deref() == Some(plan.id.as_str()) && !self.hit_locations.is_empty() {
            return false;
        }
        self.body_plan = Some(plan.id.clone());
        self.hit_locations = HitLocation::from_plan(plan);
        true
    }

    /// Basic move: the default mode's rate, or the MOVE attribute on the ground
    pub fn basic_move(&self) -> i32 {
        match self.move_modes.iter().find(|m| m.default) {
            Some(mode) if mode.mode != MoveModeKind::Ground => mode.basic,
            _ => self.attribute(keys::MOVE),
        }
    }

    /// Total weight of carried equipment
    pub fn carried_weight(&self) -> f64 {
        self.items
            .iter()
            .filter_map(Item::as_equipment)
            .map(|e| e.carried_weight())
            .sum()
    }

    pub fn is_reeling(&self) -> bool {
        self.hp.is_below_third()
    }

    pub fn is_exhausted(&self) -> bool {
        self.fp.is_below_third()
    }

    /// The current encumbrance tier, once computed
    pub fn current_encumbrance(&self) -> Option<&EncumbranceLevel> {
        self.encumbrance.iter().find(|l| l.current)
    }

    /// Recompute every derived value from the stored data.
    ///
    /// Safe to run repeatedly: attribute values restart from their imports,
    /// item resistance and the encumbrance list are rebuilt from scratch.
    pub fn recompute(&mut self, settings: &EngineSettings, in_encounter: bool) -> &DerivedStats {
        for attribute in self.attributes.values_mut() {
            attribute.reset();
        }
        self.dodge.reset();

        let bonuses = collect_bonuses(&self.items);
        apply_attribute_bonuses(&mut self.attributes, &mut self.dodge, &bonuses);
        apply_dr_bonuses(&mut self.hit_locations, &bonuses);
        let defense = aggregate_defenses(&bonuses, &self.items, settings.check_equipped_only);
        let reactions = collect_reactions(&bonuses);

        let carried_weight = self.carried_weight();
        let selection = if settings.automatic_encumbrance {
            TierSelection::Automatic { carried_weight }
        } else {
            TierSelection::Manual(self.manual_encumbrance)
        };
        self.encumbrance = calculate_encumbrance(&EncumbranceInput {
            st: self.attribute(keys::ST),
            basic_move: self.basic_move(),
            basic_dodge: self.dodge.value(),
            reeling: self.is_reeling(),
            exhausted: self.is_exhausted(),
            selection,
        });

        let (level, base_move, tier_dodge, sprint) = match self.current_encumbrance() {
            Some(tier) => (tier.level, tier.move_, tier.dodge, tier.sprint),
            None => (0, self.basic_move(), self.dodge.value(), f64::from(self.basic_move())),
        };
        let apply = settings.maneuver_updates_move && in_encounter;
        let current_move = resolve_move(
            base_move,
            self.conditions.maneuver,
            self.conditions.posture,
            apply,
        );

        tracing::debug!(
            character = self.id.as_str(),
            bonuses = bonuses.len(),
            encumbrance = level,
            current_move = current_move.value,
            "recomputed derived stats"
        );

        self.derived = DerivedStats {
            bonus_count: bonuses.len(),
            defense,
            reactions,
            basic_lift: basic_lift(self.attribute(keys::ST)),
            carried_weight,
            encumbrance_level: level,
            current_dodge: tier_dodge + defense.dodge_bonus,
            current_sprint: sprint,
            current_move,
            public_maneuver: self
                .conditions
                .maneuver
                .public_label(settings.maneuver_visibility, settings.maneuver_detail, false)
                .map(str::to_string),
        };
        &self.derived
    }

    /// Run a DR-change command and persist its result.
    ///
    /// Nothing is mutated or persisted unless the outcome reports a change;
    /// local state is only updated once persistence succeeds.
    pub async fn change_dr<P: Persistence + ?Sized>(
        &mut self,
        formula: &str,
        targets: &[String],
        persistence: &P,
    ) -> Result<DrChangeOutcome, SheetError> {
        let mut locations = self.hit_locations.clone();
        let outcome = change_dr(self.body_plan.as_deref(), &mut locations, formula, targets);
        if outcome.changed {
            persistence.apply_changes(outcome.changes.clone()).await?;
            self.hit_locations = locations;
        }
        Ok(outcome)
    }
}
