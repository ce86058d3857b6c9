//! HitLocationResolver - per-location damage resistance
//!
//! Item bonuses reach a location through `DR+N fragments` text; the user
//! adjusts locations through DR-change formulas (`+2`, `*2`, `/2`, `!5`,
//! `reset`, or a bare number).

use crate::bonus::{grammar, BonusDescriptor};
use crate::config::BodyPlan;
use crate::persistence::ChangeSet;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::collections::HashMap;

/// One body location and its resistance
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HitLocation {
    /// Document key, e.g. `00003`
    pub key: String,
    pub name: String,
    /// Base resistance from the body plan or import
    pub import: i32,
    /// Resistance granted by items this pass
    pub dr_item: i32,
    /// User adjustment
    pub dr_mod: i32,
    pub dr_cap: Option<i32>,
    /// Computed resistance, persisted for display
    pub dr: i32,
}

impl HitLocation {
    pub fn new(key: impl Into<String>, name: impl Into<String>, import: i32) -> Self {
        HitLocation {
            key: key.into(),
            name: name.into(),
            import,
            dr_item: 0,
            dr_mod: 0,
            dr_cap: None,
            dr: import,
        }
    }

    /// Locations of a body plan, keyed by position
    pub fn from_plan(plan: &BodyPlan) -> Vec<HitLocation> {
        plan.locations
            .iter()
            .enumerate()
            .map(|(i, l)| HitLocation::new(format!("{i:05}"), l.name.clone(), l.dr))
            .collect()
    }

    /// `import + dr_item + dr_mod`, raised to the cap when one is set
    fn resolved_dr(&self) -> i32 {
        let new_dr = self
            .import
            .saturating_add(self.dr_item)
            .saturating_add(self.dr_mod);
        match self.dr_cap {
            Some(cap) => cap.max(new_dr),
            None => new_dr,
        }
    }

    fn changes(&self, before: &HitLocation, changes: &mut ChangeSet) {
        let prefix = format!("system.hitlocations.{}", self.key);
        let mut put = |field: &str, value: Value| {
            changes.insert(format!("{prefix}.{field}"), value);
        };
        if self.dr != before.dr {
            put("dr", json!(self.dr));
        }
        if self.dr_mod != before.dr_mod {
            put("drMod", json!(self.dr_mod));
        }
        if self.dr_cap != before.dr_cap {
            put("drCap", json!(self.dr_cap));
        }
        if self.dr_item != before.dr_item {
            put("drItem", json!(self.dr_item));
        }
    }
}

/// Case-insensitive location name pattern; a fragment matches anywhere in
/// the name and `*` matches any run of characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamePattern {
    parts: Vec<String>,
}

impl NamePattern {
    pub fn new(fragment: &str) -> Self {
        NamePattern {
            parts: fragment
                .trim()
                .to_lowercase()
                .split('*')
                .filter(|p| !p.is_empty())
                .map(str::to_string)
                .collect(),
        }
    }

    pub fn matches(&self, name: &str) -> bool {
        let name = name.to_lowercase();
        let mut rest = name.as_str();
        for part in &self.parts {
            match rest.find(part.as_str()) {
                Some(i) => rest = &rest[i + part.len()..],
                None => return false,
            }
        }
        true
    }
}

fn compile(fragments: &[String]) -> Vec<NamePattern> {
    fragments.iter().map(|f| NamePattern::new(f)).collect()
}

fn any_match(patterns: &[NamePattern], name: &str) -> bool {
    patterns.iter().any(|p| p.matches(name))
}

/// Recompute every location's item resistance and final `dr` from this
/// pass's bonuses. A `DR` bonus without fragments covers every location.
pub fn apply_dr_bonuses(locations: &mut [HitLocation], bonuses: &[BonusDescriptor]) {
    let mut deltas: HashMap<String, i32> = HashMap::new();

    for bonus in bonuses {
        let Some(dr) = grammar::dr(&bonus.text) else {
            continue;
        };
        let patterns = compile(&dr.fragments);
        for location in locations.iter() {
            if patterns.is_empty() || any_match(&patterns, &location.name) {
                let delta = deltas.entry(location.name.clone()).or_insert(0);
                *delta = delta.saturating_add(dr.amount);
            }
        }
    }

    for location in locations.iter_mut() {
        location.dr_item = deltas.get(&location.name).copied().unwrap_or(0);
        location.dr = location.resolved_dr();
    }
}

/// A parsed DR-change formula
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrFormula {
    /// Restore the imported resistance and clear every adjustment
    Reset,
    /// `+N` / `-N`: adjust the user modifier
    Add(i32),
    /// `*N`: cap at the location's current `dr` (not `import + dr_item`)
    /// times N, so that `*N` followed by `/N` restores the previous value.
    /// N is never negative.
    Multiply(i32),
    /// `/N`: cap at the location's current `dr` divided by N, rounded down.
    /// N is always positive.
    Divide(i32),
    /// `!N`: absolute value
    Set(i32),
    /// Bare number: user modifier with a floor of the other sources
    Base(i32),
}

impl DrFormula {
    /// Parse a formula. Anything unrecognised is a bare number, 0 when unparsable.
    pub fn parse(formula: &str) -> Self {
        let formula = formula.trim();
        if formula.eq_ignore_ascii_case("reset") {
            return DrFormula::Reset;
        }
        let operand = |s: &str| grammar::leading_int(s);
        let parsed = match formula.chars().next() {
            Some('+') | Some('-') => operand(formula).map(DrFormula::Add),
            Some('*') => operand(&formula[1..])
                .filter(|n| *n >= 0)
                .map(DrFormula::Multiply),
            Some('/') => operand(&formula[1..])
                .filter(|n| *n > 0)
                .map(DrFormula::Divide),
            Some('!') => operand(&formula[1..]).map(DrFormula::Set),
            _ => None,
        };
        parsed.unwrap_or_else(|| DrFormula::Base(operand(formula).unwrap_or(0)))
    }

    /// Apply to one location
    pub fn apply(&self, location: &mut HitLocation) {
        match *self {
            DrFormula::Reset => {
                location.dr = location.import;
                location.dr_mod = 0;
                location.dr_cap = None;
                location.dr_item = 0;
            }
            DrFormula::Add(n) => {
                location.dr_mod = location.dr_mod.saturating_add(n);
                location.dr = location.resolved_dr();
            }
            DrFormula::Multiply(n) => Self::cap(location, location.dr.max(0).saturating_mul(n)),
            DrFormula::Divide(n) => Self::cap(location, location.dr.max(0) / n),
            DrFormula::Set(n) => {
                location.dr_mod = n;
                location.dr = n;
                location.dr_cap = Some(n);
            }
            DrFormula::Base(n) => {
                location.dr_mod = n;
                location.dr = 0.max(location.import).max(n).max(location.dr_item);
                location.dr_cap = Some(location.dr);
            }
        }
    }

    fn cap(location: &mut HitLocation, cap: i32) {
        location.dr_cap = Some(cap);
        location.dr = cap;
        location.dr_mod = cap
            .saturating_sub(location.dr_item)
            .saturating_sub(location.import);
    }
}

/// Result of a DR-change command
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DrChangeOutcome {
    pub changed: bool,
    /// Human-readable summary or warning
    pub message: String,
    /// Document updates to persist when `changed`
    pub changes: ChangeSet,
}

impl DrChangeOutcome {
    fn unchanged(message: String) -> Self {
        DrChangeOutcome {
            changed: false,
            message,
            changes: ChangeSet::new(),
        }
    }
}

/// Run a DR-change command against `locations`.
///
/// `targets` are name fragments; an empty list targets every location.
/// Locations are only modified when the outcome reports a change.
pub fn change_dr(
    body_plan: Option<&str>,
    locations: &mut [HitLocation],
    formula: &str,
    targets: &[String],
) -> DrChangeOutcome {
    if body_plan.is_none() {
        tracing::warn!(formula, "DR change requested without a body plan");
        return DrChangeOutcome::unchanged("No body plan is configured for this character".to_string());
    }

    let patterns = compile(targets);
    let targeted: Vec<usize> = locations
        .iter()
        .enumerate()
        .filter(|(_, l)| patterns.is_empty() || any_match(&patterns, &l.name))
        .map(|(i, _)| i)
        .collect();

    if targeted.is_empty() {
        tracing::warn!(formula, ?targets, "DR change matched no hit locations");
        return DrChangeOutcome::unchanged(format!(
            "No hit locations match '{}'",
            targets.join(", ")
        ));
    }

    let parsed = DrFormula::parse(formula);
    let mut changes = ChangeSet::new();
    let mut names = Vec::new();
    for &i in &targeted {
        let before = locations[i].clone();
        let mut after = before.clone();
        parsed.apply(&mut after);
        after.changes(&before, &mut changes);
        if after != before {
            names.push(after.name.clone());
            locations[i] = after;
        }
    }

    if names.is_empty() {
        return DrChangeOutcome::unchanged(format!("DR '{}' changed nothing", formula.trim()));
    }

    tracing::info!(formula, locations = names.len(), "DR changed");
    DrChangeOutcome {
        changed: true,
        message: format!("DR '{}' applied to {}", formula.trim(), names.join(", ")),
        changes,
    }
}
