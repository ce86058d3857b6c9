//! Dice formulas of the form `NdS±A`, and scaling them by a repeat count

use crate::bonus::grammar;
use std::fmt;

/// A parsed damage formula such as `2d+1 cut` or `1d6-1`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiceFormula {
    pub dice: u32,
    /// Die size, when written explicitly (`d` alone means six-sided)
    pub sides: Option<u32>,
    pub adds: i32,
    /// Whatever follows the dice expression, such as the damage type
    pub suffix: String,
}

impl DiceFormula {
    /// Parse `N "d" S? (("+" | "-") A)? suffix`
    pub fn parse(text: &str) -> Option<Self> {
        let text = text.trim();
        let d = text.find(['d', 'D'])?;
        let dice: u32 = text[..d].trim().parse().ok()?;

        let rest = &text[d + 1..];
        let sides_end = rest
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(rest.len());
        let sides = rest[..sides_end].parse().ok();
        let rest = &rest[sides_end..];

        let (adds, suffix) = match grammar::signed(rest) {
            Some((adds, suffix)) => (adds, suffix),
            None => (0, rest),
        };

        Some(DiceFormula {
            dice,
            sides,
            adds,
            suffix: suffix.trim().to_string(),
        })
    }

    /// Roll the dice `count` times as one roll: dice and adds both scale
    pub fn times(&self, count: u32) -> Self {
        DiceFormula {
            dice: self.dice * count,
            adds: self.adds * count as i32,
            ..self.clone()
        }
    }
}

impl fmt::Display for DiceFormula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}d", self.dice)?;
        if let Some(sides) = self.sides {
            write!(f, "{sides}")?;
        }
        if self.adds != 0 {
            write!(f, "{:+}", self.adds)?;
        }
        if !self.suffix.is_empty() {
            write!(f, " {}", self.suffix)?;
        }
        Ok(())
    }
}

/// Scale a formula string by `count`. Text that is not a dice formula is returned as is.
pub fn multiply_formula(formula: &str, count: u32) -> String {
    match DiceFormula::parse(formula) {
        Some(dice) => dice.times(count).to_string(),
        None => formula.to_string(),
    }
}

/// Scale every `*Costs N TYPE` clause in a cost string by `count`
pub fn multiply_costs(costs: &str, count: u32) -> String {
    const MARKER: &str = "*Costs ";
    let mut out = String::with_capacity(costs.len());
    let mut rest = costs;

    while let Some(at) = rest.find(MARKER) {
        let (before, after) = rest.split_at(at + MARKER.len());
        out.push_str(before);
        let digits_end = after
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(after.len());
        match after[..digits_end].parse::<u32>() {
            Ok(n) => out.push_str(&(n * count).to_string()),
            Err(_) => out.push_str(&after[..digits_end]),
        }
        rest = &after[digits_end..];
    }
    out.push_str(rest);
    out
}
