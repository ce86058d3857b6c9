//! Engine settings: the named options consulted by the resolvers

use super::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Who may see another character's current maneuver
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ManeuverVisibility {
    NoOne,
    #[default]
    GmAndOwner,
    Everyone,
}

/// How much of a maneuver is revealed to viewers who are allowed to see it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ManeuverDetail {
    /// Exact maneuver name
    #[default]
    Full,
    /// Feints are shown as plain attacks
    NoFeint,
    /// Only the maneuver family (Attack, All-Out Attack, ...)
    General,
}

/// Settings-defined tag groups a roll reference can pull tags from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TagGroup {
    AllRolls,
    Attack,
    MeleeAttack,
    RangedAttack,
    Defense,
    Parry,
    Block,
    Dodge,
    Damage,
    Skill,
    Spell,
    Attribute,
    Check,
}

/// Tag lists per group, plus the combat exclusivity pair
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TagSettings {
    pub all_rolls: Vec<String>,
    pub attack: Vec<String>,
    pub melee_attack: Vec<String>,
    pub ranged_attack: Vec<String>,
    pub defense: Vec<String>,
    pub parry: Vec<String>,
    pub block: Vec<String>,
    pub dodge: Vec<String>,
    pub damage: Vec<String>,
    pub skill: Vec<String>,
    pub spell: Vec<String>,
    pub attribute: Vec<String>,
    pub check: Vec<String>,
    /// Modifiers carrying this tag only apply inside an encounter
    pub combat_only: String,
    /// Modifiers carrying this tag only apply outside an encounter
    pub non_combat_only: String,
}

impl Default for TagSettings {
    fn default() -> Self {
        fn tags(list: &[&str]) -> Vec<String> {
            list.iter().map(|t| t.to_string()).collect()
        }

        TagSettings {
            all_rolls: tags(&["allRolls"]),
            attack: tags(&["attack"]),
            melee_attack: tags(&["melee"]),
            ranged_attack: tags(&["ranged"]),
            defense: tags(&["defense"]),
            parry: tags(&["parry"]),
            block: tags(&["block"]),
            dodge: tags(&["dodge"]),
            damage: tags(&["damage"]),
            skill: tags(&["skill"]),
            spell: tags(&["spell"]),
            attribute: tags(&["attribute"]),
            check: tags(&["check"]),
            combat_only: "combatOnly".to_string(),
            non_combat_only: "nonCombatOnly".to_string(),
        }
    }
}

impl TagSettings {
    /// Get the configured tags of a group
    pub fn group(&self, group: TagGroup) -> &[String] {
        match group {
            TagGroup::AllRolls => &self.all_rolls,
            TagGroup::Attack => &self.attack,
            TagGroup::MeleeAttack => &self.melee_attack,
            TagGroup::RangedAttack => &self.ranged_attack,
            TagGroup::Defense => &self.defense,
            TagGroup::Parry => &self.parry,
            TagGroup::Block => &self.block,
            TagGroup::Dodge => &self.dodge,
            TagGroup::Damage => &self.damage,
            TagGroup::Skill => &self.skill,
            TagGroup::Spell => &self.spell,
            TagGroup::Attribute => &self.attribute,
            TagGroup::Check => &self.check,
        }
    }
}

/// Named options consulted throughout the engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineSettings {
    /// Select the encumbrance tier from carried weight instead of the stored index
    pub automatic_encumbrance: bool,
    /// Let maneuver and posture reduce move during an encounter
    pub maneuver_updates_move: bool,
    /// Only equipped items contribute parry/block scores
    pub check_equipped_only: bool,
    /// Push tagged standing modifiers onto the modifier stack
    pub use_tagged_modifiers: bool,
    pub maneuver_visibility: ManeuverVisibility,
    pub maneuver_detail: ManeuverDetail,
    pub tags: TagSettings,
}

impl Default for EngineSettings {
    fn default() -> Self {
        EngineSettings {
            automatic_encumbrance: true,
            maneuver_updates_move: true,
            check_equipped_only: false,
            use_tagged_modifiers: true,
            maneuver_visibility: ManeuverVisibility::default(),
            maneuver_detail: ManeuverDetail::default(),
            tags: TagSettings::default(),
        }
    }
}

impl EngineSettings {
    fn validate(self) -> Result<Self, ConfigError> {
        let tags = &self.tags;
        if tags.combat_only.trim().is_empty() || tags.non_combat_only.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "combat_only and non_combat_only tags must not be empty".to_string(),
            ));
        }
        if tags.combat_only.eq_ignore_ascii_case(&tags.non_combat_only) {
            return Err(ConfigError::Invalid(format!(
                "combat_only and non_combat_only tags must differ (both '{}')",
                tags.combat_only
            )));
        }
        Ok(self)
    }
}

/// Load engine settings from a TOML file
pub fn load_settings(path: &Path) -> Result<EngineSettings, ConfigError> {
    let settings: EngineSettings = super::load_toml(path)?;
    settings.validate()
}

/// Load engine settings from a TOML string
pub fn parse_settings(content: &str) -> Result<EngineSettings, ConfigError> {
    let settings: EngineSettings = super::parse_toml(content)?;
    settings.validate()
}

/// Get the shipped default settings
pub fn default_settings() -> EngineSettings {
    let toml = include_str!("../../config/settings.toml");
    parse_settings(toml).unwrap_or_default()
}
