//! TaggedModifierResolver - pushes applicable standing modifiers onto a roll

use super::{
    collect_standing_modifiers, ModifierStack, ModifierStackEntry, RollAction, RollKind,
    RollReference, StandingModifier, TargetingSource,
};
use crate::bonus::grammar::{self, ParsedModifier};
use crate::config::{EngineSettings, TagGroup, TagSettings};
use crate::persistence::PersistenceError;
use crate::sheet::Character;
use std::collections::HashSet;

/// Tag that restricts a modifier to rolls made with its `@` referenced item
const MANEUVER_TAG: &str = "maneuver";

/// Lowercased tags that apply to `action`: all-rolls tags, the tags of the
/// action's groups, and the action's own tags.
pub fn applicable_tags(tags: &TagSettings, action: &RollAction) -> HashSet<String> {
    std::iter::once(TagGroup::AllRolls)
        .chain(action.kind.tag_groups().iter().copied())
        .flat_map(|group| tags.group(group).iter())
        .chain(action.tags.iter())
        .map(|tag| tag.to_lowercase())
        .collect()
}

fn applies(
    standing: &StandingModifier,
    parsed: &ParsedModifier,
    action: &RollAction,
    applicable: &HashSet<String>,
    tags: &TagSettings,
    in_encounter: bool,
) -> bool {
    let has = |wanted: &str| parsed.tags.iter().any(|t| t.eq_ignore_ascii_case(wanted));

    if has(tags.combat_only.as_str()) && !in_encounter {
        return false;
    }
    if has(tags.non_combat_only.as_str()) && in_encounter {
        return false;
    }
    if has(MANEUVER_TAG)
        && !parsed.references.is_empty()
        && !parsed.references.iter().any(|r| action.refers_to(r))
    {
        return false;
    }
    if let Some(path) = &standing.item_path {
        if action.item_path.as_deref() != Some(path.as_str()) {
            return false;
        }
    }

    let is_control = |tag: &str| {
        tag.eq_ignore_ascii_case(MANEUVER_TAG)
            || tag.eq_ignore_ascii_case(&tags.combat_only)
            || tag.eq_ignore_ascii_case(&tags.non_combat_only)
    };
    let mut selecting = parsed.tags.iter().filter(|t| !is_control(t.as_str())).peekable();
    // Untagged modifiers are never applied automatically
    selecting.peek().is_some() && selecting.all(|t| applicable.contains(&t.to_lowercase()))
}

/// Push every standing modifier that applies to `reference` onto `stack`,
/// one at a time in collection order.
///
/// Returns whether the roll is a damage roll. Nothing is pushed when tagged
/// modifiers are turned off.
pub async fn resolve_tagged_modifiers<S, T>(
    character: &Character,
    reference: &RollReference,
    targets: &T,
    settings: &EngineSettings,
    in_encounter: bool,
    stack: &S,
) -> Result<bool, PersistenceError>
where
    S: ModifierStack + ?Sized,
    T: TargetingSource + ?Sized,
{
    let action = reference.action();
    let is_damage = action.kind == RollKind::Damage;
    if !settings.use_tagged_modifiers {
        return Ok(is_damage);
    }

    let applicable = applicable_tags(&settings.tags, &action);
    let entries: Vec<ModifierStackEntry> = collect_standing_modifiers(character, targets)
        .iter()
        .filter_map(|standing| {
            let parsed = grammar::modifier(&standing.text).or_else(|| {
                tracing::trace!(text = standing.text.as_str(), "skipping unparsable modifier");
                None
            })?;
            applies(standing, &parsed, &action, &applicable, &settings.tags, in_encounter).then(
                || ModifierStackEntry {
                    amount: parsed.amount,
                    description: parsed.description,
                    tags: parsed.tags,
                },
            )
        })
        .collect();

    tracing::debug!(
        character = character.id.as_str(),
        roll = ?action.kind,
        pushed = entries.len(),
        "resolved tagged modifiers"
    );
    for entry in entries {
        stack.push(entry).await?;
    }
    Ok(is_damage)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modifiers::{MemoryStack, NoTargets};
    use crate::source::Equipment;

    fn actor(self_mods: &[&str]) -> Character {
        let mut character = Character::new("a", "Archer")
            .with_item(Equipment::new("Long Bow", 3.0).with_user_mod("+1 Elven make #ranged"));
        character.conditions.self_mods = self_mods.iter().map(|m| m.to_string()).collect();
        character
    }

    async fn resolve(character: &Character, reference: RollReference, in_encounter: bool) -> Vec<ModifierStackEntry> {
        let stack = MemoryStack::new();
        resolve_tagged_modifiers(
            character,
            &reference,
            &NoTargets,
            &EngineSettings::default(),
            in_encounter,
            &stack,
        )
        .await
        .unwrap();
        stack.entries()
    }

    #[test]
    fn test_applicable_tags() {
        let tags = applicable_tags(
            &TagSettings::default(),
            &RollAction::new(RollKind::Parry, "Broadsword").with_tag("Sword"),
        );
        for tag in ["allrolls", "defense", "parry", "sword"] {
            assert!(tags.contains(tag), "missing {tag}");
        }
        assert!(!tags.contains("attack"));
    }

    #[tokio::test]
    async fn test_all_rolls_modifier_pushed() {
        let character = actor(&["+2 Aim #allRolls"]);
        let entries = resolve(&character, "S:Stealth".into(), false).await;
        assert_eq!(
            entries,
            vec![ModifierStackEntry {
                amount: 2,
                description: "Aim".to_string(),
                tags: vec!["allRolls".to_string()],
            }]
        );
    }

    #[tokio::test]
    async fn test_every_tag_must_apply() {
        let character = actor(&["-1 Bad footing #attack #dodge"]);
        assert!(resolve(&character, "M:Sword".into(), true).await.is_empty());
        assert!(resolve(&character, "Dodge".into(), true).await.is_empty());
    }

    #[tokio::test]
    async fn test_combat_exclusivity() {
        let character = actor(&["+1 Cover #combatOnly #defense", "+1 Calm #nonCombatOnly #skill"]);

        let dodge_out = resolve(&character, "Dodge".into(), false).await;
        assert!(dodge_out.is_empty());
        let dodge_in = resolve(&character, "Dodge".into(), true).await;
        assert_eq!(dodge_in.len(), 1);

        assert_eq!(resolve(&character, "S:Lockpicking".into(), false).await.len(), 1);
        assert!(resolve(&character, "S:Lockpicking".into(), true).await.is_empty());
    }

    #[tokio::test]
    async fn test_item_scoped_modifier() {
        let character = actor(&[]);
        let bow = RollAction::new(RollKind::RangedAttack, "Long Bow").with_item_path("long_bow");
        let sling = RollAction::new(RollKind::RangedAttack, "Sling").with_item_path("sling");

        assert_eq!(resolve(&character, bow.into(), true).await.len(), 1);
        assert!(resolve(&character, sling.into(), true).await.is_empty());
    }

    #[tokio::test]
    async fn test_maneuver_modifier_needs_matching_reference() {
        let character = actor(&["+4 Committed #maneuver #attack @Axe"]);
        let axe = RollAction::new(RollKind::MeleeAttack, "Axe");
        let sword = RollAction::new(RollKind::MeleeAttack, "Sword");

        assert_eq!(resolve(&character, axe.into(), true).await.len(), 1);
        assert!(resolve(&character, sword.into(), true).await.is_empty());
    }

    #[tokio::test]
    async fn test_untagged_and_unparsable_skipped() {
        let character = actor(&["+3 Lucky", "Feeling good #allRolls"]);
        assert!(resolve(&character, "IQ".into(), false).await.is_empty());
    }

    #[tokio::test]
    async fn test_damage_flag_and_disabled_setting() {
        let character = actor(&["+2 Aim #allRolls"]);
        let stack = MemoryStack::new();
        let settings = EngineSettings {
            use_tagged_modifiers: false,
            ..EngineSettings::default()
        };

        let is_damage = resolve_tagged_modifiers(
            &character,
            &"D:Axe".into(),
            &NoTargets,
            &settings,
            true,
            &stack,
        )
        .await
        .unwrap();

        assert!(is_damage);
        assert!(stack.entries().is_empty());
    }
}
