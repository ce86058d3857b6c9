//! Body plan templates used to create a character's hit locations

use super::ConfigError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// One location of a body plan template
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationTemplate {
    pub name: String,
    /// Base resistance the location starts with
    #[serde(default)]
    pub dr: i32,
}

/// A named, ordered list of hit locations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BodyPlan {
    pub id: String,
    pub name: String,
    pub locations: Vec<LocationTemplate>,
}

/// Container for body plan configurations
#[derive(Debug, Clone, Serialize, Deserialize)]
struct BodyPlansConfig {
    #[serde(rename = "body_plans")]
    body_plans: Vec<BodyPlan>,
}

/// Body plan registry
#[derive(Debug, Clone, Default)]
pub struct BodyPlanRegistry {
    plans: BTreeMap<String, BodyPlan>,
}

impl BodyPlanRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        BodyPlanRegistry {
            plans: BTreeMap::new(),
        }
    }

    /// Register a body plan, replacing any plan with the same id
    pub fn register(&mut self, plan: BodyPlan) {
        self.plans.insert(plan.id.clone(), plan);
    }

    /// Get a body plan by id
    pub fn get(&self, id: &str) -> Option<&BodyPlan> {
        self.plans.get(id)
    }


    fn from_config(config: BodyPlansConfig) -> Result<Self, ConfigError> {
        let mut registry = Self::new();
        for plan in config.body_plans {
            if plan.locations.is_empty() {
                return Err(ConfigError::Invalid(format!(
                    "body plan '{}' has no locations",
                    plan.id
                )));
            }
            registry.register(plan);
        }
        Ok(registry)
    }
}

/// Load body plans from a TOML file
pub fn load_body_plans(path: &Path) -> Result<BodyPlanRegistry, ConfigError> {
    let config: BodyPlansConfig = super::load_toml(path)?;
    BodyPlanRegistry::from_config(config)
}

/// Load body plans from a TOML string
pub fn parse_body_plans(content: &str) -> Result<BodyPlanRegistry, ConfigError> {
    let config: BodyPlansConfig = super::parse_toml(content)?;
    BodyPlanRegistry::from_config(config)
}

/// Get the shipped body plans
pub fn default_body_plans() -> BodyPlanRegistry {
    let toml = include_str!("../../config/body_plans.toml");
    parse_body_plans(toml).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_body_plans() {
        let toml = r#"
[[body_plans]]
id = "snake"
name = "Snake"

[[body_plans.locations]]
name = "Skull"
dr = 2

[[body_plans.locations]]
name = "Torso"
"#;

        let registry = parse_body_plans(toml).unwrap();
        let snake = registry.get("snake").unwrap();
        assert_eq!(snake.locations.len(), 2);
        assert_eq!(snake.locations[0].dr, 2);
        assert_eq!(snake.locations[1].dr, 0);
    }

    #[test]
    fn test_empty_plan_rejected() {
        let toml = r#"
[[body_plans]]
id = "ghost"
name = "Ghost"
locations = []
"#;

        assert!(matches!(
            parse_body_plans(toml),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[test]
    fn test_default_body_plans_loads_all() {
        let registry = default_body_plans();
        let humanoid = registry.get("humanoid").unwrap();
        assert!(humanoid.locations.iter().any(|l| l.name == "Left Arm"));
        assert!(humanoid.locations.iter().any(|l| l.name == "Skull" && l.dr == 2));
        assert!(registry.get("quadruped").is_some());
    }
}
