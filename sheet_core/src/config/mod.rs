//! Configuration loading from TOML files

mod body_plans;
mod settings;

pub use body_plans::{
    default_body_plans, load_body_plans, parse_body_plans, BodyPlan, BodyPlanRegistry,
    LocationTemplate,
};
pub use settings::{
    default_settings, load_settings, parse_settings, EngineSettings, ManeuverDetail,
    ManeuverVisibility, TagGroup, TagSettings,
};

use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Failure to load engine settings or body plans
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("cannot read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed TOML: {0}")]
    Toml(#[from] toml::de::Error),
    /// Parsed, but the values are inconsistent
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Read and deserialize a TOML file
pub fn load_toml<T: DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_toml(&content)
}

/// Deserialize TOML text
pub fn parse_toml<T: DeserializeOwned>(content: &str) -> Result<T, ConfigError> {
    Ok(toml::from_str(content)?)
}
