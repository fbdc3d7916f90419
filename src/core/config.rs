use std::io::Read;

use serde::Deserialize;

use crate::core::error::ConfigError;
use crate::core::exposure::ExposureBands;
use crate::core::operator::BIOMT_PREFIX;
use crate::core::role::RoleMarkers;

fn record_prefix_default() -> String {
    BIOMT_PREFIX.to_string()
}

/// Tunables that are read from an optional JSON file.
///
/// Every field has a default, so an empty object `{}` is a valid configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Prefix of the header lines that hold operator rows.
    #[serde(default = "record_prefix_default")]
    pub record_prefix: String,
    #[serde(default)]
    pub roles: RoleMarkers,
    #[serde(default)]
    pub exposure: ExposureBands,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            record_prefix: record_prefix_default(),
            roles: RoleMarkers::default(),
            exposure: ExposureBands::default(),
        }
    }
}

impl Config {
    pub fn from_json(s: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(s)?;
        config.validate()
    }

    pub fn from_reader(reader: impl Read) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_reader(reader)?;
        config.validate()
    }

    fn validate(self) -> Result<Self, ConfigError> {
        if self.record_prefix.trim().is_empty() {
            return Err(ConfigError::Invalid("record_prefix must not be empty".to_string()));
        }
        // An empty marker is contained in every label and would swallow all chains.
        if self.roles.pentamer.is_empty() || self.roles.face.is_empty() {
            return Err(ConfigError::Invalid("role markers must not be empty".to_string()));
        }
        let ExposureBands {
            buried_below,
            exposed_above,
        } = self.exposure;
        if buried_below > exposed_above {
            return Err(ConfigError::Invalid(format!(
                "buried_below ({buried_below}) exceeds exposed_above ({exposed_above})"
            )));
        }
        Ok(self)
    }
}
