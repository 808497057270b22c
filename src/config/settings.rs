//! Application settings loading from config.toml
//!
//! Every setting has a default, and the file itself is optional, so a
//! bare checkout runs without any configuration.

use crate::errors::{Error, Result};
use serde::Deserialize;
use std::path::Path;

/// Settings structure representing the entire config.toml file
#[derive(Debug, Default, Deserialize)]
pub struct Settings {
    /// Messaging-related settings
    #[serde(default)]
    pub messaging: MessagingSettings,
    /// Donation ledger settings
    #[serde(default)]
    pub donations: DonationSettings,
}

/// Settings for outbound donor messages
#[derive(Debug, Deserialize)]
pub struct MessagingSettings {
    /// Country calling code substituted for the leading trunk `0`
    #[serde(default = "default_country_code")]
    pub country_code: String,
}

impl Default for MessagingSettings {
    fn default() -> Self {
        Self {
            country_code: default_country_code(),
        }
    }
}

/// Settings for the device-local donation ledger
#[derive(Debug, Deserialize)]
pub struct DonationSettings {
    /// Where the "my commitments" ledger file lives
    #[serde(default = "default_ledger_path")]
    pub ledger_path: String,
}

impl Default for DonationSettings {
    fn default() -> Self {
        Self {
            ledger_path: default_ledger_path(),
        }
    }
}

fn default_country_code() -> String {
    crate::core::messaging::DEFAULT_COUNTRY_CODE.to_string()
}

fn default_ledger_path() -> String {
    "data/my_donations.json".to_string()
}

/// Loads settings from a TOML file.
///
/// # Errors
/// Returns an error if the file cannot be read or the TOML is invalid.
pub fn load_settings<P: AsRef<Path>>(path: P) -> Result<Settings> {
    let contents = std::fs::read_to_string(path.as_ref()).map_err(|e| Error::Config {
        message: format!("Failed to read settings file: {e}"),
    })?;

    toml::from_str(&contents).map_err(|e| Error::Config {
        message: format!("Failed to parse config.toml: {e}"),
    })
}

/// Loads settings from the default location (./config.toml), falling
/// back to defaults when the file does not exist.
pub fn load_default_settings() -> Result<Settings> {
    if Path::new("config.toml").exists() {
        load_settings("config.toml")
    } else {
        Ok(Settings::default())
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn test_parse_settings() {
        let toml_str = r#"
            [messaging]
            country_code = "44"

            [donations]
            ledger_path = "/tmp/donations.json"
        "#;

        let settings: Settings = toml::from_str(toml_str).unwrap();
        assert_eq!(settings.messaging.country_code, "44");
        assert_eq!(settings.donations.ledger_path, "/tmp/donations.json");
    }

    #[test]
    fn missing_sections_use_defaults() {
        let settings: Settings = toml::from_str("").unwrap();
        assert_eq!(settings.messaging.country_code, "94");
        assert_eq!(settings.donations.ledger_path, "data/my_donations.json");
    }
}
