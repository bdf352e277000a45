//! Application settings.
//!
//! Loaded from a TOML file, then overridden from the environment:
//!
//! ```toml
//! log_filter = "author_flux=debug"
//! min_name_length = 3
//!
//! [[seed.authors]]
//! id = "cory-house"
//! firstName = "Cory"
//! lastName = "House"
//! ```

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::action::InitialData;
use crate::author::AuthorValidation;
use crate::error::ConfigError;

pub const ENV_LOG_FILTER: &str = "AUTHOR_FLUX_LOG";
pub const ENV_MIN_NAME_LENGTH: &str = "AUTHOR_FLUX_MIN_NAME_LENGTH";

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub log_filter: String,
    pub min_name_length: usize,
    /// Authors loaded by the INITIALISE action at startup.
    pub seed: InitialData,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_filter: "info".into(),
            min_name_length: AuthorValidation::default().min_name_length,
            seed: InitialData::default(),
        }
    }
}

impl AppConfig {
    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(raw)?)
    }

    /// Read `path` and apply environment overrides.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let mut config = Self::from_toml_str(&raw)?;
        config.apply_overrides(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Apply overrides from `lookup`, which maps a variable name to its value.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = lookup(ENV_LOG_FILTER) {
            self.log_filter = v;
        }
        if let Some(v) = lookup(ENV_MIN_NAME_LENGTH) {
            self.min_name_length = v.trim().parse().map_err(|_| ConfigError::InvalidOverride {
                key: ENV_MIN_NAME_LENGTH,
                value: v.clone(),
            })?;
        }
        Ok(())
    }

    pub fn validation(&self) -> AuthorValidation {
        AuthorValidation::new(self.min_name_length)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::author::Author;

    #[test]
    fn empty_file_uses_defaults() {
        let config = AppConfig::from_toml_str("").unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.min_name_length, 3);
    }

    #[test]
    fn parses_seed_authors() {
        let config = AppConfig::from_toml_str(
            r#"
            log_filter = "debug"

            [[seed.authors]]
            id = "cory-house"
            firstName = "Cory"
            lastName = "House"

            [[seed.authors]]
            id = "scott-allen"
            firstName = "Scott"
            lastName = "Allen"
            "#,
        )
        .unwrap();

        assert_eq!(config.log_filter, "debug");
        assert_eq!(
            config.seed.authors,
            vec![
                Author::new("cory-house", "Cory", "House"),
                Author::new("scott-allen", "Scott", "Allen"),
            ]
        );
    }

    #[test]
    fn overrides_replace_file_values() {
        let mut config = AppConfig::default();
        config
            .apply_overrides(|key| match key {
                ENV_LOG_FILTER => Some("author_flux=trace".into()),
                ENV_MIN_NAME_LENGTH => Some(" 5 ".into()),
                _ => None,
            })
            .unwrap();

        assert_eq!(config.log_filter, "author_flux=trace");
        assert_eq!(config.validation().min_name_length, 5);
    }

    #[test]
    fn bad_override_is_reported() {
        let mut config = AppConfig::default();
        let err = config
            .apply_overrides(|key| (key == ENV_MIN_NAME_LENGTH).then(|| "three".to_string()))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidOverride { .. }));
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        assert!(matches!(
            AppConfig::from_toml_str("min_name_length = \"x\""),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        assert!(matches!(
            AppConfig::load("does/not/exist.toml"),
            Err(ConfigError::Io { .. })
        ));
    }
}
