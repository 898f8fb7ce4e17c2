use std::{fs, path::Path};

use serde::Deserialize;
use thiserror::Error;

use crate::icade::{select_table, CharacterTable, Locale};

pub const DEFAULT_BUFFER_RESET_INTERVAL: u32 = 20;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("unable to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid config: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("buffer_reset_interval must be at least 1")]
    InvalidResetInterval,
}

/// How `set_active(true)` behaves while the reader is already active.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivationPolicy {
    /// Activating twice does nothing.
    #[default]
    Idempotent,
    /// Activating twice drops and re-takes input focus.
    LegacyToggle,
}

/// Reader settings, usually loaded from `reader.yml`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReaderConfig {
    /// Locale identifier overriding the one reported by the host.
    pub locale: Option<String>,
    /// When false the English table is used regardless of locale.
    pub locale_sensitive: bool,
    /// Accepted key deliveries between two input buffer resets.
    pub buffer_reset_interval: u32,
    pub activation: ActivationPolicy,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            locale: None,
            locale_sensitive: true,
            buffer_reset_interval: DEFAULT_BUFFER_RESET_INTERVAL,
            activation: ActivationPolicy::default(),
        }
    }
}

impl ReaderConfig {
    pub fn from_yaml_str(source: &str) -> Result<Self, ConfigError> {
        let config: ReaderConfig = serde_yaml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let source = fs::read_to_string(path)?;
        Self::from_yaml_str(&source)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.buffer_reset_interval == 0 {
            return Err(ConfigError::InvalidResetInterval);
        }
        Ok(())
    }

    /// Resolve the character table. The configured locale wins over the
    /// one supplied by the host.
    pub fn table(&self, host_locale: Option<&str>) -> &'static CharacterTable {
        if !self.locale_sensitive {
            return CharacterTable::for_locale(Locale::En);
        }
        select_table(self.locale.as_deref().or(host_locale))
    }
}

#[cfg(test)]
mod tests {
    use super::{ActivationPolicy, ConfigError, ReaderConfig};
    use crate::icade::Locale;

    #[test]
    fn empty_document_uses_defaults() {
        let config = ReaderConfig::from_yaml_str("{}").unwrap();
        assert_eq!(config, ReaderConfig::default());
        assert_eq!(config.buffer_reset_interval, 20);
        assert_eq!(config.activation, ActivationPolicy::Idempotent);
    }

    #[test]
    fn parses_all_fields() {
        let config = ReaderConfig::from_yaml_str(
            "locale: fr_FR\nlocale_sensitive: true\nbuffer_reset_interval: 5\nactivation: legacy_toggle\n",
        )
        .unwrap();
        assert_eq!(config.locale.as_deref(), Some("fr_FR"));
        assert_eq!(config.buffer_reset_interval, 5);
        assert_eq!(config.activation, ActivationPolicy::LegacyToggle);
        assert_eq!(config.table(Some("de_DE")).locale, Locale::Fr);
    }

    #[test]
    fn host_locale_used_without_override() {
        let config = ReaderConfig::default();
        assert_eq!(config.table(Some("de_AT")).locale, Locale::De);
        assert_eq!(config.table(None).locale, Locale::En);
    }

    #[test]
    fn insensitive_config_always_english() {
        let config = ReaderConfig {
            locale: Some("de".into()),
            locale_sensitive: false,
            ..ReaderConfig::default()
        };
        assert_eq!(config.table(Some("fr")).locale, Locale::En);
    }

    #[test]
    fn rejects_zero_interval() {
        let err = ReaderConfig::from_yaml_str("buffer_reset_interval: 0").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidResetInterval));
    }

    #[test]
    fn rejects_unknown_keys() {
        let err = ReaderConfig::from_yaml_str("reset_every: 3").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = ReaderConfig::load("/nonexistent/reader.yml").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
