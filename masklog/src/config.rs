//! Logger configuration, deserializable with serde.

use serde::{Deserialize, Serialize};

use crate::level::Level;

/// Settings a [`Logger`](crate::Logger) is built from.
///
/// Every field has a default, so a partial document deserializes cleanly:
///
/// ```rust
/// let config: masklog::Config =
///     serde_json::from_str(r#"{ "app_name": "billing", "masking": { "enabled": true } }"#).unwrap();
///
/// assert_eq!(config.level, "debug");
/// assert!(config.caller_enable);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Written to every record as `appName`; omitted when empty.
    pub app_name: String,
    /// Minimum level name. Unknown names fall back to `debug`.
    pub level: String,
    pub masking: MaskingConfig,
    /// Adds `file` and `func` to every record.
    pub caller_enable: bool,
}

impl Config {
    /// The configured level, parsed leniently.
    pub fn parsed_level(&self) -> Level {
        Level::parse_lenient(&self.level)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            app_name: String::new(),
            level: Level::Debug.as_str().to_owned(),
            masking: MaskingConfig::default(),
            caller_enable: true,
        }
    }
}

/// Masking switch and the names added to the built-in sensitive set.
///
/// `sensitive_fields` are always added to the classifier; `enabled` only decides
/// whether payloads are masked.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MaskingConfig {
    pub enabled: bool,
    pub sensitive_fields: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::Config;
    use crate::level::Level;

    #[test]
    fn default_config_logs_everything_from_debug() {
        let config = Config::default();
        assert_eq!(config.parsed_level(), Level::Debug);
        assert!(!config.masking.enabled);
        assert!(config.caller_enable);
    }

    #[test]
    fn invalid_level_falls_back_to_debug() {
        let config = Config {
            level: "loud".into(),
            ..Config::default()
        };
        assert_eq!(config.parsed_level(), Level::Debug);
    }

    #[test]
    fn deserializes_partial_documents() {
        let config: Config = serde_json::from_str(
            r#"{ "level": "WARN", "masking": { "enabled": true, "sensitive_fields": ["lastName"] } }"#,
        )
        .unwrap();
        assert_eq!(config.parsed_level(), Level::Warn);
        assert!(config.masking.enabled);
        assert_eq!(config.masking.sensitive_fields, vec!["lastName".to_string()]);
        assert!(config.app_name.is_empty());
    }
}
