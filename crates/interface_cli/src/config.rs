//! CLI configuration

use serde::Deserialize;

use domain_claims::EngineConfig;

/// Process configuration
///
/// Read from `CLAIMS_*` environment variables. Engine settings are nested
/// under `CLAIMS_ENGINE__`, e.g. `CLAIMS_ENGINE__NEAR_DEADLINE_THRESHOLD_DAYS=14`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// Log filter used when `RUST_LOG` is not set
    pub log_level: String,
    /// Emit logs as JSON lines
    pub json_logs: bool,
    /// Rule engine settings
    pub engine: EngineConfig,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            log_level: "warn".to_string(),
            json_logs: false,
            engine: EngineConfig::default(),
        }
    }
}

impl CliConfig {
    /// Loads configuration from environment
    pub fn from_env() -> Result<Self, config::ConfigError> {
        Self::from_source(config::Environment::with_prefix("CLAIMS"))
    }

    /// Loads configuration from an explicit environment source
    pub fn from_source(source: config::Environment) -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(
                source
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> CliConfig {
        let env: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        CliConfig::from_source(config::Environment::with_prefix("CLAIMS").source(Some(env)))
            .unwrap()
    }

    #[test]
    fn test_defaults_without_variables() {
        let config = load(&[]);
        assert_eq!(config.log_level, "warn");
        assert!(!config.json_logs);
        assert_eq!(config.engine.near_deadline_threshold_days, 30);
    }

    #[test]
    fn test_nested_engine_settings() {
        let config = load(&[
            ("CLAIMS_LOG_LEVEL", "debug"),
            ("CLAIMS_JSON_LOGS", "true"),
            ("CLAIMS_ENGINE__NEAR_DEADLINE_THRESHOLD_DAYS", "14"),
            ("CLAIMS_ENGINE__WARNING_LABEL", "WARN"),
            ("CLAIMS_ENGINE__FILING_TIMEZONE", "America/Chicago"),
        ]);

        assert_eq!(config.log_level, "debug");
        assert!(config.json_logs);
        assert_eq!(config.engine.near_deadline_threshold_days, 14);
        assert_eq!(config.engine.warning_label, "WARN");
        assert_eq!(config.engine.filing_timezone.name(), "America/Chicago");
    }
}
