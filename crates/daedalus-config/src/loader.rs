//! Configuration loader with layered approach.
//!
//! This module provides the [`ConfigLoader`] for building an
//! [`ApplicationConfig`] from flat maps, TOML/JSON strings, and environment
//! variables.

use std::env;

use serde_json::Value;

use crate::{ApplicationConfig, ConfigError, ENVIRONMENT_KEY};

/// Configuration loader with layered approach.
///
/// Each layer is deep-merged over the previous ones, so later layers
/// override earlier ones key by key.
///
/// # Example
///
/// ```
/// use daedalus_config::ConfigLoader;
///
/// # fn main() -> Result<(), daedalus_config::ConfigError> {
/// let config = ConfigLoader::new()
///     .with_map([("daedalus.deployment.environment", "test")])
///     .with_string("[daedalus.application]\nclass = \"shop::App\"", "toml")?
///     .load()?;
///
/// assert!(config.is_test());
/// assert_eq!(config.application_class()?, "shop::App");
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Default)]
pub struct ConfigLoader {
    config: ApplicationConfig,
}

impl ConfigLoader {
    /// Create a new, empty configuration loader.
    #[must_use]
    pub fn new() -> Self {
        Self {
            config: ApplicationConfig::new(),
        }
    }

    /// Add a layer of flat `(dotted key, value)` pairs.
    #[must_use]
    pub fn with_map<I, K, V>(mut self, pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        self.config.merge(ApplicationConfig::from_map(pairs));
        self
    }

    /// Add a layer parsed from a string.
    ///
    /// # Arguments
    ///
    /// * `content` - Configuration content as a string
    /// * `format` - Content format ("toml" or "json")
    pub fn with_string(mut self, content: &str, format: &str) -> Result<Self, ConfigError> {
        let value: Value = match format.to_lowercase().as_str() {
            "toml" => toml::from_str(content)?,
            "json" => serde_json::from_str(content)?,
            _ => {
                return Err(ConfigError::validation_error(format!(
                    "unsupported configuration format: {format}"
                )))
            }
        };

        self.config.merge(ApplicationConfig::from_value(value)?);
        Ok(self)
    }

    /// Add a layer from the process environment.
    ///
    /// Variables use the format `PREFIX__SECTION__KEY`. For example, with
    /// prefix "DAEDALUS", `DAEDALUS__DEPLOYMENT__ENVIRONMENT=test` sets
    /// `deployment.environment`.
    pub fn with_env_prefix(self, prefix: &str) -> Result<Self, ConfigError> {
        self.with_env_vars(prefix, env::vars())
    }

    /// Add a layer from an explicit set of environment-style variables.
    ///
    /// Variables not starting with `PREFIX__` are ignored.
    pub fn with_env_vars<I, K, V>(mut self, prefix: &str, vars: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut layer = ApplicationConfig::new();
        for (name, value) in vars {
            let name = name.as_ref();
            let Some(rest) = name
                .strip_prefix(prefix)
                .and_then(|rest| rest.strip_prefix("__"))
            else {
                continue;
            };

            let segments: Vec<String> = rest.split("__").map(str::to_lowercase).collect();
            if segments.iter().any(String::is_empty) {
                return Err(ConfigError::env_parse_error(name, "empty key segment"));
            }

            tracing::trace!(var = name, "applying environment override");
            layer.set(&segments.join("."), Value::String(value.into()));
        }

        self.config.merge(layer);
        Ok(self)
    }

    /// Finish loading and validate the result.
    pub fn load(self) -> Result<ApplicationConfig, ConfigError> {
        if let Some(environment) = self.config.property(ENVIRONMENT_KEY) {
            if !environment.is_string() {
                return Err(ConfigError::invalid_value(ENVIRONMENT_KEY, "expected a string"));
            }
        }

        tracing::debug!(
            environment = self.config.environment(),
            "configuration loaded"
        );
        Ok(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::APPLICATION_CLASS_KEY;

    #[test]
    fn test_empty_loader() {
        let config = ConfigLoader::new().load().unwrap();
        assert!(config.is_empty());
    }

    #[test]
    fn test_with_map() {
        let config = ConfigLoader::new()
            .with_map([(ENVIRONMENT_KEY, "test")])
            .load()
            .unwrap();
        assert!(config.is_test());
    }

    #[test]
    fn test_with_string_toml() {
        let toml = r#"
            [daedalus.deployment]
            environment = "staging"

            [daedalus.application]
            class = "shop::App"
        "#;

        let config = ConfigLoader::new()
            .with_string(toml, "toml")
            .unwrap()
            .load()
            .unwrap();

        assert_eq!(config.environment(), "staging");
        assert_eq!(config.application_class().unwrap(), "shop::App");
    }

    #[test]
    fn test_with_string_json() {
        let json = r#"{"daedalus": {"application": {"class": "shop::App"}}}"#;
        let config = ConfigLoader::new()
            .with_string(json, "JSON")
            .unwrap()
            .load()
            .unwrap();
        assert_eq!(config.string(APPLICATION_CLASS_KEY), Some("shop::App"));
    }

    #[test]
    fn test_with_string_json_not_a_table() {
        let result = ConfigLoader::new().with_string("[1, 2]", "json");
        assert!(matches!(result, Err(ConfigError::ValidationError(_))));
    }

    #[test]
    fn test_with_string_invalid_toml() {
        let result = ConfigLoader::new().with_string("this is not toml", "toml");
        assert!(matches!(result, Err(ConfigError::TomlError(_))));
    }

    #[test]
    fn test_unsupported_format() {
        let result = ConfigLoader::new().with_string("a: b", "yaml");
        assert!(matches!(result, Err(ConfigError::ValidationError(_))));
    }

    #[test]
    fn test_later_layers_win() {
        let config = ConfigLoader::new()
            .with_map([(ENVIRONMENT_KEY, "production"), (APPLICATION_CLASS_KEY, "a::A")])
            .with_map([(ENVIRONMENT_KEY, "test")])
            .load()
            .unwrap();

        assert!(config.is_test());
        assert_eq!(config.application_class().unwrap(), "a::A");
    }

    #[test]
    fn test_with_env_vars() {
        let config = ConfigLoader::new()
            .with_map([(ENVIRONMENT_KEY, "production")])
            .with_env_vars(
                "SHOP",
                [
                    ("SHOP__DAEDALUS__DEPLOYMENT__ENVIRONMENT", "test"),
                    ("OTHER__DAEDALUS__APPLICATION__CLASS", "ignored"),
                    ("SHOPPING__X", "ignored"),
                ],
            )
            .unwrap()
            .load()
            .unwrap();

        assert!(config.is_test());
        assert!(config.application_class().is_err());
        assert!(!config.contains("x"));
    }

    #[test]
    fn test_with_env_vars_empty_segment() {
        let result = ConfigLoader::new().with_env_vars("SHOP", [("SHOP__A____B", "x")]);
        assert!(matches!(result, Err(ConfigError::EnvParseError { .. })));
    }

    #[test]
    fn test_load_rejects_non_string_environment() {
        let result = ConfigLoader::new()
            .with_string(r#"{"daedalus": {"deployment": {"environment": 3}}}"#, "json")
            .unwrap()
            .load();
        assert!(matches!(result, Err(ConfigError::InvalidValue { .. })));
    }
}
