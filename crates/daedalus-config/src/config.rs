//! Application configuration tree.
//!
//! This module provides [`ApplicationConfig`], a key/value tree addressed with
//! dotted paths such as `daedalus.deployment.environment`.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::ConfigError;

/// Key naming the deployment environment (`"test"`, `"production"`, ...).
pub const ENVIRONMENT_KEY: &str = "daedalus.deployment.environment";

/// Key naming the application type to instantiate.
pub const APPLICATION_CLASS_KEY: &str = "daedalus.application.class";

/// Environment reported when [`ENVIRONMENT_KEY`] is absent.
pub const DEFAULT_ENVIRONMENT: &str = "development";

/// Environment name used by the in-process test host.
pub const TEST_ENVIRONMENT: &str = "test";

/// Application configuration.
///
/// Values live in a nested table. Dotted paths address nested entries, so
/// `daedalus.application.class` reads the `class` entry of the `application`
/// table inside the `daedalus` table.
///
/// # Example
///
/// ```
/// use daedalus_config::{ApplicationConfig, APPLICATION_CLASS_KEY, ENVIRONMENT_KEY};
///
/// let config = ApplicationConfig::from_map([
///     (ENVIRONMENT_KEY, "test"),
///     (APPLICATION_CLASS_KEY, "my_app::Shop"),
/// ]);
///
/// assert!(config.is_test());
/// assert_eq!(config.application_class().unwrap(), "my_app::Shop");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(transparent)]
pub struct ApplicationConfig {
    root: Map<String, Value>,
}

impl ApplicationConfig {
    /// Creates an empty configuration.
    #[must_use]
    pub fn new() -> Self {
        Self { root: Map::new() }
    }

    /// Builds a configuration from flat `(dotted key, value)` pairs.
    ///
    /// Later pairs override earlier ones.
    pub fn from_map<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut config = Self::new();
        for (key, value) in pairs {
            config.set(key.as_ref(), Value::String(value.into()));
        }
        config
    }

    /// Builds a configuration from a JSON value.
    ///
    /// The value must be an object.
    pub fn from_value(value: Value) -> Result<Self, ConfigError> {
        match value {
            Value::Object(root) => Ok(Self { root }),
            other => Err(ConfigError::validation_error(format!(
                "configuration root must be a table, got {other}"
            ))),
        }
    }

    /// Sets the value at a dotted path, creating intermediate tables.
    ///
    /// A non-table value standing in the way of the path is replaced by a table.
    pub fn set(&mut self, path: &str, value: impl Into<Value>) {
        let mut segments: Vec<&str> = path.split('.').filter(|s| !s.is_empty()).collect();
        let Some(leaf) = segments.pop() else {
            return;
        };

        let mut table = &mut self.root;
        for segment in segments {
            let next = table
                .entry(segment.to_string())
                .or_insert_with(|| Value::Object(Map::new()));
            if !next.is_object() {
                *next = Value::Object(Map::new());
            }
            let Value::Object(next) = next else {
                return;
            };
            table = next;
        }
        table.insert(leaf.to_string(), value.into());
    }

    /// Returns the value at a dotted path.
    pub fn property(&self, path: &str) -> Option<&Value> {
        let mut segments = path.split('.').filter(|s| !s.is_empty());
        let first = segments.next()?;
        segments.try_fold(self.root.get(first)?, |value, segment| value.get(segment))
    }

    /// Returns `true` if a value exists at the dotted path.
    pub fn contains(&self, path: &str) -> bool {
        self.property(path).is_some()
    }

    /// Returns the string at a dotted path.
    ///
    /// Returns `None` if the path is absent or not a string.
    pub fn string(&self, path: &str) -> Option<&str> {
        self.property(path).and_then(Value::as_str)
    }

    /// Returns the string at a dotted path, failing if it is absent or not a string.
    pub fn require_string(&self, path: &str) -> Result<&str, ConfigError> {
        match self.property(path) {
            None => Err(ConfigError::missing_field(path)),
            Some(Value::String(value)) => Ok(value),
            Some(other) => Err(ConfigError::invalid_value(
                path,
                format!("expected a string, got {other}"),
            )),
        }
    }

    /// Returns the deployment environment name.
    pub fn environment(&self) -> &str {
        self.string(ENVIRONMENT_KEY).unwrap_or(DEFAULT_ENVIRONMENT)
    }

    /// Returns `true` when running in the test environment.
    pub fn is_test(&self) -> bool {
        self.environment() == TEST_ENVIRONMENT
    }

    /// Returns the configured application type name.
    pub fn application_class(&self) -> Result<&str, ConfigError> {
        self.require_string(APPLICATION_CLASS_KEY)
    }

    /// Deep-merges `other` into this configuration; values from `other` win.
    pub fn merge(&mut self, other: ApplicationConfig) {
        merge_tables(&mut self.root, other.root);
    }

    /// Returns the underlying table.
    pub fn as_table(&self) -> &Map<String, Value> {
        &self.root
    }

    /// Returns `true` if the configuration holds no entries.
    pub fn is_empty(&self) -> bool {
        self.root.is_empty()
    }
}

fn merge_tables(target: &mut Map<String, Value>, overlay: Map<String, Value>) {
    for (key, value) in overlay {
        if let Value::Object(incoming) = value {
            if let Some(Value::Object(existing)) = target.get_mut(&key) {
                merge_tables(existing, incoming);
                continue;
            }
            target.insert(key, Value::Object(incoming));
        } else {
            target.insert(key, value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_map_expands_dotted_keys() {
        let config = ApplicationConfig::from_map([
            (ENVIRONMENT_KEY, "test"),
            (APPLICATION_CLASS_KEY, "shop::App"),
        ]);

        assert_eq!(
            config.as_table().get("daedalus"),
            Some(&json!({
                "deployment": { "environment": "test" },
                "application": { "class": "shop::App" }
            }))
        );
    }

    #[test]
    fn test_environment_default() {
        let config = ApplicationConfig::new();
        assert_eq!(config.environment(), DEFAULT_ENVIRONMENT);
        assert!(!config.is_test());
    }

    #[test]
    fn test_is_test() {
        let config = ApplicationConfig::from_map([(ENVIRONMENT_KEY, "test")]);
        assert!(config.is_test());
    }

    #[test]
    fn test_application_class_missing() {
        let config = ApplicationConfig::from_map([(ENVIRONMENT_KEY, "test")]);
        let err = config.application_class().unwrap_err();
        assert!(matches!(err, ConfigError::MissingField { .. }));
    }

    #[test]
    fn test_require_string_wrong_type() {
        let mut config = ApplicationConfig::new();
        config.set(APPLICATION_CLASS_KEY, 42);
        let err = config.application_class().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
    }

    #[test]
    fn test_set_replaces_scalar_in_path() {
        let mut config = ApplicationConfig::from_map([("a.b", "scalar")]);
        config.set("a.b.c", "nested");
        assert_eq!(config.string("a.b.c"), Some("nested"));
    }

    #[test]
    fn test_set_empty_path_is_noop() {
        let mut config = ApplicationConfig::new();
        config.set("", "value");
        config.set("..", "value");
        assert!(config.is_empty());
    }

    #[test]
    fn test_property_missing_path() {
        let config = ApplicationConfig::from_map([("a.b", "value")]);
        assert!(config.property("a.c").is_none());
        assert!(config.property("a.b.c").is_none());
        assert!(config.contains("a.b"));
        assert!(config.contains("a"));
    }

    #[test]
    fn test_merge_is_deep() {
        let mut base = ApplicationConfig::from_map([("server.port", "80"), ("server.host", "a")]);
        base.merge(ApplicationConfig::from_map([("server.port", "8080")]));

        assert_eq!(base.string("server.port"), Some("8080"));
        assert_eq!(base.string("server.host"), Some("a"));
    }

    #[test]
    fn test_from_value_requires_table() {
        assert!(ApplicationConfig::from_value(json!({"a": 1})).is_ok());
        assert!(ApplicationConfig::from_value(json!([1, 2])).is_err());
    }
}
