//! Configuration types handed to a lint pass

use std::fmt;
use std::str::FromStr;

use indexmap::IndexMap;
use schemars::JsonSchema;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::{LintelError, Result};

/// Rule id to rule configuration (`2`, `"warn"`, `[2, "always"]`, ...)
pub type RulesConfig = IndexMap<String, Value>;

/// Configuration for one lint pass
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct LintConfig {
    /// Name of a shared configuration this one builds on
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(description = "Shared configuration this configuration extends")]
    pub extends: Option<String>,

    /// Rule configuration
    #[serde(default)]
    #[schemars(description = "Rule id to severity, or [severity, ...options]")]
    pub rules: RulesConfig,

    /// Everything else, carried through to every rule-set pass untouched
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    #[schemars(description = "Additional settings passed through to rules")]
    pub settings: Map<String, Value>,
}

impl LintConfig {
    pub fn new(rules: RulesConfig) -> Self {
        Self {
            rules,
            ..Self::default()
        }
    }

    /// A copy of this configuration with its rules replaced
    pub fn with_rules(&self, rules: RulesConfig) -> Self {
        Self {
            extends: self.extends.clone(),
            rules,
            settings: self.settings.clone(),
        }
    }

    /// JSON Schema describing the configuration format
    pub fn json_schema() -> Value {
        serde_json::to_value(schemars::schema_for!(LintConfig)).unwrap_or(Value::Null)
    }
}

/// Rule severity levels
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, JsonSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum RuleSeverity {
    /// Disable the rule
    Off,
    /// Warning (doesn't fail build)
    Warn,
    /// Error (fails build)
    Error,
}

impl RuleSeverity {
    /// Parse a bare severity value: `0`/`1`/`2` or `"off"`/`"warn"`/`"error"`
    pub fn from_value(value: &Value) -> Result<Self> {
        match value {
            Value::Number(number) => match number.as_u64() {
                Some(0) => Ok(Self::Off),
                Some(1) => Ok(Self::Warn),
                Some(2) => Ok(Self::Error),
                _ => Err(LintelError::config_error(format!(
                    "severity must be 0, 1 or 2, found {number}"
                ))),
            },
            Value::String(name) => name.parse(),
            other => Err(LintelError::config_error(format!(
                "severity must be a number or a string, found {other}"
            ))),
        }
    }

    /// Severity of a full rule configuration (bare severity or `[severity, ...]`)
    pub fn from_config(config: &Value) -> Result<Self> {
        match config {
            Value::Array(items) => {
                let first = items.first().ok_or_else(|| {
                    LintelError::config_error("rule configuration array is empty")
                })?;
                Self::from_value(first)
            }
            other => Self::from_value(other),
        }
    }

    pub fn as_number(self) -> u8 {
        match self {
            Self::Off => 0,
            Self::Warn => 1,
            Self::Error => 2,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Off => "off",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

impl fmt::Display for RuleSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RuleSeverity {
    type Err = LintelError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "off" => Ok(Self::Off),
            "warn" | "warning" => Ok(Self::Warn),
            "error" => Ok(Self::Error),
            _ => Err(LintelError::config_error(format!("unknown severity: {s}"))),
        }
    }
}

impl<'de> Deserialize<'de> for RuleSeverity {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Self::from_value(&value).map_err(serde::de::Error::custom)
    }
}

/// Options following the severity in an array configuration
pub fn rule_options(config: &Value) -> &[Value] {
    match config {
        Value::Array(items) if !items.is_empty() => &items[1..],
        _ => &[],
    }
}

/// Whether a configuration switches its rule on at error level
pub fn is_error_severity(config: &Value) -> bool {
    matches!(RuleSeverity::from_config(config), Ok(RuleSeverity::Error))
}

/// Rewrite numeric severities (`2`, `[1, "always"]`) to their names
pub fn normalize_to_strings(rules: &mut RulesConfig) {
    for config in rules.values_mut() {
        let slot = match config {
            Value::Array(items) => match items.first_mut() {
                Some(first) => first,
                None => continue,
            },
            other => other,
        };
        if slot.is_number() {
            if let Ok(severity) = RuleSeverity::from_value(slot) {
                *slot = Value::String(severity.as_str().to_string());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_rule_severity_serialization() {
        let json = serde_json::to_string(&RuleSeverity::Error).unwrap();
        assert_eq!(json, r#""error""#);

        let severity: RuleSeverity = serde_json::from_str("1").unwrap();
        assert_eq!(severity, RuleSeverity::Warn);
        let severity: RuleSeverity = serde_json::from_str(r#""off""#).unwrap();
        assert_eq!(severity, RuleSeverity::Off);
        assert!(serde_json::from_str::<RuleSeverity>("7").is_err());
    }

    #[test]
    fn test_severity_and_options_of_config() {
        let config = json!([2, "always", { "before": true }]);
        assert_eq!(
            RuleSeverity::from_config(&config).unwrap(),
            RuleSeverity::Error
        );
        assert_eq!(rule_options(&config), &[json!("always"), json!({ "before": true })]);
        assert!(rule_options(&json!("warn")).is_empty());
        assert!(RuleSeverity::from_config(&json!([])).is_err());
        assert!(is_error_severity(&json!("error")));
        assert!(!is_error_severity(&json!(1)));
    }

    #[test]
    fn test_normalize_to_strings() {
        let mut rules = RulesConfig::new();
        rules.insert("semi".into(), json!([2, "always"]));
        rules.insert("quotes".into(), json!(0));
        rules.insert("eqeqeq".into(), json!("warn"));
        normalize_to_strings(&mut rules);

        assert_eq!(rules["semi"], json!(["error", "always"]));
        assert_eq!(rules["quotes"], json!("off"));
        assert_eq!(rules["eqeqeq"], json!("warn"));
    }

    #[test]
    fn test_with_rules_keeps_settings() {
        let config: LintConfig = serde_json::from_value(json!({
            "extends": "lintel:recommended",
            "rules": { "semi": 2 },
            "settings": { "ecmaVersion": 5 }
        }))
        .unwrap();

        let mut rules = RulesConfig::new();
        rules.insert("quotes".into(), json!([2, "double"]));
        let derived = config.with_rules(rules);

        assert_eq!(derived.extends.as_deref(), Some("lintel:recommended"));
        assert_eq!(derived.settings["ecmaVersion"], json!(5));
        assert_eq!(derived.rules.keys().collect::<Vec<_>>(), vec!["quotes"]);
    }

    #[test]
    fn test_json_schema_describes_rules() {
        let schema = LintConfig::json_schema();
        assert!(schema["properties"]["rules"].is_object());
    }
}
