//! Option declarations and resolved option sets
//!
//! An option is a named, overridable value available to every test
//! instance. Defaults are declared once; projects and cases layer
//! overrides on top with last-write-wins, whole-value replacement.

#![allow(dead_code)]

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// A declared option with its default value
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OptionDecl {
    /// Option name (unique key within a parameter space)
    pub name: String,
    /// Default value, opaque to the expander (typically a string)
    pub default: Value,
    /// Distinguishes a real option from an ordinary fixture
    #[serde(default = "default_true")]
    pub option: bool,
}

fn default_true() -> bool {
    true
}

impl OptionDecl {
    /// Declare an option with a default value
    pub fn new(name: impl Into<String>, default: impl Into<Value>) -> Self {
        Self {
            name: name.into(),
            default: default.into(),
            option: true,
        }
    }

    /// Declare an ordinary fixture (not an option)
    pub fn fixture(name: impl Into<String>, default: impl Into<Value>) -> Self {
        Self {
            name: name.into(),
            default: default.into(),
            option: false,
        }
    }
}

/// Fully resolved option name → value mapping for one test instance
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OptionSet {
    values: BTreeMap<String, Value>,
}

impl OptionSet {
    /// Build a set from declared defaults
    pub fn from_defaults(decls: &[OptionDecl]) -> Self {
        let values = decls
            .iter()
            .map(|d| (d.name.clone(), d.default.clone()))
            .collect();
        Self { values }
    }

    /// Apply an override layer. Later layers win; values are replaced
    /// whole, never merged.
    pub fn apply(&mut self, overrides: &BTreeMap<String, Value>) {
        for (name, value) in overrides {
            self.values.insert(name.clone(), value.clone());
        }
    }

    /// Look up a resolved value by option name
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    /// Look up a resolved value rendered as display text
    pub fn get_display(&self, name: &str) -> Option<String> {
        self.values.get(name).map(value_display)
    }

    /// Iterate over resolved (name, value) pairs in name order
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.values.iter()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Render an opaque option value for titles and tables.
/// Strings render bare; everything else uses its JSON form.
pub fn value_display(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_option_decl() {
        let decl = OptionDecl::new("person", "John");
        assert_eq!(decl.name, "person");
        assert_eq!(decl.default, json!("John"));
        assert!(decl.option);

        let fixture = OptionDecl::fixture("page", "about:blank");
        assert!(!fixture.option);
    }

    #[test]
    fn test_from_defaults() {
        let decls = vec![OptionDecl::new("person", "John"), OptionDecl::new("age", 30)];
        let set = OptionSet::from_defaults(&decls);
        assert_eq!(set.len(), 2);
        assert_eq!(set.get("person"), Some(&json!("John")));
        assert_eq!(set.get("age"), Some(&json!(30)));
    }

    #[test]
    fn test_apply_last_write_wins() {
        let decls = vec![OptionDecl::new("person", "John")];
        let mut set = OptionSet::from_defaults(&decls);

        let mut overrides = BTreeMap::new();
        overrides.insert("person".to_string(), json!("Alice"));
        set.apply(&overrides);

        assert_eq!(set.get("person"), Some(&json!("Alice")));
    }

    #[test]
    fn test_apply_whole_value_replacement() {
        let decls = vec![OptionDecl::new("viewport", json!({"width": 800, "height": 600}))];
        let mut set = OptionSet::from_defaults(&decls);

        let mut overrides = BTreeMap::new();
        overrides.insert("viewport".to_string(), json!({"width": 1280}));
        set.apply(&overrides);

        // The nested height is not carried over
        assert_eq!(set.get("viewport"), Some(&json!({"width": 1280})));
    }

    #[test]
    fn test_value_display() {
        assert_eq!(value_display(&json!("Alice")), "Alice");
        assert_eq!(value_display(&json!(42)), "42");
        assert_eq!(value_display(&json!(true)), "true");
    }
}
