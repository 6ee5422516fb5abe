//! Project definitions
//!
//! A project is a named bundle of option overrides representing one run
//! configuration variant.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// A named run-configuration variant overriding a subset of options
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Project {
    /// Project name (unique within a parameter space)
    pub name: String,
    /// Option overrides applied on top of declared defaults
    #[serde(default)]
    pub overrides: BTreeMap<String, Value>,
}

impl Project {
    /// Create a project with no overrides
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            overrides: BTreeMap::new(),
        }
    }

    /// Add an option override
    pub fn with_override(mut self, option: impl Into<String>, value: impl Into<Value>) -> Self {
        self.overrides.insert(option.into(), value.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_project_builder() {
        let project = Project::new("alice")
            .with_override("person", "Alice")
            .with_override("locale", "en-GB");

        assert_eq!(project.name, "alice");
        assert_eq!(project.overrides.len(), 2);
        assert_eq!(project.overrides.get("person"), Some(&json!("Alice")));
    }

    #[test]
    fn test_project_yaml_shape() {
        let yaml = "name: bob\noverrides:\n  person: Bob\n";
        let project: Project = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(project.name, "bob");
        assert_eq!(project.overrides.get("person"), Some(&json!("Bob")));
    }
}
