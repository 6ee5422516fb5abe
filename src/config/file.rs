//! Configuration file management
//!
//! Handles finding, loading, and validating configuration files. A config
//! file declares the full parameter space: options, projects, case
//! templates, and an optional tabular data source.

#![allow(dead_code)]

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::expander::{Axis, CaseTemplate, ParameterSpace, TitleTemplate};
use crate::models::{OptionDecl, Project};

use super::env::EnvConfig;

/// Configuration file locations (in order of precedence)
const CONFIG_LOCATIONS: &[&str] = &[
    "./testmatrix.yaml",
    "./testmatrix.yml",
    "./.testmatrix.yaml",
    "./.testmatrix/config.yaml",
    "~/.config/testmatrix/config.yaml",
    "~/.testmatrix.yaml",
];

/// Full configuration file structure
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ConfigFile {
    /// Version of config file format
    #[serde(default = "default_version")]
    pub version: String,

    /// Option declarations
    #[serde(default)]
    pub options: Vec<OptionDecl>,

    /// Project declarations
    #[serde(default)]
    pub projects: Vec<Project>,

    /// Case templates to expand
    #[serde(default)]
    pub cases: Vec<CaseConfig>,

    /// Tabular data source for the rows axis
    #[serde(default)]
    pub data: Option<DataConfig>,
}

fn default_version() -> String {
    "1.0".to_string()
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self {
            version: default_version(),
            options: Vec::new(),
            projects: Vec::new(),
            cases: Vec::new(),
            data: None,
        }
    }
}

/// One case template entry
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CaseConfig {
    /// Case name (unique within the config)
    pub name: String,
    /// Title pattern with `{...}` placeholders
    pub title: String,
    /// Axis to expand along
    #[serde(default)]
    pub axis: AxisConfig,
    /// Values for the `values` axis
    #[serde(default)]
    pub values: Vec<String>,
    /// Case-local option overrides
    #[serde(default)]
    pub overrides: BTreeMap<String, Value>,
}

/// Expansion axis selector
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AxisConfig {
    #[default]
    Projects,
    Rows,
    Values,
}

/// Tabular data source settings
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct DataConfig {
    /// Path to a CSV file with a header row
    pub csv: Option<String>,
}

impl ConfigFile {
    /// Create a new config file with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Find configuration file in standard locations
    pub fn find() -> Option<PathBuf> {
        for location in CONFIG_LOCATIONS {
            let path = expand_path(location);
            if path.exists() {
                return Some(path);
            }
        }
        None
    }

    /// Load configuration from default location
    pub fn load_default() -> Result<Self> {
        if let Some(path) = Self::find() {
            Self::load(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Self = if is_yaml_file(path) {
            serde_yaml::from_str(&content)
                .with_context(|| format!("Failed to parse YAML config: {}", path.display()))?
        } else {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON config: {}", path.display()))?
        };

        config.validate()?;
        Ok(config)
    }

    /// Save configuration to file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let content = if is_yaml_file(path) {
            serde_yaml::to_string(self).context("Failed to serialize config")?
        } else {
            serde_json::to_string_pretty(self).context("Failed to serialize config")?
        };

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if !["1.0"].contains(&self.version.as_str()) {
            anyhow::bail!("Unsupported config version: {}", self.version);
        }

        let mut names = std::collections::HashSet::new();
        for case in &self.cases {
            if !names.insert(case.name.as_str()) {
                anyhow::bail!("Duplicate case name: '{}'", case.name);
            }
            TitleTemplate::parse(case.title.as_str())
                .with_context(|| format!("Invalid title in case '{}'", case.name))?;
            if case.axis == AxisConfig::Values && case.values.is_empty() {
                anyhow::bail!(
                    "Case '{}' uses the values axis but declares no values",
                    case.name
                );
            }
            if case.axis == AxisConfig::Rows && self.data_csv().is_none() {
                anyhow::bail!(
                    "Case '{}' uses the rows axis but no data source is configured",
                    case.name
                );
            }
        }

        Ok(())
    }

    /// Generate example configuration
    pub fn example() -> Self {
        Self {
            version: "1.0".to_string(),
            options: vec![
                OptionDecl::new("person", "John"),
                OptionDecl::new("locale", "en-US"),
            ],
            projects: vec![
                Project::new("alice").with_override("person", "Alice"),
                Project::new("bob").with_override("person", "Bob"),
            ],
            cases: vec![
                CaseConfig {
                    name: "greeting".to_string(),
                    title: "say hello as {person}".to_string(),
                    axis: AxisConfig::Projects,
                    values: Vec::new(),
                    overrides: BTreeMap::new(),
                },
                CaseConfig {
                    name: "data-driven".to_string(),
                    title: "check {test_case}".to_string(),
                    axis: AxisConfig::Rows,
                    values: Vec::new(),
                    overrides: BTreeMap::new(),
                },
            ],
            data: Some(DataConfig {
                csv: Some("./input.csv".to_string()),
            }),
        }
    }

    /// Get case by name
    pub fn case(&self, name: &str) -> Option<&CaseConfig> {
        self.cases.iter().find(|c| c.name == name)
    }

    /// Resolve the CSV data path, if any
    pub fn data_csv(&self) -> Option<&str> {
        self.data.as_ref().and_then(|d| d.csv.as_deref())
    }

    /// Build a parameter space from the declarations. Environment
    /// variables override option defaults before declaration; the
    /// expander itself never reads ambient state.
    pub fn build_space(&self, env: &EnvConfig) -> Result<ParameterSpace> {
        let mut space = ParameterSpace::new();

        for decl in &self.options {
            let mut decl = decl.clone();
            if let Some(value) = env.option_default(&decl.name) {
                decl.default = Value::String(value.to_string());
            }
            space.declare_option(decl)?;
        }

        for project in &self.projects {
            space.declare_project(project.clone())?;
        }

        Ok(space)
    }

    /// Convert case entries into expandable templates
    pub fn case_templates(&self) -> Result<Vec<(CaseTemplate, Axis)>> {
        self.cases.iter().map(case_template).collect()
    }
}

fn case_template(case: &CaseConfig) -> Result<(CaseTemplate, Axis)> {
    let mut template = CaseTemplate::new(case.name.as_str(), case.title.as_str())
        .with_context(|| format!("Invalid title in case '{}'", case.name))?;
    template.overrides = case.overrides.clone();

    let axis = match case.axis {
        AxisConfig::Projects => Axis::Projects,
        AxisConfig::Rows => Axis::Rows,
        AxisConfig::Values => Axis::Values(case.values.clone()),
    };

    Ok((template, axis))
}

/// Expand ~ to home directory
fn expand_path(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(stripped);
        }
    }
    PathBuf::from(path)
}

/// Check if file is YAML based on extension
fn is_yaml_file(path: &Path) -> bool {
    path.extension()
        .map(|e| e == "yaml" || e == "yml")
        .unwrap_or(false)
}
