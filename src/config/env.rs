//! Environment variable configuration
//!
//! Provides environment variable overrides for configuration, including
//! option-default overrides via TESTMATRIX_OPT_* variables. Only the
//! configuration layer reads the environment; the expander sees
//! already-resolved values.

#![allow(dead_code)]

use std::env;

/// Environment variable prefix
const ENV_PREFIX: &str = "TESTMATRIX";

/// Environment configuration from environment variables
#[derive(Clone, Debug, Default)]
pub struct EnvConfig {
    /// Config file from TESTMATRIX_CONFIG
    pub config_file: Option<String>,
    /// CSV data file from TESTMATRIX_DATA
    pub data_file: Option<String>,
    /// Output format from TESTMATRIX_FORMAT
    pub format: Option<String>,
    /// Verbose from TESTMATRIX_VERBOSE
    pub verbose: Option<bool>,
    /// Option default overrides from TESTMATRIX_OPT_<NAME>,
    /// keyed by lowercased option name
    pub option_overrides: Vec<(String, String)>,
}

impl EnvConfig {
    /// Load configuration from environment variables
    pub fn load() -> Self {
        let opt_prefix = format!("{ENV_PREFIX}_OPT_");
        let mut option_overrides: Vec<(String, String)> = env::vars()
            .filter_map(|(key, value)| {
                key.strip_prefix(&opt_prefix)
                    .map(|name| (name.to_lowercase(), value))
            })
            .collect();
        option_overrides.sort();

        Self {
            config_file: get_env("CONFIG"),
            data_file: get_env("DATA"),
            format: get_env("FORMAT"),
            verbose: get_env_bool("VERBOSE"),
            option_overrides,
        }
    }

    /// Check if any environment variables are set
    pub fn has_any(&self) -> bool {
        self.config_file.is_some()
            || self.data_file.is_some()
            || self.format.is_some()
            || self.verbose.is_some()
            || !self.option_overrides.is_empty()
    }

    /// Environment override for an option's default value, if set
    pub fn option_default(&self, name: &str) -> Option<&str> {
        let name = name.to_lowercase();
        self.option_overrides
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Get output format with fallback
    pub fn format_or(&self, default: &str) -> String {
        self.format.clone().unwrap_or_else(|| default.to_string())
    }

    /// Print current environment configuration
    pub fn print_summary(&self) {
        println!("Environment Configuration:");
        println!("  {}_CONFIG:   {:?}", ENV_PREFIX, self.config_file);
        println!("  {}_DATA:     {:?}", ENV_PREFIX, self.data_file);
        println!("  {}_FORMAT:   {:?}", ENV_PREFIX, self.format);
        println!("  {}_VERBOSE:  {:?}", ENV_PREFIX, self.verbose);
        if self.option_overrides.is_empty() {
            println!("  {ENV_PREFIX}_OPT_*:    (none)");
        } else {
            for (name, value) in &self.option_overrides {
                println!("  {}_OPT_{}: {:?}", ENV_PREFIX, name.to_uppercase(), value);
            }
        }
    }
}

/// Get environment variable with prefix
fn get_env(name: &str) -> Option<String> {
    env::var(format!("{ENV_PREFIX}_{name}")).ok()
}

/// Get environment variable as boolean
fn get_env_bool(name: &str) -> Option<bool> {
    get_env(name).map(|v| {
        matches!(
            v.to_lowercase().as_str(),
            "1" | "true" | "yes" | "on" | "enabled"
        )
    })
}

/// Builder for setting environment variables (useful for testing)
pub struct EnvBuilder {
    vars: Vec<(String, String)>,
}

impl EnvBuilder {
    /// Create a new environment builder
    pub fn new() -> Self {
        Self { vars: Vec::new() }
    }

    /// Set config file path
    pub fn config_file(mut self, path: impl Into<String>) -> Self {
        self.vars.push((format!("{ENV_PREFIX}_CONFIG"), path.into()));
        self
    }

    /// Set data file path
    pub fn data_file(mut self, path: impl Into<String>) -> Self {
        self.vars.push((format!("{ENV_PREFIX}_DATA"), path.into()));
        self
    }

    /// Set output format
    pub fn format(mut self, format: impl Into<String>) -> Self {
        self.vars.push((format!("{ENV_PREFIX}_FORMAT"), format.into()));
        self
    }

    /// Set verbose
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.vars
            .push((format!("{ENV_PREFIX}_VERBOSE"), verbose.to_string()));
        self
    }

    /// Override an option's default value
    pub fn option(mut self, name: &str, value: impl Into<String>) -> Self {
        self.vars.push((
            format!("{ENV_PREFIX}_OPT_{}", name.to_uppercase()),
            value.into(),
        ));
        self
    }

    /// Apply environment variables
    pub fn apply(self) {
        for (key, value) in self.vars {
            env::set_var(key, value);
        }
    }

    /// Apply and return guard that restores on drop
    pub fn apply_scoped(self) -> EnvGuard {
        let previous: Vec<_> = self
            .vars
            .iter()
            .map(|(k, _)| (k.clone(), env::var(k).ok()))
            .collect();

        self.apply();

        EnvGuard { previous }
    }
}

impl Default for EnvBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Guard that restores environment variables on drop
pub struct EnvGuard {
    previous: Vec<(String, Option<String>)>,
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        for (key, value) in &self.previous {
            match value {
                Some(v) => env::set_var(key, v),
                None => env::remove_var(key),
            }
        }
    }
}

/// Print all TESTMATRIX environment variables
pub fn print_env_help() {
    println!("Environment Variables:");
    println!();
    println!("  {ENV_PREFIX}_CONFIG      Path to configuration file");
    println!("  {ENV_PREFIX}_DATA        Path to CSV data file");
    println!("  {ENV_PREFIX}_FORMAT      Output format (table, json, json-pretty, csv)");
    println!("  {ENV_PREFIX}_VERBOSE     Enable verbose output (true/false)");
    println!("  {ENV_PREFIX}_OPT_<NAME>  Override the default value of option <name>");
    println!();
    println!("Example:");
    println!("  export {ENV_PREFIX}_OPT_PERSON=Alice");
    println!("  export {ENV_PREFIX}_DATA=./input.csv");
    println!("  testmatrix expand");
}
