//! CLI argument parsing
//!
//! Defines command-line interface using clap.

use clap::{Parser, Subcommand};

/// Parameterized test matrix expansion tool
#[derive(Parser, Debug)]
#[command(name = "testmatrix")]
#[command(version = "0.1.0")]
#[command(about = "Expand options, projects, and data rows into a concrete test plan")]
#[command(long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Expand case templates into a test plan
    Expand(ExpandArgs),

    /// List declared options, projects, and cases
    List(ListArgs),

    /// Validate a configuration file
    Validate(ValidateArgs),

    /// Manage configuration
    Config(ConfigArgs),
}

/// Arguments for expand command
#[derive(Parser, Debug)]
pub struct ExpandArgs {
    /// Configuration file path
    #[arg(short, long)]
    pub config: Option<String>,

    /// CSV data file for the rows axis (overrides config)
    #[arg(short, long)]
    pub data: Option<String>,

    /// Expand only the named case
    #[arg(long)]
    pub case: Option<String>,

    /// Output format (table, json, json-pretty, csv); defaults to table
    #[arg(short, long)]
    pub format: Option<String>,

    /// Write the plan to a file
    #[arg(short, long)]
    pub output: Option<String>,
}

/// Arguments for list command
#[derive(Parser, Debug)]
pub struct ListArgs {
    /// Configuration file path
    #[arg(short, long)]
    pub config: Option<String>,

    /// Show only options
    #[arg(long)]
    pub options: bool,

    /// Show only projects
    #[arg(long)]
    pub projects: bool,

    /// Show only cases
    #[arg(long)]
    pub cases: bool,

    /// Show override details
    #[arg(short, long)]
    pub detailed: bool,
}

/// Arguments for validate command
#[derive(Parser, Debug)]
pub struct ValidateArgs {
    /// Configuration file to validate (defaults to standard locations)
    pub file: Option<String>,
}

/// Arguments for config command
#[derive(Parser, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Create an example configuration file
    Init {
        /// Output path
        #[arg(short, long, default_value = "./testmatrix.yaml")]
        output: String,

        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },

    /// Show the effective configuration
    Show {
        /// Show environment variables instead
        #[arg(short, long)]
        env: bool,

        /// Output format (yaml, json)
        #[arg(short, long, default_value = "yaml")]
        format: String,
    },

    /// Show supported environment variables
    Env,
}
