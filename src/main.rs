//! testmatrix - Parameterized Test Matrix Expansion Tool
//!
//! A CLI tool that expands declared test options, projects, and external
//! data rows into a flat, ordered, uniquely-titled test plan for an
//! external executor.
//!
//! ## Features
//!
//! - Option declarations with layered project and case overrides
//! - Project, data-row, and explicit-value expansion axes
//! - CSV-driven test generation with strict title uniqueness
//! - Multiple output formats (Table, JSON, CSV)
//! - Environment variable overrides for option defaults
//!
//! ## Usage
//!
//! ```bash
//! # Expand all cases from the default config
//! testmatrix expand
//!
//! # Expand one case with an external data file
//! testmatrix expand --case data-driven --data input.csv
//!
//! # List declared options, projects, and cases
//! testmatrix list --detailed
//!
//! # Create an example configuration
//! testmatrix config init
//! ```

use anyhow::Result;
use clap::Parser;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

mod cli;
mod config;
mod data;
mod expander;
mod models;
mod output;

use cli::Args;
use config::{ConfigFile, EnvConfig};
use expander::Axis;
use output::{write_plan_to_file, OutputFormat, PlanFormatter};

fn main() -> Result<()> {
    let args = Args::parse();

    let level = if args.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .compact()
        .init();

    match args.command {
        cli::Command::Expand(expand_args) => {
            run_expand(expand_args)?;
        }
        cli::Command::List(list_args) => {
            list_declarations(list_args)?;
        }
        cli::Command::Validate(validate_args) => {
            validate_config(validate_args)?;
        }
        cli::Command::Config(config_args) => {
            manage_config(config_args)?;
        }
    }

    Ok(())
}

fn load_config(path: Option<&str>, env: &EnvConfig) -> Result<ConfigFile> {
    match path.or(env.config_file.as_deref()) {
        Some(path) => ConfigFile::load(path),
        None => ConfigFile::load_default(),
    }
}

fn run_expand(args: cli::ExpandArgs) -> Result<()> {
    let env = EnvConfig::load();
    let config = load_config(args.config.as_deref(), &env)?;

    let mut space = config.build_space(&env)?;

    let data_path = args
        .data
        .clone()
        .or_else(|| env.data_file.clone())
        .or_else(|| config.data_csv().map(String::from));
    if let Some(path) = &data_path {
        space.load_data_rows(data::load_csv(path)?);
    }

    let mut cases = config.case_templates()?;
    if let Some(name) = &args.case {
        if config.case(name).is_none() {
            anyhow::bail!("Unknown case: {name}");
        }
        cases.retain(|(case, _)| &case.name == name);
    }

    let rows_needed = cases.iter().any(|(_, axis)| matches!(axis, Axis::Rows));
    if rows_needed && space.rows().is_empty() {
        anyhow::bail!(
            "Rows-axis case(s) declared but no data rows are available. \
             Supply --data, set TESTMATRIX_DATA, or configure data.csv."
        );
    }

    info!(
        "Expanding {} case(s) across {} project(s) and {} data row(s)",
        cases.len(),
        space.projects().len(),
        space.rows().len()
    );

    let plan = space.expand_all(&cases)?;

    let format_name = resolve_format(args.format.as_deref(), &env);
    let format = OutputFormat::from_str(&format_name)
        .ok_or_else(|| anyhow::anyhow!("Unknown format: {format_name}"))?;

    let formatter = PlanFormatter::new(format);
    println!("{}", formatter.format_plan(&plan));

    if let Some(path) = &args.output {
        write_plan_to_file(path, &plan, format)?;
        println!("✓ Plan written to: {path}");
    }

    Ok(())
}

/// An explicit --format always wins; the environment only fills the gap.
fn resolve_format(arg: Option<&str>, env: &EnvConfig) -> String {
    match arg {
        Some(format) => format.to_string(),
        None => env.format_or("table"),
    }
}

fn list_declarations(args: cli::ListArgs) -> Result<()> {
    let env = EnvConfig::load();
    let config = load_config(args.config.as_deref(), &env)?;

    let show_all = !args.options && !args.projects && !args.cases;

    if show_all || args.options {
        println!("\nOptions:");
        println!("{:-<60}", "");
        for decl in &config.options {
            let kind = if decl.option { "option" } else { "fixture" };
            println!(
                "  {:20} = {:20} [{}]",
                decl.name,
                models::value_display(&decl.default),
                kind
            );
        }
    }

    if show_all || args.projects {
        println!("\nProjects:");
        println!("{:-<60}", "");
        for project in &config.projects {
            if args.detailed {
                println!("  {}", project.name);
                for (option, value) in &project.overrides {
                    println!("    {} = {}", option, models::value_display(value));
                }
            } else {
                println!(
                    "  {:20} ({} overrides)",
                    project.name,
                    project.overrides.len()
                );
            }
        }
    }

    if show_all || args.cases {
        println!("\nCases:");
        println!("{:-<60}", "");
        for case in &config.cases {
            println!("  {:20} {:?} axis - \"{}\"", case.name, case.axis, case.title);
        }
    }

    println!();
    Ok(())
}

fn validate_config(args: cli::ValidateArgs) -> Result<()> {
    let path = args.file.unwrap_or_else(|| {
        ConfigFile::find()
            .map(|p| p.to_string_lossy().to_string())
            .unwrap_or_else(|| "./testmatrix.yaml".to_string())
    });

    match ConfigFile::load(&path) {
        Ok(config) => {
            // Declarations must also expand cleanly (duplicate names,
            // unknown override keys).
            config.build_space(&EnvConfig::default())?;
            println!("✓ Configuration file is valid: {path}");
            Ok(())
        }
        Err(e) => {
            println!("✗ Configuration file is invalid: {path}");
            println!("  Error: {e}");
            Err(e)
        }
    }
}

fn manage_config(args: cli::ConfigArgs) -> Result<()> {
    use std::path::Path;

    match args.action {
        cli::ConfigAction::Init { output, force } => {
            let path = Path::new(&output);
            if path.exists() && !force {
                anyhow::bail!(
                    "Configuration file already exists: {output}. Use --force to overwrite."
                );
            }

            let config = ConfigFile::example();
            config.save(path)?;
            println!("✓ Configuration file created: {output}");
            println!("\nEdit the file to customize your parameter space.");
        }

        cli::ConfigAction::Show { env, format } => {
            if env {
                let env_config = EnvConfig::load();
                env_config.print_summary();
            } else {
                let config = ConfigFile::load_default()?;
                let output = if format == "json" {
                    serde_json::to_string_pretty(&config)?
                } else {
                    serde_yaml::to_string(&config)?
                };
                println!("{output}");
            }
        }

        cli::ConfigAction::Env => {
            config::env::print_env_help();
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_format_cli_wins_over_env() {
        let env = EnvConfig {
            format: Some("json".to_string()),
            ..Default::default()
        };

        assert_eq!(resolve_format(Some("table"), &env), "table");
        assert_eq!(resolve_format(Some("csv"), &env), "csv");
    }

    #[test]
    fn test_resolve_format_env_fills_gap() {
        let env = EnvConfig {
            format: Some("json".to_string()),
            ..Default::default()
        };

        assert_eq!(resolve_format(None, &env), "json");
        assert_eq!(resolve_format(None, &EnvConfig::default()), "table");
    }
}
