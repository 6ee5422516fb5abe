//! Output formatters for test plans
//!
//! Provides Table, JSON, and CSV output formats.

#![allow(dead_code)]

use std::io::Write;

use crate::models::{value_display, TestInstance, TestPlan};

/// Output format options
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Json,
    JsonPretty,
    Csv,
}

impl OutputFormat {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "table" => Some(OutputFormat::Table),
            "json" => Some(OutputFormat::Json),
            "json-pretty" | "jsonpretty" => Some(OutputFormat::JsonPretty),
            "csv" => Some(OutputFormat::Csv),
            _ => None,
        }
    }
}

/// Test plan formatter
pub struct PlanFormatter {
    format: OutputFormat,
}

impl PlanFormatter {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Format an expanded plan
    pub fn format_plan(&self, plan: &TestPlan) -> String {
        match self.format {
            OutputFormat::Table => self.format_plan_table(plan),
            OutputFormat::Json => serde_json::to_string(plan).unwrap_or_default(),
            OutputFormat::JsonPretty => serde_json::to_string_pretty(plan).unwrap_or_default(),
            OutputFormat::Csv => self.format_plan_csv(plan),
        }
    }

    fn format_plan_table(&self, plan: &TestPlan) -> String {
        let mut output = String::new();

        output.push_str(
            "\n┌─────┬──────────────────┬──────────────┬──────────────────────────────────────┐\n",
        );
        output.push_str(
            "│   # │ Case             │ Project      │ Title                                │\n",
        );
        output.push_str(
            "├─────┼──────────────────┼──────────────┼──────────────────────────────────────┤\n",
        );

        for (index, instance) in plan.iter().enumerate() {
            output.push_str(&format!(
                "│ {:3} │ {:16} │ {:12} │ {:36} │\n",
                index + 1,
                truncate(&instance.case, 16),
                truncate(instance.project.as_deref().unwrap_or("-"), 12),
                truncate(&instance.title, 36),
            ));
        }

        output.push_str(
            "└─────┴──────────────────┴──────────────┴──────────────────────────────────────┘\n",
        );
        output.push_str(&format!(
            "Cases: {} | Projects: {} | Instances: {}\n",
            plan.case_count(),
            plan.project_count(),
            plan.len()
        ));

        output
    }

    fn format_plan_csv(&self, plan: &TestPlan) -> String {
        write_csv(plan).unwrap_or_default()
    }
}

impl Default for PlanFormatter {
    fn default() -> Self {
        Self::new(OutputFormat::Table)
    }
}

fn write_csv(plan: &TestPlan) -> csv::Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(["case", "project", "row", "title", "options"])?;

    for instance in plan.iter() {
        writer.write_record([
            instance.case.clone(),
            instance.project.clone().unwrap_or_default(),
            instance.row.map(|r| r.to_string()).unwrap_or_default(),
            instance.title.clone(),
            options_summary(instance),
        ])?;
    }

    let bytes = writer.into_inner().map_err(|e| e.into_error())?;
    Ok(String::from_utf8(bytes).unwrap_or_default())
}

fn options_summary(instance: &TestInstance) -> String {
    instance
        .options
        .iter()
        .map(|(name, value)| format!("{}={}", name, value_display(value)))
        .collect::<Vec<_>>()
        .join("; ")
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() > max {
        let cut: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{cut}...")
    } else {
        s.to_string()
    }
}

/// Write a plan to a file
pub fn write_plan_to_file(path: &str, plan: &TestPlan, format: OutputFormat) -> anyhow::Result<()> {
    let formatter = PlanFormatter::new(format);
    let content = formatter.format_plan(plan);

    let mut file = std::fs::File::create(path)?;
    file.write_all(content.as_bytes())?;

    Ok(())
}
