//! Output formatting for expanded test plans

mod formatter;

pub use formatter::{write_plan_to_file, OutputFormat, PlanFormatter};
