//! Data models for the test matrix
//!
//! Options, projects, data rows, and expanded test instances.

mod instance;
mod option;
mod project;
mod row;

pub use instance::{TestInstance, TestPlan};
pub use option::{value_display, OptionDecl, OptionSet};
pub use project::Project;
pub use row::DataRow;
