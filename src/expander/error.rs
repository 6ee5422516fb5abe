//! Expansion errors
//!
//! Every error is fatal to the expansion step it occurs in and carries
//! the offending identifier; none are downgraded to warnings.

use thiserror::Error;

/// Errors raised while declaring or expanding a parameter space
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExpandError {
    #[error("option '{name}' is already declared")]
    DuplicateOption { name: String },

    #[error("option name '{name}' is reserved for axis placeholders")]
    ReservedOption { name: String },

    #[error("project '{name}' is already declared")]
    DuplicateProject { name: String },

    #[error("project '{project}' overrides undeclared option '{option}'")]
    UnknownOption { project: String, option: String },

    #[error("title template references column '{column}' missing from row {row}")]
    UnknownColumn { column: String, row: usize },

    #[error("duplicate test title '{title}'{}", title_context(.scope, .row))]
    DuplicateTestName {
        title: String,
        /// Project name, or empty for the root scope
        scope: String,
        /// Source row index, when expanding over data rows
        row: Option<usize>,
    },

    #[error("invalid title template '{template}': {reason}")]
    InvalidTemplate { template: String, reason: String },

    #[error("unknown placeholder '{name}' in title template")]
    UnknownPlaceholder { name: String },
}

fn title_context(scope: &str, row: &Option<usize>) -> String {
    let mut context = String::new();
    if !scope.is_empty() {
        context.push_str(&format!(" in project '{scope}'"));
    }
    if let Some(row) = row {
        context.push_str(&format!(" (row {row})"));
    }
    context
}
