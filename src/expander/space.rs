//! Parameter space declaration and expansion
//!
//! Declarations (options, projects, data rows) are built once at
//! configuration-load time; `expand` then computes test instances as a
//! pure function of the declarations and the chosen axis. The space is
//! plain owned data with no interior mutability, so shared references may
//! expand concurrently; incremental declaration is the host's job to
//! serialize.

#![allow(dead_code)]

use serde_json::Value;
use std::collections::{BTreeMap, HashSet};
use tracing::debug;

use crate::models::{DataRow, OptionDecl, OptionSet, Project, TestInstance, TestPlan};

use super::error::ExpandError;
use super::template::TitleTemplate;

/// Placeholder names resolved by the axes themselves. An option with one
/// of these names would be shadowed in titles, so declaration rejects
/// them outright.
const RESERVED_PLACEHOLDERS: &[&str] = &["project", "value", "index"];

/// Dimension a case template is expanded along
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Axis {
    /// One instance per registered project, in declaration order
    Projects,
    /// One instance per loaded data row, in load order
    Rows,
    /// One instance per value, in list order
    Values(Vec<String>),
}

/// A test case template: title pattern plus axis-local overrides
#[derive(Clone, Debug, PartialEq)]
pub struct CaseTemplate {
    /// Case name, used to trace instances back to their template
    pub name: String,
    /// Title pattern with `{...}` placeholders
    pub title: TitleTemplate,
    /// Overrides applied closest to the test; they beat project overrides
    pub overrides: BTreeMap<String, Value>,
}

impl CaseTemplate {
    /// Create a case template, parsing the title pattern
    pub fn new(name: impl Into<String>, title: impl Into<String>) -> Result<Self, ExpandError> {
        Ok(Self {
            name: name.into(),
            title: TitleTemplate::parse(title)?,
            overrides: BTreeMap::new(),
        })
    }

    /// Add a case-local option override
    pub fn with_override(mut self, option: impl Into<String>, value: impl Into<Value>) -> Self {
        self.overrides.insert(option.into(), value.into());
        self
    }
}

/// Declared options, projects, and data rows, ready for expansion
#[derive(Clone, Debug, Default)]
pub struct ParameterSpace {
    options: Vec<OptionDecl>,
    projects: Vec<Project>,
    rows: Vec<DataRow>,
}

impl ParameterSpace {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an option declaration. Axis placeholder names
    /// (`project`, `value`, `index`) are reserved.
    pub fn declare_option(&mut self, decl: OptionDecl) -> Result<(), ExpandError> {
        if RESERVED_PLACEHOLDERS.contains(&decl.name.as_str()) {
            return Err(ExpandError::ReservedOption { name: decl.name });
        }
        if self.options.iter().any(|o| o.name == decl.name) {
            return Err(ExpandError::DuplicateOption { name: decl.name });
        }
        debug!("declared option '{}'", decl.name);
        self.options.push(decl);
        Ok(())
    }

    /// Register a project. Every override key must name a declared option.
    pub fn declare_project(&mut self, project: Project) -> Result<(), ExpandError> {
        if self.projects.iter().any(|p| p.name == project.name) {
            return Err(ExpandError::DuplicateProject { name: project.name });
        }
        for option in project.overrides.keys() {
            if !self.options.iter().any(|o| &o.name == option) {
                return Err(ExpandError::UnknownOption {
                    project: project.name,
                    option: option.clone(),
                });
            }
        }
        debug!(
            "declared project '{}' ({} overrides)",
            project.name,
            project.overrides.len()
        );
        self.projects.push(project);
        Ok(())
    }

    /// Store data rows for later templating. Column names are not
    /// validated here; a missing column fails at expansion time.
    pub fn load_data_rows(&mut self, rows: Vec<DataRow>) {
        debug!("loaded {} data rows", rows.len());
        self.rows = rows;
    }

    pub fn options(&self) -> &[OptionDecl] {
        &self.options
    }

    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    pub fn rows(&self) -> &[DataRow] {
        &self.rows
    }

    fn defaults(&self) -> OptionSet {
        OptionSet::from_defaults(&self.options)
    }

    /// Expand one case template along an axis into an ordered instance
    /// list. Fails fast on the first title collision or unresolvable
    /// placeholder; no partial result is returned.
    pub fn expand(&self, case: &CaseTemplate, axis: &Axis) -> Result<Vec<TestInstance>, ExpandError> {
        let mut seen = HashSet::new();
        self.expand_into(case, axis, &mut seen)
    }

    /// Expand a sequence of cases into a plan, enforcing title uniqueness
    /// per scope across the whole plan.
    pub fn expand_all<'a, I>(&self, cases: I) -> Result<TestPlan, ExpandError>
    where
        I: IntoIterator<Item = &'a (CaseTemplate, Axis)>,
    {
        let mut seen = HashSet::new();
        let mut instances = Vec::new();
        for (case, axis) in cases {
            instances.extend(self.expand_into(case, axis, &mut seen)?);
        }
        Ok(TestPlan::new(instances))
    }

    fn expand_into(
        &self,
        case: &CaseTemplate,
        axis: &Axis,
        seen: &mut HashSet<(String, String)>,
    ) -> Result<Vec<TestInstance>, ExpandError> {
        let mut instances = Vec::new();

        match axis {
            Axis::Projects => {
                for project in &self.projects {
                    // Defaults, then project overrides, then case-local
                    // overrides: later layers win.
                    let mut options = self.defaults();
                    options.apply(&project.overrides);
                    options.apply(&case.overrides);

                    let title = case
                        .title
                        .render(|name| {
                            if name == "project" {
                                Some(project.name.clone())
                            } else {
                                options.get_display(name)
                            }
                        })
                        .map_err(|name| ExpandError::UnknownPlaceholder { name })?;

                    claim_title(seen, &project.name, &title, None)?;
                    instances.push(TestInstance {
                        title,
                        case: case.name.clone(),
                        project: Some(project.name.clone()),
                        row: None,
                        options,
                    });
                }
            }

            Axis::Rows => {
                let mut options = self.defaults();
                options.apply(&case.overrides);

                for row in &self.rows {
                    let title = case
                        .title
                        .render(|name| row.get(name).map(String::from))
                        .map_err(|column| ExpandError::UnknownColumn {
                            column,
                            row: row.index,
                        })?;

                    claim_title(seen, "", &title, Some(row.index))?;
                    instances.push(TestInstance {
                        title,
                        case: case.name.clone(),
                        project: None,
                        row: Some(row.index),
                        options: options.clone(),
                    });
                }
            }

            Axis::Values(values) => {
                let mut options = self.defaults();
                options.apply(&case.overrides);

                for (index, value) in values.iter().enumerate() {
                    let title = case
                        .title
                        .render(|name| match name {
                            "value" => Some(value.clone()),
                            "index" => Some(index.to_string()),
                            other => options.get_display(other),
                        })
                        .map_err(|name| ExpandError::UnknownPlaceholder { name })?;

                    claim_title(seen, "", &title, None)?;
                    instances.push(TestInstance {
                        title,
                        case: case.name.clone(),
                        project: None,
                        row: None,
                        options: options.clone(),
                    });
                }
            }
        }

        debug!(
            "expanded case '{}' into {} instances",
            case.name,
            instances.len()
        );
        Ok(instances)
    }
}

fn claim_title(
    seen: &mut HashSet<(String, String)>,
    scope: &str,
    title: &str,
    row: Option<usize>,
) -> Result<(), ExpandError> {
    if !seen.insert((scope.to_string(), title.to_string())) {
        return Err(ExpandError::DuplicateTestName {
            title: title.to_string(),
            scope: scope.to_string(),
            row,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn space_with_projects() -> ParameterSpace {
        let mut space = ParameterSpace::new();
        space
            .declare_option(OptionDecl::new("person", "John"))
            .unwrap();
        space
            .declare_project(Project::new("alice").with_override("person", "Alice"))
            .unwrap();
        space
            .declare_project(Project::new("bob").with_override("person", "Bob"))
            .unwrap();
        space
    }

    #[test]
    fn test_duplicate_option_rejected() {
        let mut space = ParameterSpace::new();
        space
            .declare_option(OptionDecl::new("person", "John"))
            .unwrap();
        assert_eq!(
            space.declare_option(OptionDecl::new("person", "Jane")),
            Err(ExpandError::DuplicateOption {
                name: "person".to_string()
            })
        );
    }

    #[test]
    fn test_reserved_option_names_rejected() {
        let mut space = ParameterSpace::new();
        for name in ["project", "value", "index"] {
            assert_eq!(
                space.declare_option(OptionDecl::new(name, "x")),
                Err(ExpandError::ReservedOption {
                    name: name.to_string()
                })
            );
        }
    }

    #[test]
    fn test_duplicate_project_rejected() {
        let mut space = space_with_projects();
        assert_eq!(
            space.declare_project(Project::new("alice")),
            Err(ExpandError::DuplicateProject {
                name: "alice".to_string()
            })
        );
    }

    #[test]
    fn test_unknown_option_in_override() {
        let mut space = ParameterSpace::new();
        space
            .declare_option(OptionDecl::new("person", "John"))
            .unwrap();
        assert_eq!(
            space.declare_project(Project::new("typo").with_override("persno", "Alice")),
            Err(ExpandError::UnknownOption {
                project: "typo".to_string(),
                option: "persno".to_string()
            })
        );
    }

    #[test]
    fn test_one_instance_per_project_in_declaration_order() {
        let space = space_with_projects();
        let case = CaseTemplate::new("greeting", "hello {person}").unwrap();
        let instances = space.expand(&case, &Axis::Projects).unwrap();

        assert_eq!(instances.len(), 2);
        assert_eq!(instances[0].title, "hello Alice");
        assert_eq!(instances[0].project.as_deref(), Some("alice"));
        assert_eq!(instances[1].title, "hello Bob");
        assert_eq!(instances[1].project.as_deref(), Some("bob"));
    }

    #[test]
    fn test_override_precedence() {
        let space = space_with_projects();
        let case = CaseTemplate::new("greeting", "{project}").unwrap();
        let instances = space.expand(&case, &Axis::Projects).unwrap();

        assert_eq!(instances[0].options.get("person"), Some(&json!("Alice")));

        // Default-only expansion (no project axis) retains the default.
        let plain = CaseTemplate::new("plain", "test {value}").unwrap();
        let instances = space
            .expand(&plain, &Axis::Values(vec!["1".to_string()]))
            .unwrap();
        assert_eq!(instances[0].options.get("person"), Some(&json!("John")));
    }

    #[test]
    fn test_case_overrides_beat_project_overrides() {
        let space = space_with_projects();
        let case = CaseTemplate::new("pinned", "{project}")
            .unwrap()
            .with_override("person", "Zoe");
        let instances = space.expand(&case, &Axis::Projects).unwrap();

        for instance in &instances {
            assert_eq!(instance.options.get("person"), Some(&json!("Zoe")));
        }
    }

    #[test]
    fn test_shared_title_is_scoped_per_project() {
        // "test 1" for alice and "test 1" for bob are distinct instances,
        // never merged into one.
        let space = space_with_projects();
        let case = CaseTemplate::new("shared", "test 1").unwrap();
        let instances = space.expand(&case, &Axis::Projects).unwrap();

        assert_eq!(instances.len(), 2);
        assert_eq!(instances[0].title, instances[1].title);
        assert_ne!(instances[0].project, instances[1].project);
    }

    #[test]
    fn test_expansion_is_idempotent() {
        let space = space_with_projects();
        let case = CaseTemplate::new("greeting", "hello {person}").unwrap();
        let first = space.expand(&case, &Axis::Projects).unwrap();
        let second = space.expand(&case, &Axis::Projects).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_rows_axis_preserves_order() {
        let mut space = ParameterSpace::new();
        space.load_data_rows(vec![
            DataRow::new(0, [("test_case", "value 1")]),
            DataRow::new(1, [("test_case", "value 2")]),
        ]);

        let case = CaseTemplate::new("csv", "check {test_case}").unwrap();
        let instances = space.expand(&case, &Axis::Rows).unwrap();

        assert_eq!(instances.len(), 2);
        assert_eq!(instances[0].title, "check value 1");
        assert_eq!(instances[0].row, Some(0));
        assert_eq!(instances[1].title, "check value 2");
        assert_eq!(instances[1].row, Some(1));
    }

    #[test]
    fn test_missing_column_fails_at_expansion() {
        let mut space = ParameterSpace::new();
        space.load_data_rows(vec![
            DataRow::new(0, [("test_case", "value 1")]),
            DataRow::new(1, [("other", "x")]),
        ]);

        let case = CaseTemplate::new("csv", "check {test_case}").unwrap();
        assert_eq!(
            space.expand(&case, &Axis::Rows),
            Err(ExpandError::UnknownColumn {
                column: "test_case".to_string(),
                row: 1
            })
        );
    }

    #[test]
    fn test_duplicate_row_titles_rejected() {
        let mut space = ParameterSpace::new();
        space.load_data_rows(vec![
            DataRow::new(0, [("test_case", "value 1")]),
            DataRow::new(1, [("test_case", "value 1")]),
        ]);

        let case = CaseTemplate::new("csv", "{test_case}").unwrap();
        assert_eq!(
            space.expand(&case, &Axis::Rows),
            Err(ExpandError::DuplicateTestName {
                title: "value 1".to_string(),
                scope: String::new(),
                row: Some(1)
            })
        );
    }

    #[test]
    fn test_values_axis_placeholders() {
        let space = ParameterSpace::new();
        let case = CaseTemplate::new("enum", "run {index}: {value}").unwrap();
        let instances = space
            .expand(
                &case,
                &Axis::Values(vec!["fast".to_string(), "slow".to_string()]),
            )
            .unwrap();

        assert_eq!(instances.len(), 2);
        assert_eq!(instances[0].title, "run 0: fast");
        assert_eq!(instances[1].title, "run 1: slow");
    }

    #[test]
    fn test_unknown_placeholder_on_project_axis() {
        let space = space_with_projects();
        let case = CaseTemplate::new("bad", "hello {nobody}").unwrap();
        assert_eq!(
            space.expand(&case, &Axis::Projects),
            Err(ExpandError::UnknownPlaceholder {
                name: "nobody".to_string()
            })
        );
    }

    #[test]
    fn test_expand_all_shares_uniqueness_scope() {
        let space = ParameterSpace::new();
        let cases = vec![
            (
                CaseTemplate::new("a", "{value}").unwrap(),
                Axis::Values(vec!["same".to_string()]),
            ),
            (
                CaseTemplate::new("b", "{value}").unwrap(),
                Axis::Values(vec!["same".to_string()]),
            ),
        ];

        assert!(matches!(
            space.expand_all(&cases),
            Err(ExpandError::DuplicateTestName { ref title, .. }) if title == "same"
        ));
    }

    #[test]
    fn test_end_to_end_projects() {
        let space = space_with_projects();
        let case = CaseTemplate::new("greeting", "test 1").unwrap();
        let plan = space
            .expand_all(&[(case, Axis::Projects)])
            .unwrap();

        assert_eq!(plan.len(), 2);
        assert_eq!(plan.instances[0].options.get("person"), Some(&json!("Alice")));
        assert_eq!(plan.instances[1].options.get("person"), Some(&json!("Bob")));
    }
}
