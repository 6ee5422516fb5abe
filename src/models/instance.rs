//! Expanded test instances and the resulting test plan
//!
//! A test instance is one concrete, uniquely-titled, fully-resolved test
//! execution unit. The plan is the ordered list handed to an external
//! executor; the expander neither runs nor mutates it afterwards.

#![allow(dead_code)]

use serde::{Deserialize, Serialize};
use std::fmt;

use super::OptionSet;

/// One concrete test produced by expansion
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TestInstance {
    /// Resolved title, unique within its scope
    pub title: String,
    /// Name of the originating case template
    pub case: String,
    /// Project this instance belongs to, if expanded over the project axis
    pub project: Option<String>,
    /// Source row index, if expanded over the data-row axis
    pub row: Option<usize>,
    /// Fully resolved option set
    pub options: OptionSet,
}

impl TestInstance {
    /// Uniqueness scope for titles. Project-axis instances are scoped per
    /// project; all other instances share the root scope.
    pub fn scope(&self) -> &str {
        self.project.as_deref().unwrap_or("")
    }
}

impl fmt::Display for TestInstance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.project {
            Some(project) => write!(f, "[{}] › {}", project, self.title),
            None => write!(f, "{}", self.title),
        }
    }
}

/// Ordered, deduplicated list of test instances for one run
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TestPlan {
    pub instances: Vec<TestInstance>,
}

impl TestPlan {
    pub fn new(instances: Vec<TestInstance>) -> Self {
        Self { instances }
    }

    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &TestInstance> {
        self.instances.iter()
    }

    /// Number of distinct case templates in the plan
    pub fn case_count(&self) -> usize {
        let mut cases: Vec<&str> = self.instances.iter().map(|i| i.case.as_str()).collect();
        cases.dedup();
        cases.len()
    }

    /// Number of distinct projects in the plan
    pub fn project_count(&self) -> usize {
        let mut projects: Vec<&str> = self
            .instances
            .iter()
            .filter_map(|i| i.project.as_deref())
            .collect();
        projects.sort_unstable();
        projects.dedup();
        projects.len()
    }
}

impl fmt::Display for TestPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Test Plan ({} instances)", self.len())?;
        writeln!(f, "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━")?;
        for instance in &self.instances {
            writeln!(f, "  {instance}")?;
        }
        writeln!(f, "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━")?;
        write!(
            f,
            "Cases: {} | Projects: {} | Instances: {}",
            self.case_count(),
            self.project_count(),
            self.len()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn instance(title: &str, case: &str, project: Option<&str>) -> TestInstance {
        TestInstance {
            title: title.to_string(),
            case: case.to_string(),
            project: project.map(String::from),
            row: None,
            options: OptionSet::default(),
        }
    }

    #[test]
    fn test_instance_scope() {
        assert_eq!(instance("t", "c", Some("alice")).scope(), "alice");
        assert_eq!(instance("t", "c", None).scope(), "");
    }

    #[test]
    fn test_instance_display() {
        assert_eq!(
            instance("test 1", "greeting", Some("alice")).to_string(),
            "[alice] › test 1"
        );
        assert_eq!(instance("test 1", "greeting", None).to_string(), "test 1");
    }

    #[test]
    fn test_plan_counts() {
        let plan = TestPlan::new(vec![
            instance("test 1", "greeting", Some("alice")),
            instance("test 1", "greeting", Some("bob")),
            instance("value 1", "rows", None),
        ]);

        assert_eq!(plan.len(), 3);
        assert_eq!(plan.case_count(), 2);
        assert_eq!(plan.project_count(), 2);
    }
}
