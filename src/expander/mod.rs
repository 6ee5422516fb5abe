//! Parameter space expansion
//!
//! Turns declared options, projects, and loaded data rows into a flat,
//! ordered, uniquely-titled list of test instances. Expansion is a pure
//! in-memory computation: no I/O, no shared state, no retries.

mod error;
mod space;
mod template;

pub use error::ExpandError;
pub use space::{Axis, CaseTemplate, ParameterSpace};
pub use template::TitleTemplate;
