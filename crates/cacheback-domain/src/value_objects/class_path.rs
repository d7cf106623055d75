//! Dotted job class paths

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A `"package.module.ClassName"` string split on its last separator
///
/// # Example
///
/// ```
/// use cacheback_domain::value_objects::ClassPath;
///
/// let path: ClassPath = "app.jobs.UserCountJob".parse().unwrap();
/// assert_eq!(path.module(), "app.jobs");
/// assert_eq!(path.name(), "UserCountJob");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ClassPath {
    module: String,
    name: String,
}

impl ClassPath {
    /// Build a path from its two halves
    pub fn new<M: Into<String>, N: Into<String>>(module: M, name: N) -> Self {
        Self {
            module: module.into(),
            name: name.into(),
        }
    }

    /// Split a dotted string into module path and attribute name
    pub fn parse(path: &str) -> Result<Self> {
        let (module, name) = path.rsplit_once('.').ok_or_else(|| {
            Error::invalid_argument(format!(
                "Job class path '{path}' must have the form 'module.ClassName'"
            ))
        })?;

        if module.is_empty() || name.is_empty() {
            return Err(Error::invalid_argument(format!(
                "Job class path '{path}' has an empty module or class name"
            )));
        }

        Ok(Self::new(module, name))
    }

    /// Module path (everything before the last `.`)
    pub fn module(&self) -> &str {
        &self.module
    }

    /// Attribute name (everything after the last `.`)
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl FromStr for ClassPath {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for ClassPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.module, self.name)
    }
}
