use serde::{Deserialize, Serialize};
use std::fmt;

/// An import line of the generated file. An empty alias means "no alias".
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ImportEntry {
    pub path: String,
    #[serde(default)]
    pub alias: String,
}

impl ImportEntry {
    pub fn new(alias: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            alias: alias.into(),
            path: path.into(),
        }
    }

    pub fn is_dot(&self) -> bool {
        self.alias == "."
    }
}

/// Renders `<alias> "<path>"`. The alias token is written even when empty.
impl fmt::Display for ImportEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {:?}", self.alias, self.path)
    }
}
