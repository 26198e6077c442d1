//! Architecture violations

use serde::{Deserialize, Serialize};
use std::fmt;

use super::dependency::{DependencyKind, ModuleDependency};

/// A dependency into a type another module does not expose
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    pub origin_module: String,
    pub target_module: String,
    pub origin_type: String,
    pub target_type: String,
    pub kind: DependencyKind,
    pub description: String,
}

impl Violation {
    pub fn new(origin_module: &str, target_module: &str, dependency: &ModuleDependency<'_>) -> Self {
        Self {
            origin_module: origin_module.to_string(),
            target_module: target_module.to_string(),
            origin_type: dependency.origin.name.clone(),
            target_type: dependency.target.name.clone(),
            kind: dependency.kind,
            description: dependency.description.clone(),
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Module '{}' depends on non-exposed type {} within module '{}'!\n{}",
            self.origin_module, self.target_type, self.target_module, self.description
        )
    }
}

/// An ordered collection of violations
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Violations(Vec<Violation>);

impl Violations {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn push(&mut self, violation: Violation) {
        self.0.push(violation);
    }

    pub fn extend(&mut self, other: Violations) {
        self.0.extend(other.0);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Violation> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[Violation] {
        &self.0
    }

    /// Violations originating in the given module
    pub fn from_module<'a>(&'a self, module: &'a str) -> impl Iterator<Item = &'a Violation> + 'a {
        self.0.iter().filter(move |v| v.origin_module == module)
    }

    /// `Ok` when empty, otherwise an error carrying all violations
    pub fn into_result(self) -> crate::error::Result<()> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self.into())
        }
    }
}

impl FromIterator<Violation> for Violations {
    fn from_iter<I: IntoIterator<Item = Violation>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for Violations {
    type Item = Violation;
    type IntoIter = std::vec::IntoIter<Violation>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl fmt::Display for Violations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, violation) in self.0.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            writeln!(f, "- {}", violation)?;
        }
        Ok(())
    }
}
