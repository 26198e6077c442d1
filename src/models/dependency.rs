//! Module dependency edges and traversal depth

use serde::{Deserialize, Serialize};
use std::fmt;

use super::type_ref::{FieldRef, MethodRef, TypeRef};

/// Structural cause of a dependency edge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DependencyKind {
    /// Reference reported by the class model (inheritance, static use, ...)
    DirectReference,
    /// Method or constructor parameter type
    Parameter,
    /// Method return type
    ReturnType,
    /// Declared field type
    Field,
}

impl fmt::Display for DependencyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DependencyKind::DirectReference => write!(f, "direct reference"),
            DependencyKind::Parameter => write!(f, "parameter"),
            DependencyKind::ReturnType => write!(f, "return type"),
            DependencyKind::Field => write!(f, "field"),
        }
    }
}

/// How far a module's dependency set is expanded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DependencyDepth {
    /// No dependencies at all
    None,
    /// Directly depended-upon modules only
    #[default]
    Immediate,
    /// Transitive closure
    All,
}

impl std::str::FromStr for DependencyDepth {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "none" => Ok(DependencyDepth::None),
            "immediate" => Ok(DependencyDepth::Immediate),
            "all" => Ok(DependencyDepth::All),
            _ => Err(format!("Invalid dependency depth: {}", s)),
        }
    }
}

impl fmt::Display for DependencyDepth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DependencyDepth::None => write!(f, "none"),
            DependencyDepth::Immediate => write!(f, "immediate"),
            DependencyDepth::All => write!(f, "all"),
        }
    }
}

/// One attributed edge from a type to a type of another module.
///
/// Two edges are the same edge iff origin, target and description match;
/// the kind is derived from the description's source and not part of it.
#[derive(Debug, Clone)]
pub struct ModuleDependency<'m> {
    pub origin: &'m TypeRef,
    pub target: &'m TypeRef,
    pub kind: DependencyKind,
    pub description: String,
}

impl PartialEq for ModuleDependency<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for ModuleDependency<'_> {}

impl std::hash::Hash for ModuleDependency<'_> {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}

impl<'m> ModuleDependency<'m> {
    /// Deduplication key
    pub fn key(&self) -> (&str, &str, &str) {
        (&self.origin.name, &self.target.name, &self.description)
    }

    pub fn direct(origin: &'m TypeRef, target: &'m TypeRef, description: Option<&str>) -> Self {
        let description = match description {
            Some(description) => description.to_string(),
            None => format!(
                "{} references {} in {}",
                origin.name,
                target.name,
                origin.location()
            ),
        };

        Self {
            origin,
            target,
            kind: DependencyKind::DirectReference,
            description,
        }
    }

    pub fn parameter(origin: &'m TypeRef, method: &MethodRef, target: &'m TypeRef) -> Self {
        Self {
            origin,
            target,
            kind: DependencyKind::Parameter,
            description: describe_method(origin, method, "parameter", target),
        }
    }

    pub fn return_type(origin: &'m TypeRef, method: &MethodRef, target: &'m TypeRef) -> Self {
        Self {
            origin,
            target,
            kind: DependencyKind::ReturnType,
            description: describe_method(origin, method, "return type", target),
        }
    }

    pub fn field(origin: &'m TypeRef, field: &FieldRef, target: &'m TypeRef) -> Self {
        Self {
            origin,
            target,
            kind: DependencyKind::Field,
            description: format!(
                "field {}.{} is of type {} in {}",
                origin.name,
                field.name,
                target.name,
                origin.location()
            ),
        }
    }
}

impl fmt::Display for ModuleDependency<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.description)
    }
}

fn describe_method(owner: &TypeRef, method: &MethodRef, declaration: &str, target: &TypeRef) -> String {
    format!(
        "Method <{}.{}({})> declares {} {} in {}",
        owner.name,
        method.name,
        method.parameters.join(", "),
        declaration,
        target.name,
        owner.location()
    )
}
