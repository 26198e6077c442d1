//! Named interfaces: the parts of a module other modules may depend on

use serde::Serialize;
use std::collections::HashSet;
use std::fmt;

use super::declaration::InterfaceDeclaration;
use super::package_tree::PackageTree;
use super::type_ref::{Annotation, TypeRef};
use crate::error::{ModulithError, Result};

/// Reserved name of the synthetic interface of modules without explicit ones
pub const UNNAMED: &str = "unnamed";

/// A named set of types a module exposes
#[derive(Debug, Clone)]
pub struct NamedInterface<'m> {
    name: String,
    types: Vec<&'m TypeRef>,
    index: HashSet<&'m str>,
}

impl<'m> NamedInterface<'m> {
    pub fn new(name: impl Into<String>, types: impl IntoIterator<Item = &'m TypeRef>) -> Self {
        let mut index = HashSet::new();
        let types = types
            .into_iter()
            .filter(|t| index.insert(t.name.as_str()))
            .collect();

        Self {
            name: name.into(),
            types,
            index,
        }
    }

    /// The default interface: every type directly in the base package
    pub fn unnamed(base_package: &PackageTree<'m>) -> Self {
        Self::new(UNNAMED, base_package.types())
    }

    /// Interface of a marked package, named after the marker's `value` or
    /// `name` attribute, falling back to the package's local name
    pub fn of_package(package: &PackageTree<'m>, marker: &Annotation) -> Self {
        let name = marker
            .attribute(&["value", "name"])
            .unwrap_or_else(|| package.local_name())
            .to_string();

        Self::new(name, package.all_types())
    }

    /// Interface from configuration
    pub fn declared(base_package: &PackageTree<'m>, declaration: &InterfaceDeclaration) -> Self {
        let mut types = Vec::new();
        for relative in &declaration.packages {
            if relative.trim_matches('.').is_empty() {
                types.extend(base_package.types());
            } else {
                types.extend(base_package.sub_package(relative).all_types());
            }
        }

        Self::new(declaration.name.clone(), types)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_unnamed(&self) -> bool {
        self.name == UNNAMED
    }

    pub fn types(&self) -> &[&'m TypeRef] {
        &self.types
    }

    pub fn contains(&self, type_ref: &TypeRef) -> bool {
        self.index.contains(type_ref.name.as_str())
    }

    pub fn summary(&self) -> NamedInterfaceSummary {
        NamedInterfaceSummary {
            name: self.name.clone(),
            types: self.types.iter().map(|t| t.name.clone()).collect(),
        }
    }
}

impl fmt::Display for NamedInterface<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.types.iter().map(|t| t.simple_name()).collect();
        write!(f, "{} ({} types): [{}]", self.name, self.types.len(), names.join(", "))
    }
}

/// Serializable view of a named interface
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NamedInterfaceSummary {
    pub name: String,
    pub types: Vec<String>,
}

/// All named interfaces of one module. Never empty.
#[derive(Debug, Clone)]
pub struct NamedInterfaces<'m> {
    interfaces: Vec<NamedInterface<'m>>,
    synthetic: bool,
}

impl<'m> NamedInterfaces<'m> {
    /// Scan the base package's direct sub-packages for the marker
    pub fn discover(base_package: &PackageTree<'m>, marker: &str) -> Self {
        let explicit = base_package
            .sub_packages_annotated_with(marker)
            .iter()
            .map(|(package, annotation)| NamedInterface::of_package(package, annotation))
            .collect();

        Self::or_unnamed(explicit, base_package)
    }

    /// Build the interfaces from configuration. Every declared sub-package
    /// has to exist in the class model.
    pub fn declared(
        base_package: &PackageTree<'m>,
        declarations: &[InterfaceDeclaration],
        module: &str,
    ) -> Result<Self> {
        let model = base_package.model();
        for declaration in declarations {
            for relative in &declaration.packages {
                if relative.trim_matches('.').is_empty() {
                    continue;
                }

                let package = base_package.sub_package(relative);
                if !model.has_package(package.name()) {
                    return Err(ModulithError::config_error(format!(
                        "Module '{}' declares named interface '{}' on package {} which does not exist",
                        module,
                        declaration.name,
                        package.name()
                    )));
                }
            }
        }

        let explicit = declarations
            .iter()
            .map(|declaration| NamedInterface::declared(base_package, declaration))
            .collect();

        Ok(Self::or_unnamed(explicit, base_package))
    }

    fn or_unnamed(explicit: Vec<NamedInterface<'m>>, base_package: &PackageTree<'m>) -> Self {
        if explicit.is_empty() {
            Self {
                interfaces: vec![NamedInterface::unnamed(base_package)],
                synthetic: true,
            }
        } else {
            Self {
                interfaces: explicit,
                synthetic: false,
            }
        }
    }

    /// Reject duplicate names and explicit use of the reserved name
    pub fn validate(&self, module: &str) -> Result<()> {
        let mut seen = HashSet::new();
        for interface in &self.interfaces {
            if !seen.insert(interface.name()) {
                return Err(ModulithError::DuplicateNamedInterface {
                    module: module.to_string(),
                    name: interface.name().to_string(),
                });
            }
        }

        if !self.synthetic && self.interfaces.iter().any(NamedInterface::is_unnamed) {
            return Err(ModulithError::config_error(format!(
                "Module '{}' uses the reserved interface name '{}'",
                module, UNNAMED
            )));
        }

        Ok(())
    }

    /// Whether any interface contains the type
    pub fn exposes(&self, type_ref: &TypeRef) -> bool {
        self.interfaces.iter().any(|i| i.contains(type_ref))
    }

    pub fn has_explicit_interfaces(&self) -> bool {
        !self.synthetic
    }

    pub fn get(&self, name: &str) -> Option<&NamedInterface<'m>> {
        self.interfaces.iter().find(|i| i.name() == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &NamedInterface<'m>> {
        self.interfaces.iter()
    }

    pub fn len(&self) -> usize {
        self.interfaces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.interfaces.is_empty()
    }
}
