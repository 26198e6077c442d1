//! A logical module: one base package plus its named interfaces

use std::fmt;

use super::declaration::{Markers, ModuleDeclaration};
use super::dependency::{DependencyDepth, ModuleDependency};
use super::named_interface::NamedInterfaces;
use super::package_tree::PackageTree;
use super::summary::ModuleSummary;
use super::type_ref::{ClassModel, TypeRef};
use super::violation::{Violation, Violations};
use crate::core::{traversal, Modules};
use crate::error::Result;

/// A module of the application.
///
/// Named interfaces are resolved when the module is created; outbound edges
/// are attached once by [`Modules`] after its type index is complete.
#[derive(Debug, Clone)]
pub struct Module<'m> {
    name: String,
    display_name: String,
    base_package: PackageTree<'m>,
    named_interfaces: NamedInterfaces<'m>,
    components: Vec<&'m TypeRef>,
    dependencies: Vec<ModuleDependency<'m>>,
}

impl<'m> Module<'m> {
    /// Resolve a declaration against the class model
    pub fn resolve(model: &'m ClassModel, declaration: &ModuleDeclaration, markers: &Markers) -> Result<Self> {
        let base_package = PackageTree::new(model, declaration.base_package.clone());

        let named_interfaces = match &declaration.named_interfaces {
            Some(declared) => NamedInterfaces::declared(&base_package, declared, &declaration.name)?,
            None => NamedInterfaces::discover(&base_package, &markers.named_interface),
        };
        named_interfaces.validate(&declaration.name)?;

        let display_name = declaration
            .display_name
            .clone()
            .or_else(|| {
                base_package
                    .annotation(&markers.module)
                    .and_then(|a| a.attribute(&["displayName", "display_name", "value"]))
                    .map(str::to_string)
            })
            .unwrap_or_else(|| declaration.name.clone());

        let components = base_package
            .all_types()
            .filter(|t| markers.components.iter().any(|marker| t.is_annotated_with(marker)))
            .collect();

        Ok(Self {
            name: declaration.name.clone(),
            display_name,
            base_package,
            named_interfaces,
            components,
            dependencies: Vec::new(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn base_package(&self) -> &PackageTree<'m> {
        &self.base_package
    }

    pub fn named_interfaces(&self) -> &NamedInterfaces<'m> {
        &self.named_interfaces
    }

    /// Types annotated with one of the component markers
    pub fn components(&self) -> &[&'m TypeRef] {
        &self.components
    }

    /// Whether the type lives in the base package or below it
    pub fn contains(&self, type_ref: &TypeRef) -> bool {
        self.base_package.contains(type_ref)
    }

    /// Whether the type is part of any of the module's named interfaces
    pub fn is_exposed(&self, type_ref: &TypeRef) -> bool {
        self.named_interfaces.exposes(type_ref)
    }

    /// Deduplicated outbound edges into other modules, in discovery order
    pub fn dependency_edges(&self) -> &[ModuleDependency<'m>] {
        &self.dependencies
    }

    pub(crate) fn attach_dependencies(&mut self, dependencies: Vec<ModuleDependency<'m>>) {
        self.dependencies = dependencies;
    }

    /// Other modules this module depends on, expanded to the given depth
    pub fn dependencies<'a>(&self, modules: &'a Modules<'m>, depth: DependencyDepth) -> Vec<&'a Module<'m>> {
        traversal::dependencies_of(self, modules, depth)
    }

    /// The module's own base package followed by those of its dependencies
    pub fn base_packages(&self, modules: &Modules<'m>, depth: DependencyDepth) -> Vec<String> {
        std::iter::once(self)
            .chain(self.dependencies(modules, depth))
            .map(|m| m.base_package.name().to_string())
            .collect()
    }

    /// All edges into types the target module does not expose
    pub fn violations(&self, modules: &Modules<'m>) -> Result<Violations> {
        let mut violations = Violations::new();

        for dependency in &self.dependencies {
            let target_module = modules.existing_module_of(dependency.target)?;

            if !target_module.is_exposed(dependency.target) {
                let origin_module = modules.existing_module_of(dependency.origin)?;
                violations.push(Violation::new(origin_module.name(), target_module.name(), dependency));
            }
        }

        Ok(violations)
    }

    /// Fails with every violation of this module
    pub fn verify_dependencies(&self, modules: &Modules<'m>) -> Result<()> {
        self.violations(modules)?.into_result()
    }

    pub fn summary(&self, modules: &Modules<'m>) -> ModuleSummary {
        ModuleSummary {
            name: self.name.clone(),
            display_name: self.display_name.clone(),
            base_package: self.base_package.name().to_string(),
            named_interfaces: self
                .named_interfaces
                .iter()
                .map(|i| i.summary())
                .collect(),
            explicit_interfaces: self.named_interfaces.has_explicit_interfaces(),
            components: self
                .components
                .iter()
                .map(|t| t.abbreviated_name(self.base_package.name()))
                .collect(),
            dependencies: self
                .dependencies(modules, DependencyDepth::Immediate)
                .iter()
                .map(|m| m.name().to_string())
                .collect(),
        }
    }
}

impl PartialEq for Module<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.base_package.name() == other.base_package.name()
    }
}

impl Eq for Module<'_> {}

impl fmt::Display for Module<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "## {} ##", self.display_name)?;
        writeln!(f, "> Logical name: {}", self.name)?;
        writeln!(f, "> Base package: {}", self.base_package.name())?;

        if self.named_interfaces.has_explicit_interfaces() {
            writeln!(f, "> Named interfaces:")?;
            for interface in self.named_interfaces.iter() {
                writeln!(f, "  + {}", interface)?;
            }
        }

        if self.components.is_empty() {
            writeln!(f, "> Components: none")?;
        } else {
            writeln!(f, "> Components:")?;
            for component in &self.components {
                writeln!(f, "  {}", component.abbreviated_name(self.base_package.name()))?;
            }
        }

        Ok(())
    }
}
