//! Package tree projection over the class model

use std::collections::BTreeSet;

use super::type_ref::{is_same_or_sub_package, local_name, Annotation, ClassModel, TypeRef};

/// A read-only view of one package and everything below it.
///
/// Nothing is cached: every query walks the class model again.
#[derive(Debug, Clone)]
pub struct PackageTree<'m> {
    model: &'m ClassModel,
    name: String,
}

impl<'m> PackageTree<'m> {
    pub fn new(model: &'m ClassModel, name: impl Into<String>) -> Self {
        Self {
            model,
            name: name.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn local_name(&self) -> &str {
        local_name(&self.name)
    }

    pub fn model(&self) -> &'m ClassModel {
        self.model
    }

    /// Types declared directly in this package
    pub fn types(&self) -> impl Iterator<Item = &'m TypeRef> + '_ {
        self.model
            .types()
            .iter()
            .filter(move |t| t.package == self.name)
    }

    /// Types declared in this package or any package below it
    pub fn all_types(&self) -> impl Iterator<Item = &'m TypeRef> + '_ {
        self.model
            .types()
            .iter()
            .filter(move |t| is_same_or_sub_package(&t.package, &self.name))
    }

    pub fn contains(&self, type_ref: &TypeRef) -> bool {
        self.contains_package(&type_ref.package)
    }

    pub fn contains_package(&self, package: &str) -> bool {
        is_same_or_sub_package(package, &self.name)
    }

    /// Direct sub-packages in name order
    pub fn sub_packages(&self) -> Vec<PackageTree<'m>> {
        let prefix_len = if self.name.is_empty() { 0 } else { self.name.len() + 1 };

        let children: BTreeSet<String> = self
            .model
            .package_names()
            .filter(|package| *package != self.name && is_same_or_sub_package(package, &self.name))
            .map(|package| {
                let rest = &package[prefix_len..];
                let child = rest.split('.').next().unwrap_or(rest);
                if self.name.is_empty() {
                    child.to_string()
                } else {
                    format!("{}.{}", self.name, child)
                }
            })
            .collect();

        children
            .into_iter()
            .map(|name| PackageTree::new(self.model, name))
            .collect()
    }

    /// Relative sub-package, `""` being this package itself
    pub fn sub_package(&self, relative: &str) -> PackageTree<'m> {
        let relative = relative.trim_matches('.');
        if relative.is_empty() {
            self.clone()
        } else if self.name.is_empty() {
            PackageTree::new(self.model, relative)
        } else {
            PackageTree::new(self.model, format!("{}.{}", self.name, relative))
        }
    }

    /// The given marker annotation on this package, if present
    pub fn annotation(&self, marker: &str) -> Option<&'m Annotation> {
        self.model
            .package_annotations(&self.name)
            .iter()
            .find(|a| a.is(marker))
    }

    /// Direct sub-packages carrying the marker annotation, paired with it.
    /// Marked packages further down are not reported; they belong to the
    /// nearest marked ancestor.
    pub fn sub_packages_annotated_with(&self, marker: &str) -> Vec<(PackageTree<'m>, &'m Annotation)> {
        self.sub_packages()
            .into_iter()
            .filter_map(|package| {
                let annotation = package.annotation(marker)?;
                Some((package, annotation))
            })
            .collect()
    }
}
