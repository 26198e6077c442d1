//! Dependency edge extraction
//!
//! For every type of a module, edges come from three sources in a fixed
//! order: direct references reported by the class model, method and
//! constructor signatures (parameters first, then the return type), and
//! field types. The concatenation is deduplicated by
//! (origin, target, description), keeping the first occurrence.

use std::collections::HashSet;

use crate::core::Modules;
use crate::error::{ModulithError, Result};
use crate::models::dependency::ModuleDependency;
use crate::models::module::Module;
use crate::models::type_ref::TypeRef;

/// All deduplicated edges from `module` into other modules
pub fn extract<'m>(module: &Module<'m>, modules: &Modules<'m>) -> Result<Vec<ModuleDependency<'m>>> {
    let mut seen: HashSet<(&'m str, &'m str, String)> = HashSet::new();
    let mut edges = Vec::new();

    for origin in module.base_package().all_types() {
        let owner = modules.existing_module_of(origin)?;
        if owner.name() != module.name() {
            return Err(ModulithError::model_inconsistency(format!(
                "type {} is contained in module '{}' but indexed under '{}'",
                origin.name,
                module.name(),
                owner.name()
            )));
        }

        for edge in type_dependencies(origin, module, modules) {
            let key = (
                edge.origin.name.as_str(),
                edge.target.name.as_str(),
                edge.description.clone(),
            );
            if seen.insert(key) {
                edges.push(edge);
            }
        }
    }

    tracing::debug!(module = module.name(), edges = edges.len(), "extracted module dependencies");

    Ok(edges)
}

/// Candidate edges of one type, in source order, before deduplication
fn type_dependencies<'m>(
    origin: &'m TypeRef,
    module: &Module<'m>,
    modules: &Modules<'m>,
) -> Vec<ModuleDependency<'m>> {
    let resolve = |name: &str| -> Option<&'m TypeRef> {
        modules
            .model()
            .get(normalize_type_name(name))
            .filter(|target| is_dependency_to_other_module(target, module, modules))
    };

    let mut edges = Vec::new();

    for dependency in &origin.dependencies {
        if let Some(target) = resolve(&dependency.target) {
            edges.push(ModuleDependency::direct(origin, target, dependency.description.as_deref()));
        }
    }

    for method in &origin.methods {
        for parameter in &method.parameters {
            if let Some(target) = resolve(parameter) {
                edges.push(ModuleDependency::parameter(origin, method, target));
            }
        }

        if method.constructor {
            continue;
        }

        if let Some(target) = method.return_type.as_deref().and_then(resolve) {
            edges.push(ModuleDependency::return_type(origin, method, target));
        }
    }

    for field in &origin.fields {
        if let Some(target) = resolve(&field.type_name) {
            edges.push(ModuleDependency::field(origin, field, target));
        }
    }

    edges
}

/// Targets owned by no module (third-party code) are exempt
fn is_dependency_to_other_module(target: &TypeRef, module: &Module<'_>, modules: &Modules<'_>) -> bool {
    modules.contain(target) && !module.contains(target)
}

/// Strip array brackets and generic arguments from a referenced type name
fn normalize_type_name(name: &str) -> &str {
    let name = name.split('<').next().unwrap_or(name).trim();
    name.trim_end_matches("[]")
}
