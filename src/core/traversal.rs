//! Depth-bounded module dependency traversal

use std::collections::{HashSet, VecDeque};

use crate::core::Modules;
use crate::models::dependency::DependencyDepth;
use crate::models::module::Module;

/// Modules targeted by the module's edges, first discovery first
pub fn immediate_dependencies<'a, 'm>(module: &Module<'m>, modules: &'a Modules<'m>) -> Vec<&'a Module<'m>> {
    let mut seen = HashSet::new();

    module
        .dependency_edges()
        .iter()
        .filter_map(|edge| modules.module_by_type(edge.target))
        .filter(|target| target.name() != module.name())
        .filter(|target| seen.insert(target.name().to_string()))
        .collect()
}

/// Dependencies of `module` expanded to `depth`.
///
/// `All` is a breadth-first worklist over immediate dependencies with a
/// visited set keyed by module name, seeded with the module itself, so it
/// terminates on cycles and never reports the module as its own dependency.
pub fn dependencies_of<'a, 'm>(
    module: &Module<'m>,
    modules: &'a Modules<'m>,
    depth: DependencyDepth,
) -> Vec<&'a Module<'m>> {
    match depth {
        DependencyDepth::None => Vec::new(),
        DependencyDepth::Immediate => immediate_dependencies(module, modules),
        DependencyDepth::All => {
            let mut visited: HashSet<String> = HashSet::new();
            visited.insert(module.name().to_string());

            let mut result = Vec::new();
            let mut queue = VecDeque::new();
            queue.extend(immediate_dependencies(module, modules));

            while let Some(current) = queue.pop_front() {
                if !visited.insert(current.name().to_string()) {
                    continue;
                }

                result.push(current);
                queue.extend(immediate_dependencies(current, modules));
            }

            result
        }
    }
}
