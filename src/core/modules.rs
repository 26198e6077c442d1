//! Module graph assembly, lookup and verification orchestration

use petgraph::algo::tarjan_scc;
use petgraph::graph::{DiGraph, NodeIndex};
use rayon::prelude::*;
use std::collections::HashMap;
use std::time::Instant;
use tracing::{debug, info, warn};

use super::extractor;
use super::parallel::{parallel_process_with_errors, parallel_process_with_progress_and_errors, ProgressUpdate};
use crate::error::{ModulithError, OptionExt, Result};
use crate::models::declaration::{Markers, ModuleDeclaration, ModulesConfig};
use crate::models::dependency::{DependencyDepth, ModuleDependency};
use crate::models::module::Module;
use crate::models::package_tree::PackageTree;
use crate::models::summary::{DependencyListing, ModuleSummary, VerificationReport};
use crate::models::type_ref::{is_same_or_sub_package, ClassModel, TypeRef};
use crate::models::violation::Violations;

/// All modules of an application.
///
/// Built once per verification run and immutable afterwards. Every type of
/// the class model below the root package maps to at most one module.
#[derive(Debug)]
pub struct Modules<'m> {
    model: &'m ClassModel,
    root_package: String,
    modules: Vec<Module<'m>>,
    by_name: HashMap<String, usize>,
    by_type: HashMap<&'m str, usize>,
    graph: DiGraph<usize, usize>,
}

impl<'m> Modules<'m> {
    /// Discover the modules below the package of the given root type
    pub fn of(model: &'m ClassModel, root: &TypeRef, config: &ModulesConfig) -> Result<Self> {
        let root = model.get(&root.name).ok_or_error(|| ModulithError::RootNotFound {
            root: root.name.clone(),
        })?;

        Self::of_package(model, &root.package, config)
    }

    /// Discover one module per direct sub-package of `root_package`
    pub fn of_package(model: &'m ClassModel, root_package: &str, config: &ModulesConfig) -> Result<Self> {
        if !model.has_package(root_package) {
            return Err(ModulithError::RootNotFound {
                root: root_package.to_string(),
            });
        }

        let declarations = discover_declarations(model, root_package, config)?;
        Self::from_declarations(model, root_package, declarations, &config.markers)
    }

    /// Assemble the graph from explicit declarations.
    ///
    /// Fails on duplicate logical names and on base packages nested into
    /// each other, since either would break the type to module partition.
    pub fn from_declarations(
        model: &'m ClassModel,
        root_package: &str,
        declarations: Vec<ModuleDeclaration>,
        markers: &Markers,
    ) -> Result<Self> {
        let started = Instant::now();

        check_partition(root_package, &declarations)?;

        let modules = parallel_process_with_errors(declarations.iter().collect::<Vec<_>>(), |declaration| {
            Module::resolve(model, declaration, markers)
        })?;

        let by_name = modules
            .iter()
            .enumerate()
            .map(|(i, module)| (module.name().to_string(), i))
            .collect();

        let mut by_type = HashMap::with_capacity(model.len());
        for (i, module) in modules.iter().enumerate() {
            for type_ref in module.base_package().all_types() {
                by_type.insert(type_ref.name.as_str(), i);
            }
        }

        let mut graph = DiGraph::with_capacity(modules.len(), 0);
        for i in 0..modules.len() {
            graph.add_node(i);
        }

        let mut result = Self {
            model,
            root_package: root_package.to_string(),
            modules,
            by_name,
            by_type,
            graph,
        };

        let edges: Vec<Vec<ModuleDependency<'m>>> = result
            .modules
            .par_iter()
            .map(|module| extractor::extract(module, &result))
            .collect::<Result<_>>()?;

        for (module, dependencies) in result.modules.iter_mut().zip(edges) {
            module.attach_dependencies(dependencies);
        }

        result.build_graph();

        info!(
            root = %result.root_package,
            modules = result.modules.len(),
            types = result.by_type.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "assembled module graph"
        );

        Ok(result)
    }

    fn build_graph(&mut self) {
        let mut weights: HashMap<(usize, usize), usize> = HashMap::new();

        for (i, module) in self.modules.iter().enumerate() {
            for edge in module.dependency_edges() {
                if let Some(&target) = self.by_type.get(edge.target.name.as_str()) {
                    *weights.entry((i, target)).or_insert(0) += 1;
                }
            }
        }

        let mut pairs: Vec<_> = weights.into_iter().collect();
        pairs.sort();

        for ((origin, target), weight) in pairs {
            self.graph
                .add_edge(NodeIndex::new(origin), NodeIndex::new(target), weight);
        }
    }

    pub fn model(&self) -> &'m ClassModel {
        self.model
    }

    pub fn root_package(&self) -> &str {
        &self.root_package
    }

    pub fn module_by_name(&self, name: &str) -> Option<&Module<'m>> {
        self.by_name.get(name).map(|&i| &self.modules[i])
    }

    /// The module containing the type, `None` for types outside all modules.
    ///
    /// Types of the model are answered from the type index. Only names the
    /// model does not know fall back to a scan over the module base packages.
    pub fn module_by_type(&self, type_ref: &TypeRef) -> Option<&Module<'m>> {
        match self.by_type.get(type_ref.name.as_str()) {
            Some(&i) => Some(&self.modules[i]),
            None if self.model.get(&type_ref.name).is_some() => None,
            None => self.module_by_package(&type_ref.package),
        }
    }

    /// The module whose base package contains `package`
    pub fn module_by_package(&self, package: &str) -> Option<&Module<'m>> {
        self.modules
            .iter()
            .find(|module| module.base_package().contains_package(package))
    }

    /// Whether any module contains the type
    pub fn contain(&self, type_ref: &TypeRef) -> bool {
        self.module_by_type(type_ref).is_some()
    }

    /// Like [`Modules::module_by_type`], for types that must be module-managed
    pub fn existing_module_of(&self, type_ref: &TypeRef) -> Result<&Module<'m>> {
        self.module_by_type(type_ref).ok_or_error(|| {
            ModulithError::model_inconsistency(format!(
                "type {} is expected to belong to a module below {}",
                type_ref.name, self.root_package
            ))
        })
    }

    pub fn iter(&self) -> impl Iterator<Item = &Module<'m>> {
        self.modules.iter()
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    /// Verify every module, failing with all violations at once
    pub fn verify(&self) -> Result<()> {
        self.violations()?.into_result()
    }

    /// Violations of all modules, in module order
    pub fn violations(&self) -> Result<Violations> {
        self.violations_with_progress(|_| {})
    }

    pub fn violations_with_progress<P>(&self, progress: P) -> Result<Violations>
    where
        P: Fn(ProgressUpdate) + Send + Sync,
    {
        let per_module = parallel_process_with_progress_and_errors(
            self.modules.iter().collect::<Vec<_>>(),
            |module| module.violations(self),
            progress,
        )?;

        let violations: Violations = per_module.into_iter().flatten().collect();

        info!(
            modules = self.modules.len(),
            violations = violations.len(),
            "verified module dependencies"
        );

        Ok(violations)
    }

    /// Groups of modules that depend on each other, each sorted by name
    pub fn cycles(&self) -> Vec<Vec<String>> {
        let mut cycles: Vec<Vec<String>> = tarjan_scc(&self.graph)
            .into_iter()
            .filter(|component| component.len() > 1)
            .map(|component| {
                let mut names: Vec<String> = component
                    .into_iter()
                    .map(|node| self.modules[self.graph[node]].name().to_string())
                    .collect();
                names.sort();
                names
            })
            .collect();

        cycles.sort();

        for cycle in &cycles {
            warn!(modules = %cycle.join(" -> "), "cyclic module dependency");
        }

        cycles
    }

    pub fn summaries(&self) -> Vec<ModuleSummary> {
        self.modules.iter().map(|module| module.summary(self)).collect()
    }

    /// Verify everything and collect the results for output
    pub fn report(&self) -> Result<VerificationReport> {
        self.report_with_progress(|_| {})
    }

    pub fn report_with_progress<P>(&self, progress: P) -> Result<VerificationReport>
    where
        P: Fn(ProgressUpdate) + Send + Sync,
    {
        let started = Instant::now();

        let mut report = VerificationReport::new(&self.root_package);
        report.type_count = self.by_type.len();
        report.modules = self.summaries();
        report.violations = self.violations_with_progress(progress)?;
        report.cycles = self.cycles();
        report.set_duration(started.elapsed());

        Ok(report)
    }

    /// Dependencies of the named module at `depth`
    pub fn dependency_listing(&self, name: &str, depth: DependencyDepth) -> Result<DependencyListing> {
        let module = self.module_by_name(name).ok_or_error(|| ModulithError::UnknownModule {
            name: name.to_string(),
            root: self.root_package.clone(),
        })?;

        Ok(DependencyListing {
            module: module.name().to_string(),
            depth,
            dependencies: module
                .dependencies(self, depth)
                .iter()
                .map(|m| m.name().to_string())
                .collect(),
            base_packages: module.base_packages(self, depth),
        })
    }
}

/// One declaration per direct sub-package of the root, with configured
/// overrides applied
fn discover_declarations(
    model: &ClassModel,
    root_package: &str,
    config: &ModulesConfig,
) -> Result<Vec<ModuleDeclaration>> {
    let mut declarations: Vec<ModuleDeclaration> = PackageTree::new(model, root_package)
        .sub_packages()
        .into_iter()
        .map(|package| ModuleDeclaration::new(package.name()))
        .collect();

    for (name, settings) in &config.modules {
        let declaration = declarations
            .iter_mut()
            .find(|d| &d.name == name)
            .ok_or_error(|| ModulithError::UnknownModule {
                name: name.clone(),
                root: root_package.to_string(),
            })?;

        if let Some(base_package) = &settings.base_package {
            if base_package != &declaration.base_package {
                return Err(ModulithError::config_error(format!(
                    "module '{}' is configured with base package {} but was discovered at {}",
                    name, base_package, declaration.base_package
                )));
            }
        }

        *declaration = declaration.clone().configure(settings);
    }

    debug!(root = root_package, modules = declarations.len(), "discovered module declarations");

    Ok(declarations)
}

fn check_partition(root_package: &str, declarations: &[ModuleDeclaration]) -> Result<()> {
    let mut names: HashMap<&str, &str> = HashMap::new();

    for declaration in declarations {
        if !is_same_or_sub_package(&declaration.base_package, root_package) {
            return Err(ModulithError::config_error(format!(
                "module '{}' lives in {} outside of the application root {}",
                declaration.name, declaration.base_package, root_package
            )));
        }

        if let Some(first) = names.insert(&declaration.name, &declaration.base_package) {
            return Err(ModulithError::DuplicateModule {
                name: declaration.name.clone(),
                first: first.to_string(),
                second: declaration.base_package.clone(),
            });
        }
    }

    for (i, outer) in declarations.iter().enumerate() {
        for inner in &declarations[i + 1..] {
            let (outer, inner) = if inner.base_package.len() < outer.base_package.len() {
                (inner, outer)
            } else {
                (outer, inner)
            };

            if is_same_or_sub_package(&inner.base_package, &outer.base_package) {
                return Err(ModulithError::OverlappingModules {
                    outer: outer.base_package.clone(),
                    inner: inner.base_package.clone(),
                });
            }
        }
    }

    Ok(())
}
