//! Edge extraction, traversal and verification against the sample application

use modulith::{
    core::Modules,
    error::ModulithError,
    models::{DependencyDepth, DependencyKind, ModulesConfig},
};

use crate::fixtures::sample_app::{self, *};

fn names(modules: Vec<&modulith::Module<'_>>) -> Vec<String> {
    modules.into_iter().map(|m| m.name().to_string()).collect()
}

#[test]
fn test_edges_follow_source_order_and_are_deduplicated() {
    let model = sample_app::model();
    let modules = Modules::of_package(&model, ROOT_PACKAGE, &ModulesConfig::default()).unwrap();
    let invalid = modules.module_by_name("invalid").unwrap();

    let edges: Vec<(DependencyKind, &str)> = invalid
        .dependency_edges()
        .iter()
        .map(|edge| (edge.kind, edge.target.name.as_str()))
        .collect();

    assert_eq!(
        edges,
        vec![
            (DependencyKind::DirectReference, INTERNAL_A),
            (DependencyKind::DirectReference, COMPLEX_IMPL),
            (DependencyKind::DirectReference, COMPLEX_FACADE),
            (DependencyKind::Parameter, INTERNAL_A),
            (DependencyKind::Field, INTERNAL_A),
        ]
    );
}

#[test]
fn test_edge_descriptions() {
    let model = sample_app::model();
    let modules = Modules::of_package(&model, ROOT_PACKAGE, &ModulesConfig::default()).unwrap();
    let invalid = modules.module_by_name("invalid").unwrap();

    let descriptions: Vec<&str> = invalid
        .dependency_edges()
        .iter()
        .map(|edge| edge.description.as_str())
        .collect();

    assert_eq!(descriptions[0], "InvalidComponent extends InternalComponentA");
    assert_eq!(
        descriptions[1],
        "com.acme.app.invalid.InvalidComponent references com.acme.app.complex.internal.ComplexImpl in (InvalidComponent.java)"
    );
    assert_eq!(
        descriptions[3],
        "Method <com.acme.app.invalid.InvalidComponent.handle(com.acme.app.moduleA.internal.InternalComponentA, int)> \
         declares parameter com.acme.app.moduleA.internal.InternalComponentA in (InvalidComponent.java)"
    );
    assert_eq!(
        descriptions[4],
        "field com.acme.app.invalid.InvalidComponent.internal is of type \
         com.acme.app.moduleA.internal.InternalComponentA in (InvalidComponent.java)"
    );
}

#[test]
fn test_constructors_contribute_parameters_only() {
    let model = sample_app::model();
    let modules = Modules::of_package(&model, ROOT_PACKAGE, &ModulesConfig::default()).unwrap();
    let module_b = modules.module_by_name("moduleB").unwrap();

    let kinds: Vec<DependencyKind> = module_b.dependency_edges().iter().map(|e| e.kind).collect();

    // Constructor parameter, then the array return type of `all()`;
    // the framework field is not module-managed
    assert_eq!(kinds, vec![DependencyKind::Parameter, DependencyKind::ReturnType]);
    assert!(module_b.dependency_edges().iter().all(|e| e.target.name == SERVICE_A));
}

#[test]
fn test_intra_module_and_third_party_references_are_ignored() {
    let model = sample_app::model();
    let modules = Modules::of_package(&model, ROOT_PACKAGE, &ModulesConfig::default()).unwrap();

    assert!(modules.module_by_name("moduleA").unwrap().dependency_edges().is_empty());
    assert!(modules.module_by_name("complex").unwrap().dependency_edges().is_empty());
}

#[test]
fn test_dependency_depths() {
    let model = sample_app::model();
    let modules = Modules::of_package(&model, ROOT_PACKAGE, &ModulesConfig::default()).unwrap();
    let cycle_a = modules.module_by_name("cycleA").unwrap();

    assert!(cycle_a.dependencies(&modules, DependencyDepth::None).is_empty());
    assert_eq!(names(cycle_a.dependencies(&modules, DependencyDepth::Immediate)), vec!["cycleB"]);
    assert_eq!(
        names(cycle_a.dependencies(&modules, DependencyDepth::All)),
        vec!["cycleB", "moduleB", "moduleA"]
    );

    let cycle_b = modules.module_by_name("cycleB").unwrap();
    assert_eq!(
        names(cycle_b.dependencies(&modules, DependencyDepth::Immediate)),
        vec!["cycleA", "moduleB"]
    );

    let invalid = modules.module_by_name("invalid").unwrap();
    assert_eq!(
        names(invalid.dependencies(&modules, DependencyDepth::Immediate)),
        vec!["moduleA", "complex"]
    );
}

#[test]
fn test_transitive_dependencies_never_include_the_module_itself() {
    let model = sample_app::model();
    let modules = Modules::of_package(&model, ROOT_PACKAGE, &ModulesConfig::default()).unwrap();

    for module in modules.iter() {
        let all = module.dependencies(&modules, DependencyDepth::All);
        assert!(all.iter().all(|m| m.name() != module.name()), "{} lists itself", module.name());
    }
}

#[test]
fn test_base_packages_for_bootstrapping() {
    let model = sample_app::model();
    let modules = Modules::of_package(&model, ROOT_PACKAGE, &ModulesConfig::default()).unwrap();

    let listing = modules.dependency_listing("cycleB", DependencyDepth::All).unwrap();
    assert_eq!(listing.dependencies, vec!["cycleA", "moduleB", "moduleA"]);
    assert_eq!(
        listing.base_packages,
        vec![
            "com.acme.app.cycleB",
            "com.acme.app.cycleA",
            "com.acme.app.moduleB",
            "com.acme.app.moduleA"
        ]
    );

    let listing = modules.dependency_listing("cycleB", DependencyDepth::None).unwrap();
    assert_eq!(listing.base_packages, vec!["com.acme.app.cycleB"]);
}

#[test]
fn test_module_level_verification() {
    let model = sample_app::model();
    let modules = Modules::of_package(&model, ROOT_PACKAGE, &ModulesConfig::default()).unwrap();

    assert!(modules.module_by_name("moduleB").unwrap().verify_dependencies(&modules).is_ok());

    let err = modules
        .module_by_name("invalid")
        .unwrap()
        .verify_dependencies(&modules)
        .unwrap_err();
    let violations = err.violations().unwrap();

    let targets: Vec<&str> = violations.iter().map(|v| v.target_type.as_str()).collect();
    assert_eq!(targets, vec![INTERNAL_A, COMPLEX_IMPL, INTERNAL_A, INTERNAL_A]);
    assert!(violations.iter().all(|v| v.origin_module == "invalid"));
}

#[test]
fn test_verify_aggregates_all_violations() {
    let model = sample_app::model();
    let modules = Modules::of_package(&model, ROOT_PACKAGE, &ModulesConfig::default()).unwrap();

    match modules.verify() {
        Err(ModulithError::Violations(violations)) => {
            assert_eq!(violations.len(), 4);
            assert_eq!(violations.from_module("invalid").count(), 4);
        }
        other => panic!("expected violations, got {:?}", other),
    }
}

#[test]
fn test_report() {
    let model = sample_app::model();
    let modules = Modules::of_package(&model, ROOT_PACKAGE, &ModulesConfig::default()).unwrap();

    let report = modules.report().unwrap();

    assert_eq!(report.root_package, ROOT_PACKAGE);
    assert_eq!(report.modules.len(), 6);
    assert_eq!(report.type_count, 10);
    assert_eq!(report.violations.len(), 4);
    assert_eq!(report.cycles, vec![vec!["cycleA".to_string(), "cycleB".to_string()]]);
    assert!(!report.is_success());

    let module_b = report.module("moduleB").unwrap();
    assert_eq!(module_b.dependencies, vec!["moduleA"]);
}

#[test]
fn test_verification_is_independent_of_thread_count() {
    let model = sample_app::model();

    let run = |parallel: bool| {
        modulith::core::parallel::with_thread_pool(parallel, Some(4), || {
            let modules = Modules::of_package(&model, ROOT_PACKAGE, &ModulesConfig::default()).unwrap();
            modules.violations().unwrap()
        })
        .unwrap()
    };

    assert_eq!(run(true), run(false));
}
