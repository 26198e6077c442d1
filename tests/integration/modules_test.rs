//! Module discovery, lookup and configuration against the sample application

use std::collections::BTreeMap;

use modulith::{
    core::{BootstrapMode, BootstrapScope, Modules},
    error::ModulithError,
    models::{InterfaceDeclaration, ModuleSettings, ModulesConfig, TypeRef},
};

use crate::fixtures::sample_app::{self, *};

#[test]
fn test_discovers_one_module_per_direct_sub_package() {
    let model = sample_app::model();
    let modules = Modules::of(&model, &TypeRef::new(ROOT_TYPE), &ModulesConfig::default()).unwrap();

    let names: Vec<&str> = modules.iter().map(|m| m.name()).collect();
    assert_eq!(names, MODULE_NAMES.to_vec());
    assert_eq!(modules.root_package(), ROOT_PACKAGE);
    assert_eq!(modules.len(), 6);
}

#[test]
fn test_root_type_must_be_part_of_the_model() {
    let model = sample_app::model();
    let result = Modules::of(&model, &TypeRef::new("com.acme.app.Missing"), &ModulesConfig::default());

    assert!(matches!(result, Err(ModulithError::RootNotFound { .. })));
}

#[test]
fn test_display_names_and_components() {
    let model = sample_app::model();
    let modules = Modules::of_package(&model, ROOT_PACKAGE, &ModulesConfig::default()).unwrap();

    let module_a = modules.module_by_name("moduleA").unwrap();
    assert_eq!(module_a.display_name(), "Module A");
    assert_eq!(modules.module_by_name("moduleB").unwrap().display_name(), "moduleB");

    let summary = module_a.summary(&modules);
    assert_eq!(summary.components, vec!["c.a.a.moduleA.ServiceComponentA"]);
    assert!(!summary.explicit_interfaces);
}

#[test]
fn test_named_interfaces_are_discovered_from_package_markers() {
    let model = sample_app::model();
    let modules = Modules::of_package(&model, ROOT_PACKAGE, &ModulesConfig::default()).unwrap();
    let complex = modules.module_by_name("complex").unwrap();

    let names: Vec<&str> = complex.named_interfaces().iter().map(|i| i.name()).collect();
    assert_eq!(names, vec!["API", "spi"]);

    assert!(complex.is_exposed(model.get(COMPLEX_FACADE).unwrap()));
    assert!(complex.is_exposed(model.get(COMPLEX_SPI).unwrap()));
    assert!(!complex.is_exposed(model.get(COMPLEX_SERVICE).unwrap()));
    assert!(!complex.is_exposed(model.get(COMPLEX_IMPL).unwrap()));
}

#[test]
fn test_unnamed_interface_exposes_base_package_types_only() {
    let model = sample_app::model();
    let modules = Modules::of_package(&model, ROOT_PACKAGE, &ModulesConfig::default()).unwrap();
    let module_a = modules.module_by_name("moduleA").unwrap();

    assert_eq!(module_a.named_interfaces().len(), 1);
    assert!(module_a.is_exposed(model.get(SERVICE_A).unwrap()));
    assert!(!module_a.is_exposed(model.get(INTERNAL_A).unwrap()));
}

#[test]
fn test_type_lookup() {
    let model = sample_app::model();
    let modules = Modules::of_package(&model, ROOT_PACKAGE, &ModulesConfig::default()).unwrap();

    let internal = model.get(INTERNAL_A).unwrap();
    assert_eq!(modules.module_by_type(internal).unwrap().name(), "moduleA");
    assert!(modules.contain(internal));

    // Root and third-party types belong to no module
    assert!(!modules.contain(model.get(ROOT_TYPE).unwrap()));
    assert!(!modules.contain(model.get("org.framework.context.ApplicationContext").unwrap()));
    assert!(!modules.contain(&TypeRef::new("org.slf4j.Logger")));

    // Unknown types fall back to their package
    let unknown = TypeRef::new("com.acme.app.moduleB.NotCompiled");
    assert_eq!(modules.module_by_type(&unknown).unwrap().name(), "moduleB");

    assert!(matches!(
        modules.existing_module_of(model.get(ROOT_TYPE).unwrap()),
        Err(ModulithError::ModelInconsistency { .. })
    ));
}

#[test]
fn test_explicit_module_configuration_overrides_markers() {
    let model = sample_app::model();

    let mut modules_config = BTreeMap::new();
    modules_config.insert(
        "moduleA".to_string(),
        ModuleSettings {
            display_name: Some("Alpha".to_string()),
            named_interfaces: Some(vec![InterfaceDeclaration::new("internals", &["internal"])]),
            ..Default::default()
        },
    );
    let config = ModulesConfig {
        modules: modules_config,
        ..Default::default()
    };

    let modules = Modules::of_package(&model, ROOT_PACKAGE, &config).unwrap();
    let module_a = modules.module_by_name("moduleA").unwrap();

    assert_eq!(module_a.display_name(), "Alpha");
    assert!(module_a.is_exposed(model.get(INTERNAL_A).unwrap()));
    assert!(!module_a.is_exposed(model.get(SERVICE_A).unwrap()));

    // moduleB now reaches a type that is no longer exposed
    let violations = modules.module_by_name("moduleB").unwrap().violations(&modules).unwrap();
    assert_eq!(violations.len(), 2);
    assert!(violations.iter().all(|v| v.target_type == SERVICE_A));
}

#[test]
fn test_configuration_of_unknown_module_fails() {
    let model = sample_app::model();

    let mut modules_config = BTreeMap::new();
    modules_config.insert("shipping".to_string(), ModuleSettings::default());
    let config = ModulesConfig {
        modules: modules_config,
        ..Default::default()
    };

    let result = Modules::of_package(&model, ROOT_PACKAGE, &config);
    assert!(matches!(result, Err(ModulithError::UnknownModule { name, .. }) if name == "shipping"));
}

#[test]
fn test_duplicate_named_interfaces_are_rejected() {
    let model = sample_app::model();

    let mut modules_config = BTreeMap::new();
    modules_config.insert(
        "complex".to_string(),
        ModuleSettings {
            named_interfaces: Some(vec![
                InterfaceDeclaration::new("API", &["api"]),
                InterfaceDeclaration::new("API", &["spi"]),
            ]),
            ..Default::default()
        },
    );
    let config = ModulesConfig {
        modules: modules_config,
        ..Default::default()
    };

    let result = Modules::of_package(&model, ROOT_PACKAGE, &config);
    assert!(matches!(
        result,
        Err(ModulithError::DuplicateNamedInterface { module, name }) if module == "complex" && name == "API"
    ));
}

#[test]
fn test_named_interface_on_missing_package_is_rejected() {
    let model = sample_app::model();

    let mut modules_config = BTreeMap::new();
    modules_config.insert(
        "moduleA".to_string(),
        ModuleSettings {
            named_interfaces: Some(vec![InterfaceDeclaration::new("API", &["apii"])]),
            ..Default::default()
        },
    );
    let config = ModulesConfig {
        modules: modules_config,
        ..Default::default()
    };

    match Modules::of_package(&model, ROOT_PACKAGE, &config) {
        Err(err @ ModulithError::Config { .. }) => {
            let message = err.to_string();
            assert!(message.contains("moduleA"));
            assert!(message.contains("'API'"));
            assert!(message.contains("com.acme.app.moduleA.apii"));
            assert!(err.is_critical());
        }
        Err(other) => panic!("expected a configuration error, got {:?}", other),
        Ok(_) => panic!("a named interface on a missing package was accepted"),
    }
}

#[test]
fn test_reserved_interface_name_in_configuration_is_rejected() {
    let model = sample_app::model();

    let mut modules_config = BTreeMap::new();
    modules_config.insert(
        "moduleA".to_string(),
        ModuleSettings {
            named_interfaces: Some(vec![InterfaceDeclaration::new("unnamed", &["internal"])]),
            ..Default::default()
        },
    );
    let config = ModulesConfig {
        modules: modules_config,
        ..Default::default()
    };

    let result = Modules::of_package(&model, ROOT_PACKAGE, &config);
    assert!(matches!(result, Err(ModulithError::Config { message }) if message.contains("reserved")));
}

#[test]
fn test_bootstrap_scope_follows_dependency_depth() {
    let model = sample_app::model();
    let modules = Modules::of_package(&model, ROOT_PACKAGE, &ModulesConfig::default()).unwrap();

    let standalone = BootstrapScope::for_package(&modules, "com.acme.app.cycleA", BootstrapMode::Standalone).unwrap();
    assert!(standalone.includes(CYCLE_A));
    assert!(!standalone.includes(CYCLE_B));

    let direct =
        BootstrapScope::for_package(&modules, "com.acme.app.cycleA", BootstrapMode::DirectDependencies).unwrap();
    assert!(direct.includes(CYCLE_B));
    assert!(!direct.includes(SERVICE_B));

    let all = BootstrapScope::for_package(&modules, "com.acme.app.cycleA", BootstrapMode::AllDependencies).unwrap();
    assert!(all.includes(SERVICE_B));
    assert!(all.includes(INTERNAL_A));
    assert!(!all.includes(COMPLEX_FACADE));
}
