//! Rendering of reports built from the sample application

use modulith::{
    core::Modules,
    models::{config::OutputFormat, DependencyDepth, ModulesConfig},
    output::{create_formatter, Formatter, TextFormatter},
};

use crate::fixtures::sample_app::{self, ROOT_PACKAGE};

#[test]
fn test_module_documentation_text() {
    let model = sample_app::model();
    let modules = Modules::of_package(&model, ROOT_PACKAGE, &ModulesConfig::default()).unwrap();

    let text = TextFormatter::new(false, false, false)
        .format_modules(&modules.summaries())
        .unwrap();

    assert!(text.contains("## Module A ##"));
    assert!(text.contains("> Logical name: moduleA"));
    assert!(text.contains("> Base package: com.acme.app.moduleA"));
    assert!(text.contains("  + API (1 types): [ComplexFacade]"));
    assert!(text.contains("  + spi (1 types): [ServiceProvider]"));
    assert!(text.contains("  c.a.a.moduleA.ServiceComponentA"));
    assert!(text.contains("> Depends on: moduleA, complex"));
    assert!(text.contains("> Components: none"));
}

#[test]
fn test_verbose_report_includes_modules() {
    let model = sample_app::model();
    let modules = Modules::of_package(&model, ROOT_PACKAGE, &ModulesConfig::default()).unwrap();
    let report = modules.report().unwrap();

    let plain = TextFormatter::new(false, false, false).format(&report).unwrap();
    let verbose = TextFormatter::new(false, true, false).format(&report).unwrap();

    assert!(!plain.contains("## Module A ##"));
    assert!(verbose.contains("## Module A ##"));
    assert!(verbose.contains("Violations: 4"));
}

#[test]
fn test_quiet_report() {
    let model = sample_app::model();
    let modules = Modules::of_package(&model, ROOT_PACKAGE, &ModulesConfig::default()).unwrap();
    let report = modules.report().unwrap();

    let quiet = TextFormatter::new(false, false, true).format(&report).unwrap();

    assert!(quiet.starts_with("Modules: 6, violations: 4, cycles: 1\n"));
    assert_eq!(quiet.matches("depends on non-exposed type").count(), 4);
}

#[test]
fn test_csv_violations() {
    let model = sample_app::model();
    let modules = Modules::of_package(&model, ROOT_PACKAGE, &ModulesConfig::default()).unwrap();
    let report = modules.report().unwrap();

    let csv = create_formatter(OutputFormat::Csv, false, false, false).format(&report).unwrap();
    let lines: Vec<&str> = csv.lines().collect();

    assert_eq!(lines.len(), 5);
    assert_eq!(lines[0], "origin_module,target_module,origin_type,target_type,kind,description");
    assert!(lines[1].starts_with("invalid,moduleA,com.acme.app.invalid.InvalidComponent,"));
    assert!(lines[1].ends_with(",direct reference,InvalidComponent extends InternalComponentA"));
}

#[test]
fn test_dependency_listing_outputs() {
    let model = sample_app::model();
    let modules = Modules::of_package(&model, ROOT_PACKAGE, &ModulesConfig::default()).unwrap();
    let listing = modules.dependency_listing("cycleA", DependencyDepth::All).unwrap();

    let text = create_formatter(OutputFormat::Text, false, false, false)
        .format_dependencies(&listing)
        .unwrap();
    assert!(text.starts_with("Dependencies of 'cycleA' (all)"));
    assert!(text.contains("  com.acme.app.moduleA\n"));

    let csv = create_formatter(OutputFormat::Csv, false, false, false)
        .format_dependencies(&listing)
        .unwrap();
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(
        lines,
        vec![
            "module,depth,dependency,base_package",
            "cycleA,all,,com.acme.app.cycleA",
            "cycleA,all,cycleB,com.acme.app.cycleB",
            "cycleA,all,moduleB,com.acme.app.moduleB",
            "cycleA,all,moduleA,com.acme.app.moduleA",
        ]
    );

    let json = create_formatter(OutputFormat::Json, false, false, false)
        .format_dependencies(&listing)
        .unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["depth"], "all");
    assert_eq!(value["dependencies"][2], "moduleA");
}
