//! In-memory class model of a small modular application
//!
//! Layout below `com.acme.app`:
//!
//! - `moduleA`: no named interfaces, an `internal` package, display name from
//!   its package annotation
//! - `moduleB`: uses `moduleA` through its exposed types only
//! - `invalid`: reaches into `moduleA.internal` and `complex.internal`
//! - `complex`: explicit `API` and `spi` named interfaces
//! - `cycleA` / `cycleB`: depend on each other, `cycleB` also on `moduleB`

use std::fs;
use std::path::{Path, PathBuf};

use modulith::models::{Annotation, ClassModel, ClassModelData, PackageInfo, TypeRef};

pub const ROOT_PACKAGE: &str = "com.acme.app";
pub const ROOT_TYPE: &str = "com.acme.app.Application";

pub const SERVICE_A: &str = "com.acme.app.moduleA.ServiceComponentA";
pub const INTERNAL_A: &str = "com.acme.app.moduleA.internal.InternalComponentA";
pub const SERVICE_B: &str = "com.acme.app.moduleB.ServiceComponentB";
pub const INVALID: &str = "com.acme.app.invalid.InvalidComponent";
pub const COMPLEX_SERVICE: &str = "com.acme.app.complex.ComplexService";
pub const COMPLEX_FACADE: &str = "com.acme.app.complex.api.ComplexFacade";
pub const COMPLEX_IMPL: &str = "com.acme.app.complex.internal.ComplexImpl";
pub const COMPLEX_SPI: &str = "com.acme.app.complex.spi.ServiceProvider";
pub const CYCLE_A: &str = "com.acme.app.cycleA.CycleA";
pub const CYCLE_B: &str = "com.acme.app.cycleB.CycleB";

/// Module names in discovery order
pub const MODULE_NAMES: [&str; 6] = ["complex", "cycleA", "cycleB", "invalid", "moduleA", "moduleB"];

pub fn types() -> Vec<TypeRef> {
    vec![
        TypeRef::new(ROOT_TYPE),
        // Third-party type present in the model but outside the root
        TypeRef::new("org.framework.context.ApplicationContext"),
        TypeRef::new(SERVICE_A)
            .with_source("ServiceComponentA.java")
            .with_annotation(Annotation::new("org.framework.stereotype.Service"))
            .with_field("logger", "org.slf4j.Logger")
            .with_field("internal", INTERNAL_A),
        TypeRef::new(INTERNAL_A).with_source("InternalComponentA.java"),
        TypeRef::new(SERVICE_B)
            .with_source("ServiceComponentB.java")
            .with_annotation(Annotation::new("Component"))
            .with_constructor(&[SERVICE_A])
            .with_method("all", &[], "com.acme.app.moduleA.ServiceComponentA[]")
            .with_field("context", "org.framework.context.ApplicationContext"),
        TypeRef::new(INVALID)
            .with_source("InvalidComponent.java")
            .with_dependency(INTERNAL_A, Some("InvalidComponent extends InternalComponentA"))
            .with_dependency(INTERNAL_A, Some("InvalidComponent extends InternalComponentA"))
            .with_dependency(COMPLEX_IMPL, None)
            .with_dependency(COMPLEX_FACADE, None)
            .with_method("handle", &[INTERNAL_A, "int"], "void")
            .with_field("internal", INTERNAL_A),
        TypeRef::new(COMPLEX_SERVICE).with_source("ComplexService.java"),
        TypeRef::new(COMPLEX_FACADE).with_source("ComplexFacade.java"),
        TypeRef::new(COMPLEX_IMPL).with_source("ComplexImpl.java"),
        TypeRef::new(COMPLEX_SPI).with_source("ServiceProvider.java"),
        TypeRef::new(CYCLE_A)
            .with_source("CycleA.java")
            .with_field("b", CYCLE_B),
        TypeRef::new(CYCLE_B)
            .with_source("CycleB.java")
            .with_field("a", CYCLE_A)
            .with_method("service", &[], "java.util.Optional<com.acme.app.moduleB.ServiceComponentB>")
            .with_field("service", SERVICE_B),
    ]
}

pub fn packages() -> Vec<PackageInfo> {
    vec![
        PackageInfo {
            name: "com.acme.app.moduleA".to_string(),
            annotations: vec![Annotation::new("org.moduliths.Module").with_attribute("displayName", "Module A")],
        },
        PackageInfo {
            name: "com.acme.app.complex.api".to_string(),
            annotations: vec![Annotation::new("org.moduliths.NamedInterface").with_attribute("value", "API")],
        },
        PackageInfo {
            name: "com.acme.app.complex.spi".to_string(),
            annotations: vec![Annotation::new("org.moduliths.NamedInterface")],
        },
    ]
}

pub fn data() -> ClassModelData {
    ClassModelData {
        packages: packages(),
        types: types(),
    }
}

pub fn model() -> ClassModel {
    ClassModel::new(data()).expect("sample model is consistent")
}

/// Write the model as a single JSON file below `dir`
pub fn write_model(dir: &Path) -> PathBuf {
    let path = dir.join("model.json");
    let json = serde_json::to_string_pretty(&data()).expect("serializable model");
    fs::write(&path, json).expect("writable temp dir");
    path
}

/// Write the model split into one file for packages and one per module
pub fn write_split_model(dir: &Path) -> PathBuf {
    let model_dir = dir.join("model");
    fs::create_dir_all(&model_dir).expect("writable temp dir");

    let packages = ClassModelData {
        packages: packages(),
        types: Vec::new(),
    };
    fs::write(model_dir.join("packages.json"), serde_json::to_string(&packages).unwrap()).unwrap();

    for (i, type_ref) in types().into_iter().enumerate() {
        let part = ClassModelData {
            packages: Vec::new(),
            types: vec![type_ref],
        };
        fs::write(
            model_dir.join(format!("type-{:02}.json", i)),
            serde_json::to_string(&part).unwrap(),
        )
        .unwrap();
    }

    model_dir
}
