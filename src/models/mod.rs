//! Data models and structures for Modulith

pub mod config;
pub mod declaration;
pub mod dependency;
pub mod module;
pub mod named_interface;
pub mod package_tree;
pub mod summary;
pub mod type_ref;
pub mod violation;

pub use config::Settings;
pub use declaration::{InterfaceDeclaration, Markers, ModuleDeclaration, ModuleSettings, ModulesConfig};
pub use dependency::{DependencyDepth, DependencyKind, ModuleDependency};
pub use module::Module;
pub use named_interface::{NamedInterface, NamedInterfaceSummary, NamedInterfaces};
pub use package_tree::PackageTree;
pub use summary::{DependencyListing, ModuleSummary, VerificationReport};
pub use type_ref::{Annotation, ClassModel, ClassModelData, PackageInfo, TypeRef};
pub use violation::{Violation, Violations};
