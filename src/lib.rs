//! Modulith - module boundary verification for modular monoliths
//!
//! Given a class model of a compiled application, every direct sub-package of
//! the application root is a module. Modules expose types through named
//! interfaces; a dependency from one module into a type another module does
//! not expose is a violation. The crate assembles the module graph, extracts
//! and attributes dependency edges, computes depth-bounded module
//! dependencies and reports violations.

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod models;
pub mod output;
pub mod parsers;

// Re-export commonly used types
pub use crate::core::{BootstrapMode, BootstrapScope, Modules};
pub use error::{ErrorSeverity, ModulithError, OptionExt, Result, ResultExt};
pub use models::{
    config::Settings, ClassModel, DependencyDepth, Module, ModuleDependency, ModulesConfig, NamedInterface,
    NamedInterfaces, TypeRef, Violation, Violations,
};
pub use parsers::ClassModelLoader;

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
