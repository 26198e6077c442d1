//! Explicit module declarations
//!
//! Instead of relying on package annotations alone, callers may describe
//! their modules up front. Declarations are plain values; resolving them into
//! [`Module`](super::module::Module)s happens in [`Modules`](crate::core::Modules).

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A named interface declared in configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterfaceDeclaration {
    pub name: String,

    /// Sub-packages relative to the module's base package; `""` selects the
    /// base package itself (its direct types only)
    #[serde(default)]
    pub packages: Vec<String>,
}

impl InterfaceDeclaration {
    pub fn new(name: impl Into<String>, packages: &[&str]) -> Self {
        Self {
            name: name.into(),
            packages: packages.iter().map(|p| p.to_string()).collect(),
        }
    }
}

/// Per-module configuration, keyed by logical module name
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,

    /// Must match the discovered base package when given
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_package: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub named_interfaces: Option<Vec<InterfaceDeclaration>>,
}

/// Annotation names the verifier looks for
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Markers {
    /// Package annotation marking a named interface
    pub named_interface: String,

    /// Package annotation carrying a module's display name
    pub module: String,

    /// Type annotations identifying components listed in module summaries
    pub components: Vec<String>,
}

impl Default for Markers {
    fn default() -> Self {
        Self {
            named_interface: "NamedInterface".to_string(),
            module: "Module".to_string(),
            components: vec![
                "Component".to_string(),
                "Service".to_string(),
                "Repository".to_string(),
                "Controller".to_string(),
                "RestController".to_string(),
                "Configuration".to_string(),
            ],
        }
    }
}

/// Everything module assembly needs besides the class model
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModulesConfig {
    #[serde(default)]
    pub markers: Markers,

    #[serde(default)]
    pub modules: BTreeMap<String, ModuleSettings>,
}

/// The immutable description of one module before resolution
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleDeclaration {
    pub name: String,
    pub base_package: String,
    pub display_name: Option<String>,
    pub named_interfaces: Option<Vec<InterfaceDeclaration>>,
}

impl ModuleDeclaration {
    /// Declare a module whose logical name is the base package's last segment
    pub fn new(base_package: impl Into<String>) -> Self {
        let base_package = base_package.into();
        Self {
            name: super::type_ref::local_name(&base_package).to_string(),
            base_package,
            display_name: None,
            named_interfaces: None,
        }
    }

    pub fn with_display_name(mut self, display_name: impl Into<String>) -> Self {
        self.display_name = Some(display_name.into());
        self
    }

    pub fn with_named_interfaces(mut self, interfaces: Vec<InterfaceDeclaration>) -> Self {
        self.named_interfaces = Some(interfaces);
        self
    }

    /// Apply configured overrides
    pub fn configure(mut self, settings: &ModuleSettings) -> Self {
        if let Some(display_name) = &settings.display_name {
            self = self.with_display_name(display_name.clone());
        }
        if let Some(interfaces) = &settings.named_interfaces {
            self = self.with_named_interfaces(interfaces.clone());
        }
        self
    }
}
