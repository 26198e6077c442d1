//! Bootstrap scopes: which packages a module needs when started in isolation

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::Modules;
use crate::error::{ModulithError, OptionExt, Result};
use crate::models::dependency::DependencyDepth;
use crate::models::module::Module;
use crate::models::type_ref::{is_same_or_sub_package, package_of};

/// How much of the application to include next to a module
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BootstrapMode {
    /// The module alone
    #[default]
    Standalone,
    /// The module and the modules it directly depends on
    DirectDependencies,
    /// The module and everything reachable from it
    AllDependencies,
}

impl BootstrapMode {
    pub fn depth(self) -> DependencyDepth {
        match self {
            BootstrapMode::Standalone => DependencyDepth::None,
            BootstrapMode::DirectDependencies => DependencyDepth::Immediate,
            BootstrapMode::AllDependencies => DependencyDepth::All,
        }
    }
}

impl From<DependencyDepth> for BootstrapMode {
    fn from(depth: DependencyDepth) -> Self {
        match depth {
            DependencyDepth::None => BootstrapMode::Standalone,
            DependencyDepth::Immediate => BootstrapMode::DirectDependencies,
            DependencyDepth::All => BootstrapMode::AllDependencies,
        }
    }
}

impl FromStr for BootstrapMode {
    type Err = ModulithError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "standalone" => Ok(BootstrapMode::Standalone),
            "direct_dependencies" => Ok(BootstrapMode::DirectDependencies),
            "all_dependencies" => Ok(BootstrapMode::AllDependencies),
            other => Err(ModulithError::config_error(format!(
                "Unknown bootstrap mode '{}'. Expected standalone, direct_dependencies or all_dependencies",
                other
            ))),
        }
    }
}

impl fmt::Display for BootstrapMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BootstrapMode::Standalone => write!(f, "standalone"),
            BootstrapMode::DirectDependencies => write!(f, "direct_dependencies"),
            BootstrapMode::AllDependencies => write!(f, "all_dependencies"),
        }
    }
}

/// The packages to scan when bootstrapping one module
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BootstrapScope {
    pub module: String,
    pub mode: BootstrapMode,
    /// The module's base package first, then those of its dependencies
    pub base_packages: Vec<String>,
}

impl BootstrapScope {
    pub fn of<'m>(module: &Module<'m>, modules: &Modules<'m>, mode: BootstrapMode) -> Self {
        Self {
            module: module.name().to_string(),
            mode,
            base_packages: module.base_packages(modules, mode.depth()),
        }
    }

    /// Scope of the module owning `package`, typically a test's package
    pub fn for_package(modules: &Modules<'_>, package: &str, mode: BootstrapMode) -> Result<Self> {
        let module = modules.module_by_package(package).ok_or_error(|| {
            ModulithError::config_error(format!(
                "Package {} is not part of any module below {}",
                package,
                modules.root_package()
            ))
        })?;

        Ok(Self::of(module, modules, mode))
    }

    /// Whether a type belongs to one of the scope's packages
    pub fn includes(&self, type_name: &str) -> bool {
        let package = package_of(type_name);
        self.base_packages
            .iter()
            .any(|base| is_same_or_sub_package(package, base))
    }
}
