//! Serializable results of a verification run

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::time::Duration;

use super::dependency::DependencyDepth;
use super::named_interface::NamedInterfaceSummary;
use super::violation::Violations;

/// Documentation-oriented view of one module
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModuleSummary {
    pub name: String,
    pub display_name: String,
    pub base_package: String,
    pub named_interfaces: Vec<NamedInterfaceSummary>,
    /// False when only the synthetic unnamed interface exists
    pub explicit_interfaces: bool,
    pub components: Vec<String>,
    /// Immediate module dependencies
    pub dependencies: Vec<String>,
}

/// Outcome of verifying a whole module graph
#[derive(Debug, Clone, Serialize)]
pub struct VerificationReport {
    pub root_package: String,
    pub generated_at: DateTime<Utc>,
    pub duration_ms: u128,
    pub type_count: usize,
    pub modules: Vec<ModuleSummary>,
    pub violations: Violations,
    /// Groups of modules depending on each other in a cycle
    pub cycles: Vec<Vec<String>>,
}

impl VerificationReport {
    pub fn new(root_package: impl Into<String>) -> Self {
        Self {
            root_package: root_package.into(),
            generated_at: Utc::now(),
            duration_ms: 0,
            type_count: 0,
            modules: Vec::new(),
            violations: Violations::new(),
            cycles: Vec::new(),
        }
    }

    pub fn set_duration(&mut self, duration: Duration) {
        self.duration_ms = duration.as_millis();
    }

    pub fn is_success(&self) -> bool {
        self.violations.is_empty()
    }

    pub fn module(&self, name: &str) -> Option<&ModuleSummary> {
        self.modules.iter().find(|m| m.name == name)
    }
}

/// A module's dependency set at one depth, with the packages needed to
/// bootstrap it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DependencyListing {
    pub module: String,
    pub depth: DependencyDepth,
    pub dependencies: Vec<String>,
    pub base_packages: Vec<String>,
}
