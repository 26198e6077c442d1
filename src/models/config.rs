//! Configuration-related data structures

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

use super::declaration::{Markers, ModuleSettings, ModulesConfig};

/// Main configuration settings for Modulith
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Class model JSON file or directory of JSON files
    pub model_path: PathBuf,

    /// Fully qualified application root type; its package is the root package
    pub root: Option<String>,

    /// Application root package, alternative to `root`
    pub root_package: Option<String>,

    /// Glob patterns for model files to skip when loading a directory
    pub exclude_patterns: Vec<String>,

    /// Output format (text, json, csv)
    pub output_format: OutputFormat,

    /// Output file path (if not specified, output to stdout)
    pub output_file: Option<PathBuf>,

    /// Whether to suppress non-essential output
    pub quiet: bool,

    /// Whether to show per-module details and debug information
    pub verbose: bool,

    /// Whether to use colors in text output
    pub use_colors: bool,

    /// Whether to show progress bars
    pub show_progress: bool,

    /// Whether to use parallel processing
    pub parallel: bool,

    /// Worker threads; defaults to the number of logical CPUs
    pub threads: Option<usize>,

    /// Whether violations make the run fail
    pub fail_on_violation: bool,

    /// Annotation names used for discovery
    pub markers: Markers,

    /// Explicit module configuration keyed by logical module name
    pub modules: BTreeMap<String, ModuleSettings>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            model_path: PathBuf::from("modulith-model.json"),
            root: None,
            root_package: None,
            exclude_patterns: Vec::new(),
            output_format: OutputFormat::Text,
            output_file: None,
            quiet: false,
            verbose: false,
            use_colors: true,
            show_progress: true,
            parallel: true,
            threads: None,
            fail_on_violation: true,
            markers: Markers::default(),
            modules: BTreeMap::new(),
        }
    }
}

impl Settings {
    /// Module assembly configuration derived from these settings
    pub fn modules_config(&self) -> ModulesConfig {
        ModulesConfig {
            markers: self.markers.clone(),
            modules: self.modules.clone(),
        }
    }
}

/// Supported output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable text output
    Text,
    /// JSON output for programmatic consumption
    Json,
    /// CSV output for spreadsheet analysis
    Csv,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            "csv" => Ok(OutputFormat::Csv),
            _ => Err(format!("Invalid output format: {}", s)),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Csv => write!(f, "csv"),
        }
    }
}

/// Partial settings for configuration merging
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PartialSettings {
    pub model_path: Option<PathBuf>,
    pub root: Option<String>,
    pub root_package: Option<String>,
    pub exclude_patterns: Option<Vec<String>>,
    pub output_format: Option<OutputFormat>,
    pub output_file: Option<PathBuf>,
    pub quiet: Option<bool>,
    pub verbose: Option<bool>,
    pub use_colors: Option<bool>,
    pub show_progress: Option<bool>,
    pub parallel: Option<bool>,
    pub threads: Option<usize>,
    pub fail_on_violation: Option<bool>,
    pub markers: Option<Markers>,
    pub modules: Option<BTreeMap<String, ModuleSettings>>,
}

impl PartialSettings {
    /// Merge another PartialSettings into this one
    /// Fields from `other` take precedence over existing fields
    pub fn merge_from(&mut self, other: PartialSettings) {
        if other.model_path.is_some() {
            self.model_path = other.model_path;
        }
        // Root type and root package are alternatives; a later source
        // naming one replaces whatever an earlier source said about either.
        let other_has_root = other.root.is_some();
        if other_has_root {
            self.root = other.root;
            self.root_package = None;
        }
        if other.root_package.is_some() {
            self.root_package = other.root_package;
            if self.root.is_some() && !other_has_root {
                self.root = None;
            }
        }
        if other.exclude_patterns.is_some() {
            self.exclude_patterns = other.exclude_patterns;
        }
        if other.output_format.is_some() {
            self.output_format = other.output_format;
        }
        if other.output_file.is_some() {
            self.output_file = other.output_file;
        }
        if other.quiet.is_some() {
            self.quiet = other.quiet;
        }
        if other.verbose.is_some() {
            self.verbose = other.verbose;
        }
        if other.use_colors.is_some() {
            self.use_colors = other.use_colors;
        }
        if other.show_progress.is_some() {
            self.show_progress = other.show_progress;
        }
        if other.parallel.is_some() {
            self.parallel = other.parallel;
        }
        if other.threads.is_some() {
            self.threads = other.threads;
        }
        if other.fail_on_violation.is_some() {
            self.fail_on_violation = other.fail_on_violation;
        }
        if other.markers.is_some() {
            self.markers = other.markers;
        }
        // Per-module entries merge key by key
        if let Some(modules) = other.modules {
            self.modules.get_or_insert_with(BTreeMap::new).extend(modules);
        }
    }

    /// Convert to full Settings, using defaults for missing values
    pub fn to_settings(&self) -> Settings {
        let mut settings = Settings::default();

        if let Some(model_path) = &self.model_path {
            settings.model_path = model_path.clone();
        }
        settings.root = self.root.clone();
        settings.root_package = self.root_package.clone();
        if let Some(exclude_patterns) = &self.exclude_patterns {
            settings.exclude_patterns = exclude_patterns.clone();
        }
        if let Some(output_format) = self.output_format {
            settings.output_format = output_format;
        }
        if let Some(output_file) = &self.output_file {
            settings.output_file = Some(output_file.clone());
        }
        if let Some(quiet) = self.quiet {
            settings.quiet = quiet;
        }
        if let Some(verbose) = self.verbose {
            settings.verbose = verbose;
        }
        if let Some(use_colors) = self.use_colors {
            settings.use_colors = use_colors;
        }
        if let Some(show_progress) = self.show_progress {
            settings.show_progress = show_progress;
        }
        if let Some(parallel) = self.parallel {
            settings.parallel = parallel;
        }
        if let Some(threads) = self.threads {
            settings.threads = Some(threads);
        }
        if let Some(fail_on_violation) = self.fail_on_violation {
            settings.fail_on_violation = fail_on_violation;
        }
        if let Some(markers) = &self.markers {
            settings.markers = markers.clone();
        }
        if let Some(modules) = &self.modules {
            settings.modules = modules.clone();
        }

        settings
    }
}
