//! Error types and definitions for Modulith
//!
//! This module provides the error taxonomy of the verifier: configuration and
//! ambiguity errors raised while assembling the module graph, malformed class
//! model data, I/O and output failures, and the aggregated architecture
//! violations that a verification run reports.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

use crate::models::violation::Violations;

/// Error severity levels for different error types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    /// Warning level errors - operation can continue
    Warning,
    /// Error level - current operation fails but overall process can continue
    Error,
    /// Critical level - process should terminate
    Critical,
}

impl fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorSeverity::Warning => write!(f, "WARNING"),
            ErrorSeverity::Error => write!(f, "ERROR"),
            ErrorSeverity::Critical => write!(f, "CRITICAL"),
        }
    }
}

/// Main error type for Modulith operations
#[derive(Debug, Error)]
pub enum ModulithError {
    /// Standard IO errors
    #[error("IO error: {source}")]
    Io {
        #[source]
        source: std::io::Error,
    },

    /// JSON parsing errors with file context
    #[error("JSON parsing error in {file}: {source}")]
    JsonParse {
        file: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Configuration errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// A path that exists but has the wrong kind
    #[error("Invalid path: {path}")]
    InvalidPath { path: PathBuf },

    /// TOML parsing errors
    #[error("TOML parsing error: {source}")]
    TomlParse {
        #[source]
        source: toml::de::Error,
    },

    /// Glob pattern errors
    #[error("Glob pattern error: {source}")]
    GlobPattern {
        #[source]
        source: glob::PatternError,
    },

    /// Configuration file not found
    #[error("Configuration file not found at {path}")]
    ConfigNotFound { path: PathBuf },

    /// Configuration file read errors
    #[error("Error reading configuration file {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Configuration file parse errors
    #[error("Error parsing configuration file {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// Output file write errors
    #[error("Error writing to output file {path}: {source}")]
    OutputWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Stdout write errors
    #[error("Error writing to stdout: {source}")]
    StdoutWrite {
        #[source]
        source: std::io::Error,
    },

    /// JSON serialization error
    #[error("JSON serialization error: {source}")]
    JsonSerialize {
        #[source]
        source: serde_json::Error,
    },

    /// CSV handling errors
    #[error("CSV error: {source}")]
    Csv {
        #[source]
        source: csv::Error,
    },

    /// CSV serialization error
    #[error("CSV serialization error: {source}")]
    CsvSerialize {
        #[source]
        source: std::string::FromUtf8Error,
    },

    /// Output directory not found
    #[error("Output directory not found: {path}")]
    OutputDirectoryNotFound { path: PathBuf },

    /// No class model found at the given location
    #[error("No class model found at {path}")]
    ModelNotFound { path: PathBuf },

    /// Class model data that cannot be turned into a consistent type graph
    #[error("Malformed class model entry {type_name}: {message}")]
    MalformedModel { type_name: String, message: String },

    /// The application root is not part of the class model
    #[error("Application root {root} not found in the class model")]
    RootNotFound { root: String },

    /// Two modules resolve to the same logical name
    #[error("Ambiguous module name '{name}': declared by both {first} and {second}")]
    DuplicateModule {
        name: String,
        first: String,
        second: String,
    },

    /// Two module base packages nest into each other
    #[error("Module base packages overlap: {outer} contains {inner}")]
    OverlappingModules { outer: String, inner: String },

    /// A module declares the same named interface twice
    #[error("Module '{module}' declares named interface '{name}' more than once")]
    DuplicateNamedInterface { module: String, name: String },

    /// Configuration refers to a module that does not exist
    #[error("Configured module '{name}' does not exist below {root}")]
    UnknownModule { name: String, root: String },

    /// Module graph lookups that must succeed but did not
    #[error("Inconsistent module graph: {message}")]
    ModelInconsistency { message: String },

    /// Generic analysis failure with context
    #[error("Analysis error: {message}")]
    Analysis { message: String },

    /// Architecture violations found by verification
    #[error("{0}")]
    Violations(Violations),
}

impl ModulithError {
    /// Get the severity level of this error
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            // Critical errors - process should terminate
            ModulithError::Config { .. } => ErrorSeverity::Critical,
            ModulithError::ConfigNotFound { .. } => ErrorSeverity::Critical,
            ModulithError::ConfigRead { .. } => ErrorSeverity::Critical,
            ModulithError::ConfigParse { .. } => ErrorSeverity::Critical,
            ModulithError::StdoutWrite { .. } => ErrorSeverity::Critical,
            ModulithError::OutputDirectoryNotFound { .. } => ErrorSeverity::Critical,
            ModulithError::InvalidPath { .. } => ErrorSeverity::Critical,
            ModulithError::ModelNotFound { .. } => ErrorSeverity::Critical,
            ModulithError::MalformedModel { .. } => ErrorSeverity::Critical,
            ModulithError::RootNotFound { .. } => ErrorSeverity::Critical,
            ModulithError::DuplicateModule { .. } => ErrorSeverity::Critical,
            ModulithError::OverlappingModules { .. } => ErrorSeverity::Critical,
            ModulithError::DuplicateNamedInterface { .. } => ErrorSeverity::Critical,
            ModulithError::UnknownModule { .. } => ErrorSeverity::Critical,
            ModulithError::ModelInconsistency { .. } => ErrorSeverity::Critical,

            // Violations and everything else fail the run without being fatal
            _ => ErrorSeverity::Error,
        }
    }

    /// Check if this is a critical error that should terminate the process
    pub fn is_critical(&self) -> bool {
        self.severity() == ErrorSeverity::Critical
    }

    /// Get a user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            ModulithError::JsonParse { file, source, .. } => {
                format!("Invalid class model JSON in '{}': {}. Please check the file format.", file.display(), source)
            }
            ModulithError::Io { source, .. } => {
                format!("File system error: {}. Check disk space and permissions.", source)
            }
            ModulithError::InvalidPath { path, .. } => {
                format!("Invalid path: '{}' is a directory. Please provide a file path for the output.", path.display())
            }
            ModulithError::ConfigNotFound { path, .. } => {
                format!("Configuration file not found at '{}'. Create one with --init or use command line options.", path.display())
            }
            ModulithError::ModelNotFound { path, .. } => {
                format!("No class model (*.json) found at '{}'. Export the class model first.", path.display())
            }
            ModulithError::RootNotFound { root, .. } => {
                format!("The application root '{}' is not part of the class model. Check --root / --root-package.", root)
            }
            ModulithError::DuplicateModule { name, first, second, .. } => {
                format!("Module name '{}' is ambiguous ({} and {}). Rename one of the packages.", name, first, second)
            }
            ModulithError::OutputDirectoryNotFound { path, .. } => {
                format!("Output directory '{}' does not exist. Please create the directory or specify a different output path.", path.display())
            }
            ModulithError::Violations(violations) => {
                format!("{} architecture violation(s) found:\n{}", violations.len(), violations)
            }
            // For other errors, use the standard Display implementation
            _ => self.to_string(),
        }
    }

    /// Returns the violations carried by this error, if any
    pub fn violations(&self) -> Option<&Violations> {
        match self {
            ModulithError::Violations(violations) => Some(violations),
            _ => None,
        }
    }

    /// Create an IO error with context
    pub fn io_error(source: std::io::Error) -> Self {
        ModulithError::Io { source }
    }

    /// Create a JSON parse error with file context
    pub fn json_parse_error(file: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        ModulithError::JsonParse {
            file: file.into(),
            source,
        }
    }

    /// Create a configuration error
    pub fn config_error(message: impl Into<String>) -> Self {
        ModulithError::Config {
            message: message.into(),
        }
    }

    /// Create a malformed model error
    pub fn malformed_model(type_name: impl Into<String>, message: impl Into<String>) -> Self {
        ModulithError::MalformedModel {
            type_name: type_name.into(),
            message: message.into(),
        }
    }

    /// Create a model inconsistency error
    pub fn model_inconsistency(message: impl Into<String>) -> Self {
        ModulithError::ModelInconsistency {
            message: message.into(),
        }
    }

    /// Create an analysis error
    pub fn analysis_error(message: impl Into<String>) -> Self {
        ModulithError::Analysis {
            message: message.into(),
        }
    }
}

// Implement From for common error types
impl From<std::io::Error> for ModulithError {
    fn from(err: std::io::Error) -> Self {
        ModulithError::io_error(err)
    }
}

impl From<toml::de::Error> for ModulithError {
    fn from(err: toml::de::Error) -> Self {
        ModulithError::TomlParse { source: err }
    }
}

impl From<csv::Error> for ModulithError {
    fn from(err: csv::Error) -> Self {
        ModulithError::Csv { source: err }
    }
}

impl From<glob::PatternError> for ModulithError {
    fn from(err: glob::PatternError) -> Self {
        ModulithError::GlobPattern { source: err }
    }
}

impl From<serde_json::Error> for ModulithError {
    fn from(err: serde_json::Error) -> Self {
        ModulithError::JsonSerialize { source: err }
    }
}

impl From<Violations> for ModulithError {
    fn from(violations: Violations) -> Self {
        ModulithError::Violations(violations)
    }
}

/// Result type alias for Modulith operations
pub type Result<T> = std::result::Result<T, ModulithError>;
