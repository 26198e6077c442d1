//! Command-line argument parsing

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

use crate::models::dependency::DependencyDepth;

/// Modulith - verifies the module structure of an application's class model
#[derive(Parser, Debug)]
#[command(name = "modulith")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Verify that application modules only use each other's exposed types")]
#[command(long_about = "Modulith reads a class model exported from a compiled application, treats every direct \
sub-package of the application root as a module, and verifies that modules only depend on types other modules \
expose through their named interfaces. It can also document modules and list a module's dependencies.")]
#[command(after_help = "EXAMPLES:

Verification:
    # Verify the modules below the package of the root type
    modulith --model build/model.json --root com.acme.app.Application

    # Verify the modules below a package, merging a directory of model files
    modulith --model build/model --root-package com.acme.app

    # Skip some model files when reading a directory
    modulith --model build/model --root-package com.acme.app --exclude '*-test.json'

Documentation:
    # Print a summary of every module
    modulith --root-package com.acme.app --describe

    # List the modules 'orders' depends on, transitively
    modulith --root-package com.acme.app --dependencies orders --depth all

Output Options:
    # JSON report
    modulith --output json

    # One CSV row per violation, written to a file
    modulith --output csv --output-file violations.csv

    # Report violations without failing the build
    modulith --no-fail

Configuration:
    # Use a specific configuration file
    modulith --config ./modulith.toml

    # Create a default configuration file
    modulith --init

Logging:
    # Log levels are read from MODULITH_LOG (e.g. MODULITH_LOG=debug)
    MODULITH_LOG=modulith=debug modulith --root-package com.acme.app
")]
pub struct Args {
    /// Class model location
    #[arg(short, long, value_name = "PATH", help = "Class model JSON file, or a directory whose *.json files are merged")]
    pub model: Option<PathBuf>,

    /// Application root type
    #[arg(short, long, value_name = "TYPE", conflicts_with = "root_package", help = "Fully qualified application root type; modules are the direct sub-packages of its package")]
    pub root: Option<String>,

    /// Application root package
    #[arg(long, value_name = "PACKAGE", help = "Application root package, as an alternative to --root")]
    pub root_package: Option<String>,

    /// Exclude model files matching these glob patterns
    #[arg(short, long, value_name = "PATTERN", help = "Glob patterns for model files to skip when reading a directory (can be specified multiple times)")]
    pub exclude: Vec<String>,

    /// Output format (text, json, csv)
    #[arg(short, long, value_enum, help = "Output format: 'text' for humans, 'json' for machine processing, 'csv' for spreadsheets [default: text]")]
    pub output: Option<OutputFormat>,

    /// Output file path (stdout if not specified)
    #[arg(long, value_name = "FILE", help = "File to write output to (uses stdout if not specified)")]
    pub output_file: Option<PathBuf>,

    /// Configuration file path
    #[arg(short, long, value_name = "FILE", help = "Path to configuration file (defaults to .modulith.toml in the current or home directory)")]
    pub config: Option<PathBuf>,

    /// Print module summaries instead of verifying
    #[arg(long, conflicts_with = "dependencies", help = "Print a summary of every module instead of verifying")]
    pub describe: bool,

    /// List the dependencies of a module instead of verifying
    #[arg(long, value_name = "MODULE", help = "List the modules the given module depends on and the packages needed to bootstrap it")]
    pub dependencies: Option<String>,

    /// Depth for --dependencies
    #[arg(long, value_enum, default_value_t = Depth::Immediate, help = "How far --dependencies expands: none, immediate or all")]
    pub depth: Depth,

    /// Disable parallel processing
    #[arg(long, help = "Disable parallel processing (single-threaded)")]
    pub no_parallel: bool,

    /// Number of worker threads
    #[arg(long, value_name = "N", help = "Number of worker threads (defaults to the number of CPUs)")]
    pub threads: Option<usize>,

    /// Do not fail on violations
    #[arg(long, help = "Report violations but exit with status 0")]
    pub no_fail: bool,

    /// Disable colored output
    #[arg(long, help = "Disable colored output (useful when piping output)")]
    pub no_colors: bool,

    /// Disable progress bars
    #[arg(long, help = "Disable progress bars (useful for CI environments)")]
    pub no_progress: bool,

    /// Suppress non-essential output
    #[arg(short, long, help = "Only print the summary line and violations")]
    pub quiet: bool,

    /// Show detailed information
    #[arg(short, long, conflicts_with = "quiet", help = "Include module summaries in the report and log progress")]
    pub verbose: bool,

    /// Initialize a default configuration file
    #[arg(long, help = "Create a default configuration file (.modulith.toml) in the current directory")]
    pub init: bool,
}

/// Output format options
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output
    Text,
    /// JSON output for programmatic consumption
    Json,
    /// CSV output for spreadsheet analysis
    Csv,
}

/// Dependency depth options
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum Depth {
    None,
    Immediate,
    All,
}

impl From<Depth> for DependencyDepth {
    fn from(depth: Depth) -> Self {
        match depth {
            Depth::None => DependencyDepth::None,
            Depth::Immediate => DependencyDepth::Immediate,
            Depth::All => DependencyDepth::All,
        }
    }
}

impl Args {
    /// Parse command-line arguments
    pub fn parse_args() -> Self {
        Args::parse()
    }
}
