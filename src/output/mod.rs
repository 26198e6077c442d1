//! Output formatting and writing functionality

mod formatters;
mod progress;
mod writers;

pub use self::progress::{create_progress_callback, ProgressReporter};
pub use self::writers::{create_writer, FileWriter, OutputWriter, StdoutWriter};

use crate::error::Result;
use crate::models::config::OutputFormat;
use crate::models::summary::{DependencyListing, ModuleSummary, VerificationReport};

/// Trait for different output formatters
pub trait Formatter {
    /// Format the result of a verification run
    fn format(&self, report: &VerificationReport) -> Result<String>;

    /// Format module documentation
    fn format_modules(&self, modules: &[ModuleSummary]) -> Result<String>;

    /// Format a module's dependency set
    fn format_dependencies(&self, listing: &DependencyListing) -> Result<String>;
}

/// Text formatter for human-readable output
pub struct TextFormatter {
    pub use_colors: bool,
    pub verbose: bool,
    pub quiet: bool,
}

impl TextFormatter {
    pub fn new(use_colors: bool, verbose: bool, quiet: bool) -> Self {
        Self {
            use_colors,
            verbose,
            quiet,
        }
    }
}

impl Formatter for TextFormatter {
    fn format(&self, report: &VerificationReport) -> Result<String> {
        // Quiet mode: one summary line plus the violations themselves
        if self.quiet {
            let mut output = format!(
                "Modules: {}, violations: {}, cycles: {}\n",
                report.modules.len(),
                report.violations.len(),
                report.cycles.len()
            );
            for violation in report.violations.iter() {
                output.push_str(&formatters::format_violation_text(violation, self.use_colors));
            }
            return Ok(output);
        }

        Ok(formatters::format_report_text(report, self.use_colors, self.verbose))
    }

    fn format_modules(&self, modules: &[ModuleSummary]) -> Result<String> {
        Ok(modules
            .iter()
            .map(|module| formatters::format_module_text(module, self.use_colors))
            .collect::<Vec<_>>()
            .join("\n"))
    }

    fn format_dependencies(&self, listing: &DependencyListing) -> Result<String> {
        Ok(formatters::format_dependencies_text(listing, self.use_colors))
    }
}

/// JSON formatter for machine-readable output
pub struct JsonFormatter;

impl Formatter for JsonFormatter {
    fn format(&self, report: &VerificationReport) -> Result<String> {
        formatters::format_json(report)
    }

    fn format_modules(&self, modules: &[ModuleSummary]) -> Result<String> {
        formatters::format_json(&modules)
    }

    fn format_dependencies(&self, listing: &DependencyListing) -> Result<String> {
        formatters::format_json(listing)
    }
}

/// CSV formatter for spreadsheet analysis
pub struct CsvFormatter;

impl Formatter for CsvFormatter {
    fn format(&self, report: &VerificationReport) -> Result<String> {
        formatters::format_violations_csv(report)
    }

    fn format_modules(&self, modules: &[ModuleSummary]) -> Result<String> {
        formatters::format_modules_csv(modules)
    }

    fn format_dependencies(&self, listing: &DependencyListing) -> Result<String> {
        formatters::format_dependencies_csv(listing)
    }
}

/// Create a formatter based on the output format
pub fn create_formatter(format: OutputFormat, use_colors: bool, verbose: bool, quiet: bool) -> Box<dyn Formatter> {
    match format {
        OutputFormat::Text => Box::new(TextFormatter::new(use_colors, verbose, quiet)),
        OutputFormat::Json => Box::new(JsonFormatter),
        OutputFormat::Csv => Box::new(CsvFormatter),
    }
}
